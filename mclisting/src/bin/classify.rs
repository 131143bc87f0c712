use clap::Parser;
use mclisting::classifying::classify;
use miette::{IntoDiagnostic, NamedSource};

/// Print how each line of a listing is classified.
#[derive(Parser, Debug)]
struct Args {
    listing: String,
}

fn main() -> miette::Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .context_lines(1)
                .tab_width(4)
                .build(),
        )
    }))?;
    let Args { listing } = Args::parse();
    let contents = std::fs::read_to_string(&listing).into_diagnostic()?;

    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let classified = classify(line).map_err(|error| {
            miette::Error::new(error).with_source_code(NamedSource::new(
                format!("{}:{}", listing, index + 1),
                line.to_owned(),
            ))
        })?;
        println!("{:>5} {:?}", index + 1, classified);
    }

    Ok(())
}
