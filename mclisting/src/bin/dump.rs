use clap::Parser;
use log::{info, LevelFilter};
use mclisting::conversion::convert_reader;
use mclisting::output::{base_name, STDIN_ARGUMENT};
use miette::{IntoDiagnostic, WrapErr};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::fs::File;
use std::io::BufReader;

/// Rebuild a 64 KiB memory image and a symbol table from an annotated listing.
#[derive(Parser, Debug)]
struct Args {
    /// Listing to read, or `-` for standard input
    #[arg(allow_hyphen_values = true)]
    listing: String,
}

fn main() -> miette::Result<()> {
    let Args { listing } = Args::parse();

    TermLogger::init(
        LevelFilter::Info,
        ConfigBuilder::new()
            .add_filter_allow_str("mccommon")
            .add_filter_allow_str("mclisting")
            .add_filter_allow_str("dump")
            .build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .expect("could not set up logging!");

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .context_lines(1)
                .tab_width(4)
                .build(),
        )
    }))?;

    let converted = if listing == STDIN_ARGUMENT {
        info!("Reading listing from standard input");
        convert_reader(std::io::stdin().lock())
    } else {
        let file = File::open(&listing)
            .into_diagnostic()
            .wrap_err_with(|| format!("Could not open {}", listing))?;
        info!("Reading listing from {}", listing);
        convert_reader(BufReader::new(file))
    };
    let dump = converted.map_err(|error| error.into_report(&listing))?;
    info!("Reset vector points at {}", dump.image.reset_vector());

    dump.save(base_name(&listing))?;
    info!("Saved, OK");
    Ok(())
}
