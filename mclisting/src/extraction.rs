use mccommon::{Address, SymbolRecord};

/// Cleans up the text of a symbol line: `<name>` and `name:` both become `name`, anything else
/// is kept as written. An empty name is not an error.
pub fn extract(address: Address, text: &str) -> SymbolRecord {
    let name = text
        .strip_prefix('<')
        .and_then(|inner| inner.strip_suffix('>'))
        .or_else(|| text.strip_suffix(':'))
        .unwrap_or(text);
    SymbolRecord::new(address, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of(text: &str) -> String {
        extract(Address::new(0x4400), text).name().clone()
    }

    #[test]
    fn test_cleanup_rules() {
        assert_eq!(name_of("<_start>"), "_start");
        assert_eq!(name_of("loop:"), "loop");
        assert_eq!(name_of("main"), "main");
        assert_eq!(name_of("<__do_nothing>:"), "<__do_nothing>");
        assert_eq!(name_of("<a:>"), "a:");
        assert_eq!(name_of("<half"), "<half");
    }

    #[test]
    fn test_empty_names_accepted() {
        assert_eq!(name_of(":"), "");
        assert_eq!(name_of("<>"), "");
        assert_eq!(name_of("<"), "<");
    }

    #[test]
    fn test_keeps_address() {
        let record = extract(Address::new(0x10), "<io>");
        assert_eq!(record, SymbolRecord::new(Address::new(0x10), "io"));
    }
}
