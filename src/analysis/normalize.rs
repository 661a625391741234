//! Text normalization ahead of term statistics

/// Reduce text to lowercase ASCII letters separated by single spaces
///
/// Every run of characters outside `a-zA-Z` (digits, punctuation, whitespace,
/// non-ASCII letters) collapses to one space; leading and trailing spaces are
/// dropped. Symbol-only input yields an empty string.
pub fn normalize_text(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            if pending_space && !normalized.is_empty() {
                normalized.push(' ');
            }
            pending_space = false;
            normalized.push(c.to_ascii_lowercase());
        } else {
            pending_space = true;
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_normal_form(s: &str) {
        assert!(s.chars().all(|c| c.is_ascii_lowercase() || c == ' '), "{s:?}");
        assert!(!s.contains("  "), "{s:?}");
        assert_eq!(s, s.trim(), "{s:?}");
    }

    #[test]
    fn test_lowercases_and_strips_symbols() {
        assert_eq!(normalize_text("Great product!!! 10/10"), "great product");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize_text("  too \t\n many   spaces "), "too many spaces");
    }

    #[test]
    fn test_symbols_split_words() {
        assert_eq!(normalize_text("don't"), "don t");
        assert_eq!(normalize_text("e-mail"), "e mail");
    }

    #[test]
    fn test_symbol_only_input_is_empty() {
        assert_eq!(normalize_text("!!! 123 ???"), "");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_non_ascii_letters_are_separators() {
        assert_eq!(normalize_text("café crème"), "caf cr me");
        assert_eq!(normalize_text("日本語 text"), "text");
    }

    #[test]
    fn test_output_alphabet_over_varied_inputs() {
        let inputs = [
            "Hello, World!",
            "\u{1F600} emoji \u{1F600}",
            "MiXeD CaSe\r\nLines",
            "tabs\tand\u{00A0}nbsp",
            "a1b2c3",
            "   ",
            "---",
            "Ünïcödé wörds",
        ];
        for input in inputs {
            assert_normal_form(&normalize_text(input));
        }
    }
}
