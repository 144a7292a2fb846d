//! Label normalizers
//!
//! Pure string transforms applied to raw extracted values.

/// Return the part of `label` after the first `delimiter`, or empty if absent.
///
/// `"IMDb rating: 8.4"` with `": "` gives `"8.4"`.
pub fn strip_label_prefix(label: &str, delimiter: &str) -> String {
    label
        .split_once(delimiter)
        .map(|(_, value)| value.to_string())
        .unwrap_or_default()
}

pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Concatenate host and relative path verbatim; no URL validation is done.
pub fn absolute_url(host: &str, path: &str) -> String {
    format!("{host}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_label_prefix() {
        assert_eq!(strip_label_prefix("IMDb rating: 8.4", ": "), "8.4");
        assert_eq!(strip_label_prefix("X rating: 8.4", ": "), "8.4");
        assert_eq!(strip_label_prefix("no delimiter here", ": "), "");
        assert_eq!(strip_label_prefix("", ": "), "");
    }

    #[test]
    fn test_strip_splits_on_first_delimiter_only() {
        assert_eq!(strip_label_prefix("a: b: c", ": "), "b: c");
    }

    #[test]
    fn test_absolute_url_is_verbatim() {
        assert_eq!(
            absolute_url("https://www.imdb.com", "/title/tt0111161/?ref_=sr_t_1"),
            "https://www.imdb.com/title/tt0111161/?ref_=sr_t_1"
        );
        // Malformed paths pass through untouched
        assert_eq!(absolute_url("https://h", "title x"), "https://htitle x");
    }

    #[test]
    fn test_trim() {
        assert_eq!(trim("  1. The Godfather \n"), "1. The Godfather");
    }
}
