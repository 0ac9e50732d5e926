//! Deterministic slug derivation for post and category identifiers.

/// Derive a URL-safe slug from a human-readable title.
///
/// Lower-cases the input, drops everything outside ASCII letters, digits,
/// whitespace, `-` and `_`, then collapses each run of whitespace, hyphens
/// and underscores into a single `-`. The result contains only `[a-z0-9-]`
/// and never starts or ends with a hyphen.
///
/// The transform is pure and idempotent: feeding a slug back in returns it
/// unchanged. A title with no ASCII alphanumerics at all yields an empty
/// string, which callers must reject before storing.
pub fn generate(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for ch in title.chars() {
        match ch.to_ascii_lowercase() {
            c @ ('a'..='z' | '0'..='9') => {
                if pending_separator && !slug.is_empty() {
                    slug.push('-');
                }
                pending_separator = false;
                slug.push(c);
            }
            c if c.is_whitespace() || c == '-' || c == '_' => {
                pending_separator = true;
            }
            // Punctuation and non-ASCII are dropped without acting as a
            // separator, so "rock'n'roll" becomes "rocknroll".
            _ => {}
        }
    }

    slug
}

/// True when `s` is already in canonical slug form (and non-empty).
///
/// A canonical slug is a fixed point of [`generate`]; this is how
/// caller-supplied category slugs are checked.
pub fn is_canonical(s: &str) -> bool {
    !s.is_empty() && generate(s) == s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_title() {
        assert_eq!(generate("Hello, World!"), "hello-world");
    }

    #[test]
    fn test_separators_collapse_to_single_hyphen() {
        assert_eq!(generate("a -_  b"), "a-b");
        assert_eq!(generate("rust__async   runtime"), "rust-async-runtime");
    }

    #[test]
    fn test_edge_separators_are_trimmed() {
        assert_eq!(generate("  --Hello--  "), "hello");
        assert_eq!(generate("_leading and trailing_"), "leading-and-trailing");
    }

    #[test]
    fn test_punctuation_is_dropped_silently() {
        assert_eq!(generate("rock'n'roll"), "rocknroll");
        assert_eq!(generate("v1.2.3"), "v123");
    }

    #[test]
    fn test_non_ascii_is_dropped() {
        assert_eq!(generate("Café au lait"), "caf-au-lait");
        assert_eq!(generate("日本語"), "");
    }

    #[test]
    fn test_no_alphanumerics_yields_empty() {
        assert_eq!(generate("!!!"), "");
        assert_eq!(generate(""), "");
    }

    #[test]
    fn test_output_alphabet_and_edges() {
        let titles = [
            "Hello, World!",
            "  Mixed CASE and   spaces ",
            "under_scores-and-hyphens",
            "100% organic",
            "Ünïcödé Señor",
            "a",
        ];
        for title in titles {
            let slug = generate(title);
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "unexpected character in {slug:?}"
            );
            assert!(!slug.starts_with('-'), "leading hyphen in {slug:?}");
            assert!(!slug.ends_with('-'), "trailing hyphen in {slug:?}");
        }
    }

    #[test]
    fn test_idempotent() {
        let titles = ["Hello, World!", "a - b_c", "  weird.. ti&tle  ", "99 bottles"];
        for title in titles {
            let once = generate(title);
            assert_eq!(generate(&once), once, "not idempotent for {title:?}");
        }
    }

    #[test]
    fn test_is_canonical() {
        assert!(is_canonical("hello-world"));
        assert!(is_canonical("tech"));
        assert!(is_canonical("v2"));
        assert!(!is_canonical(""));
        assert!(!is_canonical("Hello"));
        assert!(!is_canonical("two  words"));
        assert!(!is_canonical("-leading"));
        assert!(!is_canonical("trailing-"));
        assert!(!is_canonical("under_score"));
    }
}
