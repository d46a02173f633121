//! Label to name/id conversion

/// Convert a human label into a token usable as an HTML `name` or `id`.
///
/// Lower-cases the input, collapses every run of characters outside
/// `[a-z0-9_]` into a single `-` and trims separators from both ends.
/// No de-duplication is attempted; two labels that simplify to the same
/// token will collide.
///
/// ```rust
/// use formflow::forms::simplify;
///
/// assert_eq!(simplify("Your Name"), "your-name");
/// assert_eq!(simplify("form-Contact Us!"), "form-contact-us");
/// assert_eq!(simplify("spam_me"), "spam_me");
/// ```
#[must_use]
pub fn simplify(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_separator = false;

    for c in label.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(c);
        } else {
            pending_separator = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplify_spaces_and_case() {
        assert_eq!(simplify("About you..."), "about-you");
        assert_eq!(simplify("  Legal   stuff "), "legal-stuff");
    }

    #[test]
    fn test_simplify_keeps_underscores_and_digits() {
        assert_eq!(simplify("extra_2"), "extra_2");
        assert_eq!(simplify("Complaints-3"), "complaints-3");
    }

    #[test]
    fn test_simplify_non_ascii_is_separator() {
        assert_eq!(simplify("café bar"), "caf-bar");
        assert_eq!(simplify("!!!"), "");
    }

    #[test]
    fn test_simplify_is_idempotent() {
        let once = simplify("Were you alive when you celebrated?");
        assert_eq!(simplify(&once), once);
    }
}
