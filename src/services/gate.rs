//! Production gate: keeps the scanner from running on non-production sites.

/// Hostname fragments identifying non-production hosting.
const NON_PRODUCTION_FRAGMENTS: &[&str] = &["wpengine.com", "staging.", "localhost", ".local"];

/// Case-sensitive substring test of the site's public base URL against the
/// denylist. A legitimate domain that merely contains a fragment as part of
/// a longer hostname also fails the gate.
///
/// Both the scheduling step and every scan execution call this first and
/// no-op when it returns false.
pub fn is_production(base_url: &str) -> bool {
    !NON_PRODUCTION_FRAGMENTS
        .iter()
        .any(|fragment| base_url.contains(fragment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_domain_is_production() {
        assert!(is_production("https://example.com"));
    }

    #[test]
    fn hosting_fragment_fails_the_gate() {
        assert!(!is_production("https://mysite.wpengine.com"));
    }

    #[test]
    fn staging_subdomain_fails_the_gate() {
        assert!(!is_production("https://staging.example.com"));
    }

    #[test]
    fn localhost_fails_the_gate() {
        assert!(!is_production("http://localhost:8080"));
    }

    #[test]
    fn fragment_anywhere_in_the_url_fails_the_gate() {
        // Substring semantics, so a path component also trips it.
        assert!(!is_production("https://example.com/wpengine.com-migration"));
    }

    #[test]
    fn check_is_case_sensitive() {
        // Uppercase hosting fragments pass the gate. Documented behavior,
        // not an oversight to fix silently.
        assert!(is_production("https://MySite.WPEngine.com"));
    }
}
