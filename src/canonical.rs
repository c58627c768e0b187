// src/canonical.rs
//! Link identity key used by the URL dedup pass.

/// Canonical form of a link: fragment, query string and trailing slashes removed.
///
/// Two links that differ only by tracking parameters collapse to one key. Links
/// whose content depends on the query (pagination) collapse too; that false
/// positive is accepted. Idempotent: `canonicalize_url(canonicalize_url(u)) == canonicalize_url(u)`.
pub fn canonicalize_url(url: &str) -> String {
    let mut s = url.trim();
    if let Some(i) = s.find('#') {
        s = &s[..i];
    }
    if let Some(i) = s.find('?') {
        s = &s[..i];
    }
    // Repeated slashes and whitespace left behind by the cuts go too, or a second
    // pass would strip them and the key would not be stable.
    s.trim_end_matches(|c: char| c == '/' || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fragment_query_and_slash() {
        assert_eq!(canonicalize_url("https://a.example/x?ref=1"), "https://a.example/x");
        assert_eq!(canonicalize_url("https://a.example/x/#comments"), "https://a.example/x");
        assert_eq!(canonicalize_url("https://a.example/x/"), "https://a.example/x");
        assert_eq!(canonicalize_url("https://a.example/x#a?b=1"), "https://a.example/x");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(canonicalize_url(""), "");
        assert_eq!(canonicalize_url("   "), "");
        assert_eq!(canonicalize_url("?utm=x"), "");
    }

    #[test]
    fn double_trailing_slash_is_stable() {
        let once = canonicalize_url("https://a.example/x// ?q");
        assert_eq!(once, "https://a.example/x");
        assert_eq!(canonicalize_url(&once), once);
    }
}
