//! Source-site pattern matching
//!
//! A configured source site is a raw user string: either a bare hostname
//! ("douyin.com") or a full URL ("https://www.douyin.com/feed"). Matching
//! follows one canonical rule: after stripping a leading "www." from both
//! sides, the page hostname must equal the pattern hostname or end with
//! `"." + pattern`. The rule is directional: pattern "example.com"
//! matches "m.example.com", but pattern "m.example.com" never matches
//! "example.com". A bidirectional substring variant existed historically
//! and matched unrelated hosts; it is not implemented here.

use crate::url::{extract_host, has_http_scheme, strip_www};

// =============================================================================
// Pattern Normalization
// =============================================================================

/// Reduce a raw source-site pattern to a comparable hostname.
///
/// Full URLs have their hostname extracted; if extraction fails the raw
/// trimmed string is used as-is (the user typed something odd, match it
/// literally rather than dropping the entry). A leading "www." is stripped.
pub fn normalize_pattern(pattern: &str) -> &str {
    let trimmed = pattern.trim();
    let host = if has_http_scheme(trimmed) {
        extract_host(trimmed).unwrap_or(trimmed)
    } else {
        trimmed
    };
    strip_www(host)
}

// =============================================================================
// Matching
// =============================================================================

/// Equal or dot-separated suffix, ASCII case-insensitive.
/// Directional: `host` may be a subdomain of `pattern`, never the reverse.
#[inline]
fn host_matches_pattern(host: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    if host.eq_ignore_ascii_case(pattern) {
        return true;
    }
    // host ends with "." + pattern
    if host.len() > pattern.len() {
        let boundary = host.len() - pattern.len() - 1;
        return host.as_bytes()[boundary] == b'.'
            && host[boundary + 1..].eq_ignore_ascii_case(pattern);
    }
    false
}

/// Is `current_url` in scope for redirect/reminder logic?
///
/// Returns false, never an error, for malformed URLs. A URL the matcher
/// cannot parse must not have its navigation blocked. Short-circuits on the
/// first matching pattern; order does not affect the outcome.
pub fn matches(current_url: &str, patterns: &[String]) -> bool {
    let host = match extract_host(current_url) {
        Some(host) => strip_www(host),
        None => return false,
    };

    patterns
        .iter()
        .any(|pattern| host_matches_pattern(host, normalize_pattern(pattern)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pats(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match() {
        assert!(matches("https://douyin.com/feed", &pats(&["douyin.com"])));
    }

    #[test]
    fn test_subdomain_matches_pattern() {
        assert!(matches("https://m.douyin.com/", &pats(&["douyin.com"])));
        assert!(matches("https://a.b.douyin.com/", &pats(&["douyin.com"])));
    }

    #[test]
    fn test_pattern_subdomain_does_not_match_parent() {
        // Directional: a narrower pattern must not match the parent domain.
        assert!(!matches("https://douyin.com/", &pats(&["m.douyin.com"])));
    }

    #[test]
    fn test_www_stripped_both_sides() {
        assert!(matches("https://www.douyin.com/", &pats(&["douyin.com"])));
        assert!(matches("https://douyin.com/", &pats(&["www.douyin.com"])));
        assert!(matches("https://www.douyin.com/", &pats(&["www.douyin.com"])));
    }

    #[test]
    fn test_no_substring_matching() {
        // "a.com" must not match hosts that merely contain it.
        assert!(!matches("https://xa.comfy.io/", &pats(&["a.com"])));
        assert!(!matches("https://nota.company/", &pats(&["a.com"])));
    }

    #[test]
    fn test_unrelated_host() {
        assert!(!matches("https://other.com/", &pats(&["douyin.com"])));
    }

    #[test]
    fn test_full_url_pattern() {
        assert!(matches(
            "https://www.bilibili.com/video/x",
            &pats(&["https://www.bilibili.com/"]),
        ));
    }

    #[test]
    fn test_malformed_url_never_matches() {
        assert!(!matches("not a url", &pats(&["not a url"])));
        assert!(!matches("", &pats(&["douyin.com"])));
    }

    #[test]
    fn test_malformed_pattern_falls_back_to_raw() {
        // "http://" with no host fails extraction; raw string is compared
        // literally and cannot match a real hostname.
        assert!(!matches("https://douyin.com/", &pats(&["http://"])));
    }

    #[test]
    fn test_empty_pattern_list() {
        assert!(!matches("https://douyin.com/", &[]));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(matches("https://WWW.Douyin.COM/", &pats(&["douyin.com"])));
    }

    #[test]
    fn test_order_does_not_matter() {
        let hit = pats(&["other.com", "douyin.com"]);
        let hit_rev = pats(&["douyin.com", "other.com"]);
        assert!(matches("https://douyin.com/", &hit));
        assert!(matches("https://douyin.com/", &hit_rev));
    }

    #[test]
    fn test_normalize_pattern() {
        assert_eq!(normalize_pattern("  douyin.com "), "douyin.com");
        assert_eq!(normalize_pattern("https://www.douyin.com/feed"), "douyin.com");
        assert_eq!(normalize_pattern("www.douyin.com"), "douyin.com");
    }
}
