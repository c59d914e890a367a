//! Wildcard matching for module name filters.
//!
//! `*` spans any run of characters; everything else is literal. This is
//! deliberately a restricted glob: no `?`, no character classes, no escape
//! for a literal `*`.

/// Check whether `name` matches the wildcard `pattern`.
///
/// A pattern without `*` is compared for exact equality. Fragments between
/// wildcards must appear in `name` in order without overlapping; the first
/// and last fragments are anchored to the start and end of the name unless
/// the pattern begins or ends with `*`.
pub fn matches(name: &str, pattern: &str) -> bool {
    if !pattern.contains('*') {
        return name == pattern;
    }
    if pattern == "*" {
        return true;
    }

    let fragments: Vec<&str> = pattern.split('*').collect();
    let last = fragments.len() - 1;
    let mut pos = 0;

    for (i, fragment) in fragments.iter().enumerate() {
        if fragment.is_empty() {
            continue;
        }
        if i == 0 {
            // Pattern does not start with '*': fragment anchors the prefix.
            if !name.starts_with(fragment) {
                return false;
            }
            pos = fragment.len();
        } else if i == last {
            // Pattern does not end with '*': fragment anchors the suffix and
            // must not reach back into already-consumed input.
            if !name[pos..].ends_with(fragment) {
                return false;
            }
        } else {
            // Greedy left-to-right scan: first occurrence after the previous
            // fragment wins.
            match name[pos..].find(fragment) {
                Some(idx) => pos += idx + fragment.len(),
                None => return false,
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::matches;

    #[test]
    fn exact_match_without_wildcard() {
        assert!(matches("storage-account", "storage-account"));
        assert!(!matches("storage-account", "storage"));
        assert!(!matches("storage", "storage-account"));
        assert!(!matches("Storage-Account", "storage-account"));
    }

    #[test]
    fn lone_star_matches_everything() {
        assert!(matches("storage-account", "*"));
        assert!(matches("", "*"));
    }

    #[test]
    fn prefix_patterns() {
        assert!(matches("storage-account", "storage-*"));
        assert!(!matches("storage-account", "key-*"));
        assert!(matches("storage-account", "storage-account*"));
    }

    #[test]
    fn suffix_patterns() {
        assert!(matches("storage-account", "*account"));
        assert!(!matches("storage-account", "*vault"));
    }

    #[test]
    fn contains_patterns() {
        assert!(matches("my-storage-account", "*storage*"));
        assert!(!matches("my-network", "*storage*"));
    }

    #[test]
    fn multiple_fragments_must_appear_in_order() {
        assert!(matches("my-storage-account", "my*storage*account"));
        assert!(!matches("my-account-storage", "my*storage*account"));
    }

    #[test]
    fn fragments_do_not_overlap() {
        // Both fragments need their own "aa"; a single occurrence is not
        // allowed to satisfy both.
        assert!(!matches("xaax", "*aa*aa*"));
        assert!(matches("xaayaax", "*aa*aa*"));
    }

    #[test]
    fn suffix_must_not_reuse_consumed_input() {
        assert!(!matches("ab", "ab*b"));
        assert!(matches("abab", "ab*b"));
    }

    #[test]
    fn empty_name() {
        assert!(!matches("", "storage"));
        assert!(matches("", ""));
        assert!(!matches("", "a*"));
    }
}
