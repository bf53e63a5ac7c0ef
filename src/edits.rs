//! Delete-variant generation for index construction.
//!
//! Only the leading prefix of a term is indexed: every unique string
//! reachable by deleting up to `max_edit_distance` bytes from the prefix
//! becomes a posting key. Variants are raw byte strings; deleting by byte
//! index may split a multi-byte character, which is fine because variants
//! are only ever fingerprinted, never rendered.

use rustc_hash::FxHashSet;

/// Enumerate the unique delete-variants of `term`'s prefix.
///
/// The returned set contains the prefix of `min(term.len(), prefix_length)`
/// bytes itself, every string reachable from it by deleting between 1 and
/// `max_edit_distance` bytes, and the empty string when the whole term is no
/// longer than `max_edit_distance`. Iteration order is unspecified; callers
/// must treat the output as a set.
///
/// # Example
///
/// ```rust
/// use symdex::edits::prefix_deletes;
///
/// let variants = prefix_deletes("abc", 1, 7);
/// assert!(variants.contains(b"abc".as_slice()));
/// assert!(variants.contains(b"ab".as_slice()));
/// assert!(variants.contains(b"bc".as_slice()));
/// assert!(variants.contains(b"ac".as_slice()));
/// assert_eq!(variants.len(), 4);
/// ```
#[must_use]
pub fn prefix_deletes(
    term: &str,
    max_edit_distance: usize,
    prefix_length: usize,
) -> FxHashSet<Vec<u8>> {
    let mut seen = FxHashSet::default();

    // Terms short enough to be deleted away entirely also post under the
    // empty string.
    if term.len() <= max_edit_distance {
        seen.insert(Vec::new());
    }

    let prefix = &term.as_bytes()[..term.len().min(prefix_length)];
    seen.insert(prefix.to_vec());

    deletes_within(prefix, 0, max_edit_distance, &mut seen);

    seen
}

/// Recursively collect deletions of `word`, depth-bounded by `max`.
fn deletes_within(word: &[u8], depth: usize, max: usize, seen: &mut FxHashSet<Vec<u8>>) {
    let depth = depth + 1;
    if depth > max {
        return;
    }

    for i in 0..word.len() {
        let mut variant = word.to_vec();
        variant.remove(i);

        if seen.insert(variant.clone()) {
            deletes_within(&variant, depth, max, seen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_deletes_includes_prefix_itself() {
        let variants = prefix_deletes("hello", 2, 7);
        assert!(variants.contains(b"hello".as_slice()));
    }

    #[test]
    fn test_prefix_deletes_depth_one() {
        let variants = prefix_deletes("abc", 1, 7);
        let expected: FxHashSet<Vec<u8>> = [&b"abc"[..], b"bc", b"ac", b"ab"]
            .iter()
            .map(|v| v.to_vec())
            .collect();
        assert_eq!(variants, expected);
    }

    #[test]
    fn test_prefix_deletes_depth_two_deduplicates() {
        // "hello" has two 'l' deletions that collapse to the same variant.
        let variants = prefix_deletes("hello", 2, 7);
        assert!(variants.contains(b"helo".as_slice()));
        assert!(variants.contains(b"hll".as_slice()));
        assert!(variants.contains(b"heo".as_slice()));
        // Each variant appears once regardless of how many deletion paths
        // reach it.
        let helo_count = variants.iter().filter(|v| v.as_slice() == b"helo").count();
        assert_eq!(helo_count, 1);
    }

    #[test]
    fn test_prefix_deletes_short_term_includes_empty() {
        let variants = prefix_deletes("ab", 2, 7);
        assert!(variants.contains(&Vec::new()));
        assert!(variants.contains(b"ab".as_slice()));
        assert!(variants.contains(b"a".as_slice()));
        assert!(variants.contains(b"b".as_slice()));
        assert_eq!(variants.len(), 4);
    }

    #[test]
    fn test_prefix_deletes_long_term_excludes_empty() {
        let variants = prefix_deletes("abc", 2, 7);
        assert!(!variants.contains(&Vec::new()));
    }

    #[test]
    fn test_prefix_deletes_truncates_to_prefix() {
        // Only the first 7 bytes produce variants.
        let variants = prefix_deletes("programming", 2, 7);
        assert!(variants.contains(b"program".as_slice()));
        assert!(!variants.contains(b"programming".as_slice()));
        for variant in &variants {
            assert!(variant.len() >= 5 && variant.len() <= 7);
        }
    }

    #[test]
    fn test_prefix_deletes_zero_distance() {
        // Depth 0 indexes the prefix alone.
        let variants = prefix_deletes("word", 0, 7);
        let expected: FxHashSet<Vec<u8>> = [b"word".to_vec()].into_iter().collect();
        assert_eq!(variants, expected);
    }

    #[test]
    fn test_prefix_deletes_multibyte_splits_bytes() {
        // 'é' is two bytes; deletions slice through it without issue.
        let variants = prefix_deletes("é", 1, 7);
        assert!(variants.contains(&vec![0xC3, 0xA9]));
        assert!(variants.contains(&vec![0xC3]));
        assert!(variants.contains(&vec![0xA9]));
    }
}
