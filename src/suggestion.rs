//! Lookup result types.

/// A dictionary term reachable from a query within the edit-distance bound.
///
/// Suggestions compare field-by-field in declaration order (term, then
/// distance, then frequency), giving a stable total order. Ranked lookup
/// output is ordered separately, by ascending distance and descending
/// frequency.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Suggestion {
    /// The matched dictionary term.
    pub term: String,
    /// Edit distance from the query to `term`.
    pub distance: usize,
    /// The term's accumulated dictionary frequency.
    pub frequency: i64,
}

impl Suggestion {
    /// Create a suggestion.
    pub fn new(term: impl Into<String>, distance: usize, frequency: i64) -> Self {
        Suggestion {
            term: term.into(),
            distance,
            frequency,
        }
    }
}

/// Controls how many suggestions a lookup returns and how candidates are
/// pruned while it runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Verbosity {
    /// The single best suggestion: smallest distance, ties broken by
    /// highest frequency.
    Top,
    /// All suggestions at the smallest distance found.
    #[default]
    Closest,
    /// Every suggestion within the bound, unpruned and unsorted.
    All,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_equality() {
        let a = Suggestion::new("hello", 1, 100);
        let b = Suggestion::new("hello", 1, 100);
        assert_eq!(a, b);
        assert_ne!(a, Suggestion::new("hello", 2, 100));
    }

    #[test]
    fn test_suggestion_total_order_is_field_by_field() {
        let mut suggestions = vec![
            Suggestion::new("b", 0, 5),
            Suggestion::new("a", 2, 1),
            Suggestion::new("a", 1, 9),
        ];
        suggestions.sort();
        assert_eq!(suggestions[0].term, "a");
        assert_eq!(suggestions[0].distance, 1);
        assert_eq!(suggestions[2].term, "b");
    }

    #[test]
    fn test_verbosity_default_is_closest() {
        assert_eq!(Verbosity::default(), Verbosity::Closest);
    }
}
