//! Identity-based deduplication of listing items.
//!
//! Concatenating pages can repeat an item (e.g. when a record moves between
//! pages while the user scrolls). The first occurrence wins and keeps its
//! position; later repeats are dropped. Items without a usable identifier
//! are malformed and never reach the output.

use std::collections::HashSet;

/// Anything with an opaque string identity.
pub trait Identified {
    fn id(&self) -> &str;

    /// An item is well formed when its identifier is not blank.
    fn is_well_formed(&self) -> bool {
        !self.id().trim().is_empty()
    }
}

/// Remove repeated identifiers, keeping the first occurrence of each.
///
/// Order-preserving, idempotent, and linear in the input size.
pub fn dedupe<T: Identified>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = SeenIds::default();
    let mut out = Vec::new();
    seen.extend_unique(&mut out, items);
    out
}

/// Identifiers already present in an accumulated listing.
///
/// Lets a loader merge page after page without rescanning what it already
/// holds.
#[derive(Debug, Default, Clone)]
pub struct SeenIds {
    ids: HashSet<String>,
}

impl SeenIds {
    /// Record `id`; returns `false` if it was already present.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        self.ids.insert(id.to_owned())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Append the unseen, well-formed items to `target`.
    ///
    /// Returns `(added, malformed)` counts.
    pub fn extend_unique<T: Identified>(
        &mut self,
        target: &mut Vec<T>,
        items: impl IntoIterator<Item = T>,
    ) -> (usize, usize) {
        let mut added = 0;
        let mut malformed = 0;
        for item in items {
            if !item.is_well_formed() {
                malformed += 1;
                continue;
            }
            if self.insert(item.id()) {
                target.push(item);
                added += 1;
            }
        }
        if malformed > 0 {
            tracing::warn!(malformed, "Dropped catalog items without an identifier");
        }
        (added, malformed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(&'static str, u32);

    impl Identified for Item {
        fn id(&self) -> &str {
            self.0
        }
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.0).collect()
    }

    #[test]
    fn keeps_first_occurrence_in_order() {
        let out = dedupe(vec![Item("A", 1), Item("B", 1), Item("A", 2), Item("C", 1)]);
        assert_eq!(ids(&out), ["A", "B", "C"]);
        // The first A survives, not the later one.
        assert_eq!(out[0], Item("A", 1));
    }

    #[test]
    fn is_idempotent() {
        let input = vec![
            Item("x", 0),
            Item("y", 0),
            Item("x", 1),
            Item("z", 0),
            Item("y", 1),
        ];
        let once = dedupe(input);
        let twice = dedupe(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn drops_malformed_items() {
        let out = dedupe(vec![Item("", 0), Item("a", 0), Item("  ", 0)]);
        assert_eq!(ids(&out), ["a"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let out: Vec<Item> = dedupe(Vec::new());
        assert!(out.is_empty());
    }

    #[test]
    fn incremental_merge_across_pages() {
        let mut seen = SeenIds::default();
        let mut list = Vec::new();

        let (added, _) = seen.extend_unique(&mut list, vec![Item("1", 0), Item("2", 0)]);
        assert_eq!(added, 2);

        let (added, malformed) =
            seen.extend_unique(&mut list, vec![Item("2", 1), Item("3", 0), Item("", 0)]);
        assert_eq!(added, 1);
        assert_eq!(malformed, 1);
        assert_eq!(ids(&list), ["1", "2", "3"]);
        assert_eq!(seen.len(), 3);
    }
}
