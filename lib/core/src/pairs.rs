use crate::item::{ItemKey, NeighborResult, RemoteId};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// An unordered pair of two distinct item keys judged duplicates.
///
/// Members are stored in sorted order so that `{a, b}` and `{b, a}` compare
/// and hash equal. A pair can never contain an item paired with itself;
/// [`DuplicatePair::new`] returns `None` for that case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DuplicatePair {
    a: ItemKey,
    b: ItemKey,
}

impl DuplicatePair {
    pub fn new(first: impl Into<ItemKey>, second: impl Into<ItemKey>) -> Option<Self> {
        let first = first.into();
        let second = second.into();
        if first == second {
            return None;
        }
        let (a, b) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };
        Some(Self { a, b })
    }

    pub fn members(&self) -> (&ItemKey, &ItemKey) {
        (&self.a, &self.b)
    }

    pub fn into_members(self) -> (ItemKey, ItemKey) {
        (self.a, self.b)
    }
}

/// Extracts duplicate pairs from the raw query-pass results.
///
/// For each item whose nearest neighbor lies strictly below `threshold`,
/// the neighbor's remote id is resolved back to its originating item key
/// through the insert-pass mapping and an unordered pair is emitted.
/// Equality with the threshold does NOT count as a duplicate. The same
/// unordered pair may be emitted from both directions; deduplication is
/// the cluster builder's job, not this function's.
///
/// A neighbor id missing from `remote_ids` is skipped: with one index per
/// run the mapping is bijective, so this only happens if the remote side
/// returns a sample that was never inserted.
pub fn extract_duplicate_pairs(
    remote_ids: &AHashMap<ItemKey, RemoteId>,
    neighbors: &AHashMap<ItemKey, NeighborResult>,
    threshold: f64,
) -> Vec<DuplicatePair> {
    let key_by_remote_id: AHashMap<&RemoteId, &ItemKey> =
        remote_ids.iter().map(|(key, id)| (id, key)).collect();

    neighbors
        .iter()
        .filter(|(_, result)| result.distance < threshold)
        .filter_map(|(key, result)| {
            let neighbor_key = key_by_remote_id.get(&result.neighbor)?;
            DuplicatePair::new(key.clone(), (*neighbor_key).clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (AHashMap<ItemKey, RemoteId>, AHashMap<ItemKey, NeighborResult>) {
        let mut remote_ids = AHashMap::new();
        remote_ids.insert("a.jpg".to_string(), RemoteId::from("id-a"));
        remote_ids.insert("b.jpg".to_string(), RemoteId::from("id-b"));
        remote_ids.insert("c.jpg".to_string(), RemoteId::from("id-c"));
        (remote_ids, AHashMap::new())
    }

    #[test]
    fn pair_is_unordered() {
        let p1 = DuplicatePair::new("x", "y").unwrap();
        let p2 = DuplicatePair::new("y", "x").unwrap();
        assert_eq!(p1, p2);
    }

    #[test]
    fn self_pair_is_rejected() {
        assert!(DuplicatePair::new("x", "x").is_none());
    }

    #[test]
    fn emits_pair_below_threshold() {
        let (remote_ids, mut neighbors) = fixtures();
        neighbors.insert("a.jpg".to_string(), NeighborResult::new("id-b", 0.01));
        neighbors.insert("c.jpg".to_string(), NeighborResult::new("id-a", 0.9));

        let pairs = extract_duplicate_pairs(&remote_ids, &neighbors, 0.05);
        assert_eq!(pairs, vec![DuplicatePair::new("a.jpg", "b.jpg").unwrap()]);
    }

    #[test]
    fn distance_equal_to_threshold_is_not_a_duplicate() {
        let (remote_ids, mut neighbors) = fixtures();
        neighbors.insert("a.jpg".to_string(), NeighborResult::new("id-b", 0.05));

        let pairs = extract_duplicate_pairs(&remote_ids, &neighbors, 0.05);
        assert!(pairs.is_empty());
    }

    #[test]
    fn mirrored_results_emit_both_directions() {
        let (remote_ids, mut neighbors) = fixtures();
        neighbors.insert("a.jpg".to_string(), NeighborResult::new("id-b", 0.01));
        neighbors.insert("b.jpg".to_string(), NeighborResult::new("id-a", 0.01));

        let pairs = extract_duplicate_pairs(&remote_ids, &neighbors, 0.05);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], pairs[1]);
    }

    #[test]
    fn self_neighbor_is_dropped() {
        // Should not occur if the remote query excludes the item itself,
        // but a pair of an item with itself must never be emitted.
        let (remote_ids, mut neighbors) = fixtures();
        neighbors.insert("a.jpg".to_string(), NeighborResult::new("id-a", 0.0));

        let pairs = extract_duplicate_pairs(&remote_ids, &neighbors, 0.05);
        assert!(pairs.is_empty());
    }

    #[test]
    fn unknown_neighbor_id_is_skipped() {
        let (remote_ids, mut neighbors) = fixtures();
        neighbors.insert("a.jpg".to_string(), NeighborResult::new("id-zzz", 0.0));

        let pairs = extract_duplicate_pairs(&remote_ids, &neighbors, 0.05);
        assert!(pairs.is_empty());
    }
}
