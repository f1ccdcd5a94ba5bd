use crate::item::ItemKey;
use crate::pairs::DuplicatePair;
use ahash::{AHashMap, AHashSet};

/// A non-empty set of item keys that are pairwise reachable through
/// duplicate-pair edges.
pub type Cluster = AHashSet<ItemKey>;

/// Incrementally merges duplicate pairs into maximal disjoint clusters.
///
/// Two items end up in the same cluster iff they are connected by a chain
/// of duplicate pairs. For each pair `(a, b)`:
///
/// - neither member clustered: a new cluster `{a, b}` is created;
/// - both clustered: their clusters are merged (no-op if already the same);
/// - one clustered: the other member joins that cluster.
///
/// Replaying a pair is a no-op, and the final partition does not depend on
/// the order pairs arrive in. Membership lookup goes through an item-key
/// index, so each pair is near O(1) instead of a scan over all clusters.
#[derive(Debug, Default)]
pub struct ClusterBuilder {
    /// Clusters in creation order. Merged-away slots become `None` and are
    /// dropped by [`ClusterBuilder::finish`].
    slots: Vec<Option<Cluster>>,
    /// Which slot each clustered item currently lives in.
    membership: AHashMap<ItemKey, usize>,
}

impl ClusterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes `pairs` and returns the resulting clusters.
    pub fn build(pairs: impl IntoIterator<Item = DuplicatePair>) -> Vec<Cluster> {
        let mut builder = Self::new();
        builder.extend(pairs);
        builder.finish()
    }

    pub fn extend(&mut self, pairs: impl IntoIterator<Item = DuplicatePair>) {
        for pair in pairs {
            self.push(pair);
        }
    }

    /// Applies the merge rule for one pair.
    pub fn push(&mut self, pair: DuplicatePair) {
        let (a, b) = pair.into_members();
        match (
            self.membership.get(&a).copied(),
            self.membership.get(&b).copied(),
        ) {
            (None, None) => {
                let slot = self.slots.len();
                self.membership.insert(a.clone(), slot);
                self.membership.insert(b.clone(), slot);
                let mut cluster = Cluster::default();
                cluster.insert(a);
                cluster.insert(b);
                self.slots.push(Some(cluster));
            }
            (Some(sa), Some(sb)) if sa == sb => {}
            (Some(sa), Some(sb)) => self.merge(sa.min(sb), sa.max(sb)),
            (Some(sa), None) => self.add_member(sa, b),
            (None, Some(sb)) => self.add_member(sb, a),
        }
    }

    /// Number of distinct items clustered so far.
    pub fn item_count(&self) -> usize {
        self.membership.len()
    }

    /// Drops vacated slots and returns the clusters in creation order.
    pub fn finish(self) -> Vec<Cluster> {
        self.slots
            .into_iter()
            .flatten()
            .filter(|cluster| !cluster.is_empty())
            .collect()
    }

    fn add_member(&mut self, slot: usize, key: ItemKey) {
        self.membership.insert(key.clone(), slot);
        self.slots[slot].get_or_insert_with(Cluster::default).insert(key);
    }

    /// Moves every member of `from` into `into` and vacates `from`.
    /// Merging into the lower slot keeps cluster order stable.
    fn merge(&mut self, into: usize, from: usize) {
        let Some(moved) = self.slots[from].take() else {
            return;
        };
        for key in &moved {
            self.membership.insert(key.clone(), into);
        }
        self.slots[into]
            .get_or_insert_with(Cluster::default)
            .extend(moved);
    }
}
