//! Neighbor-count membership tests used by threshold rules.

use indexmap::IndexMap;
use smallvec::SmallVec;
use tessera_core::StateIndex;

/// A sorted, deduplicated set of neighbor counts.
///
/// ```
/// use tessera_rules::CountSet;
///
/// let survive: CountSet = [3, 2, 3].into_iter().collect();
/// assert!(survive.contains(2));
/// assert!(!survive.contains(4));
/// assert_eq!(survive.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CountSet {
    counts: SmallVec<[u32; 8]>,
}

impl CountSet {
    /// Whether `count` is a member.
    pub fn contains(&self, count: u32) -> bool {
        self.counts.binary_search(&count).is_ok()
    }

    /// Number of distinct counts.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.counts.iter().copied()
    }
}

impl FromIterator<u32> for CountSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut counts: SmallVec<[u32; 8]> = iter.into_iter().collect();
        counts.sort_unstable();
        counts.dedup();
        Self { counts }
    }
}

/// Per-state neighbor-count requirements.
///
/// Maps a state index to the set of acceptable counts of that state among
/// the neighbors. Entries keep insertion order so evaluation and error
/// reports are deterministic.
///
/// ```
/// use tessera_rules::Membership;
///
/// // Life survival: 2 or 3 live (state 1) neighbors.
/// let survive = Membership::new().with(1u32, [2, 3]);
/// assert!(survive.matches(&[6, 2], true));
/// assert!(!survive.matches(&[4, 4], true));
/// assert!(survive.matches(&[4, 4], false));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Membership {
    entries: IndexMap<StateIndex, CountSet>,
}

impl Membership {
    /// An empty membership, which every count vector satisfies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(
        mut self,
        state: impl Into<StateIndex>,
        counts: impl IntoIterator<Item = u32>,
    ) -> Self {
        self.insert(state, counts);
        self
    }

    /// Set the acceptable counts for `state`, replacing any previous set.
    pub fn insert(&mut self, state: impl Into<StateIndex>, counts: impl IntoIterator<Item = u32>) {
        self.entries
            .insert(state.into(), counts.into_iter().collect());
    }

    /// The acceptable counts for `state`, if constrained.
    pub fn get(&self, state: StateIndex) -> Option<&CountSet> {
        self.entries.get(&state)
    }

    /// Number of constrained states.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no state is constrained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Constrained states in insertion order.
    pub fn states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.entries.keys().copied()
    }

    /// `(state, counts)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (StateIndex, &CountSet)> + '_ {
        self.entries.iter().map(|(&s, c)| (s, c))
    }

    /// Test a decoded count vector.
    ///
    /// With `positivity`, every listed state's count must be in its set;
    /// without, every listed state's count must be outside its set.
    pub fn matches(&self, counts: &[u32], positivity: bool) -> bool {
        self.entries.iter().all(|(state, set)| {
            let count = counts.get(state.as_usize()).copied().unwrap_or(0);
            set.contains(count) == positivity
        })
    }
}

impl<S: Into<StateIndex>, C: IntoIterator<Item = u32>> FromIterator<(S, C)> for Membership {
    fn from_iter<I: IntoIterator<Item = (S, C)>>(iter: I) -> Self {
        let mut membership = Self::new();
        for (state, counts) in iter {
            membership.insert(state, counts);
        }
        membership
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_set_sorts_and_dedups() {
        let set: CountSet = [5, 1, 5, 3].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3, 5]);
    }

    #[test]
    fn empty_membership_always_matches() {
        let m = Membership::new();
        assert!(m.matches(&[0, 8], true));
        assert!(m.matches(&[0, 8], false));
    }

    #[test]
    fn positive_requires_every_state() {
        let m = Membership::new().with(0u32, [5, 6]).with(2u32, [0]);
        assert!(m.matches(&[5, 3, 0], true));
        assert!(!m.matches(&[5, 2, 1], true));
        assert!(!m.matches(&[4, 4, 0], true));
    }

    #[test]
    fn negative_requires_every_state_excluded() {
        let m = Membership::new().with(0u32, [5, 6]).with(2u32, [0]);
        assert!(m.matches(&[4, 3, 1], false));
        // State 2 count is in its set, so the negative test fails.
        assert!(!m.matches(&[4, 4, 0], false));
    }

    #[test]
    fn insert_replaces_and_keeps_order() {
        let mut m: Membership = [(2u32, vec![1]), (0u32, vec![2])].into_iter().collect();
        m.insert(2u32, [7]);
        assert_eq!(
            m.states().collect::<Vec<_>>(),
            vec![StateIndex(2), StateIndex(0)]
        );
        assert!(m.get(StateIndex(2)).unwrap().contains(7));
        assert!(!m.get(StateIndex(2)).unwrap().contains(1));
    }
}
