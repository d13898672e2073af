//! Ordered first-match rule chains.

use rand::Rng;
use tessera_core::StateIndex;

use crate::error::RuleChainError;
use crate::rule::Rule;
use crate::view::CellView;

/// An ordered list of rules evaluated with first-match-wins semantics.
///
/// ```
/// use tessera_rules::{Membership, Rule, RuleChain};
///
/// let life = RuleChain::new()
///     .with(Rule::classic(0u32, 1u32, true, Membership::new().with(1u32, [3])))
///     .with(Rule::classic(1u32, 0u32, false, Membership::new().with(1u32, [2, 3])));
/// assert_eq!(life.len(), 2);
/// assert!(life.validate(2, 2).is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleChain {
    rules: Vec<Rule>,
}

impl RuleChain {
    /// An empty chain. Every cell keeps its state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append a rule at the lowest priority.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Insert a rule at `index`, shifting later rules down in priority.
    ///
    /// # Panics
    ///
    /// If `index > len`.
    pub fn insert(&mut self, index: usize, rule: Rule) {
        self.rules.insert(index, rule);
    }

    /// Remove and return the rule at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<Rule> {
        (index < self.rules.len()).then(|| self.rules.remove(index))
    }

    /// Remove every rule.
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the chain has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rule at `index`.
    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    /// Rules in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Whether any rule draws from the generator.
    pub fn is_stochastic(&self) -> bool {
        self.rules.iter().any(Rule::is_stochastic)
    }

    /// Validate every rule, reporting the first failure with its position.
    pub fn validate(&self, dimensionality: usize, state_count: usize) -> Result<(), RuleChainError> {
        for (index, rule) in self.rules.iter().enumerate() {
            rule.validate(dimensionality, state_count)
                .map_err(|error| RuleChainError {
                    index,
                    rule: rule.name(),
                    error,
                })?;
        }
        Ok(())
    }

    /// Next state for one cell: the first rule that fires, else `current`.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        current: StateIndex,
        counts: &[u32],
        cell: &CellView<'_>,
        rng: &mut R,
    ) -> StateIndex {
        self.rules
            .iter()
            .find_map(|rule| rule.evaluate(current, counts, cell, rng))
            .unwrap_or(current)
    }
}

impl FromIterator<Rule> for RuleChain {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl Extend<Rule> for RuleChain {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}

impl<'a> IntoIterator for &'a RuleChain {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleError;
    use crate::membership::Membership;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tessera_core::{StateCode, StateEncoding};
    use tessera_space::{BoundaryPolicy, GridShape};

    fn with_view<T>(f: impl FnOnce(&CellView<'_>) -> T) -> T {
        let shape = GridShape::cube(2, 3).unwrap();
        let encoding = StateEncoding::new(2, 3).unwrap();
        let grid: Vec<StateCode> = vec![1; shape.cell_count()];
        let view = CellView::new(&grid, &shape, BoundaryPolicy::Zero, &encoding, 4);
        f(&view)
    }

    fn any_counts() -> Membership {
        Membership::new()
    }

    #[test]
    fn empty_chain_keeps_state() {
        let chain = RuleChain::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        with_view(|cell| {
            assert_eq!(
                chain.evaluate(StateIndex(2), &[8, 0, 0], cell, &mut rng),
                StateIndex(2)
            );
        });
    }

    #[test]
    fn falls_through_declining_rules() {
        let chain: RuleChain = [
            Rule::classic(1u32, 2u32, true, any_counts()),
            Rule::Majority,
            Rule::classic(0u32, 2u32, true, any_counts()),
        ]
        .into_iter()
        .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        with_view(|cell| {
            // Majority ties at 4, so the third rule decides.
            assert_eq!(
                chain.evaluate(StateIndex(0), &[4, 4, 0], cell, &mut rng),
                StateIndex(2)
            );
        });
    }

    #[test]
    fn insert_and_remove_change_priority() {
        let mut chain = RuleChain::new().with(Rule::classic(0u32, 1u32, true, any_counts()));
        chain.insert(0, Rule::classic(0u32, 2u32, true, any_counts()));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        with_view(|cell| {
            assert_eq!(
                chain.evaluate(StateIndex(0), &[8, 0, 0], cell, &mut rng),
                StateIndex(2)
            );
        });
        assert!(chain.remove(0).is_some());
        assert!(chain.remove(5).is_none());
        with_view(|cell| {
            assert_eq!(
                chain.evaluate(StateIndex(0), &[8, 0, 0], cell, &mut rng),
                StateIndex(1)
            );
        });
        chain.clear();
        assert!(chain.is_empty());
    }

    #[test]
    fn validate_reports_index_and_name() {
        let chain = RuleChain::new()
            .with(Rule::Majority)
            .with(Rule::probabilistic(0u32, 1u32, 2.0, any_counts()));
        let err = chain.validate(2, 3).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.rule, "probabilistic");
        assert_eq!(
            err.error,
            RuleError::ProbabilityOutOfRange { probability: 2.0 }
        );
        assert!(err.to_string().starts_with("rule 1 (probabilistic)"));
    }

    #[test]
    fn stochastic_detection() {
        assert!(!RuleChain::new().with(Rule::Majority).is_stochastic());
        assert!(RuleChain::new()
            .with(Rule::Majority)
            .with(Rule::Random)
            .is_stochastic());
    }

    proptest! {
        #[test]
        fn first_matching_rule_wins(
            first in 0u32..3,
            second in 0u32..3,
            current in 0u32..3,
            c0 in 0u32..9,
        ) {
            let chain = RuleChain::new()
                .with(Rule::classic(current, first, true, any_counts()))
                .with(Rule::classic(current, second, true, any_counts()));
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let next = with_view(|cell| {
                chain.evaluate(StateIndex(current), &[c0, 8 - c0.min(8), 0], cell, &mut rng)
            });
            prop_assert_eq!(next, StateIndex(first));
        }
    }
}
