//! The closed set of transition rules.

use rand::Rng;
use tessera_core::StateIndex;

use crate::error::RuleError;
use crate::membership::Membership;
use crate::view::CellView;

/// Deterministic threshold rule.
///
/// Fires only for cells in `start`, and only when `membership` holds with
/// the given `positivity`. Yields `end`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassicRule {
    /// State a cell must be in for the rule to apply.
    pub start: StateIndex,
    /// State the cell moves to when the rule fires.
    pub end: StateIndex,
    /// `true`: every listed count must be in its set. `false`: every listed
    /// count must be outside it.
    pub positivity: bool,
    /// Per-state neighbor-count requirements.
    pub membership: Membership,
}

/// Threshold rule with a coin flip.
///
/// Gated like [`ClassicRule`]. Once the gate passes the rule always
/// matches: `end` with the given probability, otherwise `start`.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilisticRule {
    /// State a cell must be in for the rule to apply.
    pub start: StateIndex,
    /// State the cell moves to on a successful draw.
    pub end: StateIndex,
    /// Chance of moving to `end`, in `[0, 1]`.
    pub probability: f64,
    /// Per-state neighbor-count requirements.
    pub membership: Membership,
    /// See [`ClassicRule::positivity`].
    pub positivity: bool,
}

/// Wolfram elementary automaton table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementaryTableRule {
    /// Rule number; bit `k` is the output for neighborhood `k = l<<2 | c<<1 | r`.
    pub rule_number: u8,
}

impl ElementaryTableRule {
    /// Output bit for a `(left, center, right)` neighborhood.
    pub fn lookup(self, left: bool, center: bool, right: bool) -> bool {
        let k = (u8::from(left) << 2) | (u8::from(center) << 1) | u8::from(right);
        (self.rule_number >> k) & 1 == 1
    }
}

/// A transition rule.
///
/// `evaluate` returns `Some(next)` when the rule fires and `None` when it
/// declines, letting the chain fall through to the next rule.
#[derive(Clone, Debug, PartialEq)]
pub enum Rule {
    /// See [`ClassicRule`].
    Classic(ClassicRule),
    /// See [`ProbabilisticRule`].
    Probabilistic(ProbabilisticRule),
    /// Picks a state with probability proportional to its neighbor count.
    /// Keeps the current state when there are no neighbors at all.
    WeightedRandom,
    /// Picks the state with the strictly largest neighbor count. Declines
    /// on a tie at the maximum.
    Majority,
    /// Picks a state uniformly at random.
    Random,
    /// See [`ElementaryTableRule`]. 1-D, 2-state only.
    ElementaryTable(ElementaryTableRule),
    /// XOR of the left and right neighbors (rule 90 without a table).
    /// 1-D, 2-state only.
    Parity,
}

impl Rule {
    /// A [`ClassicRule`].
    pub fn classic(
        start: impl Into<StateIndex>,
        end: impl Into<StateIndex>,
        positivity: bool,
        membership: Membership,
    ) -> Self {
        Self::Classic(ClassicRule {
            start: start.into(),
            end: end.into(),
            positivity,
            membership,
        })
    }

    /// A positive [`ProbabilisticRule`]. Chain [`negated`](Self::negated)
    /// for the negative form.
    pub fn probabilistic(
        start: impl Into<StateIndex>,
        end: impl Into<StateIndex>,
        probability: f64,
        membership: Membership,
    ) -> Self {
        Self::Probabilistic(ProbabilisticRule {
            start: start.into(),
            end: end.into(),
            probability,
            membership,
            positivity: true,
        })
    }

    /// Flip the membership test of a [`ClassicRule`] or
    /// [`ProbabilisticRule`]. Other variants have no membership and are
    /// returned unchanged.
    ///
    /// ```
    /// use tessera_rules::{Membership, Rule};
    ///
    /// let decay = Rule::probabilistic(1u32, 0u32, 0.1, Membership::new().with(1u32, [2, 3])).negated();
    /// assert!(matches!(decay, Rule::Probabilistic(ref r) if !r.positivity));
    /// ```
    pub fn negated(mut self) -> Self {
        match &mut self {
            Self::Classic(rule) => rule.positivity = !rule.positivity,
            Self::Probabilistic(rule) => rule.positivity = !rule.positivity,
            _ => {}
        }
        self
    }

    /// An [`ElementaryTableRule`].
    pub fn elementary(rule_number: u8) -> Self {
        Self::ElementaryTable(ElementaryTableRule { rule_number })
    }

    /// Short variant name, used in error reports and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic(_) => "classic",
            Self::Probabilistic(_) => "probabilistic",
            Self::WeightedRandom => "weighted_random",
            Self::Majority => "majority",
            Self::Random => "random",
            Self::ElementaryTable(_) => "elementary_table",
            Self::Parity => "parity",
        }
    }

    /// Whether evaluation draws from the generator.
    pub fn is_stochastic(&self) -> bool {
        matches!(
            self,
            Self::Probabilistic(_) | Self::WeightedRandom | Self::Random
        )
    }

    /// Check the rule's parameters against a setup.
    pub fn validate(&self, dimensionality: usize, state_count: usize) -> Result<(), RuleError> {
        match self {
            Self::Classic(rule) => {
                check_state("start", rule.start, state_count)?;
                check_state("end", rule.end, state_count)?;
                check_membership(&rule.membership, state_count)
            }
            Self::Probabilistic(rule) => {
                check_state("start", rule.start, state_count)?;
                check_state("end", rule.end, state_count)?;
                if !(0.0..=1.0).contains(&rule.probability) {
                    return Err(RuleError::ProbabilityOutOfRange {
                        probability: rule.probability,
                    });
                }
                check_membership(&rule.membership, state_count)
            }
            Self::WeightedRandom | Self::Majority | Self::Random => Ok(()),
            Self::ElementaryTable(_) | Self::Parity => {
                if dimensionality != 1 || state_count != 2 {
                    return Err(RuleError::RequiresElementary {
                        dimensionality,
                        state_count,
                    });
                }
                Ok(())
            }
        }
    }

    /// Propose a next state for one cell.
    ///
    /// `counts` has one entry per state. Only validated rules may be
    /// evaluated; evaluation itself never fails.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        current: StateIndex,
        counts: &[u32],
        cell: &CellView<'_>,
        rng: &mut R,
    ) -> Option<StateIndex> {
        match self {
            Self::Classic(rule) => (current == rule.start
                && rule.membership.matches(counts, rule.positivity))
            .then_some(rule.end),
            Self::Probabilistic(rule) => {
                if current != rule.start || !rule.membership.matches(counts, rule.positivity) {
                    return None;
                }
                if rng.random::<f64>() < rule.probability {
                    Some(rule.end)
                } else {
                    Some(rule.start)
                }
            }
            Self::WeightedRandom => Some(weighted_pick(current, counts, rng)),
            Self::Majority => majority(counts),
            Self::Random => {
                let states = counts.len() as u32;
                Some(StateIndex(rng.random_range(0..states)))
            }
            Self::ElementaryTable(table) => {
                let (left, right) = binary_sides(cell);
                let next = table.lookup(left, current.0 == 1, right);
                Some(StateIndex(u32::from(next)))
            }
            Self::Parity => {
                let (left, right) = binary_sides(cell);
                Some(StateIndex(u32::from(left ^ right)))
            }
        }
    }
}

fn check_state(
    parameter: &'static str,
    state: StateIndex,
    state_count: usize,
) -> Result<(), RuleError> {
    if state.as_usize() < state_count {
        Ok(())
    } else {
        Err(RuleError::StateOutOfRange {
            parameter,
            state,
            state_count,
        })
    }
}

fn check_membership(membership: &Membership, state_count: usize) -> Result<(), RuleError> {
    membership
        .states()
        .try_for_each(|state| check_state("membership", state, state_count))
}

fn weighted_pick<R: Rng + ?Sized>(current: StateIndex, counts: &[u32], rng: &mut R) -> StateIndex {
    let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();
    if total == 0 {
        return current;
    }
    let mut target = rng.random_range(0..total);
    for (state, &count) in counts.iter().enumerate() {
        let count = u64::from(count);
        if target < count {
            return StateIndex(state as u32);
        }
        target -= count;
    }
    current
}

fn majority(counts: &[u32]) -> Option<StateIndex> {
    let mut best: Option<(usize, u32)> = None;
    let mut tied = false;
    for (state, &count) in counts.iter().enumerate() {
        match best {
            Some((_, max)) if count < max => {}
            Some((_, max)) if count == max => tied = true,
            _ => {
                best = Some((state, count));
                tied = false;
            }
        }
    }
    match best {
        Some((state, _)) if !tied => Some(StateIndex(state as u32)),
        _ => None,
    }
}

/// Left and right neighbors of a 1-D binary cell; padding reads as dead.
fn binary_sides(cell: &CellView<'_>) -> (bool, bool) {
    let alive = |offset: i32| cell.neighbor_state(&[offset]) == Some(StateIndex(1));
    (alive(-1), alive(1))
}
