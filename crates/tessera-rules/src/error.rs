//! Rule validation errors.

use std::error::Error;
use std::fmt;

use tessera_core::StateIndex;

/// A single rule's parameters are invalid for a given setup.
#[derive(Clone, Debug, PartialEq)]
pub enum RuleError {
    /// A state parameter names a state that does not exist.
    StateOutOfRange {
        /// Which parameter (`"start"`, `"end"`, `"membership"`).
        parameter: &'static str,
        /// The offending state.
        state: StateIndex,
        /// Number of states in the setup.
        state_count: usize,
    },
    /// A probability is NaN or outside `[0, 1]`.
    ProbabilityOutOfRange {
        /// The offending value.
        probability: f64,
    },
    /// The rule only makes sense for 1-D, 2-state automata.
    RequiresElementary {
        /// Dimensionality of the setup.
        dimensionality: usize,
        /// Number of states in the setup.
        state_count: usize,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StateOutOfRange {
                parameter,
                state,
                state_count,
            } => write!(
                f,
                "{parameter} references state {state}, but only {state_count} states exist"
            ),
            Self::ProbabilityOutOfRange { probability } => {
                write!(f, "probability {probability} is outside [0, 1]")
            }
            Self::RequiresElementary {
                dimensionality,
                state_count,
            } => write!(
                f,
                "requires a 1D 2-state automaton, got {dimensionality}D with {state_count} states"
            ),
        }
    }
}

impl Error for RuleError {}

/// A rule inside a [`RuleChain`](crate::RuleChain) failed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleChainError {
    /// Position of the failing rule in the chain.
    pub index: usize,
    /// Variant name of the failing rule.
    pub rule: &'static str,
    /// What was wrong with it.
    pub error: RuleError,
}

impl fmt::Display for RuleChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {} ({}): {}", self.index, self.rule, self.error)
    }
}

impl Error for RuleChainError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}
