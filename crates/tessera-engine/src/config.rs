//! Simulation setup, validation, and error types.
//!
//! [`SimulationSetup`] is the builder-input for constructing a
//! [`Simulation`](crate::Simulation). [`validate()`](SimulationSetup::validate)
//! checks every structural invariant up front, so nothing can fail once a
//! step is running.

use std::error::Error;
use std::fmt;

use tessera_core::{Coord, EncodingError, StateEncoding};
use tessera_rules::{Rule, RuleChain, RuleChainError};
use tessera_space::{BoundaryPolicy, NeighborOffsets, SpaceError};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a setup or building a simulation.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// State encoding could not be built.
    Encoding(EncodingError),
    /// Grid shape or neighbor offsets are invalid.
    Space(SpaceError),
    /// A rule failed validation.
    Rules(RuleChainError),
    /// Display metadata does not have one entry per state.
    DisplayLength {
        /// Which table (`"display_names"` or `"display_colors"`).
        table: &'static str,
        /// `state_count`.
        expected: usize,
        /// Entries supplied.
        got: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoding(e) => write!(f, "encoding: {e}"),
            Self::Space(e) => write!(f, "space: {e}"),
            Self::Rules(e) => write!(f, "rules: {e}"),
            Self::DisplayLength {
                table,
                expected,
                got,
            } => write!(f, "{table} has {got} entries, expected {expected}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encoding(e) => Some(e),
            Self::Space(e) => Some(e),
            Self::Rules(e) => Some(e),
            Self::DisplayLength { .. } => None,
        }
    }
}

impl From<EncodingError> for ConfigError {
    fn from(e: EncodingError) -> Self {
        Self::Encoding(e)
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<RuleChainError> for ConfigError {
    fn from(e: RuleChainError) -> Self {
        Self::Rules(e)
    }
}

// ── SimulationSetup ────────────────────────────────────────────────

/// Everything that defines an automaton, independent of grid size.
///
/// # Example
///
/// ```
/// use tessera_engine::SimulationSetup;
/// use tessera_rules::{Membership, Rule};
///
/// let life = SimulationSetup::builder(2, 2)
///     .rule(Rule::classic(0u32, 1u32, true, Membership::new().with(1u32, [3])))
///     .rule(Rule::classic(1u32, 0u32, false, Membership::new().with(1u32, [2, 3])))
///     .display_names(["dead", "alive"])
///     .build()
///     .unwrap();
/// assert!(life.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationSetup {
    /// Number of grid axes. Must be at least 1.
    pub dimensionality: usize,
    /// Number of distinct states. Must be at least 1.
    pub state_count: usize,
    /// Transition rules, first match wins.
    pub rules: RuleChain,
    /// Explicit neighborhood. `None` = Moore.
    pub neighbor_offsets: Option<Vec<Coord>>,
    /// What neighbors past the edge contribute. Default: zero padding.
    pub boundary: BoundaryPolicy,
    /// One label per state, for renderers.
    pub display_names: Option<Vec<String>>,
    /// One RGB triple per state, for renderers.
    pub display_colors: Option<Vec<[u8; 3]>>,
}

impl SimulationSetup {
    /// A setup with a Moore neighborhood, zero padding and no display
    /// metadata.
    pub fn new(dimensionality: usize, state_count: usize, rules: RuleChain) -> Self {
        Self {
            dimensionality,
            state_count,
            rules,
            neighbor_offsets: None,
            boundary: BoundaryPolicy::Zero,
            display_names: None,
            display_colors: None,
        }
    }

    /// Fluent construction with validation at the end.
    pub fn builder(dimensionality: usize, state_count: usize) -> SimulationSetupBuilder {
        SimulationSetupBuilder {
            setup: Self::new(dimensionality, state_count, RuleChain::new()),
        }
    }

    /// Check the setup without building anything else.
    ///
    /// Checks, in order: the encoding fits (`state_count ≥ 1`, at most
    /// [`MAX_DIMENSIONALITY`](tessera_core::MAX_DIMENSIONALITY) axes, codes
    /// fit in `u64`), the neighborhood is valid, every rule is valid, and display
    /// tables have one entry per state.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve().map(|_| ())
    }

    /// Validate and derive the encoding and offsets.
    pub(crate) fn resolve(&self) -> Result<(StateEncoding, NeighborOffsets), ConfigError> {
        let encoding = StateEncoding::new(self.dimensionality, self.state_count)?;
        let offsets = match &self.neighbor_offsets {
            Some(list) => NeighborOffsets::explicit(self.dimensionality, list.clone())?,
            None => NeighborOffsets::moore(self.dimensionality)?,
        };
        self.rules.validate(self.dimensionality, self.state_count)?;
        if let Some(names) = &self.display_names {
            check_display("display_names", names.len(), self.state_count)?;
        }
        if let Some(colors) = &self.display_colors {
            check_display("display_colors", colors.len(), self.state_count)?;
        }
        Ok((encoding, offsets))
    }
}

fn check_display(table: &'static str, got: usize, expected: usize) -> Result<(), ConfigError> {
    if got == expected {
        Ok(())
    } else {
        Err(ConfigError::DisplayLength {
            table,
            expected,
            got,
        })
    }
}

/// Builder for [`SimulationSetup`].
#[derive(Clone, Debug)]
pub struct SimulationSetupBuilder {
    setup: SimulationSetup,
}

impl SimulationSetupBuilder {
    /// Append a rule at the lowest priority.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.setup.rules.push(rule);
        self
    }

    /// Append several rules in order.
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.setup.rules.extend(rules);
        self
    }

    /// Replace the Moore neighborhood with an explicit offset list.
    pub fn neighbor_offsets(mut self, offsets: Vec<Coord>) -> Self {
        self.setup.neighbor_offsets = Some(offsets);
        self
    }

    /// Set the boundary policy.
    pub fn boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.setup.boundary = boundary;
        self
    }

    /// Set per-state display labels.
    pub fn display_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.setup.display_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set per-state display colors.
    pub fn display_colors(mut self, colors: impl IntoIterator<Item = [u8; 3]>) -> Self {
        self.setup.display_colors = Some(colors.into_iter().collect());
        self
    }

    /// Validate and return the setup.
    pub fn build(self) -> Result<SimulationSetup, ConfigError> {
        self.setup.validate()?;
        Ok(self.setup)
    }
}
