//! Transition rules for Tessera automata.
//!
//! A [`Rule`] looks at one cell (its current state, the decoded counts of
//! each state among its neighbors, and optionally the raw neighborhood via
//! [`CellView`]) and either proposes a next state or declines. A
//! [`RuleChain`] asks its rules in insertion order and takes the first
//! proposal; if every rule declines, the cell keeps its state.
//!
//! The rule set is closed: every variant is a case of the [`Rule`] enum and
//! dispatch is an exhaustive `match`. Randomness is never ambient; the
//! caller passes the generator into every evaluation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod chain;
pub mod error;
pub mod membership;
pub mod rule;
pub mod view;

pub use chain::RuleChain;
pub use error::{RuleChainError, RuleError};
pub use membership::{CountSet, Membership};
pub use rule::{ClassicRule, ElementaryTableRule, ProbabilisticRule, Rule};
pub use view::CellView;
