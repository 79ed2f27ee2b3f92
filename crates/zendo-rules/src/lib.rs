//! # zendo-rules
//!
//! Core types for the zendo string-classification game: the [`Rule`]
//! tree with its pure evaluation and deterministic rendering, and the
//! immutable word [`Corpus`].
//!
//! Rule synthesis lives in the `zendo-synth` crate; this crate has no
//! randomness and no knowledge of complexity budgets.

pub mod corpus;
pub mod rule;

pub use corpus::{Corpus, CorpusError};
pub use rule::{Rule, RuleKind, ALL_KINDS};
