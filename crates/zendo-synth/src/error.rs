//! Synthesis error taxonomy.
//!
//! All recoverable failure paths are visible in function signatures as
//! `Result` values; nothing is signalled by unwinding.

use thiserror::Error;

/// Failure kinds raised during rule synthesis.
///
/// `BudgetInfeasible`, `StructureIllegal`, and `Unreasonable` are local
/// retry signals consumed by the generation driver's loop. Only
/// `GenerationExhausted` (and `EmptyCorpus`) escape to the caller.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SynthError {
    /// The requested complexity cannot support the chosen constructor,
    /// either too small for its minimum or too large for a capped
    /// substring length.
    #[error("complexity budget {budget} cannot support the chosen constructor")]
    BudgetInfeasible { budget: usize },

    /// The chosen constructor is forbidden at this tree position by
    /// the structural legality table.
    #[error("constructor is structurally illegal at this position")]
    StructureIllegal,

    /// The fully built candidate accepted or rejected too few sampled
    /// corpus words.
    #[error("candidate rule failed the reasonability check ({accepted} accepted, {rejected} rejected)")]
    Unreasonable { accepted: usize, rejected: usize },

    /// The retry ceiling was reached without producing a rule. Fatal
    /// for the call that raised it; never converted into a default
    /// rule.
    #[error("rule generation exhausted after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    /// The corpus has no words to sample, so no rule can ever pass
    /// the reasonability filter.
    #[error("corpus is empty")]
    EmptyCorpus,
}

impl SynthError {
    /// Whether the driver may retry locally after this failure.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SynthError::BudgetInfeasible { .. }
                | SynthError::StructureIllegal
                | SynthError::Unreasonable { .. }
        )
    }
}
