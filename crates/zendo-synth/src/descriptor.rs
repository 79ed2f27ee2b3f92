//! Per-constructor descriptors: selection weight and complexity cost.
//!
//! One static table owns the tuning data for every rule kind. The
//! sampler reads the weights, the driver reads the budget bounds and
//! combining costs. Adding a rule variant means adding one row here.

use zendo_rules::RuleKind;

use crate::error::SynthError;
use crate::random::SynthRng;

/// Static data for one rule constructor.
#[derive(Debug, Clone, Copy)]
pub struct Descriptor {
    pub kind: RuleKind,
    /// Relative likelihood of selection when legal. Weights need not
    /// sum to 1; the sampler normalizes by the legal total.
    pub weight: f64,
    /// Smallest complexity budget this constructor can consume.
    pub budget_min: usize,
    /// Largest budget it can consume, if capped. Substring atoms are
    /// capped so their substring never grows long enough to match
    /// almost no corpus word; Negation inherits the cap of the only
    /// child class it may legally wrap.
    pub budget_max: Option<usize>,
    /// Budget spent by a binary combinator itself, before its
    /// children split the remainder. Zero for everything else.
    pub combining_cost: usize,
}

/// Maximum substring length for Containment rules.
pub const CONTAINMENT_SUBSTR_MAX: usize = 3;
/// Maximum substring length for Prefix and Suffix rules.
pub const AFFIX_SUBSTR_MAX: usize = 2;

/// LengthMinimum limits are drawn from this inclusive range; corpus
/// words are generally longer than 4 and shorter than 10 characters.
pub const LENGTH_LIMIT_MIN: usize = 4;
pub const LENGTH_LIMIT_MAX: usize = 9;

/// VowelCount limits; corpus words carry roughly one vowel per
/// syllable.
pub const VOWEL_LIMIT_MIN: usize = 2;
pub const VOWEL_LIMIT_MAX: usize = 4;

/// ConsonantCount limits.
pub const CONSONANT_LIMIT_MIN: usize = 3;
pub const CONSONANT_LIMIT_MAX: usize = 6;

/// UniqueCount limits on distinct characters.
pub const UNIQUE_LIMIT_MIN: usize = 4;
pub const UNIQUE_LIMIT_MAX: usize = 8;

/// The descriptor table, one row per rule kind.
pub const DESCRIPTORS: [Descriptor; 11] = [
    Descriptor {
        kind: RuleKind::Containment,
        weight: 1.0,
        budget_min: 1,
        budget_max: Some(CONTAINMENT_SUBSTR_MAX),
        combining_cost: 0,
    },
    Descriptor {
        kind: RuleKind::Prefix,
        weight: 0.6,
        budget_min: 1,
        budget_max: Some(AFFIX_SUBSTR_MAX),
        combining_cost: 0,
    },
    Descriptor {
        kind: RuleKind::Suffix,
        weight: 0.6,
        budget_min: 1,
        budget_max: Some(AFFIX_SUBSTR_MAX),
        combining_cost: 0,
    },
    Descriptor {
        kind: RuleKind::LengthMinimum,
        weight: 0.5,
        budget_min: 1,
        budget_max: Some(1),
        combining_cost: 0,
    },
    Descriptor {
        kind: RuleKind::VowelCount,
        weight: 0.4,
        budget_min: 1,
        budget_max: Some(1),
        combining_cost: 0,
    },
    Descriptor {
        kind: RuleKind::ConsonantCount,
        weight: 0.4,
        budget_min: 1,
        budget_max: Some(1),
        combining_cost: 0,
    },
    Descriptor {
        kind: RuleKind::UniqueCount,
        weight: 0.4,
        budget_min: 1,
        budget_max: Some(1),
        combining_cost: 0,
    },
    Descriptor {
        // Zero self-cost: passes its full budget to its child, which
        // must be a substring atom, so the atom caps apply.
        kind: RuleKind::Negation,
        weight: 0.5,
        budget_min: 1,
        budget_max: Some(CONTAINMENT_SUBSTR_MAX),
        combining_cost: 0,
    },
    Descriptor {
        kind: RuleKind::Conjunction,
        weight: 1.0,
        budget_min: 3, // 1 per child + combining cost
        budget_max: None,
        combining_cost: 1,
    },
    Descriptor {
        kind: RuleKind::Disjunction,
        weight: 1.0,
        budget_min: 3,
        budget_max: None,
        combining_cost: 1,
    },
    Descriptor {
        kind: RuleKind::ExclusiveOr,
        weight: 0.4,
        budget_min: 4,
        budget_max: None,
        combining_cost: 2,
    },
];

/// Look up the descriptor for a kind.
#[must_use]
pub fn descriptor(kind: RuleKind) -> &'static Descriptor {
    // Rows are laid out in ALL_KINDS order.
    let index = match kind {
        RuleKind::Containment => 0,
        RuleKind::Prefix => 1,
        RuleKind::Suffix => 2,
        RuleKind::LengthMinimum => 3,
        RuleKind::VowelCount => 4,
        RuleKind::ConsonantCount => 5,
        RuleKind::UniqueCount => 6,
        RuleKind::Negation => 7,
        RuleKind::Conjunction => 8,
        RuleKind::Disjunction => 9,
        RuleKind::ExclusiveOr => 10,
    };
    let desc = &DESCRIPTORS[index];
    debug_assert!(desc.kind == kind, "descriptor table out of order");
    desc
}

/// Check that `budget` can support `kind`, per its descriptor bounds.
pub fn check_budget(kind: RuleKind, budget: usize) -> Result<(), SynthError> {
    let desc = descriptor(kind);
    if budget < desc.budget_min {
        return Err(SynthError::BudgetInfeasible { budget });
    }
    if let Some(max) = desc.budget_max {
        if budget > max {
            return Err(SynthError::BudgetInfeasible { budget });
        }
    }
    Ok(())
}

/// Split a combinator's budget between its two children.
///
/// Requires `budget >= 2 + combining_cost` (each child needs at least
/// 1). The left child's share is drawn uniformly from
/// `[1, budget - combining_cost - 1]`; the right child receives the
/// remainder, so the whole budget is always spent.
pub fn split_budget(
    kind: RuleKind,
    budget: usize,
    rng: &mut SynthRng,
) -> Result<(usize, usize), SynthError> {
    let cost = descriptor(kind).combining_cost;
    debug_assert!(cost > 0, "split_budget is only for binary combinators");
    if budget < 2 + cost {
        return Err(SynthError::BudgetInfeasible { budget });
    }
    let left = rng.range_inclusive(1..=(budget - cost - 1));
    let right = budget - cost - left;
    debug_assert!(right >= 1);
    Ok((left, right))
}
