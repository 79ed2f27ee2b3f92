//! Weighted constructor sampling.
//!
//! Chooses a rule kind among those legal at the current tree position,
//! proportional to the static weights in the descriptor table. The
//! configured weights do not sum to 1; the draw is taken uniformly from
//! `[0, sum of legal weights)` instead, which yields an unbiased
//! categorical draw regardless. The legal kinds are walked in a
//! shuffled order so enumeration order never favors a constructor when
//! floating-point edge cases make the running total ambiguous.

use zendo_rules::{RuleKind, ALL_KINDS};

use crate::descriptor::{check_budget, descriptor};
use crate::error::SynthError;
use crate::legality::KindSet;
use crate::random::SynthRng;

/// Sample one constructor legal under `forbidden` and buildable within
/// `budget`, weighted by the descriptor table.
///
/// Fails with `StructureIllegal` when the forbidden set alone leaves
/// no candidate, and `BudgetInfeasible` when structurally permitted
/// kinds exist but none fits the budget. Both are retry signals for
/// the driver; the distinction is purely diagnostic.
pub fn sample_kind(
    budget: usize,
    forbidden: KindSet,
    rng: &mut SynthRng,
) -> Result<RuleKind, SynthError> {
    let permitted: Vec<RuleKind> = ALL_KINDS
        .iter()
        .copied()
        .filter(|&kind| !forbidden.contains(kind))
        .collect();
    if permitted.is_empty() {
        return Err(SynthError::StructureIllegal);
    }

    let mut legal: Vec<RuleKind> = permitted
        .into_iter()
        .filter(|&kind| check_budget(kind, budget).is_ok())
        .collect();
    if legal.is_empty() {
        return Err(SynthError::BudgetInfeasible { budget });
    }

    rng.shuffle(&mut legal);

    let total: f64 = legal.iter().map(|&kind| descriptor(kind).weight).sum();
    let mut remaining = rng.real(total);
    for &kind in &legal {
        remaining -= descriptor(kind).weight;
        if remaining <= 0.0 {
            return Ok(kind);
        }
    }
    // Rounding can leave a sliver of the draw unspent; the walk order
    // is random, so settling on the last kind stays unbiased.
    Ok(legal[legal.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_one_limits_choices() {
        let mut rng = SynthRng::new(42);
        for _ in 0..200 {
            let kind = sample_kind(1, KindSet::empty(), &mut rng).unwrap();
            assert!(
                !matches!(
                    kind,
                    RuleKind::Conjunction | RuleKind::Disjunction | RuleKind::ExclusiveOr
                ),
                "budget 1 sampled a combinator: {:?}",
                kind
            );
        }
    }

    #[test]
    fn test_forbidden_kinds_never_sampled() {
        let mut rng = SynthRng::new(42);
        let forbidden = KindSet::of(&[
            RuleKind::Containment,
            RuleKind::Prefix,
            RuleKind::Suffix,
            RuleKind::VowelCount,
            RuleKind::ConsonantCount,
            RuleKind::UniqueCount,
            RuleKind::Negation,
        ]);
        for _ in 0..200 {
            let kind = sample_kind(1, forbidden, &mut rng).unwrap();
            assert_eq!(kind, RuleKind::LengthMinimum);
        }
    }

    #[test]
    fn test_everything_forbidden_is_structural() {
        // A fully forbidden position is a structure failure, not a
        // budget failure, whatever the budget.
        let mut rng = SynthRng::new(42);
        let forbidden = KindSet::of(&ALL_KINDS);
        for budget in [1, 5, 50] {
            let err = sample_kind(budget, forbidden, &mut rng).unwrap_err();
            assert_eq!(err, SynthError::StructureIllegal);
        }
    }

    #[test]
    fn test_permitted_but_unaffordable_is_budget() {
        // Only substring atoms permitted, but the budget exceeds every
        // substring cap: the budget is what failed.
        let mut rng = SynthRng::new(42);
        let forbidden_kinds: Vec<RuleKind> = ALL_KINDS
            .iter()
            .copied()
            .filter(|&k| {
                !matches!(
                    k,
                    RuleKind::Containment | RuleKind::Prefix | RuleKind::Suffix
                )
            })
            .collect();
        let forbidden = KindSet::of(&forbidden_kinds);
        let err = sample_kind(50, forbidden, &mut rng).unwrap_err();
        assert!(matches!(err, SynthError::BudgetInfeasible { budget: 50 }));
    }

    #[test]
    fn test_large_budget_excludes_capped_atoms() {
        let mut rng = SynthRng::new(42);
        for _ in 0..200 {
            let kind = sample_kind(20, KindSet::empty(), &mut rng).unwrap();
            assert!(
                matches!(
                    kind,
                    RuleKind::Conjunction | RuleKind::Disjunction | RuleKind::ExclusiveOr
                ),
                "budget 20 can only start a combinator, got {:?}",
                kind
            );
        }
    }

    #[test]
    fn test_weights_bias_the_draw() {
        // At budget 1 Containment carries twice the weight of
        // LengthMinimum, so over many draws it must come up more often.
        let mut rng = SynthRng::new(1234);
        let mut containment = 0;
        let mut length_minimum = 0;
        for _ in 0..2000 {
            match sample_kind(1, KindSet::empty(), &mut rng).unwrap() {
                RuleKind::Containment => containment += 1,
                RuleKind::LengthMinimum => length_minimum += 1,
                _ => {}
            }
        }
        assert!(
            containment > length_minimum,
            "containment {} vs length minimum {}",
            containment,
            length_minimum
        );
    }

    #[test]
    fn test_budget_three_excludes_xor() {
        let mut rng = SynthRng::new(1234);
        for _ in 0..500 {
            let kind = sample_kind(3, KindSet::empty(), &mut rng).unwrap();
            assert_ne!(kind, RuleKind::ExclusiveOr, "xor needs budget 4");
        }
    }

    #[test]
    fn test_sampling_is_seed_deterministic() {
        let mut rng1 = SynthRng::new(99);
        let mut rng2 = SynthRng::new(99);
        for budget in 1..10 {
            assert_eq!(
                sample_kind(budget, KindSet::empty(), &mut rng1).unwrap(),
                sample_kind(budget, KindSet::empty(), &mut rng2).unwrap()
            );
        }
    }
}
