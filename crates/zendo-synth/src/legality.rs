//! Structural legality constraints.
//!
//! Certain variant adjacencies always produce redundant or degenerate
//! trees, so the generator never builds them:
//!
//! - Negation never directly wraps another Negation (double negation),
//!   a binary combinator (De Morgan pushes the negation to the leaves
//!   instead), or a threshold atom such as LengthMinimum (its negation
//!   is just a maximum bound, which would duplicate structure).
//! - Conjunction and Disjunction never pair two children of the same
//!   threshold kind (two minimum bounds on the same quantity collapse
//!   to a single bound).
//!
//! The constraints live in this one table rather than on the variants
//! themselves; a sampled kind that lands in the forbidden set makes the
//! local attempt retry, it is not an error surfaced to the caller.

use zendo_rules::RuleKind;

/// A small set of rule kinds, backed by a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindSet(u16);

impl KindSet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        KindSet(0)
    }

    const fn bit(kind: RuleKind) -> u16 {
        1 << kind as u16
    }

    /// Build a set from a list of kinds.
    #[must_use]
    pub const fn of(kinds: &[RuleKind]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < kinds.len() {
            bits |= Self::bit(kinds[i]);
            i += 1;
        }
        KindSet(bits)
    }

    /// Whether the set contains `kind`.
    #[must_use]
    pub const fn contains(&self, kind: RuleKind) -> bool {
        self.0 & Self::bit(kind) != 0
    }

    /// Whether the set is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Kinds Negation may never directly wrap.
const NEGATION_FORBIDS: KindSet = KindSet::of(&[
    RuleKind::Negation,
    RuleKind::Conjunction,
    RuleKind::Disjunction,
    RuleKind::ExclusiveOr,
    RuleKind::LengthMinimum,
    RuleKind::VowelCount,
    RuleKind::ConsonantCount,
    RuleKind::UniqueCount,
]);

/// Whether a kind is a minimum-threshold atom over some count.
const fn is_threshold(kind: RuleKind) -> bool {
    matches!(
        kind,
        RuleKind::LengthMinimum
            | RuleKind::VowelCount
            | RuleKind::ConsonantCount
            | RuleKind::UniqueCount
    )
}

/// Kinds forbidden for a child of `parent`, given the already-chosen
/// left sibling's kind for binary combinators.
#[must_use]
pub fn forbidden_children(parent: RuleKind, left_sibling: Option<RuleKind>) -> KindSet {
    match parent {
        RuleKind::Negation => NEGATION_FORBIDS,
        RuleKind::Conjunction | RuleKind::Disjunction => match left_sibling {
            Some(kind) if is_threshold(kind) => KindSet::of(&[kind]),
            _ => KindSet::empty(),
        },
        _ => KindSet::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negation_forbids_all_non_affix_kinds() {
        let forbidden = forbidden_children(RuleKind::Negation, None);
        assert!(forbidden.contains(RuleKind::Negation));
        assert!(forbidden.contains(RuleKind::Conjunction));
        assert!(forbidden.contains(RuleKind::Disjunction));
        assert!(forbidden.contains(RuleKind::ExclusiveOr));
        assert!(forbidden.contains(RuleKind::LengthMinimum));
        assert!(forbidden.contains(RuleKind::VowelCount));
        assert!(forbidden.contains(RuleKind::ConsonantCount));
        assert!(forbidden.contains(RuleKind::UniqueCount));
        assert!(!forbidden.contains(RuleKind::Containment));
        assert!(!forbidden.contains(RuleKind::Prefix));
        assert!(!forbidden.contains(RuleKind::Suffix));
    }

    #[test]
    fn test_threshold_pairing() {
        for parent in [RuleKind::Conjunction, RuleKind::Disjunction] {
            for threshold in [
                RuleKind::LengthMinimum,
                RuleKind::VowelCount,
                RuleKind::ConsonantCount,
                RuleKind::UniqueCount,
            ] {
                let after = forbidden_children(parent, Some(threshold));
                assert!(after.contains(threshold));
                assert!(!after.contains(RuleKind::Containment));
            }

            // Different threshold kinds bound different quantities, so
            // mixing them stays legal.
            let after_length = forbidden_children(parent, Some(RuleKind::LengthMinimum));
            assert!(!after_length.contains(RuleKind::VowelCount));

            let after_containment = forbidden_children(parent, Some(RuleKind::Containment));
            assert!(after_containment.is_empty());

            assert!(forbidden_children(parent, None).is_empty());
        }
    }

    #[test]
    fn test_xor_allows_length_pair() {
        // ExclusiveOr of two length bounds is a genuine band predicate,
        // not a collapse, so it stays legal.
        let forbidden = forbidden_children(RuleKind::ExclusiveOr, Some(RuleKind::LengthMinimum));
        assert!(forbidden.is_empty());
    }

    #[test]
    fn test_atoms_forbid_nothing() {
        assert!(forbidden_children(RuleKind::Containment, None).is_empty());
        assert!(forbidden_children(RuleKind::LengthMinimum, None).is_empty());
    }

    #[test]
    fn test_kind_set_roundtrip() {
        let set = KindSet::of(&[RuleKind::Prefix, RuleKind::Suffix]);
        assert!(set.contains(RuleKind::Prefix));
        assert!(set.contains(RuleKind::Suffix));
        assert!(!set.contains(RuleKind::Containment));
        assert!(KindSet::empty().is_empty());
    }
}
