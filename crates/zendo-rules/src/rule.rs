//! Rule trees and their evaluation.
//!
//! A `Rule` is a boolean predicate over lowercase strings, represented as
//! a finite tree: atomic string predicates at the leaves, boolean
//! combinators above them. The variant set is closed; adding a variant
//! means extending the enum and the match arms here plus the cost,
//! legality, and sampling tables in `zendo-synth`.

use std::fmt;

/// A boolean classification predicate over strings.
///
/// Each combinator owns its children outright, so a tree is always
/// acyclic and finite and can be dropped wholesale when a synthesis
/// attempt is abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// True iff the substring occurs anywhere in the input.
    Containment(String),
    /// True iff the input starts with the substring.
    Prefix(String),
    /// True iff the input ends with the substring.
    Suffix(String),
    /// True iff the input length is at least the limit.
    LengthMinimum(usize),
    /// True iff the input has at least the limit of vowels (aeiou).
    VowelCount(usize),
    /// True iff the input has at least the limit of consonants.
    ConsonantCount(usize),
    /// True iff the input has at least the limit of distinct characters.
    UniqueCount(usize),
    /// True iff the child is false.
    Negation(Box<Rule>),
    /// True iff both children are true.
    Conjunction(Box<Rule>, Box<Rule>),
    /// True iff either child is true.
    Disjunction(Box<Rule>, Box<Rule>),
    /// True iff exactly one child is true.
    ExclusiveOr(Box<Rule>, Box<Rule>),
}

/// Fieldless discriminant of a [`Rule`] variant.
///
/// The synthesis engine keys its weight, cost, and legality tables on
/// this rather than on payload-carrying rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Containment,
    Prefix,
    Suffix,
    LengthMinimum,
    VowelCount,
    ConsonantCount,
    UniqueCount,
    Negation,
    Conjunction,
    Disjunction,
    ExclusiveOr,
}

/// All rule kinds, in a fixed enumeration order.
///
/// The sampler shuffles a copy of this before walking it, so the order
/// here carries no selection bias.
pub const ALL_KINDS: [RuleKind; 11] = [
    RuleKind::Containment,
    RuleKind::Prefix,
    RuleKind::Suffix,
    RuleKind::LengthMinimum,
    RuleKind::VowelCount,
    RuleKind::ConsonantCount,
    RuleKind::UniqueCount,
    RuleKind::Negation,
    RuleKind::Conjunction,
    RuleKind::Disjunction,
    RuleKind::ExclusiveOr,
];

impl RuleKind {
    /// Infix or operation name used in rendering and diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Containment => "contains",
            RuleKind::Prefix => "starts with",
            RuleKind::Suffix => "ends with",
            RuleKind::LengthMinimum => "length at least",
            RuleKind::VowelCount => "vowel count at least",
            RuleKind::ConsonantCount => "consonant count at least",
            RuleKind::UniqueCount => "unique letter count at least",
            RuleKind::Negation => "not",
            RuleKind::Conjunction => "and",
            RuleKind::Disjunction => "or",
            RuleKind::ExclusiveOr => "xor",
        }
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

impl Rule {
    /// The discriminant of this rule's root variant.
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Containment(_) => RuleKind::Containment,
            Rule::Prefix(_) => RuleKind::Prefix,
            Rule::Suffix(_) => RuleKind::Suffix,
            Rule::LengthMinimum(_) => RuleKind::LengthMinimum,
            Rule::VowelCount(_) => RuleKind::VowelCount,
            Rule::ConsonantCount(_) => RuleKind::ConsonantCount,
            Rule::UniqueCount(_) => RuleKind::UniqueCount,
            Rule::Negation(_) => RuleKind::Negation,
            Rule::Conjunction(_, _) => RuleKind::Conjunction,
            Rule::Disjunction(_, _) => RuleKind::Disjunction,
            Rule::ExclusiveOr(_, _) => RuleKind::ExclusiveOr,
        }
    }

    /// Evaluate this rule on a string.
    ///
    /// Total and pure: terminates for any finite input (the tree is
    /// finite) and has no side effects. Conjunction and Disjunction
    /// short-circuit, which cannot change the boolean result;
    /// ExclusiveOr needs both child values.
    #[must_use]
    pub fn evaluate(&self, s: &str) -> bool {
        match self {
            Rule::Containment(sub) => s.contains(sub.as_str()),
            Rule::Prefix(sub) => s.starts_with(sub.as_str()),
            Rule::Suffix(sub) => s.ends_with(sub.as_str()),
            Rule::LengthMinimum(limit) => s.len() >= *limit,
            Rule::VowelCount(limit) => s.chars().filter(|c| is_vowel(*c)).count() >= *limit,
            Rule::ConsonantCount(limit) => {
                s.chars()
                    .filter(|c| c.is_ascii_lowercase() && !is_vowel(*c))
                    .count()
                    >= *limit
            }
            Rule::UniqueCount(limit) => {
                let distinct: std::collections::BTreeSet<char> = s.chars().collect();
                distinct.len() >= *limit
            }
            Rule::Negation(child) => !child.evaluate(s),
            Rule::Conjunction(left, right) => left.evaluate(s) && right.evaluate(s),
            Rule::Disjunction(left, right) => left.evaluate(s) || right.evaluate(s),
            Rule::ExclusiveOr(left, right) => left.evaluate(s) != right.evaluate(s),
        }
    }

    /// Number of nodes in the tree. Used by tests and diagnostics.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Rule::Containment(_)
            | Rule::Prefix(_)
            | Rule::Suffix(_)
            | Rule::LengthMinimum(_)
            | Rule::VowelCount(_)
            | Rule::ConsonantCount(_)
            | Rule::UniqueCount(_) => 1,
            Rule::Negation(child) => 1 + child.node_count(),
            Rule::Conjunction(left, right)
            | Rule::Disjunction(left, right)
            | Rule::ExclusiveOr(left, right) => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Visit every node of the tree, parents before children.
    ///
    /// Lets callers check structural post-conditions without matching
    /// on the whole variant set themselves.
    pub fn for_each_node<F: FnMut(&Rule)>(&self, f: &mut F) {
        f(self);
        match self {
            Rule::Negation(child) => child.for_each_node(f),
            Rule::Conjunction(left, right)
            | Rule::Disjunction(left, right)
            | Rule::ExclusiveOr(left, right) => {
                left.for_each_node(f);
                right.for_each_node(f);
            }
            _ => {}
        }
    }
}

/// Deterministic human-readable rendering, disclosed at end of game.
///
/// Combinators wrap their children in parentheses around an infix
/// operator name; leaves name the operation and its literal parameter.
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Containment(sub) => write!(f, "string contains {:?}", sub),
            Rule::Prefix(sub) => write!(f, "string starts with {:?}", sub),
            Rule::Suffix(sub) => write!(f, "string ends with {:?}", sub),
            Rule::LengthMinimum(limit) => write!(f, "length at least {}", limit),
            Rule::VowelCount(limit) => write!(f, "vowel count at least {}", limit),
            Rule::ConsonantCount(limit) => write!(f, "consonant count at least {}", limit),
            Rule::UniqueCount(limit) => write!(f, "unique letter count at least {}", limit),
            Rule::Negation(child) => write!(f, "not ({})", child),
            Rule::Conjunction(left, right) => write!(f, "({}) and ({})", left, right),
            Rule::Disjunction(left, right) => write!(f, "({}) or ({})", left, right),
            Rule::ExclusiveOr(left, right) => write!(f, "({}) xor ({})", left, right),
        }
    }
}
