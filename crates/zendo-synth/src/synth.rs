//! Generation driver: budget-split recursion and retry policy.
//!
//! Synthesis is a synchronous depth-first recursion. At each tree
//! position the driver samples a legal constructor, materializes it
//! (recursing for combinators), and checks the finished candidate
//! against the reasonability filter. Every failure discards the
//! locally-owned partial tree and retries with a fresh constructor
//! choice and fresh budget splits, up to a per-position ceiling.

use zendo_rules::{Corpus, Rule, RuleKind};

use crate::descriptor::{
    split_budget, CONSONANT_LIMIT_MAX, CONSONANT_LIMIT_MIN, LENGTH_LIMIT_MAX, LENGTH_LIMIT_MIN,
    UNIQUE_LIMIT_MAX, UNIQUE_LIMIT_MIN, VOWEL_LIMIT_MAX, VOWEL_LIMIT_MIN,
};
use crate::error::SynthError;
use crate::filter::check_reasonable;
use crate::legality::{forbidden_children, KindSet};
use crate::random::SynthRng;
use crate::sampler::sample_kind;

/// What to do when the root call reaches its retry ceiling.
///
/// The reference behavior reports progress and keeps retrying forever;
/// failing fast is equally valid, so the choice is a policy knob
/// rather than a hard-coded contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootPolicy {
    /// Return `GenerationExhausted` once the root ceiling is reached.
    FailFast,
    /// Keep retrying at the root indefinitely, reporting progress at
    /// each exhausted ceiling.
    RetryForever,
}

/// Configuration for the synthesis driver.
#[derive(Debug, Clone)]
pub struct SynthConfig {
    /// Corpus words sampled by the reasonability filter (capped at the
    /// corpus size).
    pub sample_size: usize,
    /// Minimum accepted words for a rule to be reasonable.
    pub min_accept: usize,
    /// Minimum rejected words for a rule to be reasonable.
    pub min_reject: usize,
    /// Retry ceiling for recursive (non-root) positions.
    pub position_attempts_max: usize,
    /// Retry ceiling for the root position.
    pub root_attempts_max: usize,
    /// Behavior at the root ceiling.
    pub root_policy: RootPolicy,
    /// Print progress lines while the root keeps retrying.
    pub verbose: bool,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_size: 1000,
            min_accept: 10,
            min_reject: 10,
            position_attempts_max: 100,
            root_attempts_max: 1000,
            root_policy: RootPolicy::FailFast,
            verbose: false,
        }
    }
}

impl SynthConfig {
    /// Never give up at the root, with user-visible progress. This is
    /// what the interactive game uses.
    #[must_use]
    pub fn patient() -> Self {
        Self {
            root_policy: RootPolicy::RetryForever,
            verbose: true,
            ..Self::default()
        }
    }
}

/// A rule that passed the reasonability filter, together with the
/// corpus words it accepted and rejected during filtering.
///
/// The partitions are captured exactly once, at acceptance time, and
/// never mutated afterward; callers read them to hand out example
/// words without re-scanning the corpus.
#[derive(Debug, Clone)]
pub struct GeneratedRule {
    rule: Rule,
    accepted: Vec<String>,
    rejected: Vec<String>,
}

impl GeneratedRule {
    fn new(rule: Rule, accepted: Vec<String>, rejected: Vec<String>) -> Self {
        Self {
            rule,
            accepted,
            rejected,
        }
    }

    /// The underlying rule tree.
    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Evaluate the rule on a string.
    #[must_use]
    pub fn evaluate(&self, s: &str) -> bool {
        self.rule.evaluate(s)
    }

    /// Sampled corpus words the rule accepted at filtering time.
    #[must_use]
    pub fn accepted_examples(&self) -> &[String] {
        &self.accepted
    }

    /// Sampled corpus words the rule rejected at filtering time.
    #[must_use]
    pub fn rejected_examples(&self) -> &[String] {
        &self.rejected
    }

    /// Give up the wrapper, keeping only the tree.
    #[must_use]
    pub fn into_rule(self) -> Rule {
        self.rule
    }
}

impl std::fmt::Display for GeneratedRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rule)
    }
}

/// Rule synthesis driver over a shared read-only corpus.
pub struct Synthesizer<'a> {
    corpus: &'a Corpus,
    config: SynthConfig,
}

impl<'a> Synthesizer<'a> {
    /// Create a driver with the default configuration.
    #[must_use]
    pub fn new(corpus: &'a Corpus) -> Self {
        Self::with_config(corpus, SynthConfig::default())
    }

    /// Create a driver with an explicit configuration.
    #[must_use]
    pub fn with_config(corpus: &'a Corpus, config: SynthConfig) -> Self {
        debug_assert!(config.position_attempts_max > 0);
        debug_assert!(config.root_attempts_max > 0);
        Self { corpus, config }
    }

    /// The configuration in effect.
    #[must_use]
    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Synthesize a reasonable rule of the given complexity budget.
    ///
    /// Fails with `BudgetInfeasible` for `budget < 1`, `EmptyCorpus`
    /// for a corpus with no words, and `GenerationExhausted` when the
    /// root retry ceiling is reached under `RootPolicy::FailFast`.
    pub fn synthesize(
        &self,
        budget: usize,
        rng: &mut SynthRng,
    ) -> Result<GeneratedRule, SynthError> {
        if self.corpus.is_empty() {
            return Err(SynthError::EmptyCorpus);
        }
        self.synthesize_at(budget, KindSet::empty(), true, rng)
    }

    /// One tree position: sample, materialize, filter, retry.
    fn synthesize_at(
        &self,
        budget: usize,
        forbidden: KindSet,
        is_root: bool,
        rng: &mut SynthRng,
    ) -> Result<GeneratedRule, SynthError> {
        if budget < 1 {
            return Err(SynthError::BudgetInfeasible { budget });
        }

        let ceiling = if is_root {
            self.config.root_attempts_max
        } else {
            self.config.position_attempts_max
        };

        let mut attempts = 0;
        let mut attempts_total = 0;
        loop {
            attempts += 1;
            attempts_total += 1;
            match self.attempt(budget, forbidden, rng) {
                Ok(candidate) => {
                    match check_reasonable(
                        &candidate,
                        self.corpus,
                        self.config.sample_size,
                        self.config.min_accept,
                        self.config.min_reject,
                        rng,
                    ) {
                        Ok((accepted, rejected)) => {
                            return Ok(GeneratedRule::new(candidate, accepted, rejected));
                        }
                        Err(SynthError::Unreasonable { .. }) => {
                            // Discard the whole candidate; children are
                            // not salvageable since the failure is a
                            // property of the subtree's behavior.
                        }
                        Err(err) => return Err(err),
                    }
                }
                // A child position that exhausted its own ceiling is a
                // structure-infeasibility signal here: retry with a
                // different constructor choice or split.
                Err(SynthError::GenerationExhausted { .. }) => {}
                Err(err) if err.is_retryable() => {}
                Err(err) => return Err(err),
            }

            if attempts >= ceiling {
                if is_root && self.config.root_policy == RootPolicy::RetryForever {
                    if self.config.verbose {
                        println!(
                            "no good rules found after {} attempts, trying again (be patient)...",
                            attempts_total
                        );
                    }
                    attempts = 0;
                    continue;
                }
                return Err(SynthError::GenerationExhausted { attempts });
            }
        }
    }

    /// Materialize one sampled constructor, recursing for children.
    fn attempt(
        &self,
        budget: usize,
        forbidden: KindSet,
        rng: &mut SynthRng,
    ) -> Result<Rule, SynthError> {
        let kind = sample_kind(budget, forbidden, rng)?;
        match kind {
            RuleKind::Containment => Ok(Rule::Containment(rng.lowercase_string(budget))),
            RuleKind::Prefix => Ok(Rule::Prefix(rng.lowercase_string(budget))),
            RuleKind::Suffix => Ok(Rule::Suffix(rng.lowercase_string(budget))),
            RuleKind::LengthMinimum => Ok(Rule::LengthMinimum(
                rng.range_inclusive(LENGTH_LIMIT_MIN..=LENGTH_LIMIT_MAX),
            )),
            RuleKind::VowelCount => Ok(Rule::VowelCount(
                rng.range_inclusive(VOWEL_LIMIT_MIN..=VOWEL_LIMIT_MAX),
            )),
            RuleKind::ConsonantCount => Ok(Rule::ConsonantCount(
                rng.range_inclusive(CONSONANT_LIMIT_MIN..=CONSONANT_LIMIT_MAX),
            )),
            RuleKind::UniqueCount => Ok(Rule::UniqueCount(
                rng.range_inclusive(UNIQUE_LIMIT_MIN..=UNIQUE_LIMIT_MAX),
            )),
            RuleKind::Negation => {
                let child_forbidden = forbidden_children(RuleKind::Negation, None);
                let child = self.synthesize_at(budget, child_forbidden, false, rng)?;
                Ok(Rule::Negation(Box::new(child.into_rule())))
            }
            RuleKind::Conjunction | RuleKind::Disjunction | RuleKind::ExclusiveOr => {
                let (left_budget, right_budget) = split_budget(kind, budget, rng)?;
                let left = self
                    .synthesize_at(left_budget, forbidden_children(kind, None), false, rng)?
                    .into_rule();
                let right_forbidden = forbidden_children(kind, Some(left.kind()));
                let right = self
                    .synthesize_at(right_budget, right_forbidden, false, rng)?
                    .into_rule();
                Ok(match kind {
                    RuleKind::Conjunction => Rule::Conjunction(Box::new(left), Box::new(right)),
                    RuleKind::Disjunction => Rule::Disjunction(Box::new(left), Box::new(right)),
                    _ => Rule::ExclusiveOr(Box::new(left), Box::new(right)),
                })
            }
        }
    }
}
