//! Reasonability filtering.
//!
//! A candidate rule is only useful for the game if it neither accepts
//! nor rejects almost every word a player might try. The filter draws
//! a uniform sample without replacement from the corpus, evaluates the
//! candidate on every sampled word, and requires both partitions to be
//! sufficiently populated.

use zendo_rules::{Corpus, Rule};

use crate::error::SynthError;
use crate::random::SynthRng;

/// Evaluate `rule` on a uniform sample of up to `sample_size` corpus
/// words drawn without replacement, partitioning them into
/// (accepted, rejected).
///
/// Also used by the game loop to mint fresh example words after the
/// cached partitions run dry.
#[must_use]
pub fn classify_sample(
    rule: &Rule,
    corpus: &Corpus,
    sample_size: usize,
    rng: &mut SynthRng,
) -> (Vec<String>, Vec<String>) {
    let words = corpus.words();
    let indices = rng.sample_indices(words.len(), sample_size);

    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for index in indices {
        let word = &words[index];
        if rule.evaluate(word) {
            accepted.push(word.clone());
        } else {
            rejected.push(word.clone());
        }
    }
    (accepted, rejected)
}

/// Apply the reasonability check to a fully built candidate.
///
/// Returns the accepted/rejected partitions on success so the caller
/// can cache them without re-scanning the corpus; returns
/// `Unreasonable` when either partition is below its threshold.
pub fn check_reasonable(
    rule: &Rule,
    corpus: &Corpus,
    sample_size: usize,
    min_accept: usize,
    min_reject: usize,
    rng: &mut SynthRng,
) -> Result<(Vec<String>, Vec<String>), SynthError> {
    if corpus.is_empty() {
        return Err(SynthError::EmptyCorpus);
    }
    let (accepted, rejected) = classify_sample(rule, corpus, sample_size, rng);
    if accepted.len() < min_accept || rejected.len() < min_reject {
        return Err(SynthError::Unreasonable {
            accepted: accepted.len(),
            rejected: rejected.len(),
        });
    }
    Ok((accepted, rejected))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter_corpus() -> Corpus {
        // 100 words, half containing "x".
        let words: Vec<String> = (0..100)
            .map(|i| {
                if i % 2 == 0 {
                    format!("x{}", "a".repeat(3 + i % 5))
                } else {
                    "q".repeat(3 + i % 6)
                }
            })
            .collect();
        Corpus::from_words(words)
    }

    #[test]
    fn test_classify_partitions_whole_sample() {
        let corpus = letter_corpus();
        let rule = Rule::Containment("x".to_string());
        let mut rng = SynthRng::new(5);
        let (accepted, rejected) = classify_sample(&rule, &corpus, 1000, &mut rng);
        assert_eq!(accepted.len() + rejected.len(), corpus.len());
        assert!(accepted.iter().all(|w| w.contains('x')));
        assert!(rejected.iter().all(|w| !w.contains('x')));
    }

    #[test]
    fn test_sample_size_caps_the_draw() {
        let corpus = letter_corpus();
        let rule = Rule::LengthMinimum(1);
        let mut rng = SynthRng::new(5);
        let (accepted, rejected) = classify_sample(&rule, &corpus, 10, &mut rng);
        assert_eq!(accepted.len() + rejected.len(), 10);
    }

    #[test]
    fn test_balanced_rule_is_reasonable() {
        let corpus = letter_corpus();
        let rule = Rule::Containment("x".to_string());
        let mut rng = SynthRng::new(5);
        let (accepted, rejected) =
            check_reasonable(&rule, &corpus, 1000, 10, 10, &mut rng).unwrap();
        assert!(accepted.len() >= 10);
        assert!(rejected.len() >= 10);
    }

    #[test]
    fn test_vacuous_rules_are_unreasonable() {
        let corpus = letter_corpus();
        let mut rng = SynthRng::new(5);

        // Accepts everything.
        let always = Rule::LengthMinimum(0);
        let err = check_reasonable(&always, &corpus, 1000, 10, 10, &mut rng).unwrap_err();
        assert!(matches!(err, SynthError::Unreasonable { rejected: 0, .. }));

        // Accepts nothing.
        let never = Rule::Containment("zzz".to_string());
        let err = check_reasonable(&never, &corpus, 1000, 10, 10, &mut rng).unwrap_err();
        assert!(matches!(err, SynthError::Unreasonable { accepted: 0, .. }));
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        let corpus = Corpus::from_words(Vec::<String>::new());
        let rule = Rule::LengthMinimum(1);
        let mut rng = SynthRng::new(5);
        let err = check_reasonable(&rule, &corpus, 1000, 10, 10, &mut rng).unwrap_err();
        assert_eq!(err, SynthError::EmptyCorpus);
    }
}
