//! Interactive rule-guessing game.
//!
//! Synthesizes a secret classification rule over a word corpus, then
//! lets the player test strings against it, give up, or claim to know
//! the rule and take a quiz of unseen words.
//!
//! # Usage
//!
//! ```bash
//! # Moderate difficulty against the default word list
//! cargo run -p zendo-game --bin zendo -- --complexity 4
//!
//! # Reproducible round
//! cargo run -p zendo-game --bin zendo -- --complexity 7 --seed 12345 --words words.txt
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use zendo_rules::Corpus;
use zendo_synth::{classify_sample, GeneratedRule, SynthConfig, SynthRng, Synthesizer};

/// Words drawn per corpus re-scan when the cached examples run dry.
const REFILL_SAMPLE_SIZE: usize = 100;

#[derive(Parser, Debug)]
#[command(name = "zendo", about = "Guess the secret string-classification rule")]
struct Args {
    /// Rule complexity (2 is easy, 4 is moderate, 7 is difficult,
    /// 12 is ridiculous)
    #[arg(short, long)]
    complexity: usize,

    /// Newline-delimited word list, one lowercase word per line
    #[arg(short, long, default_value = "words.txt")]
    words: PathBuf,

    /// RNG seed for a reproducible round (defaults to ZENDO_SEED or a
    /// random seed, printed at startup)
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Number of quiz words after a GOTIT claim, as a function of
/// difficulty.
fn quiz_size(difficulty: usize) -> usize {
    3 + difficulty / 2
}

/// Split the quiz between accepted and rejected words, guaranteeing at
/// least one of each so the player cannot win on the base rate alone.
fn quiz_split(num_tests: usize, rng: &mut SynthRng) -> (usize, usize) {
    debug_assert!(num_tests >= 2, "quiz needs room for both classes");
    let num_to_accept = rng.range_inclusive(1..=(num_tests - 1));
    (num_to_accept, num_tests - num_to_accept)
}

/// Strings the player may test: lowercase a-z only, empty allowed.
fn is_testable(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_lowercase())
}

/// Player-visible classifications so far, in the order they were made.
struct KnownWords(Vec<(String, bool)>);

impl KnownWords {
    fn new() -> Self {
        KnownWords(Vec::new())
    }

    fn contains(&self, word: &str) -> bool {
        self.0.iter().any(|(w, _)| w == word)
    }

    fn record(&mut self, word: &str, accepted: bool) {
        if !self.contains(word) {
            self.0.push((word.to_string(), accepted));
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.complexity < 1 {
        eprintln!("Error: complexity must be at least 1");
        return ExitCode::FAILURE;
    }

    let corpus = match Corpus::load(&args.words) {
        Ok(corpus) => corpus,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let seed = args.seed.unwrap_or_else(zendo_synth::get_or_generate_seed);
    if seed == 0 {
        eprintln!("Error: seed must be nonzero");
        return ExitCode::FAILURE;
    }
    let mut rng = SynthRng::new(seed);

    println!("Generating rule...");
    let synth = Synthesizer::with_config(&corpus, SynthConfig::patient());
    let rule = match synth.synthesize(args.complexity, &mut rng) {
        Ok(rule) => rule,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("Generated rule.");

    run_game(&rule, &corpus, args.complexity, &mut rng);
    ExitCode::SUCCESS
}

fn run_game(rule: &GeneratedRule, corpus: &Corpus, difficulty: usize, rng: &mut SynthRng) {
    let mut known = KnownWords::new();
    let mut num_asks = 0usize;

    // Seed the player with one example of each class.
    let example_accepted = rng
        .choose(rule.accepted_examples())
        .cloned()
        .unwrap_or_default();
    let example_rejected = rng
        .choose(rule.rejected_examples())
        .cloned()
        .unwrap_or_default();
    known.record(&example_accepted, true);
    known.record(&example_rejected, false);
    println!();
    println!("Example of ACCEPTED string: {}", example_accepted);
    println!("Example of REJECTED string: {}", example_rejected);

    let stdin = io::stdin();
    loop {
        let command = match prompt(
            &stdin,
            "\nEnter lowercase string to test, or GIVEUP to give up, or GOTIT if you \
             think you know the rule.\n> ",
        ) {
            Some(line) => line,
            None => return, // stdin closed
        };

        if command == "GIVEUP" {
            println!("\nThe rule was:  {}", rule);
            return;
        } else if command == "GOTIT" {
            if run_quiz(&stdin, rule, corpus, difficulty, &known, rng) {
                println!("\nYOU WIN!! :D");
            } else {
                println!("\nYou lose :(");
            }
            println!("\nThe rule was:  {}", rule);
            println!(
                "\nDifficulty was {} and you tested {} words.",
                difficulty, num_asks
            );
            println!("Known classifications at the time you typed GOTIT were:");
            for (word, accepted) in &known.0 {
                println!(
                    "\t{:<30} : {}",
                    word,
                    if *accepted { "accepted" } else { "rejected" }
                );
            }
            return;
        } else if is_testable(&command) {
            let accepted = rule.evaluate(&command);
            known.record(&command, accepted);
            num_asks += 1;
            println!(
                "String {:?} is:  {}",
                command,
                if accepted { "ACCEPTED" } else { "REJECTED" }
            );
        } else {
            println!("Invalid. Enter lowercase string consisting of only a-z, or GIVEUP, or GOTIT.");
        }
    }
}

/// Quiz the player after a GOTIT claim. Returns whether they won.
fn run_quiz(
    stdin: &io::Stdin,
    rule: &GeneratedRule,
    corpus: &Corpus,
    difficulty: usize,
    known: &KnownWords,
    rng: &mut SynthRng,
) -> bool {
    let num_tests = quiz_size(difficulty);
    println!(
        "You will be asked to judge {} strings. Judge all of them correctly (as the rule would)",
        num_tests
    );
    println!("and you win, but get any wrong and you lose.");

    let (num_to_accept, num_to_reject) = quiz_split(num_tests, rng);

    // Start from the partitions cached at acceptance time; mint fresh
    // examples from the corpus only if the player already saw too many.
    let mut pool_accept: Vec<String> = rule
        .accepted_examples()
        .iter()
        .filter(|w| !known.contains(w))
        .cloned()
        .collect();
    let mut pool_reject: Vec<String> = rule
        .rejected_examples()
        .iter()
        .filter(|w| !known.contains(w))
        .cloned()
        .collect();
    while pool_accept.len() < num_to_accept || pool_reject.len() < num_to_reject {
        let (fresh_accept, fresh_reject) =
            classify_sample(rule.rule(), corpus, REFILL_SAMPLE_SIZE, rng);
        pool_accept.extend(fresh_accept.into_iter().filter(|w| !known.contains(w)));
        pool_reject.extend(fresh_reject.into_iter().filter(|w| !known.contains(w)));
    }
    rng.shuffle(&mut pool_accept);
    rng.shuffle(&mut pool_reject);

    let accept_set: Vec<String> = pool_accept[..num_to_accept].to_vec();
    let mut words_to_test: Vec<String> = accept_set.clone();
    words_to_test.extend_from_slice(&pool_reject[..num_to_reject]);
    rng.shuffle(&mut words_to_test);
    debug_assert!(words_to_test.len() == num_tests);

    for word in &words_to_test {
        println!();
        let guess = loop {
            let answer = match prompt(
                stdin,
                &format!("Test this word:  {}\nEnter A to accept, or R to reject: ", word),
            ) {
                Some(line) => line,
                None => return false,
            };
            match answer.as_str() {
                "A" => break true,
                "R" => break false,
                _ => {}
            }
        };
        let correct_classification = accept_set.contains(word);
        if correct_classification == guess {
            println!("Correct.");
        } else {
            println!(
                "Incorrect! The rule actually {} this word.",
                if correct_classification { "ACCEPTS" } else { "REJECTS" }
            );
            return false;
        }
    }
    true
}

/// Print a prompt and read one trimmed line; None once stdin closes.
fn prompt(stdin: &io::Stdin, text: &str) -> Option<String> {
    print!("{}", text);
    let _ = io::stdout().flush();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches('\n').trim().to_string()),
    }
}
