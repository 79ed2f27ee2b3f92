//! # zendo-synth
//!
//! Complexity-budgeted, weighted-random synthesis of string
//! classification rules for the zendo game.
//!
//! The driver samples constructors weighted by a static table, splits
//! the complexity budget among children, enforces structural legality
//! constraints, and accepts only candidates that pass a statistical
//! reasonability check against the word corpus. All randomness flows
//! through a single seeded [`SynthRng`], so a run is fully reproducible
//! from its seed.
//!
//! ```no_run
//! use zendo_rules::Corpus;
//! use zendo_synth::{Synthesizer, SynthRng};
//!
//! let corpus = Corpus::load(std::path::Path::new("words.txt"))?;
//! let synth = Synthesizer::new(&corpus);
//! let mut rng = SynthRng::new(12345);
//! let rule = synth.synthesize(4, &mut rng)?;
//! println!("{}", rule);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod descriptor;
pub mod error;
pub mod filter;
pub mod legality;
pub mod random;
pub mod sampler;
pub mod synth;

pub use error::SynthError;
pub use filter::classify_sample;
pub use random::{get_or_generate_seed, SynthRng};
pub use synth::{GeneratedRule, RootPolicy, SynthConfig, Synthesizer};
