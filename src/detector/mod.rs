//! Randomized n-gram scoring engine
//!
//! After Nakatani Shuyo's langdetect family: candidates are scored by
//! walking a shuffled token stream in short trials, multiplying each
//! candidate's score by a smoothed per-gram probability, normalizing every
//! trial to a distribution, and averaging the trials. The smoothing weight
//! is jittered with Gaussian noise per trial so repeated calls sample
//! slightly different models; pinning the request seed makes a call fully
//! reproducible.
//!
//! All trials of one request share a single shuffled permutation and one
//! cursor into it, so they consume consecutive disjoint chunks of the
//! stream rather than resampling the same prefix.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use tracing::debug;

use crate::models::{DetectRequest, Detection};
use crate::profile::{LanguageProfile, ProfileStore, ALL_LANGUAGES};
use crate::text::{normalize, tokenize};

/// Starting value of the smoothing alpha, before per-trial jitter.
pub const ALPHA_DEFAULT: f64 = 0.5;

/// Standard deviation of the per-trial alpha jitter.
pub const ALPHA_WIDTH: f64 = 0.05;

/// Divisor turning alpha into the additive smoothing weight.
pub const BASE_FREQ: f64 = 10_000.0;

/// Trials run when the request does not ask for a specific count.
pub const DEFAULT_MAX_TRIALS: usize = 15;

/// Per-trial token cap when the request does not set one. 30 also works
/// well for short-text workloads; 255 favors long inputs.
pub const DEFAULT_MAX_ITERATIONS: u16 = 255;

/// Aggregated probabilities below this are dropped from the result.
pub const PROB_FLOOR: f64 = 1e-6;

/// Tokens between cap and underflow checks inside a trial. Checking at
/// this cadence instead of every token lets a trial overshoot its cap by
/// up to `CHECK_CADENCE - 1` tokens.
const CHECK_CADENCE: u16 = 5;

/// When the best trial score sinks below this, all scores are rescaled so
/// long inputs cannot multiply a trial down to literal zero.
const RESCALE_THRESHOLD: f64 = 1e-200;

/// Multiplier applied by the underflow guard. Uniform across candidates,
/// so the normalized distribution is unchanged.
const RESCALE_FACTOR: f64 = 1e200;

/// Starting distribution trials begin from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Prior {
    /// Every candidate starts at 1/n.
    #[default]
    Uniform,
    /// Candidates start proportional to trained corpus size.
    CorpusSize,
}

/// Detection engine over a loaded [`ProfileStore`].
///
/// The store is immutable once the engine is built, so one instance can be
/// shared across threads behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct Detector {
    store: ProfileStore,
    prior: Prior,
}

impl Detector {
    pub fn new(store: ProfileStore) -> Self {
        Self {
            store,
            prior: Prior::Uniform,
        }
    }

    /// Use a non-default starting distribution.
    pub fn with_prior(mut self, prior: Prior) -> Self {
        self.prior = prior;
        self
    }

    /// Sorted codes of every language this engine can score.
    pub fn languages(&self) -> Vec<String> {
        self.store.languages()
    }

    /// Score `req.text` against the requested candidates.
    pub fn detect(&self, req: &DetectRequest) -> Detection {
        let candidates = self.resolve_candidates(&req.langs);
        let tokens = tokenize(&normalize(&req.text));
        let tokens_total = tokens.len();

        if candidates.is_empty() || tokens_total == 0 {
            debug!(
                "nothing to score ({} candidates, {} tokens)",
                candidates.len(),
                tokens_total
            );
            return Detection {
                tokens_total,
                ..Detection::default()
            };
        }

        let max_trials = resolve_trials(req.max_trials, tokens_total);
        let max_iterations = if req.max_iterations == 0 {
            DEFAULT_MAX_ITERATIONS
        } else {
            req.max_iterations
        };

        let mut rng = match req.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };

        // One permutation per request; trials walk disjoint chunks of it.
        let mut order: Vec<usize> = (0..tokens_total).collect();
        order.shuffle(&mut rng);

        let base = self.base_probs(&candidates);
        let mut trial_scores: Vec<Vec<f64>> = Vec::new();
        let mut cursor = 0usize;
        let mut alpha = ALPHA_DEFAULT;

        for _ in 0..max_trials {
            if cursor >= tokens_total {
                break;
            }
            let jitter: f64 = rng.sample(StandardNormal);
            alpha += jitter * ALPHA_WIDTH;
            let weight = alpha / BASE_FREQ;

            let mut scores = base.clone();
            let mut iterations: u16 = 0;
            while cursor < tokens_total {
                let token = &tokens[order[cursor]];
                for (idx, (_, profile)) in candidates.iter().enumerate() {
                    scores[idx] *= weight + profile.probability(token);
                }
                cursor += 1;

                if iterations % CHECK_CADENCE == 0 {
                    if iterations >= max_iterations {
                        break;
                    }
                    rescale_if_tiny(&mut scores);
                }
                iterations = iterations.saturating_add(1);
            }
            trial_scores.push(scores);
        }

        // Bias, then normalize each trial to a distribution. Division is
        // guarded: a trial whose scores sum to zero stays as-is.
        for scores in &mut trial_scores {
            let mut sum = 0.0;
            for (idx, (lang, _)) in candidates.iter().enumerate() {
                scores[idx] *= req.coefficients.get(lang).copied().unwrap_or(1.0);
                sum += scores[idx];
            }
            if sum > 0.0 {
                for score in scores.iter_mut() {
                    *score /= sum;
                }
            }
        }

        let executed = trial_scores.len();
        let mut langs: BTreeMap<String, f64> = BTreeMap::new();
        for (idx, (lang, _)) in candidates.iter().enumerate() {
            let avg: f64 =
                trial_scores.iter().map(|trial| trial[idx]).sum::<f64>() / executed as f64;
            if avg >= PROB_FLOOR {
                langs.insert(lang.clone(), avg);
            }
        }

        let (lang, prob, strict) = pick_best(&langs);
        debug!(
            "detected {:?} (p={:.4}, strict={}, {} trials, {}/{} tokens)",
            lang, prob, strict, executed, cursor, tokens_total
        );

        Detection {
            lang,
            prob,
            strict,
            langs,
            tokens_total,
            tokens_processed: cursor,
        }
    }

    /// Expand the sentinel, drop unknown codes, and dedupe preserving
    /// first-seen order.
    fn resolve_candidates(&self, requested: &[String]) -> Vec<(String, &LanguageProfile)> {
        let expanded: Vec<String> =
            if requested.is_empty() || requested.iter().any(|l| l == ALL_LANGUAGES) {
                self.store.languages()
            } else {
                requested.to_vec()
            };

        let mut out: Vec<(String, &LanguageProfile)> = Vec::new();
        for lang in expanded {
            if out.iter().any(|(seen, _)| *seen == lang) {
                continue;
            }
            if let Some(profile) = self.store.get(&lang) {
                out.push((lang, profile));
            }
        }
        out
    }

    fn base_probs(&self, candidates: &[(String, &LanguageProfile)]) -> Vec<f64> {
        let n = candidates.len();
        match self.prior {
            Prior::Uniform => vec![1.0 / n as f64; n],
            Prior::CorpusSize => {
                let total: f64 = candidates.iter().map(|(_, p)| p.total()).sum();
                if total > 0.0 {
                    candidates.iter().map(|(_, p)| p.total() / total).collect()
                } else {
                    vec![1.0 / n as f64; n]
                }
            }
        }
    }
}

/// Negative asks for one trial per token; zero picks the default.
fn resolve_trials(requested: i32, tokens_total: usize) -> usize {
    if requested < 0 {
        tokens_total
    } else if requested == 0 {
        DEFAULT_MAX_TRIALS
    } else {
        requested as usize
    }
}

/// Multiply all scores back up when the largest has decayed near the
/// bottom of the f64 range.
fn rescale_if_tiny(scores: &mut [f64]) {
    let max = scores.iter().fold(0.0f64, |acc, s| acc.max(*s));
    if max > 0.0 && max < RESCALE_THRESHOLD {
        for score in scores.iter_mut() {
            *score *= RESCALE_FACTOR;
        }
    }
}

/// Deterministic winner: scan in sorted code order, replace only on a
/// strictly greater score. An exact tie keeps the earlier code and clears
/// `strict`.
fn pick_best(langs: &BTreeMap<String, f64>) -> (String, f64, bool) {
    let mut best: Option<(&String, f64)> = None;
    let mut strict = true;
    for (lang, prob) in langs {
        match best {
            None => best = Some((lang, *prob)),
            Some((_, top)) if *prob > top => {
                best = Some((lang, *prob));
                strict = true;
            }
            Some((_, top)) if *prob == top => strict = false,
            Some(_) => {}
        }
    }
    match best {
        Some((lang, prob)) => (lang.clone(), prob, strict),
        None => (String::new(), 0.0, false),
    }
}
