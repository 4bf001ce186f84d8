//! Mood-based recommendation lookup.
//!
//! # Responsibility
//! - Map a mood label onto four categories of static content.
//! - Optionally down-sample each category to `k` items.
//!
//! # Invariants
//! - Unknown mood labels use the `neutral` bucket.
//! - A category with `<= k` items is returned verbatim, order preserved.
//! - A category with `> k` items yields exactly `k` distinct source items.
//! - Same seed, same mood, same `k` -> same output.

pub mod catalog;

use crate::model::mood::MoodLabel;
use catalog::catalog_for;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Recommendation content for one mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub music: Vec<String>,
    pub quotes: Vec<String>,
    pub relaxation: Vec<String>,
    pub tips: Vec<String>,
}

/// Recommendation lookup with optional down-sampling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recommender {
    /// Maximum items per category; `None` returns full buckets.
    pub limit: Option<usize>,
    /// Sampling seed; `None` draws a fresh seed from OS entropy.
    pub seed: Option<u64>,
}

impl Recommender {
    /// Full buckets, no sampling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Down-samples each category to at most `k` items.
    pub fn with_limit(mut self, k: usize) -> Self {
        self.limit = Some(k);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Recommendations for a typed mood label.
    pub fn recommend(&self, mood: MoodLabel) -> Recommendations {
        let bucket = catalog_for(mood);
        match self.limit {
            None => Recommendations {
                music: to_owned_list(bucket.music),
                quotes: to_owned_list(bucket.quotes),
                relaxation: to_owned_list(bucket.relaxation),
                tips: to_owned_list(bucket.tips),
            },
            Some(k) => {
                let mut rng = match self.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                Recommendations {
                    music: sample_items(bucket.music, k, &mut rng),
                    quotes: sample_items(bucket.quotes, k, &mut rng),
                    relaxation: sample_items(bucket.relaxation, k, &mut rng),
                    tips: sample_items(bucket.tips, k, &mut rng),
                }
            }
        }
    }

    /// Recommendations for a free-form label; unknown labels use `neutral`.
    pub fn recommend_label(&self, mood: &str) -> Recommendations {
        self.recommend(MoodLabel::parse_or_neutral(mood))
    }
}

/// Size-stable sampling without replacement.
///
/// Returns `items` unchanged when `items.len() <= k`.
pub fn sample_items<T: Clone + Into<String>, R: Rng + ?Sized>(
    items: &[T],
    k: usize,
    rng: &mut R,
) -> Vec<String> {
    if items.len() <= k {
        return items.iter().cloned().map(Into::into).collect();
    }
    items
        .choose_multiple(rng, k)
        .cloned()
        .map(Into::into)
        .collect()
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}
