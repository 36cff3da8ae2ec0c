//! Selection policies for practice and test sessions.
//!
//! Practice draws are weighted by historical miss count; test draws are
//! uniform without replacement. The RNG is injected so tests can seed it.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::error::QuizError;
use crate::model::Question;

/// Practice weight for a question: baseline 1 plus its miss count.
///
/// Never-shown questions stay reachable at weight 1; missed questions scale
/// up linearly.
pub fn practice_weight(question: &Question) -> u32 {
    1 + question.miss_count()
}

/// Draw one question id for practice, weighted by [`practice_weight`].
///
/// Probability of drawing `q` is `w(q) / Σ w(pool)`. Draws are with
/// replacement across calls; weights are recomputed from the pool passed in,
/// so callers get live feedback within a session.
pub fn weighted_choice<R: Rng + ?Sized>(
    pool: &[&Question],
    rng: &mut R,
) -> Result<u64, QuizError> {
    if pool.is_empty() {
        return Err(QuizError::EmptyPool);
    }
    let weights: Vec<u32> = pool.iter().map(|q| practice_weight(q)).collect();
    // Weights are >= 1, so the only construction failure is an empty pool.
    let dist = WeightedIndex::new(&weights).map_err(|_| QuizError::EmptyPool)?;
    Ok(pool[dist.sample(rng)].id)
}

/// Select exactly `count` distinct question ids, uniformly at random, in
/// randomized order.
///
/// Fails with `InsufficientPool` when `count` exceeds the pool size; a test
/// cannot draw more items than exist without repeats.
pub fn sample_unique<R: Rng + ?Sized>(
    pool: &[&Question],
    count: usize,
    rng: &mut R,
) -> Result<Vec<u64>, QuizError> {
    if count > pool.len() {
        return Err(QuizError::InsufficientPool {
            requested: count,
            available: pool.len(),
        });
    }
    let indices = rand::seq::index::sample(rng, pool.len(), count);
    Ok(indices.into_iter().map(|i| pool[i].id).collect())
}
