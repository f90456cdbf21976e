//! # Ranking Strategy
//!
//! Selection of the winning product among several provider answers.
//!
//! This module provides the [`RankingStrategy`] trait and the default
//! [`HighestRatingStrategy`].

use crate::domain::entities::Product;
use std::fmt;

/// Trait for ranking strategies.
pub trait RankingStrategy: Send + Sync + fmt::Debug {
    /// Selects the winner among `candidates`, given in arrival order.
    ///
    /// Returns `None` only when `candidates` is empty.
    fn select<'a>(&self, candidates: &'a [Product]) -> Option<&'a Product>;

    /// Returns the name of this ranking strategy.
    fn name(&self) -> &'static str;
}

/// Highest rating wins; ties go to the earliest arrival.
///
/// The first candidate is the initial winner and is replaced only by a
/// candidate with a strictly greater [`Product::rating`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestRatingStrategy;

impl HighestRatingStrategy {
    /// Creates a new highest rating strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RankingStrategy for HighestRatingStrategy {
    fn select<'a>(&self, candidates: &'a [Product]) -> Option<&'a Product> {
        let mut iter = candidates.iter();
        let mut winner = iter.next()?;
        let mut winner_rating = winner.rating();

        for candidate in iter {
            let rating = candidate.rating();
            if rating > winner_rating {
                winner = candidate;
                winner_rating = rating;
            }
        }

        Some(winner)
    }

    fn name(&self) -> &'static str {
        "HighestRating"
    }
}
