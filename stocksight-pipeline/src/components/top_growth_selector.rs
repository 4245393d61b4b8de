use stocksight_stats::{StatsError, StatsResult};

use crate::selector::{descending_nan_last, Selector};
use crate::types::{AdvisoryQuery, ItemCandidate, Product};

/// Product with the highest predicted increase.
///
/// Left-to-right scan that only replaces the running best on a strictly
/// greater value, so the first of several tied maxima wins.
pub fn select_top_growth(products: &[Product]) -> StatsResult<&Product> {
    let (first, rest) = products.split_first().ok_or_else(|| {
        StatsError::InvalidInput("cannot select a top product from an empty list".to_string())
    })?;
    Ok(rest.iter().fold(first, |best, p| {
        if p.predicted_increase_percent > best.predicted_increase_percent {
            p
        } else {
            best
        }
    }))
}

/// Up to `k` products, highest predicted increase first; ties keep input order.
pub fn rank_products(products: &[Product], k: usize) -> Vec<Product> {
    let mut ranked = products.to_vec();
    ranked.sort_by(|a, b| {
        descending_nan_last(a.predicted_increase_percent, b.predicted_increase_percent)
    });
    ranked.truncate(k);
    ranked
}

/// Keeps the K advised items with the highest predicted growth.
pub struct TopGrowthSelector {
    pub k: usize,
}

impl Default for TopGrowthSelector {
    fn default() -> Self {
        Self { k: 5 }
    }
}

impl Selector<AdvisoryQuery, ItemCandidate> for TopGrowthSelector {
    fn score(&self, candidate: &ItemCandidate) -> f64 {
        candidate.priority_score.unwrap_or(f64::NEG_INFINITY)
    }

    fn size(&self) -> Option<usize> {
        Some(self.k)
    }
}
