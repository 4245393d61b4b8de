use async_trait::async_trait;
use stocksight_stats::reorder::{self, ReorderInput};
use stocksight_stats::{AdvisoryThresholds, StockLevel};

use crate::scorer::Scorer;
use crate::types::{AdvisoryQuery, ItemCandidate};

/// Computes the reorder suggestion for every candidate.
///
/// Priority is the predicted growth percentage, so the selector surfaces
/// the fastest-growing items first. Stock on hand is re-checked against the
/// suggested point: a raised point can turn healthy stock into low stock.
pub struct ReorderPointScorer {
    pub thresholds: AdvisoryThresholds,
}

impl ReorderPointScorer {
    pub fn new(thresholds: AdvisoryThresholds) -> Self {
        Self { thresholds }
    }
}

impl Default for ReorderPointScorer {
    fn default() -> Self {
        Self::new(AdvisoryThresholds::default())
    }
}

#[async_trait]
impl Scorer<AdvisoryQuery, ItemCandidate> for ReorderPointScorer {
    async fn score(
        &self,
        _query: &AdvisoryQuery,
        candidates: &[ItemCandidate],
    ) -> Result<Vec<ItemCandidate>, String> {
        let inputs: Vec<ReorderInput<'_>> = candidates
            .iter()
            .map(|c| ReorderInput {
                current_reorder_point: c.current_reorder_point,
                historical: &c.historical,
                predicted: &c.predicted,
            })
            .collect();

        let scored = reorder::advise_batch(&inputs, &self.thresholds)
            .into_iter()
            .zip(candidates)
            .map(|(s, c)| ItemCandidate {
                priority_score: Some(s.growth_rate_percent),
                suggested_stock_level: Some(StockLevel::classify(
                    c.quantity,
                    s.suggested_point,
                    &self.thresholds,
                )),
                suggestion: Some(s),
                ..ItemCandidate::default()
            })
            .collect();

        Ok(scored)
    }

    fn update(&self, candidate: &mut ItemCandidate, scored: ItemCandidate) {
        candidate.suggestion = scored.suggestion;
        candidate.priority_score = scored.priority_score;
        candidate.suggested_stock_level = scored.suggested_stock_level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stocksight_stats::GrowthCategory;

    #[tokio::test]
    async fn scores_follow_advisor() {
        let scorer = ReorderPointScorer::default();
        let candidates = vec![
            ItemCandidate {
                current_reorder_point: 10,
                historical: vec![100.0],
                predicted: vec![125.0],
                ..ItemCandidate::default()
            },
            ItemCandidate {
                current_reorder_point: 10,
                historical: vec![100.0],
                predicted: vec![80.0],
                ..ItemCandidate::default()
            },
            ItemCandidate {
                current_reorder_point: 0,
                historical: vec![100.0],
                predicted: vec![],
                ..ItemCandidate::default()
            },
        ];
        let scored = scorer.score(&AdvisoryQuery::default(), &candidates).await.unwrap();

        let first = scored[0].suggestion.as_ref().unwrap();
        assert_eq!((first.category, first.suggested_point), (GrowthCategory::HighGrowth, 15));
        assert_eq!(scored[0].priority_score, Some(25.0));

        let second = scored[1].suggestion.as_ref().unwrap();
        assert_eq!((second.category, second.suggested_point), (GrowthCategory::Declining, 9));

        let third = scored[2].suggestion.as_ref().unwrap();
        assert_eq!(third.category, GrowthCategory::InsufficientData);
        assert_eq!(third.suggested_point, 1);
    }

    #[tokio::test]
    async fn raised_point_rechecks_stock() {
        let scorer = ReorderPointScorer::default();
        // 25% growth lifts the point from 10 to 15; 25 on hand is healthy
        // against 10 but low against 15
        let candidates = vec![ItemCandidate {
            current_reorder_point: 10,
            quantity: 25,
            historical: vec![100.0],
            predicted: vec![125.0],
            ..ItemCandidate::default()
        }];
        let scored = scorer.score(&AdvisoryQuery::default(), &candidates).await.unwrap();
        assert_eq!(scored[0].suggested_stock_level, Some(StockLevel::Low));

        let mut c = candidates[0].clone();
        scorer.update(&mut c, scored[0].clone());
        assert_eq!(c.suggested_stock_level, Some(StockLevel::Low));
        assert_eq!(c.quantity, 25);
    }
}
