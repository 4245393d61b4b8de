use async_trait::async_trait;
use std::sync::Arc;

use crate::side_effect::{SideEffect, SideEffectInput};
use crate::types::{AdvisoryQuery, ItemCandidate};

/// Logs every selected suggestion.
///
/// Suggestions are advisory; nothing is written back to the inventory.
pub struct AdvisoryLogSideEffect;

#[async_trait]
impl SideEffect<AdvisoryQuery, ItemCandidate> for AdvisoryLogSideEffect {
    async fn run(
        &self,
        input: Arc<SideEffectInput<AdvisoryQuery, ItemCandidate>>,
    ) -> Result<(), String> {
        for c in &input.selected_candidates {
            let next = c
                .next_period_growth
                .map(|g| format!("{:+.1}%", g.percent()))
                .unwrap_or_else(|| "n/a".to_string());
            log::info!(
                "request_id={} sku={} reorder_point {} -> {} ({}) next_period={}",
                input.query.request_id,
                c.sku,
                c.current_reorder_point,
                c.effective_reorder_point(),
                c.reason(),
                next
            );
            if let Some(level) = c.suggested_stock_level.filter(|l| l.needs_attention()) {
                log::warn!(
                    "request_id={} sku={} stock {} is {} at the suggested point",
                    input.query.request_id,
                    c.sku,
                    c.quantity,
                    level
                );
            }
        }
        log::info!(
            "request_id={} advised {} items",
            input.query.request_id,
            input.selected_candidates.len()
        );
        Ok(())
    }
}
