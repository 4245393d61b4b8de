//! Generic staged candidate pipeline.
//!
//! Stage order: query hydrators -> sources -> hydrators -> filters ->
//! scorers -> selector -> side effects. A failing stage is logged and
//! skipped; it never aborts the run.

use async_trait::async_trait;
use std::sync::Arc;

use crate::filter::{Filter, FilterResult};
use crate::hydrator::Hydrator;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::{SideEffect, SideEffectInput};
use crate::source::Source;

pub trait HasRequestId {
    fn request_id(&self) -> &str;
}

/// Everything a pipeline run produced.
pub struct PipelineResult<Q, C> {
    /// The query after hydration.
    pub query: Arc<Q>,
    /// All candidates produced by sources, before filtering.
    pub retrieved_candidates: Vec<C>,
    /// Candidates removed by filters.
    pub filtered_candidates: Vec<C>,
    /// Final ranked candidates.
    pub selected_candidates: Vec<C>,
}

#[async_trait]
pub trait CandidatePipeline<Q, C>: Send + Sync
where
    Q: HasRequestId + Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<Q>>];
    fn sources(&self) -> &[Box<dyn Source<Q, C>>];
    fn hydrators(&self) -> &[Box<dyn Hydrator<Q, C>>];
    fn filters(&self) -> &[Box<dyn Filter<Q, C>>];
    fn scorers(&self) -> &[Box<dyn Scorer<Q, C>>];
    fn selector(&self) -> &dyn Selector<Q, C>;
    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<Q, C>>>>;
    fn result_size(&self) -> usize;

    async fn execute(&self, query: Q) -> PipelineResult<Q, C> {
        let query = self.hydrate_query(query).await;
        let request_id = query.request_id().to_string();

        let retrieved = self.fetch_candidates(&query).await;
        log::debug!(
            "request_id={} retrieved {} candidates",
            request_id,
            retrieved.len()
        );

        let mut candidates = retrieved.clone();
        for hydrator in self.hydrators().iter().filter(|h| h.enable(&query)) {
            match hydrator.hydrate(&query, &candidates).await {
                Ok(hydrated) => merge(&request_id, hydrator.name(), &mut candidates, hydrated, |c, h| {
                    hydrator.update(c, h)
                }),
                Err(e) => log::warn!(
                    "request_id={} hydrator {} failed: {}",
                    request_id,
                    hydrator.name(),
                    e
                ),
            }
        }

        let mut filtered = Vec::new();
        for filter in self.filters().iter().filter(|f| f.enable(&query)) {
            let backup = candidates.clone();
            match filter.filter(&query, candidates).await {
                Ok(FilterResult { kept, removed }) => {
                    if !removed.is_empty() {
                        log::debug!(
                            "request_id={} filter {} removed {} candidates",
                            request_id,
                            filter.name(),
                            removed.len()
                        );
                    }
                    candidates = kept;
                    filtered.extend(removed);
                }
                Err(e) => {
                    log::warn!(
                        "request_id={} filter {} failed: {}",
                        request_id,
                        filter.name(),
                        e
                    );
                    candidates = backup;
                }
            }
        }

        for scorer in self.scorers().iter().filter(|s| s.enable(&query)) {
            match scorer.score(&query, &candidates).await {
                Ok(scored) => merge(&request_id, scorer.name(), &mut candidates, scored, |c, s| {
                    scorer.update(c, s)
                }),
                Err(e) => log::warn!(
                    "request_id={} scorer {} failed: {}",
                    request_id,
                    scorer.name(),
                    e
                ),
            }
        }

        let selector = self.selector();
        let mut selected = if selector.enable(&query) {
            selector.select(&query, candidates)
        } else {
            candidates
        };
        selected.truncate(self.result_size());

        let query = Arc::new(query);
        self.run_side_effects(Arc::clone(&query), &selected).await;

        PipelineResult {
            query,
            retrieved_candidates: retrieved,
            filtered_candidates: filtered,
            selected_candidates: selected,
        }
    }

    async fn hydrate_query(&self, query: Q) -> Q {
        let mut query = query;
        for hydrator in self.query_hydrators().iter() {
            if !hydrator.enable(&query) {
                continue;
            }
            match hydrator.hydrate(&query).await {
                Ok(hydrated) => hydrator.update(&mut query, hydrated),
                Err(e) => log::warn!(
                    "request_id={} query hydrator {} failed: {}",
                    query.request_id(),
                    hydrator.name(),
                    e
                ),
            }
        }
        query
    }

    async fn fetch_candidates(&self, query: &Q) -> Vec<C> {
        let mut all = Vec::new();
        for source in self.sources().iter().filter(|s| s.enable(query)) {
            match source.get_candidates(query).await {
                Ok(found) => all.extend(found),
                Err(e) => log::warn!(
                    "request_id={} source {} failed: {}",
                    query.request_id(),
                    source.name(),
                    e
                ),
            }
        }
        all
    }

    async fn run_side_effects(&self, query: Arc<Q>, selected: &[C]) {
        let side_effects = self.side_effects();
        let input = Arc::new(SideEffectInput {
            query: Arc::clone(&query),
            selected_candidates: selected.to_vec(),
        });
        for side_effect in side_effects.iter() {
            if !side_effect.enable(Arc::clone(&query)) {
                continue;
            }
            if let Err(e) = side_effect.run(Arc::clone(&input)).await {
                log::warn!(
                    "request_id={} side effect {} failed: {}",
                    query.request_id(),
                    side_effect.name(),
                    e
                );
            }
        }
    }
}

/// Merge stage output back into the candidates, one-to-one. A stage that
/// returns the wrong number of outputs is ignored.
fn merge<C>(
    request_id: &str,
    stage: &str,
    candidates: &mut [C],
    outputs: Vec<C>,
    mut update: impl FnMut(&mut C, C),
) {
    if outputs.len() != candidates.len() {
        log::warn!(
            "request_id={} stage {} returned {} outputs for {} candidates, skipping",
            request_id,
            stage,
            outputs.len(),
            candidates.len()
        );
        return;
    }
    for (candidate, output) in candidates.iter_mut().zip(outputs) {
        update(candidate, output);
    }
}
