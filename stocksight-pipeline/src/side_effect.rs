use async_trait::async_trait;
use std::sync::Arc;

use crate::util;

/// What a side effect gets to see once selection is done.
#[derive(Clone)]
pub struct SideEffectInput<Q, C> {
    pub query: Arc<Q>,
    pub selected_candidates: Vec<C>,
}

/// Runs once per pipeline execution, after selection, with the final query
/// and the selected candidates only.
///
/// Cannot change the pipeline result. Failures are logged, never
/// propagated. The advisory pipeline uses one to log each suggestion and
/// stock warning.
#[async_trait]
pub trait SideEffect<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn enable(&self, _query: Arc<Q>) -> bool {
        true
    }

    async fn run(&self, input: Arc<SideEffectInput<Q, C>>) -> Result<(), String>;

    fn name(&self) -> &str {
        util::stage_name::<Self>()
    }
}
