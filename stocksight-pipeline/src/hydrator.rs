use async_trait::async_trait;

use crate::util;

/// Candidate hydrators attach derived data to every candidate.
///
/// `hydrate` must return exactly one output per input, in input order;
/// the pipeline then merges each output back through `update`.
#[async_trait]
pub trait Hydrator<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    async fn hydrate(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Copy only the fields this hydrator owns.
    fn update(&self, candidate: &mut C, hydrated: C);

    fn name(&self) -> &str {
        util::stage_name::<Self>()
    }
}
