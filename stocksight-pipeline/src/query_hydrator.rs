use async_trait::async_trait;

use crate::util;

/// Fills in query fields the caller left unset, before any source runs.
///
/// Hydrators run in order, each seeing the previous one's updates; a
/// hydrator that fails leaves the query as it was. In the advisory
/// pipeline this resolves the time frame.
#[async_trait]
pub trait QueryHydrator<Q>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
{
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Return a copy of the query with this hydrator's fields resolved.
    async fn hydrate(&self, query: &Q) -> Result<Q, String>;

    /// Copy only the fields this hydrator owns from `hydrated` into `query`.
    fn update(&self, query: &mut Q, hydrated: Q);

    fn name(&self) -> &str {
        util::stage_name::<Self>()
    }
}
