//! Failure-injecting store wrapper for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use stockflow_core::RecordId;
use stockflow_inventory::{ShipPayload, ShipSource, StationCollection, UnitRecord};

use super::r#trait::{RecordStore, StoreError};

fn injected() -> StoreError {
    StoreError::Status {
        code: 500,
        body: "injected failure".to_string(),
    }
}

/// Delegates to `inner`, failing the call positions it was told to.
pub(crate) struct FaultyStore<S> {
    inner: S,
    fail_post_at: Option<usize>,
    fail_delete_at: Option<usize>,
    posts: AtomicUsize,
    deletes: AtomicUsize,
}

impl<S> FaultyStore<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self {
            inner,
            fail_post_at: None,
            fail_delete_at: None,
            posts: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    /// Fail the `n`th post (1-based).
    pub(crate) fn failing_post(mut self, n: usize) -> Self {
        self.fail_post_at = Some(n);
        self
    }

    /// Fail the `n`th delete (1-based).
    pub(crate) fn failing_delete(mut self, n: usize) -> Self {
        self.fail_delete_at = Some(n);
        self
    }

    pub(crate) fn inner(&self) -> &S {
        &self.inner
    }
}

fn hit(counter: &AtomicUsize, fail_at: Option<usize>) -> bool {
    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
    fail_at == Some(n)
}

#[async_trait]
impl<S: RecordStore> RecordStore for FaultyStore<S> {
    async fn list(&self, collection: StationCollection) -> Result<Vec<UnitRecord>, StoreError> {
        self.inner.list(collection).await
    }

    async fn post(&self, collection: StationCollection, unit: &UnitRecord) -> Result<UnitRecord, StoreError> {
        if hit(&self.posts, self.fail_post_at) {
            return Err(injected());
        }
        self.inner.post(collection, unit).await
    }

    async fn delete(&self, collection: StationCollection, id: &RecordId) -> Result<(), StoreError> {
        if hit(&self.deletes, self.fail_delete_at) {
            return Err(injected());
        }
        self.inner.delete(collection, id).await
    }

    async fn ship(&self, source: ShipSource, payload: &ShipPayload) -> Result<(), StoreError> {
        self.inner.ship(source, payload).await
    }
}
