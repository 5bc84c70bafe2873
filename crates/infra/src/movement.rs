//! Movement engine: executes station transitions against a record store.
//!
//! Writes are issued one at a time. Batches stop at the first failure and
//! leave earlier writes committed; the caller learns exactly where it stopped.

use std::future::Future;

use thiserror::Error;
use tracing::{Span, debug, field, info, instrument, warn};

use stockflow_core::{BatchId, DomainError, DomainResult, OrderId, RecordId};
use stockflow_inventory::{
    ArrivalRequest, MovePolicy, ShipCriteria, ShipSource, Station, StationCollection, UnitRecord,
    plan_transition, ship_payload,
};

use crate::record_store::{RecordStore, StoreError};

/// Progress after each completed item of a batch.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub batch_id: BatchId,
    pub completed: usize,
}

/// A batch that stopped early. Items before `position` are committed and
/// everything after it is untouched.
///
/// The failing item is untouched too unless `destination_committed` is set:
/// its destination write landed but its source record was not removed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "batch stopped at item {position} of {total} ({completed} completed{}): {cause}",
    committed_note(.destination_committed)
)]
pub struct BatchFailure {
    pub batch_id: BatchId,
    /// 1-based position of the failing item.
    pub position: usize,
    pub completed: usize,
    pub unprocessed: usize,
    pub total: usize,
    pub destination_committed: bool,
    pub cause: DomainError,
}

fn committed_note(destination_committed: &bool) -> &'static str {
    if *destination_committed {
        ", failing item written to destination"
    } else {
        ""
    }
}

/// Failure of one batch item.
struct StepFailure {
    cause: DomainError,
    /// A write for this item reached the store before it failed.
    committed: bool,
}

impl From<DomainError> for StepFailure {
    fn from(cause: DomainError) -> Self {
        Self { cause, committed: false }
    }
}

impl From<StoreError> for StepFailure {
    fn from(err: StoreError) -> Self {
        DomainError::from(err).into()
    }
}

async fn run_batch<'a, T, O, F, Fut, P>(
    batch_id: BatchId,
    items: &'a [T],
    mut step: F,
    mut on_progress: P,
) -> Result<BatchSummary, BatchFailure>
where
    F: FnMut(&'a T) -> Fut,
    Fut: Future<Output = Result<O, StepFailure>>,
    P: FnMut(BatchProgress),
{
    let total = items.len();

    for (index, item) in items.iter().enumerate() {
        if let Err(StepFailure { cause, committed }) = step(item).await {
            return Err(BatchFailure {
                batch_id,
                position: index + 1,
                completed: index,
                unprocessed: total - index,
                total,
                destination_committed: committed,
                cause,
            });
        }

        let progress = BatchProgress {
            completed: index + 1,
            total,
        };
        debug!(batch_id = %batch_id, completed = progress.completed, total, "batch progress");
        on_progress(progress);
    }

    Ok(BatchSummary {
        batch_id,
        completed: total,
    })
}

pub struct MovementEngine<S> {
    store: S,
    policy: MovePolicy,
}

impl<S> MovementEngine<S>
where
    S: RecordStore,
{
    pub fn new(store: S, policy: MovePolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Units currently at `station`.
    ///
    /// Tables and Shipped each own their collection, so everything listed
    /// there is at that station whatever its `location` label says. Carts
    /// share one collection and are told apart by label.
    pub async fn units_at(&self, station: &Station) -> DomainResult<Vec<UnitRecord>> {
        let mut units = self.store.list(station.collection()).await?;
        if let Station::Cart(_) = station {
            let location = station.location();
            units.retain(|u| u.location == location);
        }
        Ok(units)
    }

    /// Record a newly scanned unit at the requested station.
    #[instrument(skip(self, request))]
    pub async fn record_arrival(&self, request: ArrivalRequest) -> DomainResult<UnitRecord> {
        let (station, descriptor) = request.validate()?;
        let record = descriptor.into_record(&station);

        match self.store.post(station.collection(), &record).await {
            Ok(stored) => {
                info!(
                    station = %station,
                    style_number = %stored.style_number,
                    size = %stored.size,
                    "unit recorded"
                );
                Ok(stored)
            }
            Err(StoreError::Conflict(msg)) => {
                warn!(station = %station, style_number = %record.style_number, "unit already recorded");
                Err(DomainError::conflict(msg))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Move one existing unit, as listed at `from`, to `to` under the
    /// engine's policy.
    ///
    /// When the destination write succeeds but the source delete fails, the
    /// destination record stays and the error is `Upstream`.
    pub async fn move_unit(&self, unit: &UnitRecord, from: &Station, to: &Station) -> DomainResult<UnitRecord> {
        self.transfer(unit, from, to).await.map_err(|failure| failure.cause)
    }

    #[instrument(name = "move_unit", skip(self, unit, from, to), fields(from = %from, to = %to))]
    async fn transfer(&self, unit: &UnitRecord, from: &Station, to: &Station) -> Result<UnitRecord, StepFailure> {
        let plan = plan_transition(unit, from, to, self.policy)?;
        let stored = self.store.post(plan.destination, &plan.record).await?;

        if plan.unpaired {
            warn!(location = %unit.location, "source record has no store id, left in place");
        }

        if let Some(source) = plan.source_delete {
            if let Err(e) = self.store.delete(source.collection, &source.record_id).await {
                warn!(
                    record_id = %source.record_id,
                    collection = %source.collection,
                    error = %e,
                    "compensating delete failed"
                );
                return Err(StepFailure {
                    cause: DomainError::upstream(format!(
                        "unit written to {to} but source record {} was not removed: {e}",
                        source.record_id
                    )),
                    committed: true,
                });
            }
        }

        info!(style_number = %stored.style_number, size = %stored.size, "unit moved");
        Ok(stored)
    }

    /// Move units listed at `from` one at a time, reporting progress after each.
    #[instrument(
        skip(self, units, from, to, on_progress),
        fields(from = %from, to = %to, total = units.len(), batch_id = field::Empty),
        err
    )]
    pub async fn move_batch<P>(
        &self,
        units: &[UnitRecord],
        from: &Station,
        to: &Station,
        on_progress: P,
    ) -> Result<BatchSummary, BatchFailure>
    where
        P: FnMut(BatchProgress),
    {
        let batch_id = BatchId::new();
        Span::current().record("batch_id", field::display(batch_id));

        let summary = run_batch(batch_id, units, |unit| self.transfer(unit, from, to), on_progress).await?;
        info!(completed = summary.completed, "batch move finished");
        Ok(summary)
    }

    /// Find the unit with `order_id` at `from` and move it to `to`.
    pub async fn move_by_order_id(
        &self,
        order_id: OrderId,
        from: &Station,
        to: &Station,
    ) -> DomainResult<UnitRecord> {
        let unit = self
            .units_at(from)
            .await?
            .into_iter()
            .find(|u| u.order_id == Some(order_id))
            .ok_or_else(|| DomainError::not_found(format!("order {order_id} at {from}")))?;

        self.move_unit(&unit, from, to).await
    }

    /// Ship a unit out of `source` by order id or by style and size.
    #[instrument(skip(self, criteria), fields(source = %source))]
    pub async fn ship_by_sku_or_order(&self, criteria: &ShipCriteria, source: ShipSource) -> DomainResult<()> {
        let key = criteria.resolve()?;
        let payload = ship_payload(source, key);

        self.store.ship(source, &payload).await?;
        info!(?key, "unit shipped");
        Ok(())
    }

    /// Delete shipped records one at a time with batch semantics.
    #[instrument(
        skip(self, record_ids, on_progress),
        fields(total = record_ids.len(), batch_id = field::Empty),
        err
    )]
    pub async fn purge_shipped<P>(
        &self,
        record_ids: &[RecordId],
        on_progress: P,
    ) -> Result<BatchSummary, BatchFailure>
    where
        P: FnMut(BatchProgress),
    {
        let batch_id = BatchId::new();
        Span::current().record("batch_id", field::display(batch_id));

        let summary = run_batch(
            batch_id,
            record_ids,
            |id| async move {
                self.store
                    .delete(StationCollection::Shipped, id)
                    .await
                    .map_err(StepFailure::from)
            },
            on_progress,
        )
        .await?;

        info!(completed = summary.completed, "shipped records purged");
        Ok(summary)
    }
}
