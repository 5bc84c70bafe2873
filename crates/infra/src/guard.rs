//! Duplicate-scan guard for single-unit writes.

use std::future::Future;

use tracing::{error, info, warn};

use stockflow_core::{DomainError, DomainResult};
use stockflow_inventory::{ArrivalRequest, UnitRecord};

use crate::movement::MovementEngine;
use crate::record_store::RecordStore;

pub const ALREADY_RECORDED_MESSAGE: &str = "Record already exists in database.";
pub const FAILED_MESSAGE: &str = "Failed to add record. Try again.";

/// What the operator is told after a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Recorded { station: String, record: UnitRecord },
    /// The unit was already at the station; nothing was written.
    AlreadyRecorded,
    /// Any other failure. `error` is kept for logs, not for the operator.
    Failed { error: DomainError },
}

impl ScanOutcome {
    pub fn message(&self) -> String {
        match self {
            ScanOutcome::Recorded { station, .. } => format!("Record added to {station}."),
            ScanOutcome::AlreadyRecorded => ALREADY_RECORDED_MESSAGE.to_string(),
            ScanOutcome::Failed { .. } => FAILED_MESSAGE.to_string(),
        }
    }

    pub fn is_recorded(&self) -> bool {
        matches!(self, ScanOutcome::Recorded { .. })
    }
}

/// Run a single-unit write and classify its result.
pub async fn guarded<F>(write: F) -> ScanOutcome
where
    F: Future<Output = DomainResult<UnitRecord>>,
{
    match write.await {
        Ok(record) => {
            info!(location = %record.location, "scan recorded");
            ScanOutcome::Recorded {
                station: record.location.clone(),
                record,
            }
        }
        Err(err) if err.is_conflict() => {
            warn!(error = %err, "duplicate scan");
            ScanOutcome::AlreadyRecorded
        }
        Err(err) => {
            error!(error = %err, "scan write failed");
            ScanOutcome::Failed { error: err }
        }
    }
}

/// Scan desk: holds the pending scan and records it through the guard.
///
/// Pending input is cleared after every submit, whatever the outcome, so the
/// next scan starts clean.
pub struct ScanDesk<'a, S> {
    engine: &'a MovementEngine<S>,
    pending: Option<ArrivalRequest>,
}

impl<'a, S> ScanDesk<'a, S>
where
    S: RecordStore,
{
    pub fn new(engine: &'a MovementEngine<S>) -> Self {
        Self { engine, pending: None }
    }

    pub fn stage(&mut self, request: ArrivalRequest) {
        self.pending = Some(request);
    }

    pub fn pending(&self) -> Option<&ArrivalRequest> {
        self.pending.as_ref()
    }

    pub async fn submit(&mut self) -> ScanOutcome {
        let Some(request) = self.pending.take() else {
            return ScanOutcome::Failed {
                error: DomainError::validation("nothing scanned"),
            };
        };
        guarded(self.engine.record_arrival(request)).await
    }
}
