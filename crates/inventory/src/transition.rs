//! Station transitions: which writes a move needs.
//!
//! The store has no move primitive, so a move is a post to the destination
//! plus, depending on policy, a delete of the source record. Planning is pure;
//! executing the plan is the movement engine's job.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockflow_core::{DomainError, DomainResult, RecordId};

use crate::station::{Station, StationCollection};
use crate::unit::UnitRecord;

/// How the source side of a move is treated.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MovePolicy {
    /// Post to the destination, then delete the source record. A unit lives
    /// at exactly one station once both writes succeed.
    #[default]
    DoubleEntry,
    /// Post to the destination only. The single exception is Return Table to
    /// Shipped, which always removes the source.
    Additive,
}

impl FromStr for MovePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "double-entry" | "double_entry" => Ok(MovePolicy::DoubleEntry),
            "additive" => Ok(MovePolicy::Additive),
            other => Err(DomainError::validation(format!("unknown move policy: {other:?}"))),
        }
    }
}

/// Delete to issue against the source collection after the destination post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDelete {
    pub collection: StationCollection,
    pub record_id: RecordId,
}

/// Writes needed to move one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    pub destination: StationCollection,
    pub record: UnitRecord,
    pub source_delete: Option<SourceDelete>,
    /// Set when the policy asked for a source delete but the record has no
    /// store id to delete by.
    pub unpaired: bool,
}

impl MovePolicy {
    pub fn deletes_source(self, from: &Station, to: &Station) -> bool {
        match self {
            MovePolicy::DoubleEntry => true,
            MovePolicy::Additive => matches!((from, to), (Station::ReturnTable, Station::Shipped)),
        }
    }
}

/// Plan moving `unit`, as listed at `from`, to `to` under `policy`.
///
/// The source delete targets `from`'s collection. A record's `location`
/// label can disagree with the collection it lives in, so it is not used.
pub fn plan_transition(
    unit: &UnitRecord,
    from: &Station,
    to: &Station,
    policy: MovePolicy,
) -> DomainResult<TransitionPlan> {
    if from == to {
        return Err(DomainError::validation(format!("unit is already at {to}")));
    }

    let wants_delete = policy.deletes_source(from, to);
    let source_delete = match &unit.id {
        Some(id) if wants_delete => Some(SourceDelete {
            collection: from.collection(),
            record_id: id.clone(),
        }),
        _ => None,
    };

    Ok(TransitionPlan {
        destination: to.collection(),
        record: unit.relocated(to),
        unpaired: wants_delete && source_delete.is_none(),
        source_delete,
    })
}
