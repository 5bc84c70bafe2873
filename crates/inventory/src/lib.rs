//! Inventory units and station transitions.
//!
//! This crate contains the warehouse station rules, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod search;
pub mod ship;
pub mod size;
pub mod station;
pub mod transition;
pub mod unit;

pub use search::search_units;
pub use ship::{ShipCriteria, ShipKey, ShipPayload, ShipSource, ship_payload};
pub use size::Size;
pub use station::{Station, StationCollection};
pub use transition::{MovePolicy, SourceDelete, TransitionPlan, plan_transition};
pub use unit::{ArrivalRequest, UnitDescriptor, UnitRecord};
