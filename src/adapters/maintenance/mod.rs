//! Background maintenance.

mod worker;

pub use worker::{MaintenanceConfig, MaintenanceWorker, SweepReport};
