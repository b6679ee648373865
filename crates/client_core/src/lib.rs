//! Client glue around the entity core.
//!
//! Turns raw key/mouse state into a movement intent, steps the simulation
//! on a fixed clock, and pumps decoded net events into the registry. No
//! windowing or GPU code lives here; the renderer and platform layers call
//! in through these modules.

#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::struct_excessive_bools
)]

pub mod input;
pub mod replication;
pub mod scheduler;
pub mod telemetry;

pub use input::InputState;
pub use replication::ReplicationPump;
pub use scheduler::FixedStep;
