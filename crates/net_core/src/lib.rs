//! `net_core`: location updates + in-proc replication plumbing.
//!
//! Scope
//! - Defines the normalized `LocationUpdate` value type and its presence flags
//! - Provides a compact flags-driven wire codec for updates
//! - Provides the single-producer event channel the transport uses to hand
//!   decoded events to the simulation thread

#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod channel;
pub mod location;
pub mod wire;

pub use location::LocationUpdate;
