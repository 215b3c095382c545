//! Application layer for acpi-backlightd.
//!
//! The dispatcher here decides *what* happens for each acpid event but never
//! touches sysfs or sockets itself: it talks to the [`BacklightStore`] and
//! [`EventSource`] traits, which the infrastructure layer implements.
//!
//! # Sub-modules
//!
//! - **`dispatcher`** – The control loop: wait for an event, classify it,
//!   compute the new brightness, write it back.

pub mod dispatcher;

pub use dispatcher::{AdapterFactors, BacklightStore, EventDispatcher, EventSource};
