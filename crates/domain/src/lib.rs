//! # homedash-domain
//!
//! Pure domain model for the homedash monitoring dashboard.
//!
//! ## Responsibilities
//! - Foundational types: device identifiers and error conventions
//! - Define the **Device** variants (light, thermostat, security camera) and
//!   their on/off lifecycle
//! - Own the brightness **ramp** state machine stepped by the animation driver
//! - Provide the in-memory **Registry** of devices
//! - Produce structured per-device **reports** for rendering
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app` or the binary, and performs no IO.
//! Timers and scheduling live in the `app` crate.

pub mod error;
pub mod id;

pub mod device;
pub mod registry;
