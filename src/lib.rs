//! Bettlicht — presence- and light-driven automatic lighting usermod.
//!
//! Polls PIR motion sensors and LDR light sensors and switches the host
//! LED controller's output on when it is dark and motion is detected, and
//! back off after a configurable idle period — unless the light was turned
//! on manually, in which case the automatic shutoff is suspended.
//!
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within the adapters; the domain modules compile and test on the host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod config;
pub mod engine;
pub mod pins;
pub mod ports;
pub mod sensors;
pub mod units;
pub mod usermod;
