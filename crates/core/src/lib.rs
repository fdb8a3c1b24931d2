//! Domain types and pure rules for the appointment lifecycle and
//! subscription access engine.
//!
//! Nothing in this crate performs database or network I/O. Storage lives in
//! `agendly-db`, the sweep service in `agendly-worker` and the HTTP surface
//! in `agendly-api`.

pub mod access;
pub mod appointment;
pub mod clock;
pub mod config;
pub mod error;
pub mod subscription;
pub mod telemetry;
pub mod types;
