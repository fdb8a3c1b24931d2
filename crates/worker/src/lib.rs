//! Appointment completion sweep.
//!
//! [`sweeper::CompletionSweeper`] performs one sweep; [`schedule`] runs it on
//! an interval. The API server reuses both for its HTTP trigger and its
//! optional in-process loop.

pub mod config;
pub mod schedule;
pub mod sweeper;
