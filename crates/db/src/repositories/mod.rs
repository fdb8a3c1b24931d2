//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod appointment_repo;
pub mod business_repo;
pub mod error_log_repo;
pub mod subscription_repo;

pub use appointment_repo::AppointmentRepo;
pub use business_repo::BusinessRepo;
pub use error_log_repo::ErrorLogRepo;
pub use subscription_repo::SubscriptionRepo;
