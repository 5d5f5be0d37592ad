//! Repository implementations for database access.
//!
//! - [`slots`]: reads over the `demo_slots` table and the occupancy aggregate
//! - [`students`]: reads and writes over the `students` table
//! - [`registrations`]: the capacity-enforcing registration transaction
//!
//! Each repository wraps a `&mut PgConnection` so callers choose whether it
//! runs on a plain connection or inside a transaction.

pub mod registrations;
pub mod slots;
pub mod students;

pub use registrations::Registrations;
pub use slots::Slots;
pub use students::Students;
