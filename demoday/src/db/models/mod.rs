//! Database record structures matching table schemas.

pub mod slots;
pub mod students;
