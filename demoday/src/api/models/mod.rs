//! Request/response data structures for API communication.

pub mod slots;
pub mod students;
