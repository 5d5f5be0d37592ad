//! HTTP request handlers for the registration API.
//!
//! Handlers are thin: they deserialize the request, call into the database
//! repositories, and serialize the response. All failures are translated to
//! the HTTP taxonomy by [`crate::errors::Error`]'s `IntoResponse` impl; store
//! detail never reaches the client.
//!
//! - [`slots`]: slot listing with derived occupancy
//! - [`students`]: student listing and the multipart registration intake

pub mod slots;
pub mod students;
