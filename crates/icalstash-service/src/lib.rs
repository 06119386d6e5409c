//! Calendar pipeline: request → document → RFC 5545 text → object store.

pub mod calendar;
pub mod error;
pub mod request;
