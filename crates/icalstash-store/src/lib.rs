//! Object persistence for encoded calendars.
//!
//! `ObjectClient` is the raw backend (S3 or in memory); `ObjectStore` is what
//! the service layer talks to. `ResilientObjectStore` adds retry with backoff
//! on top of a client and `TracedStore` wraps any store in tracing spans.

pub mod cancel;
pub mod client;
pub mod error;
pub mod memory;
pub mod resilient;
pub mod retry;
pub mod s3;
pub mod store;
pub mod traced;

pub use client::ObjectClient;
pub use resilient::ResilientObjectStore;
pub use retry::{Jitter, RetryPolicy};
pub use store::ObjectStore;
pub use traced::TracedStore;
