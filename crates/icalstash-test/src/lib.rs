//! icalstash - integration test support.
//!
//! Re-exports the workspace crates so integration tests can reach every
//! layer through one dependency.

pub mod component {
    pub use icalstash_core::constants;
    pub use icalstash_service::{calendar, request};

    pub mod store {
        pub use icalstash_store::*;
    }

    pub mod config {
        pub use icalstash_core::config::*;
    }
}

pub mod app {
    pub use icalstash_app::*;
}

pub use icalstash_rfc as rfc;
