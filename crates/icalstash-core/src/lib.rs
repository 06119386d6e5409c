//! Shared configuration, constants and error types for icalstash.

pub mod config;
pub mod constants;
pub mod error;
