//! HTTP transport for icalstash.

pub mod app;
pub mod config;
pub mod depot;
pub mod error;
pub mod storage;

#[cfg(test)]
mod test_support;
