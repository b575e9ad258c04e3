pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod matching;
pub mod report;
pub mod storage;
pub mod types;

// Application layer (use cases and the ports they depend on) and its adapters
pub mod app;
pub mod infra;
