pub mod config;
pub mod error;
pub mod ingest;
pub mod nutriscore;
pub mod telemetry;
