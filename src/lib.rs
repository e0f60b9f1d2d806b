pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod generate;
pub mod store;
pub mod services;
pub mod runner;
pub mod telemetry;

pub use error::{SeedError, SeedResult};
pub use services::{Job, SeedOutcome, SeedReport, SeederService, SkipReason};
