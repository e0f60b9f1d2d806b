pub mod seeder;

pub use seeder::{Job, SeedOutcome, SeedReport, SeederService, SkipReason};
