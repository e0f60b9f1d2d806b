use anyhow::Context;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::Config;
use crate::database::Database;
use crate::error::SeedResult;
use crate::services::{Job, SeedReport, SeederService};
use crate::store::MemoryStore;
use crate::telemetry;

/// Запускает `job` на настроенном хранилище.
///
/// Соединение закрывается на любом пути, в том числе при ошибке задания;
/// ошибка возвращается только после закрытия.
pub async fn run(job: Job, config: &Config) -> SeedResult<SeedReport> {
    let mut rng = match config.seed.rng_seed {
        Some(seed) => {
            info!("Using fixed RNG seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let now = Utc::now().naive_utc();

    if config.seed.dry_run {
        info!("Dry run: rows are generated in memory only");
        let store = MemoryStore::new();
        return SeederService::new(&store, &config.seed).run(job, &mut rng, now).await;
    }

    let db = Database::connect(&config.database).await?;
    let result = SeederService::new(&db, &config.seed).run(job, &mut rng, now).await;
    db.close().await;

    result
}

/// Общая точка входа для бинарников сидера.
pub async fn run_main(job: Job) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("failed to read configuration")?;

    telemetry::init(&config.app);
    info!(?job, "Starting ticket seeder");

    let report = run(job, &config)
        .await
        .with_context(|| format!("{job:?} seeding failed"))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
