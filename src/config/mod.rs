use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use sqlx::postgres::PgConnectOptions;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub seed: SeedConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

// Настройки базы данных
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub db: String,
    pub user: String,
    pub password: String,
    pub connect_timeout_seconds: u64,
}

// Пароль не должен попадать в логи
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db", &self.db)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .finish()
    }
}

impl DatabaseConfig {
    /// Параметры единственного соединения сидера.
    /// Если задан `DATABASE_URL`, он важнее отдельных полей.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match &self.url {
            Some(url) => url.parse::<PgConnectOptions>().map_err(|e| ConfigError::Invalid {
                key: "DATABASE_URL",
                reason: e.to_string(),
            }),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .database(&self.db)
                .username(&self.user)
                .password(&self.password)),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

// Сколько записей генерировать и чем
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    pub venues: u32,
    pub shows: u32,
    pub users: u32,
    pub rng_seed: Option<u64>,
    pub bcrypt_cost: u32,
    pub dry_run: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            venues: 5,
            shows: 10,
            users: 10,
            rng_seed: None,
            // та же стоимость, что и в сервисе аутентификации
            bcrypt_cost: 10,
            dry_run: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Собирает конфигурацию из произвольного источника ключей,
    /// чтобы тесты не трогали переменные окружения процесса.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed_defaults = SeedConfig::default();
        // Сначала секция сидера: от dry_run зависит, нужны ли логин и пароль
        let seed = SeedConfig {
            venues: parse_or(&lookup, "SEED_VENUES", seed_defaults.venues)?,
            shows: parse_or(&lookup, "SEED_SHOWS", seed_defaults.shows)?,
            users: parse_or(&lookup, "SEED_USERS", seed_defaults.users)?,
            rng_seed: parse_opt(&lookup, "SEED_RNG_SEED")?,
            bcrypt_cost: parse_bcrypt_cost(&lookup, seed_defaults.bcrypt_cost)?,
            dry_run: parse_or(&lookup, "SEED_DRY_RUN", seed_defaults.dry_run)?,
        };

        let url = lookup("DATABASE_URL").filter(|v| !v.is_empty());
        // Без DATABASE_URL логин и пароль обязательны, кроме пробного прогона
        let credentials_optional = url.is_some() || seed.dry_run;
        let required = |key: &'static str| -> Result<String, ConfigError> {
            match lookup(key) {
                Some(value) => Ok(value),
                None if credentials_optional => Ok(String::new()),
                None => Err(ConfigError::Missing(key)),
            }
        };

        Ok(Config {
            app: AppConfig {
                rust_log: lookup("RUST_LOG").unwrap_or_else(|| "ticket_seeder=info".to_string()),
                log_format: parse_or(&lookup, "LOG_FORMAT", LogFormat::Text)?,
            },
            database: DatabaseConfig {
                host: lookup("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: parse_or(&lookup, "POSTGRES_PORT", 5432)?,
                db: lookup("POSTGRES_DB").unwrap_or_else(|| "tickets".to_string()),
                user: required("POSTGRES_USER")?,
                password: required("POSTGRES_PASSWORD")?,
                connect_timeout_seconds: parse_or(&lookup, "DB_CONNECT_TIMEOUT_SECONDS", 5)?,
                url,
            },
            seed,
        })
    }
}

/// Допустимая стоимость bcrypt: 4..=31
pub const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

fn parse_bcrypt_cost<F>(lookup: &F, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let cost = parse_or(lookup, "SEED_BCRYPT_COST", default)?;
    if !BCRYPT_COST_RANGE.contains(&cost) {
        return Err(ConfigError::Invalid {
            key: "SEED_BCRYPT_COST",
            reason: format!(
                "{cost} is outside {}..={}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end()
            ),
        });
    }
    Ok(cost)
}

fn parse_opt<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid { key, reason: e.to_string() }),
        _ => Ok(None),
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_stock_batch_sizes() {
        let config = Config::from_lookup(lookup_from(&[
            ("POSTGRES_USER", "rayanc"),
            ("POSTGRES_PASSWORD", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.seed.venues, 5);
        assert_eq!(config.seed.shows, 10);
        assert_eq!(config.seed.users, 10);
        assert_eq!(config.seed.bcrypt_cost, 10);
        assert!(!config.seed.dry_run);
        assert_eq!(config.seed.rng_seed, None);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.db, "tickets");
        assert_eq!(config.app.log_format, LogFormat::Text);
    }

    #[test]
    fn credentials_are_required_without_a_url() {
        let err = Config::from_lookup(lookup_from(&[("POSTGRES_USER", "rayanc")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("POSTGRES_PASSWORD")));
    }

    #[test]
    fn database_url_replaces_the_individual_parts() {
        let config = Config::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://seed:pw@db.internal:6543/tickets",
        )]))
        .unwrap();

        let options = config.database.connect_options().unwrap();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
    }

    #[test]
    fn invalid_numbers_are_reported_with_their_key() {
        let err = Config::from_lookup(lookup_from(&[
            ("POSTGRES_USER", "u"),
            ("POSTGRES_PASSWORD", "p"),
            ("SEED_VENUES", "five"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { key: "SEED_VENUES", .. }));
    }

    #[test]
    fn seed_overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("POSTGRES_USER", "u"),
            ("POSTGRES_PASSWORD", "p"),
            ("SEED_VENUES", "2"),
            ("SEED_RNG_SEED", "42"),
            ("SEED_DRY_RUN", "true"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.seed.venues, 2);
        assert_eq!(config.seed.rng_seed, Some(42));
        assert!(config.seed.dry_run);
        assert_eq!(config.app.log_format, LogFormat::Json);
    }

    #[test]
    fn dry_run_needs_no_credentials() {
        let config = Config::from_lookup(lookup_from(&[("SEED_DRY_RUN", "true")])).unwrap();

        assert!(config.seed.dry_run);
        assert!(config.database.user.is_empty());
        assert!(config.database.password.is_empty());
    }

    #[test]
    fn bcrypt_cost_outside_the_supported_range_is_rejected() {
        for cost in ["3", "32"] {
            let err = Config::from_lookup(lookup_from(&[
                ("POSTGRES_USER", "u"),
                ("POSTGRES_PASSWORD", "p"),
                ("SEED_BCRYPT_COST", cost),
            ]))
            .unwrap_err();

            assert!(matches!(err, ConfigError::Invalid { key: "SEED_BCRYPT_COST", .. }), "cost {cost}");
        }

        let config = Config::from_lookup(lookup_from(&[
            ("POSTGRES_USER", "u"),
            ("POSTGRES_PASSWORD", "p"),
            ("SEED_BCRYPT_COST", "4"),
        ]))
        .unwrap();
        assert_eq!(config.seed.bcrypt_cost, 4);
    }

    #[test]
    fn debug_output_hides_the_password() {
        let config = Config::from_lookup(lookup_from(&[
            ("POSTGRES_USER", "u"),
            ("POSTGRES_PASSWORD", "hunter2"),
        ]))
        .unwrap();

        assert!(!format!("{:?}", config.database).contains("hunter2"));
    }
}
