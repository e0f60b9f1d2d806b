use sqlx::error::ErrorKind;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Ошибка сети или аутентификации при подключении. Повторов нет.
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// База отвергла строку: unique, foreign key, not-null или check.
    #[error("constraint violation while inserting {entity}: {detail}")]
    Constraint { entity: &'static str, detail: String },

    #[error("failed to insert {entity}: {source}")]
    Insert {
        entity: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("database query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl SeedError {
    /// Разделяет ошибки вставки на нарушения ограничений и всё остальное.
    pub fn insert(entity: &'static str, err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if !matches!(db_err.kind(), ErrorKind::Other) {
                return SeedError::Constraint {
                    entity,
                    detail: db_err.message().to_string(),
                };
            }
        }
        SeedError::Insert { entity, source: err }
    }
}

pub type SeedResult<T> = Result<T, SeedError>;
