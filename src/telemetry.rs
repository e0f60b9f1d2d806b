use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AppConfig, LogFormat};

// Логи идут в stderr, stdout занят итоговым отчётом
pub fn init(app: &AppConfig) {
    let registry = tracing_subscriber::registry().with(EnvFilter::new(&app.rust_log));

    match app.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
