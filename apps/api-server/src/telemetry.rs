//! Telemetry initialization - tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Telemetry configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Emit JSON logs (production) instead of the pretty format (local).
    pub json_logs: bool,
    /// Service name reported in the startup log line.
    pub service_name: String,
}

impl TelemetryConfig {
    /// Load configuration from environment variables. `LOG_FORMAT=json`
    /// forces JSON logs; otherwise `APP_ENV=production` selects them.
    pub fn from_env() -> Self {
        let json_logs = match std::env::var("LOG_FORMAT") {
            Ok(v) => v.to_lowercase() == "json",
            Err(_) => std::env::var("APP_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false),
        };

        Self {
            json_logs,
            service_name: std::env::var("APP_NAME").unwrap_or_else(|_| "Vellum".to_string()),
        }
    }
}

/// Initialize the tracing subscriber.
pub fn init_telemetry(config: &TelemetryConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,vellum_infra=debug"));

    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );
}
