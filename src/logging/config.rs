/// Logging settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `ENVIRONMENT`, "development" unless set
    pub environment: String,
    /// `LOG_LEVEL`, defaults to "info" in production and "debug" elsewhere
    pub level: String,
    /// `LOG_DIR`, where the rolling files go
    pub directory: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| default_level(&environment));
        let directory = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        Self {
            environment,
            level,
            directory,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn default_filter(&self) -> String {
        format!(
            "portfolio_api={},tower_http=debug,axum=debug,mongodb=warn",
            self.level
        )
    }
}

fn default_level(environment: &str) -> String {
    if environment == "production" {
        "info".to_string()
    } else {
        "debug".to_string()
    }
}
