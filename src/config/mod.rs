use crate::core::{AppError, Result};
use crate::modules::bills::models::CompanyDetails;
use std::env;
use std::time::Duration;

pub mod server;

pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub collaborators: CollaboratorConfig,
    pub company: CompanyDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Base URLs of the external billing backend and document service
#[derive(Debug, Clone)]
pub struct CollaboratorConfig {
    pub billing_api_url: String,
    pub document_api_url: String,
    pub timeout_secs: u64,
}

impl CollaboratorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let billing_api_url = env::var("BILLING_API_URL")
            .map_err(|_| AppError::Configuration("BILLING_API_URL not set".to_string()))?;

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: match env::var("LOG_FORMAT").as_deref() {
                    Ok("json") => LogFormat::Json,
                    Ok("pretty") | Err(_) => LogFormat::Pretty,
                    Ok(other) => {
                        return Err(AppError::Configuration(format!(
                            "Invalid LOG_FORMAT: {}",
                            other
                        )))
                    }
                },
            },
            server: ServerConfig::from_env()?,
            collaborators: CollaboratorConfig {
                document_api_url: env::var("DOCUMENT_API_URL")
                    .unwrap_or_else(|_| billing_api_url.clone()),
                billing_api_url,
                timeout_secs: env::var("COLLABORATOR_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid COLLABORATOR_TIMEOUT_SECS".to_string())
                    })?,
            },
            company: CompanyDetails {
                name: env::var("COMPANY_NAME").unwrap_or_default(),
                address: env::var("COMPANY_ADDRESS").unwrap_or_default(),
                phones: parse_phones(&env::var("COMPANY_PHONES").unwrap_or_default()),
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Configuration(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "Server workers must be greater than 0".to_string(),
            ));
        }

        if self.collaborators.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Collaborator timeout must be greater than 0".to_string(),
            ));
        }

        for (name, url) in [
            ("BILLING_API_URL", &self.collaborators.billing_api_url),
            ("DOCUMENT_API_URL", &self.collaborators.document_api_url),
        ] {
            reqwest::Url::parse(url)
                .map_err(|e| AppError::Configuration(format!("Invalid {}: {}", name, e)))?;
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }
}

/// Split a comma separated phone list, dropping blanks
fn parse_phones(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|phone| !phone.is_empty())
        .map(str::to_string)
        .collect()
}
