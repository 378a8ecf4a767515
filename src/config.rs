use crate::cli::Cli;
use crate::gmail_api::{AuthConfig, DEFAULT_MAIL_LIMIT};
use crate::platform::Platform;
use crate::sms::DEFAULT_MAX_COUNT;
use log::{info, warn, LevelFilter};
use std::fs::File;
use std::path::{Path, PathBuf};

pub const DEFAULT_SMS_STORE: &str = "sms_inbox.json";
pub const DEFAULT_CLIENT_SECRET_FILE: &str = "client_secret.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("logger already initialised: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Process-wide settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub platform: Platform,
    pub auth: AuthConfig,
    pub sms_store: PathBuf,
    pub api_base_url: String,
    pub sms_max_count: usize,
    pub mail_limit: usize,
}

impl AppConfig {
    pub async fn from_cli(cli: &Cli) -> Self {
        Self {
            platform: cli.platform.unwrap_or_else(Platform::current),
            auth: resolve_auth(cli).await,
            sms_store: cli.sms_store.clone(),
            api_base_url: cli.api_base_url.clone(),
            sms_max_count: DEFAULT_MAX_COUNT,
            mail_limit: DEFAULT_MAIL_LIMIT,
        }
    }
}

// A missing client is not fatal here: the sign-in availability check reports
// it when mail is requested.
async fn resolve_auth(cli: &Cli) -> AuthConfig {
    if let Some(client_id) = &cli.client_id {
        return AuthConfig::from_client_id(client_id.clone(), cli.client_secret.clone());
    }
    if !cli.client_secret_file.exists() {
        info!(
            "no OAuth client configured ({} not found)",
            cli.client_secret_file.display()
        );
        return AuthConfig::unconfigured();
    }
    match AuthConfig::from_secret_file(&cli.client_secret_file).await {
        Ok(config) => config,
        Err(e) => {
            warn!(
                "failed to read {}: {}",
                cli.client_secret_file.display(),
                e
            );
            AuthConfig::unconfigured()
        }
    }
}

/// Sets up env_logger. The terminal belongs to the UI, so logs only go to a
/// file. Without one logging is off, whatever RUST_LOG says.
pub fn init_logging(log_file: Option<&Path>) -> Result<(), ConfigError> {
    logger_builder(log_file)?.try_init()?;
    Ok(())
}

fn logger_builder(log_file: Option<&Path>) -> Result<env_logger::Builder, ConfigError> {
    let builder = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| ConfigError::LogFile {
                path: path.to_path_buf(),
                source,
            })?;
            let mut builder =
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        None => {
            let mut builder = env_logger::Builder::new();
            builder.filter_level(LevelFilter::Off);
            builder
        }
    };
    Ok(builder)
}
