//! CLI command implementations

use std::path::Path;

use crate::auth::{AuthService, PasswordPolicy};
use crate::config::QuillConfig;
use crate::http_server::{AppState, HttpServer};
use crate::observability::{self, LogFormat};
use crate::store::Database;

use super::args::{Cli, Command};
use super::errors::CliResult;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub async fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command).await
}

/// Run the appropriate command based on CLI args
pub async fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config).await,
        Command::Start { config, log_format } => start(&config, log_format).await,
    }
}

/// Create the database schema and exit
pub async fn init(config_path: &Path) -> CliResult<()> {
    observability::init(LogFormat::Pretty);

    let config = QuillConfig::load(config_path)?;
    init_database(&config).await
}

/// Connect to the configured database and create any missing tables
pub async fn init_database(config: &QuillConfig) -> CliResult<()> {
    let db = Database::connect(&config.database).await?;
    db.create_schema().await?;

    tracing::info!(url = %config.database.url, "database initialized");
    Ok(())
}

/// Start the HTTP server
///
/// Startup sequence:
/// 1. Logging
/// 2. Configuration load (file, then environment)
/// 3. Database connect and schema check
/// 4. Serve until shutdown signal
pub async fn start(config_path: &Path, log_format: LogFormat) -> CliResult<()> {
    observability::init(log_format);

    let config = QuillConfig::load(config_path)?;
    if config.auth.uses_default_secret() {
        tracing::warn!("SECRET_KEY not set; using insecure development secret");
    }

    let db = Database::connect(&config.database).await?;
    db.create_schema().await?;

    let auth = AuthService::new(config.auth.jwt_config(), PasswordPolicy::default());
    let server = HttpServer::new(config.server.clone(), AppState::new(db, auth));

    server.start().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;
    use std::fs;

    #[tokio::test]
    async fn test_init_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("blog.db");
        let config_path = dir.path().join("quill.json");

        fs::write(
            &config_path,
            format!(
                r#"{{"database": {{"url": "sqlite://{}"}}}}"#,
                db_path.display()
            ),
        )
        .unwrap();

        let config = QuillConfig::load_with(&config_path, |_| None).unwrap();
        init_database(&config).await.unwrap();

        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_init_rejects_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("quill.json");
        fs::write(&config_path, "not json").unwrap();

        let err = init(&config_path).await.unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }
}
