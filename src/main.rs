//! Resolve translation keys from the command line.
//!
//! ```text
//! property-i18n <locale> <key>...
//! ```
//!
//! Settings come from `.property-i18n.json` in the current directory. Catalogs
//! are read from the configured locales directory, or from the bundled strings
//! when that directory does not exist.

use std::io::Write;
use std::process::ExitCode;

use property_i18n::catalog::{
    CatalogSource,
    DirectorySource,
    MemorySource,
};
use property_i18n::config::ConfigError;
use property_i18n::{
    ConfigManager,
    LocaleError,
    LocaleService,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors that end the command.
#[derive(Error, Debug)]
enum CliError {
    /// Missing locale or keys
    #[error("Usage: property-i18n <locale> <key>...")]
    Usage,

    /// Invalid `.property-i18n.json`
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unknown locale or no catalog to read from
    #[error(transparent)]
    Locale(#[from] LocaleError),

    /// Writing to stdout failed
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Logs go to stderr; `RUST_LOG` overrides the `info` default.
#[tokio::main]
async fn main() -> ExitCode {
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .init();

    match run(std::env::args().skip(1).collect()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage) => {
            tracing::error!("{}", CliError::Usage);
            ExitCode::from(2)
        }
        Err(error) => {
            tracing::error!(%error, "Failed to resolve keys");
            ExitCode::FAILURE
        }
    }
}

/// Load settings, pick a catalog source and print each key.
async fn run(args: Vec<String>) -> Result<(), CliError> {
    let Some((locale_code, keys)) = args.split_first() else {
        return Err(CliError::Usage);
    };
    if keys.is_empty() {
        return Err(CliError::Usage);
    }

    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(std::env::current_dir().ok())?;
    let settings = config_manager.get_settings();
    let locales_path = config_manager.locales_path();

    if locales_path.is_dir() {
        tracing::debug!(path = %locales_path.display(), "Reading catalogs from directory");
        let source = DirectorySource::new(locales_path, settings.namespaces.clone());
        print_keys(LocaleService::from_settings(source, settings)?, locale_code, keys).await
    } else {
        tracing::debug!(path = %locales_path.display(), "Locales directory not found, using bundled strings");
        let service = LocaleService::from_settings(MemorySource::builtin(), settings)?;
        print_keys(service, locale_code, keys).await
    }
}

/// Write `key = text` lines for `locale_code` to stdout.
async fn print_keys<S: CatalogSource + 'static>(
    service: LocaleService<S>,
    locale_code: &str,
    keys: &[String],
) -> Result<(), CliError> {
    service.session().switch_to_code(locale_code)?;
    let translator = service.translator().await?;

    let mut stdout = std::io::stdout().lock();
    for key in keys {
        writeln!(stdout, "{key} = {}", translator.t(key))?;
    }
    Ok(())
}
