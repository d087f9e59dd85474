//! Command-line entry point.

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use site_content::cms::{
    CmsConfig,
    CmsError,
    DEV_ENV_VAR,
    drift,
};
use site_content::config::{
    ConfigError,
    ConfigManager,
    SiteSettings,
};
use site_content::data::DataTranslations;
use site_content::diagnostics::{
    Diagnostic,
    DiagnosticSeverity,
};
use site_content::i18n::{
    CollectionJoiner,
    I18nError,
    LocaleConfig,
    LocaleSwitcher,
    TRANSLATION_DATA_FILE,
    TranslationData,
    parity,
};
use site_content::indexer::IndexerError;
use site_content::schema::SchemaRegistry;
use site_content::{
    BuildReport,
    Workspace,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "site-content", version, about = "Validate site content and translation tables")]
struct Cli {
    /// Project root holding `.site-content.json`
    #[arg(long, env = "SITE_CONTENT_ROOT", default_value = ".", global = true)]
    root: PathBuf,

    /// Action to run
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate content files and translation tables
    Check,
    /// Write the editor configuration derived from the content schemas
    Cms {
        /// Use local storage as in development builds
        #[arg(long, env = DEV_ENV_VAR)]
        dev: bool,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Compare an existing configuration with the schemas instead
        #[arg(long, conflicts_with = "out")]
        compare: Option<PathBuf>,
    },
    /// Translate a site path to another locale
    TranslatePath {
        /// Site path, e.g. `/fr/a-propos`
        path: String,
        /// Locale of `path`; read from its prefix when omitted
        #[arg(long)]
        from: Option<String>,
        /// Target locale
        #[arg(long)]
        to: String,
    },
    /// List published localized entries with the paths of their counterparts
    Alternates,
}

/// Failure of a subcommand.
#[derive(Error, Debug)]
enum CliError {
    /// Invalid or unreadable `.site-content.json`.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Content discovery failed.
    #[error(transparent)]
    Indexer(#[from] IndexerError),

    /// `translationData.json` could not be loaded.
    #[error(transparent)]
    I18n(#[from] I18nError),

    /// Editor configuration could not be derived or parsed.
    #[error(transparent)]
    Cms(#[from] CmsError),

    /// Editor configuration could not be serialized.
    #[error("Failed to serialize CMS configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The path matches no route of its locale.
    #[error("No route for '{path}' in locale '{locale}'")]
    NoRoute {
        /// Path as given.
        path: String,
        /// Target locale.
        locale: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Dispatches a subcommand.
async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(cli.root.clone()))?;

    match cli.command {
        Command::Check => check(&cli.root, &config_manager).await,
        Command::Cms { dev, out, compare } => {
            cms(config_manager.get_settings(), dev, out.as_deref(), compare.as_deref())
        }
        Command::TranslatePath { path, from, to } => {
            translate_path(&cli.root, config_manager.get_settings(), &path, from.as_deref(), &to)
        }
        Command::Alternates => alternates(&cli.root, &config_manager).await,
    }
}

/// Validates the content and every data table; fails when any error is found.
async fn check(root: &Path, config_manager: &ConfigManager) -> Result<ExitCode, CliError> {
    let settings = config_manager.get_settings();
    let config_dir = settings.config_path(root);

    let workspace = Workspace::load(root, config_manager).await?;
    let BuildReport { store, mut diagnostics } = workspace.build().await?;

    match TranslationData::load(&config_dir, &settings.locales) {
        Ok(translations) => {
            let gaps = parity::check(
                &settings.locales,
                &translations.text,
                &translations.routes,
                &translations.localized_collections,
            );
            diagnostics.extend(
                gaps.iter()
                    .filter_map(|gap| Diagnostic::from_parity_gap(gap, settings.diagnostics.key_parity)),
            );
        }
        Err(e) => diagnostics.push(Diagnostic::error(TRANSLATION_DATA_FILE, e.to_string())),
    }

    if let Err(e) = DataTranslations::load(&config_dir, &settings.locales) {
        diagnostics.push(Diagnostic::error(settings.config_dir.clone(), e.to_string()));
    }

    let report = BuildReport { store, diagnostics };
    let mut out = std::io::stdout().lock();
    for diagnostic in &report.diagnostics {
        writeln!(out, "{diagnostic}")?;
    }
    writeln!(
        out,
        "{} entries, {} error(s), {} warning(s)",
        report.store.len(),
        report.count(DiagnosticSeverity::Error),
        report.count(DiagnosticSeverity::Warning)
    )?;

    Ok(if report.has_errors() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Writes the derived editor configuration, or reports how `compare` differs from it.
fn cms(
    settings: &SiteSettings,
    dev: bool,
    out: Option<&Path>,
    compare: Option<&Path>,
) -> Result<ExitCode, CliError> {
    let registry = SchemaRegistry::builtin();

    if let Some(existing) = compare {
        let text = std::fs::read_to_string(existing)?;
        let found = drift(&CmsConfig::from_json(&text)?, registry);
        let mut stdout = std::io::stdout().lock();
        for difference in &found {
            writeln!(stdout, "{difference}")?;
        }
        return Ok(if found.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    let config = CmsConfig::from_registry(registry, settings, dev)?;
    let json = serde_json::to_string_pretty(&config)?;
    match out {
        Some(path) => {
            std::fs::write(path, json + "\n")?;
            tracing::debug!(path = %path.display(), "Wrote CMS configuration");
        }
        None => writeln!(std::io::stdout().lock(), "{json}")?,
    }
    Ok(ExitCode::SUCCESS)
}

/// Prints `path` rewritten for locale `to`.
fn translate_path(
    root: &Path,
    settings: &SiteSettings,
    path: &str,
    from: Option<&str>,
    to: &str,
) -> Result<ExitCode, CliError> {
    let translations = TranslationData::load(&settings.config_path(root), &settings.locales)?;
    let locales = LocaleConfig::from_settings(settings);

    let switcher = LocaleSwitcher::new(&locales, &translations.routes);
    let translated = match from {
        Some(from) => switcher.switch_from(path, from, to),
        None => switcher.switch_url(path, to),
    };
    let translated = translated
        .ok_or_else(|| CliError::NoRoute { path: path.to_string(), locale: to.to_string() })?;

    writeln!(std::io::stdout().lock(), "{translated}")?;
    Ok(ExitCode::SUCCESS)
}

/// Prints every published localized entry with its alternates.
async fn alternates(root: &Path, config_manager: &ConfigManager) -> Result<ExitCode, CliError> {
    let settings = config_manager.get_settings();
    let translations = TranslationData::load(&settings.config_path(root), &settings.locales)?;
    let locales = LocaleConfig::from_settings(settings);

    let workspace = Workspace::load(root, config_manager).await?;
    let report = workspace.build().await?;
    for diagnostic in &report.diagnostics {
        tracing::warn!("{diagnostic}");
    }

    let joiner = CollectionJoiner::new(&report.store, &translations.localized_collections, &locales);
    let mut out = std::io::stdout().lock();
    for collection in translations.localized_collections.names() {
        for entry in report.store.published(collection) {
            let paths: Vec<String> = joiner
                .alternates(entry)
                .into_iter()
                .map(|(locale, path)| format!("{locale}={path}"))
                .collect();
            writeln!(out, "{collection}/{}\t{}", entry.id, paths.join(" "))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
