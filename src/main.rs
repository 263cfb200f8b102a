// ============================================================================
// Ticker Export - Job d'export des tickers Polygon.io
// ============================================================================
// Programme sans arguments :
// 1. Charge la configuration (POLYGON_API_KEY, .env)
// 2. Suit la pagination de /v3/reference/tickers jusqu'au bout
// 3. Écrit tous les tickers dans tickers.csv
//
// CONCEPTS RUST CLÉS :
// 1. Async dans sync : tokio::runtime::Runtime pour les appels API
// 2. anyhow : main() -> Result, l'erreur est affichée avec son contexte
// ============================================================================

use anyhow::{Context, Result};
use tracing::{error, info};

use ticker_export::config::Config;
use ticker_export::run_stock_job;

// ============================================================================
// Initialisation du logging
// ============================================================================
// La console est réservée aux messages de progression (println!),
// les logs structurés partent dans un fichier avec rotation quotidienne.
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans ./logs/ticker_export.log
///
/// # Utilisation
/// ```bash
/// tail -f ./logs/ticker_export.log
///
/// # Contrôler le niveau de log
/// RUST_LOG=debug cargo run
/// RUST_LOG=ticker_export=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::PathBuf::from("./logs");

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "ticker_export.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour ticker_export, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticker_export=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber tracing")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    // Si le logging échoue, on prévient et on continue quand même
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    let config = Config::from_env()?;
    info!(?config, "Configuration loaded");

    // CONCEPT RUST : Exécuter du code async dans du code sync
    // - .block_on() : exécute la future jusqu'au bout, une page à la fois
    let runtime = tokio::runtime::Runtime::new().context("Échec de la création du runtime tokio")?;
    let result = runtime.block_on(run_stock_job(&config));

    match &result {
        Ok(summary) => info!(
            tickers = summary.tickers,
            output = %summary.output_path.display(),
            "Job exited normally"
        ),
        Err(e) => error!(error = ?e, "Job exited with error"),
    }

    result.map(|_| ())
}
