// ============================================================================
// Job d'export des tickers
// ============================================================================
// Enchaîne les deux étapes : pagination complète puis écriture du CSV.
// Tout est séquentiel : une requête à la fois, un seul écrivain.
// ============================================================================

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::api::PolygonClient;
use crate::config::Config;
use crate::export::write_tickers_file;

/// Bilan d'une exécution du job
#[derive(Debug, Clone)]
pub struct JobSummary {
    /// Nombre de tickers écrits
    pub tickers: usize,

    pub output_path: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl JobSummary {
    /// Durée totale du job
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Récupère tous les tickers actions actifs et les écrit en CSV
///
/// Affiche la progression sur la console (comme le reste du binaire) et
/// trace chaque étape. La première erreur interrompt le job.
#[instrument(skip(config), fields(output = %config.output_path.display()))]
pub async fn run_stock_job(config: &Config) -> Result<JobSummary> {
    let started_at = Utc::now();
    info!(%started_at, limit = config.page_limit, "Starting ticker export");

    let client = PolygonClient::new(config)?;
    let tickers = client.fetch_all_tickers(config.page_limit).await?;

    println!("Collected {} tickers", tickers.len());
    info!(total = tickers.len(), "Collected tickers");

    write_tickers_file(&config.output_path, &tickers)?;
    println!("✅ Data written to {}", config.output_path.display());

    let summary = JobSummary {
        tickers: tickers.len(),
        output_path: config.output_path.clone(),
        started_at,
        finished_at: Utc::now(),
    };

    info!(
        tickers = summary.tickers,
        elapsed_ms = summary.elapsed().num_milliseconds(),
        "Ticker export finished"
    );

    Ok(summary)
}
