// ============================================================================
// Export CSV
// ============================================================================
// Écrit les tickers collectés dans un fichier CSV à schéma fixe :
// - une ligne d'en-tête avec les 12 colonnes de TICKER_FIELDS
// - une ligne par ticker, champs absents -> cellule vide
// - champs inconnus ignorés (jamais de colonne supplémentaire)
//
// Format : UTF-8, séparateur virgule, fin de ligne CRLF, quoting minimal.
// ============================================================================

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::models::{TickerRecord, TICKER_FIELDS};

/// Écrit l'en-tête puis une ligne par ticker dans n'importe quel Write
///
/// CONCEPT RUST : Generic sur std::io::Write
/// - Fichier en production, Vec<u8> dans les tests
/// - csv::Writer bufferise en interne, flush explicite à la fin
pub fn write_tickers<W: Write>(writer: W, records: &[TickerRecord]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv_writer
        .write_record(TICKER_FIELDS)
        .context("Échec de l'écriture de l'en-tête CSV")?;

    for record in records {
        csv_writer.write_record(record.row()).with_context(|| {
            format!(
                "Échec de l'écriture de la ligne CSV pour {}",
                record.ticker().unwrap_or("<sans symbole>")
            )
        })?;
    }

    csv_writer.flush().context("Échec du flush CSV")?;
    Ok(())
}

/// Crée (ou écrase) le fichier et y écrit les tickers
///
/// Le fichier est ouvert, entièrement écrit puis fermé dans ce scope.
#[instrument(skip(records), fields(records = records.len()))]
pub fn write_tickers_file(path: &Path, records: &[TickerRecord]) -> Result<()> {
    debug!("Creating output file");
    let file = File::create(path)
        .with_context(|| format!("Impossible de créer le fichier {}", path.display()))?;

    write_tickers(file, records)
        .with_context(|| format!("Échec de l'écriture de {}", path.display()))?;

    info!("CSV file written");
    Ok(())
}

// ============================================================================
// Tests unitaires
// ============================================================================
