// ============================================================================
// Module : export
// ============================================================================
// Sérialisation des tickers collectés vers le disque
// ============================================================================

pub mod csv_writer; // Écriture CSV à schéma fixe

pub use csv_writer::{write_tickers, write_tickers_file};
