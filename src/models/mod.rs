// ============================================================================
// Module : models
// ============================================================================
// Ce module contient les structures de données de l'export
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod ticker; // Déclaration du module ticker (fichier ticker.rs)

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use ticker_export::models::ticker::TickerRecord;
// On peut faire : use ticker_export::models::TickerRecord;
pub use ticker::{TickerRecord, TickersPage, TICKER_FIELDS};
