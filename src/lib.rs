// ============================================================================
// Ticker Export - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;     // API Polygon.io
pub mod config;  // Configuration (environnement + .env)
pub mod export;  // Écriture CSV
pub mod job;     // Orchestration du job
pub mod models;  // Structures de données

pub use job::{run_stock_job, JobSummary};
