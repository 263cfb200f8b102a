// ============================================================================
// Module : api
// ============================================================================
// Ce module contient le client de l'API de référence Polygon.io
// ============================================================================

pub mod polygon; // Client API Polygon

// Re-export du client principal
pub use polygon::PolygonClient;
