// ============================================================================
// Configuration du job
// ============================================================================
// Lue depuis l'environnement du process. Un fichier .env dans le répertoire
// courant est chargé d'abord s'il existe (les variables déjà définies gardent
// la priorité).
// ============================================================================

use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.polygon.io";
pub const DEFAULT_PAGE_LIMIT: u32 = 1000;
pub const DEFAULT_OUTPUT: &str = "tickers.csv";

/// Paramètres du job d'export
#[derive(Clone)]
pub struct Config {
    /// Clé API Polygon (POLYGON_API_KEY, obligatoire)
    pub api_key: String,

    /// Racine de l'API (POLYGON_BASE_URL), utile pour pointer vers un mock
    pub base_url: String,

    /// Taille de page demandée (TICKERS_PAGE_LIMIT)
    pub page_limit: u32,

    /// Fichier CSV de sortie (TICKERS_OUTPUT)
    pub output_path: PathBuf,
}

impl Config {
    /// Charge .env puis lit les variables d'environnement
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construit la config à partir d'une fonction de lookup
    ///
    /// CONCEPT RUST : Generic avec trait bound Fn
    /// - Permet de tester sans toucher aux vraies variables d'environnement
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("POLYGON_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("POLYGON_API_KEY n'est pas définie (environnement ou fichier .env)")?;

        let base_url = lookup("POLYGON_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let page_limit = match lookup("TICKERS_PAGE_LIMIT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("TICKERS_PAGE_LIMIT invalide : {raw:?}"))?,
            None => DEFAULT_PAGE_LIMIT,
        };

        let output_path = lookup("TICKERS_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        Ok(Self {
            api_key,
            base_url,
            page_limit,
            output_path,
        })
    }
}

// La clé ne doit jamais finir dans les logs
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("page_limit", &self.page_limit)
            .field("output_path", &self.output_path)
            .finish()
    }
}
