// ============================================================================
// API Client : Polygon.io (référentiel des tickers)
// ============================================================================
// Récupère la liste paginée des tickers actions depuis
// GET /v3/reference/tickers
//
// Pagination par curseur : chaque réponse peut contenir un champ "next_url".
// On le suit (en y ajoutant la clé API) jusqu'à ce qu'il disparaisse.
//
// CONCEPTS RUST :
// 1. async/await : chaque page est attendue avant la suivante (séquentiel)
// 2. Result<T, E> + Context : chaque I/O ajoute son contexte à l'erreur
// 3. url::Url : construction typée des paramètres de requête
// ============================================================================

use anyhow::{Context, Result};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::Config;
use crate::models::{TickerRecord, TickersPage};

/// Chemin de l'endpoint, relatif à la racine de l'API
const TICKERS_PATH: &str = "v3/reference/tickers";

/// Client HTTP authentifié pour l'API Polygon
///
/// CONCEPT RUST : reqwest::Client
/// - Contient un pool de connexions, on le crée une seule fois
/// - Réutilisé pour toutes les pages
pub struct PolygonClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl PolygonClient {
    /// Crée un client à partir de la configuration
    pub fn new(config: &Config) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url)
            .with_context(|| format!("URL de base invalide : {}", config.base_url))?;

        // Sans '/' final, Url::join remplacerait le dernier segment du préfixe
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        debug!("Creating HTTP client");
        let http = reqwest::Client::builder()
            .user_agent(concat!("ticker_export/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Échec de la création du client HTTP")?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// URL de la première page
    ///
    /// market=stocks, active=true, sort=ticker, order=asc, limit=<limit>, apiKey=<clé>
    pub fn initial_url(&self, limit: u32) -> Result<Url> {
        let mut url = self
            .base_url
            .join(TICKERS_PATH)
            .context("Impossible de construire l'URL des tickers")?;

        url.query_pairs_mut()
            .append_pair("market", "stocks")
            .append_pair("active", "true")
            .append_pair("sort", "ticker")
            .append_pair("order", "asc")
            .append_pair("limit", &limit.to_string())
            .append_pair("apiKey", &self.api_key);

        Ok(url)
    }

    /// Ajoute la clé API à une URL de pagination (next_url)
    ///
    /// CONCEPT RUST : Url::join
    /// - URL absolue : retournée telle quelle
    /// - URL relative : résolue par rapport à la racine de l'API
    pub fn authenticate(&self, next_url: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join(next_url)
            .with_context(|| format!("next_url invalide : {next_url}"))?;

        url.query_pairs_mut().append_pair("apiKey", &self.api_key);
        Ok(url)
    }

    /// Télécharge et décode une page
    ///
    /// L'URL contient la clé API : elle n'apparaît pas dans le span.
    #[instrument(skip_all, fields(path = %url.path()))]
    pub async fn fetch_page(&self, url: Url) -> Result<TickersPage> {
        debug!("Sending HTTP request to Polygon");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("Échec de la requête HTTP vers Polygon")?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        // Vérifie que la réponse est un succès HTTP (200-299)
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Polygon returned error status");
            anyhow::bail!("Polygon a retourné une erreur : HTTP {} {}", status, body.trim());
        }

        let page: TickersPage = response
            .json()
            .await
            .context("Échec du parsing JSON de la réponse Polygon")?;

        debug!(
            status = ?page.status,
            count = ?page.count,
            request_id = ?page.request_id,
            has_next = page.has_next(),
            "Parsed tickers page"
        );

        Ok(page)
    }

    /// Suit la pagination jusqu'au bout et retourne tous les tickers
    ///
    /// L'ordre renvoyé par l'API est conservé, page après page.
    ///
    /// CONCEPT RUST : loop + while let
    /// - Pas de récursion : une simple boucle tant que next_url existe
    /// - Vec::extend consomme les résultats de chaque page (move)
    #[instrument(skip(self))]
    pub async fn fetch_all_tickers(&self, limit: u32) -> Result<Vec<TickerRecord>> {
        let mut tickers = Vec::new();

        let mut page = self.fetch_page(self.initial_url(limit)?).await?;
        let mut pages = 1;

        loop {
            let next_url = page.next_url.take();
            let results = page.into_results();
            debug!(page = pages, records = results.len(), "Page collected");
            tickers.extend(results);

            let Some(next_url) = next_url else {
                break;
            };

            // Affiche le curseur avant d'y ajouter la clé
            println!("Requesting next page: {}", next_url);
            info!(page = pages + 1, next_url = %next_url, "Requesting next page");

            page = self.fetch_page(self.authenticate(&next_url)?).await?;
            pages += 1;
        }

        info!(pages, total = tickers.len(), "Pagination finished");
        Ok(tickers)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
// CONCEPT RUST : #[tokio::test]
// - Macro qui setup un runtime tokio pour le test
// - httpmock démarre un vrai serveur HTTP local, pas besoin de réseau
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn test_config(base_url: String) -> Config {
        Config {
            api_key: "test-key".to_string(),
            base_url,
            page_limit: 1000,
            output_path: PathBuf::from("tickers.csv"),
        }
    }

    fn symbols(records: &[TickerRecord]) -> Vec<&str> {
        records.iter().filter_map(TickerRecord::ticker).collect()
    }

    #[test]
    fn test_initial_url() {
        let client = PolygonClient::new(&test_config("https://api.polygon.io".into())).unwrap();
        let url = client.initial_url(1000).unwrap();

        assert_eq!(url.host_str(), Some("api.polygon.io"));
        assert_eq!(url.path(), "/v3/reference/tickers");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let expected = [
            ("market", "stocks"),
            ("active", "true"),
            ("sort", "ticker"),
            ("order", "asc"),
            ("limit", "1000"),
            ("apiKey", "test-key"),
        ];
        for (key, value) in expected {
            assert!(
                pairs.contains(&(key.to_string(), value.to_string())),
                "missing {key}={value} in {url}"
            );
        }
    }

    #[test]
    fn test_initial_url_keeps_base_prefix() {
        for base in ["http://proxy.local/polygon", "http://proxy.local/polygon/"] {
            let client = PolygonClient::new(&test_config(base.into())).unwrap();
            let url = client.initial_url(10).unwrap();
            assert_eq!(url.path(), "/polygon/v3/reference/tickers", "base {base}");
        }
    }

    #[test]
    fn test_authenticate_keeps_cursor() {
        let client = PolygonClient::new(&test_config("https://api.polygon.io".into())).unwrap();
        let url = client
            .authenticate("https://api.polygon.io/v3/reference/tickers?cursor=YWN0aXZl")
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.polygon.io/v3/reference/tickers?cursor=YWN0aXZl&apiKey=test-key"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(PolygonClient::new(&test_config("pas une url".into())).is_err());
    }

    #[tokio::test]
    async fn test_fetch_all_follows_next_url() {
        let server = MockServer::start_async().await;

        let first = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v3/reference/tickers")
                    .query_param("market", "stocks")
                    .query_param("limit", "2")
                    .query_param("apiKey", "test-key");
                then.status(200).json_body(json!({
                    "results": [{"ticker": "A"}, {"ticker": "AA"}],
                    "status": "OK",
                    "next_url": server.url("/v3/reference/tickers?cursor=p2"),
                }));
            })
            .await;

        let second = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v3/reference/tickers")
                    .query_param("cursor", "p2")
                    .query_param("apiKey", "test-key");
                then.status(200).json_body(json!({
                    "results": [{"ticker": "AAPL"}, {"ticker": "ABNB"}],
                    "next_url": server.url("/v3/reference/tickers?cursor=p3"),
                }));
            })
            .await;

        let third = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v3/reference/tickers")
                    .query_param("cursor", "p3")
                    .query_param("apiKey", "test-key");
                then.status(200).json_body(json!({
                    "results": [{"ticker": "MSFT"}],
                    "status": "OK",
                }));
            })
            .await;

        let client = PolygonClient::new(&test_config(server.base_url())).unwrap();
        let tickers = client.fetch_all_tickers(2).await.unwrap();

        assert_eq!(symbols(&tickers), vec!["A", "AA", "AAPL", "ABNB", "MSFT"]);
        first.assert_hits_async(1).await;
        second.assert_hits_async(1).await;
        third.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_page_without_results_contributes_nothing() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).query_param("market", "stocks");
                then.status(200).json_body(json!({
                    "status": "OK",
                    "next_url": server.url("/v3/reference/tickers?cursor=p2"),
                }));
            })
            .await;

        server
            .mock_async(|when, then| {
                when.method(GET).query_param("cursor", "p2");
                then.status(200).json_body(json!({
                    "results": [{"ticker": "ZZZ"}],
                }));
            })
            .await;

        let client = PolygonClient::new(&test_config(server.base_url())).unwrap();
        let tickers = client.fetch_all_tickers(1000).await.unwrap();

        assert_eq!(symbols(&tickers), vec!["ZZZ"]);
    }

    #[tokio::test]
    async fn test_error_status_fails() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/v3/reference/tickers");
                then.status(401).json_body(json!({
                    "status": "ERROR",
                    "error": "Unknown API Key",
                }));
            })
            .await;

        let client = PolygonClient::new(&test_config(server.base_url())).unwrap();
        let err = client.fetch_all_tickers(1000).await.unwrap_err();

        assert!(err.to_string().contains("401"), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_malformed_json_fails() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/v3/reference/tickers");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let client = PolygonClient::new(&test_config(server.base_url())).unwrap();
        assert!(client.fetch_all_tickers(1000).await.is_err());
    }
}
