// ============================================================================
// Structures : TickerRecord et TickersPage
// ============================================================================
// Représente un ticker tel que renvoyé par l'API Polygon (/v3/reference/tickers)
// et une page de résultats paginée.
//
// CONCEPTS RUST :
// 1. Newtype pattern : TickerRecord enveloppe une Map JSON
//    - On garde tous les champs reçus (même inconnus)
//    - Le tri se fait à l'écriture du CSV, pas à la lecture
//
// 2. #[serde(transparent)] :
//    - La struct est désérialisée exactement comme son unique champ
//    - {"ticker": "AAPL", ...} -> TickerRecord(Map { ... })
// ============================================================================

use serde::Deserialize;
use serde_json::{Map, Value};

/// Colonnes du fichier CSV, dans l'ordre d'écriture
///
/// CONCEPT RUST : const array
/// - Taille connue à la compilation ([&str; 12])
/// - Aucune allocation, vit dans le binaire
pub const TICKER_FIELDS: [&str; 12] = [
    "ticker",
    "name",
    "market",
    "locale",
    "primary_exchange",
    "type",
    "active",
    "currency_name",
    "cik",
    "composite_figi",
    "share_class_figi",
    "last_updated_utc",
];

/// Un ticker et ses métadonnées de référence
///
/// Immuable une fois reçu : pas de setter, seulement des accesseurs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TickerRecord(Map<String, Value>);

impl TickerRecord {
    /// Valeur brute d'un champ (None si absent)
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Symbole du ticker (ex: "AAPL")
    pub fn ticker(&self) -> Option<&str> {
        self.get("ticker").and_then(Value::as_str)
    }

    /// Texte d'une cellule CSV pour ce champ
    ///
    /// CONCEPT RUST : match sur un enum avec données
    /// - Chaque variante de Value a son propre rendu
    /// - Champ absent ou null -> cellule vide
    pub fn cell(&self, field: &str) -> String {
        match self.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            // Même rendu que l'export historique : True / False
            Some(Value::Bool(true)) => "True".to_string(),
            Some(Value::Bool(false)) => "False".to_string(),
            Some(Value::Number(n)) => n.to_string(),
            // Tableaux et objets : JSON compact
            Some(other) => other.to_string(),
        }
    }

    /// Une ligne CSV complète, alignée sur TICKER_FIELDS
    ///
    /// Les champs inconnus sont ignorés ici : ils ne créent jamais de colonne.
    pub fn row(&self) -> [String; 12] {
        TICKER_FIELDS.map(|field| self.cell(field))
    }

    /// Nombre de champs reçus (connus ou non)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Une page de la réponse paginée
///
/// CONCEPT RUST : Option<T> + #[serde(default)]
/// - Champ absent du JSON -> None au lieu d'une erreur
/// - "results": null est aussi accepté (-> None)
#[derive(Debug, Deserialize)]
pub struct TickersPage {
    #[serde(default)]
    pub results: Option<Vec<TickerRecord>>,

    /// URL de la page suivante (absente sur la dernière page)
    #[serde(default)]
    pub next_url: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub count: Option<u64>,

    #[serde(default)]
    pub request_id: Option<String>,
}

impl TickersPage {
    /// Consomme la page et retourne ses résultats (vide si absents)
    pub fn into_results(self) -> Vec<TickerRecord> {
        self.results.unwrap_or_default()
    }

    /// Vrai si l'API annonce une page suivante
    pub fn has_next(&self) -> bool {
        self.next_url.is_some()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
