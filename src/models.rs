use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edition {
    pub edition_id: String, // e.g., "2025-10-18-evening"
    pub articles: Vec<Article>,
}

/// A curated article handed to the page designer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub source: String, // URL
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_takeaways: Vec<String>,
}
