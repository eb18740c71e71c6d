use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEdition {
    pub local_date: String,  // "2025-10-18"
    pub time_of_day: String, // "morning" | "afternoon" | "evening"
    pub articles: Vec<ApiArticle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiArticle {
    pub source: String, // URL string
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub summary_of_news_article: String,
    #[serde(default, rename = "keyTakeAways")]
    pub key_take_aways: Vec<String>,
}
