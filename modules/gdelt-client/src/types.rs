use serde::Deserialize;

/// Top-level DOC 2.0 ArtList payload. A missing `articles` key (GDELT
/// returns it sparsely on empty result sets) deserializes as empty.
#[derive(Debug, Deserialize)]
pub struct ArticleList {
    #[serde(default)]
    pub articles: Vec<ArticleRow>,
}

#[derive(Debug, Deserialize)]
pub struct ArticleRow {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub seendate: String,
    #[serde(default, rename = "sourcecountry", alias = "sourceCountry")]
    pub source_country: Option<String>,
}
