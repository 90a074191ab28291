use serde::{Deserialize, Serialize};

use crate::{
    domain::{AnimationTag, Product},
    error::ApiError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactRequest {
    pub compounds: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionResult {
    pub equation: String,
    pub description: String,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(rename = "animation")]
    pub animation_tag: AnimationTag,
}

/// Body of `POST /react`, either a resolved reaction or an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReactResponse {
    Failure(ApiError),
    Success(ReactionResult),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteQuery {
    pub prefix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub results: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSearchQuery {
    pub query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSearchResponse {
    #[serde(default)]
    pub result: Option<String>,
}

impl WebSearchResponse {
    /// The result text, treating blank strings as no result.
    pub fn into_text(self) -> Option<String> {
        self.result.filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionChainRequest {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReactionChainResponse {
    Failure(ApiError),
    Chain { chain: Vec<String> },
}
