use serde::{Deserialize, Serialize};

/// Game catalog loaded from `games.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamesDocument {
    #[serde(default, alias = "title")]
    pub site_title: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    /// ISO-8601 release instant the countdown runs toward.
    #[serde(default)]
    pub countdown_target: Option<String>,
    #[serde(default)]
    pub games: Vec<GameRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}
