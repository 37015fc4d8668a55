use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Color palette and font selection loaded from `theme.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeDocument {
    /// Semantic color name (primary, accent, bg, text, surface, ...) to CSS value.
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(default)]
    pub font: Option<String>,
}
