// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Widget configuration.
//!
//! Every knob defaults to what a stock static-site theme expects: the English
//! index at the site root, the three element ids from the theme's search
//! partial, a 400ms debounce. A page only has to pass the fields it changes:
//!
//! ```js
//! start({ indexUrl: "/blog/search_index.en.json", escape: "escape" });
//! ```

use crate::render::EscapePolicy;
use crate::types::SearchConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_INDEX_URL: &str = "/search_index.en.json";
pub const DEFAULT_LIBRARY_GLOBAL: &str = "elasticlunr";
pub const DEFAULT_HIDDEN_CLASS: &str = "hidden";
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

/// Ids of the elements the widget binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    /// The text input.
    pub input: String,
    /// The container results are rendered into.
    pub results: String,
    /// The close control.
    pub close: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            input: "input_search".to_string(),
            results: "div_search_result".to_string(),
            close: "div_search_close".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Where the serialized index is fetched from.
    pub index_url: String,
    /// Global the index library attaches itself to.
    pub library_global: String,
    pub elements: ElementIds,
    /// Class that hides a region.
    pub hidden_class: String,
    /// Quiet period after the last keystroke before querying.
    pub debounce_ms: u64,
    /// Give up waiting for the library after this long. `None` waits forever.
    pub ready_timeout_ms: Option<u64>,
    pub search: SearchConfig,
    pub escape: EscapePolicy,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            library_global: DEFAULT_LIBRARY_GLOBAL.to_string(),
            elements: ElementIds::default(),
            hidden_class: DEFAULT_HIDDEN_CLASS.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            ready_timeout_ms: None,
            search: SearchConfig::default(),
            escape: EscapePolicy::default(),
        }
    }
}

impl WidgetConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn ready_timeout(&self) -> Option<Duration> {
        self.ready_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoolMode;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(WidgetConfig::from_json("{}").unwrap(), WidgetConfig::default());
    }

    #[test]
    fn defaults_match_theme_markup() {
        let config = WidgetConfig::default();
        assert_eq!(config.index_url, "/search_index.en.json");
        assert_eq!(config.elements.input, "input_search");
        assert_eq!(config.elements.results, "div_search_result");
        assert_eq!(config.elements.close, "div_search_close");
        assert_eq!(config.debounce(), Duration::from_millis(400));
        assert_eq!(config.ready_timeout(), None);
        assert_eq!(config.escape, EscapePolicy::Trusted);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = WidgetConfig::from_json(
            r#"{
                "indexUrl": "/blog/search_index.en.json",
                "elements": {"close": "close_btn"},
                "readyTimeoutMs": 5000,
                "escape": "escape",
                "search": {"bool": "AND"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.index_url, "/blog/search_index.en.json");
        assert_eq!(config.elements.input, "input_search");
        assert_eq!(config.elements.close, "close_btn");
        assert_eq!(config.ready_timeout(), Some(Duration::from_millis(5000)));
        assert_eq!(config.escape, EscapePolicy::Escape);
        assert_eq!(config.search.bool_mode, BoolMode::And);
        assert_eq!(config.search.fields.title.boost, 3.0);
        assert_eq!(config.debounce_ms, 400);
    }
}
