// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The seam between the widget and the index library.
//!
//! Ranking is not this crate's business: the index is built ahead of time by
//! the site generator, serialized as elasticlunr JSON, and queried through the
//! elasticlunr runtime already on the page. This module defines what the widget
//! needs from that runtime ([`IndexBackend`], [`SearchIndex`]) and validates
//! the serialized document before handing it over ([`IndexDocument`]).
//!
//! # Document shape
//!
//! ```text
//! {
//!   "version": "0.9.5",
//!   "fields": ["title", "description", "body"],
//!   "ref": "id",
//!   "documentStore": { "docs": { "<ref>": {..stored fields..} }, "length": N, .. },
//!   "index": { "<field>": { "root": { ..term trie.. } } },
//!   "pipeline": ["trimmer", "stopWordFilter", "stemmer"],
//!   "lang": "English"
//! }
//! ```

use crate::error::WidgetError;
use crate::types::{ResultItem, SearchConfig};
use serde_json::Value;
use tracing::{debug, info};

/// Top-level keys the library's load routine dereferences unconditionally.
pub const REQUIRED_KEYS: [&str; 4] = ["fields", "ref", "index", "documentStore"];

/// A loaded, queryable index. Read-only for the page's lifetime.
pub trait SearchIndex {
    /// Ranked hits for `query`, best first.
    fn search(&self, query: &str, config: &SearchConfig) -> Result<Vec<ResultItem>, WidgetError>;
}

/// The index library as the widget sees it.
#[allow(async_fn_in_trait)]
pub trait IndexBackend {
    type Index: SearchIndex;

    /// Whether the library has attached itself to the page yet.
    fn is_available(&self) -> bool;

    /// Fetch the serialized index at `url` and hand it to the library.
    async fn load(&self, url: &str) -> Result<Self::Index, WidgetError>;
}

/// Fetch and construct the index once, logging the outcome.
pub async fn load_index<B: IndexBackend>(backend: &B, url: &str) -> Result<B::Index, WidgetError> {
    debug!(url, "loading search index");
    let index = backend.load(url).await?;
    info!(url, "search index loaded");
    Ok(index)
}

/// Fail with the first of [`REQUIRED_KEYS`] that `has_key` reports absent.
///
/// Takes a lookup rather than a document so the browser loader can check the
/// object `JSON.parse` produced without copying it into Rust.
pub fn require_keys(has_key: impl Fn(&str) -> bool) -> Result<(), WidgetError> {
    match REQUIRED_KEYS.into_iter().find(|key| !has_key(*key)) {
        Some(key) => Err(WidgetError::InvalidIndex {
            reason: format!("missing `{}`", key),
        }),
        None => Ok(()),
    }
}

/// A parsed `search_index.<lang>.json` that passed shape validation.
#[derive(Debug, Clone)]
pub struct IndexDocument {
    raw: Value,
}

/// What an index document contains, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub version: Option<String>,
    pub ref_field: String,
    pub fields: Vec<String>,
    pub doc_count: usize,
    pub pipeline: Vec<String>,
    pub lang: Option<String>,
}

impl IndexDocument {
    /// Parse a response body fetched from `url`.
    pub fn parse(url: &str, body: &str) -> Result<Self, WidgetError> {
        let raw: Value = serde_json::from_str(body).map_err(|e| WidgetError::Parse {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_value(raw)
    }

    pub fn from_value(raw: Value) -> Result<Self, WidgetError> {
        let object = raw.as_object().ok_or_else(|| WidgetError::InvalidIndex {
            reason: "top level is not an object".to_string(),
        })?;

        require_keys(|key| object.contains_key(key))?;

        if !object["fields"].is_array() {
            return Err(WidgetError::InvalidIndex {
                reason: "`fields` is not an array".to_string(),
            });
        }

        Ok(Self { raw })
    }

    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    pub fn into_value(self) -> Value {
        self.raw
    }

    pub fn summary(&self) -> IndexSummary {
        let strings = |key: &str| -> Vec<String> {
            self.raw[key]
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default()
        };

        let store = &self.raw["documentStore"];
        let doc_count = store["length"]
            .as_u64()
            .map(|n| n as usize)
            .or_else(|| store["docs"].as_object().map(|docs| docs.len()))
            .unwrap_or(0);

        IndexSummary {
            version: self.raw["version"].as_str().map(str::to_string),
            ref_field: self.raw["ref"].as_str().unwrap_or_default().to_string(),
            fields: strings("fields"),
            doc_count,
            pipeline: strings("pipeline"),
            lang: self.raw["lang"].as_str().map(str::to_string),
        }
    }

    /// Boosted fields the index was built without. A query against a missing
    /// field matches nothing.
    pub fn unknown_boosted_fields(&self) -> Vec<&'static str> {
        let fields = self.summary().fields;
        ["title", "description", "body"]
            .into_iter()
            .filter(|name| !fields.iter().any(|f| f == name))
            .collect()
    }
}
