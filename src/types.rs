// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The records that cross the boundary between the widget and the index library.
//!
//! `ResultItem` is what the library hands back for a query, `SearchConfig` is
//! what the widget hands the library alongside the query text. Both serialize to
//! exactly the shapes elasticlunr uses, so they can cross the WASM boundary with
//! `serde-wasm-bindgen` untouched.
//!
//! # Wire shapes
//!
//! ```text
//! ResultItem    { "ref": "/posts/x/", "score": 1.7,
//!                 "doc": { "title": "..", "description": "..", "body": ".." } }
//! SearchConfig  { "fields": { "title": {"boost": 3}, "description": {"boost": 2},
//!                             "body": {"boost": 1} },
//!                 "bool": "OR", "expand": false }
//! ```

use serde::{Deserialize, Serialize};

/// Stored fields of a matched document.
///
/// Index builders may leave any field out (a site that disables descriptions
/// simply never stores one), so every field tolerates absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultDoc {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub body: Option<String>,
}

/// One ranked hit, in the order the library returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Link target of the document (the index's `ref` field).
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub doc: ResultDoc,
}

impl ResultItem {
    pub fn new(reference: impl Into<String>, doc: ResultDoc) -> Self {
        Self {
            reference: reference.into(),
            score: 0.0,
            doc,
        }
    }
}

/// Relevance multiplier for one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBoost {
    pub boost: f64,
}

impl FieldBoost {
    pub const fn new(boost: f64) -> Self {
        Self { boost }
    }
}

/// Per-field boosts. Title matches count three times, description twice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldBoosts {
    pub title: FieldBoost,
    pub description: FieldBoost,
    pub body: FieldBoost,
}

impl Default for FieldBoosts {
    fn default() -> Self {
        Self {
            title: FieldBoost::new(3.0),
            description: FieldBoost::new(2.0),
            body: FieldBoost::new(1.0),
        }
    }
}

/// How query tokens combine within a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoolMode {
    /// A document matches if any token matches.
    #[default]
    #[serde(rename = "OR")]
    Or,
    /// A document matches only if every token matches.
    #[serde(rename = "AND")]
    And,
}

/// Options object passed to the library's search routine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub fields: FieldBoosts,
    #[serde(rename = "bool")]
    pub bool_mode: BoolMode,
    /// Also match indexed terms that start with a query token.
    pub expand: bool,
}
