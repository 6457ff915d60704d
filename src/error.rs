// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Everything that can stop the widget from becoming interactive.
//!
//! The browser version of this widget used to fail silently: an unhandled
//! promise rejection when the index didn't load, a null dereference when the
//! markup was missing an element. Each of those is a variant here, so the
//! bootstrap can surface it and the page can show a "search unavailable"
//! state instead of a dead input box.

use std::fmt;

/// Error type for widget bootstrap and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// The index library never appeared on the global object within the
    /// configured timeout.
    LibraryUnavailable { waited_ms: u64 },
    /// The network request for the index document failed outright.
    Fetch { url: String, reason: String },
    /// The server answered, but not with a 2xx.
    Status { url: String, status: u16 },
    /// The response body was not JSON.
    Parse { url: String, reason: String },
    /// The JSON parsed but is not an index document.
    InvalidIndex { reason: String },
    /// The library's load routine rejected the document.
    LoadFailed { reason: String },
    /// The library threw while answering a query.
    Query { reason: String },
    /// A required element is not in the page markup.
    MissingElement { id: String },
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetError::LibraryUnavailable { waited_ms } => {
                write!(f, "search library not available after {}ms", waited_ms)
            }
            WidgetError::Fetch { url, reason } => {
                write!(f, "failed to fetch {}: {}", url, reason)
            }
            WidgetError::Status { url, status } => {
                write!(f, "fetching {} returned HTTP {}", url, status)
            }
            WidgetError::Parse { url, reason } => {
                write!(f, "index at {} is not valid JSON: {}", url, reason)
            }
            WidgetError::InvalidIndex { reason } => {
                write!(f, "not a search index document: {}", reason)
            }
            WidgetError::LoadFailed { reason } => {
                write!(f, "search library rejected the index: {}", reason)
            }
            WidgetError::Query { reason } => write!(f, "search query failed: {}", reason),
            WidgetError::MissingElement { id } => {
                write!(f, "element #{} not found in page", id)
            }
        }
    }
}

impl std::error::Error for WidgetError {}
