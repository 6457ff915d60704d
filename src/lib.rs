// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Client-side search box over a pre-built elasticlunr index.
//!
//! The widget waits for the elasticlunr runtime to appear on the page, fetches
//! the serialized index, and from then on turns every pause in typing into a
//! field-boosted query and a freshly rendered results panel.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌──────────────┐   ┌───────────┐
//! │ ready.rs │──▶│ index.rs  │──▶│ bootstrap.rs │──▶│controller │
//! │(WaitReady│   │(load_index│   │ (locate,wire,│   │ .rs       │
//! │  future) │   │ Document) │   │  placeholder)│   │           │
//! └──────────┘   └───────────┘   └──────────────┘   └─────┬─────┘
//!                                                         │
//!            ┌──────────────┬────────────────┬────────────┤
//!            ▼              ▼                ▼            ▼
//!     ┌────────────┐ ┌────────────┐  ┌─────────────┐ ┌─────────┐
//!     │debounce.rs │ │ render.rs  │  │   ui.rs     │ │types.rs │
//!     │(Debouncer) │ │ (fragment) │  │(PanelState) │ │         │
//!     └────────────┘ └────────────┘  └─────────────┘ └─────────┘
//! ```
//!
//! The core is target-independent. The browser supplies three things through
//! traits: the page ([`Locate`] and [`Page`] over DOM elements), the
//! [`Scheduler`] (timers) and the [`IndexBackend`] (elasticlunr). The `wasm`
//! feature provides the `web-sys`
//! implementations and the exported `start` entry point; everything else runs
//! and is tested natively.
//!
//! # Usage
//!
//! ```ignore
//! use sifter::{bootstrap, WidgetConfig};
//!
//! let config = WidgetConfig::default();
//! let controller = bootstrap(&backend, &locator, wire, scheduler, &config).await?;
//! controller.on_focus();
//! controller.on_keyup();   // queries 400ms later
//! ```

pub mod bootstrap;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod index;
pub mod ready;
pub mod render;
pub mod scheduler;
pub mod testing;
pub mod types;
pub mod ui;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports for public API
pub use bootstrap::bootstrap;
pub use config::{ElementIds, WidgetConfig};
pub use controller::SearchController;
pub use debounce::Debouncer;
pub use error::WidgetError;
pub use index::{
    load_index, require_keys, IndexBackend, IndexDocument, IndexSummary, SearchIndex,
};
pub use ready::{wait_until_ready, WaitReady};
pub use render::{
    body_preview, collapse_tag_whitespace, escape_html, render_item, render_results,
    render_unavailable, safelist, EscapePolicy,
};
pub use scheduler::{Scheduler, TimerId};
pub use types::{BoolMode, FieldBoost, FieldBoosts, ResultDoc, ResultItem, SearchConfig};
pub use ui::{Locate, Page, PanelState, Region, Visibility};
