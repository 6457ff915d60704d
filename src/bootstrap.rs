// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One-shot startup: library → index → elements → handlers → placeholder.
//!
//! ```text
//! wait_until_ready ──▶ load_index ──▶ locate ──▶ wire ──▶ render_initial
//!        │                  │             │
//!        └──────────────────┴──▶ "unavailable" fragment + Err
//!                                         └──▶ Err(MissingElement)
//! ```
//!
//! If the library or the index never arrives, the results container gets the
//! "search unavailable" fragment so the page doesn't sit on a search box that
//! silently does nothing. That only needs the container itself; the input and
//! close control may be missing.

use crate::config::WidgetConfig;
use crate::controller::SearchController;
use crate::error::WidgetError;
use crate::index::{load_index, IndexBackend};
use crate::ready::wait_until_ready;
use crate::render::render_unavailable;
use crate::scheduler::Scheduler;
use crate::ui::Locate;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Run the startup sequence and return the live controller.
///
/// `locator` finds the page elements by id; `wire` attaches event handlers to
/// them and is called exactly once, before the placeholder is drawn.
pub async fn bootstrap<B, L, W, S>(
    backend: &B,
    locator: &L,
    wire: W,
    scheduler: S,
    config: &WidgetConfig,
) -> Result<Rc<SearchController<B::Index, L::Page, S>>, WidgetError>
where
    B: IndexBackend,
    B::Index: 'static,
    L: Locate,
    L::Page: 'static,
    S: Scheduler + Clone + Unpin,
    W: FnOnce(&Rc<SearchController<B::Index, L::Page, S>>) -> Result<(), WidgetError>,
{
    let ready = wait_until_ready(
        || backend.is_available(),
        scheduler.clone(),
        config.ready_timeout(),
    )
    .await;
    if let Err(err) = ready {
        return Err(show_unavailable(locator, config, err));
    }

    let index = match load_index(backend, &config.index_url).await {
        Ok(index) => index,
        Err(err) => return Err(show_unavailable(locator, config, err)),
    };

    let page = locator.locate(&config.elements)?;
    let controller = Rc::new(SearchController::new(index, page, scheduler, config));
    wire(&controller)?;
    controller.render_initial();

    info!(url = %config.index_url, "search widget ready");
    Ok(controller)
}

// Only the results container is needed to report the failure, so the other
// elements may be missing.
fn show_unavailable<L: Locate>(locator: &L, config: &WidgetConfig, err: WidgetError) -> WidgetError {
    warn!(error = %err, "search disabled");
    if !locator.fill_results(&config.elements, &render_unavailable()) {
        debug!(id = %config.elements.results, "no results container to report into");
    }
    err
}
