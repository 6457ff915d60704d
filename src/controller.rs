// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Event handling for the search box.
//!
//! Three events drive the widget:
//!
//! | Event              | Handler                          | Effect                     |
//! |--------------------|----------------------------------|----------------------------|
//! | focus on input     | [`SearchController::on_focus`]   | show results + close       |
//! | click on close     | [`SearchController::on_close`]   | hide results + close       |
//! | keyup in input     | [`SearchController::on_keyup`]   | debounced [`refresh`]      |
//!
//! A refresh reads the input as it is when the debounce fires, so the query
//! always reflects the last keystroke, and replaces the whole results panel.
//! There is no diffing against the previous query and nothing to cancel: the
//! index call is synchronous.
//!
//! [`refresh`]: SearchController::refresh

use crate::config::WidgetConfig;
use crate::debounce::Debouncer;
use crate::index::SearchIndex;
use crate::render::{render_results, render_unavailable, EscapePolicy};
use crate::scheduler::Scheduler;
use crate::types::SearchConfig;
use crate::ui::{Page, PanelState};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

struct Inner<I, P> {
    index: I,
    page: P,
    panel: RefCell<PanelState>,
    search: SearchConfig,
    escape: EscapePolicy,
}

impl<I: SearchIndex, P: Page> Inner<I, P> {
    fn results_html(&self, query: &str) -> String {
        if query.is_empty() {
            return render_results("", &[], self.escape);
        }

        match self.index.search(query, &self.search) {
            Ok(items) => {
                debug!(query, hits = items.len(), "search");
                render_results(query, &items, self.escape)
            }
            Err(err) => {
                warn!(query, error = %err, "search failed");
                render_unavailable()
            }
        }
    }

    fn refresh(&self) {
        let query = self.page.query();
        let html = self.results_html(&query);
        self.page.set_results_html(&html);
    }
}

/// Owns the loaded index and the page for the rest of the session.
pub struct SearchController<I, P, S: Scheduler> {
    inner: Rc<Inner<I, P>>,
    debouncer: Debouncer<(), S>,
}

impl<I, P, S> SearchController<I, P, S>
where
    I: SearchIndex + 'static,
    P: Page + 'static,
    S: Scheduler,
{
    /// Take over `page`, starting from whatever visibility its markup has.
    pub fn new(index: I, page: P, scheduler: S, config: &WidgetConfig) -> Self {
        let panel = PanelState::observe(&page);
        let inner = Rc::new(Inner {
            index,
            page,
            panel: RefCell::new(panel),
            search: config.search,
            escape: config.escape,
        });

        let target = Rc::clone(&inner);
        let debouncer = Debouncer::new(move |()| target.refresh(), config.debounce(), scheduler);

        Self { inner, debouncer }
    }

    /// Input focused: reveal the results panel and the close control.
    pub fn on_focus(&self) {
        self.inner.panel.borrow_mut().show(&self.inner.page);
    }

    /// Close control activated: hide both again.
    pub fn on_close(&self) {
        self.inner.panel.borrow_mut().hide(&self.inner.page);
    }

    /// Key released in the input: query once typing pauses.
    pub fn on_keyup(&self) {
        self.debouncer.trigger(());
    }

    /// Query with the current input and redraw, without waiting.
    pub fn refresh(&self) {
        self.inner.refresh();
    }

    /// Draw the pre-query placeholder.
    pub fn render_initial(&self) {
        self.inner
            .page
            .set_results_html(&render_results("", &[], self.inner.escape));
    }

    pub fn panel(&self) -> PanelState {
        *self.inner.panel.borrow()
    }

    pub fn page(&self) -> &P {
        &self.inner.page
    }

    pub fn index(&self) -> &I {
        &self.inner.index
    }

    pub fn is_query_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
