// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test doubles shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation. It provides
//! in-memory stand-ins for everything the browser supplies: a virtual clock,
//! a page that records writes, and an index that answers from a table.

#![doc(hidden)]

use crate::error::WidgetError;
use crate::index::{IndexBackend, IndexDocument, SearchIndex};
use crate::scheduler::{Scheduler, TimerId};
use crate::types::{ResultDoc, ResultItem, SearchConfig};
use crate::config::ElementIds;
use crate::ui::{Locate, Page, Region};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};
use std::time::Duration;

/// Create a result item with the given stored fields.
pub fn make_item(reference: &str, title: &str, description: &str, body: Option<&str>) -> ResultItem {
    ResultItem::new(
        reference,
        ResultDoc {
            title: title.to_string(),
            description: description.to_string(),
            body: body.map(str::to_string),
        },
    )
}

/// A two-document elasticlunr index, trimmed to the keys the widget reads.
pub fn sample_index_json() -> String {
    r#"{
        "version": "0.9.5",
        "fields": ["title", "description", "body"],
        "ref": "id",
        "documentStore": {
            "docs": {
                "/posts/rust/": {"id": "/posts/rust/", "title": "Learning Rust", "description": "Notes", "body": "Ownership."},
                "/posts/go/": {"id": "/posts/go/", "title": "Go", "description": "", "body": "Goroutines and rust."}
            },
            "docInfo": {},
            "length": 2,
            "save": true
        },
        "index": {"title": {"root": {"docs": {}, "df": 0}}},
        "pipeline": ["trimmer", "stopWordFilter", "stemmer"],
        "lang": "English"
    }"#
    .to_string()
}

// ============================================================================
// VIRTUAL CLOCK
// ============================================================================

struct Task {
    id: TimerId,
    due: Duration,
    seq: u64,
    run: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Timeline {
    now: Duration,
    next_id: u64,
    tasks: Vec<Task>,
    executed: usize,
}

/// Scheduler whose clock only moves when the test moves it.
///
/// Tasks due at the same instant run in the order they were scheduled.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    timeline: Rc<RefCell<Timeline>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    // Remove the earliest task due at or before `limit` and move the clock to
    // its due time. The borrow is released before the task runs, so tasks may
    // schedule more tasks.
    fn pop_due(&self, limit: Option<Duration>) -> Option<Task> {
        let mut timeline = self.timeline.borrow_mut();
        let position = timeline
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| limit.map_or(true, |limit| task.due <= limit))
            .min_by_key(|(_, task)| (task.due, task.seq))
            .map(|(i, _)| i)?;
        let task = timeline.tasks.remove(position);
        timeline.now = timeline.now.max(task.due);
        timeline.executed += 1;
        Some(task)
    }

    /// Run the next pending task, whenever it is due. Returns false when idle.
    pub fn run_next(&self) -> bool {
        match self.pop_due(None) {
            Some(task) => {
                (task.run)();
                true
            }
            None => false,
        }
    }

    /// Run everything due up to `target`, then set the clock to `target`.
    pub fn advance_to(&self, target: Duration) {
        while let Some(task) = self.pop_due(Some(target)) {
            (task.run)();
        }
        let mut timeline = self.timeline.borrow_mut();
        timeline.now = timeline.now.max(target);
    }

    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        self.advance_to(target);
    }

    pub fn run_until_idle(&self) {
        for _ in 0..100_000 {
            if !self.run_next() {
                return;
            }
        }
        panic!("scheduler never went idle");
    }

    pub fn pending(&self) -> usize {
        self.timeline.borrow().tasks.len()
    }

    pub fn executed(&self) -> usize {
        self.timeline.borrow().executed
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.timeline.borrow().now
    }

    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let mut timeline = self.timeline.borrow_mut();
        timeline.next_id += 1;
        let id = TimerId(timeline.next_id);
        let due = timeline.now + delay;
        timeline.tasks.push(Task {
            id,
            due,
            seq: id.0,
            run: task,
        });
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.timeline.borrow_mut().tasks.retain(|task| task.id != id);
    }
}

struct WakeFlag(AtomicBool);

impl Wake for WakeFlag {
    fn wake(self: Arc<Self>) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Drive `future` to completion, running scheduler tasks while it waits.
///
/// Panics if the future is pending with nothing left to run.
pub fn block_on<F: Future>(scheduler: &ManualScheduler, future: F) -> F::Output {
    let flag = Arc::new(WakeFlag(AtomicBool::new(false)));
    let waker = Waker::from(Arc::clone(&flag));
    let mut cx = Context::from_waker(&waker);
    let mut future = std::pin::pin!(future);

    loop {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return output;
        }
        while !flag.0.swap(false, Ordering::SeqCst) {
            assert!(
                scheduler.run_next(),
                "future is pending but no timers are scheduled"
            );
        }
    }
}

// ============================================================================
// PAGE
// ============================================================================

#[derive(Default)]
struct PageState {
    query: RefCell<String>,
    results: RefCell<String>,
    results_writes: Cell<usize>,
    results_hidden: Cell<bool>,
    close_hidden: Cell<bool>,
    visibility_writes: Cell<usize>,
    missing: RefCell<Vec<String>>,
}

/// Page that keeps everything written to it. Clones share state.
///
/// Both regions start hidden, like the markup the widget is shipped with.
/// The page also acts as its own [`Locate`], so tests can take elements away.
#[derive(Clone)]
pub struct RecordingPage {
    state: Rc<PageState>,
}

impl RecordingPage {
    pub fn new(query: &str) -> Self {
        let state = PageState {
            query: RefCell::new(query.to_string()),
            results_hidden: Cell::new(true),
            close_hidden: Cell::new(true),
            ..PageState::default()
        };
        Self {
            state: Rc::new(state),
        }
    }

    /// Replace the input's text, as if the user typed it.
    pub fn type_text(&self, text: &str) {
        *self.state.query.borrow_mut() = text.to_string();
    }

    pub fn results_html(&self) -> String {
        self.state.results.borrow().clone()
    }

    /// Start with `region` shown, as if the markup lacked the hidden class.
    pub fn with_visible(self, region: Region) -> Self {
        match region {
            Region::Results => self.state.results_hidden.set(false),
            Region::Close => self.state.close_hidden.set(false),
        }
        self
    }

    /// Leave the element with this id off the page.
    pub fn without_element(self, id: &str) -> Self {
        self.state.missing.borrow_mut().push(id.to_string());
        self
    }

    fn has_element(&self, id: &str) -> bool {
        !self.state.missing.borrow().iter().any(|missing| missing == id)
    }

    pub fn results_writes(&self) -> usize {
        self.state.results_writes.get()
    }

    pub fn visibility_writes(&self) -> usize {
        self.state.visibility_writes.get()
    }
}

impl Page for RecordingPage {
    fn query(&self) -> String {
        self.state.query.borrow().clone()
    }

    fn set_results_html(&self, html: &str) {
        *self.state.results.borrow_mut() = html.to_string();
        self.state
            .results_writes
            .set(self.state.results_writes.get() + 1);
    }

    fn set_hidden(&self, region: Region, hidden: bool) {
        match region {
            Region::Results => self.state.results_hidden.set(hidden),
            Region::Close => self.state.close_hidden.set(hidden),
        }
        self.state
            .visibility_writes
            .set(self.state.visibility_writes.get() + 1);
    }

    fn is_hidden(&self, region: Region) -> bool {
        match region {
            Region::Results => self.state.results_hidden.get(),
            Region::Close => self.state.close_hidden.get(),
        }
    }
}

impl Locate for RecordingPage {
    type Page = RecordingPage;

    fn locate(&self, ids: &ElementIds) -> Result<RecordingPage, WidgetError> {
        for id in [&ids.input, &ids.results, &ids.close] {
            if !self.has_element(id) {
                return Err(WidgetError::MissingElement { id: id.clone() });
            }
        }
        Ok(self.clone())
    }

    fn fill_results(&self, ids: &ElementIds, html: &str) -> bool {
        if !self.has_element(&ids.results) {
            return false;
        }
        Page::set_results_html(self, html);
        true
    }
}

// ============================================================================
// INDEX
// ============================================================================

/// Index that answers from a fixed query → hits table.
#[derive(Clone, Default)]
pub struct StaticIndex {
    results: HashMap<String, Vec<ResultItem>>,
    failure: Option<WidgetError>,
    queries: RefCell<Vec<(String, SearchConfig)>>,
}

impl StaticIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, query: &str, items: Vec<ResultItem>) -> Self {
        self.results.insert(query.to_string(), items);
        self
    }

    /// Make every query fail with `err`.
    pub fn failing(mut self, err: WidgetError) -> Self {
        self.failure = Some(err);
        self
    }

    /// Every query seen so far, with the options it was sent with.
    pub fn queries(&self) -> Vec<(String, SearchConfig)> {
        self.queries.borrow().clone()
    }
}

impl SearchIndex for StaticIndex {
    fn search(&self, query: &str, config: &SearchConfig) -> Result<Vec<ResultItem>, WidgetError> {
        self.queries
            .borrow_mut()
            .push((query.to_string(), *config));
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }
}

/// Backend that becomes available after a number of probes and "fetches" a
/// fixed response body.
pub struct StaticBackend {
    ready_after: u32,
    probes: Cell<u32>,
    response: Result<String, WidgetError>,
    index: StaticIndex,
    loads: RefCell<Vec<String>>,
}

impl StaticBackend {
    /// Available on the first probe, serving [`sample_index_json`].
    pub fn new(index: StaticIndex) -> Self {
        Self {
            ready_after: 0,
            probes: Cell::new(0),
            response: Ok(sample_index_json()),
            index,
            loads: RefCell::new(Vec::new()),
        }
    }

    /// Report unavailable for the first `probes` checks.
    pub fn ready_after(mut self, probes: u32) -> Self {
        self.ready_after = probes;
        self
    }

    /// Serve `body` instead of the sample index.
    pub fn with_body(mut self, body: &str) -> Self {
        self.response = Ok(body.to_string());
        self
    }

    /// Fail the fetch itself.
    pub fn failing_fetch(mut self, err: WidgetError) -> Self {
        self.response = Err(err);
        self
    }

    pub fn probes(&self) -> u32 {
        self.probes.get()
    }

    /// URLs requested so far.
    pub fn loads(&self) -> Vec<String> {
        self.loads.borrow().clone()
    }
}

impl IndexBackend for StaticBackend {
    type Index = StaticIndex;

    fn is_available(&self) -> bool {
        let probes = self.probes.get() + 1;
        self.probes.set(probes);
        probes > self.ready_after
    }

    async fn load(&self, url: &str) -> Result<StaticIndex, WidgetError> {
        self.loads.borrow_mut().push(url.to_string());
        let body = self.response.clone()?;
        IndexDocument::parse(url, &body)?;
        Ok(self.index.clone())
    }
}
