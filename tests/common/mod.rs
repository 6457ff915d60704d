//! Shared test utilities and fixtures.

#![allow(dead_code)]

use sifter::testing::{block_on, ManualScheduler, RecordingPage, StaticBackend, StaticIndex};
use sifter::{bootstrap, ResultItem, SearchController, WidgetConfig, WidgetError};
use std::rc::Rc;

// Re-export canonical test utilities from sifter::testing
pub use sifter::testing::make_item;

pub type TestController = SearchController<StaticIndex, RecordingPage, ManualScheduler>;

/// Two hits for "rust", best first.
pub fn rust_hits() -> Vec<ResultItem> {
    vec![
        make_item(
            "/posts/learning-rust/",
            "Learning Rust",
            "Notes from the first month",
            Some("Ownership, borrowing and lifetimes."),
        ),
        make_item(
            "/posts/go-vs-rust/",
            "Go vs Rust",
            "A comparison",
            Some("Both compile to native code."),
        ),
    ]
}

pub struct Widget {
    pub controller: Rc<TestController>,
    pub page: RecordingPage,
    pub scheduler: ManualScheduler,
}

/// Bootstrap a widget over `backend` with the default configuration.
pub fn start(backend: &StaticBackend) -> Result<Widget, WidgetError> {
    start_with(backend, &WidgetConfig::default())
}

pub fn start_with(backend: &StaticBackend, config: &WidgetConfig) -> Result<Widget, WidgetError> {
    start_on(backend, RecordingPage::new(""), config)
}

/// Bootstrap onto a prepared page, e.g. one with elements missing.
pub fn start_on(
    backend: &StaticBackend,
    page: RecordingPage,
    config: &WidgetConfig,
) -> Result<Widget, WidgetError> {
    let scheduler = ManualScheduler::new();
    let controller = block_on(
        &scheduler,
        bootstrap(backend, &page, |_| Ok(()), scheduler.clone(), config),
    )?;

    Ok(Widget {
        controller,
        page,
        scheduler,
    })
}
