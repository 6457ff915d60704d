//! Startup sequence: readiness, index load, element lookup, initial render.

use super::common::{start, start_on, start_with};
use sifter::render::{PLACEHOLDER_HTML, UNAVAILABLE_HTML};
use sifter::testing::{block_on, ManualScheduler, RecordingPage, StaticBackend, StaticIndex};
use sifter::{bootstrap, IndexBackend, Page, Region, Scheduler, WidgetConfig, WidgetError};
use std::cell::Cell;
use std::time::Duration;

// ============================================================================
// HAPPY PATH
// ============================================================================

#[test]
fn waits_for_library_then_renders_placeholder() {
    let backend = StaticBackend::new(StaticIndex::new()).ready_after(3);
    let widget = start(&backend).expect("bootstrap should succeed");

    assert_eq!(backend.probes(), 4);
    assert_eq!(backend.loads(), vec!["/search_index.en.json".to_string()]);
    assert_eq!(widget.page.results_html(), PLACEHOLDER_HTML);
    assert_eq!(widget.page.results_writes(), 1);
}

#[test]
fn loads_configured_url() {
    let backend = StaticBackend::new(StaticIndex::new());
    let config = WidgetConfig {
        index_url: "/fr/search_index.fr.json".to_string(),
        ..WidgetConfig::default()
    };
    start_with(&backend, &config).unwrap();

    assert_eq!(backend.loads(), vec!["/fr/search_index.fr.json".to_string()]);
}

#[test]
fn handlers_are_wired_before_placeholder() {
    let backend = StaticBackend::new(StaticIndex::new());
    let scheduler = ManualScheduler::new();
    let page = RecordingPage::new("");
    let observed = page.clone();
    let wired = Cell::new(false);

    let result = block_on(
        &scheduler,
        bootstrap(
            &backend,
            &page,
            |_| {
                assert_eq!(observed.results_writes(), 0);
                wired.set(true);
                Ok(())
            },
            scheduler.clone(),
            &WidgetConfig::default(),
        ),
    );

    assert!(result.is_ok());
    assert!(wired.get());
    assert_eq!(page.results_html(), PLACEHOLDER_HTML);
}

#[test]
fn panel_starts_hidden() {
    let backend = StaticBackend::new(StaticIndex::new());
    let widget = start(&backend).unwrap();

    assert!(!widget.controller.panel().is_visible());
    assert_eq!(widget.page.visibility_writes(), 0);
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn fetch_failure_shows_unavailable() {
    let backend = StaticBackend::new(StaticIndex::new()).failing_fetch(WidgetError::Fetch {
        url: "/search_index.en.json".to_string(),
        reason: "NetworkError".to_string(),
    });
    let scheduler = ManualScheduler::new();
    let page = RecordingPage::new("");

    let result = block_on(
        &scheduler,
        bootstrap(
            &backend,
            &page,
            |_| panic!("handlers must not be wired when loading fails"),
            scheduler.clone(),
            &WidgetConfig::default(),
        ),
    );

    assert!(matches!(result, Err(WidgetError::Fetch { .. })));
    assert_eq!(page.results_html(), UNAVAILABLE_HTML);
}

#[test]
fn non_json_body_is_a_parse_error() {
    let backend = StaticBackend::new(StaticIndex::new()).with_body("<html>Not Found</html>");
    let err = start(&backend).err().expect("bootstrap should fail");

    assert!(matches!(err, WidgetError::Parse { ref url, .. } if url == "/search_index.en.json"));
}

#[test]
fn json_that_is_not_an_index_is_rejected() {
    let backend = StaticBackend::new(StaticIndex::new()).with_body(r#"{"docs": []}"#);
    let err = start(&backend).err().expect("bootstrap should fail");

    assert!(matches!(err, WidgetError::InvalidIndex { .. }));
}

#[test]
fn missing_element_is_reported_by_id() {
    let backend = StaticBackend::new(StaticIndex::new());
    let page = RecordingPage::new("").without_element("div_search_close");

    assert_eq!(
        start_on(&backend, page.clone(), &WidgetConfig::default()).err(),
        Some(WidgetError::MissingElement {
            id: "div_search_close".to_string()
        })
    );
    assert_eq!(page.results_writes(), 0);
}

#[test]
fn load_failure_reported_even_without_close_control() {
    let backend = StaticBackend::new(StaticIndex::new()).with_body("not json");
    let page = RecordingPage::new("").without_element("div_search_close");

    let err = start_on(&backend, page.clone(), &WidgetConfig::default()).err();

    assert!(matches!(err, Some(WidgetError::Parse { .. })));
    assert_eq!(page.results_html(), UNAVAILABLE_HTML);
}

#[test]
fn load_failure_without_results_container_writes_nothing() {
    let backend = StaticBackend::new(StaticIndex::new()).with_body("not json");
    let page = RecordingPage::new("").without_element("div_search_result");

    let err = start_on(&backend, page.clone(), &WidgetConfig::default()).err();

    assert!(matches!(err, Some(WidgetError::Parse { .. })));
    assert_eq!(page.results_writes(), 0);
}

#[test]
fn panel_shipped_visible_can_be_closed() {
    let backend = StaticBackend::new(StaticIndex::new());
    let page = RecordingPage::new("")
        .with_visible(Region::Results)
        .with_visible(Region::Close);
    let widget = start_on(&backend, page, &WidgetConfig::default()).unwrap();

    widget.controller.on_close();

    assert!(widget.page.is_hidden(Region::Results));
    assert!(widget.page.is_hidden(Region::Close));
    assert!(!widget.controller.panel().is_visible());
}

/// A library that never arrives; every check costs one animation frame.
struct AbsentLibrary {
    clock: ManualScheduler,
}

impl IndexBackend for AbsentLibrary {
    type Index = StaticIndex;

    fn is_available(&self) -> bool {
        self.clock.advance(Duration::from_millis(16));
        false
    }

    async fn load(&self, _url: &str) -> Result<StaticIndex, WidgetError> {
        unreachable!("load must not run before the library is available")
    }
}

#[test]
fn ready_timeout_shows_unavailable() {
    let scheduler = ManualScheduler::new();
    let backend = AbsentLibrary {
        clock: scheduler.clone(),
    };
    let page = RecordingPage::new("");
    let config = WidgetConfig {
        ready_timeout_ms: Some(100),
        ..WidgetConfig::default()
    };

    let result = block_on(
        &scheduler,
        bootstrap(
            &backend,
            &page,
            |_| Ok(()),
            scheduler.clone(),
            &config,
        ),
    );

    assert!(matches!(
        result.err(),
        Some(WidgetError::LibraryUnavailable { waited_ms }) if waited_ms >= 100
    ));
    assert_eq!(page.results_html(), UNAVAILABLE_HTML);
    assert!(scheduler.now() >= Duration::from_millis(100));
}
