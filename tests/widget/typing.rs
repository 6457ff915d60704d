//! Keystrokes, debouncing and the panel toggles.

use super::common::{rust_hits, start, start_with};
use sifter::render::PLACEHOLDER_HTML;
use sifter::testing::{StaticBackend, StaticIndex};
use sifter::{Page, Region, Scheduler, WidgetConfig};
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn burst_of_keystrokes_queries_once() {
    let backend = StaticBackend::new(StaticIndex::new().with_results("rust", rust_hits()));
    let widget = start(&backend).unwrap();
    let writes_before = widget.page.results_writes();

    widget.page.type_text("r");
    widget.controller.on_keyup();
    widget.scheduler.advance_to(ms(100));
    widget.page.type_text("ru");
    widget.controller.on_keyup();
    widget.scheduler.advance_to(ms(200));
    widget.page.type_text("rust");
    widget.controller.on_keyup();

    widget.scheduler.advance_to(ms(599));
    assert!(widget.controller.index().queries().is_empty());

    widget.scheduler.advance_to(ms(600));
    let queries = widget.controller.index().queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].0, "rust");
    assert_eq!(widget.page.results_writes(), writes_before + 1);
    assert!(!widget.controller.is_query_pending());
}

#[test]
fn pauses_longer_than_delay_query_each_time() {
    let backend = StaticBackend::new(StaticIndex::new());
    let widget = start(&backend).unwrap();

    widget.page.type_text("ru");
    widget.controller.on_keyup();
    widget.scheduler.advance(ms(400));
    widget.page.type_text("rust");
    widget.controller.on_keyup();
    widget.scheduler.advance(ms(400));

    let queries: Vec<String> = widget
        .controller
        .index()
        .queries()
        .into_iter()
        .map(|(query, _)| query)
        .collect();
    assert_eq!(queries, vec!["ru".to_string(), "rust".to_string()]);
}

#[test]
fn custom_debounce_delay() {
    let backend = StaticBackend::new(StaticIndex::new());
    let config = WidgetConfig {
        debounce_ms: 50,
        ..WidgetConfig::default()
    };
    let widget = start_with(&backend, &config).unwrap();

    widget.page.type_text("go");
    widget.controller.on_keyup();
    widget.scheduler.advance(ms(49));
    assert!(widget.controller.is_query_pending());
    widget.scheduler.advance(ms(1));
    assert_eq!(widget.controller.index().queries().len(), 1);
}

#[test]
fn clearing_the_input_restores_placeholder() {
    let backend = StaticBackend::new(StaticIndex::new().with_results("rust", rust_hits()));
    let widget = start(&backend).unwrap();

    widget.page.type_text("rust");
    widget.controller.on_keyup();
    widget.scheduler.advance(ms(400));
    assert_ne!(widget.page.results_html(), PLACEHOLDER_HTML);

    widget.page.type_text("");
    widget.controller.on_keyup();
    widget.scheduler.advance(ms(400));
    assert_eq!(widget.page.results_html(), PLACEHOLDER_HTML);
    assert_eq!(widget.controller.index().queries().len(), 1);
}

#[test]
fn whitespace_only_input_still_queries() {
    let backend = StaticBackend::new(StaticIndex::new());
    let widget = start(&backend).unwrap();

    widget.page.type_text("   ");
    widget.controller.on_keyup();
    widget.scheduler.run_until_idle();

    assert_eq!(widget.controller.index().queries().len(), 1);
    assert_eq!(
        widget.page.results_html(),
        sifter::render::NO_RESULTS_HTML
    );
}

#[test]
fn focus_shows_and_close_hides() {
    let backend = StaticBackend::new(StaticIndex::new());
    let widget = start(&backend).unwrap();

    widget.controller.on_focus();
    assert!(!widget.page.is_hidden(Region::Results));
    assert!(!widget.page.is_hidden(Region::Close));

    widget.controller.on_close();
    assert!(widget.page.is_hidden(Region::Results));
    assert!(widget.page.is_hidden(Region::Close));
}

#[test]
fn repeated_toggles_write_only_on_change() {
    let backend = StaticBackend::new(StaticIndex::new());
    let widget = start(&backend).unwrap();

    for _ in 0..3 {
        widget.controller.on_focus();
    }
    assert_eq!(widget.page.visibility_writes(), 2);

    for _ in 0..3 {
        widget.controller.on_close();
    }
    assert_eq!(widget.page.visibility_writes(), 4);

    // Closing leaves the last results in place.
    assert_eq!(widget.page.results_html(), PLACEHOLDER_HTML);
    assert_eq!(widget.scheduler.now(), Duration::ZERO);
}
