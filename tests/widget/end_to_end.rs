//! Full path from keystroke to rendered cards.

use super::common::{make_item, rust_hits, start, start_with};
use sifter::render::UNAVAILABLE_HTML;
use sifter::testing::{StaticBackend, StaticIndex};
use sifter::{EscapePolicy, WidgetConfig, WidgetError};
use std::time::Duration;

#[test]
fn rust_query_renders_two_cards_in_rank_order() {
    let backend = StaticBackend::new(StaticIndex::new().with_results("rust", rust_hits()));
    let widget = start(&backend).unwrap();

    widget.controller.on_focus();
    widget.page.type_text("rust");
    widget.controller.on_keyup();
    widget.scheduler.advance(Duration::from_millis(400));

    let html = widget.page.results_html();
    assert_eq!(html.matches("<section ").count(), 2);
    assert!(html.starts_with("<section "));
    assert!(html.ends_with("</section>"));

    let first = html.find(r#"href="/posts/learning-rust/""#).unwrap();
    let second = html.find(r#"href="/posts/go-vs-rust/""#).unwrap();
    assert!(first < second);
    assert!(html.contains("<span>Ownership, borrowing and lifetimes.</span>"));
}

#[test]
fn cards_carry_no_newlines_before_tags() {
    let backend = StaticBackend::new(StaticIndex::new().with_results("rust", rust_hits()));
    let widget = start(&backend).unwrap();

    widget.page.type_text("rust");
    widget.controller.refresh();

    assert!(!widget.page.results_html().contains('\n'));
}

#[test]
fn long_bodies_are_cut_on_cards() {
    let body = "a".repeat(300);
    let hits = vec![make_item("/long/", "Long", "", Some(&body))];
    let backend = StaticBackend::new(StaticIndex::new().with_results("long", hits));
    let widget = start(&backend).unwrap();

    widget.page.type_text("long");
    widget.controller.refresh();

    let expected = format!("<span>{}...</span>", "a".repeat(128));
    assert!(widget.page.results_html().contains(&expected));
}

#[test]
fn escape_policy_applies_to_rendered_cards() {
    let hits = vec![make_item("/x/", "<b>Bold</b>", "", None)];
    let backend = StaticBackend::new(StaticIndex::new().with_results("bold", hits));
    let config = WidgetConfig {
        escape: EscapePolicy::Escape,
        ..WidgetConfig::default()
    };
    let widget = start_with(&backend, &config).unwrap();

    widget.page.type_text("bold");
    widget.controller.refresh();

    let html = widget.page.results_html();
    assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt;"));
    assert!(!html.contains("<b>"));
}

#[test]
fn broken_index_degrades_to_unavailable() {
    let index = StaticIndex::new().failing(WidgetError::Query {
        reason: "TypeError: undefined is not a function".to_string(),
    });
    let backend = StaticBackend::new(index);
    let widget = start(&backend).unwrap();

    widget.page.type_text("rust");
    widget.controller.refresh();
    assert_eq!(widget.page.results_html(), UNAVAILABLE_HTML);

    // The widget keeps working for the next query.
    widget.page.type_text("");
    widget.controller.refresh();
    assert_ne!(widget.page.results_html(), UNAVAILABLE_HTML);
}
