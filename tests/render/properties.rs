//! Renderer invariants over arbitrary documents.

use proptest::prelude::*;
use sifter::render::{
    body_preview, escape_html, render_results, EscapePolicy, ELLIPSIS, MAX_BODY_PREVIEW,
    NO_RESULTS_HTML, PLACEHOLDER_HTML,
};
use sifter::testing::make_item;
use sifter::ResultItem;

// Plain text without markup characters, so section counting stays honest.
fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?éü日本]{0,200}"
}

fn item() -> impl Strategy<Value = ResultItem> {
    (
        "/[a-z0-9-]{1,20}/",
        text(),
        text(),
        proptest::option::of(text()),
    )
        .prop_map(|(reference, title, description, body)| {
            make_item(&reference, &title, &description, body.as_deref())
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// One card per hit, in the order the index returned them.
    #[test]
    fn one_card_per_item_in_order(
        items in proptest::collection::vec(item(), 1..8),
        keyword in "[a-z]{1,10}",
    ) {
        let html = render_results(&keyword, &items, EscapePolicy::Trusted);

        prop_assert_eq!(html.matches("<section ").count(), items.len());

        let mut from = 0;
        for item in &items {
            let link = format!(r#"href="{}""#, item.reference);
            let at = html[from..].find(&link);
            prop_assert!(at.is_some(), "missing link {}", link);
            from += at.unwrap_or(0) + link.len();
        }
    }

    /// Previews never exceed the limit plus the ellipsis.
    #[test]
    fn preview_is_bounded(body in text()) {
        let preview = body_preview(Some(&body));
        let chars = body.chars().count();

        if chars > MAX_BODY_PREVIEW {
            prop_assert!(preview.ends_with(ELLIPSIS));
            prop_assert_eq!(preview.chars().count(), MAX_BODY_PREVIEW + ELLIPSIS.len());
            prop_assert!(body.starts_with(&preview[..preview.len() - ELLIPSIS.len()]));
        } else {
            prop_assert_eq!(preview, body);
        }
    }

    /// With no hits, the keyword alone decides between the two messages.
    #[test]
    fn empty_results_message(keyword in ".{0,20}") {
        let html = render_results(&keyword, &[], EscapePolicy::Escape);
        let expected = if keyword.is_empty() { PLACEHOLDER_HTML } else { NO_RESULTS_HTML };
        prop_assert_eq!(html, expected);
    }

    /// Escaped output contains no markup from the input.
    #[test]
    fn escaping_removes_markup(s in ".{0,100}") {
        let escaped = escape_html(&s);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
    }

    /// Escaped cards keep exactly the template's tags.
    #[test]
    fn escaped_cards_have_fixed_tag_count(
        title in ".{0,40}",
        description in ".{0,40}",
        body in ".{0,200}",
    ) {
        let items = vec![make_item("/p/", &title, &description, Some(&body))];
        let html = render_results("q", &items, EscapePolicy::Escape);
        // section, h3, div, p, div, span, a: seven opening and seven closing.
        prop_assert_eq!(html.matches('<').count(), 14);
    }
}
