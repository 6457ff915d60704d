// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turn a keyword and a ranked hit list into the HTML fragment shown under the
//! search box.
//!
//! Everything here is a pure function of its inputs. The controller writes the
//! returned string straight into the results container, replacing whatever was
//! there.
//!
//! # Three outcomes
//!
//! | items     | keyword   | output                         |
//! |-----------|-----------|--------------------------------|
//! | non-empty | any       | one `<section>` card per item  |
//! | empty     | non-empty | [`NO_RESULTS_HTML`]            |
//! | empty     | empty     | [`PLACEHOLDER_HTML`]           |
//!
//! # Escaping
//!
//! Index content is interpolated as-is under [`EscapePolicy::Trusted`]. That is
//! the right call when the index is generated from the site's own pages at build
//! time, and the wrong one if anything in it can be authored by a visitor. Pick
//! [`EscapePolicy::Escape`] in that case.

use crate::types::ResultItem;
use serde::{Deserialize, Serialize};

/// Body previews are cut after this many characters.
pub const MAX_BODY_PREVIEW: usize = 128;

/// Appended to a body preview that was cut.
pub const ELLIPSIS: &str = "...";

/// Shown before the first query.
pub const PLACEHOLDER_HTML: &str =
    "<p>Start searching by typing in keywords that match post title, description or content.</p>";

/// Shown when a query matched nothing.
pub const NO_RESULTS_HTML: &str = "<p>No results found, please try another keyword.</p>";

/// Shown when the index could not be loaded.
pub const UNAVAILABLE_HTML: &str = "<p>Search is unavailable right now.</p>";

// Class attributes of the result card. Kept as constants so the CSS safelist
// can be derived from the same strings the template uses.
const SECTION_CLASS: &str = "relative z-10 w-full bg-zinc-300 dark:bg-zinc-900 relative mb-4 lg:mb-6 last-of-type:mb-6 rounded-lg p-4 active:scale-95 lg:p-6";
const TITLE_CLASS: &str = "!my-0 pb-1 font-bold !leading-none";
const DESCRIPTION_CLASS: &str = "not-prose my-1 truncate";
const BODY_CLASS: &str = "text-sm antialiased opacity-60";
const LINK_CLASS: &str = "absolute inset-0 text-[0]";

/// Every class attribute the renderer emits, in template order.
pub const CARD_CLASSES: [&str; 5] = [
    SECTION_CLASS,
    TITLE_CLASS,
    DESCRIPTION_CLASS,
    BODY_CLASS,
    LINK_CLASS,
];

/// Whether stored document fields are trusted HTML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapePolicy {
    /// Interpolate title, description, body and link verbatim.
    #[default]
    Trusted,
    /// HTML-escape every interpolated value.
    Escape,
}

impl EscapePolicy {
    fn apply(self, value: &str) -> String {
        match self {
            EscapePolicy::Trusted => value.to_string(),
            EscapePolicy::Escape => escape_html(value),
        }
    }
}

/// Render the results panel for `keyword` and the hits it produced.
pub fn render_results(keyword: &str, items: &[ResultItem], policy: EscapePolicy) -> String {
    if !items.is_empty() {
        items.iter().map(|item| render_item(item, policy)).collect()
    } else if !keyword.is_empty() {
        NO_RESULTS_HTML.to_string()
    } else {
        PLACEHOLDER_HTML.to_string()
    }
}

/// Render a single result card.
pub fn render_item(item: &ResultItem, policy: EscapePolicy) -> String {
    let title = policy.apply(&item.doc.title);
    let description = policy.apply(&item.doc.description);
    let preview = policy.apply(&body_preview(item.doc.body.as_deref()));
    let href = policy.apply(&item.reference);

    let html = format!(
        r#"
    <section class="{SECTION_CLASS}">
      <h3 class="{TITLE_CLASS}">{title}</h3>
      <div class="{DESCRIPTION_CLASS}">
        <p>{description}</p>
      </div>
      <div class="{BODY_CLASS}">
        <span>{preview}</span>
      </div>
      <a class="{LINK_CLASS}" href="{href}">{title}</a>
    </section>
  "#
    );

    collapse_tag_whitespace(html.trim())
}

/// The body excerpt shown on a card.
///
/// Counts characters, not bytes, so a multi-byte body is never split inside a
/// code point.
pub fn body_preview(body: Option<&str>) -> String {
    let body = body.unwrap_or("");
    match body.char_indices().nth(MAX_BODY_PREVIEW) {
        Some((cut, _)) => format!("{}{}", &body[..cut], ELLIPSIS),
        None => body.to_string(),
    }
}

/// Drop every newline that is followed (after optional whitespace) by a tag.
///
/// `"a\n   <b>"` becomes `"a<b>"`; a newline followed by text is kept.
pub fn collapse_tag_whitespace(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find('\n') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos..];
        let stripped = after.trim_start();
        if stripped.starts_with('<') {
            rest = stripped;
        } else {
            out.push('\n');
            rest = &after[1..];
        }
    }

    out.push_str(rest);
    out
}

/// Fragment shown when bootstrap failed to load the index.
pub fn render_unavailable() -> String {
    UNAVAILABLE_HTML.to_string()
}

/// Individual utility classes used by the card template, deduplicated, in
/// first-use order.
pub fn safelist() -> Vec<&'static str> {
    let mut classes: Vec<&'static str> = Vec::new();
    for class in CARD_CLASSES.iter().flat_map(|attr| attr.split_whitespace()) {
        if !classes.contains(&class) {
            classes.push(class);
        }
    }
    classes
}

/// Escape `&`, `<`, `>` and `"`. Single quotes pass through: the card template
/// only uses double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
