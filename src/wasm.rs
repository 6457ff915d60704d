// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly bindings for the search widget.
//!
//! This is the browser-facing side: the DOM page, the `setTimeout` scheduler
//! and the elasticlunr backend, plus the two exported entry points.
//!
//! ```js
//! import init, { start } from "./sifter.js";
//!
//! window.addEventListener("load", async () => {
//!     await init();
//!     await start({ escape: "escape" });   // all fields optional
//! });
//! ```
//!
//! `start` rejects with the error message if the widget could not come up;
//! the page has already been switched to the "unavailable" fragment by then.

use crate::bootstrap::bootstrap;
use crate::config::{ElementIds, WidgetConfig};
use crate::controller::SearchController;
use crate::error::WidgetError;
use crate::index::{require_keys, IndexBackend, SearchIndex};
use crate::render::{render_results, EscapePolicy};
use crate::scheduler::{Scheduler, TimerId};
use crate::types::{ResultItem, SearchConfig};
use crate::ui::{Locate, Page, Region};
use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{console, Document, HtmlElement, HtmlInputElement, Response, Window};

/// Best-effort message out of a thrown JS value.
fn js_error(value: JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{:?}", value),
    }
}

impl From<WidgetError> for JsValue {
    fn from(err: WidgetError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

// ============================================================================
// SCHEDULER
// ============================================================================

#[derive(Default)]
struct Timers {
    live: HashMap<i32, Closure<dyn FnMut()>>,
    // Fired timers whose closures can be dropped once they are not running.
    finished: Vec<i32>,
    running: Option<i32>,
}

impl Timers {
    fn sweep(&mut self) {
        let running = self.running;
        for id in std::mem::take(&mut self.finished) {
            if Some(id) == running {
                self.finished.push(id);
            } else {
                self.live.remove(&id);
            }
        }
    }
}

/// `setTimeout`/`clearTimeout` on the window.
///
/// Keeps each callback alive until it fires or is cleared, then drops it; a
/// closure is never dropped while it is executing.
#[derive(Clone)]
pub struct BrowserScheduler {
    window: Window,
    timers: Rc<RefCell<Timers>>,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            timers: Rc::new(RefCell::new(Timers::default())),
        }
    }
}

impl Scheduler for BrowserScheduler {
    fn now(&self) -> Duration {
        Duration::from_secs_f64(js_sys::Date::now() / 1000.0)
    }

    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let timers: Weak<RefCell<Timers>> = Rc::downgrade(&self.timers);
        let handle = Rc::new(Cell::new(0i32));
        let own_handle = Rc::clone(&handle);
        let mut task = Some(task);

        let callback = Closure::wrap(Box::new(move || {
            let id = own_handle.get();
            if let Some(timers) = timers.upgrade() {
                timers.borrow_mut().running = Some(id);
            }
            if let Some(task) = task.take() {
                task();
            }
            if let Some(timers) = timers.upgrade() {
                let mut timers = timers.borrow_mut();
                timers.running = None;
                timers.finished.push(id);
            }
        }) as Box<dyn FnMut()>);

        let delay_ms = delay.as_millis().min(i32::MAX as u128) as i32;
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay_ms,
            ) {
            Ok(id) => {
                handle.set(id);
                let mut timers = self.timers.borrow_mut();
                timers.sweep();
                timers.live.insert(id, callback);
                TimerId(id as u64)
            }
            Err(err) => {
                warn!(error = %js_error(err), "setTimeout failed");
                TimerId(u64::MAX)
            }
        }
    }

    fn clear_timeout(&self, id: TimerId) {
        let Ok(handle) = i32::try_from(id.0) else {
            return;
        };
        self.window.clear_timeout_with_handle(handle);

        let mut timers = self.timers.borrow_mut();
        if timers.running == Some(handle) {
            timers.finished.push(handle);
        } else {
            timers.live.remove(&handle);
        }
    }
}

// ============================================================================
// PAGE
// ============================================================================

/// The three widget elements, located by id.
pub struct DomPage {
    input: HtmlInputElement,
    results: HtmlElement,
    close: HtmlElement,
    hidden_class: String,
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, WidgetError> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or_else(|| WidgetError::MissingElement { id: id.to_string() })
}

impl DomPage {
    pub fn locate(document: &Document, ids: &ElementIds, hidden_class: &str) -> Result<Self, WidgetError> {
        Ok(Self {
            input: element_by_id(document, &ids.input)?,
            results: element_by_id(document, &ids.results)?,
            close: element_by_id(document, &ids.close)?,
            hidden_class: hidden_class.to_string(),
        })
    }

    fn region(&self, region: Region) -> &HtmlElement {
        match region {
            Region::Results => &self.results,
            Region::Close => &self.close,
        }
    }
}

impl Page for DomPage {
    fn query(&self) -> String {
        self.input.value()
    }

    fn set_results_html(&self, html: &str) {
        self.results.set_inner_html(html);
    }

    fn set_hidden(&self, region: Region, hidden: bool) {
        let classes = self.region(region).class_list();
        let result = if hidden {
            classes.add_1(&self.hidden_class)
        } else {
            classes.remove_1(&self.hidden_class)
        };
        if let Err(err) = result {
            warn!(?region, error = %js_error(err), "failed to toggle visibility");
        }
    }

    fn is_hidden(&self, region: Region) -> bool {
        self.region(region).class_list().contains(&self.hidden_class)
    }
}

/// Looks the widget's elements up in a document.
pub struct DomLocator {
    document: Document,
    hidden_class: String,
}

impl DomLocator {
    pub fn new(document: Document, hidden_class: &str) -> Self {
        Self {
            document,
            hidden_class: hidden_class.to_string(),
        }
    }
}

impl Locate for DomLocator {
    type Page = DomPage;

    fn locate(&self, ids: &ElementIds) -> Result<DomPage, WidgetError> {
        DomPage::locate(&self.document, ids, &self.hidden_class)
    }

    fn fill_results(&self, ids: &ElementIds, html: &str) -> bool {
        match self.document.get_element_by_id(&ids.results) {
            Some(results) => {
                results.set_inner_html(html);
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// ELASTICLUNR
// ============================================================================

/// The elasticlunr runtime, looked up on the window by name.
pub struct Elasticlunr {
    window: Window,
    global: String,
}

impl Elasticlunr {
    pub fn new(window: Window, global: &str) -> Self {
        Self {
            window,
            global: global.to_string(),
        }
    }

    fn library(&self) -> Option<JsValue> {
        Reflect::get(&self.window, &JsValue::from_str(&self.global))
            .ok()
            .filter(JsValue::is_truthy)
    }
}

// The body is parsed by the browser and stays a JS object; only its top-level
// keys are inspected from Rust.
async fn fetch_json(window: &Window, url: &str) -> Result<JsValue, WidgetError> {
    let fetch_failed = |err: JsValue| WidgetError::Fetch {
        url: url.to_string(),
        reason: js_error(err),
    };

    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(fetch_failed)?
        .dyn_into()
        .map_err(fetch_failed)?;

    if !response.ok() {
        return Err(WidgetError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let parse_failed = |err: JsValue| WidgetError::Parse {
        url: url.to_string(),
        reason: js_error(err),
    };
    JsFuture::from(response.json().map_err(parse_failed)?)
        .await
        .map_err(parse_failed)
}

fn check_shape(document: &JsValue) -> Result<(), WidgetError> {
    if !document.is_object() || Array::is_array(document) {
        return Err(WidgetError::InvalidIndex {
            reason: "top level is not an object".to_string(),
        });
    }
    require_keys(|key| Reflect::has(document, &JsValue::from_str(key)).unwrap_or(false))?;

    let fields = Reflect::get(document, &JsValue::from_str("fields")).unwrap_or(JsValue::UNDEFINED);
    if !Array::is_array(&fields) {
        return Err(WidgetError::InvalidIndex {
            reason: "`fields` is not an array".to_string(),
        });
    }
    Ok(())
}

fn load_failed(err: JsValue) -> WidgetError {
    WidgetError::LoadFailed {
        reason: js_error(err),
    }
}

impl IndexBackend for Elasticlunr {
    type Index = ElasticlunrIndex;

    fn is_available(&self) -> bool {
        self.library().is_some()
    }

    async fn load(&self, url: &str) -> Result<ElasticlunrIndex, WidgetError> {
        let document = fetch_json(&self.window, url).await?;
        check_shape(&document)?;

        let library = self.library().ok_or_else(|| WidgetError::LoadFailed {
            reason: format!("`{}` is no longer defined", self.global),
        })?;
        let index_class = Reflect::get(&library, &JsValue::from_str("Index")).map_err(load_failed)?;
        let load: Function = Reflect::get(&index_class, &JsValue::from_str("load"))
            .map_err(load_failed)?
            .dyn_into()
            .map_err(|_| WidgetError::LoadFailed {
                reason: "Index.load is not a function".to_string(),
            })?;

        let handle = load.call1(&index_class, &document).map_err(load_failed)?;
        ElasticlunrIndex::new(handle)
    }
}

/// A loaded elasticlunr index.
pub struct ElasticlunrIndex {
    handle: JsValue,
    search: Function,
}

impl ElasticlunrIndex {
    fn new(handle: JsValue) -> Result<Self, WidgetError> {
        let search = Reflect::get(&handle, &JsValue::from_str("search"))
            .map_err(load_failed)?
            .dyn_into::<Function>()
            .map_err(|_| WidgetError::LoadFailed {
                reason: "loaded index has no search method".to_string(),
            })?;
        Ok(Self { handle, search })
    }
}

impl SearchIndex for ElasticlunrIndex {
    fn search(&self, query: &str, config: &SearchConfig) -> Result<Vec<ResultItem>, WidgetError> {
        let query_failed = |reason: String| WidgetError::Query { reason };

        let options = config
            .serialize(&Serializer::json_compatible())
            .map_err(|e| query_failed(e.to_string()))?;
        let hits = self
            .search
            .call2(&self.handle, &JsValue::from_str(query), &options)
            .map_err(|e| query_failed(js_error(e)))?;
        from_value(hits).map_err(|e| query_failed(e.to_string()))
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

type BrowserController = SearchController<ElasticlunrIndex, DomPage, BrowserScheduler>;

fn listener(controller: &Rc<BrowserController>, handler: fn(&BrowserController)) -> Closure<dyn FnMut()> {
    let controller = Rc::clone(controller);
    Closure::wrap(Box::new(move || handler(&controller)) as Box<dyn FnMut()>)
}

// Handlers stay attached for the life of the page, so their closures are
// handed over to JS for good.
fn wire(controller: &Rc<BrowserController>) -> Result<(), WidgetError> {
    let page = controller.page();

    let on_focus = listener(controller, BrowserController::on_focus);
    page.input.set_onfocus(Some(on_focus.as_ref().unchecked_ref()));
    on_focus.forget();

    let on_close = listener(controller, BrowserController::on_close);
    page.close.set_onclick(Some(on_close.as_ref().unchecked_ref()));
    on_close.forget();

    let on_keyup = listener(controller, BrowserController::on_keyup);
    page.input.set_onkeyup(Some(on_keyup.as_ref().unchecked_ref()));
    on_keyup.forget();

    Ok(())
}

/// Bring the widget up on the current page.
///
/// `config` is an optional, partial `WidgetConfig` object.
#[wasm_bindgen]
pub async fn start(config: JsValue) -> Result<(), JsValue> {
    let config: WidgetConfig = if config.is_undefined() || config.is_null() {
        WidgetConfig::default()
    } else {
        from_value(config).map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let backend = Elasticlunr::new(window.clone(), &config.library_global);
    let scheduler = BrowserScheduler::new(window);
    let locator = DomLocator::new(document, &config.hidden_class);

    match bootstrap(&backend, &locator, wire, scheduler, &config).await {
        Ok(_controller) => Ok(()),
        Err(err) => {
            console::error_1(&JsValue::from_str(&format!("sifter: {}", err)));
            Err(err.into())
        }
    }
}

/// Render a results fragment from an elasticlunr hit list.
///
/// For pages that run their own queries but want the widget's markup.
#[wasm_bindgen(js_name = renderResults)]
pub fn render_results_js(keyword: &str, items: JsValue, escape: Option<bool>) -> Result<String, JsValue> {
    let items: Vec<ResultItem> =
        from_value(items).map_err(|e| JsValue::from_str(&format!("Invalid results: {}", e)))?;
    let policy = if escape.unwrap_or(false) {
        EscapePolicy::Escape
    } else {
        EscapePolicy::Trusted
    };
    Ok(render_results(keyword, &items, policy))
}
