// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The page the widget draws into, and the show/hide state of its panels.
//!
//! Visibility is read off the page once, when the controller takes over, and
//! tracked here from then on: [`PanelState`] holds one [`Visibility`] per
//! [`Region`], and [`PanelState::show`] / [`PanelState::hide`] only touch the
//! page for regions whose state actually changes. Calling either twice is the
//! same as calling it once.

use crate::config::ElementIds;
use crate::error::WidgetError;

/// The page elements the widget depends on.
///
/// The browser implementation wraps three DOM elements located by id; tests
/// use [`RecordingPage`](crate::testing::RecordingPage).
pub trait Page {
    /// Current text of the search input.
    fn query(&self) -> String;

    /// Replace the content of the results container.
    fn set_results_html(&self, html: &str);

    /// Add or remove the hidden marker on a region.
    fn set_hidden(&self, region: Region, hidden: bool);

    /// Whether a region currently carries the hidden marker.
    fn is_hidden(&self, region: Region) -> bool;
}

/// Finds the widget's elements by id.
pub trait Locate {
    type Page: Page;

    /// All three elements, or [`WidgetError::MissingElement`] for the first
    /// one that is absent.
    fn locate(&self, ids: &ElementIds) -> Result<Self::Page, WidgetError>;

    /// Write `html` into the results container alone, whatever else is
    /// missing. Returns false when the container itself is not on the page.
    fn fill_results(&self, ids: &ElementIds, html: &str) -> bool;
}

/// A togglable part of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// The container results are rendered into.
    Results,
    /// The control that closes the results.
    Close,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Results, Region::Close];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    #[default]
    Hidden,
}

/// Visibility of every region.
///
/// The default (both hidden) matches the markup the widget ships with; use
/// [`PanelState::observe`] when the page may say otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelState {
    results: Visibility,
    close: Visibility,
}

impl PanelState {
    pub fn new(results: Visibility, close: Visibility) -> Self {
        Self { results, close }
    }

    /// Read the current visibility of every region from the page.
    pub fn observe<P: Page + ?Sized>(page: &P) -> Self {
        let read = |region| {
            if page.is_hidden(region) {
                Visibility::Hidden
            } else {
                Visibility::Visible
            }
        };
        Self::new(read(Region::Results), read(Region::Close))
    }

    pub fn get(&self, region: Region) -> Visibility {
        match region {
            Region::Results => self.results,
            Region::Close => self.close,
        }
    }

    fn slot(&mut self, region: Region) -> &mut Visibility {
        match region {
            Region::Results => &mut self.results,
            Region::Close => &mut self.close,
        }
    }

    /// Move every region to `target`, writing only the ones that change.
    /// Returns how many regions were written.
    pub fn apply<P: Page + ?Sized>(&mut self, target: Visibility, page: &P) -> usize {
        let mut written = 0;
        for region in Region::ALL {
            let slot = self.slot(region);
            if *slot != target {
                *slot = target;
                page.set_hidden(region, target == Visibility::Hidden);
                written += 1;
            }
        }
        written
    }

    pub fn show<P: Page + ?Sized>(&mut self, page: &P) -> usize {
        self.apply(Visibility::Visible, page)
    }

    pub fn hide<P: Page + ?Sized>(&mut self, page: &P) -> usize {
        self.apply(Visibility::Hidden, page)
    }

    pub fn is_visible(&self) -> bool {
        self.results == Visibility::Visible && self.close == Visibility::Visible
    }
}
