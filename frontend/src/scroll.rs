//! Scroll spy for the navigation bar.

use std::collections::HashMap;

use log::{debug, trace};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::config::{
    MOBILE_LOGO_HIDE_THRESHOLD_PX, NAV_CONDENSE_THRESHOLD_PX, PAGE_SECTIONS, PROBE_VIEWPORT_RATIO,
};
use crate::error::UiError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionBounds {
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Half-open: the top edge belongs to the section, the bottom edge to the next.
    pub fn contains(&self, probe: f64) -> bool {
        self.top <= probe && probe < self.top + self.height
    }
}

/// Resolves a section's layout box. `None` means not mounted yet.
pub trait SectionGeometry {
    fn bounds(&self, id: &str) -> Option<SectionBounds>;
}

impl<F> SectionGeometry for F
where
    F: Fn(&str) -> Option<SectionBounds>,
{
    fn bounds(&self, id: &str) -> Option<SectionBounds> {
        self(id)
    }
}

impl SectionGeometry for HashMap<&'static str, SectionBounds> {
    fn bounds(&self, id: &str) -> Option<SectionBounds> {
        self.get(id).copied()
    }
}

/// Reads `offsetTop` / `offsetHeight` of elements with a matching id.
pub struct DomGeometry {
    document: Document,
}

impl DomGeometry {
    pub fn from_window() -> Result<Self, UiError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(UiError::HostUnavailable("document"))?;
        Ok(Self { document })
    }

    fn element(&self, id: &str) -> Result<HtmlElement, UiError> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| UiError::GeometryUnavailable(id.to_string()))
    }

    /// Smooth-scrolls the section's top edge into view.
    pub fn scroll_into_view(&self, id: &str) -> Result<(), UiError> {
        let element = self.element(id)?;
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
        Ok(())
    }
}

impl SectionGeometry for DomGeometry {
    fn bounds(&self, id: &str) -> Option<SectionBounds> {
        match self.element(id) {
            Ok(el) => Some(SectionBounds::new(
                f64::from(el.offset_top()),
                f64::from(el.offset_height()),
            )),
            Err(err) => {
                trace!("{}", err);
                None
            }
        }
    }
}

pub fn probe_point(scroll_y: f64, viewport_height: f64) -> f64 {
    scroll_y + PROBE_VIEWPORT_RATIO * viewport_height
}

/// First section, in list order, whose range contains `probe`. Sections the
/// geometry cannot resolve are skipped.
pub fn locate_section<'a, G>(sections: &[&'a str], probe: f64, geometry: &G) -> Option<&'a str>
where
    G: SectionGeometry + ?Sized,
{
    sections
        .iter()
        .copied()
        .find(|id| geometry.bounds(id).map_or(false, |b| b.contains(probe)))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollThresholds {
    pub primary: f64,
    pub secondary: f64,
}

impl Default for ScrollThresholds {
    fn default() -> Self {
        Self {
            primary: NAV_CONDENSE_THRESHOLD_PX,
            secondary: MOBILE_LOGO_HIDE_THRESHOLD_PX,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollSnapshot {
    pub past_primary: bool,
    pub past_secondary: bool,
    pub active_section: &'static str,
}

#[derive(Clone, Debug)]
pub struct ScrollTracker {
    sections: Vec<&'static str>,
    thresholds: ScrollThresholds,
    snapshot: ScrollSnapshot,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(PAGE_SECTIONS.to_vec(), ScrollThresholds::default())
    }
}

impl ScrollTracker {
    /// The first listed section starts out active.
    pub fn new(sections: Vec<&'static str>, thresholds: ScrollThresholds) -> Self {
        let active_section = sections.first().copied().unwrap_or_default();
        Self {
            sections,
            thresholds,
            snapshot: ScrollSnapshot {
                past_primary: false,
                past_secondary: false,
                active_section,
            },
        }
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        self.snapshot
    }

    /// Re-derives the snapshot for a scroll position. When no section
    /// contains the probe the previous active section is kept.
    pub fn observe<G>(&mut self, scroll_y: f64, viewport_height: f64, geometry: &G) -> ScrollSnapshot
    where
        G: SectionGeometry + ?Sized,
    {
        self.snapshot.past_primary = scroll_y > self.thresholds.primary;
        self.snapshot.past_secondary = scroll_y > self.thresholds.secondary;

        let probe = probe_point(scroll_y, viewport_height);
        if let Some(found) = locate_section(&self.sections, probe, geometry) {
            if found != self.snapshot.active_section {
                debug!("active section {} -> {}", self.snapshot.active_section, found);
                self.snapshot.active_section = found;
            }
        }
        self.snapshot
    }

    /// Marks a section active right away, as a nav click does. `top` is an
    /// alias for the first section. Unknown ids are ignored.
    pub fn select(&mut self, id: &str) -> Option<&'static str> {
        let id = if id == "top" {
            self.sections.first().copied()?
        } else {
            id
        };
        let found = self.sections.iter().copied().find(|s| *s == id)?;
        self.snapshot.active_section = found;
        Some(found)
    }
}
