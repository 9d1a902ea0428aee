//! Browser implementations of the core capabilities.

use std::collections::HashMap;

use leptos::prelude::*;
use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::{
    sections::SectionId,
    theme::{Theme, ThemeAttribute, ThemeStorage, THEME_ATTRIBUTE},
    visibility::{ObserveError, VisibilityEntry, VisibilityHandler, VisibilityHost},
};

/// Theme slot backed by a `use_local_storage` signal pair.
pub struct LocalStorageTheme {
    stored: Signal<String>,
    set_stored: WriteSignal<String>,
}

impl LocalStorageTheme {
    pub fn new(stored: Signal<String>, set_stored: WriteSignal<String>) -> Self {
        Self { stored, set_stored }
    }
}

impl ThemeStorage for LocalStorageTheme {
    fn load(&self) -> Option<String> {
        // the string codec reads a missing key as the empty default
        let value = self.stored.get_untracked();
        (!value.is_empty()).then_some(value)
    }

    fn store(&mut self, name: &str) {
        // leptos-use flushes the signal to localStorage on its next effect run
        self.set_stored.set(name.to_string());
    }
}

/// `data-theme` on `<html>`.
pub struct DocumentTheme;

impl ThemeAttribute for DocumentTheme {
    fn apply(&mut self, name: &str) {
        let Some(root) = document().document_element() else {
            log::warn!("no document element to carry {THEME_ATTRIBUTE}");
            return;
        };
        if let Err(err) = root.set_attribute(THEME_ATTRIBUTE, name) {
            log::warn!("couldn't set {THEME_ATTRIBUTE}: {err:?}");
        }
    }
}

struct ObservedRegion {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

/// One `IntersectionObserver` per observed region, looked up by element id.
#[derive(Default)]
pub struct DomVisibilityHost {
    regions: HashMap<String, ObservedRegion>,
}

impl VisibilityHost for DomVisibilityHost {
    fn observe(
        &mut self,
        region: &str,
        threshold: f64,
        on_change: VisibilityHandler,
    ) -> Result<(), ObserveError> {
        let target = document()
            .get_element_by_id(region)
            .ok_or_else(|| ObserveError::MissingRegion(region.to_string()))?;

        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            let batch = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| VisibilityEntry {
                    region: entry.target().id(),
                    ratio: entry.intersection_ratio(),
                    is_intersecting: entry.is_intersecting(),
                })
                .collect::<Vec<_>>();
            on_change(batch.as_slice());
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|err| ObserveError::Rejected {
                    region: region.to_string(),
                    reason: format!("{err:?}"),
                })?;
        observer.observe(&target);

        let observed = ObservedRegion {
            observer,
            _callback: callback,
        };
        if let Some(previous) = self.regions.insert(region.to_string(), observed) {
            previous.observer.disconnect();
        }
        Ok(())
    }

    fn unobserve(&mut self, region: &str) {
        if let Some(observed) = self.regions.remove(region) {
            observed.observer.disconnect();
        }
    }
}

impl Drop for DomVisibilityHost {
    fn drop(&mut self) {
        for (_, observed) in self.regions.drain() {
            observed.observer.disconnect();
        }
    }
}

pub fn scroll_to(section: SectionId) {
    let Some(el) = document().get_element_by_id(section.region_id()) else {
        log::debug!("can't scroll to {section}, region missing");
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    el.scroll_into_view_with_scroll_into_view_options(&options);
}

pub fn paint_backdrop(canvas: &HtmlCanvasElement, theme: Theme, width: f64, height: f64) {
    canvas.set_width(width.max(0.0).round() as u32);
    canvas.set_height(height.max(0.0).round() as u32);

    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => ctx,
        Ok(None) | Err(_) => {
            log::warn!("2d canvas context unavailable");
            return;
        }
    };
    let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
        return;
    };

    ctx.clear_rect(0.0, 0.0, width, height);
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
    for (offset, color) in theme.backdrop_gradient() {
        if let Err(err) = gradient.add_color_stop(offset as f32, color) {
            log::warn!("bad gradient stop {color}: {err:?}");
            return;
        }
    }
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, width, height);
}
