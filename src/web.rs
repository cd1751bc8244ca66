//! Browser layout measurement through `web-sys`.
//!
//! [`DomLayoutProvider`] only reads the document. The one mutation a host needs from the DOM
//! side, dropping a static loading indicator, lives in [`remove_legacy_indicator`].

use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Window};

use crate::{
    config::HandoffConfig,
    foundation::core::{Rect, Viewport},
    foundation::error::{HandoffError, HandoffResult},
    layout::provider::{LayoutProvider, WordAnchor},
};

fn js_err(context: &str, err: JsValue) -> HandoffError {
    HandoffError::Other(anyhow::anyhow!("{context}: {err:?}"))
}

/// [`LayoutProvider`] over the live document.
#[derive(Clone, Debug)]
pub struct DomLayoutProvider {
    window: Window,
    document: Document,
    destination_selector: String,
    word_anchor_attribute: String,
}

impl DomLayoutProvider {
    /// Provider for the current window, using the selectors from `config`.
    pub fn new(config: &HandoffConfig) -> HandoffResult<Self> {
        let window = web_sys::window().ok_or_else(|| HandoffError::config("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| HandoffError::config("window has no document"))?;
        Ok(Self {
            window,
            document,
            destination_selector: config.destination_selector.clone(),
            word_anchor_attribute: config.word_anchor_attribute.clone(),
        })
    }

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(selector, error = ?err, "invalid selector");
                None
            }
        }
    }

    fn font_size(&self, el: &Element) -> Option<f64> {
        let style = self.window.get_computed_style(el).ok().flatten()?;
        let value = style.get_property_value("font-size").ok()?;
        parse_px(&value)
    }
}

fn bounding_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.x(), r.y(), r.x() + r.width(), r.y() + r.height())
}

/// Parse a computed CSS length such as `"64px"`.
pub fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}

impl LayoutProvider for DomLayoutProvider {
    fn viewport(&self) -> Viewport {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let dpr = self.window.device_pixel_ratio();
        Viewport::new(width, height, dpr).unwrap_or(Viewport {
            width: width.max(1.0),
            height: height.max(1.0),
            device_pixel_ratio: 1.0,
        })
    }

    fn destination_region(&self) -> Option<Rect> {
        self.query(&self.destination_selector)
            .map(|el| bounding_rect(&el))
    }

    fn word_anchor(&self, index: usize) -> Option<WordAnchor> {
        let selector = format!("[{}=\"{index}\"]", self.word_anchor_attribute);
        let el = self.query(&selector)?;
        Some(WordAnchor {
            rect: bounding_rect(&el),
            font_size: self.font_size(&el).unwrap_or(0.0),
        })
    }
}

/// Remove the element matching `selector`, if any. Returns whether one was removed.
pub fn remove_legacy_indicator(selector: &str) -> HandoffResult<bool> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| HandoffError::config("no document"))?;
    let Some(el) = document
        .query_selector(selector)
        .map_err(|e| js_err("query legacy indicator", e))?
    else {
        return Ok(false);
    };
    el.remove();
    tracing::debug!(selector, "legacy loading indicator removed");
    Ok(true)
}
