use crate::constants::{
    PROGRESS_ID, ROOM_LABEL_ID, SECTION_ACTIVE_CLASS, SECTION_ROOM_ATTR, SECTION_SELECTOR,
};
use tour_core::scroll::{ScrollObserver, ScrollUpdate};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Progress bar, room label and section highlighting. Missing elements are
/// skipped; the page decides which of them it has.
pub struct DomOverlay {
    progress: Option<web::HtmlElement>,
    label: Option<web::Element>,
    sections: Vec<web::Element>,
    room_index: Option<usize>,
}

impl DomOverlay {
    pub fn new(document: &web::Document) -> Self {
        let progress = document
            .get_element_by_id(PROGRESS_ID)
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
        let label = document.get_element_by_id(ROOM_LABEL_ID);
        let mut sections = Vec::new();
        if let Ok(list) = document.query_selector_all(SECTION_SELECTOR) {
            for i in 0..list.length() {
                if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
                    sections.push(el);
                }
            }
        }
        log::info!(
            "[overlay] progress={} label={} sections={}",
            progress.is_some(),
            label.is_some(),
            sections.len()
        );
        Self {
            progress,
            label,
            sections,
            room_index: None,
        }
    }

    fn highlight(&self, room: &str) {
        for el in &self.sections {
            let active = el.get_attribute(SECTION_ROOM_ATTR).as_deref() == Some(room);
            _ = el.class_list().toggle_with_force(SECTION_ACTIVE_CLASS, active);
        }
    }
}

impl ScrollObserver for DomOverlay {
    fn on_scroll_update(&mut self, update: &ScrollUpdate, room_label: &str) {
        if let Some(bar) = &self.progress {
            let pct = format!("{:.2}%", update.progress * 100.0);
            _ = bar.style().set_property("width", &pct);
        }
        if self.room_index == Some(update.room_index) {
            return;
        }
        self.room_index = Some(update.room_index);
        if let Some(label) = &self.label {
            label.set_text_content(Some(room_label));
        }
        self.highlight(room_label);
    }
}
