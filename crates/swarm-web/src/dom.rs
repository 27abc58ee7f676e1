use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Write text into an element by id. Absent sinks are a silent no-op.
#[inline]
pub fn set_text(element_id: &str, text: &str) {
    if let Some(doc) = window_document() {
        if let Some(el) = doc.get_element_by_id(element_id) {
            el.set_text_content(Some(text));
        }
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
