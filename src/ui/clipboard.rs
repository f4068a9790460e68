//! Browser clipboard integration for rendered code blocks
//!
//! Report markup is injected as raw HTML, so its copy buttons call the
//! global `copyToClipboard(id)` installed here.

use leptos::logging::error;
use leptos::wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlDocument, HtmlTextAreaElement, Window};

use crate::core::clipboard::{
    COPIED_BUTTON_HTML, COPY_FEEDBACK_MS, COPY_SUCCESS_CLASS, ClipboardBackend, ClipboardError,
    copy_with_fallback,
};

/// Name of the global the copy buttons call
pub const COPY_HANDLER_NAME: &str = "copyToClipboard";

/// Attach `window.copyToClipboard` so inline `onclick` handlers can reach it
pub fn install_copy_handler() {
    use leptos::wasm_bindgen::closure::Closure;

    let Some(window) = web_sys::window() else {
        return;
    };

    let handler = Closure::<dyn Fn(String)>::new(|element_id: String| {
        wasm_bindgen_futures::spawn_local(copy_element_text(element_id));
    });

    if let Err(e) = js_sys::Reflect::set(
        &window,
        &JsValue::from_str(COPY_HANDLER_NAME),
        handler.as_ref(),
    ) {
        error!("Failed to install {}: {:?}", COPY_HANDLER_NAME, e);
    }

    // Lives for the whole page
    handler.forget();
}

/// Copy the text of `element_id` and flash its copy button
pub async fn copy_element_text(element_id: String) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(element) = document.get_element_by_id(&element_id) else {
        return;
    };

    let text = element.text_content().unwrap_or_default();
    let backend = BrowserClipboard {
        window,
        document: document.clone(),
    };

    let report = copy_with_fallback(&backend, &text).await;
    for err in &report.errors {
        error!("Failed to copy: {}", err);
    }

    if report.copied() {
        show_copy_feedback(&document, &element_id).await;
    }
}

async fn show_copy_feedback(document: &Document, element_id: &str) {
    use gloo_timers::future::TimeoutFuture;

    let selector = format!("button[data-copy-target=\"{}\"]", element_id);
    let Ok(Some(button)) = document.query_selector(&selector) else {
        return;
    };

    let original_html = button.inner_html();
    button.set_inner_html(COPIED_BUTTON_HTML);
    let _ = button.class_list().add_1(COPY_SUCCESS_CLASS);

    TimeoutFuture::new(COPY_FEEDBACK_MS).await;

    button.set_inner_html(&original_html);
    let _ = button.class_list().remove_1(COPY_SUCCESS_CLASS);
}

struct BrowserClipboard {
    window: Window,
    document: Document,
}

impl ClipboardBackend for BrowserClipboard {
    fn has_async_clipboard(&self) -> bool {
        js_sys::Reflect::get(&self.window.navigator(), &JsValue::from_str("clipboard"))
            .map(|clipboard| !clipboard.is_undefined() && !clipboard.is_null())
            .unwrap_or(false)
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let promise = self.window.navigator().clipboard().write_text(text);
        wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| ClipboardError::Rejected(format!("{:?}", e)))
    }

    fn fallback_copy(&self, text: &str) -> Result<(), ClipboardError> {
        let body = self.document.body().ok_or(ClipboardError::Unavailable)?;
        let textarea: HtmlTextAreaElement = self
            .document
            .create_element("textarea")
            .map_err(command_failed)?
            .dyn_into()
            .map_err(|_| ClipboardError::Unavailable)?;

        textarea.set_value(text);
        let style = textarea.style();
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("opacity", "0");

        body.append_child(&textarea).map_err(command_failed)?;
        textarea.select();

        let result = match self.document.dyn_ref::<HtmlDocument>() {
            Some(html_document) => html_document.exec_command("copy").map_err(command_failed),
            None => Err(ClipboardError::Unavailable),
        };

        let _ = body.remove_child(&textarea);

        match result? {
            true => Ok(()),
            false => Err(ClipboardError::CommandFailed(
                "copy command was not executed".to_string(),
            )),
        }
    }
}

fn command_failed(e: JsValue) -> ClipboardError {
    ClipboardError::CommandFailed(format!("{:?}", e))
}
