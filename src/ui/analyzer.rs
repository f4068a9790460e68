//! Query analyzer page
//!
//! Hosts the `#queryForm` form and the `#result` container. Submitting posts
//! the query to `/analyze` and writes the rendered report (or an error view)
//! into the container.

use crate::core::RequestGeneration;
use leptos::prelude::*;

#[cfg(not(feature = "ssr"))]
use crate::core::submission::SubmitError;

/// Example shown in the empty query field
const QUERY_PLACEHOLDER: &str = "SELECT * FROM employees WHERE department_id = 10;";

/// Analyzer form with its result container
#[component]
pub fn AnalyzerPage() -> impl IntoView {
    let form_ref = NodeRef::<leptos::html::Form>::new();
    let result_ref = NodeRef::<leptos::html::Div>::new();
    // Responses that arrive after a newer submission are dropped
    #[cfg_attr(feature = "ssr", allow(unused_variables))]
    let generation = RequestGeneration::new();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        #[cfg(not(feature = "ssr"))]
        handle_submit(form_ref, result_ref, generation.clone());
    };

    view! {
        <main class="analyzer">
            <header class="analyzer__header">
                <h1>"QueryLens"</h1>
                <p>"Paste a SQL query to get an optimized rewrite, a validation report and cost notes."</p>
            </header>

            <form id="queryForm" class="query-form" node_ref=form_ref on:submit=on_submit>
                <label for="query" class="query-form__label">"SQL Query"</label>
                <textarea
                    id="query"
                    name="query"
                    class="query-form__input"
                    rows="8"
                    placeholder=QUERY_PLACEHOLDER
                ></textarea>
                <button type="submit" class="query-form__submit">
                    <i class="fas fa-magic"></i>
                    <span>"Analyze Query"</span>
                </button>
            </form>

            <div id="result" class="results" node_ref=result_ref></div>
        </main>
    }
}

#[cfg(not(feature = "ssr"))]
fn handle_submit(
    form_ref: NodeRef<leptos::html::Form>,
    result_ref: NodeRef<leptos::html::Div>,
    generation: RequestGeneration,
) {
    use crate::core::{ResultView, submit_query};
    use crate::ui::transport::BrowserTransport;
    use leptos::logging::{error, log};

    let Some(container) = result_ref.get_untracked() else {
        error!("{}", SubmitError::MissingElement("result"));
        return;
    };

    container.set_inner_html(&ResultView::Loading.to_html());

    let ticket = generation.begin();
    let query = read_query(form_ref);

    leptos::task::spawn_local(async move {
        let view = match query {
            Ok(query) => submit_query(&BrowserTransport, &query).await,
            Err(err) => err.into(),
        };

        if !generation.is_current(ticket) {
            log!("Discarding stale analysis response");
            return;
        }

        container.set_inner_html(&view.to_html());

        if view.is_report() {
            highlight_code_blocks();
            scroll_into_view(&container);
        }
    });
}

/// Value of the form's `query` field, empty when absent
#[cfg(not(feature = "ssr"))]
fn read_query(form_ref: NodeRef<leptos::html::Form>) -> Result<String, SubmitError> {
    let form = form_ref
        .get_untracked()
        .ok_or(SubmitError::MissingElement("queryForm"))?;
    let data = web_sys::FormData::new_with_form(&form)
        .map_err(|e| SubmitError::Serialize(format!("{:?}", e)))?;

    Ok(data.get("query").as_string().unwrap_or_default())
}

/// Run `Prism.highlightAll()` when a highlighter is loaded on the page
#[cfg(not(feature = "ssr"))]
fn highlight_code_blocks() {
    use leptos::wasm_bindgen::{JsCast, JsValue};

    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(prism) = js_sys::Reflect::get(&window, &JsValue::from_str("Prism")) else {
        return;
    };
    if prism.is_undefined() || prism.is_null() {
        return;
    }

    if let Ok(highlight_all) = js_sys::Reflect::get(&prism, &JsValue::from_str("highlightAll"))
        .and_then(|f| f.dyn_into::<js_sys::Function>())
    {
        let _ = highlight_all.call0(&prism);
    }
}

#[cfg(not(feature = "ssr"))]
fn scroll_into_view(container: &web_sys::HtmlDivElement) {
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    options.set_block(web_sys::ScrollLogicalPosition::Nearest);
    container.scroll_into_view_with_scroll_into_view_options(&options);
}
