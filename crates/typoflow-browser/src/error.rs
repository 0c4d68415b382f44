//! DOM error type.

use miette::Diagnostic;
use wasm_bindgen::JsValue;

/// Failure while touching the DOM.
#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum DomError {
    #[error("no window available")]
    #[diagnostic(code(typoflow::dom::no_window))]
    NoWindow,

    #[error("no document available")]
    #[diagnostic(code(typoflow::dom::no_document))]
    NoDocument,

    #[error("element #{0} not found")]
    #[diagnostic(
        code(typoflow::dom::element_not_found),
        help("the editor element may have been removed; mount again")
    )]
    ElementNotFound(String),

    #[error("file contents are not text")]
    #[diagnostic(code(typoflow::dom::not_text))]
    NotText,

    #[error("javascript error: {0}")]
    #[diagnostic(code(typoflow::dom::js))]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        DomError::Js(message)
    }
}

pub(crate) fn document() -> Result<web_sys::Document, DomError> {
    web_sys::window()
        .ok_or(DomError::NoWindow)?
        .document()
        .ok_or(DomError::NoDocument)
}

/// Look up an element by id and cast it to `HtmlElement`.
pub fn html_element_by_id(id: &str) -> Result<web_sys::HtmlElement, DomError> {
    use wasm_bindgen::JsCast;

    document()?
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
        .ok_or_else(|| DomError::ElementNotFound(id.to_string()))
}
