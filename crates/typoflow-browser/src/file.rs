//! Reading a user-selected text file.

use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, File, HtmlInputElement};

use crate::error::DomError;

/// First file picked in a file `<input>`, if any.
pub fn selected_file(input: &HtmlInputElement) -> Option<File> {
    input.files()?.get(0)
}

/// Read `blob` as UTF-8 text.
pub async fn read_file_text(blob: &Blob) -> Result<String, DomError> {
    let value = JsFuture::from(blob.text()).await?;
    let text = value.as_string().ok_or(DomError::NotText)?;
    tracing::debug!(bytes = text.len(), "read_file_text: file loaded");
    Ok(text)
}
