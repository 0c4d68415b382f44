//! Browser DOM layer for the typoflow editable surface.
//!
//! Assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `dom_sync`: block reconciliation and DOM to text extraction
//! - `cursor`: caret capture and restoration across a resync
//! - `style`: applying `StyleSettings` to the editor element
//! - `events`: input, composition and plain-text paste listeners
//! - `file`: reading a picked text file
//! - `surface`: `BrowserSurface`, the controlled view tying these together
//!
//! # Re-exports
//!
//! This crate re-exports `typoflow-core` for convenience, so consumers
//! only need to depend on `typoflow-browser`.

// Re-export core crate
pub use typoflow_core;
pub use typoflow_core::*;

pub mod cursor;
pub mod dom_sync;
pub mod error;
pub mod events;
pub mod file;
pub mod style;
pub mod surface;

pub use dom_sync::{extract_element_text, read_dom_text, update_block_dom, update_block_dom_by_id};
pub use error::{DomError, html_element_by_id};
pub use events::InputBinding;
pub use surface::BrowserSurface;
