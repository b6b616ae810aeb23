//! Rendering and persistence of scan results.
//!
//! - [`render_text`] / [`render_json`]: human and machine readable forms
//! - [`JsonFileWriter`]: an observer keeping the latest result on disk

mod error;
mod file;
mod format;

pub use error::OutputError;
pub use file::{JsonFileWriter, RESULT_FILE_VERSION, ResultFile};
pub use format::{OutputFormat, render, render_json, render_text};
