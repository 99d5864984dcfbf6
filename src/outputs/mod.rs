//! Local output: rendering the preview page and writing it to disk.
//!
//! # Submodules
//!
//! - [`html`]: Builds the HTML5 document from a title and content fragment
//! - [`local`]: Writes the document into the output directory
//!
//! # Output Structure
//!
//! ```text
//! ./dist/
//! └── preview.html   # overwritten on every run
//! ```

pub mod html;
pub mod local;
