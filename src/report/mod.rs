//! Finalized report documents and JSON output.
//!
//! Report rendering (text/HTML) is a consumer concern; this module only
//! defines the versioned structures a renderer reads and a small JSON
//! writer for handing them off as files.

pub mod json;
pub mod schema;

pub use json::{to_json_string, write_json};
pub use schema::{EventProfileReport, TrackerReport};
