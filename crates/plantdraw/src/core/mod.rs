//! Core abstractions for diagram conversion
//!
//! The traits every diagram kind implements (database, detector, parser,
//! layout, renderer, diagram), the primitive document they all emit into,
//! and the shared text, configuration and logging utilities.

pub mod chumsky_utils;
mod config;
mod database;
mod detector;
mod diagram;
mod document;
mod error;
mod layout;
pub mod logging;
mod parser;
mod renderer;
pub mod text;
mod types;

pub use config::*;
pub use database::*;
pub use detector::*;
pub use diagram::*;
pub use document::*;
pub use error::*;
pub use layout::*;
pub use logging::*;
pub use parser::*;
pub use renderer::*;
pub use text::{normalize_lines, LINE_BREAK};
pub use types::*;
