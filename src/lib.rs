//! jsonlens - local JSON file viewer pipeline
//!
//! This crate turns a user-selected local file into either a validated JSON
//! document tree or a tagged pipeline failure, and exposes the result through
//! a read-only snapshot for a display layer to render.

pub mod config;
pub mod document;
pub mod error;
pub mod events;
pub mod parser;
pub mod pipeline;
pub mod source;
pub mod state;
