//! Report Compare library
//!
//! The comparison engine, the two-pane comparison view and the document
//! owner that applies its revert/reset intents.

pub mod app;
pub mod config;
pub mod constant;
pub mod document;
pub mod engine;
pub mod messages;
pub mod style;
pub mod ui;
