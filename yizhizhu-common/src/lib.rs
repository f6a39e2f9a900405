//! Yizhizhu Common Library
//!
//! Wizard flow, form validation, settings, file import and preview logic
//! shared by the desktop application.
//! This crate has NO GTK4 dependencies.

pub mod config;
pub mod flow;
pub mod form;
pub mod import;
pub mod notice;
pub mod paths;
pub mod preview;
pub mod revert;
pub mod validate;
pub mod wizard;
