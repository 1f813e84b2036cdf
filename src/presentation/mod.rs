//! Presentation layer: command line dispatch and text output.

pub mod app;
pub mod output;

pub use app::{App, Services};
