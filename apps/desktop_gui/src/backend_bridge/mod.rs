//! Worker thread that runs scrape requests off the UI thread.

pub mod commands;
pub mod runtime;
