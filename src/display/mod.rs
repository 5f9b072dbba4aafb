//! Terminal presentation for the CLI: themed messages, progress bars,
//! the per-package summary table and the long help text.

pub mod help;
pub mod progress;
pub mod tables;
pub mod theme;

pub use help::{create_help_text, format_help_section};
pub use progress::{create_progress_bar, create_spinner, with_spinner};
pub use tables::{TableBuilder, create_package_table};
pub use theme::{THEME, Theme};
