//! Building blocks of the `amflens` binary
//!
//! Kept in a library so argument parsing, configuration and rendering can be
//! tested without running the binary.

pub mod args;
pub mod render;
pub mod settings;

pub use args::{APP_NAME, CliCommand, CliOptions, VERSION, View, parse_arguments};
pub use render::render;
pub use settings::{OutputFormat, Settings};
