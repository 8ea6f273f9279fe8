//! Everything that touches the terminal, the file system or the engine.
mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod output;
mod render;
mod repl;
mod session;

pub use app::run_app;
