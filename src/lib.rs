// Library surface for headless/integration tests and reuse.
// main.rs only wires the terminal, logging and CLI around it.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod text_field;
pub mod trial;
pub mod ui;
