pub mod cli;
pub mod core;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod models;
pub mod repl;
pub mod style;
