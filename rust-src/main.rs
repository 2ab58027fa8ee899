//! worklog-dash CLI
//!
//! Weekly developer activity dashboard over a remote worklog endpoint.

mod aggregation;
mod cli;
mod commands;
mod config;
mod data;
mod error;
mod logging;
mod models;
mod view;
mod visualization;


fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
