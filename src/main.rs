mod app;
mod cli;
mod concat;
mod config;
mod library;
mod payload;
mod preview;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
