mod audio;
mod config;
mod error;
mod fetch;
mod library;
mod runtime;
mod search;
mod session;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
