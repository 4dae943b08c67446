mod app;
mod audio;
mod config;
mod controller;
mod error;
mod library;
mod mpris;
mod playlist;
mod runtime;
mod scheduler;
mod ui;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
