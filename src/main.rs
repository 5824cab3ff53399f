mod app;
mod bus;
mod catalog;
mod config;
mod controls;
mod error;
mod logging;
mod mirror;
mod mpris;
mod owner;
mod popout;
mod protocol;
mod runtime;
mod ticker;
mod ui;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
