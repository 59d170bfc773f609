use env_logger::{Builder, Target};
use log::LevelFilter;

fn init_default_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("medpost_client", LevelFilter::Debug)
        .init();
}

/// Initialize logging from `RUST_LOG`, or Warn globally with Debug for this
/// crate when it is unset. Call once, from the binary.
pub fn init_logger() {
    if std::env::var("RUST_LOG").is_err() {
        init_default_logger();
        log::debug!("RUST_LOG not set, using default log filters");
    } else {
        env_logger::init();
        log::debug!("Initialized logger from env");
    }
}
