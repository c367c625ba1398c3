use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// The filter is fixed at `info` and records go to stderr, so stdout only
/// carries the final success line.
pub fn init_logging() {
    INIT.call_once(|| {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .format_timestamp(None)
            .init();
        log::debug!("logging initialized");
    });
}
