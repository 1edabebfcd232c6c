//! Logger setup.

use log::LevelFilter;

/// Maps the `-v` count to a default level: warn, info, debug, trace.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialises `env_logger` on stderr. `RUST_LOG` overrides the `-v` level.
pub fn init_logging(verbosity: u8) {
    let env = env_logger::Env::default().default_filter_or(level_for(verbosity).as_str());
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
