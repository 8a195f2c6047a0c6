pub mod fetch;
pub mod render;
pub mod search;

/// Initialize `env_logger` from the `-v` count; `RUST_LOG` takes precedence.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}
