use env_logger::Env;

/// Install the process logger. `RUST_LOG` overrides the default `warn`
/// level; repeated calls are ignored.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();
}
