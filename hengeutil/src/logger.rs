/// On native: print messages from the `log` crate to STDERR, filtered by `RUST_LOG` and defaulting
/// to `info`. Safe to call more than once; later calls are ignored.
///
/// On web: Just use console_log.
pub fn setup() {
    #[cfg(target_arch = "wasm32")]
    {
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::debug!("console_log was already set up");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use env_logger::{Builder, Env};
        if Builder::from_env(Env::default().default_filter_or("info"))
            .try_init()
            .is_err()
        {
            log::debug!("env_logger was already set up");
        }
    }
}
