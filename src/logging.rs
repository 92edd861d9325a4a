use tracing_subscriber::EnvFilter;

/// Level used when neither `RUST_LOG` nor `--debug` is given.
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Install the stderr subscriber.
///
/// Priority: `RUST_LOG` > `--debug` > [`DEFAULT_LOG_LEVEL`].
pub fn init(debug_flag: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
