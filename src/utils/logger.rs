use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_cli_logger(verbose: bool) {
    init_with_level(verbose, None);
}

/// Same as `init_cli_logger`, but a `log_level` from the config file is used
/// when `RUST_LOG` is not set.
pub fn init_with_level(verbose: bool, log_level: Option<&str>) {
    let fallback = match (verbose, log_level) {
        (true, _) => "tarot_reader=debug,info".to_string(),
        (false, Some(level)) => format!("tarot_reader={}", level),
        (false, None) => "tarot_reader=info".to_string(),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
