mod config;
mod connection;
mod logger;
mod method;

pub use config::{LogLevel, LspArgs, LspConfig, TsServerLogVerbosity, DEFAULT_LOG_LEVEL};
pub use connection::{create_connection, LspConnection};
pub use logger::ClientLogger;

/// The result type used in this crate.
pub type Result<T, E = Box<dyn std::error::Error + Sync + Send>> = std::result::Result<T, E>;

/// Start the LSP server.
///
/// # Arguments
///
/// + `args` - The command line arguments
///
/// # Returns
///
/// + `Result<(), Box<dyn std::error::Error + Sync + Send>>`
pub fn start_lsp(args: &LspArgs) -> Result<()> {
    const PROG_NAME: &str = env!("CARGO_PKG_NAME");
    const PROG_VERSION: &str = env!("CARGO_PKG_VERSION");

    if !args.stdio {
        return Err("`--stdio` is required".into());
    }

    let config = LspConfig::resolve(args);

    // Setup logging system.
    setup_logging_system(args, &config, PROG_NAME);
    tracing::info!("{} - v{}", PROG_NAME, PROG_VERSION);
    tracing::info!("PID: {}", std::process::id());
    tracing::debug!("config: {}", serde_json::to_string(&config)?);

    create_connection(config).listen()
}

fn setup_logging_system(args: &LspArgs, config: &LspConfig, prog_name: &str) {
    let loglevel = tracing::metadata::LevelFilter::from(config.show_message_level);

    // Stdout carries the protocol, so never log there.
    match &args.logdir {
        Some(path) => {
            let logfile = format!("{}.log", prog_name);
            let file_appender = tracing_appender::rolling::never(path, logfile);
            tracing_subscriber::fmt()
                .with_max_level(loglevel)
                .with_writer(file_appender)
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(loglevel)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    std::panic::set_hook(Box::new(tracing_panic::panic_hook));
}
