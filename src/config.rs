use std::io::Write;

/// Client-visible log level used when `--log-level` is absent or invalid.
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

/// Raw command line arguments.
#[derive(Debug, clap::Parser, Default, Clone)]
#[command(name = "typescript-language-server", author, version, about, long_about = None)]
pub struct LspArgs {
    #[arg(
        long,
        required = true,
        help = "Uses stdio as the communication channel"
    )]
    pub stdio: bool,

    #[arg(
        long,
        value_name = "LEVEL",
        allow_hyphen_values = true,
        help = "Set log level",
        long_help = "A number indicating the log level (4 = log, 3 = info, 2 = warn, 1 = error). Defaults to `3`."
    )]
    pub log_level: Option<String>,

    #[arg(
        long,
        value_name = "VERBOSITY",
        help = "Specify a tsserver log verbosity",
        long_help = "Possible values are: [off | terse | normal | verbose] (By default `off` is used, or `normal` when --tsserver-log-file is given)"
    )]
    pub tsserver_log_verbosity: Option<String>,

    #[arg(
        long,
        value_name = "PATH",
        help = "Specify path to tsserver directory",
        long_help = "Specify path to tsserver directory. example: --tsserver-path=/Users/me/typescript/lib/"
    )]
    pub tsserver_path: Option<String>,

    #[arg(long, value_name = "PATH", help = "Specify a tsserver log file")]
    pub tsserver_log_file: Option<String>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Specifies a directory to use for logging"
    )]
    pub logdir: Option<String>,
}

/// Severity of messages forwarded to the client.
///
/// The numbers match `lsp_types::MessageType`, so `Error` is the most severe
/// and `Log` the least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LogLevel {
    Error = 1,
    Warn = 2,
    Info = 3,
    Log = 4,
}

impl LogLevel {
    /// Map a numeric level to its variant.
    ///
    /// # Arguments
    ///
    /// + `value` - Level number in range `[1, 4]`.
    ///
    /// # Returns
    ///
    /// + `None` if the number is out of range.
    pub fn from_number(value: i64) -> Option<LogLevel> {
        match value {
            1 => Some(LogLevel::Error),
            2 => Some(LogLevel::Warn),
            3 => Some(LogLevel::Info),
            4 => Some(LogLevel::Log),
            _ => None,
        }
    }

    pub fn as_number(self) -> u8 {
        self as u8
    }
}

impl From<LogLevel> for lsp_types::MessageType {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => lsp_types::MessageType::ERROR,
            LogLevel::Warn => lsp_types::MessageType::WARNING,
            LogLevel::Info => lsp_types::MessageType::INFO,
            LogLevel::Log => lsp_types::MessageType::LOG,
        }
    }
}

impl From<LogLevel> for tracing::metadata::LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => tracing::metadata::LevelFilter::ERROR,
            LogLevel::Warn => tracing::metadata::LevelFilter::WARN,
            LogLevel::Info => tracing::metadata::LevelFilter::INFO,
            LogLevel::Log => tracing::metadata::LevelFilter::DEBUG,
        }
    }
}

/// How much tsserver writes into its own log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TsServerLogVerbosity {
    #[default]
    Off,
    Terse,
    Normal,
    Verbose,
}

impl TsServerLogVerbosity {
    /// Parse a verbosity name, ignoring letter case.
    ///
    /// Unknown names map to [`TsServerLogVerbosity::Off`].
    pub fn from_name(name: &str) -> TsServerLogVerbosity {
        match name.to_ascii_lowercase().as_str() {
            "off" => TsServerLogVerbosity::Off,
            "terse" => TsServerLogVerbosity::Terse,
            "normal" => TsServerLogVerbosity::Normal,
            "verbose" => TsServerLogVerbosity::Verbose,
            _ => TsServerLogVerbosity::Off,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TsServerLogVerbosity::Off => "off",
            TsServerLogVerbosity::Terse => "terse",
            TsServerLogVerbosity::Normal => "normal",
            TsServerLogVerbosity::Verbose => "verbose",
        }
    }
}

impl std::fmt::Display for TsServerLogVerbosity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Startup configuration handed to the connection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LspConfig {
    /// Path to the tsserver directory. `None` means automatic discovery.
    pub tsserver_path: Option<String>,

    /// Verbosity of the tsserver log.
    pub tsserver_log_verbosity: TsServerLogVerbosity,

    /// Most verbose message type forwarded to the client.
    pub show_message_level: LogLevel,
}

impl Default for LspConfig {
    fn default() -> Self {
        LspConfig {
            tsserver_path: None,
            tsserver_log_verbosity: TsServerLogVerbosity::Off,
            show_message_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl LspConfig {
    /// Resolve command line arguments into a configuration.
    ///
    /// Invalid values never fail: they fall back to defaults and a warning is
    /// printed to stderr.
    ///
    /// # Arguments
    ///
    /// + `args` - Raw command line arguments.
    pub fn resolve(args: &LspArgs) -> LspConfig {
        Self::resolve_with_diagnostics(args, &mut std::io::stderr())
    }

    /// Same as [`LspConfig::resolve`], writing warnings to `diagnostics`.
    ///
    /// # Arguments
    ///
    /// + `args` - Raw command line arguments.
    /// + `diagnostics` - Sink for warning lines.
    pub fn resolve_with_diagnostics<W: Write>(args: &LspArgs, diagnostics: &mut W) -> LspConfig {
        let mut tsserver_log_verbosity = args
            .tsserver_log_verbosity
            .as_deref()
            .map(TsServerLogVerbosity::from_name)
            .unwrap_or_default();

        // A log file without verbosity would produce no output.
        if args.tsserver_log_file.is_some() && tsserver_log_verbosity == TsServerLogVerbosity::Off
        {
            tsserver_log_verbosity = TsServerLogVerbosity::Normal;
        }

        LspConfig {
            tsserver_path: args.tsserver_path.clone(),
            tsserver_log_verbosity,
            show_message_level: resolve_log_level(args.log_level.as_deref(), diagnostics),
        }
    }
}

fn resolve_log_level<W: Write>(value: Option<&str>, diagnostics: &mut W) -> LogLevel {
    let Some(value) = value else {
        return DEFAULT_LOG_LEVEL;
    };

    match parse_leading_integer(value).and_then(LogLevel::from_number) {
        Some(level) => level,
        None => {
            // Startup continues even if stderr is gone.
            let _ = writeln!(
                diagnostics,
                "Invalid '--log-level {}'. Falling back to 'info' level.",
                value.escape_debug()
            );
            DEFAULT_LOG_LEVEL
        }
    }
}

/// Read the base-10 integer at the start of `value`.
///
/// Leading whitespace and a sign are accepted, and anything after the first
/// non-digit is ignored, so `"2.5"` reads as `2`.
///
/// # Returns
///
/// + `None` if no digit follows the optional sign.
fn parse_leading_integer(value: &str) -> Option<i64> {
    let rest = value.trim_start();
    let (negative, rest) = match rest.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, rest.strip_prefix('+').unwrap_or(rest)),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }

    // Too many digits is out of range anyway.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
