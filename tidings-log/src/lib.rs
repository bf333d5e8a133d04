//! Tidings logging
//!
//! Line-oriented logging for event handlers and application wiring, driven by
//! `TIDINGS_*` environment variables. The dispatcher itself reports through
//! `tracing`; enable the `tracing` feature and install
//! [`tracing_compat::subscriber`] to route both through one configuration.
//!
//! # Usage
//!
//! ```rust
//! use tidings_log::{debug, info, warn};
//!
//! info!("Customer {} created", "123");
//! debug!(target: "tidings::customer", "Address changed for {}", "123");
//! warn!("No handler for {}", "ProductCreatedEvent");
//! ```
//!
//! # Environment Variables
//!
//! - `TIDINGS_DEBUG=1` - Enable debug logging
//! - `TIDINGS_LOG_LEVEL=trace|debug|info|warn|error|off` - Minimum level
//! - `TIDINGS_LOG_FORMAT=pretty|compact|json` - Output format
//! - `TIDINGS_LOG_COLOR=1|0` - Enable/disable colors
//! - `TIDINGS_LOG_TIMESTAMPS=1|0` - Prefix lines with a timestamp
//! - `TIDINGS_LOG_MODULE=1|0` - Include the log target

use once_cell::sync::OnceCell;
use std::io::{IsTerminal, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl Level {
    /// Upper-case level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Off,
        }
    }

    #[cfg(feature = "color")]
    fn colored(&self) -> colored::ColoredString {
        use colored::Colorize;
        match self {
            Level::Trace => "TRACE".magenta(),
            Level::Debug => "DEBUG".blue(),
            Level::Info => "INFO".green(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERROR".red().bold(),
            Level::Off => "OFF".white(),
        }
    }
}

impl FromStr for Level {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "off" | "none" => Ok(Level::Off),
            _ => Err(UnknownValue(s.to_string())),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human-readable, optionally colored
    Pretty,
    /// Single letter level, short timestamp
    Compact,
    /// One JSON object per line
    Json,
}

impl FromStr for Format {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Format::Pretty),
            "compact" => Ok(Format::Compact),
            "json" => Ok(Format::Json),
            _ => Err(UnknownValue(s.to_string())),
        }
    }
}

/// Unrecognized level or format name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue(pub String);

impl std::fmt::Display for UnknownValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown value: {}", self.0)
    }
}

impl std::error::Error for UnknownValue {}

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);
static CONFIG: OnceCell<LogConfig> = OnceCell::new();

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub debug: bool,
    pub level: Level,
    pub format: Format,
    pub color: bool,
    pub timestamps: bool,
    pub module_path: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Pretty,
            color: false,
            timestamps: true,
            module_path: true,
        }
    }
}

impl LogConfig {
    /// Read the configuration from `TIDINGS_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        };

        let debug = flag("TIDINGS_DEBUG", false);

        let level = lookup("TIDINGS_LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { Level::Info });

        let format = lookup("TIDINGS_LOG_FORMAT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(Format::Pretty);

        let color_default = lookup("NO_COLOR").is_none() && std::io::stderr().is_terminal();

        Self {
            debug,
            level,
            format,
            color: flag("TIDINGS_LOG_COLOR", color_default),
            timestamps: flag("TIDINGS_LOG_TIMESTAMPS", true),
            module_path: flag("TIDINGS_LOG_MODULE", true),
        }
    }
}

/// Initialize logging from the environment.
///
/// Called lazily by the first log line and by [`set_level`]; calling it
/// explicitly is only needed to apply `TIDINGS_*` levels before any output.
pub fn init() {
    config();
}

/// The active configuration, as read from the environment.
///
/// The level it carries is the starting point; [`set_level`] overrides it.
pub fn config() -> &'static LogConfig {
    CONFIG.get_or_init(|| {
        let config = LogConfig::from_env();
        LOG_LEVEL.store(config.level as u8, Ordering::SeqCst);
        config
    })
}

#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    passes(level, current_level())
}

pub fn current_level() -> Level {
    config();
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Change the minimum level at runtime.
pub fn set_level(level: Level) {
    config();
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

fn passes(level: Level, threshold: Level) -> bool {
    level != Level::Off && level >= threshold
}

#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    if !is_level_enabled(level) {
        return;
    }

    let config = config();
    let line = match config.format {
        Format::Pretty => format_pretty(level, target, message, config),
        Format::Compact => format_compact(level, target, message, config),
        Format::Json => format_json(level, target, message),
    };

    let _ = writeln!(std::io::stderr().lock(), "{}", line);
}

fn format_pretty(level: Level, target: &str, message: &str, config: &LogConfig) -> String {
    let mut line = String::new();

    if config.timestamps {
        line.push_str(&chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f ").to_string());
    }

    #[cfg(feature = "color")]
    if config.color {
        line.push_str(&format!("{:5} ", level.colored()));
    } else {
        line.push_str(&format!("{:5} ", level.as_str()));
    }

    #[cfg(not(feature = "color"))]
    line.push_str(&format!("{:5} ", level.as_str()));

    if config.module_path && !target.is_empty() {
        line.push_str(&format!("[{}] ", target));
    }

    line.push_str(message);
    line
}

fn format_compact(level: Level, target: &str, message: &str, config: &LogConfig) -> String {
    let mut line = String::new();

    if config.timestamps {
        line.push_str(&chrono::Local::now().format("%H:%M:%S ").to_string());
    }

    line.push(level.as_str().chars().next().unwrap_or('?'));
    line.push(' ');

    if config.module_path && !target.is_empty() {
        line.push_str(target);
        line.push_str(": ");
    }

    line.push_str(message);
    line
}

#[cfg(feature = "json")]
fn format_json(level: Level, target: &str, message: &str) -> String {
    #[derive(serde::Serialize)]
    struct LogEntry<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let entry = LogEntry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
    };

    serde_json::to_string(&entry).unwrap_or_else(|_| message.to_string())
}

#[cfg(not(feature = "json"))]
fn format_json(level: Level, target: &str, message: &str) -> String {
    format!(
        r#"{{"timestamp":"{}","level":"{}","target":{:?},"message":{:?}}}"#,
        chrono::Utc::now().to_rfc3339(),
        level.as_str(),
        target,
        message
    )
}

/// Log a trace message.
#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::log($crate::Level::Trace, $target, &format!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::log($crate::Level::Trace, module_path!(), &format!($($arg)+))
    };
}

/// Log a debug message.
///
/// Enabled by `TIDINGS_DEBUG=1` or `TIDINGS_LOG_LEVEL=debug`.
///
/// ```rust
/// use tidings_log::debug;
///
/// let customer = "123";
/// debug!("Loaded customer {}", customer);
/// debug!(target: "tidings::repository", "Cache miss for {}", customer);
/// ```
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::log($crate::Level::Debug, $target, &format!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::log($crate::Level::Debug, module_path!(), &format!($($arg)+))
    };
}

/// Log an info message.
#[macro_export]
macro_rules! info {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::log($crate::Level::Info, $target, &format!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::log($crate::Level::Info, module_path!(), &format!($($arg)+))
    };
}

/// Log a warning message.
#[macro_export]
macro_rules! warn {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::log($crate::Level::Warn, $target, &format!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::log($crate::Level::Warn, module_path!(), &format!($($arg)+))
    };
}

/// Log an error message.
#[macro_export]
macro_rules! error {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::log($crate::Level::Error, $target, &format!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::log($crate::Level::Error, module_path!(), &format!($($arg)+))
    };
}

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! Bridge to `tracing`, so dispatcher spans and events honour
    //! `TIDINGS_LOG_LEVEL`.

    use super::*;

    /// Build a subscriber filtered by the current Tidings level.
    ///
    /// `RUST_LOG` takes precedence when set.
    pub fn subscriber() -> impl tracing::Subscriber + Send + Sync {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let config = config();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(current_level().as_str().to_lowercase()));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(config.color))
    }

    /// Install [`subscriber`] as the global default.
    ///
    /// Returns `false` if another subscriber was installed first.
    pub fn install() -> bool {
        tracing::subscriber::set_global_default(subscriber()).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Error < Level::Off);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("debug".parse::<Level>(), Ok(Level::Debug));
        assert_eq!("WARNING".parse::<Level>(), Ok(Level::Warn));
        assert_eq!(
            "loud".parse::<Level>(),
            Err(UnknownValue("loud".to_string()))
        );
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("json".parse::<Format>(), Ok(Format::Json));
        assert_eq!("Compact".parse::<Format>(), Ok(Format::Compact));
        assert!("xml".parse::<Format>().is_err());
    }

    #[test]
    fn test_config_from_lookup() {
        let config = LogConfig::from_lookup(lookup(&[
            ("TIDINGS_DEBUG", "1"),
            ("TIDINGS_LOG_FORMAT", "json"),
            ("TIDINGS_LOG_COLOR", "0"),
            ("TIDINGS_LOG_TIMESTAMPS", "false"),
        ]));

        assert!(config.debug);
        assert_eq!(config.level, Level::Debug);
        assert_eq!(config.format, Format::Json);
        assert!(!config.color);
        assert!(!config.timestamps);
        assert!(config.module_path);
    }

    #[test]
    fn test_explicit_level_wins_over_debug() {
        let config = LogConfig::from_lookup(lookup(&[
            ("TIDINGS_DEBUG", "true"),
            ("TIDINGS_LOG_LEVEL", "error"),
        ]));
        assert_eq!(config.level, Level::Error);
    }

    #[test]
    fn test_compact_line() {
        let config = LogConfig {
            timestamps: false,
            ..LogConfig::default()
        };
        assert_eq!(
            format_compact(Level::Warn, "tidings::customer", "moved", &config),
            "W tidings::customer: moved"
        );
    }

    #[test]
    fn test_pretty_line_without_target() {
        let config = LogConfig {
            timestamps: false,
            module_path: false,
            ..LogConfig::default()
        };
        assert_eq!(
            format_pretty(Level::Info, "ignored", "hello", &config),
            "INFO  hello"
        );
    }

    #[test]
    fn test_json_line_escapes_message() {
        let line = format_json(Level::Error, "t", "say \"hi\"");
        assert!(line.contains(r#""level":"ERROR""#));
        assert!(line.contains(r#"say \"hi\""#));
    }

    #[test]
    fn test_off_is_never_enabled() {
        assert!(!is_level_enabled(Level::Off));
    }

    #[test]
    fn test_explicit_level_gates_debug_lines() {
        let config = LogConfig::from_lookup(lookup(&[
            ("TIDINGS_DEBUG", "1"),
            ("TIDINGS_LOG_LEVEL", "error"),
        ]));

        assert!(config.debug);
        assert!(!passes(Level::Debug, config.level));
        assert!(passes(Level::Error, config.level));
    }

    #[test]
    fn test_set_level_survives_first_log_line() {
        set_level(Level::Error);
        info!("first line after lowering verbosity");

        assert_eq!(current_level(), Level::Error);
        assert!(!is_level_enabled(Level::Info));
        assert!(is_level_enabled(Level::Error));
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn test_tracing_subscriber_builds() {
        let subscriber = tracing_compat::subscriber();
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("routed through the tidings filter");
        });
    }

    #[test]
    fn test_macros_expand() {
        trace!("trace message");
        debug!("debug message");
        info!("info message");
        warn!(target: "test", "with target {}", 1);
        error!(target: "test", "with target");
    }
}
