//! FFmpeg log level configuration.
//!
//! FFmpeg writes its own diagnostics straight to stderr, independently of
//! the Rust [`log`](https://crates.io/crates/log) facade. Seeking into the
//! middle of a stream routinely makes decoders complain about missing
//! references, so the CLI turns FFmpeg down to [`FfmpegLogLevel::Error`]
//! unless asked otherwise.
//!
//! # Example
//!
//! ```no_run
//! use vidsheet::FfmpegLogLevel;
//!
//! vidsheet::set_ffmpeg_log_level(FfmpegLogLevel::Quiet);
//! let level: FfmpegLogLevel = "warning".parse()?;
//! vidsheet::set_ffmpeg_log_level(level);
//! # Ok::<(), String>(())
//! ```

use std::str::FromStr;

use ffmpeg_next::util::log::Level;

/// FFmpeg internal log verbosity, from most quiet to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FfmpegLogLevel {
    /// Print nothing.
    Quiet,
    /// Only conditions that abort the process.
    Panic,
    /// Unrecoverable errors.
    Fatal,
    /// Recoverable errors.
    #[default]
    Error,
    /// Warnings (FFmpeg's own default).
    Warning,
    /// Informational messages.
    Info,
    /// Verbose informational messages.
    Verbose,
    /// Debugging messages.
    Debug,
    /// Everything.
    Trace,
}

impl FfmpegLogLevel {
    fn to_ffmpeg_level(self) -> Level {
        match self {
            FfmpegLogLevel::Quiet => Level::Quiet,
            FfmpegLogLevel::Panic => Level::Panic,
            FfmpegLogLevel::Fatal => Level::Fatal,
            FfmpegLogLevel::Error => Level::Error,
            FfmpegLogLevel::Warning => Level::Warning,
            FfmpegLogLevel::Info => Level::Info,
            FfmpegLogLevel::Verbose => Level::Verbose,
            FfmpegLogLevel::Debug => Level::Debug,
            FfmpegLogLevel::Trace => Level::Trace,
        }
    }
}

impl FromStr for FfmpegLogLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "quiet" => Ok(FfmpegLogLevel::Quiet),
            "panic" => Ok(FfmpegLogLevel::Panic),
            "fatal" => Ok(FfmpegLogLevel::Fatal),
            "error" => Ok(FfmpegLogLevel::Error),
            "warning" | "warn" => Ok(FfmpegLogLevel::Warning),
            "info" => Ok(FfmpegLogLevel::Info),
            "verbose" => Ok(FfmpegLogLevel::Verbose),
            "debug" => Ok(FfmpegLogLevel::Debug),
            "trace" => Ok(FfmpegLogLevel::Trace),
            other => Err(format!("unsupported FFmpeg log level: {other}")),
        }
    }
}

/// Set FFmpeg's own stderr verbosity. Does not affect `log` output.
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    ffmpeg_next::util::log::set_level(level.to_ffmpeg_level());
}
