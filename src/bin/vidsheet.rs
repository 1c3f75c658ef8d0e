use std::{io, path::PathBuf, sync::Arc};

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use vidsheet::{
    ErrorKind, FfmpegLogLevel, GridSpec, ProgressCallback, ProgressInfo, Quality, SheetError,
    SheetOptions, SheetReport,
};

const CLI_AFTER_HELP: &str = "Examples:\n  vidsheet movie.mp4\n  vidsheet movie.mp4 -q 9 -r 3:4 -o sheet.jpg\n  vidsheet movie.mkv --skip --progress\n  vidsheet --completions zsh > _vidsheet";

#[derive(Debug, Parser)]
#[command(
    name = "vidsheet",
    version,
    about = "Capture evenly-spaced, timestamped screenshots of a video into one contact sheet",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Input video path.
    #[arg(required_unless_present = "completions")]
    video: Option<PathBuf>,

    /// Output quality, 1 to 10.
    #[arg(short, long, default_value_t = 6, value_parser = parse_quality)]
    quality: u8,

    /// Grid layout as rows:cols; rows * cols may not exceed 40.
    #[arg(short, long, default_value = "4:5", value_parser = parse_ratio)]
    ratio: GridSpec,

    /// Skip the first and last 90 seconds of the video.
    #[arg(short, long)]
    skip: bool,

    /// Output image path; the extension selects the format.
    #[arg(short, long, default_value = SheetOptions::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// TrueType/OpenType font for the timestamp labels.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Allow overwriting an existing output file.
    #[arg(long)]
    overwrite: bool,

    /// Show a progress bar while frames are captured.
    #[arg(long)]
    progress: bool,

    /// Print a JSON report of the run to stdout.
    #[arg(long)]
    json: bool,

    /// Show additional logging output.
    #[arg(long)]
    verbose: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long, default_value = "error")]
    log_level: FfmpegLogLevel,

    /// Print a shell completion script and exit.
    #[arg(long, value_enum, exclusive = true)]
    completions: Option<Shell>,
}

fn parse_quality(value: &str) -> Result<u8, String> {
    let number: i64 = value
        .trim()
        .parse()
        .map_err(|_| format!("{value} is not a number"))?;
    Quality::new(number)
        .map(Quality::get)
        .map_err(|error| error.to_string())
}

fn parse_ratio(value: &str) -> Result<GridSpec, String> {
    value.parse::<GridSpec>().map_err(|error| error.to_string())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,vidsheet=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new(total: u64) -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(total);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.bar.set_position(info.current);
        self.bar
            .set_message(vidsheet::format_timestamp(info.timestamp));
        if info.current >= info.total {
            self.bar.finish_and_clear();
        }
    }
}

fn report_json(report: &SheetReport) -> serde_json::Value {
    json!({
        "output": report.output.display().to_string(),
        "width": report.width,
        "height": report.height,
        "grid": {
            "rows": report.grid.rows(),
            "cols": report.grid.cols(),
        },
        "timestamps": report.timestamps,
        "video": {
            "duration_seconds": report.metadata.duration_seconds,
            "width": report.metadata.width,
            "height": report.metadata.height,
            "fps": report.metadata.frames_per_second,
            "frame_count": report.metadata.frame_count,
            "codec": report.metadata.codec,
        },
    })
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "vidsheet", &mut io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose);
    vidsheet::set_ffmpeg_log_level(cli.log_level);

    let video = cli.video.ok_or("missing input video path")?;
    if cli.output.exists() {
        if !cli.overwrite {
            return Err(SheetError::OutputExists(cli.output).into());
        }
        eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            format!("overwriting {}", cli.output.display()).yellow()
        );
    }

    let mut options = SheetOptions::new()
        .with_quality(Quality::new(i64::from(cli.quality))?)
        .with_grid(cli.ratio)
        .with_skip_edges(cli.skip)
        .with_output(&cli.output);
    if let Some(font) = &cli.font {
        options = options.with_font(font);
    }
    if cli.progress {
        options = options.with_progress(Arc::new(TerminalProgress::new(u64::from(
            cli.ratio.cells(),
        ))?));
    }
    log::debug!("Options: {options:?}");

    let report = vidsheet::generate(&video, &options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else {
        println!(
            "{} {}",
            "saved".green().bold(),
            format!(
                "{} ({}x{}, {} frames)",
                report.output.display(),
                report.width,
                report.height,
                report.timestamps.len()
            )
            .green()
        );
    }
    Ok(())
}

fn main() {
    if let Err(error) = run(Cli::parse()) {
        let label = match error.downcast_ref::<SheetError>().map(SheetError::kind) {
            Some(ErrorKind::Configuration) => "configuration error:",
            Some(ErrorKind::ResourceUnavailable) => "resource unavailable:",
            Some(ErrorKind::Decode) => "decode error:",
            Some(ErrorKind::Output) | None => "error:",
        };
        eprintln!("{} {error}", label.red().bold());
        std::process::exit(1);
    }
}
