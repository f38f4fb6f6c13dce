use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use trellis::Direction;
use trellis_pipeline::{load_document, parse_document};

#[derive(Parser, Debug)]
#[command(author, version, about = "Lay out a JSON node tree", long_about = None)]
struct Cli {
    /// Path to the layout document
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Available width, overriding the document
    #[arg(long)]
    width: Option<f32>,

    /// Available height, overriding the document
    #[arg(long)]
    height: Option<f32>,

    /// Layout direction, overriding the document
    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,

    /// Pixel density used for rounding; 0 disables rounding
    #[arg(long)]
    scale: Option<f32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum DirectionArg {
    Ltr,
    Rtl,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Ltr => Direction::Ltr,
            DirectionArg::Rtl => Direction::Rtl,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum OutputFormat {
    /// Nested `LayoutResult` JSON
    Json,
    /// HTML-like debug dump with styles
    Tree,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

fn init_logging(level: LogLevel, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.to_string().parse()?)
        .from_env_lossy();

    // Logs go to stderr so stdout stays machine readable.
    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => subscriber_builder.json().init(),
        LogFormat::Pretty => subscriber_builder.pretty().init(),
    }
    Ok(())
}

fn run(cli: Cli) -> Result<String> {
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let mut document = parse_document(&text)
        .with_context(|| format!("parsing {}", cli.input.display()))?;
    if let Some(scale) = cli.scale {
        document.point_scale_factor = Some(scale);
    }

    let mut loaded = load_document(&document)?;
    loaded.set_available(cli.width, cli.height, cli.direction.map(Direction::from));
    info!(input = ?cli.input, "computing layout");
    loaded.compute();

    match cli.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&loaded.export())?),
        OutputFormat::Tree => Ok(loaded.print()),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.log_level, cli.log_format) {
        eprintln!("Failed to initialise logging: {e:#}");
        std::process::exit(1);
    }

    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_document(json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("trellis-cli-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parses_flags() {
        let args = "trellis doc.json --width 320 --direction rtl --format tree --scale 2";
        let cli = Cli::try_parse_from(args.split(' ')).unwrap();
        assert_eq!(cli.width, Some(320.0));
        assert_eq!(cli.height, None);
        assert_eq!(cli.direction, Some(DirectionArg::Rtl));
        assert_eq!(cli.format, OutputFormat::Tree);
        assert_eq!(cli.scale, Some(2.0));
        assert_eq!(cli.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_run_outputs_json_and_tree() {
        let path = write_document(
            r#"{ "root": { "id": "root", "style": { "padding": { "all": 5 } },
                 "children": [ { "id": "child", "style": { "height": 10 } } ] } }"#,
        );

        let input = path.to_str().unwrap();
        let cli = Cli::try_parse_from(["trellis", input, "--width", "100"]).unwrap();
        let json = run(cli).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["width"], 100.0);
        assert_eq!(value["height"], 20.0);
        assert_eq!(value["children"][0]["left"], 5.0);
        assert_eq!(value["children"][0]["width"], 90.0);

        let cli = Cli::try_parse_from(["trellis", input, "--format", "tree"]).unwrap();
        let tree = run(cli).unwrap();
        assert!(tree.starts_with("<div layout="));

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_run_reports_missing_file() {
        let cli = Cli::try_parse_from(["trellis", "/nonexistent/trellis.json"]).unwrap();
        let message = format!("{:#}", run(cli).unwrap_err());
        assert!(message.contains("reading /nonexistent/trellis.json"));
    }
}
