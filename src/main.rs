//! Purpose: `examplecode` CLI entry point.
//! Role: Binary crate root; parses args, runs one operation, emits JSON on stdout.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::error::Error as StdError;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use examplecode::api::{Error, ErrorKind, to_exit_code};
use serde_json::{Map, Value, json};

mod command_dispatch;
mod logging;
mod output;

use output::render_json;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    logging::init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint(clap_error_hint(&err)),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    tracing::debug!(command = ?cli.command, "dispatching");

    command_dispatch::dispatch_command(cli.command, cli.dir, color_mode)
        .map_err(add_io_hint)
        .map_err(add_internal_hint)
        .map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "examplecode",
    version,
    about = "Square numbers, cube numbers, and open the example file",
    after_help = r#"EXAMPLES
  $ examplecode square 3            # {"input":3,"op":"square","result":9}
  $ examplecode cube -2 1.5         # element-wise over several values
  $ examplecode --dir data open     # opens data/file read-only"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        default_value = ".",
        help = "Directory containing the example file",
        value_hint = ValueHint::DirPath
    )]
    dir: PathBuf,
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics and pretty JSON output: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

const VALUES_HELP: &str = "Integers or decimals; integers beyond i64 are read as decimals";

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Square each value")]
    Square {
        #[arg(required = true, allow_negative_numbers = true, help = VALUES_HELP)]
        values: Vec<String>,
    },
    #[command(about = "Cube each value")]
    Cube {
        #[arg(required = true, allow_negative_numbers = true, help = VALUES_HELP)]
        values: Vec<String>,
    },
    #[command(about = "Open the example file read-only and report its size")]
    Open,
    #[command(about = "Generate shell completions")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
    #[command(about = "Print version info")]
    Version,
}

fn add_io_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::NotFound => err.with_hint(
            "The example file does not exist. Create it or point --dir at the directory holding it.",
        ),
        ErrorKind::Permission => {
            err.with_hint("Permission denied. Check the file's read permissions.")
        }
        ErrorKind::Io => err.with_hint("I/O error. Check the path and filesystem."),
        _ => err,
    }
}

fn add_internal_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Internal || err.hint().is_some() {
        return err;
    }
    err.with_hint("Unexpected internal failure. Retry with RUST_LOG=debug for details.")
}

fn emit_json(value: Value, color_mode: ColorMode) {
    let is_tty = io::stdout().is_terminal();
    let use_color = color_mode.use_color(is_tty);
    println!("{}", render_json(&value, is_tty || use_color, use_color));
}

fn emit_version_output(color_mode: ColorMode) {
    if io::stdout().is_terminal() {
        println!("examplecode {}", env!("CARGO_PKG_VERSION"));
    } else {
        emit_json(
            json!({
                "name": "examplecode",
                "version": env!("CARGO_PKG_VERSION"),
            }),
            color_mode,
        );
    }
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }
    eprintln!("{}", render_json(&error_json(err), false, false));
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Permission => "permission denied".to_string(),
        ErrorKind::Overflow => "arithmetic overflow".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn colorize_label(label: &str, enabled: bool, code: &str) -> String {
    if !enabled {
        return label.to_string();
    }
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = vec![format!(
        "{} {}",
        colorize_label("error:", use_color, "31"),
        error_message(err)
    )];
    if let Some(hint) = err.hint() {
        lines.push(format!("{} {hint}", colorize_label("hint:", use_color, "33")));
    }
    if let Some(cause) = error_causes(err).first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, "33")
        ));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let mut lines = rendered.lines().map(str::trim).filter(|line| !line.is_empty());
    let Some(first) = lines.next() else {
        return "invalid arguments".to_string();
    };
    let summary = first.strip_prefix("error:").map(str::trim).unwrap_or(first);
    // clap lists the offending arguments on the line after a trailing colon.
    match lines.next() {
        Some(detail) if summary.ends_with(':') => format!("{summary} {detail}"),
        _ => summary.to_string(),
    }
}

fn clap_error_hint(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let subcommand = rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("Usage: "))
        .and_then(|usage| {
            usage
                .split_whitespace()
                .skip_while(|token| *token != "examplecode")
                .skip(1)
                .find(|token| !token.starts_with(['-', '<', '[']))
        });
    match subcommand {
        Some(name) => format!("Try `examplecode {name} --help`."),
        None => "Try `examplecode --help`.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, clap_error_summary, error_json, error_text};
    use clap::Parser;
    use examplecode::api::{Error, ErrorKind};
    use std::io;
    use std::path::Path;

    #[test]
    fn error_text_respects_color_flag() {
        let err = Error::new(ErrorKind::Usage).with_message("bad input");
        let colored = error_text(&err, true);
        let plain = error_text(&err, false);
        assert!(colored.contains("\u{1b}[31merror:\u{1b}[0m"));
        assert!(plain.contains("error: bad input"));
        assert!(!plain.contains("\u{1b}["));
    }

    #[test]
    fn error_json_carries_kind_path_and_causes() {
        let err = Error::from_io(io::Error::from(io::ErrorKind::NotFound), Path::new("d/file"));
        let value = error_json(&err);
        let inner = value.get("error").expect("error object");
        assert_eq!(inner["kind"], "NotFound");
        assert_eq!(inner["path"], "d/file");
        assert_eq!(inner["causes"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn negative_values_parse_as_positionals() {
        let cli = Cli::try_parse_from(["examplecode", "cube", "-2", "3"]).expect("parse");
        match cli.command {
            super::Command::Cube { values } => assert_eq!(values, vec!["-2", "3"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn square_requires_a_value() {
        assert!(Cli::try_parse_from(["examplecode", "square"]).is_err());
    }

    #[test]
    fn missing_argument_summary_names_the_argument() {
        let err = Cli::try_parse_from(["examplecode", "square"])
            .err()
            .expect("missing value");
        let summary = clap_error_summary(&err);
        assert!(summary.starts_with("the following required arguments were not provided:"));
        assert!(summary.contains("<VALUES>"), "summary: {summary}");
    }

    #[test]
    fn unknown_subcommand_summary_is_single_line() {
        let err = Cli::try_parse_from(["examplecode", "triple"])
            .err()
            .expect("unknown subcommand");
        let summary = clap_error_summary(&err);
        assert!(summary.contains("triple"), "summary: {summary}");
        assert!(!summary.contains('\n'));
    }
}
