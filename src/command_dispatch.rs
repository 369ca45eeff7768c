//! Purpose: Hold top-level CLI command dispatch for `examplecode`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: One value in, scalar envelope out; several values in, array envelope out.
//! Invariants: The opened file handle is dropped before the command returns.

use super::*;
use clap::CommandFactory;
use examplecode::api::{DEFAULT_FILE_NAME, Scalar, open_file_in};
use std::path::Path;

pub(super) fn dispatch_command(
    command: Command,
    dir: PathBuf,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Square { values } => {
            emit_json(apply("square", &values, Scalar::square)?, color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Cube { values } => {
            emit_json(apply("cube", &values, Scalar::cube)?, color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Open => {
            emit_json(open_report(&dir)?, color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "examplecode", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Version => {
            emit_version_output(color_mode);
            Ok(RunOutcome::ok())
        }
    }
}

fn apply(
    op: &str,
    values: &[String],
    f: fn(Scalar) -> Result<Scalar, Error>,
) -> Result<Value, Error> {
    let inputs = values
        .iter()
        .map(|text| Scalar::parse(text))
        .collect::<Result<Vec<_>, _>>()?;
    let results = inputs
        .iter()
        .map(|input| f(*input))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(op, count = inputs.len(), "applied");

    let value = match (inputs.as_slice(), results.as_slice()) {
        ([input], [result]) => json!({ "op": op, "input": input, "result": result }),
        _ => json!({ "op": op, "input": inputs, "result": results }),
    };
    Ok(value)
}

fn open_report(dir: &Path) -> Result<Value, Error> {
    let path = dir.join(DEFAULT_FILE_NAME);
    let file = open_file_in(dir).map_err(|err| Error::from_io(err, &path))?;
    let metadata = file.metadata().map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to read file metadata")
            .with_path(&path)
            .with_source(err)
    })?;
    tracing::info!(path = %path.display(), size = metadata.len(), "opened");
    Ok(json!({
        "path": path.display().to_string(),
        "size": metadata.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::{apply, open_report};
    use examplecode::api::{DEFAULT_FILE_NAME, ErrorKind, Scalar};
    use serde_json::json;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn single_value_yields_scalar_envelope() {
        let value = apply("square", &strings(&["-2"]), Scalar::square).expect("apply");
        assert_eq!(value, json!({"op": "square", "input": -2, "result": 4}));
    }

    #[test]
    fn several_values_yield_arrays() {
        let value = apply("cube", &strings(&["-2", "0", "1.5"]), Scalar::cube).expect("apply");
        assert_eq!(
            value,
            json!({"op": "cube", "input": [-2, 0, 1.5], "result": [-8, 0, 3.375]})
        );
    }

    #[test]
    fn bad_input_is_usage_error() {
        let err = apply("square", &strings(&["1", "two"]), Scalar::square).expect_err("usage");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn open_report_includes_size() {
        let temp = tempfile::tempdir().expect("tempdir");
        std::fs::write(temp.path().join(DEFAULT_FILE_NAME), b"12345").expect("write");
        let value = open_report(temp.path()).expect("open");
        assert_eq!(value["size"], 5);
        assert!(value["path"].as_str().expect("path").ends_with(DEFAULT_FILE_NAME));
    }

    #[test]
    fn open_report_missing_file_is_not_found() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = open_report(temp.path()).expect_err("missing");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.path(), Some(temp.path().join(DEFAULT_FILE_NAME).as_path()));
    }
}
