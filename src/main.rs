//! Reforge CLI binary
//!
//! This is the main entry point for the reforge command-line interface.
//! The CLI is a thin adapter over the library; no refactoring logic lives here.

use reforge::cli::{CliErrorPayload, CliSuccessPayload, Commands};
use reforge::{RefactorError, RefactoringEngine, RefactoringResult};
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = reforge::cli::parse_args();

    // Initialize logger if verbose
    if cli.verbose {
        env_logger::init();
    }

    let result = cli
        .engine_config()
        .and_then(|config| execute(RefactoringEngine::new(config), cli.command));

    match result {
        Ok(payload) => match serde_json::to_string_pretty(&payload) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(1)
            }
        },
        Err(e) => {
            let payload = CliErrorPayload::from_error(&e);
            match serde_json::to_string_pretty(&payload) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("Error: {}", e),
            }
            ExitCode::from(1)
        }
    }
}

fn execute(mut engine: RefactoringEngine, command: Commands) -> Result<CliSuccessPayload, RefactorError> {
    match command {
        Commands::Extract {
            file,
            name,
            start,
            end,
            params,
            write,
        } => {
            load(&mut engine, &file)?;
            let result = engine.extract_function(&name, start, end, params.as_slice());
            finish("extract_function", &file, result, write, |r| {
                format!(
                    "Extracted lines {}..={} into '{}' ({} lines after rewrite)",
                    start,
                    end,
                    name,
                    r.refactored_source.lines().count()
                )
            })
        }

        Commands::Rename {
            file,
            from,
            to,
            write,
        } => {
            load(&mut engine, &file)?;
            let result = engine.rename_symbol(&from, &to);
            finish("rename_symbol", &file, result, write, |r| {
                format!("Renamed '{}' to '{}' ({} occurrence(s))", from, to, r.changes.len())
            })
        }

        Commands::Move {
            file,
            symbol,
            target,
            write,
        } => execute_move(&mut engine, &file, &symbol, &target, write),

        Commands::Available { file, line, col } => {
            load(&mut engine, &file)?;
            let refactorings = engine.get_available_refactorings(line, col)?;
            Ok(CliSuccessPayload::with_data(
                format!("{} refactoring(s) available at {}:{}", refactorings.len(), line, col),
                serde_json::to_value(&refactorings)?,
            ))
        }

        Commands::Symbols { file } => {
            load(&mut engine, &file)?;
            let analyzer = engine.analyzer().ok_or(RefactorError::NoSourceParsed)?;
            let definitions = engine.unit().map(|u| u.definitions()).unwrap_or_default();
            Ok(CliSuccessPayload::with_data(
                format!("{} name(s) defined", analyzer.definitions().len()),
                serde_json::json!({
                    "index": serde_json::to_value(analyzer)?,
                    "definitions": serde_json::to_value(&definitions)?,
                }),
            ))
        }

        Commands::Plan {
            file,
            source,
            write,
        } => execute_plan(&mut engine, &file, &source, write),
    }
}

/// Read and parse a source file into the engine.
fn load(engine: &mut RefactoringEngine, file: &Path) -> Result<(), RefactorError> {
    let source = read(file)?;
    engine.try_parse(&source)
}

fn read(file: &Path) -> Result<String, RefactorError> {
    std::fs::read_to_string(file).map_err(|e| RefactorError::Io {
        path: file.to_path_buf(),
        source: e,
    })
}

fn write(file: &Path, content: &str) -> Result<(), RefactorError> {
    std::fs::write(file, content).map_err(|e| RefactorError::Io {
        path: file.to_path_buf(),
        source: e,
    })
}

/// Append `content` to `file`, creating it when missing.
fn append(file: &Path, content: &str) -> Result<(), RefactorError> {
    let io_err = |e: std::io::Error| RefactorError::Io {
        path: file.to_path_buf(),
        source: e,
    };
    let needs_separator = std::fs::metadata(file).map(|m| m.len() > 0).unwrap_or(false);
    let mut handle = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .map_err(io_err)?;
    if needs_separator {
        handle.write_all(b"\n").map_err(io_err)?;
    }
    handle.write_all(content.as_bytes()).map_err(io_err)
}

/// Turn a result into a payload, writing the file when requested.
fn finish<F>(
    operation: &str,
    file: &Path,
    result: RefactoringResult,
    write_back: bool,
    message: F,
) -> Result<CliSuccessPayload, RefactorError>
where
    F: FnOnce(&RefactoringResult) -> String,
{
    if !result.success {
        return Err(RefactorError::OperationFailed {
            operation: operation.to_string(),
            message: result.error.unwrap_or_default(),
        });
    }

    if write_back {
        write(file, &result.refactored_source)?;
    }

    let message = message(&result);
    Ok(CliSuccessPayload::with_data(message, serde_json::to_value(&result)?))
}

fn execute_move(
    engine: &mut RefactoringEngine,
    file: &Path,
    symbol: &str,
    target: &str,
    write_back: bool,
) -> Result<CliSuccessPayload, RefactorError> {
    load(engine, file)?;
    let (result, new_file) = engine.move_to_file(symbol, target);

    if write_back {
        if let Some(content) = &new_file {
            let target_path = file.parent().unwrap_or(Path::new(".")).join(target);
            append(&target_path, content)?;
        }
    }

    let mut payload = finish("move_to_file", file, result, write_back, |_| {
        format!("Moved '{}' to {}", symbol, target)
    })?;
    if let Some(Value::Object(map)) = payload.data.as_mut() {
        map.insert("new_file".to_string(), serde_json::json!(new_file));
    }
    Ok(payload)
}

fn execute_plan(
    engine: &mut RefactoringEngine,
    plan_path: &Path,
    source_path: &Path,
    write_back: bool,
) -> Result<CliSuccessPayload, RefactorError> {
    let plan = reforge::plan::parse_plan(plan_path)?;
    let source = read(source_path)?;
    let outcome = reforge::plan::execute_plan(engine, &plan, &source)?;

    if write_back {
        write(source_path, &outcome.source)?;
        let base = source_path.parent().unwrap_or(Path::new("."));
        for (target, content) in &outcome.new_files {
            append(&base.join(target), content)?;
        }
    }

    Ok(CliSuccessPayload::with_data(
        format!("Plan executed successfully: {} steps completed", outcome.messages.len()),
        serde_json::to_value(&outcome)?,
    ))
}
