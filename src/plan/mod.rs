//! JSON plan format for sequential multi-step refactorings.
//!
//! A plan applies its steps one after another to a single in-memory
//! buffer, re-parsing before every step.

use crate::engine::RefactoringEngine;
use crate::error::{RefactorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A refactoring plan containing multiple sequential steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Steps to execute, in order.
    pub steps: Vec<PlanStep>,
}

/// A single plan step. Each step is equivalent to one CLI invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PlanStep {
    /// Extract a line range into a function.
    Extract {
        /// Name of the new function.
        name: String,
        /// First line (1-based).
        start_line: i64,
        /// Last line (1-based, inclusive).
        end_line: i64,
        /// Parameters of the new function.
        #[serde(default)]
        parameters: Vec<String>,
    },
    /// Rename a symbol.
    Rename {
        /// Current name.
        old_name: String,
        /// Replacement name.
        new_name: String,
    },
    /// Move a definition to another file.
    Move {
        /// Function or class to move.
        symbol: String,
        /// File receiving the definition.
        target_file: String,
    },
}

/// Outcome of a fully executed plan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanOutcome {
    /// Source after the last step.
    pub source: String,
    /// One message per executed step.
    pub messages: Vec<String>,
    /// Moved code, keyed by target file, in move order.
    pub new_files: BTreeMap<String, String>,
}

/// Parse a plan from a JSON file.
pub fn parse_plan(plan_path: &Path) -> Result<Plan> {
    let content = fs::read_to_string(plan_path).map_err(|e| RefactorError::Io {
        path: plan_path.to_path_buf(),
        source: e,
    })?;
    parse_plan_str(&content)
}

/// Parse and validate a plan from JSON text.
pub fn parse_plan_str(content: &str) -> Result<Plan> {
    let plan: Plan = serde_json::from_str(content).map_err(|e| RefactorError::InvalidPlanSchema {
        message: format!("JSON parse error: {}", e),
    })?;
    validate_plan(&plan)?;
    Ok(plan)
}

/// Reject empty plans and steps with empty names.
pub fn validate_plan(plan: &Plan) -> Result<()> {
    if plan.steps.is_empty() {
        return Err(RefactorError::InvalidPlanSchema {
            message: "Plan must contain at least one step".to_string(),
        });
    }

    for (i, step) in plan.steps.iter().enumerate() {
        let empty_field = match step {
            PlanStep::Extract { name, .. } if name.is_empty() => Some("name"),
            PlanStep::Rename { old_name, .. } if old_name.is_empty() => Some("old_name"),
            PlanStep::Rename { new_name, .. } if new_name.is_empty() => Some("new_name"),
            PlanStep::Move { symbol, .. } if symbol.is_empty() => Some("symbol"),
            PlanStep::Move { target_file, .. } if target_file.is_empty() => Some("target_file"),
            _ => None,
        };
        if let Some(field) = empty_field {
            return Err(RefactorError::InvalidPlanSchema {
                message: format!("Step {} has empty '{}' field", i + 1, field),
            });
        }
    }

    Ok(())
}

/// Execute every step of `plan` against `source`.
///
/// Stops at the first failing step. Nothing is written to disk.
pub fn execute_plan(engine: &mut RefactoringEngine, plan: &Plan, source: &str) -> Result<PlanOutcome> {
    let mut outcome = PlanOutcome {
        source: source.to_string(),
        ..PlanOutcome::default()
    };

    for (step_num, step) in plan.steps.iter().enumerate() {
        let step_index = step_num + 1;
        let message = execute_single_step(engine, step, &mut outcome).map_err(|e| {
            RefactorError::PlanExecutionFailed {
                step: step_index,
                error: e.to_string(),
            }
        })?;
        log::info!("Step {}: {}", step_index, message);
        outcome.messages.push(message);
    }

    Ok(outcome)
}

fn execute_single_step(
    engine: &mut RefactoringEngine,
    step: &PlanStep,
    outcome: &mut PlanOutcome,
) -> Result<String> {
    engine.try_parse(&outcome.source)?;

    let (operation, result, message) = match step {
        PlanStep::Extract {
            name,
            start_line,
            end_line,
            parameters,
        } => {
            let result = engine.extract_function(name, *start_line, *end_line, parameters.as_slice());
            let message = format!("Extracted lines {}..={} into '{}'", start_line, end_line, name);
            ("extract_function", result, message)
        }
        PlanStep::Rename { old_name, new_name } => {
            let result = engine.rename_symbol(old_name, new_name);
            let message = format!(
                "Renamed '{}' to '{}' ({} occurrence(s))",
                old_name,
                new_name,
                result.changes.len()
            );
            ("rename_symbol", result, message)
        }
        PlanStep::Move {
            symbol,
            target_file,
        } => {
            let (result, new_file) = engine.move_to_file(symbol, target_file);
            if let Some(content) = new_file {
                let entry = outcome.new_files.entry(target_file.clone()).or_default();
                if !entry.is_empty() {
                    entry.push('\n');
                }
                entry.push_str(&content);
            }
            let message = format!("Moved '{}' to {}", symbol, target_file);
            ("move_to_file", result, message)
        }
    };

    if !result.success {
        return Err(RefactorError::OperationFailed {
            operation: operation.to_string(),
            message: result.error.unwrap_or_default(),
        });
    }

    outcome.source = result.refactored_source;
    Ok(message)
}
