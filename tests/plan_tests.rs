//! Multi-step plan tests.

use reforge::plan::{execute_plan, parse_plan, parse_plan_str, Plan, PlanStep};
use reforge::RefactoringEngine;
use std::fs;
use tempfile::TempDir;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let plan_path = temp_dir.path().join("plan.json");
        fs::write(
            &plan_path,
            r#"{
                "steps": [
                    {"op": "rename", "old_name": "x", "new_name": "count"},
                    {"op": "extract", "name": "setup", "start_line": 1, "end_line": 1},
                    {"op": "move", "symbol": "setup", "target_file": "init.py"}
                ]
            }"#,
        )
        .unwrap();

        let plan = parse_plan(&plan_path).unwrap();
        assert_eq!(plan.steps.len(), 3);
        match &plan.steps[1] {
            PlanStep::Extract { parameters, .. } => assert!(parameters.is_empty()),
            other => panic!("unexpected step {:?}", other),
        }
    }

    #[test]
    fn test_parse_plan_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = parse_plan(&temp_dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.kind(), "Io");
        assert!(err.file_path().is_some());
    }

    #[test]
    fn test_parse_plan_unknown_op() {
        let err = parse_plan_str(r#"{"steps": [{"op": "inline", "name": "f"}]}"#).unwrap_err();
        assert_eq!(err.kind(), "InvalidPlanSchema");
    }

    #[test]
    fn test_execute_plan_chains_steps() {
        let source = "x = 1\nprint(x)\n";
        let plan = parse_plan_str(
            r#"{"steps": [
                {"op": "rename", "old_name": "x", "new_name": "count"},
                {"op": "extract", "name": "setup", "start_line": 1, "end_line": 1},
                {"op": "move", "symbol": "setup", "target_file": "pkg/init.py"}
            ]}"#,
        )
        .unwrap();

        let mut engine = RefactoringEngine::default();
        let outcome = execute_plan(&mut engine, &plan, source).unwrap();

        assert_eq!(outcome.messages.len(), 3);
        assert_eq!(
            outcome.source,
            "from pkg.init import setup\nsetup()\nprint(count)\n"
        );
        assert_eq!(
            outcome.new_files.get("pkg/init.py").map(String::as_str),
            Some("def setup():\n    count = 1\n")
        );
    }

    #[test]
    fn test_execute_plan_stops_at_failing_step() {
        let plan = Plan {
            steps: vec![
                PlanStep::Rename {
                    old_name: "a".to_string(),
                    new_name: "b".to_string(),
                },
                PlanStep::Move {
                    symbol: "missing".to_string(),
                    target_file: "m.py".to_string(),
                },
                PlanStep::Rename {
                    old_name: "b".to_string(),
                    new_name: "c".to_string(),
                },
            ],
        };

        let mut engine = RefactoringEngine::default();
        let err = execute_plan(&mut engine, &plan, "a = 1\n").unwrap_err();

        assert_eq!(err.kind(), "PlanExecutionFailed");
        let message = err.to_string();
        assert!(message.contains("2"), "message: {}", message);
        assert!(message.contains("missing"), "message: {}", message);
    }

    #[test]
    fn test_execute_plan_rejects_unparsable_source() {
        let plan = parse_plan_str(r#"{"steps": [{"op": "rename", "old_name": "a", "new_name": "b"}]}"#)
            .unwrap();

        let mut engine = RefactoringEngine::default();
        let err = execute_plan(&mut engine, &plan, "def broken(:\n").unwrap_err();
        assert_eq!(err.kind(), "PlanExecutionFailed");
    }
}
