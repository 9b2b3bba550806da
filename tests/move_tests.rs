//! Move-to-file tests.

use reforge::engine::module_path_for;
use reforge::{Change, RefactoringEngine};

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_for(source: &str) -> RefactoringEngine {
        let mut engine = RefactoringEngine::default();
        assert!(engine.parse_source(source), "source should parse");
        engine
    }

    #[test]
    fn test_move_function_success() {
        let engine = engine_for("def helper():\n    return 42\n");

        let (result, new_file) = engine.move_to_file("helper", "utils.py");

        assert!(result.success, "move failed: {:?}", result.error);
        let new_file = new_file.expect("new file content");
        assert!(new_file.contains("def helper"));
        assert!(result.refactored_source.starts_with("from utils import helper"));
    }

    #[test]
    fn test_move_removes_definition_and_keeps_rest() {
        let source = "import os\n\ndef helper():\n    return 42\n\ndef main():\n    return helper()\n";
        let engine = engine_for(source);

        let (result, new_file) = engine.move_to_file("helper", "pkg/utils.py");

        assert!(result.success);
        assert_eq!(
            result.refactored_source,
            "from pkg.utils import helper\nimport os\n\n\ndef main():\n    return helper()\n"
        );
        assert_eq!(new_file.as_deref(), Some("def helper():\n    return 42\n"));
        assert_eq!(
            result.changes,
            vec![Change::MoveToFile {
                symbol: "helper".to_string(),
                target_file: "pkg/utils.py".to_string(),
                lines_moved: 2,
            }]
        );
        // Call sites are not rewritten
        assert!(result.refactored_source.contains("return helper()"));
    }

    #[test]
    fn test_move_class_with_methods() {
        let source = "class Greeter:\n    def hello(self):\n        return 'hi'\n\nx = Greeter()\n";
        let engine = engine_for(source);

        let (result, new_file) = engine.move_to_file("Greeter", "models.py");

        assert!(result.success);
        assert_eq!(
            new_file.as_deref(),
            Some("class Greeter:\n    def hello(self):\n        return 'hi'\n")
        );
        assert_eq!(
            result.refactored_source,
            "from models import Greeter\n\nx = Greeter()\n"
        );
    }

    #[test]
    fn test_move_takes_decorators_along() {
        let source = "@cache\ndef fib(n):\n    return n\n\nprint(fib(3))\n";
        let engine = engine_for(source);

        let (result, new_file) = engine.move_to_file("fib", "math_utils.py");

        assert!(result.success);
        assert_eq!(new_file.as_deref(), Some("@cache\ndef fib(n):\n    return n\n"));
        assert_eq!(
            result.refactored_source,
            "from math_utils import fib\n\nprint(fib(3))\n"
        );
    }

    #[test]
    fn test_move_picks_first_definition_in_document_order() {
        let source = "def dup():\n    return 1\n\ndef dup():\n    return 2\n";
        let engine = engine_for(source);

        let (result, new_file) = engine.move_to_file("dup", "d.py");
        assert!(result.success);
        assert_eq!(new_file.as_deref(), Some("def dup():\n    return 1\n"));
        assert!(result.refactored_source.contains("return 2"));
    }

    #[test]
    fn test_move_preserves_crlf_line_endings() {
        let engine = engine_for("def h():\r\n    return 1\r\nx = 2\r\n");

        let (result, new_file) = engine.move_to_file("h", "u.py");

        assert!(result.success);
        assert_eq!(result.refactored_source, "from u import h\r\nx = 2\r\n");
        assert_eq!(new_file.as_deref(), Some("def h():\r\n    return 1\r\n"));
    }

    #[test]
    fn test_move_missing_symbol_fails_without_payload() {
        let engine = engine_for("def helper():\n    return 42\n");

        let (result, new_file) = engine.move_to_file("missing", "utils.py");

        assert!(!result.success);
        assert!(new_file.is_none());
        assert!(result.refactored_source.is_empty());
        assert!(result.error.unwrap().contains("symbol not found"));
    }

    #[test]
    fn test_move_ignores_plain_variables() {
        let engine = engine_for("helper = 1\n");
        let (result, new_file) = engine.move_to_file("helper", "utils.py");
        assert!(!result.success);
        assert!(new_file.is_none());
    }

    #[test]
    fn test_module_path_derivation() {
        assert_eq!(module_path_for("utils.py"), "utils");
        assert_eq!(module_path_for("a/b/c.py"), "a.b.c");
        assert_eq!(module_path_for("a\\b.py"), "a.b");
    }
}
