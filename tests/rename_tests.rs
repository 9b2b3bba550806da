//! Rename-symbol tests.

use reforge::{Change, RefactoringEngine};

#[cfg(test)]
mod tests {
    use super::*;

    fn rename(source: &str, old: &str, new: &str) -> reforge::RefactoringResult {
        let mut engine = RefactoringEngine::default();
        assert!(engine.parse_source(source), "source should parse");
        engine.rename_symbol(old, new)
    }

    #[test]
    fn test_rename_round_trip() {
        let original = "x = 1\ny = x + 2\n";

        let forward = rename(original, "x", "value");
        assert!(forward.success);
        assert_eq!(forward.refactored_source, "value = 1\ny = value + 2\n");

        let back = rename(&forward.refactored_source, "value", "x");
        assert!(back.success);
        assert_eq!(back.refactored_source, original);
    }

    #[test]
    fn test_rename_respects_token_boundaries() {
        let result = rename("x = 1\nx_value = 2\n", "x", "num");
        assert!(result.success);
        assert_eq!(result.refactored_source, "num = 1\nx_value = 2\n");
        assert_eq!(result.changes.len(), 1);
    }

    #[test]
    fn test_rename_records_character_offsets() {
        let result = rename("x = 1\ny = x + 2\n", "x", "value");
        assert_eq!(
            result.changes,
            vec![
                Change::Rename {
                    old: "x".to_string(),
                    new: "value".to_string(),
                    position: 0,
                },
                Change::Rename {
                    old: "x".to_string(),
                    new: "value".to_string(),
                    position: 10,
                },
            ]
        );
    }

    #[test]
    fn test_rename_offsets_count_characters_not_bytes() {
        // 'é' is two bytes but one character
        let result = rename("é = 1\nx = 2\n", "x", "y");
        assert!(result.success);
        assert_eq!(result.refactored_source, "é = 1\ny = 2\n");
        match &result.changes[0] {
            Change::Rename { position, .. } => assert_eq!(*position, 6),
            other => panic!("unexpected change {:?}", other),
        }
    }

    #[test]
    fn test_rename_is_scope_unaware() {
        let source = "count = 0\ndef bump():\n    count = 1\n    return count\n";
        let result = rename(source, "count", "total");
        assert!(result.success);
        assert_eq!(
            result.refactored_source,
            "total = 0\ndef bump():\n    total = 1\n    return total\n"
        );
        assert_eq!(result.changes.len(), 4);
    }

    #[test]
    fn test_rename_absent_name_succeeds_without_changes() {
        let source = "a = 1\n";
        let result = rename(source, "missing", "present");
        assert!(result.success);
        assert!(result.changes.is_empty());
        assert_eq!(result.refactored_source, source);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_rename_rejects_keyword_target() {
        let result = rename("a = 1\n", "a", "class");
        assert!(!result.success);
        assert!(result.refactored_source.is_empty());
        assert!(result.error.unwrap().contains("class"));
    }

    #[test]
    fn test_rename_rejects_numeric_symbol_in_name() {
        let result = rename("a = 1\n", "a", "a²");
        assert!(!result.success);
        assert!(result.error.unwrap().contains("invalid identifier"));
    }

    #[test]
    fn test_rename_rejects_non_identifier_source_name() {
        let result = rename("a = 1\n", "a+", "b");
        assert!(!result.success);
    }
}
