//! Availability query tests.

use reforge::config::EngineConfig;
use reforge::{RefactoringEngine, RefactoringKind};

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_symbols(engine: &RefactoringEngine, line: usize, col: usize) -> Vec<(RefactoringKind, Option<String>)> {
        engine
            .get_available_refactorings(line, col)
            .expect("engine is parsed")
            .into_iter()
            .map(|r| (r.kind, r.symbol))
            .collect()
    }

    #[test]
    fn test_position_inside_function() {
        let mut engine = RefactoringEngine::default();
        assert!(engine.parse_source("def foo():\n    return 1\n"));

        assert_eq!(
            kinds_and_symbols(&engine, 1, 5),
            vec![
                (RefactoringKind::ExtractFunction, Some("foo".to_string())),
                (RefactoringKind::MoveToFile, Some("foo".to_string())),
                (RefactoringKind::RenameSymbol, None),
            ]
        );
    }

    #[test]
    fn test_position_outside_definitions_offers_only_rename() {
        let mut engine = RefactoringEngine::default();
        assert!(engine.parse_source("def foo():\n    return 1\n\nx = 1\n"));

        assert_eq!(
            kinds_and_symbols(&engine, 4, 0),
            vec![(RefactoringKind::RenameSymbol, None)]
        );
    }

    #[test]
    fn test_nested_definitions_in_walk_order() {
        let mut engine = RefactoringEngine::default();
        assert!(engine.parse_source("class A:\n    def m(self):\n        pass\n"));

        let offered = kinds_and_symbols(&engine, 3, 4);
        let symbols: Vec<Option<&str>> = offered.iter().map(|(_, s)| s.as_deref()).collect();
        assert_eq!(symbols, vec![Some("A"), Some("A"), Some("m"), Some("m"), None]);
    }

    #[test]
    fn test_column_slack_tolerates_trailing_characters() {
        // foo spans (1,0)..(2,12); columns up to 12 + slack still match
        let mut engine = RefactoringEngine::default();
        assert!(engine.parse_source("def foo():\n    return 1\n"));

        assert_eq!(kinds_and_symbols(&engine, 2, 22).len(), 3);
        assert_eq!(kinds_and_symbols(&engine, 2, 23).len(), 1);

        let mut strict = RefactoringEngine::new(EngineConfig::default().with_availability_slack(0));
        assert!(strict.parse_source("def foo():\n    return 1\n"));
        assert_eq!(kinds_and_symbols(&strict, 2, 12).len(), 3);
        assert_eq!(kinds_and_symbols(&strict, 2, 13).len(), 1);
    }

    #[test]
    fn test_huge_slack_does_not_overflow() {
        let mut engine =
            RefactoringEngine::new(EngineConfig::default().with_availability_slack(usize::MAX));
        assert!(engine.parse_source("def foo():\n    return 1\n"));

        assert_eq!(kinds_and_symbols(&engine, 1, 5).len(), 3);
        assert_eq!(kinds_and_symbols(&engine, 2, usize::MAX).len(), 3);
        assert_eq!(kinds_and_symbols(&engine, 3, 0).len(), 1);
    }

    #[test]
    fn test_rename_always_offered() {
        let sources = ["", "x = 1\n", "def f():\n    pass\n", "class C:\n    pass\n"];
        for source in sources {
            let mut engine = RefactoringEngine::default();
            assert!(engine.parse_source(source));
            for (line, col) in [(0, 0), (1, 0), (1, 100), (99, 99)] {
                let offered = engine.get_available_refactorings(line, col).unwrap();
                let renames = offered
                    .iter()
                    .filter(|r| r.kind == RefactoringKind::RenameSymbol)
                    .count();
                assert_eq!(renames, 1);
                assert_eq!(offered.last().unwrap().kind, RefactoringKind::RenameSymbol);
            }
        }
    }
}
