use session_editor_core::{EditRequest, Engine, EngineError, Session, SessionRegistry};

#[test]
fn test_session_name_rules() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.create_session("a/b"),
        Err(EngineError::InvalidSessionName("a/b".to_string()))
    );

    let id = engine.create_session("notes").unwrap();
    assert_eq!(engine.session(id).unwrap().file_name(), "notes.txt");
    assert_eq!(
        engine.create_session("notes"),
        Err(EngineError::DuplicateSessionName("notes".to_string()))
    );
}

#[test]
fn test_sessions_are_isolated() {
    let mut engine = Engine::new();
    let a = engine.create_session("a").unwrap();
    let b = engine.create_session("b").unwrap();

    engine
        .dispatch(
            a,
            EditRequest::Paste {
                start: 0,
                end: 0,
                text: "alpha".to_string(),
            },
        )
        .unwrap();
    engine
        .dispatch(a, EditRequest::Copy { start: 0, end: 1 })
        .unwrap();

    assert_eq!(engine.session(b).unwrap().text(), "");
    assert!(engine.clipboard(b).unwrap().is_empty());
    assert!(!engine.can_undo(b).unwrap());
    assert_eq!(
        engine.dispatch(b, EditRequest::Undo),
        Err(EngineError::NoOperationToUndo)
    );
    assert_eq!(engine.clipboard(a).unwrap().last(), Some("al"));
}

#[test]
fn test_delete_session_frees_its_file_and_shifts_positions() {
    let mut engine = Engine::new();
    let a = engine.create_session("a").unwrap();
    let b = engine.create_session("b").unwrap();
    let c = engine.create_session("c").unwrap();

    assert_eq!(engine.delete_session(b).unwrap(), "b.txt");
    assert_eq!(engine.list_sessions(), ["a.txt", "c.txt"]);

    let registry = engine.registry();
    assert_eq!(registry.position_of(c), Some(1));
    assert_eq!(registry.first().map(|(id, _)| id), Some(a));
    assert_eq!(registry.last().map(|(id, _)| id), Some(c));

    // The name becomes available again.
    engine.create_session("b").unwrap();
    assert_eq!(engine.list_sessions(), ["a.txt", "c.txt", "b.txt"]);
}

#[test]
fn test_engine_over_loaded_registry() {
    let mut registry = SessionRegistry::new();
    let id = registry
        .insert(Session::with_text("loaded", "xyz").unwrap())
        .unwrap();

    let mut engine = Engine::with_registry(registry);
    assert_eq!(
        engine
            .dispatch(id, EditRequest::Delete { start: 0, end: 0 })
            .unwrap(),
        "yz"
    );

    let registry = engine.into_registry();
    assert_eq!(registry.get(id).map(Session::text), Some("yz"));
}
