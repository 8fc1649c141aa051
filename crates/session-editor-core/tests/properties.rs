//! Property tests for the undo/redo state machine.
//!
//! Random Paste/Cut/Delete/Copy sequences interleaved with Undo/Redo, checked against the
//! history invariants:
//!
//! 1. Undo right after an edit restores the exact pre-edit buffer
//! 2. Redo right after an Undo restores the exact post-edit buffer
//! 3. A new edit after undos leaves no forward commands
//! 4. Copy never changes the buffer, the cursor or the history length
//! 5. The buffer always equals the text replayed from the history

use proptest::prelude::*;
use session_editor_core::{CommandKind, EditRequest, EngineError, Session, text::char_len};

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Edit {
        kind: CommandKind,
        start: usize,
        end: usize,
        text: String,
    },
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let edit_kind = prop_oneof![
        Just(CommandKind::Paste),
        Just(CommandKind::Paste),
        Just(CommandKind::Cut),
        Just(CommandKind::Delete),
        Just(CommandKind::Copy),
    ];
    prop_oneof![
        3 => (edit_kind, 0usize..64, 0usize..64, "[a-c\n日]{0,6}").prop_map(
            |(kind, start, end, text)| Op::Edit { kind, start, end, text }
        ),
        1 => Just(Op::Undo),
        1 => Just(Op::Redo),
    ]
}

/// Clamp raw offsets into the current buffer so most edits are valid.
fn request_for(op: &Op, len: usize) -> EditRequest {
    match op {
        Op::Edit {
            kind,
            start,
            end,
            text,
        } => {
            let clamp = |offset: usize| if len == 0 { 0 } else { offset % len };
            EditRequest::from_parts(*kind, clamp(*start), clamp(*end), text)
        }
        Op::Undo => EditRequest::Undo,
        Op::Redo => EditRequest::Redo,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_history_invariants(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut session = Session::new("prop").unwrap();

        for op in &ops {
            let before_text = session.text().to_string();
            let before_cursor = session.cursor_index();
            let before_len = session.history().len();
            let request = request_for(op, char_len(&before_text));
            let kind = request.kind();

            match session.dispatch(request) {
                Ok(_) => {}
                Err(EngineError::NoOperationToUndo) => {
                    prop_assert_eq!(before_cursor, -1);
                    continue;
                }
                Err(EngineError::NoOperationToRedo) => {
                    prop_assert_eq!(session.history().forward_count(), 0);
                    continue;
                }
                Err(EngineError::IndexOutOfRange { .. }) => {
                    prop_assert_eq!(session.history().len(), before_len);
                    prop_assert_eq!(session.text(), before_text.as_str());
                    continue;
                }
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }

            if kind == CommandKind::Copy {
                prop_assert_eq!(session.text(), before_text.as_str());
                prop_assert_eq!(session.cursor_index(), before_cursor);
                prop_assert_eq!(session.history().len(), before_len);
            }

            if kind.is_recorded() {
                prop_assert_eq!(session.history().forward_count(), 0);

                let after_text = session.text().to_string();
                let undone = session.dispatch(EditRequest::Undo).unwrap().to_string();
                prop_assert_eq!(&undone, &before_text);
                let redone = session.dispatch(EditRequest::Redo).unwrap().to_string();
                prop_assert_eq!(&redone, &after_text);
            }

            prop_assert_eq!(session.history().replayed_text(), session.text());
        }
    }
}
