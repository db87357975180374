// tests/batch_tests.rs
use jumpstack::jump::batch::{BatchCommand, CommandBatch};
use jumpstack::jump::manager::JumpStack;
use jumpstack::surface::memory::MemorySurface;
use jumpstack::surface::{CommandArg, Cursor, EditorSurface, Pane};

fn jump_stack_at(line: u32) -> JumpStack<MemorySurface> {
    let mut surface = MemorySurface::new();
    surface.add_document(
        "a.txt",
        (0..50).map(|n| format!("line {n}\n")).collect::<String>(),
    );
    surface.open("a.txt", Pane::Column(1)).unwrap();
    surface.move_cursor(Cursor::new(line, 0)).unwrap();
    JumpStack::new(surface)
}

fn name(command: &str) -> BatchCommand {
    BatchCommand::Name(command.to_string())
}

fn reveal(line: u32) -> BatchCommand {
    BatchCommand::WithArgs {
        command: "revealLine".to_string(),
        args: vec![CommandArg::new("lineNumber", line.to_string())],
    }
}

fn executed(jumps: &JumpStack<MemorySurface>) -> Vec<String> {
    jumps
        .surface()
        .executed_commands()
        .iter()
        .map(|c| c.command.clone())
        .collect()
}

#[tokio::test]
async fn test_absent_batch_is_plain_push() {
    let mut plain = jump_stack_at(5);
    plain.push_position().unwrap();

    let mut absent = jump_stack_at(5);
    absent.push_position_do_commands(None).await.unwrap();

    let mut no_commands = jump_stack_at(5);
    let batch = CommandBatch::default().checking_position(true);
    no_commands
        .push_position_do_commands(Some(&batch))
        .await
        .unwrap();

    let expected: Vec<_> = plain.positions().cloned().collect();
    assert_eq!(absent.positions().cloned().collect::<Vec<_>>(), expected);
    assert_eq!(no_commands.positions().cloned().collect::<Vec<_>>(), expected);
    assert!(executed(&no_commands).is_empty());
}

#[tokio::test]
async fn test_commands_run_in_order() {
    let mut jumps = jump_stack_at(5);
    let batch = CommandBatch::new(vec![
        name("cursorTop"),
        BatchCommand::WithArgs {
            command: "cursorMove".to_string(),
            args: vec![CommandArg::new("to", "down"), CommandArg::new("value", "3")],
        },
        name("cursorDown"),
    ]);
    jumps.push_position_do_commands(Some(&batch)).await.unwrap();

    assert_eq!(executed(&jumps), vec!["cursorTop", "cursorMove", "cursorDown"]);
    assert_eq!(jumps.surface().cursor(), Some(Cursor::new(4, 0)));
    assert_eq!(jumps.len(), 1);
    assert_eq!(jumps.peek().unwrap().cursor, Cursor::new(5, 0));
}

#[tokio::test]
async fn test_check_position_drops_push_when_cursor_did_not_move() {
    let mut jumps = jump_stack_at(2);
    jumps.push_position().unwrap();
    jumps.surface_mut().move_cursor(Cursor::new(5, 0)).unwrap();

    let batch = CommandBatch::new(vec![reveal(30)]).checking_position(true);
    jumps.push_position_do_commands(Some(&batch)).await.unwrap();

    assert_eq!(jumps.len(), 1);
    assert_eq!(jumps.peek().unwrap().cursor, Cursor::new(2, 0));
    // The cursor stays where it was
    assert_eq!(jumps.surface().cursor(), Some(Cursor::new(5, 0)));
}

#[tokio::test]
async fn test_check_position_keeps_push_when_cursor_moved() {
    let mut jumps = jump_stack_at(5);
    let batch = CommandBatch::new(vec![name("cursorDown")]).checking_position(true);
    jumps.push_position_do_commands(Some(&batch)).await.unwrap();

    assert_eq!(jumps.len(), 1);
    assert_eq!(jumps.peek().unwrap().cursor, Cursor::new(5, 0));
}

#[tokio::test]
async fn test_without_check_position_no_op_batch_keeps_push() {
    let mut jumps = jump_stack_at(5);
    let batch = CommandBatch::new(vec![name("noop")]);
    jumps.push_position_do_commands(Some(&batch)).await.unwrap();
    assert_eq!(jumps.len(), 1);
}

#[tokio::test]
async fn test_collapsed_push_is_not_checked() {
    let mut jumps = jump_stack_at(5);
    jumps.push_position().unwrap();

    // Same spot: the push collapses, so the check must not pop the older entry
    let batch = CommandBatch::new(vec![name("noop")]).checking_position(true);
    jumps.push_position_do_commands(Some(&batch)).await.unwrap();

    assert_eq!(jumps.len(), 1);
    assert!(!jumps.has_pushed());
}

#[tokio::test]
async fn test_failing_command_aborts_batch_and_skips_check() {
    let mut jumps = jump_stack_at(5);
    let batch = CommandBatch::new(vec![name("noop"), name("noSuchCommand"), name("cursorDown")])
        .checking_position(true);

    let err = jumps
        .push_position_do_commands(Some(&batch))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("noSuchCommand"));
    assert_eq!(executed(&jumps), vec!["noop", "noSuchCommand"]);
    // Cursor never moved, but the check was skipped so the entry stays
    assert_eq!(jumps.len(), 1);
    assert_eq!(jumps.surface().cursor(), Some(Cursor::new(5, 0)));
}

#[tokio::test]
async fn test_check_position_default() {
    let surface = jump_stack_at(5).into_surface();
    let mut jumps = JumpStack::new(surface).check_position_by_default(true);

    let batch = CommandBatch::new(vec![name("noop")]);
    jumps.push_position_do_commands(Some(&batch)).await.unwrap();
    assert!(jumps.is_empty());

    // An explicit flag wins over the default
    let batch = CommandBatch::new(vec![name("noop")]).checking_position(false);
    jumps.push_position_do_commands(Some(&batch)).await.unwrap();
    assert_eq!(jumps.len(), 1);
}

#[tokio::test]
async fn test_batch_without_editor_still_runs_commands() {
    let mut jumps = JumpStack::new(MemorySurface::new());
    let batch = CommandBatch::new(vec![name("noop")]).checking_position(true);
    jumps.push_position_do_commands(Some(&batch)).await.unwrap();

    assert!(jumps.is_empty());
    assert_eq!(executed(&jumps), vec!["noop"]);
    assert!(jumps.surface().active_editor().is_none());
}
