// tests/host_tests.rs
use jumpstack::config::Config;
use jumpstack::host::{
    is_jump_stack_command, JumpStackExtension, COMMANDS, POP_POSITION, PUSH_POSITION,
    PUSH_POSITION_DO_COMMANDS,
};
use jumpstack::surface::memory::MemorySurface;
use jumpstack::surface::{ChangeEvent, ContentChange, Cursor, LineRange, Pane};
use serde_json::json;

fn surface() -> MemorySurface {
    let mut surface = MemorySurface::new();
    surface.add_document("a.txt", "a\nb\nc\nd\ne\nf\n");
    surface.open("a.txt", Pane::Column(1)).unwrap();
    surface
}

#[test]
fn test_command_ids() {
    assert_eq!(COMMANDS.len(), 3);
    assert!(is_jump_stack_command("extension.jump-stack.pushPosition"));
    assert!(is_jump_stack_command("extension.jump-stack.popPosition"));
    assert!(is_jump_stack_command("extension.jump-stack.pushPositionDoCommands"));
    assert!(!is_jump_stack_command("cursorDown"));
}

#[tokio::test]
async fn test_push_and_pop_commands() {
    let mut extension = JumpStackExtension::activate(surface(), &Config::default());

    extension.execute(PUSH_POSITION, None).await.unwrap();
    assert_eq!(extension.jump_stack().len(), 1);

    let surface = extension.jump_stack_mut().surface_mut();
    surface.move_cursor(Cursor::new(4, 0)).unwrap();

    extension.execute(POP_POSITION, None).await.unwrap();
    assert!(extension.jump_stack().is_empty());
    assert_eq!(extension.jump_stack().surface().cursor(), Some(Cursor::new(0, 0)));
}

#[tokio::test]
async fn test_batch_command_decodes_json() {
    let mut extension = JumpStackExtension::activate(surface(), &Config::default());
    let args = json!({
        "commands": [
            "cursorDown",
            { "command": "cursorMove", "args": [{ "key": "to", "val": "down" }, { "key": "value", "val": "2" }] }
        ],
        "checkPosition": true
    });

    extension
        .execute(PUSH_POSITION_DO_COMMANDS, Some(&args))
        .await
        .unwrap();

    let jump_stack = extension.jump_stack();
    assert_eq!(jump_stack.len(), 1);
    assert_eq!(jump_stack.surface().cursor(), Some(Cursor::new(3, 0)));
}

#[tokio::test]
async fn test_malformed_batch_degrades_to_push() {
    let mut extension = JumpStackExtension::activate(surface(), &Config::default());
    let args = json!({ "commands": "cursorDown", "checkPosition": true });

    extension
        .execute(PUSH_POSITION_DO_COMMANDS, Some(&args))
        .await
        .unwrap();

    let jump_stack = extension.jump_stack();
    assert_eq!(jump_stack.len(), 1);
    assert!(jump_stack.surface().executed_commands().is_empty());
}

#[tokio::test]
async fn test_unknown_command_is_an_error() {
    let mut extension = JumpStackExtension::activate(surface(), &Config::default());
    let err = extension
        .execute("extension.jump-stack.teleport", None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("teleport"));
}

#[tokio::test]
async fn test_configured_capacity_is_enforced() {
    let config = Config {
        capacity: Some(1),
        ..Config::default()
    };
    let mut extension = JumpStackExtension::activate(surface(), &config);

    extension.execute(PUSH_POSITION, None).await.unwrap();
    extension
        .jump_stack_mut()
        .surface_mut()
        .move_cursor(Cursor::new(2, 0))
        .unwrap();

    let err = extension.execute(PUSH_POSITION, None).await.unwrap_err();
    assert!(err.to_string().contains("max capacity"));
    assert_eq!(extension.jump_stack().len(), 1);
}

#[test]
fn test_change_notifications_are_forwarded() {
    let mut extension = JumpStackExtension::activate(surface(), &Config::default());
    extension
        .jump_stack_mut()
        .surface_mut()
        .move_cursor(Cursor::new(3, 0))
        .unwrap();
    extension.jump_stack_mut().push_position().unwrap();

    let event = ChangeEvent {
        path: "a.txt".to_string(),
        changes: vec![ContentChange::new(
            LineRange::new(Cursor::new(0, 0), Cursor::new(0, 0)),
            "x\n",
        )],
    };
    extension.on_did_change_text_document(&event);

    assert_eq!(extension.jump_stack().peek().unwrap().cursor.line, 4);
}

#[test]
fn test_deactivate_returns_surface() {
    let extension = JumpStackExtension::activate(surface(), &Config::default());
    let surface = extension.deactivate();
    assert_eq!(surface.cursor(), Some(Cursor::new(0, 0)));
}
