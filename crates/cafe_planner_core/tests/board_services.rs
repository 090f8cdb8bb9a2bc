use cafe_planner_core::db::open_db_in_memory;
use cafe_planner_core::time::{reference_day_start, DAY_MS};
use cafe_planner_core::{
    CategoryService, DragOutcome, DropTarget, NoteService, ServiceError, SqliteCategoryRepository,
    SqliteNoteRepository, SqliteTaskRepository, TaskEdit, TaskService, TaskStatus, Theme,
    TimeBlock,
};
use uuid::Uuid;

// 2024-03-10T13:53:20+08:00
const NOW_MS: i64 = 1_710_050_000_000;

#[test]
fn toggling_twice_restores_active_and_clears_completion() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());

    let created = service
        .create_task("wipe counters", Uuid::new_v4(), TimeBlock::Evening, NOW_MS)
        .unwrap();
    let completed = service.toggle_task(created.id, NOW_MS + 1).unwrap();
    assert_eq!(completed.status, TaskStatus::Completed);
    assert_eq!(completed.completed_at, Some(NOW_MS + 1));

    let reopened = service.toggle_task(created.id, NOW_MS + 2).unwrap();
    assert_eq!(reopened, created);
    assert_eq!(service.get_task(created.id).unwrap(), Some(created));
}

#[test]
fn board_hides_completions_from_previous_reference_days() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());
    let category = Uuid::new_v4();
    let day_start = reference_day_start(NOW_MS);

    let stale = service
        .create_task("yesterday", category, TimeBlock::Morning, 0)
        .unwrap();
    service.toggle_task(stale.id, day_start - 1).unwrap();
    let fresh = service
        .create_task("this morning", category, TimeBlock::Morning, 1)
        .unwrap();
    service.toggle_task(fresh.id, day_start).unwrap();
    service
        .create_task("still open", category, TimeBlock::Afternoon, 2)
        .unwrap();

    let board = service.board(NOW_MS).unwrap();
    let morning = &board.lane(TimeBlock::Morning).tasks;
    assert_eq!(morning.len(), 1);
    assert_eq!(morning[0].id, fresh.id);
    assert_eq!(board.visible_count(), 2);
    assert_eq!(board.completion_percentage, 50);

    let history = service.history(NOW_MS).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].tasks[0].id, stale.id);

    let tomorrow = service.board(NOW_MS + DAY_MS).unwrap();
    assert_eq!(tomorrow.visible_count(), 1);
}

#[test]
fn move_task_persists_lane_change_but_not_order() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());
    let category = Uuid::new_v4();
    let first = service
        .create_task("first", category, TimeBlock::Morning, 1)
        .unwrap();
    let second = service
        .create_task("second", category, TimeBlock::Morning, 2)
        .unwrap();

    let mut in_memory = service.list_tasks().unwrap();
    let outcome = service
        .move_task(&mut in_memory, first.id, DropTarget::Task(second.id))
        .unwrap();
    assert_eq!(
        outcome,
        DragOutcome::Reordered {
            from_index: 0,
            to_index: 1
        }
    );
    assert_eq!(in_memory[0].id, second.id);
    assert_eq!(service.list_tasks().unwrap()[0].id, first.id);

    let outcome = service
        .move_task(&mut in_memory, second.id, DropTarget::Lane(TimeBlock::Evening))
        .unwrap();
    assert_eq!(
        outcome,
        DragOutcome::LaneChanged {
            from: TimeBlock::Morning,
            to: TimeBlock::Evening
        }
    );
    let stored = service.get_task(second.id).unwrap().unwrap();
    assert_eq!(stored.time_block, TimeBlock::Evening);
    assert_eq!(stored.title, "second");

    let err = service
        .move_task(&mut in_memory, Uuid::new_v4(), DropTarget::Lane(TimeBlock::Morning))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Drag(_)));
}

#[test]
fn lane_change_keeps_newer_stored_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());
    let task = service
        .create_task("pull espresso", Uuid::new_v4(), TimeBlock::Morning, 1)
        .unwrap();

    let mut in_memory = service.list_tasks().unwrap();
    service.toggle_task(task.id, NOW_MS).unwrap();
    service
        .edit_task(
            task.id,
            &TaskEdit {
                title: Some("pull double espresso".to_string()),
                ..TaskEdit::default()
            },
        )
        .unwrap();

    service
        .move_task(&mut in_memory, task.id, DropTarget::Lane(TimeBlock::Evening))
        .unwrap();

    let stored = service.get_task(task.id).unwrap().unwrap();
    assert_eq!(stored.time_block, TimeBlock::Evening);
    assert_eq!(stored.status, TaskStatus::Completed);
    assert_eq!(stored.completed_at, Some(NOW_MS));
    assert_eq!(stored.title, "pull double espresso");
}

#[test]
fn edit_and_delete_report_missing_tasks() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());
    let missing = Uuid::new_v4();

    let err = service.edit_task(missing, &TaskEdit::default()).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { id, .. } if id == missing));
    let err = service.delete_task(missing).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));

    let task = service
        .create_task("label jars", missing, TimeBlock::Morning, 1)
        .unwrap();
    let edited = service
        .edit_task(
            task.id,
            &TaskEdit {
                title: Some("  label   spice jars ".to_string()),
                ..TaskEdit::default()
            },
        )
        .unwrap();
    assert_eq!(edited.title, "label spice jars");
    assert_eq!(edited.time_block, TimeBlock::Morning);

    let err = service
        .edit_task(
            task.id,
            &TaskEdit {
                title: Some(" ".to_string()),
                ..TaskEdit::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn default_categories_seed_only_once() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    let seeded = service.ensure_default_categories().unwrap();
    assert!(seeded > 0);
    assert_eq!(service.ensure_default_categories().unwrap(), 0);
    assert_eq!(service.list_categories().unwrap().len(), seeded);

    let custom = service
        .create_category("  Late   Night ", "🌙", Theme::Blueberry)
        .unwrap();
    assert_eq!(custom.label, "Late Night");
    let listed = service.list_categories().unwrap();
    assert_eq!(listed.last().unwrap().id, custom.id);

    let mut renamed = custom.clone();
    renamed.label = "Midnight".to_string();
    assert_eq!(service.update_category(&renamed).unwrap().label, "Midnight");

    service.delete_category(custom.id).unwrap();
    let err = service.update_category(&renamed).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[test]
fn notes_list_newest_first_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let older = service.create_note("restock cups", Theme::Latte, 1).unwrap();
    let newer = service.create_note("call supplier", Theme::Caramel, 2).unwrap();
    let listed = service.list_notes().unwrap();
    assert_eq!(listed, vec![newer.clone(), older.clone()]);

    service.delete_note(older.id).unwrap();
    assert_eq!(service.list_notes().unwrap(), vec![newer]);
    assert!(service.create_note("   ", Theme::Latte, 3).is_err());
}
