use capiche_core::{
    parse_due_date, KeyValueStore, MemoryStore, ModelError, Priority, ProjectService,
    ServiceError, SidebarView, TaskEdit, DEFAULT_HOME_PROJECT_NAME, DEFAULT_STORAGE_KEY,
};
use chrono::NaiveDate;

fn day(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

#[test]
fn open_on_empty_store_then_seed_home() {
    let mut service = ProjectService::open(MemoryStore::new(), DEFAULT_STORAGE_KEY);
    assert!(service.projects().is_empty());

    let home_id = service.ensure_home_project().unwrap();
    let again = service.ensure_home_project().unwrap();

    assert_eq!(home_id, again);
    assert_eq!(service.projects().len(), 1);
    assert_eq!(service.projects()[0].name, DEFAULT_HOME_PROJECT_NAME);
}

#[test]
fn nothing_is_persisted_until_save() {
    let mut service = ProjectService::open(MemoryStore::new(), "k1");
    service.create_project("Garden", "").unwrap();
    assert_eq!(service.store().get_item("k1").unwrap(), None);

    service.save().unwrap();
    assert!(service.store().get_item("k1").unwrap().is_some());
}

#[test]
fn saved_state_reopens_from_same_store() {
    let mut service = ProjectService::open(MemoryStore::new(), "k1");
    let project_id = service.create_project("Garden", "spring").unwrap();
    let task_id = service
        .add_task(
            &project_id,
            "plant tulips",
            "by the fence",
            parse_due_date("2026-03-20").unwrap(),
            "high",
        )
        .unwrap();
    service.save().unwrap();

    let (store, _) = service.into_parts();
    let reopened = ProjectService::open(store, "k1");
    let project = reopened.project(&project_id).expect("project should reload");
    assert_eq!(project.name, "Garden");
    assert_eq!(project.todo_list.len(), 1);
    assert_eq!(project.todo_list[0].task_id, task_id);
    assert_eq!(project.todo_list[0].priority, Priority::High);
}

#[test]
fn add_task_uses_project_name_as_parent_reference() {
    let mut service = ProjectService::open(MemoryStore::new(), "k1");
    let project_id = service.create_project("Errands", "").unwrap();
    service
        .add_task(&project_id, "milk", "", parse_due_date("2026-01-02").unwrap(), "low")
        .unwrap();

    let project = service.project(&project_id).unwrap();
    assert_eq!(project.todo_list[0].parent_project, "Errands");
}

#[test]
fn add_task_rejects_invalid_priority() {
    let mut service = ProjectService::open(MemoryStore::new(), "k1");
    let project_id = service.create_project("Errands", "").unwrap();

    let err = service
        .add_task(&project_id, "milk", "", parse_due_date("2026-01-02").unwrap(), "urgent")
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Model(ModelError::InvalidPriority(ref value)) if value == "urgent"
    ));
    assert!(service.project(&project_id).unwrap().todo_list.is_empty());
}

#[test]
fn task_use_cases_report_missing_targets() {
    let mut service = ProjectService::open(MemoryStore::new(), "k1");
    let project_id = service.create_project("Errands", "").unwrap();

    assert!(matches!(
        service.toggle_task("nope", "t"),
        Err(ServiceError::ProjectNotFound(_))
    ));
    assert!(matches!(
        service.toggle_task(&project_id, "t"),
        Err(ServiceError::TaskNotFound { .. })
    ));
    assert!(matches!(
        service.edit_task(&project_id, "t", TaskEdit::new()),
        Err(ServiceError::TaskNotFound { .. })
    ));
    assert!(!service.delete_task(&project_id, "t").unwrap());
}

#[test]
fn edit_toggle_and_delete_task() {
    let mut service = ProjectService::open(MemoryStore::new(), "k1");
    let project_id = service.create_project("Errands", "").unwrap();
    let task_id = service
        .add_task(&project_id, "milk", "", parse_due_date("2026-01-02").unwrap(), "low")
        .unwrap();

    service
        .edit_task(&project_id, &task_id, TaskEdit::new().name("oat milk"))
        .unwrap();
    assert!(service.toggle_task(&project_id, &task_id).unwrap());

    let task = &service.project(&project_id).unwrap().todo_list[0];
    assert_eq!(task.name, "oat milk");
    assert!(task.completed);

    assert!(service.delete_task(&project_id, &task_id).unwrap());
    assert!(service.project(&project_id).unwrap().todo_list.is_empty());
}

#[test]
fn update_and_delete_project() {
    let mut service = ProjectService::open(MemoryStore::new(), "k1");
    let project_id = service.create_project("Errands", "").unwrap();

    service
        .update_project(&project_id, Some("Chores".to_string()), None)
        .unwrap();
    assert_eq!(service.project(&project_id).unwrap().name, "Chores");

    assert!(service.delete_project(&project_id));
    assert!(!service.delete_project(&project_id));
    assert!(matches!(
        service.update_project(&project_id, None, None),
        Err(ServiceError::ProjectNotFound(_))
    ));
}

#[test]
fn reload_discards_unsaved_changes() {
    let mut service = ProjectService::open(MemoryStore::new(), "k1");
    service.create_project("Saved", "").unwrap();
    service.save().unwrap();
    service.create_project("Unsaved", "").unwrap();

    assert_eq!(service.reload(), 1);
    assert_eq!(service.projects()[0].name, "Saved");
}

#[test]
fn tasks_for_view_filters_by_due_date() {
    let mut service = ProjectService::open(MemoryStore::new(), "k1");
    let project_id = service.create_project("Week", "").unwrap();
    // 2025-12-25 is a Thursday; its ISO week is 22..=28.
    for (name, due) in [
        ("today", "2025-12-25"),
        ("monday", "2025-12-22"),
        ("sunday", "2025-12-28"),
        ("next week", "2025-12-29"),
        ("last week", "2025-12-21"),
    ] {
        service
            .add_task(&project_id, name, "", parse_due_date(due).unwrap(), "medium")
            .unwrap();
    }
    let today = day("2025-12-25");

    let names = |view: SidebarView| -> Vec<String> {
        service
            .tasks_for_view(view, today)
            .into_iter()
            .map(|item| item.task.name)
            .collect()
    };

    assert_eq!(names(SidebarView::Home).len(), 5);
    assert_eq!(names(SidebarView::Today), ["today"]);
    assert_eq!(names(SidebarView::ThisWeek), ["today", "monday", "sunday"]);

    let listed = service.tasks_for_view(SidebarView::Today, today);
    assert_eq!(listed[0].project_id, project_id);
}

#[test]
fn tasks_for_view_handles_calendar_limits() {
    let mut service = ProjectService::open(MemoryStore::new(), "k1");
    let project_id = service.create_project("Edge", "").unwrap();
    service
        .add_task(&project_id, "soon", "", parse_due_date("2025-12-25").unwrap(), "low")
        .unwrap();

    for today in [NaiveDate::MIN, NaiveDate::MAX] {
        assert!(service.tasks_for_view(SidebarView::ThisWeek, today).is_empty());
        assert_eq!(service.tasks_for_view(SidebarView::Home, today).len(), 1);
    }
}
