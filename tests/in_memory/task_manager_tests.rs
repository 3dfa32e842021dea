//! In-memory integration tests for task manager workflows.

use super::helpers::{TestManager, due_in, manager, titles, today};
use rstest::rstest;
use taskmate::task::{
    domain::{Priority, TaskStatus},
    services::{AddTaskRequest, DueDateFilter, SortOrder, TaskFilter, UpdateTaskRequest},
};

async fn seed(manager: &TestManager) {
    let requests = [
        AddTaskRequest::new("File taxes", "HIGH").with_due_date(due_in(-2)),
        AddTaskRequest::new("Book dentist", "LOW").with_due_date(due_in(3)),
        AddTaskRequest::new("Plan holiday", "MEDIUM").with_due_date(due_in(30)),
        AddTaskRequest::new("Read novel", "LOW"),
        AddTaskRequest::new("Renew passport", "HIGH")
            .with_due_date(due_in(0))
            .with_status("IN_PROGRESS"),
    ];
    for request in requests {
        manager.add_task(request).await.expect("seed task");
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_sorted_by_due_date_puts_undated_last(manager: TestManager) {
    seed(&manager).await;
    let order: SortOrder = "due_date_asc".parse().expect("preset");

    let listed = manager.list_tasks(Some(order)).await.expect("list");

    assert_eq!(
        titles(&listed),
        vec![
            "File taxes",
            "Renew passport",
            "Book dentist",
            "Plan holiday",
            "Read novel"
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filter_by_priority_and_due_window(manager: TestManager) {
    seed(&manager).await;

    let high_and_due_before_tomorrow = TaskFilter::new()
        .with_priority(Priority::High)
        .with_due_date(DueDateFilter::Before(
            today().succ_opt().expect("tomorrow exists"),
        ));
    let mut matching = manager
        .filter_tasks(&high_and_due_before_tomorrow)
        .await
        .expect("filter");
    matching.sort_by(|left, right| left.title().as_str().cmp(right.title().as_str()));

    assert_eq!(titles(&matching), vec!["File taxes", "Renew passport"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn statistics_classify_relative_due_dates(manager: TestManager) {
    seed(&manager).await;

    let stats = manager.statistics().await.expect("stats");

    assert_eq!(stats.total, 5);
    assert_eq!(stats.by_status.pending, 4);
    assert_eq!(stats.by_status.in_progress, 1);
    assert_eq!(stats.by_priority.high, 2);
    assert_eq!(stats.by_priority.low, 2);
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.due_soon, 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_overdue_task_clears_it_from_overdue(manager: TestManager) {
    seed(&manager).await;
    let overdue = manager
        .filter_tasks(&TaskFilter::new().with_due_date(DueDateFilter::Before(today())))
        .await
        .expect("filter");
    let [task] = overdue.as_slice() else {
        panic!("expected exactly one overdue task");
    };

    manager
        .complete_task(&task.id().short())
        .await
        .expect("complete");

    let stats = manager.statistics().await.expect("stats");
    assert_eq!(stats.overdue, 0);
    assert_eq!(stats.by_status.completed, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_through_short_identifiers(manager: TestManager) {
    let created = manager
        .add_task(AddTaskRequest::new("Write report", "HIGH").with_description("Q3 figures"))
        .await
        .expect("add");
    let short = created.id().short();

    let renamed = manager
        .update_task(
            &short,
            UpdateTaskRequest::new()
                .with_title("Write quarterly report")
                .with_status("in_progress"),
        )
        .await
        .expect("update");
    let shown = manager.get_task(&short).await.expect("show");
    let deleted = manager.delete_task(&short).await.expect("delete");
    let remaining = manager.list_tasks(None).await.expect("list");

    assert_eq!(renamed.title().as_str(), "Write quarterly report");
    assert_eq!(renamed.status(), TaskStatus::InProgress);
    assert_eq!(
        renamed.description().map(|text| text.as_str()),
        Some("Q3 figures")
    );
    assert_eq!(shown, renamed);
    assert_eq!(deleted, renamed);
    assert!(remaining.is_empty());
}
