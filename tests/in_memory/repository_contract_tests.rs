//! Repository port behaviour of the in-memory adapter.

use super::helpers::{repo, sample_task};
use rstest::rstest;
use taskmate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inserted_task_round_trips(repo: InMemoryTaskRepository) {
    let task = sample_task("Round trip").expect("valid task");

    repo.insert(&task).await.expect("insert");

    assert_eq!(repo.get(task.id()).await.expect("get"), Some(task.clone()));
    assert_eq!(repo.get_all().await.expect("get_all"), vec![task]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_identifier_is_rejected(repo: InMemoryTaskRepository) {
    let task = sample_task("Original").expect("valid task");
    repo.insert(&task).await.expect("first insert");

    let result = repo.insert(&task).await;

    assert!(matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_task_reads_as_none(repo: InMemoryTaskRepository) {
    assert_eq!(repo.get(TaskId::new()).await.expect("get"), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_the_stored_record(repo: InMemoryTaskRepository) {
    let task = sample_task("Before").expect("valid task");
    repo.insert(&task).await.expect("insert");
    let mut changed = task.clone();
    changed.complete(&mockable::DefaultClock);

    repo.update(&changed).await.expect("update");

    let stored = repo.get(task.id()).await.expect("get").expect("present");
    assert_eq!(stored.status(), TaskStatus::Completed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_of_missing_task_report_not_found(repo: InMemoryTaskRepository) {
    let ghost = sample_task("Ghost").expect("valid task");

    let updated = repo.update(&ghost).await;
    let deleted = repo.delete(ghost.id()).await;

    assert!(matches!(updated, Err(TaskRepositoryError::NotFound(id)) if id == ghost.id()));
    assert!(matches!(deleted, Err(TaskRepositoryError::NotFound(id)) if id == ghost.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clones_share_one_store(repo: InMemoryTaskRepository) {
    let other_handle = repo.clone();
    let task = sample_task("Shared").expect("valid task");

    repo.insert(&task).await.expect("insert");
    other_handle.delete(task.id()).await.expect("delete through clone");

    assert!(repo.get_all().await.expect("get_all").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_inserts_are_all_kept(repo: InMemoryTaskRepository) {
    let handles: Vec<_> = (0..16)
        .map(|index| {
            let store = repo.clone();
            tokio::spawn(async move {
                let task = sample_task(&format!("Task {index}")).expect("valid task");
                store.insert(&task).await.expect("insert");
            })
        })
        .collect();
    for handle in handles {
        handle.await.expect("insert task joins");
    }

    assert_eq!(repo.get_all().await.expect("get_all").len(), 16);
}
