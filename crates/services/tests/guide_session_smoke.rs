use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use lab_core::model::{Guide, SessionState, TaskId};
use lab_core::time::fixed_clock;
use services::{AppServices, HydrationSource, PersistOutcome, ProgressPersister};
use services::GuideSessionService;
use storage::repository::{
    InMemoryRepository, PROGRESS_KEY, ProgressRecord, ProgressRepository, Storage, StorageError,
};

fn scenario_guide() -> Arc<Guide> {
    let raw = r#"{"title": "Workshop", "sections": [
        {"id": "welcome", "title": "Welcome", "duration": "3 min",
         "content": [{"type": "text", "value": "<p>Hello</p>"}]},
        {"id": "basics", "title": "Basics", "duration": "5 min",
         "tasks": [{"id": "t1", "label": "Open settings"}, {"id": "t2", "label": "Pick a model"}]},
        {"id": "project", "title": "Project", "duration": "10 min",
         "tasks": [{"id": "t3", "label": "Clone"}]}
    ]}"#;
    Arc::new(Guide::from_json_str(raw).unwrap())
}

/// Store that can read but refuses every write.
struct ReadOnlyRepository {
    writes: AtomicUsize,
}

#[async_trait]
impl ProgressRepository for ReadOnlyRepository {
    async fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
        Ok(None)
    }

    async fn save_progress(&self, _record: &ProgressRecord) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Connection("quota exceeded".into()))
    }

    async fn clear_progress(&self) -> Result<(), StorageError> {
        Err(StorageError::Connection("quota exceeded".into()))
    }
}

#[tokio::test]
async fn three_section_scenario() {
    let repo = InMemoryRepository::new();
    let storage = Storage {
        progress: Arc::new(repo.clone()),
    };
    let services = AppServices::new(scenario_guide(), &storage, fixed_clock());
    let mut session = services.start_session().await;
    assert_eq!(session.current_section(), 0);
    assert!(session.state().completed_tasks.is_empty());

    session.toggle_task(&TaskId::new("t1")).await.unwrap();
    session.toggle_task(&TaskId::new("t2")).await.unwrap();
    let progress = session.section_progress(1).unwrap();
    assert_eq!((progress.completed, progress.total), (2, 2));
    assert!(session.is_section_complete(1));

    assert_eq!(session.next_section().await, 1);
    assert_eq!(session.next_section().await, 2);
    assert_eq!(session.next_section().await, 2);

    let stored = repo.load_progress().await.unwrap().unwrap().into_state();
    assert_eq!(&stored, session.state());
}

#[tokio::test]
async fn invalid_json_in_store_hydrates_defaults() {
    let repo = InMemoryRepository::new();
    repo.put_raw(PROGRESS_KEY, "{\"completedTasks\": {\"t1\": tru").unwrap();
    let persister = ProgressPersister::new(Arc::new(repo.clone()), fixed_clock());

    let mut session = GuideSessionService::hydrate(scenario_guide(), persister).await;
    assert_eq!(session.hydration_source(), HydrationSource::Discarded);
    assert_eq!(session.state(), &SessionState::default());

    // The next mutation replaces the broken blob.
    session.go_to_section(1).await;
    assert!(repo.load_progress().await.unwrap().is_some());
}

#[tokio::test]
async fn stored_index_beyond_content_is_clamped() {
    let repo = InMemoryRepository::new();
    repo.put_raw(PROGRESS_KEY, r#"{"completedTasks": {"t3": true}, "currentSection": 12}"#)
        .unwrap();
    let persister = ProgressPersister::new(Arc::new(repo), fixed_clock());

    let session = GuideSessionService::hydrate(scenario_guide(), persister).await;
    assert_eq!(session.hydration_source(), HydrationSource::Stored);
    assert_eq!(session.current_section(), 2);
    assert!(session.is_section_complete(2));
}

#[tokio::test]
async fn null_index_keeps_stored_completions() {
    let repo = InMemoryRepository::new();
    repo.put_raw(PROGRESS_KEY, r#"{"completedTasks": {"t1": true}, "currentSection": null}"#)
        .unwrap();
    let persister = ProgressPersister::new(Arc::new(repo), fixed_clock());

    let session = GuideSessionService::hydrate(scenario_guide(), persister).await;
    assert_eq!(session.hydration_source(), HydrationSource::Stored);
    assert_eq!(session.current_section(), 0);
    assert!(session.state().is_task_completed(&TaskId::new("t1")));
}

#[tokio::test]
async fn failed_writes_are_swallowed() {
    let repo = Arc::new(ReadOnlyRepository {
        writes: AtomicUsize::new(0),
    });
    let persister = ProgressPersister::new(repo.clone(), fixed_clock());
    let mut session = GuideSessionService::hydrate(scenario_guide(), persister).await;

    assert_eq!(session.next_section().await, 1);
    assert!(session.toggle_task(&TaskId::new("t1")).await.unwrap());
    assert_eq!(session.last_persist(), Some(PersistOutcome::Failed));
    assert_eq!(repo.writes.load(Ordering::SeqCst), 2);

    // In-memory state is unaffected by the failing store.
    assert_eq!(session.current_section(), 1);
    assert_eq!(session.reset_progress().await, PersistOutcome::Failed);
    assert_eq!(session.state(), &SessionState::default());
}

#[tokio::test]
async fn sqlite_backed_session_survives_restart() {
    let url = "sqlite:file:memdb_services_restart?mode=memory&cache=shared";
    let services = AppServices::new_sqlite(url, scenario_guide(), fixed_clock())
        .await
        .expect("services");

    let mut first = services.start_session().await;
    first.go_to_section(1).await;
    first.toggle_task(&TaskId::new("t2")).await.unwrap();
    assert_eq!(first.last_persist(), Some(PersistOutcome::Saved));

    let second = services.start_session().await;
    assert_eq!(second.hydration_source(), HydrationSource::Stored);
    assert_eq!(second.current_section(), 1);
    assert!(second.state().is_task_completed(&TaskId::new("t2")));
}
