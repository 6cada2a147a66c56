use lab_core::model::TaskId;
use services::GuideIntent;
use storage::repository::{InMemoryRepository, PROGRESS_KEY, ProgressRecord};

use super::test_harness::{setup_page_harness, setup_view_harness};

fn seeded(raw: &str) -> InMemoryRepository {
    let repo = InMemoryRepository::new();
    repo.put_raw(PROGRESS_KEY, raw).expect("seed progress");
    repo
}

#[tokio::test(flavor = "current_thread")]
async fn guide_view_starts_at_first_section_without_progress() {
    let mut harness = setup_view_harness(InMemoryRepository::new());
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Cursor Workshop"), "missing title in {html}");
    assert!(html.contains("Section 1 of 3"), "missing position in {html}");
    assert!(html.contains("Welcome to the lab."), "missing content in {html}");
    assert!(html.contains("Lab Sections"), "missing sidebar in {html}");
    assert!(html.contains("0/2 tasks"), "missing task count in {html}");
    assert!(!html.contains("Your Tasks"), "unexpected tasks in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn guide_view_restores_stored_progress() {
    let repo = seeded(r#"{"completedTasks":{"open-chat":true},"currentSection":1}"#);
    let mut harness = setup_view_harness(repo);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Section 2 of 3"), "missing position in {html}");
    assert!(html.contains("Your Tasks"), "missing tasks in {html}");
    assert!(html.contains("1/2 tasks"), "missing task count in {html}");
    assert!(html.contains("task__label--done"), "missing done task in {html}");
    assert!(html.contains("callout--warning"), "missing callout in {html}");
    assert!(html.contains("cargo run"), "missing code in {html}");
    assert!(html.contains("Copy"), "missing copy button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn guide_view_falls_back_on_malformed_progress() {
    let mut harness = setup_view_harness(seeded("not json"));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Section 1 of 3"), "missing position in {html}");
    assert_eq!(
        harness.repo.raw(PROGRESS_KEY).expect("read raw").as_deref(),
        Some("not json"),
        "hydration must not overwrite stored data"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn guide_page_rerenders_after_intents() {
    let mut harness = setup_page_harness(InMemoryRepository::new()).await;
    harness.rebuild();
    assert!(harness.render().contains("Section 1 of 3"));

    harness.dispatch(GuideIntent::Next);
    let html = harness.render();
    assert!(html.contains("Section 2 of 3"), "missing position in {html}");
    assert!(!html.contains("task__label--done"), "unexpected done task in {html}");

    harness.dispatch(GuideIntent::Toggle(TaskId::new("ask")));
    let html = harness.render();
    assert!(html.contains("1/2 tasks"), "missing task count in {html}");
    assert!(html.contains("task__label--done"), "missing done task in {html}");

    harness.dispatch(GuideIntent::GoTo(99));
    let html = harness.render();
    assert!(html.contains("Section 3 of 3"), "missing clamped position in {html}");
    assert!(html.contains("Share"), "missing list item in {html}");
}

fn stored(repo: &InMemoryRepository) -> ProgressRecord {
    let raw = repo
        .raw(PROGRESS_KEY)
        .expect("read raw")
        .expect("progress was saved");
    ProgressRecord::decode(&raw).expect("decodable record")
}

#[tokio::test(flavor = "current_thread")]
async fn guide_view_saves_every_intent_in_the_background() {
    let mut harness = setup_view_harness(InMemoryRepository::new());
    harness.rebuild();
    harness.drive_async().await;
    assert!(harness.repo.raw(PROGRESS_KEY).expect("read raw").is_none());

    harness.dispatch(GuideIntent::Next);
    harness.drive_async().await;
    let record = stored(&harness.repo);
    assert_eq!(record.current_section, 1);
    assert!(record.completed_tasks.is_empty());

    harness.dispatch(GuideIntent::Toggle(TaskId::new("open-chat")));
    harness.drive_async().await;
    let record = stored(&harness.repo);
    assert_eq!(record.completed_tasks.get("open-chat"), Some(&true));
    assert!(record.saved_at.is_some());

    let live = harness.with_session(|session| session.state().clone());
    assert_eq!(stored(&harness.repo).into_state(), live);
    assert!(harness.render().contains("1/2 tasks"));
}

#[tokio::test(flavor = "current_thread")]
async fn guide_page_without_saver_leaves_store_untouched() {
    let mut harness = setup_page_harness(InMemoryRepository::new()).await;
    harness.rebuild();
    harness.dispatch(GuideIntent::Next);
    harness.drive_async().await;
    assert!(harness.repo.raw(PROGRESS_KEY).expect("read raw").is_none());
}
