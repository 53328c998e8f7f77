use anyhow::{Context, Result};
use parley_api_models::{Language, RecordStatus};
use parley_core::logic::EMPTY_INPUT_MESSAGE;
use parley_core::{ApiError, Desk, DeskStore, LocalStore, StatusFilter};
use parley_test_support::fixtures::{created_record, failed_record, translated_record};
use parley_test_support::mocks::{ApiCall, FakeBackend, Operation};

fn desk_with(backend: FakeBackend) -> Desk<FakeBackend, LocalStore> {
    Desk::new(backend, LocalStore::default())
}

#[tokio::test]
async fn blank_input_never_reaches_the_backend() {
    for text in ["", "   ", "\n\t"] {
        let desk = desk_with(FakeBackend::new());
        desk.set_text(text);
        let err = desk.translate().await.expect_err("blank input rejected");
        assert!(err.is_validation());
        assert_eq!(desk.api().call_count(), 0);
        let state = desk.store().snapshot();
        assert_eq!(state.error.as_deref(), Some(EMPTY_INPUT_MESSAGE));
        assert!(!state.busy.translating);
    }
}

#[tokio::test]
async fn hello_to_portuguese_scenario() -> Result<()> {
    let desk = desk_with(FakeBackend::new().with_phrase("Hello", Language::Pt, "Olá"));
    desk.set_source(Language::En);
    desk.set_target(Language::Pt);
    desk.set_text("Hello");

    let record = desk.translate().await.context("translate workflow")?;
    assert_eq!(record.id, 1);
    assert_eq!(record.status, RecordStatus::Translated);
    assert!(record.translated_text.is_some());

    let state = desk.store().snapshot();
    assert_eq!(state.result.as_deref(), Some("Olá"));
    assert!(state.error.is_none());
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history[0].id, 1);
    assert_eq!(state.history[0].status, RecordStatus::Translated);
    assert_eq!(state.selected().map(|r| r.id), Some(1));
    assert!(!state.busy.translating);
    assert!(!state.busy.refreshing);

    assert_eq!(
        desk.api()
            .calls()
            .iter()
            .map(ApiCall::operation)
            .collect::<Vec<_>>(),
        vec![Operation::Create, Operation::Translate, Operation::List]
    );
    Ok(())
}

#[tokio::test]
async fn translated_record_survives_a_later_refresh() -> Result<()> {
    let desk = desk_with(FakeBackend::new());
    desk.set_text("Good morning");
    let record = desk.translate().await?;
    assert!(record.is_translated());

    desk.refresh_history().await?;
    let state = desk.store().snapshot();
    assert!(state.history.iter().any(|r| r.id == record.id));
    Ok(())
}

#[tokio::test]
async fn translate_failure_keeps_created_ticket_and_stops_sequence() {
    let backend = FakeBackend::new();
    backend.fail_next(
        Operation::Translate,
        ApiError::from_response(502, r#"{"message":"Translation provider failed: quota"}"#),
    );
    let desk = desk_with(backend);
    desk.set_text("Hello");

    let err = desk.translate().await.expect_err("translate fails");
    assert_eq!(err.status(), Some(502));

    let state = desk.store().snapshot();
    assert_eq!(state.error.as_deref(), Some("Translation provider failed: quota"));
    assert!(state.result.is_none());
    assert!(state.selected_id.is_none());
    assert!(!state.busy.translating);
    assert!(state.history.is_empty());

    let calls = desk.api().calls();
    assert_eq!(calls.len(), 2);
    assert!(!calls.iter().any(|call| call.operation() == Operation::List));
    assert_eq!(desk.api().records()[0].status, RecordStatus::Failed);
}

#[tokio::test]
async fn refresh_failure_after_translate_keeps_result_without_selecting() {
    let backend = FakeBackend::new().with_phrase("Hello", Language::Pt, "Olá");
    backend.fail_next(Operation::List, ApiError::Transport("history offline".into()));
    let desk = desk_with(backend);
    desk.set_text("Hello");

    let err = desk.translate().await.expect_err("refresh inside translate fails");
    assert!(matches!(err, ApiError::Transport(_)));

    let state = desk.store().snapshot();
    assert_eq!(state.result.as_deref(), Some("Olá"));
    assert!(state.selected_id.is_none());
    assert!(state.history.is_empty());
    assert_eq!(state.error.as_deref(), Some("history offline"));
    assert!(!state.busy.translating);
    assert!(!state.busy.refreshing);

    assert_eq!(
        desk.api()
            .calls()
            .iter()
            .map(ApiCall::operation)
            .collect::<Vec<_>>(),
        vec![Operation::Create, Operation::Translate, Operation::List]
    );
    assert_eq!(desk.api().records()[0].status, RecordStatus::Translated);
}

#[tokio::test]
async fn translate_clears_previous_result_error_and_delivery() {
    let backend = FakeBackend::new();
    backend.fail_next(Operation::Create, ApiError::Transport("connection refused".into()));
    let desk = desk_with(backend);
    desk.store().update(|state| {
        state.text = "Hello".into();
        state.result = Some("old".into());
        state.error = Some("old error".into());
        state.delivery = Some(parley_api_models::DeliveryReceipt(serde_json::json!({"x": 1})));
    });

    assert!(desk.translate().await.is_err());
    let state = desk.store().snapshot();
    assert!(state.result.is_none());
    assert!(state.delivery.is_none());
    assert_eq!(state.error.as_deref(), Some("connection refused"));
}

#[tokio::test]
async fn refresh_sorts_newest_first_with_stable_ties() -> Result<()> {
    let backend = FakeBackend::new().with_records(vec![
        created_record(1, "a", 10),
        translated_record(2, "b", "B", 30),
        failed_record(3, "c", 10),
        created_record(4, "d", 20),
    ]);
    let desk = desk_with(backend);
    assert_eq!(desk.refresh_history().await?, 4);
    let ids: Vec<i64> = desk.store().snapshot().history.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 4, 1, 3]);
    Ok(())
}

#[tokio::test]
async fn refresh_failure_keeps_previous_history() -> Result<()> {
    let backend = FakeBackend::new().with_records(vec![created_record(1, "a", 0)]);
    let desk = desk_with(backend);
    desk.refresh_history().await?;

    desk.api()
        .fail_next(Operation::List, ApiError::from_response(500, ""));
    let err = desk.refresh_history().await.expect_err("list fails");
    assert_eq!(err.status(), Some(500));

    let state = desk.store().snapshot();
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.error.as_deref(), Some("Request failed (500)"));
    assert!(!state.busy.refreshing);
    Ok(())
}

#[tokio::test]
async fn filter_change_clears_selection_and_delivery_then_refetches() -> Result<()> {
    let backend = FakeBackend::new().with_records(vec![
        translated_record(1, "a", "A", 0),
        created_record(2, "b", 1),
    ]);
    let desk = desk_with(backend);
    desk.refresh_history().await?;
    desk.select(1);
    desk.deliver().await?.context("delivery ran")?;
    assert!(desk.store().snapshot().delivery.is_some());

    let translated = StatusFilter::Status(RecordStatus::Translated);
    desk.change_filter(translated).await?;
    let state = desk.store().snapshot();
    assert_eq!(state.filter, translated);
    assert!(state.selected_id.is_none());
    assert!(state.delivery.is_none());
    assert_eq!(state.history.len(), 1);
    assert_eq!(desk.api().calls().last(), Some(&ApiCall::List(translated)));
    Ok(())
}

#[tokio::test]
async fn filter_change_clears_selection_even_when_refresh_fails() {
    let desk = desk_with(FakeBackend::new());
    desk.store().update(|state| state.selected_id = Some(42));
    desk.api()
        .fail_next(Operation::List, ApiError::Transport("offline".into()));
    assert!(desk.change_filter(StatusFilter::All).await.is_err());
    let state = desk.store().snapshot();
    assert!(state.selected_id.is_none());
    assert!(state.delivery.is_none());
}

#[tokio::test]
async fn selecting_an_unknown_id_projects_nothing() -> Result<()> {
    let desk = desk_with(FakeBackend::new().with_records(vec![created_record(1, "a", 0)]));
    desk.refresh_history().await?;
    desk.select(99);
    assert!(desk.store().snapshot().selected().is_none());
    Ok(())
}

#[tokio::test]
async fn deliver_is_a_noop_without_a_translated_selection() -> Result<()> {
    let desk = desk_with(FakeBackend::new().with_records(vec![
        created_record(1, "a", 0),
        failed_record(2, "b", 1),
    ]));
    desk.refresh_history().await?;
    let baseline = desk.api().call_count();

    assert!(desk.deliver().await?.is_none());
    desk.select(1);
    assert!(desk.deliver().await?.is_none());
    desk.select(2);
    assert!(desk.deliver().await?.is_none());
    desk.select(77);
    assert!(desk.deliver().await?.is_none());

    assert_eq!(desk.api().call_count(), baseline);
    assert!(desk.store().snapshot().error.is_none());
    Ok(())
}

#[tokio::test]
async fn deliver_stores_the_payload_verbatim() -> Result<()> {
    let desk = desk_with(FakeBackend::new().with_records(vec![translated_record(
        5, "Hello", "Olá", 0,
    )]));
    desk.refresh_history().await?;
    desk.select(5);

    let receipt = desk.deliver().await?.context("delivered")?;
    let state = desk.store().snapshot();
    assert_eq!(state.delivery.as_ref(), Some(&receipt));
    assert_eq!(receipt.raw()["payload"]["translatedText"], "Olá");
    assert_eq!(receipt.typed().and_then(|typed| typed.ticket_id), Some(5));
    assert!(!state.busy.delivering);
    Ok(())
}

#[tokio::test]
async fn deliver_failure_surfaces_backend_message() -> Result<()> {
    let desk = desk_with(FakeBackend::new().with_records(vec![translated_record(
        5, "Hello", "Olá", 0,
    )]));
    desk.refresh_history().await?;
    desk.select(5);
    desk.api().fail_next(
        Operation::Deliver,
        ApiError::from_response(409, r#"{"error":"Partner unavailable"}"#),
    );

    assert!(desk.deliver().await.is_err());
    let state = desk.store().snapshot();
    assert_eq!(state.error.as_deref(), Some("Partner unavailable"));
    assert!(state.delivery.is_none());
    Ok(())
}

#[tokio::test]
async fn selecting_another_ticket_drops_pending_delivery() -> Result<()> {
    let desk = desk_with(FakeBackend::new().with_records(vec![
        translated_record(1, "a", "A", 0),
        translated_record(2, "b", "B", 1),
    ]));
    desk.refresh_history().await?;
    desk.select(1);
    desk.deliver().await?;
    desk.select(2);
    let state = desk.store().snapshot();
    assert!(state.delivery.is_none());
    assert_eq!(state.selected().map(|r| r.id), Some(2));
    Ok(())
}
