use dashboard::{
    ContextSnapshot, CycleOutcome, FieldContext, ResolutionCycleError,
    select_field,
};
use payloads::FieldId;
use std::time::Duration;
use test_helpers::{
    Call, SinkEvent, TestDashboard, capture_logs,
    mock::{field, sample_fields},
};

#[tokio::test]
async fn first_field_is_used_without_selection() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(vec![field(1, "North", "X")]);
    dashboard.context.set_selection(Some(FieldId::from("")));

    let outcome = dashboard.run_cycle().await;

    assert!(matches!(outcome, CycleOutcome::Published));
    assert_eq!(
        dashboard.service.calls(),
        [Call::FieldData(FieldId::from(1)), Call::Weather("X".to_string())]
    );
    let view = dashboard.sink.view();
    assert_eq!(view.resolved_field, Some(field(1, "North", "X")));
    assert_eq!(view.forecast.map(|f| f.location), Some("X".to_string()));

    Ok(())
}

#[tokio::test]
async fn explicit_selection_wins_over_first_field() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());
    dashboard.context.set_selection(Some(FieldId::from(3)));

    dashboard.run_cycle().await;

    assert_eq!(dashboard.service.field_requests(), [FieldId::from(3)]);
    assert_eq!(dashboard.service.weather_requests(), ["Merced, CA"]);
    assert_eq!(
        dashboard.sink.view().resolved_field.map(|f| f.id),
        Some(FieldId::from(3))
    );

    Ok(())
}

#[tokio::test]
async fn no_fields_uses_default_location() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(Vec::new());
    dashboard.context.set_selection(Some(FieldId::from("")));

    let outcome = dashboard.run_cycle().await;

    assert!(matches!(
        outcome,
        CycleOutcome::NoField {
            forecast_error: None
        }
    ));
    assert_eq!(
        dashboard.service.calls(),
        [Call::Weather("Default Location".to_string())]
    );
    let view = dashboard.sink.view();
    assert_eq!(view.resolved_field, None);
    assert_eq!(
        view.forecast.as_ref().map(|f| f.location.as_str()),
        Some("Default Location")
    );
    assert_eq!(
        view.empty_message(),
        Some("No field selected or no fields available")
    );

    Ok(())
}

#[tokio::test]
async fn field_without_location_uses_default_location() -> anyhow::Result<()>
{
    let dashboard = TestDashboard::new(sample_fields());
    dashboard.context.set_selection(Some(FieldId::from(4)));

    let outcome = dashboard.run_cycle().await;

    assert!(matches!(outcome, CycleOutcome::Published));
    assert_eq!(dashboard.service.weather_requests(), ["Default Location"]);
    let view = dashboard.sink.view();
    assert_eq!(view.resolved_field.map(|f| f.id), Some(FieldId::from(4)));
    assert_eq!(
        view.forecast.map(|f| f.location),
        Some("Default Location".to_string())
    );

    Ok(())
}

#[tokio::test]
async fn field_and_forecast_are_published_in_one_step() -> anyhow::Result<()>
{
    let dashboard = TestDashboard::new(sample_fields());

    dashboard.run_cycle().await;

    assert_eq!(
        dashboard.sink.events(),
        [
            SinkEvent::Loading(true),
            SinkEvent::View {
                field: Some(FieldId::from(1)),
                forecast: Some("Fresno, CA".to_string()),
            },
            SinkEvent::Loading(false),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn failed_field_fetch_keeps_previous_view() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());
    dashboard.run_cycle().await;
    let before = dashboard.sink.view();

    dashboard.service.fail_field(2);
    dashboard.context.set_selection(Some(FieldId::from(2)));
    dashboard.sink.clear_events();

    let (logs, _guard) = capture_logs();
    let outcome = dashboard.run_cycle().await;

    let err = match outcome {
        CycleOutcome::Failed(err) => err,
        other => panic!("expected failed cycle, got {other:?}"),
    };
    assert!(matches!(
        &err,
        ResolutionCycleError::FieldFetch { field_id, .. } if field_id == &FieldId::from(2)
    ));

    // The weather lookup never started.
    assert!(!dashboard.service.weather_requests().contains(&"Modesto, CA".to_string()));

    let after = dashboard.sink.view();
    assert_eq!(after.resolved_field, before.resolved_field);
    assert_eq!(after.forecast, before.forecast);
    assert_eq!(after.updated_at, before.updated_at);
    assert!(!after.is_loading);
    assert_eq!(
        dashboard.sink.events(),
        [SinkEvent::Loading(true), SinkEvent::Loading(false)]
    );
    assert!(logs.contains(
        "Error loading data for field 2: Internal server error"
    ));
    assert!(logs.contains("ERROR"));

    Ok(())
}

#[tokio::test]
async fn failed_weather_fetch_publishes_nothing() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());
    dashboard.run_cycle().await;
    let before = dashboard.sink.view();

    dashboard.service.fail_weather("Modesto, CA");
    dashboard.context.set_selection(Some(FieldId::from(2)));
    dashboard.sink.clear_events();

    let outcome = dashboard.run_cycle().await;

    assert!(matches!(
        outcome,
        CycleOutcome::Failed(ResolutionCycleError::WeatherFetch { .. })
    ));
    // The field fetch succeeded, but its result is not published alone.
    assert_eq!(dashboard.sink.view().resolved_field, before.resolved_field);
    assert_eq!(dashboard.sink.view().forecast, before.forecast);
    assert_eq!(
        dashboard.sink.events(),
        [SinkEvent::Loading(true), SinkEvent::Loading(false)]
    );

    Ok(())
}

#[tokio::test]
async fn missing_field_is_reported_as_not_found() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());
    dashboard.context.set_selection(Some(FieldId::from(99)));

    let (logs, _guard) = capture_logs();
    let outcome = dashboard.run_cycle().await;

    let CycleOutcome::Failed(err) = &outcome else {
        panic!("expected failed cycle");
    };
    assert!(err.source_error().is_not_found());
    assert!(!dashboard.sink.is_loading());

    assert!(logs.contains("Selected field no longer exists"));
    assert!(logs.contains("Error loading data for field 99: Field not found"));
    assert!(logs.contains("WARN"));
    assert!(!logs.contains("ERROR"));

    Ok(())
}

#[tokio::test]
async fn failed_default_forecast_clears_the_view() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());
    dashboard.run_cycle().await;

    dashboard.service.fail_weather("Default Location");
    dashboard.context.set_fields(Vec::new());
    dashboard.sink.clear_events();

    let outcome = dashboard.run_cycle().await;

    assert!(matches!(
        outcome,
        CycleOutcome::NoField {
            forecast_error: Some(ResolutionCycleError::WeatherFetch { .. })
        }
    ));
    let view = dashboard.sink.view();
    assert_eq!(view.resolved_field, None);
    assert_eq!(view.forecast, None);
    assert_eq!(
        dashboard.sink.events(),
        [
            SinkEvent::Loading(true),
            SinkEvent::View {
                field: None,
                forecast: None
            },
            SinkEvent::Loading(false),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn next_cycle_recovers_after_failure() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());
    dashboard.service.fail_field(1);

    assert!(matches!(
        dashboard.run_cycle().await,
        CycleOutcome::Failed(_)
    ));
    assert_eq!(dashboard.sink.view().resolved_field, None);

    dashboard.service.heal();
    assert!(matches!(dashboard.run_cycle().await, CycleOutcome::Published));
    assert_eq!(
        dashboard.sink.view().resolved_field.map(|f| f.id),
        Some(FieldId::from(1))
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn loading_spans_the_whole_cycle() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());
    dashboard.service.delay_field(1, Duration::from_millis(100));
    dashboard.service.delay_weather(Duration::from_millis(100));

    let watch_loading = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let during_field_fetch = dashboard.sink.is_loading();
        tokio::time::sleep(Duration::from_millis(100)).await;
        let during_weather_fetch = dashboard.sink.is_loading();
        (during_field_fetch, during_weather_fetch)
    };
    let (outcome, (during_field_fetch, during_weather_fetch)) =
        tokio::join!(dashboard.run_cycle(), watch_loading);

    assert!(matches!(outcome, CycleOutcome::Published));
    assert!(during_field_fetch);
    assert!(during_weather_fetch);
    assert!(!dashboard.sink.is_loading());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn loading_spans_a_failing_cycle() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());
    dashboard.service.delay_field(1, Duration::from_millis(100));
    dashboard.service.fail_field(1);

    let watch_loading = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        dashboard.sink.is_loading()
    };
    let (outcome, during) =
        tokio::join!(dashboard.run_cycle(), watch_loading);

    assert!(matches!(outcome, CycleOutcome::Failed(_)));
    assert!(during);
    assert!(!dashboard.sink.is_loading());

    Ok(())
}

#[tokio::test]
async fn cycles_never_write_the_selection() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());

    dashboard.run_cycle().await;
    dashboard.context.set_fields(Vec::new());
    dashboard.run_cycle().await;

    assert!(dashboard.context.selections().is_empty());
    assert_eq!(dashboard.context.snapshot().selected_field, None);

    Ok(())
}

#[tokio::test]
async fn user_selection_drives_the_next_cycle() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());
    dashboard.run_cycle().await;

    select_field(&dashboard.context, FieldId::from(2));
    assert_eq!(dashboard.context.selections(), [Some(FieldId::from(2))]);
    // Selecting only updates the context; the view changes with the cycle.
    assert_eq!(
        dashboard.sink.view().resolved_field.map(|f| f.id),
        Some(FieldId::from(1))
    );

    dashboard.run_cycle().await;
    assert_eq!(
        dashboard.sink.view().resolved_field.map(|f| f.id),
        Some(FieldId::from(2))
    );

    Ok(())
}

#[tokio::test]
async fn cycles_are_numbered_in_start_order() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());
    assert_eq!(dashboard.resolver.latest_cycle(), None);

    let snapshot = ContextSnapshot::new(None, sample_fields());
    dashboard.resolver.run_cycle(&snapshot, &dashboard.sink).await;
    dashboard.resolver.run_cycle(&snapshot, &dashboard.sink).await;

    assert_eq!(
        dashboard.resolver.latest_cycle(),
        Some(dashboard::CycleId(2))
    );

    Ok(())
}
