use dashboard::{DashboardConfig, FieldContext};
use payloads::FieldId;
use std::time::Duration;
use test_helpers::{
    SinkEvent, TestDashboard,
    mock::{field, sample_fields},
};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn instant_refresh_keeps_spinner_for_minimum() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());
    let started = Instant::now();

    let watch_loading = async {
        tokio::time::sleep(Duration::from_millis(400)).await;
        dashboard.sink.is_loading()
    };
    let (refreshed, loading_at_400ms) =
        tokio::join!(dashboard.refresh(), watch_loading);

    refreshed?;
    assert!(loading_at_400ms);
    assert!(started.elapsed() >= Duration::from_millis(500));
    assert!(!dashboard.sink.is_loading());
    assert_eq!(dashboard.context.refresh_calls(), 1);
    assert_eq!(
        dashboard.sink.events(),
        [SinkEvent::Loading(true), SinkEvent::Loading(false)]
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn slow_refresh_keeps_spinner_until_done() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());
    dashboard.context.delay_refresh(Duration::from_millis(800));
    let started = Instant::now();

    let watch_loading = async {
        tokio::time::sleep(Duration::from_millis(700)).await;
        dashboard.sink.is_loading()
    };
    let (refreshed, loading_at_700ms) =
        tokio::join!(dashboard.refresh(), watch_loading);

    refreshed?;
    assert!(loading_at_700ms);
    assert!(started.elapsed() >= Duration::from_millis(800));
    assert!(!dashboard.sink.is_loading());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn failed_refresh_still_clears_loading() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());
    dashboard.service.fail_catalog(true);
    let started = Instant::now();

    let err = dashboard.refresh().await.unwrap_err();

    assert_eq!(err.to_string(), "Error refreshing fields");
    assert!(started.elapsed() >= Duration::from_millis(500));
    assert!(!dashboard.sink.is_loading());
    // The shared field list is untouched.
    assert_eq!(dashboard.context.snapshot().fields, sample_fields());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn minimum_spinner_is_configurable() -> anyhow::Result<()> {
    let config = DashboardConfig {
        min_refresh_spinner: Duration::from_millis(250),
        ..DashboardConfig::default()
    };
    let dashboard = TestDashboard::with_config(sample_fields(), config);
    let started = Instant::now();

    dashboard.refresh().await?;

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(250));
    assert!(elapsed < Duration::from_millis(500));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn refreshed_field_list_feeds_the_next_cycle() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());
    dashboard.run_cycle().await;

    dashboard
        .service
        .set_catalog(vec![field(7, "East", "Turlock, CA")]);
    dashboard.refresh().await?;

    assert_eq!(dashboard.context.snapshot().fields.len(), 1);
    dashboard.run_cycle().await;

    let view = dashboard.sink.view();
    assert_eq!(view.resolved_field.map(|f| f.id), Some(FieldId::from(7)));
    assert_eq!(
        view.forecast.map(|f| f.location),
        Some("Turlock, CA".to_string())
    );

    Ok(())
}
