use dashboard::CatalogLoad;
use test_helpers::{SinkEvent, TestDashboard, mock::sample_fields};

#[tokio::test]
async fn catalog_count_matches_loaded_fields() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());

    let load = dashboard.activate_catalog().await;

    assert!(matches!(load, CatalogLoad::Loaded(4)));
    let catalog = dashboard.sink.catalog();
    assert_eq!(catalog.count(), catalog.fields().len());
    let names: Vec<_> = catalog
        .fields()
        .iter()
        .filter_map(|f| f.name.as_deref())
        .collect();
    assert_eq!(names, ["North", "South", "Creek Bottom", "Back Forty"]);
    assert_eq!(dashboard.sink.events(), [SinkEvent::Catalog(4)]);

    Ok(())
}

#[tokio::test]
async fn catalog_is_fetched_once_per_activation() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());

    dashboard.activate_catalog().await;
    let second = dashboard.activate_catalog().await;

    assert!(matches!(second, CatalogLoad::AlreadyActivated));
    assert!(dashboard.loader.is_activated());
    assert_eq!(dashboard.service.catalog_requests(), 1);

    Ok(())
}

#[tokio::test]
async fn empty_catalog_is_valid() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(Vec::new());

    let load = dashboard.activate_catalog().await;

    assert!(matches!(load, CatalogLoad::Loaded(0)));
    assert!(dashboard.sink.catalog().is_empty());
    assert_eq!(dashboard.sink.events(), [SinkEvent::Catalog(0)]);

    Ok(())
}

#[tokio::test]
async fn failed_first_load_leaves_empty_catalog() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());
    dashboard.service.fail_catalog(true);

    let load = dashboard.activate_catalog().await;

    let err = match load {
        CatalogLoad::Failed(err) => err,
        other => panic!("expected failed load, got {other:?}"),
    };
    assert_eq!(err.to_string(), "Error loading all fields");
    assert_eq!(dashboard.sink.catalog().count(), 0);
    assert!(dashboard.sink.events().is_empty());

    // No retry happens on its own.
    assert_eq!(dashboard.service.catalog_requests(), 1);

    Ok(())
}

#[tokio::test]
async fn failed_later_load_keeps_previous_catalog() -> anyhow::Result<()> {
    let dashboard = TestDashboard::new(sample_fields());
    dashboard.activate_catalog().await;

    // A remounted dashboard gets a fresh loader but the same published state.
    dashboard.service.fail_catalog(true);
    let remounted = dashboard::FieldCatalogLoader::new(dashboard.service.clone());
    let load = remounted.activate(&dashboard.sink).await;

    assert!(matches!(load, CatalogLoad::Failed(_)));
    assert_eq!(dashboard.sink.catalog().count(), 4);

    Ok(())
}
