// End-to-end flows across session, list controllers and the fake backend
use posadmin_client::{Config, Error as ApiError, Method, TsvErrorReport};
use posadmin_runtime::{ClientsScreen, InventoryScreen, LoadState};
use posadmin_testing::assertions::{
    assert_last_request_anonymous, assert_page_within, assert_request_count,
};
use posadmin_testing::{Connection, FakeBackend, fixtures};
use std::sync::Arc;

fn small_pages() -> Config {
    Config {
        page_size: 7,
        ..Config::default()
    }
}

#[tokio::test]
async fn test_expired_session_clears_credentials_once() -> anyhow::Result<()> {
    let backend = Arc::new(FakeBackend::new().with_clients(fixtures::clients(20)));
    let conn = Connection::admin(&backend);
    let mut clients = ClientsScreen::new(conn.api.clone(), &small_pages())?;

    backend.respond_next(401, r#"{"message":"Unauthorized"}"#);
    let err = clients.load().await.unwrap_err();
    assert!(matches!(err.api(), Some(ApiError::Unauthorized)));
    assert!(matches!(clients.list().state(), LoadState::Failed(_)));
    assert_eq!(conn.store.clear_count(), 1);

    // The retry goes out anonymously and is rejected without clearing again
    assert!(clients.load().await.is_err());
    assert_last_request_anonymous(&backend)?;
    assert_eq!(conn.store.clear_count(), 1);

    conn.api
        .login(posadmin_testing::ADMIN_EMAIL, posadmin_testing::ADMIN_PASSWORD)
        .await?;
    clients.load().await?;
    assert_eq!(clients.list().rows().len(), 7);
    Ok(())
}

#[tokio::test]
async fn test_rejected_inventory_upload_writes_error_file() -> anyhow::Result<()> {
    let clients = fixtures::clients(1);
    let products = fixtures::products_for(&clients, 9);
    let backend = Arc::new(
        FakeBackend::new()
            .with_inventory(fixtures::inventory_for(&products, 3))
            .with_products(products)
            .with_clients(clients),
    );
    let conn = Connection::admin(&backend);
    let mut inventory = InventoryScreen::new(conn.api, &small_pages())?;
    inventory.load().await?;
    let before = inventory.list().rows().to_vec();

    backend.reject_next_upload(fixtures::tsv_error_report(3));
    let err = inventory
        .upload("barcode\tquantity\nbc-0001\tlots\n".to_string())
        .await
        .unwrap_err();
    let Some(ApiError::TsvRejected(report)) = err.api() else {
        anyhow::bail!("expected a TSV rejection, got {}", err);
    };

    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("inventory-errors.tsv");
    report.write_to(&path)?;
    let reread = TsvErrorReport::parse(&std::fs::read(&path)?)?;
    assert_eq!(reread.rows().len(), 3);
    assert_eq!(reread.column("error").len(), 3);

    assert_eq!(inventory.list().rows(), before.as_slice());
    assert_request_count(&backend, Method::Post, "/inventory/list", 1)?;
    Ok(())
}

#[tokio::test]
async fn test_walk_every_page_respects_page_size() -> anyhow::Result<()> {
    let backend = Arc::new(FakeBackend::new().with_clients(fixtures::clients(50)));
    let conn = Connection::admin(&backend);
    let mut clients = ClientsScreen::new(conn.api, &small_pages())?;

    clients.load().await?;
    let mut seen = clients.list().rows().len();
    while clients.list_mut().next_page() {
        clients.load().await?;
        assert_page_within(clients.list().rows(), 7)?;
        seen += clients.list().rows().len();
    }

    assert_eq!(seen, 50);
    assert_eq!(clients.list().page_count(), 8);
    assert_request_count(&backend, Method::Get, "/clients", 1)?;
    Ok(())
}
