use posadmin_client::{ApiClient, Config};
use posadmin_types::{Client, ClientFilter, ClientForm, ClientId};
use tracing::info;

use crate::Result;
use crate::controller::{Applied, ListController};
use crate::source::{ClientPages, FetchAllSource};

pub type ClientList = ListController<FetchAllSource<ClientPages, ClientFilter>>;

/// Clients are loaded in full and searched by name in memory.
pub struct ClientsScreen {
    api: ApiClient,
    list: ClientList,
}

impl ClientsScreen {
    pub fn new(api: ApiClient, config: &Config) -> Result<Self> {
        let source = FetchAllSource::new(api.clone(), ClientPages, config.fetch_all_chunk)?;
        Ok(Self {
            list: ListController::new(source, config.page_size)?,
            api,
        })
    }

    pub fn list(&self) -> &ClientList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ClientList {
        &mut self.list
    }

    pub async fn load(&mut self) -> Result<Applied> {
        self.list.load().await
    }

    /// Case-insensitive name search; back to the first page
    pub async fn search(&mut self, term: &str) -> Result<Applied> {
        self.list.set_filter(ClientFilter::search(term));
        self.list.load().await
    }

    pub async fn show_page(&mut self, page: usize) -> Result<Applied> {
        self.list.set_page(page);
        self.list.load().await
    }

    pub async fn add(&mut self, form: &ClientForm) -> Result<Option<Client>> {
        let created = self.api.clients().create(form).await?;
        info!(name = %form.name, "client created");
        self.list.refresh().await;
        Ok(created)
    }

    pub async fn update(&mut self, id: ClientId, form: &ClientForm) -> Result<Option<Client>> {
        let updated = self.api.clients().update(id, form).await?;
        self.list.absorb(updated.clone()).await;
        Ok(updated)
    }

    /// Flip enabled/disabled
    pub async fn toggle(&mut self, id: ClientId) -> Result<Option<Client>> {
        let toggled = self.api.clients().toggle(id).await?;
        self.list.absorb(toggled.clone()).await;
        Ok(toggled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoadState;
    use posadmin_client::{Error as ApiError, Method};
    use posadmin_testing::{Connection, FakeBackend, fixtures};
    use std::sync::Arc;

    fn screen(backend: &Arc<FakeBackend>) -> ClientsScreen {
        ClientsScreen::new(Connection::admin(backend).api, &Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_toggle_patches_without_refetch() {
        let backend = Arc::new(FakeBackend::new().with_clients(fixtures::clients(12)));
        let mut screen = screen(&backend);
        screen.load().await.unwrap();

        let toggled = screen.toggle(ClientId::new(4)).await.unwrap().unwrap();
        assert!(!toggled.enabled);
        assert!(!screen.list().rows()[3].enabled);
        assert_eq!(backend.count(Method::Get, "/clients"), 1);

        // The patched record is served from memory on later pages too
        screen.show_page(1).await.unwrap();
        screen.show_page(0).await.unwrap();
        assert!(!screen.list().rows()[3].enabled);
        assert_eq!(backend.count(Method::Get, "/clients"), 1);
    }

    #[tokio::test]
    async fn test_add_reloads_collection() {
        let backend = Arc::new(FakeBackend::new().with_clients(fixtures::clients(2)));
        let mut screen = screen(&backend);
        screen.load().await.unwrap();

        screen
            .add(&ClientForm {
                name: "Initech".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(screen.list().total(), 3);
        screen.search("initech").await.unwrap();
        assert_eq!(screen.list().rows()[0].name, "Initech");
    }

    #[tokio::test]
    async fn test_failed_update_leaves_rows() {
        let backend = Arc::new(FakeBackend::new().with_clients(fixtures::clients(3)));
        let mut screen = screen(&backend);
        screen.load().await.unwrap();
        let before = screen.list().rows().to_vec();

        let err = screen
            .update(
                ClientId::new(1),
                &ClientForm {
                    name: String::new(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err.api(), Some(ApiError::Validation(_))));
        assert_eq!(screen.list().rows(), before.as_slice());
    }

    #[tokio::test]
    async fn test_add_is_kept_when_reload_fails() {
        let backend = Arc::new(FakeBackend::new().with_clients(fixtures::clients(2)));
        let mut screen = screen(&backend);
        screen.load().await.unwrap();

        backend.fail_next(Method::Get, "/clients", 503);
        let created = screen
            .add(&ClientForm {
                name: "Initech".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(created.map(|c| c.name), Some("Initech".to_string()));
        assert!(matches!(screen.list().state(), LoadState::Failed(_)));
        assert_eq!(backend.clients().len(), 3);
    }

    #[tokio::test]
    async fn test_rename_drops_row_from_search() {
        let mut clients = fixtures::clients(40);
        clients.push(fixtures::client(41, "Acme Retail"));
        clients.push(fixtures::client(42, "ACME wholesale"));
        let backend = Arc::new(FakeBackend::new().with_clients(clients));
        let mut screen = screen(&backend);
        screen.search("acme").await.unwrap();

        screen
            .update(
                ClientId::new(41),
                &ClientForm {
                    name: "Initech".to_string(),
                },
            )
            .await
            .unwrap();

        let names: Vec<&str> = screen.list().rows().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ACME wholesale"]);
        assert_eq!(screen.list().total(), 1);
    }
}
