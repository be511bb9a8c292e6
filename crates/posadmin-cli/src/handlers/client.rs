use anyhow::Result;
use posadmin_runtime::ClientsScreen;
use posadmin_types::{ClientFilter, ClientForm};

use crate::args::{ClientCommand, PageArgs};
use crate::context::ExecutionContext;
use crate::presentation::MutationViewModel;
use crate::presentation::presenters::{client_row, present_clients};

pub async fn handle(ctx: &ExecutionContext, command: ClientCommand) -> Result<()> {
    let mut screen = ClientsScreen::new(ctx.api()?.clone(), ctx.config())?;
    let renderer = ctx.renderer();

    match command {
        ClientCommand::List { search, page } => {
            list(&mut screen, search, page).await?;
            renderer.render(&present_clients(screen.list()))
        }
        ClientCommand::Add { name } => {
            let created = screen.add(&ClientForm { name: name.clone() }).await?;
            renderer.render(&MutationViewModel {
                message: format!("Added client '{}'", name),
                record: created.as_ref().map(client_row),
            })
        }
        ClientCommand::Update { id, name } => {
            let updated = screen.update(id, &ClientForm { name }).await?;
            renderer.render(&MutationViewModel {
                message: format!("Updated client {}", id),
                record: updated.as_ref().map(client_row),
            })
        }
        ClientCommand::Toggle { id } => {
            let toggled = screen.toggle(id).await?;
            let message = match &toggled {
                Some(c) if c.enabled => format!("Client {} enabled", id),
                Some(_) => format!("Client {} disabled", id),
                None => format!("Toggled client {}", id),
            };
            renderer.render(&MutationViewModel {
                message,
                record: toggled.as_ref().map(client_row),
            })
        }
    }
}

async fn list(screen: &mut ClientsScreen, search: Option<String>, page: PageArgs) -> Result<()> {
    let list = screen.list_mut();
    if let Some(term) = search {
        list.set_filter(ClientFilter::search(term));
    }
    list.set_page(page.index());
    screen.load().await?;
    Ok(())
}
