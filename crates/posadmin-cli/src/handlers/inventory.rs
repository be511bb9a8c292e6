use anyhow::Result;
use posadmin_runtime::InventoryScreen;
use posadmin_types::InventoryFilter;

use super::upload;
use crate::args::InventoryCommand;
use crate::context::ExecutionContext;
use crate::presentation::MutationViewModel;
use crate::presentation::presenters::{inventory_row, present_inventory};

pub async fn handle(ctx: &ExecutionContext, command: InventoryCommand) -> Result<()> {
    let mut screen = InventoryScreen::new(ctx.api()?.clone(), ctx.config())?;
    let renderer = ctx.renderer();

    match command {
        InventoryCommand::List {
            product_name,
            barcode,
            page,
        } => {
            let list = screen.list_mut();
            list.set_filter(InventoryFilter {
                product_name,
                barcode,
            });
            list.set_page(page.index());
            screen.load().await?;
            renderer.render(&present_inventory(&screen))
        }
        InventoryCommand::Update {
            product_id,
            quantity,
        } => {
            let updated = screen.update(product_id, quantity).await?;
            renderer.render(&MutationViewModel {
                message: format!("Set stock of product {} to {}", product_id, quantity),
                record: updated.as_ref().map(|r| inventory_row(&screen, r)),
            })
        }
        InventoryCommand::Upload { file, errors } => {
            let tsv = upload::read_tsv(&file)?;
            let result = screen.upload(tsv).await;
            renderer.render(&upload::finish(&file, errors, result)?)
        }
    }
}
