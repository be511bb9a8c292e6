use anyhow::Result;
use posadmin_runtime::ProductsScreen;
use posadmin_types::{ProductFilter, ProductForm};

use super::upload;
use crate::args::{ProductCommand, ProductFields};
use crate::context::ExecutionContext;
use crate::presentation::MutationViewModel;
use crate::presentation::presenters::{present_products, product_row};

fn form(fields: ProductFields) -> ProductForm {
    ProductForm {
        name: fields.name,
        barcode: fields.barcode,
        mrp: fields.mrp,
        client_id: fields.client_id,
        image_url: fields.image_url,
    }
}

pub async fn handle(ctx: &ExecutionContext, command: ProductCommand) -> Result<()> {
    let mut screen = ProductsScreen::new(ctx.api()?.clone(), ctx.config())?;
    let renderer = ctx.renderer();

    match command {
        ProductCommand::List {
            name,
            barcode,
            client_id,
            page,
        } => {
            let list = screen.list_mut();
            list.set_filter(ProductFilter {
                name,
                barcode,
                client_id,
            });
            list.set_page(page.index());
            screen.load().await?;
            renderer.render(&present_products(&screen))
        }
        ProductCommand::Add { fields } => {
            let form = form(fields);
            let created = screen.add(&form).await?;
            renderer.render(&MutationViewModel {
                message: format!("Added product '{}' ({})", form.name, form.barcode),
                record: created.as_ref().map(|p| product_row(&screen, p)),
            })
        }
        ProductCommand::Update { id, fields } => {
            let updated = screen.update(id, &form(fields)).await?;
            renderer.render(&MutationViewModel {
                message: format!("Updated product {}", id),
                record: updated.as_ref().map(|p| product_row(&screen, p)),
            })
        }
        ProductCommand::Upload { file, errors } => {
            let tsv = upload::read_tsv(&file)?;
            let result = screen.upload(tsv).await;
            renderer.render(&upload::finish(&file, errors, result)?)
        }
    }
}
