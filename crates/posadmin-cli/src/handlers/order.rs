use anyhow::{Context as _, Result};
use posadmin_runtime::OrdersScreen;
use posadmin_types::{NewOrder, Order, OrderFilter, OrderId};
use std::path::PathBuf;

use crate::args::OrderCommand;
use crate::context::ExecutionContext;
use crate::presentation::presenters::{present_order_items, present_orders};
use crate::presentation::{FileWrittenViewModel, MutationViewModel};

pub async fn handle(ctx: &ExecutionContext, command: OrderCommand) -> Result<()> {
    let renderer = ctx.renderer();

    if let OrderCommand::List {
        status,
        client_id,
        from,
        to,
        ..
    } = &command
    {
        // Reject a bad range before the client is even built
        OrderFilter {
            status: *status,
            client_id: *client_id,
            start_date: *from,
            end_date: *to,
        }
        .validate()?;
    }

    let mut screen = OrdersScreen::new(ctx.api()?.clone(), ctx.config())?;

    match command {
        OrderCommand::List {
            status,
            client_id,
            from,
            to,
            expand,
            page,
        } => {
            let list = screen.list_mut();
            list.set_filter(OrderFilter {
                status,
                client_id,
                start_date: from,
                end_date: to,
            });
            list.set_page(page.index());
            screen.load().await?;

            if expand {
                let ids: Vec<OrderId> = screen.list().rows().iter().map(|o| o.id).collect();
                for id in ids {
                    screen.expand(id).await?;
                }
            }
            renderer.render(&present_orders(&screen))
        }
        OrderCommand::Items { id } => {
            screen.load_lookups().await;
            screen.expand(id).await?;
            renderer.render(&present_order_items(&screen, id))
        }
        OrderCommand::Create { client_id, items } => {
            let created = screen.create(&NewOrder { client_id, items }).await?;
            let message = match &created {
                Some(order) => format!("Created order {} for client {}", order.id, client_id),
                None => format!("Created order for client {}", client_id),
            };
            renderer.render(&MutationViewModel {
                message,
                record: created,
            })
        }
        OrderCommand::Invoice { id } => {
            let order = screen.invoice(id).await?;
            renderer.render(&transition("Invoiced", id, order))
        }
        OrderCommand::Cancel { id } => {
            let order = screen.cancel(id).await?;
            renderer.render(&transition("Cancelled", id, order))
        }
        OrderCommand::Download { id, output } => {
            let bytes = screen.download_invoice(id).await?;
            let path = output.unwrap_or_else(|| PathBuf::from(format!("invoice-{}.pdf", id)));
            std::fs::write(&path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            renderer.render(&FileWrittenViewModel {
                path,
                bytes: bytes.len(),
            })
        }
    }
}

fn transition(verb: &str, id: OrderId, order: Option<Order>) -> MutationViewModel<Order> {
    MutationViewModel {
        message: format!("{} order {}", verb, id),
        record: order,
    }
}
