//! Build view models from loaded screens and API results.

use posadmin_runtime::{
    ClientList, InventoryScreen, ListController, OrdersScreen, PagedSource, ProductsScreen,
};
use posadmin_types::{
    Client, DaySalesRow, Inventory, OrderId, OrderItem, Product, SalesReportRow, SessionInfo,
};

use super::view_models::{
    ClientRowViewModel, DaySalesRowViewModel, InventoryRowViewModel, OrderItemViewModel,
    OrderItemsViewModel, OrderRowViewModel, PageViewModel, ProductRowViewModel, ReportViewModel,
    SalesReportRowViewModel, SessionViewModel,
};

fn page_of<S, T>(
    list: &ListController<S>,
    noun: &'static str,
    row: impl Fn(&S::Item) -> T,
) -> PageViewModel<T>
where
    S: PagedSource,
{
    PageViewModel {
        rows: list.rows().iter().map(row).collect(),
        page: list.page() + 1,
        page_count: list.page_count(),
        page_size: list.page_size(),
        total: list.total(),
        noun,
    }
}

pub fn client_row(client: &Client) -> ClientRowViewModel {
    ClientRowViewModel {
        id: client.id,
        name: client.name.clone(),
        enabled: client.enabled,
    }
}

pub fn present_clients(list: &ClientList) -> PageViewModel<ClientRowViewModel> {
    page_of(list, "clients", client_row)
}

pub fn product_row(screen: &ProductsScreen, product: &Product) -> ProductRowViewModel {
    ProductRowViewModel {
        id: product.id,
        name: product.name.clone(),
        barcode: product.barcode.clone(),
        mrp: product.mrp,
        client_id: product.client_id,
        client_name: screen.client_name(product.client_id),
        image_url: product.image_url.clone(),
    }
}

pub fn present_products(screen: &ProductsScreen) -> PageViewModel<ProductRowViewModel> {
    page_of(screen.list(), "products", |p| product_row(screen, p))
}

pub fn inventory_row(screen: &InventoryScreen, row: &Inventory) -> InventoryRowViewModel {
    InventoryRowViewModel {
        product_id: row.product_id,
        product_name: row.product_name.clone(),
        barcode: screen.barcode(row),
        quantity: row.quantity,
    }
}

pub fn present_inventory(screen: &InventoryScreen) -> PageViewModel<InventoryRowViewModel> {
    page_of(screen.list(), "inventory records", |r| inventory_row(screen, r))
}

fn item_row(screen: &OrdersScreen, item: &OrderItem) -> OrderItemViewModel {
    OrderItemViewModel {
        id: item.id,
        product_id: item.product_id,
        product_name: screen.product_name(item),
        quantity: item.quantity,
        selling_price: item.selling_price,
        line_total: item.line_total(),
    }
}

/// Orders page; rows that are expanded on the screen carry their items
pub fn present_orders(screen: &OrdersScreen) -> PageViewModel<OrderRowViewModel> {
    page_of(screen.list(), "orders", |order| OrderRowViewModel {
        id: order.id,
        client_id: order.client_id,
        client_name: screen.client_name(order),
        status: order.status,
        created_at: order.created_at,
        items: screen
            .expanded_items(order.id)
            .map(|items| items.iter().map(|i| item_row(screen, i)).collect()),
    })
}

pub fn present_order_items(screen: &OrdersScreen, id: OrderId) -> OrderItemsViewModel {
    let items: Vec<OrderItemViewModel> = screen
        .expanded_items(id)
        .unwrap_or_default()
        .iter()
        .map(|i| item_row(screen, i))
        .collect();
    let total = items.iter().map(|i| i.line_total).sum();
    OrderItemsViewModel {
        order_id: id,
        items,
        total,
    }
}

pub fn present_sales(rows: Vec<SalesReportRow>) -> ReportViewModel<SalesReportRowViewModel> {
    ReportViewModel {
        rows: rows
            .into_iter()
            .map(|r| SalesReportRowViewModel {
                product_name: r.product_name,
                client_name: r.client_name.unwrap_or_else(|| "-".to_string()),
                quantity: r.quantity,
                revenue: r.revenue,
            })
            .collect(),
        title: "sales",
    }
}

pub fn present_day_sales(rows: Vec<DaySalesRow>) -> ReportViewModel<DaySalesRowViewModel> {
    ReportViewModel {
        rows: rows
            .into_iter()
            .map(|r| DaySalesRowViewModel {
                date: r.date,
                invoiced_orders_count: r.invoiced_orders_count,
                invoiced_items_count: r.invoiced_items_count,
                total_revenue: r.total_revenue,
            })
            .collect(),
        title: "day sales",
    }
}

pub fn present_session(info: Option<SessionInfo>) -> SessionViewModel {
    match info {
        Some(info) => SessionViewModel {
            authenticated: true,
            email: Some(info.email),
            role: Some(info.role),
        },
        None => SessionViewModel {
            authenticated: false,
            email: None,
            role: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posadmin_client::Config;
    use posadmin_testing::{Connection, FakeBackend, fixtures};
    use posadmin_types::OrderStatus;
    use std::sync::Arc;

    fn backend() -> Arc<FakeBackend> {
        let clients = fixtures::clients(2);
        let products = fixtures::products_for(&clients, 1);
        let orders = (1..=3)
            .map(|id| {
                fixtures::order(id, 1, OrderStatus::Created, fixtures::timestamp(2024, 3, 1))
            })
            .collect();
        Arc::new(
            FakeBackend::new()
                .with_clients(clients)
                .with_products(products)
                .with_orders(orders)
                .with_items(
                    2,
                    vec![
                        fixtures::order_item(20, 2, 1, 2, 4.25),
                        fixtures::order_item(21, 2, 2, 1, 10.0),
                    ],
                ),
        )
    }

    #[tokio::test]
    async fn test_orders_page_carries_expanded_items_only() {
        let backend = backend();
        let config = Config {
            page_size: 2,
            ..Config::default()
        };
        let mut screen = OrdersScreen::new(Connection::admin(&backend).api, &config).unwrap();
        screen.load().await.unwrap();
        screen.expand(OrderId::new(2)).await.unwrap();

        let view = present_orders(&screen);
        assert_eq!(view.page, 1);
        assert_eq!(view.page_count, 2);
        assert_eq!(view.total, 3);
        assert!(view.rows[0].items.is_none());

        let items = view.rows[1].items.as_ref().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_name, "Client 001 item 1");
        assert_eq!(items[0].line_total, 8.5);
        assert_eq!(view.rows[1].client_name, "Client 001");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["pageCount"], 2);
        assert_eq!(json["rows"][1]["items"][1]["sellingPrice"], 10.0);
        assert!(json["rows"][0].get("items").is_none());
    }

    #[tokio::test]
    async fn test_order_items_total() {
        let backend = backend();
        let mut screen =
            OrdersScreen::new(Connection::admin(&backend).api, &Config::default()).unwrap();
        let id = OrderId::new(2);
        screen.load_lookups().await;
        screen.expand(id).await.unwrap();

        let view = present_order_items(&screen, id);
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.total, 18.5);
    }

    #[test]
    fn test_sales_row_without_client() {
        let view = present_sales(vec![SalesReportRow {
            product_name: "Tea".to_string(),
            client_name: None,
            quantity: 3,
            revenue: 13.5,
        }]);
        assert_eq!(view.rows[0].client_name, "-");
    }
}
