//! Sample records and TSV payloads.

use chrono::{DateTime, TimeZone, Utc};
use posadmin_types::{
    Client, ClientId, Inventory, Order, OrderId, OrderItem, OrderItemId, OrderStatus, Product,
    ProductId,
};

/// `count` enabled clients with ids starting at 1, named "Client 001", ...
pub fn clients(count: usize) -> Vec<Client> {
    (1..=count)
        .map(|i| client(i as i64, &format!("Client {:03}", i)))
        .collect()
}

pub fn client(id: i64, name: &str) -> Client {
    Client {
        id: ClientId::new(id),
        name: name.to_string(),
        enabled: true,
    }
}

pub fn product(id: i64, name: &str, client_id: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        barcode: format!("bc-{:04}", id),
        mrp: 10.0 * id as f64,
        client_id: ClientId::new(client_id),
        image_url: None,
    }
}

/// `per_client` products for each client, ids assigned sequentially
pub fn products_for(clients: &[Client], per_client: usize) -> Vec<Product> {
    let mut next_id = 1;
    let mut products = Vec::new();
    for client in clients {
        for n in 0..per_client {
            products.push(product(
                next_id,
                &format!("{} item {}", client.name, n + 1),
                client.id.get(),
            ));
            next_id += 1;
        }
    }
    products
}

/// One inventory row per product
pub fn inventory_for(products: &[Product], quantity: i64) -> Vec<Inventory> {
    products
        .iter()
        .map(|p| Inventory {
            product_id: p.id,
            product_name: p.name.clone(),
            quantity,
        })
        .collect()
}

pub fn timestamp(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 10, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub fn order(id: i64, client_id: i64, status: OrderStatus, created_at: DateTime<Utc>) -> Order {
    Order {
        id: OrderId::new(id),
        client_id: ClientId::new(client_id),
        status,
        created_at,
        items: Vec::new(),
    }
}

pub fn order_item(id: i64, order_id: i64, product_id: i64, quantity: i64, price: f64) -> OrderItem {
    OrderItem {
        id: OrderItemId::new(id),
        order_id: OrderId::new(order_id),
        product_id: ProductId::new(product_id),
        quantity,
        selling_price: price,
    }
}

/// A product import file with `rows` data rows
pub fn product_tsv(rows: usize) -> String {
    let mut tsv = String::from("name\tbarcode\tmrp\tclientId\n");
    for i in 1..=rows {
        tsv.push_str(&format!("Imported {}\timp-{:04}\t{}.50\t1\n", i, i, i));
    }
    tsv
}

/// Error report the backend sends back for `rows` malformed input records
pub fn tsv_error_report(rows: usize) -> String {
    let mut tsv = String::from("name\tbarcode\tmrp\tclientId\trow\terror\n");
    for i in 1..=rows {
        tsv.push_str(&format!(
            "Bad {}\tbad-{}\tnot-a-number\t1\t{}\tmrp must be a number\n",
            i,
            i,
            i + 1
        ));
    }
    tsv
}
