use std::fmt;

use super::formatters::{Table, money, truncate};
use super::view_models::{
    ClientRowViewModel, DaySalesRowViewModel, FileWrittenViewModel, InventoryRowViewModel,
    MutationViewModel, OrderItemViewModel, OrderItemsViewModel, OrderRowViewModel,
    PageViewModel, ProductRowViewModel, ReportViewModel, SalesReportRowViewModel,
    SessionViewModel, UploadViewModel,
};

/// A row that knows its table columns
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;

    /// Nested detail printed below the page, e.g. expanded order items
    fn detail(&self) -> Option<(String, Table)> {
        None
    }
}

impl TableRow for ClientRowViewModel {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "STATUS"];

    fn cells(&self) -> Vec<String> {
        let status = if self.enabled { "enabled" } else { "disabled" };
        vec![self.id.to_string(), truncate(&self.name, 40), status.to_string()]
    }
}

impl TableRow for ProductRowViewModel {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "BARCODE", "MRP", "CLIENT"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate(&self.name, 40),
            self.barcode.clone(),
            money(self.mrp),
            truncate(&self.client_name, 30),
        ]
    }
}

impl TableRow for InventoryRowViewModel {
    const HEADERS: &'static [&'static str] = &["PRODUCT", "NAME", "BARCODE", "QUANTITY"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.product_id.to_string(),
            truncate(&self.product_name, 40),
            self.barcode.clone(),
            self.quantity.to_string(),
        ]
    }
}

impl TableRow for OrderRowViewModel {
    const HEADERS: &'static [&'static str] = &["ID", "CLIENT", "STATUS", "CREATED"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate(&self.client_name, 30),
            self.status.to_string(),
            self.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]
    }

    fn detail(&self) -> Option<(String, Table)> {
        let items = self.items.as_ref()?;
        Some((format!("Order {} items", self.id), items_table(items)))
    }
}

impl TableRow for SalesReportRowViewModel {
    const HEADERS: &'static [&'static str] = &["PRODUCT", "CLIENT", "QUANTITY", "REVENUE"];

    fn cells(&self) -> Vec<String> {
        vec![
            truncate(&self.product_name, 40),
            truncate(&self.client_name, 30),
            self.quantity.to_string(),
            money(self.revenue),
        ]
    }
}

impl TableRow for DaySalesRowViewModel {
    const HEADERS: &'static [&'static str] = &["DATE", "ORDERS", "ITEMS", "REVENUE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            self.invoiced_orders_count.to_string(),
            self.invoiced_items_count.to_string(),
            money(self.total_revenue),
        ]
    }
}

fn items_table(items: &[OrderItemViewModel]) -> Table {
    let mut table = Table::new(&["ITEM", "PRODUCT", "QUANTITY", "PRICE", "TOTAL"]);
    for item in items {
        table.push(vec![
            item.id.to_string(),
            truncate(&item.product_name, 40),
            item.quantity.to_string(),
            money(item.selling_price),
            money(item.line_total),
        ]);
    }
    table
}

fn table_of<T: TableRow>(rows: &[T]) -> Table {
    let mut table = Table::new(T::HEADERS);
    for row in rows {
        table.push(row.cells());
    }
    table
}

impl<T: TableRow> fmt::Display for PageViewModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            if self.total == 0 {
                writeln!(f, "No {} found.", self.noun)?;
            } else {
                writeln!(
                    f,
                    "Page {} is empty ({} {} in {} pages).",
                    self.page, self.total, self.noun, self.page_count
                )?;
            }
            return Ok(());
        }

        write!(f, "{}", table_of(&self.rows))?;
        writeln!(
            f,
            "\nPage {} of {} ({} {})",
            self.page, self.page_count, self.total, self.noun
        )?;

        for row in &self.rows {
            if let Some((title, table)) = row.detail() {
                writeln!(f, "\n{}", title)?;
                if table.is_empty() {
                    writeln!(f, "  (no items)")?;
                } else {
                    write!(f, "{}", table)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for OrderItemsViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return writeln!(f, "Order {} has no items.", self.order_id);
        }
        write!(f, "{}", items_table(&self.items))?;
        writeln!(f, "\nOrder total: {}", money(self.total))
    }
}

impl<T: TableRow> fmt::Display for ReportViewModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "No {} data for the selected period.", self.title);
        }
        write!(f, "{}", table_of(&self.rows))
    }
}

impl fmt::Display for SessionViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.email, &self.role) {
            (Some(email), Some(role)) if self.authenticated => {
                writeln!(f, "Logged in as {} ({})", email, role)
            }
            _ => writeln!(f, "Not logged in. Run 'posadmin login' first."),
        }
    }
}

impl<T> fmt::Display for MutationViewModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)
    }
}

impl fmt::Display for UploadViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Imported {} record(s) from {}",
            self.imported,
            self.file.display()
        )
    }
}

impl fmt::Display for FileWrittenViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Wrote {} bytes to {}", self.bytes, self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posadmin_types::ClientId;

    fn clients_page(rows: Vec<ClientRowViewModel>, page: usize, total: usize) -> PageViewModel<ClientRowViewModel> {
        PageViewModel {
            rows,
            page,
            page_count: total.div_ceil(10),
            page_size: 10,
            total,
            noun: "clients",
        }
    }

    #[test]
    fn test_client_page_plain() {
        let view = clients_page(
            vec![
                ClientRowViewModel {
                    id: ClientId::new(1),
                    name: "Acme".to_string(),
                    enabled: true,
                },
                ClientRowViewModel {
                    id: ClientId::new(2),
                    name: "Globex".to_string(),
                    enabled: false,
                },
            ],
            1,
            2,
        );

        insta::assert_snapshot!(view.to_string(), @r"
        ID  NAME    STATUS
        --  ------  --------
        1   Acme    enabled
        2   Globex  disabled

        Page 1 of 1 (2 clients)
        ");
    }

    #[test]
    fn test_empty_page_messages() {
        assert_eq!(clients_page(vec![], 1, 0).to_string(), "No clients found.\n");
        assert_eq!(
            clients_page(vec![], 9, 25).to_string(),
            "Page 9 is empty (25 clients in 3 pages).\n"
        );
    }

    #[test]
    fn test_session_view() {
        let anonymous = SessionViewModel {
            authenticated: false,
            email: None,
            role: None,
        };
        assert!(anonymous.to_string().starts_with("Not logged in"));

        let admin = SessionViewModel {
            authenticated: true,
            email: Some("admin@pos.test".to_string()),
            role: Some("supervisor".to_string()),
        };
        assert_eq!(admin.to_string(), "Logged in as admin@pos.test (supervisor)\n");
    }
}
