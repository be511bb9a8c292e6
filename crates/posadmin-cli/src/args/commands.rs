use chrono::NaiveDate;
use clap::{Args, Subcommand};
use posadmin_types::{ClientId, NewOrderItem, OrderId, OrderStatus, ProductId};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Verify credentials against the backend and cache them")]
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    #[command(about = "Forget cached credentials")]
    Logout,

    #[command(about = "Show who the cached credentials belong to")]
    Whoami,

    #[command(about = "Manage clients")]
    Client {
        #[command(subcommand)]
        command: ClientCommand,
    },

    #[command(about = "Manage products")]
    Product {
        #[command(subcommand)]
        command: ProductCommand,
    },

    #[command(about = "View and adjust stock levels")]
    Inventory {
        #[command(subcommand)]
        command: InventoryCommand,
    },

    #[command(about = "Create, invoice and cancel orders")]
    Order {
        #[command(subcommand)]
        command: OrderCommand,
    },

    #[command(about = "Sales reports")]
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
}

/// 1-based page selector shared by every list command
#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

impl PageArgs {
    /// Zero-based index used by the list controllers
    pub fn index(&self) -> usize {
        self.page.saturating_sub(1) as usize
    }
}

#[derive(Subcommand)]
pub enum ClientCommand {
    #[command(about = "List clients, optionally filtered by name")]
    List {
        #[arg(long, help = "Case-insensitive substring of the client name")]
        search: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    #[command(about = "Add a client")]
    Add {
        #[arg(long)]
        name: String,
    },

    #[command(about = "Rename a client")]
    Update {
        id: ClientId,

        #[arg(long)]
        name: String,
    },

    #[command(about = "Enable or disable a client")]
    Toggle { id: ClientId },
}

#[derive(Args, Debug, Clone)]
pub struct ProductFields {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub barcode: String,

    #[arg(long)]
    pub mrp: f64,

    #[arg(long)]
    pub client_id: ClientId,

    #[arg(long)]
    pub image_url: Option<String>,
}

#[derive(Subcommand)]
pub enum ProductCommand {
    #[command(about = "List products")]
    List {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        barcode: Option<String>,

        #[arg(long)]
        client_id: Option<ClientId>,

        #[command(flatten)]
        page: PageArgs,
    },

    #[command(about = "Add a product")]
    Add {
        #[command(flatten)]
        fields: ProductFields,
    },

    #[command(about = "Replace a product's details")]
    Update {
        id: ProductId,

        #[command(flatten)]
        fields: ProductFields,
    },

    #[command(about = "Import products from a TSV file")]
    Upload {
        file: PathBuf,

        #[arg(long, help = "Where to write the error report if the file is rejected")]
        errors: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum InventoryCommand {
    #[command(about = "List stock levels")]
    List {
        #[arg(long)]
        product_name: Option<String>,

        #[arg(long)]
        barcode: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    #[command(about = "Set the quantity on hand for a product")]
    Update {
        product_id: ProductId,

        #[arg(long)]
        quantity: i64,
    },

    #[command(about = "Import stock levels from a TSV file")]
    Upload {
        file: PathBuf,

        #[arg(long, help = "Where to write the error report if the file is rejected")]
        errors: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum OrderCommand {
    #[command(about = "List orders")]
    List {
        #[arg(long, help = "CREATED, INVOICED or CANCELLED")]
        status: Option<OrderStatus>,

        #[arg(long)]
        client_id: Option<ClientId>,

        #[arg(long, help = "First day to include (YYYY-MM-DD)")]
        from: Option<NaiveDate>,

        #[arg(long, help = "Last day to include (YYYY-MM-DD)")]
        to: Option<NaiveDate>,

        #[arg(long, help = "Also show the line items of every listed order")]
        expand: bool,

        #[command(flatten)]
        page: PageArgs,
    },

    #[command(about = "Show the line items of an order")]
    Items { id: OrderId },

    #[command(about = "Create an order")]
    Create {
        #[arg(long)]
        client_id: ClientId,

        #[arg(
            long = "item",
            required = true,
            help = "Line item as productId:quantity:sellingPrice (repeatable)"
        )]
        items: Vec<NewOrderItem>,
    },

    #[command(about = "Generate the invoice for an order")]
    Invoice { id: OrderId },

    #[command(about = "Save the invoice PDF of an order")]
    Download {
        id: OrderId,

        #[arg(long, short, help = "Output file (default: invoice-<id>.pdf)")]
        output: Option<PathBuf>,
    },

    #[command(about = "Cancel an order")]
    Cancel { id: OrderId },
}

#[derive(Subcommand)]
pub enum ReportCommand {
    #[command(about = "Revenue and quantity per product")]
    Sales {
        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,

        #[arg(long)]
        client_id: Option<ClientId>,

        #[arg(long, help = "Write the report as CSV to this file instead")]
        export: Option<PathBuf>,
    },

    #[command(about = "Invoiced orders and revenue per day")]
    DaySales {
        #[arg(long)]
        from: Option<NaiveDate>,

        #[arg(long)]
        to: Option<NaiveDate>,

        #[arg(long, help = "Write the report as CSV to this file instead")]
        export: Option<PathBuf>,
    },
}
