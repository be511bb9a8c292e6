//! In-memory PoS backend implementing [`Transport`].
//!
//! Speaks the same JSON contract as the real server closely enough for the
//! list controllers: Basic auth with two users, server-side filtering and
//! paging, mutations that return the updated entity, TSV uploads and
//! reports computed from invoiced orders. Every request is recorded so
//! tests can count round trips.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use posadmin_client::{
    ApiClient, ApiRequest, ApiResponse, Body, Credentials, Error, MemoryCredentialStore, Method,
    SessionManager, Transport,
};
use posadmin_types::{
    Client, ClientId, DaySalesRow, Inventory, Order, OrderId, OrderItem, OrderItemId,
    OrderStatus, Product, ProductId, SalesReportRow,
};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const ADMIN_EMAIL: &str = "admin@pos.test";
pub const ADMIN_PASSWORD: &str = "secret";
pub const OPERATOR_EMAIL: &str = "operator@pos.test";
pub const OPERATOR_PASSWORD: &str = "operator";

const BASE_URL: &str = "http://fake-backend.test/api";

/// A request as the backend saw it
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub body: Option<Body>,
}

impl RecordedRequest {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

struct User {
    credentials: Credentials,
    role: &'static str,
}

struct BackendState {
    clients: Vec<Client>,
    products: Vec<Product>,
    inventory: Vec<Inventory>,
    orders: Vec<Order>,
    items: HashMap<OrderId, Vec<OrderItem>>,
    users: Vec<User>,
    requests: Vec<RecordedRequest>,
    scripted: VecDeque<ApiResponse>,
    failures: Vec<(Method, String, u16)>,
    stalls: Vec<(Method, String)>,
    tsv_rejection: Option<String>,
    offline: bool,
    next_id: i64,
}

pub struct FakeBackend {
    state: Mutex<BackendState>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BackendState {
                clients: Vec::new(),
                products: Vec::new(),
                inventory: Vec::new(),
                orders: Vec::new(),
                items: HashMap::new(),
                users: vec![
                    User {
                        credentials: Credentials::new(ADMIN_EMAIL, ADMIN_PASSWORD),
                        role: "supervisor",
                    },
                    User {
                        credentials: Credentials::new(OPERATOR_EMAIL, OPERATOR_PASSWORD),
                        role: "operator",
                    },
                ],
                requests: Vec::new(),
                scripted: VecDeque::new(),
                failures: Vec::new(),
                stalls: Vec::new(),
                tsv_rejection: None,
                offline: false,
                next_id: 1000,
            }),
        }
    }

    pub fn with_clients(self, clients: Vec<Client>) -> Self {
        self.lock().clients = clients;
        self
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.lock().products = products;
        self
    }

    pub fn with_inventory(self, inventory: Vec<Inventory>) -> Self {
        self.lock().inventory = inventory;
        self
    }

    pub fn with_orders(self, orders: Vec<Order>) -> Self {
        self.lock().orders = orders;
        self
    }

    pub fn with_items(self, order_id: i64, items: Vec<OrderItem>) -> Self {
        self.lock().items.insert(OrderId::new(order_id), items);
        self
    }

    /// Answer the next request (whatever it is) with this status and body
    pub fn respond_next(&self, status: u16, body: &str) {
        self.lock()
            .scripted
            .push_back(ApiResponse::new(status, body.as_bytes().to_vec()));
    }

    /// Fail the next request to `method path` with this status, letting
    /// everything before it through
    pub fn fail_next(&self, method: Method, path: &str, status: u16) {
        self.lock()
            .failures
            .push((method, path.to_string(), status));
    }

    /// Never answer the next request to `method path`
    pub fn stall_next(&self, method: Method, path: &str) {
        self.lock().stalls.push((method, path.to_string()));
    }

    /// Reject the next TSV upload with this error report
    pub fn reject_next_upload(&self, report: impl Into<String>) {
        self.lock().tsv_rejection = Some(report.into());
    }

    /// Simulate the backend being unreachable
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Number of recorded requests to `method path`
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    pub fn clients(&self) -> Vec<Client> {
        self.lock().clients.clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    pub fn inventory(&self) -> Vec<Inventory> {
        self.lock().inventory.clone()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.lock().orders.clone()
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An API client wired to a [`FakeBackend`]
pub struct Connection {
    pub api: ApiClient,
    pub store: Arc<MemoryCredentialStore>,
}

impl Connection {
    /// Client with the supervisor's credentials already cached
    pub fn admin(backend: &Arc<FakeBackend>) -> Self {
        Self::with_credentials(
            backend,
            Some(Credentials::new(ADMIN_EMAIL, ADMIN_PASSWORD)),
        )
    }

    /// Client with the operator's (read-mostly) credentials cached
    pub fn operator(backend: &Arc<FakeBackend>) -> Self {
        Self::with_credentials(
            backend,
            Some(Credentials::new(OPERATOR_EMAIL, OPERATOR_PASSWORD)),
        )
    }

    /// Client with nothing cached
    pub fn anonymous(backend: &Arc<FakeBackend>) -> Self {
        Self::with_credentials(backend, None)
    }

    pub fn with_credentials(backend: &Arc<FakeBackend>, credentials: Option<Credentials>) -> Self {
        let store = Arc::new(match credentials {
            Some(credentials) => MemoryCredentialStore::with_credentials(credentials),
            None => MemoryCredentialStore::new(),
        });
        let session = Arc::new(SessionManager::new(store.clone()));
        session
            .restore_cached()
            .expect("memory store never fails");
        let transport: Arc<dyn Transport> = backend.clone();
        Self {
            api: ApiClient::new(transport, session),
            store,
        }
    }
}

#[async_trait]
impl Transport for FakeBackend {
    fn base_url(&self) -> &str {
        BASE_URL
    }

    async fn send(&self, request: ApiRequest) -> posadmin_client::Result<ApiResponse> {
        let stalled = {
            let mut state = self.lock();
            state.requests.push(RecordedRequest {
                method: request.method,
                path: request.path.clone(),
                query: request.query.clone(),
                authorization: request.authorization.clone(),
                body: request.body.clone(),
            });
            take_match(&mut state.stalls, |(m, p)| {
                *m == request.method && *p == request.path
            })
            .is_some()
        };
        if stalled {
            std::future::pending::<()>().await;
        }

        let mut state = self.lock();
        if state.offline {
            return Err(Error::Network {
                url: BASE_URL.to_string(),
                message: "connection refused".to_string(),
            });
        }
        if let Some((_, _, status)) = take_match(&mut state.failures, |(m, p, _)| {
            *m == request.method && *p == request.path
        }) {
            return Ok(message(status, "scripted failure"));
        }
        if let Some(response) = state.scripted.pop_front() {
            return Ok(response);
        }
        Ok(state.route(&request))
    }
}

fn take_match<T>(queue: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> Option<T> {
    let index = queue.iter().position(matches)?;
    Some(queue.remove(index))
}

fn ok<T: Serialize + ?Sized>(value: &T) -> ApiResponse {
    ApiResponse::json_value(200, &serde_json::to_value(value).expect("serializable fixture"))
}

fn created<T: Serialize + ?Sized>(value: &T) -> ApiResponse {
    ApiResponse::json_value(201, &serde_json::to_value(value).expect("serializable fixture"))
}

fn message(status: u16, text: &str) -> ApiResponse {
    ApiResponse::json_value(status, &json!({ "message": text }))
}

fn field_error(summary: &str, field: &str, text: &str) -> ApiResponse {
    ApiResponse::json_value(
        400,
        &json!({ "message": summary, "errors": [{ "field": field, "message": text }] }),
    )
}

fn not_found() -> ApiResponse {
    message(404, "Not found")
}

/// Slice `items` into the requested page and wrap it in the paged envelope.
///
/// `spring` selects the `content`/`totalElements` field names.
fn paged<T: Serialize>(items: &[T], page: usize, page_size: usize, spring: bool) -> ApiResponse {
    let start = page.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    let slice = serde_json::to_value(&items[start..end]).expect("serializable fixture");
    let body = if spring {
        json!({ "content": slice, "totalElements": items.len() })
    } else {
        json!({ "data": slice, "total": items.len() })
    };
    ApiResponse::json_value(200, &body)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn json_str<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str).map(str::trim)
}

fn json_date(body: &Value, key: &str) -> Option<NaiveDate> {
    json_str(body, key).and_then(|s| s.parse().ok())
}

fn in_range(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    start.is_none_or(|s| date >= s) && end.is_none_or(|e| date <= e)
}

impl BackendState {
    fn role_for(&self, authorization: Option<&str>) -> Option<&'static str> {
        let header = authorization?;
        self.users
            .iter()
            .find(|u| u.credentials.basic_header() == header)
            .map(|u| u.role)
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn route(&mut self, request: &ApiRequest) -> ApiResponse {
        let Some(role) = self.role_for(request.authorization.as_deref()) else {
            return message(401, "Unauthorized");
        };

        let segments: Vec<&str> = request
            .path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let read_only = request.method == Method::Get
            || segments.last() == Some(&"list")
            || segments.first() == Some(&"reports");
        if role == "operator" && !read_only {
            return message(403, "Supervisor role required");
        }

        let body = match &request.body {
            Some(Body::Json(value)) => value.clone(),
            _ => Value::Null,
        };

        let id = |index: usize| segments.get(index).and_then(|s| s.parse::<i64>().ok());

        match (request.method, segments.as_slice()) {
            (Method::Get, ["session"]) => {
                let email = request
                    .authorization
                    .as_deref()
                    .and_then(|h| {
                        self.users
                            .iter()
                            .find(|u| u.credentials.basic_header() == h)
                    })
                    .map(|u| u.credentials.email.clone())
                    .unwrap_or_default();
                ok(&json!({ "email": email, "role": role }))
            }

            (Method::Get, ["clients"]) => match (
                request.query_value("page").and_then(|p| p.parse().ok()),
                request.query_value("pageSize").and_then(|p| p.parse().ok()),
            ) {
                (Some(page), Some(page_size)) => paged(&self.clients, page, page_size, true),
                _ => ok(&self.clients),
            },
            (Method::Post, ["clients"]) => self.save_client(None, &body),
            (Method::Put, ["clients", _]) => match id(1) {
                Some(id) => self.save_client(Some(ClientId::new(id)), &body),
                None => not_found(),
            },
            (Method::Patch, ["clients", _, "toggle"]) => {
                let Some(client) = id(1).and_then(|id| {
                    self.clients.iter_mut().find(|c| c.id == ClientId::new(id))
                }) else {
                    return not_found();
                };
                client.enabled = !client.enabled;
                ok(&*client)
            }

            (Method::Get, ["products"]) => ok(&self.products),
            (Method::Post, ["products", "list"]) => {
                let name = json_str(&body, "name").filter(|s| !s.is_empty());
                let barcode = json_str(&body, "barcode").filter(|s| !s.is_empty());
                let client_id = body.get("clientId").and_then(Value::as_i64);
                let matching: Vec<&Product> = self
                    .products
                    .iter()
                    .filter(|p| name.is_none_or(|n| contains_ci(&p.name, n)))
                    .filter(|p| barcode.is_none_or(|b| p.barcode == b))
                    .filter(|p| client_id.is_none_or(|c| p.client_id.get() == c))
                    .collect();
                let (page, page_size) = page_from_body(&body);
                paged(&matching, page, page_size, false)
            }
            (Method::Post, ["products"]) => self.save_product(None, &body),
            (Method::Put, ["products", _]) => match id(1) {
                Some(id) => self.save_product(Some(ProductId::new(id)), &body),
                None => not_found(),
            },

            (Method::Post, ["inventory", "list"]) => {
                let name = json_str(&body, "productName").filter(|s| !s.is_empty());
                let barcode = json_str(&body, "barcode").filter(|s| !s.is_empty());
                let barcode_product = barcode.map(|b| {
                    self.products
                        .iter()
                        .find(|p| p.barcode == b)
                        .map(|p| p.id)
                });
                let matching: Vec<&Inventory> = self
                    .inventory
                    .iter()
                    .filter(|i| name.is_none_or(|n| contains_ci(&i.product_name, n)))
                    .filter(|i| barcode_product.is_none_or(|p| p == Some(i.product_id)))
                    .collect();
                let (page, page_size) = page_from_body(&body);
                paged(&matching, page, page_size, true)
            }
            (Method::Put, ["inventory", _]) => {
                let quantity = body.get("quantity").and_then(Value::as_i64);
                let Some(quantity) = quantity.filter(|q| *q >= 0) else {
                    return field_error("Invalid inventory", "quantity", "must be zero or more");
                };
                let Some(row) = id(1).and_then(|id| {
                    self.inventory
                        .iter_mut()
                        .find(|i| i.product_id == ProductId::new(id))
                }) else {
                    return not_found();
                };
                row.quantity = quantity;
                ok(&*row)
            }

            (Method::Post, [_, "upload", "tsv"]) => match self.tsv_rejection.take() {
                Some(report) => ApiResponse {
                    status: 400,
                    content_type: Some("text/tab-separated-values".to_string()),
                    body: report.into_bytes(),
                },
                None => {
                    let rows = match &request.body {
                        Some(Body::Text { text, .. }) => text
                            .lines()
                            .skip(1)
                            .filter(|l| !l.trim().is_empty())
                            .count(),
                        _ => 0,
                    };
                    ok(&json!({ "length": rows }))
                }
            },

            (Method::Get, ["orders"]) => {
                let status: Option<OrderStatus> =
                    request.query_value("status").and_then(|s| s.parse().ok());
                let client_id: Option<i64> =
                    request.query_value("clientId").and_then(|s| s.parse().ok());
                let start: Option<NaiveDate> =
                    request.query_value("startDate").and_then(|s| s.parse().ok());
                let end: Option<NaiveDate> =
                    request.query_value("endDate").and_then(|s| s.parse().ok());
                let matching: Vec<&Order> = self
                    .orders
                    .iter()
                    .filter(|o| status.is_none_or(|s| o.status == s))
                    .filter(|o| client_id.is_none_or(|c| o.client_id.get() == c))
                    .filter(|o| in_range(o.created_at.date_naive(), start, end))
                    .collect();
                let page = request
                    .query_value("page")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(0);
                let page_size = request
                    .query_value("pageSize")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(10);
                paged(&matching, page, page_size, false)
            }
            (Method::Post, ["orders"]) => self.create_order(&body),
            (Method::Get, ["orders", _, "items"]) => match id(1) {
                Some(id) if self.orders.iter().any(|o| o.id == OrderId::new(id)) => ok(self
                    .items
                    .get(&OrderId::new(id))
                    .map(Vec::as_slice)
                    .unwrap_or(&[])),
                _ => not_found(),
            },
            (Method::Post, ["orders", _, "invoice"]) => {
                self.transition(id(1), OrderStatus::Invoiced, "invoiced")
            }
            (Method::Post, ["orders", _, "cancel"]) => {
                self.transition(id(1), OrderStatus::Cancelled, "cancelled")
            }
            (Method::Get, ["orders", _, "invoice", "download"]) => {
                let Some(order) = id(1).and_then(|id| {
                    self.orders.iter().find(|o| o.id == OrderId::new(id))
                }) else {
                    return not_found();
                };
                if order.status != OrderStatus::Invoiced {
                    return message(400, "Invoice not generated yet");
                }
                ApiResponse {
                    status: 200,
                    content_type: Some("application/pdf".to_string()),
                    body: format!("%PDF-1.4\n% invoice for order {}\n", order.id).into_bytes(),
                }
            }

            (Method::Post, ["reports", "sales"]) => ok(&self.sales_report(&body)),
            (Method::Post, ["reports", "day-sales"]) => ok(&self.day_sales_report(&body)),
            (Method::Post, ["reports", "sales", "export"]) => {
                let mut csv = String::from("productName,clientName,quantity,revenue\n");
                for row in self.sales_report(&body) {
                    csv.push_str(&format!(
                        "{},{},{},{:.2}\n",
                        row.product_name,
                        row.client_name.unwrap_or_default(),
                        row.quantity,
                        row.revenue
                    ));
                }
                ApiResponse::new(200, csv.into_bytes())
            }
            (Method::Post, ["reports", "day-sales", "export"]) => {
                let mut csv =
                    String::from("date,invoicedOrdersCount,invoicedItemsCount,totalRevenue\n");
                for row in self.day_sales_report(&body) {
                    csv.push_str(&format!(
                        "{},{},{},{:.2}\n",
                        row.date, row.invoiced_orders_count, row.invoiced_items_count, row.total_revenue
                    ));
                }
                ApiResponse::new(200, csv.into_bytes())
            }

            _ => not_found(),
        }
    }

    fn save_client(&mut self, id: Option<ClientId>, body: &Value) -> ApiResponse {
        let name = json_str(body, "name").unwrap_or("");
        if name.is_empty() {
            return field_error("Invalid client", "name", "must not be blank");
        }
        if self
            .clients
            .iter()
            .any(|c| Some(c.id) != id && c.name.eq_ignore_ascii_case(name))
        {
            return message(400, "Client already exists");
        }

        match id {
            Some(id) => match self.clients.iter_mut().find(|c| c.id == id) {
                Some(client) => {
                    client.name = name.to_string();
                    ok(&*client)
                }
                None => not_found(),
            },
            None => {
                let client = Client {
                    id: ClientId::new(self.allocate_id()),
                    name: name.to_string(),
                    enabled: true,
                };
                self.clients.push(client.clone());
                created(&client)
            }
        }
    }

    fn save_product(&mut self, id: Option<ProductId>, body: &Value) -> ApiResponse {
        let name = json_str(body, "name").unwrap_or("").to_string();
        let barcode = json_str(body, "barcode").unwrap_or("").to_string();
        let mrp = body.get("mrp").and_then(Value::as_f64).unwrap_or(0.0);
        let client_id = body.get("clientId").and_then(Value::as_i64).map(ClientId::new);
        let image_url = json_str(body, "imageUrl").map(str::to_string);

        if name.is_empty() {
            return field_error("Invalid product", "name", "must not be blank");
        }
        if mrp <= 0.0 {
            return field_error("Invalid product", "mrp", "must be positive");
        }
        let Some(client_id) = client_id.filter(|c| self.clients.iter().any(|x| x.id == *c))
        else {
            return field_error("Invalid product", "clientId", "unknown client");
        };
        if self
            .products
            .iter()
            .any(|p| Some(p.id) != id && p.barcode == barcode)
        {
            return message(400, "Barcode already exists");
        }

        match id {
            Some(id) => match self.products.iter_mut().find(|p| p.id == id) {
                Some(product) => {
                    product.name = name;
                    product.barcode = barcode;
                    product.mrp = mrp;
                    product.client_id = client_id;
                    product.image_url = image_url;
                    ok(&*product)
                }
                None => not_found(),
            },
            None => {
                let product = Product {
                    id: ProductId::new(self.allocate_id()),
                    name,
                    barcode,
                    mrp,
                    client_id,
                    image_url,
                };
                self.inventory.push(Inventory {
                    product_id: product.id,
                    product_name: product.name.clone(),
                    quantity: 0,
                });
                self.products.push(product.clone());
                created(&product)
            }
        }
    }

    fn create_order(&mut self, body: &Value) -> ApiResponse {
        let Some(client_id) = body
            .get("clientId")
            .and_then(Value::as_i64)
            .map(ClientId::new)
            .filter(|c| self.clients.iter().any(|x| x.id == *c))
        else {
            return field_error("Invalid order", "clientId", "unknown client");
        };
        let lines = body
            .get("items")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        if lines.is_empty() {
            return field_error("Invalid order", "items", "must not be empty");
        }

        let order_id = OrderId::new(self.allocate_id());
        let mut items = Vec::new();
        for line in &lines {
            let product_id = line.get("productId").and_then(Value::as_i64);
            let Some(product_id) = product_id
                .map(ProductId::new)
                .filter(|p| self.products.iter().any(|x| x.id == *p))
            else {
                return field_error("Invalid order", "items", "unknown product");
            };
            let item_id = OrderItemId::new(self.allocate_id());
            items.push(OrderItem {
                id: item_id,
                order_id,
                product_id,
                quantity: line.get("quantity").and_then(Value::as_i64).unwrap_or(1),
                selling_price: line
                    .get("sellingPrice")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0),
            });
        }

        let order = Order {
            id: order_id,
            client_id,
            status: OrderStatus::Created,
            created_at: Utc::now(),
            items: Vec::new(),
        };
        self.items.insert(order_id, items);
        self.orders.push(order.clone());
        created(&order)
    }

    fn transition(&mut self, id: Option<i64>, target: OrderStatus, verb: &str) -> ApiResponse {
        let Some(order) = id.and_then(|id| self.orders.iter_mut().find(|o| o.id == OrderId::new(id)))
        else {
            return not_found();
        };
        if !order.status.is_open() {
            return message(
                400,
                &format!("Order {} is {} and cannot be {}", order.id, order.status, verb),
            );
        }
        order.status = target;
        ok(&*order)
    }

    fn invoiced_in_range<'a>(&'a self, body: &Value) -> impl Iterator<Item = &'a Order> + 'a {
        let start = json_date(body, "startDate");
        let end = json_date(body, "endDate");
        let client_id = body.get("clientId").and_then(Value::as_i64);
        self.orders
            .iter()
            .filter(|o| o.status == OrderStatus::Invoiced)
            .filter(move |o| in_range(o.created_at.date_naive(), start, end))
            .filter(move |o| client_id.is_none_or(|c| o.client_id.get() == c))
    }

    fn sales_report(&self, body: &Value) -> Vec<SalesReportRow> {
        let mut rows: BTreeMap<String, SalesReportRow> = BTreeMap::new();
        for order in self.invoiced_in_range(body) {
            let client_name = self
                .clients
                .iter()
                .find(|c| c.id == order.client_id)
                .map(|c| c.name.clone());
            for item in self.items.get(&order.id).map(Vec::as_slice).unwrap_or(&[]) {
                let product_name = self
                    .products
                    .iter()
                    .find(|p| p.id == item.product_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| format!("#{}", item.product_id));
                let row = rows
                    .entry(product_name.clone())
                    .or_insert_with(|| SalesReportRow {
                        product_name,
                        client_name: client_name.clone(),
                        quantity: 0,
                        revenue: 0.0,
                    });
                row.quantity += item.quantity;
                row.revenue += item.line_total();
            }
        }
        rows.into_values().collect()
    }

    fn day_sales_report(&self, body: &Value) -> Vec<DaySalesRow> {
        let mut rows: BTreeMap<NaiveDate, DaySalesRow> = BTreeMap::new();
        for order in self.invoiced_in_range(body) {
            let date = order.created_at.date_naive();
            let row = rows.entry(date).or_insert_with(|| DaySalesRow {
                date,
                invoiced_orders_count: 0,
                invoiced_items_count: 0,
                total_revenue: 0.0,
            });
            row.invoiced_orders_count += 1;
            for item in self.items.get(&order.id).map(Vec::as_slice).unwrap_or(&[]) {
                row.invoiced_items_count += item.quantity;
                row.total_revenue += item.line_total();
            }
        }
        rows.into_values().collect()
    }
}

fn page_from_body(body: &Value) -> (usize, usize) {
    let page = body.get("page").and_then(Value::as_u64).unwrap_or(0) as usize;
    let page_size = body.get("pageSize").and_then(Value::as_u64).unwrap_or(10) as usize;
    (page, page_size)
}
