use serde::{Deserialize, Serialize};

use super::{ClientId, Keyed};

/// A client (brand/customer) owning products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Keyed for Client {
    type Key = ClientId;

    fn key(&self) -> ClientId {
        self.id
    }
}

/// Body for `POST /clients` and `PUT /clients/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientForm {
    pub name: String,
}
