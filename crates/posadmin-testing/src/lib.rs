//! Testing infrastructure for posadmin tests.
//!
//! - `FakeBackend`: in-memory PoS backend behind the `Transport` trait, with a request log
//! - `TestWorld`: isolated data directory for CLI integration tests
//! - `assertions`: checks shared by the list-controller tests
//! - `fixtures`: sample clients, products, orders and TSV payloads

pub mod assertions;
pub mod backend;
pub mod fixtures;
pub mod world;

pub use backend::{Connection, FakeBackend, RecordedRequest, ADMIN_EMAIL, ADMIN_PASSWORD};
pub use world::TestWorld;
