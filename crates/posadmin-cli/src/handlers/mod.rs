pub mod client;
pub mod inventory;
pub mod order;
pub mod product;
pub mod report;
pub mod session;

mod upload;
