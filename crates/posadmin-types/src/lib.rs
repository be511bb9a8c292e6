pub mod domain;
pub mod error;
pub mod filter;
pub mod paging;

pub use domain::*;
pub use error::{Error, Result};
pub use filter::*;
pub use paging::*;
