//! In-memory table of accident records.

mod frame;
mod value;

pub use frame::{DateIndex, Table};
pub use value::Value;
