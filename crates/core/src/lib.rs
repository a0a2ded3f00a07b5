pub mod db;

pub mod budget;
pub mod categories;
pub mod documents;
pub mod expenses;
pub mod months;
pub mod users;

pub mod constants;
pub mod errors;
pub mod schema;

pub use errors::{Error, Result};
pub use months::MonthRef;
