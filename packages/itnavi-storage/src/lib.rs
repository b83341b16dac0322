pub mod cases;
pub mod db;
pub mod docs;
pub mod history;
pub mod models;
pub mod qdrant;
pub mod schema;
pub mod talents;
pub mod taxonomy;
pub mod users;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
