pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod images;
pub mod logging;
pub mod model;
pub mod parser;
pub mod query;
pub mod render;
pub mod schema;
pub mod ui;
pub mod writer;

pub use catalog::{Catalog, CatalogPaths};
pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::CatalogError;
pub use query::Selection;
