pub mod config;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod index;
pub mod logging;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod resolver;
pub mod stats;

pub use error::{Result, TypemineError};
