pub mod decl;
pub mod record;

pub use decl::*;
pub use record::*;
