//! Java support: turns source files into the declaration tree used by `typemine-core`.

pub mod javadoc;
pub mod parser;

pub use parser::JavaParser;
