//! Core type definitions for mdlint-bridge

mod diagnostic;
mod document;
mod error;
mod finding;
mod results;

pub use diagnostic::*;
pub use document::*;
pub use error::*;
pub use finding::*;
pub use results::*;
