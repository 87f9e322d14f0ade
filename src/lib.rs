//! Library catalogue REST API
//!
//! Authors (`Autor`) and books (`Libro`) served over HTTP from a relational
//! store, one module per resource.

pub mod bootstrap;
pub mod modules;
