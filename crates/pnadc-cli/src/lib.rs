//! CLI library components for the PNAD Contínua reader.

#![allow(missing_docs)]

pub mod logging;
pub mod summary;
