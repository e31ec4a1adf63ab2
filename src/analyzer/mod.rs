//! Metadata- and object-graph-level analyzers

pub mod catalog;
pub mod pages;
pub mod toolchain;
