pub mod args;
pub mod catalog;
pub mod executor;
pub mod registry;
