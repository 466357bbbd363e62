pub mod catalog;
pub mod config;
pub mod layout;
pub mod plan;
pub mod section;
