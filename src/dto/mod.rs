//! DTO modules that bridge views with templates.

pub mod customers;
