//! Domain types shared by the directory client, views and templates.

pub mod auth;
pub mod customer;
pub mod types;
