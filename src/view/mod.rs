//! Stateful view models driven by route handlers.

pub mod customers;
pub mod dialog;

pub use customers::{ActionOutcome, CustomerListView, FetchTicket, PageCursor};
pub use dialog::DialogState;
