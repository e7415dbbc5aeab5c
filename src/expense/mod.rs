//! Recording, listing and deleting expenses.
//!
//! This module contains everything that deals with individual expenses:
//! - The `Expense` record and the bodies exchanged with the Expense API
//! - The `ExpenseApiClient` that talks to the Expense API
//! - The entry form, the listing fragment and the create/delete endpoints

mod client;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod form;
mod list;

pub use client::ExpenseApiClient;
pub use core::{Expense, ExpenseId, FilterState};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use form::expense_form_view;
pub use list::get_expenses_fragment;
