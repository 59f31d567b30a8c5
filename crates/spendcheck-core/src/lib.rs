//! Core types for spendcheck.
//!
//! This crate holds everything the harness knows about the SpendWise API
//! without touching the network:
//!
//! - **Expenses**: `ParsedExpense`, `NewExpense`, `CreatedExpense`, `ExpenseList`, `ExpenseStats`
//! - **Google integration**: `SheetsStatus`, `AuthUrl`
//! - **Diagnosis**: classification of failed HTTP responses
//! - **Outcomes**: `CheckReport`, `Exchange`, `Summary`
//!
//! Shapes are validated against `serde_json::Value` rather than deserialized
//! directly, so every missing or mistyped field can be reported by name.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod diagnosis;
pub mod error;
pub mod expense;
pub mod oauth;
pub mod outcome;

pub use diagnosis::Diagnosis;
pub use error::{Result, ShapeError};
pub use expense::{
    opaque_id, CreatedExpense, ExpenseList, ExpenseStats, NewExpense, ParsedExpense,
    CREATED_EXPENSE_FIELDS, LISTED_EXPENSE_FIELDS, PARSED_EXPENSE_FIELDS,
};
pub use oauth::{AuthUrl, SheetsStatus};
pub use outcome::{CheckReport, Exchange, Note, Status, Summary};
