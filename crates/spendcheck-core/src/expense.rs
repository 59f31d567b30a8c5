//! Expense payloads exchanged with the SpendWise API.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::{Result, ShapeError};

/// Fields the parse endpoint must return.
pub const PARSED_EXPENSE_FIELDS: &[&str] = &["amount", "category", "description"];

/// Fields a freshly created expense must carry.
pub const CREATED_EXPENSE_FIELDS: &[&str] =
    &["id", "amount", "category", "description", "date", "user_id"];

/// Fields expected on each element of an expense listing.
pub const LISTED_EXPENSE_FIELDS: &[&str] = &["id", "amount", "category", "description", "date"];

/// An expense extracted from free text by the parse endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExpense {
    /// Positive amount, kept as the JSON number the service sent.
    pub amount: Number,
    /// Non-empty category name.
    pub category: String,
    /// Non-empty description.
    pub description: String,
}

impl ParsedExpense {
    /// Validate a parse response body.
    ///
    /// # Errors
    ///
    /// Returns an error naming every missing field, or the first field whose
    /// type or value is wrong.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or(ShapeError::NotAnObject)?;

        let missing = missing_fields(object, PARSED_EXPENSE_FIELDS);
        if !missing.is_empty() {
            return Err(ShapeError::MissingFields {
                context: "",
                fields: missing,
            });
        }

        let amount = match &object["amount"] {
            Value::Number(n) if n.as_f64().is_some_and(|a| a > 0.0) => n.clone(),
            other => {
                return Err(ShapeError::InvalidField {
                    field: "amount",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            amount,
            category: non_empty_string(object, "category")?,
            description: non_empty_string(object, "description")?,
        })
    }
}

/// Request body for `POST /api/expenses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewExpense {
    /// Amount in whole rupees.
    pub amount: i64,
    /// Category name.
    pub category: String,
    /// Description.
    pub description: String,
    /// Expense date; the service uses today when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl NewExpense {
    /// The fixed expense the smoke suite creates.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            amount: 150,
            category: "Food".to_string(),
            description: "Lunch at restaurant".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15),
        }
    }
}

/// The `expense` object returned by a successful creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedExpense {
    /// Opaque identifier assigned by the service.
    pub id: String,
    /// The full record as returned.
    pub record: Value,
}

impl CreatedExpense {
    /// Validate a `{"expense": {...}}` creation response.
    ///
    /// # Errors
    ///
    /// Returns an error if the wrapper is absent or any of
    /// [`CREATED_EXPENSE_FIELDS`] is missing.
    pub fn from_response(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or(ShapeError::NotAnObject)?;
        let record = object
            .get("expense")
            .ok_or(ShapeError::MissingField { field: "expense" })?;
        let expense = record.as_object().ok_or(ShapeError::InvalidField {
            field: "expense",
            value: record.to_string(),
        })?;

        let missing = missing_fields(expense, CREATED_EXPENSE_FIELDS);
        if !missing.is_empty() {
            return Err(ShapeError::MissingFields {
                context: " in expense",
                fields: missing,
            });
        }

        Ok(Self {
            id: opaque_id(&expense["id"]),
            record: record.clone(),
        })
    }
}

/// The `expenses` array of a listing response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseList {
    /// Listed expenses, unvalidated.
    pub items: Vec<Value>,
}

impl ExpenseList {
    /// Validate a `{"expenses": [...]}` listing response.
    ///
    /// # Errors
    ///
    /// Returns an error if `expenses` is absent or not an array.
    pub fn from_response(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or(ShapeError::NotAnObject)?;
        let expenses = object
            .get("expenses")
            .ok_or(ShapeError::MissingField { field: "expenses" })?;
        let items = expenses
            .as_array()
            .ok_or(ShapeError::NotAList { field: "Expenses" })?;

        Ok(Self {
            items: items.clone(),
        })
    }

    /// Number of listed expenses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the listing is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fields of [`LISTED_EXPENSE_FIELDS`] the first element lacks.
    ///
    /// Empty when the list is empty or the first element is complete.
    #[must_use]
    pub fn first_missing_fields(&self) -> Vec<&'static str> {
        match self.items.first() {
            Some(Value::Object(first)) => missing_fields(first, LISTED_EXPENSE_FIELDS),
            Some(_) => LISTED_EXPENSE_FIELDS.to_vec(),
            None => Vec::new(),
        }
    }

    /// Whether an element with the given opaque id is listed.
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.items
            .iter()
            .filter_map(|item| item.get("id"))
            .any(|item_id| opaque_id(item_id) == id)
    }
}

/// Weekly statistics from `GET /api/expenses/stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseStats {
    /// Total spent over the last seven days.
    pub this_week_total: f64,
    /// Total spent over the seven days before that.
    pub last_week_total: f64,
    /// Week-over-week change, percent.
    pub percentage_change: f64,
    /// Number of expenses over the last seven days.
    pub this_week_count: u64,
    /// Per-category totals for the last seven days.
    pub category_breakdown: Map<String, Value>,
}

impl ExpenseStats {
    /// Validate a statistics response.
    ///
    /// # Errors
    ///
    /// Returns an error naming missing fields, or the first field with the wrong type.
    pub fn from_response(value: &Value) -> Result<Self> {
        const FIELDS: &[&str] = &[
            "thisWeekTotal",
            "lastWeekTotal",
            "percentageChange",
            "categoryBreakdown",
            "thisWeekCount",
        ];

        let object = value.as_object().ok_or(ShapeError::NotAnObject)?;
        let missing = missing_fields(object, FIELDS);
        if !missing.is_empty() {
            return Err(ShapeError::MissingFields {
                context: "",
                fields: missing,
            });
        }

        let category_breakdown = object["categoryBreakdown"]
            .as_object()
            .cloned()
            .ok_or_else(|| ShapeError::InvalidField {
                field: "categoryBreakdown",
                value: object["categoryBreakdown"].to_string(),
            })?;
        let this_week_count =
            object["thisWeekCount"]
                .as_u64()
                .ok_or_else(|| ShapeError::InvalidField {
                    field: "thisWeekCount",
                    value: object["thisWeekCount"].to_string(),
                })?;

        Ok(Self {
            this_week_total: number(object, "thisWeekTotal")?,
            last_week_total: number(object, "lastWeekTotal")?,
            percentage_change: number(object, "percentageChange")?,
            this_week_count,
            category_breakdown,
        })
    }
}

/// Render an opaque identifier as text.
///
/// Strings are returned unquoted; any other JSON value is rendered as JSON.
#[must_use]
pub fn opaque_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn missing_fields(object: &Map<String, Value>, required: &[&'static str]) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|field| !object.contains_key(*field))
        .collect()
}

fn non_empty_string(object: &Map<String, Value>, field: &'static str) -> Result<String> {
    match &object[field] {
        Value::String(s) if !s.is_empty() => Ok(s.clone()),
        other => Err(ShapeError::InvalidField {
            field,
            value: other.to_string(),
        }),
    }
}

fn number(object: &Map<String, Value>, field: &'static str) -> Result<f64> {
    object[field]
        .as_f64()
        .ok_or_else(|| ShapeError::InvalidField {
            field,
            value: object[field].to_string(),
        })
}
