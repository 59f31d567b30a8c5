//! SpendWise HTTP clients.
//!
//! Thin `reqwest` wrappers that send one request, apply a per-request timeout
//! and hand back everything observed on the wire as an [`ApiResponse`]. They
//! never interpret status codes; judging responses is the harness's job.
//!
//! # Example
//!
//! ```no_run
//! use spendcheck_client::SpendwiseClient;
//!
//! # async fn example() -> Result<(), spendcheck_client::ClientError> {
//! let client = SpendwiseClient::new("http://localhost:3000")?;
//!
//! let response = client.parse_expense("coffee 80").await?;
//! println!("{} {}", response.status(), response.body());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod postgrest;
mod transport;
mod types;

pub use client::{ClientOptions, SpendwiseClient};
pub use error::ClientError;
pub use postgrest::PostgrestClient;
pub use types::*;
