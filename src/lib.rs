//! Batch sales analytics over three CSV datasets (users, purchases, products).
//!
//! The library loads the datasets into in-memory tables backed by Polars,
//! drops incomplete rows, joins purchases with users and products, and
//! computes spend per product category: overall, restricted to the 18-25 age
//! band, as percentage shares within that band, and as a top-3 ranking.

pub mod analytics;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod report;
pub mod session;

pub use error::ReportError;
pub use frame::{Frame, Grouped};
pub use session::{Reader, Session, SessionBuilder};
