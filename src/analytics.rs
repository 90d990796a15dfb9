//! Category spend aggregation and ranking.
//!
//! Operates on the joined purchase table: derives a per-row line total,
//! aggregates spend per category (optionally restricted to an age band),
//! turns the age-band totals into percentage shares, and ranks the top
//! categories by share.

use polars::prelude::{col, lit, DataType, Expr};

use crate::error::ReportError;
use crate::frame::Frame;

/// The age band the report drills into, inclusive on both ends.
pub const AGE_BAND_18_25: AgeBand = AgeBand { min: 18, max: 25 };

/// An inclusive age range used to filter joined purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBand {
    pub min: i64,
    pub max: i64,
}

impl AgeBand {
    /// Row predicate: age present and within the band.
    pub fn predicate(&self) -> Expr {
        col("age")
            .is_not_null()
            .and(col("age").gt_eq(lit(self.min)))
            .and(col("age").lt_eq(lit(self.max)))
    }
}

/// Total spend per category over the joined purchases, optionally restricted
/// to an age band: derive `total_price = quantity * price`, group by
/// `category`, sum into `total_spent`, sort by `total_spent` descending.
///
/// Categories with no matching rows do not appear. Summation is plain f64;
/// no currency rounding here.
pub fn spend_by_category(joined: &Frame, band: Option<AgeBand>) -> Result<Frame, ReportError> {
    let rows = match band {
        Some(band) => joined.filter(band.predicate())?,
        None => joined.clone(),
    };
    let priced = rows.with_column(
        "total_price",
        col("quantity").cast(DataType::Float64) * col("price").cast(DataType::Float64),
    )?;
    priced
        .group_by("category")?
        .sum("total_price", "total_spent")?
        .sort_desc("total_spent")
}

/// Percentage share of each category within `totals`, rounded to two decimal
/// places (half away from zero), sorted by `percentage` descending.
///
/// A zero grand total means "no data": the result is an empty table with the
/// percentage schema, never a division by zero. Rounded shares need not sum
/// to exactly 100.
pub fn percentage_by_category(totals: &Frame) -> Result<Frame, ReportError> {
    let grand_total: f64 = totals.f64_values("total_spent")?.iter().sum();
    if grand_total == 0.0 {
        return totals.limit(0).with_column("percentage", lit(0.0f64));
    }
    let shares = totals.with_column(
        "percentage",
        (col("total_spent") / lit(grand_total) * lit(100.0)).round(2),
    )?;
    shares.sort_desc("percentage")
}

/// The first `n` rows of the share table (or fewer, if fewer exist).
pub fn top_categories(shares: &Frame, n: usize) -> Frame {
    shares.limit(n)
}
