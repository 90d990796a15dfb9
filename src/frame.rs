//! Frame: immutable in-memory table and the relational operations the
//! pipeline composes (clean, filter, derive, join, group, sort, limit).
//!
//! Thin wrapper around an eager Polars `DataFrame`. Every operation returns a
//! new `Frame`; nothing is mutated in place.

use std::fmt;
use std::sync::Arc;

use polars::prelude::{
    col, AnyValue, DataFrame as PlDataFrame, Expr, IntoLazy, JoinBuilder, JoinCoalesce, JoinType,
    LazyFrame, LazyGroupBy, SortMultipleOptions,
};

use crate::error::ReportError;

/// Immutable tabular data with typed columns.
#[derive(Clone, Debug)]
pub struct Frame {
    df: Arc<PlDataFrame>,
}

impl Frame {
    pub fn from_polars(df: PlDataFrame) -> Self {
        Frame { df: Arc::new(df) }
    }

    fn from_lazy(lf: LazyFrame) -> Result<Self, ReportError> {
        Ok(Frame::from_polars(lf.collect()?))
    }

    fn lazy(&self) -> LazyFrame {
        self.df.as_ref().clone().lazy()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Column names, in schema order.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.get_column_names().iter().any(|n| n.as_str() == name)
    }

    /// Column names and dtype strings, in schema order.
    pub fn dtypes(&self) -> Vec<(String, String)> {
        self.df
            .schema()
            .iter()
            .map(|(name, dtype)| (name.to_string(), format!("{dtype:?}")))
            .collect()
    }

    fn require_column(&self, name: &str) -> Result<(), ReportError> {
        if self.has_column(name) {
            return Ok(());
        }
        Err(ReportError::MissingColumn(format!(
            "'{}' not found; available columns: [{}]",
            name,
            self.columns().join(", ")
        )))
    }

    /// Drop every row with a missing value in any column. Surviving rows keep
    /// their relative order.
    pub fn drop_incomplete(&self) -> Result<Frame, ReportError> {
        let all: Vec<Expr> = self
            .df
            .get_column_names()
            .iter()
            .map(|n| col(n.as_str()))
            .collect();
        Frame::from_lazy(self.lazy().drop_nulls(Some(all)))
    }

    /// Keep rows matching the predicate expression.
    pub fn filter(&self, predicate: Expr) -> Result<Frame, ReportError> {
        Frame::from_lazy(self.lazy().filter(predicate))
    }

    /// Add or replace a column computed from an expression.
    pub fn with_column(&self, name: &str, expr: Expr) -> Result<Frame, ReportError> {
        Frame::from_lazy(self.lazy().with_column(expr.alias(name)))
    }

    /// Inner equi-join on `key`. The key column appears once in the output;
    /// rows without a match on either side are dropped.
    pub fn inner_join(&self, other: &Frame, key: &str) -> Result<Frame, ReportError> {
        self.require_column(key)?;
        other.require_column(key)?;
        let joined = JoinBuilder::new(self.lazy())
            .with(other.lazy())
            .how(JoinType::Inner)
            .on(&[col(key)])
            .coalesce(JoinCoalesce::CoalesceColumns)
            .finish();
        Frame::from_lazy(joined)
    }

    /// Group rows by `key` for aggregation. Groups keep first-seen order so
    /// downstream tie-breaks are deterministic.
    pub fn group_by(&self, key: &str) -> Result<Grouped, ReportError> {
        self.require_column(key)?;
        Ok(Grouped {
            lazy_grouped: self.lazy().group_by_stable([col(key)]),
        })
    }

    /// Sort by `column` descending. Stable: ties keep first-seen order.
    pub fn sort_desc(&self, column: &str) -> Result<Frame, ReportError> {
        self.require_column(column)?;
        let sorted = self.lazy().sort_by_exprs(
            vec![col(column)],
            SortMultipleOptions::new()
                .with_order_descending(true)
                .with_maintain_order(true),
        );
        Frame::from_lazy(sorted)
    }

    /// First `n` rows (or fewer).
    pub fn limit(&self, n: usize) -> Frame {
        Frame::from_polars(self.df.head(Some(n)))
    }

    /// Values of a text column, top to bottom.
    pub fn str_values(&self, column: &str) -> Result<Vec<String>, ReportError> {
        self.require_column(column)?;
        let series = self.df.column(column)?;
        (0..series.len())
            .map(|i| match series.get(i)? {
                AnyValue::String(s) => Ok(s.to_string()),
                AnyValue::StringOwned(s) => Ok(s.to_string()),
                other => Err(ReportError::Compute(format!(
                    "expected text in column '{column}', got {other:?}"
                ))),
            })
            .collect()
    }

    /// Values of a numeric column as f64, top to bottom.
    pub fn f64_values(&self, column: &str) -> Result<Vec<f64>, ReportError> {
        self.require_column(column)?;
        let series = self.df.column(column)?;
        (0..series.len())
            .map(|i| match series.get(i)? {
                AnyValue::Float64(v) => Ok(v),
                AnyValue::Float32(v) => Ok(f64::from(v)),
                AnyValue::Int64(v) => Ok(v as f64),
                AnyValue::Int32(v) => Ok(f64::from(v)),
                AnyValue::UInt64(v) => Ok(v as f64),
                AnyValue::UInt32(v) => Ok(f64::from(v)),
                other => Err(ReportError::Compute(format!(
                    "expected a number in column '{column}', got {other:?}"
                ))),
            })
            .collect()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.df)
    }
}

/// A frame grouped by a key column, ready for aggregation.
pub struct Grouped {
    lazy_grouped: LazyGroupBy,
}

impl Grouped {
    /// Apply aggregation expressions; the group key comes first in the output.
    pub fn agg(self, aggregations: Vec<Expr>) -> Result<Frame, ReportError> {
        Frame::from_lazy(self.lazy_grouped.agg(aggregations))
    }

    /// Sum `column` into a column named `alias`, one row per group.
    pub fn sum(self, column: &str, alias: &str) -> Result<Frame, ReportError> {
        self.agg(vec![col(column).sum().alias(alias)])
    }
}
