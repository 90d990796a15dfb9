//! The report pipeline: load, clean, join, aggregate, rank.
//!
//! A single straight-line run over the three input tables. Every table is
//! computed fully before the next step; nothing is printed here, so a fatal
//! error can never leave a partial report behind.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::analytics::{self, AGE_BAND_18_25};
use crate::error::ReportError;
use crate::frame::Frame;
use crate::session::Session;

/// Locations of the three input tables.
pub struct InputPaths {
    pub users: PathBuf,
    pub purchases: PathBuf,
    pub products: PathBuf,
}

impl Default for InputPaths {
    /// The conventional file names, resolved in the working directory.
    fn default() -> Self {
        InputPaths {
            users: PathBuf::from("users.csv"),
            purchases: PathBuf::from("purchases.csv"),
            products: PathBuf::from("products.csv"),
        }
    }
}

impl InputPaths {
    /// The conventional file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        InputPaths {
            users: dir.join("users.csv"),
            purchases: dir.join("purchases.csv"),
            products: dir.join("products.csv"),
        }
    }
}

/// The four result tables, in the order they are reported.
#[derive(Debug)]
pub struct Report {
    pub total_by_category: Frame,
    pub total_by_category_age_18_25: Frame,
    pub percentage_by_category_age_18_25: Frame,
    pub top_categories: Frame,
}

/// Run the whole pipeline: load the three sources, drop incomplete rows,
/// join purchases to users and products, and compute the four result tables.
pub fn run(session: &Session, paths: &InputPaths) -> Result<Report, ReportError> {
    let users = session.read_csv(&paths.users)?;
    let purchases = session.read_csv(&paths.purchases)?;
    let products = session.read_csv(&paths.products)?;
    info!(
        users = users.height(),
        purchases = purchases.height(),
        products = products.height(),
        "loaded input tables"
    );

    let users = users.drop_incomplete()?;
    let purchases = purchases.drop_incomplete()?;
    let products = products.drop_incomplete()?;
    debug!(
        users = users.height(),
        purchases = purchases.height(),
        products = products.height(),
        "dropped incomplete rows"
    );

    let joined = purchases
        .inner_join(&users, "user_id")?
        .inner_join(&products, "product_id")?;
    info!(rows = joined.height(), "joined purchases with users and products");

    let total_by_category = analytics::spend_by_category(&joined, None)?;
    let total_by_category_age_18_25 = analytics::spend_by_category(&joined, Some(AGE_BAND_18_25))?;
    let percentage_by_category_age_18_25 =
        analytics::percentage_by_category(&total_by_category_age_18_25)?;
    let top_categories = analytics::top_categories(&percentage_by_category_age_18_25, 3);

    Ok(Report {
        total_by_category,
        total_by_category_age_18_25,
        percentage_by_category_age_18_25,
        top_categories,
    })
}
