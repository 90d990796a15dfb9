//! End-to-end pipeline tests over real CSV sources.

mod common;

use common::{assert_close, session, write_example_sources, write_source};
use sales_report::pipeline::{self, InputPaths};
use sales_report::{report, ReportError};
use tempfile::TempDir;

#[test]
fn worked_example_produces_all_four_tables() {
    let dir = TempDir::new().unwrap();
    write_example_sources(dir.path());
    let session = session();

    let result = pipeline::run(&session, &InputPaths::in_dir(dir.path())).unwrap();

    let totals = &result.total_by_category;
    assert_eq!(totals.str_values("category").unwrap(), vec!["Toys", "Books"]);
    let spent = totals.f64_values("total_spent").unwrap();
    assert_close(spent[0], 39.98);
    assert_close(spent[1], 19.98);

    let age_totals = &result.total_by_category_age_18_25;
    assert_eq!(age_totals.str_values("category").unwrap(), vec!["Toys", "Books"]);
    let spent = age_totals.f64_values("total_spent").unwrap();
    assert_close(spent[0], 19.99);
    assert_close(spent[1], 19.98);

    let shares = &result.percentage_by_category_age_18_25;
    let percentages = shares.f64_values("percentage").unwrap();
    assert_close(percentages[0], 50.01);
    assert_close(percentages[1], 49.99);

    let top = &result.top_categories;
    assert_eq!(top.height(), 2);
    assert_eq!(
        top.str_values("category").unwrap(),
        shares.str_values("category").unwrap()
    );
}

#[test]
fn incomplete_and_unmatched_rows_are_dropped_before_aggregation() {
    let dir = TempDir::new().unwrap();
    // user 3 has no age, so their purchase must not survive the join;
    // purchase of product 99 has no product row and is dropped silently
    write_source(
        dir.path(),
        "users.csv",
        "user_id,age,name\n1,20,Alice\n3,,Carol\n",
    );
    write_source(
        dir.path(),
        "products.csv",
        "product_id,category,price\n10,Books,10.0\n",
    );
    write_source(
        dir.path(),
        "purchases.csv",
        "user_id,product_id,quantity\n1,10,1\n3,10,4\n1,99,2\n",
    );
    let session = session();

    let result = pipeline::run(&session, &InputPaths::in_dir(dir.path())).unwrap();

    let totals = &result.total_by_category;
    assert_eq!(totals.str_values("category").unwrap(), vec!["Books"]);
    assert_close(totals.f64_values("total_spent").unwrap()[0], 10.0);
}

#[test]
fn empty_age_band_propagates_as_empty_tables() {
    let dir = TempDir::new().unwrap();
    write_source(dir.path(), "users.csv", "user_id,age\n1,40\n");
    write_source(
        dir.path(),
        "products.csv",
        "product_id,category,price\n10,Books,10.0\n",
    );
    write_source(dir.path(), "purchases.csv", "user_id,product_id,quantity\n1,10,1\n");
    let session = session();

    let result = pipeline::run(&session, &InputPaths::in_dir(dir.path())).unwrap();

    assert_eq!(result.total_by_category.height(), 1);
    assert!(result.total_by_category_age_18_25.is_empty());
    assert!(result.percentage_by_category_age_18_25.is_empty());
    assert!(result.top_categories.is_empty());
}

#[test]
fn missing_source_file_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let session = session();
    let err = pipeline::run(&session, &InputPaths::in_dir(dir.path())).unwrap_err();
    assert!(matches!(err, ReportError::Load(_)), "got {err:?}");
}

#[test]
fn missing_join_column_is_a_schema_error() {
    let dir = TempDir::new().unwrap();
    write_example_sources(dir.path());
    // users table without the join key
    write_source(dir.path(), "users.csv", "id,age\n1,20\n");
    let session = session();
    let err = pipeline::run(&session, &InputPaths::in_dir(dir.path())).unwrap_err();
    assert!(matches!(err, ReportError::MissingColumn(_)), "got {err:?}");
}

#[test]
fn rerunning_on_unchanged_sources_prints_identical_tables() {
    let dir = TempDir::new().unwrap();
    write_example_sources(dir.path());
    let session = session();
    let paths = InputPaths::in_dir(dir.path());

    let mut first = Vec::new();
    let mut second = Vec::new();
    report::write_report(&mut first, &pipeline::run(&session, &paths).unwrap()).unwrap();
    report::write_report(&mut second, &pipeline::run(&session, &paths).unwrap()).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn report_sections_appear_in_fixed_order() {
    let dir = TempDir::new().unwrap();
    write_example_sources(dir.path());
    let session = session();

    let result = pipeline::run(&session, &InputPaths::in_dir(dir.path())).unwrap();
    let mut buf = Vec::new();
    report::write_report(&mut buf, &result).unwrap();
    let text = String::from_utf8(buf).unwrap();

    let labels = [
        "Total Purchases by Category:",
        "Total Purchases by Category (Age 18-25):",
        "Percentage by Category (Age 18-25):",
        "Top 3 Categories by Percentage (Age 18-25):",
    ];
    let mut last = 0;
    for label in labels {
        let at = text[last..]
            .find(label)
            .unwrap_or_else(|| panic!("section '{label}' missing or out of order"));
        last += at + label.len();
    }
}
