//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use sales_report::Session;

pub fn session() -> Session {
    Session::builder().app_name("integration_tests").get_or_create()
}

pub fn write_source(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

/// The worked example: two users, Books and Toys, three purchases.
pub fn write_example_sources(dir: &Path) {
    write_source(dir, "users.csv", "user_id,age,name\n1,20,Alice\n2,30,Bob\n");
    write_source(
        dir,
        "products.csv",
        "product_id,category,price\n10,Books,9.99\n20,Toys,19.99\n",
    );
    write_source(
        dir,
        "purchases.csv",
        "user_id,product_id,quantity\n1,10,2\n2,20,1\n1,20,1\n",
    );
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
