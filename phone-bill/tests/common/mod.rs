use std::{
    fs::{read_dir, read_to_string, File},
    path::PathBuf,
    str::FromStr,
};

use phone_bill::{call_log, pricer::Pricer};
use rust_decimal::Decimal;
use serde::Deserialize;

/// The expected outcome of pricing a call log.
#[derive(Debug, Deserialize)]
pub struct ExpectedBill {
    pub total: String,
    pub free_number: String,
}

pub struct LogTest {
    pub path: PathBuf,
    pub log: String,
    pub bill: ExpectedBill,
}

pub fn collect_log_tests() -> Result<Vec<LogTest>, Box<dyn std::error::Error>> {
    let mut tests = Vec::new();

    for test_dir in read_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/resources"))? {
        let test_dir_path = test_dir?.path();

        if !test_dir_path.is_dir() {
            continue;
        }

        let log = read_to_string(test_dir_path.join("calls.csv"))?;
        let bill = serde_json::from_reader(File::open(test_dir_path.join("bill.json"))?)?;

        tests.push(LogTest {
            path: test_dir_path,
            log,
            bill,
        });
    }

    tests.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(tests)
}

#[macro_export]
macro_rules! call_log {
    ($name:literal) => {
        include_str!(concat!("../resources/", $name, "/calls.csv"))
    };
}

pub fn validate_log(test: &LogTest) -> Result<(), phone_bill::Error> {
    let calls = call_log::parse(&test.log)?;
    let report = Pricer::new(&calls).build_report()?;

    let expected_total = Decimal::from_str(&test.bill.total).expect("valid decimal in bill.json");

    assert_eq!(Decimal::from(report.total_cost), expected_total, "total_cost");
    assert_eq!(report.free_number, test.bill.free_number, "free_number");

    let billed: Decimal = report
        .calls
        .iter()
        .filter(|call| !report.is_free(call))
        .map(|call| Decimal::from(call.total_cost()))
        .sum();
    assert_eq!(billed, expected_total, "sum of billed calls");

    assert_eq!(
        Decimal::from(phone_bill::calculate(&test.log)?),
        expected_total,
        "calculate"
    );

    Ok(())
}
