//! Shared fixtures for the view engine integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use neo_grid::{Dataset, RawValue, Record, ViewSnapshot};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The three-record dataset: A dated 2020-01-15, B undated, C dated 2019-06-01.
pub fn abc_dataset() -> Dataset {
    Dataset::from_records(vec![
        Record::new()
            .with("designation", "A")
            .with("discovery_date", day(2020, 1, 15))
            .with("pha", "Y"),
        Record::new()
            .with("designation", "B")
            .with("discovery_date", RawValue::Null)
            .with("pha", "N"),
        Record::new()
            .with("designation", "C")
            .with("discovery_date", day(2019, 6, 1))
            .with("pha", "Y"),
    ])
}

/// A small realistic catalogue covering every column.
pub struct NeoFixture;

impl NeoFixture {
    /// (designation, discovery date, h_mag, moid_au, pha, orbit_class)
    pub fn rows() -> Vec<(&'static str, Option<NaiveDate>, f64, f64, &'static str, Option<&'static str>)> {
        vec![
            ("433 Eros", Some(day(1898, 8, 13)), 10.4, 0.149, "N", Some("Amor")),
            ("1566 Icarus", Some(day(1949, 6, 27)), 16.3, 0.034, "Y", Some("Apollo")),
            ("2062 Aten", Some(day(1976, 1, 7)), 16.8, 0.112, "N", Some("Aten")),
            ("99942 Apophis", Some(day(2004, 6, 19)), 19.1, 0.0002, "Y", Some("Aten")),
            ("101955 Bennu", Some(day(1999, 9, 11)), 20.2, 0.003, "Y", Some("Apollo")),
            ("(2020 AV2)", Some(day(2020, 1, 4)), 16.2, 0.26, "N", Some("Atira")),
            ("(1998 XX)", None, 21.0, 0.04, "Y", None),
            ("1036 Ganymed", Some(day(1924, 10, 23)), 9.2, 0.345, "N", Some("Amor")),
        ]
    }

    pub fn dataset() -> Dataset {
        Dataset::from_records(
            Self::rows()
                .into_iter()
                .map(|(designation, date, h_mag, moid, pha, class)| {
                    Record::new()
                        .with("designation", designation)
                        .with("discovery_date", date)
                        .with("h_mag", h_mag)
                        .with("moid_au", moid)
                        .with("pha", pha)
                        .with("orbit_class", class)
                })
                .collect(),
        )
    }
}

/// Designations of the visible rows, in display order.
pub fn designations(view: &ViewSnapshot<'_>) -> Vec<String> {
    view.rows()
        .map(|r| r.raw.get("designation").to_string())
        .collect()
}
