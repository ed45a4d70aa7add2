// Turns raw CSV rows into typed, trimmed records.
//
// Rows carrying the missing-value marker in a required field are dropped
// before any conversion runs. A conversion that still fails afterwards is
// bad upstream data and aborts the whole run.
use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::{DashboardError, Result};
use crate::types::{CleanRecord, RawRecord};
use crate::util::{
    is_missing, parse_date_safe, parse_f64_safe, parse_i32_safe, parse_time_taken,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanReport {
    pub total_rows: usize,
    pub kept_rows: usize,
    /// Rows dropped, keyed by the first required column found missing.
    pub dropped_by_field: BTreeMap<&'static str, usize>,
}

impl CleanReport {
    pub fn dropped_rows(&self) -> usize {
        self.dropped_by_field.values().sum()
    }
}

/// Clean a raw dataset. Input order is kept for the surviving rows.
pub fn clean(raw: &[RawRecord]) -> Result<Vec<CleanRecord>> {
    clean_with_report(raw).map(|(records, _)| records)
}

pub fn clean_with_report(raw: &[RawRecord]) -> Result<(Vec<CleanRecord>, CleanReport)> {
    let mut report = CleanReport {
        total_rows: raw.len(),
        ..CleanReport::default()
    };

    let survivors: Vec<(usize, &RawRecord)> = raw
        .iter()
        .enumerate()
        .filter(|(_, row)| match missing_field(row) {
            Some(field) => {
                *report.dropped_by_field.entry(field).or_insert(0) += 1;
                false
            }
            None => true,
        })
        .collect();

    let mut records = Vec::with_capacity(survivors.len());
    for (idx, row) in survivors {
        records.push(coerce(idx + 1, row)?);
    }

    report.kept_rows = records.len();
    for (field, count) in &report.dropped_by_field {
        debug!(field, count, "dropped rows with missing values");
    }
    info!(
        total = report.total_rows,
        kept = report.kept_rows,
        dropped = report.dropped_rows(),
        "cleaned dataset"
    );
    Ok((records, report))
}

/// First required column holding the missing marker, if any.
fn missing_field(row: &RawRecord) -> Option<&'static str> {
    let required: [(&'static str, &str); 5] = [
        ("Delivery_person_Age", row.delivery_person_age.as_str()),
        ("Road_traffic_density", row.road_traffic_density.as_str()),
        ("City", row.city.as_str()),
        ("Festival", row.festival.as_str()),
        ("multiple_deliveries", row.multiple_deliveries.as_str()),
    ];
    required
        .into_iter()
        .find(|(_, value)| is_missing(value))
        .map(|(field, _)| field)
}

fn coerce(row_no: usize, row: &RawRecord) -> Result<CleanRecord> {
    let fail = |field: &'static str, value: &str, expected: &'static str| {
        DashboardError::Coercion {
            row: row_no,
            field,
            value: value.to_string(),
            expected,
        }
    };

    let age = parse_i32_safe(Some(row.delivery_person_age.as_str()))
        .ok_or_else(|| fail("Delivery_person_Age", row.delivery_person_age.as_str(), "integer"))?;
    let rating = parse_f64_safe(Some(row.delivery_person_ratings.as_str()))
        .ok_or_else(|| {
            fail("Delivery_person_Ratings", row.delivery_person_ratings.as_str(), "decimal")
        })?;
    let order_date = parse_date_safe(Some(row.order_date.as_str()))
        .ok_or_else(|| fail("Order_Date", row.order_date.as_str(), "DD-MM-YYYY date"))?;
    let multiple_deliveries = parse_i32_safe(Some(row.multiple_deliveries.as_str()))
        .ok_or_else(|| fail("multiple_deliveries", row.multiple_deliveries.as_str(), "integer"))?;
    let time_taken_min = parse_time_taken(&row.time_taken)
        .ok_or_else(|| fail("Time_taken(min)", row.time_taken.as_str(), "\"(min) N\" minutes"))?;

    Ok(CleanRecord {
        id: row.id.trim().to_string(),
        delivery_person_id: row.delivery_person_id.trim().to_string(),
        age,
        rating,
        restaurant_lat: row.restaurant_latitude,
        restaurant_lon: row.restaurant_longitude,
        delivery_lat: row.delivery_location_latitude,
        delivery_lon: row.delivery_location_longitude,
        order_date,
        weather: row.weather_conditions.trim().to_string(),
        traffic: row.road_traffic_density.trim().to_string(),
        vehicle_condition: parse_i32_safe(Some(row.vehicle_condition.as_str())),
        order_type: row.type_of_order.trim().to_string(),
        vehicle_type: row.type_of_vehicle.trim().to_string(),
        multiple_deliveries,
        festival: row.festival.trim().to_string(),
        city: row.city.trim().to_string(),
        time_taken_min,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, raw_row};

    #[test]
    fn test_clean_trims_and_converts() {
        let mut row = raw_row("0x4607", "INDORES13DEL02");
        row.road_traffic_density = "Jam ".to_string();
        row.time_taken = "(min) 24 ".to_string();
        row.order_date = "13-03-2022".to_string();

        let out = clean(&[row]).unwrap();
        assert_eq!(out.len(), 1);
        let r = &out[0];
        assert_eq!(r.id, "0x4607");
        assert_eq!(r.delivery_person_id, "INDORES13DEL02");
        assert_eq!(r.traffic, "Jam");
        assert_eq!(r.city, "Urban");
        assert_eq!(r.festival, "No");
        assert_eq!(r.order_type, "Snack");
        assert_eq!(r.vehicle_type, "motorcycle");
        assert_eq!(r.age, 37);
        assert_eq!(r.rating, 4.9);
        assert_eq!(r.multiple_deliveries, 0);
        assert_eq!(r.time_taken_min, 24);
        assert_eq!(r.order_date, date(2022, 3, 13));
        assert_eq!(r.vehicle_condition, Some(2));
    }

    #[test]
    fn test_missing_traffic_row_is_dropped() {
        let mut missing = raw_row("0x1", "A");
        missing.road_traffic_density = "NaN ".to_string();
        let mut kept = raw_row("0x2", "B");
        kept.road_traffic_density = "Jam ".to_string();

        let (out, report) = clean_with_report(&[missing, kept]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "0x2");
        assert_eq!(out[0].traffic, "Jam");
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.kept_rows, 1);
        assert_eq!(report.dropped_by_field.get("Road_traffic_density"), Some(&1));
    }

    #[test]
    fn test_each_required_field_drops_independently() {
        let mut rows = Vec::new();
        for i in 0..5 {
            let mut row = raw_row(&format!("0x{i}"), "D");
            match i {
                0 => row.delivery_person_age = "NaN ".to_string(),
                1 => row.road_traffic_density = "NaN ".to_string(),
                2 => row.city = "NaN ".to_string(),
                3 => row.festival = "NaN ".to_string(),
                _ => row.multiple_deliveries = "NaN ".to_string(),
            }
            rows.push(row);
        }
        rows.push(raw_row("0xok", "D"));

        let (out, report) = clean_with_report(&rows).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "0xok");
        assert_eq!(report.dropped_rows(), 5);
        assert_eq!(report.dropped_by_field.len(), 5);
    }

    #[test]
    fn test_missing_rows_skip_conversion() {
        // A dropped row never reaches conversion, so its other garbage is harmless.
        let mut row = raw_row("0x1", "A");
        row.multiple_deliveries = "NaN ".to_string();
        row.delivery_person_ratings = "not a number".to_string();
        assert!(clean(&[row]).unwrap().is_empty());
    }

    #[test]
    fn test_bad_rating_aborts_run() {
        let good = raw_row("0x1", "A");
        let mut bad = raw_row("0x2", "B");
        bad.delivery_person_ratings = "four".to_string();

        let err = clean(&[good, bad]).unwrap_err();
        match err {
            DashboardError::Coercion { row, field, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, "Delivery_person_Ratings");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_date_aborts_run() {
        let mut bad = raw_row("0x1", "A");
        bad.order_date = "2022-03-13".to_string();
        assert!(matches!(
            clean(&[bad]),
            Err(DashboardError::Coercion { field: "Order_Date", .. })
        ));
    }

    #[test]
    fn test_blank_vehicle_condition_is_absent() {
        let mut row = raw_row("0x1", "A");
        row.vehicle_condition = String::new();
        assert_eq!(clean(&[row]).unwrap()[0].vehicle_condition, None);
    }

    /// Field-wise equality where two NaN ratings count as the same value.
    fn same_record(a: &CleanRecord, b: &CleanRecord) -> bool {
        let same_rating = a.rating == b.rating || (a.rating.is_nan() && b.rating.is_nan());
        let (mut a, mut b) = (a.clone(), b.clone());
        a.rating = 0.0;
        b.rating = 0.0;
        same_rating && a == b
    }

    #[test]
    fn test_unrated_row_is_kept() {
        let mut row = raw_row("0x1", "A");
        row.delivery_person_ratings = "NaN ".to_string();
        let out = clean(&[row]).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].rating.is_nan());
    }

    #[test]
    fn test_clean_is_idempotent() {
        let mut rows: Vec<RawRecord> = (0..5).map(|i| raw_row(&format!("0x{i}"), "D")).collect();
        rows[1].city = "NaN ".to_string();
        rows[2].delivery_person_ratings = "5".to_string();
        rows[3].time_taken = "(min) 41 ".to_string();
        rows[4].delivery_person_ratings = "NaN ".to_string();

        let once = clean(&rows).unwrap();
        let again: Vec<RawRecord> = once.iter().map(RawRecord::from).collect();
        let twice = clean(&again).unwrap();
        assert_eq!(once.len(), 4);
        assert_eq!(once.len(), twice.len());
        assert!(once.iter().zip(&twice).all(|(a, b)| same_record(a, b)));
    }
}
