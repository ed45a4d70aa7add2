// Fixture builders shared by the unit tests.
use chrono::NaiveDate;

use crate::types::{CleanRecord, RawRecord};

/// A raw row shaped like the source export, padding included.
pub fn raw_row(id: &str, deliverer: &str) -> RawRecord {
    RawRecord {
        id: format!("{id} "),
        delivery_person_id: format!("{deliverer} "),
        delivery_person_age: "37".to_string(),
        delivery_person_ratings: "4.9".to_string(),
        restaurant_latitude: 22.745049,
        restaurant_longitude: 75.892471,
        delivery_location_latitude: 22.765049,
        delivery_location_longitude: 75.912471,
        order_date: "19-03-2022".to_string(),
        weather_conditions: "conditions Sunny".to_string(),
        road_traffic_density: "High ".to_string(),
        vehicle_condition: "2".to_string(),
        type_of_order: "Snack ".to_string(),
        type_of_vehicle: "motorcycle ".to_string(),
        multiple_deliveries: "0".to_string(),
        festival: "No ".to_string(),
        city: "Urban ".to_string(),
        time_taken: "(min) 24".to_string(),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// A clean record with neutral defaults; tests override what they measure.
pub fn record(deliverer: &str, city: &str, traffic: &str) -> CleanRecord {
    CleanRecord {
        id: format!("0x{deliverer}"),
        delivery_person_id: deliverer.to_string(),
        age: 30,
        rating: 4.5,
        restaurant_lat: 12.9716,
        restaurant_lon: 77.5946,
        delivery_lat: 13.0827,
        delivery_lon: 80.2707,
        order_date: date(2022, 3, 1),
        weather: "conditions Sunny".to_string(),
        traffic: traffic.to_string(),
        vehicle_condition: Some(1),
        order_type: "Meal".to_string(),
        vehicle_type: "motorcycle".to_string(),
        multiple_deliveries: 1,
        festival: "No".to_string(),
        city: city.to_string(),
        time_taken_min: 20,
    }
}
