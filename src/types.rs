use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::util::display_f64;

/// One row of the delivery dataset exactly as it appears in the CSV.
///
/// Everything except the coordinates is kept as text; the cleaner decides
/// what is missing and what converts.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Delivery_person_ID")]
    pub delivery_person_id: String,
    #[serde(rename = "Delivery_person_Age")]
    pub delivery_person_age: String,
    #[serde(rename = "Delivery_person_Ratings")]
    pub delivery_person_ratings: String,
    #[serde(rename = "Restaurant_latitude")]
    pub restaurant_latitude: f64,
    #[serde(rename = "Restaurant_longitude")]
    pub restaurant_longitude: f64,
    #[serde(rename = "Delivery_location_latitude")]
    pub delivery_location_latitude: f64,
    #[serde(rename = "Delivery_location_longitude")]
    pub delivery_location_longitude: f64,
    #[serde(rename = "Order_Date")]
    pub order_date: String,
    #[serde(rename = "Weatherconditions")]
    pub weather_conditions: String,
    #[serde(rename = "Road_traffic_density")]
    pub road_traffic_density: String,
    #[serde(rename = "Vehicle_condition", default)]
    pub vehicle_condition: String,
    #[serde(rename = "Type_of_order")]
    pub type_of_order: String,
    #[serde(rename = "Type_of_vehicle")]
    pub type_of_vehicle: String,
    #[serde(rename = "multiple_deliveries")]
    pub multiple_deliveries: String,
    #[serde(rename = "Festival")]
    pub festival: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Time_taken(min)")]
    pub time_taken: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub id: String,
    pub delivery_person_id: String,
    pub age: i32,
    pub rating: f64,
    pub restaurant_lat: f64,
    pub restaurant_lon: f64,
    pub delivery_lat: f64,
    pub delivery_lon: f64,
    pub order_date: NaiveDate,
    pub weather: String,
    pub traffic: String,
    pub vehicle_condition: Option<i32>,
    pub order_type: String,
    pub vehicle_type: String,
    pub multiple_deliveries: i32,
    pub festival: String,
    pub city: String,
    pub time_taken_min: i32,
}

// Writes a clean record back in the source column format, so a cleaned
// dataset can be exported and fed to the cleaner again.
impl From<&CleanRecord> for RawRecord {
    fn from(r: &CleanRecord) -> Self {
        RawRecord {
            id: r.id.clone(),
            delivery_person_id: r.delivery_person_id.clone(),
            delivery_person_age: r.age.to_string(),
            delivery_person_ratings: r.rating.to_string(),
            restaurant_latitude: r.restaurant_lat,
            restaurant_longitude: r.restaurant_lon,
            delivery_location_latitude: r.delivery_lat,
            delivery_location_longitude: r.delivery_lon,
            order_date: r.order_date.format(crate::util::DATE_FORMAT).to_string(),
            weather_conditions: r.weather.clone(),
            road_traffic_density: r.traffic.clone(),
            vehicle_condition: r
                .vehicle_condition
                .map(|v| v.to_string())
                .unwrap_or_default(),
            type_of_order: r.order_type.clone(),
            type_of_vehicle: r.vehicle_type.clone(),
            multiple_deliveries: r.multiple_deliveries.to_string(),
            festival: r.festival.clone(),
            city: r.city.clone(),
            time_taken: format!("{} {}", crate::util::TIME_TAKEN_LABEL, r.time_taken_min),
        }
    }
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct DailyOrdersRow {
    #[serde(rename = "OrderDate")]
    #[tabled(rename = "OrderDate")]
    pub order_date: NaiveDate,
    #[serde(rename = "Orders")]
    #[tabled(rename = "Orders")]
    pub orders: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct TrafficShareRow {
    #[serde(rename = "Traffic")]
    #[tabled(rename = "Traffic")]
    pub traffic: String,
    #[serde(rename = "Orders")]
    #[tabled(rename = "Orders")]
    pub orders: usize,
    #[serde(rename = "Share")]
    #[tabled(rename = "Share", display_with = "display_f64")]
    pub share: f64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CityTrafficOrdersRow {
    #[serde(rename = "City")]
    #[tabled(rename = "City")]
    pub city: String,
    #[serde(rename = "Traffic")]
    #[tabled(rename = "Traffic")]
    pub traffic: String,
    #[serde(rename = "Orders")]
    #[tabled(rename = "Orders")]
    pub orders: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct WeeklyOrdersRow {
    #[serde(rename = "Week")]
    #[tabled(rename = "Week")]
    pub week: String,
    #[serde(rename = "Orders")]
    #[tabled(rename = "Orders")]
    pub orders: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct WeeklyDelivererLoadRow {
    #[serde(rename = "Week")]
    #[tabled(rename = "Week")]
    pub week: String,
    #[serde(rename = "Orders")]
    #[tabled(rename = "Orders")]
    pub orders: usize,
    #[serde(rename = "Deliverers")]
    #[tabled(rename = "Deliverers")]
    pub deliverers: usize,
    #[serde(rename = "OrdersPerDeliverer")]
    #[tabled(rename = "OrdersPerDeliverer", display_with = "display_f64")]
    pub orders_per_deliverer: f64,
}

/// Median delivery position for one (city, traffic) pair; a map marker.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct DeliveryLocationRow {
    #[serde(rename = "City")]
    #[tabled(rename = "City")]
    pub city: String,
    #[serde(rename = "Traffic")]
    #[tabled(rename = "Traffic")]
    pub traffic: String,
    #[serde(rename = "Latitude")]
    #[tabled(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    #[tabled(rename = "Longitude")]
    pub longitude: f64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct DelivererTimeRow {
    #[serde(rename = "City")]
    #[tabled(rename = "City")]
    pub city: String,
    #[serde(rename = "DelivererID")]
    #[tabled(rename = "Deliverer ID")]
    pub deliverer_id: String,
    #[serde(rename = "MinTaken")]
    #[tabled(rename = "Min Taken")]
    pub max_time_min: i32,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct DelivererRatingRow {
    #[serde(rename = "DelivererID")]
    #[tabled(rename = "Deliverer ID")]
    pub deliverer_id: String,
    #[serde(rename = "Ratings")]
    #[tabled(rename = "Ratings", display_with = "display_f64")]
    pub mean_rating: f64,
}

/// Mean and sample standard deviation of a measure for one category.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct GroupStatRow {
    #[serde(rename = "Group")]
    #[tabled(rename = "Group")]
    pub group: String,
    #[serde(rename = "Count")]
    #[tabled(rename = "Count")]
    pub count: usize,
    #[serde(rename = "Mean")]
    #[tabled(rename = "Mean", display_with = "display_f64")]
    pub mean: f64,
    #[serde(rename = "Std")]
    #[tabled(rename = "Std", display_with = "display_f64")]
    pub std: f64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CityTrafficStatRow {
    #[serde(rename = "City")]
    #[tabled(rename = "City")]
    pub city: String,
    #[serde(rename = "Traffic")]
    #[tabled(rename = "Traffic")]
    pub traffic: String,
    #[serde(rename = "Count")]
    #[tabled(rename = "Count")]
    pub count: usize,
    #[serde(rename = "AvgTime")]
    #[tabled(rename = "avg_time", display_with = "display_f64")]
    pub mean: f64,
    #[serde(rename = "StdTime")]
    #[tabled(rename = "std_time", display_with = "display_f64")]
    pub std: f64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CityDistanceRow {
    #[serde(rename = "City")]
    #[tabled(rename = "City")]
    pub city: String,
    #[serde(rename = "DistanceKm")]
    #[tabled(rename = "Distance (km)", display_with = "display_f64")]
    pub mean_km: f64,
}

/// Which column of a mean/std group to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStat {
    Mean,
    StdDev,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CompanyMetrics {
    pub total_orders: usize,
    pub total_deliverers: usize,
    pub first_order_date: Option<NaiveDate>,
    pub last_order_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DelivererMetrics {
    pub oldest_age: Option<i32>,
    pub youngest_age: Option<i32>,
    pub best_vehicle_condition: Option<i32>,
    pub worst_vehicle_condition: Option<i32>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RestaurantMetrics {
    pub unique_deliverers: usize,
    pub average_distance_km: Option<f64>,
    pub festival_avg_time: Option<f64>,
    pub festival_std_time: Option<f64>,
    pub regular_avg_time: Option<f64>,
    pub regular_std_time: Option<f64>,
}
