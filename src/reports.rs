// Aggregations behind the three dashboard views.
//
// Every function takes an already cleaned (and usually filtered) dataset and
// returns a fresh summary. Tables come back sorted by their keys unless noted
// otherwise; an empty dataset gives an empty table or `None`.
use crate::types::{
    CityDistanceRow, CityTrafficOrdersRow, CityTrafficStatRow, CleanRecord, CompanyMetrics,
    DailyOrdersRow, DelivererMetrics, DelivererRatingRow, DelivererTimeRow, DeliveryLocationRow,
    GroupStatRow, RestaurantMetrics, TimeStat, TrafficShareRow, WeeklyDelivererLoadRow,
    WeeklyOrdersRow,
};
use crate::util::{
    average, haversine_km, is_missing, median, nan_mean, nan_std_dev, round2, skip_nan, std_dev,
};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Cities ranked by `top_deliverers`, in output order. The dataset spells the
/// first one "Metropolitian".
pub const TOP_CITIES: [&str; 3] = ["Metropolitian", "Urban", "Semi-Urban"];

/// Rows kept per city by `top_deliverers`.
pub const TOP_PER_CITY: usize = 10;

/// Only the leading records of a dataset feed the distance figures.
pub const DISTANCE_SAMPLE_SIZE: usize = 11;

// ── Company ────────────────────────────────────────────────────────────────────

pub fn orders_per_day(data: &[CleanRecord]) -> Vec<DailyOrdersRow> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for r in data {
        *counts.entry(r.order_date).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(order_date, orders)| DailyOrdersRow { order_date, orders })
        .collect()
}

/// Share of orders per traffic density. Shares sum to 1 over the rows returned.
pub fn traffic_order_share(data: &[CleanRecord]) -> Vec<TrafficShareRow> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in data.iter().filter(|r| !is_missing(&r.traffic)) {
        *counts.entry(r.traffic.as_str()).or_insert(0) += 1;
    }
    let total: usize = counts.values().sum();
    counts
        .into_iter()
        .map(|(traffic, orders)| TrafficShareRow {
            traffic: traffic.to_string(),
            orders,
            share: orders as f64 / total as f64,
        })
        .collect()
}

pub fn orders_by_city_traffic(data: &[CleanRecord]) -> Vec<CityTrafficOrdersRow> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for r in data {
        *counts
            .entry((r.city.as_str(), r.traffic.as_str()))
            .or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|((city, traffic), orders)| CityTrafficOrdersRow {
            city: city.to_string(),
            traffic: traffic.to_string(),
            orders,
        })
        .collect()
}

/// Week of the year with weeks starting on Sunday (`00`..`53`).
pub fn week_of_year(date: NaiveDate) -> String {
    date.format("%U").to_string()
}

pub fn orders_by_week(data: &[CleanRecord]) -> Vec<WeeklyOrdersRow> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for r in data {
        *counts.entry(week_of_year(r.order_date)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(week, orders)| WeeklyOrdersRow { week, orders })
        .collect()
}

/// Orders divided by the number of distinct deliverers active in each week.
pub fn orders_per_deliverer_by_week(data: &[CleanRecord]) -> Vec<WeeklyDelivererLoadRow> {
    let mut weeks: BTreeMap<String, (usize, BTreeSet<&str>)> = BTreeMap::new();
    for r in data {
        let e = weeks.entry(week_of_year(r.order_date)).or_default();
        e.0 += 1;
        e.1.insert(r.delivery_person_id.as_str());
    }
    weeks
        .into_iter()
        .map(|(week, (orders, deliverers))| WeeklyDelivererLoadRow {
            week,
            orders,
            deliverers: deliverers.len(),
            orders_per_deliverer: orders as f64 / deliverers.len() as f64,
        })
        .collect()
}

/// Median delivery position per (city, traffic) pair.
pub fn delivery_locations(data: &[CleanRecord]) -> Vec<DeliveryLocationRow> {
    let mut groups: BTreeMap<(&str, &str), (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for r in data {
        let e = groups
            .entry((r.city.as_str(), r.traffic.as_str()))
            .or_default();
        e.0.push(r.delivery_lat);
        e.1.push(r.delivery_lon);
    }
    groups
        .into_iter()
        .map(|((city, traffic), (lats, lons))| DeliveryLocationRow {
            city: city.to_string(),
            traffic: traffic.to_string(),
            latitude: median(lats),
            longitude: median(lons),
        })
        .collect()
}

pub fn company_metrics(data: &[CleanRecord]) -> CompanyMetrics {
    let deliverers: BTreeSet<&str> = data.iter().map(|r| r.delivery_person_id.as_str()).collect();
    CompanyMetrics {
        total_orders: data.len(),
        total_deliverers: deliverers.len(),
        first_order_date: data.iter().map(|r| r.order_date).min(),
        last_order_date: data.iter().map(|r| r.order_date).max(),
    }
}

// ── Deliverers ─────────────────────────────────────────────────────────────────

fn top_city_slot(city: &str) -> Option<usize> {
    if city == "Metropolitan" {
        return Some(0);
    }
    TOP_CITIES.iter().position(|c| *c == city)
}

/// Longest delivery per deliverer, first `TOP_PER_CITY` per city in
/// `TOP_CITIES` order.
///
/// Rows are always ranked from the slowest down; `ascending` does not change
/// the order.
pub fn top_deliverers(data: &[CleanRecord], ascending: bool) -> Vec<DelivererTimeRow> {
    let mut max_time: BTreeMap<(&str, &str), i32> = BTreeMap::new();
    for r in data {
        let e = max_time
            .entry((r.city.as_str(), r.delivery_person_id.as_str()))
            .or_insert(r.time_taken_min);
        *e = (*e).max(r.time_taken_min);
    }

    // Stable sort: equal times keep deliverer IDs in ascending order.
    let mut ranked: Vec<((&str, &str), i32)> = max_time.into_iter().collect();
    ranked.sort_by(|a, b| b.0 .0.cmp(&a.0 .0).then(b.1.cmp(&a.1)));

    let mut slices: [Vec<DelivererTimeRow>; 3] = Default::default();
    for ((city, deliverer_id), max_time_min) in ranked {
        if let Some(slot) = top_city_slot(city) {
            slices[slot].push(DelivererTimeRow {
                city: TOP_CITIES[slot].to_string(),
                deliverer_id: deliverer_id.to_string(),
                max_time_min,
            });
        }
    }
    let rows: Vec<DelivererTimeRow> = slices
        .into_iter()
        .flat_map(|mut slice| {
            // Both spellings of the metropolitan city share a slice.
            slice.sort_by(|a, b| b.max_time_min.cmp(&a.max_time_min));
            slice.truncate(TOP_PER_CITY);
            slice
        })
        .collect();
    debug!(ascending, rows = rows.len(), "ranked deliverers by delivery time");
    rows
}

pub fn rating_per_deliverer(data: &[CleanRecord]) -> Vec<DelivererRatingRow> {
    let mut ratings: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in data {
        ratings
            .entry(r.delivery_person_id.as_str())
            .or_default()
            .push(r.rating);
    }
    ratings
        .into_iter()
        .map(|(id, v)| DelivererRatingRow {
            deliverer_id: id.to_string(),
            mean_rating: nan_mean(&v),
        })
        .collect()
}

/// Mean and sample std per group. NaN values are left out of every figure,
/// including the count.
fn mean_std_by<'a>(
    data: &'a [CleanRecord],
    key: impl Fn(&'a CleanRecord) -> &'a str,
    value: impl Fn(&CleanRecord) -> f64,
) -> Vec<GroupStatRow> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in data {
        groups.entry(key(r)).or_default().push(value(r));
    }
    groups
        .into_iter()
        .map(|(group, v)| GroupStatRow {
            group: group.to_string(),
            count: skip_nan(&v).len(),
            mean: nan_mean(&v),
            std: nan_std_dev(&v),
        })
        .collect()
}

pub fn rating_by_traffic(data: &[CleanRecord]) -> Vec<GroupStatRow> {
    mean_std_by(data, |r| r.traffic.as_str(), |r| r.rating)
}

pub fn rating_by_weather(data: &[CleanRecord]) -> Vec<GroupStatRow> {
    mean_std_by(data, |r| r.weather.as_str(), |r| r.rating)
}

pub fn deliverer_metrics(data: &[CleanRecord]) -> DelivererMetrics {
    let conditions = || data.iter().filter_map(|r| r.vehicle_condition);
    DelivererMetrics {
        oldest_age: data.iter().map(|r| r.age).max(),
        youngest_age: data.iter().map(|r| r.age).min(),
        best_vehicle_condition: conditions().max(),
        worst_vehicle_condition: conditions().min(),
    }
}

// ── Restaurants ────────────────────────────────────────────────────────────────

pub fn time_by_city(data: &[CleanRecord]) -> Vec<GroupStatRow> {
    mean_std_by(data, |r| r.city.as_str(), |r| f64::from(r.time_taken_min))
}

pub fn time_by_city_traffic(data: &[CleanRecord]) -> Vec<CityTrafficStatRow> {
    let mut groups: BTreeMap<(&str, &str), Vec<f64>> = BTreeMap::new();
    for r in data {
        groups
            .entry((r.city.as_str(), r.traffic.as_str()))
            .or_default()
            .push(f64::from(r.time_taken_min));
    }
    groups
        .into_iter()
        .map(|((city, traffic), v)| CityTrafficStatRow {
            city: city.to_string(),
            traffic: traffic.to_string(),
            count: v.len(),
            mean: average(&v),
            std: std_dev(&v),
        })
        .collect()
}

pub fn time_by_festival(data: &[CleanRecord]) -> Vec<GroupStatRow> {
    mean_std_by(data, |r| r.festival.as_str(), |r| f64::from(r.time_taken_min))
}

/// One cell of `time_by_festival`, rounded to two decimals.
pub fn festival_time_stat(data: &[CleanRecord], festival: &str, stat: TimeStat) -> Option<f64> {
    time_by_festival(data)
        .into_iter()
        .find(|row| row.group == festival)
        .map(|row| match stat {
            TimeStat::Mean => round2(row.mean),
            TimeStat::StdDev => round2(row.std),
        })
}

fn sampled_distances(data: &[CleanRecord]) -> impl Iterator<Item = (&CleanRecord, f64)> {
    data.iter().take(DISTANCE_SAMPLE_SIZE).map(|r| {
        let km = haversine_km(
            (r.restaurant_lat, r.restaurant_lon),
            (r.delivery_lat, r.delivery_lon),
        );
        (r, km)
    })
}

/// Mean restaurant-to-customer distance over the first `DISTANCE_SAMPLE_SIZE`
/// records, in kilometres.
pub fn average_distance(data: &[CleanRecord]) -> Option<f64> {
    let distances: Vec<f64> = sampled_distances(data).map(|(_, km)| km).collect();
    if distances.is_empty() {
        return None;
    }
    Some(average(&distances))
}

/// Per-city mean of the same sampled distances as `average_distance`.
///
/// Every city in the dataset gets a row; one with no record in the sample
/// has a NaN mean.
pub fn distance_by_city(data: &[CleanRecord]) -> Vec<CityDistanceRow> {
    let mut groups: BTreeMap<&str, Vec<f64>> = data
        .iter()
        .map(|r| (r.city.as_str(), Vec::new()))
        .collect();
    for (r, km) in sampled_distances(data) {
        groups.entry(r.city.as_str()).or_default().push(km);
    }
    groups
        .into_iter()
        .map(|(city, v)| CityDistanceRow {
            city: city.to_string(),
            mean_km: nan_mean(&v),
        })
        .collect()
}

pub fn restaurant_metrics(data: &[CleanRecord]) -> RestaurantMetrics {
    let deliverers: BTreeSet<&str> = data.iter().map(|r| r.delivery_person_id.as_str()).collect();
    RestaurantMetrics {
        unique_deliverers: deliverers.len(),
        average_distance_km: average_distance(data),
        festival_avg_time: festival_time_stat(data, "Yes", TimeStat::Mean),
        festival_std_time: festival_time_stat(data, "Yes", TimeStat::StdDev),
        regular_avg_time: festival_time_stat(data, "No", TimeStat::Mean),
        regular_std_time: festival_time_stat(data, "No", TimeStat::StdDev),
    }
}
