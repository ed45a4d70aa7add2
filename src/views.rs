// The three dashboard pages. Each one bundles the summaries its page shows,
// prints markdown previews of them and exports them to an output directory.
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::output::{preview_table, write_csv, write_json};
use crate::reports;
use crate::types::{
    CityDistanceRow, CityTrafficOrdersRow, CityTrafficStatRow, CleanRecord, CompanyMetrics,
    DailyOrdersRow, DelivererMetrics, DelivererRatingRow, DelivererTimeRow, DeliveryLocationRow,
    GroupStatRow, RestaurantMetrics, TrafficShareRow, WeeklyDelivererLoadRow, WeeklyOrdersRow,
};
use crate::util::{display_opt_f64, format_int};

fn show_opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[derive(Debug, Serialize)]
pub struct CompanyView {
    pub metrics: CompanyMetrics,
    #[serde(skip)]
    pub orders_per_day: Vec<DailyOrdersRow>,
    #[serde(skip)]
    pub traffic_share: Vec<TrafficShareRow>,
    #[serde(skip)]
    pub city_traffic: Vec<CityTrafficOrdersRow>,
    #[serde(skip)]
    pub orders_by_week: Vec<WeeklyOrdersRow>,
    #[serde(skip)]
    pub deliverer_load: Vec<WeeklyDelivererLoadRow>,
    #[serde(skip)]
    pub locations: Vec<DeliveryLocationRow>,
}

impl CompanyView {
    pub fn build(data: &[CleanRecord]) -> Self {
        CompanyView {
            metrics: reports::company_metrics(data),
            orders_per_day: reports::orders_per_day(data),
            traffic_share: reports::traffic_order_share(data),
            city_traffic: reports::orders_by_city_traffic(data),
            orders_by_week: reports::orders_by_week(data),
            deliverer_load: reports::orders_per_deliverer_by_week(data),
            locations: reports::delivery_locations(data),
        }
    }

    pub fn render(&self, max_rows: usize) {
        println!("Marketplace - Company Vision\n");
        println!(
            "Orders: {}  Deliverers: {}  Period: {} to {}",
            format_int(self.metrics.total_orders),
            format_int(self.metrics.total_deliverers),
            show_opt(self.metrics.first_order_date),
            show_opt(self.metrics.last_order_date)
        );
        preview_table("Orders by Day", None, &self.orders_per_day, max_rows);
        preview_table(
            "Orders - Traffic Density",
            Some("share of orders"),
            &self.traffic_share,
            max_rows,
        );
        preview_table("Orders - City and Traffic", None, &self.city_traffic, max_rows);
        preview_table("Orders by Week", None, &self.orders_by_week, max_rows);
        preview_table("Orders per Deliverer by Week", None, &self.deliverer_load, max_rows);
        preview_table(
            "Country Map",
            Some("median delivery location per city and traffic"),
            &self.locations,
            max_rows,
        );
    }

    pub fn export(&self, out_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(out_dir)?;
        write_csv(&out_dir.join("company_orders_per_day.csv"), &self.orders_per_day)?;
        write_csv(&out_dir.join("company_traffic_share.csv"), &self.traffic_share)?;
        write_csv(&out_dir.join("company_city_traffic.csv"), &self.city_traffic)?;
        write_csv(&out_dir.join("company_orders_by_week.csv"), &self.orders_by_week)?;
        write_csv(&out_dir.join("company_deliverer_load.csv"), &self.deliverer_load)?;
        write_csv(&out_dir.join("company_delivery_locations.csv"), &self.locations)?;
        write_json(&out_dir.join("company_metrics.json"), self)?;
        info!("Company view exported to {}", out_dir.display());
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct DelivererView {
    pub metrics: DelivererMetrics,
    #[serde(skip)]
    pub ratings: Vec<DelivererRatingRow>,
    #[serde(skip)]
    pub rating_by_traffic: Vec<GroupStatRow>,
    #[serde(skip)]
    pub rating_by_weather: Vec<GroupStatRow>,
    #[serde(skip)]
    pub fastest: Vec<DelivererTimeRow>,
    #[serde(skip)]
    pub slowest: Vec<DelivererTimeRow>,
}

impl DelivererView {
    pub fn build(data: &[CleanRecord]) -> Self {
        DelivererView {
            metrics: reports::deliverer_metrics(data),
            ratings: reports::rating_per_deliverer(data),
            rating_by_traffic: reports::rating_by_traffic(data),
            rating_by_weather: reports::rating_by_weather(data),
            fastest: reports::top_deliverers(data, true),
            slowest: reports::top_deliverers(data, false),
        }
    }

    pub fn render(&self, max_rows: usize) {
        println!("Marketplace - Deliverers Vision\n");
        println!(
            "Oldest: {}  Youngest: {}  Best Vehicle Cond: {}  Worst Vehicle Cond: {}",
            show_opt(self.metrics.oldest_age),
            show_opt(self.metrics.youngest_age),
            show_opt(self.metrics.best_vehicle_condition),
            show_opt(self.metrics.worst_vehicle_condition)
        );
        preview_table("Average Rates per Deliverer", None, &self.ratings, max_rows);
        preview_table("Avg Rates - Traffic Condition", None, &self.rating_by_traffic, max_rows);
        preview_table("Avg Rates - Weather Condition", None, &self.rating_by_weather, max_rows);
        preview_table("Top 10 Fastest Deliverers", None, &self.fastest, max_rows);
        preview_table("Top 10 Slowest Deliverers", None, &self.slowest, max_rows);
    }

    pub fn export(&self, out_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(out_dir)?;
        write_csv(&out_dir.join("deliverers_ratings.csv"), &self.ratings)?;
        write_csv(&out_dir.join("deliverers_rating_by_traffic.csv"), &self.rating_by_traffic)?;
        write_csv(&out_dir.join("deliverers_rating_by_weather.csv"), &self.rating_by_weather)?;
        write_csv(&out_dir.join("deliverers_fastest.csv"), &self.fastest)?;
        write_csv(&out_dir.join("deliverers_slowest.csv"), &self.slowest)?;
        write_json(&out_dir.join("deliverers_metrics.json"), self)?;
        info!("Deliverers view exported to {}", out_dir.display());
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct RestaurantView {
    pub metrics: RestaurantMetrics,
    #[serde(skip)]
    pub time_by_city: Vec<GroupStatRow>,
    #[serde(skip)]
    pub time_by_city_traffic: Vec<CityTrafficStatRow>,
    #[serde(skip)]
    pub distance_by_city: Vec<CityDistanceRow>,
}

impl RestaurantView {
    pub fn build(data: &[CleanRecord]) -> Self {
        RestaurantView {
            metrics: reports::restaurant_metrics(data),
            time_by_city: reports::time_by_city(data),
            time_by_city_traffic: reports::time_by_city_traffic(data),
            distance_by_city: reports::distance_by_city(data),
        }
    }

    pub fn render(&self, max_rows: usize) {
        let m = &self.metrics;
        println!("Marketplace - Restaurants Vision\n");
        println!(
            "Unique Deliverers: {}  Average Distance: {}",
            format_int(m.unique_deliverers),
            display_opt_f64(&m.average_distance_km)
        );
        println!(
            "Festival avg/std: {} / {}  Outside festival avg/std: {} / {}",
            display_opt_f64(&m.festival_avg_time),
            display_opt_f64(&m.festival_std_time),
            display_opt_f64(&m.regular_avg_time),
            display_opt_f64(&m.regular_std_time)
        );
        preview_table("Time Distribution per City", None, &self.time_by_city, max_rows);
        preview_table(
            "Average Delivery Time per City and Traffic",
            None,
            &self.time_by_city_traffic,
            max_rows,
        );
        preview_table(
            "Distribution of Average Distance per City",
            Some("first 11 orders only"),
            &self.distance_by_city,
            max_rows,
        );
    }

    pub fn export(&self, out_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(out_dir)?;
        write_csv(&out_dir.join("restaurants_time_by_city.csv"), &self.time_by_city)?;
        write_csv(
            &out_dir.join("restaurants_time_by_city_traffic.csv"),
            &self.time_by_city_traffic,
        )?;
        write_csv(&out_dir.join("restaurants_distance_by_city.csv"), &self.distance_by_city)?;
        write_json(&out_dir.join("restaurants_metrics.json"), self)?;
        info!("Restaurants view exported to {}", out_dir.display());
        Ok(())
    }
}
