use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{DashboardError, Result};
use crate::types::CleanRecord;
use crate::util::{parse_date_safe, DATE_FORMAT};

pub const TRAFFIC_LEVELS: [&str; 4] = ["Low", "Medium", "High", "Jam"];

/// Row selection a view applies between cleaning and aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    /// Orders strictly before this date are kept.
    pub until: NaiveDate,
    pub traffic: Vec<String>,
    /// `None` keeps every weather category.
    pub weather: Option<Vec<String>>,
}

impl FilterOptions {
    /// Build options from command-line text. An empty weather list means
    /// "all categories".
    pub fn from_cli(until: &str, traffic: &[String], weather: &[String]) -> Result<Self> {
        let until = parse_date_safe(Some(until)).ok_or_else(|| {
            DashboardError::Filter(format!("{until:?} is not a {DATE_FORMAT} date"))
        })?;
        let trimmed = |v: &[String]| -> Vec<String> {
            v.iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        };
        let weather = trimmed(weather);
        Ok(FilterOptions {
            until,
            traffic: trimmed(traffic),
            weather: if weather.is_empty() { None } else { Some(weather) },
        })
    }

    pub fn matches(&self, r: &CleanRecord) -> bool {
        r.order_date < self.until
            && self.traffic.iter().any(|t| *t == r.traffic)
            && self
                .weather
                .as_ref()
                .map_or(true, |w| w.iter().any(|c| *c == r.weather))
    }

    pub fn apply(&self, data: Vec<CleanRecord>) -> Vec<CleanRecord> {
        let before = data.len();
        let kept: Vec<CleanRecord> = data.into_iter().filter(|r| self.matches(r)).collect();
        debug!(before, after = kept.len(), until = %self.until, "applied filters");
        if kept.is_empty() && before > 0 {
            warn!("Filters removed every row; summaries will be empty");
        }
        kept
    }
}
