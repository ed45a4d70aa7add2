// Utility helpers for parsing, basic statistics and number formatting.
//
// The cleaner and the reports lean on these so neither has to care about
// the textual quirks of the source CSV.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Date layout used by the dataset and the `--until` option (`13-03-2022`).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Label that prefixes the elapsed time column, e.g. `"(min) 24"`.
pub const TIME_TAKEN_LABEL: &str = "(min)";

/// Token the dataset writes for an absent value (as `"NaN "`).
pub const MISSING_MARKER: &str = "NaN";

/// Mean earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// `true` when a raw field holds the missing-value marker, ignoring the
/// padding the export leaves around it.
pub fn is_missing(s: &str) -> bool {
    s.trim() == MISSING_MARKER
}

/// Parse a string-like value into `f64` while being forgiving about
/// surrounding whitespace.
///
/// Returns `None` for blank or unparsable input.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

pub fn parse_i32_safe(s: Option<&str>) -> Option<i32> {
    // `?` propagates `None` early if the option is missing.
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i32>().ok()
}

pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Pull the minutes out of `"(min) 24"`. The label is required.
pub fn parse_time_taken(s: &str) -> Option<i32> {
    let rest = s.trim_start().strip_prefix(TIME_TAKEN_LABEL)?;
    parse_i32_safe(Some(rest))
}

pub fn average(v: &[f64]) -> f64 {
    // Standard arithmetic mean; returns 0 for an empty slice to avoid NaNs.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
///
/// Fewer than two values have no spread to measure, so the result is NaN.
pub fn std_dev(v: &[f64]) -> f64 {
    if v.len() < 2 {
        return f64::NAN;
    }
    let mean = average(v);
    let sum_sq: f64 = v.iter().map(|x| (x - mean).powi(2)).sum();
    (sum_sq / (v.len() - 1) as f64).sqrt()
}

/// Values that hold a number; a `NaN` rating in the dataset means "not rated".
pub fn skip_nan(v: &[f64]) -> Vec<f64> {
    v.iter().copied().filter(|x| !x.is_nan()).collect()
}

/// Mean over the non-NaN values, or NaN when there are none.
pub fn nan_mean(v: &[f64]) -> f64 {
    let present = skip_nan(v);
    if present.is_empty() {
        return f64::NAN;
    }
    average(&present)
}

/// Sample standard deviation over the non-NaN values.
pub fn nan_std_dev(v: &[f64]) -> f64 {
    std_dev(&skip_nan(v))
}

pub fn median(mut v: Vec<f64>) -> f64 {
    // We accept `Vec<f64>` by value so the function can sort in-place
    // without cloning at the call site.
    if v.is_empty() {
        return 0.0;
    }
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = v.len() / 2;
    if v.len() % 2 == 1 {
        v[mid]
    } else {
        (v[mid - 1] + v[mid]) / 2.0
    }
}

/// Great-circle distance in kilometres between two `(lat, lon)` points
/// given in degrees.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

pub fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value with:
    // - a fixed number of decimal places, and
    // - locale-aware thousands separators (e.g., `1,234,567.89`).
    if !n.is_finite() {
        return n.to_string();
    }
    let neg = n.is_sign_negative();
    let abs_n = n.abs();
    // First, format to a plain fixed-decimal string like `1234567.89`.
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // Use `num-format` to insert commas into the integer portion.
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg && abs_n > 0.0 {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format`, used for row counts in console messages.
    n.to_formatted_string(&Locale::en)
}

/// Table cell renderer for floating-point columns.
pub fn display_f64(n: &f64) -> String {
    format_number(*n, 2)
}

pub fn display_opt_f64(n: &Option<f64>) -> String {
    match n {
        Some(v) => format_number(*v, 2),
        None => "-".to_string(),
    }
}
