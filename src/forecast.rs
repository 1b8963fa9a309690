//! Weekly sales forecasts and their interpolation into hourly demand curves.

use std::collections::HashMap;
use std::path::Path;

use crate::{
    error::ScheduleError,
    horizon::{ANCHOR_WEEKS, H, WEEK_HOURS},
    product::{ProductId, ProductTable},
};

/// Number of weekly targets a raw forecast row must supply, per the core interpolation
/// algorithm (`w0..w4`). The external interface tolerates a 4-row upload, but the fixed
/// horizon formula (`H = 6*168 + 1`) is only defined for five weekly anchors; see
/// `DESIGN.md` for why a four-row file is rejected rather than silently padded.
pub const WEEKS_PER_FORECAST: usize = 5;

/// One row of weekly targets, `w0..w4`, for a single product.
pub type WeeklyTargets = [f64; WEEKS_PER_FORECAST];

/// A raw, not-yet-interpolated forecast: `product name -> weekly targets`.
#[derive(Debug, Clone, Default)]
pub struct RawForecast {
    rows: HashMap<String, WeeklyTargets>,
}

impl RawForecast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, product: impl Into<String>, weeks: WeeklyTargets) {
        self.rows.insert(product.into(), weeks);
    }

    pub fn products(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Reads a header row of product names followed by 4-5 numeric rows of weekly targets.
    ///
    /// Mirrors the teacher's `io::csv` reader, but the record shape (one column per
    /// product, one row per week) is fixed at call time rather than derived via
    /// `serde`'s per-record `Deserialize`, so we parse with the `csv` crate's raw
    /// `StringRecord` API directly.
    pub fn read_from_csv(path: &Path) -> Result<Self, ScheduleError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(ScheduleError::from)?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(ScheduleError::from)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record.map_err(ScheduleError::from)?;
            if record.len() != headers.len() {
                return Err(ScheduleError::MalformedForecast(format!(
                    "row has {} cells, expected {}",
                    record.len(),
                    headers.len()
                )));
            }
            for (i, cell) in record.iter().enumerate() {
                let value: f64 = cell.trim().parse().map_err(|_| {
                    ScheduleError::MalformedForecast(format!("non-numeric cell '{cell}'"))
                })?;
                columns[i].push(value);
            }
        }

        let mut forecast = Self::new();
        for (name, column) in headers.into_iter().zip(columns) {
            if column.len() != WEEKS_PER_FORECAST {
                return Err(ScheduleError::MalformedForecast(format!(
                    "product '{name}' has {} weekly targets, expected {WEEKS_PER_FORECAST}",
                    column.len()
                )));
            }
            let mut weeks = [0.0; WEEKS_PER_FORECAST];
            weeks.copy_from_slice(&column);
            forecast.insert(name, weeks);
        }
        Ok(forecast)
    }
}

/// An hourly cumulative demand curve `D[p]`, length `H`.
pub type DemandCurve = Vec<f64>;

/// `product id -> D[p]` for every product in the raw forecast.
pub type DemandCurves = HashMap<ProductId, DemandCurve>;

/// Converts weekly forecasts into hourly cumulative demand curves.
///
/// Interns every product name it sees into `products`, so the returned keys line up with
/// whatever product table the rest of the problem is built against.
pub fn interpolate(raw: &RawForecast, products: &mut ProductTable) -> DemandCurves {
    let mut curves = DemandCurves::with_capacity(raw.rows.len());
    for (name, weeks) in &raw.rows {
        let id = products.intern(name);
        curves.insert(id, interpolate_one(weeks));
    }
    curves
}

/// Interpolates a single product's weekly targets into an hourly demand curve.
///
/// Prepends and appends a zero-target week, giving `ANCHOR_WEEKS + 1` anchors spaced
/// `WEEK_HOURS` apart; takes the cumulative sum of the per-week targets across those
/// anchors, then linearly interpolates hour-by-hour between consecutive anchors.
fn interpolate_one(weeks: &WeeklyTargets) -> DemandCurve {
    debug_assert_eq!(ANCHOR_WEEKS, weeks.len() + 1);

    let mut anchors = [0.0; ANCHOR_WEEKS + 1];
    let mut running = 0.0;
    for (i, &w) in weeks.iter().enumerate() {
        running += w;
        anchors[i + 1] = running;
    }
    anchors[ANCHOR_WEEKS] = running; // trailing zero-target week: no further growth

    let mut curve = vec![0.0; H];
    for segment in 0..ANCHOR_WEEKS {
        let start_val = anchors[segment];
        let end_val = anchors[segment + 1];
        let base = segment * WEEK_HOURS;
        for h in 0..WEEK_HOURS {
            let frac = h as f64 / WEEK_HOURS as f64;
            curve[base + h] = start_val + (end_val - start_val) * frac;
        }
    }
    curve[H - 1] = anchors[ANCHOR_WEEKS];
    curve
}

/// A forecast that carries whether it has been interpolated yet.
///
/// Mirrors the original system's `SalesForecast._is_interpolated` flag: attaching a
/// forecast to a [`crate::problem::Problem`] before interpolation is a
/// [`ScheduleError::ForecastNotInterpolated`].
#[derive(Debug, Clone)]
pub enum SalesForecast {
    Raw(RawForecast),
    Interpolated(DemandCurves),
}

impl SalesForecast {
    pub fn from_raw(raw: RawForecast) -> Self {
        SalesForecast::Raw(raw)
    }

    pub fn interpolate(self, products: &mut ProductTable) -> Self {
        match self {
            SalesForecast::Raw(raw) => {
                SalesForecast::Interpolated(interpolate(&raw, products))
            }
            already => already,
        }
    }

    pub fn into_curves(self) -> Result<DemandCurves, ScheduleError> {
        match self {
            SalesForecast::Interpolated(curves) => Ok(curves),
            SalesForecast::Raw(_) => Err(ScheduleError::ForecastNotInterpolated),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn interpolated_curve_starts_at_zero_and_is_nondecreasing() {
        let curve = interpolate_one(&[87.0, 0.0, 108.0, 102.0, 50.0]);
        assert_eq!(curve.len(), H);
        assert_eq!(curve[0], 0.0);
        for w in curve.windows(2) {
            assert!(w[1] >= w[0] - 1e-9);
        }
    }

    #[test]
    fn curve_reaches_cumulative_total_and_stays_flat_after() {
        let curve = interpolate_one(&[10.0, 10.0, 10.0, 10.0, 10.0]);
        // last anchor (week 5, i.e. hour 5*168) holds the full total
        assert!((curve[5 * WEEK_HOURS] - 50.0).abs() < 1e-9);
        // trailing zero-target week: flat through the end of the horizon
        assert!((curve[H - 1] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn all_zero_forecast_is_all_zero_curve() {
        let curve = interpolate_one(&[0.0; 5]);
        assert!(curve.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn attaching_a_raw_forecast_is_an_error() {
        let raw = RawForecast::new();
        let forecast = SalesForecast::from_raw(raw);
        assert!(matches!(
            forecast.into_curves(),
            Err(ScheduleError::ForecastNotInterpolated)
        ));
    }

    #[test]
    fn malformed_csv_rows_are_rejected() {
        let dir = std::env::temp_dir().join("shift_anneal_test_forecast");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.csv");
        std::fs::write(&path, "Product_1,Product_2\n1,2\nx,4\n").unwrap();
        let err = RawForecast::read_from_csv(&path).unwrap_err();
        assert!(matches!(err, ScheduleError::MalformedForecast(_)));
    }
}
