//! Evenly spaced scan centers over a lat/lng box.
//!
//! [`crate::nyc_grid`] tiles the five boroughs with these points so that
//! neighbouring search circles overlap. Spacing is in kilometres, the same
//! unit as the search radius sent to the API.

const KM_PER_LAT_DEGREE: f64 = 111.32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Bounding box plus center-to-center spacing.
#[derive(Debug, Clone)]
pub struct GridConfig {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
    pub spacing_km: f64,
}

impl GridConfig {
    /// Staten Island's south shore to the north Bronx, Tottenville to Far
    /// Rockaway. At 6.5 km spacing a 10 km radius leaves no gaps between
    /// diagonal neighbours.
    #[must_use]
    pub fn nyc() -> Self {
        Self {
            south: 40.49,
            north: 40.92,
            west: -74.26,
            east: -73.70,
            spacing_km: 6.5,
        }
    }
}

/// Lays out points row by row, south to north and west to east.
///
/// Rows are `spacing_km` apart. Within a row, the degree step widens with
/// latitude so points stay `spacing_km` apart on the ground. Each axis gets
/// the whole number of steps closest to its span, so the last row/column
/// lands within half a step of the north/east edge. A collapsed or inverted
/// axis yields a single row or column at the south/west edge.
#[must_use]
pub fn generate_grid(config: &GridConfig) -> Vec<GridPoint> {
    let lat_step = config.spacing_km / KM_PER_LAT_DEGREE;
    let rows = step_count(config.north - config.south, lat_step);

    (0..=rows)
        .flat_map(|row| {
            let lat = config.south + f64::from(row) * lat_step;
            let lng_step = config.spacing_km / (KM_PER_LAT_DEGREE * lat.to_radians().cos());
            let cols = step_count(config.east - config.west, lng_step);
            (0..=cols).map(move |col| GridPoint {
                lat,
                lng: config.west + f64::from(col) * lng_step,
            })
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn step_count(span: f64, step: f64) -> u32 {
    if !(span > 0.0 && step > 0.0) || !step.is_finite() {
        return 0;
    }
    (span / step).round().min(f64::from(u32::MAX)) as u32
}
