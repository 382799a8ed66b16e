//! Historical-record aggregation feeding the dashboard charts and the
//! hotspot renderer.
//!
//! All aggregations are pure functions over the record list. Records with a
//! malformed date are skipped rather than failing the whole batch; the
//! historical feed is bulk sensor data and a bad row is expected noise.

use crate::core_types::{FireRecord, HotspotPoint};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Calendar season, meteorological bucketing (December belongs to Winter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Season of a 1-based calendar month.
    pub fn from_month(month: u32) -> Option<Self> {
        match month {
            12 | 1 | 2 => Some(Season::Winter),
            3..=5 => Some(Season::Spring),
            6..=8 => Some(Season::Summer),
            9..=11 => Some(Season::Autumn),
            _ => None,
        }
    }
}

/// Parse the month out of a `YYYY-MM-DD` date, 1-based.
fn month_of(date: &str) -> Option<u32> {
    let month: u32 = date.get(5..7)?.parse().ok()?;
    (1..=12).contains(&month).then_some(month)
}

/// Parse the year out of a `YYYY-MM-DD` date.
fn year_of(date: &str) -> Option<u16> {
    date.get(0..4)?.parse().ok()
}

/// Confirmed fires per calendar month, January first.
pub fn monthly_distribution(records: &[FireRecord]) -> [u32; 12] {
    let mut bins = [0u32; 12];
    for record in records.iter().filter(|r| r.is_fire()) {
        if let Some(month) = month_of(&record.date) {
            bins[(month - 1) as usize] += 1;
        } else {
            debug!(date = %record.date, "skipping record with malformed date");
        }
    }
    bins
}

/// Confirmed fires per year.
pub fn yearly_trend(records: &[FireRecord]) -> FxHashMap<u16, u32> {
    let mut years = FxHashMap::default();
    for record in records.iter().filter(|r| r.is_fire()) {
        if let Some(year) = year_of(&record.date) {
            *years.entry(year).or_insert(0) += 1;
        }
    }
    years
}

/// Fire probability per season, in percent: the share of that season's
/// records with a confirmed fire. Seasons with no records report 0.
pub fn seasonal_risk(records: &[FireRecord]) -> FxHashMap<Season, f32> {
    let mut totals: FxHashMap<Season, (u32, u32)> = FxHashMap::default();
    for record in records {
        let Some(season) = month_of(&record.date).and_then(Season::from_month) else {
            continue;
        };
        let entry = totals.entry(season).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += u32::from(record.is_fire());
    }

    let mut risk = FxHashMap::default();
    for season in [
        Season::Winter,
        Season::Spring,
        Season::Summer,
        Season::Autumn,
    ] {
        // Entries only exist with at least one record, so total is nonzero.
        let pct = totals
            .get(&season)
            .map_or(0.0, |&(total, fires)| fires as f32 / total as f32 * 100.0);
        risk.insert(season, pct);
    }
    risk
}

/// Build hotspot points from raw `[lat, lon, brightness]` triples.
///
/// Brightness is a Kelvin reading (roughly 300-400), so it is min-max
/// normalized across the batch into the [0, 1] intensity the markers expect.
/// A batch with uniform brightness gets the neutral 0.5.
pub fn hotspot_points(locations: &[[f64; 3]]) -> Vec<HotspotPoint> {
    normalize_hotspots(locations.iter().map(|l| (l[0], l[1], l[2] as f32)))
}

/// Build hotspot points from confirmed fire records, brightness-normalized
/// the same way as [`hotspot_points`].
pub fn hotspots_from_records(records: &[FireRecord]) -> Vec<HotspotPoint> {
    normalize_hotspots(
        records
            .iter()
            .filter(|r| r.is_fire())
            .map(|r| (r.latitude, r.longitude, r.brightness)),
    )
}

fn normalize_hotspots(raw: impl Iterator<Item = (f64, f64, f32)>) -> Vec<HotspotPoint> {
    let raw: Vec<(f64, f64, f32)> = raw.collect();
    if raw.is_empty() {
        return Vec::new();
    }
    let min = raw.iter().fold(f32::INFINITY, |a, r| a.min(r.2));
    let max = raw.iter().fold(f32::NEG_INFINITY, |a, r| a.max(r.2));
    let span = max - min;
    raw.into_iter()
        .map(|(lat, lon, brightness)| {
            let intensity = if span > f32::EPSILON {
                (brightness - min) / span
            } else {
                0.5
            };
            HotspotPoint::new(lat, lon, intensity)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, fire: u8, brightness: f32) -> FireRecord {
        FireRecord {
            date: date.to_string(),
            latitude: 29.6,
            longitude: 79.66,
            fire_occurred: fire,
            brightness,
            confidence: 80.0,
        }
    }

    #[test]
    fn test_monthly_distribution_counts_fires_only() {
        let records = vec![
            record("2020-04-12", 1, 330.0),
            record("2020-04-20", 1, 340.0),
            record("2020-04-25", 0, 300.0),
            record("2021-12-01", 1, 320.0),
            record("bad-date", 1, 320.0),
        ];
        let bins = monthly_distribution(&records);
        assert_eq!(bins[3], 2);
        assert_eq!(bins[11], 1);
        assert_eq!(bins.iter().sum::<u32>(), 3);
    }

    #[test]
    fn test_yearly_trend() {
        let records = vec![
            record("2020-04-12", 1, 330.0),
            record("2020-06-01", 1, 335.0),
            record("2021-05-02", 1, 320.0),
            record("2021-05-03", 0, 300.0),
        ];
        let years = yearly_trend(&records);
        assert_eq!(years[&2020], 2);
        assert_eq!(years[&2021], 1);
    }

    #[test]
    fn test_season_bucketing() {
        assert_eq!(Season::from_month(12), Some(Season::Winter));
        assert_eq!(Season::from_month(2), Some(Season::Winter));
        assert_eq!(Season::from_month(3), Some(Season::Spring));
        assert_eq!(Season::from_month(8), Some(Season::Summer));
        assert_eq!(Season::from_month(11), Some(Season::Autumn));
        assert_eq!(Season::from_month(0), None);
    }

    #[test]
    fn test_seasonal_risk_percentages() {
        let records = vec![
            record("2020-04-12", 1, 330.0),
            record("2020-04-13", 0, 300.0),
            record("2020-07-01", 0, 300.0),
            record("2020-07-02", 0, 300.0),
        ];
        let risk = seasonal_risk(&records);
        assert!((risk[&Season::Spring] - 50.0).abs() < 1e-5);
        assert_eq!(risk[&Season::Summer], 0.0);
        // Seasons with no data still appear, at zero.
        assert_eq!(risk[&Season::Winter], 0.0);
        assert_eq!(risk.len(), 4);
    }

    #[test]
    fn test_hotspot_brightness_normalization() {
        let points = hotspot_points(&[
            [29.6, 79.66, 300.0],
            [29.5, 79.70, 350.0],
            [29.4, 79.80, 400.0],
        ]);
        assert_eq!(points[0].intensity, 0.0);
        assert!((points[1].intensity - 0.5).abs() < 1e-6);
        assert_eq!(points[2].intensity, 1.0);
    }

    #[test]
    fn test_uniform_brightness_is_neutral() {
        let points = hotspot_points(&[[29.6, 79.66, 330.0], [29.5, 79.70, 330.0]]);
        assert!(points.iter().all(|p| (p.intensity - 0.5).abs() < 1e-6));
        assert!(hotspot_points(&[]).is_empty());
    }

    #[test]
    fn test_hotspots_from_records_filter_and_normalize() {
        let records = vec![
            record("2020-04-12", 1, 310.0),
            record("2020-04-13", 0, 999.0),
            record("2020-04-14", 1, 360.0),
        ];
        let points = hotspots_from_records(&records);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].intensity, 0.0);
        assert_eq!(points[1].intensity, 1.0);
    }
}
