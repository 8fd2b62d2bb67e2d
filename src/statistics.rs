/*! Summary statistics of the earthquakes considered by the risk analysis. */

use crate::{
    error::PredictionError,
    predict::{historical_quakes, round_to, Prediction},
    quake::{QuakeSource, Region, SeismicEvent},
    risk::RiskLevel,
};
use chrono::{Local, NaiveDateTime};
use std::fmt::{self, Display};

/// Activity within a single region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionStatistics {
    pub name: String,
    pub count: usize,
    /// Rounded to two decimal places.
    pub avg_magnitude: f64,
}

/// Activity over the last year in the Caraga region.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneStatistics {
    pub total_earthquakes_1year: usize,
    /// Rounded to two decimal places, 0 when there were no earthquakes.
    pub average_magnitude: f64,
    /// 0 when there were no earthquakes.
    pub highest_magnitude: f64,
    /// Only regions with at least one earthquake, in the order the source lists them.
    pub regions: Vec<RegionStatistics>,
}

impl ZoneStatistics {
    fn from_quakes(historical: &[SeismicEvent], regions: &[Region]) -> Self {
        let region_stats = regions
            .iter()
            .filter_map(|region| {
                let quakes: Vec<&SeismicEvent> = historical
                    .iter()
                    .filter(|eq| eq.region_id == region.id)
                    .collect();

                if quakes.is_empty() {
                    None
                } else {
                    Some(RegionStatistics {
                        name: region.name.clone(),
                        count: quakes.len(),
                        avg_magnitude: average_magnitude(quakes.iter().copied()),
                    })
                }
            })
            .collect();

        let highest_magnitude = historical
            .iter()
            .map(|eq| eq.magnitude)
            .fold(None, |max: Option<f64>, mag| Some(max.map_or(mag, |m| m.max(mag))))
            .unwrap_or(0.0);

        ZoneStatistics {
            total_earthquakes_1year: historical.len(),
            average_magnitude: average_magnitude(historical.iter()),
            highest_magnitude,
            regions: region_stats,
        }
    }
}

impl Display for ZoneStatistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        writeln!(f, "Earthquakes in the last year: {}", self.total_earthquakes_1year)?;
        writeln!(f, "           Average magnitude: {:.2}", self.average_magnitude)?;
        writeln!(f, "           Highest magnitude: {:.1}", self.highest_magnitude)?;

        for region in &self.regions {
            writeln!(
                f,
                "{:>28}: {:5} events, average magnitude {:.2}",
                region.name, region.count, region.avg_magnitude
            )?;
        }

        Ok(())
    }
}

/// How the ranked predictions break down by risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionSummary {
    /// Predictions at the critical level.
    pub critical: usize,
    /// Predictions at the high or moderate level.
    pub high_or_moderate: usize,
    pub total: usize,
}

impl PredictionSummary {
    pub fn from_predictions(predictions: &[Prediction]) -> Self {
        let count_levels = |levels: &[RiskLevel]| {
            predictions
                .iter()
                .filter(|p| levels.contains(&p.risk_level))
                .count()
        };

        PredictionSummary {
            critical: count_levels(&[RiskLevel::Critical]),
            high_or_moderate: count_levels(&[RiskLevel::High, RiskLevel::Moderate]),
            total: predictions.len(),
        }
    }
}

impl Display for PredictionSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        writeln!(f, "              Critical zones: {}", self.critical)?;
        writeln!(f, "     High and moderate zones: {}", self.high_or_moderate)?;
        writeln!(f, "            Total risk zones: {}", self.total)
    }
}

/// Mean magnitude rounded to 2 decimal places, or 0 for no events.
fn average_magnitude<'a, I>(quakes: I) -> f64
where
    I: Iterator<Item = &'a SeismicEvent>,
{
    let (count, sum) = quakes.fold((0usize, 0.0), |(count, sum), eq| (count + 1, sum + eq.magnitude));

    if count == 0 {
        return 0.0;
    }

    round_to(sum / count as f64, 2)
}

/// Summarize the last year of earthquakes using the current local time.
pub fn get_zone_statistics<S: QuakeSource>(source: &S) -> Result<ZoneStatistics, PredictionError> {
    get_zone_statistics_at(source, Local::now().naive_local())
}

/// Summarize the year of earthquakes before `now`.
pub fn get_zone_statistics_at<S: QuakeSource>(
    source: &S,
    now: NaiveDateTime,
) -> Result<ZoneStatistics, PredictionError> {
    let historical = historical_quakes(source, now)?;
    let regions = source.regions()?;

    Ok(ZoneStatistics::from_quakes(&historical, &regions))
}
