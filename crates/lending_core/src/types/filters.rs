//! Filter selectors that parameterise dataset generation.
//!
//! Two orthogonal selectors drive the feed:
//! - [`Geography`] fixes the magnitude scale factor and the region category set
//! - [`TimeRange`] fixes sequence lengths and the sampling granularity
//!
//! # Examples
//!
//! ```
//! use lending_core::types::{FilterSet, Geography, TimeRange};
//!
//! let filters: FilterSet = FilterSet::parse("uk", "7d").unwrap();
//! assert_eq!(filters.geography, Geography::Uk);
//! assert_eq!(filters.time_range, TimeRange::Week);
//! assert_eq!(filters.geography.regions().len(), 8);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Months, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::error::FilterError;

/// Geography selector.
///
/// Each geography carries a fixed magnitude multiplier applied uniformly to
/// every generated volume or amount, and a fixed region category set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Geography {
    /// Aggregate view over all markets (continental regions)
    #[default]
    All,
    /// United States
    Usa,
    /// United Kingdom
    Uk,
    /// Germany
    Germany,
    /// Canada
    Canada,
    /// France
    France,
}

const ALL_REGIONS: [&str; 6] = [
    "North America",
    "Europe",
    "Asia Pacific",
    "Latin America",
    "Middle East",
    "Africa",
];

const USA_REGIONS: [&str; 8] = [
    "California",
    "Texas",
    "Florida",
    "New York",
    "Illinois",
    "Pennsylvania",
    "Ohio",
    "Georgia",
];

const UK_REGIONS: [&str; 8] = [
    "London",
    "Manchester",
    "Birmingham",
    "Glasgow",
    "Liverpool",
    "Leeds",
    "Sheffield",
    "Bristol",
];

const GERMANY_REGIONS: [&str; 8] = [
    "Berlin",
    "Munich",
    "Hamburg",
    "Cologne",
    "Frankfurt",
    "Stuttgart",
    "Düsseldorf",
    "Dortmund",
];

const CANADA_REGIONS: [&str; 8] = [
    "Ontario",
    "Quebec",
    "British Columbia",
    "Alberta",
    "Manitoba",
    "Saskatchewan",
    "Nova Scotia",
    "New Brunswick",
];

const FRANCE_REGIONS: [&str; 8] = [
    "Paris",
    "Marseille",
    "Lyon",
    "Toulouse",
    "Nice",
    "Nantes",
    "Strasbourg",
    "Bordeaux",
];

impl Geography {
    /// Every geography, in selector order.
    pub const ALL: [Geography; 6] = [
        Geography::All,
        Geography::Usa,
        Geography::Uk,
        Geography::Germany,
        Geography::Canada,
        Geography::France,
    ];

    /// Returns the selector code used by the filter source.
    pub fn code(&self) -> &'static str {
        match self {
            Geography::All => "all",
            Geography::Usa => "usa",
            Geography::Uk => "uk",
            Geography::Germany => "germany",
            Geography::Canada => "canada",
            Geography::France => "france",
        }
    }

    /// Magnitude multiplier applied to every generated volume and amount.
    ///
    /// # Examples
    ///
    /// ```
    /// use lending_core::types::Geography;
    ///
    /// assert_eq!(Geography::Usa.scale(), 1.5);
    /// assert_eq!(Geography::France.scale(), 0.8);
    /// ```
    pub fn scale(&self) -> f64 {
        match self {
            Geography::All => 1.3,
            Geography::Usa => 1.5,
            Geography::Uk => 1.2,
            Geography::Germany => 1.1,
            Geography::Canada => 1.0,
            Geography::France => 0.8,
        }
    }

    /// Region category set for this geography.
    ///
    /// Six continental regions for the aggregate view, eight sub-national
    /// regions for each single country.
    pub fn regions(&self) -> &'static [&'static str] {
        match self {
            Geography::All => &ALL_REGIONS,
            Geography::Usa => &USA_REGIONS,
            Geography::Uk => &UK_REGIONS,
            Geography::Germany => &GERMANY_REGIONS,
            Geography::Canada => &CANADA_REGIONS,
            Geography::France => &FRANCE_REGIONS,
        }
    }
}

impl fmt::Display for Geography {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Geography {
    type Err = FilterError;

    /// Parses a geography code (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Geography::All),
            "usa" => Ok(Geography::Usa),
            "uk" => Ok(Geography::Uk),
            "germany" => Ok(Geography::Germany),
            "canada" => Ok(Geography::Canada),
            "france" => Ok(Geography::France),
            _ => Err(FilterError::UnknownGeography(s.to_string())),
        }
    }
}

/// Time-range selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    /// Last 24 hours, sampled hourly
    #[default]
    #[serde(rename = "24h")]
    Day,
    /// Last 7 days, sampled daily
    #[serde(rename = "7d")]
    Week,
    /// Last 30 days, sampled daily
    #[serde(rename = "30d")]
    Month,
    /// All time, sampled monthly
    #[serde(rename = "all")]
    AllTime,
}

impl TimeRange {
    /// Every time range, in selector order.
    pub const ALL: [TimeRange; 4] = [
        TimeRange::Day,
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::AllTime,
    ];

    /// Returns the selector code used by the filter source.
    pub fn code(&self) -> &'static str {
        match self {
            TimeRange::Day => "24h",
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
            TimeRange::AllTime => "all",
        }
    }

    /// Number of points in the issuance series.
    pub fn issuance_points(&self) -> usize {
        match self {
            TimeRange::Day => 24,
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::AllTime => 12,
        }
    }

    /// Number of monthly points in the portfolio-yield series.
    pub fn yield_points(&self) -> usize {
        match self {
            TimeRange::AllTime => 12,
            TimeRange::Month => 6,
            TimeRange::Day | TimeRange::Week => 3,
        }
    }

    /// Sampling granularity of the issuance series.
    pub fn sampling(&self) -> Sampling {
        match self {
            TimeRange::Day => Sampling::Hourly,
            TimeRange::Week | TimeRange::Month => Sampling::Daily,
            TimeRange::AllTime => Sampling::Monthly,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for TimeRange {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "24h" => Ok(TimeRange::Day),
            "7d" => Ok(TimeRange::Week),
            "30d" => Ok(TimeRange::Month),
            "all" => Ok(TimeRange::AllTime),
            _ => Err(FilterError::UnknownTimeRange(s.to_string())),
        }
    }
}

/// Sampling granularity of a time-ordered series.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sampling {
    /// One point per hour
    Hourly,
    /// One point per day
    Daily,
    /// One point per calendar month
    Monthly,
}

impl Sampling {
    /// Moves `ts` by `steps` sampling periods (negative steps go back in time).
    ///
    /// Month arithmetic that falls outside chrono's range leaves `ts` unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use lending_core::types::Sampling;
    ///
    /// let t = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
    /// assert_eq!(Sampling::Hourly.shift(t, -2), Utc.with_ymd_and_hms(2024, 3, 31, 10, 0, 0).unwrap());
    /// // Month shifts clamp to the last day of the target month
    /// assert_eq!(Sampling::Monthly.shift(t, -1), Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap());
    /// ```
    pub fn shift(&self, ts: DateTime<Utc>, steps: i32) -> DateTime<Utc> {
        match self {
            Sampling::Hourly => ts + Duration::hours(i64::from(steps)),
            Sampling::Daily => ts + Duration::days(i64::from(steps)),
            Sampling::Monthly => {
                let months = Months::new(steps.unsigned_abs());
                let shifted = if steps >= 0 {
                    ts.checked_add_months(months)
                } else {
                    ts.checked_sub_months(months)
                };
                shifted.unwrap_or(ts)
            }
        }
    }

    /// Start of the sampling period containing `ts`.
    ///
    /// Hourly points start on the hour, daily points at midnight and monthly
    /// points at midnight on the first of the month, so a label always
    /// describes the stored timestamp exactly.
    pub fn truncate(&self, ts: DateTime<Utc>) -> DateTime<Utc> {
        let date = ts.date_naive();
        let start = match self {
            Sampling::Hourly => date.and_hms_opt(ts.hour(), 0, 0),
            Sampling::Daily => date.and_hms_opt(0, 0, 0),
            Sampling::Monthly => date.with_day(1).and_then(|d| d.and_hms_opt(0, 0, 0)),
        };
        start.map(|t| t.and_utc()).unwrap_or(ts)
    }

    /// Renders the display label for a point at `ts`.
    ///
    /// Hourly points render as `14:00`, daily points as `Mar 5`, monthly
    /// points as `Mar 24`.
    pub fn label(&self, ts: DateTime<Utc>) -> String {
        match self {
            Sampling::Hourly => ts.format("%H:00").to_string(),
            Sampling::Daily => ts.format("%b %-d").to_string(),
            Sampling::Monthly => month_label(ts),
        }
    }
}

/// Renders a month label such as `Mar 24`.
pub fn month_label(ts: DateTime<Utc>) -> String {
    ts.format("%b %y").to_string()
}

/// The active filter pair.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    /// Geography selector
    pub geography: Geography,
    /// Time-range selector
    pub time_range: TimeRange,
}

impl FilterSet {
    /// Creates a filter pair.
    pub fn new(geography: Geography, time_range: TimeRange) -> Self {
        Self {
            geography,
            time_range,
        }
    }

    /// Parses a filter pair from selector codes.
    pub fn parse(geography: &str, time_range: &str) -> Result<Self, FilterError> {
        Ok(Self::new(geography.parse()?, time_range.parse()?))
    }

    /// Returns a copy with the geography replaced.
    pub fn with_geography(self, geography: Geography) -> Self {
        Self { geography, ..self }
    }

    /// Returns a copy with the time range replaced.
    pub fn with_time_range(self, time_range: TimeRange) -> Self {
        Self { time_range, ..self }
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.geography, self.time_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_region_counts() {
        assert_eq!(Geography::All.regions().len(), 6);
        for geography in &Geography::ALL[1..] {
            assert_eq!(geography.regions().len(), 8, "{} should have 8 regions", geography);
        }
    }

    #[test]
    fn test_geography_round_trip_codes() {
        for geography in Geography::ALL {
            assert_eq!(geography.code().parse::<Geography>().unwrap(), geography);
        }
        assert_eq!("USA".parse::<Geography>().unwrap(), Geography::Usa);
        assert!("spain".parse::<Geography>().is_err());
    }

    #[test]
    fn test_time_range_parsing() {
        assert_eq!("24h".parse::<TimeRange>().unwrap(), TimeRange::Day);
        assert_eq!("7D".parse::<TimeRange>().unwrap(), TimeRange::Week);
        assert_eq!("30d".parse::<TimeRange>().unwrap(), TimeRange::Month);
        assert_eq!("all".parse::<TimeRange>().unwrap(), TimeRange::AllTime);
        assert_eq!(
            "1y".parse::<TimeRange>().unwrap_err(),
            FilterError::UnknownTimeRange("1y".to_string())
        );
    }

    #[test]
    fn test_point_counts() {
        let issuance: Vec<usize> = TimeRange::ALL.iter().map(|t| t.issuance_points()).collect();
        assert_eq!(issuance, vec![24, 7, 30, 12]);

        let yields: Vec<usize> = TimeRange::ALL.iter().map(|t| t.yield_points()).collect();
        assert_eq!(yields, vec![3, 3, 6, 12]);
    }

    #[test]
    fn test_sampling_labels() {
        let t = Utc.with_ymd_and_hms(2024, 3, 5, 14, 27, 0).unwrap();
        assert_eq!(Sampling::Hourly.label(t), "14:00");
        assert_eq!(Sampling::Daily.label(t), "Mar 5");
        assert_eq!(Sampling::Monthly.label(t), "Mar 24");
    }

    #[test]
    fn test_sampling_truncate() {
        let t = Utc.with_ymd_and_hms(2024, 3, 5, 14, 27, 41).unwrap();
        assert_eq!(Sampling::Hourly.truncate(t), Utc.with_ymd_and_hms(2024, 3, 5, 14, 0, 0).unwrap());
        assert_eq!(Sampling::Daily.truncate(t), Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());
        assert_eq!(Sampling::Monthly.truncate(t), Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());

        let aligned = Utc.with_ymd_and_hms(2024, 3, 5, 14, 0, 0).unwrap();
        assert_eq!(Sampling::Hourly.truncate(aligned), aligned);
        assert_eq!(Sampling::Hourly.label(Sampling::Hourly.truncate(t)), Sampling::Hourly.label(t));
    }

    #[test]
    fn test_sampling_shift_daily() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            Sampling::Daily.shift(t, -1),
            Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap()
        );
        assert_eq!(Sampling::Monthly.shift(t, 13), Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_filter_set_builders() {
        let filters = FilterSet::default()
            .with_geography(Geography::Canada)
            .with_time_range(TimeRange::AllTime);
        assert_eq!(filters.to_string(), "canada/all");
    }
}
