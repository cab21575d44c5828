//! Filter tour: a cyclic list of filter selections the demo steps through.

use lending_core::types::{FilterError, FilterSet};

/// Parses a `geography/time_range` code such as `usa/24h`.
pub fn parse_filter_code(code: &str) -> Result<FilterSet, FilterError> {
    match code.split_once('/') {
        Some((geography, time_range)) => FilterSet::parse(geography, time_range),
        None => FilterSet::parse(code, ""),
    }
}

/// Cyclic sequence of filter selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterTour {
    stops: Vec<FilterSet>,
    position: usize,
}

impl FilterTour {
    /// Parses every code; fails on the first unknown one.
    pub fn parse<S: AsRef<str>>(codes: &[S]) -> Result<Self, FilterError> {
        let stops = codes
            .iter()
            .map(|code| parse_filter_code(code.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { stops, position: 0 })
    }

    /// Whether the tour has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Next stop, wrapping around at the end.
    pub fn next_stop(&mut self) -> Option<FilterSet> {
        let stop = *self.stops.get(self.position)?;
        self.position = (self.position + 1) % self.stops.len();
        Some(stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lending_core::types::{Geography, TimeRange};

    #[test]
    fn test_parse_filter_code() {
        assert_eq!(
            parse_filter_code("UK/7d").unwrap(),
            FilterSet::new(Geography::Uk, TimeRange::Week)
        );
        assert!(matches!(
            parse_filter_code("usa"),
            Err(FilterError::UnknownTimeRange(_))
        ));
    }

    #[test]
    fn test_tour_wraps() {
        let mut tour = FilterTour::parse(&["usa/24h", "all/all"]).unwrap();
        assert_eq!(tour.len(), 2);
        assert_eq!(tour.next_stop().unwrap().geography, Geography::Usa);
        assert_eq!(tour.next_stop().unwrap().geography, Geography::All);
        assert_eq!(tour.next_stop().unwrap().geography, Geography::Usa);
    }

    #[test]
    fn test_empty_tour() {
        let mut tour = FilterTour::parse::<&str>(&[]).unwrap();
        assert!(tour.is_empty());
        assert!(tour.next_stop().is_none());
    }
}
