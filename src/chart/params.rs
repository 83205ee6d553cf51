//! Per-metric layout parameters: value accessor, radius scale, label sizing
//! and the strength of the bubble simulation.

use crate::chart::node::{Detail, Node};
use crate::chart::scale::SqrtScale;
use crate::data::{Record, Sequence};
use crate::hash::{hash3, unit};
use glam::DVec2;
use std::fmt;
use std::str::FromStr;

/// Whether bubbles are individual countries or aggregated regions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupMode {
    Country,
    Region,
}

impl GroupMode {
    /// Metric selected when switching into this mode
    pub fn default_metric(self) -> Metric {
        match self {
            GroupMode::Country => Metric::Country(CountryMetric::Population),
            GroupMode::Region => Metric::Region(RegionMetric::CountriesInRegion),
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            GroupMode::Country => GroupMode::Region,
            GroupMode::Region => GroupMode::Country,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            GroupMode::Country => "country",
            GroupMode::Region => "region",
        }
    }

    /// Metric options offered under this mode, in menu order
    pub fn metrics(self) -> Vec<Metric> {
        match self {
            GroupMode::Country => CountryMetric::ALL.iter().copied().map(Metric::Country).collect(),
            GroupMode::Region => RegionMetric::ALL.iter().copied().map(Metric::Region).collect(),
        }
    }
}

impl FromStr for GroupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "country" => Ok(GroupMode::Country),
            "region" => Ok(GroupMode::Region),
            other => Err(format!("unknown grouping '{other}' (expected country or region)")),
        }
    }
}

impl fmt::Display for GroupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CountryMetric {
    Population,
    Borders,
    Timezones,
    Languages,
}

impl CountryMetric {
    pub const ALL: [CountryMetric; 4] = [
        CountryMetric::Population,
        CountryMetric::Borders,
        CountryMetric::Timezones,
        CountryMetric::Languages,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionMetric {
    CountriesInRegion,
    TimezonesInRegion,
}

impl RegionMetric {
    pub const ALL: [RegionMetric; 2] = [
        RegionMetric::CountriesInRegion,
        RegionMetric::TimezonesInRegion,
    ];
}

/// The attribute used to size bubbles, tagged by grouping mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    Country(CountryMetric),
    Region(RegionMetric),
}

/// Sizing and force constants for one family of metrics
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetricProfile {
    pub radius_range: (f64, f64),
    pub label_offset_floor: f64,
    pub label_offset_divisor: f64,
    /// Many-body strength for the bubble simulation
    pub strength: f64,
}

const POPULATION: MetricProfile = MetricProfile {
    radius_range: (5.0, 100.0),
    label_offset_floor: 3.3,
    label_offset_divisor: 28.0,
    strength: 5.0,
};

const COUNTRY_COUNT: MetricProfile = MetricProfile {
    radius_range: (5.0, 40.0),
    label_offset_floor: 1.3,
    label_offset_divisor: 28.0,
    strength: 5.0,
};

const REGION: MetricProfile = MetricProfile {
    radius_range: (40.0, 100.0),
    label_offset_floor: 2.4,
    label_offset_divisor: 45.0,
    strength: 200.0,
};

impl Metric {
    pub fn group(self) -> GroupMode {
        match self {
            Metric::Country(_) => GroupMode::Country,
            Metric::Region(_) => GroupMode::Region,
        }
    }

    pub fn profile(self) -> &'static MetricProfile {
        match self {
            Metric::Country(CountryMetric::Population) => &POPULATION,
            Metric::Country(_) => &COUNTRY_COUNT,
            Metric::Region(_) => &REGION,
        }
    }

    /// Key used on the command line
    pub fn key(self) -> &'static str {
        match self {
            Metric::Country(CountryMetric::Population) => "population",
            Metric::Country(CountryMetric::Borders) => "borders",
            Metric::Country(CountryMetric::Timezones) => "timezones",
            Metric::Country(CountryMetric::Languages) => "languages",
            Metric::Region(RegionMetric::CountriesInRegion) => "countriesInRegion",
            Metric::Region(RegionMetric::TimezonesInRegion) => "timezonesInRegion",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Country(CountryMetric::Population) => "Population Size",
            Metric::Country(CountryMetric::Borders) => "Number of borders",
            Metric::Country(CountryMetric::Timezones) => "Number of timezones",
            Metric::Country(CountryMetric::Languages) => "Number of languages",
            Metric::Region(RegionMetric::CountriesInRegion) => "Number of countries in the region",
            Metric::Region(RegionMetric::TimezonesInRegion) => {
                "Number of unique timezones in the region"
            }
        }
    }

    /// Parse a metric key, scoped to the options of `group`
    pub fn parse(group: GroupMode, key: &str) -> Option<Self> {
        group.metrics().into_iter().find(|m| m.key() == key)
    }

    /// Next option within the same grouping, wrapping around
    pub fn next(self) -> Self {
        let options = self.group().metrics();
        let pos = options.iter().position(|m| *m == self).unwrap_or(0);
        options[(pos + 1) % options.len()]
    }

    /// Numeric value of a record under this metric.
    /// Records of the other grouping mode read as zero.
    pub fn value_of(self, record: Record<'_>) -> f64 {
        match (self, record) {
            (Metric::Country(m), Record::Country(c)) => match m {
                CountryMetric::Population => c.population as f64,
                CountryMetric::Borders => c.borders.as_ref().map_or(0, Sequence::len) as f64,
                CountryMetric::Timezones => c.timezones.as_ref().map_or(0, Sequence::len) as f64,
                CountryMetric::Languages => c.languages.as_ref().map_or(0, Sequence::len) as f64,
            },
            (Metric::Region(m), Record::Region(r)) => match m {
                RegionMetric::CountriesInRegion => r.countries as f64,
                RegionMetric::TimezonesInRegion => r.timezones as f64,
            },
            _ => 0.0,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Display name of a record: country code or region name
pub fn name_of(record: Record<'_>) -> String {
    match record {
        Record::Country(c) => c.alpha3_code.clone(),
        Record::Region(r) => r.region.clone(),
    }
}

/// Everything needed to turn records into bubbles for one metric
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSpec {
    pub metric: Metric,
    pub scale: SqrtScale,
    pub profile: MetricProfile,
}

impl LayoutSpec {
    /// Pick parameters for `metric` over `records`. Pure; an empty slice
    /// yields a scale that returns the minimum radius for every input.
    pub fn select(metric: Metric, records: &[Record<'_>]) -> Self {
        let profile = *metric.profile();
        let max = records
            .iter()
            .map(|r| metric.value_of(*r))
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));
        Self {
            metric,
            scale: SqrtScale::from_max(max, profile.radius_range),
            profile,
        }
    }

    pub fn value_of(&self, record: Record<'_>) -> f64 {
        self.metric.value_of(record)
    }

    pub fn radius_of(&self, value: f64) -> f64 {
        self.scale.scale(value)
    }

    /// Label font size in pixels
    pub fn font_size(&self, radius: f64) -> f64 {
        (radius / 3.0).max(1.0)
    }

    /// Value-line offset in em; always negative (leftward)
    pub fn label_offset(&self, radius: f64) -> f64 {
        -(radius / self.profile.label_offset_divisor).max(self.profile.label_offset_floor)
    }

    pub fn strength(&self) -> f64 {
        self.profile.strength
    }

    /// Build bubbles for `records`, scattered pseudo-randomly over a
    /// `width` × `height` surface from `seed`
    pub fn nodes(&self, records: &[Record<'_>], seed: u64, width: f64, height: f64) -> Vec<Node> {
        records
            .iter()
            .enumerate()
            .map(|(i, &record)| {
                let value = self.value_of(record);
                let radius = self.radius_of(value);
                let x = unit(hash3(seed, i as u64, 0x78)) * width;
                let y = unit(hash3(seed, i as u64, 0x79)) * height;
                Node {
                    name: name_of(record),
                    value,
                    radius,
                    font_size: self.font_size(radius),
                    label_offset: self.label_offset(radius),
                    detail: Detail::from_record(record),
                    pos: DVec2::new(x, y),
                    vel: DVec2::ZERO,
                }
            })
            .collect()
    }
}

/// CSS-style pixel length, e.g. `12px`
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// CSS-style em length, e.g. `-3.3em`
pub fn em(value: f64) -> String {
    format!("{value}em")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Country, Language, RegionSummary};

    fn country(code: &str, population: u64) -> Country {
        Country {
            alpha3_code: code.to_string(),
            population,
            ..Country::default()
        }
    }

    #[test]
    fn test_population_scale() {
        let countries = vec![country("AAA", 100), country("BBB", 400)];
        let records: Vec<_> = countries.iter().map(Record::Country).collect();
        let spec = LayoutSpec::select(Metric::Country(CountryMetric::Population), &records);

        assert_eq!(spec.scale.domain(), (0.0, 400.0));
        assert_eq!(spec.scale.range(), (5.0, 100.0));
        assert!((spec.radius_of(400.0) - 100.0).abs() < 1e-9);
        assert!((spec.radius_of(100.0) - 52.5).abs() < 1e-9);
        assert_eq!(spec.radius_of(0.0), 5.0);
        assert_eq!(spec.strength(), 5.0);
    }

    #[test]
    fn test_empty_dataset_uses_minimum_radius() {
        let spec = LayoutSpec::select(Metric::Country(CountryMetric::Population), &[]);
        assert_eq!(spec.radius_of(0.0), 5.0);
        assert_eq!(spec.radius_of(123_456.0), 5.0);
        assert!(spec.nodes(&[], 1, 800.0, 800.0).is_empty());
    }

    #[test]
    fn test_count_metrics_treat_absent_as_zero() {
        let mut with_borders = country("AAA", 1);
        with_borders.borders = Some(["BBB", "CCC"].into_iter().map(String::from).collect());
        with_borders.languages = Some(vec![Language::default()].into());
        let without = country("BBB", 1);

        let metric = Metric::Country(CountryMetric::Borders);
        assert_eq!(metric.value_of(Record::Country(&with_borders)), 2.0);
        assert_eq!(metric.value_of(Record::Country(&without)), 0.0);
        assert_eq!(
            Metric::Country(CountryMetric::Languages).value_of(Record::Country(&with_borders)),
            1.0
        );

        let records = vec![Record::Country(&with_borders), Record::Country(&without)];
        let spec = LayoutSpec::select(metric, &records);
        assert_eq!(spec.scale.range(), (5.0, 40.0));
        assert!((spec.radius_of(2.0) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_region_parameters() {
        let regions = vec![
            RegionSummary { region: "Africa".into(), countries: 4, timezones: 1 },
            RegionSummary { region: "Polar".into(), countries: 1, timezones: 9 },
        ];
        let records: Vec<_> = regions.iter().map(Record::Region).collect();

        let by_count = LayoutSpec::select(Metric::Region(RegionMetric::CountriesInRegion), &records);
        assert_eq!(by_count.scale.domain(), (0.0, 4.0));
        assert!((by_count.radius_of(4.0) - 100.0).abs() < 1e-9);
        assert!((by_count.radius_of(1.0) - 70.0).abs() < 1e-9);
        assert_eq!(by_count.strength(), 200.0);

        let by_tz = LayoutSpec::select(Metric::Region(RegionMetric::TimezonesInRegion), &records);
        assert_eq!(by_tz.scale.domain(), (0.0, 9.0));
        assert!((by_tz.radius_of(1.0) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_label_sizing() {
        let spec = LayoutSpec::select(Metric::Country(CountryMetric::Population), &[]);
        assert_eq!(spec.font_size(1.5), 1.0);
        assert_eq!(spec.font_size(30.0), 10.0);
        assert_eq!(spec.label_offset(5.0), -3.3);
        assert_eq!(spec.label_offset(140.0), -5.0);
        assert_eq!(px(spec.font_size(30.0)), "10px");
        assert_eq!(em(spec.label_offset(5.0)), "-3.3em");

        let counts = LayoutSpec::select(Metric::Country(CountryMetric::Timezones), &[]);
        assert_eq!(counts.label_offset(5.0), -1.3);

        let region = LayoutSpec::select(Metric::Region(RegionMetric::TimezonesInRegion), &[]);
        assert_eq!(region.label_offset(90.0), -2.4);
        assert_eq!(region.label_offset(135.0), -3.0);
    }

    #[test]
    fn test_select_is_pure() {
        let countries = vec![country("AAA", 7), country("BBB", 70)];
        let records: Vec<_> = countries.iter().map(Record::Country).collect();
        let metric = Metric::Country(CountryMetric::Population);
        let a = LayoutSpec::select(metric, &records);
        let b = LayoutSpec::select(metric, &records);
        assert_eq!(a, b);
        assert_eq!(a.radius_of(7.0), b.radius_of(7.0));
    }

    #[test]
    fn test_nodes_carry_names_and_sizes() {
        let countries = vec![country("AAA", 100), country("BBB", 400)];
        let records: Vec<_> = countries.iter().map(Record::Country).collect();
        let spec = LayoutSpec::select(Metric::Country(CountryMetric::Population), &records);
        let nodes = spec.nodes(&records, 9, 800.0, 800.0);

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].name, "BBB");
        assert_eq!(nodes[1].value, 400.0);
        assert!((nodes[1].radius - 100.0).abs() < 1e-9);
        assert!((nodes[1].font_size - 100.0 / 3.0).abs() < 1e-9);
        for node in &nodes {
            assert!((0.0..800.0).contains(&node.pos.x));
            assert!((0.0..800.0).contains(&node.pos.y));
        }

        let again = spec.nodes(&records, 9, 800.0, 800.0);
        assert_eq!(nodes[0].pos, again[0].pos);
    }

    #[test]
    fn test_metric_keys_and_cycling() {
        assert_eq!(
            Metric::parse(GroupMode::Region, "timezonesInRegion"),
            Some(Metric::Region(RegionMetric::TimezonesInRegion))
        );
        assert_eq!(Metric::parse(GroupMode::Region, "population"), None);
        assert_eq!(GroupMode::Country.metrics().len(), 4);
        assert_eq!(GroupMode::Region.metrics().len(), 2);

        let last = Metric::Country(CountryMetric::Languages);
        assert_eq!(last.next(), Metric::Country(CountryMetric::Population));
        assert_eq!(
            GroupMode::Region.default_metric(),
            Metric::Region(RegionMetric::CountriesInRegion)
        );
        assert_eq!("region".parse::<GroupMode>(), Ok(GroupMode::Region));
        assert!("planet".parse::<GroupMode>().is_err());
    }

    #[test]
    fn test_mismatched_record_reads_zero() {
        let summary = RegionSummary { region: "Asia".into(), countries: 50, timezones: 20 };
        assert_eq!(
            Metric::Country(CountryMetric::Population).value_of(Record::Region(&summary)),
            0.0
        );
        assert_eq!(name_of(Record::Region(&summary)), "Asia");
    }
}
