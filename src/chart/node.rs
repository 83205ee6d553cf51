use crate::data::Record;
use glam::DVec2;

/// Extra fields shown for the focused bubble
#[derive(Clone, Debug, PartialEq)]
pub enum Detail {
    Country {
        real_name: String,
        capital: String,
        region: String,
        population: u64,
        native_name: String,
    },
    Region {
        countries: usize,
        timezones: usize,
    },
}

impl Detail {
    pub fn from_record(record: Record<'_>) -> Self {
        match record {
            Record::Country(c) => Detail::Country {
                real_name: c.name.clone(),
                capital: c.capital.clone(),
                region: c.region.clone().unwrap_or_default(),
                population: c.population,
                native_name: c.native_name.clone(),
            },
            Record::Region(r) => Detail::Region {
                countries: r.countries,
                timezones: r.timezones,
            },
        }
    }

    /// Labelled lines for the detail pane, headed by the bubble name
    pub fn lines(&self, name: &str) -> Vec<(&'static str, String)> {
        match self {
            Detail::Country {
                real_name,
                capital,
                region,
                population,
                native_name,
            } => vec![
                ("Name", name.to_string()),
                ("Real Name", real_name.clone()),
                ("Capital", capital.clone()),
                ("Region", region.clone()),
                ("Population", population.to_string()),
                ("Native Name", native_name.clone()),
            ],
            Detail::Region {
                countries,
                timezones,
            } => vec![
                ("Region", name.to_string()),
                ("Countries", countries.to_string()),
                ("Timezones", timezones.to_string()),
            ],
        }
    }
}

/// A bubble on the chart surface.
/// Rebuilt from scratch whenever the grouping or metric changes.
#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub value: f64,
    pub radius: f64,
    /// Label font size in surface pixels
    pub font_size: f64,
    /// Horizontal offset of the value line in em (negative = leftward)
    pub label_offset: f64,
    pub detail: Detail,
    pub pos: DVec2,
    pub vel: DVec2,
}

impl Node {
    /// Whether a surface point lies inside this bubble
    pub fn contains(&self, point: DVec2) -> bool {
        self.pos.distance_squared(point) <= self.radius * self.radius
    }

    /// Value text as printed inside the bubble
    pub fn value_label(&self) -> String {
        format!("{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Country, RegionSummary};

    #[test]
    fn test_country_detail_lines() {
        let country = Country {
            alpha3_code: "NOR".into(),
            name: "Norway".into(),
            capital: "Oslo".into(),
            region: Some("Europe".into()),
            population: 5_223_256,
            native_name: "Norge".into(),
            ..Country::default()
        };
        let detail = Detail::from_record(Record::Country(&country));
        let lines = detail.lines("NOR");
        assert_eq!(lines[0], ("Name", "NOR".to_string()));
        assert_eq!(lines[1], ("Real Name", "Norway".to_string()));
        assert_eq!(lines[4], ("Population", "5223256".to_string()));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_region_detail_lines() {
        let summary = RegionSummary {
            region: "Oceania".into(),
            countries: 27,
            timezones: 21,
        };
        let lines = Detail::from_record(Record::Region(&summary)).lines("Oceania");
        assert_eq!(
            lines,
            vec![
                ("Region", "Oceania".to_string()),
                ("Countries", "27".to_string()),
                ("Timezones", "21".to_string()),
            ]
        );
    }

    #[test]
    fn test_value_label_drops_fraction() {
        let node = Node {
            name: "CHN".into(),
            value: 1_377_422_166.0,
            radius: 100.0,
            font_size: 33.0,
            label_offset: -3.5,
            detail: Detail::Region {
                countries: 0,
                timezones: 0,
            },
            pos: DVec2::new(400.0, 400.0),
            vel: DVec2::ZERO,
        };
        assert_eq!(node.value_label(), "1377422166");
        assert!(node.contains(DVec2::new(450.0, 450.0)));
        assert!(!node.contains(DVec2::new(500.0, 500.0)));
    }
}
