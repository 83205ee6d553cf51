use crate::data::Country;
use std::collections::{HashMap, HashSet};

/// Per-region totals derived from the country dataset
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionSummary {
    pub region: String,
    /// Number of countries whose region is this one
    pub countries: usize,
    /// Number of distinct timezones across those countries
    pub timezones: usize,
}

struct RegionAccumulator<'a> {
    name: &'a str,
    countries: Vec<&'a str>,
    timezones: HashSet<&'a str>,
}

/// Summarise countries by region.
///
/// Countries without a region are skipped. Output keeps the order in which
/// each region is first seen.
pub fn aggregate(countries: &[Country]) -> Vec<RegionSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut regions: Vec<RegionAccumulator> = Vec::new();

    for country in countries {
        let Some(name) = country.region_name() else {
            continue;
        };

        let slot = *index.entry(name).or_insert_with(|| {
            regions.push(RegionAccumulator {
                name,
                countries: Vec::new(),
                timezones: HashSet::new(),
            });
            regions.len() - 1
        });

        let acc = &mut regions[slot];
        acc.countries.push(&country.name);
        acc.timezones
            .extend(country.timezones().iter().map(String::as_str));
    }

    regions
        .into_iter()
        .map(|acc| RegionSummary {
            region: acc.name.to_string(),
            countries: acc.countries.len(),
            timezones: acc.timezones.len(),
        })
        .collect()
}
