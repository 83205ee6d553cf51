use crate::chart::GroupMode;
use crate::data::Dataset;

const COUNTRY_HEADERS: [&str; 8] = [
    "Name",
    "Real Name",
    "Capital",
    "Region",
    "Population",
    "Borders",
    "Timezones",
    "Languages",
];

const REGION_HEADERS: [&str; 3] = ["Region", "Countries", "Timezones"];

pub fn headers(group: GroupMode) -> &'static [&'static str] {
    match group {
        GroupMode::Country => &COUNTRY_HEADERS,
        GroupMode::Region => &REGION_HEADERS,
    }
}

/// Number of rows the table has under `group`
pub fn row_count(dataset: &Dataset, group: GroupMode) -> usize {
    match group {
        GroupMode::Country => dataset.countries().len(),
        GroupMode::Region => dataset.regions().len(),
    }
}

/// Cell text for up to `limit` rows starting at row `offset`.
/// Rows outside the window are never formatted.
pub fn rows(dataset: &Dataset, group: GroupMode, offset: usize, limit: usize) -> Vec<Vec<String>> {
    match group {
        GroupMode::Country => dataset
            .countries()
            .iter()
            .skip(offset)
            .take(limit)
            .map(|c| {
                let languages: Vec<String> = c
                    .languages()
                    .iter()
                    .map(|l| format!("{} ({})", l.name, l.native_name))
                    .collect();
                vec![
                    c.alpha3_code.clone(),
                    c.name.clone(),
                    c.capital.clone(),
                    c.region.clone().unwrap_or_default(),
                    c.population.to_string(),
                    c.borders().join(", "),
                    c.timezones().join(", "),
                    languages.join(", "),
                ]
            })
            .collect(),
        GroupMode::Region => dataset
            .regions()
            .iter()
            .skip(offset)
            .take(limit)
            .map(|r| {
                vec![
                    r.region.clone(),
                    r.countries.to_string(),
                    r.timezones.to_string(),
                ]
            })
            .collect(),
    }
}
