pub mod region;

use crate::error::DatasetError;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

pub use region::{aggregate, RegionSummary};

/// A spoken language of a country
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub native_name: String,
}

/// One country record as shipped in the dataset file.
///
/// Sequence fields are `None` when the file omits them or holds something
/// other than an array; length-based metrics treat that as zero.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    #[serde(default, deserialize_with = "null_as_default")]
    pub alpha3_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capital: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub population: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub native_name: String,
    #[serde(default, deserialize_with = "sequence_or_absent")]
    pub borders: Option<Sequence<String>>,
    #[serde(default, deserialize_with = "sequence_or_absent")]
    pub timezones: Option<Sequence<String>>,
    #[serde(default, deserialize_with = "sequence_or_absent")]
    pub languages: Option<Sequence<Language>>,
}

impl Country {
    /// Region name, if present and non-empty
    pub fn region_name(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.is_empty())
    }

    pub fn borders(&self) -> &[String] {
        self.borders.as_ref().map(Sequence::items).unwrap_or_default()
    }

    pub fn timezones(&self) -> &[String] {
        self.timezones.as_ref().map(Sequence::items).unwrap_or_default()
    }

    pub fn languages(&self) -> &[Language] {
        self.languages.as_ref().map(Sequence::items).unwrap_or_default()
    }
}

/// A JSON array field.
///
/// `len` counts every element of the array as written; `items` holds only
/// the elements that decoded as `T`.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence<T> {
    items: Vec<T>,
    len: usize,
}

impl<T> Sequence<T> {
    /// Number of elements in the source array, malformed ones included
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Well-formed elements in source order
    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            len: 0,
        }
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        let len = items.len();
        Self { items, len }
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Vec::from_iter(iter).into()
    }
}

/// A borrowed view over whichever unit the chart is currently showing
#[derive(Clone, Copy, Debug)]
pub enum Record<'a> {
    Country(&'a Country),
    Region(&'a RegionSummary),
}

/// Loaded countries plus the region summaries derived from them.
///
/// Summaries are rebuilt wholesale whenever a dataset is constructed.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    countries: Vec<Country>,
    regions: Vec<RegionSummary>,
}

impl Dataset {
    pub fn new(countries: Vec<Country>) -> Self {
        let regions = aggregate(&countries);
        Self { countries, regions }
    }

    /// Read and decode a dataset file
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let countries = load_countries(path)?;
        Ok(Self::new(countries))
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn regions(&self) -> &[RegionSummary] {
        &self.regions
    }

    pub fn country_records(&self) -> Vec<Record<'_>> {
        self.countries.iter().map(Record::Country).collect()
    }

    pub fn region_records(&self) -> Vec<Record<'_>> {
        self.regions.iter().map(Record::Region).collect()
    }
}

/// Load country records from a JSON array file
pub fn load_countries(path: &Path) -> Result<Vec<Country>, DatasetError> {
    let mut bytes = fs::read(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_countries(&mut bytes).map_err(|e| match e {
        ParseFailure::Json(source) => DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::NotAnArray => DatasetError::NotAnArray {
            path: path.to_path_buf(),
        },
    })
}

enum ParseFailure {
    Json(simd_json::Error),
    NotAnArray,
}

fn parse_countries(bytes: &mut [u8]) -> Result<Vec<Country>, ParseFailure> {
    let value = simd_json::to_owned_value(bytes).map_err(ParseFailure::Json)?;
    if !matches!(value, simd_json::OwnedValue::Array(_)) {
        return Err(ParseFailure::NotAnArray);
    }
    simd_json::serde::from_owned_value(value).map_err(ParseFailure::Json)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Element<T> {
    Item(T),
    Malformed(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeSequence<T> {
    Sequence(Vec<Element<T>>),
    Other(IgnoredAny),
}

fn sequence_or_absent<'de, D, T>(deserializer: D) -> Result<Option<Sequence<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let elements = match MaybeSequence::<T>::deserialize(deserializer)? {
        MaybeSequence::Sequence(elements) => elements,
        MaybeSequence::Other(_) => return Ok(None),
    };
    let len = elements.len();
    let items = elements
        .into_iter()
        .filter_map(|e| match e {
            Element::Item(item) => Some(item),
            Element::Malformed(_) => None,
        })
        .collect();
    Ok(Some(Sequence { items, len }))
}
