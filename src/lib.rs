//! Bubble chart and table of countries and their regions, drawn in the
//! terminal with Braille Unicode.
//!
//! A dataset of country records is loaded once and summarised per region
//! ([`data::aggregate`]). For the selected grouping and metric,
//! [`chart::LayoutSpec::select`] derives bubble sizes and label metrics, and
//! a [`chart::Simulation`] packs the bubbles on an 800×800 surface that is
//! either drawn in the terminal or exported as SVG.

pub mod app;
pub mod braille;
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod hash;
pub mod logging;
pub mod table;
pub mod ui;
