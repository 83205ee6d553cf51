mod geometry;
pub mod node;
pub mod params;
pub mod renderer;
pub mod scale;
pub mod simulation;
pub mod viewport;

pub use node::{Detail, Node};
pub use params::{CountryMetric, GroupMode, LayoutSpec, Metric, RegionMetric};
pub use renderer::{ChartLayers, Label};
pub use scale::SqrtScale;
pub use simulation::Simulation;
pub use viewport::{ChartViewport, SURFACE_SIZE};
