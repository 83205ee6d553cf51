use crate::chart::renderer::hit_test;
use crate::chart::{ChartViewport, GroupMode, LayoutSpec, Metric, Node, Simulation, SURFACE_SIZE};
use crate::config::{Config, View};
use crate::data::Dataset;
use crate::error::ExportError;
use crate::{export, table, ui};
use ratatui::layout::Rect;
use std::path::Path;
use tracing::{info, warn};

/// Outcome of the one-shot dataset read
pub enum LoadState {
    Loaded(Dataset),
    /// Load failed; the reason is shown until a reload succeeds
    Failed(String),
}

impl LoadState {
    pub fn from_config(config: &Config) -> Self {
        match Dataset::load(&config.data_path) {
            Ok(dataset) => {
                info!(
                    path = %config.data_path.display(),
                    countries = dataset.countries().len(),
                    regions = dataset.regions().len(),
                    "dataset loaded"
                );
                LoadState::Loaded(dataset)
            }
            Err(e) => {
                warn!(error = %e, "dataset load failed");
                LoadState::Failed(e.to_string())
            }
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            LoadState::Loaded(dataset) => Some(dataset),
            LoadState::Failed(_) => None,
        }
    }
}

/// Everything the user can ask the application to do
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Message {
    SelectGroup(GroupMode),
    ToggleGroup,
    SelectMetric(Metric),
    /// Pick the n-th metric option of the current grouping
    SelectMetricIndex(usize),
    NextMetric,
    ToggleView,
    /// Mouse moved over a terminal cell
    Hover { col: u16, row: u16 },
    SelectNext,
    SelectPrev,
    Scroll(i32),
    Reload,
    Export,
    Resize { width: u16, height: u16 },
    /// Frame tick; advances the bubble layout
    Tick,
    Quit,
}

/// Application state
pub struct App {
    config: Config,
    pub load: LoadState,
    pub metric: Metric,
    pub view: View,
    simulation: Option<Simulation>,
    /// Bubble under the mouse cursor
    pub hovered: Option<usize>,
    /// Last terminal cell the mouse reported
    cursor: Option<(u16, u16)>,
    /// Bubble picked with the keyboard
    pub selected: Option<usize>,
    pub table_offset: usize,
    pub viewport: ChartViewport,
    /// One-line feedback shown in the status bar
    pub status: Option<String>,
    pub should_quit: bool,
    /// Number of charts built so far; varies the placement seed per render
    renders: u64,
}

impl App {
    pub fn new(config: Config, width: u16, height: u16) -> Self {
        let load = LoadState::from_config(&config);
        Self::with_load(config, load, width, height)
    }

    pub fn with_load(config: Config, load: LoadState, width: u16, height: u16) -> Self {
        let mut app = Self {
            metric: config.metric,
            view: config.view,
            config,
            load,
            simulation: None,
            hovered: None,
            cursor: None,
            selected: None,
            table_offset: 0,
            viewport: ui::chart_viewport(Rect::new(0, 0, width, height)),
            status: None,
            should_quit: false,
            renders: 0,
        };
        app.rebuild();
        app
    }

    pub fn group(&self) -> GroupMode {
        self.metric.group()
    }

    pub fn nodes(&self) -> &[Node] {
        self.simulation
            .as_ref()
            .map(Simulation::nodes)
            .unwrap_or_default()
    }

    pub fn is_settled(&self) -> bool {
        self.simulation.as_ref().map_or(true, Simulation::is_settled)
    }

    /// Bubble whose details are shown: hover wins over keyboard selection
    pub fn focused(&self) -> Option<usize> {
        self.hovered.or(self.selected)
    }

    pub fn focused_node(&self) -> Option<&Node> {
        self.focused().and_then(|i| self.nodes().get(i))
    }

    /// Single entry point for state changes
    pub fn dispatch(&mut self, message: Message) {
        match message {
            Message::SelectGroup(group) => self.select_group(group),
            Message::ToggleGroup => self.select_group(self.group().toggle()),
            Message::SelectMetric(metric) => self.select_metric(metric),
            Message::SelectMetricIndex(index) => {
                if let Some(metric) = self.group().metrics().get(index).copied() {
                    self.select_metric(metric);
                }
            }
            Message::NextMetric => self.select_metric(self.metric.next()),
            Message::ToggleView => {
                self.view = self.view.toggle();
                self.hovered = None;
                self.cursor = None;
            }
            Message::Hover { col, row } => self.hover(col, row),
            Message::SelectNext => self.move_selection(1),
            Message::SelectPrev => self.move_selection(-1),
            Message::Scroll(delta) => self.scroll(delta),
            Message::Reload => self.reload(),
            Message::Export => self.export(),
            Message::Resize { width, height } => {
                self.viewport = ui::chart_viewport(Rect::new(0, 0, width, height));
                self.refresh_hover();
            }
            Message::Tick => {
                if let Some(sim) = self.simulation.as_mut() {
                    if !sim.is_settled() {
                        sim.step(self.config.ticks_per_frame);
                        // bubbles drift under a still cursor
                        self.refresh_hover();
                    }
                }
            }
            Message::Quit => self.should_quit = true,
        }
    }

    fn select_group(&mut self, group: GroupMode) {
        if group == self.group() {
            return;
        }
        self.metric = group.default_metric();
        info!(group = %group, metric = %self.metric, "grouping changed");
        self.rebuild();
    }

    fn select_metric(&mut self, metric: Metric) {
        if metric.group() != self.group() {
            warn!(metric = %metric, group = %self.group(), "metric not offered for current grouping");
            return;
        }
        if metric == self.metric {
            return;
        }
        self.metric = metric;
        info!(metric = %metric, "metric changed");
        self.rebuild();
    }

    /// Replace the chart wholesale for the current metric
    fn rebuild(&mut self) {
        self.hovered = None;
        self.selected = None;
        self.table_offset = 0;

        let seed = self.config.seed.wrapping_add(self.renders);
        self.renders += 1;

        let Some(dataset) = self.load.dataset() else {
            self.simulation = None;
            return;
        };
        let records = match self.metric.group() {
            GroupMode::Country => dataset.country_records(),
            GroupMode::Region => dataset.region_records(),
        };
        let spec = LayoutSpec::select(self.metric, &records);
        let nodes = spec.nodes(&records, seed, SURFACE_SIZE, SURFACE_SIZE);
        self.simulation = Some(Simulation::new(
            nodes,
            spec.strength(),
            SURFACE_SIZE,
            SURFACE_SIZE,
        ));
    }

    fn hover(&mut self, col: u16, row: u16) {
        if self.view != View::Chart {
            return;
        }
        self.cursor = Some((col, row));
        self.refresh_hover();
    }

    /// Re-resolve the bubble under the last known cursor cell
    fn refresh_hover(&mut self) {
        self.hovered = self
            .cursor
            .and_then(|(col, row)| self.viewport.unproject_cell(col, row))
            .and_then(|point| hit_test(self.nodes(), point));
    }

    fn move_selection(&mut self, delta: i32) {
        match self.view {
            View::Table => self.scroll(delta),
            View::Chart => {
                let len = self.nodes().len();
                if len == 0 {
                    return;
                }
                let next = match self.selected {
                    None if delta >= 0 => 0,
                    None => len - 1,
                    Some(i) => (i as i64 + delta as i64).rem_euclid(len as i64) as usize,
                };
                self.selected = Some(next);
            }
        }
    }

    fn scroll(&mut self, delta: i32) {
        let rows = self
            .load
            .dataset()
            .map_or(0, |d| table::row_count(d, self.group()));
        let max = rows.saturating_sub(1) as i64;
        self.table_offset = (self.table_offset as i64 + delta as i64).clamp(0, max) as usize;
    }

    fn reload(&mut self) {
        self.load = LoadState::from_config(&self.config);
        self.status = Some(match &self.load {
            LoadState::Loaded(d) => format!("Reloaded {} countries", d.countries().len()),
            LoadState::Failed(_) => "Reload failed".to_string(),
        });
        self.rebuild();
    }

    /// Run the bubble layout to completion without rendering
    pub fn settle(&mut self) {
        if let Some(sim) = self.simulation.as_mut() {
            sim.settle();
        }
    }

    /// Write the current chart as SVG
    pub fn export_chart(&self, path: &Path) -> Result<(), ExportError> {
        if self.simulation.is_none() {
            return Err(ExportError::NoChart);
        }
        export::export_svg(path, self.nodes(), SURFACE_SIZE)
    }

    fn export(&mut self) {
        let path = self.config.export_target();
        let result = self.export_chart(&path);
        self.status = Some(match result {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => {
                warn!(error = %e, "export failed");
                format!("Export failed: {e}")
            }
        });
    }
}
