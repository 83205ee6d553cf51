use crate::app::{App, LoadState};
use crate::braille::BrailleCanvas;
use crate::chart::{renderer, ChartLayers, ChartViewport, GroupMode};
use crate::config::View;
use crate::table;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
    Frame,
};

/// Width of the detail pane beside the chart
pub const DETAIL_WIDTH: u16 = 34;

struct Areas {
    main: Rect,
    chart: Rect,
    detail: Rect,
    status: Rect,
}

fn split(area: Rect) -> Areas {
    // Split into main area and status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Chart or table
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(DETAIL_WIDTH)])
        .split(chunks[0]);

    Areas {
        main: chunks[0],
        chart: columns[0],
        detail: columns[1],
        status: chunks[1],
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
}

/// Chart viewport for a terminal of the given size
pub fn chart_viewport(area: Rect) -> ChartViewport {
    let inner = panel("").inner(split(area).chart);
    ChartViewport::new(inner.x, inner.y, inner.width, inner.height)
}

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let areas = split(frame.area());

    match &app.load {
        LoadState::Failed(reason) => render_load_error(frame, reason, areas.main),
        LoadState::Loaded(_) => match app.view {
            View::Chart => {
                render_chart(frame, app, areas.chart);
                render_detail(frame, app, areas.detail);
            }
            View::Table => render_table(frame, app, areas.main),
        },
    }

    render_status_bar(frame, app, areas.status);
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let block = panel(app.metric.label());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let viewport = ChartViewport::new(inner.x, inner.y, inner.width, inner.height);
    let layers = renderer::render(app.nodes(), app.focused(), &viewport);
    frame.render_widget(ChartWidget { layers }, inner);
}

/// Braille bubbles with text labels overlaid
struct ChartWidget {
    layers: ChartLayers,
}

impl ChartWidget {
    /// Render a braille canvas layer with a specific color
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        let rows = canvas.height().min(area.height as usize);
        let cols = canvas.width().min(area.width as usize);
        for row in 0..rows {
            for col in 0..cols {
                if let Some(ch) = canvas.glyph(col, row) {
                    let x = area.x + col as u16;
                    let y = area.y + row as u16;
                    buf[(x, y)].set_char(ch).set_fg(color);
                }
            }
        }
    }
}

impl Widget for ChartWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Self::render_layer(&self.layers.bubbles, Color::Cyan, area, buf);
        Self::render_layer(&self.layers.focus, Color::Yellow, area, buf);

        let label_style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        for label in &self.layers.labels {
            if label.row >= area.height || label.col >= area.width {
                continue;
            }
            let y = area.y + label.row;
            for (i, ch) in label.text.chars().enumerate() {
                let x = area.x + label.col + i as u16;
                if x >= area.x + area.width {
                    break;
                }
                buf[(x, y)].set_char(ch).set_style(label_style);
            }
        }
    }
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default().fg(Color::DarkGray);
    let value_style = Style::default().fg(Color::White);

    let lines: Vec<Line> = match app.focused_node() {
        Some(node) => {
            let mut lines: Vec<Line> = node
                .detail
                .lines(&node.name)
                .into_iter()
                .map(|(key, value)| {
                    Line::from(vec![
                        Span::styled(format!("{key}: "), key_style),
                        Span::styled(value, value_style),
                    ])
                })
                .collect();
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", app.metric.label()), key_style),
                Span::styled(node.value_label(), Style::default().fg(Color::Yellow)),
            ]));
            lines
        }
        None => vec![Line::from(Span::styled(
            "Hover a bubble, or press n / p to step through them.",
            key_style,
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(panel("Details"));
    frame.render_widget(paragraph, area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let Some(dataset) = app.load.dataset() else {
        return;
    };
    let group = app.group();

    let header = Row::new(table::headers(group).iter().map(|h| Cell::from(*h))).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    // borders and header take three lines
    let visible = area.height.saturating_sub(3) as usize;
    let rows = table::rows(dataset, group, app.table_offset, visible)
        .into_iter()
        .map(|cells| Row::new(cells.into_iter().map(Cell::from)));

    let widths: Vec<Constraint> = match group {
        GroupMode::Country => vec![
            Constraint::Length(5),
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Fill(2),
            Constraint::Fill(3),
            Constraint::Fill(3),
        ],
        GroupMode::Region => vec![
            Constraint::Fill(1),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    };

    let title = format!(
        "{} ({})",
        match group {
            GroupMode::Country => "Countries",
            GroupMode::Region => "Regions",
        },
        table::row_count(dataset, group),
    );
    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(panel(&title));
    frame.render_widget(widget, area);
}

fn render_load_error(frame: &mut Frame, reason: &str, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Could not load the country dataset",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(reason.to_string(), Style::default().fg(Color::White))),
        Line::default(),
        Line::from(Span::styled(
            "Press R to retry, q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(panel("Dataset"));
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let on = Style::default().fg(Color::Green);
    let group = app.group();

    let mut spans = vec![
        Span::styled(
            if group == GroupMode::Country { "[C]ountry " } else { "[c]ountry " },
            if group == GroupMode::Country { on } else { dim },
        ),
        Span::styled(
            if group == GroupMode::Region { "[R]egion " } else { "[r]egion " },
            if group == GroupMode::Region { on } else { dim },
        ),
        Span::styled("| ", dim),
        Span::styled(app.metric.key(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", dim),
        Span::styled(app.view.to_string(), Style::default().fg(Color::Magenta)),
        Span::styled(" | ", dim),
        Span::styled(
            if app.is_settled() { "settled" } else { "settling" },
            Style::default().fg(Color::Cyan),
        ),
    ];

    if let Some(status) = &app.status {
        spans.push(Span::styled(" | ", dim));
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::White)));
    }

    spans.push(Span::styled(
        " | g:group m/1-4:metric tab:view n/p:select e:export R:reload q:quit",
        dim,
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
