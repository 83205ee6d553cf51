use crate::braille::BrailleCanvas;
use crate::chart::geometry::{draw_circle, draw_circle_outline};
use crate::chart::node::Node;
use crate::chart::viewport::ChartViewport;

/// Scaled font size (braille pixels) needed before a bubble gets its name
const NAME_MIN_FONT_PX: f64 = 2.0;
/// Scaled font size needed before the value line is shown as well
const VALUE_MIN_FONT_PX: f64 = 3.0;

/// A text overlay positioned in character cells relative to the chart area
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub col: u16,
    pub row: u16,
    pub text: String,
}

/// Rendered chart layers, drawn back to front
pub struct ChartLayers {
    pub bubbles: BrailleCanvas,
    /// Filled disc of the focused bubble
    pub focus: BrailleCanvas,
    pub labels: Vec<Label>,
}

/// Draw bubbles and collect their labels
pub fn render(nodes: &[Node], focused: Option<usize>, viewport: &ChartViewport) -> ChartLayers {
    let cols = viewport.cols as usize;
    let rows = viewport.rows as usize;
    let mut bubbles = BrailleCanvas::new(cols, rows);
    let mut focus = BrailleCanvas::new(cols, rows);
    let mut labels = Vec::new();
    let scale = viewport.scale();

    for (idx, node) in nodes.iter().enumerate() {
        let (px, py) = viewport.project(node.pos);
        let radius = (node.radius * scale).round() as i32;
        if !viewport.circle_might_be_visible(px, py, radius) {
            continue;
        }

        draw_circle_outline(&mut bubbles, px, py, radius);
        if focused == Some(idx) {
            draw_circle(&mut focus, px, py, radius);
        }

        let font = node.font_size * scale;
        if font < NAME_MIN_FONT_PX {
            continue;
        }

        // Text sits a quarter radius below the center, name above value
        let text_y = py + radius / 4;
        let char_x = px / 2;
        let char_y = text_y / 4;
        push_centered(&mut labels, &node.name, char_x, char_y - 1, cols, rows);
        if font >= VALUE_MIN_FONT_PX {
            push_centered(&mut labels, &node.value_label(), char_x, char_y, cols, rows);
        }
    }

    ChartLayers {
        bubbles,
        focus,
        labels,
    }
}

fn push_centered(labels: &mut Vec<Label>, text: &str, center: i32, row: i32, cols: usize, rows: usize) {
    if row < 0 || row as usize >= rows {
        return;
    }
    let width = text.chars().count() as i32;
    let start = (center - width / 2).max(0);
    if start as usize >= cols {
        return;
    }
    let text: String = text.chars().take(cols - start as usize).collect();
    labels.push(Label {
        col: start as u16,
        row: row as u16,
        text,
    });
}

/// Index of the topmost bubble under a chart-surface point
pub fn hit_test(nodes: &[Node], point: glam::DVec2) -> Option<usize> {
    nodes.iter().rposition(|n| n.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::node::Detail;
    use glam::DVec2;

    fn node(name: &str, x: f64, y: f64, radius: f64) -> Node {
        Node {
            name: name.to_string(),
            value: 42.0,
            radius,
            font_size: (radius / 3.0).max(1.0),
            label_offset: -2.4,
            detail: Detail::Region { countries: 42, timezones: 3 },
            pos: DVec2::new(x, y),
            vel: DVec2::ZERO,
        }
    }

    #[test]
    fn test_large_bubble_gets_name_and_value() {
        // 200 x 200 pixels, scale 0.25
        let vp = ChartViewport::new(0, 0, 100, 50);
        let layers = render(&[node("Europe", 400.0, 400.0, 100.0)], None, &vp);

        let texts: Vec<_> = layers.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Europe", "42"]);
        assert_eq!(layers.labels[0].row + 1, layers.labels[1].row);
        // rim at (125, 100) px
        assert!(layers.bubbles.cell_is_set(62, 25));
    }

    #[test]
    fn test_small_bubble_has_no_label() {
        let vp = ChartViewport::new(0, 0, 100, 50);
        let layers = render(&[node("AND", 400.0, 400.0, 5.0)], None, &vp);
        assert!(layers.labels.is_empty());
    }

    #[test]
    fn test_focus_layer_only_for_focused_node() {
        let vp = ChartViewport::new(0, 0, 100, 50);
        let nodes = [node("A", 200.0, 200.0, 60.0), node("B", 600.0, 600.0, 60.0)];

        let unfocused = render(&nodes, None, &vp);
        assert!(!unfocused.focus.cell_is_set(25, 12));

        let focused = render(&nodes, Some(0), &vp);
        assert!(focused.focus.cell_is_set(25, 12));
        assert!(!focused.focus.cell_is_set(75, 37));
    }

    #[test]
    fn test_offscreen_bubble_skipped() {
        let vp = ChartViewport::new(0, 0, 100, 50);
        let layers = render(&[node("X", -500.0, -500.0, 10.0)], Some(0), &vp);
        assert!(layers.bubbles.is_blank());
        assert!(layers.focus.is_blank());
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let nodes = [node("A", 400.0, 400.0, 50.0), node("B", 420.0, 400.0, 50.0)];
        assert_eq!(hit_test(&nodes, DVec2::new(410.0, 400.0)), Some(1));
        assert_eq!(hit_test(&nodes, DVec2::new(355.0, 400.0)), Some(0));
        assert_eq!(hit_test(&nodes, DVec2::new(10.0, 10.0)), None);
    }
}
