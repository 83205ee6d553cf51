use crate::chart::params::{em, px};
use crate::chart::Node;
use crate::error::ExportError;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Render bubbles as a standalone SVG document of `size` × `size` units.
///
/// Each bubble is a black circle with its name centered in white and the
/// value on a second line nudged left by the node's label offset.
pub fn render_svg(nodes: &[Node], size: f64) -> String {
    let mut body = String::new();

    for node in nodes {
        let _ = writeln!(
            body,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{}" fill="black"/>"#,
            node.pos.x, node.pos.y, node.radius
        );
    }

    for node in nodes {
        let font = px(node.font_size);
        let _ = writeln!(
            body,
            r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" fill="white" dominant-baseline="middle" dy="-1em" style="font-size: {font}; pointer-events: none">{}<tspan dx="{}" dy="1.2em" style="font-size: {font}">{}</tspan></text>"#,
            node.pos.x,
            node.pos.y + node.radius / 4.0,
            escape_xml(&node.name),
            em(node.label_offset),
            escape_xml(&node.value_label()),
        );
    }

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}">
{body}</svg>
"#
    )
}

/// Write the SVG rendering of `nodes` to `path`
pub fn export_svg(path: &Path, nodes: &[Node], size: f64) -> Result<(), ExportError> {
    let svg = render_svg(nodes, size);
    fs::write(path, svg).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bubbles = nodes.len(), "exported chart");
    Ok(())
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
