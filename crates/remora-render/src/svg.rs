//! SVG serialization of the retained scene.
//!
//! The group structure is the rendering contract: a shared `connections`
//! group first, then one group per side
//! (`<side>-node`, carrying its projection offsets as attributes) holding
//! `links`, `nodes` and `overlay` subgroups, and finally the temporary drag
//! marker/path pair while a gesture is in flight.

use crate::scene::{Scene, SideScene};
use remora_core::geom::CanvasPoint;
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    pub width: f64,
    pub height: f64,
    /// When false, the `overlay` text groups are omitted.
    pub include_labels: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 600.0,
            include_labels: true,
        }
    }
}

pub fn render_scene(scene: &Scene, options: &SvgRenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
        fmt(options.width.max(1.0)),
        fmt(options.height.max(1.0))
    );
    out.push_str(
        r#"<style>
.node { fill: #2563eb; }
.link { fill: none; stroke: #9ca3af; stroke-width: 1; }
.connections path { fill: none; stroke: #111827; stroke-width: 1.5; }
.overlay text { fill: #1f2937; font-family: ui-sans-serif, system-ui, sans-serif; font-size: 11px; }
.dragging { fill: none; stroke: #6b7280; stroke-dasharray: 4 2; }
circle.dragging { fill: #6b7280; }
</style>
"#,
    );

    out.push_str(r#"<g class="connections">"#);
    for connection in scene.connections() {
        let _ = write!(
            &mut out,
            r#"<path d="{}"/>"#,
            bump_x(connection.source, connection.target)
        );
    }
    out.push_str("</g>\n");

    for (side_id, side) in scene.sides() {
        render_side(&mut out, side_id, side, options.include_labels);
    }

    if let Some(drag) = scene.drag() {
        let _ = write!(
            &mut out,
            r#"<circle class="dragging" cx="{}" cy="{}" r="4"/>"#,
            fmt(drag.marker.x),
            fmt(drag.marker.y)
        );
        let _ = writeln!(
            &mut out,
            r#"<path class="dragging" source="{},{}" d="{}"/>"#,
            fmt(drag.anchor.x),
            fmt(drag.anchor.y),
            bump_x(drag.anchor, drag.marker)
        );
    }

    out.push_str("</svg>");
    out
}

fn render_side(out: &mut String, side_id: &str, side: &SideScene, include_labels: bool) {
    let _ = writeln!(
        out,
        r#"<g class="{}-node" offsetWidth="{}" offsetHeight="{}">"#,
        escape_xml(side_id),
        fmt(side.projection.offset_width),
        fmt(side.projection.offset_height)
    );

    out.push_str(r#"<g class="links">"#);
    for link in side.links.values() {
        let _ = write!(
            out,
            r#"<path class="link" d="{}"/>"#,
            bump_x(link.source, link.target)
        );
    }
    out.push_str("</g>\n");

    out.push_str(r#"<g class="nodes">"#);
    for marker in side.markers.values() {
        let _ = write!(
            out,
            r#"<circle class="node" cx="{}" cy="{}" r="{}"/>"#,
            fmt(marker.center.x),
            fmt(marker.center.y),
            fmt(marker.radius)
        );
    }
    out.push_str("</g>\n");

    if include_labels {
        out.push_str(r#"<g class="overlay">"#);
        for label in side.labels.values() {
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" text-anchor="{}" transform="translate({}, {})">{}</text>"#,
                fmt(label.anchor.x),
                fmt(label.anchor.y),
                if label.anchor_end { "end" } else { "start" },
                fmt(label.dx),
                fmt(label.dy),
                escape_xml(&label.text)
            );
        }
        out.push_str("</g>\n");
    }

    out.push_str("</g>\n");
}

/// The horizontal S-curve of `d3.link(d3.curveBumpX)`: a cubic with both
/// control points at the horizontal midpoint.
fn bump_x(source: CanvasPoint, target: CanvasPoint) -> String {
    let mid = (source.x + target.x) / 2.0;
    format!(
        "M{},{}C{},{},{},{},{},{}",
        fmt(source.x),
        fmt(source.y),
        fmt(mid),
        fmt(source.y),
        fmt(mid),
        fmt(target.y),
        fmt(target.x),
        fmt(target.y)
    )
}

/// JS-style shortest round-trip number printing for SVG attributes.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let v = if v == -0.0 { 0.0 } else { v };
    let mut buf = ryu_js::Buffer::new();
    buf.format_finite(v).to_string()
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use remora_core::geom::canvas_point;

    #[test]
    fn bump_x_pins_control_points_to_the_horizontal_midpoint() {
        let d = bump_x(canvas_point(0.0, 0.0), canvas_point(100.0, 40.0));
        assert_eq!(d, "M0,0C50,0,50,40,100,40");
    }

    #[test]
    fn fmt_prints_js_style_numbers() {
        assert_eq!(fmt(42.0), "42");
        assert_eq!(fmt(2.5), "2.5");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(f64::NAN), "0");
    }

    #[test]
    fn escape_xml_covers_markup_characters() {
        assert_eq!(escape_xml("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
