//! SVG rendering of a packed placement.
//!
//! Produces a standalone SVG with one rectangle per block, the chip outline
//! overlaid as a dashed frame, and block names centered in their rectangles.
//! Chip coordinates have a bottom-left origin, so the y axis is flipped.

use mosaic_model::Netlist;
use std::fmt::Write;

const PALETTE: [&str; 6] = [
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462",
];

/// Renders the current block rectangles of the netlist to an SVG document.
pub fn render_svg(netlist: &Netlist, outline: (u64, u64)) -> String {
    let packed_w = netlist.blocks.values().map(|b| b.rect.x2).max().unwrap_or(0);
    let packed_h = netlist.blocks.values().map(|b| b.rect.y2).max().unwrap_or(0);
    let canvas_w = outline.0.max(packed_w).max(1);
    let canvas_h = outline.1.max(packed_h).max(1);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {canvas_w} {canvas_h}">"#
    );
    let _ = writeln!(
        svg,
        r#"  <rect x="0" y="0" width="{canvas_w}" height="{canvas_h}" fill="white"/>"#
    );

    for (i, block) in netlist.blocks.values().enumerate() {
        let r = &block.rect;
        let y = canvas_h - r.y2;
        let fill = PALETTE[i % PALETTE.len()];
        let _ = writeln!(
            svg,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="black" stroke-width="0.2"/>"#,
            r.x1,
            y,
            r.width(),
            r.height(),
            fill
        );
        let (cx, cy) = r.center();
        let _ = writeln!(
            svg,
            r#"  <text x="{}" y="{}" font-size="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            cx,
            canvas_h as f64 - cy,
            (r.width().min(r.height()) as f64 / 3.0).max(1.0),
            block.name
        );
    }

    let outline_y = canvas_h - outline.1;
    let _ = writeln!(
        svg,
        r#"  <rect x="0" y="{}" width="{}" height="{}" fill="none" stroke="red" stroke-width="0.4" stroke-dasharray="2,1"/>"#,
        outline_y, outline.0, outline.1
    );
    svg.push_str("</svg>\n");
    svg
}
