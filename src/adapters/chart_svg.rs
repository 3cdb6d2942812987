//! Base-100 price evolution chart as standalone SVG.

use std::fmt::Write;

use crate::domain::price_panel::PricePanel;

const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Escape text for use inside SVG elements and attribute values.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn format_price_chart(panel: &PricePanel) -> String {
    if panel.is_empty() || panel.symbols.is_empty() {
        return "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"600\" height=\"60\">\
                <text x=\"10\" y=\"30\">No price data available.</text></svg>"
            .to_string();
    }

    let normed = panel.rebased(100.0);

    let min_value = normed
        .rows
        .iter()
        .flat_map(|r| r.closes.iter().copied())
        .fold(f64::INFINITY, f64::min);
    let max_value = normed
        .rows
        .iter()
        .flat_map(|r| r.closes.iter().copied())
        .fold(f64::NEG_INFINITY, f64::max);

    let width = 800.0;
    let height = 400.0;
    let padding = 50.0;

    let plot_width = width - 2.0 * padding;
    let plot_height = height - 2.0 * padding;

    let range = max_value - min_value;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let scale_x = if normed.rows.len() > 1 {
        plot_width / (normed.rows.len() - 1) as f64
    } else {
        0.0
    };

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#,
        w = width,
        h = height
    );
    let _ = write!(
        svg,
        r#"<text x="{:.0}" y="20" font-size="14">Price Evolution of Suggested Products (Base 100)</text>"#,
        padding
    );
    let _ = write!(
        svg,
        r#"<line x1="{p:.0}" y1="{p:.0}" x2="{p:.0}" y2="{b:.0}" stroke="black"/><line x1="{p:.0}" y1="{b:.0}" x2="{r:.0}" y2="{b:.0}" stroke="black"/>"#,
        p = padding,
        b = height - padding,
        r = width - padding
    );
    let _ = write!(
        svg,
        r#"<text x="5" y="{:.0}" font-size="10">{:.0}</text><text x="5" y="{:.0}" font-size="10">{:.0}</text>"#,
        padding,
        max_value,
        height - padding,
        min_value
    );

    for (index, symbol) in normed.symbols.iter().enumerate() {
        let color = PALETTE[index % PALETTE.len()];
        let points: Vec<String> = normed
            .column(index)
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let x = padding + i as f64 * scale_x;
                let y = height - padding - (value - min_value) * scale_y;
                format!("{:.1},{:.1}", x, y)
            })
            .collect();
        let _ = write!(
            svg,
            r#"<polyline fill="none" stroke="{}" stroke-width="1" points="{}"/>"#,
            color,
            points.join(" ")
        );
        let _ = write!(
            svg,
            r#"<text x="{:.0}" y="{:.0}" font-size="10" fill="{}">{}</text>"#,
            width - padding + 5.0,
            padding + 12.0 * index as f64,
            color,
            escape_xml(symbol)
        );
    }

    let first = normed.rows.first().map(|r| r.date);
    let last = normed.rows.last().map(|r| r.date);
    if let (Some(first), Some(last)) = (first, last) {
        let _ = write!(
            svg,
            r#"<text x="{:.0}" y="{:.0}" font-size="10">{}</text><text x="{:.0}" y="{:.0}" font-size="10" text-anchor="end">{}</text>"#,
            padding,
            height - padding + 15.0,
            first,
            width - padding,
            height - padding + 15.0,
            last
        );
    }

    svg.push_str("</svg>");
    svg
}
