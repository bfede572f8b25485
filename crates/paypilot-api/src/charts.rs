//! Inline SVG charts for the analytics page

use paypilot_core::models::{RevenuePoint, SuccessRatePoint};
use paypilot_utils::{escape_html, format_compact_currency};

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 240.0;
const PAD_LEFT: f64 = 56.0;
const PAD_RIGHT: f64 = 16.0;
const PAD_TOP: f64 = 16.0;
const PAD_BOTTOM: f64 = 32.0;

/// Lower bound of the success rate axis, in percent
const RATE_FLOOR: f64 = 95.0;

fn plot_width() -> f64 {
    WIDTH - PAD_LEFT - PAD_RIGHT
}

fn plot_height() -> f64 {
    HEIGHT - PAD_TOP - PAD_BOTTOM
}

/// Round `max` up to a tidy axis ceiling
fn axis_ceiling(max: u64) -> u64 {
    if max == 0 {
        return 1;
    }
    let step = 5_000;
    max.div_ceil(step) * step
}

/// Revenue trend as an area chart with month labels
pub fn revenue_area_chart(points: &[RevenuePoint]) -> String {
    if points.is_empty() {
        return "<p class='text-sm text-gray-500'>No revenue data</p>".to_string();
    }
    let ceiling = axis_ceiling(points.iter().map(|p| p.revenue).max().unwrap_or(0)) as f64;
    let step = if points.len() > 1 {
        plot_width() / (points.len() - 1) as f64
    } else {
        0.0
    };

    let coords: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = PAD_LEFT + step * i as f64;
            let y = PAD_TOP + plot_height() * (1.0 - p.revenue as f64 / ceiling);
            (x, y)
        })
        .collect();

    let line: Vec<String> = coords.iter().map(|(x, y)| format!("{:.1},{:.1}", x, y)).collect();
    let baseline = PAD_TOP + plot_height();
    let first_x = coords.first().map(|c| c.0).unwrap_or(PAD_LEFT);
    let last_x = coords.last().map(|c| c.0).unwrap_or(PAD_LEFT);
    let area = format!(
        "{:.1},{:.1} {} {:.1},{:.1}",
        first_x, baseline, line.join(" "), last_x, baseline
    );

    let mut grid = String::new();
    for tick in 0..=4 {
        let value = ceiling * tick as f64 / 4.0;
        let y = PAD_TOP + plot_height() * (1.0 - tick as f64 / 4.0);
        grid.push_str(&format!(
            "<line x1='{:.1}' y1='{:.1}' x2='{:.1}' y2='{:.1}' stroke='currentColor' stroke-opacity='0.1'/>\
             <text x='{:.1}' y='{:.1}' text-anchor='end' font-size='11' fill='currentColor' fill-opacity='0.6'>{}</text>",
            PAD_LEFT, y, WIDTH - PAD_RIGHT, y,
            PAD_LEFT - 8.0, y + 4.0, format_compact_currency(value as u64)
        ));
    }

    let labels: String = points
        .iter()
        .zip(&coords)
        .map(|(p, (x, y))| {
            format!(
                "<circle cx='{:.1}' cy='{:.1}' r='3.5' fill='#6366f1'><title>{}: {}</title></circle>\
                 <text x='{:.1}' y='{:.1}' text-anchor='middle' font-size='11' fill='currentColor' fill-opacity='0.6'>{}</text>",
                x, y, escape_html(&p.month), format_compact_currency(p.revenue),
                x, HEIGHT - 10.0, escape_html(&p.month)
            )
        })
        .collect();

    format!(
        r#"<svg viewBox='0 0 {w} {h}' class='w-full h-auto' role='img' aria-label='Revenue trend'>
    <defs><linearGradient id='revenue-fill' x1='0' y1='0' x2='0' y2='1'>
        <stop offset='0%' stop-color='#6366f1' stop-opacity='0.35'/>
        <stop offset='100%' stop-color='#6366f1' stop-opacity='0'/>
    </linearGradient></defs>
    {grid}
    <polygon points='{area}' fill='url(#revenue-fill)'/>
    <polyline points='{line}' fill='none' stroke='#6366f1' stroke-width='2.5'/>
    {labels}
</svg>"#,
        w = WIDTH,
        h = HEIGHT,
        grid = grid,
        area = area,
        line = line.join(" "),
        labels = labels
    )
}

/// Daily success rate as a bar chart on a 95-100% axis
pub fn success_rate_bar_chart(points: &[SuccessRatePoint]) -> String {
    if points.is_empty() {
        return "<p class='text-sm text-gray-500'>No success rate data</p>".to_string();
    }
    let slot = plot_width() / points.len() as f64;
    let bar_width = slot * 0.6;

    let mut grid = String::new();
    for tick in 0..=5 {
        let value = RATE_FLOOR + tick as f64;
        let y = rate_y(value);
        grid.push_str(&format!(
            "<line x1='{:.1}' y1='{:.1}' x2='{:.1}' y2='{:.1}' stroke='currentColor' stroke-opacity='0.1'/>\
             <text x='{:.1}' y='{:.1}' text-anchor='end' font-size='11' fill='currentColor' fill-opacity='0.6'>{}%</text>",
            PAD_LEFT, y, WIDTH - PAD_RIGHT, y,
            PAD_LEFT - 8.0, y + 4.0, value
        ));
    }

    let bars: String = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = PAD_LEFT + slot * i as f64 + (slot - bar_width) / 2.0;
            let y = rate_y(p.rate);
            let height = (PAD_TOP + plot_height() - y).max(0.0);
            format!(
                "<rect x='{:.1}' y='{:.1}' width='{:.1}' height='{:.1}' rx='4' fill='#10b981'><title>{}: {:.1}%</title></rect>\
                 <text x='{:.1}' y='{:.1}' text-anchor='middle' font-size='11' fill='currentColor' fill-opacity='0.6'>{}</text>",
                x, y, bar_width, height, escape_html(&p.day), p.rate,
                x + bar_width / 2.0, HEIGHT - 10.0, escape_html(&p.day)
            )
        })
        .collect();

    format!(
        r#"<svg viewBox='0 0 {} {}' class='w-full h-auto' role='img' aria-label='Success rate'>
    {}
    {}
</svg>"#,
        WIDTH, HEIGHT, grid, bars
    )
}

fn rate_y(rate: f64) -> f64 {
    let clamped = rate.clamp(RATE_FLOOR, 100.0);
    PAD_TOP + plot_height() * (1.0 - (clamped - RATE_FLOOR) / (100.0 - RATE_FLOOR))
}
