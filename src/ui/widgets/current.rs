use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::{
    domain::weather::{
        Units, WeatherReport, condition_info, format_clock, format_long_date, format_optional,
    },
    ui::{
        theme::{Palette, rgb_color},
        widgets::panel_block,
    },
};

/// Header line: city, observation time and date.
#[must_use]
pub fn header_line(report: &WeatherReport) -> String {
    format!(
        "{}  ·  {}  ·  {}",
        report.name,
        format_clock(&report.observed_at),
        format_long_date(&report.observed_at)
    )
}

/// Current-conditions text shared by the panel and the one-shot output.
#[must_use]
pub fn condition_lines(report: &WeatherReport, units: Units) -> Vec<String> {
    let info = condition_info(report.condition_main());
    let temp = units.temp_suffix();
    let speed = units.speed_suffix();
    let (min, max) = report.range(units);

    let mut lines = vec![
        format!(
            "{} {} · {}",
            info.icon,
            report.condition.main,
            report.condition.description
        ),
        format!(
            "{}{temp}  feels like {}{temp}",
            format_optional(report.temp(units)),
            format_optional(report.feels_like(units))
        ),
        format!(
            "Min {}{temp}  Max {}{temp}",
            format_optional(min),
            format_optional(max)
        ),
        format!(
            "Humidity {}%  Pressure {} hPa",
            whole(report.humidity),
            whole(report.pressure_hpa)
        ),
        format!(
            "Wind {} {speed}  Gust {} {speed}",
            one_decimal(report.wind(units)),
            one_decimal(report.gust(units))
        ),
        format!(
            "Visibility {} {}",
            one_decimal(report.visibility(units)),
            units.distance_suffix()
        ),
        format!(
            "Sunrise {}  Sunset {}",
            format_clock(&report.sunrise.with_timezone(&Local)),
            format_clock(&report.sunset.with_timezone(&Local))
        ),
    ];
    if let Some(tip) = report.first_tip() {
        lines.push(format!("Tip: {tip}"));
    }
    lines
}

fn whole(value: Option<f32>) -> String {
    format_optional(value.map(|v| format!("{v:.0}")))
}

fn one_decimal(value: Option<f32>) -> String {
    format_optional(value.map(|v| format!("{v:.1}")))
}

pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    report: Option<&WeatherReport>,
    city: &str,
    palette: Palette,
) {
    let text = report.map_or_else(|| city.to_string(), header_line);
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(panel_block("Weather", palette));
    frame.render_widget(paragraph, area);
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    report: Option<&WeatherReport>,
    units: Units,
    palette: Palette,
) {
    let block = panel_block("Now", palette);
    let Some(report) = report else {
        let waiting = Paragraph::new(Line::from(Span::styled(
            "Waiting for weather...",
            Style::default().fg(palette.muted_text),
        )))
        .block(block);
        frame.render_widget(waiting, area);
        return;
    };

    let accent = rgb_color(condition_info(report.condition_main()).color);
    let lines: Vec<Line> = condition_lines(report, units)
        .into_iter()
        .enumerate()
        .map(|(idx, text)| match idx {
            0 => Line::from(Span::styled(
                text,
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            1 => Line::from(Span::styled(
                text,
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
            )),
            _ if text.starts_with("Tip:") => {
                Line::from(Span::styled(text, Style::default().fg(palette.muted_text)))
            }
            _ => Line::from(text),
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}
