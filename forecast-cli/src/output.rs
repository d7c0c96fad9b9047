use forecast_core::{ForecastPresentation, ForecastReading, ForecastReport};
use std::fmt::Write;

/// Full human-readable report: headline, backend details, hourly strip.
pub fn render_report(report: &ForecastReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", report.location.summary());
    let _ = writeln!(out, "Date: {}", report.requested_at.format("%Y-%m-%d %H:%M"));
    let _ = writeln!(out);
    out.push_str(&render_current(&report.presentation));

    if let Some(reading) = &report.reading {
        out.push_str(&render_details(reading));
    }

    if !report.presentation.hourly.is_empty() {
        let _ = writeln!(out);
        out.push_str(&render_hourly(&report.presentation));
    }

    out
}

fn render_current(p: &ForecastPresentation) -> String {
    let icon = p.condition.emoji();
    format!("{icon}  {}{}\n{}\n", p.temperature, p.unit_symbol, p.description)
}

fn render_details(r: &ForecastReading) -> String {
    format!(
        "Relative Humidity: {:.2}%\n\
         Rain Chance: {:.2}%\n\
         Wind Speed: {:.2} m/s\n\
         Precipitation: {} mm\n\
         Snow Precipitation: {} mm\n\
         Pressure: {} hPa\n",
        r.relative_humidity_pct,
        r.rain_chance_pct,
        r.wind_speed_mps,
        r.rain_mm,
        r.snow_mm,
        r.pressure_hpa,
    )
}

fn render_hourly(p: &ForecastPresentation) -> String {
    let mut out = String::from("Hourly:\n");
    for point in &p.hourly {
        let _ = writeln!(
            out,
            "  {:02}:00  {}  {}{}",
            point.hour_of_day,
            point.condition.emoji(),
            point.temperature,
            p.unit_symbol
        );
    }
    out
}
