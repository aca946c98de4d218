use crate::dates;
use crate::models::{AppData, ChartSeries, SummaryResponse};
use chrono::{Datelike, Local, NaiveDate};
use std::collections::BTreeMap;

pub fn build_summary(year: i32, data: &AppData) -> SummaryResponse {
    build_summary_at(Local::now().date_naive(), year, data)
}

/// Dashboard aggregates over both record lists. `year` scopes the chart
/// series; the quarter average and month-over-month reduction always follow
/// `today`.
pub fn build_summary_at(today: NaiveDate, year: i32, data: &AppData) -> SummaryResponse {
    let mut monthly = Vec::with_capacity(12);
    let mut labels = Vec::with_capacity(12);
    for month in 1..=12 {
        labels.push(format!("{year}-{month:02}"));
        monthly.push(month_total(data, year, month));
    }

    let energy_year: f64 = data
        .energy
        .iter()
        .filter(|r| record_year(&r.date) == Some(year))
        .map(|r| r.co2_emitted)
        .sum();
    let fuel_year: f64 = data
        .fuel
        .iter()
        .filter(|r| record_year(&r.date) == Some(year))
        .map(|r| r.co2_emitted)
        .sum();

    let total_co2 = data.energy.iter().map(|r| r.co2_emitted).sum::<f64>()
        + data.fuel.iter().map(|r| r.co2_emitted).sum::<f64>();
    let record_count = data.energy.len() + data.fuel.len();

    let quarter_start_month = (today.month0() / 3) * 3 + 1;
    let quarter_total: f64 = (0..3)
        .map(|offset| month_total(data, today.year(), quarter_start_month + offset))
        .sum();
    let quarter_avg = quarter_total / 3.0;

    let current = month_total(data, today.year(), today.month());
    let (prev_year, prev_month) = if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    };
    let previous = month_total(data, prev_year, prev_month);
    let reduction_percent = if previous > 0.0 {
        Some((previous - current) / previous * 100.0)
    } else {
        None
    };

    SummaryResponse {
        year,
        monthly_totals: ChartSeries {
            labels,
            data: monthly,
        },
        by_category: ChartSeries {
            labels: vec!["Energy".to_string(), "Fuel".to_string()],
            data: vec![energy_year, fuel_year],
        },
        total_co2,
        record_count,
        most_used_fuel: most_used_fuel(data),
        quarter_avg,
        reduction_percent,
    }
}

fn record_year(date: &str) -> Option<i32> {
    dates::normalize(date).map(|d| d.year())
}

fn month_total(data: &AppData, year: i32, month: u32) -> f64 {
    let in_month = |date: &str| {
        dates::normalize(date).is_some_and(|d| d.year() == year && d.month() == month)
    };
    data.energy
        .iter()
        .filter(|r| in_month(&r.date))
        .map(|r| r.co2_emitted)
        .sum::<f64>()
        + data
            .fuel
            .iter()
            .filter(|r| in_month(&r.date))
            .map(|r| r.co2_emitted)
            .sum::<f64>()
}

/// Fuel name appearing on the most records; ties go to the name seen first
/// in list order.
fn most_used_fuel(data: &AppData) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &data.fuel {
        if !record.fuel_name.is_empty() {
            *counts.entry(record.fuel_name.as_str()).or_default() += 1;
        }
    }
    let best = counts.values().copied().max()?;
    data.fuel
        .iter()
        .map(|r| r.fuel_name.as_str())
        .find(|name| counts.get(name) == Some(&best))
        .map(str::to_string)
}
