//! Generate Advisory Report
//!
//! Builds a synthetic year of daily weather plus a 5-day forecast for a
//! latitude, runs the full advisory pipeline, prints the report, and writes
//! the JSON bundle to advisory_report.json.
//!
//! Usage: cargo run --bin generate_advisory_report -- [latitude] [seed]

use anyhow::Context;
use chrono::{Duration, NaiveTime, Utc};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use farm_weather_advisor::advisory::seasonal_recommendations;
use farm_weather_advisor::alerts::generate_alerts;
use farm_weather_advisor::analysis::{WeatherAnalyzer, DEFAULT_MODEL_SEED};
use farm_weather_advisor::climate::{ClimateBreakdown, ClimateIndicators};
use farm_weather_advisor::extremes::identify_extreme_events;
use farm_weather_advisor::recommender::{get_crop_insights, recommend_crops, CropCatalog};
use farm_weather_advisor::season::{Hemisphere, Season};
use farm_weather_advisor::synthetic;

const OUTPUT_PATH: &str = "advisory_report.json";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farm_weather_advisor=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let latitude: f64 = match args.next() {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("Invalid latitude: {}", raw))?,
        None => 45.0,
    };
    let seed: u64 = match args.next() {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("Invalid seed: {}", raw))?,
        None => DEFAULT_MODEL_SEED,
    };

    tracing::info!(latitude, seed, "generating advisory report");

    let hemisphere = Hemisphere::from_latitude(latitude);
    let today = Utc::now().date_naive();
    let season = Season::for_date(today, hemisphere);

    let historical = synthetic::generate_historical(
        latitude,
        today - Duration::days(365),
        today - Duration::days(1),
        seed,
    );
    let forecast = synthetic::generate_forecast(latitude, today.and_time(NaiveTime::MIN), seed);

    let indicators = ClimateIndicators::from_series(&historical);
    let breakdown = ClimateBreakdown::from_series(&historical, hemisphere);

    let analyzer = WeatherAnalyzer::with_seed(hemisphere, seed);
    let report = analyzer.analyze(&historical, &forecast);

    let catalog = CropCatalog::builtin();
    let recommendations = recommend_crops(&catalog, &indicators, season);
    let recommended_names: Vec<&str> = recommendations.iter().map(|r| r.crop.as_str()).collect();
    let insights = get_crop_insights(&catalog, &indicators, &recommended_names);

    let advisory = seasonal_recommendations(season, &report.trends, &historical);
    let alerts = generate_alerts(&forecast);
    let extreme_events = identify_extreme_events(&historical);

    let hemisphere_name = match hemisphere {
        Hemisphere::Northern => "northern",
        Hemisphere::Southern => "southern",
    };
    let banner = "=".repeat(72);
    println!("{}", banner);
    println!(
        "FARM WEATHER ADVISORY  (latitude {:.1}, {} hemisphere, {})",
        latitude,
        hemisphere_name,
        season.display_name()
    );
    println!("{}", banner);

    println!("\n{}", report.summary);

    if !report.trends.is_empty() {
        println!("\nTrends:");
        for trend in &report.trends {
            println!("  - {}", trend);
        }
    }

    if !report.anomalies.is_empty() {
        println!("\nAnomalies:");
        for anomaly in &report.anomalies {
            println!("  - {}", anomaly);
        }
    }

    if !report.patterns.clusters.is_empty() {
        println!("\nWeather patterns:");
        for cluster in &report.patterns.clusters {
            println!(
                "  - {} ({:.0}% of days)",
                cluster.description, cluster.percentage
            );
        }
    }

    println!("\nCrop recommendations for {}:", season.display_name());
    if recommendations.is_empty() {
        println!("  (no catalog crops grow in this season)");
    }
    for rec in &recommendations {
        let marker = if rec.experimental {
            " [experimental]"
        } else {
            ""
        };
        println!("  {} - {:.0}% confidence{}", rec.crop, rec.confidence, marker);
        for reason in &rec.reasons {
            println!("      {}", reason);
        }
    }

    for name in &recommended_names {
        if let Some(insight) = insights.get(*name) {
            println!("\n{}: {}", name, insight.suitability);
            println!("  {}", insight.summary);
        }
    }

    println!("\nSeasonal plan: {}", advisory.summary);
    for month in &advisory.monthly_tasks {
        println!("  {}:", month.month);
        for task in &month.tasks {
            println!("    - {}", task);
        }
    }

    if !alerts.is_empty() {
        println!("\nForecast alerts:");
        for alert in &alerts {
            println!(
                "  [{}] {} ({}): {}",
                alert.severity.display_name(),
                alert.title,
                alert.time_range,
                alert.description
            );
        }
    }

    if !extreme_events.is_empty() {
        println!("\nExtreme events in the historical window:");
        for event in &extreme_events {
            println!(
                "  {} ({} to {}): {}",
                event.kind.display_name(),
                event.start,
                event.end,
                event.description
            );
        }
    }

    let bundle = json!({
        "latitude": latitude,
        "season": season,
        "climate": indicators,
        "climate_breakdown": breakdown,
        "report": report,
        "recommendations": recommendations,
        "insights": insights,
        "seasonal_advisory": advisory,
        "alerts": alerts,
        "extreme_events": extreme_events,
    });
    std::fs::write(OUTPUT_PATH, serde_json::to_string_pretty(&bundle)?)
        .with_context(|| format!("Failed to write {}", OUTPUT_PATH))?;
    println!("\nFull report written to {}", OUTPUT_PATH);

    Ok(())
}
