//! Integration tests for the advisory pipeline
//!
//! Drives the public API end to end on seeded synthetic weather: history
//! generation, climate indicators, the analysis pipeline, crop
//! recommendations and insights, the seasonal plan, forecast alerts and the
//! extreme event scan. Every run is seeded, so expectations here are about
//! structure and cross-component consistency rather than exact numbers.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use farm_weather_advisor::analysis::DEFAULT_MODEL_SEED;
use farm_weather_advisor::data::{ForecastSeries, WeatherSeries};
use farm_weather_advisor::season::{growing_window, Hemisphere, Season};
use farm_weather_advisor::{
    generate_alerts, get_crop_insights, identify_extreme_events, recommend_crops,
    seasonal_recommendations, synthetic, ClimateBreakdown, ClimateIndicators, CropCatalog,
    WeatherAnalyzer,
};

const TEST_LATITUDE: f64 = 45.0;
const TEST_SEED: u64 = 7;

/// One full wall-clock-free year ending the day before the forecast starts.
fn year_of_history(latitude: f64, seed: u64) -> WeatherSeries {
    let start = NaiveDate::from_ymd_opt(2022, 6, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 5, 31).unwrap();
    synthetic::generate_historical(latitude, start, end, seed)
}

fn forecast_window(latitude: f64, seed: u64) -> ForecastSeries {
    let start: NaiveDateTime = NaiveDate::from_ymd_opt(2023, 6, 1)
        .unwrap()
        .and_time(NaiveTime::MIN);
    synthetic::generate_forecast(latitude, start, seed)
}

#[test]
fn test_full_pipeline_produces_complete_bundle() {
    let history = year_of_history(TEST_LATITUDE, TEST_SEED);
    let forecast = forecast_window(TEST_LATITUDE, TEST_SEED);
    assert_eq!(history.len(), 365);
    assert_eq!(forecast.len(), 40);

    let hemisphere = Hemisphere::from_latitude(TEST_LATITUDE);
    let analyzer = WeatherAnalyzer::with_seed(hemisphere, TEST_SEED);
    let report = analyzer.analyze(&history, &forecast);

    assert!(
        report.summary.starts_with(
            "Based on historical weather data, this region has an average temperature of"
        ),
        "unexpected summary opening: {}",
        report.summary
    );
    assert!(
        report
            .summary
            .ends_with("adjust irrigation schedules accordingly."),
        "summary should close with the irrigation guidance: {}",
        report.summary
    );

    assert!(!report.anomalies.is_empty(), "a full year should surface outliers");
    assert!(report.anomalies.len() <= 5, "anomaly narration is capped at 5");
    assert!(!report.trends.is_empty());

    let patterns = &report.patterns;
    assert_eq!(
        patterns.seasonal_patterns.len(),
        4,
        "a full year covers all four seasons"
    );
    let season_days: usize = patterns.seasonal_patterns.iter().map(|s| s.days).sum();
    assert_eq!(season_days, history.len());

    assert!(!patterns.clusters.is_empty());
    let cluster_days: usize = patterns.clusters.iter().map(|c| c.size).sum();
    assert_eq!(cluster_days, history.len());
    let percentage_total: f64 = patterns.clusters.iter().map(|c| c.percentage).sum();
    assert!(
        (percentage_total - 100.0).abs() < 0.1,
        "cluster percentages should cover the whole window, got {percentage_total}"
    );
}

#[test]
fn test_recommendations_and_insights_agree_on_crops() {
    let history = year_of_history(TEST_LATITUDE, TEST_SEED);
    let climate = ClimateIndicators::from_series(&history);
    assert!(climate.avg_temp > -20.0 && climate.avg_temp < 40.0);
    assert!(climate.annual_rainfall > 0.0);
    assert!(climate.min_temp <= climate.avg_temp && climate.avg_temp <= climate.max_temp);

    let catalog = CropCatalog::builtin();
    let recommendations = recommend_crops(&catalog, &climate, Season::Summer);

    assert!(!recommendations.is_empty(), "summer always has candidate crops");
    assert!(recommendations.len() <= 5);
    for pair in recommendations.windows(2) {
        assert!(
            pair[0].confidence >= pair[1].confidence,
            "recommendations must come ranked: {} before {}",
            pair[0].crop,
            pair[1].crop
        );
    }
    for rec in &recommendations {
        assert!(rec.confidence > 0.0 && rec.confidence <= 100.0);
        assert!(!rec.reasons.is_empty(), "{} has no reasons", rec.crop);
        if !rec.experimental {
            assert!(
                rec.confidence >= 40.0,
                "{} recommended below the confidence floor",
                rec.crop
            );
        }
        assert!(
            catalog.get(&rec.crop).is_some(),
            "{} is not a catalog crop",
            rec.crop
        );
    }

    let names: Vec<&str> = recommendations.iter().map(|r| r.crop.as_str()).collect();
    let insights = get_crop_insights(&catalog, &climate, &names);
    assert_eq!(insights.len(), names.len(), "every recommended crop gets an insight");
    for name in &names {
        let insight = insights
            .get(*name)
            .unwrap_or_else(|| panic!("missing insight for {name}"));
        assert!(
            insight.suitability.contains("match"),
            "unexpected suitability verdict: {}",
            insight.suitability
        );
        assert!(insight
            .summary
            .starts_with(&format!("Overall climate suitability for {name}")));
        assert!(!insight.challenges.is_empty());
        assert!(!insight.recommendations.is_empty());
    }
}

#[test]
fn test_seasonal_plan_covers_the_requested_season() {
    let history = year_of_history(TEST_LATITUDE, TEST_SEED);
    let forecast = forecast_window(TEST_LATITUDE, TEST_SEED);
    let analyzer = WeatherAnalyzer::with_seed(Hemisphere::Northern, TEST_SEED);
    let report = analyzer.analyze(&history, &forecast);

    let advisory = seasonal_recommendations(Season::Summer, &report.trends, &history);
    let months: Vec<&str> = advisory.monthly_tasks.iter().map(|m| m.month).collect();
    assert_eq!(months, ["June", "July", "August"]);
    for month in &advisory.monthly_tasks {
        assert!(
            month.tasks.len() >= 4,
            "{} lost its base tasks: {:?}",
            month.month,
            month.tasks
        );
    }
    assert!(advisory
        .summary
        .starts_with("Summer is focused on crop management"));
}

#[test]
fn test_alerts_and_extremes_are_well_formed() {
    let history = year_of_history(TEST_LATITUDE, TEST_SEED);
    let forecast = forecast_window(TEST_LATITUDE, TEST_SEED);

    for alert in generate_alerts(&forecast) {
        assert!(!alert.title.is_empty());
        assert!(!alert.time_range.is_empty());
        assert!(!alert.description.is_empty());
        assert!(!alert.agricultural_impact.is_empty());
        assert!(!alert.recommended_action.is_empty());
    }

    let events = identify_extreme_events(&history);
    for event in &events {
        assert!(event.duration_days >= 1);
        assert!(event.start <= event.end);
        assert!(!event.description.is_empty());
    }
    for pair in events.windows(2) {
        assert!(
            pair[0].start <= pair[1].start,
            "extreme events must be reported chronologically"
        );
    }
}

#[test]
fn test_pipeline_is_deterministic_for_a_fixed_seed() {
    let run = || {
        let history = year_of_history(TEST_LATITUDE, DEFAULT_MODEL_SEED);
        let forecast = forecast_window(TEST_LATITUDE, DEFAULT_MODEL_SEED);
        let analyzer = WeatherAnalyzer::with_seed(Hemisphere::Northern, DEFAULT_MODEL_SEED);
        let report = analyzer.analyze(&history, &forecast);
        let climate = ClimateIndicators::from_series(&history);
        let recommendations = recommend_crops(&CropCatalog::builtin(), &climate, Season::Fall);
        let alerts = generate_alerts(&forecast);
        let events = identify_extreme_events(&history);
        (history, forecast, report, recommendations, alerts, events)
    };

    let (h1, f1, report1, recs1, alerts1, events1) = run();
    let (h2, f2, report2, recs2, alerts2, events2) = run();

    assert_eq!(h1.records(), h2.records());
    assert_eq!(f1.points(), f2.points());
    assert_eq!(report1, report2);
    assert_eq!(recs1, recs2);
    assert_eq!(alerts1, alerts2);
    assert_eq!(events1, events2);
}

#[test]
fn test_southern_hemisphere_uses_its_own_calendar() {
    let latitude = -35.0;
    let hemisphere = Hemisphere::from_latitude(latitude);
    assert_eq!(hemisphere, Hemisphere::Southern);
    assert_eq!(Season::for_month(1, hemisphere), Season::Summer);
    assert_eq!(Season::for_month(7, hemisphere), Season::Winter);

    let (start_month, end_month) = growing_window(latitude);
    assert_eq!(
        (start_month, end_month),
        (10, 4),
        "temperate southern windows wrap the year end"
    );

    let history = year_of_history(latitude, 11);
    let forecast = forecast_window(latitude, 11);
    let report = WeatherAnalyzer::with_seed(hemisphere, 11).analyze(&history, &forecast);
    assert_eq!(report.patterns.seasonal_patterns.len(), 4);

    let climate = ClimateIndicators::from_series(&history);
    let recommendations = recommend_crops(&CropCatalog::builtin(), &climate, Season::Summer);
    assert!(!recommendations.is_empty());

    let breakdown = ClimateBreakdown::from_series(&history, hemisphere);
    assert_eq!(breakdown.seasonal.len(), 4);
}

#[test]
fn test_empty_windows_degrade_to_documented_fallbacks() {
    let history = WeatherSeries::default();
    let forecast = ForecastSeries::default();

    let report = WeatherAnalyzer::new(Hemisphere::Northern).analyze(&history, &forecast);
    assert_eq!(report.summary, "Insufficient historical data for analysis.");
    assert!(report.anomalies.is_empty());
    assert!(report.trends.is_empty());
    assert!(report.patterns.clusters.is_empty());

    assert!(generate_alerts(&forecast).is_empty());
    assert!(identify_extreme_events(&history).is_empty());

    // The planner still produces the base season plan without history.
    let advisory = seasonal_recommendations(Season::Winter, &[], &history);
    assert_eq!(advisory.monthly_tasks.len(), 3);
    for month in &advisory.monthly_tasks {
        assert_eq!(month.tasks.len(), 4);
    }

    // Recommendations fall back to the default indicator bundle semantics.
    let climate = ClimateIndicators::default();
    let recommendations = recommend_crops(&CropCatalog::builtin(), &climate, Season::Spring);
    assert!(!recommendations.is_empty());
}

#[test]
fn test_report_bundle_serializes_to_json() {
    let history = year_of_history(TEST_LATITUDE, TEST_SEED);
    let forecast = forecast_window(TEST_LATITUDE, TEST_SEED);
    let analyzer = WeatherAnalyzer::with_seed(Hemisphere::Northern, TEST_SEED);
    let report = analyzer.analyze(&history, &forecast);
    let climate = ClimateIndicators::from_series(&history);
    let catalog = CropCatalog::builtin();
    let recommendations = recommend_crops(&catalog, &climate, Season::Summer);
    let names: Vec<&str> = recommendations.iter().map(|r| r.crop.as_str()).collect();

    let bundle = serde_json::json!({
        "climate": climate,
        "report": report,
        "recommendations": recommendations,
        "insights": get_crop_insights(&catalog, &climate, &names),
        "seasonal_advisory": seasonal_recommendations(Season::Summer, &[], &history),
        "alerts": generate_alerts(&forecast),
        "extreme_events": identify_extreme_events(&history),
    });

    assert!(bundle["climate"]["avg_temp"].is_number());
    assert!(bundle["report"]["summary"].is_string());
    assert!(bundle["recommendations"].is_array());
    assert!(bundle["seasonal_advisory"]["monthly_tasks"].is_array());

    let text = serde_json::to_string_pretty(&bundle).expect("bundle must serialize");
    assert!(text.contains("\"summary\""));
}
