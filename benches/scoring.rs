use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use farm_weather_advisor::season::{Hemisphere, Season};
use farm_weather_advisor::{
    identify_extreme_events, recommend_crops, synthetic, ClimateIndicators, CropCatalog,
    WeatherAnalyzer,
};

fn bench_advisor(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2022, 6, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 5, 31).unwrap();
    let history = synthetic::generate_historical(45.0, start, end, 42);
    let forecast = synthetic::generate_forecast(45.0, end.and_hms_opt(0, 0, 0).unwrap(), 42);
    let climate = ClimateIndicators::from_series(&history);
    let catalog = CropCatalog::builtin();
    let analyzer = WeatherAnalyzer::with_seed(Hemisphere::Northern, 42);

    c.bench_function("recommend_crops", |b| {
        b.iter(|| recommend_crops(black_box(&catalog), black_box(&climate), Season::Summer))
    });
    c.bench_function("climate_indicators", |b| {
        b.iter(|| ClimateIndicators::from_series(black_box(&history)))
    });
    c.bench_function("extreme_events", |b| {
        b.iter(|| identify_extreme_events(black_box(&history)))
    });
    c.bench_function("analyze_year", |b| {
        b.iter(|| analyzer.analyze(black_box(&history), black_box(&forecast)))
    });
}

criterion_group!(benches, bench_advisor);
criterion_main!(benches);
