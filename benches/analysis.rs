use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use soiltemp::{
    BandSet, PairAnalysis, TimeSeriesRecord, TimeSeriesTable, AIR_TEMPERATURE_2M,
    SOIL_TEMPERATURE_6CM,
};
use std::collections::HashMap;

// A year of hourly data with a daily cycle that is damped and delayed in the soil.
fn synthetic_year() -> TimeSeriesTable {
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let records = (0..24 * 365)
        .map(|hour| {
            let phase = hour as f64 / 24.0 * std::f64::consts::TAU;
            let air = 10.0 + 6.0 * phase.sin();
            let soil = 10.5 + 2.5 * (phase - 0.8).sin();
            TimeSeriesRecord::new(
                start + Duration::hours(hour),
                HashMap::from([
                    (AIR_TEMPERATURE_2M.to_string(), air),
                    (SOIL_TEMPERATURE_6CM.to_string(), soil),
                ]),
            )
        })
        .collect();
    TimeSeriesTable::new(
        vec![AIR_TEMPERATURE_2M.to_string(), SOIL_TEMPERATURE_6CM.to_string()],
        records,
    )
    .unwrap()
}

fn bench_analysis(c: &mut Criterion) {
    let table = synthetic_year();
    for (name, bands) in [
        ("pair_two_band", BandSet::two_band()),
        ("pair_four_band", BandSet::four_band()),
    ] {
        c.bench_function(name, |b| {
            b.iter(|| {
                PairAnalysis::compute(
                    black_box(&table),
                    AIR_TEMPERATURE_2M,
                    SOIL_TEMPERATURE_6CM,
                    bands.clone(),
                )
            })
        });
    }
}

criterion_group!(benches, bench_analysis);
criterion_main!(benches);
