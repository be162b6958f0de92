//! demos/soil_vs_air.rs
//!
//! Fetches a week of hourly air and soil temperatures for De Bilt and prints, per soil depth,
//! the daily sums of the soil - air difference, the per-band statistics and the run lengths.
//!
//! To run this demo:
//! RUST_LOG=info cargo run --example soil_vs_air -- 3

use chrono::NaiveDate;
use soiltemp::{display_label, ArchiveRequest, BandPreset, LatLon, OpenMeteo, SoilTempError};
use std::env;

#[tokio::main]
async fn main() -> Result<(), SoilTempError> {
    env_logger::init();

    let preset: BandPreset = env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("3")
        .parse()?;

    let request = ArchiveRequest::builder()
        .location(LatLon(52.1015, 5.1779)) // de Bilt
        .start_date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
        .end_date(NaiveDate::from_ymd_opt(2024, 4, 7).unwrap())
        .build();

    let Some(analyses) = OpenMeteo::new().analyze(&request, preset.band_set()).await? else {
        println!("No data to analyze");
        return Ok(());
    };

    for analysis in &analyses {
        let variable = analysis.differences.variable_b();
        println!("\n{}, difference to air:", display_label(variable));

        let daily = analysis.daily_sums();
        for day in &daily.days {
            println!("  {}: {:.2} °C", day.date, day.total);
        }
        println!("  total: {:.2}", daily.total());

        println!("  bands ({}-band preset):", preset);
        for band in analysis.band_statistics.bands() {
            println!(
                "    {:<20} n={:<5} mean={:>6.2} stdev={}",
                band.label, band.summary.count, band.summary.mean, band.summary.stdev
            );
        }

        println!("  run lengths:");
        for band in analysis.run_lengths.statistics() {
            println!(
                "    {:<20} runs={:<4} mean={:>6.2} stdev={}",
                band.label, band.summary.count, band.summary.mean, band.summary.stdev
            );
        }
    }

    Ok(())
}
