//! demos/plot_differences.rs
//!
//! Fetches hourly air and soil temperatures, then plots the raw series, the soil - air
//! difference per depth, and for each band a histogram of the 6 cm difference with the
//! fitted normal curve scaled on top of it.
//!
//! To run this demo:
//! cargo run --example plot_differences --features plotting

use chrono::NaiveDate;
use plotlars::{Histogram, LinePlot, Plot, Text, TimeSeriesPlot};
use polars::prelude::*;
use soiltemp::{
    analyze_pair, ArchiveRequest, BandSet, FetchResultExt, LatLon, OpenMeteo, PairAnalysis,
    AIR_TEMPERATURE_2M, SOIL_TEMPERATURE_6CM,
};
use std::error::Error;

const BIN_WIDTH: f64 = 0.25;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let request = ArchiveRequest::builder()
        .location(LatLon(52.1015, 5.1779)) // de Bilt
        .start_date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
        .end_date(NaiveDate::from_ymd_opt(2024, 4, 3).unwrap())
        .build();

    let Some(table) = OpenMeteo::new().fetch(&request).await.into_available() else {
        println!("No data to plot");
        return Ok(());
    };

    let variables: Vec<&str> = table.variables().iter().map(String::as_str).collect();
    TimeSeriesPlot::builder()
        .data(&table.to_dataframe()?)
        .x("time")
        .y(variables[0])
        .additional_series(variables[1..].to_vec())
        .plot_title(Text::from("Temperature at Different Depths").size(18))
        .x_title("Time")
        .y_title("Temperature (°C)")
        .build()
        .plot();

    let analysis = analyze_pair()
        .table(&table)
        .variable_a(AIR_TEMPERATURE_2M)
        .variable_b(SOIL_TEMPERATURE_6CM)
        .bands(BandSet::four_band())
        .call()?;
    if let Some(analysis) = analysis {
        plot_bands(&analysis)?;
    }

    Ok(())
}

fn plot_bands(analysis: &PairAnalysis) -> Result<(), PolarsError> {
    Histogram::builder()
        .data(&analysis.classification.to_dataframe()?)
        .x("difference")
        .group("band")
        .plot_title(Text::from("Soil 6 cm - Air, by band").size(18))
        .x_title("Difference (°C)")
        .y_title("Hours")
        .build()
        .plot();

    for (band, (label, fit)) in analysis.normal_fits().into_iter().enumerate() {
        let Some(fit) = fit else {
            println!("{}: insufficient data for a normal fit", label);
            continue;
        };
        let values: Vec<f64> = analysis.classification.values_in(band).collect();
        let curve = fit.histogram_curve(100, values.len(), BIN_WIDTH);

        // Hours per bin at each curve point, on the same scale as the fitted curve.
        let bin_of = |v: f64| (v / BIN_WIDTH).floor() as i64;
        let hours: Vec<f64> = curve
            .iter()
            .map(|&(x, _)| values.iter().filter(|&&v| bin_of(v) == bin_of(x)).count() as f64)
            .collect();
        let (x, normal): (Vec<f64>, Vec<f64>) = curve.into_iter().unzip();

        let frame = df!("difference" => x, "hours" => hours, "normal" => normal)?;
        LinePlot::builder()
            .data(&frame)
            .x("difference")
            .y("hours")
            .additional_lines(vec!["normal"])
            .plot_title(Text::from(
                format!("{}: N({:.2}, {:.2})", label, fit.mean(), fit.stdev()).as_str(),
            ))
            .x_title("Difference (°C)")
            .y_title("Hours")
            .build()
            .plot();
    }
    Ok(())
}
