//! Difference bucketing and run-length statistics.
//!
//! The chain is: a [`crate::TimeSeriesTable`] and a variable pair produce a
//! [`difference::DifferenceSeries`], a [`bucketizer::Bucketizer`] classifies each difference
//! into a [`band::BandSet`], and the resulting [`bucketizer::Classification`] feeds both
//! [`statistics::BandStatistics`] and [`run_length::RunLengthAnalysis`]. Everything here is
//! synchronous and pure.

pub mod band;
pub mod bucketizer;
pub mod difference;
pub mod error;
pub mod normal;
pub mod pipeline;
pub mod run_length;
pub mod statistics;
