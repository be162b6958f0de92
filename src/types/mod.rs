pub mod lat_lon;
pub mod time_series;
pub mod variable;
