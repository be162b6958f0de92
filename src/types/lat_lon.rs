/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use soiltemp::LatLon;
///
/// let de_bilt = LatLon(52.1015, 5.1779);
/// assert_eq!(de_bilt.0, 52.1015); // Latitude
/// assert_eq!(de_bilt.1, 5.1779); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }
}
