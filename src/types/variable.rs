//! Names of the Open-Meteo hourly temperature variables used by this crate.

/// Air temperature at 2 metres above ground.
pub const AIR_TEMPERATURE_2M: &str = "temperature_2m";
/// Soil temperature at the surface.
pub const SOIL_TEMPERATURE_0CM: &str = "soil_temperature_0cm";
pub const SOIL_TEMPERATURE_6CM: &str = "soil_temperature_6cm";
pub const SOIL_TEMPERATURE_18CM: &str = "soil_temperature_18cm";
pub const SOIL_TEMPERATURE_54CM: &str = "soil_temperature_54cm";

/// The air reference followed by the soil depths, in request order.
pub const DEFAULT_VARIABLES: [&str; 5] = [
    AIR_TEMPERATURE_2M,
    SOIL_TEMPERATURE_0CM,
    SOIL_TEMPERATURE_6CM,
    SOIL_TEMPERATURE_18CM,
    SOIL_TEMPERATURE_54CM,
];

/// Human readable label for a variable, as used in chart legends.
///
/// # Examples
///
/// ```
/// use soiltemp::display_label;
///
/// assert_eq!(display_label("soil_temperature_6cm"), "Soil Temperature 6Cm (°C)");
/// ```
pub fn display_label(variable: &str) -> String {
    let words: Vec<String> = variable.split('_').map(title_case).collect();
    format!("{} (°C)", words.join(" "))
}

// Upper-cases the first letter of every alphabetic run, lower-cases the rest.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut previous_alphabetic = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            out.push(c);
            previous_alphabetic = false;
        }
    }
    out
}
