use crate::models::{MeasuredRow, NormalizedConditions, NormalizedRow, WeatherConditions};
use crate::utils::constants::{FEELS_LIKE_SCALE, HUMIDITY_SCALE, TEMPERATURE_SCALE, WINDSPEED_SCALE};

/// Reverses the source's min-max normalization of the weather fields.
pub struct UnitDenormalizer;

impl UnitDenormalizer {
    pub fn denormalize(conditions: NormalizedConditions) -> WeatherConditions {
        WeatherConditions {
            temperature_celsius: conditions.temperature * TEMPERATURE_SCALE,
            feels_like_temperature_celsius: conditions.feels_like_temperature * FEELS_LIKE_SCALE,
            humidity_percentage: conditions.humidity * HUMIDITY_SCALE,
            windspeed_kmh: conditions.windspeed * WINDSPEED_SCALE,
        }
    }

    pub fn denormalize_row(row: NormalizedRow) -> MeasuredRow {
        row.map_conditions(Self::denormalize)
    }

    pub fn denormalize_rows(rows: Vec<NormalizedRow>) -> Vec<MeasuredRow> {
        rows.into_iter().map(Self::denormalize_row).collect()
    }
}
