use crate::models::{Labels, Row, Season, WeatherSituation};
use tracing::warn;

/// Attaches season and weather labels, counting codes that fall outside the
/// known tables.
#[derive(Debug, Default)]
pub struct LabelMapper {
    unknown_seasons: usize,
    unknown_weather: usize,
}

impl LabelMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(season_code: i64, weather_code: i64) -> Labels {
        Labels {
            season: Season::from_code(season_code),
            weather: WeatherSituation::from_code(weather_code),
        }
    }

    pub fn label_row<C>(&mut self, row: &Row<C>) -> Labels {
        let labels = Self::labels(row.season, row.weather_condition);

        if !labels.season.is_known() {
            self.unknown_seasons += 1;
        }
        if !labels.weather.is_known() {
            self.unknown_weather += 1;
        }

        labels
    }

    pub fn unknown_seasons(&self) -> usize {
        self.unknown_seasons
    }

    pub fn unknown_weather(&self) -> usize {
        self.unknown_weather
    }

    /// Emit one warning per table if any code was unknown
    pub fn report(&self, table: &str) {
        if self.unknown_seasons > 0 || self.unknown_weather > 0 {
            warn!(
                table,
                unknown_seasons = self.unknown_seasons,
                unknown_weather = self.unknown_weather,
                "records with unknown category codes labelled \"Unknown\""
            );
        }
    }
}
