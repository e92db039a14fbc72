use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use validator::Validate;

use crate::models::category::{Season, TimeCategory, WeatherSituation};

/// Weather fields as delivered by the data source, min-max normalized to 0..1.
///
/// Not `Clone`. Converted to [`WeatherConditions`] only by
/// [`UnitDenormalizer::denormalize`](crate::processors::UnitDenormalizer::denormalize),
/// which consumes it.
#[derive(Debug, PartialEq)]
pub struct NormalizedConditions {
    pub temperature: f64,
    pub feels_like_temperature: f64,
    pub humidity: f64,
    pub windspeed: f64,
}

impl NormalizedConditions {
    pub fn new(temperature: f64, feels_like_temperature: f64, humidity: f64, windspeed: f64) -> Self {
        Self {
            temperature,
            feels_like_temperature,
            humidity,
            windspeed,
        }
    }
}

/// Weather fields in physical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherConditions {
    pub temperature_celsius: f64,
    pub feels_like_temperature_celsius: f64,
    pub humidity_percentage: f64,
    pub windspeed_kmh: f64,
}

/// A row after schema normalization, generic over the unit state of its
/// weather fields.
#[derive(Debug, PartialEq)]
pub struct Row<C> {
    /// 1-based line in the source file, header included
    pub line: usize,
    pub date: NaiveDate,
    pub year: u8,
    pub month: u8,
    pub hour: Option<i64>,
    pub season: i64,
    pub is_holiday: bool,
    pub day_of_week: u8,
    pub is_workingday: bool,
    pub weather_condition: i64,
    pub conditions: C,
    pub casual_users: u32,
    pub registered_users: u32,
    pub total_users: u32,
}

pub type NormalizedRow = Row<NormalizedConditions>;
pub type MeasuredRow = Row<WeatherConditions>;

impl<C> Row<C> {
    pub fn map_conditions<D>(self, f: impl FnOnce(C) -> D) -> Row<D> {
        Row {
            line: self.line,
            date: self.date,
            year: self.year,
            month: self.month,
            hour: self.hour,
            season: self.season,
            is_holiday: self.is_holiday,
            day_of_week: self.day_of_week,
            is_workingday: self.is_workingday,
            weather_condition: self.weather_condition,
            conditions: f(self.conditions),
            casual_users: self.casual_users,
            registered_users: self.registered_users,
            total_users: self.total_users,
        }
    }

    pub fn has_consistent_totals(&self) -> bool {
        self.casual_users as u64 + self.registered_users as u64 == self.total_users as u64
    }
}

/// Labels derived from the season and weather codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub season: Season,
    pub weather: WeatherSituation,
}

/// Read access shared by daily and hourly records, used by filtering and
/// aggregation.
pub trait UsageRecord {
    fn date(&self) -> NaiveDate;
    fn season_label(&self) -> Season;
    fn weather_label(&self) -> WeatherSituation;
    fn is_workingday(&self) -> bool;
    fn casual_users(&self) -> u32;
    fn registered_users(&self) -> u32;
    fn total_users(&self) -> u32;

    fn hour(&self) -> Option<u8> {
        None
    }

    fn time_category(&self) -> Option<TimeCategory> {
        None
    }

    fn weekday(&self) -> Weekday {
        self.date().weekday()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub year: u8,

    #[validate(range(min = 1, max = 12))]
    pub month: u8,

    pub season: i64,
    pub is_holiday: bool,

    #[validate(range(max = 6))]
    pub day_of_week: u8,

    pub is_workingday: bool,
    pub weather_condition: i64,
    pub temperature_celsius: f64,
    pub feels_like_temperature_celsius: f64,

    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity_percentage: f64,

    #[validate(range(min = 0.0))]
    pub windspeed_kmh: f64,

    pub casual_users: u32,
    pub registered_users: u32,
    pub total_users: u32,
    pub season_label: Season,
    pub weather_label: WeatherSituation,
}

impl DailyRecord {
    pub fn new(row: MeasuredRow, labels: Labels) -> Self {
        let c = row.conditions;
        Self {
            date: row.date,
            year: row.year,
            month: row.month,
            season: row.season,
            is_holiday: row.is_holiday,
            day_of_week: row.day_of_week,
            is_workingday: row.is_workingday,
            weather_condition: row.weather_condition,
            temperature_celsius: c.temperature_celsius,
            feels_like_temperature_celsius: c.feels_like_temperature_celsius,
            humidity_percentage: c.humidity_percentage,
            windspeed_kmh: c.windspeed_kmh,
            casual_users: row.casual_users,
            registered_users: row.registered_users,
            total_users: row.total_users,
            season_label: labels.season,
            weather_label: labels.weather,
        }
    }

    pub fn conditions(&self) -> WeatherConditions {
        WeatherConditions {
            temperature_celsius: self.temperature_celsius,
            feels_like_temperature_celsius: self.feels_like_temperature_celsius,
            humidity_percentage: self.humidity_percentage,
            windspeed_kmh: self.windspeed_kmh,
        }
    }
}

impl UsageRecord for DailyRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn season_label(&self) -> Season {
        self.season_label
    }

    fn weather_label(&self) -> WeatherSituation {
        self.weather_label
    }

    fn is_workingday(&self) -> bool {
        self.is_workingday
    }

    fn casual_users(&self) -> u32 {
        self.casual_users
    }

    fn registered_users(&self) -> u32 {
        self.registered_users
    }

    fn total_users(&self) -> u32 {
        self.total_users
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct HourlyRecord {
    pub date: NaiveDate,
    pub year: u8,

    #[validate(range(min = 1, max = 12))]
    pub month: u8,

    #[validate(range(max = 23))]
    pub hour: u8,

    pub season: i64,
    pub is_holiday: bool,

    #[validate(range(max = 6))]
    pub day_of_week: u8,

    pub is_workingday: bool,
    pub weather_condition: i64,
    pub temperature_celsius: f64,
    pub feels_like_temperature_celsius: f64,

    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity_percentage: f64,

    #[validate(range(min = 0.0))]
    pub windspeed_kmh: f64,

    pub casual_users: u32,
    pub registered_users: u32,
    pub total_users: u32,
    pub season_label: Season,
    pub weather_label: WeatherSituation,
    pub time_category: TimeCategory,
}

impl HourlyRecord {
    pub fn new(row: MeasuredRow, hour: u8, labels: Labels, time_category: TimeCategory) -> Self {
        let c = row.conditions;
        Self {
            date: row.date,
            year: row.year,
            month: row.month,
            hour,
            season: row.season,
            is_holiday: row.is_holiday,
            day_of_week: row.day_of_week,
            is_workingday: row.is_workingday,
            weather_condition: row.weather_condition,
            temperature_celsius: c.temperature_celsius,
            feels_like_temperature_celsius: c.feels_like_temperature_celsius,
            humidity_percentage: c.humidity_percentage,
            windspeed_kmh: c.windspeed_kmh,
            casual_users: row.casual_users,
            registered_users: row.registered_users,
            total_users: row.total_users,
            season_label: labels.season,
            weather_label: labels.weather,
            time_category,
        }
    }
}

impl UsageRecord for HourlyRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn season_label(&self) -> Season {
        self.season_label
    }

    fn weather_label(&self) -> WeatherSituation {
        self.weather_label
    }

    fn is_workingday(&self) -> bool {
        self.is_workingday
    }

    fn casual_users(&self) -> u32 {
        self.casual_users
    }

    fn registered_users(&self) -> u32 {
        self.registered_users
    }

    fn total_users(&self) -> u32 {
        self.total_users
    }

    fn hour(&self) -> Option<u8> {
        Some(self.hour)
    }

    fn time_category(&self) -> Option<TimeCategory> {
        Some(self.time_category)
    }
}
