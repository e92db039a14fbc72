use chrono::Weekday;

/// Default input file names
pub const DAY_FILE: &str = "day.csv";
pub const HOUR_FILE: &str = "hour.csv";

/// Default settings file, read when present
pub const SETTINGS_FILE: &str = "bikeshare.toml";
pub const ENV_PREFIX: &str = "BIKESHARE";

/// Date format of the `dteday` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Min-max normalization divisors used by the data source
pub const TEMPERATURE_SCALE: f64 = 41.0;
pub const FEELS_LIKE_SCALE: f64 = 41.0;
pub const HUMIDITY_SCALE: f64 = 100.0;
pub const WINDSPEED_SCALE: f64 = 67.0;

/// Raw column name -> semantic field name
pub const COLUMN_RENAMES: [(&str, &str); 16] = [
    ("dteday", "date"),
    ("yr", "year"),
    ("mnth", "month"),
    ("hr", "hour"),
    ("season", "season"),
    ("holiday", "is_holiday"),
    ("weekday", "day_of_week"),
    ("workingday", "is_workingday"),
    ("weathersit", "weather_condition"),
    ("temp", "temperature_celsius"),
    ("atemp", "feels_like_temperature_celsius"),
    ("hum", "humidity_percentage"),
    ("windspeed", "windspeed_kmh"),
    ("casual", "casual_users"),
    ("registered", "registered_users"),
    ("cnt", "total_users"),
];

/// Day-of-week display order
pub const WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub const HOURS_PER_DAY: u8 = 24;

/// Label emitted for codes outside the season/weather tables
pub const UNKNOWN_LABEL: &str = "Unknown";

pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
