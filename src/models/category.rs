use serde::{Serialize, Serializer};
use std::cmp::Ordering;

use crate::utils::constants::UNKNOWN_LABEL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    Unknown(i64),
}

impl Season {
    pub const KNOWN: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Season::Spring,
            2 => Season::Summer,
            3 => Season::Fall,
            4 => Season::Winter,
            other => Season::Unknown(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Fall => 3,
            Season::Winter => 4,
            Season::Unknown(code) => *code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
            Season::Unknown(_) => UNKNOWN_LABEL,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Season::Unknown(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherSituation {
    Clear,
    Mist,
    LightPrecipitation,
    Severe,
    Unknown(i64),
}

impl WeatherSituation {
    pub const KNOWN: [WeatherSituation; 4] = [
        WeatherSituation::Clear,
        WeatherSituation::Mist,
        WeatherSituation::LightPrecipitation,
        WeatherSituation::Severe,
    ];

    pub fn from_code(code: i64) -> Self {
        match code {
            1 => WeatherSituation::Clear,
            2 => WeatherSituation::Mist,
            3 => WeatherSituation::LightPrecipitation,
            4 => WeatherSituation::Severe,
            other => WeatherSituation::Unknown(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            WeatherSituation::Clear => 1,
            WeatherSituation::Mist => 2,
            WeatherSituation::LightPrecipitation => 3,
            WeatherSituation::Severe => 4,
            WeatherSituation::Unknown(code) => *code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherSituation::Clear => "Clear/Partly Cloudy",
            WeatherSituation::Mist => "Mist/Cloudy",
            WeatherSituation::LightPrecipitation => "Light Snow/Rain",
            WeatherSituation::Severe => "Severe Weather",
            WeatherSituation::Unknown(_) => UNKNOWN_LABEL,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, WeatherSituation::Unknown(_))
    }
}

/// Time-of-day bucket of an hourly record.
///
/// Ordering follows the display rank (Morning first), not the starting hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeCategory {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl TimeCategory {
    pub const DISPLAY_ORDER: [TimeCategory; 4] = [
        TimeCategory::Morning,
        TimeCategory::Afternoon,
        TimeCategory::Evening,
        TimeCategory::Night,
    ];

    /// Category of an hour of the day, `None` outside 0-23
    pub fn from_hour(hour: u8) -> Option<Self> {
        crate::processors::TimeBucketer::category(hour)
    }

    pub fn rank(&self) -> usize {
        match self {
            TimeCategory::Morning => 0,
            TimeCategory::Afternoon => 1,
            TimeCategory::Evening => 2,
            TimeCategory::Night => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeCategory::Morning => "Morning",
            TimeCategory::Afternoon => "Afternoon",
            TimeCategory::Evening => "Evening",
            TimeCategory::Night => "Night",
        }
    }
}

impl PartialOrd for TimeCategory {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeCategory {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

macro_rules! label_display {
    ($($ty:ty),+) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.label())
                }
            }

            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.label())
                }
            }
        )+
    };
}

label_display!(Season, WeatherSituation, TimeCategory);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_from_code() {
        assert_eq!(Season::from_code(1), Season::Spring);
        assert_eq!(Season::from_code(2), Season::Summer);
        assert_eq!(Season::from_code(3), Season::Fall);
        assert_eq!(Season::from_code(4), Season::Winter);
        assert_eq!(Season::from_code(7), Season::Unknown(7));
        assert_eq!(Season::from_code(7).label(), "Unknown");
        assert_eq!(Season::from_code(0).code(), 0);
    }

    #[test]
    fn test_weather_labels() {
        assert_eq!(WeatherSituation::from_code(1).label(), "Clear/Partly Cloudy");
        assert_eq!(WeatherSituation::from_code(2).label(), "Mist/Cloudy");
        assert_eq!(WeatherSituation::from_code(3).label(), "Light Snow/Rain");
        assert_eq!(WeatherSituation::from_code(4).label(), "Severe Weather");
        assert!(!WeatherSituation::from_code(5).is_known());
    }

    #[test]
    fn test_time_category_display_order() {
        let mut categories = vec![
            TimeCategory::Night,
            TimeCategory::Evening,
            TimeCategory::Morning,
            TimeCategory::Afternoon,
        ];
        categories.sort();
        assert_eq!(categories, TimeCategory::DISPLAY_ORDER.to_vec());
        assert_eq!(TimeCategory::from_hour(6), Some(TimeCategory::Morning));
        assert_eq!(TimeCategory::from_hour(24), None);
    }

    #[test]
    fn test_labels_serialize_as_strings() {
        let json = serde_json::to_string(&[Season::Fall, Season::Unknown(9)]).unwrap();
        assert_eq!(json, r#"["Fall","Unknown"]"#);
        assert_eq!(TimeCategory::Night.to_string(), "Night");
    }
}
