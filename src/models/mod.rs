pub mod category;
pub mod record;

pub use category::{Season, TimeCategory, WeatherSituation};
pub use record::{
    DailyRecord, HourlyRecord, Labels, MeasuredRow, NormalizedConditions, NormalizedRow, Row,
    UsageRecord, WeatherConditions,
};
