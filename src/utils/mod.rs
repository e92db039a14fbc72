pub mod calendar;
pub mod constants;
pub mod progress;
pub mod settings;

pub use calendar::weekday_name;
pub use constants::*;
pub use progress::ProgressReporter;
pub use settings::Settings;
