pub mod dataset_loader;
pub mod integrity_checker;
pub mod label_mapper;
pub mod range_filter;
pub mod schema_normalizer;
pub mod time_bucketer;
pub mod unit_denormalizer;

pub use dataset_loader::{DatasetLoader, Datasets, FilteredView};
pub use integrity_checker::{IntegrityChecker, IntegrityReport, Violation, ViolationType};
pub use label_mapper::LabelMapper;
pub use range_filter::{date_bounds, DateRange, RangeFilter};
pub use schema_normalizer::{semantic_name, Granularity, SchemaNormalizer};
pub use time_bucketer::TimeBucketer;
pub use unit_denormalizer::UnitDenormalizer;
