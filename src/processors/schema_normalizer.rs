use crate::error::{ProcessingError, Result};
use crate::models::{NormalizedConditions, NormalizedRow, Row};
use crate::readers::RawTable;
use crate::utils::constants::{COLUMN_RENAMES, DATE_FORMAT};
use chrono::NaiveDate;
use csv::StringRecord;
use std::collections::HashMap;
use std::str::FromStr;

/// Which input a table comes from; the hourly table carries an `hr` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Daily,
    Hourly,
}

/// Semantic name of a raw column, if it is one the pipeline knows.
pub fn semantic_name(raw: &str) -> Option<&'static str> {
    COLUMN_RENAMES
        .iter()
        .find(|(r, _)| *r == raw)
        .map(|(_, semantic)| *semantic)
}

/// Renames raw columns to semantic fields and parses typed rows.
pub struct SchemaNormalizer {
    granularity: Granularity,
}

impl SchemaNormalizer {
    pub fn new(granularity: Granularity) -> Self {
        Self { granularity }
    }

    pub fn normalize(&self, table: &RawTable) -> Result<Vec<NormalizedRow>> {
        let columns = self.resolve_columns(table)?;

        table
            .rows
            .iter()
            .enumerate()
            // line 1 is the header
            .map(|(i, record)| columns.parse_row(record, i + 2))
            .collect()
    }

    /// Map every semantic field to its position in the raw header
    fn resolve_columns(&self, table: &RawTable) -> Result<ColumnMap> {
        let mut positions = HashMap::with_capacity(COLUMN_RENAMES.len());

        for (raw, semantic) in COLUMN_RENAMES {
            match table.column_index(raw) {
                Some(index) => {
                    positions.insert(semantic, index);
                }
                None if raw == "hr" && self.granularity == Granularity::Daily => {}
                None => return Err(ProcessingError::MissingColumn { raw, semantic }),
            }
        }

        Ok(ColumnMap { positions })
    }
}

struct ColumnMap {
    positions: HashMap<&'static str, usize>,
}

impl ColumnMap {
    fn field<'r>(&self, record: &'r StringRecord, semantic: &'static str) -> &'r str {
        self.positions
            .get(semantic)
            .and_then(|&i| record.get(i))
            .unwrap_or("")
    }

    fn parse<T: FromStr>(&self, record: &StringRecord, semantic: &'static str, line: usize) -> Result<T> {
        let value = self.field(record, semantic);
        value.parse::<T>().map_err(|_| ProcessingError::Parse {
            line,
            column: semantic,
            value: value.to_string(),
        })
    }

    fn parse_flag(&self, record: &StringRecord, semantic: &'static str, line: usize) -> Result<bool> {
        match self.field(record, semantic) {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(ProcessingError::Parse {
                line,
                column: semantic,
                value: other.to_string(),
            }),
        }
    }

    fn parse_row(&self, record: &StringRecord, line: usize) -> Result<NormalizedRow> {
        let date_str = self.field(record, "date");
        let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT).map_err(|_| {
            ProcessingError::DateParse {
                line,
                value: date_str.to_string(),
            }
        })?;

        let hour = if self.positions.contains_key("hour") {
            Some(self.parse::<i64>(record, "hour", line)?)
        } else {
            None
        };

        Ok(Row {
            line,
            date,
            year: self.parse(record, "year", line)?,
            month: self.parse(record, "month", line)?,
            hour,
            season: self.parse(record, "season", line)?,
            is_holiday: self.parse_flag(record, "is_holiday", line)?,
            day_of_week: self.parse(record, "day_of_week", line)?,
            is_workingday: self.parse_flag(record, "is_workingday", line)?,
            weather_condition: self.parse(record, "weather_condition", line)?,
            conditions: NormalizedConditions::new(
                self.parse(record, "temperature_celsius", line)?,
                self.parse(record, "feels_like_temperature_celsius", line)?,
                self.parse(record, "humidity_percentage", line)?,
                self.parse(record, "windspeed_kmh", line)?,
            ),
            casual_users: self.parse(record, "casual_users", line)?,
            registered_users: self.parse(record, "registered_users", line)?,
            total_users: self.parse(record, "total_users", line)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::TableReader;

    const DAY_HEADER: &str = "instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";
    const HOUR_HEADER: &str = "instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

    fn table(header: &str, rows: &[&str]) -> RawTable {
        let mut content = format!("{}\n", header);
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        TableReader::parse(content.as_bytes()).unwrap()
    }

    #[test]
    fn test_semantic_names() {
        assert_eq!(semantic_name("dteday"), Some("date"));
        assert_eq!(semantic_name("weathersit"), Some("weather_condition"));
        assert_eq!(semantic_name("cnt"), Some("total_users"));
        assert_eq!(semantic_name("instant"), None);
    }

    #[test]
    fn test_normalize_daily_rows() {
        let raw = table(
            DAY_HEADER,
            &[
                "1,2011-01-01,1,0,1,0,6,0,2,0.344167,0.363625,0.805833,0.160446,331,654,985",
                "2,2011-01-02,1,0,1,0,0,0,2,0.363478,0.353739,0.696087,0.248539,131,670,801",
            ],
        );

        let rows = SchemaNormalizer::new(Granularity::Daily).normalize(&raw).unwrap();

        assert_eq!(rows.len(), 2);
        let first = &rows[0];
        assert_eq!(first.line, 2);
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(first.hour, None);
        assert_eq!(first.day_of_week, 6);
        assert!(!first.is_workingday);
        assert_eq!(first.weather_condition, 2);
        assert_eq!(first.conditions.temperature, 0.344167);
        assert_eq!(first.casual_users, 331);
        assert_eq!(first.total_users, 985);
        assert_eq!(rows[1].date, NaiveDate::from_ymd_opt(2011, 1, 2).unwrap());
    }

    #[test]
    fn test_normalize_hourly_reads_hour() {
        let raw = table(
            HOUR_HEADER,
            &["1,2011-01-01,1,0,1,5,0,6,0,1,0.24,0.2879,0.81,0,3,13,16"],
        );

        let rows = SchemaNormalizer::new(Granularity::Hourly).normalize(&raw).unwrap();
        assert_eq!(rows[0].hour, Some(5));
    }

    #[test]
    fn test_codes_and_hours_outside_byte_range_still_parse() {
        let raw = table(
            HOUR_HEADER,
            &["1,2011-01-01,-1,0,1,-1,0,6,0,300,0.24,0.2879,0.81,0,3,13,16"],
        );

        let rows = SchemaNormalizer::new(Granularity::Hourly).normalize(&raw).unwrap();
        assert_eq!(rows[0].season, -1);
        assert_eq!(rows[0].hour, Some(-1));
        assert_eq!(rows[0].weather_condition, 300);
    }

    #[test]
    fn test_hourly_requires_hour_column() {
        let raw = table(DAY_HEADER, &[]);
        let err = SchemaNormalizer::new(Granularity::Hourly)
            .normalize(&raw)
            .unwrap_err();

        assert!(matches!(err, ProcessingError::MissingColumn { raw: "hr", .. }));
    }

    #[test]
    fn test_invalid_date_is_parse_error() {
        let raw = table(
            DAY_HEADER,
            &["1,2011-02-30,1,0,2,0,6,0,2,0.3,0.3,0.8,0.1,331,654,985"],
        );

        let err = SchemaNormalizer::new(Granularity::Daily)
            .normalize(&raw)
            .unwrap_err();

        match err {
            ProcessingError::DateParse { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "2011-02-30");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_number_names_column() {
        let raw = table(
            DAY_HEADER,
            &["1,2011-01-01,1,0,1,0,6,0,2,warm,0.3,0.8,0.1,331,654,985"],
        );

        let err = SchemaNormalizer::new(Granularity::Daily)
            .normalize(&raw)
            .unwrap_err();

        assert!(matches!(
            err,
            ProcessingError::Parse { column: "temperature_celsius", .. }
        ));
    }

    #[test]
    fn test_flags_must_be_binary() {
        let raw = table(
            DAY_HEADER,
            &["1,2011-01-01,1,0,1,2,6,0,2,0.3,0.3,0.8,0.1,331,654,985"],
        );

        assert!(SchemaNormalizer::new(Granularity::Daily).normalize(&raw).is_err());
    }
}
