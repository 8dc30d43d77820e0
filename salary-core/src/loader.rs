use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{ScheduleError, TaxBracket, TaxSchedule};

/// Errors that can occur when loading a tax schedule.
#[derive(Debug, Error)]
pub enum ScheduleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(#[from] ScheduleError),
}

impl From<csv::Error> for ScheduleLoaderError {
    fn from(err: csv::Error) -> Self {
        ScheduleLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a schedule CSV file.
///
/// - `upper_bound`: exclusive upper edge of the bracket (empty for the top bracket)
/// - `rate`: the marginal rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScheduleRecord {
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl From<ScheduleRecord> for TaxBracket {
    fn from(record: ScheduleRecord) -> Self {
        TaxBracket {
            upper_bound: record.upper_bound,
            rate: record.rate,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for tax schedules stored as CSV.
///
/// ```text
/// upper_bound,rate
/// 600,0
/// 1650,0.10
/// ,0.35
/// ```
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Parse schedule records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ScheduleRecord>, ScheduleLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ScheduleRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and validate a complete schedule.
    pub fn load<R: Read>(
        reader: R,
        pension_rate: Decimal,
    ) -> Result<TaxSchedule, ScheduleLoaderError> {
        let records = Self::parse(reader)?;
        debug!(records = records.len(), "parsed schedule CSV");

        let brackets = records.into_iter().map(TaxBracket::from).collect();
        Ok(TaxSchedule::new(brackets, pension_rate)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const THREE_BANDS: &str = "upper_bound,rate\n1000,0\n5000,0.2\n,0.4\n";

    #[test]
    fn parse_reads_bounded_and_unbounded_records() {
        let records = ScheduleLoader::parse(THREE_BANDS.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![
                ScheduleRecord {
                    upper_bound: Some(dec!(1000)),
                    rate: dec!(0)
                },
                ScheduleRecord {
                    upper_bound: Some(dec!(5000)),
                    rate: dec!(0.2)
                },
                ScheduleRecord {
                    upper_bound: None,
                    rate: dec!(0.4)
                },
            ]
        );
    }

    #[test]
    fn parse_trims_whitespace_around_fields() {
        let csv = "upper_bound , rate\n 1000 , 0.1 \n , 0.3\n";

        let records = ScheduleLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(records[0].upper_bound, Some(dec!(1000)));
        assert_eq!(records[1].upper_bound, None);
        assert_eq!(records[1].rate, dec!(0.3));
    }

    #[test]
    fn parse_rejects_non_numeric_rate() {
        let csv = "upper_bound,rate\n1000,ten\n";

        let result = ScheduleLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(ScheduleLoaderError::CsvParse(_))));
    }

    #[test]
    fn load_builds_validated_schedule() {
        let schedule = ScheduleLoader::load(THREE_BANDS.as_bytes(), dec!(0.05)).unwrap();

        assert_eq!(schedule.brackets().len(), 3);
        assert_eq!(schedule.pension_rate(), dec!(0.05));
        assert_eq!(schedule.max_marginal_rate(), dec!(0.4));
    }

    #[test]
    fn load_rejects_schedule_without_open_top_bracket() {
        let csv = "upper_bound,rate\n1000,0\n5000,0.2\n";

        let result = ScheduleLoader::load(csv.as_bytes(), dec!(0.07));

        assert!(matches!(
            result,
            Err(ScheduleLoaderError::InvalidSchedule(ScheduleError::BoundedLast))
        ));
    }

    #[test]
    fn load_rejects_empty_file() {
        let result = ScheduleLoader::load("upper_bound,rate\n".as_bytes(), dec!(0.07));

        assert!(matches!(
            result,
            Err(ScheduleLoaderError::InvalidSchedule(ScheduleError::NoBrackets))
        ));
    }
}
