//! One station-month row: `id year month` followed by 31 day values.

use super::{COLUMN_COUNT, DAYS_PER_RECORD, SENTINEL};

/// The content of one day column.
#[derive(Debug, Clone, PartialEq)]
pub enum DaySlot {
    Value(f64),
    Missing,
    /// A token that is neither a number nor a recognised null marker.
    Unparsable(String),
}

impl DaySlot {
    fn from_token(token: &str) -> Self {
        if is_null_token(token) {
            return DaySlot::Missing;
        }

        match token.parse::<f64>() {
            Ok(v) if v.is_finite() => DaySlot::Value(v),
            Ok(_) => DaySlot::Missing,
            Err(_) => DaySlot::Unparsable(token.to_string()),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, DaySlot::Value(v) if *v == SENTINEL)
    }

    /// Present in the file, numeric or not.
    pub fn is_present(&self) -> bool {
        !matches!(self, DaySlot::Missing)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationMonthRecord {
    pub station_id: i64,
    pub year: i32,
    pub month: u32,
    pub days: Vec<DaySlot>,
}

impl StationMonthRecord {
    /// Parses a whitespace-delimited row. The error is a reason without location;
    /// callers know the file and line.
    pub fn from_line(line: &str) -> Result<Self, String> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.len() != COLUMN_COUNT {
            return Err(format!(
                "expected {} columns, found {}",
                COLUMN_COUNT,
                tokens.len()
            ));
        }

        let station_id = parse_integer(tokens[0], "id")?;
        let year = parse_integer(tokens[1], "year")?;
        let month = parse_integer(tokens[2], "month")?;
        let days = tokens[3..].iter().map(|t| DaySlot::from_token(t)).collect();

        Ok(StationMonthRecord {
            station_id,
            year,
            month,
            days,
        })
    }

    /// Day slots paired with their 1-based day of month.
    pub fn days(&self) -> impl Iterator<Item = (u32, &DaySlot)> {
        self.days
            .iter()
            .take(DAYS_PER_RECORD)
            .enumerate()
            .map(|(i, slot)| (i as u32 + 1, slot))
    }
}

// Accepts "2020" and "2020.0", rejects "2020.5".
fn parse_integer<T: TryFrom<i64>>(token: &str, column: &str) -> Result<T, String> {
    let invalid = || format!("column `{}` is not an integer: `{}`", column, token);

    let value = match token.parse::<i64>() {
        Ok(v) => v,
        Err(_) => match token.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 => f as i64,
            _ => return Err(invalid()),
        },
    };

    T::try_from(value).map_err(|_| invalid())
}

fn is_null_token(token: &str) -> bool {
    matches!(
        token,
        "NA" | "N/A" | "NaN" | "nan" | "-NaN" | "-nan" | "NULL" | "null" | "<NA>"
    )
}

// -- Tests ----------------------------------------------------------------------------
