use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vwi_utils::dates::{format_date, parse_optional_date};

use crate::error::ValidationError;

/// A validated query window. `end` is always strictly after `start`.
#[derive(Clone, Eq, PartialEq, Copy, Debug, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::EndNotAfterStart);
        }
        Ok(Self { start, end })
    }

    /// Parse two "YYYY-MM-DD" inputs. Blank inputs are `MissingDates`.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start_date = parse_input(start)?;
        let end_date = parse_input(end)?;
        match (start_date, end_date) {
            (Some(s), Some(e)) => DateRange::new(s, e),
            _ => Err(ValidationError::MissingDates),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn start_str(&self) -> String {
        format_date(&self.start)
    }

    pub fn end_str(&self) -> String {
        format_date(&self.end)
    }

    /// Number of days covered, end exclusive.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

fn parse_input(s: &str) -> Result<Option<NaiveDate>, ValidationError> {
    parse_optional_date(s).map_err(|_| ValidationError::InvalidDate(s.trim().to_string()))
}

/// The raw contents of a pair of date inputs.
///
/// Either side may be blank. Edits that would leave both sides filled with
/// `end <= start` are rejected and the draft keeps its previous value.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct DateDraft {
    pub start: String,
    pub end: String,
    rejected: u64,
}

impl DateDraft {
    /// Apply an edit to the start input.
    pub fn set_start(&mut self, value: &str) -> Result<(), ValidationError> {
        self.commit(value.trim().to_string(), self.end.clone())
    }

    /// Apply an edit to the end input.
    pub fn set_end(&mut self, value: &str) -> Result<(), ValidationError> {
        self.commit(self.start.clone(), value.trim().to_string())
    }

    /// The committed range, if both inputs are filled and ordered.
    pub fn range(&self) -> Result<DateRange, ValidationError> {
        DateRange::parse(&self.start, &self.end)
    }

    pub fn is_complete(&self) -> bool {
        self.range().is_ok()
    }

    /// Number of edits discarded so far. Inputs showing this draft re-sync
    /// from `start`/`end` whenever it changes.
    pub fn rejected_edits(&self) -> u64 {
        self.rejected
    }

    fn commit(&mut self, start: String, end: String) -> Result<(), ValidationError> {
        if let Err(err) = check_order(&start, &end) {
            self.rejected += 1;
            return Err(err);
        }
        self.start = start;
        self.end = end;
        Ok(())
    }
}

fn check_order(start: &str, end: &str) -> Result<(), ValidationError> {
    match (parse_input(start)?, parse_input(end)?) {
        (Some(s), Some(e)) if e <= s => Err(ValidationError::EndNotAfterStart),
        _ => Ok(()),
    }
}
