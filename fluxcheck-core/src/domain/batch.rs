// fluxcheck-core/src/domain/batch.rs

use chrono::NaiveDate;

/// Reporting date of a batch that does not match the established one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMismatch {
    pub observed: NaiveDate,
    pub expected: NaiveDate,
}

/// Per-run state: every accepted file must share one reporting date.
/// The first admitted date establishes it, it never changes afterwards.
#[derive(Debug, Clone, Default)]
pub struct BatchState {
    expected_reporting_date: Option<NaiveDate>,
}

impl BatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expected_reporting_date(&self) -> Option<NaiveDate> {
        self.expected_reporting_date
    }

    pub fn admit(&mut self, date: NaiveDate) -> Result<(), DateMismatch> {
        match self.expected_reporting_date {
            None => {
                self.expected_reporting_date = Some(date);
                Ok(())
            }
            Some(expected) if expected == date => Ok(()),
            Some(expected) => Err(DateMismatch {
                observed: date,
                expected,
            }),
        }
    }
}
