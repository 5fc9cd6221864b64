//! Calendar source for scenario timestamps.

use chrono::{Days, NaiveDate};
use std::sync::{Arc, Mutex};

pub trait SessionClock: Send {
    fn today(&self) -> NaiveDate;
}

/// Local system date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SessionClock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Settable date, shared between clones. Used by tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    date: Arc<Mutex<NaiveDate>>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date: Arc::new(Mutex::new(date)) }
    }

    pub fn set(&self, date: NaiveDate) {
        if let Ok(mut current) = self.date.lock() {
            *current = date;
        }
    }

    pub fn advance_days(&self, days: u64) {
        if let Ok(mut current) = self.date.lock() {
            if let Some(next) = current.checked_add_days(Days::new(days)) {
                *current = next;
            }
        }
    }
}

impl SessionClock for FixedClock {
    fn today(&self) -> NaiveDate {
        match self.date.lock() {
            Ok(date) => *date,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
