//! Synthetic card record shown on the screen.

use chrono::{Duration as ChronoDuration, Local, NaiveDate};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::CardError;

/// One generated card. Created once per mount, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardRecord {
    /// `#### #### #### ####`
    pub number: String,
    /// `MM/YY`
    pub expiry: String,
    pub cvv: String,
    pub holder_name: String,
}

impl CardRecord {
    /// Text placed on the clipboard by the copy action.
    pub fn details_text(&self) -> String {
        format!(
            "Card: {}\nExpiry: {}\nCVV: {}\nHolder: {}",
            self.number, self.expiry, self.cvv, self.holder_name
        )
    }
}

/// Supplies the card record at mount.
pub trait CardSource {
    fn generate(&mut self) -> Result<CardRecord, CardError>;
}

/// A fixed record, handed out on every call.
#[derive(Debug, Clone)]
pub struct FixedCard(pub CardRecord);

impl CardSource for FixedCard {
    fn generate(&mut self) -> Result<CardRecord, CardError> {
        Ok(self.0.clone())
    }
}

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Priya", "Jane", "Rohan", "Meera", "Kabir", "Ananya", "Arjun", "Sara", "Vikram",
    "Isha", "Dev", "Nina", "Leo", "Maya", "Omar", "Tara", "Noah", "Zoya", "Ethan",
];

const LAST_NAMES: &[&str] = &[
    "Sharma", "Doe", "Iyer", "Kapoor", "Nair", "Mehta", "Singh", "Reddy", "Patel", "Gupta",
    "Khan", "Rao", "Fernandes", "Bose", "Menon", "Das", "Joshi", "Pillai", "Chopra", "Verma",
];

/// Expiry dates fall within this many days of today.
const EXPIRY_WINDOW_DAYS: i64 = 5 * 365;

/// Random card records. Nothing is checksummed or validated.
#[derive(Debug)]
pub struct SyntheticCards<R> {
    rng: R,
    today: Option<NaiveDate>,
}

impl SyntheticCards<StdRng> {
    /// Seed from the operating system's entropy source.
    pub fn from_entropy() -> Result<Self, CardError> {
        let rng =
            StdRng::from_rng(OsRng).map_err(|e| CardError::EntropyUnavailable(e.to_string()))?;
        Ok(Self::new(rng))
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SyntheticCards<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, today: None }
    }

    /// Pin "today" for expiry generation instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn number(&mut self) -> String {
        let mut number = String::with_capacity(19);
        for group in 0..4 {
            if group > 0 {
                number.push(' ');
            }
            for _ in 0..4 {
                let digit = self.rng.gen_range(0..10u8);
                number.push(char::from(b'0' + digit));
            }
        }
        number
    }

    fn expiry(&mut self) -> String {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let days = self.rng.gen_range(1..=EXPIRY_WINDOW_DAYS);
        let date = today + ChronoDuration::days(days);
        date.format("%m/%y").to_string()
    }

    fn cvv(&mut self) -> String {
        format!("{:03}", self.rng.gen_range(0..1000u16))
    }

    fn holder_name(&mut self) -> String {
        let first = FIRST_NAMES[self.rng.gen_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[self.rng.gen_range(0..LAST_NAMES.len())];
        format!("{first} {last}").to_uppercase()
    }
}

impl<R: Rng> CardSource for SyntheticCards<R> {
    fn generate(&mut self) -> Result<CardRecord, CardError> {
        let record = CardRecord {
            number: self.number(),
            expiry: self.expiry(),
            cvv: self.cvv(),
            holder_name: self.holder_name(),
        };
        tracing::debug!(holder = %record.holder_name, expiry = %record.expiry, "generated card record");
        Ok(record)
    }
}
