//! Free-text and date synthesis backed by the `fake` crate.
//!
//! Every helper draws from the caller's RNG so a seeded run stays
//! reproducible.

use chrono::{Datelike, Days, Months, NaiveDate};
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Word;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;

use crate::errors::GenerationError;

pub fn person_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    Name().fake_with_rng(rng)
}

pub fn email<R: Rng + ?Sized>(rng: &mut R) -> String {
    SafeEmail().fake_with_rng(rng)
}

pub fn phone_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    PhoneNumber().fake_with_rng(rng)
}

pub fn company_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    CompanyName().fake_with_rng(rng)
}

pub fn word<R: Rng + ?Sized>(rng: &mut R) -> String {
    Word().fake_with_rng(rng)
}

/// A single free-text address line; may contain commas.
pub fn address_line<R: Rng + ?Sized>(rng: &mut R) -> String {
    let building: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    let city: String = CityName().fake_with_rng(rng);
    let zip: String = ZipCode().fake_with_rng(rng);
    format!("{building} {street}, {city} {zip}")
}

/// Inclusive date window relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// January 1 of the reference year through the reference date.
    pub fn this_year(reference: NaiveDate) -> Result<Self, GenerationError> {
        let start = first_of_year(reference.year())?;
        Ok(Self {
            start,
            end: reference,
        })
    }

    /// January 1 of the decade's first year through the reference date.
    pub fn this_decade(reference: NaiveDate) -> Result<Self, GenerationError> {
        let year = reference.year();
        let start = first_of_year(year - year.rem_euclid(10))?;
        Ok(Self {
            start,
            end: reference,
        })
    }

    /// Birth dates giving an age between `min_age` and `max_age` years
    /// (inclusive) on the reference date.
    pub fn birth_dates(
        reference: NaiveDate,
        min_age: u32,
        max_age: u32,
    ) -> Result<Self, GenerationError> {
        let out_of_range =
            || GenerationError::InvalidConfig(format!("reference date {reference} out of range"));
        let end = reference
            .checked_sub_months(Months::new(min_age * 12))
            .ok_or_else(out_of_range)?;
        let start = reference
            .checked_sub_months(Months::new((max_age + 1) * 12))
            .and_then(|date| date.checked_add_days(Days::new(1)))
            .ok_or_else(out_of_range)?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Uniformly sample a date in the window.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> NaiveDate {
        let span = (self.end - self.start).num_days().max(0) as u64;
        let offset = rng.random_range(0..=span);
        self.start
            .checked_add_days(Days::new(offset))
            .unwrap_or(self.end)
    }
}

fn first_of_year(year: i32) -> Result<NaiveDate, GenerationError> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| GenerationError::InvalidConfig(format!("year {year} out of range")))
}

/// Age in whole years on `reference` for someone born on `dob`.
pub fn age_on(dob: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - dob.year();
    if (reference.month(), reference.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn year_and_decade_windows_start_on_january_first() {
        let reference = date(2026, 10, 18);
        let year = DateWindow::this_year(reference).expect("year window");
        assert_eq!(year.start, date(2026, 1, 1));
        assert_eq!(year.end, reference);

        let decade = DateWindow::this_decade(reference).expect("decade window");
        assert_eq!(decade.start, date(2020, 1, 1));
    }

    #[test]
    fn birth_window_bounds_ages() {
        let reference = date(2026, 10, 18);
        let window = DateWindow::birth_dates(reference, 18, 80).expect("birth window");
        assert_eq!(age_on(window.end, reference), 18);
        assert_eq!(age_on(window.start, reference), 80);
        let day_before = window.start.pred_opt().expect("previous day");
        assert_eq!(age_on(day_before, reference), 81);
    }

    #[test]
    fn samples_stay_inside_window() {
        let window = DateWindow {
            start: date(2026, 1, 1),
            end: date(2026, 1, 3),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(window.contains(window.sample(&mut rng)));
        }
    }

    #[test]
    fn synthesized_text_is_not_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        assert!(!person_name(&mut rng).is_empty());
        assert!(email(&mut rng).contains('@'));
        assert!(!phone_number(&mut rng).is_empty());
        assert!(!company_name(&mut rng).is_empty());
        assert!(!word(&mut rng).contains(' '));
        assert!(!address_line(&mut rng).is_empty());
    }
}
