use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::page_client::BookingPageClient;
use crate::scan_types::ScanError;

/// Outcome of one poll cycle, relative to the previously known
/// earliest date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollResult {
    /// The earliest available date is the same as last time (or there
    /// is still nothing available).
    Unchanged,
    /// A strictly earlier date appeared, or a date appeared where none
    /// was known before.
    NewEarliest {
        /// The newly observed earliest date.
        date: NaiveDate,
    },
    /// The previously known earliest date is gone: someone booked it.
    Booked {
        /// The date that was known before this cycle.
        old_date: NaiveDate,
        /// The next best date, if any slot is still available.
        new_date: Option<NaiveDate>,
    },
}

impl PollResult {
    /// The earliest date the caller should remember after this cycle.
    ///
    /// Only meaningful for non-`Unchanged` results; `Unchanged` keeps
    /// whatever was known before.
    pub fn observed_earliest(&self) -> Option<NaiveDate> {
        match *self {
            PollResult::Unchanged => None,
            PollResult::NewEarliest { date } => Some(date),
            PollResult::Booked { new_date, .. } => new_date,
        }
    }
}

/// Classify a freshly observed earliest date against the previously
/// known one.
///
/// Pure and total: no I/O, no clock, defined for every input pair.
pub fn classify(candidate: Option<NaiveDate>, known: Option<NaiveDate>) -> PollResult {
    match (known, candidate) {
        (None, None) => PollResult::Unchanged,
        (None, Some(date)) => PollResult::NewEarliest { date },
        (Some(old_date), None) => PollResult::Booked {
            old_date,
            new_date: None,
        },
        (Some(known), Some(candidate)) => match candidate.cmp(&known) {
            Ordering::Less => PollResult::NewEarliest { date: candidate },
            Ordering::Greater => PollResult::Booked {
                old_date: known,
                new_date: Some(candidate),
            },
            Ordering::Equal => PollResult::Unchanged,
        },
    }
}

/// Run one poll cycle: fetch the slot listing and classify its earliest
/// date against `known_earliest`.
pub async fn poll(
    client: &BookingPageClient,
    known_earliest: Option<NaiveDate>,
) -> Result<PollResult, ScanError> {
    let dates = client.fetch_available_dates().await?;
    Ok(classify(dates.first().copied(), known_earliest))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Arbitrary day within a ~270-year window around the epoch.
    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (680_000i32..780_000).prop_map(|days| {
            NaiveDate::from_num_days_from_ce_opt(days).unwrap()
        })
    }

    #[test]
    fn nothing_known_nothing_seen_is_unchanged() {
        assert_eq!(classify(None, None), PollResult::Unchanged);
    }

    #[test]
    fn first_observation_is_a_new_earliest() {
        let d = date(2024, 4, 20);
        assert_eq!(classify(Some(d), None), PollResult::NewEarliest { date: d });
    }

    #[test]
    fn known_date_disappearing_means_booked_without_replacement() {
        let known = date(2024, 5, 1);
        assert_eq!(
            classify(None, Some(known)),
            PollResult::Booked {
                old_date: known,
                new_date: None,
            }
        );
    }

    #[test]
    fn strictly_earlier_candidate_is_a_new_earliest() {
        let known = date(2024, 5, 1);
        let candidate = date(2024, 4, 20);
        assert_eq!(
            classify(Some(candidate), Some(known)),
            PollResult::NewEarliest { date: candidate }
        );
    }

    #[test]
    fn strictly_later_candidate_means_booked_with_replacement() {
        let known = date(2024, 5, 1);
        let candidate = date(2024, 5, 14);
        assert_eq!(
            classify(Some(candidate), Some(known)),
            PollResult::Booked {
                old_date: known,
                new_date: Some(candidate),
            }
        );
    }

    #[test]
    fn alert_is_not_repeated_once_the_new_date_is_known() {
        let known = date(2024, 5, 1);
        let candidate = date(2024, 4, 20);

        let first = classify(Some(candidate), Some(known));
        assert_eq!(first, PollResult::NewEarliest { date: candidate });

        // The driver records the new date; the same observation again
        // must not alert a second time.
        let second = classify(Some(candidate), first.observed_earliest());
        assert_eq!(second, PollResult::Unchanged);
    }

    #[test]
    fn observed_earliest_clears_on_booked_without_replacement() {
        let result = classify(None, Some(date(2024, 5, 1)));
        assert_eq!(result.observed_earliest(), None);
    }

    proptest! {
        #[test]
        fn same_date_never_alerts(d in any_date()) {
            prop_assert_eq!(classify(Some(d), Some(d)), PollResult::Unchanged);
        }

        #[test]
        fn classification_follows_date_ordering(
            candidate in any_date(),
            known in any_date(),
        ) {
            let expected = match candidate.cmp(&known) {
                std::cmp::Ordering::Less => PollResult::NewEarliest { date: candidate },
                std::cmp::Ordering::Greater => PollResult::Booked {
                    old_date: known,
                    new_date: Some(candidate),
                },
                std::cmp::Ordering::Equal => PollResult::Unchanged,
            };
            prop_assert_eq!(classify(Some(candidate), Some(known)), expected);
        }
    }
}
