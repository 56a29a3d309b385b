//! # Technician Availability
//!
//! A technician offers availability in half-day slots: each calendar date
//! has a morning and an afternoon window that can be open or closed
//! independently. The [`AvailabilitySet`] holds every open day for one
//! technician and enforces the model's two invariants:
//!
//! - at most one record per date
//! - every stored record has at least one slot open (a day with both slots
//!   closed is never materialized, it is simply absent)
//!
//! Mutation goes through the toggle operations, which are pure in-memory
//! transformations. Persistence happens elsewhere as a whole-set replace.
//! Booked commitments live in [`super::event::ScheduledEvent`] and are never
//! merged into this set.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::FieldError;

/// One of the two half-day booking windows of a calendar date.
///
/// The mapping of clock times to these buckets is a display concern; the
/// model only knows the two names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Morning,
    Afternoon,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Morning => "morning",
            Slot::Afternoon => "afternoon",
        }
    }
}

impl FromStr for Slot {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Slot::Morning),
            "afternoon" => Ok(Slot::Afternoon),
            other => Err(FieldError::InvalidInput(format!(
                "Unknown slot name: {}. Must be 'morning' or 'afternoon'",
                other
            ))),
        }
    }
}

/// Open/closed state of the two slots of a single date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlots {
    pub morning: bool,
    pub afternoon: bool,
}

impl DaySlots {
    /// Both slots open.
    pub fn full() -> Self {
        Self {
            morning: true,
            afternoon: true,
        }
    }

    /// Only the given slot open.
    pub fn only(slot: Slot) -> Self {
        let mut slots = Self::default();
        slots.set(slot, true);
        slots
    }

    pub fn get(&self, slot: Slot) -> bool {
        match slot {
            Slot::Morning => self.morning,
            Slot::Afternoon => self.afternoon,
        }
    }

    pub fn set(&mut self, slot: Slot, value: bool) {
        match slot {
            Slot::Morning => self.morning = value,
            Slot::Afternoon => self.afternoon = value,
        }
    }

    /// True when at least one slot is open.
    pub fn any(&self) -> bool {
        self.morning || self.afternoon
    }
}

/// One calendar date's open state, as it travels over the wire.
///
/// `available` is derived from the slots and recomputed whenever a record is
/// built from them, so a stored record can never claim availability without
/// an open slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityDay {
    pub date: NaiveDate,
    pub available: bool,
    pub slots: DaySlots,
}

impl AvailabilityDay {
    pub fn new(date: NaiveDate, slots: DaySlots) -> Self {
        Self {
            date,
            available: slots.any(),
            slots,
        }
    }
}

/// Every open day of exactly one technician, keyed by date.
///
/// The set makes no ordering promise beyond one record per date; [`days`]
/// happens to yield chronological order because of the backing map, but
/// consumers that depend on order should sort for themselves.
///
/// [`days`]: AvailabilitySet::days
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilitySet {
    days: BTreeMap<NaiveDate, DaySlots>,
}

impl AvailabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from wire records, normalizing on the way in.
    ///
    /// Records with both slots closed are treated as absence and dropped,
    /// duplicate dates resolve last-wins, and the derived `available` flag
    /// of the input is ignored in favor of the slots themselves.
    pub fn from_days<I>(days: I) -> Self
    where
        I: IntoIterator<Item = AvailabilityDay>,
    {
        let mut map = BTreeMap::new();
        for day in days {
            if day.slots.any() {
                map.insert(day.date, day.slots);
            } else {
                map.remove(&day.date);
            }
        }
        Self { days: map }
    }

    /// Seeds the default forward-looking window for a technician with no
    /// stored data: the next `business_days` weekdays from `from`, every
    /// slot open. Weekends are skipped, not closed.
    pub fn default_window(from: NaiveDate, business_days: usize) -> Self {
        let mut days = BTreeMap::new();
        let mut date = from;
        while days.len() < business_days {
            if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                days.insert(date, DaySlots::full());
            }
            match date.succ_opt() {
                Some(next) => date = next,
                // End of the representable calendar
                None => break,
            }
        }
        Self { days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<DaySlots> {
        self.days.get(&date).copied()
    }

    /// The set as wire records, one per open day.
    pub fn days(&self) -> Vec<AvailabilityDay> {
        self.days
            .iter()
            .map(|(&date, &slots)| AvailabilityDay::new(date, slots))
            .collect()
    }

    /// Flips one slot of one date.
    ///
    /// A date with no record gains one with only that slot open. An open
    /// slot closes in place, and when that leaves both slots closed the
    /// record is removed entirely, collapsing the day back to absence.
    ///
    /// Any well-formed date is accepted. The engine has no notion of a
    /// displayed month or window; callers restrict interaction.
    pub fn toggle_slot(&mut self, date: NaiveDate, slot: Slot) {
        match self.days.get_mut(&date) {
            None => {
                self.days.insert(date, DaySlots::only(slot));
            }
            Some(slots) => {
                let opened = !slots.get(slot);
                slots.set(slot, opened);
                if !slots.any() {
                    self.days.remove(&date);
                }
            }
        }
    }

    /// Flips a whole date: any existing record is removed, an absent date
    /// gains a record with both slots open.
    ///
    /// Note the asymmetry with [`toggle_slot`]: starting from a single open
    /// slot, two day toggles end at both slots open rather than back at the
    /// single slot. That is the intended day-level behavior.
    ///
    /// [`toggle_slot`]: AvailabilitySet::toggle_slot
    pub fn toggle_day(&mut self, date: NaiveDate) {
        if self.days.remove(&date).is_none() {
            self.days.insert(date, DaySlots::full());
        }
    }

    /// True when the date has a record with at least one open slot.
    /// An absent date answers false, it is not an error.
    pub fn is_date_available(&self, date: NaiveDate) -> bool {
        self.days.get(&date).map(DaySlots::any).unwrap_or(false)
    }

    /// True when the date has a record and that specific slot is open.
    /// An absent date answers false, it is not an error.
    pub fn is_slot_available(&self, date: NaiveDate, slot: Slot) -> bool {
        self.days
            .get(&date)
            .map(|slots| slots.get(slot))
            .unwrap_or(false)
    }

    /// Number of distinct available dates within `[start, end]` inclusive.
    /// An inverted range counts zero days.
    pub fn count_available_days_in_range(&self, start: NaiveDate, end: NaiveDate) -> usize {
        if start > end {
            return 0;
        }
        self.days.range(start..=end).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAvailabilityResponse {
    pub technician_id: Uuid,
    pub days: Vec<AvailabilityDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAvailabilityRequest {
    #[serde(default)]
    pub days: Vec<AvailabilityDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAvailabilityResponse {
    pub technician_id: Uuid,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityCheckResponse {
    pub technician_id: Uuid,
    pub date: NaiveDate,
    pub slot: Option<Slot>,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountAvailableDaysResponse {
    pub technician_id: Uuid,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub available_days: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicianMatch {
    pub id: Uuid,
    pub name: String,
    pub available_days: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matches: Vec<TechnicianMatch>,
}
