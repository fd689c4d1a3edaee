//! Weekly availability grid configured during onboarding.
//!
//! Each weekday carries an `enabled` flag and a start/end time string
//! (`HH:MM`). Disabling a day keeps its hours so re-enabling restores them.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Weekday
// ---------------------------------------------------------------------------

/// Day of the week, ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// All weekdays, Monday first.
pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

impl Weekday {
    /// Parse a weekday key (`"monday"` .. `"sunday"`).
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        ALL_WEEKDAYS
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid weekday '{s}'")))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Monday => "Segunda-feira",
            Self::Tuesday => "Terça-feira",
            Self::Wednesday => "Quarta-feira",
            Self::Thursday => "Quinta-feira",
            Self::Friday => "Sexta-feira",
            Self::Saturday => "Sábado",
            Self::Sunday => "Domingo",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

// ---------------------------------------------------------------------------
// Time strings
// ---------------------------------------------------------------------------

/// Check that `value` is a zero-padded 24h `HH:MM` time.
pub fn validate_time_of_day(value: &str) -> Result<(), CoreError> {
    if value.len() == 5 && NaiveTime::parse_from_str(value, "%H:%M").is_ok() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid time '{value}'. Expected HH:MM"
        )))
    }
}

/// First hour offered in the schedule pickers.
pub const FIRST_SLOT_HOUR: u32 = 7;

/// Number of whole-hour options in the schedule pickers (07:00 through 20:00).
pub const SLOT_COUNT: u32 = 14;

/// One option of the schedule hour picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlotOption {
    pub value: String,
    pub label: String,
}

fn slot_option(hour: u32) -> TimeSlotOption {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let mut label = format!("{hour}:00 {suffix}");
    if hour == 12 {
        label.push_str(" (meio-dia)");
    }
    TimeSlotOption {
        value: format!("{hour:02}:00"),
        label,
    }
}

/// Hour options for the opening-time picker (the last hour is excluded).
pub fn start_time_options() -> Vec<TimeSlotOption> {
    (FIRST_SLOT_HOUR..FIRST_SLOT_HOUR + SLOT_COUNT - 1)
        .map(slot_option)
        .collect()
}

/// Hour options for the closing-time picker (the first hour is excluded).
pub fn end_time_options() -> Vec<TimeSlotOption> {
    (FIRST_SLOT_HOUR + 1..FIRST_SLOT_HOUR + SLOT_COUNT)
        .map(slot_option)
        .collect()
}

// ---------------------------------------------------------------------------
// Weekly schedule
// ---------------------------------------------------------------------------

/// Opening hours for a single weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub enabled: bool,
    pub start: String,
    pub end: String,
}

impl DaySchedule {
    fn new(enabled: bool, start: &str, end: &str) -> Self {
        Self {
            enabled,
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

/// Availability for every weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub days: BTreeMap<Weekday, DaySchedule>,
}

impl Default for WeeklySchedule {
    /// Weekdays 09:00-18:00, Saturday 09:00-14:00, Sunday closed.
    fn default() -> Self {
        let days = ALL_WEEKDAYS
            .into_iter()
            .map(|day| {
                let hours = match day {
                    Weekday::Saturday => DaySchedule::new(true, "09:00", "14:00"),
                    Weekday::Sunday => DaySchedule::new(false, "09:00", "18:00"),
                    _ => DaySchedule::new(true, "09:00", "18:00"),
                };
                (day, hours)
            })
            .collect();
        Self { days }
    }
}

impl WeeklySchedule {
    /// Hours for `day`, falling back to a closed 09:00-18:00 entry when a
    /// deserialized schedule omitted it.
    pub fn day(&self, day: Weekday) -> DaySchedule {
        self.days
            .get(&day)
            .cloned()
            .unwrap_or_else(|| DaySchedule::new(false, "09:00", "18:00"))
    }

    /// Overwrite all three fields for `day`.
    pub fn set(
        &mut self,
        day: Weekday,
        enabled: bool,
        start: &str,
        end: &str,
    ) -> Result<(), CoreError> {
        validate_time_of_day(start)?;
        validate_time_of_day(end)?;
        self.days.insert(day, DaySchedule::new(enabled, start, end));
        Ok(())
    }

    /// Flip only the enabled flag; stored hours are left untouched.
    pub fn set_enabled(&mut self, day: Weekday, enabled: bool) {
        let mut entry = self.day(day);
        entry.enabled = enabled;
        self.days.insert(day, entry);
    }

    /// Entries for all seven days, Monday first.
    pub fn entries(&self) -> Vec<(Weekday, DaySchedule)> {
        ALL_WEEKDAYS.into_iter().map(|d| (d, self.day(d))).collect()
    }

    /// Whether customers can book on `day`.
    pub fn is_open(&self, day: Weekday) -> bool {
        self.day(day).enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_matches_business_hours() {
        let schedule = WeeklySchedule::default();
        assert_eq!(schedule.days.len(), 7);
        assert_eq!(
            schedule.day(Weekday::Monday),
            DaySchedule::new(true, "09:00", "18:00")
        );
        assert_eq!(
            schedule.day(Weekday::Saturday),
            DaySchedule::new(true, "09:00", "14:00")
        );
        assert!(!schedule.is_open(Weekday::Sunday));
    }

    #[test]
    fn disabling_keeps_hours_for_every_day() {
        let mut schedule = WeeklySchedule::default();
        for day in ALL_WEEKDAYS {
            schedule.set(day, true, "10:00", "16:00").unwrap();
            schedule.set_enabled(day, false);
            let entry = schedule.day(day);
            assert!(!entry.enabled);
            assert_eq!(entry.start, "10:00");
            assert_eq!(entry.end, "16:00");

            schedule.set_enabled(day, true);
            assert_eq!(schedule.day(day).start, "10:00");
        }
    }

    #[test]
    fn set_rejects_malformed_times() {
        let mut schedule = WeeklySchedule::default();
        assert!(schedule.set(Weekday::Monday, true, "9:00", "18:00").is_err());
        assert!(schedule.set(Weekday::Monday, true, "09:00", "25:00").is_err());
        assert!(schedule.set(Weekday::Monday, true, "09:00", "noon").is_err());
        assert_eq!(schedule.day(Weekday::Monday).start, "09:00");
    }

    #[test]
    fn map_keys_serialize_as_weekday_names() {
        let json = serde_json::to_value(WeeklySchedule::default()).unwrap();
        assert_eq!(json["days"]["sunday"]["enabled"], false);
        assert_eq!(json["days"]["saturday"]["end"], "14:00");
    }

    #[test]
    fn picker_options_are_offset_by_one_hour() {
        let starts = start_time_options();
        let ends = end_time_options();
        assert_eq!(starts.len(), 13);
        assert_eq!(ends.len(), 13);
        assert_eq!(starts.first().unwrap().value, "07:00");
        assert_eq!(starts.last().unwrap().value, "19:00");
        assert_eq!(ends.first().unwrap().value, "08:00");
        assert_eq!(ends.last().unwrap().value, "20:00");
        assert!(starts.iter().any(|o| o.label == "12:00 PM (meio-dia)"));
    }

    #[test]
    fn weekday_from_chrono() {
        assert_eq!(Weekday::from(chrono::Weekday::Sun), Weekday::Sunday);
        assert_eq!(Weekday::from_str_db("friday").unwrap(), Weekday::Friday);
        assert!(Weekday::from_str_db("funday").is_err());
    }
}
