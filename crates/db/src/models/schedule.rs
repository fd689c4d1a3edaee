use beautyboss_core::schedule::{DaySchedule, Weekday, WeeklySchedule};
use beautyboss_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `schedules` table: opening hours for one weekday.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScheduleEntry {
    pub id: DbId,
    pub owner_id: DbId,
    pub weekday: String,
    pub enabled: bool,
    pub start_time: String,
    pub end_time: String,
}

/// Rebuild a weekly schedule from stored rows. Rows with an unknown
/// weekday are skipped.
pub fn to_weekly_schedule(rows: &[ScheduleEntry]) -> WeeklySchedule {
    let days = rows
        .iter()
        .filter_map(|row| {
            let day = Weekday::from_str_db(&row.weekday).ok()?;
            Some((
                day,
                DaySchedule {
                    enabled: row.enabled,
                    start: row.start_time.clone(),
                    end: row.end_time.clone(),
                },
            ))
        })
        .collect();
    WeeklySchedule { days }
}
