//! Campaign scheduling model.
//!
//! The wizard only describes a schedule; the backend enacts it. Five
//! mutually exclusive schedule types, a shared recurrence sub-form for
//! the repeating ones, and two independent overlays (business hours,
//! smart timing) that can sit on any type.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use wam_core::{WamError, WamResult};

/// When the campaign goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleType {
    Immediate,
    Once,
    Daily,
    Weekly,
    Monthly,
    Custom,
}

/// Repeat cadence of the recurrence sub-form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecurrenceFrequency {
    Daily,
    Weekly,
    Monthly,
}

/// Weekday selection used by recurrence and business hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const WEEKDAYS: [DayOfWeek; 5] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
    ];

    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

/// Recurrence sub-form shared by daily/weekly/monthly schedules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    pub frequency: RecurrenceFrequency,
    /// Every n-th day/week/month; at least 1.
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default)]
    pub days_of_week: Vec<DayOfWeek>,
    #[serde(default)]
    pub end_date: Option<String>,
}

fn default_interval() -> u32 {
    1
}

/// Business-hours restriction overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHours {
    pub enabled: bool,
    /// "HH:MM"
    pub start_time: String,
    /// "HH:MM"
    pub end_time: String,
    pub days_of_week: Vec<DayOfWeek>,
}

/// Canned business-hours windows offered next to the custom form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BusinessHoursPreset {
    /// Mon–Fri 09:00–17:00
    Standard,
    /// Mon–Sat 08:00–20:00
    Extended,
    /// Mon–Fri 07:00–15:00
    EarlyShift,
    /// Every day 10:00–18:00
    EveryDay,
}

impl BusinessHours {
    pub fn preset(preset: BusinessHoursPreset) -> Self {
        match preset {
            BusinessHoursPreset::Standard => Self {
                enabled: true,
                start_time: "09:00".to_string(),
                end_time: "17:00".to_string(),
                days_of_week: DayOfWeek::WEEKDAYS.to_vec(),
            },
            BusinessHoursPreset::Extended => Self {
                enabled: true,
                start_time: "08:00".to_string(),
                end_time: "20:00".to_string(),
                days_of_week: {
                    let mut days = DayOfWeek::WEEKDAYS.to_vec();
                    days.push(DayOfWeek::Saturday);
                    days
                },
            },
            BusinessHoursPreset::EarlyShift => Self {
                enabled: true,
                start_time: "07:00".to_string(),
                end_time: "15:00".to_string(),
                days_of_week: DayOfWeek::WEEKDAYS.to_vec(),
            },
            BusinessHoursPreset::EveryDay => Self {
                enabled: true,
                start_time: "10:00".to_string(),
                end_time: "18:00".to_string(),
                days_of_week: DayOfWeek::ALL.to_vec(),
            },
        }
    }
}

/// Smart-timing overlay; the console only collects the preference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartTiming {
    pub enabled: bool,
    #[serde(default)]
    pub optimize_for_opens: bool,
    #[serde(default)]
    pub avoid_weekends: bool,
}

/// The complete schedule description sent to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleData {
    pub schedule_type: ScheduleType,
    /// "YYYY-MM-DD", passed through verbatim.
    #[serde(default)]
    pub send_date: Option<String>,
    /// "HH:MM", passed through verbatim.
    #[serde(default)]
    pub send_time: Option<String>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
    #[serde(default)]
    pub business_hours: Option<BusinessHours>,
    #[serde(default)]
    pub smart_timing: Option<SmartTiming>,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for ScheduleData {
    fn default() -> Self {
        Self {
            schedule_type: ScheduleType::Immediate,
            send_date: None,
            send_time: None,
            timezone: default_timezone(),
            recurrence: None,
            business_hours: None,
            smart_timing: None,
        }
    }
}

impl ScheduleData {
    /// Validate per schedule type. Overlays are always allowed.
    pub fn validate(&self) -> WamResult<()> {
        match self.schedule_type {
            ScheduleType::Immediate => Ok(()),
            ScheduleType::Once | ScheduleType::Custom => {
                self.require_date()?;
                self.require_time()?;
                self.require_timezone()
            }
            ScheduleType::Daily | ScheduleType::Monthly => {
                self.require_time()?;
                self.require_timezone()?;
                self.require_recurrence().map(|_| ())
            }
            ScheduleType::Weekly => {
                self.require_time()?;
                self.require_timezone()?;
                let recurrence = self.require_recurrence()?;
                if recurrence.days_of_week.is_empty() {
                    return Err(WamError::validation(
                        "Weekly schedules need at least one weekday",
                    ));
                }
                Ok(())
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn require_date(&self) -> WamResult<NaiveDate> {
        let date = self
            .send_date
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| WamError::validation("Send date is required"))?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| WamError::validation("Send date must be YYYY-MM-DD"))
    }

    fn require_time(&self) -> WamResult<()> {
        let time = self
            .send_time
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| WamError::validation("Send time is required"))?;
        chrono::NaiveTime::parse_from_str(time, "%H:%M")
            .map_err(|_| WamError::validation("Send time must be HH:MM"))?;
        Ok(())
    }

    fn require_timezone(&self) -> WamResult<()> {
        if self.timezone.trim().is_empty() {
            return Err(WamError::validation("Timezone is required"));
        }
        Ok(())
    }

    fn require_recurrence(&self) -> WamResult<&Recurrence> {
        let recurrence = self
            .recurrence
            .as_ref()
            .ok_or_else(|| WamError::validation("Recurrence settings are required"))?;
        if recurrence.interval == 0 {
            return Err(WamError::validation("Recurrence interval must be at least 1"));
        }
        Ok(recurrence)
    }

    /// Human summary shown on the schedule step and the final review.
    pub fn summary(&self) -> String {
        let time = self.send_time.as_deref().unwrap_or("--");
        match self.schedule_type {
            ScheduleType::Immediate => "Sends immediately on launch".to_string(),
            ScheduleType::Once | ScheduleType::Custom => match self.require_date() {
                Ok(date) => format!(
                    "Scheduled for: {} at {} ({})",
                    format_long_date(date),
                    time,
                    self.timezone
                ),
                Err(_) => "Schedule incomplete".to_string(),
            },
            ScheduleType::Daily => {
                let every = self.interval_phrase("day");
                format!("Repeats {} at {} ({})", every, time, self.timezone)
            }
            ScheduleType::Weekly => {
                let days = self
                    .recurrence
                    .as_ref()
                    .map(|r| {
                        r.days_of_week
                            .iter()
                            .map(|d| d.display_name())
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| "--".to_string());
                format!(
                    "Repeats {} on {} at {} ({})",
                    self.interval_phrase("week"),
                    days,
                    time,
                    self.timezone
                )
            }
            ScheduleType::Monthly => match self.require_date() {
                Ok(date) => format!(
                    "Repeats {} on the {} at {} ({})",
                    self.interval_phrase("month"),
                    ordinal_day(date.day()),
                    time,
                    self.timezone
                ),
                Err(_) => format!(
                    "Repeats {} at {} ({})",
                    self.interval_phrase("month"),
                    time,
                    self.timezone
                ),
            },
        }
    }

    fn interval_phrase(&self, unit: &str) -> String {
        let interval = self
            .recurrence
            .as_ref()
            .map(|r| r.interval.max(1))
            .unwrap_or(1);
        if interval == 1 {
            match unit {
                "day" => "daily".to_string(),
                "week" => "weekly".to_string(),
                _ => "monthly".to_string(),
            }
        } else {
            format!("every {} {}s", interval, unit)
        }
    }
}

/// "June 1st, 2024"
fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{} {}, {}",
        month_name(date.month()),
        ordinal_day(date.day()),
        date.year()
    )
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

/// 1 → "1st", 2 → "2nd", 11 → "11th", 22 → "22nd"
fn ordinal_day(day: u32) -> String {
    let suffix = match day % 100 {
        11 | 12 | 13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{}{}", day, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn once(date: &str, time: &str, tz: &str) -> ScheduleData {
        ScheduleData {
            schedule_type: ScheduleType::Once,
            send_date: Some(date.to_string()),
            send_time: Some(time.to_string()),
            timezone: tz.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_once_summary_exact_format() {
        let schedule = once("2024-06-01", "09:00", "UTC");
        assert_eq!(
            schedule.summary(),
            "Scheduled for: June 1st, 2024 at 09:00 (UTC)"
        );
    }

    #[test]
    fn test_ordinal_days() {
        assert_eq!(ordinal_day(1), "1st");
        assert_eq!(ordinal_day(2), "2nd");
        assert_eq!(ordinal_day(3), "3rd");
        assert_eq!(ordinal_day(4), "4th");
        assert_eq!(ordinal_day(11), "11th");
        assert_eq!(ordinal_day(12), "12th");
        assert_eq!(ordinal_day(13), "13th");
        assert_eq!(ordinal_day(21), "21st");
        assert_eq!(ordinal_day(22), "22nd");
        assert_eq!(ordinal_day(23), "23rd");
        assert_eq!(ordinal_day(31), "31st");
    }

    #[test]
    fn test_immediate_always_valid() {
        assert!(ScheduleData::default().is_valid());
    }

    #[test]
    fn test_once_requires_full_triple() {
        assert!(once("2024-06-01", "09:00", "UTC").is_valid());

        let mut missing_date = once("2024-06-01", "09:00", "UTC");
        missing_date.send_date = None;
        assert!(!missing_date.is_valid());

        let mut missing_time = once("2024-06-01", "09:00", "UTC");
        missing_time.send_time = None;
        assert!(!missing_time.is_valid());

        let mut blank_tz = once("2024-06-01", "09:00", "UTC");
        blank_tz.timezone = " ".to_string();
        assert!(!blank_tz.is_valid());
    }

    #[test]
    fn test_bad_date_formats_rejected() {
        assert!(!once("01/06/2024", "09:00", "UTC").is_valid());
        assert!(!once("2024-06-01", "9am", "UTC").is_valid());
    }

    #[test]
    fn test_weekly_needs_a_weekday() {
        let mut schedule = ScheduleData {
            schedule_type: ScheduleType::Weekly,
            send_time: Some("10:00".to_string()),
            recurrence: Some(Recurrence {
                frequency: RecurrenceFrequency::Weekly,
                interval: 1,
                days_of_week: vec![],
                end_date: None,
            }),
            ..Default::default()
        };
        assert!(!schedule.is_valid());

        schedule.recurrence.as_mut().unwrap().days_of_week = vec![DayOfWeek::Monday];
        assert!(schedule.is_valid());
    }

    #[test]
    fn test_weekly_summary_lists_days() {
        let schedule = ScheduleData {
            schedule_type: ScheduleType::Weekly,
            send_time: Some("10:00".to_string()),
            recurrence: Some(Recurrence {
                frequency: RecurrenceFrequency::Weekly,
                interval: 1,
                days_of_week: vec![DayOfWeek::Monday, DayOfWeek::Wednesday],
                end_date: None,
            }),
            ..Default::default()
        };
        assert_eq!(
            schedule.summary(),
            "Repeats weekly on Monday, Wednesday at 10:00 (UTC)"
        );
    }

    #[test]
    fn test_interval_phrase_pluralises() {
        let schedule = ScheduleData {
            schedule_type: ScheduleType::Daily,
            send_time: Some("08:00".to_string()),
            recurrence: Some(Recurrence {
                frequency: RecurrenceFrequency::Daily,
                interval: 2,
                days_of_week: vec![],
                end_date: None,
            }),
            ..Default::default()
        };
        assert_eq!(schedule.summary(), "Repeats every 2 days at 08:00 (UTC)");
    }

    #[test]
    fn test_overlays_valid_on_any_type() {
        let mut schedule = ScheduleData::default();
        schedule.business_hours = Some(BusinessHours::preset(BusinessHoursPreset::Standard));
        schedule.smart_timing = Some(SmartTiming {
            enabled: true,
            optimize_for_opens: true,
            avoid_weekends: true,
        });
        assert!(schedule.is_valid());
    }

    #[test]
    fn test_presets() {
        let standard = BusinessHours::preset(BusinessHoursPreset::Standard);
        assert_eq!(standard.start_time, "09:00");
        assert_eq!(standard.days_of_week.len(), 5);

        let extended = BusinessHours::preset(BusinessHoursPreset::Extended);
        assert_eq!(extended.days_of_week.len(), 6);

        let every_day = BusinessHours::preset(BusinessHoursPreset::EveryDay);
        assert_eq!(every_day.days_of_week.len(), 7);
    }

    #[test]
    fn test_schedule_serializes_verbatim_fields() {
        let schedule = once("2024-06-01", "09:00", "UTC");
        let v = serde_json::to_value(&schedule).unwrap();
        assert_eq!(v["sendDate"], "2024-06-01");
        assert_eq!(v["sendTime"], "09:00");
        assert_eq!(v["timezone"], "UTC");
        assert_eq!(v["scheduleType"], "once");
    }
}
