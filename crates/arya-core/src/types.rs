use std::path::PathBuf;

use chrono::{DateTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marker value in menu data meaning a slot is not served that day.
pub const MENU_OFF: &str = "OFF";

// =============================================================================
// Enums
// =============================================================================

/// Day of the week, Sunday-first to match the mess-menu week layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// All days in Sunday-first order. This is the canonical iteration
    /// order for weekly listings and for tie-breaking in text scans.
    pub const WEEK: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// English name, capitalized ("Sunday").
    pub fn name(&self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }

    /// Parse a single word as a day name, case-insensitively.
    ///
    /// Only full day names are accepted ("friday", not "fri").
    pub fn from_token(word: &str) -> Option<DayOfWeek> {
        Self::WEEK
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(word))
    }

    /// Convert from a chrono weekday.
    pub fn from_weekday(wd: Weekday) -> DayOfWeek {
        match wd {
            Weekday::Sun => DayOfWeek::Sunday,
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the three daily serving windows in the mess.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// Breakfast, served 5:00-10:59.
    Morning,
    /// Lunch, served 11:00-16:59.
    Evening,
    /// Dinner, served 17:00-23:59.
    Night,
}

impl MealSlot {
    /// Map an hour of day (0-23) to the active serving window.
    ///
    /// Total: hours outside every window (0-4) default to Morning, so
    /// this never fails.
    pub fn for_hour(hour: u32) -> MealSlot {
        match hour {
            5..=10 => MealSlot::Morning,
            11..=16 => MealSlot::Evening,
            17..=23 => MealSlot::Night,
            _ => MealSlot::Morning,
        }
    }

    /// The serving window active at the given instant.
    pub fn at<Tz: chrono::TimeZone>(now: &DateTime<Tz>) -> MealSlot {
        Self::for_hour(now.hour())
    }

    /// Meal label shown to users ("Breakfast", "Lunch", "Dinner").
    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Morning => "Breakfast",
            MealSlot::Evening => "Lunch",
            MealSlot::Night => "Dinner",
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// One day's mess menu. `day_of_week` is the unique key; any menu field
/// may hold the literal `"OFF"` meaning that slot is closed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub day_of_week: DayOfWeek,
    pub morning_menu: String,
    pub evening_menu: String,
    pub night_menu: String,
    pub dessert: String,
}

impl MenuEntry {
    /// Menu text for a serving window.
    pub fn slot(&self, slot: MealSlot) -> &str {
        match slot {
            MealSlot::Morning => &self.morning_menu,
            MealSlot::Evening => &self.evening_menu,
            MealSlot::Night => &self.night_menu,
        }
    }
}

/// True when a menu value is the closed marker.
pub fn is_off(value: &str) -> bool {
    value == MENU_OFF
}

/// One question-answer exchange, as stored in conversation history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    /// Photo paths attached to the answer, in the order they were found.
    pub photos: Vec<PathBuf>,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    /// Create a turn stamped with the current time.
    pub fn new(question: impl Into<String>, answer: impl Into<String>, photos: Vec<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4(),
            question: question.into(),
            answer: answer.into(),
            photos,
            timestamp: Utc::now(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
