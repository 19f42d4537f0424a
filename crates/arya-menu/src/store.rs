//! Menu lookup service over a pluggable backing store.
//!
//! [`MenuSource`] is the narrow interface to wherever the menu rows
//! actually live; [`SqliteMenuSource`] is the production implementation.
//! [`MenuService`] layers week ordering, not-found handling, and the
//! current-menu answer on top.

use std::sync::Arc;

use chrono::{DateTime, Datelike, TimeZone};
use rusqlite::Row;
use tracing::debug;

use arya_core::error::AryaError;
use arya_core::types::{is_off, DayOfWeek, MealSlot, MenuEntry};

use crate::db::Database;
use crate::format;

/// Read access to the menu rows.
///
/// Implementations may fail with a connection/availability condition;
/// callers decide whether that becomes a user-facing apology.
pub trait MenuSource: Send + Sync {
    /// Fetch the entry for one day, if present.
    fn get_by_day(&self, day: DayOfWeek) -> Result<Option<MenuEntry>, AryaError>;

    /// Fetch every stored entry, in no particular order.
    fn get_all(&self) -> Result<Vec<MenuEntry>, AryaError>;
}

// =============================================================================
// SqliteMenuSource
// =============================================================================

/// SQLite-backed menu source.
pub struct SqliteMenuSource {
    db: Arc<Database>,
}

impl SqliteMenuSource {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert or replace one day's entry. Used by provisioning and tests.
    pub fn upsert(&self, entry: &MenuEntry) -> Result<(), AryaError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO menu (day_of_week, morning_menu, evening_menu, night_menu, dessert)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(day_of_week) DO UPDATE SET
                     morning_menu = excluded.morning_menu,
                     evening_menu = excluded.evening_menu,
                     night_menu = excluded.night_menu,
                     dessert = excluded.dessert",
                rusqlite::params![
                    entry.day_of_week.name(),
                    entry.morning_menu,
                    entry.evening_menu,
                    entry.night_menu,
                    entry.dessert,
                ],
            )
            .map_err(|e| AryaError::MenuUnavailable(format!("Failed to upsert menu row: {}", e)))?;
            Ok(())
        })
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<MenuEntry> {
    let day_name: String = row.get(0)?;
    let day = DayOfWeek::from_token(&day_name).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            format!("unknown day_of_week: {}", day_name).into(),
        )
    })?;
    Ok(MenuEntry {
        day_of_week: day,
        morning_menu: row.get(1)?,
        evening_menu: row.get(2)?,
        night_menu: row.get(3)?,
        dessert: row.get(4)?,
    })
}

impl MenuSource for SqliteMenuSource {
    fn get_by_day(&self, day: DayOfWeek) -> Result<Option<MenuEntry>, AryaError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT day_of_week, morning_menu, evening_menu, night_menu, dessert
                     FROM menu WHERE day_of_week = ?1",
                )
                .map_err(|e| AryaError::MenuUnavailable(e.to_string()))?;
            let mut rows = stmt
                .query_map([day.name()], entry_from_row)
                .map_err(|e| AryaError::MenuUnavailable(e.to_string()))?;
            match rows.next() {
                Some(Ok(entry)) => Ok(Some(entry)),
                Some(Err(e)) => Err(AryaError::MenuUnavailable(e.to_string())),
                None => Ok(None),
            }
        })
    }

    fn get_all(&self) -> Result<Vec<MenuEntry>, AryaError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT day_of_week, morning_menu, evening_menu, night_menu, dessert
                     FROM menu",
                )
                .map_err(|e| AryaError::MenuUnavailable(e.to_string()))?;
            let rows = stmt
                .query_map([], entry_from_row)
                .map_err(|e| AryaError::MenuUnavailable(e.to_string()))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| AryaError::MenuUnavailable(e.to_string()))
        })
    }
}

// =============================================================================
// MenuService
// =============================================================================

/// Menu lookups with week ordering and current-slot resolution.
pub struct MenuService {
    source: Arc<dyn MenuSource>,
}

impl MenuService {
    pub fn new(source: Arc<dyn MenuSource>) -> Self {
        Self { source }
    }

    /// Entry for one day; `MenuNotFound` when no row exists.
    pub fn get_day(&self, day: DayOfWeek) -> Result<MenuEntry, AryaError> {
        debug!("Fetching menu for {}", day);
        self.source
            .get_by_day(day)?
            .ok_or_else(|| AryaError::MenuNotFound(day.name().to_string()))
    }

    /// All seven entries in Sunday-first order.
    ///
    /// An incomplete week counts as the store being unavailable, since
    /// weekly output must always have exactly seven blocks.
    pub fn get_week(&self) -> Result<Vec<MenuEntry>, AryaError> {
        let rows = self.source.get_all()?;
        let mut week = Vec::with_capacity(7);
        for day in DayOfWeek::WEEK {
            let entry = rows
                .iter()
                .find(|e| e.day_of_week == day)
                .cloned()
                .ok_or_else(|| {
                    AryaError::MenuUnavailable(format!("menu data incomplete: missing {}", day))
                })?;
            week.push(entry);
        }
        Ok(week)
    }

    /// The answer for "what's the menu right now": resolves the day and
    /// serving window from the clock and formats that slot.
    pub fn current_menu<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<String, AryaError>
    where
        Tz::Offset: std::fmt::Display,
    {
        let day = DayOfWeek::from_weekday(now.weekday());
        let slot = MealSlot::at(now);
        debug!("Current menu lookup: day={} slot={:?}", day, slot);
        let entry = self.get_day(day)?;

        let mut lines = vec![
            format!("Current time: {}", now.format("%I:%M %p")),
            format!("{}'s menu", day),
            String::new(),
        ];
        let value = entry.slot(slot);
        if is_off(value) {
            lines.push(format!("{} is not available on {}.", slot.label(), day));
        } else {
            lines.push(format!("{}: {}", slot.label(), value));
        }
        // Dessert accompanies lunch and dinner only.
        if !is_off(&entry.dessert) && matches!(slot, MealSlot::Evening | MealSlot::Night) {
            lines.push(format!("Dessert: {}", entry.dessert));
        }
        Ok(lines.join("\n"))
    }

    /// Formatted full-week answer.
    pub fn week_menu(&self) -> Result<String, AryaError> {
        let week = self.get_week()?;
        Ok(format::format_week(&week))
    }
}

// =============================================================================
// Tests
// =============================================================================
