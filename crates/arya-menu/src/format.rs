//! Menu text formatting.
//!
//! All user-facing menu strings are produced here. The literal `"OFF"`
//! marker never appears in output; closed slots render as "not
//! available" (single-day view) or "closed" (weekly view).

use arya_core::types::{is_off, MealSlot, MenuEntry};

/// A requestable part of a day's menu: one of the three serving windows
/// or the dessert line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuSection {
    Morning,
    Evening,
    Night,
    Dessert,
}

impl From<MealSlot> for MenuSection {
    fn from(slot: MealSlot) -> Self {
        match slot {
            MealSlot::Morning => MenuSection::Morning,
            MealSlot::Evening => MenuSection::Evening,
            MealSlot::Night => MenuSection::Night,
        }
    }
}

impl MenuSection {
    pub fn label(&self) -> &'static str {
        match self {
            MenuSection::Morning => "Breakfast",
            MenuSection::Evening => "Lunch",
            MenuSection::Night => "Dinner",
            MenuSection::Dessert => "Dessert",
        }
    }

    fn value<'a>(&self, entry: &'a MenuEntry) -> &'a str {
        match self {
            MenuSection::Morning => &entry.morning_menu,
            MenuSection::Evening => &entry.evening_menu,
            MenuSection::Night => &entry.night_menu,
            MenuSection::Dessert => &entry.dessert,
        }
    }
}

/// One section of one day's menu.
pub fn format_section(entry: &MenuEntry, section: MenuSection) -> String {
    let value = section.value(entry);
    if is_off(value) {
        format!(
            "{} is not available on {}.",
            section.label(),
            entry.day_of_week
        )
    } else {
        format!("{} {}: {}", entry.day_of_week, section.label(), value)
    }
}

/// A single day's menu: one section when `meal` is given, otherwise all
/// three serving windows plus dessert (dessert omitted when off).
pub fn format_single(entry: &MenuEntry, meal: Option<MealSlot>) -> String {
    if let Some(slot) = meal {
        return format_section(entry, slot.into());
    }

    let mut lines = vec![format!("{} menu:", entry.day_of_week)];
    for section in [MenuSection::Morning, MenuSection::Evening, MenuSection::Night] {
        let value = section.value(entry);
        if is_off(value) {
            lines.push(format!("{}: not available", section.label()));
        } else {
            lines.push(format!("{}: {}", section.label(), value));
        }
    }
    if !is_off(&entry.dessert) {
        lines.push(format!("Dessert: {}", entry.dessert));
    }
    lines.join("\n")
}

/// The full week, one block per day in the order given.
///
/// Callers pass entries already in Sunday-first order; closed slots
/// render as "closed" and the dessert line is omitted when off.
pub fn format_week(entries: &[MenuEntry]) -> String {
    let blocks: Vec<String> = entries
        .iter()
        .map(|entry| {
            let mut lines = vec![entry.day_of_week.to_string()];
            for section in [MenuSection::Morning, MenuSection::Evening, MenuSection::Night] {
                let value = section.value(entry);
                if is_off(value) {
                    lines.push(format!("  {}: closed", section.label()));
                } else {
                    lines.push(format!("  {}: {}", section.label(), value));
                }
            }
            if !is_off(&entry.dessert) {
                lines.push(format!("  Dessert: {}", entry.dessert));
            }
            lines.join("\n")
        })
        .collect();
    blocks.join("\n\n")
}

// =============================================================================
// Tests
// =============================================================================
