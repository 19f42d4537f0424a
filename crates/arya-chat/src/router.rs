//! Intent routing: the decision core of the assistant.
//!
//! Each question is tried against the handlers in a fixed order: menu
//! intent, then photo intent, then the QA fallback. The first handler
//! to claim the question wins and later ones are not consulted; this
//! lets the cheap structured lookups short-circuit the expensive
//! external QA call.

use std::path::PathBuf;
use std::sync::{LazyLock, Mutex};

use chrono::Local;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, error, warn};

use arya_core::config::ChatConfig;
use arya_core::error::AryaError;
use arya_core::types::{ChatTurn, DayOfWeek};
use arya_menu::format::{format_section, format_single, MenuSection};
use arya_menu::store::MenuService;
use arya_photos::PhotoIndex;

use crate::cache::ResponseCache;
use crate::error::ChatError;
use crate::history::HistoryManager;
use crate::qa::QaBackend;

/// Phrasings that mean "the menu being served right now".
const CURRENT_MENU_PHRASES: &[&str] = &[
    "current menu",
    "today's menu",
    "todays menu",
    "what's for",
    "whats for",
    "mess menu",
    "food",
];

/// Words that mark a question as a photo request.
const PHOTO_KEYWORDS: &[&str] = &["photo", "picture", "image", "pic", "show me", "look", "view"];

/// Words that fall back to the whole photo tree when no category matched.
const HOSTEL_KEYWORDS: &[&str] = &["hostel", "building", "campus"];

/// Meal-name synonyms, in fixed precedence order. Anything not listed
/// here is not a meal token.
const MEAL_SYNONYMS: &[(&str, MenuSection)] = &[
    ("breakfast", MenuSection::Morning),
    ("morning", MenuSection::Morning),
    ("lunch", MenuSection::Evening),
    ("evening", MenuSection::Evening),
    ("dinner", MenuSection::Night),
    ("night", MenuSection::Night),
    ("dessert", MenuSection::Dessert),
];

static WEEKLY_MENU_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"week(ly)?\s*menu").expect("Invalid weekly menu regex"));

const MENU_UNAVAILABLE: &str = "Sorry, I couldn't retrieve the menu at the moment.";
const NO_PHOTOS: &str = "Sorry, I couldn't find any relevant photos.";
const QA_FAILED: &str = "Sorry, there was an error getting a response. Please try again.";

// =============================================================================
// Reply
// =============================================================================

/// Which handler produced an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Menu,
    Photo,
    Qa,
}

/// A routed answer: text plus any photo paths for the surface to render.
#[derive(Clone, Debug, Serialize)]
pub struct Reply {
    pub intent: Intent,
    pub answer: String,
    pub photos: Vec<PathBuf>,
}

impl Reply {
    fn text(intent: Intent, answer: impl Into<String>) -> Self {
        Self {
            intent,
            answer: answer.into(),
            photos: Vec::new(),
        }
    }
}

// =============================================================================
// IntentRouter
// =============================================================================

/// Routes questions to the menu store, the photo index, or the QA
/// fallback, and keeps the bounded response cache and conversation
/// history.
///
/// A router is fully wired at construction: it cannot exist without its
/// menu service, photo index, and QA backend, so there is no
/// "used before setup" state to guard against.
pub struct IntentRouter {
    menu: MenuService,
    photos: PhotoIndex,
    qa: Box<dyn QaBackend>,
    cache: Mutex<ResponseCache>,
    history: Mutex<HistoryManager>,
    max_question_chars: usize,
}

/// Two-phase construction for [`IntentRouter`]: dependencies up front,
/// tuning optional.
pub struct RouterBuilder {
    menu: MenuService,
    photos: PhotoIndex,
    qa: Box<dyn QaBackend>,
    config: ChatConfig,
}

impl RouterBuilder {
    pub fn config(mut self, config: ChatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> IntentRouter {
        IntentRouter {
            menu: self.menu,
            photos: self.photos,
            qa: self.qa,
            cache: Mutex::new(ResponseCache::new(
                self.config.cache_capacity,
                self.config.cache_ttl_secs,
            )),
            history: Mutex::new(HistoryManager::new(self.config.history_max_turns)),
            max_question_chars: self.config.max_question_chars,
        }
    }
}

impl IntentRouter {
    /// Start building a router from its three required collaborators.
    pub fn builder(
        menu: MenuService,
        photos: PhotoIndex,
        qa: Box<dyn QaBackend>,
    ) -> RouterBuilder {
        RouterBuilder {
            menu,
            photos,
            qa,
            config: ChatConfig::default(),
        }
    }

    /// Route one question to an answer and record the turn in history.
    ///
    /// Menu and photo handling are deterministic and never fail; backend
    /// outages surface as apology text, not errors. The only error
    /// returns are caller misuse (empty / oversized question) and
    /// poisoned internal locks.
    pub fn route(&self, question: &str) -> Result<Reply, ChatError> {
        let trimmed = question.trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyQuestion);
        }
        if trimmed.chars().count() > self.max_question_chars {
            return Err(ChatError::QuestionTooLong(self.max_question_chars));
        }

        let lower = trimmed.to_lowercase();
        debug!("Routing question: {:?}", trimmed);

        let reply = if let Some(answer) = self.try_menu(&lower) {
            Reply::text(Intent::Menu, answer)
        } else if let Some(reply) = self.try_photos(&lower) {
            reply
        } else {
            self.qa_answer(trimmed)?
        };

        let mut history = self
            .history
            .lock()
            .map_err(|e| ChatError::State(format!("history lock poisoned: {}", e)))?;
        history.append(ChatTurn::new(trimmed, reply.answer.clone(), reply.photos.clone()));

        Ok(reply)
    }

    /// Snapshot of the conversation history, oldest first.
    pub fn history(&self) -> Result<Vec<ChatTurn>, ChatError> {
        let history = self
            .history
            .lock()
            .map_err(|e| ChatError::State(format!("history lock poisoned: {}", e)))?;
        Ok(history.turns().cloned().collect())
    }

    /// The last `n` turns, most recent first.
    pub fn recent_history(&self, n: usize) -> Result<Vec<ChatTurn>, ChatError> {
        let history = self
            .history
            .lock()
            .map_err(|e| ChatError::State(format!("history lock poisoned: {}", e)))?;
        Ok(history.recent(n).into_iter().cloned().collect())
    }

    /// Empty the history and invalidate the whole cache together. Both
    /// locks are held until both are cleared, so no stale cached answer
    /// is visible after this returns.
    pub fn clear_history(&self) -> Result<(), ChatError> {
        let mut history = self
            .history
            .lock()
            .map_err(|e| ChatError::State(format!("history lock poisoned: {}", e)))?;
        let mut cache = self
            .cache
            .lock()
            .map_err(|e| ChatError::State(format!("cache lock poisoned: {}", e)))?;
        history.clear();
        cache.clear();
        Ok(())
    }

    // -----------------------------------------------------------------
    // Step 1: menu intent
    // -----------------------------------------------------------------

    fn try_menu(&self, lower: &str) -> Option<String> {
        if CURRENT_MENU_PHRASES.iter().any(|p| lower.contains(p)) {
            let now = Local::now();
            return Some(self.menu_or_apology(lower, self.menu.current_menu(&now)));
        }

        if WEEKLY_MENU_RE.is_match(lower) {
            return Some(self.menu_or_apology(lower, self.menu.week_menu()));
        }

        // Day-specific query: a full-word day name is required, a meal
        // token is optional.
        let day = find_day(lower)?;
        let section = find_meal(lower);
        let answer = match self.menu.get_day(day) {
            Ok(entry) => match section {
                Some(section) => format_section(&entry, section),
                None => format_single(&entry, None),
            },
            Err(e) => self.menu_apology(lower, e),
        };
        Some(answer)
    }

    fn menu_or_apology(&self, lower: &str, result: Result<String, AryaError>) -> String {
        match result {
            Ok(answer) => answer,
            Err(e) => self.menu_apology(lower, e),
        }
    }

    fn menu_apology(&self, lower: &str, err: AryaError) -> String {
        warn!("Menu lookup failed for question {:?}: {}", lower, err);
        match err {
            AryaError::MenuNotFound(day) => format!("No menu found for {}.", day),
            _ => MENU_UNAVAILABLE.to_string(),
        }
    }

    // -----------------------------------------------------------------
    // Step 2: photo intent
    // -----------------------------------------------------------------

    fn try_photos(&self, lower: &str) -> Option<Reply> {
        if !PHOTO_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return None;
        }

        let mut photos: Vec<PathBuf> = Vec::new();
        let mut category_matched = false;

        for category in self.photos.taxonomy() {
            if !lower.contains(category.name) {
                continue;
            }
            category_matched = true;

            // A matched subcategory (with photos) restricts the result;
            // otherwise the whole category is returned.
            let mut from_subcategories: Vec<PathBuf> = Vec::new();
            for &sub in category.subcategories {
                if lower.contains(&sub.replace('_', " ")) {
                    from_subcategories
                        .extend(self.photos.lookup(Some(category.name), Some(sub)));
                }
            }
            if from_subcategories.is_empty() {
                photos.extend(self.photos.lookup(Some(category.name), None));
            } else {
                photos.extend(from_subcategories);
            }
        }

        if !category_matched && HOSTEL_KEYWORDS.iter().any(|k| lower.contains(k)) {
            photos = self.photos.lookup(None, None);
        }

        // The photo keyword claims this question; an empty result is a
        // "no photos" reply, never a QA fallthrough.
        if photos.is_empty() {
            return Some(Reply::text(Intent::Photo, NO_PHOTOS));
        }
        let answer = if photos.len() == 1 {
            "Here is 1 photo that might help.".to_string()
        } else {
            format!("Here are {} photos that might help.", photos.len())
        };
        Some(Reply {
            intent: Intent::Photo,
            answer,
            photos,
        })
    }

    // -----------------------------------------------------------------
    // Step 3: QA fallback
    // -----------------------------------------------------------------

    fn qa_answer(&self, question: &str) -> Result<Reply, ChatError> {
        {
            let mut cache = self
                .cache
                .lock()
                .map_err(|e| ChatError::State(format!("cache lock poisoned: {}", e)))?;
            if let Some(hit) = cache.get(question) {
                debug!("Cache hit for question: {:?}", question);
                return Ok(Reply::text(Intent::Qa, hit));
            }
        }

        match self.qa.answer(question) {
            Ok(answer) => {
                let mut cache = self
                    .cache
                    .lock()
                    .map_err(|e| ChatError::State(format!("cache lock poisoned: {}", e)))?;
                cache.put(question, &answer);
                Ok(Reply::text(Intent::Qa, answer))
            }
            Err(e) => {
                error!("QA backend failed for question {:?}: {}", question, e);
                Ok(Reply::text(Intent::Qa, QA_FAILED))
            }
        }
    }
}

// =============================================================================
// Token scanning helpers
// =============================================================================

/// First day name appearing as a full word, tie-broken by the fixed
/// Sunday-first iteration order.
fn find_day(lower: &str) -> Option<DayOfWeek> {
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();
    DayOfWeek::WEEK
        .iter()
        .copied()
        .find(|day| words.iter().any(|w| day.name().eq_ignore_ascii_case(w)))
}

/// First meal synonym appearing as a full word, in map order.
fn find_meal(lower: &str) -> Option<MenuSection> {
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();
    MEAL_SYNONYMS
        .iter()
        .find(|(token, _)| words.iter().any(|w| *w == *token))
        .map(|(_, section)| *section)
}

// =============================================================================
// Tests
// =============================================================================
