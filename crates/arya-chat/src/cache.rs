//! Bounded, time-limited response memoization.
//!
//! Keys are trimmed question text. Capacity eviction is FIFO on
//! insertion order; expiry is lazy, checked on access.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};

struct CacheEntry {
    answer: String,
    inserted_at: DateTime<Utc>,
}

/// FIFO-bounded answer cache with a TTL.
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
    /// Insertion order of keys; front is oldest.
    order: VecDeque<String>,
    capacity: usize,
    ttl_secs: i64,
}

impl ResponseCache {
    pub fn new(capacity: usize, ttl_secs: u64) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
            ttl_secs: ttl_secs as i64,
        }
    }

    /// Look up an answer. Entries at or past the TTL count as misses
    /// and are evicted on the spot.
    pub fn get(&mut self, question: &str) -> Option<String> {
        let key = normalize(question);
        let expired = match self.entries.get(&key) {
            Some(entry) => (Utc::now() - entry.inserted_at).num_seconds() >= self.ttl_secs,
            None => return None,
        };
        if expired {
            self.remove(&key);
            return None;
        }
        self.entries.get(&key).map(|e| e.answer.clone())
    }

    /// Insert or overwrite an answer. At capacity, the oldest-inserted
    /// entry is evicted first.
    pub fn put(&mut self, question: &str, answer: &str) {
        if self.capacity == 0 {
            return;
        }
        let key = normalize(question);
        if self.entries.contains_key(&key) {
            // Overwrite counts as a fresh insertion.
            self.remove(&key);
        } else if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(
            key,
            CacheEntry {
                answer: answer.to_string(),
                inserted_at: Utc::now(),
            },
        );
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }
}

fn normalize(question: &str) -> String {
    question.trim().to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn cache() -> ResponseCache {
        ResponseCache::new(100, 3600)
    }

    // ---- Basic get/put ----

    #[test]
    fn test_put_then_get() {
        let mut c = cache();
        c.put("What are the mess timings?", "5 AM to 11 PM");
        assert_eq!(
            c.get("What are the mess timings?"),
            Some("5 AM to 11 PM".to_string())
        );
    }

    #[test]
    fn test_miss_on_unknown_question() {
        let mut c = cache();
        assert_eq!(c.get("anything"), None);
    }

    #[test]
    fn test_key_is_trimmed() {
        let mut c = cache();
        c.put("  spaced question  ", "a");
        assert_eq!(c.get("spaced question"), Some("a".to_string()));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_overwrite_does_not_grow() {
        let mut c = cache();
        c.put("q", "first");
        c.put("q", "second");
        assert_eq!(c.len(), 1);
        assert_eq!(c.get("q"), Some("second".to_string()));
    }

    // ---- Capacity / FIFO eviction ----

    #[test]
    fn test_capacity_evicts_oldest_inserted() {
        let mut c = cache();
        for i in 0..101 {
            c.put(&format!("question {}", i), &format!("answer {}", i));
        }
        assert_eq!(c.len(), 100);
        assert_eq!(c.get("question 0"), None);
        assert_eq!(c.get("question 1"), Some("answer 1".to_string()));
        assert_eq!(c.get("question 100"), Some("answer 100".to_string()));
    }

    #[test]
    fn test_eviction_is_fifo_not_lru() {
        let mut c = ResponseCache::new(2, 3600);
        c.put("a", "1");
        c.put("b", "2");
        // Reading "a" must not protect it; eviction is by insertion age.
        assert!(c.get("a").is_some());
        c.put("c", "3");
        assert_eq!(c.get("a"), None);
        assert!(c.get("b").is_some());
        assert!(c.get("c").is_some());
    }

    #[test]
    fn test_overwrite_refreshes_insertion_order() {
        let mut c = ResponseCache::new(2, 3600);
        c.put("a", "1");
        c.put("b", "2");
        c.put("a", "1 again");
        c.put("c", "3");
        // "b" is now the oldest insertion and goes first.
        assert_eq!(c.get("b"), None);
        assert!(c.get("a").is_some());
        assert!(c.get("c").is_some());
    }

    // ---- TTL expiry ----

    #[test]
    fn test_expired_entry_is_a_miss() {
        let mut c = cache();
        c.put("old question", "old answer");
        c.entries.get_mut("old question").unwrap().inserted_at =
            Utc::now() - Duration::seconds(3601);
        assert_eq!(c.get("old question"), None);
    }

    #[test]
    fn test_expired_entry_is_evicted_lazily() {
        let mut c = cache();
        c.put("old question", "old answer");
        c.entries.get_mut("old question").unwrap().inserted_at =
            Utc::now() - Duration::seconds(3601);
        c.get("old question");
        assert_eq!(c.len(), 0);
        assert!(c.order.is_empty());
    }

    #[test]
    fn test_fresh_entry_is_a_hit() {
        let mut c = cache();
        c.put("fresh", "answer");
        c.entries.get_mut("fresh").unwrap().inserted_at = Utc::now() - Duration::seconds(3500);
        assert_eq!(c.get("fresh"), Some("answer".to_string()));
    }

    // ---- clear ----

    #[test]
    fn test_clear_removes_everything() {
        let mut c = cache();
        c.put("x", "1");
        c.put("y", "2");
        c.clear();
        assert!(c.is_empty());
        assert_eq!(c.get("x"), None);
        assert_eq!(c.get("y"), None);
    }

    // ---- Degenerate capacities ----

    #[test]
    fn test_capacity_zero_caches_nothing() {
        let mut c = ResponseCache::new(0, 3600);
        c.put("a", "1");
        assert!(c.is_empty());
        assert_eq!(c.get("a"), None);
    }

    #[test]
    fn test_capacity_one() {
        let mut c = ResponseCache::new(1, 3600);
        c.put("a", "1");
        c.put("b", "2");
        assert_eq!(c.len(), 1);
        assert_eq!(c.get("a"), None);
        assert!(c.get("b").is_some());
    }
}
