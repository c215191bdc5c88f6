//! Greeting debounce for the bot collaborator.
//!
//! A rate limiter keyed by user id with a fixed cooldown window. The clock is
//! passed in per call so the window logic stays testable, and the last-seen
//! map lives on the application state rather than in process globals.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

#[derive(Debug)]
pub struct GreetingTracker {
    cooldown: Duration,
    last_greeted: Mutex<HashMap<Uuid, DateTime<Utc>>>,
}

impl GreetingTracker {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_greeted: Mutex::new(HashMap::new()),
        }
    }

    /// Returns true when the user has not been greeted within the cooldown
    /// window, recording the greeting timestamp when it does.
    pub fn should_greet(&self, user_id: Uuid, now: DateTime<Utc>) -> bool {
        let mut last = self
            .last_greeted
            .lock()
            .expect("greeting tracker mutex poisoned");

        match last.get(&user_id) {
            Some(at) if now - *at < self.cooldown => false,
            _ => {
                last.insert(user_id, now);
                true
            }
        }
    }
}
