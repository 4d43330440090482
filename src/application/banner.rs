// src/application/banner.rs
use crate::constants::BANNER_TTL_SECS;
use std::time::{Duration, Instant};

/// Single transient slot for the most recent user-facing error.
#[derive(Debug, Clone)]
pub struct Banner {
    ttl: Duration,
    current: Option<(String, Instant)>,
}

impl Banner {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.show_at(message, Instant::now());
    }

    /// Replaces whatever message was showing.
    pub fn show_at(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some((message.into(), now));
    }

    pub fn message(&self) -> Option<&str> {
        self.message_at(Instant::now())
    }

    pub fn message_at(&self, now: Instant) -> Option<&str> {
        match &self.current {
            Some((message, shown_at)) if now.saturating_duration_since(*shown_at) < self.ttl => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

impl Default for Banner {
    fn default() -> Self {
        Self::new(Duration::from_secs(BANNER_TTL_SECS))
    }
}
