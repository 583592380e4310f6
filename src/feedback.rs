use std::time::{Duration, Instant};

pub const COPY_FEEDBACK_TTL: Duration = Duration::from_millis(2000);

#[derive(Debug)]
struct Copied {
    id: String,
    deadline: Instant,
    generation: u64,
}

// Transient "Copied!" state for the last-copied entry. Each mark supersedes
// the previous one; a scheduled clear carries the generation token it was
// created with so a stale clear is a no-op.
#[derive(Debug)]
pub struct CopyFeedback {
    ttl: Duration,
    generation: u64,
    state: Option<Copied>,
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::with_ttl(COPY_FEEDBACK_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            generation: 0,
            state: None,
        }
    }

    pub fn mark_copied(&mut self, id: &str) -> u64 {
        self.generation += 1;
        self.state = Some(Copied {
            id: id.to_string(),
            deadline: Instant::now() + self.ttl,
            generation: self.generation,
        });
        self.generation
    }

    pub fn clear_expired(&mut self, generation: u64) {
        let current = self
            .state
            .as_ref()
            .map(|copied| copied.generation == generation)
            .unwrap_or(false);
        if current {
            self.state = None;
        }
    }

    pub fn is_copied(&self, id: &str) -> bool {
        self.state
            .as_ref()
            .map(|copied| copied.id == id && Instant::now() < copied.deadline)
            .unwrap_or(false)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
