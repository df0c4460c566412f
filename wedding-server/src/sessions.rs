//! One RSVP form controller per page load.
//!
//! A session is created every time an invitation page is rendered and its id
//! travels with the form as a hidden field. Sessions older than the configured
//! TTL are dropped when new ones are created, unless a submit is in flight.
//! The store also holds at most `max_sessions` entries: when full, the oldest
//! sessions that are not submitting make room.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use uuid::Uuid;
use wedding_core::PageConfig;
use wedding_core::rsvp::{FormPhase, RsvpForm};

struct Session {
    page: String,
    form: Arc<RsvpForm>,
    created: Instant,
}

impl Session {
    fn is_submitting(&self) -> bool {
        self.form.phase() == FormPhase::Submitting
    }
}

pub struct SessionStore {
    ttl: Duration,
    max_sessions: usize,
    sessions: Mutex<HashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        SessionStore {
            ttl,
            max_sessions,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a fresh form for `page`.
    pub fn create(&self, page: &PageConfig) -> (Uuid, Arc<RsvpForm>) {
        let mut sessions = self.sessions();

        let ttl = self.ttl;
        sessions.retain(|_, s| s.created.elapsed() < ttl || s.is_submitting());

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .filter(|(_, s)| !s.is_submitting())
                .min_by_key(|(_, s)| s.created)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                }
                // Every session is mid-submit
                None => break,
            }
        }

        let id = Uuid::new_v4();
        let form = Arc::new(RsvpForm::new(page.fields));
        sessions.insert(
            id,
            Session {
                page: page.slug.clone(),
                form: form.clone(),
                created: Instant::now(),
            },
        );

        (id, form)
    }

    /// Look up a session; it must belong to `page`.
    pub fn get(&self, id: Uuid, page: &str) -> Option<Arc<RsvpForm>> {
        self.sessions()
            .get(&id)
            .filter(|s| s.page == page)
            .map(|s| s.form.clone())
    }

    pub fn len(&self) -> usize {
        self.sessions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
