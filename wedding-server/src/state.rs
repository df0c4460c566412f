use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use wedding_core::SiteConfig;
use wedding_core::rsvp::{RsvpEndpoint, ScriptEndpoint};

use crate::sessions::SessionStore;
use crate::views::Views;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteConfig>,
    pub sessions: Arc<SessionStore>,
    pub views: Arc<Views>,
    endpoints: Arc<HashMap<String, Arc<dyn RsvpEndpoint>>>,
}

impl AppState {
    /// Each page posts to its own configured endpoint.
    pub fn new(site: SiteConfig) -> Result<Self> {
        let endpoints = site
            .pages
            .iter()
            .map(|page| {
                let endpoint: Arc<dyn RsvpEndpoint> =
                    Arc::new(ScriptEndpoint::new(page.endpoint.clone()));
                (page.slug.clone(), endpoint)
            })
            .collect();

        Self::build(site, endpoints)
    }

    /// Every page posts to `endpoint`.
    pub fn with_endpoint(site: SiteConfig, endpoint: Arc<dyn RsvpEndpoint>) -> Result<Self> {
        let endpoints = site
            .pages
            .iter()
            .map(|page| (page.slug.clone(), endpoint.clone()))
            .collect();

        Self::build(site, endpoints)
    }

    fn build(site: SiteConfig, endpoints: HashMap<String, Arc<dyn RsvpEndpoint>>) -> Result<Self> {
        Ok(AppState {
            sessions: Arc::new(SessionStore::new(site.session_ttl(), site.max_sessions)),
            views: Arc::new(Views::new()?),
            site: Arc::new(site),
            endpoints: Arc::new(endpoints),
        })
    }

    pub fn endpoint(&self, page: &str) -> Option<Arc<dyn RsvpEndpoint>> {
        self.endpoints.get(page).cloned()
    }
}
