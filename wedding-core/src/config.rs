//! Site configuration.
//!
//! The whole site (couple, events, invitation pages and their RSVP endpoints)
//! is described by one TOML file, `~/.config/wedding-site/site.toml` unless a
//! path is given. Scalar keys can be overridden with `WEDDING_*` environment
//! variables (e.g. `WEDDING_BIND=0.0.0.0:8080`).

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use chrono_tz::Tz;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{WeddingError, WeddingResult};
use crate::event::WeddingEvent;
use crate::page::{FieldSet, PageConfig};

const DEFAULT_BIND: &str = "127.0.0.1:4096";
const DEFAULT_SESSION_TTL: &str = "2h";
const DEFAULT_MAX_SESSIONS: usize = 10_000;
const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbyEMgws7zU9jBXFW_gRCCKP8m7QMVCZfFY-De4V4uxX1kR12RV2xc4-7exEGVnjS2cA/exec";

fn default_timezone() -> Tz {
    chrono_tz::America::New_York
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_session_ttl() -> String {
    DEFAULT_SESSION_TTL.to_string()
}

fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// "Vishal & Monica"
    pub couple: String,
    /// Page title and calendar name
    pub title: String,
    pub description: String,

    #[serde(default = "default_timezone")]
    pub timezone: Tz,

    /// Address the server listens on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// How long an unsubmitted form session is kept, e.g. "2h"
    #[serde(default = "default_session_ttl")]
    pub session_ttl: String,

    /// Open form sessions kept at most; the oldest idle ones are dropped first
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    pub events: Vec<WeddingEvent>,
    pub pages: Vec<PageConfig>,
}

impl SiteConfig {
    pub fn config_path() -> WeddingResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| WeddingError::Config("Could not determine config directory".into()))?
            .join("wedding-site");

        Ok(config_dir.join("site.toml"))
    }

    /// Load the site from `path`, or from the default location.
    ///
    /// The default file is created from the built-in site when missing.
    pub fn load(path: Option<&Path>) -> WeddingResult<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::config_path()?;
                if !default_path.exists() {
                    Self::create_default_config(&default_path)?;
                }
                default_path
            }
        };

        if !path.exists() {
            return Err(WeddingError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let config: SiteConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(Environment::with_prefix("WEDDING"))
            .build()
            .map_err(|e| WeddingError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| WeddingError::Config(e.to_string()))?;

        config.validated()
    }

    pub fn from_toml_str(content: &str) -> WeddingResult<Self> {
        let config: SiteConfig =
            toml::from_str(content).map_err(|e| WeddingError::Config(e.to_string()))?;
        config.validated()
    }

    /// Write the built-in site to `path` as a starting point for editing.
    pub fn create_default_config(path: &Path) -> WeddingResult<()> {
        let body = toml::to_string_pretty(&SiteConfig::builtin()?)
            .map_err(|e| WeddingError::Config(e.to_string()))?;
        let contents = format!(
            "# wedding-site configuration\n\
             #\n\
             # Each [[pages]] entry is one invitation page served at /<slug>.\n\
             # Its RSVPs are posted as JSON to `endpoint`.\n\n{}",
            body
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                WeddingError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| WeddingError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Normalize slugs and check cross references.
    pub fn validated(mut self) -> WeddingResult<Self> {
        if self.pages.is_empty() {
            return Err(WeddingError::Config("At least one [[pages]] entry is required".into()));
        }

        humantime::parse_duration(&self.session_ttl).map_err(|e| {
            WeddingError::Config(format!("Invalid session_ttl '{}': {e}", self.session_ttl))
        })?;

        if self.max_sessions == 0 {
            return Err(WeddingError::Config("max_sessions must be at least 1".into()));
        }

        let mut event_slugs = HashSet::new();
        for event in &mut self.events {
            event.slug = slug::slugify(&event.slug);
            if !event_slugs.insert(event.slug.clone()) {
                return Err(WeddingError::Config(format!("Duplicate event '{}'", event.slug)));
            }
            if event.end <= event.start {
                return Err(WeddingError::Config(format!(
                    "Event '{}' ends before it starts",
                    event.slug
                )));
            }
            event.start_utc(self.timezone)?;
            event.end_utc(self.timezone)?;
        }

        let mut page_slugs = HashSet::new();
        for page in &mut self.pages {
            page.slug = slug::slugify(&page.slug);
            if page.slug == "events" {
                return Err(WeddingError::Config("'events' is reserved and cannot be a page".into()));
            }
            if !page_slugs.insert(page.slug.clone()) {
                return Err(WeddingError::Config(format!("Duplicate page '{}'", page.slug)));
            }
            if page.fields.max_guests == 0 {
                return Err(WeddingError::Config(format!(
                    "Page '{}' must allow at least one guest",
                    page.slug
                )));
            }
            for event in &mut page.events {
                *event = slug::slugify(&*event);
                if !event_slugs.contains(event.as_str()) {
                    return Err(WeddingError::Config(format!(
                        "Page '{}' references unknown event '{}'",
                        page.slug, event
                    )));
                }
            }
        }

        Ok(self)
    }

    pub fn session_ttl(&self) -> Duration {
        humantime::parse_duration(&self.session_ttl)
            .unwrap_or_else(|_| Duration::from_secs(2 * 60 * 60))
    }

    pub fn page(&self, slug: &str) -> WeddingResult<&PageConfig> {
        self.pages
            .iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| WeddingError::PageNotFound(slug.to_string()))
    }

    pub fn event(&self, slug: &str) -> WeddingResult<&WeddingEvent> {
        self.events
            .iter()
            .find(|e| e.slug == slug)
            .ok_or_else(|| WeddingError::EventNotFound(slug.to_string()))
    }

    /// Events shown on a page, in page order
    pub fn page_events(&self, page: &PageConfig) -> WeddingResult<Vec<&WeddingEvent>> {
        page.events.iter().map(|slug| self.event(slug)).collect()
    }

    /// The built-in site: a pre-wedding party, the ceremony and the reception.
    pub fn builtin() -> WeddingResult<Self> {
        let invalid = || WeddingError::Config("Invalid built-in date".into());
        let eve = NaiveDate::from_ymd_opt(2025, 5, 22).ok_or_else(invalid)?;
        let day = NaiveDate::from_ymd_opt(2025, 5, 23).ok_or_else(invalid)?;
        let at = |date: NaiveDate, h: u32| date.and_hms_opt(h, 0, 0).ok_or_else(invalid);
        let venue = vec![
            "4143 Ayodhya Way".to_string(),
            "Ijamsville, MD 21754".to_string(),
        ];
        let endpoint = Url::parse(DEFAULT_ENDPOINT)
            .map_err(|e| WeddingError::Config(format!("Invalid built-in endpoint: {e}")))?;

        let config = SiteConfig {
            couple: "Vishal & Monica".to_string(),
            title: "Vishal & Monica - Wedding Invitation".to_string(),
            description: "Join us for the wedding celebration of Vishal & Monica on May 23rd, 2025"
                .to_string(),
            timezone: default_timezone(),
            bind: default_bind(),
            session_ttl: default_session_ttl(),
            max_sessions: default_max_sessions(),
            events: vec![
                WeddingEvent {
                    slug: "sangeet".to_string(),
                    title: "Sangeet & Mehndi".to_string(),
                    start: at(eve, 18)?,
                    end: at(eve, 22)?,
                    venue: venue.clone(),
                    dress_code: Some("Festive Indian Wear".to_string()),
                    note: Some("Music, dancing and mehndi".to_string()),
                },
                WeddingEvent {
                    slug: "ceremony".to_string(),
                    title: "Wedding Ceremony".to_string(),
                    start: at(day, 9)?,
                    end: at(day, 12)?,
                    venue: venue.clone(),
                    dress_code: Some("Traditional Attire".to_string()),
                    note: None,
                },
                WeddingEvent {
                    slug: "reception".to_string(),
                    title: "Reception".to_string(),
                    start: at(day, 18)?,
                    end: at(day, 23)?,
                    venue,
                    dress_code: Some("Formal or Indo-Western".to_string()),
                    note: Some("Dinner and dancing to follow".to_string()),
                },
            ],
            pages: vec![
                PageConfig {
                    slug: "wedding".to_string(),
                    heading: "Vishal & Monica".to_string(),
                    tagline: "Request the pleasure of your company".to_string(),
                    accent: "#ec4899".to_string(),
                    events: vec!["ceremony".to_string()],
                    endpoint: endpoint.clone(),
                    fields: FieldSet {
                        phone: false,
                        ..FieldSet::default()
                    },
                },
                PageConfig {
                    slug: "reception".to_string(),
                    heading: "Vishal & Monica".to_string(),
                    tagline: "Invite you to celebrate with dinner and dancing".to_string(),
                    accent: "#b45309".to_string(),
                    events: vec!["reception".to_string()],
                    endpoint: endpoint.clone(),
                    fields: FieldSet::all(),
                },
                PageConfig {
                    slug: "sangeet".to_string(),
                    heading: "Vishal & Monica".to_string(),
                    tagline: "Kick off the celebrations with us".to_string(),
                    accent: "#7c3aed".to_string(),
                    events: vec!["sangeet".to_string()],
                    endpoint,
                    fields: FieldSet {
                        meal: true,
                        ..FieldSet::default()
                    },
                },
            ],
        };

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
couple = "A & B"
title = "A & B"
description = "Our wedding"

[[events]]
slug = "Main Ceremony"
title = "Ceremony"
start = "2025-05-23T09:00:00"
end = "2025-05-23T12:00:00"
venue = ["Somewhere"]

[[pages]]
slug = "Wedding"
heading = "A & B"
tagline = "Join us"
events = ["main-ceremony"]
endpoint = "https://example.com/rsvp"
"#;

    #[test]
    fn test_default_site_is_valid() {
        let config = SiteConfig::builtin().unwrap().validated().unwrap();
        assert_eq!(config.pages.len(), 3);
        for page in &config.pages {
            assert!(!config.page_events(page).unwrap().is_empty());
        }
    }

    #[test]
    fn test_default_site_round_trips_through_toml() {
        let body = toml::to_string_pretty(&SiteConfig::builtin().unwrap()).unwrap();
        let config = SiteConfig::from_toml_str(&body).unwrap();
        assert_eq!(config.couple, "Vishal & Monica");
        assert_eq!(config.page("reception").unwrap().fields, FieldSet::all());
    }

    #[test]
    fn test_minimal_config_gets_defaults_and_slugs() {
        let config = SiteConfig::from_toml_str(MINIMAL).unwrap();

        assert_eq!(config.timezone, chrono_tz::America::New_York);
        assert_eq!(config.bind, "127.0.0.1:4096");
        assert_eq!(config.session_ttl(), Duration::from_secs(7200));
        assert_eq!(config.max_sessions, 10_000);

        let page = config.page("wedding").unwrap();
        assert_eq!(page.accent, "#ec4899");
        assert_eq!(page.fields, FieldSet::default());
        assert_eq!(config.page_events(page).unwrap()[0].slug, "main-ceremony");
    }

    #[test]
    fn test_unknown_event_reference_is_rejected() {
        let bad = MINIMAL.replace(r#"events = ["main-ceremony"]"#, r#"events = ["nope"]"#);
        let err = SiteConfig::from_toml_str(&bad).unwrap_err();
        assert!(err.to_string().contains("unknown event 'nope'"), "{}", err);
    }

    #[test]
    fn test_event_ending_before_start_is_rejected() {
        let bad = MINIMAL.replace("2025-05-23T12:00:00", "2025-05-23T08:00:00");
        assert!(SiteConfig::from_toml_str(&bad).is_err());
    }

    #[test]
    fn test_bad_session_ttl_is_rejected() {
        let bad = format!("session_ttl = \"soon\"\n{}", MINIMAL);
        assert!(SiteConfig::from_toml_str(&bad).is_err());
    }

    #[test]
    fn test_zero_max_sessions_is_rejected() {
        let bad = format!("max_sessions = 0\n{}", MINIMAL);
        let err = SiteConfig::from_toml_str(&bad).unwrap_err();
        assert!(err.to_string().contains("max_sessions"), "{}", err);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(&path, MINIMAL).unwrap();

        let config = SiteConfig::load(Some(&path)).unwrap();
        assert_eq!(config.couple, "A & B");
        assert_eq!(config.page("wedding").unwrap().endpoint.as_str(), "https://example.com/rsvp");
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(SiteConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_create_default_config_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("site.toml");

        SiteConfig::create_default_config(&path).unwrap();
        let config = SiteConfig::load(Some(&path)).unwrap();
        assert_eq!(config.pages.len(), 3);
    }
}
