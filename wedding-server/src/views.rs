//! Server-side rendering of the invitation pages.
//!
//! Pages are Tera templates compiled into the binary. Every value goes
//! through Tera's HTML autoescaping, so the view models below carry plain
//! strings.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};
use uuid::Uuid;
use wedding_core::calendar::{google_calendar_url, outlook_calendar_url};
use wedding_core::celebration::Confetti;
use wedding_core::rsvp::{Attendance, Drink, Meal, Submission};
use wedding_core::{PageConfig, SiteConfig, WeddingEvent};

const TEMPLATES: [(&str, &str); 5] = [
    ("base.html", include_str!("../templates/base.html")),
    ("partials/header.html", include_str!("../templates/partials/header.html")),
    ("invitation.html", include_str!("../templates/invitation.html")),
    ("thank_you.html", include_str!("../templates/thank_you.html")),
    ("index.html", include_str!("../templates/index.html")),
];

const ERROR_TEMPLATE: &str = include_str!("../templates/error.html");

/// Values the RSVP form is rendered with
pub struct FormView<'a> {
    pub session: Uuid,
    pub submission: &'a Submission,
    pub notice: Option<&'a str>,
}

#[derive(Serialize)]
struct SiteView<'a> {
    title: &'a str,
    description: &'a str,
    couple: &'a str,
}

impl<'a> From<&'a SiteConfig> for SiteView<'a> {
    fn from(site: &'a SiteConfig) -> Self {
        SiteView {
            title: &site.title,
            description: &site.description,
            couple: &site.couple,
        }
    }
}

#[derive(Serialize)]
struct EventView<'a> {
    slug: &'a str,
    title: &'a str,
    weekday: String,
    date: String,
    time: String,
    venue: &'a [String],
    dress_code: Option<&'a str>,
    note: Option<&'a str>,
}

impl<'a> From<&'a WeddingEvent> for EventView<'a> {
    fn from(event: &'a WeddingEvent) -> Self {
        EventView {
            slug: &event.slug,
            title: &event.title,
            weekday: event.weekday(),
            date: event.display_date(),
            time: event.display_time(),
            venue: &event.venue,
            dress_code: event.dress_code.as_deref(),
            note: event.note.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct HeaderView<'a> {
    heading: &'a str,
    tagline: &'a str,
    events: Vec<EventView<'a>>,
}

impl<'a> HeaderView<'a> {
    fn new(page: &'a PageConfig, events: &[&'a WeddingEvent]) -> Self {
        HeaderView {
            heading: &page.heading,
            tagline: &page.tagline,
            events: events.iter().map(|e| EventView::from(*e)).collect(),
        }
    }
}

/// One `<option>` or checkbox
#[derive(Serialize)]
struct Choice {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

#[derive(Serialize)]
struct TextField<'a> {
    value: &'a str,
}

#[derive(Serialize)]
struct GuestsField {
    max: u8,
    value: String,
}

#[derive(Serialize)]
struct RsvpFormView<'a> {
    page: &'a str,
    session: String,
    notice: Option<&'a str>,
    name: &'a str,
    phone: Option<TextField<'a>>,
    attendance: Vec<Choice>,
    guests: Option<GuestsField>,
    meal: Option<Vec<Choice>>,
    drinks: Option<Vec<Choice>>,
    notes: Option<TextField<'a>>,
}

impl<'a> RsvpFormView<'a> {
    /// Only the fields the page asks for are present.
    fn new(page: &'a PageConfig, view: &FormView<'a>) -> Self {
        let fields = &page.fields;
        let s = view.submission;

        RsvpFormView {
            page: &page.slug,
            session: view.session.to_string(),
            notice: view.notice,
            name: &s.name,
            phone: fields.phone.then(|| TextField { value: &s.phone }),
            attendance: Attendance::ALL
                .into_iter()
                .map(|a| Choice {
                    value: a.as_str(),
                    label: a.label(),
                    selected: s.attendance == Some(a),
                })
                .collect(),
            guests: fields.guests.then(|| GuestsField {
                max: fields.max_guests,
                value: s.guests.map(|g| g.to_string()).unwrap_or_default(),
            }),
            meal: fields.meal.then(|| {
                Meal::ALL
                    .into_iter()
                    .map(|m| Choice {
                        value: m.as_str(),
                        label: m.label(),
                        selected: s.meal == Some(m),
                    })
                    .collect()
            }),
            drinks: fields.drinks.then(|| {
                Drink::ALL
                    .into_iter()
                    .map(|d| Choice {
                        value: d.as_str(),
                        label: d.label(),
                        selected: s.drinks.contains(d),
                    })
                    .collect()
            }),
            notes: fields.notes.then(|| TextField { value: &s.notes }),
        }
    }
}

#[derive(Serialize)]
struct CalendarLinks<'a> {
    slug: &'a str,
    title: &'a str,
    google: Option<String>,
    outlook: Option<String>,
}

impl<'a> CalendarLinks<'a> {
    fn new(event: &'a WeddingEvent, site: &SiteConfig) -> Self {
        CalendarLinks {
            slug: &event.slug,
            title: &event.title,
            google: google_calendar_url(event, site.timezone)
                .ok()
                .map(String::from),
            outlook: outlook_calendar_url(event, site.timezone)
                .ok()
                .map(String::from),
        }
    }
}

#[derive(Serialize)]
struct PieceView {
    color: &'static str,
    left: String,
    size: u8,
    delay_ms: u32,
    duration_ms: u32,
    rotation: i16,
}

fn confetti_view(confetti: &Confetti) -> Vec<PieceView> {
    confetti
        .pieces()
        .iter()
        .map(|piece| PieceView {
            color: piece.color,
            left: format!("{:.2}", piece.left),
            size: piece.size,
            delay_ms: piece.delay_ms,
            duration_ms: piece.duration_ms,
            rotation: piece.rotation,
        })
        .collect()
}

#[derive(Serialize)]
struct PageLink<'a> {
    slug: &'a str,
    events: Vec<&'a str>,
}

/// The compiled page templates
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Views { tera })
    }

    fn page_context(site: &SiteConfig, accent: &str) -> Context {
        let mut ctx = Context::new();
        ctx.insert("site", &SiteView::from(site));
        ctx.insert("accent", accent);
        ctx
    }

    /// Invitation page with the RSVP form
    pub fn invitation_page(
        &self,
        site: &SiteConfig,
        page: &PageConfig,
        events: &[&WeddingEvent],
        view: &FormView<'_>,
    ) -> Result<String> {
        let mut ctx = Self::page_context(site, &page.accent);
        ctx.insert("header", &HeaderView::new(page, events));
        ctx.insert("form", &RsvpFormView::new(page, view));
        Ok(self.tera.render("invitation.html", &ctx)?)
    }

    /// Terminal view after the RSVP was sent.
    ///
    /// `confetti` is only passed for the response to the submit itself.
    pub fn thank_you_page(
        &self,
        site: &SiteConfig,
        page: &PageConfig,
        events: &[&WeddingEvent],
        attending: bool,
        confetti: Option<&Confetti>,
    ) -> Result<String> {
        let calendar: Vec<CalendarLinks> = events
            .iter()
            .map(|event| CalendarLinks::new(event, site))
            .collect();

        let mut ctx = Self::page_context(site, &page.accent);
        ctx.insert("header", &HeaderView::new(page, events));
        ctx.insert("page", &page.slug);
        ctx.insert("attending", &attending);
        ctx.insert("calendar", &calendar);
        ctx.insert("confetti", &confetti.map(confetti_view));
        Ok(self.tera.render("thank_you.html", &ctx)?)
    }

    /// Landing page listing every invitation page
    pub fn index_page(&self, site: &SiteConfig) -> Result<String> {
        let pages: Vec<PageLink> = site
            .pages
            .iter()
            .map(|page| PageLink {
                slug: &page.slug,
                events: page
                    .events
                    .iter()
                    .filter_map(|slug| site.event(slug).ok())
                    .map(|e| e.title.as_str())
                    .collect(),
            })
            .collect();

        let mut ctx = Self::page_context(site, "#ec4899");
        ctx.insert("pages", &pages);
        Ok(self.tera.render("index.html", &ctx)?)
    }
}

/// Standalone error page; falls back to a fixed body if rendering fails.
pub fn error_page(message: &str) -> String {
    let mut ctx = Context::new();
    ctx.insert("message", message);
    Tera::one_off(ERROR_TEMPLATE, &ctx, true).unwrap_or_else(|e| {
        tracing::error!(error = %e, "error page failed to render");
        "<!DOCTYPE html><title>Error</title><p>Something went wrong.</p>".to_string()
    })
}
