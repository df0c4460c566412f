//! Invitation page variants.
//!
//! Each page (ceremony, reception, pre-wedding party) has its own copy,
//! accent color, list of events, RSVP endpoint and set of form fields.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::rsvp::Field;

const DEFAULT_ACCENT: &str = "#ec4899";
const DEFAULT_MAX_GUESTS: u8 = 5;

fn default_accent() -> String {
    DEFAULT_ACCENT.to_string()
}

fn default_max_guests() -> u8 {
    DEFAULT_MAX_GUESTS
}

fn default_true() -> bool {
    true
}

/// One invitation page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub slug: String,
    pub heading: String,
    pub tagline: String,

    #[serde(default = "default_accent")]
    pub accent: String,

    /// Slugs of the events shown on this page, in display order
    pub events: Vec<String>,

    /// Scripted endpoint receiving this page's RSVPs
    pub endpoint: Url,

    #[serde(default)]
    pub fields: FieldSet,
}

/// Which optional RSVP fields a page shows.
///
/// Name and attendance are always part of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSet {
    #[serde(default = "default_true")]
    pub phone: bool,
    #[serde(default = "default_true")]
    pub guests: bool,
    #[serde(default = "default_max_guests")]
    pub max_guests: u8,
    #[serde(default)]
    pub meal: bool,
    #[serde(default)]
    pub drinks: bool,
    #[serde(default = "default_true")]
    pub notes: bool,
}

impl Default for FieldSet {
    fn default() -> Self {
        FieldSet {
            phone: true,
            guests: true,
            max_guests: DEFAULT_MAX_GUESTS,
            meal: false,
            drinks: false,
            notes: true,
        }
    }
}

impl FieldSet {
    /// Every field enabled; used by tests and the reception page.
    pub fn all() -> Self {
        FieldSet {
            meal: true,
            drinks: true,
            ..FieldSet::default()
        }
    }

    pub fn shows(&self, field: Field) -> bool {
        match field {
            Field::Name | Field::Attendance => true,
            Field::Phone => self.phone,
            Field::Guests => self.guests,
            Field::Meal => self.meal,
            Field::Drinks => self.drinks,
            Field::Notes => self.notes,
        }
    }
}
