//! The in-memory record of one guest's RSVP answers.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::UnknownChoice;

const PHONE_MAX_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    Accept,
    Decline,
}

impl Attendance {
    pub const ALL: [Attendance; 2] = [Attendance::Accept, Attendance::Decline];

    /// Value sent to the endpoint and used in form posts
    pub fn as_str(&self) -> &'static str {
        match self {
            Attendance::Accept => "yes",
            Attendance::Decline => "no",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Attendance::Accept => "Joyfully Accept",
            Attendance::Decline => "Regretfully Decline",
        }
    }
}

impl FromStr for Attendance {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "accept" => Ok(Attendance::Accept),
            "no" | "decline" => Ok(Attendance::Decline),
            _ => Err(UnknownChoice {
                kind: "attendance",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Meal {
    Vegetarian,
    NonVegetarian,
    Vegan,
    Jain,
}

impl Meal {
    pub const ALL: [Meal; 4] = [Meal::Vegetarian, Meal::NonVegetarian, Meal::Vegan, Meal::Jain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Meal::Vegetarian => "vegetarian",
            Meal::NonVegetarian => "non-vegetarian",
            Meal::Vegan => "vegan",
            Meal::Jain => "jain",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Meal::Vegetarian => "Vegetarian",
            Meal::NonVegetarian => "Non-Vegetarian",
            Meal::Vegan => "Vegan",
            Meal::Jain => "Jain",
        }
    }
}

impl FromStr for Meal {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Meal::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted || m.label().to_lowercase() == wanted)
            .ok_or_else(|| UnknownChoice {
                kind: "meal preference",
                value: s.to_string(),
            })
    }
}

/// Drink choices. Declaration order is the order drinks are listed and sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Drink {
    NoDrink,
    Beer,
    Wine,
    Whiskey,
    Vodka,
    Cocktail,
    Mocktail,
    SoftDrink,
}

impl Drink {
    pub const ALL: [Drink; 8] = [
        Drink::NoDrink,
        Drink::Beer,
        Drink::Wine,
        Drink::Whiskey,
        Drink::Vodka,
        Drink::Cocktail,
        Drink::Mocktail,
        Drink::SoftDrink,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Drink::NoDrink => "No Drink",
            Drink::Beer => "Beer",
            Drink::Wine => "Wine",
            Drink::Whiskey => "Whiskey",
            Drink::Vodka => "Vodka",
            Drink::Cocktail => "Cocktail",
            Drink::Mocktail => "Mocktail",
            Drink::SoftDrink => "Soft Drink",
        }
    }

    /// Form value, e.g. `no-drink`
    pub fn as_str(&self) -> &'static str {
        match self {
            Drink::NoDrink => "no-drink",
            Drink::Beer => "beer",
            Drink::Wine => "wine",
            Drink::Whiskey => "whiskey",
            Drink::Vodka => "vodka",
            Drink::Cocktail => "cocktail",
            Drink::Mocktail => "mocktail",
            Drink::SoftDrink => "soft-drink",
        }
    }
}

impl fmt::Display for Drink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Drink {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Drink::ALL
            .into_iter()
            .find(|d| d.as_str() == wanted || d.label().to_lowercase() == wanted)
            .ok_or_else(|| UnknownChoice {
                kind: "drink",
                value: s.to_string(),
            })
    }
}

/// Selected drinks.
///
/// "No Drink" never coexists with another drink when built through `toggle`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkSet(BTreeSet<Drink>);

impl DrinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set by toggling each drink in order, starting from empty.
    pub fn from_selection<I: IntoIterator<Item = Drink>>(drinks: I) -> Self {
        let mut set = DrinkSet::new();
        for drink in drinks {
            set.toggle(drink);
        }
        set
    }

    pub fn toggle(&mut self, drink: Drink) {
        if self.0.remove(&drink) {
            return;
        }

        if drink == Drink::NoDrink {
            self.0.clear();
        } else {
            self.0.remove(&Drink::NoDrink);
        }
        self.0.insert(drink);
    }

    pub fn contains(&self, drink: Drink) -> bool {
        self.0.contains(&drink)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Drink> + '_ {
        self.0.iter().copied()
    }

    /// "Beer, Wine"
    pub fn joined(&self) -> String {
        self.iter().map(|d| d.label()).collect::<Vec<_>>().join(", ")
    }
}

/// The form's fields, used to address edits and report errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Phone,
    Attendance,
    Guests,
    Meal,
    Drinks,
    Notes,
}

impl Field {
    /// Fields cleared and disabled when the guest declines
    pub fn depends_on_attendance(&self) -> bool {
        matches!(self, Field::Guests | Field::Meal | Field::Drinks)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "Name",
            Field::Phone => "Phone number",
            Field::Attendance => "Attendance",
            Field::Guests => "Guest count",
            Field::Meal => "Meal preference",
            Field::Drinks => "Drink preference",
            Field::Notes => "Notes",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub phone: String,
    pub attendance: Option<Attendance>,
    pub guests: Option<u8>,
    pub meal: Option<Meal>,
    pub drinks: DrinkSet,
    pub notes: String,
}

impl Submission {
    pub fn is_attending(&self) -> bool {
        self.attendance == Some(Attendance::Accept)
    }

    pub(crate) fn clear_attendance_dependent(&mut self) {
        self.guests = None;
        self.meal = None;
        self.drinks.clear();
    }
}

/// A single-field change to a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Name(String),
    Phone(String),
    /// `None` puts the form back to "not answered"
    Attendance(Option<Attendance>),
    /// Raw text from the guest count input; empty clears the field
    Guests(String),
    Meal(Option<Meal>),
    Drinks(DrinkSet),
    Notes(String),
}

impl FieldEdit {
    pub fn field(&self) -> Field {
        match self {
            FieldEdit::Name(_) => Field::Name,
            FieldEdit::Phone(_) => Field::Phone,
            FieldEdit::Attendance(_) => Field::Attendance,
            FieldEdit::Guests(_) => Field::Guests,
            FieldEdit::Meal(_) => Field::Meal,
            FieldEdit::Drinks(_) => Field::Drinks,
            FieldEdit::Notes(_) => Field::Notes,
        }
    }
}

/// Keep digits only, at most ten of them.
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(PHONE_MAX_DIGITS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_drink_clears_other_drinks() {
        let mut drinks = DrinkSet::from_selection([Drink::Beer, Drink::Wine]);
        drinks.toggle(Drink::NoDrink);

        assert_eq!(drinks.iter().collect::<Vec<_>>(), vec![Drink::NoDrink]);
    }

    #[test]
    fn test_other_drink_removes_no_drink() {
        let mut drinks = DrinkSet::from_selection([Drink::NoDrink]);
        drinks.toggle(Drink::Mocktail);

        assert!(!drinks.contains(Drink::NoDrink));
        assert!(drinks.contains(Drink::Mocktail));
        assert_eq!(drinks.len(), 1);
    }

    #[test]
    fn test_reselecting_a_drink_removes_it() {
        let mut drinks = DrinkSet::from_selection([Drink::Beer, Drink::Wine]);
        drinks.toggle(Drink::Beer);
        assert_eq!(drinks.iter().collect::<Vec<_>>(), vec![Drink::Wine]);

        drinks.toggle(Drink::Wine);
        assert!(drinks.is_empty());
    }

    #[test]
    fn test_joined_uses_declaration_order() {
        let drinks = DrinkSet::from_selection([Drink::SoftDrink, Drink::Beer, Drink::Wine]);
        assert_eq!(drinks.joined(), "Beer, Wine, Soft Drink");
    }

    #[test]
    fn test_sanitize_phone() {
        assert_eq!(sanitize_phone("(555) 123-4567"), "5551234567");
        assert_eq!(sanitize_phone("555123456789"), "5551234567");
        assert_eq!(sanitize_phone("call me"), "");
    }

    #[test]
    fn test_parse_choices_from_values_and_labels() {
        assert_eq!("yes".parse::<Attendance>().unwrap(), Attendance::Accept);
        assert_eq!("No".parse::<Attendance>().unwrap(), Attendance::Decline);
        assert_eq!("non-vegetarian".parse::<Meal>().unwrap(), Meal::NonVegetarian);
        assert_eq!("Vegan".parse::<Meal>().unwrap(), Meal::Vegan);
        assert_eq!("No Drink".parse::<Drink>().unwrap(), Drink::NoDrink);
        assert_eq!("soft-drink".parse::<Drink>().unwrap(), Drink::SoftDrink);

        let err = "maybe".parse::<Attendance>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown attendance: maybe");
    }
}
