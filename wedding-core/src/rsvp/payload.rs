//! JSON body posted to the RSVP endpoint.

use serde::{Deserialize, Serialize};

use super::submission::Submission;

/// Wire shape expected by the scripted endpoint. Every value is a string and
/// unset fields are sent as `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpPayload {
    pub name: String,
    pub phone: String,
    pub attendance: String,
    pub guests: String,
    pub meal_preference: String,
    /// Comma-joined drink labels
    pub drinks: String,
    pub notes: String,
}

impl From<&Submission> for RsvpPayload {
    fn from(submission: &Submission) -> Self {
        RsvpPayload {
            name: submission.name.trim().to_string(),
            phone: submission.phone.clone(),
            attendance: submission
                .attendance
                .map(|a| a.as_str().to_string())
                .unwrap_or_default(),
            guests: submission.guests.map(|g| g.to_string()).unwrap_or_default(),
            meal_preference: submission
                .meal
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            drinks: submission.drinks.joined(),
            notes: submission.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsvp::{Attendance, Drink, DrinkSet, Meal};

    #[test]
    fn test_payload_field_names() {
        let submission = Submission {
            name: " Asha ".to_string(),
            phone: "5551234567".to_string(),
            attendance: Some(Attendance::Accept),
            guests: Some(2),
            meal: Some(Meal::Vegetarian),
            drinks: DrinkSet::from_selection([Drink::Wine, Drink::Beer]),
            notes: "See you there".to_string(),
        };

        let json = serde_json::to_value(RsvpPayload::from(&submission)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "Asha",
                "phone": "5551234567",
                "attendance": "yes",
                "guests": "2",
                "mealPreference": "vegetarian",
                "drinks": "Beer, Wine",
                "notes": "See you there",
            })
        );
    }

    #[test]
    fn test_declined_payload_has_empty_dependent_fields() {
        let submission = Submission {
            name: "Asha".to_string(),
            phone: "5551234567".to_string(),
            attendance: Some(Attendance::Decline),
            ..Submission::default()
        };

        let payload = RsvpPayload::from(&submission);
        assert_eq!(payload.attendance, "no");
        assert_eq!(payload.guests, "");
        assert_eq!(payload.meal_preference, "");
        assert_eq!(payload.drinks, "");
    }
}
