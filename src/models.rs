//! Request and response types exchanged with the planner

use serde::{Deserialize, Serialize};

use crate::TravelAiError;

/// Area placeholder used in the summary prompt when no area is given
pub const DEFAULT_AREA: &str = "general area";
/// Interest placeholder used when the traveller lists none
pub const DEFAULT_INTERESTS: &str = "General exploration";

/// A single trip request as submitted by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelRequest {
    /// City or location to visit
    pub destination: String,
    /// Preferred area within the destination
    #[serde(default)]
    pub area: Option<String>,
    /// Number of days
    pub duration_days: i64,
    /// Total budget, in the configured currency
    pub budget: i64,
    /// Type of travel (budget, luxury, etc.)
    pub travel_type: String,
    /// List of interests, in the order given
    #[serde(default)]
    pub interests: Vec<String>,
}

impl TravelRequest {
    /// Check the request before any model is contacted.
    pub fn validate(&self) -> crate::Result<()> {
        if self.destination.trim().is_empty() {
            return Err(TravelAiError::validation(
                "destination",
                "destination must not be empty",
            ));
        }
        if self.travel_type.trim().is_empty() {
            return Err(TravelAiError::validation(
                "travel_type",
                "travel type must not be empty",
            ));
        }
        if self.duration_days <= 0 {
            return Err(TravelAiError::validation(
                "duration_days",
                format!("must be greater than 0, got {}", self.duration_days),
            ));
        }
        if self.budget <= 0 {
            return Err(TravelAiError::validation(
                "budget",
                format!("must be greater than 0, got {}", self.budget),
            ));
        }
        Ok(())
    }

    /// The area if one was given and is not blank
    #[must_use]
    pub fn area(&self) -> Option<&str> {
        self.area.as_deref().filter(|area| !area.trim().is_empty())
    }

    /// Area for display in the summary, falling back to [`DEFAULT_AREA`]
    #[must_use]
    pub fn area_or_default(&self) -> &str {
        self.area().unwrap_or(DEFAULT_AREA)
    }

    /// Where to look for accommodation: "area, destination" or just the destination
    #[must_use]
    pub fn stay_location(&self) -> String {
        match self.area() {
            Some(area) => format!("{area}, {}", self.destination),
            None => self.destination.clone(),
        }
    }

    /// Centre point for the sightseeing radius
    #[must_use]
    pub fn sightseeing_center(&self) -> &str {
        self.area().unwrap_or(&self.destination)
    }

    /// Interests joined with ", ", or [`DEFAULT_INTERESTS`] if there are none
    #[must_use]
    pub fn interests_text(&self) -> String {
        if self.interests.is_empty() {
            DEFAULT_INTERESTS.to_string()
        } else {
            self.interests.join(", ")
        }
    }
}

/// The generated plan returned to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelPlan {
    pub travel_summary: String,
    pub hotel_options: String,
    pub places_to_visit: String,
    pub cost_estimate: String,
    pub full_plan: String,
}

impl TravelPlan {
    /// Build a plan from the four generated sections, assembling `full_plan`.
    #[must_use]
    pub fn from_sections(
        travel_summary: String,
        hotel_options: String,
        places_to_visit: String,
        cost_estimate: String,
    ) -> Self {
        let full_plan = format!(
            "Travel Summary:\n{travel_summary}\n\n\
Hotel Options:\n{hotel_options}\n\n\
Places to Visit:\n{places_to_visit}\n\n\
Cost Estimate:\n{cost_estimate}"
        );
        Self {
            travel_summary,
            hotel_options,
            places_to_visit,
            cost_estimate,
            full_plan,
        }
    }

    /// Placeholder plan returned when no model credential is configured
    #[must_use]
    pub fn missing_credential() -> Self {
        Self {
            travel_summary: "Please set GOOGLE_API_KEY in .env file to use the travel planner."
                .to_string(),
            hotel_options: String::new(),
            places_to_visit: String::new(),
            cost_estimate: String::new(),
            full_plan: "Please configure your API key to generate travel plans.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn goa() -> TravelRequest {
        TravelRequest {
            destination: "Goa".to_string(),
            area: Some("Calangute".to_string()),
            duration_days: 3,
            budget: 30000,
            travel_type: "budget".to_string(),
            interests: vec!["beaches".to_string(), "nightlife".to_string()],
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(goa().validate().is_ok());
    }

    #[rstest]
    #[case::zero_days(0, 30000, "duration_days")]
    #[case::negative_days(-2, 30000, "duration_days")]
    #[case::zero_budget(3, 0, "budget")]
    #[case::negative_budget(3, -100, "budget")]
    fn test_non_positive_numbers_rejected(
        #[case] duration_days: i64,
        #[case] budget: i64,
        #[case] expected_field: &str,
    ) {
        let request = TravelRequest {
            duration_days,
            budget,
            ..goa()
        };
        match request.validate() {
            Err(TravelAiError::Validation { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[rstest]
    #[case::destination("", "budget", "destination")]
    #[case::blank_destination("   ", "budget", "destination")]
    #[case::travel_type("Goa", "", "travel_type")]
    fn test_empty_identifiers_rejected(
        #[case] destination: &str,
        #[case] travel_type: &str,
        #[case] expected_field: &str,
    ) {
        let request = TravelRequest {
            destination: destination.to_string(),
            travel_type: travel_type.to_string(),
            ..goa()
        };
        match request.validate() {
            Err(TravelAiError::Validation { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_area_fallbacks() {
        let with_area = goa();
        assert_eq!(with_area.area_or_default(), "Calangute");
        assert_eq!(with_area.stay_location(), "Calangute, Goa");
        assert_eq!(with_area.sightseeing_center(), "Calangute");

        let without_area = TravelRequest { area: None, ..goa() };
        assert_eq!(without_area.area_or_default(), DEFAULT_AREA);
        assert_eq!(without_area.stay_location(), "Goa");
        assert_eq!(without_area.sightseeing_center(), "Goa");
    }

    #[test]
    fn test_blank_area_treated_as_unset() {
        let blank = TravelRequest {
            area: Some("   ".to_string()),
            ..goa()
        };
        assert_eq!(blank.area(), None);
        assert_eq!(blank.area_or_default(), DEFAULT_AREA);
        assert_eq!(blank.stay_location(), "Goa");
        assert_eq!(blank.sightseeing_center(), "Goa");
    }

    #[test]
    fn test_interests_text() {
        assert_eq!(goa().interests_text(), "beaches, nightlife");
        let none = TravelRequest {
            interests: vec![],
            ..goa()
        };
        assert_eq!(none.interests_text(), DEFAULT_INTERESTS);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{"destination":"Jaipur","duration_days":2,"budget":15000,"travel_type":"luxury"}"#;
        let request: TravelRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.area, None);
        assert!(request.interests.is_empty());
    }

    #[test]
    fn test_full_plan_layout() {
        let plan = TravelPlan::from_sections(
            "S".to_string(),
            "H".to_string(),
            "P".to_string(),
            "C".to_string(),
        );
        assert_eq!(
            plan.full_plan,
            "Travel Summary:\nS\n\nHotel Options:\nH\n\nPlaces to Visit:\nP\n\nCost Estimate:\nC"
        );
    }

    #[test]
    fn test_missing_credential_plan_shape() {
        let plan = TravelPlan::missing_credential();
        assert!(plan.travel_summary.contains("GOOGLE_API_KEY"));
        assert!(!plan.full_plan.is_empty());
        assert!(plan.hotel_options.is_empty());
        assert!(plan.places_to_visit.is_empty());
        assert!(plan.cost_estimate.is_empty());
    }
}
