use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum_macros::{Display as GoalDisplay, EnumIter, EnumString};

pub mod entries;

/// Profile data returned by `GET /api/profile`. The backend sends more
/// columns than the UI needs; serde drops the rest.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub goal: Option<String>,
}

/// Fitness goal offered on the registration form. Wire form is lowercase.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, GoalDisplay, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Goal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

impl Goal {
    pub fn label(self) -> &'static str {
        match self {
            Goal::Lose => "Lose weight",
            Goal::Maintain => "Maintain",
            Goal::Gain => "Gain muscle",
        }
    }

    /// All goals, in form-display order.
    pub fn options() -> impl Iterator<Item = Goal> {
        <Goal as strum::IntoEnumIterator>::iter()
    }
}

/// One calorie-log record as stored by the backend.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CalorieEntry {
    pub id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub calories: f64,
    pub timestamp: String,
}

/// Body of `POST /api/calories`.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct NewEntry {
    pub description: String,
    pub calories: f64,
}

impl NewEntry {
    /// Entry built from the manual form. A blank description becomes
    /// "Manual"; blank or unparseable calories become 0, negatives clamp
    /// to 0 so a submitted count is never negative.
    pub fn manual(description: &str, calories_raw: &str) -> Self {
        let description = description.trim();
        let description = if description.is_empty() {
            "Manual".to_string()
        } else {
            description.to_string()
        };
        let calories = calories_raw.trim().parse::<f64>().unwrap_or(0.0).max(0.0);
        Self {
            description,
            calories,
        }
    }

    /// Entry built from a photo estimate the user chose to keep.
    pub fn from_estimate(estimate: &PhotoEstimate) -> Self {
        Self {
            description: "Photo estimate".to_string(),
            calories: estimate.total_calories,
        }
    }
}

/// Result of a photo analysis, alive only until the user saves or
/// discards it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PhotoEstimate {
    pub total_calories: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub items: Vec<EstimateItem>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EstimateItem {
    pub name: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub serving_size: String,
}

/// Confidence fraction rendered as a whole percentage, clamped to [0, 1].
pub fn confidence_percent(confidence: f64) -> u32 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u32
}

// Response envelopes for the JSON endpoints.

#[derive(Deserialize, Clone, Debug)]
pub struct ProfileResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub recs: Vec<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct EntriesResponse {
    #[serde(default)]
    pub items: Vec<CalorieEntry>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct UploadResponse {
    pub result: PhotoEstimate,
}

/// Shape of any non-2xx body: `{"error": "..."}`, both fields optional.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Failure of one backend call.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ApiError {
    #[display(fmt = "network error: {}", _0)]
    Network(String),
    #[display(fmt = "server returned {}: {}", status, message)]
    Server { status: u16, message: String },
    #[display(fmt = "unexpected response: {}", _0)]
    Decode(String),
}

impl ApiError {
    /// The backend-provided message when there is one, otherwise the
    /// per-action fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn profile_response_ignores_extra_columns() {
        let raw = r#"{
            "ok": true,
            "user": {
                "id": 3,
                "username": "ana",
                "password_hash": "x",
                "age": 31,
                "height_cm": 170.0,
                "weight_kg": 65.0,
                "bmi": 22.5,
                "goal": "maintain",
                "created_at": "2026-08-01T10:00:00"
            }
        }"#;
        let parsed: ProfileResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.ok);
        let user = parsed.user.unwrap();
        assert_eq!(user.username, "ana");
        assert_eq!(user.age, Some(31));
        assert_eq!(user.bmi, Some(22.5));
        assert_eq!(user.goal.as_deref(), Some("maintain"));
    }

    #[test]
    fn profile_response_tolerates_missing_fields() {
        let parsed: ProfileResponse =
            serde_json::from_str(r#"{"ok": false, "error": "not logged in"}"#).unwrap();
        assert!(!parsed.ok);
        assert!(parsed.user.is_none());

        let user: User = serde_json::from_str(r#"{"username": "bo"}"#).unwrap();
        assert_eq!(user.age, None);
        assert_eq!(user.bmi, None);
        assert_eq!(user.goal, None);
    }

    #[test]
    fn upload_response_decodes_estimate() {
        let raw = r#"{
            "ok": true,
            "result": {
                "total_calories": 450,
                "items": [
                    {"name": "Apple", "calories": 95, "confidence": 0.8, "serving_size": "1 medium"}
                ]
            }
        }"#;
        let parsed: UploadResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.result.total_calories, 450.0);
        assert_eq!(parsed.result.image_url, None);
        assert_eq!(parsed.result.items.len(), 1);
        let item = &parsed.result.items[0];
        assert_eq!(item.name, "Apple");
        assert_eq!(item.calories, 95.0);
        assert_eq!(confidence_percent(item.confidence), 80);
        assert_eq!(item.serving_size, "1 medium");
    }

    #[test]
    fn manual_entry_defaults_blank_fields() {
        let entry = NewEntry::manual("", "");
        assert_eq!(entry.description, "Manual");
        assert_eq!(entry.calories, 0.0);
    }

    #[test]
    fn manual_entry_keeps_provided_values() {
        let entry = NewEntry::manual("  Oatmeal  ", "310");
        assert_eq!(entry.description, "Oatmeal");
        assert_eq!(entry.calories, 310.0);
    }

    #[test]
    fn manual_entry_rejects_garbage_and_negative_calories() {
        assert_eq!(NewEntry::manual("Lunch", "abc").calories, 0.0);
        assert_eq!(NewEntry::manual("Lunch", "-40").calories, 0.0);
    }

    #[test]
    fn estimate_entry_uses_total_calories() {
        let estimate = PhotoEstimate {
            total_calories: 450.0,
            image_url: Some("/uploads/abc_pizza.jpg".into()),
            items: vec![],
        };
        let entry = NewEntry::from_estimate(&estimate);
        assert_eq!(entry.description, "Photo estimate");
        assert_eq!(entry.calories, 450.0);
    }

    #[test]
    fn new_entry_serializes_to_wire_shape() {
        let value = serde_json::to_value(NewEntry::manual("Toast", "79")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"description": "Toast", "calories": 79.0})
        );
    }

    #[test]
    fn confidence_percent_rounds_and_clamps() {
        assert_eq!(confidence_percent(0.8), 80);
        assert_eq!(confidence_percent(0.449), 45);
        assert_eq!(confidence_percent(1.7), 100);
        assert_eq!(confidence_percent(-0.3), 0);
    }

    #[test]
    fn goal_wire_form_is_lowercase() {
        assert_eq!(Goal::Lose.to_string(), "lose");
        assert_eq!(Goal::from_str("gain").unwrap(), Goal::Gain);
        assert_eq!(Goal::from_str("nonsense").ok(), None);
        assert_eq!(Goal::default(), Goal::Maintain);
        assert_eq!(serde_json::to_value(Goal::Maintain).unwrap(), "maintain");
    }

    #[test]
    fn goal_options_cover_every_choice() {
        let all: Vec<Goal> = Goal::options().collect();
        assert_eq!(all, vec![Goal::Lose, Goal::Maintain, Goal::Gain]);
    }

    #[test]
    fn api_error_prefers_server_message() {
        let err = ApiError::Server {
            status: 400,
            message: "username exists or bad data".into(),
        };
        assert_eq!(err.user_message("Registration failed"), "username exists or bad data");

        let blank = ApiError::Server {
            status: 500,
            message: String::new(),
        };
        assert_eq!(blank.user_message("Registration failed"), "Registration failed");
        assert_eq!(
            ApiError::Network("timeout".into()).user_message("Login failed"),
            "Login failed"
        );
    }
}
