use serde::{Deserialize, Serialize};
use webshield_report::RecommendationRecord;

/// One breach record as relayed from the upstream breach index. Field names
/// follow the upstream PascalCase convention; fields the service omits
/// default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BreachRecord {
    pub name: String,
    pub title: String,
    pub domain: String,
    pub breach_date: String,
    pub data_classes: Vec<String>,
    pub is_verified: bool,
}

impl Default for BreachRecord {
    fn default() -> Self {
        BreachRecord {
            name: String::new(),
            title: String::new(),
            domain: String::new(),
            breach_date: String::new(),
            data_classes: Vec::new(),
            is_verified: false,
        }
    }
}

/// Response payload of the assessment service.
///
/// `email_breaches` and `password_pwned_count` are `None` when the service
/// could not reach its upstream index for that half of the check; the
/// recommendations then carry the corresponding warning record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResponse {
    #[serde(default)]
    pub email_breaches: Option<Vec<BreachRecord>>,
    #[serde(default)]
    pub password_pwned_count: Option<u64>,
    #[serde(default)]
    pub recommendations: Vec<RecommendationRecord>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl AssessmentResponse {
    /// Number of known breaches; an unavailable lookup counts as zero for
    /// the combiner (the recommendation list still surfaces the failure).
    pub fn breach_count(&self) -> u64 {
        self.email_breaches
            .as_ref()
            .map(|breaches| breaches.len() as u64)
            .unwrap_or(0)
    }

    pub fn password_pwned(&self) -> bool {
        self.password_pwned_count.unwrap_or(0) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webshield_report::Category;

    #[test]
    fn decodes_a_service_response() {
        let json = r#"{
            "email_breaches": [
                {"Name": "ExampleSite", "Title": "Example Site", "Domain": "example.com",
                 "BreachDate": "2019-03-01", "DataClasses": ["Email addresses", "Passwords"],
                 "IsVerified": true}
            ],
            "password_pwned_count": 1024,
            "recommendations": [
                {"type": "critical", "title": "Password Found in Breaches",
                 "description": "d", "action": "a"}
            ],
            "timestamp": "2024-01-01T00:00:00"
        }"#;
        let response: AssessmentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.breach_count(), 1);
        assert!(response.password_pwned());
        assert_eq!(response.recommendations[0].category, Category::Critical);
        assert_eq!(
            response.email_breaches.as_ref().unwrap()[0].domain,
            "example.com"
        );
    }

    #[test]
    fn null_lookups_read_as_unknown() {
        let json = r#"{"email_breaches": null, "password_pwned_count": null}"#;
        let response: AssessmentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.breach_count(), 0);
        assert!(!response.password_pwned());
        assert!(response.recommendations.is_empty());
    }
}
