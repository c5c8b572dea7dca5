// src/schema/mod.rs — Structured record types emitted by the extraction engine

pub mod validator;

use serde::{Deserialize, Serialize};

/// The full structured payload returned when a conversation is finalized.
///
/// One project, one-or-many talents. The earlier API revision emitted a
/// single `talent` object; the extractor normalizes that shape into `talents`
/// before this type ever sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectData {
    pub project: Project,
    pub talents: Vec<Talent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: String,
    pub budget: Budget,
    pub duration: ProjectDuration,
    #[serde(default)]
    pub published: bool,
    pub status: ProjectStatus,
    pub funds_status: FundsStatus,
    pub funds_until: String,
    #[serde(default)]
    pub is_fixed: bool,
    #[serde(default)]
    pub viewed: u32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub minimum: f64,
    pub total: f64,
    #[serde(default)]
    pub from: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDuration {
    pub total: f64,
    #[serde(rename = "type")]
    pub duration_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Talent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub budget: f64,
    pub experience: ExperienceLevel,
    pub payment: PaymentType,
    pub status: TalentStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Created,
    Progress,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundsStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Intermediate,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Fixed,
    Hourly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TalentStatus {
    Open,
    Filled,
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "project": {
                "id": "3f0c9f6e-8a21-4e53-b1f0-1c2d3e4f5a6b",
                "title": "E-Learning Platform",
                "slug": "e-learning-platform",
                "description": "Web based course platform",
                "image": "",
                "budget": {"minimum": 5000.0, "total": 15000.0, "from": 5000.0},
                "duration": {"total": 3.0, "type": "month"},
                "published": false,
                "status": "created",
                "fundsStatus": "pending",
                "fundsUntil": "2026-09-01T00:00:00Z",
                "isFixed": true,
                "viewed": 0,
                "createdAt": "2026-08-01T00:00:00Z",
                "updatedAt": "2026-08-01T00:00:00Z"
            },
            "talents": [{
                "id": "11111111-2222-3333-4444-555555555555",
                "name": "Frontend Developer",
                "description": null,
                "requirements": ["React", "TypeScript"],
                "budget": 7000.0,
                "experience": "intermediate",
                "payment": "fixed",
                "status": "open",
                "createdAt": "2026-08-01T00:00:00Z",
                "updatedAt": "2026-08-01T00:00:00Z"
            }]
        }"#
    }

    #[test]
    fn test_deserialize_camel_case_wire_format() {
        let data: ProjectData = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(data.project.title, "E-Learning Platform");
        assert_eq!(data.project.status, ProjectStatus::Created);
        assert_eq!(data.project.funds_status, FundsStatus::Pending);
        assert!(data.project.is_fixed);
        assert_eq!(data.talents.len(), 1);
        assert_eq!(data.talents[0].experience, ExperienceLevel::Intermediate);
        assert_eq!(data.talents[0].payment, PaymentType::Fixed);
    }

    #[test]
    fn test_serialize_uses_camel_case_keys() {
        let data: ProjectData = serde_json::from_str(sample_json()).unwrap();
        let value = serde_json::to_value(&data).unwrap();
        assert!(value["project"]["fundsStatus"].is_string());
        assert!(value["project"]["isFixed"].is_boolean());
        assert!(value["project"]["createdAt"].is_string());
        assert!(value["project"]["duration"]["type"].is_string());
        assert!(value["talents"][0]["createdAt"].is_string());
        // No snake_case leakage
        assert!(value["project"].get("funds_status").is_none());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = sample_json()
            .replace("\"description\": \"Web based course platform\",", "")
            .replace("\"requirements\": [\"React\", \"TypeScript\"],", "");
        let data: ProjectData = serde_json::from_str(&json).unwrap();
        assert!(data.project.description.is_none());
        assert!(data.talents[0].requirements.is_empty());
    }

    #[test]
    fn test_unknown_enum_value_rejected() {
        let json = sample_json().replace("\"created\"", "\"archived\"");
        assert!(serde_json::from_str::<ProjectData>(&json).is_err());
    }
}
