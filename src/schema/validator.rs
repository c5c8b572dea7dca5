// src/schema/validator.rs — Validates generated payloads before they reach the caller
//
// A payload that fails here is never returned or persisted. The issue list is
// fed back into the repair prompt so the model can fix its own output.

use super::ProjectData;

/// Check a parsed payload for the constraints the type system can't express.
///
/// Returns every issue found, not just the first, so a single repair prompt
/// can address all of them.
pub fn validate(data: &ProjectData) -> Result<(), Vec<String>> {
    let mut issues = Vec::new();

    let project = &data.project;
    if project.id.trim().is_empty() {
        issues.push("project.id must not be empty".into());
    }
    if project.title.trim().is_empty() {
        issues.push("project.title must not be empty".into());
    }
    if project.slug.trim().is_empty() {
        issues.push("project.slug must not be empty".into());
    }
    if project.budget.total <= 0.0 {
        issues.push("project.budget.total must be positive".into());
    }
    if project.budget.minimum < 0.0 {
        issues.push("project.budget.minimum must not be negative".into());
    }
    if project.budget.minimum > project.budget.total {
        issues.push("project.budget.minimum must not exceed project.budget.total".into());
    }
    if project.duration.total <= 0.0 {
        issues.push("project.duration.total must be positive".into());
    }
    if project.duration.duration_type.trim().is_empty() {
        issues.push("project.duration.type must not be empty".into());
    }
    if project.funds_until.trim().is_empty() {
        issues.push("project.fundsUntil must not be empty".into());
    }

    if data.talents.is_empty() {
        issues.push("at least one talent is required".into());
    }
    for (i, talent) in data.talents.iter().enumerate() {
        if talent.id.trim().is_empty() {
            issues.push(format!("talents[{i}].id must not be empty"));
        }
        if talent.name.trim().is_empty() {
            issues.push(format!("talents[{i}].name must not be empty"));
        }
        if talent.requirements.iter().all(|r| r.trim().is_empty()) {
            issues.push(format!("talents[{i}].requirements must list at least one skill"));
        }
        if talent.budget <= 0.0 {
            issues.push(format!("talents[{i}].budget must be positive"));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::super::*;
    use super::*;

    fn valid_data() -> ProjectData {
        ProjectData {
            project: Project {
                id: "p-1".into(),
                title: "E-Learning Platform".into(),
                slug: "e-learning-platform".into(),
                description: Some("Course platform".into()),
                image: String::new(),
                budget: Budget {
                    minimum: 5_000.0,
                    total: 15_000.0,
                    from: Some(5_000.0),
                },
                duration: ProjectDuration {
                    total: 3.0,
                    duration_type: "month".into(),
                },
                published: false,
                status: ProjectStatus::Created,
                funds_status: FundsStatus::Pending,
                funds_until: "2026-09-01T00:00:00Z".into(),
                is_fixed: true,
                viewed: 0,
                created_at: "2026-08-01T00:00:00Z".into(),
                updated_at: "2026-08-01T00:00:00Z".into(),
            },
            talents: vec![Talent {
                id: "t-1".into(),
                name: "Backend Developer".into(),
                description: None,
                requirements: vec!["Rust".into(), "PostgreSQL".into()],
                budget: 8_000.0,
                experience: ExperienceLevel::Intermediate,
                payment: PaymentType::Fixed,
                status: TalentStatus::Open,
                created_at: "2026-08-01T00:00:00Z".into(),
                updated_at: "2026-08-01T00:00:00Z".into(),
            }],
        }
    }

    #[test]
    fn test_valid_payload_passes() {
        assert!(validate(&valid_data()).is_ok());
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut data = valid_data();
        data.project.title = "  ".into();
        let issues = validate(&data).unwrap_err();
        assert!(issues.iter().any(|i| i.contains("project.title")));
    }

    #[test]
    fn test_minimum_above_total_rejected() {
        let mut data = valid_data();
        data.project.budget.minimum = 20_000.0;
        let issues = validate(&data).unwrap_err();
        assert!(issues.iter().any(|i| i.contains("minimum")));
    }

    #[test]
    fn test_no_talents_rejected() {
        let mut data = valid_data();
        data.talents.clear();
        let issues = validate(&data).unwrap_err();
        assert!(issues.iter().any(|i| i.contains("at least one talent")));
    }

    #[test]
    fn test_empty_requirements_rejected() {
        let mut data = valid_data();
        data.talents[0].requirements = vec!["".into()];
        let issues = validate(&data).unwrap_err();
        assert!(issues.iter().any(|i| i.contains("requirements")));
    }

    #[test]
    fn test_all_issues_collected() {
        let mut data = valid_data();
        data.project.title = "".into();
        data.project.budget.total = 0.0;
        data.talents[0].name = "".into();
        let issues = validate(&data).unwrap_err();
        assert!(issues.len() >= 3);
    }
}
