//! Supabase knowledge repository.
//!
//! Each collection is one ordered PostgREST select. Rows are decoded into
//! private serde structs, then validated into domain types.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;

use folio_core::knowledge::repository::KnowledgeRepository;
use folio_types::error::RepositoryError;
use folio_types::knowledge::{
    Certification, Collection, Experience, ExperienceType, Project, ProjectStatus, Skill,
    SkillCategory,
};

use super::SupabaseClient;

pub struct SupabaseKnowledgeRepository {
    client: Arc<SupabaseClient>,
}

impl SupabaseKnowledgeRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }

    async fn select_ordered<T: serde::de::DeserializeOwned>(
        &self,
        collection: Collection,
        order: &str,
    ) -> Result<Vec<T>, RepositoryError> {
        self.client
            .select(
                collection.table(),
                &[("select", "*".to_string()), ("order", order.to_string())],
            )
            .await
    }
}

#[derive(Deserialize)]
struct SkillRow {
    id: String,
    name: String,
    category: String,
    level: i64,
    #[serde(default)]
    years_experience: Option<i64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    display_order: Option<i32>,
    #[serde(default)]
    is_featured: Option<bool>,
}

impl SkillRow {
    fn into_domain(self) -> Result<Skill, RepositoryError> {
        let category: SkillCategory = self
            .category
            .parse()
            .map_err(|e: String| RepositoryError::Decode(e))?;
        let level = u8::try_from(self.level)
            .ok()
            .filter(|l| *l <= 100)
            .ok_or_else(|| {
                RepositoryError::Decode(format!("skill level out of range: {}", self.level))
            })?;

        Ok(Skill {
            id: self.id,
            name: self.name,
            category,
            level,
            years_experience: self.years_experience.unwrap_or(0).max(0) as u32,
            description: self.description,
            display_order: self.display_order.unwrap_or(0),
            is_featured: self.is_featured.unwrap_or(false),
        })
    }
}

#[derive(Deserialize)]
struct ExperienceRow {
    id: String,
    title: String,
    company: String,
    #[serde(rename = "type")]
    kind: String,
    start_date: NaiveDate,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    is_current: Option<bool>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    achievements: Option<Vec<String>>,
    #[serde(default)]
    technologies: Option<Vec<String>>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    display_order: Option<i32>,
}

impl ExperienceRow {
    fn into_domain(self) -> Result<Experience, RepositoryError> {
        let kind: ExperienceType = self
            .kind
            .parse()
            .map_err(|e: String| RepositoryError::Decode(e))?;

        Ok(Experience {
            id: self.id,
            title: self.title,
            organization: self.company,
            kind,
            start_date: self.start_date,
            end_date: self.end_date,
            is_current: self.is_current.unwrap_or(false),
            description: self.description.unwrap_or_default(),
            achievements: self.achievements.unwrap_or_default(),
            technologies: self.technologies.unwrap_or_default(),
            location: self.location,
            display_order: self.display_order.unwrap_or(0),
        })
    }
}

#[derive(Deserialize)]
struct ProjectRow {
    id: String,
    title: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    long_description: Option<String>,
    #[serde(default)]
    technologies: Option<Vec<String>>,
    #[serde(default)]
    features: Option<Vec<String>>,
    #[serde(default)]
    live_url: Option<String>,
    #[serde(default)]
    github_url: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    display_order: Option<i32>,
    #[serde(default)]
    is_featured: Option<bool>,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
}

impl ProjectRow {
    fn into_domain(self) -> Result<Project, RepositoryError> {
        let status = match self.status.as_deref() {
            Some(s) => s
                .parse()
                .map_err(|e: String| RepositoryError::Decode(e))?,
            None => ProjectStatus::Completed,
        };

        Ok(Project {
            id: self.id,
            title: self.title,
            kind: self.kind.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            long_description: self.long_description,
            technologies: self.technologies.unwrap_or_default(),
            features: self.features.unwrap_or_default(),
            live_url: self.live_url,
            github_url: self.github_url,
            status,
            display_order: self.display_order.unwrap_or(0),
            is_featured: self.is_featured.unwrap_or(false),
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

#[derive(Deserialize)]
struct CertificationRow {
    id: String,
    name: String,
    issuing_organization: String,
    issue_date: NaiveDate,
    #[serde(default)]
    expiration_date: Option<NaiveDate>,
    #[serde(default)]
    credential_id: Option<String>,
    #[serde(default)]
    credential_url: Option<String>,
    #[serde(default)]
    skills: Option<Vec<String>>,
    #[serde(default)]
    display_order: Option<i32>,
}

impl CertificationRow {
    fn into_domain(self) -> Certification {
        Certification {
            id: self.id,
            name: self.name,
            issuing_organization: self.issuing_organization,
            issue_date: self.issue_date,
            expiration_date: self.expiration_date,
            credential_id: self.credential_id,
            credential_url: self.credential_url,
            skills: self.skills.unwrap_or_default(),
            display_order: self.display_order.unwrap_or(0),
        }
    }
}

impl KnowledgeRepository for SupabaseKnowledgeRepository {
    async fn list_skills(&self) -> Result<Vec<Skill>, RepositoryError> {
        let rows: Vec<SkillRow> = self
            .select_ordered(Collection::Skills, "display_order.asc")
            .await?;
        rows.into_iter().map(SkillRow::into_domain).collect()
    }

    async fn list_experiences(&self) -> Result<Vec<Experience>, RepositoryError> {
        let rows: Vec<ExperienceRow> = self
            .select_ordered(Collection::Experiences, "start_date.desc")
            .await?;
        rows.into_iter().map(ExperienceRow::into_domain).collect()
    }

    async fn list_projects(&self) -> Result<Vec<Project>, RepositoryError> {
        let rows: Vec<ProjectRow> = self
            .select_ordered(Collection::Projects, "display_order.asc")
            .await?;
        rows.into_iter().map(ProjectRow::into_domain).collect()
    }

    async fn list_certifications(&self) -> Result<Vec<Certification>, RepositoryError> {
        let rows: Vec<CertificationRow> = self
            .select_ordered(Collection::Certifications, "issue_date.desc")
            .await?;
        Ok(rows.into_iter().map(CertificationRow::into_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_row_from_postgrest_json() {
        let row: SkillRow = serde_json::from_value(serde_json::json!({
            "id": "6f1c0d5e-1111-4c8e-9d2a-000000000001",
            "name": "Python",
            "category": "programming",
            "level": 95,
            "years_experience": 4,
            "description": "Expert en développement Python",
            "is_featured": true,
            "display_order": 1,
            "created_at": "2024-01-01T00:00:00+00:00"
        }))
        .unwrap();

        let skill = row.into_domain().unwrap();
        assert_eq!(skill.category, SkillCategory::Programming);
        assert_eq!(skill.level, 95);
        assert!(skill.is_featured);
    }

    #[test]
    fn test_skill_level_out_of_range() {
        let row: SkillRow = serde_json::from_value(serde_json::json!({
            "id": "s1", "name": "X", "category": "tools", "level": 140
        }))
        .unwrap();
        assert!(matches!(row.into_domain(), Err(RepositoryError::Decode(_))));
    }

    #[test]
    fn test_experience_row_maps_company_and_type() {
        let row: ExperienceRow = serde_json::from_value(serde_json::json!({
            "id": "e1",
            "title": "Data Scientist Senior",
            "company": "TechCorp Solutions",
            "type": "work",
            "start_date": "2023-01-15",
            "end_date": null,
            "is_current": true,
            "description": "ML",
            "achievements": ["+35% précision"],
            "technologies": null,
            "location": "Paris, France",
            "display_order": 1
        }))
        .unwrap();

        let experience = row.into_domain().unwrap();
        assert_eq!(experience.organization, "TechCorp Solutions");
        assert_eq!(experience.kind, ExperienceType::Work);
        assert!(experience.is_current);
        assert!(experience.technologies.is_empty());
        assert_eq!(experience.achievements.len(), 1);
    }

    #[test]
    fn test_project_row_defaults() {
        let row: ProjectRow = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "title": "Portfolio 3D Interactif",
            "type": "web_app",
            "status": "in_progress",
            "technologies": ["React", "Three.js"]
        }))
        .unwrap();

        let project = row.into_domain().unwrap();
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.kind, "web_app");
        assert!(project.features.is_empty());
        assert!(!project.is_featured);
    }

    #[test]
    fn test_project_row_bad_status() {
        let row: ProjectRow = serde_json::from_value(serde_json::json!({
            "id": "p1", "title": "T", "status": "abandoned"
        }))
        .unwrap();
        assert!(matches!(row.into_domain(), Err(RepositoryError::Decode(_))));
    }

    #[test]
    fn test_certification_row() {
        let row: CertificationRow = serde_json::from_value(serde_json::json!({
            "id": "c1",
            "name": "AWS Certified Solutions Architect - Professional",
            "issuing_organization": "Amazon Web Services",
            "issue_date": "2023-08-15",
            "expiration_date": "2026-08-15",
            "credential_id": "AWS-PSA-2023-SF001",
            "skills": ["AWS", "Cloud Architecture"],
            "is_featured": true,
            "display_order": 1
        }))
        .unwrap();

        let cert = row.into_domain();
        assert_eq!(
            cert.expiration_date,
            NaiveDate::from_ymd_opt(2026, 8, 15)
        );
        assert_eq!(cert.skills, vec!["AWS", "Cloud Architecture"]);
    }
}
