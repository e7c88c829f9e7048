//! SQLite knowledge repository implementation.
//!
//! Implements `KnowledgeRepository` from `folio-core`: four ordered scans over
//! the reader pool, private Row structs, array columns decoded from JSON text.

use folio_core::knowledge::repository::KnowledgeRepository;
use folio_types::error::RepositoryError;
use folio_types::knowledge::{
    Certification, Experience, ExperienceType, Project, ProjectStatus, Skill, SkillCategory,
};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{parse_date, parse_optional_date, parse_string_list};

/// SQLite-backed implementation of `KnowledgeRepository`.
pub struct SqliteKnowledgeRepository {
    pool: DatabasePool,
}

impl SqliteKnowledgeRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn fetch_rows(&self, sql: &str) -> Result<Vec<sqlx::sqlite::SqliteRow>, RepositoryError> {
        sqlx::query(sql)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct SkillRow {
    id: String,
    name: String,
    category: String,
    level: i64,
    years_experience: i64,
    description: Option<String>,
    display_order: i64,
    is_featured: bool,
}

impl SkillRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            level: row.try_get("level")?,
            years_experience: row.try_get("years_experience")?,
            description: row.try_get("description")?,
            display_order: row.try_get("display_order")?,
            is_featured: row.try_get("is_featured")?,
        })
    }

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
            years_experience: self.years_experience.max(0) as u32,
            description: self.description,
            display_order: self.display_order as i32,
            is_featured: self.is_featured,
        })
    }
}

struct ExperienceRow {
    id: String,
    title: String,
    company: String,
    kind: String,
    start_date: String,
    end_date: Option<String>,
    is_current: bool,
    description: String,
    achievements: String,
    technologies: String,
    location: Option<String>,
    display_order: i64,
}

impl ExperienceRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            company: row.try_get("company")?,
            kind: row.try_get("type")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            is_current: row.try_get("is_current")?,
            description: row.try_get("description")?,
            achievements: row.try_get("achievements")?,
            technologies: row.try_get("technologies")?,
            location: row.try_get("location")?,
            display_order: row.try_get("display_order")?,
        })
    }

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
            start_date: parse_date(&self.start_date)?,
            end_date: parse_optional_date(self.end_date.as_deref())?,
            is_current: self.is_current,
            description: self.description,
            achievements: parse_string_list("achievements", &self.achievements)?,
            technologies: parse_string_list("technologies", &self.technologies)?,
            location: self.location,
            display_order: self.display_order as i32,
        })
    }
}

struct ProjectRow {
    id: String,
    title: String,
    kind: String,
    description: String,
    long_description: Option<String>,
    technologies: String,
    features: String,
    live_url: Option<String>,
    github_url: Option<String>,
    status: String,
    display_order: i64,
    is_featured: bool,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl ProjectRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            kind: row.try_get("type")?,
            description: row.try_get("description")?,
            long_description: row.try_get("long_description")?,
            technologies: row.try_get("technologies")?,
            features: row.try_get("features")?,
            live_url: row.try_get("live_url")?,
            github_url: row.try_get("github_url")?,
            status: row.try_get("status")?,
            display_order: row.try_get("display_order")?,
            is_featured: row.try_get("is_featured")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
        })
    }

    fn into_domain(self) -> Result<Project, RepositoryError> {
        let status: ProjectStatus = self
            .status
            .parse()
            .map_err(|e: String| RepositoryError::Decode(e))?;

        Ok(Project {
            id: self.id,
            title: self.title,
            kind: self.kind,
            description: self.description,
            long_description: self.long_description,
            technologies: parse_string_list("technologies", &self.technologies)?,
            features: parse_string_list("features", &self.features)?,
            live_url: self.live_url,
            github_url: self.github_url,
            status,
            display_order: self.display_order as i32,
            is_featured: self.is_featured,
            start_date: parse_optional_date(self.start_date.as_deref())?,
            end_date: parse_optional_date(self.end_date.as_deref())?,
        })
    }
}

struct CertificationRow {
    id: String,
    name: String,
    issuing_organization: String,
    issue_date: String,
    expiration_date: Option<String>,
    credential_id: Option<String>,
    credential_url: Option<String>,
    skills: String,
    display_order: i64,
}

impl CertificationRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            issuing_organization: row.try_get("issuing_organization")?,
            issue_date: row.try_get("issue_date")?,
            expiration_date: row.try_get("expiration_date")?,
            credential_id: row.try_get("credential_id")?,
            credential_url: row.try_get("credential_url")?,
            skills: row.try_get("skills")?,
            display_order: row.try_get("display_order")?,
        })
    }

    fn into_domain(self) -> Result<Certification, RepositoryError> {
        Ok(Certification {
            id: self.id,
            name: self.name,
            issuing_organization: self.issuing_organization,
            issue_date: parse_date(&self.issue_date)?,
            expiration_date: parse_optional_date(self.expiration_date.as_deref())?,
            credential_id: self.credential_id,
            credential_url: self.credential_url,
            skills: parse_string_list("skills", &self.skills)?,
            display_order: self.display_order as i32,
        })
    }
}

impl KnowledgeRepository for SqliteKnowledgeRepository {
    async fn list_skills(&self) -> Result<Vec<Skill>, RepositoryError> {
        let rows = self
            .fetch_rows("SELECT * FROM skills ORDER BY display_order ASC")
            .await?;

        let mut skills = Vec::with_capacity(rows.len());
        for row in &rows {
            let skill_row =
                SkillRow::from_row(row).map_err(|e| RepositoryError::Decode(e.to_string()))?;
            skills.push(skill_row.into_domain()?);
        }
        Ok(skills)
    }

    async fn list_experiences(&self) -> Result<Vec<Experience>, RepositoryError> {
        let rows = self
            .fetch_rows("SELECT * FROM experiences ORDER BY start_date DESC")
            .await?;

        let mut experiences = Vec::with_capacity(rows.len());
        for row in &rows {
            let experience_row =
                ExperienceRow::from_row(row).map_err(|e| RepositoryError::Decode(e.to_string()))?;
            experiences.push(experience_row.into_domain()?);
        }
        Ok(experiences)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, RepositoryError> {
        let rows = self
            .fetch_rows("SELECT * FROM projects ORDER BY display_order ASC")
            .await?;

        let mut projects = Vec::with_capacity(rows.len());
        for row in &rows {
            let project_row =
                ProjectRow::from_row(row).map_err(|e| RepositoryError::Decode(e.to_string()))?;
            projects.push(project_row.into_domain()?);
        }
        Ok(projects)
    }

    async fn list_certifications(&self) -> Result<Vec<Certification>, RepositoryError> {
        let rows = self
            .fetch_rows("SELECT * FROM certifications ORDER BY issue_date DESC")
            .await?;

        let mut certifications = Vec::with_capacity(rows.len());
        for row in &rows {
            let cert_row = CertificationRow::from_row(row)
                .map_err(|e| RepositoryError::Decode(e.to_string()))?;
            certifications.push(cert_row.into_domain()?);
        }
        Ok(certifications)
    }
}
