//! Knowledge-base entity and snapshot types for folio.
//!
//! These types model the portfolio content the chatbot answers from:
//! skills, experiences, projects, certifications, the static personal-info
//! block, and the immutable snapshot that aggregates them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The four collections fetched from the data store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Skills,
    Experiences,
    Projects,
    Certifications,
}

impl Collection {
    /// Table name in the data store.
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Skills => "skills",
            Collection::Experiences => "experiences",
            Collection::Projects => "projects",
            Collection::Certifications => "certifications",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Skill category.
///
/// Maps to the CHECK constraint on `skills.category`. The derived `Ord`
/// follows declaration order, which is the order categories appear in
/// snapshots and prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Programming,
    Frameworks,
    Databases,
    Tools,
    AiMl,
    SoftSkills,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 6] = [
        SkillCategory::Programming,
        SkillCategory::Frameworks,
        SkillCategory::Databases,
        SkillCategory::Tools,
        SkillCategory::AiMl,
        SkillCategory::SoftSkills,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Programming => "programming",
            SkillCategory::Frameworks => "frameworks",
            SkillCategory::Databases => "databases",
            SkillCategory::Tools => "tools",
            SkillCategory::AiMl => "ai_ml",
            SkillCategory::SoftSkills => "soft_skills",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("invalid skill category: '{s}'"))
    }
}

/// A single skill row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: SkillCategory,
    /// Proficiency, 0-100.
    pub level: u8,
    pub years_experience: u32,
    pub description: Option<String>,
    pub display_order: i32,
    pub is_featured: bool,
}

/// Kind of experience entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceType {
    Work,
    Education,
    Project,
    Certification,
}

impl fmt::Display for ExperienceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceType::Work => write!(f, "work"),
            ExperienceType::Education => write!(f, "education"),
            ExperienceType::Project => write!(f, "project"),
            ExperienceType::Certification => write!(f, "certification"),
        }
    }
}

impl FromStr for ExperienceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "work" => Ok(ExperienceType::Work),
            "education" => Ok(ExperienceType::Education),
            "project" => Ok(ExperienceType::Project),
            "certification" => Ok(ExperienceType::Certification),
            other => Err(format!("invalid experience type: '{other}'")),
        }
    }
}

/// A work, education, project or certification period in the timeline.
///
/// Current experiences have no end date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    pub title: String,
    /// Company or school.
    pub organization: String,
    pub kind: ExperienceType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    pub description: String,
    pub achievements: Vec<String>,
    pub technologies: Vec<String>,
    pub location: Option<String>,
    pub display_order: i32,
}

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planned,
    InProgress,
    Completed,
    OnHold,
    Cancelled,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Planned => write!(f, "planned"),
            ProjectStatus::InProgress => write!(f, "in_progress"),
            ProjectStatus::Completed => write!(f, "completed"),
            ProjectStatus::OnHold => write!(f, "on_hold"),
            ProjectStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planned" => Ok(ProjectStatus::Planned),
            "in_progress" => Ok(ProjectStatus::InProgress),
            "completed" => Ok(ProjectStatus::Completed),
            "on_hold" => Ok(ProjectStatus::OnHold),
            "cancelled" => Ok(ProjectStatus::Cancelled),
            other => Err(format!("invalid project status: '{other}'")),
        }
    }
}

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    /// Free-form project type (e.g. "web_app", "ai_ml", "api").
    pub kind: String,
    pub description: String,
    pub long_description: Option<String>,
    pub technologies: Vec<String>,
    pub features: Vec<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub status: ProjectStatus,
    pub display_order: i32,
    pub is_featured: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// A professional certification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuing_organization: String,
    pub issue_date: NaiveDate,
    pub expiration_date: Option<NaiveDate>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    /// Skill tags associated with the certification.
    pub skills: Vec<String>,
    pub display_order: i32,
}

/// Static personal-info block.
///
/// Comes from configuration, never from the data store, so it survives a
/// store outage and is always present in the degraded snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub location: String,
    pub languages: Vec<String>,
    pub phone: Option<String>,
    pub linkedin: String,
    pub github: String,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            name: "Samuel FOTSO".to_string(),
            title: "Data Scientist".to_string(),
            email: "temmodaryl317@gmail.com".to_string(),
            location: "France".to_string(),
            languages: vec![
                "Français".to_string(),
                "Anglais".to_string(),
                "Allemand".to_string(),
            ],
            phone: None,
            linkedin: "https://www.linkedin.com/in/samuel-fotso-6b9879253/".to_string(),
            github: "https://github.com/samitochi04".to_string(),
        }
    }
}

/// Where a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotOrigin {
    /// All four collections loaded from the store.
    Store,
    /// Static personal info only, after a store failure or before first load.
    Degraded,
}

impl fmt::Display for SnapshotOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotOrigin::Store => write!(f, "store"),
            SnapshotOrigin::Degraded => write!(f, "degraded"),
        }
    }
}

/// An immutable, fully-populated view of the knowledge base.
///
/// Skills are grouped by category; inside each group skills keep display
/// order. Either every collection came from the same load or the snapshot
/// is degraded with all collections empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSnapshot {
    pub personal: PersonalInfo,
    pub skills: BTreeMap<SkillCategory, Vec<Skill>>,
    pub experiences: Vec<Experience>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub loaded_at: DateTime<Utc>,
    pub origin: SnapshotOrigin,
}

impl KnowledgeSnapshot {
    /// Build the degraded snapshot: personal info and empty collections.
    pub fn degraded(personal: PersonalInfo, loaded_at: DateTime<Utc>) -> Self {
        Self {
            personal,
            skills: BTreeMap::new(),
            experiences: Vec::new(),
            projects: Vec::new(),
            certifications: Vec::new(),
            loaded_at,
            origin: SnapshotOrigin::Degraded,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.origin == SnapshotOrigin::Degraded
    }

    /// Per-collection entity counts.
    pub fn counts(&self) -> SnapshotCounts {
        SnapshotCounts {
            skills: self.skills.values().map(Vec::len).sum(),
            experiences: self.experiences.len(),
            projects: self.projects.len(),
            certifications: self.certifications.len(),
        }
    }
}

/// Entity counts of a snapshot, for status reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotCounts {
    pub skills: usize,
    pub experiences: usize,
    pub projects: usize,
    pub certifications: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_category_roundtrip() {
        for category in SkillCategory::ALL {
            let parsed: SkillCategory = category.to_string().parse().unwrap();
            assert_eq!(category, parsed);
        }
    }

    #[test]
    fn test_skill_category_serde() {
        let json = serde_json::to_string(&SkillCategory::AiMl).unwrap();
        assert_eq!(json, "\"ai_ml\"");
        let parsed: SkillCategory = serde_json::from_str("\"soft_skills\"").unwrap();
        assert_eq!(parsed, SkillCategory::SoftSkills);
    }

    #[test]
    fn test_skill_category_order_follows_declaration() {
        let mut categories = vec![
            SkillCategory::Tools,
            SkillCategory::Programming,
            SkillCategory::SoftSkills,
            SkillCategory::Databases,
        ];
        categories.sort();
        assert_eq!(
            categories,
            vec![
                SkillCategory::Programming,
                SkillCategory::Databases,
                SkillCategory::Tools,
                SkillCategory::SoftSkills,
            ]
        );
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!("cooking".parse::<SkillCategory>().is_err());
    }

    #[test]
    fn test_project_status_roundtrip() {
        for status in [
            ProjectStatus::Planned,
            ProjectStatus::InProgress,
            ProjectStatus::Completed,
            ProjectStatus::OnHold,
            ProjectStatus::Cancelled,
        ] {
            let parsed: ProjectStatus = status.to_string().parse().unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_experience_type_roundtrip() {
        for kind in [
            ExperienceType::Work,
            ExperienceType::Education,
            ExperienceType::Project,
            ExperienceType::Certification,
        ] {
            let parsed: ExperienceType = kind.to_string().parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_degraded_snapshot_is_empty() {
        let snapshot = KnowledgeSnapshot::degraded(PersonalInfo::default(), Utc::now());
        assert!(snapshot.is_degraded());
        assert_eq!(snapshot.counts(), SnapshotCounts::default());
        assert_eq!(snapshot.personal.name, "Samuel FOTSO");
    }

    #[test]
    fn test_collection_display() {
        assert_eq!(Collection::Certifications.to_string(), "certifications");
    }
}
