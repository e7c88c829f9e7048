//! Knowledge store loader.
//!
//! Fetches the four collections concurrently and turns the raw rows into a
//! [`KnowledgeSnapshot`]. The row-to-snapshot step is a pure function so it
//! can be tested without a store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use folio_types::error::{KnowledgeError, RepositoryError};
use folio_types::knowledge::{
    Certification, Collection, Experience, KnowledgeSnapshot, PersonalInfo, Project, Skill,
    SkillCategory, SnapshotOrigin,
};

use super::repository::KnowledgeRepository;

/// Raw rows of one load, as returned by the store.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeRows {
    pub skills: Vec<Skill>,
    pub experiences: Vec<Experience>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
}

/// Loads complete snapshots from a [`KnowledgeRepository`].
pub struct KnowledgeLoader<R: KnowledgeRepository> {
    repo: R,
    personal: PersonalInfo,
}

impl<R: KnowledgeRepository> KnowledgeLoader<R> {
    pub fn new(repo: R, personal: PersonalInfo) -> Self {
        Self { repo, personal }
    }

    /// Fetch all four collections and build a snapshot.
    ///
    /// Fails as a whole if any single fetch fails; the error names the
    /// failing collection and no partial data escapes.
    pub async fn load(&self) -> Result<KnowledgeSnapshot, KnowledgeError> {
        let (skills, experiences, projects, certifications) = tokio::try_join!(
            fetch(Collection::Skills, self.repo.list_skills()),
            fetch(Collection::Experiences, self.repo.list_experiences()),
            fetch(Collection::Projects, self.repo.list_projects()),
            fetch(Collection::Certifications, self.repo.list_certifications()),
        )?;

        debug!(
            skills = skills.len(),
            experiences = experiences.len(),
            projects = projects.len(),
            certifications = certifications.len(),
            "Knowledge rows fetched"
        );

        let rows = KnowledgeRows {
            skills,
            experiences,
            projects,
            certifications,
        };
        Ok(to_snapshot(rows, self.personal.clone(), Utc::now()))
    }

    /// The static personal-info-only snapshot.
    pub fn degraded_snapshot(&self) -> KnowledgeSnapshot {
        degraded_snapshot(&self.personal)
    }
}

async fn fetch<T>(
    collection: Collection,
    query: impl std::future::Future<Output = Result<Vec<T>, RepositoryError>>,
) -> Result<Vec<T>, KnowledgeError> {
    query
        .await
        .map_err(|reason| KnowledgeError::StoreUnavailable { collection, reason })
}

/// Group and order raw rows into a snapshot.
///
/// Sorting is stable and independent of the order the store returned:
/// skills and projects by `display_order` ascending, experiences by
/// `start_date` descending, certifications by `issue_date` descending.
/// Skills are grouped by category; within a group they keep display order.
pub fn to_snapshot(
    rows: KnowledgeRows,
    personal: PersonalInfo,
    loaded_at: DateTime<Utc>,
) -> KnowledgeSnapshot {
    let KnowledgeRows {
        mut skills,
        mut experiences,
        mut projects,
        mut certifications,
    } = rows;

    skills.sort_by_key(|s| s.display_order);
    let mut grouped: BTreeMap<SkillCategory, Vec<Skill>> = BTreeMap::new();
    for skill in skills {
        grouped.entry(skill.category).or_default().push(skill);
    }

    experiences.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    projects.sort_by_key(|p| p.display_order);
    certifications.sort_by(|a, b| b.issue_date.cmp(&a.issue_date));

    KnowledgeSnapshot {
        personal,
        skills: grouped,
        experiences,
        projects,
        certifications,
        loaded_at,
        origin: SnapshotOrigin::Store,
    }
}

/// Personal info and empty collections, stamped now.
pub fn degraded_snapshot(personal: &PersonalInfo) -> KnowledgeSnapshot {
    KnowledgeSnapshot::degraded(personal.clone(), Utc::now())
}
