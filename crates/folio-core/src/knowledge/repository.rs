//! KnowledgeRepository trait definition.
//!
//! Four ordered row scans, one per collection. No filtering, no writes.

use folio_types::error::RepositoryError;
use folio_types::knowledge::{Certification, Experience, Project, Skill};

/// Read-only access to the portfolio collections.
///
/// Implementations live in folio-infra (`SupabaseKnowledgeRepository`,
/// `SqliteKnowledgeRepository`). Each method returns every row of its
/// collection in natural display order; callers must not rely on that order
/// being honored and re-sort anyway.
pub trait KnowledgeRepository: Send + Sync {
    /// All skills, `display_order` ascending.
    fn list_skills(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Skill>, RepositoryError>> + Send;

    /// All experiences, `start_date` descending.
    fn list_experiences(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Experience>, RepositoryError>> + Send;

    /// All projects, `display_order` ascending.
    fn list_projects(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Project>, RepositoryError>> + Send;

    /// All certifications, `issue_date` descending.
    fn list_certifications(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Certification>, RepositoryError>> + Send;
}
