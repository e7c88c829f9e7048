//! Test doubles and fixture builders shared by the unit tests in this crate.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;

use folio_types::chat::ConversationTurn;
use folio_types::error::RepositoryError;
use folio_types::knowledge::{
    Certification, Collection, Experience, ExperienceType, Project, ProjectStatus, Skill,
    SkillCategory,
};
use folio_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason, Usage,
};

use crate::chat::repository::ConversationRepository;
use crate::knowledge::loader::KnowledgeRows;
use crate::knowledge::repository::KnowledgeRepository;
use crate::llm::provider::LlmProvider;

// --- Fixture builders ---

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn skill(id: &str, name: &str, category: SkillCategory, level: u8, order: i32) -> Skill {
    Skill {
        id: id.to_string(),
        name: name.to_string(),
        category,
        level,
        years_experience: 3,
        description: Some(format!("{name} description")),
        display_order: order,
        is_featured: false,
    }
}

pub fn experience(
    id: &str,
    title: &str,
    organization: &str,
    start: NaiveDate,
    end: Option<NaiveDate>,
    is_current: bool,
) -> Experience {
    Experience {
        id: id.to_string(),
        title: title.to_string(),
        organization: organization.to_string(),
        kind: ExperienceType::Work,
        start_date: start,
        end_date: end,
        is_current,
        description: format!("{title} at {organization}, long description"),
        achievements: vec!["Shipped the pipeline".to_string()],
        technologies: vec!["Python".to_string()],
        location: Some("Paris".to_string()),
        display_order: 0,
    }
}

pub fn project(id: &str, title: &str, order: i32) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        kind: "web_app".to_string(),
        description: format!("{title} summary"),
        long_description: Some(format!("{title} long description")),
        technologies: vec!["React".to_string()],
        features: vec!["Chatbot".to_string()],
        live_url: None,
        github_url: Some("https://github.com/example/project".to_string()),
        status: ProjectStatus::Completed,
        display_order: order,
        is_featured: true,
        start_date: Some(date(2024, 1, 1)),
        end_date: None,
    }
}

pub fn certification(id: &str, name: &str, issued: NaiveDate) -> Certification {
    Certification {
        id: id.to_string(),
        name: name.to_string(),
        issuing_organization: "Coursera".to_string(),
        issue_date: issued,
        expiration_date: None,
        credential_id: Some("ABC123".to_string()),
        credential_url: None,
        skills: vec!["Machine Learning".to_string()],
        display_order: 0,
    }
}

// --- Knowledge repository ---

struct MockKnowledgeState {
    rows: KnowledgeRows,
    fail_on: Option<Collection>,
    delay: Option<Duration>,
    skill_calls: usize,
}

/// In-memory knowledge store. Clones share state so a test can keep a
/// control handle after moving the repository into a loader.
#[derive(Clone)]
pub struct MockKnowledgeRepository {
    state: Arc<Mutex<MockKnowledgeState>>,
}

impl MockKnowledgeRepository {
    pub fn new(rows: KnowledgeRows) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockKnowledgeState {
                rows,
                fail_on: None,
                delay: None,
                skill_calls: 0,
            })),
        }
    }

    /// Two skills, two experiences, one project, one certification.
    pub fn sample() -> Self {
        Self::new(KnowledgeRows {
            skills: vec![
                skill("skill-1", "Python", SkillCategory::Programming, 95, 1),
                skill("skill-2", "Git", SkillCategory::Tools, 90, 1),
            ],
            experiences: vec![
                experience(
                    "exp-1",
                    "Data Scientist Senior",
                    "TechCorp Solutions",
                    date(2023, 1, 15),
                    None,
                    true,
                ),
                experience(
                    "exp-2",
                    "Développeur Full Stack",
                    "InnoWeb Agency",
                    date(2021, 6, 1),
                    Some(date(2022, 12, 31)),
                    false,
                ),
            ],
            projects: vec![project("proj-1", "Portfolio Chatbot", 1)],
            certifications: vec![certification(
                "cert-1",
                "Machine Learning Specialization",
                date(2023, 3, 10),
            )],
        })
    }

    pub fn failing(self, collection: Collection) -> Self {
        self.fail_on(Some(collection));
        self
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().delay = Some(delay);
        self
    }

    pub fn fail_on(&self, collection: Option<Collection>) {
        self.state.lock().unwrap().fail_on = collection;
    }

    /// Set every skill's level, so tests can tell snapshots apart.
    pub fn set_skill_level(&self, level: u8) {
        let mut state = self.state.lock().unwrap();
        for skill in &mut state.rows.skills {
            skill.level = level;
        }
    }

    pub fn skill_calls(&self) -> usize {
        self.state.lock().unwrap().skill_calls
    }

    async fn respond<T: Send>(
        &self,
        collection: Collection,
        pick: impl FnOnce(&KnowledgeRows) -> Vec<T> + Send,
    ) -> Result<Vec<T>, RepositoryError> {
        let (delay, result) = {
            let mut state = self.state.lock().unwrap();
            if collection == Collection::Skills {
                state.skill_calls += 1;
            }
            let result = if state.fail_on == Some(collection) {
                Err(RepositoryError::Connection("simulated outage".to_string()))
            } else {
                Ok(pick(&state.rows))
            };
            (state.delay, result)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

impl KnowledgeRepository for MockKnowledgeRepository {
    async fn list_skills(&self) -> Result<Vec<Skill>, RepositoryError> {
        self.respond(Collection::Skills, |rows| rows.skills.clone()).await
    }

    async fn list_experiences(&self) -> Result<Vec<Experience>, RepositoryError> {
        self.respond(Collection::Experiences, |rows| rows.experiences.clone())
            .await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, RepositoryError> {
        self.respond(Collection::Projects, |rows| rows.projects.clone())
            .await
    }

    async fn list_certifications(&self) -> Result<Vec<Certification>, RepositoryError> {
        self.respond(Collection::Certifications, |rows| {
            rows.certifications.clone()
        })
        .await
    }
}

// --- Conversation repository ---

#[derive(Clone, Default)]
pub struct MockConversationRepository {
    turns: Arc<Mutex<Vec<ConversationTurn>>>,
    fail: bool,
}

impl MockConversationRepository {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn turns(&self) -> Vec<ConversationTurn> {
        self.turns.lock().unwrap().clone()
    }
}

impl ConversationRepository for MockConversationRepository {
    async fn save_turn(&self, turn: &ConversationTurn) -> Result<(), RepositoryError> {
        if self.fail {
            return Err(RepositoryError::Query("insert rejected".to_string()));
        }
        self.turns.lock().unwrap().push(turn.clone());
        Ok(())
    }

    async fn recent_turns(
        &self,
        session_id: &str,
        limit: u32,
    ) -> Result<Vec<ConversationTurn>, RepositoryError> {
        let turns = self.turns.lock().unwrap();
        let mut matching: Vec<_> = turns
            .iter()
            .filter(|t| t.session_id == session_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit as usize);
        Ok(matching)
    }
}

// --- LLM provider ---

#[derive(Clone)]
pub enum MockResult {
    Success(String),
    Empty,
    Error,
}

/// Provider returning a canned result and recording every request.
pub struct MockProvider {
    capabilities: ProviderCapabilities,
    result: MockResult,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    pub fn ok(content: &str) -> Self {
        Self::with_result(MockResult::Success(content.to_string()))
    }

    pub fn failing() -> Self {
        Self::with_result(MockResult::Error)
    }

    pub fn empty() -> Self {
        Self::with_result(MockResult::Empty)
    }

    fn with_result(result: MockResult) -> Self {
        Self {
            capabilities: ProviderCapabilities {
                max_context_tokens: 16_385,
                max_output_tokens: 4_096,
            },
            result,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle on the recorded requests.
    pub fn requests(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        let content = match &self.result {
            MockResult::Success(content) => content.clone(),
            MockResult::Empty => "   ".to_string(),
            MockResult::Error => {
                return Err(LlmError::Network("connection reset".to_string()));
            }
        };
        Ok(CompletionResponse {
            id: "resp-mock".to_string(),
            content,
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage {
                input_tokens: 120,
                output_tokens: 30,
            },
        })
    }
}
