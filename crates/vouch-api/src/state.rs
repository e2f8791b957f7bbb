//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! AppState holds the in-memory stores for every record family plus the
//! injected external services: the trust anchor (cheqd Studio) and the
//! answer assessor (chat-completion grader). Both are optional — when
//! absent, the endpoints that need them return 503 instead of failing
//! startup.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use sqlx::PgPool;
use uuid::Uuid;

use vouch_core::{Did, QuizId};
use vouch_state::{Candidate, CredentialRecord, Issuer, QuizAttempt, QuizQuestion, SkillQuiz, Team};

use crate::orchestration::{Assessor, TrustAnchor};

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not
/// `tokio::sync`) because the lock is never held across `.await` points.
/// `parking_lot::RwLock` is non-poisonable — a panicking writer does not
/// permanently corrupt the store.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, id: Uuid, value: T) -> Option<T> {
        self.data.write().insert(id, value)
    }

    /// Retrieve a record by ID.
    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// List all records.
    pub fn list(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    /// Find the first record matching a predicate.
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.data.read().values().find(|v| pred(v)).cloned()
    }

    /// Atomically read-validate-update a record.
    ///
    /// The closure receives a `&mut T` and may inspect the current
    /// state, validate preconditions, mutate the record, and return
    /// `Ok(R)` or `Err(E)`. The entire operation runs under a single
    /// write lock, eliminating TOCTOU races between read and update.
    ///
    /// Returns `None` if the record doesn't exist, or `Some(result)`
    /// with the closure's `Result`.
    pub fn try_update<R, E>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        self.data.write().get_mut(id).map(f)
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Application Config -------------------------------------------------------

/// Server configuration assembled in `main.rs`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port to bind.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

// -- Application State --------------------------------------------------------

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub credentials: Store<CredentialRecord>,
    pub attempts: Store<QuizAttempt>,
    pub quizzes: Store<SkillQuiz>,
    pub issuers: Store<Issuer>,
    pub teams: Store<Team>,
    pub candidates: Store<Candidate>,
    /// Gateway for DID and credential anchoring. None — 503 for
    /// endpoints that need it.
    pub trust_anchor: Option<Arc<dyn TrustAnchor>>,
    /// Free-text answer grader. None — 503 for quiz attempts.
    pub assessor: Option<Arc<dyn Assessor>>,
    /// The DID used as issuer for Skill Pass credentials.
    pub platform_did: Option<Did>,
    /// Optional Postgres mirror.
    pub db: Option<PgPool>,
}

impl AppState {
    /// Create state with default config and no external services.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None, None, None, None)
    }

    /// Create state with explicit config and service wiring.
    pub fn with_config(
        config: AppConfig,
        trust_anchor: Option<Arc<dyn TrustAnchor>>,
        assessor: Option<Arc<dyn Assessor>>,
        platform_did: Option<Did>,
        db: Option<PgPool>,
    ) -> Self {
        let state = Self {
            config,
            credentials: Store::new(),
            attempts: Store::new(),
            quizzes: Store::new(),
            issuers: Store::new(),
            teams: Store::new(),
            candidates: Store::new(),
            trust_anchor,
            assessor,
            platform_did,
            db,
        };
        state.seed_quizzes();
        state
    }

    /// Seed the built-in skill quizzes.
    fn seed_quizzes(&self) {
        for quiz in builtin_quizzes() {
            self.quizzes.insert(*quiz.id.as_uuid(), quiz);
        }
    }

    /// Hydrate in-memory stores from the database, if connected.
    pub async fn hydrate_from_db(&self) -> Result<(), sqlx::Error> {
        let Some(pool) = &self.db else {
            return Ok(());
        };

        for record in crate::db::credentials::load_all(pool).await? {
            self.credentials.insert(*record.id.as_uuid(), record);
        }
        for attempt in crate::db::attempts::load_all(pool).await? {
            self.attempts.insert(*attempt.id.as_uuid(), attempt);
        }
        for team in crate::db::teams::load_all(pool).await? {
            self.teams.insert(*team.id.as_uuid(), team);
        }

        tracing::info!(
            credentials = self.credentials.len(),
            attempts = self.attempts.len(),
            teams = self.teams.len(),
            "hydrated in-memory stores from database"
        );
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in skill quiz catalogue.
fn builtin_quizzes() -> Vec<SkillQuiz> {
    vec![
        SkillQuiz {
            id: QuizId::new(),
            title: "HTML Basics".to_string(),
            description: "Semantic markup, forms, and document structure.".to_string(),
            questions: vec![
                QuizQuestion {
                    id: 1,
                    prompt: "Explain the difference between block-level and inline elements, \
                             with two examples of each."
                        .to_string(),
                },
                QuizQuestion {
                    id: 2,
                    prompt: "What does semantic HTML mean, and why does it matter for \
                             accessibility?"
                        .to_string(),
                },
                QuizQuestion {
                    id: 3,
                    prompt: "Describe how a form submits data to a server, including the role \
                             of the method and action attributes."
                        .to_string(),
                },
            ],
        },
        SkillQuiz {
            id: QuizId::new(),
            title: "JavaScript Fundamentals".to_string(),
            description: "Closures, the event loop, and asynchronous control flow.".to_string(),
            questions: vec![
                QuizQuestion {
                    id: 1,
                    prompt: "What is a closure? Give a practical example of where one is useful."
                        .to_string(),
                },
                QuizQuestion {
                    id: 2,
                    prompt: "Explain how the event loop processes promises versus setTimeout \
                             callbacks."
                        .to_string(),
                },
                QuizQuestion {
                    id: 3,
                    prompt: "Compare var, let, and const with respect to scoping and \
                             re-assignment."
                        .to_string(),
                },
            ],
        },
        SkillQuiz {
            id: QuizId::new(),
            title: "SQL Essentials".to_string(),
            description: "Joins, aggregation, and transactional guarantees.".to_string(),
            questions: vec![
                QuizQuestion {
                    id: 1,
                    prompt: "Explain the difference between an INNER JOIN and a LEFT JOIN, \
                             with an example query."
                        .to_string(),
                },
                QuizQuestion {
                    id: 2,
                    prompt: "What does the GROUP BY clause do, and how does HAVING differ \
                             from WHERE?"
                        .to_string(),
                },
                QuizQuestion {
                    id: 3,
                    prompt: "Describe what ACID guarantees a transaction provides.".to_string(),
                },
            ],
        },
    ]
}
