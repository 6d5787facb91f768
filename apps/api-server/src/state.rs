//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{
    AiProvider, CommentRenderer, CommentRepository, EngagementRepository, NotificationQueue,
    NotificationRepository, PostRepository, UserRepository,
};
use scribe_infra::database::{DatabaseConfig, DatabaseConnections};
use scribe_infra::jobs::InMemoryNotificationQueue;
use scribe_infra::memory::{
    InMemoryCommentRepository, InMemoryEngagementRepository, InMemoryNotificationRepository,
    InMemoryPostRepository, InMemoryUserRepository,
};
use scribe_infra::render::HtmlCommentRenderer;
use scribe_infra::{OpenAiProvider, OpenAiProviderConfig};

#[cfg(feature = "postgres")]
use scribe_infra::database::{
    PostgresCommentRepository, PostgresEngagementRepository, PostgresNotificationRepository,
    PostgresPostRepository, PostgresUserRepository,
};

/// The repository set, built once against whichever backend is available.
struct Repositories {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    engagements: Arc<dyn EngagementRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            engagements: Arc::new(InMemoryEngagementRepository::new()),
            notifications: Arc::new(InMemoryNotificationRepository::new()),
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(conn: &DatabaseConnections) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(conn.main.clone())),
            posts: Arc::new(PostgresPostRepository::new(conn.main.clone())),
            comments: Arc::new(PostgresCommentRepository::new(conn.main.clone())),
            engagements: Arc::new(PostgresEngagementRepository::new(conn.main.clone())),
            notifications: Arc::new(PostgresNotificationRepository::new(conn.main.clone())),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub engagements: Arc<dyn EngagementRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub notify_queue: Arc<dyn NotificationQueue>,
    pub renderer: Arc<dyn CommentRenderer>,
    pub ai: Arc<dyn AiProvider>,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let (db, repos): (Option<Arc<DatabaseConnections>>, Repositories) = {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        let repos = Repositories::postgres(&connections);
                        (Some(Arc::new(connections)), repos)
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (None, Repositories::in_memory())
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, Repositories::in_memory())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (db, repos): (Option<Arc<DatabaseConnections>>, Repositories) = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repositories");
            (None, Repositories::in_memory())
        };

        let ai_config = OpenAiProviderConfig::from_env();
        if ai_config.api_key.is_none() {
            tracing::warn!(
                "OPENAI_API_KEY not set. AI metadata endpoints will answer structured failures."
            );
        }

        tracing::info!("Application state initialized");

        Self {
            users: repos.users,
            posts: repos.posts,
            comments: repos.comments,
            engagements: repos.engagements,
            notifications: repos.notifications,
            notify_queue: Arc::new(InMemoryNotificationQueue::from_env()),
            renderer: Arc::new(HtmlCommentRenderer),
            ai: Arc::new(OpenAiProvider::new(ai_config)),
            db,
        }
    }

    /// Fully in-memory state with an unconfigured provider.
    #[cfg(test)]
    pub(crate) fn in_memory_for_tests() -> Self {
        let repos = Repositories::in_memory();
        Self {
            users: repos.users,
            posts: repos.posts,
            comments: repos.comments,
            engagements: repos.engagements,
            notifications: repos.notifications,
            notify_queue: Arc::new(InMemoryNotificationQueue::new(
                scribe_infra::jobs::NotificationQueueConfig::default(),
            )),
            renderer: Arc::new(HtmlCommentRenderer),
            ai: Arc::new(OpenAiProvider::new(OpenAiProviderConfig::default())),
            db: None,
        }
    }
}
