#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::database::entity::{comment, post, user};
    use crate::database::postgres_repo::{
        PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
    };
    use scribe_core::domain::{Comment, Post, PostStatus};
    use scribe_core::ports::{BaseRepository, CommentRepository, UserRepository};

    fn count_row(n: i64) -> BTreeMap<&'static str, sea_orm::Value> {
        BTreeMap::from([("num_items", n.into())])
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                author_id,
                title: "Test Post".to_owned(),
                slug: "test-post".to_owned(),
                content: "Content".to_owned(),
                status: "published".to_owned(),
                view_count: 0,
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.status, PostStatus::Published);
    }

    #[tokio::test]
    async fn test_find_user_by_email() {
        let user_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: user_id,
                email: "reader@example.com".to_owned(),
                password_hash: "hash".to_owned(),
                display_name: "Reader".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let user = repo
            .find_by_email("reader@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.display_name, "Reader");
    }

    #[tokio::test]
    async fn test_comment_count_for_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(3)]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let count = repo.count_for_post(uuid::Uuid::new_v4()).await.unwrap();
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_save_new_comment_issues_an_insert() {
        // Domain ids are client-generated, so a fresh entity arrives with a
        // set primary key. Saving it must still insert, not update a row
        // that does not exist yet.
        let new_comment = Comment::new(uuid::Uuid::new_v4(), uuid::Uuid::new_v4(), "fresh".into());
        let returned = comment::Model {
            id: new_comment.id,
            post_id: new_comment.post_id,
            author_id: new_comment.author_id,
            body: new_comment.body.clone(),
            created_at: new_comment.created_at.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![returned]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let saved = repo.save(new_comment.clone()).await.unwrap();
        assert_eq!(saved.id, new_comment.id);

        let statements = repo
            .db
            .into_transaction_log()
            .iter()
            .flat_map(|txn| txn.statements())
            .map(|stmt| stmt.sql.clone())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(statements.contains(r#"INSERT INTO "comments""#));
        assert!(statements.contains("ON CONFLICT"));
        assert!(!statements.contains(r#"UPDATE "comments""#));
    }

    #[tokio::test]
    async fn test_delete_counting_missing_comment_is_noop() {
        // Lookup inside the transaction finds nothing; no delete is issued.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<comment::Model>::new()])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let result = repo.delete_counting(uuid::Uuid::new_v4()).await.unwrap();
        assert!(result.is_none());
    }
}
