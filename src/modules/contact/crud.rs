use crate::config::DbPool;
use crate::modules::contact::model::ContactMessage;

pub struct ContactCrud {
    pool: DbPool,
}

impl ContactCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, msg: &ContactMessage) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO contact_messages (id, name, email, subject, plan, message, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&msg.id)
        .bind(&msg.name)
        .bind(&msg.email)
        .bind(&msg.subject)
        .bind(&msg.plan)
        .bind(&msg.message)
        .bind(msg.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Newest first, for display.
    pub async fn list(&self) -> Result<Vec<ContactMessage>, sqlx::Error> {
        sqlx::query_as::<_, ContactMessage>(
            "SELECT * FROM contact_messages ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }
}
