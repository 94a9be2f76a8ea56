use super::{IReminderRepo, MarkSentResult};
use calendar_domain::{from_naive_utc, Reminder, ID};
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    event_uid: Uuid,
    reminder_time: NaiveDateTime,
    notification_sent: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        Self {
            id: raw.reminder_uid.into(),
            event_id: raw.event_uid.into(),
            remind_at: from_naive_utc(raw.reminder_time),
            notification_sent: raw.notification_sent,
            created: from_naive_utc(raw.created_at),
            updated: from_naive_utc(raw.updated_at),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, event_uid, reminder_time, notification_sent, created_at, updated_at)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.event_id.inner_ref())
        .bind(reminder.remind_at.naive_utc())
        .bind(reminder.notification_sent)
        .bind(reminder.created.naive_utc())
        .bind(reminder.updated.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let reminder: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder.map(|r| r.into()))
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.event_uid = $1
            ORDER BY r.reminder_time
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let reminder: Option<ReminderRaw> = sqlx::query_as(
            r#"
            DELETE FROM reminders AS r
            WHERE r.reminder_uid = $1
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder.map(|r| r.into()))
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            DELETE FROM reminders AS r
            WHERE r.event_uid = $1
            RETURNING *
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn find_due(&self, before: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_time <= $1 AND r.notification_sent = false
            ORDER BY r.reminder_time, r.reminder_uid
            "#,
        )
        .bind(before.naive_utc())
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn mark_sent(
        &self,
        reminder_id: &ID,
        now: DateTime<Utc>,
    ) -> anyhow::Result<MarkSentResult> {
        // Dropping the transaction without commit rolls it back
        let mut tx = self.pool.begin().await?;

        let sent: Option<(bool,)> = sqlx::query_as(
            r#"
            SELECT r.notification_sent FROM reminders AS r
            WHERE r.reminder_uid = $1
            FOR UPDATE
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&mut *tx)
        .await?;

        let res = match sent {
            None => MarkSentResult::NotFound,
            Some((true,)) => MarkSentResult::AlreadySent,
            Some((false,)) => {
                sqlx::query(
                    r#"
                    UPDATE reminders
                    SET notification_sent = true, updated_at = $2
                    WHERE reminder_uid = $1
                    "#,
                )
                .bind(reminder_id.inner_ref())
                .bind(now.naive_utc())
                .execute(&mut *tx)
                .await?;
                MarkSentResult::Sent
            }
        };
        tx.commit().await?;

        Ok(res)
    }
}
