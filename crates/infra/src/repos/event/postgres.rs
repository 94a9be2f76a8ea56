use super::IEventRepo;
use calendar_domain::{from_naive_utc, CalendarEvent, ID};
use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: Uuid,
    user_uid: Uuid,
    title: String,
    description: Option<String>,
    start_datetime: NaiveDateTime,
    end_datetime: Option<NaiveDateTime>,
    is_all_day: bool,
    color: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl From<EventRaw> for CalendarEvent {
    fn from(raw: EventRaw) -> Self {
        Self {
            id: raw.event_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            description: raw.description,
            start: from_naive_utc(raw.start_datetime),
            end: raw.end_datetime.map(from_naive_utc),
            all_day: raw.is_all_day,
            color: raw.color,
            created: from_naive_utc(raw.created_at),
            updated: from_naive_utc(raw.updated_at),
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO calendar_events(
                event_uid,
                user_uid,
                title,
                description,
                start_datetime,
                end_datetime,
                is_all_day,
                color,
                created_at,
                updated_at
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(e.user_id.inner_ref())
        .bind(&e.title)
        .bind(&e.description)
        .bind(e.start.naive_utc())
        .bind(e.end.map(|end| end.naive_utc()))
        .bind(e.all_day)
        .bind(&e.color)
        .bind(e.created.naive_utc())
        .bind(e.updated.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE calendar_events SET
                title = $2,
                description = $3,
                start_datetime = $4,
                end_datetime = $5,
                is_all_day = $6,
                color = $7,
                updated_at = $8
            WHERE event_uid = $1
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(&e.title)
        .bind(&e.description)
        .bind(e.start.naive_utc())
        .bind(e.end.map(|end| end.naive_utc()))
        .bind(e.all_day)
        .bind(&e.color)
        .bind(e.updated.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>> {
        let event: Option<EventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM calendar_events AS e
            WHERE e.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(event.map(|e| e.into()))
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<CalendarEvent>> {
        let events: Vec<EventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM calendar_events AS e
            WHERE e.user_uid = $1
            ORDER BY e.start_datetime
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(events.into_iter().map(|e| e.into()).collect())
    }

    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>> {
        let event: Option<EventRaw> = sqlx::query_as(
            r#"
            DELETE FROM calendar_events AS e
            WHERE e.event_uid = $1
            RETURNING *
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(event.map(|e| e.into()))
    }
}
