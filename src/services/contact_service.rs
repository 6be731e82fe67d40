use sqlx::PgPool;

use crate::dto::common::{CheckedPayload, ListQuery};
use crate::dto::contact_dto::{ContactFields, ContactPatch, ContactPayload, ContactUpdate};
use crate::dto::pagination::{Listing, PageRequest};
use crate::error::{Error, Result};
use crate::models::contact::Contact;
use crate::models::translation::Language;
use crate::services::notification_service::NotificationService;
use crate::services::query::{fetch_page, Filter};

#[derive(Clone)]
pub struct ContactService {
    pool: PgPool,
    primary: Language,
    notifier: NotificationService,
}

impl ContactService {
    pub fn new(pool: PgPool, primary: Language, notifier: NotificationService) -> Self {
        Self {
            pool,
            primary,
            notifier,
        }
    }

    /// Persists the submission, then tries to relay it. Relay failures are
    /// logged inside the notifier and never undo the insert.
    pub async fn submit(&self, payload: ContactPayload) -> Result<Contact> {
        let payload = payload.trimmed();
        payload.check(self.primary)?;

        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (full_name, phone_number, email, message)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&payload.full_name)
        .bind(&payload.phone_number)
        .bind(&payload.email)
        .bind(&payload.message)
        .fetch_one(&self.pool)
        .await?;
        tracing::info!(contact_id = contact.id, "contact submission stored");

        self.notifier.notify_contact(&contact).await;
        Ok(contact)
    }

    pub async fn list(&self, query: &ListQuery, page: PageRequest) -> Result<Listing<Contact>> {
        let filter = Filter::new().eq_bool("is_read", query.is_read);
        fetch_page(
            &self.pool,
            "SELECT *",
            "FROM contacts",
            &filter,
            "ORDER BY created_date DESC, id DESC",
            page,
        )
        .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Contact> {
        let contact = sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(contact)
    }

    pub async fn update(&self, id: i64, fields: &ContactFields) -> Result<Contact> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts
            SET full_name = $2,
                phone_number = $3,
                email = $4,
                message = $5,
                is_read = $6,
                updated_date = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.payload.full_name)
        .bind(&fields.payload.phone_number)
        .bind(&fields.payload.email)
        .bind(&fields.payload.message)
        .bind(fields.is_read)
        .fetch_one(&self.pool)
        .await?;
        Ok(contact)
    }

    /// PUT: every text field is required; `is_read` keeps its value when
    /// omitted.
    pub async fn replace(&self, id: i64, update: ContactUpdate) -> Result<Contact> {
        let current = self.get_by_id(id).await?;
        let payload = update.payload.trimmed();
        payload.check(self.primary)?;
        let fields = ContactFields {
            payload,
            is_read: update.is_read.unwrap_or(current.is_read),
        };
        self.update(id, &fields).await
    }

    pub async fn patch(&self, id: i64, patch: ContactPatch) -> Result<Contact> {
        let current = self.get_by_id(id).await?;
        let mut fields = ContactFields::from(&current);
        patch.apply(&mut fields);
        fields.payload = fields.payload.trimmed();
        fields.payload.check(self.primary)?;
        self.update(id, &fields).await
    }

    pub async fn mark_as_read(&self, id: i64) -> Result<Contact> {
        let contact = sqlx::query_as::<_, Contact>(
            "UPDATE contacts SET is_read = TRUE, updated_date = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(contact)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Contact not found".to_string()));
        }
        Ok(())
    }
}
