use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::contact::Contact;
use crate::utils::time::format_local;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Relays contact submissions to a Telegram chat through the Bot API.
#[derive(Clone)]
pub struct NotificationService {
    client: Client,
    api_base: String,
    bot_token: Option<String>,
    chat_id: Option<String>,
}

impl NotificationService {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.notify_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_base: config.telegram_api_base.trim_end_matches('/').to_string(),
            bot_token: config.telegram_bot_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
        })
    }

    /// `Ok(false)` when the bot is not configured; `Err` on transport
    /// failure or a non-2xx answer.
    pub async fn send_contact(&self, contact: &Contact) -> Result<bool> {
        let (Some(token), Some(chat_id)) = (self.bot_token.as_deref(), self.chat_id.as_deref())
        else {
            tracing::warn!("Telegram bot token or chat id missing, contact notification skipped");
            return Ok(false);
        };

        let text = contact_message(contact);
        let url = format!("{}/bot{}/sendMessage", self.api_base, token);
        let response = self
            .client
            .post(&url)
            .json(&SendMessageRequest {
                chat_id,
                text: &text,
                parse_mode: "HTML",
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Internal(format!(
                "Telegram API error ({}): {}",
                status, body
            )));
        }

        Ok(true)
    }

    /// Best effort: failures are logged and never reach the caller.
    pub async fn notify_contact(&self, contact: &Contact) {
        match self.send_contact(contact).await {
            Ok(true) => tracing::info!(contact_id = contact.id, "contact notification sent"),
            Ok(false) => {}
            Err(err) => {
                tracing::error!(contact_id = contact.id, error = %err, "contact notification failed")
            }
        }
    }
}

pub fn contact_message(contact: &Contact) -> String {
    format!(
        "📩 Yangi murojaat!\n\n👤 Ism: {}\n📞 Telefon: {}\n📧 Email: {}\n✉️ Xabar: {}\n⏰ Vaqt: {}",
        escape_html(&contact.full_name),
        escape_html(&contact.phone_number),
        escape_html(&contact.email),
        escape_html(&contact.message),
        format_local(contact.created_date),
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn contact() -> Contact {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 7, 30, 0).unwrap();
        Contact {
            id: 1,
            full_name: "Ali <b>Valiyev</b>".into(),
            phone_number: "+998901234567".into(),
            email: "ali@example.com".into(),
            message: "Suv & kanalizatsiya".into(),
            is_read: false,
            created_date: at,
            updated_date: at,
        }
    }

    #[test]
    fn message_escapes_user_text_and_uses_local_time() {
        let text = contact_message(&contact());
        assert!(text.starts_with("📩 Yangi murojaat!"));
        assert!(text.contains("👤 Ism: Ali &lt;b&gt;Valiyev&lt;/b&gt;"));
        assert!(text.contains("✉️ Xabar: Suv &amp; kanalizatsiya"));
        assert!(text.ends_with("⏰ Vaqt: 01.03.2026 12:30"));
    }
}
