use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::Result;

const MAX_SLUG_LEN: usize = 300;
/// Room kept free for the `-N` suffix added on collisions.
const SUFFIX_ROOM: usize = 12;
const SLUG_RETRIES: usize = 3;

/// ASCII slug: lowercase alphanumerics separated by single hyphens. Characters
/// outside ASCII (apostrophes, Cyrillic) are dropped.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
        }
    }

    let slug = slug.trim_matches(|c| c == '-' || c == '_');
    slug.chars().take(MAX_SLUG_LEN - SUFFIX_ROOM).collect::<String>()
}

/// Slugified `base` cut short enough that `-<stamp>` always fits.
fn stamped(base: &str, stamp: &str) -> String {
    let room = MAX_SLUG_LEN - SUFFIX_ROOM - stamp.len() - 1;
    let base: String = slugify(base).chars().take(room).collect();
    let base = base.trim_end_matches(|c| c == '-' || c == '_');
    if base.is_empty() {
        stamp.to_string()
    } else {
        format!("{}-{}", base, stamp)
    }
}

/// `title-202605041530`
pub fn with_minute_stamp(base: &str, at: DateTime<Utc>) -> String {
    stamped(base, &at.format("%Y%m%d%H%M").to_string())
}

/// `title-20260504`
pub fn with_day_stamp(base: &str, at: DateTime<Utc>) -> String {
    stamped(base, &at.format("%Y%m%d").to_string())
}

/// Returns `base`, or `base-2`, `base-3`, ... whichever is not yet taken in
/// `table`. An empty base becomes `fallback`.
pub async fn next_free_slug(
    pool: &PgPool,
    table: &'static str,
    base: &str,
    fallback: &str,
) -> Result<String> {
    let base = if base.is_empty() { fallback } else { base };
    let query = format!(
        "SELECT slug FROM {} WHERE slug = $1 OR slug LIKE $2",
        table
    );
    let taken: Vec<String> = sqlx::query_scalar(&query)
        .bind(base)
        .bind(format!("{}-%", escape_like(base)))
        .fetch_all(pool)
        .await?;

    Ok(first_free(base, &taken))
}

/// Runs `insert` with the explicit slug when one was given, otherwise with a
/// free slug derived from `base`. A generated slug that loses a race to a
/// concurrent insert is recomputed.
pub async fn with_unique_slug<T, F, Fut>(
    pool: &PgPool,
    table: &'static str,
    explicit: Option<&str>,
    base: &str,
    fallback: &str,
    mut insert: F,
) -> Result<T>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if let Some(slug) = explicit {
        return insert(slug.to_string()).await;
    }

    let constraint = format!("{}_slug_key", table);
    let mut attempt = 0;
    loop {
        let slug = next_free_slug(pool, table, base, fallback).await?;
        match insert(slug).await {
            Err(err) if attempt < SLUG_RETRIES && err.is_unique_violation_on(&constraint) => {
                tracing::debug!(table, attempt, "slug collision, retrying");
                attempt += 1;
            }
            result => return result,
        }
    }
}

fn first_free(base: &str, taken: &[String]) -> String {
    if !taken.iter().any(|slug| slug == base) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken.iter().any(|slug| *slug == candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn slugify_collapses_separators_and_drops_symbols() {
        assert_eq!(slugify("  Suv  xo'jaligi -- yangiliklar! "), "suv-xojaligi-yangiliklar");
        assert_eq!(slugify("O‘zbekiston 2026"), "ozbekiston-2026");
    }

    #[test]
    fn slugify_drops_cyrillic_entirely() {
        assert_eq!(slugify("Новости"), "");
        assert_eq!(slugify("Новости 2026"), "2026");
    }

    #[test]
    fn stamps_use_utc_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 5, 4, 15, 30, 0).unwrap();
        assert_eq!(with_minute_stamp("Yangi nasos", at), "yangi-nasos-202605041530");
        assert_eq!(with_day_stamp("Qaror", at), "qaror-20260504");
        assert_eq!(with_day_stamp("Новости", at), "20260504");
    }

    #[test]
    fn long_titles_keep_their_stamp() {
        let at = Utc.with_ymd_and_hms(2026, 5, 4, 15, 30, 0).unwrap();
        let title = "suv ".repeat(200);

        let minute = with_minute_stamp(&title, at);
        assert!(minute.ends_with("-202605041530"), "{}", minute);
        assert!(minute.len() <= MAX_SLUG_LEN - SUFFIX_ROOM);
        assert!(!minute.contains("--"));

        let day = with_day_stamp(&title, at);
        assert!(day.ends_with("-20260504"), "{}", day);
        assert!(day.len() <= MAX_SLUG_LEN - SUFFIX_ROOM);
    }

    #[test]
    fn first_free_appends_counter() {
        let taken = vec!["news".to_string(), "news-2".to_string(), "news-extra".to_string()];
        assert_eq!(first_free("news", &taken), "news-3");
        assert_eq!(first_free("other", &taken), "other");
    }
}
