//! Dynamic WHERE/ORDER BY assembly for list endpoints.
//!
//! Column names always come from code; only values are bound.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::{FromRow, PgPool, Postgres};

use crate::dto::pagination::{Listing, PageRequest};
use crate::error::Result;
use crate::models::translation::Language;

#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    Text(String),
    Int(i64),
    Bool(bool),
}

#[derive(Debug, Default)]
pub struct Filter {
    clauses: Vec<String>,
    args: Vec<SqlArg>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, arg: SqlArg) -> usize {
        self.args.push(arg);
        self.args.len()
    }

    pub fn eq_int(mut self, column: &str, value: Option<i64>) -> Self {
        if let Some(value) = value {
            let n = self.push(SqlArg::Int(value));
            self.clauses.push(format!("{} = ${}", column, n));
        }
        self
    }

    pub fn eq_bool(mut self, column: &str, value: Option<bool>) -> Self {
        if let Some(value) = value {
            let n = self.push(SqlArg::Bool(value));
            self.clauses.push(format!("{} = ${}", column, n));
        }
        self
    }

    /// Exact match on one language variant of a translated column.
    pub fn eq_translated(mut self, column: &str, language: Language, value: Option<&str>) -> Self {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            let n = self.push(SqlArg::Text(value.to_string()));
            self.clauses
                .push(format!("{}->>'{}' = ${}", column, language.code(), n));
        }
        self
    }

    /// Case-insensitive substring match against every language variant of
    /// the given translated columns.
    pub fn search_translated(mut self, columns: &[&str], term: Option<&str>) -> Self {
        let Some(term) = term else {
            return self;
        };
        if columns.is_empty() {
            return self;
        }
        let n = self.push(SqlArg::Text(format!("%{}%", escape_like(term))));
        let any = columns
            .iter()
            .map(|column| {
                format!(
                    "EXISTS (SELECT 1 FROM jsonb_each_text(COALESCE({}, '{{}}'::jsonb)) tr WHERE tr.value ILIKE ${})",
                    column, n
                )
            })
            .collect::<Vec<_>>()
            .join(" OR ");
        self.clauses.push(format!("({})", any));
        self
    }

    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    /// Placeholder index for the next bound value after the filter's own.
    pub fn next_placeholder(&self) -> usize {
        self.args.len() + 1
    }

    pub fn bind_as<'q, O>(
        &self,
        mut query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for arg in &self.args {
            query = match arg {
                SqlArg::Text(v) => query.bind(v.clone()),
                SqlArg::Int(v) => query.bind(*v),
                SqlArg::Bool(v) => query.bind(*v),
            };
        }
        query
    }

    pub fn bind_scalar<'q, O>(
        &self,
        mut query: QueryScalar<'q, Postgres, O, PgArguments>,
    ) -> QueryScalar<'q, Postgres, O, PgArguments> {
        for arg in &self.args {
            query = match arg {
                SqlArg::Text(v) => query.bind(v.clone()),
                SqlArg::Int(v) => query.bind(*v),
                SqlArg::Bool(v) => query.bind(*v),
            };
        }
        query
    }
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Builds an ORDER BY from a comma-separated `?ordering=` value. Unknown
/// fields are ignored; `-` prefix sorts descending. `allowed` maps the public
/// field name to its SQL expression.
pub fn order_by(raw: Option<&str>, allowed: &[(&str, String)], default: &str) -> String {
    let mut parts = Vec::new();
    for field in raw.unwrap_or("").split(',').map(str::trim) {
        let (name, direction) = match field.strip_prefix('-') {
            Some(name) => (name, "DESC"),
            None => (field, "ASC"),
        };
        if let Some((_, expr)) = allowed.iter().find(|(public, _)| *public == name) {
            parts.push(format!("{} {}", expr, direction));
        }
    }
    if parts.is_empty() {
        format!("ORDER BY {}", default)
    } else {
        format!("ORDER BY {}", parts.join(", "))
    }
}

/// Counts the filtered rows, rejects out-of-range pages and fetches one page.
/// `select` is the column list, `from` the FROM clause with any joins.
pub async fn fetch_page<T>(
    pool: &PgPool,
    select: &str,
    from: &str,
    filter: &Filter,
    order: &str,
    page: PageRequest,
) -> Result<Listing<T>>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let where_clause = filter.where_clause();

    let count_sql = format!("SELECT COUNT(*) {} {}", from, where_clause);
    let total = filter
        .bind_scalar(sqlx::query_scalar::<_, i64>(&count_sql))
        .fetch_one(pool)
        .await?;
    let offset = page.ensure_in_range(total)?;

    let n = filter.next_placeholder();
    let sql = format!(
        "{} {} {} {} LIMIT ${} OFFSET ${}",
        select,
        from,
        where_clause,
        order,
        n,
        n + 1
    );
    let items = filter
        .bind_as(sqlx::query_as::<_, T>(&sql))
        .bind(page.per_page)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(Listing { items, total, page })
}

/// SQL expression for the primary-language value of a translated column.
pub fn primary_text(column: &str, primary: Language) -> String {
    format!("{}->>'{}'", column, primary.code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_where() {
        let filter = Filter::new().eq_int("v.leadership_id", None).search_translated(&["title"], None);
        assert_eq!(filter.where_clause(), "");
        assert_eq!(filter.next_placeholder(), 1);
    }

    #[test]
    fn placeholders_are_numbered_in_order() {
        let filter = Filter::new()
            .eq_int("v.leadership_id", Some(3))
            .eq_bool("is_read", Some(false))
            .search_translated(&["v.title", "v.description"], Some("suv"));
        let clause = filter.where_clause();
        assert!(clause.starts_with("WHERE v.leadership_id = $1 AND is_read = $2 AND ("));
        assert!(clause.contains("jsonb_each_text(COALESCE(v.description, '{}'::jsonb)) tr WHERE tr.value ILIKE $3"));
        assert_eq!(filter.args[2], SqlArg::Text("%suv%".into()));
        assert_eq!(filter.next_placeholder(), 4);
    }

    #[test]
    fn search_escapes_wildcards() {
        let filter = Filter::new().search_translated(&["title"], Some("100%_"));
        assert_eq!(filter.args[0], SqlArg::Text("%100\\%\\_%".into()));
    }

    #[test]
    fn category_filter_uses_language_key() {
        let filter = Filter::new().eq_translated("n.category", Language::UzLatn, Some(" Yangilik "));
        assert_eq!(filter.where_clause(), "WHERE n.category->>'uz' = $1");
        assert_eq!(filter.args[0], SqlArg::Text("Yangilik".into()));
    }

    #[test]
    fn ordering_whitelist() {
        let allowed = [
            ("created_date", "n.created_date".to_string()),
            ("title", primary_text("n.title", Language::UzLatn)),
        ];
        assert_eq!(
            order_by(Some("-title,created_date"), &allowed, "n.created_date DESC"),
            "ORDER BY n.title->>'uz' DESC, n.created_date ASC"
        );
        assert_eq!(
            order_by(Some("id; DROP TABLE news"), &allowed, "n.created_date DESC"),
            "ORDER BY n.created_date DESC"
        );
        assert_eq!(order_by(None, &allowed, "n.id DESC"), "ORDER BY n.id DESC");
    }
}
