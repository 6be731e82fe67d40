use serde::{Deserialize, Serialize};

/// Entities whose detail pages count views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewTarget {
    News,
    InteractiveService,
    Decision,
}

impl ViewTarget {
    pub fn entity_type(self) -> &'static str {
        match self {
            ViewTarget::News => "news",
            ViewTarget::InteractiveService => "interactive_service",
            ViewTarget::Decision => "decision",
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            ViewTarget::News => "news",
            ViewTarget::InteractiveService => "interactive_services",
            ViewTarget::Decision => "decisions",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewTarget::News => "News",
            ViewTarget::InteractiveService => "Interactive service",
            ViewTarget::Decision => "Decision",
        }
    }

    /// `SELECT` expression counting hits for rows of `table()` aliased as `alias`.
    pub fn count_expr(self, alias: &str) -> String {
        format!(
            "(SELECT COUNT(*) FROM view_hits h WHERE h.entity_type = '{}' AND h.entity_id = {}.id)",
            self.entity_type(),
            alias
        )
    }
}
