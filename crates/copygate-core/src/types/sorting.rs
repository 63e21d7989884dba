//! Sorting types for list endpoints.
//!
//! The original service accepted arbitrary column names from the caller;
//! here the sortable columns are a closed enum so no caller-controlled
//! string ever reaches SQL.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Columns the request-files listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntityOrderBy {
    /// Entity name.
    #[default]
    Name,
    /// Upload timestamp.
    UploadedAt,
    /// File size in bytes.
    FileSize,
    /// Review status.
    ReviewStatus,
}

impl EntityOrderBy {
    /// Return the column name for this sort key.
    pub fn as_column(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::UploadedAt => "uploaded_at",
            Self::FileSize => "file_size",
            Self::ReviewStatus => "review_status",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_fragments() {
        assert_eq!(SortDirection::Desc.as_sql(), "DESC");
        assert_eq!(EntityOrderBy::UploadedAt.as_column(), "uploaded_at");
    }

    #[test]
    fn test_deserialize_from_query_values() {
        let order: EntityOrderBy = serde_json::from_str("\"file_size\"").unwrap();
        assert_eq!(order, EntityOrderBy::FileSize);
        let dir: SortDirection = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(dir, SortDirection::Desc);
    }
}
