use rusqlite::Row;
use serde::Serialize;

use crate::DbId;

/// A row of the `role` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Role {
    pub id: DbId,
    pub title: String,
    pub salary: f64,
    pub department_id: DbId,
}

impl Role {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Role {
            id: row.get("id")?,
            title: row.get("title")?,
            salary: row.get("salary")?,
            department_id: row.get("department_id")?,
        })
    }
}

/// One line of the "View All Roles" listing.  `department` is `None` when the role points at a
/// department that no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleListing {
    pub role_id: DbId,
    pub title: String,
    pub department: Option<String>,
    pub salary: f64,
}

impl RoleListing {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RoleListing {
            role_id: row.get("role_id")?,
            title: row.get("title")?,
            department: row.get("department")?,
            salary: row.get("salary")?,
        })
    }
}

/// Answers collected by the "Add a Role" flow.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRole {
    pub title: String,
    pub salary: f64,
    pub department_id: DbId,
}
