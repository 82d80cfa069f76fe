use rusqlite::Row;
use serde::Serialize;

use crate::DbId;

/// A row of the `department` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    pub id: DbId,
    pub name: String,
}

impl Department {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Department {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

/// One line of the "View All Departments" listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentListing {
    pub department_id: DbId,
    pub department_name: String,
}

impl DepartmentListing {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(DepartmentListing {
            department_id: row.get("department_id")?,
            department_name: row.get("department_name")?,
        })
    }
}
