use rusqlite::Row;
use serde::Serialize;

use crate::DbId;

/// A row of the `employee` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub role_id: DbId,
    pub manager_id: Option<DbId>,
}

impl Employee {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Employee {
            id: row.get("id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            role_id: row.get("role_id")?,
            manager_id: row.get("manager_id")?,
        })
    }

    /// "First Last", the form used wherever a person is picked or shown as a manager.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One line of the "View All Employees" listing.
///
/// Every employee appears, even one whose role, department or manager is missing; the joined
/// columns are `None` in that case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeListing {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub department: Option<String>,
    pub salary: Option<f64>,
    pub manager: Option<String>,
}

impl EmployeeListing {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(EmployeeListing {
            id: row.get("id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            title: row.get("title")?,
            department: row.get("department")?,
            salary: row.get("salary")?,
            manager: row.get("manager")?,
        })
    }
}

/// Answers collected by the "Add an Employee" flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub role_id: DbId,
    pub manager_id: Option<DbId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_is_first_then_last() {
        let ada = Employee {
            id: 1,
            first_name: String::from("Ada"),
            last_name: String::from("Lovelace"),
            role_id: 1,
            manager_id: None,
        };

        assert_eq!(ada.full_name(), "Ada Lovelace");
    }
}
