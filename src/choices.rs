//! Turning looked-up rows into pick lists.

use crate::department::Department;
use crate::personnel::Employee;
use crate::role::Role;
use crate::DbId;

/// Label shown for "no manager".
pub const NO_MANAGER: &str = "None";

/// One selectable option: what the user sees, and what the program gets back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<V> {
    pub label: String,
    pub value: V,
}

impl<V> Choice<V> {
    pub fn new(label: impl Into<String>, value: V) -> Self {
        Choice {
            label: label.into(),
            value,
        }
    }
}

/// A row that can be offered in a pick list.
pub trait Selectable {
    fn id(&self) -> DbId;
    fn label(&self) -> String;
}

impl Selectable for Department {
    fn id(&self) -> DbId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Selectable for Role {
    fn id(&self) -> DbId {
        self.id
    }

    fn label(&self) -> String {
        self.title.clone()
    }
}

impl Selectable for Employee {
    fn id(&self) -> DbId {
        self.id
    }

    fn label(&self) -> String {
        self.full_name()
    }
}

/// Map rows to choices in the order the store returned them.  No filtering, sorting or
/// deduplication.
pub fn choices<T: Selectable>(rows: &[T]) -> Vec<Choice<DbId>> {
    rows.iter()
        .map(|row| Choice::new(row.label(), row.id()))
        .collect()
}

/// Manager pick list: "None" first, then every employee.  "None" is present even when there are
/// no employees at all.
pub fn manager_choices(employees: &[Employee]) -> Vec<Choice<Option<DbId>>> {
    let mut list = vec![Choice::new(NO_MANAGER, None)];
    list.extend(
        employees
            .iter()
            .map(|employee| Choice::new(employee.label(), Some(employee.id()))),
    );
    list
}
