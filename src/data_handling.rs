use rusqlite::params;

use crate::department::{Department, DepartmentListing};
use crate::gateway::{Result, Store};
use crate::personnel::{Employee, EmployeeListing, NewEmployee};
use crate::role::{NewRole, Role, RoleListing};
use crate::DbId;

const LIST_DEPARTMENTS: &str =
    "SELECT id AS department_id, name AS department_name FROM department";

const ALL_DEPARTMENTS: &str = "SELECT id, name FROM department";

const LIST_ROLES: &str = "
    SELECT role.id AS role_id, role.title, department.name AS department, role.salary
    FROM role
    LEFT JOIN department ON role.department_id = department.id";

const LIST_EMPLOYEES: &str = "
    SELECT employee.id, employee.first_name, employee.last_name, role.title,
           department.name AS department, role.salary,
           manager.first_name || ' ' || manager.last_name AS manager
    FROM employee
    LEFT JOIN role ON employee.role_id = role.id
    LEFT JOIN department ON role.department_id = department.id
    LEFT JOIN employee manager ON manager.id = employee.manager_id";

const ALL_ROLES: &str = "SELECT id, title, salary, department_id FROM role";

const ALL_EMPLOYEES: &str = "SELECT id, first_name, last_name, role_id, manager_id FROM employee";

const INSERT_DEPARTMENT: &str = "INSERT INTO department (name) VALUES (?1) RETURNING id, name";

const INSERT_ROLE: &str = "
    INSERT INTO role (title, salary, department_id) VALUES (?1, ?2, ?3)
    RETURNING id, title, salary, department_id";

const INSERT_EMPLOYEE: &str = "
    INSERT INTO employee (first_name, last_name, role_id, manager_id) VALUES (?1, ?2, ?3, ?4)
    RETURNING id, first_name, last_name, role_id, manager_id";

const UPDATE_EMPLOYEE_ROLE: &str = "
    UPDATE employee SET role_id = ?1 WHERE id = ?2
    RETURNING id, first_name, last_name, role_id, manager_id";

/// Directory and its methods are the main API for reading and changing department, role and
/// employee data.  Nothing is cached: every call is a fresh round trip to the store.
#[derive(Clone, Copy)]
pub struct Directory<'s> {
    store: &'s Store,
}

impl<'s> Directory<'s> {
    pub fn new(store: &'s Store) -> Self {
        Directory { store }
    }

    pub fn department_listing(&self) -> Result<Vec<DepartmentListing>> {
        self.store.query(LIST_DEPARTMENTS, params![], DepartmentListing::from_row)
    }

    /// All departments, in store order.  Feeds the department picker.
    pub fn departments(&self) -> Result<Vec<Department>> {
        self.store.query(ALL_DEPARTMENTS, params![], Department::from_row)
    }

    pub fn role_listing(&self) -> Result<Vec<RoleListing>> {
        self.store.query(LIST_ROLES, params![], RoleListing::from_row)
    }

    pub fn employee_listing(&self) -> Result<Vec<EmployeeListing>> {
        self.store.query(LIST_EMPLOYEES, params![], EmployeeListing::from_row)
    }

    pub fn roles(&self) -> Result<Vec<Role>> {
        self.store.query(ALL_ROLES, params![], Role::from_row)
    }

    pub fn employees(&self) -> Result<Vec<Employee>> {
        self.store.query(ALL_EMPLOYEES, params![], Employee::from_row)
    }

    pub fn add_department(&self, name: &str) -> Result<Department> {
        let department = self.store.query_returning(
            INSERT_DEPARTMENT,
            params![name],
            Department::from_row,
        )?;

        tracing::info!(id = department.id, name = %department.name, "department added");
        Ok(department)
    }

    /// Insert a role.  `department_id` must name an existing department; the store rejects it
    /// otherwise.
    pub fn add_role(&self, role: &NewRole) -> Result<Role> {
        let role = self.store.query_returning(
            INSERT_ROLE,
            params![role.title, role.salary, role.department_id],
            Role::from_row,
        )?;

        tracing::info!(id = role.id, title = %role.title, "role added");
        Ok(role)
    }

    pub fn add_employee(&self, employee: &NewEmployee) -> Result<Employee> {
        let employee = self.store.query_returning(
            INSERT_EMPLOYEE,
            params![
                employee.first_name,
                employee.last_name,
                employee.role_id,
                employee.manager_id,
            ],
            Employee::from_row,
        )?;

        tracing::info!(id = employee.id, manager = ?employee.manager_id, "employee added");
        Ok(employee)
    }

    /// Point an employee at a different role and return the updated row.  An unknown employee id
    /// is an error.
    pub fn update_employee_role(&self, employee_id: DbId, role_id: DbId) -> Result<Employee> {
        let employee = self.store.query_returning(
            UPDATE_EMPLOYEE_ROLE,
            params![role_id, employee_id],
            Employee::from_row,
        )?;

        tracing::info!(id = employee.id, role = employee.role_id, "employee role updated");
        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayError;

    fn engineer(directory: &Directory, department_id: DbId) -> Role {
        directory
            .add_role(&NewRole {
                title: String::from("Engineer"),
                salary: 90000.0,
                department_id,
            })
            .expect("add role")
    }

    fn hire(
        directory: &Directory,
        first: &str,
        last: &str,
        role_id: DbId,
        manager_id: Option<DbId>,
    ) -> Employee {
        directory
            .add_employee(&NewEmployee {
                first_name: String::from(first),
                last_name: String::from(last),
                role_id,
                manager_id,
            })
            .expect("add employee")
    }

    #[test]
    fn added_department_is_listed_with_fresh_id() {
        let store = Store::open_in_memory().unwrap();
        let directory = Directory::new(&store);

        let sales = directory.add_department("Sales").unwrap();
        let legal = directory.add_department("Legal").unwrap();
        assert_ne!(sales.id, legal.id);

        let listed = directory.departments().unwrap();
        assert_eq!(listed, vec![sales.clone(), legal.clone()]);

        assert_eq!(
            directory.department_listing().unwrap(),
            vec![
                DepartmentListing {
                    department_id: sales.id,
                    department_name: sales.name,
                },
                DepartmentListing {
                    department_id: legal.id,
                    department_name: legal.name,
                },
            ]
        );
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = Store::open_in_memory().unwrap();
        let directory = Directory::new(&store);

        let first = directory.add_department("Temp").unwrap();
        store.execute_batch("DELETE FROM department").unwrap();
        let second = directory.add_department("Temp").unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn role_listing_joins_department_name() {
        let store = Store::open_in_memory().unwrap();
        let directory = Directory::new(&store);

        directory.add_department("Sales").unwrap();
        let engineering = directory.add_department("Engineering").unwrap();
        let role = engineer(&directory, engineering.id);

        assert_eq!(role.department_id, engineering.id);
        assert_eq!(
            directory.role_listing().unwrap(),
            vec![RoleListing {
                role_id: role.id,
                title: String::from("Engineer"),
                department: Some(String::from("Engineering")),
                salary: 90000.0,
            }]
        );
    }

    #[test]
    fn role_listing_keeps_role_whose_department_vanished() {
        let store = Store::open_in_memory().unwrap();
        let directory = Directory::new(&store);

        let engineering = directory.add_department("Engineering").unwrap();
        engineer(&directory, engineering.id);
        store
            .execute_batch("PRAGMA foreign_keys = OFF; DELETE FROM department;")
            .unwrap();

        let listing = directory.role_listing().unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].department, None);
    }

    #[test]
    fn role_with_unknown_department_is_rejected() {
        let store = Store::open_in_memory().unwrap();
        let directory = Directory::new(&store);

        let result = directory.add_role(&NewRole {
            title: String::from("Ghost"),
            salary: 1.0,
            department_id: 99,
        });

        assert!(matches!(result, Err(GatewayError::Query(_))));
        assert!(directory.roles().unwrap().is_empty());
    }

    #[test]
    fn employee_without_manager_is_listed_with_empty_manager() {
        let store = Store::open_in_memory().unwrap();
        let directory = Directory::new(&store);

        let engineering = directory.add_department("Engineering").unwrap();
        let role = engineer(&directory, engineering.id);
        let ada = hire(&directory, "Ada", "Lovelace", role.id, None);

        assert_eq!(
            directory.employee_listing().unwrap(),
            vec![EmployeeListing {
                id: ada.id,
                first_name: String::from("Ada"),
                last_name: String::from("Lovelace"),
                title: Some(String::from("Engineer")),
                department: Some(String::from("Engineering")),
                salary: Some(90000.0),
                manager: None,
            }]
        );
    }

    #[test]
    fn manager_is_shown_by_full_name() {
        let store = Store::open_in_memory().unwrap();
        let directory = Directory::new(&store);

        let engineering = directory.add_department("Engineering").unwrap();
        let role = engineer(&directory, engineering.id);
        let ada = hire(&directory, "Ada", "Lovelace", role.id, None);
        let grace = hire(&directory, "Grace", "Hopper", role.id, Some(ada.id));

        assert_eq!(grace.manager_id, Some(ada.id));

        let listing = directory.employee_listing().unwrap();
        let row = listing.iter().find(|row| row.id == grace.id).expect("grace listed");
        assert_eq!(row.manager.as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn employee_with_unknown_manager_is_rejected() {
        let store = Store::open_in_memory().unwrap();
        let directory = Directory::new(&store);

        let engineering = directory.add_department("Engineering").unwrap();
        let role = engineer(&directory, engineering.id);
        let result = directory.add_employee(&NewEmployee {
            first_name: String::from("Nobody"),
            last_name: String::from("Atall"),
            role_id: role.id,
            manager_id: Some(7),
        });

        assert!(result.is_err());
    }

    #[test]
    fn updating_role_twice_is_idempotent() {
        let store = Store::open_in_memory().unwrap();
        let directory = Directory::new(&store);

        let engineering = directory.add_department("Engineering").unwrap();
        let role = engineer(&directory, engineering.id);
        let lead = directory
            .add_role(&NewRole {
                title: String::from("Lead"),
                salary: 120000.5,
                department_id: engineering.id,
            })
            .unwrap();
        let ada = hire(&directory, "Ada", "Lovelace", role.id, None);

        let first = directory.update_employee_role(ada.id, lead.id).unwrap();
        let second = directory.update_employee_role(ada.id, lead.id).unwrap();

        assert_eq!(first, second);
        assert_eq!(second.role_id, lead.id);
        assert_eq!(directory.employees().unwrap(), vec![second]);
    }

    #[test]
    fn updating_unknown_employee_fails() {
        let store = Store::open_in_memory().unwrap();
        let directory = Directory::new(&store);

        let engineering = directory.add_department("Engineering").unwrap();
        let role = engineer(&directory, engineering.id);

        assert!(directory.update_employee_role(404, role.id).is_err());
    }

    #[test]
    fn fractional_salary_survives() {
        let store = Store::open_in_memory().unwrap();
        let directory = Directory::new(&store);

        let ops = directory.add_department("Ops").unwrap();
        let role = directory
            .add_role(&NewRole {
                title: String::from("Analyst"),
                salary: 55000.75,
                department_id: ops.id,
            })
            .unwrap();

        assert_eq!(role.salary, 55000.75);
        assert_eq!(directory.roles().unwrap()[0].salary, 55000.75);
    }
}
