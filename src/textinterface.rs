use std::io::{self, BufRead, Write};

use serde::Serialize;

use crate::choices::{self, Choice};
use crate::data_handling::Directory;
use crate::gateway::{GatewayError, Store};
use crate::personnel::NewEmployee;
use crate::role::NewRole;
use crate::table::Table;

pub type Result<T> = std::result::Result<T, TextInterfaceError>;

/// Entries of the top-level menu, in the order they are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewDepartments,
    ViewRoles,
    ViewEmployees,
    AddDepartment,
    AddRole,
    AddEmployee,
    UpdateEmployeeRole,
    Exit,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::ViewDepartments,
        Action::ViewRoles,
        Action::ViewEmployees,
        Action::AddDepartment,
        Action::AddRole,
        Action::AddEmployee,
        Action::UpdateEmployeeRole,
        Action::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::ViewDepartments => "View All Departments",
            Action::ViewRoles => "View All Roles",
            Action::ViewEmployees => "View All Employees",
            Action::AddDepartment => "Add a Department",
            Action::AddRole => "Add a Role",
            Action::AddEmployee => "Add an Employee",
            Action::UpdateEmployeeRole => "Update Employee Role",
            Action::Exit => "Exit",
        }
    }

    fn menu() -> Vec<Choice<Action>> {
        Action::ALL
            .iter()
            .map(|action| Choice::new(action.label(), *action))
            .collect()
    }
}

/// The interactive menu loop.  Borrows the store for its whole life; the caller closes the store
/// once [`TextInterface::run`] returns.
pub struct TextInterface<'s, R, W> {
    io: TextIO<R, W>,
    data: Directory<'s>,
}

impl<'s, R: BufRead, W: Write> TextInterface<'s, R, W> {
    pub fn init(store: &'s Store, input: R, output: W) -> Self {
        TextInterface {
            io: TextIO { input, output },
            data: Directory::new(store),
        }
    }

    /// Ask for an action, carry it out, repeat.  Returns `Ok(())` when Exit is chosen; nothing is
    /// read or run after that.  The first error ends the loop.
    pub fn run(&mut self) -> Result<()> {
        let menu = Action::menu();

        loop {
            let action = self.io.select("What would you like to do?", &menu)?;
            tracing::debug!(action = action.label(), "menu selection");

            match action {
                Action::ViewDepartments => self.view_departments()?,
                Action::ViewRoles => self.view_roles()?,
                Action::ViewEmployees => self.view_employees()?,
                Action::AddDepartment => self.add_department()?,
                Action::AddRole => self.add_role()?,
                Action::AddEmployee => self.add_employee()?,
                Action::UpdateEmployeeRole => self.update_employee_role()?,
                Action::Exit => return Ok(()),
            }
        }
    }

    /// Give back the output sink, e.g. to inspect what a scripted session printed.
    pub fn into_output(self) -> W {
        self.io.output
    }

    fn view_departments(&mut self) -> Result<()> {
        let rows = self.data.department_listing()?;
        self.show(&rows)
    }

    fn view_roles(&mut self) -> Result<()> {
        let rows = self.data.role_listing()?;
        self.show(&rows)
    }

    fn view_employees(&mut self) -> Result<()> {
        let rows = self.data.employee_listing()?;
        self.show(&rows)
    }

    fn show<T: Serialize>(&mut self, rows: &[T]) -> Result<()> {
        let table = Table::from_rows(rows)?;
        writeln!(self.io.output)?;
        write!(self.io.output, "{}", table)?;
        writeln!(self.io.output)?;
        self.io.output.flush()?;
        Ok(())
    }

    fn add_department(&mut self) -> Result<()> {
        let name = self.io.input("Enter the name of the department:")?;

        self.data.add_department(&name)?;
        self.io.say("Department added successfully!")
    }

    fn add_role(&mut self) -> Result<()> {
        let departments = self.data.departments()?;
        if departments.is_empty() {
            return self.io.say("Cannot add a role: no departments found.");
        }
        let department_choices = choices::choices(&departments);

        let title = self.io.input("Enter the title of the role:")?;
        let salary = self.io.input_salary("Enter the salary of the role:")?;
        let department_id = self
            .io
            .select("Select the department for the role:", &department_choices)?;

        self.data.add_role(&NewRole {
            title,
            salary,
            department_id,
        })?;
        self.io.say("Role added successfully!")
    }

    fn add_employee(&mut self) -> Result<()> {
        let roles = self.data.roles()?;
        if roles.is_empty() {
            return self.io.say("Cannot add an employee: no roles found.");
        }
        let role_choices = choices::choices(&roles);
        let manager_choices = choices::manager_choices(&self.data.employees()?);

        let first_name = self.io.input("Enter the employee's first name:")?;
        let last_name = self.io.input("Enter the employee's last name:")?;
        let role_id = self.io.select("Select the employee's role:", &role_choices)?;
        let manager_id = self
            .io
            .select("Select the employee's manager:", &manager_choices)?;

        self.data.add_employee(&NewEmployee {
            first_name,
            last_name,
            role_id,
            manager_id,
        })?;
        self.io.say("Employee added successfully!")
    }

    fn update_employee_role(&mut self) -> Result<()> {
        let employees = self.data.employees()?;
        if employees.is_empty() {
            return self.io.say("Cannot update a role: no employees found.");
        }
        let roles = self.data.roles()?;
        if roles.is_empty() {
            return self.io.say("Cannot update a role: no roles found.");
        }
        let employee_choices = choices::choices(&employees);
        let role_choices = choices::choices(&roles);

        let employee_id = self
            .io
            .select("Select the employee to update:", &employee_choices)?;
        let role_id = self
            .io
            .select("Select the new role for the employee:", &role_choices)?;

        self.data.update_employee_role(employee_id, role_id)?;
        self.io.say("Employee role updated successfully!")
    }
}

/// Prompt plumbing over any line reader and writer.
struct TextIO<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TextIO<R, W> {
    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        self.output.flush()?;
        Ok(())
    }

    fn read_answer(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{} ", prompt)?;
        self.output.flush()?;

        let mut io_buffer = String::new();
        if self.input.read_line(&mut io_buffer)? == 0 {
            return Err(TextInterfaceError::InputClosed);
        }

        Ok(String::from(io_buffer.trim()))
    }

    /// Free text; blank answers are asked again.
    fn input(&mut self, message: &str) -> Result<String> {
        loop {
            let answer = self.read_answer(&format!("? {}", message))?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.say("A value is required.")?;
        }
    }

    fn input_salary(&mut self, message: &str) -> Result<f64> {
        loop {
            let answer = self.read_answer(&format!("? {}", message))?;
            match answer.parse::<f64>() {
                Ok(salary) if salary.is_finite() && salary >= 0.0 => return Ok(salary),
                _ => self.say("Enter a non-negative number.")?,
            }
        }
    }

    /// Numbered pick list.  Anything but a listed number is asked again.
    fn select<V: Clone>(&mut self, message: &str, choices: &[Choice<V>]) -> Result<V> {
        if choices.is_empty() {
            return Err(TextInterfaceError::NoChoices(String::from(message)));
        }

        writeln!(self.output, "? {}", message)?;
        for (index, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {}", index + 1, choice.label)?;
        }

        loop {
            let answer = self.read_answer("?>")?;
            match answer.parse::<usize>() {
                Ok(number) if (1..=choices.len()).contains(&number) => {
                    return Ok(choices[number - 1].value.clone());
                }
                _ => self.say("Invalid selection.")?,
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TextInterfaceError {
    #[error("input closed before an answer was given")]
    InputClosed,

    #[error("nothing to choose from: {0}")]
    NoChoices(String),

    #[error(transparent)]
    Store(#[from] GatewayError),

    #[error("could not render table: {0}")]
    Render(#[from] serde_json::Error),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}
