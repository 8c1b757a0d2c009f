use crate::employees::{Employee, EmployeeId, Salary};
use crate::store::RecordStore;
use std::io::{self, BufRead, Write};

const MENU: &str = "--- Employee Management System ---
1. Add an Employee
2. Display All Employees
3. Exit the Application
----------------------------------";

/// Interactive input and output streams shared by the menu handlers
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `message` without a newline and reads one line of input.
    /// Returns `None` once the input is exhausted. Bytes that are not UTF-8
    /// are replaced, so they reach the handlers as ordinary invalid input.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    pub fn say(&mut self, message: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuChoice {
    Add,
    List,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::List),
            "3" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("invalid employee ID {0:?}")]
    InvalidId(String),
    #[error("invalid salary {0:?}")]
    InvalidSalary(String),
    #[error("input ended before the record was complete")]
    EndOfInput,
    #[error("console error: {0}")]
    Console(#[from] io::Error),
}

/// Runs the menu until the user exits or the input ends.
///
/// Only console failures are returned; store and validation errors are
/// reported to the user and the loop continues.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &RecordStore,
) -> io::Result<()> {
    loop {
        console.say(MENU)?;
        let choice = match console.prompt("Enter your choice: ")? {
            Some(choice) => choice,
            None => {
                log::info!("Input closed, leaving menu");
                console.say("")?;
                return Ok(());
            }
        };

        match MenuChoice::parse(&choice) {
            Some(MenuChoice::Add) => add_employee(console, store)?,
            Some(MenuChoice::List) => display_all_employees(console, store)?,
            Some(MenuChoice::Exit) => {
                console.say("Exiting application. Goodbye!")?;
                return Ok(());
            }
            None => {
                log::debug!("Invalid menu choice {:?}", choice);
                console.say("Invalid choice. Please enter 1, 2, or 3.")?;
            }
        }
        console.say("")?;
    }
}

fn next_field<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    message: &str,
) -> Result<String, InputError> {
    console.prompt(message)?.ok_or(InputError::EndOfInput)
}

/// Collects one employee from the console, rejecting non numeric ID or salary
/// as soon as it is entered.
pub fn read_employee<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<Employee, InputError> {
    let id = next_field(console, "Enter Employee ID: ")?;
    let id: EmployeeId = id.parse().map_err(|_| InputError::InvalidId(id))?;
    let name = next_field(console, "Enter Employee Name: ")?;
    let designation = next_field(console, "Enter Employee Designation: ")?;
    let salary = next_field(console, "Enter Employee Salary: ")?;
    let salary: Salary = salary
        .parse()
        .map_err(|_| InputError::InvalidSalary(salary))?;
    Ok(Employee {
        id,
        name,
        designation,
        salary,
    })
}

pub fn add_employee<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &RecordStore,
) -> io::Result<()> {
    let employee = match read_employee(console) {
        Ok(employee) => employee,
        Err(InputError::Console(error)) => return Err(error),
        Err(InputError::EndOfInput) => return console.say(""),
        Err(error) => {
            log::warn!("Rejected employee input: {}", error);
            return console
                .say("Invalid input. Please enter correct numeric values for ID and Salary.");
        }
    };

    match store.append(&employee) {
        Ok(()) => console.say("Employee added successfully!"),
        Err(error) => {
            log::error!("Failed to append employee {}: {}", employee.id, error);
            console.say(format!(
                "An error occurred while writing to the file: {}",
                error
            ))
        }
    }
}

pub fn display_all_employees<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &RecordStore,
) -> io::Result<()> {
    console.say("\n--- All Employee Records ---")?;
    let mut shown = 0;
    let mut failure = None;
    match store.read_all() {
        Ok(records) => {
            for record in records {
                match record {
                    Ok(employee) => {
                        console.say(&employee)?;
                        shown += 1;
                    }
                    Err(error) => {
                        failure = Some(error);
                        break;
                    }
                }
            }
        }
        Err(error) => failure = Some(error),
    }

    if let Some(error) = failure {
        log::error!("Failed to read {}: {}", store.path().display(), error);
        console.say(format!(
            "Error reading employee records: {}. No further records available.",
            error
        ))?;
    } else if shown == 0 {
        console.say("No employee records found. Add an employee first.")?;
    }
    console.say("----------------------------")
}
