use serde::Serialize;
use std::fmt;
use std::io::Write;

/// Caller supplied employee number, not checked for uniqueness.
pub type EmployeeId = i32;
/// Salary amount.
pub type Salary = f64;

/// Number of comma separated fields of a stored line
pub const FIELD_COUNT: usize = 4;

/// Line ending written after every stored line
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// One employee entry. Field order is the on-disk column order.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Employee {
    /// Employee number.
    pub id: EmployeeId,
    /// Full name.
    pub name: String,
    /// Job title.
    pub designation: String,
    /// Salary amount.
    pub salary: Salary,
}

impl Employee {
    /// Builds an employee from its four fields.
    pub fn new(
        id: EmployeeId,
        name: impl Into<String>,
        designation: impl Into<String>,
        salary: Salary,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            designation: designation.into(),
            salary,
        }
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug keeps the trailing ".0" on integral salaries
        write!(
            f,
            "Employee ID: {} | Name: {} | Designation: {} | Salary: {:?}",
            self.id, self.name, self.designation, self.salary
        )
    }
}

/// Reasons an employee cannot be turned into a stored line.
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    /// A text field holds `\n` or `\r`, which would split the record.
    #[error("{0} must not contain a line break")]
    LineBreak(&'static str),
    /// The csv writer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// The csv writer could not flush its buffer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer)
}

fn csv_reader<R: std::io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

fn check_single_line(field: &'static str, value: &str) -> Result<(), FormatError> {
    if value.contains(&['\r', '\n'][..]) {
        return Err(FormatError::LineBreak(field));
    }
    Ok(())
}

/// Converts a raw csv row into an employee. Rows with the wrong field count
/// or with unparsable numbers are rejected with `None`. Text fields are kept
/// as written; only the numeric columns are trimmed.
fn from_csv_record(record: &csv::StringRecord) -> Option<Employee> {
    if record.len() != FIELD_COUNT {
        return None;
    }
    Some(Employee {
        id: record[0].trim().parse().ok()?,
        name: record[1].to_string(),
        designation: record[2].to_string(),
        salary: record[3].trim().parse().ok()?,
    })
}

/// Formats an employee as a single stored line, without line ending.
///
/// Text fields holding a comma or a quote are quoted so the line still splits
/// into exactly four fields. Line breaks are rejected.
pub fn format_line(employee: &Employee) -> Result<String, FormatError> {
    check_single_line("name", &employee.name)?;
    check_single_line("designation", &employee.designation)?;

    let mut writer = csv_writer(Vec::new());
    writer.serialize(employee)?;
    writer.flush()?;
    let line = String::from_utf8_lossy(writer.get_ref());
    Ok(line.trim_end_matches('\n').to_string())
}

/// Parses one stored line. Returns `None` for lines that must be skipped.
///
/// Each line gets its own reader, so an unbalanced quote only spoils the line
/// it appears on.
pub fn parse_line(line: &str) -> Option<Employee> {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    let mut reader = csv_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => from_csv_record(&record),
        _ => None,
    }
}
