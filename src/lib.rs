#[deny(missing_docs)]
/// Employee record type and its single line text format.
pub mod employees;
/// File logger setup shared by the binaries.
pub mod logging;
/// Interactive menu loop and its handlers.
pub mod menu;
/// The append-only record file.
pub mod store;
/// Summing a line of whitespace separated integers.
pub mod tally;
