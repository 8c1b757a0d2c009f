use employee_records::logging::init_file_logger;
use employee_records::menu::{self, Console};
use employee_records::store::RecordStore;
use log::info;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
struct Opt {
    /// Employee records file path.
    #[structopt(
        long = "data-file",
        default_value = "employees.txt",
        parse(from_os_str)
    )]
    data_file: PathBuf,
    /// Log file path.
    #[structopt(long = "log-file", default_value = "log.txt", parse(from_os_str))]
    log_file: PathBuf,
}

/// Entrypoint of the application
fn main() {
    let args = Opt::from_args();
    init_file_logger(&args.log_file);
    info!("Start employee records, data file {}", args.data_file.display());

    let store = RecordStore::new(args.data_file);
    let stdin = std::io::stdin();
    let mut console = Console::new(stdin.lock(), std::io::stdout());
    if let Err(error) = menu::run(&mut console, &store) {
        log::error!("Console failure: {}", error);
        eprintln!("Console failure: {}", error);
    }
    info!("Employee records finished");
}
