use employee_records::logging::init_file_logger;
use employee_records::tally::sum_integers;
use std::io::BufRead;
use std::path::Path;

/// Reads one line of integers from stdin and prints their sum
fn main() {
    init_file_logger(Path::new("log.txt"));
    println!("Enter integers separated by spaces (e.g., 10 20 30), then press Enter:");
    let mut line = String::new();
    if let Err(error) = std::io::stdin().lock().read_line(&mut line) {
        log::error!("Failed to read input: {}", error);
        eprintln!("Failed to read input: {}", error);
        return;
    }

    let tally = sum_integers(&line);
    println!("\n--- Processing Inputs ---");
    for entry in &tally.entries {
        match entry {
            Ok(number) => println!("Parsed: {}", number),
            Err(skipped) => println!(
                "Skipping invalid input: '{}' is not a valid integer.",
                skipped.token
            ),
        }
    }

    println!("\n--- Calculation Result ---");
    println!("The numbers you entered are: {:?}", tally.numbers());
    println!("The total sum is: {}", tally.total());
}
