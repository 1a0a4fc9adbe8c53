use colored::Colorize;

use crate::core::models::change_record::ChangeRecord;

/// Print a success message.
pub fn success(msg: &str) {
    println!("  {} {}", "✓".green(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    println!("  {} {}", "⚠".yellow(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a header line.
pub fn header(msg: &str) {
    println!("\n{}", msg.bold());
}

/// Print a detected change the way it appears in the audit log.
pub fn change(record: &ChangeRecord) {
    println!("  {} {}", "→".cyan(), record);
}
