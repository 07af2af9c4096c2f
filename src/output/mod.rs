//! Styled terminal output helpers shared by the commands.
//!
//! Everything renders in soft truecolor pastels so long tag listings stay
//! readable. Structured (json/yaml) output paths bypass this module entirely
//! and print raw serialized text.

use owo_colors::OwoColorize;

/// Print a success message with a green checkmark
pub fn success(message: &str) {
    // Pastel mint green: RGB(152, 225, 152)
    println!(
        "{} {}",
        "✓".truecolor(152, 225, 152).bold(),
        message.bright_white()
    );
}

/// Print a success message with additional details in dim text
pub fn success_with_details(message: &str, details: &str) {
    // Pastel mint green: RGB(152, 225, 152)
    // Brighter grey: RGB(160, 160, 160)
    println!(
        "{} {} {}",
        "✓".truecolor(152, 225, 152).bold(),
        message.bright_white(),
        details.truecolor(160, 160, 160)
    );
}

/// Print an error message with a red X
pub fn error(message: &str) {
    // Pastel coral/salmon: RGB(255, 160, 160)
    eprintln!(
        "{} {}",
        "✗".truecolor(255, 160, 160).bold(),
        message.bright_white()
    );
}

/// Print a warning message with a yellow warning symbol
pub fn warning(message: &str) {
    // Pastel cream/yellow: RGB(255, 230, 160)
    println!(
        "{} {}",
        "⚠".truecolor(255, 230, 160).bold(),
        message.bright_white()
    );
}

/// Print an info message with a blue info symbol
pub fn info(message: &str) {
    // Pastel sky blue: RGB(160, 200, 255)
    println!(
        "{} {}",
        "ℹ".truecolor(160, 200, 255).bold(),
        message.bright_white()
    );
}

/// Print a section header with a separator line
pub fn section(title: &str) {
    // Pastel lavender: RGB(181, 174, 254)
    println!("\n{}", title.truecolor(181, 174, 254).bold());
    // Brighter grey: RGB(160, 160, 160)
    println!("{}", "─".repeat(50).truecolor(160, 160, 160));
}

/// Print a key-value pair with styled key and value
pub fn key_value(key: &str, value: &str) {
    // Brighter grey: RGB(160, 160, 160)
    println!(
        "  {} {}",
        format!("{}:", key).truecolor(160, 160, 160),
        value.bright_white()
    );
}

/// Print a key-value pair where the value is highlighted
pub fn key_value_highlight(key: &str, value: &str) {
    // Softer pastel teal: RGB(120, 180, 195)
    println!(
        "  {} {}",
        format!("{}:", key).truecolor(160, 160, 160),
        value.truecolor(120, 180, 195).bold()
    );
}

/// Print a dimmed/muted message
pub fn dimmed(message: &str) {
    // Brighter grey: RGB(160, 160, 160)
    println!("{}", message.truecolor(160, 160, 160));
}

/// Print a list item with a bullet
pub fn list_item(text: &str) {
    println!("  {} {}", "•".bright_white(), text.bright_white());
}

/// Print a command suggestion
pub fn command_suggestion(description: &str, command: &str) {
    // Pastel cream/yellow: RGB(255, 230, 160)
    // Brighter grey: RGB(160, 160, 160)
    println!(
        "  {} {}",
        description.truecolor(160, 160, 160),
        command.truecolor(255, 230, 160).bold()
    );
}

/// Print a blank line for spacing
pub fn blank() {
    println!();
}

/// Print a table header
pub fn table_header(columns: &[&str]) {
    // Softer pastel teal: RGB(120, 180, 195)
    let header = columns
        .iter()
        .map(|c| c.truecolor(120, 180, 195).bold().to_string())
        .collect::<Vec<_>>()
        .join(" │ ");
    println!("  {}", header);
    // Brighter grey: RGB(160, 160, 160)
    println!("  {}", "─".repeat(70).truecolor(160, 160, 160));
}

/// Print a table row
pub fn table_row(values: &[&str]) {
    let row = values
        .iter()
        .map(|v| v.bright_white().to_string())
        .collect::<Vec<_>>()
        .join(" │ ");
    println!("  {}", row);
}
