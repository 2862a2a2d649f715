//! Report formatting shared by the build script
//!
//! Compiled into build.rs, and into the library under test.

/// Width of the text column inside the error box
pub const REPORT_WIDTH: usize = 62;

/// First `max` characters of `line`, never splitting a character
pub fn truncate(line: &str, max: usize) -> String {
    line.chars().take(max).collect()
}

/// One bullet row of the error box, shortened to fit
pub fn report_line(line: &str) -> String {
    let text = if line.chars().count() > REPORT_WIDTH {
        format!("{}...", truncate(line, REPORT_WIDTH - 3))
    } else {
        line.to_owned()
    };
    format!("║  • {:<62} ║", text)
}
