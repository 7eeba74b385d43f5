use console::{StyledObject, style};

/// Styled status lines for the terminal; diagnostics go through `tracing`
#[derive(Default)]
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    /// Written to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    /// `[HH:MM:SS] message`, for long-running watch sessions
    pub fn event(&self, message: &str) {
        println!("{} {}", timestamp(), message);
    }
}

fn timestamp() -> StyledObject<String> {
    style(format!("[{}]", chrono::Local::now().format("%H:%M:%S"))).dim()
}
