use console::style;
use std::fmt;
use std::path::Path;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), context: None, suggestions: Vec::new(), help_command: None }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for a polygon without any readable vertex
pub fn empty_ring(wkt: &str) -> CliError {
    CliError::new("No vertices found in polygon")
        .with_context(format!(
            "The input is not a single-ring POLYGON or none of its vertices could be read.\n\nInput: {}",
            wkt
        ))
        .with_suggestion("Use the form POLYGON((lon lat, lon lat, ...)), longitude first")
        .with_suggestion("Check which vertices are dropped: plotreview parse '<WKT>'")
        .with_help("Run: plotreview bbox --help")
}

/// Create error for an unreadable coordinate list
pub fn invalid_coordinates(reason: &str) -> CliError {
    CliError::new("Invalid coordinate list")
        .with_context(format!("Expected a JSON array of [lat, lon] pairs.\n\nError: {}", reason))
        .with_suggestion("Example: '[[9.0, 38.7], [9.0, 38.8], [9.1, 38.8], [9.0, 38.7]]'")
        .with_help("Run: plotreview serialize --help")
}

/// Create error for a geoshape that cannot be parsed
pub fn invalid_geoshape() -> CliError {
    CliError::new("Invalid ODK geoshape")
        .with_context("Expected at least three points written as \"lat lon [alt acc]\" separated by ';'.")
        .with_suggestion("Example: '9.0 38.7 0 0; 9.0 38.8 0 0; 9.1 38.8 0 0'")
        .with_help("Run: plotreview geoshape to-wkt --help")
}

/// Create error for a polygon that fails validation
pub fn invalid_polygon(reason: &str) -> CliError {
    CliError::new("Polygon failed validation")
        .with_context(format!("Reason: {}", reason))
        .with_suggestion("Fix the boundary and validate again")
        .with_suggestion("Or relax the thresholds: --min-area <M2> --min-vertices <N>")
        .with_help("Run: plotreview validate --help")
}

/// Create error for a missing input file
pub fn file_not_found(path: &Path) -> CliError {
    CliError::new("Input file not found")
        .with_context(format!("The specified file does not exist.\n\nPath: {}", path.display()))
        .with_suggestion("Check the file path and try again")
        .with_suggestion("Use absolute path or path relative to current directory")
}

/// Create error for an input file with unexpected content
pub fn invalid_input_file(path: &Path, expected: &str, reason: &str) -> CliError {
    CliError::new("Unreadable input file")
        .with_context(format!(
            "Expected {}.\n\nPath: {}\nError: {}",
            expected,
            path.display(),
            reason
        ))
        .with_suggestion("Check that the file is valid JSON")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check plotreview.toml for syntax errors")
        .with_suggestion("Or check the PLOTREVIEW_* environment variables")
        .with_help("Run: plotreview config")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    let message = format!("{:#}", error);

    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.contains("ermission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
    } else {
        CliError::new(message)
    }
}
