//! Exit codes for the bq-core CLI.
//!
//! Exit code ranges:
//! - 0-1: Operational outcomes (parse outcome from code, not output)
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors

use bq_report::QuoteError;

/// Exit codes for bq-core operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    // ========================================================================
    // Operational Outcomes (0-1)
    // ========================================================================
    /// Success
    Clean = 0,

    /// Distribution was rejected or cancelled; nothing committed
    Rejected = 1,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments or unreadable input documents
    ArgsError = 10,

    /// Configuration could not be loaded or failed validation
    ConfigError = 11,

    /// Template could not be loaded or has no body block
    TemplateError = 12,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Check if this exit code is a user/environment error (codes 10-19).
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&self.as_i32())
    }

    /// Check if this exit code is an internal error (codes 20-29).
    pub fn is_internal_error(self) -> bool {
        self.as_i32() >= 20
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::Rejected => "OK_REJECTED",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::TemplateError => "ERR_TEMPLATE",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&QuoteError> for ExitCode {
    fn from(err: &QuoteError) -> Self {
        match err {
            QuoteError::TemplateFetch { .. } | QuoteError::MissingBody => ExitCode::TemplateError,
            QuoteError::InvalidConfig(_) => ExitCode::ConfigError,
            QuoteError::JsonError(_) => ExitCode::ArgsError,
            QuoteError::IoError(_) => ExitCode::IoError,
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert!(ExitCode::Clean.is_success());
        assert!(!ExitCode::Rejected.is_success());
        assert!(!ExitCode::Rejected.is_user_error());
        assert!(ExitCode::ArgsError.is_user_error());
        assert!(ExitCode::TemplateError.is_user_error());
        assert!(ExitCode::IoError.is_internal_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(ExitCode::TemplateError.to_string(), "ERR_TEMPLATE (12)");
        assert_eq!(i32::from(ExitCode::Rejected), 1);
    }

    #[test]
    fn test_from_quote_error() {
        assert_eq!(ExitCode::from(&QuoteError::MissingBody), ExitCode::TemplateError);
        assert_eq!(
            ExitCode::from(&QuoteError::InvalidConfig("x".to_string())),
            ExitCode::ConfigError
        );
    }
}
