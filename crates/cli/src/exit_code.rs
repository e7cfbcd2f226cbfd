//! Exit code definitions for mpclean
//!
//! Scripts rely on these values. Changing one is a breaking change.

/// Exit codes for the mpclean application.
///
/// A run that completes is a success even when individual buckets failed;
/// those failures are reported, not fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Run completed
    Success = 0,

    /// General/unspecified error, including storage client construction
    GeneralError = 1,

    /// Invalid flags, age spec, settings file or missing credentials
    UsageError = 2,

    /// Network error while listing buckets
    NetworkError = 3,

    /// Authentication or permission failure while listing buckets
    AuthError = 4,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::NetworkError),
            4 => Some(Self::AuthError),
            _ => None,
        }
    }

    /// Exit code for a core error
    pub fn from_error(err: &mpc_core::Error) -> Self {
        Self::from_i32(err.exit_code()).unwrap_or(Self::GeneralError)
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Run completed",
            Self::GeneralError => "General error",
            Self::UsageError => "Invalid arguments or configuration",
            Self::NetworkError => "Network error",
            Self::AuthError => "Authentication or permission failure",
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
