//! Shells completions are provisioned for.

use std::fmt;

/// Shells the installed tool can emit completion scripts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shell {
    /// Bash shell
    #[default]
    Bash,
    /// Z shell
    Zsh,
    /// Fish shell
    Fish,
}

impl Shell {
    /// All shells provisioned on install.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Bash, Self::Zsh, Self::Fish]
    }

    /// Parse a shell from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bash" => Some(Self::Bash),
            "zsh" => Some(Self::Zsh),
            "fish" => Some(Self::Fish),
            _ => None,
        }
    }

    /// Get the name of the shell.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
            Self::Fish => "fish",
        }
    }

    /// Completion script filename extension for this shell.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        self.name()
    }

    /// Completion script filename for a tool, e.g. `mdmend.zsh`.
    #[must_use]
    pub fn completion_filename(&self, tool: &str) -> String {
        format!("{tool}.{}", self.extension())
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
