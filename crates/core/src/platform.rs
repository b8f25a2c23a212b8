//! Host platform identification.
//!
//! Release archives are published per (OS, architecture) pair. The supported
//! matrix is {darwin, linux} × {amd64, arm64}; anything else fails resolution
//! up front instead of downloading a binary that cannot run.

use crate::{Error, Result};
use std::str::FromStr;

/// Platform identifier combining OS and architecture.
///
/// Resolution always takes a `Platform` argument rather than reading the host
/// ambiently, so lookups stay testable with injected platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Platform {
    /// Operating system component.
    pub os: Os,
    /// CPU architecture component.
    pub arch: Arch,
}

impl Platform {
    /// Create a new platform.
    #[must_use]
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Detect the current host platform.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] when the host OS or
    /// architecture is outside the supported matrix.
    pub fn current() -> Result<Self> {
        Ok(Self {
            os: Os::current()?,
            arch: Arch::current()?,
        })
    }

    /// All platforms a release must cover.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self {
                os: Os::Darwin,
                arch: Arch::Amd64,
            },
            Self {
                os: Os::Darwin,
                arch: Arch::Arm64,
            },
            Self {
                os: Os::Linux,
                arch: Arch::Amd64,
            },
            Self {
                os: Os::Linux,
                arch: Arch::Arm64,
            },
        ]
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            Error::unsupported_platform(format!(
                "{s} (expected one of: darwin-amd64, darwin-arm64, linux-amd64, linux-arm64)"
            ))
        };
        let (os, arch) = s.split_once('-').ok_or_else(invalid)?;
        Ok(Self {
            os: Os::parse(os).ok_or_else(invalid)?,
            arch: Arch::parse(arch).ok_or_else(invalid)?,
        })
    }
}

/// Operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Os {
    /// macOS
    Darwin,
    /// Linux
    Linux,
}

impl Os {
    /// Detect the current OS.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] on any OS without published
    /// release archives.
    pub fn current() -> Result<Self> {
        #[cfg(target_os = "macos")]
        {
            Ok(Self::Darwin)
        }
        #[cfg(target_os = "linux")]
        {
            Ok(Self::Linux)
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux")))]
        {
            Err(Error::unsupported_platform(std::env::consts::OS))
        }
    }

    /// Parse from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "darwin" | "macos" => Some(Self::Darwin),
            "linux" => Some(Self::Linux),
            _ => None,
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Darwin => write!(f, "darwin"),
            Self::Linux => write!(f, "linux"),
        }
    }
}

/// CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Arch {
    /// x86-64 (Intel/AMD)
    Amd64,
    /// ARM64/aarch64 (Apple Silicon, Graviton)
    Arm64,
}

impl Arch {
    /// Detect the current architecture.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] on any architecture without
    /// published release archives.
    pub fn current() -> Result<Self> {
        #[cfg(target_arch = "x86_64")]
        {
            Ok(Self::Amd64)
        }
        #[cfg(target_arch = "aarch64")]
        {
            Ok(Self::Arm64)
        }
        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Err(Error::unsupported_platform(std::env::consts::ARCH))
        }
    }

    /// Parse from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "amd64" | "x86_64" | "x64" => Some(Self::Amd64),
            "arm64" | "aarch64" => Some(Self::Arm64),
            _ => None,
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Amd64 => write!(f, "amd64"),
            Self::Arm64 => write!(f, "arm64"),
        }
    }
}
