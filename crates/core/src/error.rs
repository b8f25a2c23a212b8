//! Error types shared across the decant crates.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for decant operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, fetching, verifying, or installing
/// a release.
///
/// Every fatal variant names the pipeline stage it belongs to in its
/// diagnostic code, so a failure always tells the operator where the install
/// stopped and why.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Host OS/architecture outside the supported release matrix.
    #[error("Unsupported platform: {platform}")]
    #[diagnostic(
        code(decant::platform::unsupported),
        help("Releases are published for darwin-amd64, darwin-arm64, linux-amd64, and linux-arm64")
    )]
    UnsupportedPlatform {
        /// The platform string that was rejected
        platform: String,
    },

    /// The release matrix has no variant for a supported-looking platform.
    #[error("No release variant for {platform} at version {version}")]
    #[diagnostic(
        code(decant::resolve::not_found),
        help("Every supported platform needs its own matrix entry; there is no generic fallback")
    )]
    VariantNotFound {
        /// Platform whose lookup failed
        platform: String,
        /// Version the lookup was performed for
        version: String,
    },

    /// Tool manifest is missing, unreadable, or fails validation.
    #[error("Manifest error: {message}")]
    #[diagnostic(
        code(decant::manifest::invalid),
        help("Check that decant.toml exists and carries name, version, and repository")
    )]
    Manifest {
        /// The error message
        message: String,
        /// The manifest path, when known
        path: Option<PathBuf>,
    },

    /// A digest entry still holds a placeholder instead of a real checksum.
    #[error("Placeholder digest for {platform}")]
    #[diagnostic(
        code(decant::manifest::placeholder_digest),
        help("Run 'decant sync-digests' to fill the matrix from the release's checksums.txt")
    )]
    PlaceholderDigest {
        /// Platform whose digest entry is a placeholder
        platform: String,
    },

    /// A digest entry is not a valid sha256 hex string.
    #[error("Invalid digest for {platform}: {value}")]
    #[diagnostic(
        code(decant::manifest::invalid_digest),
        help("Digests must be exactly 64 lowercase hex characters (sha256)")
    )]
    InvalidDigest {
        /// Platform whose digest entry is malformed
        platform: String,
        /// The offending value
        value: String,
    },

    /// General configuration problem outside the manifest itself.
    #[error("Configuration error: {message}")]
    #[diagnostic(code(decant::config))]
    Config {
        /// The error message
        message: String,
    },

    /// The network transport failed before an HTTP status was received.
    #[error("Transport error fetching {url}: {message}")]
    #[diagnostic(
        code(decant::fetch::transport),
        help("Check network connectivity and that the release host is reachable")
    )]
    Transport {
        /// URL the request was sent to
        url: String,
        /// Stringified transport failure
        message: String,
    },

    /// The release host answered with a non-success HTTP status.
    #[error("HTTP {status} fetching {url}")]
    #[diagnostic(
        code(decant::fetch::http_status),
        help("A 404 usually means the tag or asset name does not exist for this version")
    )]
    HttpStatus {
        /// URL the request was sent to
        url: String,
        /// The HTTP status code
        status: u16,
    },

    /// Fetched bytes do not match the pinned checksum. Never downgradable.
    #[error("Digest mismatch for {url}: expected {expected}, got {actual}")]
    #[diagnostic(
        code(decant::verify::digest_mismatch),
        help(
            "The downloaded archive does not match the pinned checksum; refusing to install. \
             Only re-pin with 'decant sync-digests' if the release was legitimately republished"
        )
    )]
    DigestMismatch {
        /// URL the archive was fetched from
        url: String,
        /// The digest the manifest pinned
        expected: String,
        /// The digest computed over the fetched bytes
        actual: String,
    },

    /// The archive could not be decompressed or walked.
    #[error("Corrupt archive {archive}: {message}")]
    #[diagnostic(
        code(decant::archive::corrupt),
        help("The release asset may be damaged; re-running the install fetches it again")
    )]
    CorruptArchive {
        /// Archive filename or URL
        archive: String,
        /// The error message
        message: String,
    },

    /// The archive unpacked cleanly but holds no entry for the expected binary.
    #[error("Binary '{binary}' not found in {archive}")]
    #[diagnostic(
        code(decant::archive::binary_not_found),
        help("The archive is valid but does not contain the expected executable entry")
    )]
    BinaryNotFound {
        /// Name of the executable that was expected
        binary: String,
        /// Archive filename or URL
        archive: String,
    },

    /// Filesystem failure while placing the binary or completions.
    #[error("Install error: {message}")]
    #[diagnostic(
        code(decant::install::io),
        help("Check that the target directory exists and is writable")
    )]
    Install {
        /// The error message
        message: String,
        /// The path that caused the error
        path: Option<PathBuf>,
        /// The underlying source error
        #[source]
        source: Option<std::io::Error>,
    },

    /// Completion provisioning failed for one shell.
    ///
    /// Callers log this and carry on; it never fails an install.
    #[error("Completion provisioning failed for {shell}: {message}")]
    #[diagnostic(
        code(decant::completions::provision),
        help("Completions are best-effort; the binary install itself succeeded")
    )]
    CompletionProvision {
        /// Shell the script was being generated for
        shell: String,
        /// The error message
        message: String,
    },

    /// An acceptance check against the installed binary failed.
    #[error("Acceptance check '{name}' failed: {detail}")]
    #[diagnostic(
        code(decant::check::failed),
        help("The installed binary did not behave as expected; treat the install as suspect")
    )]
    CheckFailed {
        /// Name of the failing check
        name: String,
        /// Expected versus actual behavior
        detail: String,
    },

    /// A subprocess could not be spawned or run.
    #[error("Failed to run {program}: {message}")]
    #[diagnostic(code(decant::process::failed))]
    Subprocess {
        /// The program that was invoked
        program: String,
        /// The error message
        message: String,
    },

    /// A subprocess exceeded its allotted time.
    #[error("{program} did not finish within {seconds}s")]
    #[diagnostic(
        code(decant::process::timeout),
        help("The command was killed after its deadline passed")
    )]
    SubprocessTimeout {
        /// The program that was invoked
        program: String,
        /// The timeout that was enforced
        seconds: u64,
    },

    /// The operation was cancelled by a user interrupt.
    #[error("Interrupted")]
    #[diagnostic(code(decant::interrupted))]
    Interrupted,

    /// Wrapped I/O error.
    #[error("I/O error: {0}")]
    #[diagnostic(code(decant::io))]
    Io(#[from] std::io::Error),

    /// Wrapped TOML parsing error.
    #[error("TOML parse error: {0}")]
    #[diagnostic(code(decant::toml_parse))]
    TomlParse(#[from] toml::de::Error),

    /// Wrapped TOML serialization error.
    #[error("TOML serialization error: {0}")]
    #[diagnostic(code(decant::toml_ser))]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    /// Create a new unsupported platform error.
    #[must_use]
    pub fn unsupported_platform(platform: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            platform: platform.into(),
        }
    }

    /// Create a new variant lookup error.
    #[must_use]
    pub fn variant_not_found(platform: impl Into<String>, version: impl Into<String>) -> Self {
        Self::VariantNotFound {
            platform: platform.into(),
            version: version.into(),
        }
    }

    /// Create a new manifest error.
    #[must_use]
    pub fn manifest(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Manifest {
            message: message.into(),
            path,
        }
    }

    /// Create a new placeholder digest error.
    #[must_use]
    pub fn placeholder_digest(platform: impl Into<String>) -> Self {
        Self::PlaceholderDigest {
            platform: platform.into(),
        }
    }

    /// Create a new invalid digest error.
    #[must_use]
    pub fn invalid_digest(platform: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidDigest {
            platform: platform.into(),
            value: value.into(),
        }
    }

    /// Create a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new transport error from any displayable failure.
    #[must_use]
    pub fn transport(url: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a new HTTP status error.
    #[must_use]
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Create a new digest mismatch error.
    #[must_use]
    pub fn digest_mismatch(
        url: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::DigestMismatch {
            url: url.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a new corrupt archive error.
    #[must_use]
    pub fn corrupt_archive(archive: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::CorruptArchive {
            archive: archive.into(),
            message: message.to_string(),
        }
    }

    /// Create a new missing binary error.
    #[must_use]
    pub fn binary_not_found(binary: impl Into<String>, archive: impl Into<String>) -> Self {
        Self::BinaryNotFound {
            binary: binary.into(),
            archive: archive.into(),
        }
    }

    /// Create a new install error.
    #[must_use]
    pub fn install(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Install {
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a new install error with source.
    #[must_use]
    pub fn install_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Install {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    /// Create a new completion provisioning error.
    #[must_use]
    pub fn completion_provision(shell: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CompletionProvision {
            shell: shell.into(),
            message: message.into(),
        }
    }

    /// Create a new acceptance check failure.
    #[must_use]
    pub fn check_failed(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::CheckFailed {
            name: name.into(),
            detail: detail.into(),
        }
    }

    /// Create a new subprocess error.
    #[must_use]
    pub fn subprocess(program: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Subprocess {
            program: program.into(),
            message: message.to_string(),
        }
    }

    /// Create a new subprocess timeout error.
    #[must_use]
    pub fn subprocess_timeout(program: impl Into<String>, seconds: u64) -> Self {
        Self::SubprocessTimeout {
            program: program.into(),
            seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_platform_error() {
        let err = Error::unsupported_platform("windows-arm64");
        assert!(err.to_string().contains("Unsupported platform"));
        assert!(err.to_string().contains("windows-arm64"));
    }

    #[test]
    fn test_variant_not_found_error() {
        let err = Error::variant_not_found("linux-arm64", "1.0.0");
        assert!(err.to_string().contains("linux-arm64"));
        assert!(err.to_string().contains("1.0.0"));
    }

    #[test]
    fn test_manifest_error() {
        let err = Error::manifest("missing field 'version'", Some(PathBuf::from("decant.toml")));
        assert!(err.to_string().contains("Manifest error"));
    }

    #[test]
    fn test_manifest_error_no_path() {
        let err = Error::manifest("no manifest found", None);
        assert!(err.to_string().contains("Manifest error"));
    }

    #[test]
    fn test_placeholder_digest_error() {
        let err = Error::placeholder_digest("darwin-arm64");
        assert!(err.to_string().contains("Placeholder digest"));
        assert!(err.to_string().contains("darwin-arm64"));
    }

    #[test]
    fn test_invalid_digest_error() {
        let err = Error::invalid_digest("linux-amd64", "zzzz");
        assert!(err.to_string().contains("Invalid digest"));
        assert!(err.to_string().contains("zzzz"));
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("could not determine home directory");
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_transport_error() {
        let err = Error::transport("https://example.com/a.tar.gz", "connection refused");
        assert!(err.to_string().contains("Transport error"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_http_status_error() {
        let err = Error::http_status("https://example.com/a.tar.gz", 404);
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[test]
    fn test_digest_mismatch_error_names_both_digests() {
        let err = Error::digest_mismatch("https://example.com/a.tar.gz", "aaa", "bbb");
        let msg = err.to_string();
        assert!(msg.contains("expected aaa"));
        assert!(msg.contains("got bbb"));
    }

    #[test]
    fn test_corrupt_archive_error() {
        let err = Error::corrupt_archive("tool_1.0.0_linux_amd64.tar.gz", "unexpected EOF");
        assert!(err.to_string().contains("Corrupt archive"));
    }

    #[test]
    fn test_binary_not_found_error() {
        let err = Error::binary_not_found("mdmend", "mdmend_1.0.0_linux_amd64.tar.gz");
        assert!(err.to_string().contains("Binary 'mdmend' not found"));
    }

    #[test]
    fn test_install_error() {
        let err = Error::install("failed to rename", Some(PathBuf::from("/usr/local/bin")));
        assert!(err.to_string().contains("Install error"));
    }

    #[test]
    fn test_install_error_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::install_with_source("failed to write", None, io_err);
        assert!(err.to_string().contains("Install error"));
    }

    #[test]
    fn test_completion_provision_error() {
        let err = Error::completion_provision("zsh", "exit status 1");
        assert!(err.to_string().contains("zsh"));
        assert!(err.to_string().contains("Completion provisioning failed"));
    }

    #[test]
    fn test_check_failed_error() {
        let err = Error::check_failed("version", "expected 'mdmend ', got 'bash: no such file'");
        assert!(err.to_string().contains("Acceptance check 'version' failed"));
    }

    #[test]
    fn test_subprocess_error() {
        let err = Error::subprocess("/usr/local/bin/mdmend", "No such file or directory");
        assert!(err.to_string().contains("Failed to run"));
    }

    #[test]
    fn test_subprocess_timeout_error() {
        let err = Error::subprocess_timeout("mdmend", 10);
        assert!(err.to_string().contains("did not finish within 10s"));
    }

    #[test]
    fn test_interrupted_error() {
        let err = Error::Interrupted;
        assert_eq!(err.to_string(), "Interrupted");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_debug() {
        let err = Error::placeholder_digest("linux-amd64");
        let debug = format!("{err:?}");
        assert!(debug.contains("PlaceholderDigest"));
    }
}
