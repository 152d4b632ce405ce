//! wsl
//!
//! WSL path translation.
//!
//! Windows presents WSL distribution filesystems as UNC shares
//! (`\\wsl$\<distro>\...` or `\\wsl.localhost\<distro>\...`). This module
//! decomposes such paths, rewrites them to the canonical `wsl$` form, and
//! produces the in-distribution Linux path and the `wsl -d <distro>` prefix
//! needed to route a tool invocation into the distribution.
//!
//! These are pure string functions: no filesystem access, no I/O faults to
//! handle. Anything that does not parse as a WSL path is simply not one.
//!
//! # Contract
//!
//! [`is_wsl_path`] is total and never fails. The accessors
//! ([`distribution`], [`working_directory`], [`normalized_linux_path`])
//! require `is_wsl_path(path)` to hold and return
//! [`WslPathError`] when the caller violates that precondition.
//!
//! # Example
//!
//! ```
//! use gitglance::wsl;
//!
//! let path = r"\\wsl.localhost\Ubuntu\home\me\repo";
//! assert!(wsl::is_wsl_path(path));
//! assert_eq!(wsl::distribution(path).unwrap(), "Ubuntu");
//! assert_eq!(wsl::working_directory(path).unwrap(), r"\\wsl$\Ubuntu\home\me\repo");
//! assert_eq!(wsl::normalized_linux_path(path).unwrap(), "/home/me/repo");
//! assert_eq!(wsl::argument_prefix(path), "wsl -d Ubuntu");
//! ```

use thiserror::Error;

/// The canonical WSL UNC prefix segment.
const CANONICAL_PREFIX: &str = "wsl$";

/// Recognized first-segment spellings of a WSL UNC path.
const WSL_PREFIXES: [&str; 2] = ["wsl$", "wsl.localhost"];

/// The host (Windows) directory separator.
const SEPARATOR: char = '\\';

/// The alternate separator; its presence disqualifies a path from being
/// treated as a WSL UNC path.
const ALT_SEPARATOR: char = '/';

/// Errors from WSL path accessors.
///
/// These indicate precondition violations by the caller; check
/// [`is_wsl_path`] first.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WslPathError {
    /// The path is not a WSL UNC path.
    #[error("not a WSL path: {0}")]
    NotWslPath(String),

    /// The path names a WSL prefix but no distribution segment.
    #[error("WSL path has no distribution segment: {0}")]
    NoDistribution(String),
}

/// Decomposition of a WSL UNC path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WslPathDescriptor {
    /// The distribution name (second path segment).
    pub distribution: String,
    /// The absolute path as seen inside the distribution.
    pub linux_path: String,
}

/// Split a backslash path into its non-empty segments.
///
/// Leading separators (the UNC `\\`) produce empty splits which are dropped.
fn segments(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty()).collect()
}

/// Check whether a path is a WSL UNC path.
///
/// True iff the path is non-empty, uses backslash separators exclusively,
/// and its first segment case-insensitively matches `wsl$` or
/// `wsl.localhost`. Empty or malformed input yields `false`, never an error.
pub fn is_wsl_path(path: &str) -> bool {
    if path.is_empty() || path.contains(ALT_SEPARATOR) {
        return false;
    }

    match segments(path).first() {
        Some(first) => WSL_PREFIXES
            .iter()
            .any(|p| first.eq_ignore_ascii_case(p)),
        None => false,
    }
}

/// Get the distribution name from a WSL path (its second segment).
///
/// # Errors
///
/// - [`WslPathError::NotWslPath`] if `is_wsl_path(path)` is false
/// - [`WslPathError::NoDistribution`] if the path has fewer than two segments
pub fn distribution(path: &str) -> Result<&str, WslPathError> {
    if !is_wsl_path(path) {
        return Err(WslPathError::NotWslPath(path.to_string()));
    }

    segments(path)
        .get(1)
        .copied()
        .ok_or_else(|| WslPathError::NoDistribution(path.to_string()))
}

/// Rewrite a WSL path to the canonical `\\wsl$\<distro>\...` form.
///
/// The first segment is replaced by the canonical prefix; the rest of the
/// path is reassembled unchanged.
///
/// # Errors
///
/// Same preconditions as [`distribution`].
pub fn working_directory(path: &str) -> Result<String, WslPathError> {
    let distro = distribution(path)?;
    let rest: Vec<&str> = segments(path).into_iter().skip(2).collect();

    let mut out = format!("\\\\{}\\{}", CANONICAL_PREFIX, distro);
    for segment in rest {
        out.push(SEPARATOR);
        out.push_str(segment);
    }
    Ok(out)
}

/// Get the path as seen inside the Linux distribution.
///
/// Strips the UNC prefix and distribution segments and rejoins the
/// remainder with forward slashes; the root of the share maps to `/`.
///
/// # Errors
///
/// Same preconditions as [`distribution`].
pub fn normalized_linux_path(path: &str) -> Result<String, WslPathError> {
    // Validate the same preconditions as the other accessors.
    distribution(path)?;

    let rest: Vec<&str> = segments(path).into_iter().skip(2).collect();
    Ok(format!("/{}", rest.join("/")))
}

/// Get the command prefix that routes a tool invocation into the
/// distribution hosting `path`.
///
/// Returns the empty string for non-WSL paths (and for degenerate WSL
/// paths with no distribution segment), so callers can unconditionally
/// prepend the result.
pub fn argument_prefix(path: &str) -> String {
    match distribution(path) {
        Ok(distro) => format!("wsl -d {}", distro),
        Err(_) => String::new(),
    }
}

/// Parse a path into a [`WslPathDescriptor`], if it is a WSL path.
pub fn descriptor(path: &str) -> Option<WslPathDescriptor> {
    let distribution = distribution(path).ok()?.to_string();
    let linux_path = normalized_linux_path(path).ok()?;
    Some(WslPathDescriptor {
        distribution,
        linux_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_both_prefixes_case_insensitively() {
        assert!(is_wsl_path(r"\\wsl$\Ubuntu\home"));
        assert!(is_wsl_path(r"\\WSL$\Ubuntu\home"));
        assert!(is_wsl_path(r"\\wsl.localhost\Debian\srv"));
        assert!(is_wsl_path(r"\\WSL.LOCALHOST\Debian"));
    }

    #[test]
    fn rejects_empty_and_non_wsl() {
        assert!(!is_wsl_path(""));
        assert!(!is_wsl_path(r"C:\Users\me"));
        assert!(!is_wsl_path(r"\\server\share"));
        assert!(!is_wsl_path(r"\\wslx\Ubuntu"));
    }

    #[test]
    fn rejects_alternate_separator() {
        assert!(!is_wsl_path(r"//wsl$/Ubuntu/home"));
        assert!(!is_wsl_path(r"\\wsl$\Ubuntu/home"));
    }

    #[test]
    fn distribution_is_second_segment() {
        assert_eq!(distribution(r"\\wsl$\Ubuntu\home\me").unwrap(), "Ubuntu");
        assert_eq!(
            distribution(r"\\wsl.localhost\openSUSE-Leap").unwrap(),
            "openSUSE-Leap"
        );
    }

    #[test]
    fn distribution_requires_wsl_path() {
        assert_eq!(
            distribution(r"C:\repo"),
            Err(WslPathError::NotWslPath(r"C:\repo".to_string()))
        );
        assert_eq!(
            distribution(r"\\wsl$"),
            Err(WslPathError::NoDistribution(r"\\wsl$".to_string()))
        );
    }

    #[test]
    fn working_directory_canonicalizes_prefix() {
        assert_eq!(
            working_directory(r"\\wsl.localhost\Ubuntu\home\me\repo").unwrap(),
            r"\\wsl$\Ubuntu\home\me\repo"
        );
        assert_eq!(
            working_directory(r"\\WSL$\Ubuntu").unwrap(),
            r"\\wsl$\Ubuntu"
        );
    }

    #[test]
    fn linux_path_strips_prefix_and_distro() {
        assert_eq!(
            normalized_linux_path(r"\\wsl$\Ubuntu\home\me\repo").unwrap(),
            "/home/me/repo"
        );
        assert_eq!(normalized_linux_path(r"\\wsl$\Ubuntu").unwrap(), "/");
    }

    #[test]
    fn argument_prefix_is_empty_for_non_wsl() {
        assert_eq!(argument_prefix(r"C:\repo"), "");
        assert_eq!(argument_prefix(""), "");
        assert_eq!(argument_prefix(r"\\wsl$\Ubuntu\srv"), "wsl -d Ubuntu");
    }

    #[test]
    fn descriptor_round_trip() {
        let d = descriptor(r"\\wsl.localhost\Ubuntu\var\log").unwrap();
        assert_eq!(d.distribution, "Ubuntu");
        assert_eq!(d.linux_path, "/var/log");
        assert!(descriptor(r"C:\var\log").is_none());
    }
}
