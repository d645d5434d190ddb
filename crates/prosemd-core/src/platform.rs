//! Host platform detection and release-variant mapping.
//!
//! The release store publishes one build per variant. Every other host is
//! rejected up front instead of falling back to a variant that cannot run.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::AcquireError;

/// Operating systems the host environment can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostOs {
    Linux,
    MacOs,
    Windows,
    FreeBsd,
    OpenBsd,
    NetBsd,
    DragonFly,
    Solaris,
    Illumos,
    Android,
    Ios,
    Aix,
}

/// Error returned when an OS identifier is not recognised at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown operating system identifier: '{0}'")]
pub struct PlatformParseError(pub String);

impl HostOs {
    /// All known identifiers, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Linux,
        Self::MacOs,
        Self::Windows,
        Self::FreeBsd,
        Self::OpenBsd,
        Self::NetBsd,
        Self::DragonFly,
        Self::Solaris,
        Self::Illumos,
        Self::Android,
        Self::Ios,
        Self::Aix,
    ];

    /// Detect the OS this binary was compiled for.
    ///
    /// Returns `None` for targets outside [`HostOs::ALL`].
    pub fn current() -> Option<Self> {
        std::env::consts::OS.parse().ok()
    }

    /// Canonical identifier, matching `std::env::consts::OS`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::FreeBsd => "freebsd",
            Self::OpenBsd => "openbsd",
            Self::NetBsd => "netbsd",
            Self::DragonFly => "dragonfly",
            Self::Solaris => "solaris",
            Self::Illumos => "illumos",
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Aix => "aix",
        }
    }

    /// Suffix the OS requires on executable file names.
    pub const fn executable_extension(self) -> &'static str {
        match self {
            Self::Windows => ".exe",
            _ => "",
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HostOs {
    type Err = PlatformParseError;

    /// Accepts Rust target names as well as Node.js `process.platform` names
    /// (`win32`, `darwin`, `sunos`), which editor hosts hand over verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "macos" | "darwin" => Ok(Self::MacOs),
            "windows" | "win32" => Ok(Self::Windows),
            "freebsd" => Ok(Self::FreeBsd),
            "openbsd" => Ok(Self::OpenBsd),
            "netbsd" => Ok(Self::NetBsd),
            "dragonfly" => Ok(Self::DragonFly),
            "solaris" | "sunos" => Ok(Self::Solaris),
            "illumos" => Ok(Self::Illumos),
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            "aix" => Ok(Self::Aix),
            _ => Err(PlatformParseError(s.to_string())),
        }
    }
}

/// Published build variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Windows,
    Linux,
    MacOs,
}

impl Variant {
    /// Name embedded in the release asset file name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::MacOs => "macos",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote variant and local extension for one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformInfo {
    pub variant: Variant,
    pub file_extension: &'static str,
}

/// Map a host OS to the release variant that runs on it.
pub fn resolve_platform(os: HostOs) -> Result<PlatformInfo, AcquireError> {
    let variant = match os {
        HostOs::Windows => Variant::Windows,
        HostOs::Linux => Variant::Linux,
        HostOs::MacOs => Variant::MacOs,
        HostOs::FreeBsd
        | HostOs::OpenBsd
        | HostOs::NetBsd
        | HostOs::DragonFly
        | HostOs::Solaris
        | HostOs::Illumos
        | HostOs::Android
        | HostOs::Ios
        | HostOs::Aix => {
            return Err(AcquireError::UnsupportedPlatform {
                os: os.to_string(),
            });
        }
    };

    Ok(PlatformInfo {
        variant,
        file_extension: os.executable_extension(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_platforms_resolve() {
        let supported = [HostOs::Linux, HostOs::MacOs, HostOs::Windows];
        for os in supported {
            let info = resolve_platform(os).unwrap();
            assert!(!info.variant.as_str().is_empty());
            assert!(
                info.file_extension.is_empty() || info.file_extension.starts_with('.'),
                "bad extension for {os}: {}",
                info.file_extension
            );
        }
    }

    #[test]
    fn test_windows_uses_exe() {
        let info = resolve_platform(HostOs::Windows).unwrap();
        assert_eq!(info.variant, Variant::Windows);
        assert_eq!(info.file_extension, ".exe");
    }

    #[test]
    fn test_unix_variants_have_no_extension() {
        assert_eq!(resolve_platform(HostOs::Linux).unwrap().file_extension, "");
        assert_eq!(
            resolve_platform(HostOs::MacOs).unwrap().variant.as_str(),
            "macos"
        );
    }

    #[test]
    fn test_unsupported_platforms_fail() {
        for os in HostOs::ALL {
            if matches!(os, HostOs::Linux | HostOs::MacOs | HostOs::Windows) {
                continue;
            }
            let err = resolve_platform(os).unwrap_err();
            assert!(
                matches!(err, AcquireError::UnsupportedPlatform { ref os } if !os.is_empty()),
                "expected UnsupportedPlatform, got {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_node_identifiers() {
        assert_eq!("win32".parse::<HostOs>().unwrap(), HostOs::Windows);
        assert_eq!("darwin".parse::<HostOs>().unwrap(), HostOs::MacOs);
        assert_eq!("sunos".parse::<HostOs>().unwrap(), HostOs::Solaris);
        assert_eq!("Linux".parse::<HostOs>().unwrap(), HostOs::Linux);
    }

    #[test]
    fn test_parse_round_trips_canonical_names() {
        for os in HostOs::ALL {
            assert_eq!(os.as_str().parse::<HostOs>().unwrap(), os);
        }
    }

    #[test]
    fn test_parse_unknown_identifier() {
        let err = "plan9".parse::<HostOs>().unwrap_err();
        assert_eq!(err, PlatformParseError("plan9".to_string()));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_current_on_linux() {
        assert_eq!(HostOs::current(), Some(HostOs::Linux));
    }
}
