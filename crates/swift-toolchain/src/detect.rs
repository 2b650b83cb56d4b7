use crate::error::{Result, ToolchainError};
use serde::Serialize;
use std::fmt;
use swiftstep_core::error::ErrorCode;
use swiftstep_core::process::run_command;

/// Represents a Swift version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwiftVersion {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Patch version, when the banner has one
    pub patch: Option<u32>,
    /// Development snapshot
    pub is_dev: bool,
    /// Banner line the version was read from
    pub raw: String,
}

impl SwiftVersion {
    /// Parse Swift version from string
    ///
    /// Accepts a bare version (`5.9.2`, `6.3-dev`) or a `swift --version`
    /// banner. Newer drivers prefix the banner with their own version
    /// (`swift-driver version: 1.90.11.1 Apple Swift version 5.10 ...`), so
    /// the number following `Swift version` wins over the first numeric token.
    pub fn parse(version_str: &str) -> Result<Self> {
        let version_str = version_str.trim();
        let line = version_str
            .lines()
            .find(|l| l.contains("Swift version"))
            .or_else(|| version_str.lines().next())
            .unwrap_or(version_str)
            .trim();

        let tail = line
            .find("Swift version")
            .map_or(line, |idx| &line[idx + "Swift version".len()..]);

        let version_part = tail
            .split_whitespace()
            .find(|s| s.chars().next().is_some_and(|c| c.is_ascii_digit()))
            .ok_or_else(|| ToolchainError::ParseError(version_str.to_string()))?;

        let is_dev = version_part.contains("-dev") || version_part.contains("DEVELOPMENT");
        let clean_version = version_part.split('-').next().unwrap_or(version_part);

        let parts: Vec<&str> = clean_version.split('.').collect();

        if parts.len() < 2 {
            return Err(ToolchainError::ParseError(version_str.to_string()));
        }

        let major = parts[0]
            .parse()
            .map_err(|_| ToolchainError::ParseError(version_str.to_string()))?;
        let minor = parts[1]
            .parse()
            .map_err(|_| ToolchainError::ParseError(version_str.to_string()))?;
        let patch = parts.get(2).and_then(|p| p.parse().ok());

        Ok(Self {
            major,
            minor,
            patch,
            is_dev,
            raw: line.to_string(),
        })
    }
}

impl fmt::Display for SwiftVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(patch) = self.patch {
            write!(f, ".{patch}")?;
        }
        if self.is_dev {
            write!(f, "-dev")?;
        }
        Ok(())
    }
}

/// Extract the target triple from `swift --version` output
///
/// Returns an empty string when the banner has no `Target:` line.
pub fn parse_target(version_output: &str) -> String {
    version_output
        .lines()
        .find_map(|l| l.trim().strip_prefix("Target:"))
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

/// Represents the Swift toolchain a build will run with
#[derive(Debug, Clone, Serialize)]
pub struct SwiftToolchain {
    /// Compiler version
    pub version: SwiftVersion,
    /// Target triple, empty when not reported
    pub target: String,
}

impl SwiftToolchain {
    /// Detect the toolchain behind a specific `swift` executable
    pub fn detect(program: &str) -> Result<Self> {
        let swift_path =
            which::which(program).map_err(|e| ToolchainError::SwiftNotFound(format!("{program}: {e}")))?;

        let output = run_command(program, &["--version"]).map_err(|e| {
            if e.code == ErrorCode::CommandNotFound {
                ToolchainError::SwiftNotFound(program.to_string())
            } else {
                ToolchainError::Process(e)
            }
        })?;

        if !output.success {
            return Err(ToolchainError::CommandFailed(format!(
                "{program} --version exited with status {}: {}",
                output.exit_code,
                output.combined_output().trim()
            )));
        }

        // Some toolchains print the banner on stderr
        let banner = output.combined_output();
        let toolchain = Self::from_version_output(&banner)?;

        tracing::debug!(
            version = %toolchain.version,
            target = %toolchain.target,
            path = %swift_path.display(),
            "Detected Swift toolchain"
        );

        Ok(toolchain)
    }

    /// Build from captured `swift --version` output
    pub fn from_version_output(output: &str) -> Result<Self> {
        Ok(Self {
            version: SwiftVersion::parse(output)?,
            target: parse_target(output),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APPLE_BANNER: &str = "Apple Swift version 5.9.2 (swiftlang-5.9.2.2.56 clang-1500.1.0.2.5)\nTarget: arm64-apple-macosx14.0\n";
    const LINUX_BANNER: &str = "Swift version 5.10.1 (swift-5.10.1-RELEASE)\nTarget: x86_64-unknown-linux-gnu\n";
    const DRIVER_BANNER: &str = "swift-driver version: 1.90.11.1 Apple Swift version 5.10 (swiftlang-5.10.0.13 clang-1500.3.9.4)\nTarget: arm64-apple-macosx14.0\n";

    #[test]
    fn test_parse_swift_version() {
        let version = SwiftVersion::parse("Apple Swift version 6.3-dev (LLVM 478f55c39d6bc2c, Swift a15423cb66d4749)").unwrap();
        assert_eq!(version.major, 6);
        assert_eq!(version.minor, 3);
        assert!(version.is_dev);
        assert_eq!(version.to_string(), "6.3-dev");
    }

    #[test]
    fn test_parse_stable_version() {
        let version = SwiftVersion::parse(APPLE_BANNER).unwrap();
        assert_eq!(version.major, 5);
        assert_eq!(version.minor, 9);
        assert_eq!(version.patch, Some(2));
        assert!(!version.is_dev);
        assert!(!version.raw.contains("Target"));
    }

    #[test]
    fn test_parse_skips_driver_version() {
        let version = SwiftVersion::parse(DRIVER_BANNER).unwrap();
        assert_eq!(version.to_string(), "5.10");
        assert_eq!(version.patch, None);
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(matches!(
            SwiftVersion::parse("command not found"),
            Err(ToolchainError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target(LINUX_BANNER), "x86_64-unknown-linux-gnu");
        assert_eq!(parse_target("Swift version 5.9"), "");
    }

    #[test]
    fn test_from_version_output() {
        let tc = SwiftToolchain::from_version_output(APPLE_BANNER).unwrap();
        assert_eq!(tc.version.to_string(), "5.9.2");
        assert_eq!(tc.target, "arm64-apple-macosx14.0");
    }

    #[test]
    fn test_detect_missing_program() {
        assert!(matches!(
            SwiftToolchain::detect("nonexistent_swift_12345"),
            Err(ToolchainError::SwiftNotFound(_))
        ));
    }
}
