//! Step inputs and the validated build configuration

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use swiftstep_cli::output::Status;
use swiftstep_core::validation::{ValidationError, Validator};
use swiftstep_toolchain::BuildConfiguration;

/// Directory swift build writes into
pub const BUILD_PATH_KEY: &str = "build_path";
/// `debug` or `release`
pub const CONFIGURATION_KEY: &str = "configuration";
/// `yes` to also build test targets
pub const BUILD_TESTS_KEY: &str = "build_tests";
/// `yes` to pass `--disable-sandbox`
pub const DISABLE_SANDBOX_KEY: &str = "disable_sandbox";

const YES_NO: [&str; 2] = ["yes", "no"];

/// Whether the step exposes the `configuration` input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Reads `configuration`, passes it to swift build, exports the executable path
    WithConfiguration,
    /// Builds in swift's default mode and exports nothing
    Plain,
}

impl Default for Variant {
    fn default() -> Self {
        if cfg!(feature = "configuration") {
            Self::WithConfiguration
        } else {
            Self::Plain
        }
    }
}

impl Variant {
    /// Whether `configuration` is read, validated and exported
    pub fn has_configuration(self) -> bool {
        self == Self::WithConfiguration
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WithConfiguration => f.write_str("with-configuration"),
            Self::Plain => f.write_str("plain"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "with-configuration" => Ok(Self::WithConfiguration),
            "plain" => Ok(Self::Plain),
            other => Err(format!(
                "unknown variant: {other} (expected with-configuration or plain)"
            )),
        }
    }
}

/// Raw step inputs, exactly as read from the environment
///
/// Unset variables are represented as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepInputs {
    /// Raw `build_path`
    pub build_path: String,
    /// Raw `configuration`, always empty for [`Variant::Plain`]
    pub configuration: String,
    /// Raw `build_tests`
    pub build_tests: String,
    /// Raw `disable_sandbox`
    pub disable_sandbox: String,
}

impl StepInputs {
    /// Read the inputs `variant` declares through a key lookup
    pub fn from_lookup<F>(variant: Variant, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).unwrap_or_default();
        Self {
            build_path: read(BUILD_PATH_KEY),
            configuration: if variant.has_configuration() {
                read(CONFIGURATION_KEY)
            } else {
                String::new()
            },
            build_tests: read(BUILD_TESTS_KEY),
            disable_sandbox: read(DISABLE_SANDBOX_KEY),
        }
    }

    /// Read inputs from the process environment
    pub fn from_env(variant: Variant) -> Self {
        Self::from_lookup(variant, |key| std::env::var(key).ok())
    }

    /// Print the inputs as received, before validation
    pub fn print(&self, variant: Variant) {
        Status::section("Project Parameters:");
        Status::param("BuildPath", &self.build_path);

        Status::section("Build Run Configs:");
        if variant.has_configuration() {
            Status::param("Configuration", &self.configuration);
        }
        Status::param("BuildTests", &self.build_tests);
        Status::param("DisableSandbox", &self.disable_sandbox);
    }

    /// Validate into a [`BuildConfig`]
    ///
    /// Fields are checked in a fixed order and the first failure is returned.
    pub fn validate(&self, variant: Variant) -> Result<BuildConfig, ValidationError> {
        let mut validator = Validator::new().required(BUILD_PATH_KEY, &self.build_path);

        if variant.has_configuration() {
            validator = validator.required_with_options(
                CONFIGURATION_KEY,
                &self.configuration,
                &BuildConfiguration::OPTIONS,
            );
        }

        validator
            .required_with_options(BUILD_TESTS_KEY, &self.build_tests, &YES_NO)
            .required_with_options(DISABLE_SANDBOX_KEY, &self.disable_sandbox, &YES_NO)
            .finish()?;

        let configuration = if variant.has_configuration() {
            // Already checked against OPTIONS above
            self.configuration.parse::<BuildConfiguration>().ok()
        } else {
            None
        };

        Ok(BuildConfig {
            build_path: self.build_path.clone(),
            configuration,
            build_tests: self.build_tests == "yes",
            disable_sandbox: self.disable_sandbox == "yes",
        })
    }
}

/// Validated, immutable build configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
    build_path: String,
    configuration: Option<BuildConfiguration>,
    build_tests: bool,
    disable_sandbox: bool,
}

impl BuildConfig {
    /// Non-empty build directory
    pub fn build_path(&self) -> &str {
        &self.build_path
    }

    /// `None` for the plain variant
    pub fn configuration(&self) -> Option<BuildConfiguration> {
        self.configuration
    }

    /// `build_tests` was `yes`
    pub fn build_tests(&self) -> bool {
        self.build_tests
    }

    /// `disable_sandbox` was `yes`
    pub fn disable_sandbox(&self) -> bool {
        self.disable_sandbox
    }
}
