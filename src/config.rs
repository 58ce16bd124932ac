//! Runtime configuration for the generator.
//!
//! Every environment signal is read exactly once, in [`GeneratorConfig::from_env`],
//! and the resulting value is passed into the completer and materializer.
//! Stages never read the environment themselves, which keeps automated-mode
//! behavior an ordinary constructor parameter in tests.

use std::path::PathBuf;

/// Environment variable switching prompting off in favor of deterministic
/// defaults (`test-app` / js / mongo).
pub const AUTOMATED_ENV: &str = "KILN_AUTOMATED";
/// Tri-state override for the overwrite confirmation (`true`/`1`, `false`/`0`).
pub const FORCE_OVERWRITE_ENV: &str = "KILN_FORCE_OVERWRITE";
/// Replacement project name used when overwrite is declined.
pub const RENAME_TO_ENV: &str = "KILN_RENAME_TO";
/// Override for the template registry root.
pub const TEMPLATES_DIR_ENV: &str = "KILN_TEMPLATES_DIR";
/// Override for the dependency install command.
pub const INSTALL_CMD_ENV: &str = "KILN_INSTALL_CMD";

/// How many rename negotiations the materializer will attempt before giving
/// up with a `TooManyRenames` error.
pub const MAX_RENAME_ATTEMPTS: u32 = 5;

/// Runtime configuration, injected into each pipeline stage.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Root directory holding the four template combinations.
    pub templates_root: PathBuf,
    /// Automated mode: no prompts, deterministic defaults.
    pub automated: bool,
    /// Forced overwrite decision for non-empty targets (unset = ask).
    pub forced_overwrite: Option<bool>,
    /// Forced replacement name when overwrite is declined (unset = ask).
    pub forced_rename: Option<String>,
    /// Dependency install command, run through `sh -c` in the target.
    pub install_cmd: String,
    /// Verbose user-facing output.
    pub verbose: bool,
}

impl GeneratorConfig {
    /// Build the configuration from the process environment.
    pub fn from_env(verbose: bool) -> Self {
        Self {
            templates_root: templates_root_from_env(),
            automated: env_truthy(AUTOMATED_ENV),
            forced_overwrite: std::env::var(FORCE_OVERWRITE_ENV)
                .ok()
                .and_then(|v| parse_bool(&v)),
            forced_rename: std::env::var(RENAME_TO_ENV)
                .ok()
                .filter(|v| !v.trim().is_empty()),
            install_cmd: std::env::var(INSTALL_CMD_ENV)
                .unwrap_or_else(|_| "npm install".to_string()),
            verbose,
        }
    }

    /// A plain interactive configuration rooted at the given templates
    /// directory. Unit tests build on this and flip the fields they need.
    pub fn for_templates(templates_root: impl Into<PathBuf>) -> Self {
        Self {
            templates_root: templates_root.into(),
            automated: false,
            forced_overwrite: None,
            forced_rename: None,
            install_cmd: "npm install".to_string(),
            verbose: false,
        }
    }
}

/// `templates/` beside the executable when present, else `templates/` under
/// the current directory. `KILN_TEMPLATES_DIR` overrides both.
fn templates_root_from_env() -> PathBuf {
    if let Ok(dir) = std::env::var(TEMPLATES_DIR_ENV) {
        return PathBuf::from(dir);
    }
    if let Ok(exe) = std::env::current_exe()
        && let Some(exe_dir) = exe.parent()
    {
        let beside_exe = exe_dir.join("templates");
        if beside_exe.is_dir() {
            return beside_exe;
        }
    }
    PathBuf::from("templates")
}

fn env_truthy(var: &str) -> bool {
    std::env::var(var)
        .map(|v| parse_bool(&v).unwrap_or(false))
        .unwrap_or(false)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
