//! Post-install runner: dependency installation inside the materialized
//! project, plus the final success summary.
//!
//! Exactly one external command per invocation, run through `sh -c` with
//! the target directory as its working directory. Stdout and stderr are
//! captured and relayed as opaque text. There is no timeout and no retry;
//! a hung or failed install surfaces directly.

use std::process::Stdio;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::process::Command;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::errors::ScaffoldError;
use crate::materialize::Materialized;
use crate::selection::Selection;

/// Run the dependency install inside the materialized target.
///
/// Success relays the installer's stdout; failure relays its stderr and
/// maps to [`ScaffoldError::Install`] so the process exits non-zero.
pub async fn run_install(
    project: &Materialized,
    config: &GeneratorConfig,
) -> Result<(), ScaffoldError> {
    debug!(cmd = %config.install_cmd, cwd = %project.target_dir.display(), "running installer");
    if config.verbose {
        println!(
            "Running `{}` in {}",
            config.install_cmd,
            project.target_dir.display()
        );
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .expect("spinner template is a valid static string"),
    );
    spinner.set_message("Installing dependencies...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = Command::new("sh")
        .arg("-c")
        .arg(&config.install_cmd)
        .current_dir(&project.target_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| ScaffoldError::io(&project.target_dir, e))?;

    spinner.finish_and_clear();

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        return Err(ScaffoldError::Install {
            exit_code: output.status.code().unwrap_or(-1),
            stderr,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        print!("{stdout}");
    }
    Ok(())
}

/// Final success summary with the next steps.
pub fn print_summary(project: &Materialized, selection: &Selection) {
    println!();
    println!(
        "{} Project created in {}",
        style("✔").green().bold(),
        style(&project.display_name).cyan()
    );
    println!(
        "  language: {}  database: {}",
        style(selection.language.as_str()).yellow(),
        style(selection.database.as_str()).yellow()
    );
    println!();
    println!("Next steps:");
    if !selection.use_current_dir {
        println!("  cd {}", project.display_name);
    }
    println!("  npm run dev");
}
