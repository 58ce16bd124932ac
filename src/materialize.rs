//! Materializer: turn a resolved selection into files on disk.
//!
//! Target resolution is a small state machine over the target directory:
//!
//! ```text
//! RESOLVING -> CONFLICT? -> (OVERWRITE | RENAME) -> READY -> COPIED -> TEMPLATED
//! ```
//!
//! A non-empty target triggers the overwrite-or-rename negotiation. Rename
//! loops back to RESOLVING with the new name, bounded by
//! [`MAX_RENAME_ATTEMPTS`] so a stubborn forced rename cannot spin forever.
//! Once a target is settled the template tree is copied byte-for-byte and
//! the placeholder pass rewrites every file containing a token.

use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::{GeneratorConfig, MAX_RENAME_ATTEMPTS};
use crate::errors::ScaffoldError;
use crate::registry::TemplateRegistry;
use crate::selection::Selection;

/// Token rewritten to the target directory's basename in every copied file.
pub const PROJECT_NAME_TOKEN: &str = "{{__PROJECT_NAME__}}";

/// Outcome of a successful materialization.
#[derive(Debug)]
pub struct Materialized {
    /// Absolute path the template was copied into.
    pub target_dir: PathBuf,
    /// Basename of the target directory; this is what replaced the
    /// placeholder token, not the raw `projectName` argument.
    pub display_name: String,
}

/// Copy the selected template into place and substitute placeholders.
///
/// `cwd` anchors relative project names; `selection.project_name` may be
/// reassigned once per rename negotiation.
pub fn materialize(
    selection: &mut Selection,
    cwd: &Path,
    registry: &TemplateRegistry,
    config: &GeneratorConfig,
) -> Result<Materialized, ScaffoldError> {
    let template_dir = registry.template_dir(selection.language, selection.database);
    if !template_dir.is_dir() {
        return Err(ScaffoldError::MissingTemplate {
            combination: selection.combination(),
            path: template_dir,
        });
    }

    let target_dir = settle_target(selection, cwd, config)?;
    debug!(target = %target_dir.display(), template = %template_dir.display(), "target settled");

    std::fs::create_dir_all(&target_dir).map_err(|e| ScaffoldError::io(&target_dir, e))?;
    copy_tree(&template_dir, &target_dir)?;

    let display_name = match target_dir.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => selection.project_name.clone(),
    };
    let placeholders = [(PROJECT_NAME_TOKEN.to_string(), display_name.clone())];
    let rewritten = apply_placeholders(&target_dir, &placeholders)?;
    debug!(rewritten, "placeholder pass complete");

    Ok(Materialized {
        target_dir,
        display_name,
    })
}

/// Resolve the target directory, negotiating conflicts until the target is
/// absent, empty, or cleared for overwrite.
fn settle_target(
    selection: &mut Selection,
    cwd: &Path,
    config: &GeneratorConfig,
) -> Result<PathBuf, ScaffoldError> {
    let mut attempts = 0u32;
    loop {
        let target_dir = if selection.use_current_dir {
            cwd.to_path_buf()
        } else {
            cwd.join(&selection.project_name)
        };

        if dir_entry_count(&target_dir)? == 0 {
            return Ok(target_dir);
        }

        debug!(target = %target_dir.display(), "target is not empty, negotiating");
        if decide_overwrite(&target_dir, config)? {
            clear_dir(&target_dir)?;
            return Ok(target_dir);
        }

        if attempts == MAX_RENAME_ATTEMPTS {
            return Err(ScaffoldError::TooManyRenames { attempts });
        }
        attempts += 1;

        selection.project_name = pick_new_name(&selection.project_name, &target_dir, config)?;
        selection.use_current_dir = false;
    }
}

/// Overwrite decision for a non-empty target: forced value when configured,
/// interactive confirmation otherwise. Automated mode with no forced value
/// must not silently proceed.
fn decide_overwrite(target_dir: &Path, config: &GeneratorConfig) -> Result<bool, ScaffoldError> {
    if let Some(forced) = config.forced_overwrite {
        return Ok(forced);
    }
    if config.automated {
        return Err(ScaffoldError::UnresolvedConflict {
            path: target_dir.to_path_buf(),
        });
    }
    let overwrite = Confirm::new()
        .with_prompt(format!(
            "{} is not empty. Overwrite its contents?",
            target_dir.display()
        ))
        .default(false)
        .interact()?;
    Ok(overwrite)
}

/// Replacement name when overwrite is declined. Automated mode never
/// prompts: without a forced rename the conflict stays unresolved.
fn pick_new_name(
    current: &str,
    target_dir: &Path,
    config: &GeneratorConfig,
) -> Result<String, ScaffoldError> {
    if let Some(name) = &config.forced_rename {
        return Ok(name.clone());
    }
    if config.automated {
        return Err(ScaffoldError::UnresolvedConflict {
            path: target_dir.to_path_buf(),
        });
    }
    let name = Input::<String>::new()
        .with_prompt("Pick a different project name")
        .default(format!("{current}-new"))
        .interact_text()?;
    Ok(name)
}

/// Number of entries in a directory; a non-existent directory counts as
/// zero. Dotfiles count: a pre-existing `.git` is a conflict.
fn dir_entry_count(dir: &Path) -> Result<usize, ScaffoldError> {
    match std::fs::read_dir(dir) {
        Ok(entries) => Ok(entries.count()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
        Err(e) => Err(ScaffoldError::io(dir, e)),
    }
}

/// Delete everything inside `dir` without removing `dir` itself.
fn clear_dir(dir: &Path) -> Result<(), ScaffoldError> {
    let entries = std::fs::read_dir(dir).map_err(|e| ScaffoldError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| ScaffoldError::io(dir, e))?;
        let path = entry.path();
        let result = if path.is_dir() {
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };
        result.map_err(|e| ScaffoldError::io(&path, e))?;
    }
    Ok(())
}

/// Recursively copy `src` into `dst`, preserving relative structure.
fn copy_tree(src: &Path, dst: &Path) -> Result<(), ScaffoldError> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            ScaffoldError::io(path, e.into())
        })?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .expect("walkdir yields paths under its root");
        if rel.as_os_str().is_empty() {
            continue;
        }
        let dest = dst.join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest).map_err(|e| ScaffoldError::io(&dest, e))?;
        } else {
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
            }
            std::fs::copy(entry.path(), &dest).map_err(|e| ScaffoldError::io(&dest, e))?;
        }
    }
    Ok(())
}

/// Walk every regular file under `dir` and apply the ordered placeholder
/// list. Files are rewritten only when at least one token matched.
///
/// Replacement is a byte-level exact-literal match, so files that are not
/// valid UTF-8 neither error nor get special treatment. A binary file that
/// happens to contain token-shaped bytes will be rewritten; accepted
/// limitation.
pub fn apply_placeholders(
    dir: &Path,
    placeholders: &[(String, String)],
) -> Result<usize, ScaffoldError> {
    let mut rewritten = 0;
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            ScaffoldError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let content = std::fs::read(path).map_err(|e| ScaffoldError::io(path, e))?;

        let mut updated = content;
        let mut changed = false;
        for (token, value) in placeholders {
            if let Some(replaced) = replace_all(&updated, token.as_bytes(), value.as_bytes()) {
                updated = replaced;
                changed = true;
            }
        }
        if changed {
            std::fs::write(path, &updated).map_err(|e| ScaffoldError::io(path, e))?;
            rewritten += 1;
        }
    }
    Ok(rewritten)
}

/// Replace every occurrence of `needle` in `haystack`.
///
/// Returns `None` when nothing matched, so callers can skip the write and
/// leave timestamps alone.
pub fn replace_all(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Option<Vec<u8>> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    let mut out: Vec<u8> = Vec::with_capacity(haystack.len());
    let mut matched = false;
    let mut i = 0;
    while i < haystack.len() {
        if haystack[i..].starts_with(needle) {
            out.extend_from_slice(replacement);
            i += needle.len();
            matched = true;
        } else {
            out.push(haystack[i]);
            i += 1;
        }
    }
    matched.then_some(out)
}
