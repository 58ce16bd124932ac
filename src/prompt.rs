//! Interactive completer: fills whatever the argument resolver left open.
//!
//! In automated mode (`KILN_AUTOMATED`, surfaced through
//! [`GeneratorConfig::automated`]) every missing field takes a fixed default
//! instead of prompting, so the whole pipeline runs without a terminal.

use console::style;
use dialoguer::{Input, Select};

use crate::config::GeneratorConfig;
use crate::errors::ScaffoldError;
use crate::selection::{Database, Language, PartialSelection, Selection};

/// Suggested project name in the interactive prompt.
const NAME_SUGGESTION: &str = "backend";

/// Defaults applied in automated mode.
const AUTOMATED_NAME: &str = "test-app";
const AUTOMATED_LANGUAGE: Language = Language::Js;
const AUTOMATED_DATABASE: Database = Database::Mongo;

/// Complete a partial selection into a full one.
///
/// Fields already pinned by flags are never re-asked. Question order is
/// fixed: project name, language, database.
pub fn complete(
    partial: PartialSelection,
    config: &GeneratorConfig,
) -> Result<Selection, ScaffoldError> {
    if config.automated {
        return Ok(Selection {
            project_name: partial
                .project_name
                .unwrap_or_else(|| AUTOMATED_NAME.to_string()),
            language: partial.language.unwrap_or(AUTOMATED_LANGUAGE),
            database: partial.database.unwrap_or(AUTOMATED_DATABASE),
            use_current_dir: partial.use_current_dir,
        });
    }

    let needs_prompting = partial.project_name.is_none()
        || partial.language.is_none()
        || partial.database.is_none();
    if needs_prompting {
        print_banner(&partial);
    }

    let project_name = match partial.project_name {
        Some(name) => name,
        None => Input::<String>::new()
            .with_prompt("What is the name of your project?")
            .default(NAME_SUGGESTION.to_string())
            .interact_text()?,
    };

    let language = match partial.language {
        Some(language) => language,
        None => {
            let choice = Select::new()
                .with_prompt("What language do you want to use?")
                .items(&["JavaScript", "TypeScript"])
                .default(0)
                .interact()?;
            match choice {
                0 => Language::Js,
                _ => Language::Ts,
            }
        }
    };

    let database = match partial.database {
        Some(database) => database,
        None => {
            let choice = Select::new()
                .with_prompt("What database do you want to use?")
                .items(&["MongoDB with Mongoose ODM", "PostgreSQL with Drizzle ORM"])
                .default(0)
                .interact()?;
            match choice {
                0 => Database::Mongo,
                _ => Database::Pg,
            }
        }
    };

    Ok(Selection {
        project_name,
        language,
        database,
        use_current_dir: partial.use_current_dir,
    })
}

/// One-time banner before the first question. Flag users who already pinned
/// their stack get a short acknowledgement instead of the full welcome.
fn print_banner(partial: &PartialSelection) {
    if partial.stack_fully_flagged() {
        println!(
            "{} stack selected from flags, just a couple of details left",
            style("kiln:").cyan().bold()
        );
    } else {
        println!(
            "{} let's scaffold a backend. Answer a few questions, or pass flags next time (see {}).",
            style("Welcome to kiln!").cyan().bold(),
            style("kiln --help").yellow()
        );
    }
    println!();
}
