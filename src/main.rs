use std::process::ExitCode;

use config::Config;
use mirror::models::ResultCounters;
use report::{Console, Reporter};
use utils::error::RunError;

mod config;
mod mirror;
mod reconcile;
mod registry;
mod report;
mod scan;
mod utils;

/// How a run that did not fail outright ended.
#[derive(Debug)]
enum RunOutcome {
    Completed(ResultCounters),
    NothingToDo,
    Cancelled,
}

fn main() -> ExitCode {
    env_logger::init();

    let config = Config::from_env();

    // Log env for debugging
    log::info!("Using env:");
    log::info!("SOURCEDIR {}", config.source_root.display());
    log::info!("BACKUPDIR {}", config.target_root.display());
    log::info!("PASSWDFILE {}", config.passwd_file.display());
    log::info!("MINUID {}", config.min_uid);

    let reporter = Console;

    if unsafe { libc::geteuid() } != 0 {
        reporter.warning("Not running as root; ownership changes will likely fail");
    }

    match run(&config, &reporter) {
        Ok(RunOutcome::Completed(counters)) => {
            summarize(&counters, &reporter);
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::NothingToDo | RunOutcome::Cancelled) => ExitCode::SUCCESS,
        Err(e) => {
            reporter.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, reporter: &dyn Reporter) -> Result<RunOutcome, RunError> {
    check_roots(config)?;

    let users = registry::list_regular_users(&config.passwd_file, config.min_uid)?;
    if users.is_empty() {
        return Err(RunError::EmptyRegistry);
    }
    reporter.info(&format!(
        "Found {} regular users in the account database",
        users.len()
    ));

    let dirs = scan::list_candidate_dirs(&config.source_root, &config.denylist, reporter)?;
    reporter.info(&format!(
        "Found {} user directories under {}",
        dirs.len(),
        config.source_root.display()
    ));
    if dirs.is_empty() {
        reporter.warning("No user directories found; nothing to do");
        return Ok(RunOutcome::NothingToDo);
    }

    let reconciled = reconcile::reconcile(&dirs, &users);
    for name in &reconciled.valid {
        if let Some(account) = users.get(name) {
            reporter.success(&format!("Validated user: {} (UID: {})", name, account.uid));
        }
    }
    if !reconciled.invalid.is_empty() {
        reporter.info("The following directories do not correspond to system users and will be skipped:");
        for name in &reconciled.invalid {
            reporter.plain(&format!("  - {}", name));
        }
    }
    if reconciled.valid.is_empty() {
        reporter.warning("No directories correspond to registered users; nothing to do");
        return Ok(RunOutcome::NothingToDo);
    }

    reporter.info(&format!(
        "Backup directories will be created for {} users:",
        reconciled.valid.len()
    ));
    for (i, name) in reconciled.valid.iter().enumerate() {
        if let Some(account) = users.get(name) {
            reporter.plain(&format!("  {:2}. {} (UID: {})", i + 1, name, account.uid));
        }
    }

    let proceed = reporter
        .confirm("Continue and create backup directories for these users?")
        .map_err(RunError::Prompt)?;
    if !proceed {
        reporter.info("Operation cancelled");
        return Ok(RunOutcome::Cancelled);
    }

    reporter.info("Creating backup directories...");
    let counters = mirror::apply(&reconciled.valid, &users, config, reporter);
    Ok(RunOutcome::Completed(counters))
}

fn check_roots(config: &Config) -> Result<(), RunError> {
    if !config.source_root.is_dir() {
        return Err(RunError::SourceRootMissing(config.source_root.clone()));
    }
    if !config.target_root.is_dir() {
        return Err(RunError::TargetRootMissing(config.target_root.clone()));
    }
    Ok(())
}

fn summarize(counters: &ResultCounters, reporter: &dyn Reporter) {
    reporter.info("Run complete");
    reporter.success(&format!("Created: {}", counters.created));
    if counters.created_with_warnings > 0 {
        reporter.warning(&format!(
            "Created with metadata warnings: {}",
            counters.created_with_warnings
        ));
    }
    reporter.warning(&format!("Already existed: {}", counters.already_existed));
    if counters.failed > 0 {
        reporter.error(&format!("Failed: {}", counters.failed));
    }
}
