use anyhow::Context as _;
use similar::TextDiff;

use guardwrap_core::{
    run_batch_with, Context, FileReport, ImportOutcome, MappingTable, MissingRegionPolicy,
    ModuleResult, ModuleRun, Outcome, ProcessOptions, RuleStatus, Settings, WrapOutcome,
};

use crate::cli::args::Cli;
use crate::exit_codes;

pub fn run(args: Cli) -> anyhow::Result<i32> {
    // 1) Settings: defaults, optionally overridden by YAML
    let mut settings = match &args.config {
        Some(path) => Settings::from_yaml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Settings::default(),
    };
    if !args.modules.is_empty() {
        settings.driver.modules.retain(|m| args.modules.contains(m));
    }

    // 2) Mapping (checked once, before any page is touched)
    let table = MappingTable::builtin().context("embedded permission mapping is inconsistent")?;

    let ctx = Context {
        table,
        settings,
        options: ProcessOptions {
            missing_region: if args.allow_missing_regions {
                MissingRegionPolicy::Warn
            } else {
                MissingRegionPolicy::Fail
            },
            dry_run: args.dry_run,
        },
        root: args.root,
    };

    // 3) Batch, reporting each module as it finishes
    let report = run_batch_with(&ctx, |run| print_module(run, args.dry_run));

    eprintln!(
        "\nDone! {} updated, {} unchanged, {} failed, {} not found.",
        report.updated(),
        report.unchanged(),
        report.failed(),
        report.missing()
    );

    if report.has_failures() {
        Ok(exit_codes::FILES_FAILED)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn print_module(run: &ModuleRun, dry_run: bool) {
    match &run.result {
        ModuleResult::PathNotFound(path) => {
            eprintln!("Warning: {} not found", path.display());
        }
        ModuleResult::Error(e) => {
            eprintln!("Processing {}...", run.path.display());
            eprintln!("✗ {}", e);
        }
        ModuleResult::Processed(file) => {
            eprintln!("Processing {}...", file.path.display());
            print_details(file);
            print_outcome(file, dry_run);
        }
    }
}

fn print_details(file: &FileReport) {
    if file.report.import == ImportOutcome::AnchorNotFound {
        eprintln!("  warning: anchor import not found; guard import not added");
    }

    for rule in &file.report.rules {
        match &rule.status {
            RuleStatus::Applied(WrapOutcome::Wrapped) => {
                eprintln!("  {}: wrapped", rule.component);
            }
            RuleStatus::Applied(WrapOutcome::AlreadyWrapped) => {
                eprintln!("  {}: already wrapped", rule.component);
            }
            RuleStatus::Warned(e) => eprintln!("  warning: {}", e),
            RuleStatus::Failed(e) => eprintln!("  error: {}", e),
        }
    }
}

fn print_outcome(file: &FileReport, dry_run: bool) {
    let path = file.path.display();
    match file.outcome() {
        Outcome::Updated if dry_run => {
            print_unified_diff(
                &path.to_string(),
                &file.report.before,
                &file.report.after,
            );
            eprintln!("~ Would update {}", path);
        }
        Outcome::Updated => eprintln!("✓ Updated {}", path),
        Outcome::Unchanged => eprintln!("- No changes needed for {}", path),
        Outcome::Failed => eprintln!("✗ Failed {} (not written)", path),
    }
}

fn print_unified_diff(file: &str, before: &str, after: &str) {
    println!("--- {} (dry-run) ---", file);

    let diff = TextDiff::from_lines(before, after);
    print!(
        "{}",
        diff.unified_diff().context_radius(3).header(file, file)
    );

    println!("--- end ---");
}
