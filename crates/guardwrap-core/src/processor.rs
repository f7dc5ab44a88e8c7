//! Per-document processing.
//!
//! `process_text` is pure: import injection, then each wrap rule of the
//! module in order. `process_file` adds the read and, when the text changed
//! and nothing failed, exactly one full write.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{ProcessError, WrapError};
use crate::import::{ensure_import, ImportOutcome};
use crate::mapping::{MappingTable, Module};
use crate::region::{wrap_region, WrapOutcome};
use crate::rules::{rules_for, WrapRule};

/// What to do when a rule's markers do not match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingRegionPolicy {
    /// The file fails and is not written.
    #[default]
    Fail,
    /// Report and keep going.
    Warn,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub missing_region: MissingRegionPolicy,
    /// Transform and report, but never write.
    pub dry_run: bool,
}

/// Everything a run needs. Built once, shared read-only.
#[derive(Debug, Clone)]
pub struct Context {
    pub table: MappingTable,
    pub settings: Settings,
    pub options: ProcessOptions,
    /// Root that `settings.driver.base_dir` is resolved against.
    pub root: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Unchanged,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleStatus {
    Applied(WrapOutcome),
    /// Region miss tolerated by [`MissingRegionPolicy::Warn`].
    Warned(WrapError),
    Failed(WrapError),
}

#[derive(Debug, Clone)]
pub struct RuleReport {
    pub component: String,
    pub status: RuleStatus,
}

#[derive(Debug, Clone)]
pub struct TextReport {
    pub before: String,
    pub after: String,
    pub import: ImportOutcome,
    pub rules: Vec<RuleReport>,
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub module: Module,
    pub report: TextReport,
    /// False for unchanged, failed and dry-run files.
    pub written: bool,
}

impl FileReport {
    pub fn outcome(&self) -> Outcome {
        self.report.outcome
    }
}

/// Apply the import and every wrap rule of `module` to `text`, without
/// touching the filesystem.
pub fn process_text(text: &str, module: Module, ctx: &Context) -> TextReport {
    let guard = &ctx.settings.guard;
    let (mut doc, import) = ensure_import(text, guard);

    let mut rules = Vec::new();
    for rule in rules_for(module, guard) {
        let status = match apply_rule(&doc, module, &rule, ctx) {
            Ok((next, outcome)) => {
                doc = next;
                RuleStatus::Applied(outcome)
            }
            Err(e)
                if e.is_region_miss()
                    && ctx.options.missing_region == MissingRegionPolicy::Warn =>
            {
                tracing::warn!(%module, component = %rule.component, "{}", e);
                RuleStatus::Warned(e)
            }
            Err(e) => {
                tracing::warn!(%module, component = %rule.component, "{}", e);
                RuleStatus::Failed(e)
            }
        };
        rules.push(RuleReport {
            component: rule.component,
            status,
        });
    }

    let failed = rules
        .iter()
        .any(|r| matches!(r.status, RuleStatus::Failed(_)));
    let outcome = if failed {
        Outcome::Failed
    } else if doc != text {
        Outcome::Updated
    } else {
        Outcome::Unchanged
    };

    TextReport {
        before: text.to_string(),
        after: doc,
        import,
        rules,
        outcome,
    }
}

fn apply_rule(
    doc: &str,
    module: Module,
    rule: &WrapRule,
    ctx: &Context,
) -> Result<(String, WrapOutcome), WrapError> {
    let key = ctx.table.lookup(module, &rule.component)?;
    wrap_region(doc, &rule.start, &rule.end, key, &ctx.settings.guard)
}

/// Process one page in place.
pub fn process_file(
    path: &Path,
    module: Module,
    ctx: &Context,
) -> Result<FileReport, ProcessError> {
    let input = std::fs::read_to_string(path).map_err(|source| ProcessError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let report = process_text(&input, module, ctx);

    let mut written = false;
    if report.outcome == Outcome::Updated && !ctx.options.dry_run {
        std::fs::write(path, &report.after).map_err(|source| ProcessError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "page written");
        written = true;
    }

    Ok(FileReport {
        path: path.to_path_buf(),
        module,
        report,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHOR: &str =
        "import { KPICardSkeleton, ChartSkeleton, TableSkeleton } from '@/components/LoadingSkeleton';";

    fn ctx(policy: MissingRegionPolicy) -> Context {
        Context {
            table: MappingTable::builtin().unwrap(),
            settings: Settings::default(),
            options: ProcessOptions {
                missing_region: policy,
                dry_run: false,
            },
            root: PathBuf::from("."),
        }
    }

    #[test]
    fn accounting_without_markers_fails_by_default() {
        let doc = format!("{}\n<div />\n", ANCHOR);
        let report = process_text(&doc, Module::Accounting, &ctx(MissingRegionPolicy::Fail));
        assert_eq!(report.outcome, Outcome::Failed);
        assert_eq!(report.import, ImportOutcome::Inserted);
        assert!(matches!(report.rules[0].status, RuleStatus::Failed(_)));
    }

    #[test]
    fn warn_policy_keeps_import_change() {
        let doc = format!("{}\n<div />\n", ANCHOR);
        let report = process_text(&doc, Module::Accounting, &ctx(MissingRegionPolicy::Warn));
        assert_eq!(report.outcome, Outcome::Updated);
        assert!(matches!(report.rules[0].status, RuleStatus::Warned(_)));
    }

    #[test]
    fn module_without_rules_only_gets_import() {
        let doc = format!("{}\n{{/* KPI Cards */}}\n) : null}}\n", ANCHOR);
        let report = process_text(&doc, Module::Purchase, &ctx(MissingRegionPolicy::Fail));
        assert_eq!(report.outcome, Outcome::Updated);
        assert!(report.rules.is_empty());
        assert!(!report.after.contains("componentKey"));
    }

    #[test]
    fn anchor_miss_is_not_a_failure() {
        let doc = "{/* KPI Cards */}\n<A />\n) : null}\n";
        let report = process_text(doc, Module::Accounting, &ctx(MissingRegionPolicy::Fail));
        assert_eq!(report.import, ImportOutcome::AnchorNotFound);
        assert_eq!(report.outcome, Outcome::Updated);
        assert_eq!(
            report.rules[0].status,
            RuleStatus::Applied(WrapOutcome::Wrapped)
        );
    }

    #[test]
    fn unknown_mapping_fails_the_file() {
        let mut c = ctx(MissingRegionPolicy::Warn);
        c.table = MappingTable::from_entries(&[(
            Module::Accounting,
            &[("cash_flow", "accounting.cash_flow")],
        )])
        .unwrap();
        let doc = format!("{}\n{{/* KPI Cards */}}\n) : null}}\n", ANCHOR);
        let report = process_text(&doc, Module::Accounting, &c);
        assert_eq!(report.outcome, Outcome::Failed);
        assert!(matches!(
            report.rules[0].status,
            RuleStatus::Failed(WrapError::UnknownMapping { .. })
        ));
    }
}
