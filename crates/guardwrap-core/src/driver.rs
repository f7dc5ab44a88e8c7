//! Batch driver: one page per configured module.

use std::path::PathBuf;

use crate::error::ProcessError;
use crate::mapping::Module;
use crate::processor::{process_file, Context, FileReport, Outcome};

#[derive(Debug)]
pub enum ModuleResult {
    Processed(FileReport),
    PathNotFound(PathBuf),
    Error(ProcessError),
}

#[derive(Debug)]
pub struct ModuleRun {
    pub module: Module,
    pub path: PathBuf,
    pub result: ModuleResult,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub runs: Vec<ModuleRun>,
}

impl BatchReport {
    fn count(&self, outcome: Outcome) -> usize {
        self.runs
            .iter()
            .filter(|r| matches!(&r.result, ModuleResult::Processed(f) if f.outcome() == outcome))
            .count()
    }

    pub fn updated(&self) -> usize {
        self.count(Outcome::Updated)
    }

    pub fn unchanged(&self) -> usize {
        self.count(Outcome::Unchanged)
    }

    /// Failed files plus I/O errors.
    pub fn failed(&self) -> usize {
        let io = self
            .runs
            .iter()
            .filter(|r| matches!(r.result, ModuleResult::Error(_)))
            .count();
        self.count(Outcome::Failed) + io
    }

    pub fn missing(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| matches!(r.result, ModuleResult::PathNotFound(_)))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

/// Run every configured module. Never stops early.
pub fn run_batch(ctx: &Context) -> BatchReport {
    run_batch_with(ctx, |_| {})
}

/// Like [`run_batch`], calling `on_done` after each module so callers can
/// report progress as it happens.
pub fn run_batch_with(ctx: &Context, mut on_done: impl FnMut(&ModuleRun)) -> BatchReport {
    let driver = &ctx.settings.driver;
    let mut report = BatchReport::default();

    for &module in &driver.modules {
        let path = driver.page_path(&ctx.root, module);

        let result = if !path.exists() {
            tracing::warn!(%module, path = %path.display(), "page not found");
            ModuleResult::PathNotFound(path.clone())
        } else {
            match process_file(&path, module, ctx) {
                Ok(file) => ModuleResult::Processed(file),
                Err(e) => {
                    tracing::warn!(%module, "{}", e);
                    ModuleResult::Error(e)
                }
            }
        };

        let run = ModuleRun {
            module,
            path,
            result,
        };
        on_done(&run);
        report.runs.push(run);
    }

    report
}
