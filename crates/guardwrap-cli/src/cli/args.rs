use clap::Parser;
use std::path::PathBuf;

use guardwrap_core::Module;

#[derive(Parser, Debug)]
#[command(
    name = "guardwrap",
    version,
    about = "Wrap dashboard page sections in PermissionGuard and add its import"
)]
pub struct Cli {
    /// Project root; pages live at <root>/src/app/<module>/page.tsx
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// YAML settings overriding guard markup and page layout
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not write files; show diffs of what would change
    #[arg(long)]
    pub dry_run: bool,

    /// Report unmatched regions as warnings instead of failing the page
    #[arg(long)]
    pub allow_missing_regions: bool,

    /// Only process this module (repeatable)
    #[arg(long = "module", value_name = "MODULE")]
    pub modules: Vec<Module>,
}
