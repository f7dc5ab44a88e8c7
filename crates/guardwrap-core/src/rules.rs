//! Per-module wrap rules.
//!
//! A rule set may cover only part of a module's mapping entries. Modules
//! without rules still get the guard import but no wrapped regions.

use crate::config::GuardSettings;
use crate::mapping::Module;
use crate::marker::Marker;

#[derive(Debug, Clone)]
pub struct WrapRule {
    pub component: String,
    pub start: Marker,
    pub end: Marker,
}

impl WrapRule {
    pub fn new(component: impl Into<String>, start: Marker, end: Marker) -> Self {
        Self {
            component: component.into(),
            start,
            end,
        }
    }
}

/// Built-in rules for `module`, in application order.
pub fn rules_for(module: Module, guard: &GuardSettings) -> Vec<WrapRule> {
    let close = guard.close_tag();
    match module {
        // The KPI block ends at a conditional `: null}` or, once guarded by
        // hand, at the guard's closing tag.
        Module::Accounting => vec![WrapRule::new(
            "kpis",
            Marker::literal("{/* KPI Cards */}"),
            Marker::any_of(&[close.as_str(), ": null}"]),
        )],
        Module::Purchase | Module::Inventory => Vec::new(),
    }
}
