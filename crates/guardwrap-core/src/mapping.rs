//! Module → component → permission key table.
//!
//! The table is embedded data. [`MappingTable::builtin`] checks it once at
//! startup: component names are `[a-z0-9_]+`, unique per module, and every
//! key must read `<module>.<component>`. Together these make keys unique.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{MappingError, WrapError};

/// Top-level page domain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Accounting,
    Purchase,
    Inventory,
}

impl Module {
    pub const ALL: [Module; 3] = [Module::Accounting, Module::Purchase, Module::Inventory];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Accounting => "accounting",
            Module::Purchase => "purchase",
            Module::Inventory => "inventory",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Module {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Module::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unknown module: {}", s))
    }
}

/// Dotted `<module>.<component>` identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PermissionKey(String);

impl PermissionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const ENTRIES: &[(Module, &[(&str, &str)])] = &[
    (
        Module::Accounting,
        &[
            ("kpis", "accounting.kpis"),
            ("pl_statement", "accounting.pl_statement"),
            ("balance_sheet", "accounting.balance_sheet"),
            ("cash_flow", "accounting.cash_flow"),
            ("ar_aging", "accounting.ar_aging"),
            ("ap_aging", "accounting.ap_aging"),
            ("revenue_breakdown", "accounting.revenue_breakdown"),
            ("expense_breakdown", "accounting.expense_breakdown"),
        ],
    ),
    (
        Module::Purchase,
        &[
            ("kpis", "purchase.kpis"),
            ("trend", "purchase.trend"),
            ("top_suppliers", "purchase.top_suppliers"),
            ("by_category", "purchase.by_category"),
            ("by_brand", "purchase.by_brand"),
            ("ap_outstanding", "purchase.ap_outstanding"),
        ],
    ),
    (
        Module::Inventory,
        &[
            ("kpis", "inventory.kpis"),
            ("stock_movement", "inventory.stock_movement"),
            ("low_stock", "inventory.low_stock"),
            ("overstock", "inventory.overstock"),
            ("slow_moving", "inventory.slow_moving"),
            ("turnover", "inventory.turnover"),
            ("by_branch", "inventory.by_branch"),
        ],
    ),
];

/// Validated, read-only permission mapping.
#[derive(Debug, Clone)]
pub struct MappingTable {
    // Vec keeps declaration order for `components`.
    modules: BTreeMap<Module, Vec<(String, PermissionKey)>>,
}

impl MappingTable {
    /// The embedded table.
    pub fn builtin() -> Result<Self, MappingError> {
        Self::from_entries(ENTRIES)
    }

    pub fn from_entries(entries: &[(Module, &[(&str, &str)])]) -> Result<Self, MappingError> {
        let mut modules: BTreeMap<Module, Vec<(String, PermissionKey)>> = BTreeMap::new();

        for (module, components) in entries {
            let slot = modules.entry(*module).or_default();
            for (component, key) in components.iter() {
                if !is_component_name(component) {
                    return Err(MappingError::InvalidComponent {
                        module: *module,
                        component: component.to_string(),
                    });
                }
                let expected = format!("{}.{}", module, component);
                if *key != expected {
                    return Err(MappingError::KeyMismatch {
                        module: *module,
                        component: component.to_string(),
                        key: key.to_string(),
                    });
                }
                if slot.iter().any(|(c, _)| c == component) {
                    return Err(MappingError::DuplicateComponent {
                        module: *module,
                        component: component.to_string(),
                    });
                }
                slot.push((component.to_string(), PermissionKey(expected)));
            }
        }

        Ok(Self { modules })
    }

    /// Permission key for `module.component`, or `UnknownMapping`.
    pub fn lookup(&self, module: Module, component: &str) -> Result<&PermissionKey, WrapError> {
        self.modules
            .get(&module)
            .and_then(|cs| cs.iter().find(|(c, _)| c == component))
            .map(|(_, key)| key)
            .ok_or_else(|| WrapError::UnknownMapping {
                module,
                component: component.to_string(),
            })
    }

    /// Component names of a module, in declaration order.
    pub fn components(&self, module: Module) -> impl Iterator<Item = &str> {
        self.modules
            .get(&module)
            .into_iter()
            .flat_map(|cs| cs.iter().map(|(c, _)| c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.modules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn is_component_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_consistent() {
        let table = MappingTable::builtin().unwrap();
        assert_eq!(table.len(), 21);

        for module in Module::ALL {
            for component in table.components(module) {
                let key = table.lookup(module, component).unwrap();
                assert_eq!(key.as_str(), format!("{}.{}", module, component));
            }
        }
    }

    #[test]
    fn lookup_unknown_pair_fails() {
        let table = MappingTable::builtin().unwrap();
        let err = table.lookup(Module::Purchase, "pl_statement").unwrap_err();
        assert_eq!(
            err,
            WrapError::UnknownMapping {
                module: Module::Purchase,
                component: "pl_statement".into()
            }
        );
    }

    #[test]
    fn rejects_key_mismatch() {
        let err = MappingTable::from_entries(&[(Module::Accounting, &[("kpis", "sales.kpis")])])
            .unwrap_err();
        assert!(matches!(err, MappingError::KeyMismatch { .. }));
    }

    #[test]
    fn rejects_duplicate_component() {
        let err = MappingTable::from_entries(&[(
            Module::Inventory,
            &[("kpis", "inventory.kpis"), ("kpis", "inventory.kpis")],
        )])
        .unwrap_err();
        assert!(matches!(err, MappingError::DuplicateComponent { .. }));
    }

    #[test]
    fn duplicate_across_module_blocks_is_caught() {
        let err = MappingTable::from_entries(&[
            (Module::Purchase, &[("trend", "purchase.trend")]),
            (Module::Inventory, &[("kpis", "inventory.kpis")]),
            (Module::Purchase, &[("trend", "purchase.trend")]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            MappingError::DuplicateComponent {
                module: Module::Purchase,
                component: "trend".into()
            }
        );
    }

    #[test]
    fn rejects_dotted_component() {
        let err = MappingTable::from_entries(&[(Module::Accounting, &[("a.b", "accounting.a.b")])])
            .unwrap_err();
        assert!(matches!(err, MappingError::InvalidComponent { .. }));
    }

    #[test]
    fn components_keep_declaration_order() {
        let table = MappingTable::builtin().unwrap();
        let first: Vec<_> = table.components(Module::Accounting).take(3).collect();
        assert_eq!(first, vec!["kpis", "pl_statement", "balance_sheet"]);
    }

    #[test]
    fn module_parses_from_str() {
        assert_eq!("inventory".parse::<Module>().unwrap(), Module::Inventory);
        assert!("sales".parse::<Module>().is_err());
    }
}
