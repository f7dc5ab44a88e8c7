use guardwrap_core::{wrap_region, GuardSettings, MappingTable, Marker, Module, WrapOutcome};
use proptest::prelude::*;

const START: &str = "{/* KPI Cards */}";
const END: &str = ") : null}";

fn wrap(doc: &str) -> (String, WrapOutcome) {
    let table = MappingTable::builtin().unwrap();
    let key = table.lookup(Module::Accounting, "kpis").unwrap();
    wrap_region(
        doc,
        &Marker::literal(START),
        &Marker::any_of(&["</PermissionGuard>", END]),
        key,
        &GuardSettings::default(),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn wrapping_is_idempotent(
        prefix in "[a-z \n]{0,40}",
        body in "[a-z \n]{0,60}",
        suffix in "[a-z \n]{0,40}",
    ) {
        let doc = format!("{prefix}{START}{body}{END}{suffix}");
        let (once, outcome) = wrap(&doc);
        prop_assert_eq!(outcome, WrapOutcome::Wrapped);
        let (twice, outcome) = wrap(&once);
        prop_assert_eq!(outcome, WrapOutcome::AlreadyWrapped);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn wrapped_body_is_the_original_span(
        prefix in "[a-z \n]{0,40}",
        body in "[a-z \n]{0,60}",
        suffix in "[a-z \n]{0,40}",
    ) {
        let doc = format!("{prefix}{START}{body}{END}{suffix}");
        let (out, _) = wrap(&doc);

        let open = "<PermissionGuard componentKey=\"accounting.kpis\">\n";
        let close = "\n      </PermissionGuard>";
        let from = out.find(open).unwrap() + open.len();
        let to = out.rfind(close).unwrap();
        let span = format!("{START}{body}{END}");
        prop_assert_eq!(&out[from..to], span.as_str());

        // Surrounding text is untouched.
        prop_assert!(out.starts_with(&prefix));
        prop_assert!(out.ends_with(&suffix));
    }
}
