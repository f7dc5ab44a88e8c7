//! Guard import injection.

use regex::Regex;

use crate::config::GuardSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Inserted,
    AlreadyPresent,
    /// The anchor import is missing; nothing was inserted.
    AnchorNotFound,
}

/// True when some `import ... from '...'` statement names `symbol`.
/// Multi-line import lists count; markup usage of the symbol does not.
/// A statement ends at its module specifier, so a missing `;` never lets
/// the match run on into the code below.
pub fn has_import(doc: &str, symbol: &str) -> bool {
    let statement = Regex::new(r#"(?m)^\s*import\b(?P<clause>[^;'"]*?)\bfrom\s*['"][^'"]*['"]"#);
    let word = Regex::new(&format!(r"\b{}\b", regex::escape(symbol)));
    match (statement, word) {
        (Ok(statement), Ok(word)) => statement
            .captures_iter(doc)
            .any(|c| c.name("clause").is_some_and(|m| word.is_match(m.as_str()))),
        // Fixed pattern and escaped symbol; only a size limit ends up here.
        _ => doc.contains(symbol),
    }
}

/// Insert the guard import right after the first anchor occurrence, unless
/// an import of the guard symbol already exists.
pub fn ensure_import(doc: &str, guard: &GuardSettings) -> (String, ImportOutcome) {
    if has_import(doc, &guard.tag) {
        return (doc.to_string(), ImportOutcome::AlreadyPresent);
    }

    let Some(at) = doc.find(&guard.anchor) else {
        tracing::warn!(anchor = %guard.anchor, "anchor import not found; guard import not added");
        return (doc.to_string(), ImportOutcome::AnchorNotFound);
    };

    let insert_at = at + guard.anchor.len();
    let mut out = String::with_capacity(doc.len() + guard.import_line.len() + 1);
    out.push_str(&doc[..insert_at]);
    out.push('\n');
    out.push_str(&guard.import_line);
    out.push_str(&doc[insert_at..]);
    (out, ImportOutcome::Inserted)
}
