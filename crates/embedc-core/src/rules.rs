use once_cell::sync::Lazy;

/// The coding constraints listed in every generated header. Textual only,
/// nothing checks generated code against them.
pub static MISRA_RULES: [&str; 10] = [
    "No dynamic memory allocation (malloc, free, calloc, realloc forbidden).",
    "All variables must be declared at the top of blocks.",
    "No recursion allowed.",
    "All functions must have explicit return types.",
    "Use const for read-only data.",
    "No mixed data types in expressions unless explicitly cast.",
    "Use static for internal linkage; avoid globals unless necessary.",
    "All switch statements must have a default case.",
    "Check array bounds explicitly before access.",
    "Avoid non-deterministic behavior: no undefined or unspecified constructs.",
];

/// `MISRA_RULES` rendered as comment lines (` *  - rule`), built once.
pub(crate) static RULE_LINES: Lazy<String> = Lazy::new(|| {
    MISRA_RULES
        .iter()
        .map(|rule| format!(" *  - {rule}"))
        .collect::<Vec<_>>()
        .join("\n")
});
