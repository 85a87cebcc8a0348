//! Status Resolution
//!
//! Resolves heterogeneous status strings into the canonical display model.
//! Resolution never fails: exact lookup first, then the dynamic definitions
//! in declared order, then a deterministic Title Case fallback.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use super::{
    DisplayableStatus, DynamicStatusDef, StatusAttributes, StatusCategory, CANONICAL_STATUSES,
    DYNAMIC_STATUSES,
};

/// Normalize a status id for exact lookup: lowercase, with `_`/`-`/whitespace
/// runs collapsed to single spaces. `"TO_DO"`, `"to-do"`, and `"To Do"` all
/// normalize to `"to do"`.
pub fn normalize_status_id(raw: &str) -> String {
    raw.to_lowercase()
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lookup table from normalized spelling to canonical attributes,
/// compiled once.
fn lookup_table() -> &'static HashMap<String, &'static StatusAttributes> {
    static TABLE: OnceLock<HashMap<String, &'static StatusAttributes>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::new();
        for def in CANONICAL_STATUSES {
            for name in &def.names {
                table.insert(normalize_status_id(name), &def.attrs);
            }
        }
        table
    })
}

/// Compiled dynamic definitions, preserving declared order.
fn compiled_dynamic() -> &'static Vec<(Regex, &'static DynamicStatusDef)> {
    static COMPILED: OnceLock<Vec<(Regex, &'static DynamicStatusDef)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        DYNAMIC_STATUSES
            .iter()
            .filter_map(|def| Regex::new(def.pattern).ok().map(|r| (r, def)))
            .collect()
    })
}

/// Exact lookup after normalization. Returns `None` only for truly unknown
/// ids; both natural-language and `ENUM_STYLE` spellings resolve.
pub fn get_status_attributes(id: &str) -> Option<&'static StatusAttributes> {
    lookup_table().get(&normalize_status_id(id)).copied()
}

/// Every declared status id, in both spellings.
pub fn get_all_status_ids() -> Vec<&'static str> {
    CANONICAL_STATUSES
        .iter()
        .flat_map(|def| def.names.iter().copied())
        .collect()
}

/// Category and terminality for any status string, covering dynamic ids.
/// `None` for statuses outside the taxonomy.
pub fn classify_status(raw: &str) -> Option<(StatusCategory, bool)> {
    if let Some(attrs) = get_status_attributes(raw) {
        return Some((attrs.category, attrs.is_terminal));
    }
    let trimmed = raw.trim();
    compiled_dynamic()
        .iter()
        .find(|(regex, _)| regex.is_match(trimmed))
        .map(|(_, def)| (def.category, def.is_terminal))
}

/// Resolve any status string to its display model. Never fails and never
/// returns an empty display name.
///
/// Static definitions win over dynamic ones; dynamic definitions are tried
/// in declared order and the first match wins, with the captured value
/// substituted into that definition's template verbatim (internal whitespace
/// and punctuation preserved). Anything else falls back to Title Case of the
/// raw string (or of `fallback_label` when given), neutral color, and an
/// "unknown" icon marker.
pub fn get_displayable_status(raw: &str, fallback_label: Option<&str>) -> DisplayableStatus {
    if let Some(attrs) = get_status_attributes(raw) {
        return DisplayableStatus {
            display_name: attrs.display_name.to_string(),
            color: attrs.color.to_string(),
            icon: attrs.icon.to_string(),
        };
    }

    let trimmed = raw.trim();
    for (regex, def) in compiled_dynamic() {
        if let Some(captures) = regex.captures(trimmed) {
            if let Some(value) = captures.get(1) {
                return DisplayableStatus {
                    display_name: def.template.replace("{value}", value.as_str()),
                    color: def.color.to_string(),
                    icon: def.icon.to_string(),
                };
            }
        }
    }

    let label = fallback_label.filter(|l| !l.trim().is_empty()).unwrap_or(raw);
    let mut display_name = title_case(label);
    if display_name.is_empty() {
        display_name = "Unknown".to_string();
    }
    DisplayableStatus {
        display_name,
        color: "gray".to_string(),
        icon: "unknown".to_string(),
    }
}

/// Rank of a status in the preferred display sequence. Static statuses rank
/// by declaration order; dynamic statuses rank with the first canonical
/// status of the same category; unknown statuses rank last.
pub fn status_sort_rank(raw: &str) -> usize {
    if let Some(attrs) = get_status_attributes(raw) {
        return CANONICAL_STATUSES
            .iter()
            .position(|def| def.attrs.id == attrs.id)
            .unwrap_or(CANONICAL_STATUSES.len());
    }
    if let Some((category, _)) = classify_status(raw) {
        return CANONICAL_STATUSES
            .iter()
            .position(|def| def.attrs.category == category)
            .unwrap_or(CANONICAL_STATUSES.len());
    }
    CANONICAL_STATUSES.len()
}

/// Preferred display sequence of canonical status names, used by grouping.
pub(crate) fn preferred_display_order() -> Vec<&'static str> {
    CANONICAL_STATUSES
        .iter()
        .map(|def| def.attrs.display_name)
        .collect()
}

fn title_case(raw: &str) -> String {
    raw.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
