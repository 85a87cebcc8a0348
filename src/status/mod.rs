//! Status Taxonomy
//!
//! Canonical metadata for every task/mandate lifecycle status, plus the
//! declarative table of dynamically-parameterized status definitions.
//! Resolution logic lives in [`resolver`].

use serde::Serialize;

pub mod resolver;

pub use resolver::{
    classify_status, get_all_status_ids, get_displayable_status, get_status_attributes,
    normalize_status_id, status_sort_rank,
};

/// Broad lifecycle category of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusCategory {
    Todo,
    InProgress,
    PendingInput,
    Completed,
    Failed,
    Blocked,
}

/// Canonical metadata for a status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusAttributes {
    /// Canonical natural-language id
    pub id: &'static str,
    pub display_name: &'static str,
    pub category: StatusCategory,
    /// Terminal statuses count as "completed" in meta-bucket filters
    pub is_terminal: bool,
    pub color: &'static str,
    pub icon: &'static str,
}

/// Resolved display model for any status string. Resolution is total:
/// unknown statuses fall back to a Title Case rendition with neutral styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayableStatus {
    pub display_name: String,
    pub color: String,
    pub icon: String,
}

/// A static status definition: natural-language and `ENUM_STYLE` spellings
/// both resolve to the same attributes.
pub(crate) struct StatusDef {
    pub names: [&'static str; 2],
    pub attrs: StatusAttributes,
}

/// A dynamically-parameterized status definition. The extraction pattern has
/// exactly one capture group whose value is substituted into the template.
pub(crate) struct DynamicStatusDef {
    pub pattern: &'static str,
    /// Display template with a `{value}` placeholder
    pub template: &'static str,
    pub category: StatusCategory,
    pub is_terminal: bool,
    pub color: &'static str,
    pub icon: &'static str,
}

/// Every canonical status, in the preferred display sequence used by
/// grouping and status-field sorting.
pub(crate) static CANONICAL_STATUSES: &[StatusDef] = &[
    StatusDef {
        names: ["To Do", "TO_DO"],
        attrs: StatusAttributes {
            id: "To Do",
            display_name: "To Do",
            category: StatusCategory::Todo,
            is_terminal: false,
            color: "slate",
            icon: "circle",
        },
    },
    StatusDef {
        names: ["In Progress", "IN_PROGRESS"],
        attrs: StatusAttributes {
            id: "In Progress",
            display_name: "In Progress",
            category: StatusCategory::InProgress,
            is_terminal: false,
            color: "blue",
            icon: "play",
        },
    },
    StatusDef {
        names: ["Blocked", "BLOCKED"],
        attrs: StatusAttributes {
            id: "Blocked",
            display_name: "Blocked",
            category: StatusCategory::Blocked,
            is_terminal: false,
            color: "orange",
            icon: "ban",
        },
    },
    StatusDef {
        names: ["Pending Verification", "PENDING_VERIFICATION"],
        attrs: StatusAttributes {
            id: "Pending Verification",
            display_name: "Pending Verification",
            category: StatusCategory::PendingInput,
            is_terminal: false,
            color: "amber",
            icon: "eye",
        },
    },
    StatusDef {
        names: ["Pending Handoff", "PENDING_HANDOFF"],
        attrs: StatusAttributes {
            id: "Pending Handoff",
            display_name: "Pending Handoff",
            category: StatusCategory::PendingInput,
            is_terminal: false,
            color: "amber",
            icon: "send",
        },
    },
    StatusDef {
        names: ["Cancelled", "CANCELLED"],
        attrs: StatusAttributes {
            id: "Cancelled",
            display_name: "Cancelled",
            category: StatusCategory::Failed,
            is_terminal: true,
            color: "gray",
            icon: "slash",
        },
    },
    StatusDef {
        names: ["Completed", "COMPLETED"],
        attrs: StatusAttributes {
            id: "Completed",
            display_name: "Completed",
            category: StatusCategory::Completed,
            is_terminal: true,
            color: "green",
            icon: "check",
        },
    },
    StatusDef {
        names: ["Failed", "FAILED"],
        attrs: StatusAttributes {
            id: "Failed",
            display_name: "Failed",
            category: StatusCategory::Failed,
            is_terminal: true,
            color: "red",
            icon: "x",
        },
    },
];

/// Dynamic status definitions. Declared order is load-bearing: resolution is
/// first-declared-wins, so narrower patterns must precede broader ones
/// (`COMPLETED_HANDOFF_TO_*` before the generic `COMPLETED_*`).
pub(crate) static DYNAMIC_STATUSES: &[DynamicStatusDef] = &[
    DynamicStatusDef {
        pattern: r"^COMPLETED_HANDOFF_TO_(.+)$",
        template: "Handoff to: {value}",
        category: StatusCategory::Completed,
        is_terminal: true,
        color: "green",
        icon: "send",
    },
    DynamicStatusDef {
        pattern: r"^WAITING_ON_(.+)$",
        template: "Waiting on: {value}",
        category: StatusCategory::Blocked,
        is_terminal: false,
        color: "orange",
        icon: "hourglass",
    },
    DynamicStatusDef {
        pattern: r"^COMPLETED_(.+)$",
        template: "Completed: {value}",
        category: StatusCategory::Completed,
        is_terminal: true,
        color: "green",
        icon: "check",
    },
];
