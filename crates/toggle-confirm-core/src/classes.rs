// Class lists for the confirmation dialog's semantic roles.
//
// The core never interprets class names. It merges user overrides into the
// defaults and hands the result to the renderer unchanged.

use std::collections::BTreeMap;

use serde::Deserialize;

pub const OVERLAY: &str = "overlay";
pub const WRAPPER: &str = "wrapper";
pub const TITLE: &str = "title";
pub const CONTENT: &str = "content";
pub const BUTTONS_WRAPPER: &str = "buttonsWrapper";
pub const CONFIRM: &str = "confirm";
pub const CANCEL: &str = "cancel";
pub const CLOSE: &str = "close";

const DEFAULT_CLASSES: &[(&str, &str)] = &[
    (OVERLAY, "vf-toggle-confirm-modal-overlay"),
    (WRAPPER, "vf-toggle-confirm-modal-wrapper"),
    (TITLE, "vf-toggle-confirm-modal-title"),
    (CONTENT, "vf-toggle-confirm-modal-content"),
    (BUTTONS_WRAPPER, "vf-toggle-confirm-modal-buttons-wrapper"),
    (
        CONFIRM,
        "vf-toggle-confirm-modal-btn is-primary vf-toggle-confirm-modal-confirm",
    ),
    (
        CANCEL,
        "vf-toggle-confirm-modal-btn is-secondary vf-toggle-confirm-modal-cancel",
    ),
    (CLOSE, "vf-toggle-confirm-modal-close"),
];

// ---------------------------------------------------------------------------
// ClassMap
// ---------------------------------------------------------------------------

/// Resolved mapping from role name to its ordered class list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassMap(BTreeMap<String, Vec<String>>);

impl ClassMap {
    /// The built-in classes for every dialog role.
    pub fn defaults() -> Self {
        let map = DEFAULT_CLASSES
            .iter()
            .map(|(role, classes)| (role.to_string(), split_classes(classes)))
            .collect();
        ClassMap(map)
    }

    /// Classes for `role`, empty when the role is unknown.
    pub fn get(&self, role: &str) -> &[String] {
        self.0.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Classes for `role` joined with single spaces.
    pub fn joined(&self, role: &str) -> String {
        self.get(role).join(" ")
    }

    pub fn has_class(&self, role: &str, class: &str) -> bool {
        self.get(role).iter().any(|c| c == class)
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn replace(&mut self, role: &str, classes: Vec<String>) {
        self.0.insert(role.to_string(), classes);
    }

    fn append(&mut self, role: &str, classes: Vec<String>) {
        let entry = self.0.entry(role.to_string()).or_default();
        for class in classes {
            if !entry.contains(&class) {
                entry.push(class);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ClassOverrides
// ---------------------------------------------------------------------------

/// A role's classes as written in config: a space-separated string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ClassSpec {
    Joined(String),
    List(Vec<String>),
}

impl ClassSpec {
    fn to_list(&self) -> Vec<String> {
        match self {
            ClassSpec::Joined(s) => split_classes(s),
            ClassSpec::List(list) => list
                .iter()
                .flat_map(|s| split_classes(s))
                .collect(),
        }
    }
}

/// User-supplied class overrides, keyed by role.
///
/// With `merge = true` (the default) override classes are appended to the
/// role's defaults; with `merge = false` they replace them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassOverrides {
    #[serde(default = "default_merge")]
    pub merge: bool,
    #[serde(flatten)]
    pub roles: BTreeMap<String, ClassSpec>,
}

fn default_merge() -> bool {
    true
}

impl Default for ClassOverrides {
    fn default() -> Self {
        ClassOverrides {
            merge: true,
            roles: BTreeMap::new(),
        }
    }
}

impl ClassOverrides {
    /// Compute the effective class map. Recomputed on every call.
    pub fn resolve(&self) -> ClassMap {
        let mut map = ClassMap::defaults();
        for (role, spec) in &self.roles {
            let classes = spec.to_list();
            if self.merge {
                map.append(role, classes);
            } else {
                map.replace(role, classes);
            }
        }
        map
    }
}

fn split_classes(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
