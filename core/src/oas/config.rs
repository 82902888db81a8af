#![deny(missing_docs)]

//! # Generator Configuration
//!
//! The per-run context value. Nothing the generator consults lives in global state.

/// Status codes whose responses produce types when nothing else is configured.
pub const DEFAULT_STATUS_CODES: [u16; 4] = [200, 400, 401, 500];

/// What happens when an operation hits a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the run and return the error. No partial output.
    #[default]
    Abort,
    /// Skip the operation, record the failure, keep walking.
    Continue,
}

/// How inline objects nested inside object properties are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NestedObjects {
    /// Each nested object becomes its own type named `<Parent><Property>`.
    #[default]
    Auxiliary,
    /// Nested properties are lifted into the parent as `outer.inner` fields.
    Flatten,
}

/// What happens when a different definition arrives under an existing type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Emit the later definition under `<Name>2`, `<Name>3`, ...
    #[default]
    Rename,
    /// Drop the later definition.
    KeepFirst,
    /// Fail the operation that produced the later definition.
    Reject,
}

/// Configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Response status codes that produce types, in emission order.
    pub status_codes: Vec<u16>,
    /// Fatal error handling.
    pub failure_policy: FailurePolicy,
    /// Nested inline object handling.
    pub nested_objects: NestedObjects,
    /// Type name collision handling.
    pub collision_policy: CollisionPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            status_codes: DEFAULT_STATUS_CODES.to_vec(),
            failure_policy: FailurePolicy::default(),
            nested_objects: NestedObjects::default(),
            collision_policy: CollisionPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Replaces the status-code allowlist. Duplicates are dropped, first occurrence wins.
    pub fn with_status_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        let mut unique = Vec::new();
        for code in codes {
            if !unique.contains(&code) {
                unique.push(code);
            }
        }
        self.status_codes = unique;
        self
    }

    /// Sets the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Sets the nested-object mode.
    pub fn with_nested_objects(mut self, mode: NestedObjects) -> Self {
        self.nested_objects = mode;
        self
    }

    /// Sets the collision policy.
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }
}
