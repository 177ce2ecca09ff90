//! # Authorization Matrix
//!
//! Event type → set of roles allowed to submit it. The table is data: a
//! deployment swaps rules through `allow`/`with_rule`, never through code.
//!
//! `Role::Unregistered` is allowed for nothing, even when a custom table
//! lists it.

use shared_types::{EventType, Role};
use std::collections::{BTreeSet, HashMap};

/// Static event-type → allowed-roles table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationMatrix {
    rules: HashMap<EventType, BTreeSet<Role>>,
}

impl Default for AuthorizationMatrix {
    /// The deployment table:
    ///
    /// | Event | Roles |
    /// |-------|-------|
    /// | Create | Producer |
    /// | Transport | Producer, Transporter |
    /// | Inspect | Regulator |
    /// | Temperature | Producer, Transporter, Retailer |
    /// | Sale | Retailer |
    /// | Recall | Producer, Regulator |
    fn default() -> Self {
        Self::new()
            .with_rule(EventType::Create, &[Role::Producer])
            .with_rule(EventType::Transport, &[Role::Producer, Role::Transporter])
            .with_rule(EventType::Inspect, &[Role::Regulator])
            .with_rule(
                EventType::Temperature,
                &[Role::Producer, Role::Transporter, Role::Retailer],
            )
            .with_rule(EventType::Sale, &[Role::Retailer])
            .with_rule(EventType::Recall, &[Role::Producer, Role::Regulator])
    }
}

impl AuthorizationMatrix {
    /// Empty table: nothing is allowed.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Allow `role` to submit `event_type`.
    pub fn allow(&mut self, event_type: EventType, role: Role) {
        self.rules.entry(event_type).or_default().insert(role);
    }

    /// Replace the rule for `event_type`.
    pub fn with_rule(mut self, event_type: EventType, roles: &[Role]) -> Self {
        self.rules
            .insert(event_type, roles.iter().copied().collect());
        self
    }

    /// Whether `role` may submit `event_type`.
    pub fn is_allowed(&self, event_type: EventType, role: Role) -> bool {
        role.is_registered()
            && self
                .rules
                .get(&event_type)
                .is_some_and(|roles| roles.contains(&role))
    }

    /// Roles allowed for `event_type`, in role-code order.
    pub fn allowed_roles(&self, event_type: EventType) -> Vec<Role> {
        self.rules
            .get(&event_type)
            .map(|roles| roles.iter().copied().filter(Role::is_registered).collect())
            .unwrap_or_default()
    }
}
