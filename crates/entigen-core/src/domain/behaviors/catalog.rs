//! Built-in behavior catalog.
//!
//! Each behavior is described exactly once here; the registry, validation,
//! and resolution all derive from these definitions.
//!
//! # Adding a New Behavior
//!
//! 1. Add a name constant and a constructor function below
//! 2. Append it to [`builtin_definitions`]
//! 3. If it maps to a repository capability, extend `RepositoryConfig`

use super::definition::{BehaviorDefinition, BehaviorField, SemanticType, UiHints};
use crate::domain::value_objects::Importance;

pub const TIMESTAMPS: &str = "timestamps";
pub const SOFT_DELETE: &str = "soft_delete";
pub const USER_TRACKING: &str = "user_tracking";

/// All built-in definitions, in registration order.
pub fn builtin_definitions() -> Vec<BehaviorDefinition> {
    vec![timestamps(), soft_delete(), user_tracking()]
}

fn timestamp_field(name: &str, camel: &str, label: &str) -> BehaviorField {
    BehaviorField::new(name, camel, SemanticType::Timestamp)
        .ts_type("Date")
        .column(
            format!("timestamp('{name}', {{ withTimezone: true }})"),
            &["timestamp"],
        )
        .zod("z.coerce.date()")
        .ui(UiHints::new(label, "datetime")
            .importance(Importance::Tertiary)
            .group("metadata"))
}

pub fn timestamps() -> BehaviorDefinition {
    BehaviorDefinition::new(TIMESTAMPS, "timestamps")
        .description("Adds created_at and updated_at columns maintained on write")
        .field(timestamp_field("created_at", "createdAt", "Created").default_value("now()"))
        .field(timestamp_field("updated_at", "updatedAt", "Updated").default_value("now()"))
        .imports(&["timestamp"])
        .methods(&["touch"])
}

pub fn soft_delete() -> BehaviorDefinition {
    let mut deleted_at = timestamp_field("deleted_at", "deletedAt", "Deleted").nullable();
    deleted_at.zod_schema = "z.coerce.date().nullable()".into();
    if let Some(ui) = deleted_at.ui.take() {
        deleted_at.ui = Some(ui.hidden());
    }

    BehaviorDefinition::new(SOFT_DELETE, "softDelete")
        .description("Marks rows deleted via deleted_at instead of removing them")
        .field(deleted_at)
        .imports(&["timestamp"])
        .methods(&["softDelete", "restore", "findWithDeleted", "findDeleted"])
}

fn actor_field(name: &str, camel: &str, label: &str) -> BehaviorField {
    BehaviorField::new(name, camel, SemanticType::Uuid)
        .ts_type("string | null")
        .column(format!("uuid('{name}')"), &["uuid"])
        .zod("z.string().uuid().nullable()")
        .nullable()
        .foreign_key("users.id")
        .ui(UiHints::new(label, "user")
            .importance(Importance::Tertiary)
            .group("metadata"))
}

pub fn user_tracking() -> BehaviorDefinition {
    BehaviorDefinition::new(USER_TRACKING, "userTracking")
        .description("Records the acting user in created_by and updated_by")
        .field(actor_field("created_by", "createdBy", "Created By"))
        .field(actor_field("updated_by", "updatedBy", "Updated By"))
        .imports(&["uuid"])
        .methods(&["setActor"])
}
