//! Key names shared by every consumer of the namespace.

pub const NEWS: &str = "news";
pub const EVENTS: &str = "events";
/// Seeded members; read-only after materialization.
pub const MEMBERS: &str = "members";
/// Member overlay written by uploads.
pub const ADDITIONAL_MEMBERS: &str = "additional_members";
/// Identifiers of soft-deleted seeded members.
pub const DELETED_MEMBERS: &str = "deleted_members";
pub const EVENT_REGISTRATIONS: &str = "event_registrations";
pub const EVENT_INTERESTS: &str = "event_interests";
pub const CONTACTS: &str = "contacts";
/// Snapshot of the last verified member.
pub const MEMBER_SNAPSHOT: &str = "ekusa_member";
