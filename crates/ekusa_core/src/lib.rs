//! Core data layer for the EKUSA association site.
//! This crate owns record shapes, the local record store and the use-case
//! services every page and admin manager goes through.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod seed;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{ContactDraft, ContactMessage, ContactStatus};
pub use model::event::{parse_image_list, Event, EventCategory, EventDraft};
pub use model::member::{parse_upload_rows, Member, MemberDraft, MemberSnapshot, MemberStatus};
pub use model::news::{NewsCategory, NewsDraft, NewsItem};
pub use model::registration::{EventInterest, EventRegistration, RegistrationDraft};
pub use model::validation::ValidationError;
pub use model::Record;
pub use service::contact_service::{ContactFilter, ContactService};
pub use service::error::{ServiceError, ServiceResult};
pub use service::event_service::{EventSchedule, EventService};
pub use service::membership_service::{
    InterestOutcome, MemberLookup, MembershipService, UploadSummary,
};
pub use service::news_service::{NewsFeed, NewsService};
pub use service::registration_service::RegistrationService;
pub use service::views::{EventRef, EventRegistrationCount, InterestView, MemberRef, RegistrationView};
pub use store::{
    DeleteOutcome, KeyValueBackend, LoadSource, Loaded, MemoryBackend, RecordStore,
    SqliteBackend, StoreError,
};

/// Minimal health check used by the CLI.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
