//! Use-case services consuming the record store.
//!
//! # Responsibility
//! - Turn page/manager actions into whole-collection read-modify-write
//!   cycles over the store.
//! - Reject invalid drafts before anything is persisted.
//!
//! # Invariants
//! - Services never see storage errors; the store fails open for reads.
//! - A collection read as a fallback is never saved back.
//! - Denormalized views are computed on read and never persisted.

pub mod contact_service;
pub mod error;
pub mod event_service;
pub mod membership_service;
pub mod news_service;
pub mod registration_service;
pub mod views;
