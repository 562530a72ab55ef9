//! Membership use-cases over the seeded + overlay member collections.
//!
//! # Responsibility
//! - Serve the effective member view (seeded ∪ overlay − removed).
//! - Upsert uploaded members into the overlay by registration number.
//! - Verify members and cache the verified snapshot.
//! - Record event interest for verified or looked-up members.
//!
//! # Invariants
//! - The seeded `members` entry is read, never rewritten.
//! - Upload matching consults the overlay only, so re-uploading a seeded
//!   member adds a second record with the same registration number.
//! - Lookups over the effective view resolve to the first match.
//! - The overlay and removed set are only written after a clean read.

use super::error::{writable, ServiceError, ServiceResult};
use super::event_service::EventService;
use super::views::{join_interests, InterestView};
use crate::model::member::{parse_upload_rows, Member, MemberDraft, MemberSnapshot};
use crate::model::registration::EventInterest;
use crate::model::sort_newest_first;
use crate::model::validation::ValidationError;
use crate::seed::initial_members;
use crate::store::{
    effective_view, keys, merge_and_upsert_by_natural_key, soft_delete, DeleteOutcome,
    KeyValueBackend, LoadSource, RecordStore,
};
use chrono::Utc;
use log::{info, warn};
use serde_json::Value;

/// Counts reported after an upload batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadSummary {
    pub inserted: usize,
    pub updated: usize,
    /// Rows dropped during parsing for missing required columns.
    pub rejected: usize,
}

/// Contact details a visitor enters to find their membership.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberLookup {
    pub email: String,
    pub registration_number: String,
}

impl MemberLookup {
    fn matches(&self, member: &Member) -> bool {
        let email = self.email.trim();
        let registration_number = self.registration_number.trim();
        (!email.is_empty() && member.email.as_deref().map(str::trim) == Some(email))
            || (!registration_number.is_empty()
                && member.has_registration_number(registration_number))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterestOutcome {
    Recorded(Member),
    AlreadyInterested(Member),
    /// No member matched; the caller falls back to the registration form.
    MemberNotFound,
}

pub struct MembershipService<'s, B: KeyValueBackend> {
    store: &'s RecordStore<B>,
}

impl<'s, B: KeyValueBackend> MembershipService<'s, B> {
    pub fn new(store: &'s RecordStore<B>) -> Self {
        Self { store }
    }

    fn seeded(&self) -> Vec<Member> {
        self.store.load(keys::MEMBERS, initial_members())
    }

    fn overlay(&self) -> Vec<Member> {
        self.store.load(keys::ADDITIONAL_MEMBERS, Vec::new())
    }

    fn overlay_for_write(&self) -> ServiceResult<Vec<Member>> {
        writable(
            self.store.load_checked(keys::ADDITIONAL_MEMBERS, Vec::new()),
            keys::ADDITIONAL_MEMBERS,
        )
    }

    fn removed(&self) -> Vec<String> {
        self.store.load(keys::DELETED_MEMBERS, Vec::new())
    }

    fn removed_for_write(&self) -> ServiceResult<Vec<String>> {
        writable(
            self.store.load_checked(keys::DELETED_MEMBERS, Vec::new()),
            keys::DELETED_MEMBERS,
        )
    }

    fn effective(&self) -> Vec<Member> {
        effective_view(&self.seeded(), &self.overlay(), &self.removed())
    }

    /// Effective member view, newest `created_at` first; seeded last.
    pub fn members(&self) -> Vec<Member> {
        let mut members = self.effective();
        sort_newest_first(&mut members, |member| member.created_at);
        members
    }

    /// Upserts drafts into the overlay by exact trimmed registration number.
    pub fn upload(&self, drafts: Vec<MemberDraft>) -> ServiceResult<UploadSummary> {
        if drafts.is_empty() {
            return Err(ServiceError::EmptyUpload { rejected: 0 });
        }
        for draft in &drafts {
            draft.validate()?;
        }

        let seeded = self.seeded();
        let mut overlay = self.overlay_for_write()?;
        let report = merge_and_upsert_by_natural_key(
            &seeded,
            &mut overlay,
            drafts,
            Utc::now(),
            |member: &Member, draft: &MemberDraft| {
                member.has_registration_number(&draft.registration_number)
            },
        );
        self.store.save(keys::ADDITIONAL_MEMBERS, &overlay);

        info!(
            "event=member_upload module=service status=ok inserted={} updated={} overlay_size={}",
            report.inserted.len(),
            report.updated.len(),
            overlay.len()
        );
        Ok(UploadSummary {
            inserted: report.inserted.len(),
            updated: report.updated.len(),
            rejected: 0,
        })
    }

    /// Parses spreadsheet rows, then uploads the accepted ones.
    pub fn upload_rows(&self, rows: &[Value]) -> ServiceResult<UploadSummary> {
        let parsed = parse_upload_rows(rows);
        if parsed.accepted.is_empty() {
            return Err(ServiceError::EmptyUpload {
                rejected: parsed.rejected,
            });
        }
        let summary = self.upload(parsed.accepted)?;
        Ok(UploadSummary {
            rejected: parsed.rejected,
            ..summary
        })
    }

    /// Deletes a member: overlay members physically, seeded ones by marker.
    pub fn delete(&self, id: &str) -> ServiceResult<DeleteOutcome> {
        let mut overlay = self.overlay_for_write()?;
        let mut removed = self.removed_for_write()?;
        let outcome = soft_delete(&mut overlay, &mut removed, id);
        match outcome {
            DeleteOutcome::RemovedFromOverlay => self.store.save(keys::ADDITIONAL_MEMBERS, &overlay),
            DeleteOutcome::MarkedRemoved => self.store.save(keys::DELETED_MEMBERS, &removed),
            DeleteOutcome::AlreadyMarked => {}
        }
        info!("event=member_delete module=service status=ok id={id} outcome={outcome:?}");
        Ok(outcome)
    }

    /// Looks up a member by registration number and name, caching a snapshot.
    ///
    /// Registration number must match exactly after trimming; the name match
    /// ignores case. Returns `Ok(None)` when nobody matches.
    pub fn verify(
        &self,
        registration_number: &str,
        name: &str,
    ) -> ServiceResult<Option<MemberSnapshot>> {
        if registration_number.trim().is_empty() {
            return Err(ValidationError::MissingField("registration_number").into());
        }
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }

        let Some(member) = self.effective().into_iter().find(|member| {
            member.has_registration_number(registration_number) && member.has_name(name)
        }) else {
            info!("event=member_verify module=service status=no_match");
            return Ok(None);
        };

        let snapshot = MemberSnapshot::from(&member);
        self.store.save(keys::MEMBER_SNAPSHOT, &snapshot);
        info!("event=member_verify module=service status=ok id={}", member.id);
        Ok(Some(snapshot))
    }

    /// Returns the cached snapshot; an undecodable one is discarded.
    pub fn current_member(&self) -> Option<MemberSnapshot> {
        let loaded = self.store.load_optional_checked(keys::MEMBER_SNAPSHOT);
        if loaded.source == LoadSource::Corrupt {
            self.store.remove(keys::MEMBER_SNAPSHOT);
        }
        loaded.value
    }

    pub fn sign_out(&self) {
        self.store.remove(keys::MEMBER_SNAPSHOT);
    }

    /// Marks interest in `event_id` for the cached member, or for the member
    /// found through `lookup` when nothing is cached.
    pub fn record_interest(
        &self,
        event_id: &str,
        lookup: &MemberLookup,
    ) -> ServiceResult<InterestOutcome> {
        let members = self.effective();
        let member = match self.current_member() {
            Some(snapshot) => match members.into_iter().find(|member| member.id == snapshot.id) {
                Some(member) => member,
                None => {
                    warn!(
                        "event=member_interest module=service status=error error_code=stale_snapshot id={}",
                        snapshot.id
                    );
                    self.sign_out();
                    return Err(ServiceError::StaleMemberSession(snapshot.id));
                }
            },
            None => match members.into_iter().find(|member| lookup.matches(member)) {
                Some(member) => member,
                None => return Ok(InterestOutcome::MemberNotFound),
            },
        };

        let mut interests: Vec<EventInterest> = writable(
            self.store.load_checked(keys::EVENT_INTERESTS, Vec::new()),
            keys::EVENT_INTERESTS,
        )?;
        let interest = EventInterest {
            member_id: member.id.clone(),
            event_id: event_id.to_string(),
        };
        if interests.contains(&interest) {
            return Ok(InterestOutcome::AlreadyInterested(member));
        }

        interests.push(interest);
        self.store.save(keys::EVENT_INTERESTS, &interests);
        info!(
            "event=member_interest module=service status=ok member_id={} event_id={event_id}",
            member.id
        );
        Ok(InterestOutcome::Recorded(member))
    }

    /// Interests joined with the effective member view and events.
    pub fn interests(&self) -> Vec<InterestView> {
        let interests: Vec<EventInterest> = self.store.load(keys::EVENT_INTERESTS, Vec::new());
        let events = EventService::new(self.store).load_all();
        join_interests(&interests, &self.effective(), &events)
    }
}
