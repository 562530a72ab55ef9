use ekusa_core::store::StoreResult;
use ekusa_core::{
    InterestOutcome, KeyValueBackend, MemberLookup, MembershipService, MemoryBackend,
    RecordStore, ServiceError, ValidationError,
};
use std::cell::Cell;
use serde_json::json;

/// Memory namespace that counts remove calls.
#[derive(Default)]
struct CountingBackend {
    inner: MemoryBackend,
    removes: Cell<usize>,
}

impl KeyValueBackend for CountingBackend {
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.read_raw(key)
    }

    fn write_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        self.inner.write_raw(key, value)
    }

    fn remove_raw(&self, key: &str) -> StoreResult<()> {
        self.removes.set(self.removes.get() + 1);
        self.inner.remove_raw(key)
    }
}

fn lookup_by_registration(registration_number: &str) -> MemberLookup {
    MemberLookup {
        email: String::new(),
        registration_number: registration_number.to_string(),
    }
}

#[test]
fn verify_matches_trimmed_number_and_case_insensitive_name() {
    let store = RecordStore::new(MemoryBackend::new());
    let service = MembershipService::new(&store);

    let snapshot = service
        .verify(" B123-01-0002/2021 ", "  JANE smith ")
        .unwrap()
        .expect("seeded member should verify");

    assert_eq!(snapshot.id, "2");
    assert_eq!(service.current_member(), Some(snapshot));
}

#[test]
fn verify_without_match_leaves_no_snapshot() {
    let store = RecordStore::new(MemoryBackend::new());
    let service = MembershipService::new(&store);

    assert_eq!(service.verify("B123-01-0001/2021", "Jane Smith").unwrap(), None);
    assert_eq!(service.current_member(), None);
}

#[test]
fn verify_rejects_blank_input() {
    let store = RecordStore::new(MemoryBackend::new());
    let service = MembershipService::new(&store);

    let err = service.verify("  ", "John Doe").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::MissingField("registration_number"))
    ));
}

#[test]
fn corrupt_snapshot_is_discarded() {
    let store = RecordStore::new(MemoryBackend::new());
    store.save("ekusa_member", "not a snapshot");
    let service = MembershipService::new(&store);

    assert_eq!(service.current_member(), None);
    assert_eq!(store.backend().raw_entry("ekusa_member"), None);
}

#[test]
fn deleted_member_cannot_verify() {
    let store = RecordStore::new(MemoryBackend::new());
    let service = MembershipService::new(&store);
    service.delete("1").unwrap();

    assert_eq!(service.verify("B123-01-0001/2021", "John Doe").unwrap(), None);
}

#[test]
fn interest_is_recorded_once_per_member_and_event() {
    let store = RecordStore::new(MemoryBackend::new());
    let service = MembershipService::new(&store);
    let lookup = lookup_by_registration("B123-01-0001/2021");

    let first = service.record_interest("2", &lookup).unwrap();
    let second = service.record_interest("2", &lookup).unwrap();

    assert!(matches!(first, InterestOutcome::Recorded(ref member) if member.id == "1"));
    assert!(matches!(second, InterestOutcome::AlreadyInterested(_)));
    let views = service.interests();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].member.name, "John Doe");
    assert_eq!(views[0].event.title, "Charity Fun Run");
}

#[test]
fn interest_lookup_by_email_and_unknown_member() {
    let store = RecordStore::new(MemoryBackend::new());
    let service = MembershipService::new(&store);

    let by_email = MemberLookup {
        email: "jane.smith@student.ekusa.com".to_string(),
        registration_number: String::new(),
    };
    let recorded = service.record_interest("1", &by_email).unwrap();
    assert!(matches!(recorded, InterestOutcome::Recorded(ref member) if member.id == "2"));

    let nobody = MemberLookup::default();
    assert_eq!(
        service.record_interest("1", &nobody).unwrap(),
        InterestOutcome::MemberNotFound
    );
}

#[test]
fn snapshot_takes_precedence_and_stale_snapshot_is_cleared() {
    let store = RecordStore::new(MemoryBackend::new());
    let service = MembershipService::new(&store);
    service.verify("B123-01-0002/2021", "Jane Smith").unwrap();

    let outcome = service
        .record_interest("3", &lookup_by_registration("B123-01-0001/2021"))
        .unwrap();
    assert!(matches!(outcome, InterestOutcome::Recorded(ref member) if member.id == "2"));

    service.delete("2").unwrap();
    let err = service
        .record_interest("1", &MemberLookup::default())
        .unwrap_err();
    assert!(matches!(err, ServiceError::StaleMemberSession(ref id) if id == "2"));
    assert_eq!(service.current_member(), None);
}

#[test]
fn interests_with_dangling_references_use_placeholders() {
    let store = RecordStore::new(MemoryBackend::new());
    store.save(
        "event_interests",
        &json!([{"member_id": "ghost", "event_id": "gone"}]),
    );
    let service = MembershipService::new(&store);

    let views = service.interests();

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].member.name, "Unknown");
    assert_eq!(views[0].member.id, None);
    assert!(views[0].event.is_unknown());
}

#[test]
fn upload_rows_reports_rejections_and_empty_batches() {
    let store = RecordStore::new(MemoryBackend::new());
    let service = MembershipService::new(&store);

    let summary = service
        .upload_rows(&[
            json!({"reg_number": "N1", "name": "New One", "phone": "0711"}),
            json!({"reg_number": "N2"}),
        ])
        .unwrap();
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.rejected, 1);

    let again = service
        .upload_rows(&[json!({"registration_number": "N1", "name": "New One", "course": "Law"})])
        .unwrap();
    assert_eq!(again.updated, 1);
    let member = service
        .members()
        .into_iter()
        .find(|member| member.registration_number == "N1")
        .unwrap();
    assert_eq!(member.course.as_deref(), Some("Law"));
    assert_eq!(member.phone_number, None);
    assert!(member.updated_at.is_some());

    let err = service.upload_rows(&[json!({"name": "No Number"})]).unwrap_err();
    assert!(matches!(err, ServiceError::EmptyUpload { rejected: 1 }));
}

#[test]
fn sign_out_clears_snapshot() {
    let store = RecordStore::new(MemoryBackend::new());
    let service = MembershipService::new(&store);
    service.verify("B123-01-0001/2021", "John Doe").unwrap();

    service.sign_out();

    assert_eq!(service.current_member(), None);
}

#[test]
fn missing_snapshot_is_not_removed_on_every_lookup() {
    let store = RecordStore::new(CountingBackend::default());
    let service = MembershipService::new(&store);

    assert_eq!(service.current_member(), None);
    service
        .record_interest("1", &lookup_by_registration("B123-01-0001/2021"))
        .unwrap();
    assert_eq!(store.backend().removes.get(), 0);

    store.backend().write_raw("ekusa_member", "{broken").unwrap();
    assert_eq!(service.current_member(), None);
    assert_eq!(store.backend().removes.get(), 1);
    assert_eq!(store.backend().read_raw("ekusa_member").unwrap(), None);
}

#[test]
fn interest_is_not_recorded_over_unreadable_interests() {
    let store = RecordStore::new(MemoryBackend::new());
    store.backend().write_raw("event_interests", "[{\"member_id\":1}]").unwrap();
    let service = MembershipService::new(&store);

    let err = service
        .record_interest("1", &lookup_by_registration("B123-01-0001/2021"))
        .unwrap_err();

    assert!(matches!(err, ServiceError::Unreadable { collection: "event_interests" }));
    assert_eq!(
        store.backend().raw_entry("event_interests").as_deref(),
        Some("[{\"member_id\":1}]")
    );
}
