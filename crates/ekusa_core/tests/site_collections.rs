use chrono::NaiveDate;
use ekusa_core::{
    parse_image_list, ContactDraft, ContactFilter, ContactService, ContactStatus, EventCategory,
    EventDraft, EventRef, EventService, MemoryBackend, NewsCategory, NewsDraft, NewsService,
    RecordStore, RegistrationDraft, RegistrationService, ServiceError,
};
use ekusa_core::seed::initial_events;
use ekusa_core::KeyValueBackend;

fn news_draft(title: &str, featured: bool) -> NewsDraft {
    NewsDraft {
        title: title.to_string(),
        excerpt: "Short".to_string(),
        content: "Body".to_string(),
        author: "Secretary".to_string(),
        category: NewsCategory::Announcement,
        featured,
        image: Some("  ".to_string()),
    }
}

fn event_draft(title: &str, date: NaiveDate, is_past: bool) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        description: "Details".to_string(),
        event_date: date,
        event_time: Some(String::new()),
        location: "Hall A".to_string(),
        category: EventCategory::Social,
        expected_attendees: 40,
        actual_attendees: 0,
        is_past,
        images: parse_image_list("https://a.example/1.png, https://a.example/2.png"),
        highlight: None,
    }
}

fn registration_draft(name: &str) -> RegistrationDraft {
    RegistrationDraft {
        name: name.to_string(),
        course: "Nursing".to_string(),
        registration_number: "G1/2024".to_string(),
        phone_number: "0700000000".to_string(),
    }
}

fn contact_draft(name: &str, subject: &str) -> ContactDraft {
    ContactDraft {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        subject: subject.to_string(),
        message: "Hello".to_string(),
    }
}

#[test]
fn news_lists_newest_first_and_splits_featured() {
    let store = RecordStore::new(MemoryBackend::new());
    let service = NewsService::new(&store);

    let ids: Vec<String> = service.list().into_iter().map(|item| item.id).collect();
    assert_eq!(ids, vec!["3", "1", "2"]);

    let created = service.create(news_draft("Fresh", true)).unwrap();
    assert_eq!(created.image, None);
    let feed = service.feed();
    assert_eq!(feed.featured[0].id, created.id);
    assert_eq!(feed.featured.len(), 2);
    assert_eq!(feed.regular.len(), 2);
}

#[test]
fn news_update_keeps_identity_and_delete_reports_missing() {
    let store = RecordStore::new(MemoryBackend::new());
    let service = NewsService::new(&store);
    let original = service.get("2").unwrap();

    let updated = service.update("2", news_draft("Renamed", false)).unwrap();
    assert_eq!(updated.id, "2");
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(service.get("2").unwrap().title, "Renamed");

    service.delete("2").unwrap();
    assert!(service.get("2").is_none());
    assert!(matches!(
        service.delete("2").unwrap_err(),
        ServiceError::NotFound { id, .. } if id == "2"
    ));
}

#[test]
fn news_create_rejects_blank_title_without_writing() {
    let store = RecordStore::new(MemoryBackend::new());
    let service = NewsService::new(&store);

    let err = service.create(news_draft("   ", false)).unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(service.list().len(), 3);
}

#[test]
fn events_sort_by_date_and_split_past() {
    let store = RecordStore::new(MemoryBackend::new());
    let service = EventService::new(&store);
    let date = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();

    let created = service.create(event_draft("Mixer", date, false)).unwrap();
    assert_eq!(created.event_time, None);
    assert_eq!(created.images.as_ref().map(Vec::len), Some(2));

    let ids: Vec<String> = service.list().into_iter().map(|event| event.id).collect();
    assert_eq!(ids, vec![created.id.clone(), "2".into(), "1".into(), "3".into()]);

    let schedule = service.schedule();
    assert_eq!(schedule.upcoming.len(), 3);
    assert_eq!(schedule.past.len(), 1);
    assert_eq!(schedule.past[0].id, "3");
}

#[test]
fn event_update_and_delete() {
    let store = RecordStore::new(MemoryBackend::new());
    let service = EventService::new(&store);
    let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();

    let updated = service
        .update("1", event_draft("Hackathon Finals", date, true))
        .unwrap();
    assert_eq!(updated.id, "1");
    assert!(service.get("1").unwrap().is_past);

    assert!(matches!(
        service.update("nope", event_draft("X", date, false)),
        Err(ServiceError::NotFound { .. })
    ));
    service.delete("1").unwrap();
    assert_eq!(service.list().len(), 2);
}

#[test]
fn event_writes_refuse_to_replace_undecodable_collection() {
    let store = RecordStore::new(MemoryBackend::new());
    let mut stored = serde_json::to_value(&initial_events()[0]).unwrap();
    stored["id"] = "u1".into();
    stored["expected_attendees"] = serde_json::json!(2.5);
    let raw = serde_json::to_string(&vec![stored]).unwrap();
    store.backend().write_raw("events", &raw).unwrap();
    let service = EventService::new(&store);
    let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

    assert_eq!(service.list().len(), 3);
    assert!(matches!(
        service.create(event_draft("Mixer", date, false)),
        Err(ServiceError::Unreadable { collection: "events" })
    ));
    assert!(matches!(
        service.delete("1"),
        Err(ServiceError::Unreadable { .. })
    ));
    assert_eq!(store.backend().raw_entry("events").as_deref(), Some(raw.as_str()));
}

#[test]
fn contact_submit_refuses_to_replace_corrupt_collection() {
    let store = RecordStore::new(MemoryBackend::new());
    store.backend().write_raw("contacts", "[{\"id\":").unwrap();
    let service = ContactService::new(&store);

    assert!(service.list().is_empty());
    assert!(matches!(
        service.submit(contact_draft("Ann", "Hello")),
        Err(ServiceError::Unreadable { collection: "contacts" })
    ));
    assert_eq!(
        store.backend().raw_entry("contacts").as_deref(),
        Some("[{\"id\":")
    );
}

#[test]
fn registrations_join_events_and_survive_event_deletion() {
    let store = RecordStore::new(MemoryBackend::new());
    let registrations = RegistrationService::new(&store);
    let events = EventService::new(&store);

    registrations.register("1", registration_draft("Otieno")).unwrap();
    let second = registrations.register("2", registration_draft("Achieng")).unwrap();

    let views = registrations.list();
    assert_eq!(views.len(), 2);
    let joined = views
        .iter()
        .find(|view| view.registration.id == second.id)
        .unwrap();
    assert_eq!(joined.event.title, "Charity Fun Run");

    events.delete("1").unwrap();
    let orphaned = registrations.list_for_event(EventRef::UNKNOWN_ID);
    assert_eq!(orphaned.len(), 1);
    assert_eq!(orphaned[0].registration.name, "Otieno");
    assert_eq!(orphaned[0].event.title, "Unknown Event");

    let counts = registrations.counts();
    assert_eq!(counts.len(), 2);
    let charity = counts.iter().find(|count| count.event.id == "2").unwrap();
    assert_eq!(charity.registrations, 1);
}

#[test]
fn registration_requires_all_fields_and_delete_by_id() {
    let store = RecordStore::new(MemoryBackend::new());
    let service = RegistrationService::new(&store);

    let mut incomplete = registration_draft("Kamau");
    incomplete.phone_number = " ".to_string();
    assert!(matches!(
        service.register("1", incomplete),
        Err(ServiceError::Validation(_))
    ));

    let created = service.register("1", registration_draft("Kamau")).unwrap();
    service.delete(&created.id).unwrap();
    assert!(service.list().is_empty());
    assert!(service.delete(&created.id).is_err());
}

#[test]
fn contacts_submit_filter_and_triage() {
    let store = RecordStore::new(MemoryBackend::new());
    let service = ContactService::new(&store);

    let first = service.submit(contact_draft("Mwangi", "Membership fee")).unwrap();
    service.submit(contact_draft("Njeri", "Hall booking")).unwrap();
    assert_eq!(first.status, ContactStatus::New);

    let updated = service
        .update_status(&first.id, ContactStatus::Resolved)
        .unwrap();
    assert_eq!(updated.status, ContactStatus::Resolved);
    assert!(updated.updated_at.is_some());

    let search = ContactFilter {
        search: "HALL".to_string(),
        status: None,
    };
    let found = service.filter(&search);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Njeri");

    let resolved = ContactFilter {
        search: String::new(),
        status: Some(ContactStatus::Resolved),
    };
    assert_eq!(service.filter(&resolved).len(), 1);
    assert_eq!(service.filter(&ContactFilter::default()).len(), 2);

    assert!(matches!(
        service.update_status("missing", ContactStatus::Closed),
        Err(ServiceError::NotFound { .. })
    ));
}
