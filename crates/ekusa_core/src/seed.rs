//! Seeded collections shipped with the site.
//!
//! These are materialized into the namespace on first read and are never
//! rewritten by merge operations.

use crate::model::event::{Event, EventCategory};
use crate::model::member::{Member, MemberStatus};
use crate::model::news::{NewsCategory, NewsItem};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("seed timestamp is valid")
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("seed date is valid")
}

pub fn initial_news() -> Vec<NewsItem> {
    vec![
        NewsItem {
            id: "1".to_string(),
            title: "EKUSA Cultural Week 2025 Announced".to_string(),
            excerpt: "Join us for a week of celebrating our diverse cultures and traditions."
                .to_string(),
            content: "We are excited to announce the dates for the 2025 Cultural Week. It will feature traditional dances, food festivals, and fashion shows. All students are invited to participate and showcase their cultural heritage.".to_string(),
            author: "EKUSA Admin".to_string(),
            category: NewsCategory::Events,
            featured: true,
            image: Some("https://images.unsplash.com/photo-1514525253440-b393452e8d26?auto=format&fit=crop&q=80".to_string()),
            created_at: at(2025, 3, 15, 10, 0),
        },
        NewsItem {
            id: "2".to_string(),
            title: "New Student Leadership Council Elected".to_string(),
            excerpt: "Meet your new student representatives for the 2025/2026 academic year."
                .to_string(),
            content: "The results are in! After a rigorous campaign period, the student body has spoken. We congratulate the incoming leaders who will represent the student voice for the next academic year.".to_string(),
            author: "Electoral Commission".to_string(),
            category: NewsCategory::Achievement,
            featured: false,
            image: Some("https://images.unsplash.com/photo-1521737604893-d14cc237f11d?auto=format&fit=crop&q=80".to_string()),
            created_at: at(2025, 2, 28, 14, 30),
        },
        NewsItem {
            id: "3".to_string(),
            title: "Scholarship Opportunities Open".to_string(),
            excerpt: "Applications for the Vice Chancellor's Scholarship are now open.".to_string(),
            content: "We are pleased to announce that applications for the annual VC Scholarship are now open. Eligible students are encouraged to apply before the deadline.".to_string(),
            author: "Dean of Students".to_string(),
            category: NewsCategory::Scholarship,
            featured: false,
            image: Some("https://images.unsplash.com/photo-1523050854058-8df90110c9f1?auto=format&fit=crop&q=80".to_string()),
            created_at: at(2025, 4, 1, 9, 0),
        },
    ]
}

pub fn initial_events() -> Vec<Event> {
    vec![
        Event {
            id: "1".to_string(),
            title: "Annual Tech Hackathon".to_string(),
            description: "A 24-hour coding challenge to solve campus problems.".to_string(),
            event_date: date(2025, 4, 10),
            event_time: Some("09:00 AM".to_string()),
            location: "Computer Lab 3".to_string(),
            category: EventCategory::Workshop,
            expected_attendees: 50,
            actual_attendees: 0,
            is_past: false,
            images: Some(vec!["https://images.unsplash.com/photo-1504384308090-c54be3855833?auto=format&fit=crop&q=80".to_string()]),
            highlight: None,
            created_at: at(2025, 3, 1, 10, 0),
        },
        Event {
            id: "2".to_string(),
            title: "Charity Fun Run".to_string(),
            description: "Running for a cause - supporting local children's homes.".to_string(),
            event_date: date(2025, 5, 1),
            event_time: Some("07:30 AM".to_string()),
            location: "Main Sports Field".to_string(),
            category: EventCategory::Charity,
            expected_attendees: 200,
            actual_attendees: 0,
            is_past: false,
            images: Some(vec!["https://images.unsplash.com/photo-1452626038306-9aae5e071dd3?auto=format&fit=crop&q=80".to_string()]),
            highlight: None,
            created_at: at(2025, 3, 5, 11, 0),
        },
        Event {
            id: "3".to_string(),
            title: "Freshmen Orientation Hike".to_string(),
            description: "A hike to Mt. Kenya regions to welcome new students.".to_string(),
            event_date: date(2024, 9, 15),
            event_time: Some("06:00 AM".to_string()),
            location: "Mt. Kenya".to_string(),
            category: EventCategory::Adventure,
            expected_attendees: 100,
            actual_attendees: 120,
            is_past: true,
            images: Some(vec!["https://images.unsplash.com/photo-1464822759023-fed622ff2c3b?auto=format&fit=crop&q=80".to_string()]),
            highlight: Some("Reached the base camp successfully!".to_string()),
            created_at: at(2024, 8, 20, 10, 0),
        },
    ]
}

pub fn initial_members() -> Vec<Member> {
    vec![
        seeded_member(
            "1",
            "John Doe",
            "B123-01-0001/2021",
            "john.doe@student.ekusa.com",
            "+254700000000",
            "Computer Science",
            "4",
        ),
        seeded_member(
            "2",
            "Jane Smith",
            "B123-01-0002/2021",
            "jane.smith@student.ekusa.com",
            "+254700000001",
            "Education",
            "3",
        ),
    ]
}

fn seeded_member(
    id: &str,
    name: &str,
    registration_number: &str,
    email: &str,
    phone_number: &str,
    course: &str,
    year_of_study: &str,
) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        registration_number: registration_number.to_string(),
        email: Some(email.to_string()),
        phone_number: Some(phone_number.to_string()),
        course: Some(course.to_string()),
        year_of_study: Some(year_of_study.to_string()),
        status: Some(MemberStatus::Active),
        created_at: None,
        updated_at: None,
    }
}
