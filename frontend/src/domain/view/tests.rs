//! Regression coverage for derived views.
use std::sync::Arc;

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::cache::{CacheScope, ResourceCache, TagRegistry};
use crate::domain::ports::{FixtureEntityClient, MockEntityClient};
use crate::domain::{Booking, EntityId, Review, User};

fn booking(id: u64, confirmed: bool, total: i64, student: &str, hostel: &str) -> Booking {
    Booking {
        booking_id: EntityId::new(id),
        hostel_id: EntityId::new(1),
        room_id: EntityId::new(id),
        user_id: EntityId::new(id),
        check_in_date: NaiveDate::from_ymd_opt(2025, 9, 1).expect("date"),
        duration: "1 month".to_owned(),
        total_amount: Amount::from_units(total),
        booking_status: confirmed,
        first_name: student.to_owned(),
        last_name: "Otieno".to_owned(),
        hostel_name: hostel.to_owned(),
        room_number: format!("A{id}"),
    }
}

#[fixture]
fn bookings() -> Vec<Booking> {
    vec![
        booking(1, true, 100, "Amina", "Kilimani Heights"),
        booking(2, true, 200, "Brian", "Parklands Lodge"),
        booking(3, false, 50, "Cheru", "Kilimani Heights"),
        booking(4, false, 75, "Dan", "Westlands Court"),
    ]
}

fn ids<R: Resource>(rows: &[&R]) -> Vec<u64> {
    rows.iter().map(|row| row.id().get()).collect()
}

#[rstest]
fn summary_over_four_bookings(bookings: Vec<Booking>) {
    let projection = project(&bookings, &ViewFilters::default());
    let summary = &projection.aggregates;
    assert_eq!(summary.total, 4);
    assert_eq!(summary.positive, 2);
    assert_eq!(summary.negative, 2);
    assert_eq!(summary.amount, Amount::from_units(300));
}

#[rstest]
fn unmatched_search_keeps_aggregates(bookings: Vec<Booking>) {
    let all = project(&bookings, &ViewFilters::default());
    let none = project(&bookings, &ViewFilters::searching("nonexistent"));
    assert!(none.rows.is_empty());
    assert_eq!(none.aggregates, all.aggregates);
}

#[rstest]
fn identity_filter_returns_collection_in_order(bookings: Vec<Booking>) {
    let projection = project(&bookings, &ViewFilters::default());
    let expected: Vec<&Booking> = bookings.iter().collect();
    assert_eq!(projection.rows, expected);
}

#[rstest]
#[case("kilimani", StatusFilter::All, vec![1, 3])]
#[case("KILIMANI", StatusFilter::Only(true), vec![1])]
#[case("", StatusFilter::Only(false), vec![3, 4])]
#[case("a2", StatusFilter::All, vec![2])]
#[case("otieno", StatusFilter::Only(true), vec![1, 2])]
fn rows_match_search_and_status(
    bookings: Vec<Booking>,
    #[case] search: &str,
    #[case] status: StatusFilter,
    #[case] expected: Vec<u64>,
) {
    let filters = ViewFilters {
        search: search.to_owned(),
        status,
        ..ViewFilters::default()
    };
    let projection = project(&bookings, &filters);
    assert_eq!(ids(&projection.rows), expected);
    for row in &projection.rows {
        assert!(matches(*row, &filters, &search.to_lowercase()));
    }
}

#[rstest]
fn aggregates_ignore_every_filter(bookings: Vec<Booking>) {
    let baseline = project(&bookings, &ViewFilters::default()).aggregates;
    for search in ["", "amina", "zzz", "Heights"] {
        for status in [StatusFilter::All, StatusFilter::Only(true), StatusFilter::Only(false)] {
            let filters = ViewFilters {
                search: search.to_owned(),
                status,
                ..ViewFilters::default()
            };
            assert_eq!(project(&bookings, &filters).aggregates, baseline);
        }
    }
}

#[rstest]
fn sorting_by_id_is_optional() {
    let rows = vec![
        booking(3, true, 1, "C", "X"),
        booking(1, true, 1, "A", "X"),
        booking(2, true, 1, "B", "X"),
    ];
    let server = project(&rows, &ViewFilters::default());
    assert_eq!(ids(&server.rows), vec![3, 1, 2]);

    let ascending = ViewFilters {
        order: Some(SortOrder::Ascending),
        ..ViewFilters::default()
    };
    assert_eq!(ids(&project(&rows, &ascending).rows), vec![1, 2, 3]);

    let descending = ViewFilters {
        order: Some(SortOrder::Descending),
        ..ViewFilters::default()
    };
    assert_eq!(ids(&project(&rows, &descending).rows), vec![3, 2, 1]);
}

fn user(id: u64, role: UserRole, email: &str) -> User {
    User {
        user_id: EntityId::new(id),
        first_name: format!("User{id}"),
        last_name: String::new(),
        email: email.to_owned(),
        phone_number: None,
        role,
        verified: true,
        address: None,
        course: None,
        year_of_study: None,
        image_url: None,
    }
}

#[rstest]
fn users_filter_by_role_and_count_every_role() {
    let users = vec![
        user(1, UserRole::Student, "a@uni.ac.ke"),
        user(2, UserRole::Landlord, "b@lodge.co.ke"),
        user(3, UserRole::Student, "c@uni.ac.ke"),
        user(4, UserRole::Admin, "d@example.com"),
    ];
    let filters = ViewFilters {
        role: RoleFilter::Only(UserRole::Student),
        ..ViewFilters::default()
    };
    let projection = project(&users, &filters);
    assert_eq!(ids(&projection.rows), vec![1, 3]);
    assert_eq!(projection.aggregates.role_count(UserRole::Student), 2);
    assert_eq!(projection.aggregates.role_count(UserRole::Landlord), 1);
    assert_eq!(projection.aggregates.role_count(UserRole::Admin), 1);

    let by_email = project(&users, &ViewFilters::searching("UNI.AC"));
    assert_eq!(ids(&by_email.rows), vec![1, 3]);
}

#[rstest]
fn reviews_ignore_status_filter_and_average_ratings() {
    let reviews: Vec<Review> = [4_u32, 5, 4]
        .into_iter()
        .enumerate()
        .map(|(index, rating)| Review {
            review_id: EntityId::new(u64::try_from(index).expect("small index")),
            hostel_id: EntityId::new(1),
            user_id: EntityId::new(1),
            rating,
            comment: "ok".to_owned(),
            created_at: None,
            hostel_name: "Kilimani Heights".to_owned(),
        })
        .collect();
    let filters = ViewFilters {
        status: StatusFilter::Only(false),
        ..ViewFilters::default()
    };
    let projection = project(&reviews, &filters);
    assert_eq!(projection.rows.len(), 3);
    assert_eq!(projection.aggregates.rating.mean_tenths(), Some(43));
    assert_eq!(projection.aggregates.rating.to_string(), "4.3");
}

#[rstest]
fn empty_rating_summary_has_no_mean() {
    assert_eq!(RatingSummary::default().mean_tenths(), None);
    assert_eq!(RatingSummary::default().to_string(), "n/a");
}

#[rstest]
#[tokio::test]
async fn list_view_projects_loaded_rows(bookings: Vec<Booking>) {
    let client = Arc::new(FixtureEntityClient::new(bookings));
    let cache = Arc::new(ResourceCache::new(client, Arc::new(TagRegistry::new())));
    let view = ListView::open(cache, CacheScope::All, ViewFilters::searching("brian"));

    let snapshot = view.load().await.expect("load").expect("view still open");
    let projection = snapshot.projection();
    assert_eq!(ids(&projection.rows), vec![2]);
    assert_eq!(projection.aggregates.total, 4);
    assert_eq!(snapshot.collection().len(), 4);
}

#[rstest]
#[tokio::test]
async fn closed_view_drops_late_result(bookings: Vec<Booking>) {
    let mut client = MockEntityClient::<Booking>::new();
    let view_slot: Arc<std::sync::Mutex<Option<ViewHandle>>> = Arc::default();
    let closer = Arc::clone(&view_slot);
    client.expect_list().times(1).returning(move || {
        if let Some(handle) = closer.lock().expect("slot").as_ref() {
            handle.close();
        }
        Ok(bookings.clone())
    });
    let cache = Arc::new(ResourceCache::new(
        Arc::new(client),
        Arc::new(TagRegistry::new()),
    ));
    let view = ListView::open(Arc::clone(&cache), CacheScope::All, ViewFilters::default());
    *view_slot.lock().expect("slot") = Some(view.handle());

    assert!(view.load().await.expect("load succeeds").is_none());
    assert!(!view.handle().is_active());
    // The cache still holds the rows for the next view that asks.
    assert_eq!(cache.peek(CacheScope::All).map(|s| s.rows.len()), Some(4));
}
