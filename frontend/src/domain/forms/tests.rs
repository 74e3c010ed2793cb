//! Regression coverage for form state and mutation flows.
use std::sync::Arc;

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::cache::{CacheScope, ResourceCache, TagRegistry};
use crate::domain::ports::{
    ApiError, FixtureEntityClient, FixtureSessionStore, NotificationKind, RecordingNotifier,
};
use crate::domain::{
    Amount, AuthenticatedUser, Booking, EntityId, ErrorCode, Resource, ResourceKind, Review,
    Session, SessionContext, UserRole,
};

fn booking(id: u64, duration: &str) -> Booking {
    Booking {
        booking_id: EntityId::new(id),
        hostel_id: EntityId::new(1),
        room_id: EntityId::new(10),
        user_id: EntityId::new(20),
        check_in_date: NaiveDate::from_ymd_opt(2025, 9, 1).expect("date"),
        duration: duration.to_owned(),
        total_amount: Amount::from_units(100),
        booking_status: true,
        first_name: "Amina".to_owned(),
        last_name: "Otieno".to_owned(),
        hostel_name: "Kilimani Heights".to_owned(),
        room_number: "A1".to_owned(),
    }
}

fn session_for(role: UserRole) -> Arc<SessionContext> {
    let user = AuthenticatedUser {
        user_id: EntityId::new(99),
        first_name: "Grace".to_owned(),
        last_name: "Wanjiru".to_owned(),
        email: "grace@example.com".to_owned(),
        role,
    };
    let store = FixtureSessionStore::with_session(Session::new(user, "token"));
    Arc::new(SessionContext::restore(Arc::new(store)).expect("fixture store loads"))
}

struct Harness {
    client: Arc<FixtureEntityClient<Booking>>,
    tags: Arc<TagRegistry>,
    cache: ResourceCache<Booking>,
    notifier: Arc<RecordingNotifier>,
    flow: MutationFlow<Booking>,
}

fn harness(role: UserRole) -> Harness {
    let client = Arc::new(FixtureEntityClient::new(vec![
        booking(1, "1 month"),
        booking(2, "2 months"),
    ]));
    let tags = Arc::new(TagRegistry::new());
    let cache = ResourceCache::new(client.clone(), Arc::clone(&tags));
    let notifier = Arc::new(RecordingNotifier::default());
    let flow = MutationFlow::new(&cache, session_for(role), notifier.clone());
    Harness {
        client,
        tags,
        cache,
        notifier,
        flow,
    }
}

fn review(id: u64, comment: &str) -> Review {
    Review {
        review_id: EntityId::new(id),
        hostel_id: EntityId::new(1),
        user_id: EntityId::new(99),
        rating: 4,
        comment: comment.to_owned(),
        created_at: None,
        hostel_name: String::new(),
    }
}

struct Reviews {
    client: Arc<FixtureEntityClient<Review>>,
    tags: Arc<TagRegistry>,
    cache: ResourceCache<Review>,
    notifier: Arc<RecordingNotifier>,
    flow: MutationFlow<Review>,
}

fn reviews(client: FixtureEntityClient<Review>) -> Reviews {
    let client = Arc::new(client);
    let tags = Arc::new(TagRegistry::new());
    let cache = ResourceCache::new(client.clone(), Arc::clone(&tags));
    let notifier = Arc::new(RecordingNotifier::default());
    let flow = MutationFlow::new(&cache, session_for(UserRole::Student), notifier.clone());
    Reviews {
        client,
        tags,
        cache,
        notifier,
        flow,
    }
}

fn review_form(comment: &str) -> FormState<ReviewInput> {
    let mut form = FormState::<ReviewInput>::new();
    for (field, value) in [
        (ReviewField::HostelId, "1"),
        (ReviewField::UserId, "99"),
        (ReviewField::Rating, "5"),
        (ReviewField::Comment, comment),
    ] {
        form.edit(field, value).expect("idle form accepts edits");
    }
    form
}

async fn read_ids<R: Resource>(cache: &ResourceCache<R>) -> Vec<EntityId> {
    cache
        .read(CacheScope::All)
        .await
        .expect("cache read succeeds")
        .iter()
        .map(Resource::id)
        .collect()
}

#[fixture]
fn admin() -> Harness {
    harness(UserRole::Admin)
}

#[rstest]
fn reselecting_discards_previous_values() {
    let mut form = FormState::<BookingUpdateInput>::open(Some(booking(1, "1 month")));
    form.edit(BookingField::Duration, "6 months")
        .expect("idle form accepts edits");

    assert!(form.select(Some(booking(2, "2 months"))));

    assert_eq!(form.input().get(BookingField::Duration), "2 months");
    assert_eq!(form.selected().map(Resource::id), Some(EntityId::new(2)));
    assert!(form.errors().is_empty());
}

#[rstest]
fn clearing_selection_empties_fields() {
    let mut form = FormState::<BookingUpdateInput>::open(Some(booking(1, "1 month")));
    form.select(None);
    for field in BookingUpdateInput::FIELDS {
        assert_eq!(form.input().get(*field), "");
    }
}

#[rstest]
fn edits_revalidate_only_the_edited_field() {
    let mut form = FormState::<BookingUpdateInput>::open(Some(booking(1, "1 month")));
    form.edit(BookingField::TotalAmount, "-5")
        .expect("idle form accepts edits");
    assert_eq!(form.errors().len(), 1);
    assert!(form.errors().get("totalAmount").is_some());

    form.edit(BookingField::TotalAmount, "120.50")
        .expect("idle form accepts edits");
    assert!(form.errors().is_empty());
}

#[rstest]
fn invalid_submit_returns_to_idle_with_every_error() {
    let mut form = FormState::<BookingUpdateInput>::open(None);
    let rejection = form.begin_submit().expect_err("empty form is invalid");

    let SubmitRejected::Invalid(errors) = rejection else {
        panic!("expected field errors, got {rejection:?}");
    };
    assert_eq!(errors.len(), BookingUpdateInput::FIELDS.len());
    assert_eq!(form.phase(), FormPhase::Idle);
    assert_eq!(form.errors(), &errors);
}

#[rstest]
fn submitting_form_rejects_edits_and_second_submit() {
    let mut form = FormState::<BookingUpdateInput>::open(Some(booking(1, "1 month")));
    form.begin_submit().expect("populated form is valid");

    assert!(form.submit_disabled());
    assert_eq!(form.begin_submit(), Err(SubmitRejected::Busy));
    assert_eq!(
        form.edit(BookingField::Duration, "x"),
        Err(SubmitRejected::Busy)
    );
    assert!(!form.select(None));
    assert!(!form.close());
}

#[rstest]
fn success_clears_and_closes() {
    let mut form = FormState::<BookingUpdateInput>::open(Some(booking(1, "1 month")));
    form.begin_submit().expect("populated form is valid");
    form.succeed();

    assert_eq!(form.phase(), FormPhase::Succeeded);
    assert!(!form.is_open());
    assert!(form.selected().is_none());
    assert_eq!(form.input(), &BookingUpdateInput::default());
}

#[rstest]
fn failure_keeps_input_and_stays_open() {
    let mut form = FormState::<BookingUpdateInput>::open(Some(booking(1, "1 month")));
    form.edit(BookingField::Duration, "3 months")
        .expect("idle form accepts edits");
    form.begin_submit().expect("populated form is valid");
    form.fail();

    assert_eq!(form.phase(), FormPhase::Failed);
    assert!(form.is_open());
    assert_eq!(form.input().get(BookingField::Duration), "3 months");

    form.edit(BookingField::Duration, "4 months")
        .expect("failed form accepts edits");
    assert_eq!(form.phase(), FormPhase::Idle);
}

#[rstest]
#[tokio::test]
async fn admin_update_invalidates_bookings_and_payments(admin: Harness) {
    let before_bookings = admin.tags.current(ResourceKind::Bookings);
    let before_payments = admin.tags.current(ResourceKind::Payments);
    let before_rooms = admin.tags.current(ResourceKind::Rooms);
    let mut form = FormState::<BookingUpdateInput>::open(Some(booking(1, "1 month")));
    form.edit(BookingField::Duration, "3 months")
        .expect("idle form accepts edits");

    let updated = admin
        .flow
        .submit(&mut form)
        .await
        .expect("update succeeds")
        .expect("updated record returned");

    assert_eq!(updated.duration, "3 months");
    assert_eq!(updated.room_id, EntityId::new(10));
    assert!(admin.tags.current(ResourceKind::Bookings) > before_bookings);
    assert!(admin.tags.current(ResourceKind::Payments) > before_payments);
    assert_eq!(admin.tags.current(ResourceKind::Rooms), before_rooms);
    assert_eq!(form.phase(), FormPhase::Succeeded);
    let note = admin.notifier.last().expect("success notified");
    assert_eq!(note.kind, NotificationKind::Success);
    assert_eq!(note.message, "Booking updated successfully");
}

#[rstest]
#[tokio::test]
async fn invalid_submit_sends_nothing(admin: Harness) {
    let mut form = FormState::<BookingUpdateInput>::open(Some(booking(1, "1 month")));
    form.edit(BookingField::CheckInDate, "not a date")
        .expect("idle form accepts edits");

    let err = admin.flow.submit(&mut form).await.expect_err("invalid form");

    assert_eq!(err.code(), ErrorCode::Validation);
    assert_eq!(admin.client.mutation_calls(), 0);
    assert!(admin.notifier.notifications().is_empty());
    assert_eq!(form.phase(), FormPhase::Idle);
}

#[rstest]
#[tokio::test]
async fn update_without_selection_is_rejected(admin: Harness) {
    let mut form = FormState::<BookingUpdateInput>::open(None);

    let err = admin.flow.submit(&mut form).await.expect_err("nothing selected");

    assert_eq!(err.code(), ErrorCode::Validation);
    assert_eq!(admin.client.mutation_calls(), 0);
    assert_eq!(
        admin.notifier.last().map(|n| n.kind),
        Some(NotificationKind::Error)
    );
}

#[rstest]
#[tokio::test]
async fn server_failure_keeps_form_open(admin: Harness) {
    admin
        .client
        .fail_next(ApiError::conflict("booking was cancelled"));
    let before = admin.tags.current(ResourceKind::Bookings);
    let mut form = FormState::<BookingUpdateInput>::open(Some(booking(1, "1 month")));

    let err = admin.flow.submit(&mut form).await.expect_err("server refuses");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(form.phase(), FormPhase::Failed);
    assert!(form.is_open());
    assert_eq!(admin.tags.current(ResourceKind::Bookings), before);
    let note = admin.notifier.last().expect("failure notified");
    assert_eq!(note.kind, NotificationKind::Error);
    assert_eq!(
        note.message,
        "Failed to update booking: conflict: booking was cancelled"
    );
}

#[rstest]
#[tokio::test]
async fn student_cannot_modify_bookings() {
    let student = harness(UserRole::Student);
    let mut form = FormState::<BookingUpdateInput>::open(Some(booking(1, "1 month")));

    let err = student.flow.submit(&mut form).await.expect_err("forbidden");

    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(student.client.mutation_calls(), 0);
    assert_eq!(form.phase(), FormPhase::Idle);
}

#[rstest]
#[tokio::test]
async fn confirmed_delete_removes_record_and_payments_tag(admin: Harness) {
    let before_payments = admin.tags.current(ResourceKind::Payments);
    let mut dialog = DeleteDialog::open(EntityId::new(2));

    let unconfirmed = admin.flow.delete(&mut dialog).await.expect_err("unconfirmed");
    assert_eq!(unconfirmed.code(), ErrorCode::Validation);
    assert_eq!(admin.client.calls().delete, 0);

    dialog.confirm();
    let deleted = admin.flow.delete(&mut dialog).await.expect("delete succeeds");

    assert_eq!(deleted, EntityId::new(2));
    assert_eq!(admin.client.records().len(), 1);
    assert!(admin.tags.current(ResourceKind::Payments) > before_payments);
    assert_eq!(
        admin.notifier.last().map(|n| n.message),
        Some("Booking deleted successfully".to_owned())
    );
}

#[rstest]
#[tokio::test]
async fn deleted_record_is_absent_from_the_next_read(admin: Harness) {
    assert_eq!(read_ids(&admin.cache).await, vec![EntityId::new(1), EntityId::new(2)]);

    let mut dialog = DeleteDialog::open(EntityId::new(2));
    dialog.confirm();
    admin.flow.delete(&mut dialog).await.expect("delete succeeds");

    assert_eq!(read_ids(&admin.cache).await, vec![EntityId::new(1)]);
    assert_eq!(admin.client.calls().list, 2);
}

#[rstest]
#[tokio::test]
async fn sequential_creates_each_invalidate_and_refetch_once() {
    let reviews = reviews(FixtureEntityClient::new(vec![review(1, "Quiet")]));
    assert_eq!(read_ids(&reviews.cache).await, vec![EntityId::new(1)]);

    let mut first = review_form("Clean rooms");
    reviews.flow.submit(&mut first).await.expect("first create");
    assert_eq!(reviews.tags.current(ResourceKind::Reviews), 1);
    assert_eq!(
        read_ids(&reviews.cache).await,
        vec![EntityId::new(1), EntityId::new(2)]
    );
    assert_eq!(reviews.client.calls().list, 2);

    let mut second = review_form("Friendly warden");
    reviews.flow.submit(&mut second).await.expect("second create");
    assert_eq!(reviews.tags.current(ResourceKind::Reviews), 2);
    assert_eq!(
        read_ids(&reviews.cache).await,
        vec![EntityId::new(1), EntityId::new(2), EntityId::new(3)]
    );
    assert_eq!(reviews.client.calls().list, 3);
    assert_eq!(reviews.client.calls().create, 2);
}

#[rstest]
#[tokio::test]
async fn acknowledged_create_succeeds_and_refreshes_the_list() {
    let reviews = reviews(FixtureEntityClient::new(vec![review(1, "Quiet")]).acknowledging_creates());
    read_ids(&reviews.cache).await;
    let mut form = review_form("Near campus");

    let created = reviews.flow.submit(&mut form).await.expect("create acknowledged");

    assert_eq!(created, None);
    assert_eq!(form.phase(), FormPhase::Succeeded);
    assert_eq!(
        reviews.notifier.last().map(|n| n.kind),
        Some(NotificationKind::Success)
    );
    assert_eq!(
        read_ids(&reviews.cache).await,
        vec![EntityId::new(1), EntityId::new(2)]
    );
}
