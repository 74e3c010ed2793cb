//! Behavioural tests for the admin console over in-memory ports.

use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use rstest::{fixture, rstest};

use hostel_frontend::domain::ports::{
    FixtureAuthGateway, FixtureEntityClient, FixtureSessionStore, NotificationKind,
    RecordingNotifier,
};
use hostel_frontend::domain::{
    Amount, AuthenticatedUser, Booking, EntityId, ErrorCode, Hostel, Maintenance, Payment,
    Review, Room, Session, SessionContext, User, UserRole,
};
use hostel_frontend::inbound::cli::{self, CliArgs, Command};
use hostel_frontend::state::{FrontendPorts, FrontendState};

const PASSWORD: &str = "secret1";

fn account(id: u64, first: &str, role: UserRole) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: EntityId::new(id),
        first_name: first.to_owned(),
        last_name: "Otieno".to_owned(),
        email: format!("{}@example.com", first.to_lowercase()),
        role,
    }
}

fn booking(id: u64, user: u64, student: &str, confirmed: bool, total_cents: i64) -> Booking {
    Booking {
        booking_id: EntityId::new(id),
        hostel_id: EntityId::new(1),
        room_id: EntityId::new(3),
        user_id: EntityId::new(user),
        check_in_date: NaiveDate::from_ymd_opt(2024, 9, 2).expect("valid date"),
        duration: "1 semester".to_owned(),
        total_amount: Amount::from_cents(total_cents),
        booking_status: confirmed,
        first_name: student.to_owned(),
        last_name: "Kamau".to_owned(),
        hostel_name: "Sunrise Hostel".to_owned(),
        room_number: "B12".to_owned(),
    }
}

fn payment(id: u64, booking: u64, confirmed: bool) -> Payment {
    Payment {
        payment_id: EntityId::new(id),
        booking_id: EntityId::new(booking),
        user_id: EntityId::new(20),
        amount: Amount::from_units(500),
        method: "M-Pesa".to_owned(),
        payment_status: confirmed,
        first_name: "Wanjiru".to_owned(),
        last_name: "Kamau".to_owned(),
        hostel_name: "Sunrise Hostel".to_owned(),
        room_number: "B12".to_owned(),
    }
}

struct Console {
    state: FrontendState,
    bookings: Arc<FixtureEntityClient<Booking>>,
    payments: Arc<FixtureEntityClient<Payment>>,
    reviews: Arc<FixtureEntityClient<Review>>,
    store: Arc<FixtureSessionStore>,
    notifier: Arc<RecordingNotifier>,
}

impl Console {
    fn start(signed_in: Option<AuthenticatedUser>) -> Self {
        let store = Arc::new(match signed_in {
            Some(user) => FixtureSessionStore::with_session(Session::new(user, "stored-token")),
            None => FixtureSessionStore::default(),
        });
        let session =
            Arc::new(SessionContext::restore(store.clone()).expect("fixture store loads"));
        let bookings = Arc::new(FixtureEntityClient::new(vec![
            booking(1, 20, "Wanjiru", true, 150_000),
            booking(2, 21, "Baraka", false, 90_000),
            booking(3, 20, "Wanjiru", true, 60_000),
        ]));
        let payments = Arc::new(FixtureEntityClient::new(vec![
            payment(10, 1, true),
            payment(11, 1, false),
            payment(12, 3, true),
        ]));
        let reviews = Arc::new(FixtureEntityClient::<Review>::default());
        let users = Arc::new(FixtureEntityClient::<User>::default());
        let auth = FixtureAuthGateway::default()
            .with_account(account(1, "Amina", UserRole::Admin), PASSWORD);
        let notifier = Arc::new(RecordingNotifier::default());
        let ports = FrontendPorts {
            users: users.clone(),
            hostels: Arc::new(FixtureEntityClient::<Hostel>::default()),
            rooms: Arc::new(FixtureEntityClient::<Room>::default()),
            bookings: bookings.clone(),
            payments: payments.clone(),
            maintenance: Arc::new(FixtureEntityClient::<Maintenance>::default()),
            reviews: reviews.clone(),
            landlords: users,
            auth: Arc::new(auth),
        };
        Self {
            state: FrontendState::new(ports, session, notifier.clone()),
            bookings,
            payments,
            reviews,
            store,
            notifier,
        }
    }

    async fn run(&self, args: &[&str]) -> Result<String, hostel_frontend::domain::Error> {
        let command: Command =
            CliArgs::try_parse_from(std::iter::once("hostel-admin").chain(args.iter().copied()))
                .expect("arguments parse")
                .command;
        cli::run(&self.state, command).await
    }

    fn last_notice(&self) -> (NotificationKind, String) {
        let notice = self.notifier.last().expect("a notification was sent");
        (notice.kind, notice.message)
    }
}

#[fixture]
fn admin() -> Console {
    Console::start(Some(account(1, "Amina", UserRole::Admin)))
}

#[rstest]
#[tokio::test]
async fn login_persists_session_and_whoami_reports_it() {
    let console = Console::start(None);
    assert_eq!(console.run(&["whoami"]).await.expect("whoami"), "not signed in\n");

    let out = console
        .run(&["login", "--email", "amina@example.com", "--password", PASSWORD])
        .await
        .expect("login succeeds");
    assert_eq!(out, "signed in as Amina Otieno (admin)\n");
    assert!(console.store.is_populated());
    assert_eq!(
        console.last_notice(),
        (NotificationKind::Success, "Login successful".to_owned())
    );

    let who = console.run(&["whoami"]).await.expect("whoami");
    assert!(who.starts_with("Amina Otieno <amina@example.com> (admin, id 1)"));
}

#[rstest]
#[tokio::test]
async fn invalid_login_form_never_reaches_the_gateway() {
    let console = Console::start(None);
    let err = console
        .run(&["login", "--email", "not-an-email", "--password", "123"])
        .await
        .expect_err("form is invalid");
    assert_eq!(err.code(), ErrorCode::Validation);
    assert!(!console.store.is_populated());
    assert!(console.notifier.notifications().is_empty());
}

#[rstest]
#[tokio::test]
async fn signed_out_console_cannot_list_bookings() {
    let console = Console::start(None);
    let err = console
        .run(&["list", "bookings"])
        .await
        .expect_err("listing requires a session");
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(console.bookings.calls().list, 0);
}

#[rstest]
#[tokio::test]
async fn admin_list_filters_rows_and_summarises_the_whole_collection(admin: Console) {
    let out = admin
        .run(&["list", "bookings", "--status", "confirmed", "--sort", "desc"])
        .await
        .expect("list succeeds");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4, "header, two rows and the summary: {out}");
    assert!(lines[1].starts_with('3'));
    assert!(lines[2].starts_with('1'));
    assert_eq!(
        lines[3],
        "total 3 | confirmed 2 | cancelled 1 | revenue 2100.00"
    );
}

#[rstest]
#[tokio::test]
async fn repeated_lists_are_served_from_the_cache(admin: Console) {
    admin.run(&["list", "bookings"]).await.expect("first list");
    admin
        .run(&["list", "bookings", "--search", "baraka"])
        .await
        .expect("second list");
    assert_eq!(admin.bookings.calls().list, 1);
}

#[rstest]
#[tokio::test]
async fn booking_update_keeps_other_fields_and_invalidates_payments(admin: Console) {
    admin.run(&["list", "bookings"]).await.expect("warm bookings");
    admin.run(&["list", "payments"]).await.expect("warm payments");

    let out = admin
        .run(&["update-booking", "2", "--status", "confirmed"])
        .await
        .expect("update succeeds");
    assert!(out.contains("confirmed"));

    let stored = admin
        .bookings
        .records()
        .into_iter()
        .find(|record| record.booking_id == EntityId::new(2))
        .expect("booking 2 still stored");
    assert!(stored.booking_status);
    assert_eq!(stored.duration, "1 semester");
    assert_eq!(
        admin.last_notice(),
        (NotificationKind::Success, "Booking updated successfully".to_owned())
    );

    admin.run(&["list", "bookings"]).await.expect("refetch bookings");
    admin.run(&["list", "payments"]).await.expect("refetch payments");
    assert_eq!(admin.bookings.calls().list, 2);
    assert_eq!(admin.payments.calls().list, 2);
}

#[rstest]
#[tokio::test]
async fn invalid_booking_edit_sends_nothing(admin: Console) {
    let err = admin
        .run(&["update-booking", "1", "--total-amount=-5"])
        .await
        .expect_err("negative totals are rejected");
    assert_eq!(err.code(), ErrorCode::Validation);
    assert_eq!(admin.bookings.mutation_calls(), 0);
}

#[rstest]
#[tokio::test]
async fn delete_needs_confirmation(admin: Console) {
    let err = admin
        .run(&["delete", "bookings", "1"])
        .await
        .expect_err("unconfirmed delete is refused");
    assert_eq!(err.code(), ErrorCode::Validation);
    assert_eq!(admin.bookings.calls().delete, 0);
    assert_eq!(admin.last_notice().0, NotificationKind::Error);

    let out = admin
        .run(&["delete", "bookings", "1", "--confirm"])
        .await
        .expect("confirmed delete succeeds");
    assert_eq!(out, "deleted booking 1\n");
    assert_eq!(admin.bookings.records().len(), 2);
    assert_eq!(
        admin.last_notice(),
        (NotificationKind::Success, "Booking deleted successfully".to_owned())
    );
}

#[rstest]
#[tokio::test]
async fn children_lists_payments_of_one_booking(admin: Console) {
    let out = admin
        .run(&["children", "payments", "booking", "1"])
        .await
        .expect("children succeeds");
    assert_eq!(out.lines().count(), 4, "header, two rows and the summary: {out}");
    assert!(out.ends_with("total 2 | confirmed 1 | pending 1 | collected 500.00\n"));
    assert_eq!(admin.payments.calls().get_by_parent, 1);
}

#[rstest]
#[tokio::test]
async fn student_sees_only_own_bookings_and_cannot_edit_them() {
    let console = Console::start(Some(account(20, "Wanjiru", UserRole::Student)));
    let out = console
        .run(&["list", "bookings"])
        .await
        .expect("own bookings are readable");
    assert_eq!(out.lines().count(), 4, "header, two rows and the summary: {out}");
    assert_eq!(console.bookings.calls().list, 0);
    assert_eq!(console.bookings.calls().get_by_parent, 1);

    let err = console
        .run(&["update-booking", "1", "--duration", "2 semesters"])
        .await
        .expect_err("students cannot modify bookings");
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(console.bookings.calls().get_by_id, 0);
    assert_eq!(console.last_notice().0, NotificationKind::Error);
}

#[rstest]
#[tokio::test]
async fn student_reads_only_their_own_booking_details() {
    let console = Console::start(Some(account(20, "Wanjiru", UserRole::Student)));
    let own = console
        .run(&["show", "bookings", "1"])
        .await
        .expect("own booking is readable");
    assert!(own.contains("Wanjiru"));

    let err = console
        .run(&["show", "bookings", "2"])
        .await
        .expect_err("another student's booking");
    assert_eq!(err.code(), ErrorCode::Forbidden);

    let err = console
        .run(&["children", "payments", "booking", "2"])
        .await
        .expect_err("payments of a booking need full read access");
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(console.payments.calls().get_by_parent, 0);
}

#[rstest]
#[tokio::test]
async fn student_review_defaults_author_to_session_user() {
    let console = Console::start(Some(account(20, "Wanjiru", UserRole::Student)));
    console
        .run(&["review", "--hostel-id", "1", "--rating", "4", "--comment", "Quiet and clean"])
        .await
        .expect("review is created");

    let stored = console.reviews.records();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].user_id, EntityId::new(20));
    assert_eq!(stored[0].rating, 4);
}

#[rstest]
#[tokio::test]
async fn out_of_range_rating_is_rejected_before_sending() {
    let console = Console::start(Some(account(20, "Wanjiru", UserRole::Student)));
    let err = console
        .run(&["review", "--hostel-id", "1", "--rating", "6", "--comment", "Great"])
        .await
        .expect_err("rating above five");
    assert_eq!(err.code(), ErrorCode::Validation);
    assert_eq!(console.reviews.mutation_calls(), 0);
}

#[rstest]
#[tokio::test]
async fn logout_forgets_the_stored_session(admin: Console) {
    assert_eq!(admin.run(&["logout"]).await.expect("logout"), "signed out\n");
    assert!(!admin.store.is_populated());
    assert_eq!(admin.run(&["whoami"]).await.expect("whoami"), "not signed in\n");
}
