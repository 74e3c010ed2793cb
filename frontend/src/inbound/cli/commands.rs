//! Runs parsed console commands against the frontend state.

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::debug;

use super::args::{
    Command, DeleteArgs, ListArgs, LoginArgs, RegisterArgs, ReviewArgs, UpdateBookingArgs,
    UpdateMaintenanceArgs, UpdatePaymentArgs, UpdateUserArgs, VerifyArgs,
};
use super::render::{self, Tabular};
use crate::FrontendState;
use crate::domain::cache::{CacheScope, ResourceCache};
use crate::domain::forms::{
    BookingField, BookingUpdateInput, DeleteDialog, EntityForm, FormState, LoginField,
    LoginInput, MaintenanceField, MaintenanceUpdateInput, PaymentField, PaymentUpdateInput,
    RegistrationField, RegistrationInput, ReviewField, ReviewInput, UserField, UserUpdateInput,
    VerificationField, VerificationInput,
};
use crate::domain::view::{ListView, StatusFilter, ViewFilters, ViewRecord};
use crate::domain::{
    Capability, DomainResult, EntityId, Error, ParentKind, Resource, ResourceKind,
};

/// Call `$body` with `$cache` bound to the cache of `$kind`.
macro_rules! with_cache {
    ($state:expr, $kind:expr, $cache:ident => $body:expr) => {
        match $kind {
            ResourceKind::Users => {
                let $cache = &$state.users;
                $body
            }
            ResourceKind::Hostels => {
                let $cache = &$state.hostels;
                $body
            }
            ResourceKind::Rooms => {
                let $cache = &$state.rooms;
                $body
            }
            ResourceKind::Bookings => {
                let $cache = &$state.bookings;
                $body
            }
            ResourceKind::Payments => {
                let $cache = &$state.payments;
                $body
            }
            ResourceKind::Maintenance => {
                let $cache = &$state.maintenance;
                $body
            }
            ResourceKind::Reviews => {
                let $cache = &$state.reviews;
                $body
            }
        }
    };
}

/// Run `command` and return the text to print.
///
/// # Errors
///
/// Returns the domain error of the first failing step; the user has already
/// been notified of request outcomes.
pub async fn run(state: &FrontendState, command: Command) -> DomainResult<String> {
    debug!(command = command.name(), "running console command");
    match command {
        Command::Login(args) => login(state, args).await,
        Command::Register(args) => register(state, args).await,
        Command::Verify(args) => verify(state, args).await,
        Command::Logout => {
            state.auth.logout()?;
            Ok("signed out\n".to_owned())
        }
        Command::Whoami => Ok(whoami(state)),
        Command::List(args) => {
            let kind = args.resource;
            with_cache!(state, kind, cache => list(state, cache, args).await)
        }
        Command::Show { resource, id } => {
            with_cache!(state, resource, cache => show(state, cache, id).await)
        }
        Command::Children {
            resource,
            parent,
            parent_id,
        } => with_cache!(state, resource, cache => children(state, cache, parent, parent_id).await),
        Command::Delete(args) => {
            let kind = args.resource;
            with_cache!(state, kind, cache => delete(state, cache, args).await)
        }
        Command::UpdateBooking(args) => update_booking(state, args).await,
        Command::UpdatePayment(args) => update_payment(state, args).await,
        Command::UpdateMaintenance(args) => update_maintenance(state, args).await,
        Command::UpdateUser(args) => update_user(state, args).await,
        Command::Review(args) => review(state, args).await,
        Command::Landlords => landlords(state).await,
    }
}

async fn login(state: &FrontendState, args: LoginArgs) -> DomainResult<String> {
    let mut form = FormState::<LoginInput>::new();
    form.edit(LoginField::Email, &args.email)?;
    form.edit(LoginField::Password, &args.password)?;
    let user = state.auth.submit_login(&mut form).await?;
    Ok(format!(
        "signed in as {} {} ({})\n",
        user.first_name, user.last_name, user.role
    ))
}

async fn register(state: &FrontendState, args: RegisterArgs) -> DomainResult<String> {
    let mut form = FormState::<RegistrationInput>::new();
    for (field, value) in [
        (RegistrationField::FirstName, &args.first_name),
        (RegistrationField::LastName, &args.last_name),
        (RegistrationField::Email, &args.email),
        (RegistrationField::PhoneNumber, &args.phone_number),
        (RegistrationField::Password, &args.password),
        (RegistrationField::ConfirmPassword, &args.confirm_password),
    ] {
        form.edit(field, value)?;
    }
    let user = state.auth.submit_register(&mut form).await?;
    Ok(format!(
        "registered {} {} <{}>; check your inbox for the verification code\n",
        user.first_name, user.last_name, user.email
    ))
}

async fn verify(state: &FrontendState, args: VerifyArgs) -> DomainResult<String> {
    let mut form = FormState::<VerificationInput>::new();
    if let Some(email) = &args.email {
        form.edit(VerificationField::Email, email)?;
    }
    form.edit(VerificationField::Code, &args.code)?;
    state.auth.submit_verify(&mut form).await?;
    Ok("email verified\n".to_owned())
}

fn whoami(state: &FrontendState) -> String {
    match state.session.user() {
        Some(user) => format!(
            "{} {} <{}> ({}, id {})\n",
            user.first_name, user.last_name, user.email, user.role, user.user_id
        ),
        None => "not signed in\n".to_owned(),
    }
}

/// Scope a list read to what the session may see: everything, or only the
/// signed-in user's own records.
fn list_scope(state: &FrontendState, kind: ResourceKind, user_parent: bool) -> DomainResult<CacheScope> {
    if state.session.can(Capability::Read(kind)) {
        return Ok(CacheScope::All);
    }
    if state.session.can(Capability::ReadOwn(kind))
        && user_parent
        && let Some(user) = state.session.user()
    {
        return Ok(CacheScope::Parent(ParentKind::User, user.user_id));
    }
    Err(refuse(Capability::Read(kind)))
}

async fn list<R: ViewRecord + Tabular>(
    state: &FrontendState,
    cache: &Arc<ResourceCache<R>>,
    args: ListArgs,
) -> DomainResult<String> {
    let scope = list_scope(state, R::KIND, R::supports_parent(ParentKind::User))?;
    let filters = ViewFilters {
        search: args.search,
        status: StatusFilter::parse_for(R::KIND, &args.status)
            .map_err(|err| Error::validation(err.to_string()))?,
        role: args.role,
        order: args.sort,
    };
    render_view(ListView::open(Arc::clone(cache), scope, filters)).await
}

async fn children<R: ViewRecord + Tabular>(
    state: &FrontendState,
    cache: &Arc<ResourceCache<R>>,
    parent: ParentKind,
    parent_id: EntityId,
) -> DomainResult<String> {
    // Only the user route is scoped by owner; other parents need full read.
    let permitted = match parent {
        ParentKind::User => state.session.can_read_for_user(R::KIND, parent_id),
        _ => state.session.can(Capability::Read(R::KIND)),
    };
    if !permitted {
        return Err(refuse(Capability::Read(R::KIND)));
    }
    if !R::supports_parent(parent) {
        return Err(Error::validation(format!(
            "{} cannot be listed by {parent}",
            R::KIND
        )));
    }
    let scope = CacheScope::Parent(parent, parent_id);
    render_view(ListView::open(Arc::clone(cache), scope, ViewFilters::default())).await
}

async fn render_view<R: ViewRecord + Tabular>(view: ListView<R>) -> DomainResult<String> {
    match view.load().await? {
        Some(snapshot) => Ok(render::projection(&snapshot.projection())),
        None => Ok(String::new()),
    }
}

async fn show<R: Resource + Tabular>(
    state: &FrontendState,
    cache: &ResourceCache<R>,
    id: EntityId,
) -> DomainResult<String> {
    let session = &state.session;
    if session.can(Capability::Read(R::KIND)) {
        return Ok(render::record(&cache.fetch_one(id).await?));
    }
    if !session.can(Capability::ReadOwn(R::KIND)) {
        return Err(refuse(Capability::Read(R::KIND)));
    }
    let record = cache.fetch_one(id).await?;
    let own_id = session.user().map(|user| user.user_id);
    if own_id.is_none() || record.owner() != own_id {
        return Err(refuse(Capability::Read(R::KIND)));
    }
    Ok(render::record(&record))
}

async fn delete<R: Resource>(
    state: &FrontendState,
    cache: &ResourceCache<R>,
    args: DeleteArgs,
) -> DomainResult<String> {
    let mut dialog = DeleteDialog::<R>::open(args.id);
    if args.confirm {
        dialog.confirm();
    }
    let id = state.flow(cache).delete(&mut dialog).await?;
    Ok(format!("deleted {} {id}\n", R::KIND.noun()))
}

/// Populate an update form from the stored record, apply the provided edits
/// and submit it.
async fn update<F>(
    state: &FrontendState,
    cache: &ResourceCache<F::Record>,
    id: EntityId,
    edits: &[(F::Field, Option<&str>)],
) -> DomainResult<String>
where
    F: EntityForm,
    F::Record: Tabular,
{
    let kind = <F::Record as Resource>::KIND;
    let selected = if state.session.can(F::MODE.capability(kind)) {
        Some(cache.fetch_one(id).await?)
    } else {
        None
    };
    let mut form = FormState::<F>::open(selected);
    for (field, value) in edits {
        if let Some(value) = value {
            form.edit(*field, value)?;
        }
    }
    let record = state.flow(cache).submit(&mut form).await?;
    Ok(saved(record))
}

async fn update_booking(state: &FrontendState, args: UpdateBookingArgs) -> DomainResult<String> {
    update::<BookingUpdateInput>(
        state,
        &state.bookings,
        args.id,
        &[
            (BookingField::CheckInDate, args.check_in_date.as_deref()),
            (BookingField::Duration, args.duration.as_deref()),
            (BookingField::TotalAmount, args.total_amount.as_deref()),
            (BookingField::BookingStatus, args.status.as_deref()),
        ],
    )
    .await
}

async fn update_payment(state: &FrontendState, args: UpdatePaymentArgs) -> DomainResult<String> {
    update::<PaymentUpdateInput>(
        state,
        &state.payments,
        args.id,
        &[
            (PaymentField::Amount, args.amount.as_deref()),
            (PaymentField::Method, args.method.as_deref()),
            (PaymentField::PaymentStatus, args.status.as_deref()),
        ],
    )
    .await
}

async fn update_maintenance(
    state: &FrontendState,
    args: UpdateMaintenanceArgs,
) -> DomainResult<String> {
    update::<MaintenanceUpdateInput>(
        state,
        &state.maintenance,
        args.id,
        &[
            (MaintenanceField::IssueTitle, args.issue_title.as_deref()),
            (MaintenanceField::Description, args.description.as_deref()),
            (MaintenanceField::Status, args.status.as_deref()),
        ],
    )
    .await
}

async fn update_user(state: &FrontendState, args: UpdateUserArgs) -> DomainResult<String> {
    update::<UserUpdateInput>(
        state,
        &state.users,
        args.id,
        &[
            (UserField::FirstName, args.first_name.as_deref()),
            (UserField::LastName, args.last_name.as_deref()),
            (UserField::Role, args.role.as_deref()),
        ],
    )
    .await
}

async fn review(state: &FrontendState, args: ReviewArgs) -> DomainResult<String> {
    let author = args
        .user_id
        .or_else(|| state.session.user().map(|user| user.user_id))
        .map(|id| id.to_string())
        .unwrap_or_default();
    let mut form = FormState::<ReviewInput>::new();
    form.edit(ReviewField::HostelId, &args.hostel_id.to_string())?;
    form.edit(ReviewField::UserId, &author)?;
    form.edit(ReviewField::Rating, &args.rating)?;
    form.edit(ReviewField::Comment, &args.comment)?;
    let record = state.flow(&state.reviews).submit(&mut form).await?;
    Ok(saved(record))
}

/// The stored record, or a one-line acknowledgement when the server did not
/// echo it.
fn saved<R: Resource + Tabular>(record: Option<R>) -> String {
    match record {
        Some(record) => render::record(&record),
        None => format!("{} saved\n", R::KIND.noun()),
    }
}

async fn landlords(state: &FrontendState) -> DomainResult<String> {
    if !state.session.can(Capability::Read(ResourceKind::Users)) {
        return Err(refuse(Capability::Read(ResourceKind::Users)));
    }
    let landlords = state.landlords.list_landlords().await?;
    let mut out = render::table(landlords.iter());
    let _ = writeln!(out, "total {}", landlords.len());
    Ok(out)
}

fn refuse(capability: Capability) -> Error {
    Error::forbidden(format!("not permitted to {capability}"))
}
