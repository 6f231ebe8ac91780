//! Quote lifecycle handlers.
//!
//! Vendors create and revise quotes; customers drive the status after
//! that. Every transition is validated against the state machine in
//! `sofra_core::quote` and then applied with an optimistic
//! `WHERE status = $expected` guard, so two concurrent actors cannot both
//! win the same transition.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sofra_core::capabilities::Capability;
use sofra_core::email::EmailCategory;
use sofra_core::error::CoreError;
use sofra_core::quote::{derive_price_per_person, ensure_actionable, QuoteStatus};
use sofra_core::roles::{ROLE_CUSTOMER, ROLE_VENDOR_OWNER};
use sofra_core::types::DbId;
use sofra_core::vendor_lead::VendorLeadStatus;
use sofra_db::models::quote::{CounterOffer, CreateQuote, Quote, QuoteStatusChange, ReviseQuote};
use sofra_db::models::vendor_lead::VendorLeadContext;
use sofra_db::repositories::{NotificationRepo, ProfileRepo, QuoteRepo, VendorLeadRepo, VendorRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notifications::Recipient;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Load the vendor-lead context for a quote, or 404.
async fn quote_context(pool: &sqlx::PgPool, quote: &Quote) -> AppResult<VendorLeadContext> {
    VendorLeadRepo::find_context(pool, quote.vendor_lead_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VendorLead",
            id: quote.vendor_lead_id,
        }))
}

/// Load a quote by id, or 404.
async fn find_quote(pool: &sqlx::PgPool, id: DbId) -> AppResult<Quote> {
    QuoteRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Quote", id }))
}

/// Require that the caller is the customer on this vendor lead.
fn ensure_customer(ctx: &VendorLeadContext, auth: &AuthUser) -> Result<(), AppError> {
    if ctx.customer_profile_id != Some(auth.profile_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the requesting customer may act on this quote".into(),
        )));
    }
    Ok(())
}

/// Require that the caller owns the vendor on this vendor lead.
fn ensure_owner(ctx: &VendorLeadContext, auth: &AuthUser) -> Result<(), AppError> {
    if ctx.owner_profile_id != auth.profile_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owning vendor may act on this quote".into(),
        )));
    }
    Ok(())
}

/// Stale-guard conflict: the row moved between read and write.
fn stale_conflict() -> AppError {
    AppError::Core(CoreError::Conflict(
        "Quote status changed concurrently; reload and retry".into(),
    ))
}

/// Notify the vendor owner about a customer action; best-effort.
async fn notify_owner(state: &AppState, ctx: &VendorLeadContext, detail: &str) {
    if let Ok(Some(owner)) = ProfileRepo::find_by_id(&state.pool, ctx.owner_profile_id).await {
        state
            .mailer
            .dispatch(
                &state.pool,
                Recipient {
                    profile_id: Some(owner.id),
                    email: &owner.email,
                    name: &owner.full_name,
                },
                EmailCategory::QuoteStatus,
                detail,
            )
            .await;
    }
    if let Err(e) = NotificationRepo::create(
        &state.pool,
        ctx.owner_profile_id,
        EmailCategory::QuoteStatus.as_str(),
        detail,
    )
    .await
    {
        tracing::error!(error = %e, "Failed to create quote notification");
    }
}

/// Notify the customer about a vendor action; best-effort.
///
/// Anonymous lead submitters still get the email (addressed by the lead's
/// contact fields); only known profiles get an in-app notification.
async fn notify_customer(state: &AppState, ctx: &VendorLeadContext, detail: &str) {
    state
        .mailer
        .dispatch(
            &state.pool,
            Recipient {
                profile_id: ctx.customer_profile_id,
                email: &ctx.customer_email,
                name: &ctx.customer_name,
            },
            EmailCategory::QuoteReceived,
            detail,
        )
        .await;

    if let Some(customer_id) = ctx.customer_profile_id {
        if let Err(e) = NotificationRepo::create(
            &state.pool,
            customer_id,
            EmailCategory::QuoteReceived.as_str(),
            detail,
        )
        .await
        {
            tracing::error!(error = %e, "Failed to create quote notification");
        }
    }
}

/* --------------------------------------------------------------------------
Vendor-side handlers
-------------------------------------------------------------------------- */

/// POST /api/v1/quotes
///
/// Create a quote on a vendor lead the caller owns. Derives the per-person
/// price from the lead's guest count and moves the vendor lead to `quoted`
/// in the same transaction.
pub async fn create_quote(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateQuote>,
) -> AppResult<impl IntoResponse> {
    auth.require(Capability::SendQuote)?;

    let ctx = VendorLeadRepo::find_context(&state.pool, input.vendor_lead_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VendorLead",
            id: input.vendor_lead_id,
        }))?;
    ensure_owner(&ctx, &auth)?;

    if input.valid_until <= chrono::Utc::now() {
        return Err(AppError::Core(CoreError::Validation(
            "valid_until must be in the future".into(),
        )));
    }

    let price_per_person =
        derive_price_per_person(input.total_price, ctx.guest_count).map_err(AppError::Core)?;

    // One active quote per vendor lead.
    if QuoteRepo::active_exists(&state.pool, ctx.id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "An active quote already exists for this lead".into(),
        )));
    }

    // The vendor lead must be in a state that can move to `quoted`.
    let lead_status = VendorLeadStatus::parse(&ctx.status).map_err(AppError::Core)?;
    lead_status
        .ensure_transition(VendorLeadStatus::Quoted)
        .map_err(AppError::Core)?;

    let quote = QuoteRepo::create(
        &state.pool,
        ctx.id,
        input.total_price,
        price_per_person,
        input.valid_until,
        input.note.as_deref(),
        auth.profile_id,
        lead_status.as_str(),
    )
    .await?
    .ok_or_else(stale_conflict)?;

    tracing::info!(
        quote_id = quote.id,
        vendor_lead_id = ctx.id,
        total_price = quote.total_price,
        "Quote created"
    );

    let detail = format!(
        "{}: total {} ({} per person), valid until {}",
        ctx.business_name, quote.total_price, quote.price_per_person, quote.valid_until
    );
    notify_customer(&state, &ctx, &detail).await;

    Ok((StatusCode::CREATED, Json(DataResponse::new(quote))))
}

/// POST /api/v1/quotes/{id}/revise
///
/// Vendor revision of a countered quote: new price and validity, back to
/// `sent`.
pub async fn revise_quote(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReviseQuote>,
) -> AppResult<impl IntoResponse> {
    auth.require(Capability::SendQuote)?;

    let quote = find_quote(&state.pool, id).await?;
    let ctx = quote_context(&state.pool, &quote).await?;
    ensure_owner(&ctx, &auth)?;

    let current = QuoteStatus::parse(&quote.status).map_err(AppError::Core)?;
    current
        .ensure_transition(QuoteStatus::Sent)
        .map_err(AppError::Core)?;

    if input.valid_until <= chrono::Utc::now() {
        return Err(AppError::Core(CoreError::Validation(
            "valid_until must be in the future".into(),
        )));
    }
    let price_per_person =
        derive_price_per_person(input.total_price, ctx.guest_count).map_err(AppError::Core)?;

    let quote = QuoteRepo::revise(
        &state.pool,
        id,
        input.total_price,
        price_per_person,
        input.valid_until,
        input.note.as_deref(),
        auth.profile_id,
    )
    .await?
    .ok_or_else(stale_conflict)?;

    tracing::info!(quote_id = quote.id, "Quote revised");

    let detail = format!(
        "{}: revised total {} ({} per person)",
        ctx.business_name, quote.total_price, quote.price_per_person
    );
    notify_customer(&state, &ctx, &detail).await;

    Ok(Json(DataResponse::new(quote)))
}

/* --------------------------------------------------------------------------
Customer-side handlers
-------------------------------------------------------------------------- */

/// POST /api/v1/quotes/{id}/status
///
/// Customer-driven transition: `viewed`, `accepted`, or `rejected`.
/// Acceptance moves the vendor lead to `won` and rejection to `lost`, in
/// the same transaction as the quote update.
pub async fn change_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<QuoteStatusChange>,
) -> AppResult<impl IntoResponse> {
    auth.require(Capability::RespondToQuote)?;

    let quote = find_quote(&state.pool, id).await?;
    let ctx = quote_context(&state.pool, &quote).await?;
    ensure_customer(&ctx, &auth)?;

    let target = QuoteStatus::parse(&input.status).map_err(AppError::Core)?;
    if !matches!(
        target,
        QuoteStatus::Viewed | QuoteStatus::Accepted | QuoteStatus::Rejected
    ) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Status '{}' cannot be requested directly",
            target.as_str()
        ))));
    }

    let current = QuoteStatus::parse(&quote.status).map_err(AppError::Core)?;
    current.ensure_transition(target).map_err(AppError::Core)?;

    // Expired quotes stay in their stored status but refuse decisions.
    if matches!(target, QuoteStatus::Accepted | QuoteStatus::Rejected) {
        ensure_actionable(quote.valid_until, chrono::Utc::now()).map_err(AppError::Core)?;
    }

    // Acceptance / rejection settles the vendor lead atomically with the quote.
    let lead_transition = match target {
        QuoteStatus::Accepted => Some((
            VendorLeadStatus::Quoted.as_str(),
            VendorLeadStatus::Won.as_str(),
        )),
        QuoteStatus::Rejected => Some((
            VendorLeadStatus::Quoted.as_str(),
            VendorLeadStatus::Lost.as_str(),
        )),
        _ => None,
    };

    let quote = QuoteRepo::update_status_guarded(
        &state.pool,
        id,
        current.as_str(),
        target.as_str(),
        auth.profile_id,
        target.as_str(),
        lead_transition,
    )
    .await?
    .ok_or_else(stale_conflict)?;

    tracing::info!(quote_id = quote.id, status = %quote.status, "Quote status changed");

    // `viewed` is a silent transition; decisions notify the vendor.
    if matches!(target, QuoteStatus::Accepted | QuoteStatus::Rejected) {
        let detail = format!(
            "{}: quote {} was {}",
            ctx.business_name, quote.id, quote.status
        );
        notify_owner(&state, &ctx, &detail).await;
    }

    Ok(Json(DataResponse::new(quote)))
}

/// POST /api/v1/quotes/{id}/counter-offer
///
/// Customer proposes a different price. The quote moves to `countered`;
/// the proposal lands in the history for the vendor to act on.
pub async fn counter_offer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CounterOffer>,
) -> AppResult<impl IntoResponse> {
    auth.require(Capability::RespondToQuote)?;

    let quote = find_quote(&state.pool, id).await?;
    let ctx = quote_context(&state.pool, &quote).await?;
    ensure_customer(&ctx, &auth)?;

    if input.proposed_price <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Proposed price must be positive".into(),
        )));
    }

    let current = QuoteStatus::parse(&quote.status).map_err(AppError::Core)?;
    current
        .ensure_transition(QuoteStatus::Countered)
        .map_err(AppError::Core)?;
    ensure_actionable(quote.valid_until, chrono::Utc::now()).map_err(AppError::Core)?;

    let quote = QuoteRepo::counter_offer(
        &state.pool,
        id,
        current.as_str(),
        input.proposed_price,
        input.note.as_deref(),
        auth.profile_id,
    )
    .await?
    .ok_or_else(stale_conflict)?;

    tracing::info!(
        quote_id = quote.id,
        proposed_price = input.proposed_price,
        "Counter-offer recorded"
    );

    let detail = format!(
        "{}: customer proposed {} on quote {}",
        ctx.business_name, input.proposed_price, quote.id
    );
    notify_owner(&state, &ctx, &detail).await;

    Ok(Json(DataResponse::new(quote)))
}

/* --------------------------------------------------------------------------
Shared read handlers
-------------------------------------------------------------------------- */

/// GET /api/v1/quotes
///
/// The caller's quotes: a vendor owner sees quotes on their leads, a
/// customer sees quotes addressed to them.
pub async fn list_quotes(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let quotes = match auth.role.as_str() {
        ROLE_VENDOR_OWNER => {
            let vendor = VendorRepo::find_by_owner(&state.pool, auth.profile_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Vendor",
                    id: auth.profile_id,
                }))?;
            QuoteRepo::list_for_vendor(&state.pool, vendor.id).await?
        }
        ROLE_CUSTOMER => QuoteRepo::list_for_customer(&state.pool, auth.profile_id).await?,
        _ => {
            return Err(AppError::Core(CoreError::Forbidden(
                "Only marketplace participants have a quote inbox".into(),
            )))
        }
    };
    Ok(Json(DataResponse::new(quotes)))
}

/// GET /api/v1/quotes/{id}
///
/// Quote detail, visible to the thread participants.
pub async fn get_quote(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let quote = find_quote(&state.pool, id).await?;
    let ctx = quote_context(&state.pool, &quote).await?;
    if ensure_customer(&ctx, &auth).is_err() && ensure_owner(&ctx, &auth).is_err() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not a participant on this quote".into(),
        )));
    }
    Ok(Json(DataResponse::new(quote)))
}

/// GET /api/v1/quotes/{id}/history
///
/// The append-only action history, visible to the thread participants.
pub async fn quote_history(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let quote = find_quote(&state.pool, id).await?;
    let ctx = quote_context(&state.pool, &quote).await?;
    if ensure_customer(&ctx, &auth).is_err() && ensure_owner(&ctx, &auth).is_err() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not a participant on this quote".into(),
        )));
    }
    let events = QuoteRepo::history(&state.pool, id).await?;
    Ok(Json(DataResponse::new(events)))
}
