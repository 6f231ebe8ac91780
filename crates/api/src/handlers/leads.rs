//! Lead intake handler.
//!
//! The public form endpoint validates the full payload up front, inserts
//! the lead and its vendor-lead join row in one transaction, then fires
//! best-effort notification emails to the vendor and the customer. Email
//! failures are logged and never fail the request.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use sofra_core::capabilities::{has_capability, Capability};
use sofra_core::email::EmailCategory;
use sofra_core::error::CoreError;
use sofra_core::lead::{
    validate_budget_range, validate_customer_name, validate_dietary_notes, validate_email,
    validate_event_date, validate_guest_count, validate_service_style,
};
use sofra_core::types::DbId;
use sofra_core::vendor::VendorStatus;
use sofra_db::models::lead::CreateLead;
use sofra_db::repositories::{LeadRepo, NotificationRepo, ProfileRepo, VendorRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::notifications::Recipient;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for a successful lead submission.
#[derive(Debug, Serialize)]
pub struct LeadCreated {
    pub lead_id: DbId,
    pub vendor_lead_id: DbId,
}

/// POST /api/v1/leads
///
/// Public lead intake. Accepts both anonymous and signed-in customers; a
/// signed-in submission links the lead to the customer's profile so quotes
/// and messaging work for them later.
pub async fn submit_lead(
    MaybeAuthUser(auth): MaybeAuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateLead>,
) -> AppResult<impl IntoResponse> {
    // Validate everything before any write.
    validate_customer_name(&input.customer_name).map_err(AppError::Core)?;
    validate_email(&input.customer_email).map_err(AppError::Core)?;
    validate_guest_count(input.guest_count).map_err(AppError::Core)?;
    validate_budget_range(input.budget_min, input.budget_max).map_err(AppError::Core)?;
    validate_event_date(input.event_date, chrono::Utc::now().date_naive())
        .map_err(AppError::Core)?;
    validate_service_style(&input.service_style).map_err(AppError::Core)?;
    if let Some(notes) = &input.dietary_notes {
        validate_dietary_notes(notes).map_err(AppError::Core)?;
    }

    // The target vendor must exist and be publicly visible.
    let vendor = VendorRepo::find_by_id(&state.pool, input.vendor_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vendor",
            id: input.vendor_id,
        }))?;
    let vendor_status = VendorStatus::parse(&vendor.status).map_err(AppError::Core)?;
    if !vendor_status.is_public() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Vendor",
            id: input.vendor_id,
        }));
    }

    // Only callers with the customer capability get their profile linked;
    // anyone else is treated as an anonymous submitter.
    let customer_profile_id = auth
        .as_ref()
        .filter(|a| has_capability(&a.role, Capability::SubmitLead))
        .map(|a| a.profile_id);

    // Lead + vendor_lead land atomically; a failure in either insert rolls
    // back both.
    let (lead, vendor_lead) =
        LeadRepo::create_with_vendor_lead(&state.pool, &input, customer_profile_id).await?;

    tracing::info!(
        lead_id = lead.id,
        vendor_id = vendor.id,
        vendor_lead_id = vendor_lead.id,
        "Lead submitted"
    );

    // Best-effort notifications; neither send can fail the request.
    let detail = format!(
        "{}, {} guests on {}",
        vendor.business_name, lead.guest_count, lead.event_date
    );

    if let Ok(Some(owner)) = ProfileRepo::find_by_id(&state.pool, vendor.owner_profile_id).await {
        state
            .mailer
            .dispatch(
                &state.pool,
                Recipient {
                    profile_id: Some(owner.id),
                    email: &owner.email,
                    name: &owner.full_name,
                },
                EmailCategory::LeadReceived,
                &detail,
            )
            .await;

        if let Err(e) = NotificationRepo::create(
            &state.pool,
            owner.id,
            EmailCategory::LeadReceived.as_str(),
            &detail,
        )
        .await
        {
            tracing::error!(error = %e, "Failed to create lead notification");
        }
    } else {
        tracing::error!(vendor_id = vendor.id, "Vendor owner profile lookup failed");
    }

    state
        .mailer
        .dispatch(
            &state.pool,
            Recipient {
                profile_id: customer_profile_id,
                email: &lead.customer_email,
                name: &lead.customer_name,
            },
            EmailCategory::LeadReceived,
            &detail,
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(LeadCreated {
            lead_id: lead.id,
            vendor_lead_id: vendor_lead.id,
        })),
    ))
}
