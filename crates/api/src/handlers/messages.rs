//! Conversation handlers.
//!
//! A conversation is the message thread scoped to one vendor lead. Every
//! endpoint first authorizes that the caller is a participant (the lead's
//! customer or the vendor's owner); thread aggregation itself is SQL in
//! `MessageRepo`.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use sofra_core::capabilities::Capability;
use sofra_core::email::EmailCategory;
use sofra_core::error::CoreError;
use sofra_core::message::validate_message_content;
use sofra_core::types::DbId;
use sofra_db::models::message::{CreateMessage, SENDER_CUSTOMER, SENDER_VENDOR};
use sofra_db::models::vendor_lead::VendorLeadContext;
use sofra_db::repositories::{MessageRepo, NotificationRepo, ProfileRepo, VendorLeadRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notifications::Recipient;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Which side of the thread the caller is on.
enum Participant {
    Customer,
    Vendor,
}

impl Participant {
    fn sender_type(&self) -> &'static str {
        match self {
            Participant::Customer => SENDER_CUSTOMER,
            Participant::Vendor => SENDER_VENDOR,
        }
    }
}

/// Authorize the caller as a participant in the conversation, returning
/// the context and which side they are on.
async fn authorize_participant(
    pool: &sqlx::PgPool,
    vendor_lead_id: DbId,
    auth: &AuthUser,
) -> AppResult<(VendorLeadContext, Participant)> {
    let ctx = VendorLeadRepo::find_context(pool, vendor_lead_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VendorLead",
            id: vendor_lead_id,
        }))?;

    if ctx.customer_profile_id == Some(auth.profile_id) {
        Ok((ctx, Participant::Customer))
    } else if ctx.owner_profile_id == auth.profile_id {
        Ok((ctx, Participant::Vendor))
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Not a participant in this conversation".into(),
        )))
    }
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// Query parameters for thread fetch and mark-read.
#[derive(Debug, Deserialize)]
pub struct ThreadQuery {
    pub vendor_lead_id: DbId,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/messages?vendor_lead_id=
///
/// A thread's messages, oldest first.
pub async fn list_messages(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ThreadQuery>,
) -> AppResult<impl IntoResponse> {
    authorize_participant(&state.pool, query.vendor_lead_id, &auth).await?;
    let messages =
        MessageRepo::list_thread(&state.pool, query.vendor_lead_id, query.limit, query.offset)
            .await?;
    Ok(Json(DataResponse::new(messages)))
}

/// POST /api/v1/messages
///
/// Append a message to a thread. Triggers an in-app notification and a
/// rate-limited email to the counterpart; both are best-effort.
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateMessage>,
) -> AppResult<impl IntoResponse> {
    auth.require(Capability::SendMessage)?;
    validate_message_content(&input.content).map_err(AppError::Core)?;

    let (ctx, participant) =
        authorize_participant(&state.pool, input.vendor_lead_id, &auth).await?;

    let message = MessageRepo::create(
        &state.pool,
        ctx.id,
        auth.profile_id,
        participant.sender_type(),
        input.content.trim(),
    )
    .await?;

    tracing::info!(
        vendor_lead_id = ctx.id,
        message_id = message.id,
        sender_type = %message.sender_type,
        "Message sent"
    );

    // Notify the counterpart.
    let detail = format!("New message about your {} request", ctx.business_name);
    match participant {
        Participant::Customer => {
            if let Ok(Some(owner)) =
                ProfileRepo::find_by_id(&state.pool, ctx.owner_profile_id).await
            {
                state
                    .mailer
                    .dispatch(
                        &state.pool,
                        Recipient {
                            profile_id: Some(owner.id),
                            email: &owner.email,
                            name: &owner.full_name,
                        },
                        EmailCategory::NewMessage,
                        &detail,
                    )
                    .await;
            }
            if let Err(e) = NotificationRepo::create(
                &state.pool,
                ctx.owner_profile_id,
                EmailCategory::NewMessage.as_str(),
                &detail,
            )
            .await
            {
                tracing::error!(error = %e, "Failed to create message notification");
            }
        }
        Participant::Vendor => {
            state
                .mailer
                .dispatch(
                    &state.pool,
                    Recipient {
                        profile_id: ctx.customer_profile_id,
                        email: &ctx.customer_email,
                        name: &ctx.customer_name,
                    },
                    EmailCategory::NewMessage,
                    &detail,
                )
                .await;
            if let Some(customer_id) = ctx.customer_profile_id {
                if let Err(e) = NotificationRepo::create(
                    &state.pool,
                    customer_id,
                    EmailCategory::NewMessage.as_str(),
                    &detail,
                )
                .await
                {
                    tracing::error!(error = %e, "Failed to create message notification");
                }
            }
        }
    }

    Ok((StatusCode::CREATED, Json(DataResponse::new(message))))
}

/// Request body for `POST /messages/read`.
#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub vendor_lead_id: DbId,
}

/// POST /api/v1/messages/read
///
/// Mark the counterpart's messages in a thread as read. The caller's own
/// messages never flip.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<MarkReadRequest>,
) -> AppResult<impl IntoResponse> {
    authorize_participant(&state.pool, input.vendor_lead_id, &auth).await?;
    let updated =
        MessageRepo::mark_read(&state.pool, input.vendor_lead_id, auth.profile_id).await?;
    Ok(Json(DataResponse::new(
        serde_json::json!({ "marked_read": updated }),
    )))
}

/// GET /api/v1/messages/unread
///
/// Total unread messages addressed to the caller across all threads.
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let count = MessageRepo::unread_count(&state.pool, auth.profile_id).await?;
    Ok(Json(DataResponse::new(
        serde_json::json!({ "unread": count }),
    )))
}

/// GET /api/v1/conversations
///
/// The caller's inbox: every thread they participate in with last-message
/// preview and unread count, most recent activity first.
pub async fn list_conversations(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let conversations = MessageRepo::conversations(&state.pool, auth.profile_id).await?;
    Ok(Json(DataResponse::new(conversations)))
}
