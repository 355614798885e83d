// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;
use tokio::sync::Mutex;
use tracing::{error, info};

use courtmate_domain::{Event, EventId, Registration, Team, UserId, Versioned};
use courtmate_engine::{
    AcceptInviteRequest, AcceptInviteResponse, CreateEventRequest, CreateEventResponse,
    DissolveTeamRequest, DissolveTeamResponse, EngineError, RegisterRequest, RegisterResponse,
    SendInviteRequest, SendInviteResponse, WithdrawRequest, WithdrawResponse, accept_invite,
    create_event, dissolve_team, register, send_invite, withdraw,
};
use courtmate_notify::Notification;
use courtmate_persistence::{RecordStore, SqliteStore, StoreError};

/// Courtmate Server - HTTP server for the Courtmate registration system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the record store wrapped in a Mutex to allow safe
/// concurrent access.
#[derive(Clone)]
struct AppState {
    /// The record store backing the pairing engine.
    store: Arc<Mutex<SqliteStore>>,
}

/// API request for creating an event.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateEventApiRequest {
    /// The organizing user.
    organizer_id: String,
    /// Display title.
    title: String,
    /// Seat occupancy mode: `Players` or `Teams`.
    mode: String,
    /// Fixed capacity in seats.
    slots_available: u32,
    /// Scheduled start (ISO 8601).
    starts_at: String,
}

/// API request for registering a solo seat.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RegisterApiRequest {
    /// The registering user.
    user_id: String,
    /// Whether the seat is open to partner invites (Teams mode).
    #[serde(default)]
    looking_for_partner: bool,
}

/// API request for inviting a partner.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct InviteApiRequest {
    /// The inviting user.
    inviter_id: String,
    /// The invited user.
    invitee_id: String,
}

/// API request for accepting an invite.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AcceptApiRequest {
    /// The accepting user.
    acceptor_id: String,
    /// The notification that announced the invite, if acting from the feed.
    #[serde(skip_serializing_if = "Option::is_none")]
    notification_id: Option<String>,
}

/// API request for declining, cancelling, or leaving a team.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct DissolveApiRequest {
    /// The acting user.
    actor_id: String,
    /// The dissolution kind: `Decline`, `Leave`, or `Cancel`.
    action: String,
    /// The notification that announced the invite, if acting from the feed.
    #[serde(skip_serializing_if = "Option::is_none")]
    notification_id: Option<String>,
}

/// API request for withdrawing a seat.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct WithdrawApiRequest {
    /// The withdrawing user.
    user_id: String,
}

/// Serializable representation of an `Event` for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EventResponse {
    /// The event identifier.
    event_id: String,
    /// The organizing user.
    organizer_id: String,
    /// Display title.
    title: String,
    /// Seat occupancy mode.
    mode: String,
    /// Fixed capacity in seats.
    slots_available: u32,
    /// Number of confirmed seats.
    registrations_count: u32,
    /// Number of waitlisted seats.
    waitlist_count: u32,
    /// Scheduled start (ISO 8601).
    starts_at: String,
}

/// Serializable representation of a `Registration` for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegistrationResponse {
    /// The registration identifier.
    registration_id: String,
    /// The primary seat holder.
    player_id: String,
    /// The attached partner, if any.
    player2_id: Option<String>,
    /// Seat lifecycle status.
    status: String,
    /// Pairing state of the secondary slot.
    partner_status: String,
    /// The pairing record, when paired.
    team_id: Option<String>,
    /// Whether the seat is open to partner invites.
    looking_for_partner: bool,
    /// FIFO ordinal when waitlisted.
    waitlist_position: Option<u32>,
}

/// Serializable representation of a `Team` for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TeamResponse {
    /// The team identifier.
    team_id: String,
    /// The primary party.
    player1_id: String,
    /// The secondary party.
    player2_id: String,
    /// Whether the primary party has confirmed.
    player1_confirmed: bool,
    /// Whether the secondary party has confirmed.
    player2_confirmed: bool,
    /// Pairing lifecycle status.
    status: String,
    /// The seat registration this pairing occupies.
    registration_id: Option<String>,
}

/// API response for the event roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RosterResponse {
    /// The event with its counters.
    event: EventResponse,
    /// Live registrations, oldest first.
    registrations: Vec<RegistrationResponse>,
    /// Teams, oldest first.
    teams: Vec<TeamResponse>,
}

/// Serializable representation of a `Notification` for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NotificationResponse {
    /// The notification identifier.
    notification_id: String,
    /// What the notification announces.
    kind: String,
    /// Short headline.
    title: String,
    /// Body text.
    message: String,
    /// The event the announcement concerns.
    event_id: String,
    /// The team the announcement concerns, when one is involved.
    team_id: Option<String>,
    /// Whether the recipient has consumed it.
    read: bool,
    /// Creation timestamp (ISO 8601).
    created_at: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<EngineError> for HttpError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            EngineError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            EngineError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            EngineError::ConflictRetriesExhausted { .. } => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            EngineError::Store(store_err) => Self::from(store_err),
        }
    }
}

impl From<StoreError> for HttpError {
    fn from(err: StoreError) -> Self {
        error!(error = %err, "Store error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Store error: {err}"),
        }
    }
}

/// Formats a timestamp as ISO 8601 for a JSON response.
fn format_timestamp(value: OffsetDateTime) -> Result<String, HttpError> {
    value.format(&Iso8601::DEFAULT).map_err(|e| HttpError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: format!("Failed to format timestamp: {e}"),
    })
}

/// Parses an ISO 8601 timestamp from a request field.
fn parse_timestamp(value: &str) -> Result<OffsetDateTime, HttpError> {
    OffsetDateTime::parse(value, &Iso8601::DEFAULT).map_err(|e| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: format!("Invalid timestamp '{value}': {e}"),
    })
}

/// Converts an `Event` to an `EventResponse`.
fn event_to_response(event: &Event) -> Result<EventResponse, HttpError> {
    Ok(EventResponse {
        event_id: event.event_id.as_str().to_string(),
        organizer_id: event.organizer_id.as_str().to_string(),
        title: event.title.clone(),
        mode: event.mode.as_str().to_string(),
        slots_available: event.slots_available,
        registrations_count: event.registrations_count,
        waitlist_count: event.waitlist_count,
        starts_at: format_timestamp(event.starts_at)?,
    })
}

/// Converts a `Registration` to a `RegistrationResponse`.
fn registration_to_response(registration: &Registration) -> RegistrationResponse {
    RegistrationResponse {
        registration_id: registration.registration_id.as_str().to_string(),
        player_id: registration.player_id.as_str().to_string(),
        player2_id: registration
            .player2_id
            .as_ref()
            .map(|id| id.as_str().to_string()),
        status: registration.status.as_str().to_string(),
        partner_status: registration.partner_status.as_str().to_string(),
        team_id: registration
            .team_id
            .as_ref()
            .map(|id| id.as_str().to_string()),
        looking_for_partner: registration.looking_for_partner,
        waitlist_position: registration.waitlist_position,
    }
}

/// Converts a `Team` to a `TeamResponse`.
fn team_to_response(team: &Team) -> TeamResponse {
    TeamResponse {
        team_id: team.team_id.as_str().to_string(),
        player1_id: team.player1_id.as_str().to_string(),
        player2_id: team.player2_id.as_str().to_string(),
        player1_confirmed: team.player1_confirmed,
        player2_confirmed: team.player2_confirmed,
        status: team.status.as_str().to_string(),
        registration_id: team
            .registration_id
            .as_ref()
            .map(|id| id.as_str().to_string()),
    }
}

/// Converts a `Notification` to a `NotificationResponse`.
fn notification_to_response(
    notification: &Notification,
) -> Result<NotificationResponse, HttpError> {
    Ok(NotificationResponse {
        notification_id: notification.notification_id.as_str().to_string(),
        kind: notification.kind.as_str().to_string(),
        title: notification.title.clone(),
        message: notification.message.clone(),
        event_id: notification.event_id.as_str().to_string(),
        team_id: notification
            .team_id
            .as_ref()
            .map(|id| id.as_str().to_string()),
        read: notification.read,
        created_at: format_timestamp(notification.created_at)?,
    })
}

/// Handler for POST `/events` endpoint.
///
/// Creates a new event with zeroed counters.
async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEventApiRequest>,
) -> Result<Json<CreateEventResponse>, HttpError> {
    info!(
        organizer_id = %req.organizer_id,
        mode = %req.mode,
        slots = req.slots_available,
        "Handling create_event request"
    );

    let starts_at: OffsetDateTime = parse_timestamp(&req.starts_at)?;
    let request: CreateEventRequest = CreateEventRequest {
        organizer_id: req.organizer_id,
        title: req.title,
        mode: req.mode,
        slots_available: req.slots_available,
        starts_at,
    };

    let mut store = app_state.store.lock().await;
    let response: CreateEventResponse = create_event(&mut *store, &request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET `/events` endpoint.
///
/// Lists all events ordered by start time.
async fn handle_list_events(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<EventResponse>>, HttpError> {
    let mut store = app_state.store.lock().await;
    let events: Vec<Versioned<Event>> = store.list_events()?;
    drop(store);

    let response: Vec<EventResponse> = events
        .iter()
        .map(|event| event_to_response(&event.record))
        .collect::<Result<_, _>>()?;

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}` endpoint.
async fn handle_get_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<EventResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let event: Option<Versioned<Event>> = store.get_event(&EventId::new(event_id.clone()))?;
    drop(store);

    let event: Versioned<Event> = event.ok_or_else(|| HttpError {
        status: StatusCode::NOT_FOUND,
        message: format!("Event {event_id} does not exist"),
    })?;

    Ok(Json(event_to_response(&event.record)?))
}

/// Handler for GET `/events/{event_id}/roster` endpoint.
///
/// Returns the event with its live registrations and teams.
async fn handle_get_roster(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<RosterResponse>, HttpError> {
    let id: EventId = EventId::new(event_id.clone());

    let mut store = app_state.store.lock().await;
    let event: Option<Versioned<Event>> = store.get_event(&id)?;
    let Some(event) = event else {
        drop(store);
        return Err(HttpError {
            status: StatusCode::NOT_FOUND,
            message: format!("Event {event_id} does not exist"),
        });
    };
    let registrations: Vec<Versioned<Registration>> = store.registrations_for_event(&id)?;
    let teams: Vec<Versioned<Team>> = store.teams_for_event(&id)?;
    drop(store);

    Ok(Json(RosterResponse {
        event: event_to_response(&event.record)?,
        registrations: registrations
            .iter()
            .map(|registration| registration_to_response(&registration.record))
            .collect(),
        teams: teams.iter().map(|team| team_to_response(&team.record)).collect(),
    }))
}

/// Handler for GET `/events/{event_id}/free-agents` endpoint.
///
/// Lists confirmed seat holders open to partner invites.
async fn handle_get_free_agents(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<RegistrationResponse>>, HttpError> {
    let id: EventId = EventId::new(event_id);

    let mut store = app_state.store.lock().await;
    let registrations: Vec<Versioned<Registration>> = store.registrations_for_event(&id)?;
    drop(store);

    let free_agents: Vec<RegistrationResponse> = registrations
        .iter()
        .filter(|registration| registration.record.is_free_agent())
        .map(|registration| registration_to_response(&registration.record))
        .collect();

    Ok(Json(free_agents))
}

/// Handler for POST `/events/{event_id}/register` endpoint.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<RegisterApiRequest>,
) -> Result<Json<RegisterResponse>, HttpError> {
    info!(
        event_id = %event_id,
        user_id = %req.user_id,
        "Handling register request"
    );

    let request: RegisterRequest = RegisterRequest {
        user_id: req.user_id,
        event_id,
        looking_for_partner: req.looking_for_partner,
    };

    let mut store = app_state.store.lock().await;
    let response: RegisterResponse = register(&mut *store, &request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST `/registrations/{registration_id}/withdraw` endpoint.
async fn handle_withdraw(
    AxumState(app_state): AxumState<AppState>,
    Path(registration_id): Path<String>,
    Json(req): Json<WithdrawApiRequest>,
) -> Result<Json<WithdrawResponse>, HttpError> {
    info!(
        registration_id = %registration_id,
        user_id = %req.user_id,
        "Handling withdraw request"
    );

    let request: WithdrawRequest = WithdrawRequest {
        user_id: req.user_id,
        registration_id,
    };

    let mut store = app_state.store.lock().await;
    let response: WithdrawResponse = withdraw(&mut *store, &request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST `/events/{event_id}/invites` endpoint.
async fn handle_send_invite(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<InviteApiRequest>,
) -> Result<Json<SendInviteResponse>, HttpError> {
    info!(
        event_id = %event_id,
        inviter_id = %req.inviter_id,
        invitee_id = %req.invitee_id,
        "Handling send_invite request"
    );

    let request: SendInviteRequest = SendInviteRequest {
        inviter_id: req.inviter_id,
        event_id,
        invitee_id: req.invitee_id,
    };

    let mut store = app_state.store.lock().await;
    let response: SendInviteResponse = send_invite(&mut *store, &request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST `/teams/{team_id}/accept` endpoint.
async fn handle_accept_invite(
    AxumState(app_state): AxumState<AppState>,
    Path(team_id): Path<String>,
    Json(req): Json<AcceptApiRequest>,
) -> Result<Json<AcceptInviteResponse>, HttpError> {
    info!(
        team_id = %team_id,
        acceptor_id = %req.acceptor_id,
        "Handling accept_invite request"
    );

    let request: AcceptInviteRequest = AcceptInviteRequest {
        acceptor_id: req.acceptor_id,
        team_id,
        notification_id: req.notification_id,
    };

    let mut store = app_state.store.lock().await;
    let response: AcceptInviteResponse = accept_invite(&mut *store, &request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST `/teams/{team_id}/dissolve` endpoint.
async fn handle_dissolve_team(
    AxumState(app_state): AxumState<AppState>,
    Path(team_id): Path<String>,
    Json(req): Json<DissolveApiRequest>,
) -> Result<Json<DissolveTeamResponse>, HttpError> {
    info!(
        team_id = %team_id,
        actor_id = %req.actor_id,
        action = %req.action,
        "Handling dissolve_team request"
    );

    let request: DissolveTeamRequest = DissolveTeamRequest {
        actor_id: req.actor_id,
        team_id,
        action: req.action,
        notification_id: req.notification_id,
    };

    let mut store = app_state.store.lock().await;
    let response: DissolveTeamResponse = dissolve_team(&mut *store, &request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET `/users/{user_id}/notifications` endpoint.
///
/// Returns the user's notification feed, newest first.
async fn handle_get_notifications(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<NotificationResponse>>, HttpError> {
    let mut store = app_state.store.lock().await;
    let notifications: Vec<Versioned<Notification>> =
        store.notifications_for_user(&UserId::new(user_id))?;
    drop(store);

    let response: Vec<NotificationResponse> = notifications
        .iter()
        .map(|notification| notification_to_response(&notification.record))
        .collect::<Result<_, _>>()?;

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/events", post(handle_create_event))
        .route("/events", get(handle_list_events))
        .route("/events/{event_id}", get(handle_get_event))
        .route("/events/{event_id}/roster", get(handle_get_roster))
        .route("/events/{event_id}/free-agents", get(handle_get_free_agents))
        .route("/events/{event_id}/register", post(handle_register))
        .route(
            "/registrations/{registration_id}/withdraw",
            post(handle_withdraw),
        )
        .route("/events/{event_id}/invites", post(handle_send_invite))
        .route("/teams/{team_id}/accept", post(handle_accept_invite))
        .route("/teams/{team_id}/dissolve", post(handle_dissolve_team))
        .route(
            "/users/{user_id}/notifications",
            get(handle_get_notifications),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Courtmate Server");

    // Initialize the store (in-memory or file-based based on CLI argument)
    let store: SqliteStore = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqliteStore::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqliteStore::new_in_memory()?
    };

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(store)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
