use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteConnection;
use std::fmt;

use crate::db;
use crate::error::ApiError;
use crate::models::{MatchStatus, NewMatch};
use crate::routes::parse_body;
use crate::state::AppState;

/// Query parameters for the admin endpoint
#[derive(Deserialize)]
pub struct AdminQuery {
    /// Target resource, e.g. `teams`, `teams/4`, `matches/9/status`
    #[serde(default)]
    pub path: Option<String>,
}

/// `{resource}[/{id}[/{action}]]`
#[derive(Debug, PartialEq, Eq)]
pub struct AdminPath<'a> {
    pub resource: &'a str,
    pub id: Option<i64>,
    pub action: Option<&'a str>,
}

pub fn parse_path(raw: &str) -> Result<AdminPath<'_>, ApiError> {
    let mut parts = raw.split('/').filter(|p| !p.is_empty());

    let resource = parts.next().ok_or_else(|| ApiError::InvalidPath {
        received: raw.to_string(),
    })?;

    // Only a non-zero all-digit segment is an id; anything else leaves it unset.
    let id = parts
        .next()
        .filter(|seg| seg.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|seg| seg.parse().ok())
        .filter(|id: &i64| *id != 0);

    Ok(AdminPath {
        resource,
        id,
        action: parts.next(),
    })
}

#[derive(Deserialize)]
struct TeamBody {
    #[serde(default)]
    name: Option<String>,
}

impl TeamBody {
    fn validate(self) -> Result<String, ApiError> {
        match self.name.map(|n| n.trim().to_string()) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(ApiError::BadRequest("Name is required".to_string())),
        }
    }
}

/// A team given either by id or by name
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum TeamRef {
    Id(i64),
    Name(String),
}

impl fmt::Display for TeamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamRef::Id(id) => write!(f, "{}", id),
            TeamRef::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchBody {
    #[serde(default)]
    home_team: Option<TeamRef>,
    #[serde(default)]
    away_team: Option<TeamRef>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    twitch_channel: Option<String>,
}

#[derive(Debug, PartialEq)]
struct MatchFields {
    home_team: TeamRef,
    away_team: TeamRef,
    date: String,
    time: String,
    twitch_channel: Option<String>,
}

impl MatchBody {
    fn validate(self) -> Result<MatchFields, ApiError> {
        fn present(s: Option<String>) -> Option<String> {
            s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        }
        fn present_team(t: Option<TeamRef>) -> Option<TeamRef> {
            match t {
                Some(TeamRef::Name(name)) => present(Some(name)).map(TeamRef::Name),
                other => other,
            }
        }

        let fields = (
            present_team(self.home_team),
            present_team(self.away_team),
            present(self.date),
            present(self.time),
        );

        match fields {
            (Some(home_team), Some(away_team), Some(date), Some(time)) => Ok(MatchFields {
                home_team,
                away_team,
                date,
                time,
                twitch_channel: present(self.twitch_channel),
            }),
            _ => Err(ApiError::BadRequest("All fields are required".to_string())),
        }
    }
}

#[derive(Serialize)]
struct TeamResponse {
    id: i64,
    name: String,
}

#[derive(Serialize)]
struct IdResponse {
    id: i64,
}

#[derive(Serialize)]
struct StatusResponse {
    id: i64,
    status: MatchStatus,
}

#[derive(Serialize)]
struct DeletedResponse {
    deleted: bool,
}

/// ANY /api/admin?path=... - Team and match management
pub async fn handle_admin(
    State(state): State<AppState>,
    method: Method,
    Query(params): Query<AdminQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }

    let mut conn = state.acquire().await?;

    let raw_path = params.path.unwrap_or_default();
    let path = parse_path(&raw_path)?;

    match (path.resource, method.as_str(), path.id) {
        ("teams", "POST", _) => create_team(&mut conn, &body).await,
        ("teams", "PUT", Some(id)) => update_team(&mut conn, id, &body).await,
        ("teams", "DELETE", Some(id)) => {
            db::delete_team(&mut conn, id).await?;
            tracing::info!("Deleted team {}", id);
            Ok(deleted())
        }
        ("matches", "POST", _) => create_match(&mut conn, &body).await,
        ("matches", "PUT", Some(id)) if path.action == Some("status") => {
            update_match_status(&mut conn, id, &body).await
        }
        ("matches", "PUT", Some(id)) => replace_match(&mut conn, id, &body).await,
        ("matches", "DELETE", Some(id)) => {
            db::delete_match(&mut conn, id).await?;
            tracing::info!("Deleted match {}", id);
            Ok(deleted())
        }
        _ => Err(ApiError::NotFound),
    }
}

fn deleted() -> Response {
    (StatusCode::OK, Json(DeletedResponse { deleted: true })).into_response()
}

async fn create_team(conn: &mut SqliteConnection, body: &[u8]) -> Result<Response, ApiError> {
    let name = parse_body::<TeamBody>(body)?.validate()?;
    let id = db::insert_team(conn, &name).await?;
    tracing::info!("Created team {} ({})", id, name);

    Ok((StatusCode::CREATED, Json(TeamResponse { id, name })).into_response())
}

async fn update_team(
    conn: &mut SqliteConnection,
    id: i64,
    body: &[u8],
) -> Result<Response, ApiError> {
    let name = parse_body::<TeamBody>(body)?.validate()?;
    db::rename_team(conn, id, &name).await?;
    tracing::info!("Renamed team {} to {}", id, name);

    Ok((StatusCode::OK, Json(TeamResponse { id, name })).into_response())
}

async fn create_match(conn: &mut SqliteConnection, body: &[u8]) -> Result<Response, ApiError> {
    let fields = parse_body::<MatchBody>(body)?.validate()?;
    let new = resolve_match(conn, fields).await?;
    let id = db::insert_match(conn, &new).await?;
    tracing::info!("Created match {} ({} vs {})", id, new.home_team_id, new.away_team_id);

    Ok((StatusCode::CREATED, Json(IdResponse { id })).into_response())
}

async fn replace_match(
    conn: &mut SqliteConnection,
    id: i64,
    body: &[u8],
) -> Result<Response, ApiError> {
    let fields = parse_body::<MatchBody>(body)?.validate()?;
    let new = resolve_match(conn, fields).await?;
    db::replace_match(conn, id, &new).await?;
    tracing::info!("Updated match {}", id);

    Ok((StatusCode::OK, Json(IdResponse { id })).into_response())
}

#[derive(Deserialize)]
struct StatusBody {
    #[serde(default)]
    status: Option<String>,
}

async fn update_match_status(
    conn: &mut SqliteConnection,
    id: i64,
    body: &[u8],
) -> Result<Response, ApiError> {
    let status: MatchStatus = parse_body::<StatusBody>(body)?
        .status
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ApiError::BadRequest("Invalid status".to_string()))?;

    db::set_match_status(conn, id, status).await?;
    tracing::info!("Match {} is now {}", id, status);

    Ok((StatusCode::OK, Json(StatusResponse { id, status })).into_response())
}

async fn resolve_match(
    conn: &mut SqliteConnection,
    fields: MatchFields,
) -> Result<NewMatch, ApiError> {
    let home_team_id = resolve_team(conn, &fields.home_team).await?;
    let away_team_id = resolve_team(conn, &fields.away_team).await?;

    if home_team_id == away_team_id {
        return Err(ApiError::BadRequest(
            "homeTeam and awayTeam must be different teams".to_string(),
        ));
    }

    Ok(NewMatch {
        home_team_id,
        away_team_id,
        date: fields.date,
        time: fields.time,
        twitch_channel: fields.twitch_channel,
    })
}

/// Look a team up by id or exact name. A numeric string that names no team
/// is tried as an id.
async fn resolve_team(
    conn: &mut SqliteConnection,
    team: &TeamRef,
) -> Result<i64, ApiError> {
    let found = match team {
        TeamRef::Id(id) => db::get_team_by_id(conn, *id).await?,
        TeamRef::Name(name) => match db::get_team_by_name(conn, name).await? {
            Some(t) => Some(t),
            None => match name.parse::<i64>() {
                Ok(id) => db::get_team_by_id(conn, id).await?,
                Err(_) => None,
            },
        },
    };

    found
        .map(|t| t.id)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown team: {}", team)))
}
