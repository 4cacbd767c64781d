use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteConnection;

use crate::db;
use crate::error::ApiError;
use crate::models::{MatchStatus, ScheduleMatch, ScoreUpdate, Standing, Team};
use crate::routes::parse_body;
use crate::standings::compute_standings;
use crate::state::AppState;

/// Query parameters for the public league endpoint
#[derive(Deserialize)]
pub struct LeagueQuery {
    /// `standings` (default), `matches` or `teams`
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreBody {
    #[serde(default)]
    match_id: Option<i64>,
    #[serde(default)]
    home_score: Option<i64>,
    #[serde(default)]
    away_score: Option<i64>,
    #[serde(default)]
    status: Option<String>,
}

impl ScoreBody {
    fn validate(self) -> Result<ScoreUpdate, ApiError> {
        let match_id = self
            .match_id
            .filter(|id| *id != 0)
            .ok_or_else(|| ApiError::BadRequest("matchId is required".to_string()))?;

        let status = match self.status {
            Some(s) => s
                .parse::<MatchStatus>()
                .map_err(|_| ApiError::BadRequest("Invalid status".to_string()))?,
            None => MatchStatus::Finished,
        };

        if self.home_score.is_some() != self.away_score.is_some() {
            return Err(ApiError::BadRequest(
                "homeScore and awayScore must be set together".to_string(),
            ));
        }
        if self.home_score.unwrap_or(0) < 0 || self.away_score.unwrap_or(0) < 0 {
            return Err(ApiError::BadRequest("Scores must not be negative".to_string()));
        }

        Ok(ScoreUpdate {
            match_id,
            home_score: self.home_score,
            away_score: self.away_score,
            status,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreResponse {
    success: bool,
    match_id: i64,
}

/// ANY /api/league?action=... - Standings, schedule, teams and score updates
pub async fn handle_league(
    State(state): State<AppState>,
    method: Method,
    Query(params): Query<LeagueQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }

    if !state.is_configured() {
        return Err(ApiError::NotConfigured);
    }

    let mut conn = state.acquire().await?;

    match method.as_str() {
        "GET" => {
            let action = params.action.as_deref().unwrap_or("standings");
            match action {
                "standings" => Ok(Json(get_standings(&mut conn).await?).into_response()),
                "matches" => Ok(Json(get_matches(&mut conn).await?).into_response()),
                "teams" => Ok(Json(db::get_all_teams(&mut conn).await?).into_response()),
                _ => Err(ApiError::MethodNotAllowed),
            }
        }
        "PUT" => update_score(&mut conn, &body).await,
        _ => Err(ApiError::MethodNotAllowed),
    }
}

async fn get_standings(conn: &mut SqliteConnection) -> Result<Vec<Standing>, ApiError> {
    let teams: Vec<Team> = db::get_teams_by_id(conn).await?;
    let finished = db::get_finished_matches(conn).await?;

    Ok(compute_standings(&teams, &finished))
}

async fn get_matches(conn: &mut SqliteConnection) -> Result<Vec<ScheduleMatch>, ApiError> {
    let rows = db::get_all_matches(conn).await?;
    Ok(rows.iter().map(|r| r.to_schedule_match()).collect())
}

async fn update_score(conn: &mut SqliteConnection, body: &[u8]) -> Result<Response, ApiError> {
    let update = parse_body::<ScoreBody>(body)?.validate()?;
    db::set_match_score(conn, &update).await?;
    tracing::info!(
        "Match {} set to {:?}:{:?} ({})",
        update.match_id,
        update.home_score,
        update.away_score,
        update.status
    );

    Ok(Json(ScoreResponse {
        success: true,
        match_id: update.match_id,
    })
    .into_response())
}
