use sqlx::sqlite::{SqliteConnection, SqlitePool};
use crate::models::*;

const CREATE_TEAMS: &str = r#"
    CREATE TABLE IF NOT EXISTS teams (
        id   INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL CHECK (name <> '')
    )"#;

const CREATE_MATCHES: &str = r#"
    CREATE TABLE IF NOT EXISTS matches (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        home_team_id   INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
        away_team_id   INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
        match_date     TEXT NOT NULL,
        match_time     TEXT NOT NULL,
        status         TEXT NOT NULL DEFAULT 'upcoming'
                       CHECK (status IN ('upcoming', 'live', 'finished')),
        home_score     INTEGER,
        away_score     INTEGER,
        twitch_channel TEXT
    )"#;

/// Create the league tables if they don't exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_TEAMS).execute(pool).await?;
    sqlx::query(CREATE_MATCHES).execute(pool).await?;
    Ok(())
}

// Team queries
pub async fn get_all_teams(conn: &mut SqliteConnection) -> Result<Vec<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"SELECT id, name FROM teams ORDER BY name"#
    )
    .fetch_all(conn)
    .await
}

pub async fn get_team_by_id(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"SELECT id, name FROM teams WHERE id = ?"#
    )
    .bind(team_id)
    .fetch_optional(conn)
    .await
}

pub async fn get_team_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"SELECT id, name FROM teams WHERE name = ? ORDER BY id LIMIT 1"#
    )
    .bind(name)
    .fetch_optional(conn)
    .await
}

pub async fn insert_team(conn: &mut SqliteConnection, name: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"INSERT INTO teams (name) VALUES (?) RETURNING id"#
    )
    .bind(name)
    .fetch_one(conn)
    .await
}

pub async fn rename_team(
    conn: &mut SqliteConnection,
    team_id: i64,
    name: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(r#"UPDATE teams SET name = ? WHERE id = ?"#)
        .bind(name)
        .bind(team_id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn delete_team(conn: &mut SqliteConnection, team_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(r#"DELETE FROM teams WHERE id = ?"#)
        .bind(team_id)
        .execute(conn)
        .await?;
    Ok(())
}

// Match queries
pub async fn get_all_matches(conn: &mut SqliteConnection) -> Result<Vec<MatchRow>, sqlx::Error> {
    sqlx::query_as::<_, MatchRow>(
        r#"SELECT
               m.id,
               m.match_date,
               m.match_time,
               ht.name AS home_team,
               at.name AS away_team,
               m.status,
               m.home_score,
               m.away_score,
               m.twitch_channel
           FROM matches m
           JOIN teams ht ON m.home_team_id = ht.id
           JOIN teams at ON m.away_team_id = at.id
           ORDER BY m.match_date DESC, m.match_time DESC"#
    )
    .fetch_all(conn)
    .await
}

pub async fn get_finished_matches(
    conn: &mut SqliteConnection,
) -> Result<Vec<FinishedMatch>, sqlx::Error> {
    sqlx::query_as::<_, FinishedMatch>(
        r#"SELECT home_team_id, away_team_id, home_score, away_score
           FROM matches
           WHERE status = 'finished'"#
    )
    .fetch_all(conn)
    .await
}

/// Teams in insertion order, the base order for standings ties.
pub async fn get_teams_by_id(conn: &mut SqliteConnection) -> Result<Vec<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"SELECT id, name FROM teams ORDER BY id"#
    )
    .fetch_all(conn)
    .await
}

pub async fn insert_match(conn: &mut SqliteConnection, new: &NewMatch) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"INSERT INTO matches
               (home_team_id, away_team_id, match_date, match_time, status, twitch_channel)
           VALUES (?, ?, ?, ?, 'upcoming', ?)
           RETURNING id"#
    )
    .bind(new.home_team_id)
    .bind(new.away_team_id)
    .bind(&new.date)
    .bind(&new.time)
    .bind(&new.twitch_channel)
    .fetch_one(conn)
    .await
}

pub async fn replace_match(
    conn: &mut SqliteConnection,
    match_id: i64,
    new: &NewMatch,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"UPDATE matches
           SET home_team_id = ?, away_team_id = ?, match_date = ?, match_time = ?,
               twitch_channel = ?
           WHERE id = ?"#
    )
    .bind(new.home_team_id)
    .bind(new.away_team_id)
    .bind(&new.date)
    .bind(&new.time)
    .bind(&new.twitch_channel)
    .bind(match_id)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn set_match_status(
    conn: &mut SqliteConnection,
    match_id: i64,
    status: MatchStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query(r#"UPDATE matches SET status = ? WHERE id = ?"#)
        .bind(status.as_str())
        .bind(match_id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn set_match_score(
    conn: &mut SqliteConnection,
    update: &ScoreUpdate,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"UPDATE matches
           SET home_score = ?, away_score = ?, status = ?
           WHERE id = ?"#
    )
    .bind(update.home_score)
    .bind(update.away_score)
    .bind(update.status.as_str())
    .bind(update.match_id)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn delete_match(conn: &mut SqliteConnection, match_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(r#"DELETE FROM matches WHERE id = ?"#)
        .bind(match_id)
        .execute(conn)
        .await?;
    Ok(())
}
