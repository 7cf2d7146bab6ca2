use crate::errors::AppError;
use crate::loader::load_band_csv;
use crate::models::{BandRecord, DailyPoint, Summary};
use crate::state::AppState;
use crate::stats::{group_daily, summarize};
use axum::{extract::State, response::Html, Json};
use std::io::ErrorKind;
use tokio::{fs, task};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    match fs::read_to_string(state.web_dir.join("index.html")).await {
        Ok(page) => Ok(Html(page)),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(AppError::not_found("index.html not found"))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn get_summary(State(state): State<AppState>) -> Result<Json<Summary>, AppError> {
    let records = load_records(&state).await?;
    Ok(Json(summarize(&records)))
}

pub async fn get_daily(State(state): State<AppState>) -> Result<Json<Vec<DailyPoint>>, AppError> {
    let records = load_records(&state).await?;
    Ok(Json(group_daily(&records)))
}

/// Re-reads the source on every call.
async fn load_records(state: &AppState) -> Result<Vec<BandRecord>, AppError> {
    let path = state.data_path.clone();
    let records = task::spawn_blocking(move || load_band_csv(path))
        .await
        .map_err(AppError::internal)??;
    Ok(records)
}
