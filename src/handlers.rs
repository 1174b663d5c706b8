use crate::auth::{expired_session_cookie, is_authenticated, session_cookie, session_token};
use crate::errors::AppError;
use crate::export::{daily_csv, monthly_csv, raw_csv, ExportKind};
use crate::filter::criteria_from_query;
use crate::models::{LoginForm, OptionsResponse, ViewModel, ViewQuery};
use crate::state::AppState;
use crate::ui::{render_dashboard, render_login};
use crate::view::render_view;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    if is_authenticated(&state, &headers).await {
        Html(render_dashboard())
    } else {
        Html(render_login(None))
    }
}

pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    if !state.authenticator.verify(&form.password) {
        warn!("rejected dashboard login");
        return (
            StatusCode::UNAUTHORIZED,
            Html(render_login(Some("Password incorrect"))),
        )
            .into_response();
    }

    let token = state.sessions.lock().await.issue();
    info!("dashboard session opened");
    (
        [(header::SET_COOKIE, session_cookie(&token))],
        Redirect::to("/"),
    )
        .into_response()
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.sessions.lock().await.revoke(token);
        info!("dashboard session closed");
    }
    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}

pub async fn get_options(State(state): State<AppState>) -> Result<Json<OptionsResponse>, AppError> {
    let dataset = state.dataset().await?;
    Ok(Json(dataset.options()))
}

pub async fn get_view(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ViewModel>, AppError> {
    let dataset = state.dataset().await?;
    let criteria = criteria_from_query(&query, &dataset)?;
    Ok(Json(render_view(&dataset, &criteria)?))
}

pub async fn export(
    State(state): State<AppState>,
    Path(kind): Path<ExportKind>,
    Query(query): Query<ViewQuery>,
) -> Result<Response, AppError> {
    let dataset = state.dataset().await?;
    let criteria = criteria_from_query(&query, &dataset)?;
    let view = render_view(&dataset, &criteria)?;

    let body = match kind {
        ExportKind::Daily => daily_csv(&view.daily)?,
        ExportKind::Monthly => monthly_csv(&view.monthly)?,
        ExportKind::Raw => raw_csv(&view.records)?,
    };
    let file_name = kind.file_name(&view.selection);
    info!(file = %file_name, bytes = body.len(), "exported csv");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response())
}
