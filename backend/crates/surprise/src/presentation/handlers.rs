//! HTTP Handlers

use crate::application::config::SurpriseConfig;
use crate::application::drive_experience::DriveExperienceUseCase;
use crate::application::generate_link::{GenerateLinkInput, GenerateLinkUseCase};
use crate::application::session::SessionSnapshot;
use crate::application::session_store::SessionStore;
use crate::application::start_experience::StartExperienceUseCase;
use crate::application::watch_experience::WatchExperienceUseCase;
use crate::domain::entity::link_request::ValidationError;
use crate::domain::entity::surprise_parameters::SurpriseParameters;
use crate::domain::experience::Command;
use crate::error::{SurpriseError, SurpriseResult};
use crate::presentation::dto::{
    AdminForm, CommandResponse, CreateLinkRequest, CreateLinkResponse, ExperienceQuery,
    HealthResponse, UnlockRequest,
};
use crate::presentation::page;
use crate::presentation::view::{ExperienceView, render};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use futures::Stream;
use kernel::error::app_error::AppError;
use kernel::id::ExperienceId;
use platform::clock::Clock;
use std::sync::Arc;

/// Shared state for surprise handlers
#[derive(Clone)]
pub struct SurpriseAppState<S>
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub config: Arc<SurpriseConfig>,
    pub clock: Arc<dyn Clock>,
    /// Origin generated links point at. Derived from the request when unset.
    pub public_origin: Option<String>,
}

/// GET /?name&code&date
pub async fn experience_entry<S>(
    State(state): State<SurpriseAppState<S>>,
    Query(query): Query<ExperienceQuery>,
) -> SurpriseResult<Html<String>>
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    let params = match SurpriseParameters::from_query(
        query.name.as_deref(),
        query.code.as_deref(),
        query.date.as_deref(),
    ) {
        Ok(params) => params,
        Err(missing) => {
            tracing::info!(
                missing_code = missing.code,
                missing_date = missing.date,
                "Incomplete surprise link"
            );
            return Ok(Html(page::fallback_page()));
        }
    };

    let use_case =
        StartExperienceUseCase::new(state.store.clone(), state.config.clone(), state.clock.clone());
    let output = use_case.execute(params).await?;

    let html =
        page::experience_page(output.id, &render(&output.snapshot)).map_err(AppError::from)?;
    Ok(Html(html))
}

/// GET /admin
pub async fn admin_form() -> Html<String> {
    Html(page::admin_form_page(&AdminForm::default(), None))
}

/// POST /admin
pub async fn admin_submit<S>(
    State(state): State<SurpriseAppState<S>>,
    headers: HeaderMap,
    Form(form): Form<AdminForm>,
) -> Response
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    let input = GenerateLinkInput {
        request: form.to_request(),
        origin: resolve_origin(state.public_origin.as_deref(), &headers),
        clock: form.operator_clock(),
    };

    match GenerateLinkUseCase::new().execute(input) {
        Ok(link) => Html(page::admin_result_page(&form.to_request(), &link)).into_response(),
        Err(SurpriseError::Validation(err)) => {
            tracing::debug!(error = %err, "Link form rejected");
            let notice = match &err {
                ValidationError::MissingFields(_) => format!("{err}. Please fill in all fields"),
                _ => err.to_string(),
            };
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(page::admin_form_page(&form, Some(&notice))),
            )
                .into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// POST /api/links
pub async fn create_link<S>(
    State(state): State<SurpriseAppState<S>>,
    headers: HeaderMap,
    Json(req): Json<CreateLinkRequest>,
) -> SurpriseResult<Json<CreateLinkResponse>>
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    let (request, clock) = req.split();
    let input = GenerateLinkInput {
        request,
        origin: resolve_origin(state.public_origin.as_deref(), &headers),
        clock,
    };

    let link = GenerateLinkUseCase::new().execute(input)?;

    Ok(Json(CreateLinkResponse {
        link: link.url,
        target_instant: link.target_instant.to_iso_string(),
    }))
}

/// GET /api/experience/{id}
pub async fn get_experience<S>(
    State(state): State<SurpriseAppState<S>>,
    Path(id): Path<ExperienceId>,
) -> SurpriseResult<Json<ExperienceView>>
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    let use_case = WatchExperienceUseCase::new(state.store.clone());
    let snapshot = use_case.snapshot(id).await?;
    Ok(Json(render(&snapshot)))
}

/// GET /api/experience/{id}/events
pub async fn experience_events<S>(
    State(state): State<SurpriseAppState<S>>,
    Path(id): Path<ExperienceId>,
) -> SurpriseResult<Sse<impl Stream<Item = Result<Event, axum::Error>>>>
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    let use_case = WatchExperienceUseCase::new(state.store.clone());
    let mut subscription = use_case.attach(id).await?;

    let stream = async_stream::stream! {
        let current = subscription.current();
        yield snapshot_event(&current);

        while let Some(snapshot) = subscription.changed().await {
            yield snapshot_event(&snapshot);
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// POST /api/experience/{id}/unlock
pub async fn unlock<S>(
    State(state): State<SurpriseAppState<S>>,
    Path(id): Path<ExperienceId>,
    Json(req): Json<UnlockRequest>,
) -> SurpriseResult<Json<CommandResponse>>
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    drive(&state, id, Command::SubmitCode(req.code)).await
}

/// POST /api/experience/{id}/open-gift
pub async fn open_gift<S>(
    State(state): State<SurpriseAppState<S>>,
    Path(id): Path<ExperienceId>,
) -> SurpriseResult<Json<CommandResponse>>
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    drive(&state, id, Command::OpenGift).await
}

/// POST /api/experience/{id}/advance
pub async fn advance<S>(
    State(state): State<SurpriseAppState<S>>,
    Path(id): Path<ExperienceId>,
) -> SurpriseResult<Json<CommandResponse>>
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    drive(&state, id, Command::Advance).await
}

/// GET /healthz
pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn drive<S>(
    state: &SurpriseAppState<S>,
    id: ExperienceId,
    command: Command,
) -> SurpriseResult<Json<CommandResponse>>
where
    S: SessionStore + Clone + Send + Sync + 'static,
{
    let use_case = DriveExperienceUseCase::new(state.store.clone());
    let report = use_case.execute(id, command).await?;
    Ok(Json(report.into()))
}

fn snapshot_event(snapshot: &SessionSnapshot) -> Result<Event, axum::Error> {
    Event::default()
        .event("snapshot")
        .json_data(render(snapshot))
}

/// `PUBLIC_ORIGIN` when configured, otherwise the origin the request was
/// addressed to.
fn resolve_origin(public_origin: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(origin) = public_origin {
        return origin.trim_end_matches('/').to_string();
    }

    let scheme = header_value(headers, "x-forwarded-proto").unwrap_or("http");
    let host = header_value(headers, header::HOST.as_str()).unwrap_or("localhost");
    format!("{scheme}://{host}")
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_origin_prefers_configuration() {
        let headers = HeaderMap::new();
        assert_eq!(
            resolve_origin(Some("https://surprise.example/"), &headers),
            "https://surprise.example"
        );
    }

    #[test]
    fn test_origin_from_request_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("party.local:31113"));
        assert_eq!(resolve_origin(None, &headers), "http://party.local:31113");

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(resolve_origin(None, &headers), "https://party.local:31113");
    }

    #[test]
    fn test_origin_without_host() {
        assert_eq!(resolve_origin(None, &HeaderMap::new()), "http://localhost");
    }
}
