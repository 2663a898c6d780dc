use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use tracing::{debug, error};

use super::domain::{first_values, EchoedValues, RawFields};
use super::schema::RecordKind;
use super::service::{SubmissionOutcome, SubmissionService};
use super::store::RecordStore;
use super::views::{form_path, render_form};
use crate::views::error_page;

/// Where browsers land after an accepted submission.
pub const CONFIRMATION_PATH: &str = "/thank-you";

/// Router builder exposing the application and contact forms.
pub fn intake_router<S>(service: Arc<SubmissionService<S>>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route(
            form_path(RecordKind::Application),
            get(application_form).post(submit_application::<S>),
        )
        .route(
            form_path(RecordKind::Contact),
            get(contact_form).post(submit_contact::<S>),
        )
        .with_state(service)
}

pub(crate) async fn application_form() -> Html<String> {
    Html(render_form(
        RecordKind::Application,
        &EchoedValues::default(),
        None,
    ))
}

pub(crate) async fn contact_form() -> Html<String> {
    Html(render_form(RecordKind::Contact, &EchoedValues::default(), None))
}

pub(crate) async fn submit_application<S>(
    State(service): State<Arc<SubmissionService<S>>>,
    form: Result<Form<FormPairs>, FormRejection>,
) -> Response
where
    S: RecordStore + 'static,
{
    let fields = posted_fields(RecordKind::Application, form);
    submit(service, RecordKind::Application, fields).await
}

pub(crate) async fn submit_contact<S>(
    State(service): State<Arc<SubmissionService<S>>>,
    form: Result<Form<FormPairs>, FormRejection>,
) -> Response
where
    S: RecordStore + 'static,
{
    let fields = posted_fields(RecordKind::Contact, form);
    submit(service, RecordKind::Contact, fields).await
}

type FormPairs = Vec<(String, String)>;

/// A body that is not a urlencoded form counts as an empty submission.
fn posted_fields(kind: RecordKind, form: Result<Form<FormPairs>, FormRejection>) -> RawFields {
    match form {
        Ok(Form(pairs)) => first_values(pairs),
        Err(rejection) => {
            debug!(kind = kind.label(), %rejection, "unreadable form body");
            RawFields::new()
        }
    }
}

async fn submit<S>(
    service: Arc<SubmissionService<S>>,
    kind: RecordKind,
    fields: RawFields,
) -> Response
where
    S: RecordStore + 'static,
{
    // Appends block on file io.
    let outcome = tokio::task::spawn_blocking(move || service.submit(kind, &fields)).await;

    match outcome {
        Ok(SubmissionOutcome::Persisted) => Redirect::to(CONFIRMATION_PATH).into_response(),
        Ok(SubmissionOutcome::Rejected { error, echoed }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(render_form(kind, &echoed, Some(&error))),
        )
            .into_response(),
        Ok(SubmissionOutcome::StorageFailed(_)) => storage_failure_response(),
        Err(join_error) => {
            error!(kind = kind.label(), error = %join_error, "submission task aborted");
            storage_failure_response()
        }
    }
}

fn storage_failure_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(error_page(
            "We could not save your submission. Please try again later.",
        )),
    )
        .into_response()
}
