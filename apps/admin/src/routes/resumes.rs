//! Resume download and the public applicant form.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::{error, info, warn};

use crate::models::{ResumeImage, NO_RESUME};
use crate::state::AppState;
use crate::store::StoreError;
use crate::upload::{read_submission, store_resume};

/// GET /download/:id
///
/// Errors are plain text: this route is opened directly by the browser.
pub async fn handle_download(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.documents.fetch(&id).await {
        Ok(doc) => attachment(&doc),
        Err(StoreError::NotFound) => (StatusCode::NOT_FOUND, "파일 없음").into_response(),
        Err(e) => {
            error!("Download of {id} failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "다운로드 오류").into_response()
        }
    }
}

fn attachment(doc: &ResumeImage) -> Response {
    let body = match doc.decode() {
        Ok(body) => body,
        Err(e) => {
            error!("Resume {} has a corrupt payload: {e}", doc.id);
            return (StatusCode::INTERNAL_SERVER_ERROR, "다운로드 오류").into_response();
        }
    };

    let disposition = format!(
        "attachment; filename*=UTF-8''{}",
        encode_uri_component(&doc.filename)
    );
    let disposition =
        HeaderValue::from_str(&disposition).unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    let content_type = HeaderValue::from_str(&doc.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

/// Characters JavaScript's `encodeURIComponent` leaves alone, which is what
/// RFC 5987 `filename*` expects.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// POST /submit
///
/// Stores the resume first, then the applicant row. Answers with a small
/// script so the plain HTML form gets an alert and a redirect.
pub async fn handle_submit(State(state): State<AppState>, multipart: Multipart) -> Response {
    let submission = match read_submission(multipart).await {
        Ok(submission) => submission,
        Err(e) => {
            warn!("Rejected applicant form: {e}");
            return alert(e.status(), "잘못된 요청입니다.", false);
        }
    };

    let resume_id = match store_resume(state.documents.as_ref(), submission.resume.as_ref()).await
    {
        Ok(id) => id,
        Err(e) => {
            error!("Storing resume failed: {e}");
            return alert(
                StatusCode::INTERNAL_SERVER_ERROR,
                "이력서 저장 중 오류가 발생했습니다.",
                false,
            );
        }
    };

    let applicant = submission.into_applicant(resume_id);
    if let Err(e) = state.records.insert_applicant(&applicant).await {
        error!("Applicant insert failed: {e}");
        if applicant.resume_id != NO_RESUME {
            // The document store has no delete; the blob stays unreferenced.
            warn!("Resume {} is orphaned", applicant.resume_id);
        }
        return alert(
            StatusCode::INTERNAL_SERVER_ERROR,
            "지원 중 오류가 발생했습니다.",
            false,
        );
    }

    info!("Application received from {}", applicant.name);
    alert(StatusCode::OK, "지원이 완료되었습니다!", true)
}

fn alert(status: StatusCode, message: &'static str, done: bool) -> Response {
    let next = if done { "location.href='/';" } else { "history.back();" };
    (
        status,
        Html(format!("<script>alert('{message}'); {next}</script>")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_matches_encode_uri_component() {
        assert_eq!(encode_uri_component("resume.pdf"), "resume.pdf");
        assert_eq!(encode_uri_component("my cv (1).pdf"), "my%20cv%20(1).pdf");
        assert_eq!(encode_uri_component("이력서.pdf"), "%EC%9D%B4%EB%A0%A5%EC%84%9C.pdf");
        assert_eq!(encode_uri_component("a;b\"c"), "a%3Bb%22c");
    }
}
