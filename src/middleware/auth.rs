use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Bearer-token gate for protected routes.
///
/// No `Authorization` header is a 401. A header whose credential fails
/// verification for any reason is a 403. On success the decoded
/// `TokenClaims` are inserted into the request extensions.
pub async fn require_bearer_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = headers.get(AUTHORIZATION).ok_or_else(|| {
        tracing::debug!("Rejected request without Authorization header");
        ApiError::unauthorized("Missing Authorization header")
    })?;

    let token = bearer_credential(header).ok_or_else(|| {
        tracing::debug!("Rejected malformed Authorization header");
        ApiError::forbidden("Malformed Authorization header")
    })?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        ApiError::forbidden(e.to_string())
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Second whitespace-separated word of the header, e.g. the token in
/// `Bearer <token>`. The scheme word itself is not checked.
pub fn bearer_credential(header: &HeaderValue) -> Option<&str> {
    header.to_str().ok()?.split_whitespace().nth(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_second_word() {
        let header = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(bearer_credential(&header), Some("abc.def.ghi"));
    }

    #[test]
    fn doubled_separator_still_yields_credential() {
        let header = HeaderValue::from_static("Bearer  abc.def.ghi");
        assert_eq!(bearer_credential(&header), Some("abc.def.ghi"));
    }

    #[test]
    fn scheme_alone_has_no_credential() {
        assert_eq!(bearer_credential(&HeaderValue::from_static("Bearer")), None);
        assert_eq!(bearer_credential(&HeaderValue::from_static("")), None);
    }

    #[test]
    fn extra_whitespace_is_tolerated() {
        let header = HeaderValue::from_static("Bearer    tok  trailing");
        assert_eq!(bearer_credential(&header), Some("tok"));
    }
}
