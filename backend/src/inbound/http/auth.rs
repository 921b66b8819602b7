//! Bearer-token helpers used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! `Authorization` header parsing here. Verifying the token is the
//! [`LoginService`](crate::domain::ports::LoginService)'s job.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::Error;

use super::ApiResult;

const BEARER_PREFIX: &str = "Bearer ";

/// Raw bearer token presented in the `Authorization` header.
pub struct BearerToken(String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Pull the bearer token out of the request headers.
pub fn bearer_token(headers: &HeaderMap) -> ApiResult<BearerToken> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let token = value
        .get(..BEARER_PREFIX.len())
        .filter(|scheme| scheme.eq_ignore_ascii_case(BEARER_PREFIX))
        .map(|_| value[BEARER_PREFIX.len()..].trim())
        .ok_or_else(|| Error::unauthorized("authorization scheme must be Bearer"))?;
    if token.is_empty() {
        return Err(Error::unauthorized("missing bearer token"));
    }
    Ok(BearerToken(token.to_owned()))
}

impl FromRequest for BearerToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(bearer_token(req.headers()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::http::header::HeaderValue;
    use rstest::rstest;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    fn a_request_carrying_a_bearer_token() -> HeaderMap {
        headers_with("Bearer abc.def.ghi")
    }

    fn a_request_using_basic_auth() -> HeaderMap {
        headers_with("Basic dXNlcjpwYXNz")
    }

    fn the_token_is_extracted(headers: HeaderMap) -> ApiResult<BearerToken> {
        bearer_token(&headers)
    }

    fn the_raw_token_is_returned(result: ApiResult<BearerToken>) {
        let token = result.expect("token extracted");
        assert_eq!(token.as_str(), "abc.def.ghi");
    }

    fn an_unauthorised_error_is_returned(result: ApiResult<BearerToken>) {
        let error = result.err().expect("should be an error");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn extraction_happy_path() {
        let headers = a_request_carrying_a_bearer_token();
        let result = the_token_is_extracted(headers);
        the_raw_token_is_returned(result);
    }

    #[rstest]
    fn extraction_rejects_other_schemes() {
        let headers = a_request_using_basic_auth();
        let result = the_token_is_extracted(headers);
        an_unauthorised_error_is_returned(result);
    }

    #[rstest]
    #[case("Bearer ")]
    #[case("Bearer    ")]
    #[case("Bear")]
    fn blank_or_truncated_tokens_are_rejected(#[case] value: &'static str) {
        an_unauthorised_error_is_returned(bearer_token(&headers_with(value)));
    }

    #[rstest]
    fn missing_header_is_rejected() {
        an_unauthorised_error_is_returned(bearer_token(&HeaderMap::new()));
    }

    #[rstest]
    fn scheme_is_case_insensitive() {
        let token = bearer_token(&headers_with("bearer xyz")).expect("token");
        assert_eq!(token.as_str(), "xyz");
    }
}
