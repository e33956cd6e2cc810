use auth::TokenKind;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use time::Duration;

/// Cookie name carrying the refresh token.
pub const REFRESH_COOKIE_NAME: &str = "jwt-refresh-token";

/// Build the httpOnly refresh-token cookie.
///
/// Lives as long as the refresh token itself and is only ever sent back to
/// this site over TLS.
pub fn refresh_cookie(token: impl Into<String>) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE_NAME, token.into()))
        .path("/")
        .secure(true)
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(TokenKind::REFRESH_LIFETIME_SECONDS))
        .build()
}
