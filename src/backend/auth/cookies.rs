/**
 * Session Cookie
 *
 * Binds a browser to its server-side session through the `session_id`
 * cookie. The cookie carries only the opaque token.
 */

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::backend::auth::sessions::SessionToken;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "session_id";

/// Attributes applied to the session cookie
#[derive(Debug, Clone, Default)]
pub struct CookieSettings {
    /// Only send the cookie over HTTPS
    pub secure: bool,
    /// Cookie lifetime in seconds; `None` makes it a browser-session cookie
    pub max_age_secs: Option<i64>,
}

/// Cookie that binds the browser to `token`
pub fn session_cookie(token: &SessionToken, settings: &CookieSettings) -> Cookie<'static> {
    let mut builder = Cookie::build((SESSION_COOKIE, token.as_str().to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure);

    if let Some(secs) = settings.max_age_secs {
        builder = builder.max_age(time::Duration::seconds(secs));
    }

    builder.build()
}

/// Cookie that tells the browser to drop its session binding
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

/// Session token sent by the browser, if any
pub fn token_from_jar(jar: &CookieJar) -> Option<SessionToken> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().trim())
        .filter(|value| !value.is_empty())
        .map(SessionToken::from)
}
