//! Toast notifications carried across a redirect in a flash cookie.
//!
//! The cookie value is a URL-encoded query string
//! (`variant=..&title=..&description=..`). It lives for one minute and is
//! removed by the first page that renders it.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use url::form_urlencoded;

pub const TOAST_COOKIE: &str = "pina_toast";
const TOAST_MAX_AGE: Duration = Duration::seconds(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
    Info,
    Warning,
}

impl ToastVariant {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Destructive => "destructive",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }

    fn parse(raw: &str) -> Self {
        match raw {
            "destructive" => Self::Destructive,
            "info" => Self::Info,
            "warning" => Self::Warning,
            _ => Self::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub variant: ToastVariant,
    pub title: String,
    pub description: Option<String>,
}

impl Toast {
    fn new(variant: ToastVariant, title: &str, description: Option<&str>) -> Self {
        Self {
            variant,
            title: title.to_owned(),
            description: description.map(str::to_owned).filter(|d| !d.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn success(title: &str, description: Option<&str>) -> Self {
        Self::new(ToastVariant::Default, title, description)
    }

    #[must_use]
    pub fn error(title: &str, description: Option<&str>) -> Self {
        Self::new(ToastVariant::Destructive, title, description)
    }

    #[must_use]
    pub fn info(title: &str, description: Option<&str>) -> Self {
        Self::new(ToastVariant::Info, title, description)
    }

    #[must_use]
    pub fn warning(title: &str, description: Option<&str>) -> Self {
        Self::new(ToastVariant::Warning, title, description)
    }

    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        out.append_pair("variant", self.variant.as_str());
        out.append_pair("title", &self.title);
        if let Some(description) = &self.description {
            out.append_pair("description", description);
        }
        out.finish()
    }

    /// Inverse of [`Toast::encode`]. A value without a title is rejected.
    #[must_use]
    pub fn decode(raw: &str) -> Option<Self> {
        let mut variant = ToastVariant::Default;
        let mut title = None;
        let mut description = None;
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "variant" => variant = ToastVariant::parse(&value),
                "title" => title = Some(value.into_owned()),
                "description" => description = Some(value.into_owned()),
                _ => {}
            }
        }
        let title = title.filter(|t| !t.is_empty())?;
        Some(Self { variant, title, description })
    }
}

/// Queue `toast` for the next rendered page.
#[must_use]
pub fn set_flash(jar: CookieJar, toast: &Toast, secure: bool) -> CookieJar {
    let cookie = Cookie::build((TOAST_COOKIE, toast.encode()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(TOAST_MAX_AGE);
    jar.add(cookie)
}

/// Read and expire the pending toast, if any.
#[must_use]
pub fn take_flash(jar: CookieJar, secure: bool) -> (CookieJar, Option<Toast>) {
    let Some(raw) = jar.get(TOAST_COOKIE).map(|c| c.value().to_owned()) else {
        return (jar, None);
    };
    let expired = Cookie::build((TOAST_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO);
    (jar.add(expired), Toast::decode(&raw))
}

#[cfg(test)]
#[path = "toast_test.rs"]
mod tests;
