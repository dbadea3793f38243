//! Route gating decisions.
//!
//! Decides whether a request may proceed, must be rewritten, redirected or
//! refused, based on the path, the negotiated content type and the session.
//! The HTTP middleware applies the decision; nothing here touches I/O.

use crate::domain::foundation::AuthenticatedUser;

const SIGN_IN: &str = "/sign-in";
const DEFAULT_AFTER_SIGN_IN: &str = "/app";

/// Outcome of gating a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Continue to the handler unchanged.
    Next,
    /// Serve the request as if it were for this path.
    Rewrite(String),
    /// Refuse with 401.
    Unauthorized,
    /// Redirect the browser to this location.
    Redirect(String),
}

/// The parts of a request the gate looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateRequest<'a> {
    pub path: &'a str,
    pub accept: Option<&'a str>,
    /// Decoded `callbackUrl` query parameter.
    pub callback_url: Option<&'a str>,
    pub session: Option<&'a AuthenticatedUser>,
}

/// Path-based access rules for the application shell.
#[derive(Debug, Clone, Default)]
pub struct RouteGate {
    super_admin_emails: Vec<String>,
}

impl RouteGate {
    pub fn new<I, S>(super_admin_emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            super_admin_emails: super_admin_emails
                .into_iter()
                .map(|email| email.as_ref().trim().to_lowercase())
                .filter(|email| !email.is_empty())
                .collect(),
        }
    }

    /// Applies the rules in order; the first that matches decides.
    pub fn decide(&self, request: &GateRequest<'_>) -> GateDecision {
        let path = request.path;

        if path == "/api/test-db" {
            return GateDecision::Next;
        }

        if let Some(rest) = path.strip_prefix("/docs/") {
            if !rest.is_empty() && request.accept.is_some_and(prefers_markdown) {
                return GateDecision::Rewrite(format!("/llms.mdx/{}", rest));
            }
        }

        let signed_in = request.session.is_some();

        if path.starts_with("/api/app/") && !signed_in {
            return GateDecision::Unauthorized;
        }

        if signed_in && (is_under(path, SIGN_IN) || is_under(path, "/sign-up")) {
            let target = request
                .callback_url
                .filter(|url| is_safe_callback(url))
                .unwrap_or(DEFAULT_AFTER_SIGN_IN);
            return GateDecision::Redirect(target.to_string());
        }

        if is_under(path, "/super-admin") && !self.is_super_admin(request.session) {
            return GateDecision::Redirect(format!("{}?error=unauthorized", SIGN_IN));
        }

        if is_under(path, "/app") && !signed_in {
            return GateDecision::Redirect(SIGN_IN.to_string());
        }

        GateDecision::Next
    }

    fn is_super_admin(&self, session: Option<&AuthenticatedUser>) -> bool {
        session.is_some_and(|user| {
            let email = user.email.trim().to_lowercase();
            self.super_admin_emails.iter().any(|admin| *admin == email)
        })
    }
}

/// `prefix` itself or a path below it, split on segment boundaries.
fn is_under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Relative in-app path that does not lead back to an auth page.
fn is_safe_callback(url: &str) -> bool {
    url.starts_with('/')
        && !url.starts_with("//")
        && !url.contains('\\')
        && !url.starts_with(SIGN_IN)
        && !url.starts_with("/sign-up")
}

/// True when the Accept header ranks markdown above HTML.
///
/// Ties on quality go to whichever type is listed first.
pub fn prefers_markdown(accept: &str) -> bool {
    let mut markdown: Option<(f32, usize)> = None;
    let mut html: Option<(f32, usize)> = None;

    for (position, entry) in accept.split(',').enumerate() {
        let mut parts = entry.split(';');
        let media_type = parts.next().unwrap_or("").trim().to_ascii_lowercase();
        let quality = parts
            .filter_map(|param| param.trim().strip_prefix("q="))
            .find_map(|q| q.trim().parse::<f32>().ok())
            .unwrap_or(1.0);

        let slot = match media_type.as_str() {
            "text/markdown" | "text/x-markdown" => &mut markdown,
            "text/html" => &mut html,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some((quality, position));
        }
    }

    match (markdown, html) {
        (Some((q, _)), _) if q <= 0.0 => false,
        (Some(_), None) => true,
        (Some((mq, mpos)), Some((hq, hpos))) => mq > hq || (mq == hq && mpos < hpos),
        (None, _) => false,
    }
}
