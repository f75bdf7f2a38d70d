/// Origins whose browser pages may read responses from this service.
pub const ACCEPTED_ORIGINS: &[&str] = &[
    "http://localhost:8080",
    "http://localhost:1234",
    "http://movies.com",
];

pub const ALLOWED_METHODS: &str = "GET, POST, PATCH, DELETE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    /// No `Origin` header. Same-origin or non-browser caller; nothing to echo.
    SameOrigin,
    /// Declared origin is on the allow-list and is echoed back verbatim.
    Allowed(String),
    /// Declared origin is not on the allow-list; no CORS headers are sent.
    Rejected,
}

impl CorsDecision {
    pub fn allow_origin(&self) -> Option<&str> {
        match self {
            CorsDecision::Allowed(origin) => Some(origin),
            CorsDecision::SameOrigin | CorsDecision::Rejected => None,
        }
    }

    pub fn is_allowed(&self) -> bool {
        !matches!(self, CorsDecision::Rejected)
    }
}

pub struct CorsService {
    accepted_origins: &'static [&'static str],
}

impl CorsService {
    pub const fn new(accepted_origins: &'static [&'static str]) -> Self {
        Self { accepted_origins }
    }

    pub fn decide(&self, origin: Option<&str>) -> CorsDecision {
        match origin {
            None => CorsDecision::SameOrigin,
            Some(origin) if self.accepted_origins.iter().any(|accepted| *accepted == origin) => {
                CorsDecision::Allowed(origin.to_owned())
            }
            Some(origin) => {
                log::debug!("origin `{origin}` is not accepted");
                CorsDecision::Rejected
            }
        }
    }
}

impl Default for CorsService {
    fn default() -> Self {
        Self::new(ACCEPTED_ORIGINS)
    }
}
