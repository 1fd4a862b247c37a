use std::fmt;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "asciify_session";

const SESSION_ID_LEN: usize = 24;

/// Browser session identifier
///
/// Always 24 ASCII alphanumerics, so it is safe to use as a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        use rand::Rng;
        let id: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(SESSION_ID_LEN)
            .map(char::from)
            .collect();
        Self(id)
    }

    /// Accept a client-supplied id only if it has the generated shape
    pub fn parse(s: &str) -> Option<Self> {
        let valid = s.len() == SESSION_ID_LEN && s.bytes().all(|b| b.is_ascii_alphanumeric());
        valid.then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Set-Cookie` value binding this id to the browser session
    pub fn cookie(&self) -> String {
        format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
