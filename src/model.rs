/// Portal coordinates plus the credentials used to open a session. Kept by
/// the caller, so the credentials stay available for a later re-login.
#[derive(Debug, Clone)]
pub struct Portal {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

/// An authenticated portal session. The session cookies set by the login
/// response are opaque; they live in the client's cookie store and ride
/// along on every request.
///
/// Not synchronized for concurrent use. Callers that want to issue requests
/// from several tasks should hold one session per task or wrap this in a
/// mutex of their own.
#[derive(Debug)]
pub struct LoggedInPortal {
    pub base_url: String,
    pub client: reqwest::Client,
}
