// Auth endpoints
//
// Token-based login. The server answers with `{ success, token, user }`;
// the token goes into the Authorization header of a fresh client built
// via `LibraryClient::with_token`.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::error::Error;
use crate::rest::client::LibraryClient;
use crate::rest::models::{LoginRequest, LoginResponse, UserRecord};

impl LibraryClient {
    /// Authenticate and obtain a bearer token.
    ///
    /// `POST /api/auth/login`
    ///
    /// A `success: false` answer is an authentication failure, not a
    /// generic remote rejection -- wrong credentials are the common case.
    pub async fn login(
        &self,
        login: &str,
        password: &SecretString,
    ) -> Result<(String, Option<UserRecord>), Error> {
        let url = self.api_url("auth/login")?;
        debug!(login, "logging in");

        let body = LoginRequest {
            login: login.to_owned(),
            password: password.expose_secret().to_owned(),
        };
        let resp: LoginResponse = self.post(url, &body).await?;

        if !resp.success {
            return Err(Error::Authentication {
                message: resp.error.unwrap_or_else(|| "invalid credentials".into()),
            });
        }

        let token = resp.token.ok_or_else(|| Error::Authentication {
            message: "server accepted the login but returned no token".into(),
        })?;

        Ok((token, resp.user))
    }

    /// Fetch the user the current token belongs to.
    ///
    /// `GET /api/auth/me`
    pub async fn current_user(&self) -> Result<UserRecord, Error> {
        let url = self.api_url("auth/me")?;
        self.get(url).await
    }
}
