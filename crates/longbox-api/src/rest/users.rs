// User administration endpoints

use crate::error::Error;
use crate::rest::client::LibraryClient;
use crate::rest::models::UserRecord;

impl LibraryClient {
    /// List every account on the server. Requires an admin token.
    ///
    /// `GET /api/users`
    pub async fn load_users(&self) -> Result<Vec<UserRecord>, Error> {
        let url = self.api_url("users")?;
        self.get(url).await
    }
}
