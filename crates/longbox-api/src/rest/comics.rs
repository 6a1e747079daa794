// Comic list endpoints
//
// Page loads are POSTs carrying the full filter/sort/paging parameter
// block; the response bundles the page, counts, cover-date facets, and
// the caller's last-read entries for the returned comics.

use tracing::debug;

use crate::error::Error;
use crate::rest::client::LibraryClient;
use crate::rest::models::{LastReadRecord, LoadComicsRequest, LoadComicsResponse};

impl LibraryClient {
    /// Load one page of the comic list under the given filter.
    ///
    /// `POST /api/library/comics`
    pub async fn load_comics(
        &self,
        request: &LoadComicsRequest,
    ) -> Result<LoadComicsResponse, Error> {
        let url = self.api_url("library/comics")?;
        debug!(
            page_size = request.page_size,
            page_index = request.page_index,
            "loading comic page"
        );
        self.post(url, request).await
    }

    /// Load the caller's complete last-read list.
    ///
    /// `GET /api/library/last-read`
    pub async fn load_last_read(&self) -> Result<Vec<LastReadRecord>, Error> {
        let url = self.api_url("library/last-read")?;
        self.get(url).await
    }
}
