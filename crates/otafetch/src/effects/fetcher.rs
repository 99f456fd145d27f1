use tracing::debug;
use url::Url;

use crate::core::is_redirect;
use crate::data::{MAX_REDIRECTS, TransferOptions};
use crate::effects::http::{HttpClient, HttpResponse};
use crate::error::FetchError;

/// Owns the connection lifecycle for one logical download, transparently
/// following HTTP redirects up to [`MAX_REDIRECTS`] hops.
pub struct Fetcher<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Open a connection to `url` and resolve redirects.
    ///
    /// The URL is validated before any network activity. Each redirect hop
    /// closes the current connection and reopens against the `Location`
    /// target (relative values are resolved against the current URL) with
    /// the same header set. The returned response always has status 200;
    /// any other final status is an error.
    pub async fn open(
        &self,
        url: &str,
        options: &TransferOptions,
    ) -> Result<HttpResponse<C::Error>, FetchError> {
        if url.trim().is_empty() {
            return Err(FetchError::InvalidUrl("Missing url parameter".into()));
        }
        let mut current =
            Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        let headers = options.request_headers();

        debug!(url = %current, "opening connection");
        let mut response = self.get(current.as_str(), &headers).await?;

        let mut hops = 0u32;
        while is_redirect(response.status) {
            if hops == MAX_REDIRECTS {
                return Err(FetchError::TooManyRedirects);
            }
            let location = response
                .location
                .take()
                .ok_or(FetchError::MalformedRedirect)?;
            // Close the current connection before opening the next hop.
            drop(response);

            current = current
                .join(&location)
                .map_err(|_| FetchError::MalformedRedirect)?;
            hops += 1;
            debug!(hop = hops, url = %current, "following redirect");
            response = self.get(current.as_str(), &headers).await?;
        }

        if response.status != 200 {
            return Err(FetchError::HttpStatus(response.status));
        }
        Ok(response)
    }

    async fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<HttpResponse<C::Error>, FetchError> {
        self.client
            .get(url, headers)
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}
