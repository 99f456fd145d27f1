use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;

/// A boxed stream type for HTTP response bodies.
///
/// The stream yields `Result<Bytes, E>` where `E` is the error type of the
/// HTTP client that produced it.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// A response as the engine sees it: the status, the two headers it cares
/// about, and the body stream.
///
/// Dropping the response releases the underlying connection, which is how
/// every exit path — completion, error, or panic unwind — closes it.
pub struct HttpResponse<E> {
    /// HTTP status code of this response.
    pub status: u16,
    /// Value of the `Location` header, if present.
    pub location: Option<String>,
    /// Parsed `Content-Length`, if the server sent one.
    pub content_length: Option<u64>,
    /// Response body as a chunk stream.
    pub body: BoxStream<'static, Result<Bytes, E>>,
}

/// Asynchronous HTTP transport abstraction.
///
/// Implementations must *not* follow redirects themselves: the engine
/// chases them manually so the full header set is reapplied per hop and
/// the hop count stays bounded.
///
/// # Implementations
///
/// - [`ReqwestClient`]: production implementation using `reqwest`
/// - Scripted implementations for testing
pub trait HttpClient: Send + Sync {
    /// Error type for transport operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a GET and return the response with its body as a stream.
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> impl Future<Output = Result<HttpResponse<Self::Error>, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::data::Timeouts;
    use crate::error::FetchError;

    /// Production HTTP transport.
    ///
    /// Built with redirect following disabled and the per-connection
    /// timeouts from [`Timeouts`].
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        pub fn new(timeouts: Timeouts) -> Result<Self, FetchError> {
            let client = reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .connect_timeout(timeouts.connect)
                .read_timeout(timeouts.read)
                .build()
                .map_err(|e| FetchError::Network(e.to_string()))?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(
            &self,
            url: &str,
            headers: &[(String, String)],
        ) -> Result<HttpResponse<Self::Error>, Self::Error> {
            let mut request = self.client.get(url);
            for (key, value) in headers {
                request = request.header(key, value);
            }
            let response = request.send().await?;

            let status = response.status().as_u16();
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let content_length = response
                .headers()
                .get(reqwest::header::CONTENT_LENGTH)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok());

            Ok(HttpResponse {
                status,
                location,
                content_length,
                body: Box::pin(response.bytes_stream()),
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
