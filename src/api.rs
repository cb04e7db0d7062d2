use log::debug;
use url::Url;

use crate::{config::Config, error::FetchError};

pub fn reqwest_client(config: &Config) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.fetch_timeout())
        .connection_verbose(true)
        .build()
        .map_err(FetchError::Client)
}

/// A single GET.  Anything but a 2xx response is an error; there is no retry.
pub async fn fetch_page(client: &reqwest::Client, url: Url) -> Result<String, FetchError> {
    let request_error = |source| FetchError::Request {
        url: url.to_string(),
        source,
    };
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(request_error)?;
    let status = response.status();
    debug!("GET {url} -> {status}");
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }
    response.text().await.map_err(request_error)
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread,
    };

    use reqwest::StatusCode;
    use url::Url;

    use super::{fetch_page, reqwest_client};
    use crate::{config::Config, error::FetchError};

    /// Answers a single request with `response` on a local port.
    fn serve_once(response: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0; 4096];
            let _ = stream.read(&mut buf);
            stream.write_all(response.as_bytes()).unwrap();
        });
        url
    }

    #[test]
    fn client_builds_from_default_config() {
        assert!(reqwest_client(&Config::default()).is_ok());
    }

    #[tokio::test]
    async fn ok_response_body() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello",
        );
        let client = reqwest_client(&Config::default()).unwrap();
        assert_eq!(fetch_page(&client, url).await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn not_found_is_a_status_error() {
        let url = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        let client = reqwest_client(&Config::default()).unwrap();
        let err = fetch_page(&client, url.clone()).await.unwrap_err();
        match err {
            FetchError::Status { url: got, status } => {
                assert_eq!(got, url.to_string());
                assert_eq!(status, StatusCode::NOT_FOUND);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn refused_connection_is_a_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();
        drop(listener);
        let client = reqwest_client(&Config::default()).unwrap();
        let err = fetch_page(&client, url).await.unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }), "{err:?}");
    }
}
