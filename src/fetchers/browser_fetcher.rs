use super::BrowserSettings;
use crate::domain::ports::Fetcher;
use crate::utils::error::{Result, ScoutError};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    EventResponseReceived, GetResponseBodyParams, RequestId,
};
use chromiumoxide::Page;
use futures_util::StreamExt;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Grace period after navigation for late XHR/fetch calls to land.
const SETTLE_DELAY: Duration = Duration::from_millis(1500);

/// Only successful JSON responses carry listing data worth keeping.
fn is_listing_response(status: i64, mime_type: &str) -> bool {
    status == 200 && mime_type.to_ascii_lowercase().contains("json")
}

/// Rendered HTML, then each captured body on its own line.
fn merge_captured(mut html: String, bodies: &[String]) -> String {
    if !bodies.is_empty() {
        html.push('\n');
        html.push_str(&bodies.join("\n"));
    }
    html
}

struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

/// Renders JavaScript-driven careers pages in headless Chromium.
///
/// The returned content is the rendered HTML followed by the bodies of every
/// JSON response the page received while loading, one per line. Job boards
/// that populate listings from an API are covered that way.
pub struct BrowserFetcher {
    settings: BrowserSettings,
    session: Mutex<Option<BrowserSession>>,
}

impl BrowserFetcher {
    pub fn new(settings: BrowserSettings) -> Self {
        Self {
            settings,
            session: Mutex::new(None),
        }
    }

    async fn launch(&self) -> Result<BrowserSession> {
        tracing::debug!(
            "Launching Chromium (headless: {}, args: {:?})",
            self.settings.headless,
            self.settings.args
        );

        let mut builder = BrowserConfig::builder()
            .args(self.settings.args.clone())
            .request_timeout(self.settings.timeout);
        if !self.settings.headless {
            builder = builder.with_head();
        }
        let config = builder
            .build()
            .map_err(|message| ScoutError::BrowserError { message })?;

        let (browser, mut handler) =
            Browser::launch(config)
                .await
                .map_err(|e| ScoutError::BrowserError {
                    message: format!("Failed to launch Chromium: {}", e),
                })?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler stopped: {}", e);
                    break;
                }
            }
        });

        Ok(BrowserSession { browser, handler })
    }

    async fn open_page(&self, url: &str) -> Result<Page> {
        let mut guard = self.session.lock().await;
        if guard.is_none() {
            *guard = Some(self.launch().await?);
        }

        let session = guard.as_ref().ok_or_else(|| ScoutError::BrowserError {
            message: "Browser session unavailable".to_string(),
        })?;

        session
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScoutError::fetch(url, format!("Browser error opening page: {}", e)))
    }

    async fn render(&self, page: &Page, url: &str) -> Result<String> {
        let mut responses = page
            .event_listener::<EventResponseReceived>()
            .await
            .map_err(|e| ScoutError::fetch(url, format!("Browser error: {}", e)))?;

        let captured: Arc<StdMutex<Vec<RequestId>>> = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&captured);
        let collector = tokio::spawn(async move {
            while let Some(event) = responses.next().await {
                let response = &event.response;
                if is_listing_response(response.status, &response.mime_type) {
                    if let Ok(mut ids) = sink.lock() {
                        ids.push(event.request_id.clone());
                    }
                }
            }
        });

        let navigation = tokio::time::timeout(self.settings.timeout, async {
            page.goto(url).await?;
            page.wait_for_navigation().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        })
        .await;

        match navigation {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                collector.abort();
                return Err(ScoutError::fetch(url, format!("Browser error: {}", e)));
            }
            Err(_) => {
                collector.abort();
                return Err(ScoutError::fetch(
                    url,
                    format!("Browser navigation timed out after {:?}", self.settings.timeout),
                ));
            }
        }

        tokio::time::sleep(SETTLE_DELAY).await;
        collector.abort();

        let html = page
            .content()
            .await
            .map_err(|e| ScoutError::fetch(url, format!("Browser error reading DOM: {}", e)))?;

        let request_ids = captured.lock().map(|ids| ids.clone()).unwrap_or_default();
        let mut bodies = Vec::new();
        for request_id in request_ids {
            match page.execute(GetResponseBodyParams::new(request_id)).await {
                Ok(response) if !response.result.base64_encoded => {
                    if !response.result.body.is_empty() {
                        bodies.push(response.result.body.clone());
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::debug!("Could not read captured response on {}: {}", url, e),
            }
        }

        if !bodies.is_empty() {
            tracing::debug!("Captured {} JSON responses from {}", bodies.len(), url);
        }

        Ok(merge_captured(html, &bodies))
    }
}

#[async_trait]
impl Fetcher for BrowserFetcher {
    fn name(&self) -> &str {
        "browser"
    }

    async fn get(&self, url: &str) -> Result<String> {
        let page = self.open_page(url).await?;
        let rendered = self.render(&page, url).await;

        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close page for {}: {}", url, e);
        }

        rendered
    }

    async fn cleanup(&self) -> Result<()> {
        let session = self.session.lock().await.take();

        if let Some(mut session) = session {
            let closed = session.browser.close().await;
            let _ = session.browser.wait().await;
            session.handler.abort();
            closed.map_err(|e| ScoutError::BrowserError {
                message: format!("Failed to close Chromium: {}", e),
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_response_filter() {
        assert!(is_listing_response(200, "application/json"));
        assert!(is_listing_response(200, "application/ld+json; charset=utf-8"));
        assert!(is_listing_response(200, "Application/JSON"));

        assert!(!is_listing_response(200, "text/html"));
        assert!(!is_listing_response(204, "application/json"));
        assert!(!is_listing_response(404, "application/json"));
        assert!(!is_listing_response(301, "application/json"));
    }

    #[test]
    fn test_merge_captured_bodies() {
        let html = "<html><body></body></html>".to_string();
        assert_eq!(merge_captured(html.clone(), &[]), html);

        let bodies = vec![
            r#"{"jobs":[{"url":"/jobs/1"}]}"#.to_string(),
            r#"{"jobs":[{"url":"/jobs/2"}]}"#.to_string(),
        ];
        assert_eq!(
            merge_captured(html, &bodies),
            "<html><body></body></html>\n{\"jobs\":[{\"url\":\"/jobs/1\"}]}\n{\"jobs\":[{\"url\":\"/jobs/2\"}]}"
        );
    }

    #[test]
    fn test_name() {
        let fetcher = BrowserFetcher::new(BrowserSettings::default());
        assert_eq!(fetcher.name(), "browser");
    }

    #[tokio::test]
    async fn test_cleanup_before_launch_is_noop() {
        let fetcher = BrowserFetcher::new(BrowserSettings {
            timeout: Duration::from_secs(5),
            ..BrowserSettings::default()
        });

        assert!(fetcher.cleanup().await.is_ok());
        // a second cleanup stays harmless
        assert!(fetcher.cleanup().await.is_ok());
        assert!(fetcher.session.lock().await.is_none());
    }
}
