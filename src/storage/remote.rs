//! Remote JSON document store (realtime-database style REST)

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use std::time::Duration;
use tracing::debug;

use super::StorageBackend;
use crate::config::UserConfig;
use crate::stores::DashboardData;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The whole aggregate stored as one document at `{url}/{path}.json`
pub struct RemoteStorage {
    client: Client,
    base_url: String,
    path: String,
    auth: Option<String>,
}

impl RemoteStorage {
    pub fn new(base_url: &str, path: &str, auth: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            path: path.trim().trim_matches('/').to_string(),
            auth: auth.filter(|a| !a.trim().is_empty()),
        })
    }

    pub fn from_config(config: &UserConfig) -> Result<Self> {
        if !config.remote_configured() {
            anyhow::bail!("Remote storage selected but remoteUrl is not set in settings.json");
        }
        Self::new(
            &config.remote_url,
            &config.remote_path,
            Some(config.remote_auth.clone()),
        )
    }

    pub fn document_url(&self) -> String {
        format!("{}/{}.json", self.base_url, self.path)
    }

    fn request(&self, method: Method) -> RequestBuilder {
        let request = self.client.request(method, self.document_url());
        match &self.auth {
            Some(auth) => request.query(&[("auth", auth)]),
            None => request,
        }
    }
}

#[async_trait]
impl StorageBackend for RemoteStorage {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn load(&self) -> Result<Option<DashboardData>> {
        let body = self
            .request(Method::GET)
            .send()
            .await
            .context("Failed to reach remote storage")?
            .error_for_status()
            .context("Remote storage rejected the read")?
            .text()
            .await?;

        parse_document(&body)
    }

    async fn save(&self, data: &DashboardData) -> Result<()> {
        self.request(Method::PUT)
            .json(data)
            .send()
            .await
            .context("Failed to reach remote storage")?
            .error_for_status()
            .context("Remote storage rejected the write")?;

        debug!(url = %self.document_url(), "Saved dashboard to remote storage");
        Ok(())
    }
}

/// An absent document comes back as the literal `null`
fn parse_document(body: &str) -> Result<Option<DashboardData>> {
    let body = body.trim();
    if body.is_empty() || body == "null" {
        return Ok(None);
    }

    let data = serde_json::from_str(body).context("Remote document is not a dashboard")?;
    Ok(Some(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::{sample_data, DashboardStore};
    use actix_web::{web, App, HttpResponse, HttpServer};
    use parking_lot::Mutex;
    use serde::Deserialize;
    use std::sync::Arc;

    const DOCUMENT_PATH: &str = "/labels/prdesk.json";

    /// A document store holding one JSON document, guarded by an auth token
    #[derive(Default)]
    struct Document(Mutex<Option<String>>);

    #[derive(Deserialize)]
    struct AuthQuery {
        auth: Option<String>,
    }

    fn denied(query: &AuthQuery) -> Option<HttpResponse> {
        if query.auth.as_deref() == Some("secret") {
            return None;
        }
        Some(HttpResponse::Unauthorized().json(serde_json::json!({"error": "Permission denied"})))
    }

    async fn get_document(
        document: web::Data<Document>,
        query: web::Query<AuthQuery>,
    ) -> HttpResponse {
        if let Some(resp) = denied(&query) {
            return resp;
        }
        let body = document.0.lock().clone().unwrap_or_else(|| "null".to_string());
        HttpResponse::Ok().content_type("application/json").body(body)
    }

    async fn put_document(
        document: web::Data<Document>,
        query: web::Query<AuthQuery>,
        body: web::Bytes,
    ) -> HttpResponse {
        if let Some(resp) = denied(&query) {
            return resp;
        }
        let body = String::from_utf8_lossy(&body).into_owned();
        *document.0.lock() = Some(body.clone());
        HttpResponse::Ok().content_type("application/json").body(body)
    }

    /// Serve `document` on an ephemeral port and return the base URL
    fn serve(document: web::Data<Document>) -> String {
        let server = HttpServer::new(move || {
            App::new().app_data(document.clone()).service(
                web::resource(DOCUMENT_PATH)
                    .route(web::get().to(get_document))
                    .route(web::put().to(put_document)),
            )
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{}", addr)
    }

    #[actix_web::test]
    async fn test_save_then_load_round_trip() {
        let document = web::Data::new(Document::default());
        let url = serve(document.clone());
        let storage = RemoteStorage::new(&url, "labels/prdesk", Some("secret".into())).unwrap();

        assert!(storage.load().await.unwrap().is_none());

        let data = sample_data();
        storage.save(&data).await.unwrap();
        assert!(document.0.lock().is_some());
        assert_eq!(storage.load().await.unwrap(), Some(data));
    }

    #[actix_web::test]
    async fn test_rejected_read_falls_back_to_samples() {
        let document = web::Data::new(Document::default());
        let url = serve(document.clone());
        let storage = RemoteStorage::new(&url, "labels/prdesk", Some("wrong".into())).unwrap();

        assert!(storage.load().await.is_err());
        assert!(storage.save(&sample_data()).await.is_err());
        assert!(document.0.lock().is_none());

        let store = DashboardStore::open(Arc::new(storage), false).await;
        assert_eq!(store.snapshot(), sample_data());
    }

    #[test]
    fn test_document_url() {
        let storage = RemoteStorage::new("https://db.example.com/", "/labels/prdesk/", None).unwrap();
        assert_eq!(
            storage.document_url(),
            "https://db.example.com/labels/prdesk.json"
        );
        assert!(storage.auth.is_none());

        let storage = RemoteStorage::new("https://db.example.com", "prdesk", Some("  ".into())).unwrap();
        assert!(storage.auth.is_none());
    }

    #[test]
    fn test_from_config_requires_url() {
        let config = UserConfig::default();
        assert!(RemoteStorage::from_config(&config).is_err());
    }

    #[test]
    fn test_parse_document() {
        assert!(parse_document("null").unwrap().is_none());
        assert!(parse_document("  ").unwrap().is_none());
        assert!(parse_document("[1,2]").is_err());

        let data = sample_data();
        let body = serde_json::to_string(&data).unwrap();
        assert_eq!(parse_document(&body).unwrap(), Some(data));
    }
}
