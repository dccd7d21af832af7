use crate::error::status_for;
use http::header::{self, HeaderValue};
use http::{Method, Request, Response, StatusCode};
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Body, Bytes};
use linkey_browser::ProfileService;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;
use tower::{Service, ServiceBuilder, ServiceExt};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Largest JSON body read from a request
pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Body of every response, whether built here or streamed from disk
pub type ResponseBody = UnsyncBoxBody<Bytes, BoxError>;

/// Shared state handed to every request
#[derive(Clone)]
pub struct AppState {
    service: Arc<ProfileService>,
    static_files: Option<ServeDir>,
}

impl AppState {
    pub fn new(service: Arc<ProfileService>) -> Self {
        Self {
            service,
            static_files: None,
        }
    }

    /// Serve files from `dir` for unmatched GET requests
    pub fn with_public_dir(mut self, dir: PathBuf) -> Self {
        self.static_files = Some(ServeDir::new(dir));
        self
    }

    pub fn service(&self) -> &ProfileService {
        &self.service
    }
}

#[derive(Debug, Default, Deserialize)]
struct OpenRequest {
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ToggleRequest {
    #[serde(rename = "dirName")]
    dir_name: Option<String>,
    browser: Option<String>,
}

/// The full HTTP application: routes wrapped in a permissive CORS layer
pub fn app<B>(
    state: AppState,
) -> impl Service<Request<B>, Response = Response<ResponseBody>, Error = Infallible, Future: Send>
+ Clone
+ Send
+ 'static
where
    B: Body + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    ServiceBuilder::new()
        .layer(cors)
        .service_fn(move |req: Request<B>| {
            let state = state.clone();
            async move { Ok::<_, Infallible>(route(state, req).await) }
        })
}

/// Dispatch one request to its handler
async fn route<B>(state: AppState, req: Request<B>) -> Response<ResponseBody>
where
    B: Body + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    tracing::debug!("{} {}", method, path);

    match (&method, path.as_str()) {
        (&Method::OPTIONS, _) => empty(StatusCode::NO_CONTENT),
        (&Method::GET, "/profiles") => list_profiles(state).await,
        (&Method::POST, "/open") => open_url(state, read_json(req).await).await,
        (&Method::POST, "/toggle-profile") => toggle_profile(state, read_json(req).await).await,
        (&Method::GET | &Method::HEAD, _) => static_file(state.static_files, req).await,
        _ => text(StatusCode::NOT_FOUND, "Not Found"),
    }
}

/// Parse a JSON body, treating anything unreadable or oversized as an empty request
async fn read_json<B, T>(req: Request<B>) -> T
where
    B: Body,
    B::Error: Into<BoxError>,
    T: DeserializeOwned + Default,
{
    let body = Limited::new(req.into_body(), MAX_BODY_BYTES);
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            tracing::warn!("Could not read request body: {}", e);
            return T::default();
        }
    };

    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        tracing::debug!("Ignoring malformed JSON body: {}", e);
        T::default()
    })
}

async fn list_profiles(state: AppState) -> Response<ResponseBody> {
    match blocking(move || state.service().profiles()).await {
        Ok(profiles) => json(StatusCode::OK, &profiles),
        Err(response) => response,
    }
}

async fn open_url(state: AppState, request: OpenRequest) -> Response<ResponseBody> {
    let url = request.url.unwrap_or_default();

    match blocking(move || state.service().open(&url)).await {
        Ok(Ok(summary)) => text(
            StatusCode::OK,
            format!(
                "Opening {} in {} enabled profiles...",
                summary.url, summary.attempted_count
            ),
        ),
        Ok(Err(e)) => text(status_for(&e), e.to_string()),
        Err(response) => response,
    }
}

async fn toggle_profile(state: AppState, request: ToggleRequest) -> Response<ResponseBody> {
    let dir_name = request.dir_name.unwrap_or_default();
    let browser = request.browser;

    match blocking(move || state.service().toggle(&dir_name, browser.as_deref())).await {
        Ok(Ok(outcome)) => json(StatusCode::OK, &outcome),
        Ok(Err(e)) => text(status_for(&e), e.to_string()),
        Err(response) => response,
    }
}

async fn static_file<B>(files: Option<ServeDir>, req: Request<B>) -> Response<ResponseBody>
where
    B: Send + 'static,
{
    let Some(files) = files else {
        return text(StatusCode::NOT_FOUND, "Not Found");
    };

    match files.oneshot(req).await {
        Ok(response) if response.status() == StatusCode::NOT_FOUND => {
            text(StatusCode::NOT_FOUND, "Not Found")
        }
        Ok(response) => response.map(|body| body.map_err(BoxError::from).boxed_unsync()),
        Err(never) => match never {},
    }
}

/// Run filesystem and process work off the async workers
async fn blocking<T, F>(work: F) -> std::result::Result<T, Response<ResponseBody>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        tracing::error!("Request handler failed: {}", e);
        text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    })
}

fn full(status: StatusCode, body: impl Into<Bytes>) -> Response<ResponseBody> {
    let body = Full::new(body.into())
        .map_err(|never| match never {})
        .boxed_unsync();
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
}

fn empty(status: StatusCode) -> Response<ResponseBody> {
    full(status, Bytes::new())
}

fn text(status: StatusCode, body: impl Into<String>) -> Response<ResponseBody> {
    let mut response = full(status, body.into());
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

fn json<T: serde::Serialize>(status: StatusCode, value: &T) -> Response<ResponseBody> {
    match serde_json::to_vec(value) {
        Ok(body) => {
            let mut response = full(status, body);
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            response
        }
        Err(e) => {
            tracing::error!("Failed to serialize response: {}", e);
            text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkey_browser::{BrowserRegistry, LaunchRequest, PlatformFamily, ProcessLauncher};
    use linkey_core::{BrowserRoot, StateStore};
    use serde_json::Value;
    use std::fs;
    use std::path::Path;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLauncher {
        requests: Mutex<Vec<LaunchRequest>>,
    }

    impl ProcessLauncher for RecordingLauncher {
        fn launch(&self, request: &LaunchRequest) -> linkey_core::Result<()> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    fn state(base: &Path) -> (AppState, Arc<RecordingLauncher>) {
        let chrome = base.join("chrome");
        let brave = base.join("brave");
        fs::create_dir_all(chrome.join("Default")).unwrap();
        fs::create_dir_all(chrome.join("Profile 1")).unwrap();
        fs::create_dir_all(brave.join("Profile 1")).unwrap();

        let registry = BrowserRegistry::from_roots(
            PlatformFamily::Linux,
            vec![
                BrowserRoot::new("Chrome", chrome, "google-chrome"),
                BrowserRoot::new("Brave", brave, "brave-browser"),
            ],
        );
        let launcher = Arc::new(RecordingLauncher::default());
        let service = ProfileService::new(registry, StateStore::new(base.join("state")), launcher.clone());
        (AppState::new(Arc::new(service)), launcher)
    }

    fn request(method: Method, path: &str, body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    async fn call(state: AppState, req: Request<Full<Bytes>>) -> Response<ResponseBody> {
        app::<Full<Bytes>>(state).oneshot(req).await.unwrap()
    }

    async fn body_string(response: Response<ResponseBody>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_list_profiles() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (state, _) = state(temp_dir.path());

        let response = call(state, request(Method::GET, "/profiles", "")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );

        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        let profiles = json.as_array().unwrap();
        assert_eq!(profiles.len(), 3);
        for profile in profiles {
            assert!(profile["browser"].is_string());
            assert!(profile["dirName"].is_string());
            assert!(profile["name"].is_string());
            assert!(profile["command"].is_string());
            assert_eq!(profile["enabled"], false);
        }
    }

    #[tokio::test]
    async fn test_toggle_with_browser() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (state, _) = state(temp_dir.path());

        let response = call(
            state.clone(),
            request(
                Method::POST,
                "/toggle-profile",
                r#"{"dirName": "Profile 1", "browser": "Brave"}"#,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"dirName": "Profile 1", "browser": "Brave", "enabled": true})
        );
        assert!(state.service().enabled().contains("Brave", "Profile 1"));
    }

    #[tokio::test]
    async fn test_toggle_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (state, _) = state(temp_dir.path());

        let missing = call(state.clone(), request(Method::POST, "/toggle-profile", "{}")).await;
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(missing).await, "Missing profile dirName");

        let ambiguous = call(
            state.clone(),
            request(Method::POST, "/toggle-profile", r#"{"dirName": "Profile 1"}"#),
        )
        .await;
        assert_eq!(ambiguous.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(ambiguous).await.contains("supply browser"));

        let unknown = call(
            state.clone(),
            request(Method::POST, "/toggle-profile", r#"{"dirName": "Profile 8"}"#),
        )
        .await;
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

        assert!(state.service().enabled().is_empty());
    }

    #[tokio::test]
    async fn test_inferred_toggle_reports_inferred() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (state, _) = state(temp_dir.path());

        let response = call(
            state,
            request(Method::POST, "/toggle-profile", r#"{"dirName": "Default"}"#),
        )
        .await;
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();

        assert_eq!(json["browser"], "Chrome");
        assert_eq!(json["inferred"], true);
    }

    #[tokio::test]
    async fn test_open() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (state, launcher) = state(temp_dir.path());

        let missing = call(state.clone(), request(Method::POST, "/open", "{}")).await;
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(missing).await, "Missing URL");

        let none_enabled = call(
            state.clone(),
            request(Method::POST, "/open", r#"{"url": "https://example.com"}"#),
        )
        .await;
        assert_eq!(none_enabled.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(none_enabled).await, "No enabled profiles found");
        assert!(launcher.requests.lock().unwrap().is_empty());

        state.service().toggle("Default", Some("Chrome")).unwrap();
        state.service().toggle("Profile 1", Some("Brave")).unwrap();

        let opened = call(
            state,
            request(Method::POST, "/open", r#"{"url": "https://example.com"}"#),
        )
        .await;
        assert_eq!(opened.status(), StatusCode::OK);
        assert_eq!(
            body_string(opened).await,
            "Opening https://example.com in 2 enabled profiles..."
        );
        assert_eq!(launcher.requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_body_is_missing_field() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (state, _) = state(temp_dir.path());

        let response = call(state, request(Method::POST, "/open", "not json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_body_is_missing_field() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (state, launcher) = state(temp_dir.path());
        state.service().toggle("Default", Some("Chrome")).unwrap();

        let padding = "x".repeat(MAX_BODY_BYTES);
        let body = format!(r#"{{"url": "https://example.com", "pad": "{}"}}"#, padding);
        let response = call(state, request(Method::POST, "/open", &body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(launcher.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (state, _) = state(temp_dir.path());

        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/toggle-profile")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let preflight = call(state.clone(), req).await;

        assert!(preflight.status().is_success());
        assert_eq!(preflight.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(preflight
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));

        let bare = call(state, request(Method::OPTIONS, "/open", "")).await;
        assert_eq!(bare.status(), StatusCode::NO_CONTENT);
        assert_eq!(bare.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_unknown_routes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (state, _) = state(temp_dir.path());

        let unknown = call(state.clone(), request(Method::DELETE, "/profiles", "")).await;
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
        assert_eq!(unknown.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let no_public = call(state, request(Method::GET, "/index.html", "")).await;
        assert_eq!(no_public.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(no_public).await, "Not Found");
    }

    #[tokio::test]
    async fn test_static_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let public = temp_dir.path().join("public");
        fs::create_dir_all(&public).unwrap();
        fs::write(public.join("index.html"), "<h1>Linkey</h1>").unwrap();
        fs::write(public.join("my app.css"), "body {}").unwrap();
        fs::write(temp_dir.path().join("secret.txt"), "hidden").unwrap();
        let (state, _) = state(temp_dir.path());
        let state = state.with_public_dir(public);

        let index = call(state.clone(), request(Method::GET, "/", "")).await;
        assert_eq!(index.status(), StatusCode::OK);
        assert!(index.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert_eq!(index.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(body_string(index).await, "<h1>Linkey</h1>");

        let escaped = call(state.clone(), request(Method::GET, "/my%20app.css", "")).await;
        assert_eq!(escaped.status(), StatusCode::OK);
        assert!(escaped.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/css"));
        assert_eq!(body_string(escaped).await, "body {}");

        let traversal = call(state.clone(), request(Method::GET, "/../secret.txt", "")).await;
        assert_eq!(traversal.status(), StatusCode::NOT_FOUND);

        let missing = call(state, request(Method::GET, "/missing.js", "")).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
