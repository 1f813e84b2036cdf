//! REST client for the streaming backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{
    ChangePasswordBody, ErrorResponse, GenreBody, LoginBody, LoginResponse, RegisterBody,
};
use crate::domain::entities::{
    Album, AlbumId, ApplicationId, ApplicationReview, ApplicationStatus, Artist,
    ArtistApplication, ArtistId, ArtistStats, AuthToken, Genre, GenreId, NewAlbum,
    NewArtistApplication, NewSong, Page, PageRequest, PlatformStats, PlayReport, Playlist,
    PlaylistDraft, PlaylistId, SearchResults, Song, SongId, UserProfile,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{
    AdminPort, AuthPort, AuthSession, CatalogPort, LibraryPort, PlayReportPort, ProfileUpdate,
    StudioPort, TokenStoragePort,
};

pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";
const USER_AGENT: &str = concat!("melodeck/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_RETRY_AFTER_MS: u64 = 5000;

/// HTTP adapter implementing every backend port.
///
/// The bearer token is read from token storage on each request, unless one
/// was pinned for this run with [`ApiClient::use_token`].
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStoragePort>,
    pinned_token: RwLock<Option<AuthToken>>,
}

impl ApiClient {
    /// Creates client with the default request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenStoragePort>,
    ) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT, tokens)
    }

    /// Creates client with a custom request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
        tokens: Arc<dyn TokenStoragePort>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
            pinned_token: RwLock::new(None),
        })
    }

    /// Uses `token` for all following requests instead of the stored one.
    pub fn use_token(&self, token: AuthToken) {
        *self.pinned_token.write() = Some(token);
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn bearer(&self) -> Option<String> {
        let pinned = self.pinned_token.read().as_ref().map(AuthToken::bearer);
        if pinned.is_some() {
            return pinned;
        }

        match self.tokens.get_token().await {
            Ok(token) => token.as_ref().map(AuthToken::bearer),
            Err(e) => {
                warn!(error = %e, "Could not read stored token, sending request unauthenticated");
                None
            }
        }
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "Preparing API request");
        let builder = self.client.request(method, self.url(path));
        match self.bearer().await {
            Some(bearer) => builder.header(header::AUTHORIZATION, bearer),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder, resource: &str) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, resource, "Failed to reach backend");
            map_transport_error(&e)
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(handle_error_response(status, response, resource).await)
        }
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        resource: &str,
    ) -> Result<T, ApiError> {
        let response = self.execute(builder, resource).await?;
        response.json::<T>().await.map_err(|e| {
            warn!(error = %e, resource, "Failed to parse response");
            ApiError::unexpected(format!("failed to parse response: {e}"))
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path).await;
        self.fetch_json(builder, path).await
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: PageRequest,
    ) -> Result<Page<T>, ApiError> {
        let builder = self
            .request(Method::GET, path)
            .await
            .query(&[("page", page.page), ("pageSize", page.page_size)]);
        self.fetch_json(builder, path).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(method, path).await.json(body);
        self.fetch_json(builder, path).await
    }

    async fn send_without_reply(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(), ApiError> {
        let mut builder = self.request(method, path).await;
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        self.execute(builder, path).await.map(drop)
    }
}

fn map_transport_error(e: &reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::network("request timed out")
    } else if e.is_connect() {
        ApiError::network("failed to connect to the streaming service")
    } else {
        ApiError::network(e.to_string())
    }
}

async fn handle_error_response(status: StatusCode, response: Response, resource: &str) -> ApiError {
    let retry_after_ms = response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map_or(DEFAULT_RETRY_AFTER_MS, |secs| secs.saturating_mul(1000));

    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(ErrorResponse::into_message)
        .unwrap_or_else(|| format!("HTTP {status}"));

    debug!(%status, resource, message = %message, "Backend returned an error");

    match status {
        StatusCode::UNAUTHORIZED => ApiError::unauthorized(message),
        StatusCode::FORBIDDEN => ApiError::forbidden(message),
        StatusCode::NOT_FOUND => ApiError::not_found(resource),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::validation(message)
        }
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited { retry_after_ms },
        s if s.is_server_error() => ApiError::server(s.as_u16(), message),
        _ => ApiError::unexpected(format!("unexpected response: {status} - {message}")),
    }
}

#[async_trait]
impl AuthPort for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let body = LoginBody { email, password };
        let response: LoginResponse = self
            .send_json(Method::POST, "auth/login", &body)
            .await
            .map_err(|e| match e {
                ApiError::Unauthorized { message } => ApiError::invalid_credentials(message),
                other => other,
            })?;

        let token = AuthToken::new(response.access_token)
            .ok_or_else(|| ApiError::unexpected("backend returned an empty access token"))?;

        debug!(user_id = %response.user.id(), token = %token, "Login accepted");
        Ok(AuthSession::new(token, response.user))
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, ApiError> {
        let body = RegisterBody {
            name,
            email,
            password,
        };
        self.send_json(Method::POST, "auth/register", &body).await
    }

    async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.get("account/me").await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        self.send_json(Method::PUT, "account/me", update).await
    }

    async fn change_password(&self, current: &str, new_password: &str) -> Result<(), ApiError> {
        let body = ChangePasswordBody {
            current_password: current,
            new_password,
        };
        let body = serde_json::to_value(&body)
            .map_err(|e| ApiError::unexpected(format!("failed to encode request: {e}")))?;
        self.send_without_reply(Method::PUT, "account/password", Some(body))
            .await
    }
}

#[async_trait]
impl CatalogPort for ApiClient {
    async fn list_songs(&self, page: PageRequest) -> Result<Page<Song>, ApiError> {
        self.get_page("songs", page).await
    }

    async fn get_song(&self, id: &SongId) -> Result<Song, ApiError> {
        self.get(&format!("songs/{id}")).await
    }

    async fn list_albums(&self, page: PageRequest) -> Result<Page<Album>, ApiError> {
        self.get_page("albums", page).await
    }

    async fn get_album(&self, id: &AlbumId) -> Result<Album, ApiError> {
        self.get(&format!("albums/{id}")).await
    }

    async fn list_artists(&self, page: PageRequest) -> Result<Page<Artist>, ApiError> {
        self.get_page("artists", page).await
    }

    async fn get_artist(&self, id: &ArtistId) -> Result<Artist, ApiError> {
        self.get(&format!("artists/{id}")).await
    }

    async fn artist_songs(&self, id: &ArtistId) -> Result<Vec<Song>, ApiError> {
        self.get(&format!("artists/{id}/songs")).await
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, ApiError> {
        self.get("genres").await
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ApiError> {
        let builder = self.request(Method::GET, "search").await.query(&[("q", query)]);
        self.fetch_json(builder, "search").await
    }
}

#[async_trait]
impl LibraryPort for ApiClient {
    async fn liked_songs(&self) -> Result<Vec<Song>, ApiError> {
        self.get("library/songs").await
    }

    async fn like_song(&self, id: &SongId) -> Result<(), ApiError> {
        self.send_without_reply(Method::POST, &format!("library/songs/{id}"), None)
            .await
    }

    async fn unlike_song(&self, id: &SongId) -> Result<(), ApiError> {
        self.send_without_reply(Method::DELETE, &format!("library/songs/{id}"), None)
            .await
    }

    async fn list_playlists(&self) -> Result<Vec<Playlist>, ApiError> {
        self.get("playlists").await
    }

    async fn get_playlist(&self, id: &PlaylistId) -> Result<Playlist, ApiError> {
        self.get(&format!("playlists/{id}")).await
    }

    async fn create_playlist(&self, draft: &PlaylistDraft) -> Result<Playlist, ApiError> {
        self.send_json(Method::POST, "playlists", draft).await
    }

    async fn update_playlist(
        &self,
        id: &PlaylistId,
        draft: &PlaylistDraft,
    ) -> Result<Playlist, ApiError> {
        self.send_json(Method::PUT, &format!("playlists/{id}"), draft)
            .await
    }

    async fn delete_playlist(&self, id: &PlaylistId) -> Result<(), ApiError> {
        self.send_without_reply(Method::DELETE, &format!("playlists/{id}"), None)
            .await
    }

    async fn add_to_playlist(&self, id: &PlaylistId, song_id: &SongId) -> Result<(), ApiError> {
        let body = serde_json::json!({ "songId": song_id });
        self.send_without_reply(Method::POST, &format!("playlists/{id}/songs"), Some(body))
            .await
    }

    async fn remove_from_playlist(
        &self,
        id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<(), ApiError> {
        self.send_without_reply(
            Method::DELETE,
            &format!("playlists/{id}/songs/{song_id}"),
            None,
        )
        .await
    }
}

#[async_trait]
impl PlayReportPort for ApiClient {
    async fn report_play(&self, report: &PlayReport) -> Result<(), ApiError> {
        let body = serde_json::to_value(report)
            .map_err(|e| ApiError::unexpected(format!("failed to encode play report: {e}")))?;
        self.send_without_reply(Method::POST, "analytics/plays", Some(body))
            .await
    }
}

#[async_trait]
impl StudioPort for ApiClient {
    async fn create_song(&self, song: &NewSong) -> Result<Song, ApiError> {
        self.send_json(Method::POST, "songs", song).await
    }

    async fn delete_song(&self, id: &SongId) -> Result<(), ApiError> {
        self.send_without_reply(Method::DELETE, &format!("songs/{id}"), None)
            .await
    }

    async fn create_album(&self, album: &NewAlbum) -> Result<Album, ApiError> {
        self.send_json(Method::POST, "albums", album).await
    }

    async fn artist_stats(&self) -> Result<ArtistStats, ApiError> {
        self.get("analytics/artist").await
    }

    async fn submit_application(
        &self,
        application: &NewArtistApplication,
    ) -> Result<ArtistApplication, ApiError> {
        self.send_json(Method::POST, "artist-applications", application)
            .await
    }

    async fn my_application(&self) -> Result<Option<ArtistApplication>, ApiError> {
        match self.get("artist-applications/me").await {
            Ok(application) => Ok(Some(application)),
            Err(ApiError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl AdminPort for ApiClient {
    async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<ArtistApplication>, ApiError> {
        let mut builder = self.request(Method::GET, "artist-applications").await;
        if let Some(status) = status {
            builder = builder.query(&[("status", status.as_str())]);
        }
        self.fetch_json(builder, "artist-applications").await
    }

    async fn review_application(
        &self,
        id: &ApplicationId,
        review: &ApplicationReview,
    ) -> Result<ArtistApplication, ApiError> {
        self.send_json(Method::PUT, &format!("artist-applications/{id}"), review)
            .await
    }

    async fn create_genre(&self, name: &str) -> Result<Genre, ApiError> {
        self.send_json(Method::POST, "genres", &GenreBody { name })
            .await
    }

    async fn delete_genre(&self, id: &GenreId) -> Result<(), ApiError> {
        self.send_without_reply(Method::DELETE, &format!("genres/{id}"), None)
            .await
    }

    async fn platform_stats(&self) -> Result<PlatformStats, ApiError> {
        self.get("analytics/platform").await
    }
}
