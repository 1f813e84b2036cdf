//! Command dispatch for the `melodeck` binary.

use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use tracing::{debug, info, warn};

use super::output;
use crate::application::dto::{LoginRequest, RegisterRequest, TokenSource};
use crate::application::services::{PlaybackTracker, SearchError, SearchService};
use crate::application::use_cases::{LoginUseCase, RegisterUseCase, ResolvedSession};
use crate::domain::entities::{
    AlbumId, ApplicationId, ApplicationReview, ArtistId, CachedProfile, GenreId, NewAlbum,
    NewArtistApplication, NewSong, PageRequest, PlaylistDraft, PlaylistId, SongId,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{
    AdminPort, AuthPort, CatalogPort, Clock, LibraryPort, PlayReportPort, ProfileCachePort,
    ProfileUpdate, StudioPort, TokenStoragePort,
};
use crate::domain::services::{normalize_email, validate_password};
use crate::infrastructure::config::{AdminCommand, Command, PageArgs, PlaylistCommand, StudioCommand};

/// Gap between successive queries of one `search` invocation, mimicking typing.
const TYPING_GAP: Duration = Duration::from_millis(120);

/// Port handles the commands run against.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthPort>,
    pub catalog: Arc<dyn CatalogPort>,
    pub library: Arc<dyn LibraryPort>,
    pub reports: Arc<dyn PlayReportPort>,
    pub studio: Arc<dyn StudioPort>,
    pub admin: Arc<dyn AdminPort>,
    pub tokens: Arc<dyn TokenStoragePort>,
    pub profiles: Arc<dyn ProfileCachePort>,
    pub clock: Arc<dyn Clock>,
}

pub struct App {
    services: Services,
    session: Option<ResolvedSession>,
    login_use_case: LoginUseCase,
    register_use_case: RegisterUseCase,
    search_debounce: Duration,
}

impl App {
    #[must_use]
    pub fn new(
        services: Services,
        session: Option<ResolvedSession>,
        search_debounce: Duration,
    ) -> Self {
        let login_use_case = LoginUseCase::new(
            services.auth.clone(),
            services.tokens.clone(),
            services.profiles.clone(),
        );
        let register_use_case = RegisterUseCase::new(services.auth.clone());

        Self {
            services,
            session,
            login_use_case,
            register_use_case,
            search_debounce,
        }
    }

    /// Runs one command and prints its result.
    ///
    /// # Errors
    /// Returns error if the command fails; backend errors carry a user-facing message.
    pub async fn run(self, command: Command) -> Result<()> {
        if let Some(session) = &self.session {
            debug!(source = %session.source, "Session available");
        }

        self.dispatch(command).await.map_err(with_user_message)
    }

    async fn dispatch(self, command: Command) -> Result<()> {
        let text = match command {
            Command::Listen { song_ids, seconds } => {
                return self.listen(song_ids, seconds).await;
            }
            Command::Search { queries } => return self.search(queries).await,
            other => self.execute(other).await?,
        };

        if !text.is_empty() {
            println!("{text}");
        }
        Ok(())
    }

    /// Runs a command that produces its whole output at once.
    ///
    /// # Errors
    /// Returns error if the command fails.
    pub async fn execute(&self, command: Command) -> Result<String> {
        match command {
            Command::Login {
                email,
                password,
                no_remember,
            } => self.login(email, password, no_remember).await,
            Command::Register {
                name,
                email,
                password,
                confirm,
            } => self.register(name, email, password, confirm).await,
            Command::Logout => self.logout().await,
            Command::Whoami => self.whoami().await,
            Command::Profile { name, avatar_url } => self.update_profile(name, avatar_url).await,
            Command::ChangePassword {
                current,
                new,
                confirm,
            } => self.change_password(&current, &new, confirm.as_deref()).await,
            Command::PasswordCheck { password, confirm } => {
                let verdict = validate_password(&password, confirm.as_deref());
                Ok(output::password_report(&password, verdict))
            }
            Command::NormalizeEmail { email } => Ok(normalize_email(&email)),
            Command::Songs(page) => {
                let songs = self.services.catalog.list_songs(page_request(page)).await?;
                Ok(output::paged(&songs, output::song_list(&songs.items)))
            }
            Command::Song { id } => {
                let song = self.services.catalog.get_song(&SongId::from(id)).await?;
                Ok(output::song_detail(&song))
            }
            Command::Albums(page) => {
                let albums = self.services.catalog.list_albums(page_request(page)).await?;
                let body = albums
                    .items
                    .iter()
                    .map(output::album_line)
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(output::paged(&albums, body))
            }
            Command::Album { id } => {
                let album = self.services.catalog.get_album(&AlbumId::from(id)).await?;
                Ok(output::album_detail(&album))
            }
            Command::Artists(page) => {
                let artists = self
                    .services
                    .catalog
                    .list_artists(page_request(page))
                    .await?;
                let body = artists
                    .items
                    .iter()
                    .map(output::artist_line)
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(output::paged(&artists, body))
            }
            Command::Artist { id } => {
                let id = ArtistId::from(id);
                let (artist, songs) = tokio::try_join!(
                    self.services.catalog.get_artist(&id),
                    self.services.catalog.artist_songs(&id)
                )?;
                Ok(output::artist_detail(&artist, &songs))
            }
            Command::Genres => {
                let genres = self.services.catalog.list_genres().await?;
                Ok(output::genre_list(&genres))
            }
            Command::Liked => {
                self.require_session()?;
                let songs = self.services.library.liked_songs().await?;
                Ok(output::song_list(&songs))
            }
            Command::Like { song_id } => {
                self.require_session()?;
                self.services.library.like_song(&SongId::from(song_id)).await?;
                Ok("Added to liked songs.".to_string())
            }
            Command::Unlike { song_id } => {
                self.require_session()?;
                self.services
                    .library
                    .unlike_song(&SongId::from(song_id))
                    .await?;
                Ok("Removed from liked songs.".to_string())
            }
            Command::Playlist(command) => {
                self.require_session()?;
                self.playlist(command).await
            }
            Command::Studio(command) => {
                self.require_session()?;
                self.studio(command).await
            }
            Command::Admin(command) => {
                self.require_session()?;
                self.admin(command).await
            }
            Command::Listen { .. } | Command::Search { .. } => {
                Err(eyre!("this command streams its output; use App::run"))
            }
        }
    }

    fn require_session(&self) -> Result<&ResolvedSession, ApiError> {
        self.session.as_ref().ok_or(ApiError::NoTokenAvailable)
    }

    async fn login(
        &self,
        email: String,
        password: Option<String>,
        no_remember: bool,
    ) -> Result<String> {
        let password = match password {
            Some(password) => password,
            None => prompt_line("Password: ").await?,
        };

        let mut request = LoginRequest::new(email, password);
        if no_remember {
            request = request.without_persistence();
        }

        let response = self.login_use_case.execute(request).await?;
        info!(
            source = %TokenSource::Login,
            persisted = response.session_persisted,
            "Login successful"
        );

        let mut text = format!("Signed in.\n{}", output::profile_card(&response.profile));
        if !no_remember && !response.session_persisted {
            text.push_str("\nThe session could not be saved; you will need to sign in again.");
        }
        Ok(text)
    }

    async fn register(
        &self,
        name: String,
        email: String,
        password: Option<String>,
        confirm: Option<String>,
    ) -> Result<String> {
        let password = match password {
            Some(password) => password,
            None => prompt_line("Password: ").await?,
        };

        let mut request = RegisterRequest::new(name, email, password);
        if let Some(confirm) = confirm {
            request = request.with_confirmation(confirm);
        }

        let profile = self.register_use_case.execute(request).await?;
        Ok(format!(
            "Account created. Sign in with `melodeck login {}`.",
            profile.email()
        ))
    }

    async fn logout(&self) -> Result<String> {
        self.login_use_case.logout().await?;
        Ok("Signed out.".to_string())
    }

    async fn whoami(&self) -> Result<String> {
        let session = self.require_session()?;

        match self.services.auth.current_user().await {
            Ok(profile) => Ok(output::profile_card(&profile)),
            Err(e) if e.is_network_error() => match &session.profile {
                Some(cached) => {
                    warn!(error = %e, "Backend unreachable, showing cached profile");
                    Ok(format!("{} (offline)", output::cached_profile_card(cached)))
                }
                None => Err(e.into()),
            },
            Err(e) => Err(e.into()),
        }
    }

    async fn update_profile(
        &self,
        name: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<String> {
        let session = self.require_session()?;
        if name.is_none() && avatar_url.is_none() {
            return Ok("Nothing to update.".to_string());
        }

        let update = ProfileUpdate { name, avatar_url };
        let profile = self.services.auth.update_profile(&update).await?;

        if session.source == TokenSource::Stored {
            if let Err(e) = self
                .services
                .profiles
                .store_profile(&CachedProfile::from_profile(&profile))
                .await
            {
                warn!(error = %e, "Failed to refresh cached profile");
            }
        }

        Ok(output::profile_card(&profile))
    }

    async fn change_password(
        &self,
        current: &str,
        new_password: &str,
        confirm: Option<&str>,
    ) -> Result<String> {
        self.require_session()?;
        validate_password(new_password, confirm)
            .map_err(|reason| ApiError::validation(reason.to_string()))?;

        self.services
            .auth
            .change_password(current, new_password)
            .await?;
        Ok("Password changed.".to_string())
    }

    async fn playlist(&self, command: PlaylistCommand) -> Result<String> {
        let library = &self.services.library;
        match command {
            PlaylistCommand::List => {
                let playlists = library.list_playlists().await?;
                if playlists.is_empty() {
                    return Ok("No playlists.".to_string());
                }
                Ok(playlists
                    .iter()
                    .map(output::playlist_line)
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            PlaylistCommand::Show { id } => {
                let playlist = library.get_playlist(&PlaylistId::from(id)).await?;
                Ok(output::playlist_detail(&playlist))
            }
            PlaylistCommand::Create {
                name,
                description,
                public,
            } => {
                let mut draft = PlaylistDraft::new(name);
                if let Some(description) = description {
                    draft = draft.with_description(description);
                }
                if public {
                    draft = draft.public();
                }
                let playlist = library.create_playlist(&draft).await?;
                Ok(format!("Created {}", output::playlist_line(&playlist)))
            }
            PlaylistCommand::Rename { id, name } => {
                let id = PlaylistId::from(id);
                let current = library.get_playlist(&id).await?;
                let draft = PlaylistDraft {
                    name,
                    description: current.description,
                    is_public: current.is_public,
                };
                let playlist = library.update_playlist(&id, &draft).await?;
                Ok(output::playlist_line(&playlist))
            }
            PlaylistCommand::Delete { id } => {
                library.delete_playlist(&PlaylistId::from(id)).await?;
                Ok("Playlist deleted.".to_string())
            }
            PlaylistCommand::Add {
                playlist_id,
                song_id,
            } => {
                let playlist_id = PlaylistId::from(playlist_id);
                let song_id = SongId::from(song_id);
                let playlist = library.get_playlist(&playlist_id).await?;
                if playlist.contains(&song_id) {
                    return Ok(format!("Already in {}.", playlist.name));
                }
                library.add_to_playlist(&playlist_id, &song_id).await?;
                Ok(format!("Added to {}.", playlist.name))
            }
            PlaylistCommand::Remove {
                playlist_id,
                song_id,
            } => {
                library
                    .remove_from_playlist(&PlaylistId::from(playlist_id), &SongId::from(song_id))
                    .await?;
                Ok("Removed from playlist.".to_string())
            }
        }
    }

    async fn studio(&self, command: StudioCommand) -> Result<String> {
        let studio = &self.services.studio;
        match command {
            StudioCommand::Stats => Ok(output::artist_stats(&studio.artist_stats().await?)),
            StudioCommand::Upload {
                title,
                audio_url,
                duration,
                album_id,
                genre_id,
            } => {
                let mut song = NewSong::new(title, audio_url, duration);
                if let Some(album_id) = album_id {
                    song = song.with_album(AlbumId::from(album_id));
                }
                if let Some(genre_id) = genre_id {
                    song = song.with_genre(GenreId::from(genre_id));
                }
                let created = studio.create_song(&song).await?;
                Ok(format!("Published {}", output::song_line(&created)))
            }
            StudioCommand::DeleteSong { id } => {
                studio.delete_song(&SongId::from(id)).await?;
                Ok("Song deleted.".to_string())
            }
            StudioCommand::CreateAlbum {
                title,
                release_date,
            } => {
                let mut album = NewAlbum::new(title);
                if let Some(date) = release_date {
                    album = album.released_on(date);
                }
                let created = studio.create_album(&album).await?;
                Ok(format!("Created {}", output::album_line(&created)))
            }
            StudioCommand::Apply { stage_name, bio } => {
                if stage_name.trim().is_empty() {
                    return Err(ApiError::validation("stage name is required").into());
                }
                let application = studio
                    .submit_application(&NewArtistApplication {
                        stage_name: stage_name.trim().to_string(),
                        bio,
                    })
                    .await?;
                Ok(output::application_line(&application))
            }
            StudioCommand::Application => Ok(studio.my_application().await?.map_or_else(
                || "No artist application on file.".to_string(),
                |application| output::application_line(&application),
            )),
        }
    }

    async fn admin(&self, command: AdminCommand) -> Result<String> {
        let admin = &self.services.admin;
        match command {
            AdminCommand::Applications { status } => {
                let applications = admin.list_applications(status).await?;
                if applications.is_empty() {
                    return Ok("No applications.".to_string());
                }
                Ok(applications
                    .iter()
                    .map(output::application_line)
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            AdminCommand::Approve { id } => {
                let application = admin
                    .review_application(&ApplicationId::from(id), &ApplicationReview::approve())
                    .await?;
                Ok(output::application_line(&application))
            }
            AdminCommand::Reject { id, note } => {
                let application = admin
                    .review_application(&ApplicationId::from(id), &ApplicationReview::reject(note))
                    .await?;
                Ok(output::application_line(&application))
            }
            AdminCommand::AddGenre { name } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(ApiError::validation("genre name is required").into());
                }
                let genre = admin.create_genre(name).await?;
                Ok(format!("Created genre {} ({})", genre.name, genre.id))
            }
            AdminCommand::DeleteGenre { id } => {
                admin.delete_genre(&GenreId::from(id)).await?;
                Ok("Genre deleted.".to_string())
            }
            AdminCommand::Stats => Ok(output::platform_stats(&admin.platform_stats().await?)),
        }
    }

    /// Plays the queue back to back, reporting each finished session.
    ///
    /// Each song plays for `seconds`, or for its catalog length when unset.
    /// Ctrl-C ends playback after reporting the current session. The session
    /// in flight is reported on every exit, including a failed lookup.
    async fn listen(&self, song_ids: Vec<String>, seconds: Option<u64>) -> Result<()> {
        self.require_session()?;
        let tracker = PlaybackTracker::new(self.services.reports.clone(), self.services.clock.clone());

        let played = self.play_queue(&tracker, song_ids, seconds).await;

        let outcome = tracker.stop_and_send().await;
        println!("{}", output::session_outcome(&outcome));
        played
    }

    async fn play_queue(
        &self,
        tracker: &PlaybackTracker,
        song_ids: Vec<String>,
        seconds: Option<u64>,
    ) -> Result<()> {
        for (index, id) in song_ids.into_iter().enumerate() {
            let song = self.services.catalog.get_song(&SongId::from(id)).await?;
            let play_for = Duration::from_secs(
                seconds.unwrap_or_else(|| u64::from(song.duration_seconds)),
            );

            if index == 0 {
                tracker.start(song.id.clone()).await;
            } else {
                let outcome = tracker.switch_to(song.id.clone()).await;
                println!("{}", output::session_outcome(&outcome));
            }
            println!("Playing {}", output::song_line(&song));

            let interrupted = tokio::select! {
                () = tokio::time::sleep(play_for) => false,
                signal = tokio::signal::ctrl_c() => {
                    signal.wrap_err("failed to listen for Ctrl-C")?;
                    true
                }
            };

            if interrupted {
                info!(song_id = %song.id, "Playback interrupted");
                break;
            }
        }
        Ok(())
    }

    /// Sends each query as if typed in turn; only the last one is expected to finish.
    async fn search(&self, queries: Vec<String>) -> Result<()> {
        let service = Arc::new(SearchService::new(
            self.services.catalog.clone(),
            self.search_debounce,
        ));
        let last = queries.len().saturating_sub(1);
        let mut pending = Vec::with_capacity(queries.len());

        for (index, query) in queries.into_iter().enumerate() {
            let task_service = Arc::clone(&service);
            let task_query = query.clone();
            pending.push((
                query,
                tokio::spawn(async move { task_service.search(&task_query).await }),
            ));
            if index < last {
                tokio::time::sleep(TYPING_GAP).await;
            }
        }

        for (query, handle) in pending {
            match handle.await.wrap_err("search task panicked")? {
                Ok(results) => println!("{}", output::search_results(&query, &results)),
                Err(SearchError::Superseded) => debug!(query = %query, "Search superseded"),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

const fn page_request(args: PageArgs) -> PageRequest {
    PageRequest::new(args.page, args.page_size)
}

/// Puts the user-facing text of a backend error on top of the report.
fn with_user_message(report: Report) -> Report {
    let message = report
        .downcast_ref::<ApiError>()
        .or_else(|| match report.downcast_ref::<SearchError>() {
            Some(SearchError::Api(e)) => Some(e),
            _ => None,
        })
        .map(ApiError::user_message);

    match message {
        Some(message) => report.wrap_err(message),
        None => report,
    }
}

/// Reads one line from stdin. The terminal echoes it; pass `--password` or
/// `MELODECK_PASSWORD` to keep it off screen.
async fn prompt_line(prompt: &'static str) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        use std::io::Write;

        eprint!("{prompt}");
        std::io::stderr().flush()?;
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        Ok::<_, std::io::Error>(line.trim_end_matches(['\r', '\n']).to_string())
    })
    .await
    .wrap_err("password prompt failed")?
    .wrap_err("failed to read password from stdin")
}
