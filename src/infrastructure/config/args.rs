use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::app_config::{LogLevel, TokenBackend};

#[derive(Debug, Parser)]
#[command(
    name = "melodeck",
    version,
    about = "Command line client for the melodeck music streaming service",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Base URL of the REST backend.
    #[arg(long, value_name = "URL", global = true)]
    pub api_base_url: Option<String>,

    /// Where the access token is persisted.
    #[arg(long, value_enum, global = true)]
    pub token_backend: Option<TokenBackend>,

    /// Access token to use when no session is stored.
    #[arg(long, env = "MELODECK_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and remember the session.
    Login {
        email: String,
        /// Read from stdin when omitted; typed input is echoed.
        #[arg(long, env = "MELODECK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Do not persist the session on this device.
        #[arg(long)]
        no_remember: bool,
    },
    /// Create a listener account.
    Register {
        name: String,
        email: String,
        #[arg(long, env = "MELODECK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Repeat the password; checked before anything is sent.
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Forget the stored session.
    Logout,
    /// Show the signed-in account.
    Whoami,
    /// Edit display name or avatar.
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
    },
    /// Change the account password.
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Check a password against the password policy without contacting the backend.
    PasswordCheck {
        password: String,
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Print the canonical form of an email address.
    NormalizeEmail { email: String },
    /// Browse songs.
    Songs(PageArgs),
    /// Show one song.
    Song { id: String },
    /// Browse albums.
    Albums(PageArgs),
    /// Show an album and its track list.
    Album { id: String },
    /// Browse artists.
    Artists(PageArgs),
    /// Show an artist and their songs.
    Artist { id: String },
    /// List genres.
    Genres,
    /// Search songs, albums, artists and playlists.
    Search {
        /// Each query is searched in turn; only the last one is guaranteed to finish.
        #[arg(required = true)]
        queries: Vec<String>,
    },
    /// Play songs back to back and report listening time.
    Listen {
        #[arg(required = true)]
        song_ids: Vec<String>,
        /// Seconds to stay on each song; waits for Ctrl-C when omitted.
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// List liked songs.
    Liked,
    Like { song_id: String },
    Unlike { song_id: String },
    /// Manage playlists.
    #[command(subcommand)]
    Playlist(PlaylistCommand),
    /// Artist dashboard.
    #[command(subcommand)]
    Studio(StudioCommand),
    /// Admin panel.
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = 20)]
    pub page_size: u32,
}

#[derive(Debug, Subcommand)]
pub enum PlaylistCommand {
    List,
    Show {
        id: String,
    },
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        public: bool,
    },
    Rename {
        id: String,
        name: String,
    },
    Delete {
        id: String,
    },
    Add {
        playlist_id: String,
        song_id: String,
    },
    Remove {
        playlist_id: String,
        song_id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum StudioCommand {
    /// Play counts and listening time for your songs.
    Stats,
    /// Publish a song.
    Upload {
        title: String,
        audio_url: String,
        #[arg(long)]
        duration: u32,
        #[arg(long)]
        album_id: Option<String>,
        #[arg(long)]
        genre_id: Option<String>,
    },
    DeleteSong {
        id: String,
    },
    /// Create an album; release date as YYYY-MM-DD.
    CreateAlbum {
        title: String,
        #[arg(long)]
        release_date: Option<chrono::NaiveDate>,
    },
    /// Apply to become an artist.
    Apply {
        stage_name: String,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Show the state of your artist application.
    Application,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List artist applications, optionally by status.
    Applications {
        #[arg(long)]
        status: Option<crate::domain::entities::ApplicationStatus>,
    },
    Approve {
        id: String,
    },
    Reject {
        id: String,
        #[arg(long)]
        note: String,
    },
    AddGenre {
        name: String,
    },
    DeleteGenre {
        id: String,
    },
    /// Platform-wide usage numbers.
    Stats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_listen_queue() {
        let args = CliArgs::parse_from(["melodeck", "listen", "s1", "s2", "--seconds", "30"]);

        match args.command {
            Command::Listen { song_ids, seconds } => {
                assert_eq!(song_ids, vec!["s1", "s2"]);
                assert_eq!(seconds, Some(30));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_admin_filter() {
        let args = CliArgs::parse_from(["melodeck", "admin", "applications", "--status", "pending"]);

        assert!(matches!(
            args.command,
            Command::Admin(AdminCommand::Applications {
                status: Some(crate::domain::entities::ApplicationStatus::Pending)
            })
        ));
    }
}
