//! Plain-text rendering of backend records for the terminal.

use crate::application::SessionOutcome;
use crate::domain::entities::{
    Album, Artist, ArtistApplication, ArtistStats, CachedProfile, Genre, Page, PlatformStats,
    Playlist, SearchResults, Song, UserProfile,
};
use crate::domain::services::{
    PasswordPolicyError, format_duration, format_duration_ms, password_score, password_strength,
};

#[must_use]
pub fn song_line(song: &Song) -> String {
    let artist = if song.artist_name.is_empty() {
        "unknown artist"
    } else {
        song.artist_name.as_str()
    };
    format!(
        "{:>8}  {} - {} [{}]",
        song.id,
        song.title,
        artist,
        song.formatted_duration()
    )
}

#[must_use]
pub fn song_list(songs: &[Song]) -> String {
    if songs.is_empty() {
        return "No songs.".to_string();
    }
    songs.iter().map(song_line).collect::<Vec<_>>().join("\n")
}

#[must_use]
pub fn song_detail(song: &Song) -> String {
    let mut lines = vec![
        song.title.clone(),
        format!("  artist:   {} ({})", song.artist_name, song.artist_id),
        format!("  length:   {}", song.formatted_duration()),
        format!("  plays:    {}", song.play_count),
    ];
    if let Some(album) = &song.album_id {
        lines.push(format!("  album:    {album}"));
    }
    if let Some(genre) = &song.genre {
        lines.push(format!("  genre:    {}", genre.name));
    }
    if let Some(url) = &song.audio_url {
        lines.push(format!("  audio:    {url}"));
    }
    lines.join("\n")
}

/// Appends a paging footer to an already rendered item list.
#[must_use]
pub fn paged<T>(page: &Page<T>, body: String) -> String {
    let mut footer = format!("page {} ({} total)", page.page, page.total);
    if page.has_more() {
        footer.push_str(&format!(", next: --page {}", page.page + 1));
    }
    format!("{body}\n{footer}")
}

#[must_use]
pub fn album_line(album: &Album) -> String {
    let year = album
        .release_date
        .map(|d| d.format(" (%Y)").to_string())
        .unwrap_or_default();
    format!("{:>8}  {} - {}{}", album.id, album.title, album.artist_name, year)
}

#[must_use]
pub fn album_detail(album: &Album) -> String {
    #[allow(clippy::cast_precision_loss)]
    let total = format_duration(album.total_duration_seconds() as f64);
    let mut lines = vec![
        album_line(album),
        format!("  {} tracks, {total}", album.songs.len()),
    ];
    lines.extend(
        album
            .songs
            .iter()
            .enumerate()
            .map(|(i, song)| format!("  {:>2}. {} [{}]", i + 1, song.title, song.formatted_duration())),
    );
    lines.join("\n")
}

#[must_use]
pub fn artist_line(artist: &Artist) -> String {
    format!(
        "{:>8}  {} ({} followers)",
        artist.id, artist.name, artist.follower_count
    )
}

#[must_use]
pub fn artist_detail(artist: &Artist, songs: &[Song]) -> String {
    let mut lines = vec![artist_line(artist)];
    if let Some(bio) = artist.bio.as_deref().filter(|b| !b.trim().is_empty()) {
        lines.push(format!("  {}", bio.trim()));
    }
    lines.push(song_list(songs));
    lines.join("\n")
}

#[must_use]
pub fn genre_list(genres: &[Genre]) -> String {
    if genres.is_empty() {
        return "No genres.".to_string();
    }
    genres
        .iter()
        .map(|g| format!("{:>8}  {}", g.id, g.name))
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn playlist_line(playlist: &Playlist) -> String {
    let visibility = if playlist.is_public { "public" } else { "private" };
    format!(
        "{:>8}  {} ({} songs, {visibility})",
        playlist.id,
        playlist.name,
        playlist.songs.len()
    )
}

#[must_use]
pub fn playlist_detail(playlist: &Playlist) -> String {
    let mut lines = vec![playlist_line(playlist)];
    if let Some(description) = &playlist.description {
        lines.push(format!("  {description}"));
    }
    lines.push(song_list(&playlist.songs));
    lines.join("\n")
}

#[must_use]
pub fn search_results(query: &str, results: &SearchResults) -> String {
    if results.is_empty() {
        return format!("No results for \"{query}\".");
    }

    let mut lines = vec![format!("{} results for \"{query}\"", results.total())];
    if !results.songs.is_empty() {
        lines.push("Songs".to_string());
        lines.extend(results.songs.iter().map(song_line));
    }
    if !results.albums.is_empty() {
        lines.push("Albums".to_string());
        lines.extend(results.albums.iter().map(album_line));
    }
    if !results.artists.is_empty() {
        lines.push("Artists".to_string());
        lines.extend(results.artists.iter().map(artist_line));
    }
    if !results.playlists.is_empty() {
        lines.push("Playlists".to_string());
        lines.extend(results.playlists.iter().map(playlist_line));
    }
    lines.join("\n")
}

#[must_use]
pub fn profile_card(profile: &UserProfile) -> String {
    let cached = CachedProfile::from_profile(profile);
    format!(
        "[{}] {} <{}>\n  role: {}",
        cached.initials(),
        profile.name(),
        profile.email(),
        profile.role()
    )
}

#[must_use]
pub fn cached_profile_card(profile: &CachedProfile) -> String {
    let mut card = format!("[{}] {} <{}>", profile.initials(), profile.name(), profile.email());
    if let Some(avatar) = profile.avatar_url() {
        card.push_str(&format!("\n  avatar: {avatar}"));
    }
    card
}

#[must_use]
pub fn application_line(application: &ArtistApplication) -> String {
    let mut line = format!(
        "{:>8}  {} [{}]",
        application.id, application.stage_name, application.status
    );
    if let Some(at) = application.submitted_at {
        line.push_str(&at.format(" submitted %Y-%m-%d").to_string());
    }
    if let Some(note) = &application.review_note {
        line.push_str(&format!("\n  note: {note}"));
    }
    line
}

#[must_use]
pub fn artist_stats(stats: &ArtistStats) -> String {
    let mut lines = vec![
        format!("plays:              {}", stats.total_plays),
        format!(
            "listening time:     {}",
            format_duration_ms(stats.total_listen_ms)
        ),
        format!(
            "average per play:   {}",
            format_duration_ms(stats.average_listen_ms())
        ),
        format!("monthly listeners:  {}", stats.monthly_listeners),
    ];
    if !stats.top_songs.is_empty() {
        lines.push("top songs".to_string());
        lines.extend(
            stats
                .top_songs
                .iter()
                .map(|s| format!("  {:>8} plays  {}", s.plays, s.title)),
        );
    }
    lines.join("\n")
}

#[must_use]
pub fn platform_stats(stats: &PlatformStats) -> String {
    [
        format!("users:    {}", stats.total_users),
        format!("artists:  {}", stats.total_artists),
        format!("songs:    {}", stats.total_songs),
        format!("plays:    {}", stats.total_plays),
    ]
    .join("\n")
}

/// Strength meter plus the first failing rule, as the sign-up form shows them.
#[must_use]
pub fn password_report(password: &str, verdict: Result<(), PasswordPolicyError>) -> String {
    let strength = password_strength(password);
    let score = password_score(password);
    match verdict {
        Ok(()) => format!("strength: {strength} ({score}/4)\nok"),
        Err(reason) => format!(
            "strength: {strength} ({score}/4)\nrejected ({}): {reason}",
            reason.code()
        ),
    }
}

#[must_use]
pub fn session_outcome(outcome: &SessionOutcome) -> String {
    match outcome {
        SessionOutcome::Idle => "nothing was playing".to_string(),
        SessionOutcome::Skipped {
            song_id,
            elapsed_ms,
        } => format!(
            "{song_id}: skipped after {}, not counted",
            format_duration_ms(*elapsed_ms)
        ),
        SessionOutcome::Reported(report) => format!(
            "{}: reported {}",
            report.song_id,
            format_duration_ms(report.duration_ms)
        ),
        SessionOutcome::ReportFailed(report) => format!(
            "{}: listened {}, report not delivered",
            report.song_id,
            format_duration_ms(report.duration_ms)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ArtistId, PlayReport, SongId};

    fn song(id: &str, title: &str, seconds: u32) -> Song {
        Song {
            id: SongId::from(id),
            title: title.to_string(),
            artist_id: ArtistId::from("a1"),
            artist_name: "Lumen".to_string(),
            album_id: None,
            genre: None,
            duration_seconds: seconds,
            audio_url: None,
            cover_url: None,
            play_count: 0,
        }
    }

    #[test]
    fn test_song_line_formats_duration() {
        let line = song_line(&song("7", "Night Drive", 245));
        assert!(line.ends_with("Night Drive - Lumen [4:05]"));
    }

    #[test]
    fn test_paged_footer_points_to_next_page() {
        let page = Page {
            items: vec![song("1", "A", 60)],
            total: 45,
            page: 1,
            page_size: 20,
        };
        let text = paged(&page, song_list(&page.items));
        assert!(text.ends_with("page 1 (45 total), next: --page 2"));
    }

    #[test]
    fn test_empty_search() {
        assert_eq!(
            search_results("zzz", &SearchResults::default()),
            "No results for \"zzz\"."
        );
    }

    #[test]
    fn test_password_report_shows_reason_code() {
        let text = password_report("abc12345", Err(PasswordPolicyError::MissingSpecial));
        assert!(text.contains("missing_special"));
        assert!(text.starts_with("strength: medium (3/4)"));
    }

    #[test]
    fn test_session_outcome_lines() {
        let reported = SessionOutcome::Reported(PlayReport::new(SongId::from("s1"), 65_000));
        assert_eq!(session_outcome(&reported), "s1: reported 1:05");

        let skipped = SessionOutcome::Skipped {
            song_id: SongId::from("s2"),
            elapsed_ms: 3_000,
        };
        assert_eq!(session_outcome(&skipped), "s2: skipped after 0:03, not counted");
    }

    #[test]
    fn test_cached_profile_card_uses_initials() {
        let card = cached_profile_card(&CachedProfile::new("Ada Lovelace", "ada@example.com", None));
        assert_eq!(card, "[AL] Ada Lovelace <ada@example.com>");
    }
}
