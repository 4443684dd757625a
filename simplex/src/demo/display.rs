use super::PlaylistEntry;

const SEPARATOR: &str =
    "-------------------------------+-----------------------+--------------------";

/// Renders playlist entries as the fixed-width table the demo prints:
/// a header, a separator, one line per entry and a trailing blank line.
pub fn render_playlist(entries: &[PlaylistEntry]) -> String {
    let mut lines = vec![table_line("title", "album", "artist"), SEPARATOR.to_owned()];
    lines.extend(
        entries
            .iter()
            .map(|entry| table_line(&entry.title, &entry.album, &entry.artist)),
    );

    let mut out = lines.join("\n");
    out.push_str("\n\n");
    out
}

fn table_line(title: &str, album: &str, artist: &str) -> String {
    format!("{title:<30}\t{album:<20}\t{artist:<20}")
}
