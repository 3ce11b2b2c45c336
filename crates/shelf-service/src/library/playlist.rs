//! Playlist spreadsheets: one linked document per row.

/// Cell range read from a playlist spreadsheet.
pub const PLAYLIST_RANGE: &str = "A1:A100";

/// Extract the document ids listed in a playlist sheet.
///
/// The first row is a header. Each following row's first cell is a link of
/// the form `https://host/<kind>/d/<id>/...`; rows without such a link are
/// skipped.
pub fn parse_playlist(rows: &[Vec<String>]) -> Vec<String> {
    rows.iter()
        .skip(1)
        .filter_map(|row| row.first())
        .filter_map(|link| document_id(link))
        .collect()
}

fn document_id(link: &str) -> Option<String> {
    let link = link.trim();
    let without_scheme = link.split_once("://").map_or(link, |(_, rest)| rest);
    let path = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    // host / kind / "d" / id
    let id = path.split('/').nth(3)?;
    (!id.is_empty()).then(|| id.to_string())
}
