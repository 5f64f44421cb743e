//! Subtitle pairing for renamed episodes.

pub const SUBTITLE_EXTENSION: &str = ".srt";

/// Language tag appended to subtitles that do not have one.
pub const DEFAULT_SUBTITLE_LANGUAGE: &str = "en";

/// Find the subtitle belonging to a media file.
///
/// Returns the first name in listing order that starts with the media file stem
/// and ends with `.srt`.
pub fn find_subtitle<'a, I>(file_names: I, media_stem: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    file_names
        .into_iter()
        .map(String::as_str)
        .find(|name| subtitle_suffix(name, media_stem).is_some())
}

/// Text between the media stem and the `.srt` extension, for example `.en`.
fn subtitle_suffix<'a>(subtitle_name: &'a str, media_stem: &str) -> Option<&'a str> {
    subtitle_name
        .strip_prefix(media_stem)?
        .strip_suffix(SUBTITLE_EXTENSION)
}

/// Language tag of the preserved suffix: the text after its last dot.
fn language_tag(suffix: &str) -> Option<(&str, &str)> {
    suffix.rsplit_once('.').filter(|(_, tag)| !tag.is_empty())
}

/// New subtitle file name matching the renamed media stem.
///
/// Keeps whatever came between the old stem and `.srt`,
/// appends the default language when there is no language tag,
/// and normalizes `eng` to `en`.
///
/// ```rust
/// use episode_rename::subtitle::renamed_subtitle;
///
/// assert_eq!(renamed_subtitle("Show - 01x02.en.srt", "Show - 01x02", "S001E002", "en"), "S001E002.en.srt");
/// assert_eq!(renamed_subtitle("Show - 01x02.srt", "Show - 01x02", "S001E002", "en"), "S001E002.en.srt");
/// ```
#[must_use]
pub fn renamed_subtitle(subtitle_name: &str, old_stem: &str, new_stem: &str, default_language: &str) -> String {
    let suffix = subtitle_suffix(subtitle_name, old_stem).unwrap_or_default();
    let suffix = match language_tag(suffix) {
        Some((head, tag)) if tag.eq_ignore_ascii_case("eng") => format!("{head}.en"),
        Some(_) => suffix.to_string(),
        None => format!("{suffix}.{default_language}"),
    };
    format!("{new_stem}{suffix}{SUBTITLE_EXTENSION}")
}
