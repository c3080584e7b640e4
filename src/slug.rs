/// Lower-cases a display name and joins its words with single hyphens.
///
/// Leading and trailing whitespace is dropped, and any run of internal
/// whitespace becomes one `-`, so `"La  Liga"` and `"La Liga"` share a slug.
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn team_logo_path(player_name: &str) -> String {
    format!("./images/{}-logo.png", slugify(player_name))
}
