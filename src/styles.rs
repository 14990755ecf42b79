use crate::types::StyleInfo;

/// The starter style catalog offered by the browse UI. Not a closed list —
/// any style string can be looked up — these seed the picker. Sorted
/// alphabetically by slug.
pub const STYLES: &[(&str, &str)] = &[
    ("blues", "Blues"),
    ("children", "Children's"),
    ("classical", "Classical"),
    ("electronic", "Electronic"),
    ("folk-world-country", "Folk, World, & Country"),
    ("funk-soul", "Funk / Soul"),
    ("hip-hop", "Hip Hop"),
    ("jazz", "Jazz"),
    ("latin", "Latin"),
    ("non-music", "Non-Music"),
    ("pop", "Pop"),
    ("reggae", "Reggae"),
    ("rock", "Rock"),
    ("stage-screen", "Stage & Screen"),
];

pub fn catalog() -> Vec<StyleInfo> {
    STYLES
        .iter()
        .map(|&(name, display)| StyleInfo {
            name: name.to_string(),
            display_name: display.to_string(),
        })
        .collect()
}
