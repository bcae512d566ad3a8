//! Grid Supply Point region lookup.

/// Display name used for region codes missing from the table.
pub const UNKNOWN_REGION: &str = "Unknown";

/// The 14 GSP regions keyed by their single-letter code.
pub const GSP_REGIONS: [(char, &str); 14] = [
    ('A', "Eastern"),
    ('B', "East Midlands"),
    ('C', "South Eastern"),
    ('D', "South"),
    ('E', "South Western"),
    ('F', "Southern"),
    ('G', "North Western"),
    ('H', "North Eastern"),
    ('J', "Yorkshire"),
    ('K', "South Wales"),
    ('L', "North Wales & Merseyside"),
    ('M', "Scotland South"),
    ('N', "Scotland North"),
    ('P', "Northern Ireland"),
];

/// Resolves a region code to its display name.
///
/// Anything that is not exactly one known letter resolves to [`UNKNOWN_REGION`].
pub fn region_name(code: &str) -> &'static str {
    let mut chars = code.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => GSP_REGIONS
            .iter()
            .find(|(c, _)| *c == letter)
            .map_or(UNKNOWN_REGION, |(_, name)| name),
        _ => UNKNOWN_REGION,
    }
}

/// Extracts the region code from a meter point's GSP group id (`"_C"` → `"C"`).
pub fn region_code_from_group_id(group_id: &str) -> &str {
    group_id.strip_prefix('_').unwrap_or(group_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(region_name("A"), "Eastern");
        assert_eq!(region_name("C"), "South Eastern");
        assert_eq!(region_name("P"), "Northern Ireland");
    }

    #[test]
    fn skipped_letters_and_junk_are_unknown() {
        assert_eq!(region_name("I"), UNKNOWN_REGION);
        assert_eq!(region_name("O"), UNKNOWN_REGION);
        assert_eq!(region_name("Z"), UNKNOWN_REGION);
        assert_eq!(region_name("c"), UNKNOWN_REGION);
        assert_eq!(region_name(""), UNKNOWN_REGION);
        assert_eq!(region_name("CC"), UNKNOWN_REGION);
    }

    #[test]
    fn group_id_prefix_is_stripped() {
        assert_eq!(region_code_from_group_id("_C"), "C");
        assert_eq!(region_code_from_group_id("J"), "J");
    }
}
