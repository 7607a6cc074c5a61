//! Level-of-detail collection lookup.

/// Collection name suffixes in order of preference (most detailed first).
pub const LOD_SUFFIXES: [&str; 5] = ["_LOD_0", "_LOD_1", "_LOD_2", "_LOD_3", "_LOD_4"];

/// Returns the most detailed LOD collection among `names`.
///
/// Suffixes are tried in order; within one suffix the first matching name
/// wins.
pub fn find_best_lod_collection<S: AsRef<str>>(names: &[S]) -> Option<&str> {
    LOD_SUFFIXES.iter().find_map(|suffix| {
        names
            .iter()
            .map(AsRef::as_ref)
            .find(|name| name.ends_with(suffix))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_lowest_lod() {
        let names = ["Rocket_LOD_2", "Rocket_LOD_0", "Rocket_LOD_1"];
        assert_eq!(find_best_lod_collection(&names), Some("Rocket_LOD_0"));
    }

    #[test]
    fn test_falls_through_missing_levels() {
        let names = vec!["Lights".to_string(), "Car_LOD_3".to_string()];
        assert_eq!(find_best_lod_collection(&names), Some("Car_LOD_3"));
    }

    #[test]
    fn test_no_lod() {
        let names = ["Scene Collection", "Props", "LOD_0_backup", "Brick_LOD_5"];
        assert_eq!(find_best_lod_collection(&names), None);
    }
}
