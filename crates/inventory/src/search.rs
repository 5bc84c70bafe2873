use crate::unit::UnitRecord;

/// Units whose style number or location contains `term` (case-insensitive).
///
/// A blank term keeps everything.
pub fn search_units<'a>(units: &'a [UnitRecord], term: &str) -> Vec<&'a UnitRecord> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return units.iter().collect();
    }

    units
        .iter()
        .filter(|u| {
            u.style_number.to_string().contains(&needle) || u.location.to_lowercase().contains(&needle)
        })
        .collect()
}
