use super::Marker;
use std::collections::HashSet;

/// Keep one marker per offset and sort by offset.
///
/// Among markers sharing an offset the one earliest in `markers` wins,
/// whatever its chapter number. Markers at different offsets never conflict,
/// even when they claim the same chapter.
pub fn dedup_markers(markers: Vec<Marker>) -> Vec<Marker> {
    let before = markers.len();
    let mut seen = HashSet::with_capacity(markers.len());
    let mut unique: Vec<Marker> = markers
        .into_iter()
        .filter(|marker| seen.insert(marker.offset))
        .collect();

    // Offsets are unique now, so the sort order is total
    unique.sort_unstable_by_key(|marker| marker.offset);

    if unique.len() < before {
        log::debug!(
            "Collapsed {} duplicate marker(s) sharing an offset",
            before - unique.len()
        );
    }
    unique
}
