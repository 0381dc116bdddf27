//! Picks which gallery images go into the export's photo column.

use crate::types::CatalogPicture;

/// Gallery positions exported after the lead image.
pub const PREFERRED_PHOTO_POSITIONS: [usize; 6] = [0, 3, 5, 7, 8, 9];

/// Gallery position of the lead image.
const LEAD_POSITION: usize = 2;

/// Builds the `"; "`-joined photo list for a product gallery.
///
/// The lead image (position 2) comes first, followed by every position listed
/// in `preferred`, in gallery order. Galleries shorter than three images have
/// no lead and start directly with the preferred positions; the lead is never
/// repeated if `preferred` also names it.
///
/// Returns `None` for an empty gallery.
#[must_use]
pub fn select_photos(pictures: &[CatalogPicture], preferred: &[usize]) -> Option<String> {
    if pictures.is_empty() {
        return None;
    }

    let lead = pictures.get(LEAD_POSITION);
    let urls: Vec<&str> = lead
        .into_iter()
        .chain(
            pictures
                .iter()
                .enumerate()
                .filter(|(pos, _)| preferred.contains(pos))
                .filter(|(pos, _)| *pos != LEAD_POSITION)
                .map(|(_, picture)| picture),
        )
        .map(|picture| picture.main_picture_url.as_str())
        .collect();

    Some(urls.join("; "))
}
