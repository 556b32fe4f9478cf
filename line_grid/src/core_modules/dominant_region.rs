// THEORY:
// The guide line is assumed to be the biggest dark thing in view. Everything
// else (shadows, debris, a sock) is smaller and gets discarded here.
// Selection is by enclosed polygon area. Ties go to the contour that was traced
// first, which is the one whose first border pixel comes earliest in raster
// order. That makes the choice deterministic for a given mask without
// pretending the extraction order means anything more.

use crate::core_modules::contour::Contour;

/// The contour picked as the guide line, with its position in the input list.
#[derive(Debug, Clone, Copy)]
pub struct DominantRegion<'a> {
    pub index: usize,
    pub contour: &'a Contour,
    pub area: f64,
}

/// Returns the largest-area contour, or `None` when there are no contours.
pub fn select_dominant(contours: &[Contour]) -> Option<DominantRegion<'_>> {
    let mut best: Option<DominantRegion<'_>> = None;
    for (index, contour) in contours.iter().enumerate() {
        let area = contour.area();
        // Strictly greater keeps the earliest contour among equal maxima.
        if best.is_none_or(|b| area > b.area) {
            best = Some(DominantRegion {
                index,
                contour,
                area,
            });
        }
    }
    best
}
