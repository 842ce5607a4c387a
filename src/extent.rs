//! Extent resolution
//!
//! Finds the maximal contiguous run of positions carrying an annotation
//! key around a point. The rendering engine applies one contiguous range
//! per regex match, so a linear scan bounded by the run length is enough.

use crate::annotations::{AnnotationKey, AnnotationSource};

/// Find the extent of the annotated run containing `point`
///
/// Returns the half-open range `[start, end)` of every contiguous
/// position holding `key`, or `None` if `point` itself carries no value
/// for `key`. Safe at document boundaries.
pub fn find_extent(
    source: &dyn AnnotationSource,
    point: usize,
    key: &AnnotationKey,
) -> Option<(usize, usize)> {
    if point >= source.len() || !source.has_annotation(point, key) {
        return None;
    }

    let mut start = point;
    while start > 0 && source.has_annotation(start - 1, key) {
        start -= 1;
    }

    let mut end = point + 1;
    while end < source.len() && source.has_annotation(end, key) {
        end += 1;
    }

    Some((start, end))
}

/// Find the extent of the clickable run containing `point`
///
/// Shorthand for [`find_extent`] with the default clickable marker key.
pub fn find_clickable_extent(source: &dyn AnnotationSource, point: usize) -> Option<(usize, usize)> {
    find_extent(source, point, &AnnotationKey::Clickable)
}
