// Leftmost window of `target` within a mismatch tolerance of `query`

/// Half-open window `[start, end)` in target coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowMatch {
    pub start: usize,
    pub end: usize,
}

/// Slide `query` over `target` and return the first window with at most
/// `tolerance` mismatching characters.
///
/// The comparison of a window stops as soon as the mismatch count exceeds
/// the tolerance. A query longer than the target never matches.
pub fn find(query: &str, target: &str, tolerance: usize) -> Option<WindowMatch> {
    let query = query.as_bytes();
    let target = target.as_bytes();
    if query.len() > target.len() {
        return None;
    }
    (0..=target.len() - query.len())
        .find(|&start| within_tolerance(query, &target[start..start + query.len()], tolerance))
        .map(|start| WindowMatch {
            start,
            end: start + query.len(),
        })
}

fn within_tolerance(query: &[u8], window: &[u8], tolerance: usize) -> bool {
    let mut missed = 0usize;
    for (q, t) in query.iter().zip(window) {
        if q != t {
            missed += 1;
            if missed > tolerance {
                return false;
            }
        }
    }
    true
}
