//! Canonical ordering of dice within a detected layout.
//!
//! Each die gets a bearing from the observer after rotating the layout onto
//! the [`Layout::Bottom`] frame, so ascending bearing sweeps from one open end
//! of the block, around its far side, to the other open end. Indices 0, 2 and
//! 4 of the result are therefore both ends plus the middle of the far side.

use std::cmp::Ordering;

use super::Layout;
use crate::state::{Die, Position};

/// Bearing of `target` seen from `observer`, rotated for `layout`.
pub fn bearing(layout: Layout, observer: Position, target: Position) -> f64 {
    let (dx, dy) = observer.delta_to(target);
    let (x, y) = match layout {
        Layout::Bottom | Layout::Unknown => (dx, dy),
        Layout::Top => (-dx, -dy),
        Layout::Left => (dy, -dx),
        Layout::Right => (-dy, dx),
    };
    f64::from(y).atan2(f64::from(x))
}

/// Sorts `dice` into canonical order for `layout`.
///
/// Ties cannot happen for distinct tiles of a known layout; identifier token
/// order settles them anyway so the result never depends on input order.
pub fn sort_dice(layout: Layout, observer: Position, dice: &mut [Die]) {
    dice.sort_by(|a, b| compare(layout, observer, a, b));
}

fn compare(layout: Layout, observer: Position, a: &Die, b: &Die) -> Ordering {
    let lhs = bearing(layout, observer, a.position);
    let rhs = bearing(layout, observer, b.position);
    lhs.total_cmp(&rhs).then_with(|| a.id.cmp(&b.id))
}
