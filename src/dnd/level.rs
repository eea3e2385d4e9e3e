//! Indent-level projection for organization drags.
//!
//! While the pointer moves, the horizontal displacement is turned into a
//! target depth and the parent that depth implies at the drop position. The
//! result is a preview only; nothing is mutated here.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::{level_of, node_map, Node};

/// Projected depth and parent for the dragged organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPreview {
    pub level: usize,
    pub parent: Option<String>,
}

/// Pointer-move payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragMove {
    pub active_id: String,
    pub over_id: String,
    /// Horizontal pointer displacement since drag start, in pixels
    pub delta_x: f64,
}

/// Move the element at `from` so it ends up at index `to`.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Whole indent steps covered by `delta_x`.
fn projected_steps(delta_x: f64, indent_width: f64) -> i64 {
    if !delta_x.is_finite() || !indent_width.is_finite() || indent_width <= 0.0 {
        return 0;
    }
    (delta_x / indent_width).round() as i64
}

/// Resolve the level and parent `active_id` would get if dropped on `over_id`
/// after a horizontal drag of `delta_x` pixels.
///
/// The level is clamped between the level of the node after the drop point
/// and one more than the level of the node before it. Returns `None` when
/// either id is not in `orgs`.
pub fn calc_level<T: Node>(
    orgs: &[T],
    active_id: &str,
    over_id: &str,
    delta_x: f64,
    indent_width: f64,
) -> Option<LevelPreview> {
    let active_index = orgs.iter().position(|o| o.identifier() == active_id)?;
    let over_index = orgs.iter().position(|o| o.identifier() == over_id)?;
    let map = node_map(orgs);

    let mut order: Vec<&T> = orgs.iter().collect();
    array_move(&mut order, active_index, over_index);

    let prev = over_index.checked_sub(1).map(|i| order[i]);
    let next = order.get(over_index + 1).copied();

    let min_level = next.map_or(0, |n| level_of(&map, n.identifier()));
    let max_level = prev.map_or(0, |p| level_of(&map, p.identifier()) + 1);

    let desired = level_of(&map, active_id) as i64 + projected_steps(delta_x, indent_width);
    let level = if desired >= max_level as i64 {
        max_level
    } else if desired < min_level as i64 {
        min_level
    } else {
        desired as usize
    };

    let parent = match prev {
        _ if level == 0 => None,
        None => None,
        Some(prev) => {
            let prev_level = level_of(&map, prev.identifier());
            if level == prev_level {
                prev.parent().map(str::to_string)
            } else if level > prev_level {
                Some(prev.identifier().to_string())
            } else {
                order[..over_index]
                    .iter()
                    .rev()
                    .filter(|n| n.identifier() != active_id)
                    .find(|n| level_of(&map, n.identifier()) == level)
                    .and_then(|n| n.parent().map(str::to_string))
            }
        }
    };

    trace!(
        active_id,
        over_id,
        min_level,
        max_level,
        level,
        ?parent,
        "calc_level"
    );
    Some(LevelPreview { level, parent })
}
