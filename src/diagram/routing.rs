//! Foreign-key routing through the shared vertical trunk.

use crate::schema::ForeignKeyEdge;

use super::placement::Placement;
use super::types::{Arrow, Rect, RoutedEdge};

/// Column just outside the source box, on the side facing the trunk.
#[inline]
pub fn exit_x(rect: &Rect, mid_x: isize) -> isize {
    if (rect.right as isize) < mid_x {
        rect.right as isize + 1
    } else {
        rect.left as isize - 1
    }
}

/// Column just outside the destination box, on the side facing the trunk.
#[inline]
pub fn entry_x(rect: &Rect, mid_x: isize) -> isize {
    if rect.left as isize > mid_x {
        rect.left as isize - 1
    } else {
        rect.right as isize + 1
    }
}

#[inline]
pub fn arrow_for(entry_x: isize, mid_x: isize) -> Arrow {
    if entry_x > mid_x { Arrow::Right } else { Arrow::Left }
}

/// Route every edge whose endpoints were placed, in the given order.
///
/// Each edge is three segments: out of the source to the trunk, along the
/// trunk, then into the destination, which gets an arrowhead on its last cell.
/// Edges naming a table that was not placed are skipped.
pub fn route_edges(placement: &mut Placement, edges: &[ForeignKeyEdge]) -> Vec<RoutedEdge> {
    let mid_x = placement.mid_x() as isize;
    let mut routed = Vec::with_capacity(edges.len());

    for edge in edges {
        let from = edge.source_key();
        let to = edge.destination_key();
        let (Some(src), Some(dst)) = (placement.rects.get(&from), placement.rects.get(&to)) else {
            tracing::debug!(%edge, "skipping foreign key to a table outside the diagram");
            continue;
        };

        let ay = src.mid_y() as isize;
        let by = dst.mid_y() as isize;
        let ax = exit_x(src, mid_x);
        let bx = entry_x(dst, mid_x);
        let arrow = arrow_for(bx, mid_x);

        let canvas = &mut placement.canvas;
        canvas.draw_horizontal(ax, mid_x, ay);
        canvas.draw_vertical(mid_x, ay, by);
        canvas.draw_horizontal(mid_x, bx, by);
        canvas.draw_point(bx, by, arrow.glyph());

        routed.push(RoutedEdge {
            from,
            to,
            exit: (ax, ay),
            entry: (bx, by),
            arrow,
        });
    }

    routed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_faces_trunk() {
        let left = Rect::from_origin(4, 1, 20, 6);
        let right = Rect::from_origin(36, 1, 20, 6);
        assert_eq!(exit_x(&left, 32), 24);
        assert_eq!(exit_x(&right, 32), 35);
    }

    #[test]
    fn test_entry_faces_trunk() {
        let left = Rect::from_origin(4, 1, 20, 6);
        let right = Rect::from_origin(36, 1, 20, 6);
        assert_eq!(entry_x(&left, 32), 24);
        assert_eq!(entry_x(&right, 32), 35);
    }

    #[test]
    fn test_arrow_direction() {
        assert_eq!(arrow_for(35, 32), Arrow::Right);
        assert_eq!(arrow_for(24, 32), Arrow::Left);
        assert_eq!(arrow_for(32, 32), Arrow::Left);
    }
}
