//! Connected component labeling by flood fill over a foreground bitmap.
//!
//! Non-recursive: one explicit stack is reused for every component, and a
//! visited bitmap marks pixels as they are pushed so each foreground pixel
//! lands in exactly one component.

use common::BitBuffer2;

use super::config::Connectivity;
use crate::geometry::Aabb;

const FOUR_NEIGHBORS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const EIGHT_NEIGHBORS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

impl Connectivity {
    #[inline]
    fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &FOUR_NEIGHBORS,
            Connectivity::Eight => &EIGHT_NEIGHBORS,
        }
    }
}

/// A labeled component: its bounding box and the linear indices of its pixels.
#[derive(Debug, Clone)]
pub(crate) struct Component {
    pub bbox: Aabb,
    pub pixels: Vec<usize>,
}

impl Component {
    #[inline]
    pub fn area(&self) -> usize {
        self.pixels.len()
    }
}

/// Label every component of `mask` with at least `min_area` pixels.
///
/// Components come out in raster order of their first pixel.
pub(crate) fn label_components(
    mask: &BitBuffer2,
    connectivity: Connectivity,
    min_area: usize,
) -> Vec<Component> {
    let width = mask.width();
    let height = mask.height();
    let offsets = connectivity.offsets();

    let mut visited = BitBuffer2::new_default(width, height);
    let mut stack: Vec<usize> = Vec::new();
    let mut members: Vec<usize> = Vec::new();
    let mut components = Vec::new();
    let mut discarded = 0usize;

    for start in 0..mask.len() {
        if !mask.get(start) || visited.test_and_set(start) {
            continue;
        }

        members.clear();
        stack.push(start);
        let mut bbox = Aabb::empty();

        while let Some(idx) = stack.pop() {
            let x = idx % width;
            let y = idx / width;
            bbox.include(x, y);
            members.push(idx);

            for &(dx, dy) in offsets {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let n = ny as usize * width + nx as usize;
                if mask.get(n) && !visited.test_and_set(n) {
                    stack.push(n);
                }
            }
        }

        if members.len() < min_area {
            discarded += 1;
            continue;
        }

        components.push(Component {
            bbox,
            pixels: members.clone(),
        });
    }

    tracing::debug!(
        "Labeled {} components ({} below {} px discarded)",
        components.len(),
        discarded,
        min_area
    );

    components
}
