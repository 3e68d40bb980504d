// Connected-component labeling (8-connectivity) over a BitGrid

use super::BitGrid;

/// Component ids for every cell of a grid.
///
/// `0` marks unset cells; set cells carry an id in `1..=count`, numbered in
/// raster order of each component's first cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub width: u32,
    pub height: u32,
    pub ids: Vec<u32>,
    pub count: u32,
}

impl Labels {
    /// Component id at `(x, y)`, or 0 outside the grid.
    pub fn get(&self, x: u32, y: u32) -> u32 {
        if x < self.width && y < self.height {
            self.ids[y as usize * self.width as usize + x as usize]
        } else {
            0
        }
    }

    /// Number of cells in each component, indexed by id (index 0 unused).
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.count as usize + 1];
        for &id in &self.ids {
            if id != 0 {
                sizes[id as usize] += 1;
            }
        }
        sizes[0] = 0;
        sizes
    }
}

/// Label the 8-connected regions of set cells in `grid`.
///
/// Uses an explicit-stack flood fill so large regions cannot overflow the
/// call stack.
pub fn label_components(grid: &BitGrid) -> Labels {
    let w = grid.width() as usize;
    let h = grid.height() as usize;
    let cells = grid.as_slice();

    let mut ids = vec![0u32; w * h];
    let mut count = 0u32;
    let mut stack: Vec<usize> = Vec::new();

    for start in 0..w * h {
        if !cells[start] || ids[start] != 0 {
            continue;
        }

        count += 1;
        ids[start] = count;
        stack.push(start);

        while let Some(idx) = stack.pop() {
            let x = idx % w;
            let y = idx / w;

            let x_lo = x.saturating_sub(1);
            let x_hi = (x + 1).min(w - 1);
            let y_lo = y.saturating_sub(1);
            let y_hi = (y + 1).min(h - 1);

            for ny in y_lo..=y_hi {
                for nx in x_lo..=x_hi {
                    let n = ny * w + nx;
                    if cells[n] && ids[n] == 0 {
                        ids[n] = count;
                        stack.push(n);
                    }
                }
            }
        }
    }

    Labels {
        width: grid.width(),
        height: grid.height(),
        ids,
        count,
    }
}
