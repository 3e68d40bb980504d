// Dense boolean pixel masks

pub mod label;

/// A boolean grid with one cell per pixel, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGrid {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl BitGrid {
    /// Create an all-false grid.
    pub fn new(width: u32, height: u32) -> Self {
        BitGrid {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    /// Build a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        BitGrid {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major cells.
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Cell value; out-of-range coordinates read as false.
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[self.index(x, y)]
    }

    /// Panics if `(x, y)` is outside the grid.
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        assert!(
            x < self.width && y < self.height,
            "({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        let idx = self.index(x, y);
        self.bits[idx] = value;
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Binary dilation with a 3x3 all-true structuring element.
    ///
    /// A cell is set in the result when it or any of its eight neighbours is
    /// set in `self`. Cells beyond the border count as unset.
    pub fn dilate3x3(&self) -> BitGrid {
        let (w, h) = (self.width as usize, self.height as usize);
        if w == 0 || h == 0 {
            return self.clone();
        }

        // Horizontal pass, then vertical: the 3x3 box is separable.
        let mut horizontal = vec![false; w * h];
        for y in 0..h {
            let row = &self.bits[y * w..(y + 1) * w];
            let out = &mut horizontal[y * w..(y + 1) * w];
            for x in 0..w {
                let lo = x.saturating_sub(1);
                let hi = (x + 1).min(w - 1);
                out[x] = row[lo..=hi].iter().any(|&b| b);
            }
        }

        let mut bits = vec![false; w * h];
        for y in 0..h {
            let lo = y.saturating_sub(1);
            let hi = (y + 1).min(h - 1);
            for x in 0..w {
                bits[y * w + x] = (lo..=hi).any(|yy| horizontal[yy * w + x]);
            }
        }

        BitGrid {
            width: self.width,
            height: self.height,
            bits,
        }
    }

    /// Cell-wise AND. Panics if the dimensions differ.
    pub fn and(&self, other: &BitGrid) -> BitGrid {
        assert_eq!(
            (self.width, self.height),
            (other.width, other.height),
            "mask dimensions differ"
        );
        BitGrid {
            width: self.width,
            height: self.height,
            bits: self
                .bits
                .iter()
                .zip(&other.bits)
                .map(|(&a, &b)| a && b)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dilate_single_pixel_becomes_3x3_block() {
        let mut grid = BitGrid::new(5, 5);
        grid.set(2, 2, true);

        let dilated = grid.dilate3x3();

        assert_eq!(dilated.count_ones(), 9);
        for y in 1..=3 {
            for x in 1..=3 {
                assert!(dilated.get(x, y), "({x}, {y}) should be set");
            }
        }
        assert!(!dilated.get(0, 0));
        assert!(!dilated.get(4, 2));
    }

    #[test]
    fn test_dilate_corner_is_clipped_at_border() {
        let mut grid = BitGrid::new(4, 4);
        grid.set(0, 0, true);

        let dilated = grid.dilate3x3();

        assert_eq!(dilated.count_ones(), 4);
        assert!(dilated.get(1, 1));
        assert!(!dilated.get(2, 2));
    }

    #[test]
    fn test_dilate_empty_grid() {
        let grid = BitGrid::new(0, 0);
        assert_eq!(grid.dilate3x3().count_ones(), 0);
    }

    #[test]
    fn test_and_intersects() {
        let a = BitGrid::from_fn(3, 1, |x, _| x < 2);
        let b = BitGrid::from_fn(3, 1, |x, _| x > 0);
        let both = a.and(&b);
        assert_eq!(both.as_slice(), &[false, true, false]);
    }

    #[test]
    fn test_get_out_of_range_is_false() {
        let grid = BitGrid::from_fn(2, 2, |_, _| true);
        assert!(!grid.get(2, 0));
        assert!(!grid.get(0, 2));
    }
}
