//! Dense 3D grids indexed `[y][z][x]`, the common backing store for a cell
//! template's block IDs, data nibbles, and placement mask.

use serde::{Deserialize, Serialize};

/// The `(height, width, length)` extent of a 3D grid, in the `(y, z, x)` axis
/// order used throughout the placer, router, and extractor.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Dims {
    /// Extent along Y (height).
    pub height: u32,
    /// Extent along Z (width).
    pub width: u32,
    /// Extent along X (length).
    pub length: u32,
}

impl Dims {
    /// Creates a new `Dims` from explicit height/width/length.
    pub fn new(height: u32, width: u32, length: u32) -> Self {
        Self {
            height,
            width,
            length,
        }
    }

    /// Returns the total voxel count `height * width * length`.
    pub fn volume(&self) -> usize {
        self.height as usize * self.width as usize * self.length as usize
    }

    /// Returns `true` if the given `(y, z, x)` coordinate lies within this
    /// grid's bounds. Negative coordinates (expressed as `i64`) are always
    /// out of bounds.
    pub fn contains(&self, y: i64, z: i64, x: i64) -> bool {
        y >= 0
            && z >= 0
            && x >= 0
            && (y as u32) < self.height
            && (z as u32) < self.width
            && (x as u32) < self.length
    }
}

/// A dense 3D grid of `T`, stored row-major in `(y, z, x)` order.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Grid3<T> {
    /// The grid's extent.
    pub dims: Dims,
    data: Vec<T>,
}

impl<T: Clone> Grid3<T> {
    /// Creates a grid of the given dimensions, filled with `value`.
    pub fn filled(dims: Dims, value: T) -> Self {
        Self {
            data: vec![value; dims.volume()],
            dims,
        }
    }

    /// Builds a grid from nested `[y][z][x]` vectors, as read from a JSON
    /// library document. Returns `None` if the nested vectors are ragged
    /// (rows of differing length at any level).
    pub fn from_nested(nested: Vec<Vec<Vec<T>>>) -> Option<Self> {
        let height = nested.len();
        let width = nested.first().map_or(0, |plane| plane.len());
        let length = nested
            .first()
            .and_then(|plane| plane.first())
            .map_or(0, |row| row.len());

        let mut data = Vec::with_capacity(height * width * length);
        for plane in &nested {
            if plane.len() != width {
                return None;
            }
            for row in plane {
                if row.len() != length {
                    return None;
                }
                data.extend(row.iter().cloned());
            }
        }

        Some(Self {
            dims: Dims::new(height as u32, width as u32, length as u32),
            data,
        })
    }

    fn index(&self, y: u32, z: u32, x: u32) -> usize {
        (y as usize * self.dims.width as usize + z as usize) * self.dims.length as usize
            + x as usize
    }

    /// Returns the value at `(y, z, x)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn get(&self, y: u32, z: u32, x: u32) -> &T {
        &self.data[self.index(y, z, x)]
    }

    /// Sets the value at `(y, z, x)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn set(&mut self, y: u32, z: u32, x: u32, value: T) {
        let idx = self.index(y, z, x);
        self.data[idx] = value;
    }

    /// Iterates over every `((y, z, x), &T)` pair in the grid.
    pub fn iter(&self) -> impl Iterator<Item = ((u32, u32, u32), &T)> {
        let (h, w, l) = (self.dims.height, self.dims.width, self.dims.length);
        (0..h).flat_map(move |y| {
            (0..w).flat_map(move |z| (0..l).map(move |x| (y, z, x)))
        }).map(move |(y, z, x)| ((y, z, x), self.get(y, z, x)))
    }

    /// Rotates the grid 90 degrees counter-clockwise about Y, `turns` times.
    ///
    /// Per the rotation rule `(y, z, x) -> (y, length-1-x, z)`: the returned
    /// grid has dimensions `(height, length, width)` — width and length swap
    /// on every quarter turn.
    pub fn rot90(&self, turns: u32) -> Self {
        let mut current = self.clone();
        for _ in 0..(turns % 4) {
            current = current.rot90_once();
        }
        current
    }

    fn rot90_once(&self) -> Self {
        let (h, w, l) = (self.dims.height, self.dims.width, self.dims.length);
        let new_dims = Dims::new(h, l, w);
        // Safe default-fill placeholder; every cell is overwritten below.
        let mut out = Grid3 {
            dims: new_dims,
            data: self.data.clone(),
        };
        for y in 0..h {
            for z in 0..w {
                for x in 0..l {
                    let new_z = l - 1 - x;
                    let new_x = z;
                    out.set(y, new_z, new_x, self.get(y, z, x).clone());
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid3<u8> {
        // height=1, width=2, length=3
        Grid3::from_nested(vec![vec![
            vec![0, 1, 2],
            vec![3, 4, 5],
        ]])
        .unwrap()
    }

    #[test]
    fn dims_contains() {
        let d = Dims::new(2, 3, 4);
        assert!(d.contains(0, 0, 0));
        assert!(d.contains(1, 2, 3));
        assert!(!d.contains(2, 0, 0));
        assert!(!d.contains(0, -1, 0));
    }

    #[test]
    fn from_nested_rejects_ragged() {
        let ragged = vec![vec![vec![0, 1], vec![2]]];
        assert!(Grid3::from_nested(ragged).is_none());
    }

    #[test]
    fn get_set_roundtrip() {
        let mut g = sample();
        assert_eq!(*g.get(0, 1, 2), 5);
        g.set(0, 1, 2, 9);
        assert_eq!(*g.get(0, 1, 2), 9);
    }

    #[test]
    fn rot90_swaps_width_and_length() {
        let g = sample();
        let r = g.rot90(1);
        assert_eq!(r.dims, Dims::new(1, 3, 2));
    }

    #[test]
    fn rot90_maps_named_coordinate() {
        // (y=0, z=1, x=0) -> (y=0, z=length-1-x=2, x=z=1)
        let g = sample();
        let r = g.rot90(1);
        assert_eq!(*r.get(0, 2, 1), *g.get(0, 1, 0));
    }

    #[test]
    fn rot90_involution() {
        let g = sample();
        let rotated4 = g.rot90(1).rot90(1).rot90(1).rot90(1);
        assert_eq!(rotated4, g);
    }

    #[test]
    fn rot90_zero_is_identity() {
        let g = sample();
        assert_eq!(g.rot90(0), g);
        assert_eq!(g.rot90(4), g);
    }
}
