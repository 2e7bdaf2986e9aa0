//! Instant Insanity: stack four coloured cubes so that each of the four
//! long sides of the tower shows every colour exactly once.
//!
//! Each row of the exact-cover matrix is one orientation of one cube. The
//! first four columns say which cube is placed; the next sixteen are the
//! (colour, side) pairs, each of which must appear exactly once.

use crate::cs::combinatorial::dancing_links::{DancingLinks, Matrix};
use crate::cs::error::{Error, Result};
use log::{debug, warn};

pub const CUBES: usize = 4;
pub const SIDES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
            Color::Green => 2,
            Color::Yellow => 3,
        }
    }

    fn from_char(ch: char) -> Option<Color> {
        match ch.to_ascii_uppercase() {
            'R' => Some(Color::Red),
            'B' => Some(Color::Blue),
            'G' => Some(Color::Green),
            'Y' => Some(Color::Yellow),
            _ => None,
        }
    }
}

/// Face order: left, front, right, back, top, bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cube {
    pub faces: [Color; 6],
}

/// Face permutations putting each pair of opposite faces on top and bottom.
const TOP_BOTTOM: [[usize; 6]; 6] = [
    [0, 1, 2, 3, 4, 5],
    [2, 1, 0, 3, 5, 4],
    [0, 4, 2, 5, 1, 3],
    [2, 5, 0, 4, 3, 1],
    [4, 1, 5, 3, 0, 2],
    [5, 1, 4, 3, 2, 0],
];

/// Quarter turns of the four side faces about the vertical axis.
const QUARTER_TURNS: [[usize; 4]; 4] = [[0, 1, 2, 3], [3, 0, 1, 2], [2, 3, 0, 1], [1, 2, 3, 0]];

impl Cube {
    pub fn new(faces: [Color; 6]) -> Self {
        Cube { faces }
    }

    /// Parses six colour letters (`R`, `B`, `G`, `Y`) in face order.
    ///
    /// # Example
    /// ```
    /// use dlx::puzzles::instant_insanity::{Color, Cube};
    ///
    /// let cube = Cube::parse("RRBYGY").unwrap();
    /// assert_eq!(cube.faces[2], Color::Blue);
    /// assert!(Cube::parse("RRBYG").is_err());
    /// ```
    pub fn parse(faces: &str) -> Result<Self> {
        let parsed: Vec<Color> = faces
            .chars()
            .map(|ch| {
                Color::from_char(ch)
                    .ok_or_else(|| Error::InvalidInput(format!("unknown cube colour '{}'", ch)))
            })
            .collect::<Result<_>>()?;

        let faces: [Color; 6] = parsed.try_into().map_err(|v: Vec<Color>| {
            Error::InvalidInput(format!("a cube has 6 faces, got {}", v.len()))
        })?;

        let cube = Cube { faces };
        if Color::ALL.iter().any(|c| !cube.faces.contains(c)) {
            warn!("cube {:?} does not show all four colours", faces);
        }
        Ok(cube)
    }

    /// All 24 orientations, in the same face order as [`Cube::faces`].
    pub fn rotations(&self) -> Vec<[Color; 6]> {
        let mut rotations = Vec::with_capacity(24);
        for perm in TOP_BOTTOM {
            let reoriented = perm.map(|i| self.faces[i]);
            for turn in QUARTER_TURNS {
                rotations.push([
                    reoriented[turn[0]],
                    reoriented[turn[1]],
                    reoriented[turn[2]],
                    reoriented[turn[3]],
                    reoriented[4],
                    reoriented[5],
                ]);
            }
        }
        rotations
    }
}

/// One cube in the tower, with the colours it shows west, south, east and
/// north.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stacking {
    pub cube: usize,
    pub sides: [Color; SIDES],
}

#[derive(Debug, Clone)]
pub struct InstantInsanity {
    cubes: [Cube; CUBES],
    matrix: Matrix,
    stackings: Vec<Stacking>,
}

impl InstantInsanity {
    pub fn new(cubes: [Cube; CUBES]) -> Result<Self> {
        let num_cols = CUBES + Color::ALL.len() * SIDES;
        let mut rows = Vec::new();
        let mut stackings = Vec::new();

        for (number, cube) in cubes.iter().enumerate() {
            let candidates: Vec<[Color; SIDES]> = cube
                .rotations()
                .iter()
                .map(|r| [r[0], r[1], r[2], r[3]])
                .collect();
            let cube_rows: Vec<Vec<usize>> = candidates
                .iter()
                .map(|sides| {
                    let mut row = vec![number];
                    row.extend(
                        sides
                            .iter()
                            .enumerate()
                            .map(|(side, color)| CUBES + color.index() * SIDES + side),
                    );
                    row
                })
                .collect();

            // Rotations showing the same sides are the same option
            let (unique, origin) = Matrix::from_sparse(num_cols, &cube_rows)?.dedup_rows();
            debug!(
                "cube {} has {} distinct side patterns",
                number,
                unique.num_rows()
            );
            for r in origin {
                rows.push(cube_rows[r].clone());
                stackings.push(Stacking {
                    cube: number,
                    sides: candidates[r],
                });
            }
        }

        let matrix = Matrix::from_sparse(num_cols, &rows)?;
        Ok(InstantInsanity {
            cubes,
            matrix,
            stackings,
        })
    }

    pub fn cubes(&self) -> &[Cube; CUBES] {
        &self.cubes
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// A tower, bottom cube first, or `None` if the cubes cannot be stacked.
    pub fn solve(&self) -> Option<Vec<Stacking>> {
        let rows = DancingLinks::new(self.matrix.clone()).solve()?;
        Some(rows.into_iter().map(|r| self.stackings[r]).collect())
    }

    /// Number of side patterns solving the puzzle. Turning the whole tower
    /// by a quarter turn gives another pattern, so each physical tower is
    /// counted more than once.
    pub fn count_arrangements(&self) -> usize {
        DancingLinks::new(self.matrix.clone()).count_solutions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn cubes(faces: [&str; 4]) -> [Cube; 4] {
        faces.map(|f| Cube::parse(f).unwrap())
    }

    fn assert_valid_tower(tower: &[Stacking]) {
        assert_eq!(tower.len(), CUBES);
        let placed: HashSet<usize> = tower.iter().map(|s| s.cube).collect();
        assert_eq!(placed.len(), CUBES);
        for side in 0..SIDES {
            let shown: HashSet<Color> = tower.iter().map(|s| s.sides[side]).collect();
            assert_eq!(shown.len(), 4, "side {} repeats a colour", side);
        }
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(Cube::parse("RRBYGX"), Err(Error::InvalidInput(_))));
        assert!(matches!(Cube::parse("RRBYGYR"), Err(Error::InvalidInput(_))));
        assert_eq!(Cube::parse("rgbyrg").unwrap().faces[1], Color::Green);
    }

    #[test]
    fn test_rotations_of_a_distinct_cube() {
        let cube = Cube::parse("RBGYRB").unwrap();
        let rotations = cube.rotations();
        assert_eq!(rotations.len(), 24);
        assert_eq!(rotations[0], cube.faces);

        // Every rotation keeps the same faces
        for r in &rotations {
            let mut faces = r.map(|c| c.index());
            faces.sort_unstable();
            let mut original = cube.faces.map(|c| c.index());
            original.sort_unstable();
            assert_eq!(faces, original);
        }
    }

    #[test]
    fn test_matrix_shape() {
        let puzzle = InstantInsanity::new(cubes(["RRBYGY", "RGGYBY", "BBYRGG", "RRRGBY"])).unwrap();
        let m = puzzle.matrix();
        assert_eq!(m.num_cols(), 20);
        // Every row places one cube and fills all four sides
        for row in m.rows() {
            assert_eq!(row[..CUBES].count_ones(), 1);
            assert_eq!(row[CUBES..].count_ones(), SIDES);
        }
        assert_eq!(m.dedup_rows().0.num_rows(), m.num_rows());
    }

    #[test]
    fn test_solvable_tower() {
        let puzzle = InstantInsanity::new(cubes(["RRBYGY", "RGGYBY", "BBYRGG", "RRRGBY"])).unwrap();
        let tower = puzzle.solve().expect("tower should exist");
        assert_valid_tower(&tower);
        assert_eq!(
            tower.iter().map(|s| s.cube).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
        // One physical tower, seen from each of its four quarter turns
        assert_eq!(puzzle.count_arrangements(), 4);
    }

    #[test]
    fn test_plain_cubes_collapse_to_one_option_each() {
        let puzzle = InstantInsanity::new(cubes(["RRRRRR", "BBBBBB", "GGGGGG", "YYYYYY"])).unwrap();
        assert_eq!(puzzle.matrix().num_rows(), 4);
        assert_valid_tower(&puzzle.solve().unwrap());
        assert_eq!(puzzle.count_arrangements(), 1);
    }

    #[test]
    fn test_unsolvable_tower() {
        let puzzle = InstantInsanity::new(cubes(["RRRRRR", "RRRRRR", "BGYBGY", "BGYBGY"])).unwrap();
        assert_eq!(puzzle.solve(), None);
        assert_eq!(puzzle.count_arrangements(), 0);
    }
}
