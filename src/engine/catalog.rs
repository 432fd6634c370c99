//! Level catalog
//!
//! Immutable, ordered level definitions. Canonical answers are catalog data,
//! not derived: the engine verifies submissions against them and never
//! recomputes an eigen-decomposition.

use glam::{Mat2, Mat3, Vec3};
use serde::Serialize;

/// The matrix shown for an escape room, 2x2 or 3x3
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PuzzleMatrix {
    Two(Mat2),
    Three(Mat3),
}

impl PuzzleMatrix {
    pub fn from_rows_2(rows: [[f32; 2]; 2]) -> Self {
        // glam builds column-major; the literal is row-major
        Self::Two(Mat2::from_cols_array_2d(&rows).transpose())
    }

    pub fn from_rows_3(rows: [[f32; 3]; 3]) -> Self {
        Self::Three(Mat3::from_cols_array_2d(&rows).transpose())
    }

    /// Matrix size (2 or 3), also the arity of every submission for the level
    pub fn dim(&self) -> usize {
        match self {
            Self::Two(_) => 2,
            Self::Three(_) => 3,
        }
    }

    /// Row `i`, z-padded for 2x2 matrices
    pub fn row(&self, i: usize) -> Vec3 {
        match self {
            Self::Two(m) => m.row(i).extend(0.0),
            Self::Three(m) => m.row(i),
        }
    }
}

/// What the player must do to clear a level, fixed at catalog construction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Challenge {
    /// Eigen-decomposition room: the eigenvalue set unlocks the door, an
    /// eigenvector proof opens it
    EigenRoom {
        matrix: PuzzleMatrix,
        /// Repeats carry algebraic multiplicity
        eigenvalues: Vec<f32>,
        /// Positionally paired with `eigenvalues`; 2x2 vectors carry z = 0
        eigenvectors: Vec<Vec3>,
    },
    /// Navigation mission: steer the ship from `start` to within the arrival
    /// radius of `target`
    Mission { start: Vec3, target: Vec3 },
}

impl Challenge {
    /// Submission arity for this challenge
    pub fn dim(&self) -> usize {
        match self {
            Self::EigenRoom { matrix, .. } => matrix.dim(),
            Self::Mission { .. } => 3,
        }
    }
}

/// One level, loaded once at startup and never mutated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelDefinition {
    /// 1-indexed, contiguous
    pub id: u32,
    pub description: &'static str,
    pub challenge: Challenge,
    /// Revealed one at a time, in order
    pub hints: [&'static str; 3],
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("no level {id}: catalog holds levels 1..={count}")]
    NotFound { id: u32, count: usize },
}

/// Read-only ordered sequence of levels
#[derive(Debug, Clone)]
pub struct Catalog {
    levels: Vec<LevelDefinition>,
}

impl Catalog {
    pub fn get(&self, id: u32) -> Result<&LevelDefinition, CatalogError> {
        if id == 0 {
            return Err(CatalogError::NotFound {
                id,
                count: self.levels.len(),
            });
        }
        self.levels.get(id as usize - 1).ok_or(CatalogError::NotFound {
            id,
            count: self.levels.len(),
        })
    }

    pub fn count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_last(&self, id: u32) -> bool {
        id as usize == self.levels.len()
    }

    /// The five eigen-decomposition escape rooms
    pub fn escape_rooms() -> Self {
        let levels = vec![
            LevelDefinition {
                id: 1,
                description: "Find the eigenvalues of the matrix to unlock the door.",
                challenge: Challenge::EigenRoom {
                    matrix: PuzzleMatrix::from_rows_2([[3.0, 1.0], [1.0, 3.0]]),
                    eigenvalues: vec![2.0, 4.0],
                    eigenvectors: vec![
                        Vec3::new(-0.7071, 0.7071, 0.0),
                        Vec3::new(0.7071, 0.7071, 0.0),
                    ],
                },
                hints: [
                    "The characteristic polynomial is det(A - λI).",
                    "For a 2×2 matrix, the characteristic polynomial is λ² - (trace)λ + det.",
                    "The trace is 6 and the determinant is 8, so the polynomial is λ² - 6λ + 8.",
                ],
            },
            LevelDefinition {
                id: 2,
                description: "This room requires finding eigenvalues with complex numbers.",
                challenge: Challenge::EigenRoom {
                    matrix: PuzzleMatrix::from_rows_2([[3.0, -2.0], [2.0, -1.0]]),
                    eigenvalues: vec![1.0, 1.0],
                    eigenvectors: vec![Vec3::new(1.0, 1.0, 0.0), Vec3::new(2.0, 2.0, 0.0)],
                },
                hints: [
                    "This matrix has a repeated eigenvalue.",
                    "The characteristic polynomial is λ² - 2λ + 1 = (λ - 1)².",
                    "The eigenvalue 1 has algebraic multiplicity 2.",
                ],
            },
            LevelDefinition {
                id: 3,
                description: "Find the eigenvalues of this 3×3 matrix to continue.",
                challenge: Challenge::EigenRoom {
                    matrix: PuzzleMatrix::from_rows_3([
                        [4.0, 0.0, 1.0],
                        [0.0, 5.0, 0.0],
                        [1.0, 0.0, 4.0],
                    ]),
                    eigenvalues: vec![3.0, 5.0, 5.0],
                    eigenvectors: vec![
                        Vec3::new(-0.7071, 0.0, 0.7071),
                        Vec3::new(0.0, 1.0, 0.0),
                        Vec3::new(0.7071, 0.0, 0.7071),
                    ],
                },
                hints: [
                    "One eigenvalue is 5, and it's repeated.",
                    "The other eigenvalue is 3.",
                    "The matrix is nearly diagonal, which makes finding eigenvalues easier.",
                ],
            },
            LevelDefinition {
                id: 4,
                description: "This room has a diagonalizable matrix with distinct eigenvalues.",
                challenge: Challenge::EigenRoom {
                    matrix: PuzzleMatrix::from_rows_3([
                        [2.0, 1.0, 0.0],
                        [0.0, 2.0, 0.0],
                        [0.0, 0.0, 3.0],
                    ]),
                    eigenvalues: vec![2.0, 2.0, 3.0],
                    eigenvectors: vec![Vec3::X, Vec3::Y, Vec3::Z],
                },
                hints: [
                    "This is an upper triangular matrix.",
                    "For triangular matrices, the eigenvalues are the diagonal entries.",
                    "The eigenvalues are 2 (repeated) and 3.",
                ],
            },
            LevelDefinition {
                id: 5,
                description: "Final challenge: Find the eigenvalues of this matrix to escape!",
                challenge: Challenge::EigenRoom {
                    matrix: PuzzleMatrix::from_rows_3([
                        [6.0, -1.0, 0.0],
                        [2.0, 3.0, 0.0],
                        [0.0, 0.0, 5.0],
                    ]),
                    eigenvalues: vec![5.0, 5.0, 4.0],
                    eigenvectors: vec![
                        Vec3::new(0.0, 0.0, 1.0),
                        Vec3::new(1.0, 1.0, 0.0),
                        Vec3::new(-1.0, 2.0, 0.0),
                    ],
                },
                hints: [
                    "One eigenvalue is clearly visible in the matrix.",
                    "For the 2×2 submatrix in the upper left, find its eigenvalues.",
                    "The eigenvalues are 5 (repeated) and 4.",
                ],
            },
        ];
        Self { levels }
    }

    /// The five vector navigation missions
    pub fn voyage_missions() -> Self {
        let levels = vec![
            LevelDefinition {
                id: 1,
                description: "Navigate to the checkpoint using vector addition.",
                challenge: Challenge::Mission {
                    start: Vec3::new(0.0, 0.0, 0.0),
                    target: Vec3::new(5.0, 3.0, 0.0),
                },
                hints: [
                    "Adding a vector to your position translates the ship by it.",
                    "The displacement you need is target minus position.",
                    "From the origin, applying (5, 3, 0) lands exactly on the checkpoint.",
                ],
            },
            LevelDefinition {
                id: 2,
                description: "Use vector subtraction to reach the target.",
                challenge: Challenge::Mission {
                    start: Vec3::new(2.0, 1.0, 0.0),
                    target: Vec3::new(-3.0, 4.0, 2.0),
                },
                hints: [
                    "Subtracting a vector moves you opposite to it.",
                    "Work out target minus start component by component.",
                    "You need a displacement of (-5, 3, 2).",
                ],
            },
            LevelDefinition {
                id: 3,
                description: "Apply scalar multiplication to reach the distant target.",
                challenge: Challenge::Mission {
                    start: Vec3::new(2.0, -1.0, 1.0),
                    target: Vec3::new(8.0, -6.0, 4.0),
                },
                hints: [
                    "Scaling a vector stretches it without changing its direction.",
                    "Stage a short vector toward the target, then multiply it up.",
                    "The required displacement is (6, -5, 3).",
                ],
            },
            LevelDefinition {
                id: 4,
                description: "Use the cross product to navigate perpendicular to your current direction.",
                challenge: Challenge::Mission {
                    start: Vec3::new(2.0, 2.0, 2.0),
                    target: Vec3::new(-4.0, 5.0, -3.0),
                },
                hints: [
                    "The cross product of two vectors is perpendicular to both.",
                    "A cross product alone rarely lands on the target: combine it with addition.",
                    "The total displacement you need is (-6, 3, -5).",
                ],
            },
            LevelDefinition {
                id: 5,
                description: "Master 3D vector operations to reach the final checkpoint.",
                challenge: Challenge::Mission {
                    start: Vec3::new(-3.0, -3.0, -3.0),
                    target: Vec3::new(7.0, 7.0, 7.0),
                },
                hints: [
                    "Every operation so far still works out here.",
                    "The checkpoint sits on the diagonal, ten units up each axis.",
                    "Stage (1, 1, 1) and scale it by 10.",
                ],
            },
        ];
        Self { levels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogs() -> [Catalog; 2] {
        [Catalog::escape_rooms(), Catalog::voyage_missions()]
    }

    #[test]
    fn test_ids_contiguous_from_one() {
        for catalog in catalogs() {
            for (i, level) in catalog.levels.iter().enumerate() {
                assert_eq!(level.id as usize, i + 1);
            }
            assert!(catalog.is_last(catalog.count() as u32));
            assert!(!catalog.is_last(1));
        }
    }

    #[test]
    fn test_get_bounds() {
        let catalog = Catalog::escape_rooms();
        assert!(catalog.get(1).is_ok());
        assert!(catalog.get(5).is_ok());
        assert_eq!(
            catalog.get(0),
            Err(CatalogError::NotFound { id: 0, count: 5 })
        );
        assert_eq!(
            catalog.get(6),
            Err(CatalogError::NotFound { id: 6, count: 5 })
        );
    }

    #[test]
    fn test_eigen_data_shape() {
        // eigenvalues.len() == eigenvectors.len() == matrix size, every level
        for level in &Catalog::escape_rooms().levels {
            let Challenge::EigenRoom {
                matrix,
                eigenvalues,
                eigenvectors,
            } = &level.challenge
            else {
                panic!("escape room catalog must hold eigen challenges");
            };
            assert_eq!(eigenvalues.len(), matrix.dim());
            assert_eq!(eigenvectors.len(), matrix.dim());
            // 2x2 vectors stay in the plane
            if matrix.dim() == 2 {
                for v in eigenvectors {
                    assert_eq!(v.z, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_matrix_rows_match_source_data() {
        let m = PuzzleMatrix::from_rows_2([[3.0, 1.0], [1.0, 3.0]]);
        assert_eq!(m.row(0), Vec3::new(3.0, 1.0, 0.0));
        assert_eq!(m.row(1), Vec3::new(1.0, 3.0, 0.0));

        let m = PuzzleMatrix::from_rows_3([[6.0, -1.0, 0.0], [2.0, 3.0, 0.0], [0.0, 0.0, 5.0]]);
        assert_eq!(m.row(0), Vec3::new(6.0, -1.0, 0.0));
        assert_eq!(m.row(2), Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_every_level_has_three_hints() {
        for catalog in catalogs() {
            for level in &catalog.levels {
                assert_eq!(level.hints.len(), 3);
                assert!(level.hints.iter().all(|h| !h.is_empty()));
            }
        }
    }
}
