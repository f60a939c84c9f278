use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::grid::{GRID_WIDTH, Rgb};

/// Largest side of any shape in the catalog.
const MAX_SHAPE_SIZE: usize = 4;

/// A rectangular occupancy matrix of at most 4×4 cells.
///
/// Only the top-left `height × width` region is meaningful. Shapes are plain
/// values: rotating returns a new shape and leaves the original untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    width: u8,
    height: u8,
}

impl Shape {
    /// Builds a shape from rows of `0`/`1` flags.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty or larger than 4×4.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W > 0 && W <= MAX_SHAPE_SIZE);
        assert!(H > 0 && H <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            cells,
            width: W as u8,
            height: H as u8,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    #[must_use]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width() && self.cells[row][col]
    }

    /// Returns the rotation of this shape by 90° clockwise.
    ///
    /// Cell `(i, j)` of the result is cell `(N - 1 - j, i)` of `self`, where
    /// `N` is the row count of `self`. The result is `height × width`.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let n = self.height();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (i, row) in cells.iter_mut().enumerate().take(self.width()) {
            for (j, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - j][i];
            }
        }
        Self {
            cells,
            width: self.height,
            height: self.width,
        }
    }

    /// Returns the `(col, row)` offsets of the filled cells, row by row.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height()).flat_map(move |dy| {
            (0..self.width()).filter_map(move |dx| self.cells[dy][dx].then_some((dx, dy)))
        })
    }
}

/// The seven piece kinds, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[repr(u8)]
pub enum PieceKind {
    I = 0,
    O = 1,
    T = 2,
    L = 3,
    J = 4,
    S = 5,
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the spawn orientation of this kind.
    #[must_use]
    pub const fn shape(self) -> Shape {
        PIECE_SHAPES[self.index()]
    }

    /// Returns the color paired with this kind in the catalog.
    #[must_use]
    pub const fn color(self) -> Rgb {
        PIECE_COLORS[self.index()]
    }
}

const PIECE_SHAPES: [Shape; PieceKind::LEN] = [
    Shape::from_rows([[1, 1, 1, 1]]),
    Shape::from_rows([[1, 1], [1, 1]]),
    Shape::from_rows([[0, 1, 0], [1, 1, 1]]),
    Shape::from_rows([[0, 0, 1], [1, 1, 1]]),
    Shape::from_rows([[1, 0, 0], [1, 1, 1]]),
    Shape::from_rows([[0, 1, 1], [1, 1, 0]]),
    Shape::from_rows([[1, 1, 0], [0, 1, 1]]),
];

const PIECE_COLORS: [Rgb; PieceKind::LEN] = [
    Rgb(0, 255, 255),
    Rgb(255, 255, 0),
    Rgb(128, 0, 128),
    Rgb(255, 127, 0),
    Rgb(0, 0, 255),
    Rgb(0, 255, 0),
    Rgb(255, 0, 0),
];

/// The falling piece: a shape, its color, and the grid offset of the shape's
/// top-left cell.
///
/// Pieces are immutable values. Moving or rotating returns a new `Piece`, and
/// nothing here checks whether the result fits; that is
/// [`Grid::is_valid`](super::grid::Grid::is_valid)'s job.
///
/// The offset is signed so that candidate positions left of the field or
/// above its top can be expressed and then rejected (or, for rows above the
/// top, accepted).
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::new(PieceKind::T);
/// assert_eq!((piece.x(), piece.y()), (4, 0));
///
/// let rotated = piece.rotated();
/// assert_eq!(rotated.shape().width(), 2);
/// assert_eq!(rotated.x(), piece.x());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    color: Rgb,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece of the given kind at its spawn position.
    ///
    /// The shape is centered horizontally
    /// (`GRID_WIDTH / 2 - shape_width / 2`) on the top row.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        let shape = kind.shape();
        let x = GRID_WIDTH / 2 - shape.width() / 2;
        Self {
            kind,
            shape,
            color: kind.color(),
            x: i32::try_from(x).unwrap_or_default(),
            y: 0,
        }
    }

    /// Creates a piece of a random kind at its spawn position.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.random())
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Returns the same piece placed at `(x, y)`.
    #[must_use]
    pub fn at(&self, x: i32, y: i32) -> Self {
        Self { x, y, ..*self }
    }

    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        self.at(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.moved(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.moved(1, 0)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.moved(0, 1)
    }

    /// Returns this piece rotated 90° clockwise around its top-left offset.
    ///
    /// There are no wall kicks: position and color are carried over as is.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }

    /// Returns the absolute `(col, row)` positions of the filled cells.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.occupied_positions_at(self.x, self.y)
    }

    /// Like [`Self::occupied_positions`], but as if the piece were at `(x, y)`.
    pub fn occupied_positions_at(&self, x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.occupied_cells().map(move |(dx, dy)| {
            // Shape offsets are below 4, so the conversion cannot fail.
            let dx = i32::try_from(dx).unwrap_or_default();
            let dy = i32::try_from(dy).unwrap_or_default();
            (x + dx, y + dy)
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_catalog_shapes_are_tetrominoes() {
        for kind in PieceKind::ALL {
            assert_eq!(
                kind.shape().occupied_cells().count(),
                4,
                "{kind} should have 4 cells"
            );
        }
    }

    #[test]
    fn test_catalog_order_matches_colors() {
        assert_eq!(PieceKind::I.color(), Rgb(0, 255, 255));
        assert_eq!(PieceKind::O.color(), Rgb(255, 255, 0));
        assert_eq!(PieceKind::T.color(), Rgb(128, 0, 128));
        assert_eq!(PieceKind::L.color(), Rgb(255, 127, 0));
        assert_eq!(PieceKind::J.color(), Rgb(0, 0, 255));
        assert_eq!(PieceKind::S.color(), Rgb(0, 255, 0));
        assert_eq!(PieceKind::Z.color(), Rgb(255, 0, 0));
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_spawn_positions() {
        // 10 / 2 - width / 2
        assert_eq!(Piece::new(PieceKind::I).x(), 3);
        assert_eq!(Piece::new(PieceKind::O).x(), 4);
        assert_eq!(Piece::new(PieceKind::T).x(), 4);
        assert_eq!(Piece::new(PieceKind::S).x(), 4);
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind);
            assert_eq!(piece.y(), 0);
            assert_eq!(piece.color(), kind.color());
            assert_eq!(piece.kind(), kind);
        }
    }

    #[test]
    fn test_spawn_uses_every_kind() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..500 {
            let piece = Piece::spawn(&mut rng);
            seen[piece.kind().index()] = true;
            assert_eq!(piece.color(), piece.kind().color());
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_rotate_t_clockwise() {
        // 010    10
        // 111 -> 11
        //        10
        let rotated = PieceKind::T.shape().rotated();
        assert_eq!(rotated.width(), 2);
        assert_eq!(rotated.height(), 3);
        assert_eq!(rotated, Shape::from_rows([[1, 0], [1, 1], [1, 0]]));
    }

    #[test]
    fn test_rotate_i_becomes_vertical() {
        let rotated = PieceKind::I.shape().rotated();
        assert_eq!(rotated, Shape::from_rows([[1], [1], [1], [1]]));
    }

    #[test]
    fn test_rotate_l_clockwise() {
        // 001    10
        // 111 -> 10
        //        11
        let rotated = PieceKind::L.shape().rotated();
        assert_eq!(rotated, Shape::from_rows([[1, 0], [1, 0], [1, 1]]));
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind).at(2, 7);
            let rotated = piece.rotated().rotated().rotated().rotated();
            assert_eq!(rotated, piece, "{kind} should return to its original shape");
        }
    }

    #[test]
    fn test_rotate_preserves_position_and_color() {
        let piece = Piece::new(PieceKind::Z).at(-1, -2);
        let rotated = piece.rotated();
        assert_eq!((rotated.x(), rotated.y()), (-1, -2));
        assert_eq!(rotated.color(), piece.color());
        assert_ne!(rotated.shape(), piece.shape());
        // The original is untouched.
        assert_eq!(piece.shape(), &PieceKind::Z.shape());
    }

    #[test]
    fn test_occupied_positions() {
        let piece = Piece::new(PieceKind::O).at(2, 5);
        let positions: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(positions, vec![(2, 5), (3, 5), (2, 6), (3, 6)]);

        let moved: Vec<_> = piece.occupied_positions_at(0, -1).collect();
        assert_eq!(moved, vec![(0, -1), (1, -1), (0, 0), (1, 0)]);
    }

    #[test]
    fn test_moves() {
        let piece = Piece::new(PieceKind::J);
        assert_eq!(piece.left().x(), piece.x() - 1);
        assert_eq!(piece.right().x(), piece.x() + 1);
        assert_eq!(piece.down().y(), piece.y() + 1);
        assert_eq!(piece.moved(2, 3).at(0, 0), piece.at(0, 0));
    }
}
