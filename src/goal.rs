//! Goal scoring: board flattening, the perimeter and blob strategies, and
//! randomized goal generation.
//!
//! Both strategies score the flattened unit-cell grid rather than the tree,
//! so a score never depends on how a region happens to be subdivided, only
//! on the colours it shows.

use crate::block::Block;
use crate::constants::*;

/// A board flattened to unit cells, stored column-major: `get(column, row)`
/// reads the cell `column` squares right and `row` squares down from the
/// upper-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatGrid {
    side: usize,
    cells: Vec<Colour>,
}

impl FlatGrid {
    /// Cells along one edge.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Colour of the cell at (`column`, `row`).
    ///
    /// # Panics
    ///
    /// Panics if either index is outside the grid.
    #[inline]
    pub fn get(&self, column: usize, row: usize) -> Colour {
        assert!(column < self.side && row < self.side, "cell out of range");
        self.cells[column * self.side + row]
    }

    #[inline]
    fn set_square(&mut self, column: usize, row: usize, side: usize, colour: Colour) {
        for c in column..column + side {
            for r in row..row + side {
                self.cells[c * self.side + r] = colour;
            }
        }
    }
}

/// Flatten a block into its unit-cell grid of side
/// `2^(max_depth - level)`. A leaf becomes a uniform square; a subdivided
/// block is assembled from its children at their quadrant offsets, which
/// reproduces the board's layout pixel for pixel.
pub fn flatten(block: &Block) -> FlatGrid {
    let side = 1usize << (block.max_depth() - block.level());
    let mut grid = FlatGrid {
        side,
        cells: vec![COLOUR_LIST[0]; side * side],
    };
    fill(block, &mut grid, 0, 0);
    grid
}

fn fill(block: &Block, grid: &mut FlatGrid, column: usize, row: usize) {
    match block.colour() {
        Some(colour) => {
            let side = 1usize << (block.max_depth() - block.level());
            grid.set_square(column, row, side, colour);
        }
        None => {
            let half = 1usize << (block.max_depth() - block.level() - 1);
            let children = block.children();
            fill(&children[0], grid, column + half, row);
            fill(&children[1], grid, column, row);
            fill(&children[2], grid, column, row + half);
            fill(&children[3], grid, column + half, row + half);
        }
    }
}

/// Number of perimeter cells matching `target`. Every edge is walked
/// independently, so a matching corner cell counts once for its row and
/// once for its column.
fn perimeter_score(grid: &FlatGrid, target: Colour) -> u32 {
    let side = grid.side();
    let last = side - 1;
    let mut score = 0;
    for i in 0..side {
        if grid.get(0, i) == target {
            score += 1;
        }
        if grid.get(i, 0) == target {
            score += 1;
        }
        if grid.get(last, i) == target {
            score += 1;
        }
        if grid.get(i, last) == target {
            score += 1;
        }
    }
    score
}

/// Size of the largest 4-connected region of `target`-coloured cells.
///
/// Cells are probed in column-major order; each probe of an unseen cell
/// flood-fills from it, marking matches as counted and mismatches as seen
/// so no cell is ever walked twice.
fn blob_score(grid: &FlatGrid, target: Colour) -> u32 {
    let side = grid.side();
    // -1 unseen, 0 seen but off-colour, 1 counted into some blob.
    let mut visited = vec![-1i8; side * side];
    let mut best = 0;
    for column in 0..side {
        for row in 0..side {
            if visited[column * side + row] == -1 {
                best = best.max(fill_blob(grid, &mut visited, column, row, target));
            }
        }
    }
    best
}

fn fill_blob(
    grid: &FlatGrid,
    visited: &mut [i8],
    column: usize,
    row: usize,
    target: Colour,
) -> u32 {
    let side = grid.side();
    let mut stack = vec![(column, row)];
    let mut count = 0;
    while let Some((c, r)) = stack.pop() {
        let i = c * side + r;
        if visited[i] != -1 {
            continue;
        }
        if grid.get(c, r) != target {
            visited[i] = 0;
            continue;
        }
        visited[i] = 1;
        count += 1;
        if c + 1 < side {
            stack.push((c + 1, r));
        }
        if c > 0 {
            stack.push((c - 1, r));
        }
        if r + 1 < side {
            stack.push((c, r + 1));
        }
        if r > 0 {
            stack.push((c, r - 1));
        }
    }
    count
}

/// Scoring strategy tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalKind {
    /// Count target-coloured cells on the board's border, corners twice.
    Perimeter,
    /// Size of the largest 4-connected target-coloured region.
    Blob,
}

/// A player objective: a strategy and a target colour. Immutable; scoring
/// is a pure function of the board passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    kind: GoalKind,
    colour: Colour,
}

impl Goal {
    pub fn new(kind: GoalKind, colour: Colour) -> Goal {
        Goal { kind, colour }
    }

    pub fn perimeter(colour: Colour) -> Goal {
        Goal::new(GoalKind::Perimeter, colour)
    }

    pub fn blob(colour: Colour) -> Goal {
        Goal::new(GoalKind::Blob, colour)
    }

    #[inline]
    pub fn kind(&self) -> GoalKind {
        self.kind
    }

    #[inline]
    pub fn colour(&self) -> Colour {
        self.colour
    }

    /// Current score of `board` under this goal.
    pub fn score(&self, board: &Block) -> u32 {
        let grid = flatten(board);
        match self.kind {
            GoalKind::Perimeter => perimeter_score(&grid, self.colour),
            GoalKind::Blob => blob_score(&grid, self.colour),
        }
    }

    /// One-line description for scoreboards.
    pub fn description(&self) -> String {
        let name = colour_name(self.colour);
        match self.kind {
            GoalKind::Perimeter => format!("Perimeter goal: put {name} on the outer border"),
            GoalKind::Blob => format!("Blob goal: grow the largest {name} blob"),
        }
    }
}

/// Generate `count` goals sharing one randomly drawn strategy, each with a
/// distinct colour drawn uniformly from the palette.
///
/// # Panics
///
/// Panics if `count` exceeds the palette size.
pub fn generate_goals(count: usize, rng: &mut fastrand::Rng) -> Vec<Goal> {
    assert!(
        count <= COLOUR_LIST.len(),
        "cannot hand out {count} distinct colours from a palette of {}",
        COLOUR_LIST.len()
    );
    let kind = if rng.bool() {
        GoalKind::Perimeter
    } else {
        GoalKind::Blob
    };
    let mut remaining = COLOUR_LIST.to_vec();
    (0..count)
        .map(|_| Goal::new(kind, remaining.swap_remove(rng.usize(0..remaining.len()))))
        .collect()
}
