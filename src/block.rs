//! Quadtree board representation and structural mutators.
//!
//! This module provides the board state for the game, including:
//! - The recursive block structure (leaf colour or four quadrant children)
//! - Geometry rules for child size and placement
//! - The five mutators: smash, swap, rotate, paint, combine
//! - Location-based block lookup used for move application and selection
//! - Randomized board generation
//!
//! Children are always stored in the fixed order upper-right, upper-left,
//! lower-left, lower-right. Every node stores its absolute position, so any
//! mutator that reorders children must refresh positions through the whole
//! affected subtree.

use crate::constants::*;

/// Rotation direction for [`Block::rotate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// Swap direction for [`Block::swap`]: `Horizontal` exchanges the left and
/// right halves, `Vertical` the top and bottom halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    Horizontal,
    Vertical,
}

/// Body of a block: a coloured leaf, or four children in quadrant order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Leaf(Colour),
    Split(Box<[Block; 4]>),
}

/// A square region of the board, stored as a quadtree node.
///
/// A block is either a leaf with a colour or a parent subdivided into four
/// children, never both; the body enum makes the in-between states
/// unrepresentable. All mutation goes through the public mutators, which
/// keep the geometry consistent: children are half the parent's side
/// (rounded up), one level deeper, placed at the parent's quadrant corners,
/// and share the parent's `max_depth`.
///
/// Equality is field-wise (derived): two blocks compare equal only when
/// their own position, size, level and max depth all match along with
/// their contents, children included. `clone` produces a fully independent
/// tree, which is what the speculative move search relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Upper-left corner in board coordinates.
    position: (u32, u32),
    /// Side length in board units.
    size: u32,
    /// Depth from the root (root = 0).
    level: u32,
    /// Deepest level any node in this tree may reach; identical tree-wide.
    max_depth: u32,
    content: Content,
}

impl Block {
    /// Create a leaf block.
    ///
    /// Subdivided blocks are only ever produced by [`Block::smash`], so this
    /// is the sole public constructor.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero or `level` exceeds `max_depth`.
    pub fn new_leaf(
        position: (u32, u32),
        size: u32,
        colour: Colour,
        level: u32,
        max_depth: u32,
    ) -> Block {
        assert!(size > 0, "block size must be positive");
        assert!(
            level <= max_depth,
            "block level {level} exceeds max depth {max_depth}"
        );
        Block {
            position,
            size,
            level,
            max_depth,
            content: Content::Leaf(colour),
        }
    }

    /// Upper-left corner of this block.
    #[inline]
    pub fn position(&self) -> (u32, u32) {
        self.position
    }

    /// Side length of this block.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Depth of this block below the root.
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Deepest level this tree may reach.
    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// The leaf colour, or `None` for a subdivided block.
    #[inline]
    pub fn colour(&self) -> Option<Colour> {
        match &self.content {
            Content::Leaf(colour) => Some(*colour),
            Content::Split(_) => None,
        }
    }

    /// Whether this block is an undivided coloured region.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.content, Content::Leaf(_))
    }

    /// The four children in quadrant order, or an empty slice for a leaf.
    pub fn children(&self) -> &[Block] {
        match &self.content {
            Content::Leaf(_) => &[],
            Content::Split(children) => &children[..],
        }
    }

    /// Exclusive access to the child at `index` (quadrant order), or `None`
    /// for a leaf or an index past 3. Mutation still goes through the
    /// child's own mutators, so the tree stays consistent.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut Block> {
        match &mut self.content {
            Content::Leaf(_) => None,
            Content::Split(children) => children.get_mut(index),
        }
    }

    pub(crate) fn quadrants_mut(&mut self) -> &mut [Block] {
        match &mut self.content {
            Content::Leaf(_) => &mut [],
            Content::Split(children) => &mut children[..],
        }
    }

    /// Whether `location` falls inside this block. The top and left edges
    /// belong to the block; the bottom and right edges do not.
    #[inline]
    pub fn contains(&self, location: (u32, u32)) -> bool {
        let (x, y) = self.position;
        let (lx, ly) = location;
        lx >= x && lx < x + self.size && ly >= y && ly < y + self.size
    }

    /// Side length of this block's children: half the parent side, rounded
    /// up so the four children cover every cell of an odd-sized parent.
    #[inline]
    fn child_size(&self) -> u32 {
        self.size.div_ceil(2)
    }

    /// Corner positions of the four child slots, in quadrant order.
    fn child_positions(&self) -> [(u32, u32); 4] {
        let (x, y) = self.position;
        let s = self.child_size();
        [(x + s, y), (x, y), (x, y + s), (x + s, y + s)]
    }

    /// Move this block to `position` and recompute every descendant's
    /// position from its slot. Called after any mutator that reorders
    /// children.
    fn update_positions(&mut self, position: (u32, u32)) {
        self.position = position;
        let slots = self.child_positions();
        if let Content::Split(children) = &mut self.content {
            for (child, slot) in children.iter_mut().zip(slots) {
                child.update_positions(slot);
            }
        }
    }

    /// Subdivide this leaf into four random-coloured children.
    ///
    /// Not performed if the block is already subdivided or sits at
    /// `max_depth`. Otherwise four children are created with independent
    /// uniform palette colours, and each child that is still above
    /// `max_depth` is recursively subdivided with probability
    /// `exp(-SUBDIVIDE_DECAY * child_level)`, so deep subdivision tails off
    /// quickly.
    ///
    /// Returns whether the block was subdivided.
    pub fn smash(&mut self, rng: &mut fastrand::Rng) -> bool {
        if self.level == self.max_depth || !self.is_leaf() {
            return false;
        }
        let size = self.child_size();
        let level = self.level + 1;
        let max_depth = self.max_depth;
        let children = self.child_positions().map(|position| Block {
            position,
            size,
            level,
            max_depth,
            content: Content::Leaf(random_colour(rng)),
        });
        self.content = Content::Split(Box::new(children));
        if level < max_depth {
            // Draw all four continuation values before any child recurses,
            // keeping the stream layout stable for a given seed.
            let rolls: [f64; 4] = std::array::from_fn(|_| rng.f64());
            let threshold = (-SUBDIVIDE_DECAY * f64::from(level)).exp();
            for (child, roll) in self.quadrants_mut().iter_mut().zip(rolls) {
                if roll < threshold {
                    child.smash(rng);
                }
            }
        }
        true
    }

    /// Exchange child subtrees across the given direction: left/right halves
    /// for [`SwapDirection::Horizontal`], top/bottom halves for
    /// [`SwapDirection::Vertical`]. Each moved subtree keeps its internal
    /// layout but is repositioned at its new slot.
    ///
    /// Returns whether a swap happened; a leaf reports not performed.
    pub fn swap(&mut self, direction: SwapDirection) -> bool {
        {
            let Content::Split(children) = &mut self.content else {
                return false;
            };
            match direction {
                SwapDirection::Horizontal => {
                    children.swap(0, 1);
                    children.swap(2, 3);
                }
                SwapDirection::Vertical => {
                    children.swap(1, 2);
                    children.swap(0, 3);
                }
            }
        }
        self.update_positions(self.position);
        true
    }

    /// Rotate this block's children one quadrant step, then rotate each
    /// child's own children the same way, so the whole subtree turns
    /// coherently.
    ///
    /// The quadrant order upper-right, upper-left, lower-left, lower-right
    /// walks the square counter-clockwise, so a clockwise turn is one left
    /// rotation of the child array and a counter-clockwise turn one right
    /// rotation.
    ///
    /// Returns whether a rotation happened; a leaf reports not performed.
    pub fn rotate(&mut self, rotation: Rotation) -> bool {
        {
            let Content::Split(children) = &mut self.content else {
                return false;
            };
            match rotation {
                Rotation::Clockwise => children.rotate_left(1),
                Rotation::CounterClockwise => children.rotate_right(1),
            }
        }
        self.update_positions(self.position);
        for child in self.quadrants_mut() {
            child.rotate(rotation);
        }
        true
    }

    /// Recolour this block. Only a leaf at `max_depth` can be painted, and
    /// only to a colour it does not already have.
    ///
    /// Returns whether the colour changed.
    pub fn paint(&mut self, colour: Colour) -> bool {
        if self.level != self.max_depth {
            return false;
        }
        match &mut self.content {
            Content::Leaf(current) if *current != colour => {
                *current = colour;
                true
            }
            _ => false,
        }
    }

    /// Collapse four max-depth leaf children into a single leaf of their
    /// majority colour.
    ///
    /// Applies only one level above `max_depth`. The tally runs over
    /// [`COLOUR_LIST`] in its declared order and the first colour reaching
    /// the highest count wins; a count of 1 is no majority, and a 2-2 split
    /// between two colours is no majority either.
    ///
    /// Returns whether the children were collapsed.
    pub fn combine(&mut self) -> bool {
        if self.level + 1 != self.max_depth {
            return false;
        }
        let winner = {
            let Content::Split(children) = &self.content else {
                return false;
            };
            let counts = COLOUR_LIST
                .map(|colour| children.iter().filter(|c| c.colour() == Some(colour)).count());
            let max_count = counts.iter().copied().max().unwrap_or(0);
            if max_count <= 1 {
                return false;
            }
            if max_count == 2 && counts.iter().filter(|&&n| n == 2).count() > 1 {
                return false;
            }
            let Some(index) = counts.iter().position(|&n| n == max_count) else {
                return false;
            };
            COLOUR_LIST[index]
        };
        self.content = Content::Leaf(winner);
        true
    }

    /// The block at exactly `level` whose region contains `location`, or
    /// the deepest block on the way there if the tree bottoms out early.
    /// `None` if `location` lies outside this block.
    ///
    /// # Panics
    ///
    /// Panics if `level` exceeds the tree's max depth.
    pub fn block_at(&self, location: (u32, u32), level: u32) -> Option<&Block> {
        assert!(
            level <= self.max_depth,
            "lookup level {level} exceeds max depth {}",
            self.max_depth
        );
        if !self.contains(location) {
            return None;
        }
        let mut node = self;
        while node.level < level {
            let Some(next) = node.children().iter().find(|c| c.contains(location)) else {
                break;
            };
            node = next;
        }
        Some(node)
    }

    /// Exclusive-borrow form of [`Block::block_at`], used to apply a move to
    /// the node it targets.
    ///
    /// # Panics
    ///
    /// Panics if `level` exceeds the tree's max depth.
    pub fn block_at_mut(&mut self, location: (u32, u32), level: u32) -> Option<&mut Block> {
        assert!(
            level <= self.max_depth,
            "lookup level {level} exceeds max depth {}",
            self.max_depth
        );
        if !self.contains(location) {
            return None;
        }
        let mut node = self;
        while node.level < level {
            let Some(index) = node.children().iter().position(|c| c.contains(location)) else {
                break;
            };
            node = &mut node.quadrants_mut()[index];
        }
        Some(node)
    }
}

impl std::fmt::Display for Block {
    /// Indented one-line-per-node tree dump, for debugging and the demo.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn dump(block: &Block, f: &mut std::fmt::Formatter<'_>, indent: usize) -> std::fmt::Result {
            let pad = "  ".repeat(indent);
            match block.colour() {
                Some(colour) => writeln!(
                    f,
                    "{pad}Leaf: colour={}, pos={:?}, size={}, level={}",
                    colour_name(colour),
                    block.position,
                    block.size,
                    block.level
                ),
                None => {
                    writeln!(
                        f,
                        "{pad}Parent: pos={:?}, size={}, level={}",
                        block.position, block.size, block.level
                    )?;
                    for child in block.children() {
                        dump(child, f, indent + 1)?;
                    }
                    Ok(())
                }
            }
        }
        dump(self, f, 0)
    }
}

/// Uniform draw from the palette.
fn random_colour(rng: &mut fastrand::Rng) -> Colour {
    COLOUR_LIST[rng.usize(0..COLOUR_LIST.len())]
}

/// Build a randomized board: a root leaf with a uniform palette colour,
/// smashed once with the stochastic continuation. Whenever `max_depth >= 1`
/// the root comes back subdivided; at `max_depth == 0` it stays a lone leaf.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn generate_board(max_depth: u32, size: u32, rng: &mut fastrand::Rng) -> Block {
    let mut board = Block::new_leaf((0, 0), size, random_colour(rng), 0, max_depth);
    board.smash(rng);
    board
}
