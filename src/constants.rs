//! Process-wide configuration: the colour palette and tuning constants.
//!
//! Everything here is static configuration shared by board generation, the
//! move search, and the goal scorers. The palette order is load-bearing: the
//! majority tie-break in combine walks `COLOUR_LIST` front to back, so
//! reordering it changes which colour wins a 2-2 split against a lone pair.

// =============================================================================
// Colours
// =============================================================================

/// An RGB colour. Board leaves only ever hold values from [`COLOUR_LIST`],
/// but the type itself places no restriction so collaborators can carry
/// UI-side colours in the same representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colour(pub u8, pub u8, pub u8);

/// Pacific Point, a medium blue.
pub const PACIFIC_POINT: Colour = Colour(1, 128, 181);

/// Real Red.
pub const REAL_RED: Colour = Colour(199, 44, 58);

/// Old Olive, a muted green.
pub const OLD_OLIVE: Colour = Colour(138, 151, 71);

/// Daffodil Delight, a warm yellow.
pub const DAFFODIL_DELIGHT: Colour = Colour(255, 211, 92);

/// The palette, in tie-break order.
pub const COLOUR_LIST: [Colour; 4] = [PACIFIC_POINT, REAL_RED, OLD_OLIVE, DAFFODIL_DELIGHT];

/// Human-readable name of a palette colour; `"?"` for anything off-palette.
pub fn colour_name(colour: Colour) -> &'static str {
    match colour {
        PACIFIC_POINT => "Pacific Point",
        REAL_RED => "Real Red",
        OLD_OLIVE => "Old Olive",
        DAFFODIL_DELIGHT => "Daffodil Delight",
        _ => "?",
    }
}

// =============================================================================
// Board Generation
// =============================================================================

/// Decay rate for the stochastic subdivision continuation: a freshly created
/// child at depth `level` is itself subdivided with probability
/// `exp(-SUBDIVIDE_DECAY * level)`, so deeper children subdivide
/// exponentially less often.
pub const SUBDIVIDE_DECAY: f64 = 0.25;

// =============================================================================
// Move Search
// =============================================================================

/// Retry cap for the rejection-sampling move generator. Sampling terminates
/// almost surely on any board with a legal move, but a board can have none
/// at all (a lone max-depth-0 leaf already painted the goal colour), so the
/// loop gives up after this many rejected draws.
pub const MAX_MOVE_ATTEMPTS: usize = 1000;
