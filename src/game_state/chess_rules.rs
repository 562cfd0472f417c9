//! Canonical chess-rule constants.
//!
//! Holds the standard starting position and a handful of well-known reference
//! positions used by perft checks, benchmarks and the command-line driver.

/// Standard starting piece placement, rank 8 first.
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// A named position: placement, side to move (`w`/`b`), castling text and an
/// optional en-passant target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedPosition {
    pub name: &'static str,
    pub placement: &'static str,
    pub side_to_move: char,
    pub castling: &'static str,
    pub en_passant: Option<&'static str>,
    /// Known perft node counts for depth 1, 2, 3, ...
    pub perft_nodes: &'static [u64],
}

pub const START_POSITION: NamedPosition = NamedPosition {
    name: "start",
    placement: STARTING_PLACEMENT,
    side_to_move: 'w',
    castling: "KQkq",
    en_passant: None,
    perft_nodes: &[20, 400, 8902, 197_281],
};

pub const KIWIPETE: NamedPosition = NamedPosition {
    name: "kiwipete",
    placement: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
    side_to_move: 'w',
    castling: "KQkq",
    en_passant: None,
    perft_nodes: &[48, 2039, 97_862],
};

pub const ROOK_ENDGAME: NamedPosition = NamedPosition {
    name: "rook_endgame",
    placement: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8",
    side_to_move: 'w',
    castling: "-",
    en_passant: None,
    perft_nodes: &[14, 191, 2812, 43_238],
};

pub const PROMOTION_TANGLE: NamedPosition = NamedPosition {
    name: "promotion_tangle",
    placement: "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1",
    side_to_move: 'w',
    castling: "kq",
    en_passant: None,
    perft_nodes: &[6, 264, 9467],
};

pub const KNIGHT_FORK_MIDGAME: NamedPosition = NamedPosition {
    name: "knight_fork",
    placement: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R",
    side_to_move: 'w',
    castling: "KQ",
    en_passant: None,
    perft_nodes: &[44, 1486, 62_379],
};

pub const NAMED_POSITIONS: [NamedPosition; 5] = [
    START_POSITION,
    KIWIPETE,
    ROOK_ENDGAME,
    PROMOTION_TANGLE,
    KNIGHT_FORK_MIDGAME,
];

pub fn named_position(name: &str) -> Option<NamedPosition> {
    NAMED_POSITIONS
        .iter()
        .copied()
        .find(|position| position.name.eq_ignore_ascii_case(name))
}
