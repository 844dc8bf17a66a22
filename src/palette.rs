//! Tile colours for renderers.

use crate::engine::Tile;

/// Colour for empty cells and any value outside the table.
pub const DEFAULT_TILE_COLOR: &str = "#cdc1b4";

const DARK_TILE_COLOR: &str = "#3c3a32";

/// Hex colour token for a tile. Only exact powers of two from 2 to 65536
/// have their own entry; everything else falls back to [`DEFAULT_TILE_COLOR`].
pub fn tile_color(value: Tile) -> &'static str {
    match value {
        2 => "#eee4da",
        4 => "#ede0c8",
        8 => "#f2b179",
        16 => "#f59563",
        32 => "#f67c5f",
        64 => "#f65e3b",
        128 => "#edcf72",
        256 => "#edcc61",
        512 => "#edc850",
        1024 => "#edc53f",
        2048 => "#edc22e",
        4096 | 8192 | 16384 | 32768 | 65536 => DARK_TILE_COLOR,
        _ => DEFAULT_TILE_COLOR,
    }
}
