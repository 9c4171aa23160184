use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by an [`AtlasImage`](crate::AtlasImage) implementation.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The byte stream could not be decoded into an image.
    #[error("Failed to decode image: {0}")]
    Decode(String),
    /// A requested sub-image does not fit inside the source image.
    #[error(
        "Subregion {width}x{height} at ({x}, {y}) is outside image bounds {image_width}x{image_height}"
    )]
    OutOfBounds {
        /// Left edge of the requested rectangle.
        x: u32,
        /// Top edge of the requested rectangle.
        y: u32,
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Width of the source image.
        image_width: u32,
        /// Height of the source image.
        image_height: u32,
    },
}

/// Error type for tilesheet loading and tile lookup
#[derive(Debug, Error)]
pub enum TilesheetError {
    /// Atlas width is not an exact multiple of the tile width
    #[error(
        "Tilesheet surface width not a multiple of tile width (surface width: {image_width}, tile width: {tile_width})"
    )]
    WidthMismatch {
        /// Width of the atlas image in pixels.
        image_width: u32,
        /// Requested tile width in pixels.
        tile_width: u32,
    },
    /// Atlas height is not an exact multiple of the tile height
    #[error(
        "Tilesheet surface height not a multiple of tile height (surface height: {image_height}, tile height: {tile_height})"
    )]
    HeightMismatch {
        /// Height of the atlas image in pixels.
        image_height: u32,
        /// Requested tile height in pixels.
        tile_height: u32,
    },
    /// A tile dimension of zero was requested
    #[error("Tile size must be non-zero (tile width: {tile_width}, tile height: {tile_height})")]
    ZeroTileSize {
        /// Requested tile width in pixels.
        tile_width: u32,
        /// Requested tile height in pixels.
        tile_height: u32,
    },
    /// Tile metadata names a flag that does not exist
    #[error("Unknown tile flag: {name}")]
    UnknownFlag {
        /// The flag name as written in the metadata.
        name: String,
    },
    /// Image decode or sub-image extraction failure
    #[error(transparent)]
    Image(#[from] ImageError),
    /// An asset could not be opened or read
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Asset path inside the resource pack.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Tilesheet metadata is not valid JSON or does not match the schema
    #[error("Failed to parse {}: {source}", path.display())]
    Json {
        /// Asset path inside the resource pack.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The tilesheet a tile came from has been dropped
    #[error("Tilesheet for tile {id} no longer exists")]
    TilesheetDropped {
        /// Id of the orphaned tile.
        id: u32,
    },
}
