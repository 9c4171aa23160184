#![warn(missing_docs)]

//! Tile-atlas loading for Macroquad images.
//!
//! A [`Tilesheet`] is one image holding a grid of equally sized tiles plus a
//! `tilesheet.json` manifest with per-tile metadata. Tiles are addressed by
//! row-major id, either as a cropped sub-image or as a [`Tile`] carrying its
//! decoded [`TileFlags`].

mod error;
mod loader {
    pub mod json_loader;
}
mod resource_pack;
mod surface;
mod tile;
mod tilesheet;

pub use error::{ImageError, TilesheetError};
pub use loader::json_loader::{TileMetadata, TileMetadataMap, TilesheetManifest};
pub use resource_pack::{DirResourcePack, MemoryResourcePack, ResourcePack, TILESHEETS_DIR};
pub use surface::AtlasImage;
pub use tile::{Tile, TileFlags};
pub use tilesheet::{Tilesheet, TILESHEET_IMAGE, TILESHEET_MANIFEST};
