use macroquad::texture::Image;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::TilesheetError;
use crate::loader::json_loader::{TileMetadata, TileMetadataMap, TilesheetManifest};
use crate::resource_pack::{ResourcePack, TILESHEETS_DIR};
use crate::surface::AtlasImage;
use crate::tile::{Tile, TileFlags};

/// Atlas image file inside a tilesheet's pack directory.
pub const TILESHEET_IMAGE: &str = "tilesheet.png";
/// Metadata file inside a tilesheet's pack directory.
pub const TILESHEET_MANIFEST: &str = "tilesheet.json";

/// An atlas image cut into a regular grid of equally sized tiles.
///
/// Tile ids are row-major: id 0 is the top-left cell, ids grow to the right
/// and then wrap to the next row. Grid parameters are validated once, at
/// construction, and never change afterwards.
pub struct Tilesheet<I: AtlasImage = Image> {
    image: I,
    tile_width: u32,
    tile_height: u32,
    tile_count_x: u32,
    tile_count_y: u32,
    tile_metadata: TileMetadataMap,
}

impl<I: AtlasImage> Tilesheet<I> {
    /// Validate the atlas geometry and build a tilesheet.
    ///
    /// Fails unless the image width and height are exact multiples of the
    /// tile width and height. With `tile_metadata` of `None` every tile
    /// resolves to no flags and an empty record.
    pub fn new(
        image: I,
        tile_width: u32,
        tile_height: u32,
        tile_metadata: Option<TileMetadataMap>,
    ) -> Result<Self, TilesheetError> {
        if tile_width == 0 || tile_height == 0 {
            return Err(TilesheetError::ZeroTileSize {
                tile_width,
                tile_height,
            });
        }

        let image_width = image.width();
        if image_width % tile_width != 0 {
            return Err(TilesheetError::WidthMismatch {
                image_width,
                tile_width,
            });
        }

        let image_height = image.height();
        if image_height % tile_height != 0 {
            return Err(TilesheetError::HeightMismatch {
                image_height,
                tile_height,
            });
        }

        let tile_count_x = image_width / tile_width;
        let tile_count_y = image_height / tile_height;
        tracing::debug!(
            image_width,
            image_height,
            tile_width,
            tile_height,
            tile_count_x,
            tile_count_y,
            "tilesheet geometry validated"
        );

        Ok(Self {
            image,
            tile_width,
            tile_height,
            tile_count_x,
            tile_count_y,
            tile_metadata: tile_metadata.unwrap_or_default(),
        })
    }

    /// Build a tilesheet from an already decoded image and parsed manifest.
    pub fn from_manifest(image: I, manifest: TilesheetManifest) -> Result<Self, TilesheetError> {
        let [tile_width, tile_height] = manifest.tile_size;
        Self::new(image, tile_width, tile_height, Some(manifest.tile_metadata))
    }

    /// Load `/tilesheets/<name>/tilesheet.png` and its `tilesheet.json`
    /// manifest from `pack`.
    pub fn from_resource_pack<P>(pack: &P, name: &str) -> Result<Self, TilesheetError>
    where
        P: ResourcePack + ?Sized,
    {
        let image_path = pack.join(TILESHEETS_DIR, &[name, TILESHEET_IMAGE]);
        let mut bytes = Vec::new();
        pack.open(&image_path)
            .and_then(|mut r| r.read_to_end(&mut bytes))
            .map_err(|source| TilesheetError::Io {
                path: PathBuf::from(&image_path),
                source,
            })?;
        let image = I::decode(&bytes)?;

        let manifest_path = pack.join(TILESHEETS_DIR, &[name, TILESHEET_MANIFEST]);
        let reader = pack
            .open(&manifest_path)
            .map_err(|source| TilesheetError::Io {
                path: PathBuf::from(&manifest_path),
                source,
            })?;
        let manifest =
            TilesheetManifest::from_reader(reader).map_err(|source| TilesheetError::Json {
                path: PathBuf::from(&manifest_path),
                source,
            })?;

        tracing::debug!(
            name,
            tiles_with_metadata = manifest.tile_metadata.len(),
            "loaded tilesheet from resource pack"
        );
        Self::from_manifest(image, manifest)
    }

    /// Tile width in pixels.
    #[inline]
    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Tile height in pixels.
    #[inline]
    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Number of tile columns.
    #[inline]
    pub fn tile_count_x(&self) -> u32 {
        self.tile_count_x
    }

    /// Number of tile rows.
    #[inline]
    pub fn tile_count_y(&self) -> u32 {
        self.tile_count_y
    }

    /// Number of cells in the grid; valid ids are `0..tile_count()`.
    #[inline]
    pub fn tile_count(&self) -> u32 {
        self.tile_count_x.saturating_mul(self.tile_count_y)
    }

    /// The whole atlas.
    pub fn image(&self) -> &I {
        &self.image
    }

    /// Per-tile metadata keyed by decimal tile id.
    pub fn tile_metadata(&self) -> &TileMetadataMap {
        &self.tile_metadata
    }

    /// Mutable access for callers that edit metadata; the tilesheet itself
    /// never writes to it.
    pub fn tile_metadata_mut(&mut self) -> &mut TileMetadataMap {
        &mut self.tile_metadata
    }

    /// Pixel position of the top-left corner of `tile_id`'s cell.
    ///
    /// Not bounds checked: ids past the end of the grid give positions
    /// outside the atlas.
    pub fn get_tile_position(&self, tile_id: u32) -> (u32, u32) {
        let (row, col) = match self.tile_count_x {
            // zero-width atlas: nothing is in the grid
            0 => (tile_id, 0),
            n => (tile_id / n, tile_id % n),
        };
        (col * self.tile_width, row.saturating_mul(self.tile_height))
    }

    /// Crop the cell for `tile_id` out of the atlas.
    ///
    /// This is where out-of-range ids are caught: the image layer rejects
    /// the rectangle and its error is returned unchanged.
    pub fn get_tile_subsurface(&self, tile_id: u32) -> Result<I, TilesheetError> {
        let (x, y) = self.get_tile_position(tile_id);
        Ok(self.image.subregion(x, y, self.tile_width, self.tile_height)?)
    }

    /// Resolve `tile_id`'s metadata into a [`Tile`].
    ///
    /// Tiles with no metadata entry get empty flags and an empty record.
    /// The id is not range checked here; only
    /// [`get_tile_subsurface`](Self::get_tile_subsurface) enforces the grid.
    pub fn get_tile(self: &Arc<Self>, tile_id: u32) -> Result<Tile<I>, TilesheetError> {
        let (flags, metadata) = match self.tile_metadata.get(&tile_id.to_string()) {
            Some(record) => (TileFlags::from_names(record.flags.as_slice())?, record.clone()),
            None => (TileFlags::empty(), TileMetadata::default()),
        };
        Ok(Tile::new(Arc::downgrade(self), tile_id, flags, metadata))
    }

    /// Every tile in the grid, in id order.
    pub fn tiles(self: &Arc<Self>) -> impl Iterator<Item = Result<Tile<I>, TilesheetError>> + '_ {
        (0..self.tile_count()).map(move |id| self.get_tile(id))
    }
}
