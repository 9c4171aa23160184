use bitflags::bitflags;
use macroquad::texture::Image;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::error::TilesheetError;
use crate::loader::json_loader::TileMetadata;
use crate::surface::AtlasImage;
use crate::tilesheet::Tilesheet;

bitflags! {
    /// Boolean tile attributes named in tilesheet metadata.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TileFlags: u32 {
        /// Blocks movement.
        const SOLID = 0b0000_0001;
        /// Has more than one frame.
        const ANIMATED = 0b0000_0010;
        /// Swimmable / drowns.
        const WATER = 0b0000_0100;
        /// Damages whatever stands on it.
        const HAZARD = 0b0000_1000;
        /// Drawn above actors.
        const OVERLAY = 0b0001_0000;
    }
}

impl TileFlags {
    /// Name that resolves to the empty set.
    pub const NONE_NAME: &'static str = "NONE";

    /// Resolve a single flag name. Exact and case-sensitive.
    pub fn lookup(name: &str) -> Result<Self, TilesheetError> {
        if name == Self::NONE_NAME {
            return Ok(Self::empty());
        }
        Self::from_name(name).ok_or_else(|| TilesheetError::UnknownFlag {
            name: name.to_owned(),
        })
    }

    /// Union of every named flag; fails on the first unknown name.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, TilesheetError> {
        names
            .iter()
            .try_fold(Self::empty(), |acc, name| -> Result<Self, TilesheetError> {
                Ok(acc | Self::lookup(name.as_ref())?)
            })
    }
}

/// One resolved tile: id, decoded flags and raw metadata.
///
/// Holds only a weak reference to its tilesheet, so tiles never keep an
/// atlas alive.
pub struct Tile<I: AtlasImage = Image> {
    tilesheet: Weak<Tilesheet<I>>,
    id: u32,
    flags: TileFlags,
    metadata: TileMetadata,
}

impl<I: AtlasImage> Tile<I> {
    pub(crate) fn new(
        tilesheet: Weak<Tilesheet<I>>,
        id: u32,
        flags: TileFlags,
        metadata: TileMetadata,
    ) -> Self {
        Self {
            tilesheet,
            id,
            flags,
            metadata,
        }
    }

    /// Index of this tile in its sheet.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Decoded flags.
    #[inline]
    pub fn flags(&self) -> TileFlags {
        self.flags
    }

    /// True if every bit of `flag` is set.
    #[inline]
    pub fn has_flag(&self, flag: TileFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Raw metadata record; empty for tiles the sheet has no entry for.
    pub fn metadata(&self) -> &TileMetadata {
        &self.metadata
    }

    /// The originating tilesheet, if it is still alive.
    pub fn tilesheet(&self) -> Option<Arc<Tilesheet<I>>> {
        self.tilesheet.upgrade()
    }

    /// Crop this tile out of its tilesheet's atlas.
    pub fn subimage(&self) -> Result<I, TilesheetError> {
        let sheet = self
            .tilesheet()
            .ok_or(TilesheetError::TilesheetDropped { id: self.id })?;
        sheet.get_tile_subsurface(self.id)
    }
}

impl<I: AtlasImage> Clone for Tile<I> {
    fn clone(&self) -> Self {
        Self {
            tilesheet: self.tilesheet.clone(),
            id: self.id,
            flags: self.flags,
            metadata: self.metadata.clone(),
        }
    }
}

impl<I: AtlasImage> fmt::Debug for Tile<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tile")
            .field("id", &self.id)
            .field("flags", &self.flags)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}
