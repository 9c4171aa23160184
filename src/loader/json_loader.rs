// src/loader/json_loader.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::collections::HashMap;
use std::io::Read;

/// Per-tile metadata record, keyed by decimal tile id in `tilesheet.json`.
///
/// `flags` is the only field the loader interprets; everything else is kept
/// verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TileMetadata {
    /// Flag names, resolved through [`TileFlags::lookup`](crate::TileFlags::lookup).
    #[serde(default)]
    pub flags: Vec<String>,
    /// Free-form fields.
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

impl TileMetadata {
    /// True for the record an unlisted tile resolves to.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.extra.is_empty()
    }

    /// Look up a free-form field.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.extra.get(key)
    }
}

/// Tile-id (decimal string) to metadata mapping.
pub type TileMetadataMap = HashMap<String, TileMetadata>;

/// Contents of a `tilesheet.json` file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TilesheetManifest {
    /// `[width, height]` of one tile in pixels.
    pub tile_size: [u32; 2],
    /// Metadata for the tiles that have any.
    #[serde(default)]
    pub tile_metadata: TileMetadataMap,
}

impl TilesheetManifest {
    /// Parse a manifest from JSON text.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a manifest from a byte stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    /// Tile width in pixels.
    pub fn tile_width(&self) -> u32 {
        self.tile_size[0]
    }

    /// Tile height in pixels.
    pub fn tile_height(&self) -> u32 {
        self.tile_size[1]
    }
}
