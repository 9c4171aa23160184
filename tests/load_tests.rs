// tests/load_tests.rs

use std::fs;
use std::io::Cursor;
use std::sync::Arc;

use hypatia_tilesheet::{DirResourcePack, MemoryResourcePack, TileFlags, Tilesheet, TilesheetError};
use image::{ImageFormat, Rgba, RgbaImage};

/// Encode a `width`x`height` PNG with one red pixel at `(mark_x, mark_y)`.
fn png(width: u32, height: u32, mark_x: u32, mark_y: u32) -> Vec<u8> {
    let mut img = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    img.put_pixel(mark_x, mark_y, Rgba([255, 0, 0, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

const GRASS_JSON: &str = r#"
{
  "tile_size": [16, 16],
  "tile_metadata": {
    "5": { "flags": ["SOLID"], "name": "rock" },
    "1": { "flags": ["WATER", "ANIMATED"], "frames": [1, 2, 3] }
  }
}
"#;

fn grass_pack() -> MemoryResourcePack {
    let mut pack = MemoryResourcePack::new();
    pack.insert("/tilesheets/grass/tilesheet.png", png(64, 32, 16, 16));
    pack.insert("/tilesheets/grass/tilesheet.json", GRASS_JSON);
    pack
}

#[test]
fn load_from_memory_pack() -> anyhow::Result<()> {
    let sheet: Arc<Tilesheet> = Arc::new(Tilesheet::from_resource_pack(&grass_pack(), "grass")?);

    assert_eq!(sheet.tile_width(), 16);
    assert_eq!(sheet.tile_height(), 16);
    assert_eq!(sheet.tile_count_x(), 4);
    assert_eq!(sheet.tile_count_y(), 2);

    assert_eq!(sheet.get_tile_position(5), (16, 16));
    let sub = sheet.get_tile_subsurface(5)?;
    assert_eq!((sub.width(), sub.height()), (16, 16));
    // marked pixel lands at the tile's origin
    assert_eq!(&sub.bytes[0..4], &[255, 0, 0, 255]);

    assert_eq!(sheet.get_tile(5)?.flags(), TileFlags::SOLID);
    assert_eq!(sheet.get_tile(6)?.flags(), TileFlags::empty());

    let one = sheet.get_tile(1)?;
    assert_eq!(one.flags(), TileFlags::WATER | TileFlags::ANIMATED);
    assert_eq!(one.metadata().get("frames"), Some(&serde_json::json!([1, 2, 3])));
    Ok(())
}

#[test]
fn load_from_directory_pack() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let sheet_dir = dir.path().join("tilesheets").join("dungeon");
    fs::create_dir_all(&sheet_dir)?;
    fs::write(sheet_dir.join("tilesheet.png"), png(24, 16, 0, 0))?;
    fs::write(sheet_dir.join("tilesheet.json"), r#"{ "tile_size": [8, 8] }"#)?;

    let pack = DirResourcePack::new(dir.path());
    let sheet: Tilesheet = Tilesheet::from_resource_pack(&pack, "dungeon")?;
    assert_eq!((sheet.tile_count_x(), sheet.tile_count_y()), (3, 2));
    assert!(sheet.tile_metadata().is_empty());
    Ok(())
}

#[test]
fn missing_assets_are_io_errors() {
    let mut pack = MemoryResourcePack::new();
    pack.insert("/tilesheets/half/tilesheet.png", png(16, 16, 0, 0));

    match Tilesheet::<macroquad::texture::Image>::from_resource_pack(&pack, "half") {
        Err(TilesheetError::Io { path, .. }) => {
            assert_eq!(path.to_str(), Some("/tilesheets/half/tilesheet.json"))
        }
        Err(other) => panic!("expected Io error, got {other:?}"),
        Ok(_) => panic!("load should fail without a manifest"),
    }

    assert!(matches!(
        Tilesheet::<macroquad::texture::Image>::from_resource_pack(&pack, "nowhere"),
        Err(TilesheetError::Io { .. })
    ));
}

#[test]
fn bad_manifest_and_bad_image_surface_as_load_errors() {
    let mut pack = MemoryResourcePack::new();
    pack.insert("/tilesheets/a/tilesheet.png", png(16, 16, 0, 0));
    pack.insert("/tilesheets/a/tilesheet.json", r#"{ "tile_metadata": {} }"#);
    pack.insert("/tilesheets/b/tilesheet.png", b"not a png".to_vec());
    pack.insert("/tilesheets/b/tilesheet.json", r#"{ "tile_size": [16, 16] }"#);
    pack.insert("/tilesheets/c/tilesheet.png", png(16, 16, 0, 0));
    pack.insert("/tilesheets/c/tilesheet.json", "{ \"tile_size\": [16, ");

    assert!(matches!(
        Tilesheet::<macroquad::texture::Image>::from_resource_pack(&pack, "a"),
        Err(TilesheetError::Json { .. })
    ));
    assert!(matches!(
        Tilesheet::<macroquad::texture::Image>::from_resource_pack(&pack, "b"),
        Err(TilesheetError::Image(_))
    ));
    assert!(matches!(
        Tilesheet::<macroquad::texture::Image>::from_resource_pack(&pack, "c"),
        Err(TilesheetError::Json { .. })
    ));
}

#[test]
fn geometry_mismatch_from_manifest() {
    let mut pack = MemoryResourcePack::new();
    pack.insert("/tilesheets/odd/tilesheet.png", png(48, 40, 0, 0));
    pack.insert("/tilesheets/odd/tilesheet.json", r#"{ "tile_size": [8, 16] }"#);

    let err = Tilesheet::<macroquad::texture::Image>::from_resource_pack(&pack, "odd")
        .err()
        .unwrap();
    assert!(matches!(
        err,
        TilesheetError::HeightMismatch { image_height: 40, tile_height: 16 }
    ));
}

#[test]
fn directory_pack_refuses_to_leave_its_root() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let outside = dir.path().join("outside");
    fs::create_dir_all(&outside)?;
    fs::write(outside.join("tilesheet.png"), png(16, 16, 0, 0))?;
    fs::write(outside.join("tilesheet.json"), r#"{ "tile_size": [16, 16] }"#)?;
    let root = dir.path().join("pack");
    fs::create_dir_all(root.join("tilesheets"))?;

    let pack = DirResourcePack::new(&root);
    let res = Tilesheet::<macroquad::texture::Image>::from_resource_pack(&pack, "../../outside");
    match res {
        Err(TilesheetError::Io { source, .. }) => {
            assert_eq!(source.kind(), std::io::ErrorKind::InvalidInput)
        }
        Err(other) => panic!("expected Io error, got {other:?}"),
        Ok(_) => panic!("load escaped the pack root"),
    }
    Ok(())
}
