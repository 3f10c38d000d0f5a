//! Container decoding tests over synthetic BLP2 bytes.

use std::io::Cursor;

use pretty_assertions::assert_eq;

use terra_blp::{TextureError, TextureFormat, load_texture};

const HEADER_LEN: usize = 148;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a BLP2 container. Each entry in `mips` is either a payload placed
/// in the next slot or `None` for a deliberately empty slot.
fn build_blp(
    compression: u8,
    alpha_encoding: u8,
    width: u32,
    height: u32,
    mips: &[Option<Vec<u8>>],
) -> Vec<u8> {
    init();
    let mut offsets = [0u32; 16];
    let mut sizes = [0u32; 16];
    let mut payloads = Vec::new();
    let mut cursor = HEADER_LEN as u32;
    for (slot, mip) in mips.iter().enumerate() {
        if let Some(payload) = mip {
            offsets[slot] = cursor;
            sizes[slot] = payload.len() as u32;
            cursor += payload.len() as u32;
            payloads.extend_from_slice(payload);
        }
    }

    let mut buf = Vec::with_capacity(HEADER_LEN + payloads.len());
    buf.extend_from_slice(b"BLP2");
    buf.extend_from_slice(&1u32.to_le_bytes());
    buf.extend_from_slice(&[compression, 8, alpha_encoding, 1]);
    buf.extend_from_slice(&width.to_le_bytes());
    buf.extend_from_slice(&height.to_le_bytes());
    for v in offsets.iter().chain(sizes.iter()) {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    assert_eq!(buf.len(), HEADER_LEN);
    buf.extend_from_slice(&payloads);
    buf
}

/// A solid-color DXT1 block: both endpoints equal, all indices 0.
fn dxt1_block(color565: u16) -> Vec<u8> {
    let mut block = Vec::with_capacity(8);
    block.extend_from_slice(&color565.to_le_bytes());
    block.extend_from_slice(&color565.to_le_bytes());
    block.extend_from_slice(&[0u8; 4]);
    block
}

#[test]
fn raw_argb_container_decodes_with_channel_swap() {
    // One 2×2 mip, BGRA bytes.
    let pixels = vec![
        0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, //
        0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x00,
    ];
    let blp = build_blp(3, 0, 2, 2, &[Some(pixels)]);
    let texture = load_texture(&blp).unwrap();

    assert_eq!(texture.format, TextureFormat::RawArgb);
    assert_eq!(texture.mips.len(), 1);
    assert_eq!(texture.mips[0].width, 2);
    assert_eq!(
        texture.mips[0].rgba,
        vec![
            0x33, 0x22, 0x11, 0x44, 0x77, 0x66, 0x55, 0x88, //
            0xBB, 0xAA, 0x99, 0xCC, 0xFF, 0xEE, 0xDD, 0x00,
        ]
    );
}

#[test]
fn dxt1_container_decodes_solid_blocks() {
    // 4×4 white at level 0. 0xFFFF in 565 expands to pure white.
    let blp = build_blp(2, 0, 4, 4, &[Some(dxt1_block(0xFFFF))]);
    let texture = load_texture(&blp).unwrap();

    assert_eq!(texture.format, TextureFormat::Dxt1);
    assert_eq!(texture.mips[0].rgba.len(), 4 * 4 * 4);
    assert!(
        texture.mips[0]
            .rgba
            .chunks(4)
            .all(|px| px == [255, 255, 255, 255])
    );
}

#[test]
fn absent_slots_do_not_consume_output_levels() {
    // Slot 0 and slot 2 populated, slot 1 empty: the second payload must
    // land on dense level 1 with level-1 dimensions.
    let level0 = vec![0x00, 0x00, 0x00, 0xFF].repeat(16);
    let level1 = vec![0x01, 0x02, 0x03, 0x04].repeat(4);
    let blp = build_blp(3, 0, 4, 4, &[Some(level0), None, Some(level1)]);
    let texture = load_texture(&blp).unwrap();

    assert_eq!(texture.mips.len(), 2);
    assert_eq!((texture.mips[0].width, texture.mips[0].height), (4, 4));
    assert_eq!((texture.mips[1].width, texture.mips[1].height), (2, 2));
    assert_eq!(texture.mips[1].rgba[..4], [0x03, 0x02, 0x01, 0x04]);
}

#[test]
fn solid_color_raw_container_round_trips() {
    // Full-size single-mip container: every texel carries one BGRA color.
    let pixels = [0x20u8, 0x40, 0x60, 0x80].repeat(64 * 64);
    let blp = build_blp(3, 0, 64, 64, &[Some(pixels)]);
    let texture = load_texture(&blp).unwrap();

    assert_eq!((texture.width, texture.height), (64, 64));
    assert_eq!(texture.mips.len(), 1);
    assert_eq!(texture.mips[0].rgba.len(), 64 * 64 * 4);
    assert!(
        texture.mips[0]
            .rgba
            .chunks(4)
            .all(|px| px == [0x60, 0x40, 0x20, 0x80])
    );
}

#[test]
fn mip_range_outside_the_container_is_rejected() {
    let mut blp = build_blp(3, 0, 2, 2, &[Some(vec![0u8; 16])]);
    // Inflate the recorded size of slot 0 beyond the data.
    let size_field = 4 + 4 + 4 + 8 + 64;
    blp[size_field..size_field + 4].copy_from_slice(&0xFFFFu32.to_le_bytes());
    let err = load_texture(&blp).unwrap_err();
    assert!(matches!(err, TextureError::OutOfBounds { level: 0, .. }));
}

#[test]
fn hostile_dimensions_fail_before_any_allocation() {
    // 65536×65536 would need a 16 GiB level; the header check rejects it.
    let blp = build_blp(3, 0, 0x10000, 0x10000, &[Some(vec![0u8; 16])]);
    let err = load_texture(&blp).unwrap_err();
    assert!(matches!(
        err,
        TextureError::InvalidDimensions {
            width: 0x10000,
            height: 0x10000
        }
    ));
}

#[test]
fn jpeg_compressed_blp_is_unsupported() {
    let blp = build_blp(0, 0, 4, 4, &[Some(vec![0u8; 32])]);
    let err = load_texture(&blp).unwrap_err();
    assert!(matches!(
        err,
        TextureError::Unsupported {
            compression: 0,
            ..
        }
    ));
}

#[test]
fn foreign_png_goes_through_the_fallback_decoder() {
    init();
    let mut png = Vec::new();
    let img = image::RgbaImage::from_pixel(3, 5, image::Rgba([10, 20, 30, 40]));
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    let texture = load_texture(&png).unwrap();
    assert_eq!((texture.width, texture.height), (3, 5));
    assert_eq!(texture.mips.len(), 1);
    assert!(texture.mips[0].rgba.chunks(4).all(|px| px == [10, 20, 30, 40]));
}
