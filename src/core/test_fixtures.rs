//! Shared test fixtures: hand-assembled image files.
//!
//! Fixtures are built byte-by-byte rather than checked in as binaries, so
//! each test states exactly which EXIF fields its input carries.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write `bytes` to `dir/name` and return the full path
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(bytes).unwrap();
    path
}

/// A JPEG whose only payload is an EXIF APP1 segment
///
/// `date_time_original` lands in the Exif sub-IFD (tag 0x9003, where real
/// cameras put it); `model` and `date_time` land in IFD0.
pub fn exif_jpeg(
    model: Option<&str>,
    date_time: Option<&str>,
    date_time_original: Option<&str>,
) -> Vec<u8> {
    let tiff = build_tiff(model, date_time, date_time_original);

    let mut jpeg = vec![0xFF, 0xD8];
    jpeg.extend_from_slice(&[0xFF, 0xE1]);
    jpeg.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// A structurally valid JPEG with no APP1 segment at all
pub fn plain_jpeg() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xD9]
}

/// A complete 1x1 PNG with no EXIF chunk
pub fn tiny_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
        0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1
        0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53,
        0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41,
        0x54, 0x08, 0xD7, 0x63, 0xF8, 0xFF, 0xFF, 0x3F,
        0x00, 0x05, 0xFE, 0x02, 0xFE, 0xDC, 0xCC, 0x59,
        0xE7, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E,
        0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

const ASCII: u16 = 2;
const LONG: u16 = 4;

const TAG_MODEL: u16 = 0x0110;
const TAG_DATE_TIME: u16 = 0x0132;
const TAG_EXIF_IFD: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;

/// Little-endian TIFF body: IFD0, optional Exif sub-IFD, then long values
fn build_tiff(
    model: Option<&str>,
    date_time: Option<&str>,
    date_time_original: Option<&str>,
) -> Vec<u8> {
    let ifd0_count =
        model.is_some() as u32 + date_time.is_some() as u32 + date_time_original.is_some() as u32;
    let ifd0_size = 2 + 12 * ifd0_count + 4;
    let exif_ifd_offset = 8 + ifd0_size;
    let exif_ifd_size = if date_time_original.is_some() {
        2 + 12 + 4
    } else {
        0
    };
    let data_start = exif_ifd_offset + exif_ifd_size;

    let mut data: Vec<u8> = Vec::new();

    // IFD entries must be in ascending tag order
    let mut ifd0: Vec<[u8; 12]> = Vec::new();
    if let Some(text) = model {
        ifd0.push(ascii_entry(TAG_MODEL, text, data_start, &mut data));
    }
    if let Some(text) = date_time {
        ifd0.push(ascii_entry(TAG_DATE_TIME, text, data_start, &mut data));
    }
    if date_time_original.is_some() {
        ifd0.push(raw_entry(TAG_EXIF_IFD, LONG, 1, exif_ifd_offset));
    }

    let mut exif_ifd: Vec<[u8; 12]> = Vec::new();
    if let Some(text) = date_time_original {
        exif_ifd.push(ascii_entry(
            TAG_DATE_TIME_ORIGINAL,
            text,
            data_start,
            &mut data,
        ));
    }

    let mut tiff = Vec::new();
    tiff.extend_from_slice(&[0x49, 0x49, 0x2A, 0x00]); // "II", magic 42
    tiff.extend_from_slice(&8u32.to_le_bytes()); // offset of IFD0

    tiff.extend_from_slice(&(ifd0.len() as u16).to_le_bytes());
    for entry in &ifd0 {
        tiff.extend_from_slice(entry);
    }
    tiff.extend_from_slice(&0u32.to_le_bytes()); // no next IFD

    if !exif_ifd.is_empty() {
        tiff.extend_from_slice(&(exif_ifd.len() as u16).to_le_bytes());
        for entry in &exif_ifd {
            tiff.extend_from_slice(entry);
        }
        tiff.extend_from_slice(&0u32.to_le_bytes());
    }

    debug_assert_eq!(tiff.len() as u32, data_start);
    tiff.extend_from_slice(&data);
    tiff
}

/// An ASCII entry; values longer than 4 bytes go to the data area
fn ascii_entry(tag: u16, text: &str, data_start: u32, data: &mut Vec<u8>) -> [u8; 12] {
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(0);
    let count = bytes.len() as u32;

    if bytes.len() <= 4 {
        let mut inline = [0u8; 4];
        inline[..bytes.len()].copy_from_slice(&bytes);
        raw_entry(tag, ASCII, count, u32::from_le_bytes(inline))
    } else {
        let offset = data_start + data.len() as u32;
        data.extend_from_slice(&bytes);
        raw_entry(tag, ASCII, count, offset)
    }
}

fn raw_entry(tag: u16, kind: u16, count: u32, value: u32) -> [u8; 12] {
    let mut entry = [0u8; 12];
    entry[0..2].copy_from_slice(&tag.to_le_bytes());
    entry[2..4].copy_from_slice(&kind.to_le_bytes());
    entry[4..8].copy_from_slice(&count.to_le_bytes());
    entry[8..12].copy_from_slice(&value.to_le_bytes());
    entry
}
