// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image locator — finds embedded raster images by flattened index.
//
// Enumeration order is page index ascending, then in-page declared
// /XObject order, each image counted once per page. An out-of-range index
// is a normal empty result; a malformed or unsupported entry is skipped
// with a warning and never aborts enumeration of the rest.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, RgbImage};
use lopdf::{Document, Object, ObjectId, Stream};
use tracing::{debug, warn};
use vytiah_core::types::{ExtractedImage, ImageFormat};

use super::content::resolve;

/// Look up an embedded raster image by its flattened traversal index.
pub fn image_at(doc: &Document, flat_index: usize) -> Option<ExtractedImage> {
    let mut seen = 0usize;
    for (_, page_id) in doc.get_pages() {
        for image_id in page_image_ids(doc, page_id) {
            if seen == flat_index {
                return extract_image(doc, image_id);
            }
            seen += 1;
        }
    }
    debug!(flat_index, total = seen, "image index out of range");
    None
}

/// Total number of embedded raster images across the document.
pub fn image_count(doc: &Document) -> usize {
    doc.get_pages()
        .into_values()
        .map(|page_id| page_image_ids(doc, page_id).len())
        .sum()
}

/// Image XObject ids declared on one page, in declaration order, each once.
fn page_image_ids(doc: &Document, page_id: ObjectId) -> Vec<ObjectId> {
    let Some(resources) = page_resources(doc, page_id) else {
        return Vec::new();
    };
    let Some((_, Object::Dictionary(xobjects))) =
        resources.get(b"XObject").ok().and_then(|v| resolve(doc, v))
    else {
        return Vec::new();
    };

    let mut ids = Vec::new();
    for (name, value) in xobjects.iter() {
        match resolve(doc, value) {
            Some((Some(id), Object::Stream(stream))) => {
                if is_image(stream) && !ids.contains(&id) {
                    ids.push(id);
                }
            }
            Some(_) => {
                // Non-stream XObject entries are malformed; forms and other
                // stream subtypes are simply not images.
                warn!(
                    name = %String::from_utf8_lossy(name),
                    "skipping malformed XObject entry"
                );
            }
            None => {
                warn!(
                    name = %String::from_utf8_lossy(name),
                    "skipping unresolvable XObject reference"
                );
            }
        }
    }
    ids
}

/// Resolve a page's /Resources, walking up the page tree when inherited.
fn page_resources<'a>(doc: &'a Document, page_id: ObjectId) -> Option<&'a lopdf::Dictionary> {
    let mut dict = doc.get_object(page_id).ok()?.as_dict().ok()?;
    for _ in 0..8 {
        if let Ok(value) = dict.get(b"Resources")
            && let Some((_, Object::Dictionary(resources))) = resolve(doc, value)
        {
            return Some(resources);
        }
        let parent = dict.get(b"Parent").ok()?;
        match resolve(doc, parent) {
            Some((_, Object::Dictionary(parent_dict))) => dict = parent_dict,
            _ => return None,
        }
    }
    None
}

fn is_image(stream: &Stream) -> bool {
    matches!(stream.dict.get(b"Subtype"), Ok(Object::Name(name)) if name == b"Image")
}

/// Pull the raw bytes of one image XObject.
///
/// DCT and JPX streams are passed through as-is (they already are complete
/// JPEG/JP2 payloads); plain or Flate-compressed 8-bit DeviceRGB/DeviceGray
/// rasters are re-encoded as PNG. Anything else is unsupported.
fn extract_image(doc: &Document, image_id: ObjectId) -> Option<ExtractedImage> {
    let stream = match doc.get_object(image_id) {
        Ok(Object::Stream(stream)) => stream,
        _ => {
            warn!(?image_id, "image object vanished between enumeration and extraction");
            return None;
        }
    };

    let filters = stream_filters(stream);
    if filters.iter().any(|f| f == "DCTDecode") {
        return Some(ExtractedImage::new(stream.content.clone(), ImageFormat::Jpeg));
    }
    if filters.iter().any(|f| f == "JPXDecode") {
        return Some(ExtractedImage::new(
            stream.content.clone(),
            ImageFormat::Jpeg2000,
        ));
    }
    if filters.iter().any(|f| f != "FlateDecode") {
        warn!(?image_id, ?filters, "unsupported image filter, skipping");
        return None;
    }

    encode_raster_png(doc, stream, image_id)
}

/// Re-encode an uncompressed or Flate-compressed raster as PNG.
fn encode_raster_png(doc: &Document, stream: &Stream, image_id: ObjectId) -> Option<ExtractedImage> {
    let data = if stream_filters(stream).is_empty() {
        stream.content.clone()
    } else {
        match stream.decompressed_content() {
            Ok(data) => data,
            Err(err) => {
                warn!(?image_id, %err, "image stream failed to decompress, skipping");
                return None;
            }
        }
    };

    let width = dict_i64(stream, b"Width")? as u32;
    let height = dict_i64(stream, b"Height")? as u32;
    let bits = dict_i64(stream, b"BitsPerComponent").unwrap_or(8);
    if bits != 8 {
        warn!(?image_id, bits, "unsupported bit depth, skipping image");
        return None;
    }

    let colorspace = stream
        .dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|v| resolve(doc, v))
        .and_then(|(_, object)| match object {
            Object::Name(name) => Some(name.clone()),
            _ => None,
        });

    let dynamic = match colorspace.as_deref() {
        Some(b"DeviceRGB") => {
            if data.len() != (width as usize) * (height as usize) * 3 {
                warn!(?image_id, "RGB raster size mismatch, skipping image");
                return None;
            }
            RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8)
        }
        Some(b"DeviceGray") => {
            if data.len() != (width as usize) * (height as usize) {
                warn!(?image_id, "grayscale raster size mismatch, skipping image");
                return None;
            }
            GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8)
        }
        other => {
            warn!(
                ?image_id,
                colorspace = ?other.map(String::from_utf8_lossy),
                "unsupported image colorspace, skipping"
            );
            return None;
        }
    }?;

    let mut png = Vec::new();
    if let Err(err) = dynamic.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png) {
        warn!(?image_id, %err, "PNG re-encode failed, skipping image");
        return None;
    }
    Some(ExtractedImage::new(png, ImageFormat::Png))
}

fn stream_filters(stream: &Stream) -> Vec<String> {
    match stream.dict.get(b"Filter") {
        Ok(Object::Name(name)) => vec![String::from_utf8_lossy(name).into_owned()],
        Ok(Object::Array(elements)) => elements
            .iter()
            .filter_map(|element| match element {
                Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn dict_i64(stream: &Stream, key: &[u8]) -> Option<i64> {
    stream.dict.get(key).ok().and_then(|v| v.as_i64().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::{gray_image_fixture, jpeg_image_fixture, load, pdf_with_images};

    #[test]
    fn enumeration_is_page_major_then_declared_order() {
        // Page 1 declares two JPEGs, page 2 declares one.
        let bytes = pdf_with_images(&[
            vec![jpeg_image_fixture(1), jpeg_image_fixture(2)],
            vec![jpeg_image_fixture(3)],
        ]);
        let doc = load(&bytes);

        assert_eq!(image_count(&doc), 3);
        for (index, tag) in [(0usize, 1u8), (1, 2), (2, 3)] {
            let img = image_at(&doc, index).unwrap();
            assert_eq!(img.format, ImageFormat::Jpeg);
            assert_eq!(img.bytes.last().copied(), Some(tag));
        }
    }

    #[test]
    fn out_of_range_index_is_absent_not_an_error() {
        let bytes = pdf_with_images(&[
            vec![jpeg_image_fixture(1), jpeg_image_fixture(2)],
            vec![jpeg_image_fixture(3)],
        ]);
        let doc = load(&bytes);
        assert!(image_at(&doc, 5).is_none());
    }

    #[test]
    fn repeated_lookups_return_identical_bytes() {
        let bytes = pdf_with_images(&[vec![jpeg_image_fixture(7)]]);
        let doc = load(&bytes);
        let first = image_at(&doc, 0).unwrap();
        let second = image_at(&doc, 0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn plain_gray_raster_comes_back_as_png() {
        let bytes = pdf_with_images(&[vec![gray_image_fixture(2, 2)]]);
        let doc = load(&bytes);
        let img = image_at(&doc, 0).unwrap();
        assert_eq!(img.format, ImageFormat::Png);
        // PNG magic.
        assert!(img.bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn document_without_images_yields_nothing() {
        let bytes = crate::pdf::fixtures::pdf_with_streams(&[Some(&["BT (text) Tj ET"])]);
        let doc = load(&bytes);
        assert_eq!(image_count(&doc), 0);
        assert!(image_at(&doc, 0).is_none());
    }
}
