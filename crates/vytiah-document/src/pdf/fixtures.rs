// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Synthetic in-memory PDFs for the content-stream tests.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

/// Parse fixture bytes, panicking on failure (test-only).
pub fn load(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).expect("fixture bytes must parse")
}

/// Build a PDF where each entry is one page: `None` produces a page with
/// no /Contents at all; `Some(fragments)` produces a single stream for one
/// fragment or an ordered /Contents array for several.
pub fn pdf_with_streams(pages: &[Option<&[&str]>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let mut page_ids: Vec<ObjectId> = Vec::new();

    for page in pages {
        let mut page_dict = dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };

        if let Some(fragments) = page {
            let stream_ids: Vec<ObjectId> = fragments
                .iter()
                .map(|fragment| {
                    doc.add_object(Stream::new(dictionary! {}, fragment.as_bytes().to_vec()))
                })
                .collect();
            let contents = if stream_ids.len() == 1 {
                Object::Reference(stream_ids[0])
            } else {
                Object::Array(stream_ids.into_iter().map(Object::Reference).collect())
            };
            page_dict.set("Contents", contents);
        }

        page_ids.push(doc.add_object(page_dict));
    }

    finish(doc, page_ids)
}

/// An image XObject to embed in a fixture page.
pub struct ImageFixture {
    pub dict: Dictionary,
    pub payload: Vec<u8>,
}

/// A 1x1 DCT-compressed image whose payload ends with `tag`, so tests can
/// tell extracted images apart.
pub fn jpeg_image_fixture(tag: u8) -> ImageFixture {
    ImageFixture {
        dict: dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => 1,
            "Height" => 1,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        payload: vec![0xFF, 0xD8, 0xFF, tag],
    }
}

/// An uncompressed 8-bit grayscale raster with a simple gradient.
pub fn gray_image_fixture(width: u32, height: u32) -> ImageFixture {
    let payload: Vec<u8> = (0..width * height).map(|i| (i * 40) as u8).collect();
    ImageFixture {
        dict: dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
        },
        payload,
    }
}

/// Build a PDF where each entry is one page's declared images, in order.
/// Every page gets a content stream that invokes its images by name.
pub fn pdf_with_images(pages: &[Vec<ImageFixture>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let mut page_ids: Vec<ObjectId> = Vec::new();

    for images in pages {
        let mut xobjects = Dictionary::new();
        let mut content = String::new();
        for (index, image) in images.iter().enumerate() {
            let image_id = doc.add_object(Stream::new(image.dict.clone(), image.payload.clone()));
            let name = format!("Im{index}");
            xobjects.set(name.as_bytes().to_vec(), Object::Reference(image_id));
            content.push_str(&format!("q /{name} Do Q\n"));
        }

        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_dict = dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => dictionary! { "XObject" => xobjects },
            "Contents" => Object::Reference(content_id),
        };
        page_ids.push(doc.add_object(page_dict));
    }

    finish(doc, page_ids)
}

/// Attach the page tree and catalog, then serialize.
fn finish(mut doc: Document, page_ids: Vec<ObjectId>) -> Vec<u8> {
    let kids: Vec<Object> = page_ids.iter().copied().map(Object::Reference).collect();
    let count = page_ids.len() as i64;
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
    });

    for page_id in page_ids {
        if let Ok(page) = doc.get_object_mut(page_id)
            && let Ok(dict) = page.as_dict_mut()
        {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("fixture must serialize");
    bytes
}
