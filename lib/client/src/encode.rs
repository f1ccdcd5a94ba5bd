//! Item payload encoding for the image use case.

use crate::error::ClientError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::imageops::FilterType;
use image::ImageFormat;
use std::io::Cursor;
use std::path::Path;

/// Images are downscaled to this size before posting; the remote index
/// embeds fixed-size inputs anyway and smaller uploads are much faster.
const POSTED_IMAGE_SIZE: u32 = 224;

/// Reads an image file and encodes it as the JPEG base64 data URI the
/// search API accepts.
pub fn image_data_uri(path: &Path) -> Result<String, ClientError> {
    let media_err = |source| ClientError::Media {
        path: path.to_path_buf(),
        source,
    };

    let img = image::open(path).map_err(media_err)?;
    let img = img
        .resize_exact(POSTED_IMAGE_SIZE, POSTED_IMAGE_SIZE, FilterType::Triangle)
        .to_rgb8();

    let mut encoded = Vec::new();
    img.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Jpeg)
        .map_err(media_err)?;

    Ok(format!("data:image/jpg;base64,{}", STANDARD.encode(&encoded)))
}
