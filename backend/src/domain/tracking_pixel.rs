//! The fixed 1x1 transparent PNG served for every pixel fetch.
//!
//! The bytes are part of the external contract: callers may checksum the
//! response, so this constant must never be regenerated or re-encoded.

/// Media type served alongside [`TRACKING_PIXEL`].
pub const TRACKING_PIXEL_CONTENT_TYPE: &str = "image/png";

/// 67-byte 1x1 RGBA PNG with a fully transparent pixel.
pub const TRACKING_PIXEL: [u8; 67] = [
    // signature
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, //
    // IHDR: 1x1, bit depth 8, colour type 6 (RGBA)
    0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
    0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4, 0x89, //
    // IDAT
    0x00, 0x00, 0x00, 0x0b, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, //
    // IEND
    0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];
