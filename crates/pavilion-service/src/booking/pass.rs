//! Check-in pass rendering.
//!
//! A pass is a machine-scannable PNG derived from the booking's
//! verification token: the token bytes are laid out as a grid of black
//! and white modules, with a quiet border. Gate scanners decode the grid
//! back to the token and call verification with it; the image itself
//! carries no state beyond the token.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use pavilion_core::error::AppError;
use pavilion_core::result::AppResult;
use pavilion_core::types::id::BookingId;

/// Grid dimension in modules. 16x16 = 256 cells, one per token bit.
const GRID_MODULES: u32 = 16;
/// Rendered pixels per module.
const MODULE_PIXELS: u32 = 8;
/// Quiet border around the grid, in modules.
const QUIET_MODULES: u32 = 2;

/// A renderable check-in pass for a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingPass {
    /// The booking this pass admits.
    pub booking_id: BookingId,
    /// The token the pass encodes, for text fallback at the gate.
    pub verification_token: String,
    /// PNG image of the pass as a `data:image/png;base64,` URL.
    pub image_data_url: String,
}

/// Render the verification token as a scannable module-grid PNG.
pub fn render_pass(booking_id: BookingId, token: &str) -> AppResult<BookingPass> {
    let bits = token_bits(token)?;

    let side = (GRID_MODULES + 2 * QUIET_MODULES) * MODULE_PIXELS;
    let img = image::GrayImage::from_fn(side, side, |x, y| {
        let mx = x / MODULE_PIXELS;
        let my = y / MODULE_PIXELS;
        let in_quiet = mx < QUIET_MODULES
            || my < QUIET_MODULES
            || mx >= QUIET_MODULES + GRID_MODULES
            || my >= QUIET_MODULES + GRID_MODULES;
        if in_quiet {
            return image::Luma([255u8]);
        }
        let cell = (my - QUIET_MODULES) * GRID_MODULES + (mx - QUIET_MODULES);
        if bits[cell as usize] {
            image::Luma([0u8])
        } else {
            image::Luma([255u8])
        }
    });

    let mut buf = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buf);
    img.write_to(&mut cursor, image::ImageFormat::Png)
        .map_err(|e| AppError::internal(format!("Failed to encode pass image: {e}")))?;

    Ok(BookingPass {
        booking_id,
        verification_token: token.to_string(),
        image_data_url: format!("data:image/png;base64,{}", BASE64.encode(&buf)),
    })
}

/// Expand the hex token into one bit per grid cell, most significant bit
/// first within each byte.
fn token_bits(token: &str) -> AppResult<Vec<bool>> {
    let cells = (GRID_MODULES * GRID_MODULES) as usize;
    let bytes = decode_hex(token)?;
    if bytes.len() * 8 != cells {
        return Err(AppError::internal(format!(
            "verification token has {got} bits, pass grid needs {cells}",
            got = bytes.len() * 8
        )));
    }
    Ok((0..cells)
        .map(|i| bytes[i / 8] >> (7 - (i % 8)) & 1 == 1)
        .collect())
}

fn decode_hex(token: &str) -> AppResult<Vec<u8>> {
    if token.len() % 2 != 0 {
        return Err(AppError::internal("verification token is not valid hex"));
    }
    (0..token.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&token[i..i + 2], 16)
                .map_err(|_| AppError::internal("verification token is not valid hex"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "00ff00ff00ff00ff00ff00ff00ff00ff00ff00ff00ff00ff00ff00ff00ff00ff";

    #[test]
    fn test_pass_renders_a_png_data_url() {
        let pass = render_pass(BookingId::new(), TOKEN).unwrap();
        assert!(pass.image_data_url.starts_with("data:image/png;base64,"));

        let b64 = pass.image_data_url.trim_start_matches("data:image/png;base64,");
        let png = BASE64.decode(b64).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_grid_bits_follow_the_token() {
        let bits = token_bits(TOKEN).unwrap();
        assert_eq!(bits.len(), 256);
        assert!(bits[..8].iter().all(|&b| !b));
        assert!(bits[8..16].iter().all(|&b| b));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        assert!(token_bits("not-hex").is_err());
        assert!(token_bits("abcd").is_err());
    }
}
