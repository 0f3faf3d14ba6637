//! The four lookup tables handed to pixel-remapping consumers.

use image::RgbaImage;

use crate::curve::channel::{IDENTITY_TABLE, LookupTable};

/// Snapshot of every channel's lookup table.
///
/// Always carries all four tables, even when only one channel changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTables {
    pub composite: LookupTable,
    pub red: LookupTable,
    pub green: LookupTable,
    pub blue: LookupTable,
}

impl Default for LookupTables {
    fn default() -> Self {
        Self {
            composite: IDENTITY_TABLE,
            red: IDENTITY_TABLE,
            green: IDENTITY_TABLE,
            blue: IDENTITY_TABLE,
        }
    }
}

impl LookupTables {
    /// `true` when every table is the identity mapping.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Remap one RGB pixel: the per-channel table first, then the composite.
    #[inline]
    pub fn apply_rgb(&self, rgb: [u8; 3]) -> [u8; 3] {
        let [r, g, b] = rgb;
        [
            self.composite[usize::from(self.red[usize::from(r)])],
            self.composite[usize::from(self.green[usize::from(g)])],
            self.composite[usize::from(self.blue[usize::from(b)])],
        ]
    }

    /// Remap every pixel of an RGBA image in place. Alpha is left untouched.
    pub fn apply_to_image(&self, image: &mut RgbaImage) {
        if self.is_identity() {
            return;
        }
        for pixel in image.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            let [r, g, b] = self.apply_rgb([r, g, b]);
            pixel.0 = [r, g, b, a];
        }
    }

    /// 256×1 RGBA texel row: `[red, green, blue, composite]` per input value.
    pub fn to_rgba_texels(&self) -> Vec<[u8; 4]> {
        (0..256)
            .map(|i| [self.red[i], self.green[i], self.blue[i], self.composite[i]])
            .collect()
    }

    /// The texel row as raw bytes for texture upload.
    pub fn texel_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.to_rgba_texels()).to_vec()
    }
}
