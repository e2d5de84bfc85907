/// How texture coordinates outside [0, 1] are treated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    ClampToEdge,
}

/// Magnification filter applied when a texel covers several pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MagFilter {
    Nearest,
    Linear,
}

/// Sampling settings carried alongside texture pixels
#[derive(Clone, Copy, Debug)]
pub struct TextureOptions {
    pub wrap: WrapMode,
    pub mag_filter: MagFilter,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            wrap: WrapMode::ClampToEdge,
            mag_filter: MagFilter::Linear,
        }
    }
}

/// CPU-side RGBA8 texture data, uploaded by the renderer on first use
#[derive(Clone, Debug)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub options: TextureOptions,
}

impl TextureData {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>, options: TextureOptions) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            pixels,
            options,
        }
    }

    /// A single opaque pixel. Stands in for "no texture" so every mesh can
    /// share one shader path.
    pub fn solid(color: [u8; 3]) -> Self {
        Self::new(
            1,
            1,
            vec![color[0], color[1], color[2], 255],
            TextureOptions::default(),
        )
    }

    /// Two-color checkerboard, `cells` squares per side. Sampled with repeat
    /// wrapping and nearest filtering it reads as a crisp tiled floor.
    pub fn checkerboard(cells: u32, light: [u8; 3], dark: [u8; 3], options: TextureOptions) -> Self {
        let size = cells.max(1);
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let color = if (x + y) % 2 == 0 { light } else { dark };
                pixels.extend_from_slice(&[color[0], color[1], color[2], 255]);
            }
        }
        Self::new(size, size, pixels, options)
    }
}
