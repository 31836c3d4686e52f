//! Face textures: decoding, synthesis, snapshots
//!
//! The renderer wants four images: the spiral face shading, the matcap
//! shared by the rim and the hands, the center shadow stamp, and the noise
//! image that drives ordered dithering, plus a built-in low-battery glyph.
//! Each image loads from a PNG in the asset directory and falls back to a
//! procedural stand-in when the file is missing, so the binary always has
//! something to draw. Decoding lives here to keep the rasterizer types
//! free of file handling.

use std::path::Path;

use crate::rasterizer::{BitTexture, Canvas, DitherMatrix, GrayTexture, PixelSurface, HEIGHT, WIDTH};

pub const FACE_TEXTURE: &str = "face.png";
pub const MATCAP_TEXTURE: &str = "matcap.png";
pub const SHADOW_TEXTURE: &str = "shadow_center.png";
pub const NOISE_TEXTURE: &str = "noise.png";

/// Side of the synthetic noise tile
const NOISE_SIZE: i32 = 64;

/// Error type for asset decoding
#[derive(Debug)]
pub enum AssetError {
    IoError(std::io::Error),
    ImageError(image::ImageError),
    DimensionError(String),
}

impl From<std::io::Error> for AssetError {
    fn from(e: std::io::Error) -> Self {
        AssetError::IoError(e)
    }
}

impl From<image::ImageError> for AssetError {
    fn from(e: image::ImageError) -> Self {
        AssetError::ImageError(e)
    }
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::IoError(e) => write!(f, "IO error: {}", e),
            AssetError::ImageError(e) => write!(f, "Image error: {}", e),
            AssetError::DimensionError(msg) => write!(f, "Dimension error: {}", msg),
        }
    }
}

impl GrayTexture {
    /// Load from a PNG file, converting to grayscale
    pub fn from_png<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path)?;
        let img = image::load_from_memory(&bytes)?;
        let luma = img.to_luma8();
        let (width, height) = luma.dimensions();
        Ok(GrayTexture::from_luma(
            width as i32,
            height as i32,
            luma.into_raw(),
        ))
    }
}

impl BitTexture {
    /// Load from a PNG file, thresholding the grayscale at 128
    pub fn from_png<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let gray = GrayTexture::from_png(path)?;
        let stride = ((gray.width + 7) / 8) as usize;
        let mut data = vec![0u8; stride * gray.height.max(0) as usize];
        for y in 0..gray.height {
            for x in 0..gray.width {
                if gray.get(x, y) >= 128 {
                    data[y as usize * stride + (x / 8) as usize] |= 0x80 >> (x & 7);
                }
            }
        }
        Ok(BitTexture::from_packed(gray.width, gray.height, data))
    }
}

impl DitherMatrix {
    /// Adopt a grayscale image as a threshold matrix; must be square
    pub fn from_gray(gray: &GrayTexture) -> Result<Self, AssetError> {
        if gray.width != gray.height || gray.width <= 0 {
            return Err(AssetError::DimensionError(format!(
                "dither matrix must be square, got {}x{}",
                gray.width, gray.height
            )));
        }
        let size = gray.width;
        let mut data = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                data.push(gray.get(x, y));
            }
        }
        Ok(DitherMatrix::from_luma(size, data))
    }
}

/// Write a rendered canvas out as a grayscale PNG
pub fn save_snapshot<P: AsRef<Path>>(canvas: &Canvas, path: P) -> Result<(), AssetError> {
    let img = image::GrayImage::from_raw(
        canvas.width() as u32,
        canvas.height() as u32,
        canvas.to_luma(),
    )
    .ok_or_else(|| AssetError::DimensionError("canvas has no pixels".to_string()))?;
    img.save(path)?;
    Ok(())
}

/// The image set one face render reads from
pub struct FaceAssets {
    pub face: GrayTexture,
    pub matcap: GrayTexture,
    pub center_shadow: GrayTexture,
    pub noise: DitherMatrix,
    pub low_battery: BitTexture,
}

impl FaceAssets {
    /// Load the four PNG-backed textures from a directory, failing on the
    /// first missing or malformed file. The glyph is always built in.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, AssetError> {
        let dir = dir.as_ref();
        let noise = DitherMatrix::from_gray(&GrayTexture::from_png(dir.join(NOISE_TEXTURE))?)?;
        Ok(Self {
            face: GrayTexture::from_png(dir.join(FACE_TEXTURE))?,
            matcap: GrayTexture::from_png(dir.join(MATCAP_TEXTURE))?,
            center_shadow: GrayTexture::from_png(dir.join(SHADOW_TEXTURE))?,
            noise,
            low_battery: warning_glyph(),
        })
    }

    /// Load from a directory, swapping in a procedural stand-in for any
    /// texture that will not load
    pub fn load_or_synthetic<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            face: load_gray(dir, FACE_TEXTURE, synthetic_face),
            matcap: load_gray(dir, MATCAP_TEXTURE, synthetic_matcap),
            center_shadow: load_gray(dir, SHADOW_TEXTURE, synthetic_center_shadow),
            noise: load_noise(dir),
            low_battery: warning_glyph(),
        }
    }

    /// Procedural textures only, no disk access
    pub fn synthetic() -> Self {
        Self {
            face: synthetic_face(),
            matcap: synthetic_matcap(),
            center_shadow: synthetic_center_shadow(),
            noise: synthetic_noise(),
            low_battery: warning_glyph(),
        }
    }
}

fn load_gray(dir: &Path, name: &str, fallback: fn() -> GrayTexture) -> GrayTexture {
    match GrayTexture::from_png(dir.join(name)) {
        Ok(tex) => {
            println!("Loaded texture: {} ({}x{})", name, tex.width, tex.height);
            tex
        }
        Err(e) => {
            eprintln!("{}: {}", name, e);
            fallback()
        }
    }
}

fn load_noise(dir: &Path) -> DitherMatrix {
    let loaded =
        GrayTexture::from_png(dir.join(NOISE_TEXTURE)).and_then(|g| DitherMatrix::from_gray(&g));
    match loaded {
        Ok(matrix) => {
            println!(
                "Loaded texture: {} ({}x{})",
                NOISE_TEXTURE, matrix.size, matrix.size
            );
            matrix
        }
        Err(e) => {
            eprintln!("{}: {}", NOISE_TEXTURE, e);
            synthetic_noise()
        }
    }
}

/// 16x16 battery outline with the terminal nub on the right and a sliver
/// of charge at the left end, packed MSB-first
const WARNING_GLYPH: [u8; 32] = [
    0x00, 0x00, //
    0x00, 0x00, //
    0x00, 0x00, //
    0x00, 0x00, //
    0x7f, 0xf8, // .############...
    0x40, 0x08, // .#..........#...
    0x58, 0x0c, // .#.##.......##..
    0x58, 0x0c, // .#.##.......##..
    0x58, 0x0c, // .#.##.......##..
    0x58, 0x0c, // .#.##.......##..
    0x40, 0x08, // .#..........#...
    0x7f, 0xf8, // .############...
    0x00, 0x00, //
    0x00, 0x00, //
    0x00, 0x00, //
    0x00, 0x00, //
];

fn warning_glyph() -> BitTexture {
    BitTexture::from_packed(16, 16, WARNING_GLYPH.to_vec())
}

/// Radial falloff with a top-left light, echoing the baked face shading
fn synthetic_face() -> GrayTexture {
    let mut data = Vec::with_capacity((WIDTH * HEIGHT) as usize);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let dx = (x as f32 - 99.5) / 99.5;
            let dy = (y as f32 - 99.5) / 99.5;
            let r = (dx * dx + dy * dy).sqrt().min(1.0);
            let light = (-dx - dy) * 0.5;
            let v = 150.0 + light * 60.0 - r * 40.0;
            data.push(v.clamp(0.0, 255.0) as u8);
        }
    }
    GrayTexture::from_luma(WIDTH, HEIGHT, data)
}

/// Sphere normals lit from the upper left. The rim and hand UVs land on or
/// inside the sphere's silhouette circle, so the boundary ring carries the
/// visible shading range.
fn synthetic_matcap() -> GrayTexture {
    let mut data = Vec::with_capacity((WIDTH * HEIGHT) as usize);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let nx = (x as f32 - 99.5) / 99.5;
            let ny = (y as f32 - 99.5) / 99.5;
            let r2 = nx * nx + ny * ny;
            let v = if r2 <= 1.0 {
                let nz = (1.0 - r2).sqrt();
                let l = (-nx * 0.4 - ny * 0.6 + nz * 0.8).max(0.0);
                40.0 + l * 215.0
            } else {
                40.0
            };
            data.push(v.clamp(0.0, 255.0) as u8);
        }
    }
    GrayTexture::from_luma(WIDTH, HEIGHT, data)
}

/// Dark core at the pivot fading to white. The mask stamp inverts the
/// dither test, so dark texels are the ones that land ink.
fn synthetic_center_shadow() -> GrayTexture {
    let mut data = Vec::with_capacity((WIDTH * HEIGHT) as usize);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let dx = x as f32 - 99.5;
            let dy = y as f32 - 99.5;
            let r = (dx * dx + dy * dy).sqrt();
            data.push((r / 34.0 * 255.0).min(255.0) as u8);
        }
    }
    GrayTexture::from_luma(WIDTH, HEIGHT, data)
}

/// Interleaved gradient noise, a cheap stand-in for a blue noise image
fn synthetic_noise() -> DitherMatrix {
    let mut data = Vec::with_capacity((NOISE_SIZE * NOISE_SIZE) as usize);
    for y in 0..NOISE_SIZE {
        for x in 0..NOISE_SIZE {
            let g = 0.06711056 * x as f32 + 0.00583715 * y as f32;
            let v = (52.982_92 * g.fract()).fract();
            data.push((v * 255.0) as u8);
        }
    }
    DitherMatrix::from_luma(NOISE_SIZE, data)
}
