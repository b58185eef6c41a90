use std::path::Path;

use crate::{
    config::PassOptions,
    error::{MosaixError, MosaixResult},
    raster::RasterBuffer,
    render::{self, RenderOptions},
    surface::Surface,
};

/// Render target, resolved once at the API boundary.
pub enum Target<'a> {
    /// Pixelate a surface in place.
    Surface(&'a mut Surface),
    /// Pixelate a decoded image; the result comes back as a new image.
    Image(&'a image::RgbaImage),
    /// Pixelate one video frame already captured as a raster buffer.
    Frame(&'a RasterBuffer),
}

/// Result of [`process`], matching the target kind.
pub enum Rendered {
    /// The surface target was mutated in place.
    InPlace,
    /// A freshly rendered image for image and frame targets.
    Image(image::RgbaImage),
}

/// Single dispatch point for every target kind; nothing downstream
/// re-inspects what it was given.
pub fn process(
    target: Target<'_>,
    options: &RenderOptions,
    passes: &PassOptions,
) -> MosaixResult<Rendered> {
    match target {
        Target::Surface(surface) => {
            tracing::debug!(
                width = surface.width(),
                height = surface.height(),
                "pixelating surface in place"
            );
            render::render(surface, options, passes)?;
            Ok(Rendered::InPlace)
        }
        Target::Image(image) => {
            tracing::debug!(
                width = image.width(),
                height = image.height(),
                "pixelating image"
            );
            let source = RasterBuffer::from_image(image)?;
            let mut surface = render_buffer(&source, options, passes)?;
            Ok(Rendered::Image(surface.to_image()?))
        }
        Target::Frame(frame) => {
            tracing::debug!(
                width = frame.width(),
                height = frame.height(),
                "pixelating video frame"
            );
            let mut surface = render_buffer(frame, options, passes)?;
            Ok(Rendered::Image(surface.to_image()?))
        }
    }
}

/// Build a surface sized to `source` and run the full render protocol on
/// it. The capability check happens here, before any drawing.
pub fn render_buffer(
    source: &RasterBuffer,
    options: &RenderOptions,
    passes: &PassOptions,
) -> MosaixResult<Surface> {
    let mut surface = Surface::new(source.width(), source.height())?;
    render::render_onto(&mut surface, source, options, passes)?;
    Ok(surface)
}

/// Decode an image file into the adapter's pixel format.
///
/// A file that exists but does not decode as a raster image fails with
/// `UnsupportedSource`; I/O failures pass through with context.
pub fn load_image(path: &Path) -> MosaixResult<image::RgbaImage> {
    match image::open(path) {
        Ok(img) => Ok(img.to_rgba8()),
        Err(image::ImageError::IoError(err)) => Err(anyhow::Error::new(err)
            .context(format!("open image {}", path.display()))
            .into()),
        Err(err) => Err(MosaixError::unsupported_source(format!(
            "{} is not a decodable raster image: {err}",
            path.display()
        ))),
    }
}
