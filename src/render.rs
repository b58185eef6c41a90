use crate::{
    config::{PassConfig, PassOptions},
    core::Rgba8,
    error::MosaixResult,
    grid::Grid,
    raster::RasterBuffer,
    shapes,
    surface::Surface,
};

/// Per-call render options.
///
/// The clear color travels with the call instead of living in process-wide
/// state, so concurrent renders of different surfaces cannot interfere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderOptions {
    /// Background fill applied before the first pass; `None` clears to
    /// fully transparent.
    pub clear_color: Option<Rgba8>,
}

/// Run one sampling pass over `source`, drawing onto `surface`.
///
/// The pass is validated up front; a normalization failure leaves the
/// surface untouched. For every grid cell the sampled pixel becomes the
/// fill color (alpha scaled by the pass multiplier) and the pass shape is
/// drawn at the cell center.
pub fn run_pass(
    surface: &mut Surface,
    source: &RasterBuffer,
    config: &PassConfig,
) -> MosaixResult<()> {
    let pass = config.normalize()?;
    let grid = Grid::new(
        source.width(),
        source.height(),
        pass.resolution,
        (pass.offset_x, pass.offset_y),
    );
    for cell in grid.cells() {
        let (x, y) = cell.pixel;
        let color = source.pixel(x, y).scale_alpha(pass.alpha);
        surface.set_fill(color);
        shapes::draw(surface, pass.shape, cell.center, pass.size);
    }
    Ok(())
}

/// Clear `surface` and composite every pass in list order against the
/// immutable `source` snapshot. An empty list performs only the clear.
pub fn render_onto(
    surface: &mut Surface,
    source: &RasterBuffer,
    options: &RenderOptions,
    passes: &PassOptions,
) -> MosaixResult<()> {
    surface.clear(options.clear_color);
    for config in passes.passes() {
        run_pass(surface, source, config)?;
    }
    surface.flush();
    Ok(())
}

/// Pixelate `surface` in place: snapshot its pixels once, clear, then
/// redraw the snapshot as shape passes. Later passes composite visually
/// over earlier ones; every pass samples the same pre-render snapshot.
#[tracing::instrument(skip_all, fields(passes = passes.passes().len()))]
pub fn render(
    surface: &mut Surface,
    options: &RenderOptions,
    passes: &PassOptions,
) -> MosaixResult<()> {
    let source = surface.snapshot()?;
    render_onto(surface, &source, options, passes)
}
