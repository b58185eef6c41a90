use kurbo::{Affine, BezPath, PathEl, Point, Rect};

use crate::{
    core::Rgba8,
    error::{MosaixError, MosaixResult},
    raster::RasterBuffer,
};

/// CPU drawing surface backed by the `vello_cpu` rasterizer.
///
/// Fills are recorded against the current transform and fill color and
/// rasterized into the pixel store on [`Surface::flush`]; readback entry
/// points flush implicitly. The surface keeps a canvas-style transform
/// stack so shape primitives can scope rotations without leaking state.
#[derive(Debug)]
pub struct Surface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    ctx: vello_cpu::RenderContext,
    fill: Rgba8,
    transform: Affine,
    stack: Vec<Affine>,
}

impl Surface {
    /// Create a blank, fully transparent surface.
    ///
    /// This is the host capability check: it runs once at entry, before any
    /// other work. Dimensions the rasterizer cannot represent fail with
    /// `UnsupportedHost`.
    pub fn new(width: u32, height: u32) -> MosaixResult<Self> {
        if width == 0 || height == 0 {
            return Err(MosaixError::validation("surface width/height must be > 0"));
        }
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| MosaixError::unsupported_host("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| MosaixError::unsupported_host("surface height exceeds u16"))?;

        let mut surface = Self {
            width: width_u16,
            height: height_u16,
            pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            fill: Rgba8::opaque(0, 0, 0),
            transform: Affine::IDENTITY,
            stack: Vec::new(),
        };
        surface.apply_transform();
        surface.set_fill(surface.fill);
        Ok(surface)
    }

    /// Surface pre-filled with a raster buffer's pixels.
    pub fn from_raster(source: &RasterBuffer) -> MosaixResult<Self> {
        let mut surface = Self::new(source.width(), source.height())?;
        for (dst, src) in surface
            .pixmap
            .data_as_u8_slice_mut()
            .chunks_exact_mut(4)
            .zip(source.data().chunks_exact(4))
        {
            let px = Rgba8::new(src[0], src[1], src[2], src[3]).premultiply();
            dst.copy_from_slice(&px);
        }
        Ok(surface)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Reset every pixel to the clear color (fully transparent when none is
    /// given) and drop any recorded, unflushed drawing.
    pub fn clear(&mut self, color: Option<Rgba8>) {
        let px = color.map(Rgba8::premultiply).unwrap_or([0, 0, 0, 0]);
        for chunk in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
        self.reset_ctx();
    }

    /// Select the fill color used by subsequent fill calls.
    pub fn set_fill(&mut self, color: Rgba8) {
        self.fill = color;
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }

    /// Record an axis-aligned filled rectangle.
    pub fn fill_rect(&mut self, rect: Rect) {
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Record a filled path.
    pub fn fill_path(&mut self, path: &BezPath) {
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Push the current transform onto the stack.
    pub fn save(&mut self) {
        self.stack.push(self.transform);
    }

    /// Pop the most recent [`Surface::save`]. A restore with no matching
    /// save is a no-op.
    pub fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
            self.apply_transform();
        }
    }

    /// Translate the local coordinate frame.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform * Affine::translate((dx, dy));
        self.apply_transform();
    }

    /// Rotate the local coordinate frame by `theta` radians.
    pub fn rotate(&mut self, theta: f64) {
        self.transform = self.transform * Affine::rotate(theta);
        self.apply_transform();
    }

    /// Current transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Depth of the save/restore stack.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Rasterize recorded drawing into the pixel store and start a fresh
    /// recording pass with the current transform and fill.
    pub fn flush(&mut self) {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        self.reset_ctx();
    }

    /// Straight-alpha snapshot of the current pixels. Flushes first.
    pub fn snapshot(&mut self) -> MosaixResult<RasterBuffer> {
        self.flush();
        let mut data = Vec::with_capacity(self.pixmap.data_as_u8_slice().len());
        for px in self.pixmap.data_as_u8_slice().chunks_exact(4) {
            let c = Rgba8::unpremultiply([px[0], px[1], px[2], px[3]]);
            data.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
        RasterBuffer::new(self.width(), self.height(), data)
    }

    /// Readback as a straight-alpha image. Flushes first.
    pub fn to_image(&mut self) -> MosaixResult<image::RgbaImage> {
        let snapshot = self.snapshot()?;
        let (width, height) = (snapshot.width(), snapshot.height());
        image::RgbaImage::from_raw(width, height, snapshot.into_data())
            .ok_or_else(|| MosaixError::validation("surface readback byte length mismatch"))
    }

    fn reset_ctx(&mut self) {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        self.apply_transform();
        self.set_fill(self.fill);
    }

    fn apply_transform(&mut self) {
        self.ctx.set_transform(affine_to_cpu(self.transform));
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
