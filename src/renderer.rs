// src/renderer.rs
use egui::{Color32, ColorImage, Pos2};
use image::RgbaImage;
use tiny_skia::{
    ColorU8, FilterQuality, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, PixmapPaint,
    Stroke as SkiaStroke, Transform,
};

/// Builds the renderable path for a point sequence
///
/// Args:
///     points (&[Pos2]): stroke points, the first one is the move-to origin
///
/// Returns:
///     Option<Path>: None when there is no drawn segment or the
///     coordinates are not finite
pub fn stroke_path(points: &[Pos2]) -> Option<Path> {
    let (origin, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }

    let mut builder = PathBuilder::new();
    builder.move_to(origin.x, origin.y);
    for point in rest {
        builder.line_to(point.x, point.y);
    }
    builder.finish()
}

/// Strokes the points onto the pixmap with round caps and joins
///
/// Args:
///     pixmap (&mut Pixmap): the target
///     points (&[Pos2]): stroke points in device pixels
///     color (Color32): stroke color
///     thickness (f32): line width in device pixels
pub fn paint_stroke(pixmap: &mut Pixmap, points: &[Pos2], color: Color32, thickness: f32) {
    let Some(path) = stroke_path(points) else {
        return;
    };

    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    let stroke = SkiaStroke {
        width: thickness,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..SkiaStroke::default()
    };

    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

/// Draws `layer` unscaled at the origin of `target`.
pub fn draw_layer(target: &mut Pixmap, layer: &Pixmap) {
    target.draw_pixmap(
        0,
        0,
        layer.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}

/// Draws `source` stretched over the whole of `target`.
pub fn draw_stretched(target: &mut Pixmap, source: &Pixmap) {
    let scale_x = target.width() as f32 / source.width() as f32;
    let scale_y = target.height() as f32 / source.height() as f32;
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    target.draw_pixmap(
        0,
        0,
        source.as_ref(),
        &paint,
        Transform::from_scale(scale_x, scale_y),
        None,
    );
}

/// Converts a straight-alpha image into a premultiplied pixmap.
/// Returns None for zero-sized images.
pub fn image_to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

pub fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = image::Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}

// Texture upload for the egui host
pub fn to_color_image(image: &RgbaImage) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [image.width() as usize, image.height() as usize],
        image.as_raw(),
    )
}
