use std::path::Path;

use glam::Vec2;
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::{
    drawing::{draw_filled_rect_mut, draw_hollow_polygon_mut, draw_line_segment_mut},
    point::Point,
    rect::Rect,
};

use snafu::ResultExt;
use tracing::*;

use crate::{
    analysis::polygon::Polygon,
    consts::{POLYGON_COLOR, POLYGON_STROKE_WIDTH},
    error::{CogdemoError, ImageWriteSnafu},
};

use super::model::{Annotation, TextAnalysis};

/// Outlines the read text of `analysis` on `image` and writes the result
/// to `output`, replacing any existing file.
///
/// # Arguments
///
/// * `output` - Destination path, its extension picks the image format
/// * `analysis` - Text read from `image`
/// * `image` - The image that was analyzed
///
/// # Returns
///
/// * `Ok(())` once the annotated copy is written
/// * `Err(CogdemoError::ImageWrite)` if encoding or writing fails
pub fn draw<P: AsRef<Path>>(
    output: P,
    analysis: &TextAnalysis,
    image: &DynamicImage,
) -> Result<(), CogdemoError> {
    let annotations = analysis.annotations();
    debug!(
        polygons = annotations.len(),
        "drawing annotations on {}x{} image",
        image.width(),
        image.height()
    );

    let output_img = render(image, &annotations);

    output_img.save(output.as_ref()).context(ImageWriteSnafu {
        path: output.as_ref().to_string_lossy(),
    })?;

    Ok(())
}

/// Draws every annotation outline onto a copy of `image`.
pub fn render(image: &DynamicImage, annotations: &[Annotation]) -> RgbImage {
    let mut canvas = image.to_rgb8();
    let color = Rgb(POLYGON_COLOR);

    for annotation in annotations {
        outline(&mut canvas, &annotation.polygon, color, POLYGON_STROKE_WIDTH);
    }

    canvas
}

/// Outlines `polygon` with a stroke `width` pixels wide by drawing shifted
/// copies of it.
fn outline(canvas: &mut RgbImage, polygon: &Polygon, color: Rgb<u8>, width: u32) {
    let half = (width / 2) as i32;

    for dx in -half..=half {
        for dy in -half..=half {
            let shifted = polygon.translate(Vec2::new(dx as f32, dy as f32));
            stroke(canvas, &shifted.to_points(), color);
        }
    }
}

/// Draws one pixel wide. Collapsed polygons become a segment or a dot.
fn stroke(canvas: &mut RgbImage, points: &[Point<f32>], color: Rgb<u8>) {
    match points {
        [] => {}
        [point] => {
            let rect = Rect::at(point.x.round() as i32, point.y.round() as i32).of_size(1, 1);
            draw_filled_rect_mut(canvas, rect, color);
        }
        [start, end] => draw_line_segment_mut(canvas, (start.x, start.y), (end.x, end.y), color),
        _ => draw_hollow_polygon_mut(canvas, points, color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::vision::model::{AnnotationKind, ImageAnalysisResponse, TextAnalysis};
    use crate::client::vision::model::tests::sample_response;

    const CYAN: Rgb<u8> = Rgb(POLYGON_COLOR);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn sample_analysis() -> TextAnalysis {
        let response: ImageAnalysisResponse = serde_json::from_value(sample_response()).unwrap();
        TextAnalysis::from(response)
    }

    #[test]
    fn test_render_outlines_words_and_bare_lines() {
        let image = DynamicImage::new_rgb8(64, 48);
        let canvas = render(&image, &sample_analysis().annotations());

        // word "Four" corner and its stroke on both sides of the edge
        assert_eq!(*canvas.get_pixel(4, 4), CYAN);
        assert_eq!(*canvas.get_pixel(4, 3), CYAN);
        assert_eq!(*canvas.get_pixel(4, 5), CYAN);
        // word "score" right edge
        assert_eq!(*canvas.get_pixel(40, 9), CYAN);
        // line "1863" has no words, so its own outline is drawn
        assert_eq!(*canvas.get_pixel(4, 24), CYAN);
        assert_eq!(*canvas.get_pixel(30, 40), CYAN);

        // inside the word boxes stays untouched
        assert_eq!(*canvas.get_pixel(12, 9), BLACK);
        // gap between the two words is not covered by a line outline
        assert_eq!(*canvas.get_pixel(22, 9), BLACK);
    }

    #[test]
    fn test_render_keeps_image_size() {
        let image = DynamicImage::new_rgb8(64, 48);
        let canvas = render(&image, &[]);
        assert_eq!(canvas.dimensions(), (64, 48));
        assert!(canvas.pixels().all(|pixel| *pixel == BLACK));
    }

    #[test]
    fn test_polygon_partially_outside_image() {
        let image = DynamicImage::new_rgb8(16, 16);
        let annotation = Annotation {
            kind: AnnotationKind::Line,
            line: 0,
            polygon: Polygon::from_flat(&[-5.0, -5.0, 30.0, -5.0, 30.0, 8.0, -5.0, 8.0]).unwrap(),
        };
        let canvas = render(&image, &[annotation]);
        assert_eq!(*canvas.get_pixel(10, 8), CYAN);
    }

    fn line_annotation(flat: &[f32]) -> Annotation {
        Annotation {
            kind: AnnotationKind::Line,
            line: 0,
            polygon: Polygon::from_flat(flat).unwrap(),
        }
    }

    #[test]
    fn test_render_closed_polygon() {
        // last vertex repeats the first
        let response: ImageAnalysisResponse = serde_json::from_value(serde_json::json!({
            "readResult": { "blocks": [{ "lines": [{
                "text": "a",
                "boundingPolygon": [1, 1, 8, 1, 8, 6, 1, 1]
            }] }] }
        }))
        .unwrap();
        let annotations = TextAnalysis::from(response).annotations();

        let image = DynamicImage::new_rgb8(16, 16);
        let canvas = render(&image, &annotations);
        assert_eq!(*canvas.get_pixel(5, 1), CYAN);
        assert_eq!(*canvas.get_pixel(8, 4), CYAN);
        assert_eq!(*canvas.get_pixel(12, 12), BLACK);
    }

    #[test]
    fn test_render_point_sized_polygon() {
        let response: ImageAnalysisResponse = serde_json::from_value(serde_json::json!({
            "readResult": { "blocks": [{ "lines": [{
                "text": ".",
                "boundingPolygon": [5, 5, 5, 5, 5, 5, 5, 5]
            }] }] }
        }))
        .unwrap();
        let annotations = TextAnalysis::from(response).annotations();

        let image = DynamicImage::new_rgb8(16, 16);
        let canvas = render(&image, &annotations);
        assert_eq!(*canvas.get_pixel(5, 5), CYAN);
        assert_eq!(*canvas.get_pixel(4, 6), CYAN);
        assert_eq!(*canvas.get_pixel(8, 8), BLACK);
    }

    #[test]
    fn test_render_collapsed_to_segment() {
        let image = DynamicImage::new_rgb8(16, 16);
        let canvas = render(
            &image,
            &[line_annotation(&[2.0, 3.0, 2.0, 3.0, 9.0, 3.0, 9.0, 3.0])],
        );
        assert_eq!(*canvas.get_pixel(6, 3), CYAN);
        assert_eq!(*canvas.get_pixel(6, 4), CYAN);
        assert_eq!(*canvas.get_pixel(6, 8), BLACK);
    }

    #[test]
    fn test_render_dot_outside_image() {
        let image = DynamicImage::new_rgb8(4, 4);
        let canvas = render(&image, &[line_annotation(&[-20.0; 8])]);
        assert!(canvas.pixels().all(|pixel| *pixel == BLACK));
    }

    #[test]
    fn test_render_is_deterministic() {
        let image = DynamicImage::new_rgb8(64, 48);
        let annotations = sample_analysis().annotations();
        assert_eq!(render(&image, &annotations), render(&image, &annotations));
    }
}
