use std::path::PathBuf;

use image::{Rgb, RgbImage};
use log::{debug, info};
use routegraph::{PlotRegion, RouteGraph, RouteGraphError};
use serde::Deserialize;
use thiserror::Error;

pub mod draw;
pub mod label;

use draw::{channel_to_u8, draw_marker_mut, draw_polyline_mut, to_rgb};
use label::{LabelStyle, draw_label_mut, find_font};

#[derive(Error, Debug)]
pub enum MapVizError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Route graph error: {0}")]
    GraphError(#[from] RouteGraphError),

    #[error("Failed to load font: {0}")]
    FontError(String),

    #[error("Failed to generate image: {0}")]
    ImageError(String),
}

pub type StatusOr<T> = Result<T, MapVizError>;

/// Appearance of the rendered map. Colors are 0–1 float channels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Image width and height in pixels.
    pub output_size: (u32, u32),
    /// Fraction of each image dimension locations are plotted in, `(0, 1]`.
    pub draw_area: f64,
    /// Multiplier for markers, lines, labels and padding. The plot region is
    /// set by `output_size` and `draw_area` alone, so `scale` never moves
    /// locations. Pixel-space sizes are `f32` as imageproc takes them, while
    /// `draw_area` feeds the `f64` unit-square mapping.
    pub scale: f32,
    /// Space between a marker and its label, and around label text.
    pub locplot_pad: f32,
    /// Routes take these in turn, starting over when exhausted.
    pub route_colors: Vec<[f64; 3]>,
    pub location_color: [f64; 3],
    pub label_text_color: [f64; 3],
    /// RGBA.
    pub label_bg_color: [f64; 4],
    pub label_border_color: [f64; 3],
    pub font_size: f32,
    pub font_path: Option<PathBuf>,
    pub bg_color: [f64; 3],
    pub route_width: f32,
    pub marker_size: f32,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            output_size: (1024, 1024),
            draw_area: 0.85,
            scale: 1.0,
            locplot_pad: 5.0,
            route_colors: vec![
                [0.75, 0.25, 0.25],
                [0.25, 0.75, 0.25],
                [0.25, 0.25, 0.75],
                [0.75, 0.75, 0.25],
                [0.75, 0.25, 0.75],
                [0.25, 0.75, 0.75],
            ],
            location_color: [0.0, 0.0, 0.0],
            label_text_color: [0.5, 0.0, 0.0],
            label_bg_color: [1.0, 1.0, 1.0, 0.75],
            label_border_color: [0.0, 0.0, 0.0],
            font_size: 13.0,
            font_path: None,
            bg_color: [1.0, 1.0, 1.0],
            route_width: 2.0,
            marker_size: 4.0,
        }
    }
}

impl VizConfig {
    pub fn palette(&self) -> Vec<Rgb<u8>> {
        self.route_colors.iter().copied().map(to_rgb).collect()
    }

    /// Reject sizes that cannot be drawn.
    pub fn validate(&self) -> StatusOr<()> {
        let (width, height) = self.output_size;
        if width == 0 || height == 0 {
            return Err(MapVizError::ImageError(format!("Invalid output size {}x{}", width, height)));
        }

        if !(self.draw_area > 0.0 && self.draw_area <= 1.0) {
            return Err(MapVizError::ImageError(format!("draw_area must be in (0, 1], got {}", self.draw_area)));
        }

        // scale has to be positive, the other sizes may be zero
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(MapVizError::ImageError(format!("scale must be positive, got {}", self.scale)));
        }
        let sizes = [
            ("font_size", self.font_size),
            ("marker_size", self.marker_size),
            ("route_width", self.route_width),
            ("locplot_pad", self.locplot_pad),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value >= 0.0) {
                return Err(MapVizError::ImageError(format!("{} must be a non-negative number, got {}", name, value)));
            }
        }

        Ok(())
    }

    fn label_style(&self) -> LabelStyle {
        let [r, g, b, a] = self.label_bg_color;
        LabelStyle {
            text: to_rgb(self.label_text_color),
            background: Rgb([channel_to_u8(r), channel_to_u8(g), channel_to_u8(b)]),
            background_alpha: a.clamp(0.0, 1.0) as f32,
            border: to_rgb(self.label_border_color),
            font_size: self.font_size * self.scale,
            pad: self.locplot_pad * self.scale,
        }
    }
}

/// Render routes, markers and labels for `graph`.
pub fn render_map(graph: &RouteGraph, config: &VizConfig) -> StatusOr<RgbImage> {
    config.validate()?;
    let (width, height) = config.output_size;

    // Project once, then everything below works in pixels
    let layout = graph.layout(&config.palette())?;
    let region = PlotRegion::centered(config.output_size, config.draw_area);
    info!("Plotting {} routes and {} locations into {:?}", layout.routes.len(), layout.locations.len(), region);

    // Fill with the background color
    let mut image = RgbImage::from_pixel(width, height, to_rgb(config.bg_color));

    // Routes first so markers sit on top of them
    let route_width = config.route_width * config.scale;
    for route in &layout.routes {
        let points: Vec<(f32, f32)> = route.points.iter().map(|p| region.to_pixel(*p)).collect();
        debug!("{} -> {}: {:?}", route.source, route.target, points);
        draw_polyline_mut(&mut image, &points, route.color, route_width);
    }

    // Keep pixel positions around, labels are anchored on the same points
    let marker_size = config.marker_size * config.scale;
    let location_color = to_rgb(config.location_color);
    let markers: Vec<(f32, f32)> = layout.locations.iter().map(|l| region.to_pixel(l.point)).collect();
    for (location, &pixel) in layout.locations.iter().zip(&markers) {
        info!("{} at ({:.0}, {:.0})", location.name, pixel.0, pixel.1);
        draw_marker_mut(&mut image, pixel, marker_size, location_color);
    }

    // Labels go last so routes and other markers never cover them.
    if let Some(font) = find_font(config.font_path.as_deref()) {
        let style = config.label_style();
        for (location, &pixel) in layout.locations.iter().zip(&markers) {
            draw_label_mut(&mut image, &font, &style, pixel, marker_size / 2.0, &location.name);
        }
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use routegraph::{DestinationSpec, Location, Position};

    fn config() -> VizConfig {
        VizConfig {
            output_size: (100, 100),
            draw_area: 0.8,
            route_colors: vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            font_path: Some(PathBuf::from("/nonexistent/font.ttf")),
            route_width: 1.0,
            ..VizConfig::default()
        }
    }

    fn graph() -> RouteGraph {
        RouteGraph::from_locations(vec![
            Location::new(
                "A",
                Position::new(0.0, 0.0, 0.0),
                vec![DestinationSpec::Direct { target: "B".to_string() }],
            ),
            Location::new(
                "B",
                Position::new(100.0, 0.0, 100.0),
                vec![
                    DestinationSpec::Direct { target: "A".to_string() },
                    DestinationSpec::Detailed {
                        target: "C".to_string(),
                        duration: None,
                        waypoints: vec![[None, None, Some(0.0)]],
                    },
                ],
            ),
            Location::new("C", Position::new(50.0, 0.0, 0.0), vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn test_render_map() {
        let image = render_map(&graph(), &config()).unwrap();

        assert_eq!(image.dimensions(), (100, 100));
        // Background outside the plot region.
        assert_eq!(*image.get_pixel(0, 99), Rgb([255, 255, 255]));
        // First route, A to B along the diagonal.
        assert_eq!(*image.get_pixel(50, 50), Rgb([255, 0, 0]));
        // Second route goes B, up to the top edge, then left to C.
        assert_eq!(*image.get_pixel(90, 50), Rgb([0, 0, 255]));
        assert_eq!(*image.get_pixel(70, 10), Rgb([0, 0, 255]));
        // Markers sit on top of routes.
        assert_eq!(*image.get_pixel(10, 10), Rgb([0, 0, 0]));
        assert_eq!(*image.get_pixel(90, 90), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_invalid_output_size() {
        let config = VizConfig { output_size: (0, 10), ..config() };
        assert!(matches!(render_map(&graph(), &config), Err(MapVizError::ImageError(_))));
    }

    #[test]
    fn test_unusable_sizes_are_errors() {
        // A real font makes the text path run when one is installed
        let font_path = label::DEFAULT_FONT_PATHS.iter().map(PathBuf::from).find(|p| p.exists());
        let base = VizConfig { font_path, ..config() };

        let broken = [
            VizConfig { scale: -1.0, ..base.clone() },
            VizConfig { scale: 0.0, ..base.clone() },
            VizConfig { scale: f32::NAN, ..base.clone() },
            VizConfig { font_size: -5.0, ..base.clone() },
            VizConfig { marker_size: f32::INFINITY, ..base.clone() },
            VizConfig { route_width: -2.0, ..base.clone() },
            VizConfig { locplot_pad: -1.0, ..base.clone() },
            VizConfig { draw_area: 0.0, ..base.clone() },
            VizConfig { draw_area: 1.5, ..base.clone() },
            VizConfig { draw_area: f64::NAN, ..base.clone() },
        ];
        for config in &broken {
            assert!(
                matches!(render_map(&graph(), config), Err(MapVizError::ImageError(_))),
                "{config:?} should be rejected"
            );
        }

        // Zero-sized decorations and a full draw area are fine
        let edge = VizConfig { marker_size: 0.0, route_width: 0.0, draw_area: 1.0, ..base };
        assert!(render_map(&graph(), &edge).is_ok());
    }

    #[test]
    fn test_empty_palette() {
        let config = VizConfig { route_colors: vec![], ..config() };
        assert!(matches!(
            render_map(&graph(), &config),
            Err(MapVizError::GraphError(RouteGraphError::EmptyPalette))
        ));
    }

    #[test]
    fn test_config_defaults_fill_missing_keys() {
        let config: VizConfig = serde_json::from_str(r#"{"output_size": [640, 480], "scale": 2.0}"#).unwrap();

        assert_eq!(config.output_size, (640, 480));
        assert_eq!(config.scale, 2.0);
        assert_eq!(config.draw_area, 0.85);
        assert_eq!(config.route_colors.len(), 6);
        assert_eq!(config.palette()[0], Rgb([191, 64, 64]));
    }

    #[test]
    fn test_label_style_scales() {
        let config = VizConfig { scale: 2.0, ..VizConfig::default() };
        let style = config.label_style();

        assert_eq!(style.font_size, 26.0);
        assert_eq!(style.pad, 10.0);
        assert_eq!(style.background_alpha, 0.75);
        assert_eq!(style.text, Rgb([128, 0, 0]));
    }
}
