//! SVG rendering of the marker map.

use std::fmt::Write;

use uuid::Uuid;

use crate::features::map::error::MapError;
use crate::features::map::markers::{MapSurface, Marker, MarkerStyle};
use crate::features::sites::models::Coordinate;

const GRID_SIZE: u32 = 40;
const PADDING: f64 = 60.0;

/// Size of the drawing area in SVG user units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 500,
        }
    }
}

impl Viewport {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

struct MarkerPaint {
    radius: u32,
    inner_radius: u32,
    fill: &'static str,
    opacity: &'static str,
}

fn paint(style: MarkerStyle) -> MarkerPaint {
    match style {
        MarkerStyle::Default => MarkerPaint {
            radius: 15,
            inner_radius: 7,
            fill: "#3b82f6",
            opacity: "0.7",
        },
        MarkerStyle::Selected => MarkerPaint {
            radius: 20,
            inner_radius: 10,
            fill: "#06b6d4",
            opacity: "1",
        },
    }
}

/// Equirectangular projection of a coordinate box onto the viewport
struct Projection {
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
    viewport: Viewport,
}

impl Projection {
    fn fit(markers: &[Marker], viewport: Viewport) -> Self {
        let mut projection = Self {
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_lng: f64::INFINITY,
            max_lng: f64::NEG_INFINITY,
            viewport,
        };
        for marker in markers {
            projection.min_lat = projection.min_lat.min(marker.position.lat);
            projection.max_lat = projection.max_lat.max(marker.position.lat);
            projection.min_lng = projection.min_lng.min(marker.position.lng);
            projection.max_lng = projection.max_lng.max(marker.position.lng);
        }
        projection
    }

    /// Maps `value` from `[min, max]` onto `[0, extent]`; a degenerate
    /// range lands in the middle.
    fn scale(value: f64, min: f64, max: f64, extent: f64) -> f64 {
        let span = max - min;
        if span <= f64::EPSILON {
            extent / 2.0
        } else {
            (value - min) / span * extent
        }
    }

    fn project(&self, position: Coordinate) -> (f64, f64) {
        let inner_width = (self.viewport.width as f64 - 2.0 * PADDING).max(0.0);
        let inner_height = (self.viewport.height as f64 - 2.0 * PADDING).max(0.0);

        let x = PADDING + Self::scale(position.lng, self.min_lng, self.max_lng, inner_width);
        // latitude grows northwards, SVG y grows downwards
        let y = PADDING + inner_height
            - Self::scale(position.lat, self.min_lat, self.max_lat, inner_height);
        (x, y)
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn open_document(out: &mut String, viewport: Viewport) {
    let Viewport { width, height } = viewport;
    let _ = write!(
        out,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="100%" viewBox="0 0 {width} {height}"><defs><pattern id="grid" width="{GRID_SIZE}" height="{GRID_SIZE}" patternUnits="userSpaceOnUse"><path d="M {GRID_SIZE} 0 L 0 0 0 {GRID_SIZE}" fill="none" stroke="#334155" stroke-width="0.5"/></pattern></defs><rect width="{width}" height="{height}" fill="#1e293b"/><rect width="{width}" height="{height}" fill="url(#grid)"/>"##
    );
}

fn legend(out: &mut String) {
    out.push_str(concat!(
        r##"<g transform="translate(20, 20)">"##,
        r##"<rect width="200" height="80" fill="rgba(15, 23, 42, 0.8)" stroke="#475569" stroke-width="1" rx="8"/>"##,
        r##"<text x="10" y="25" fill="#ffffff" font-size="14" font-weight="600">Lokasi Menara BTS</text>"##,
        r##"<circle cx="20" cy="50" r="6" fill="#3b82f6"/>"##,
        r##"<text x="35" y="55" fill="#cbd5e1" font-size="12">Menara</text>"##,
        r##"<circle cx="20" cy="70" r="6" fill="#06b6d4"/>"##,
        r##"<text x="35" y="75" fill="#cbd5e1" font-size="12">Terpilih</text>"##,
        "</g>",
    ));
}

/// Renders a centred message instead of a map
pub fn render_empty_state(viewport: Viewport, message: &str) -> String {
    let viewport = if viewport.is_empty() {
        Viewport::default()
    } else {
        viewport
    };

    let mut out = String::new();
    open_document(&mut out, viewport);
    let _ = write!(
        out,
        r##"<text x="{x}" y="{y}" text-anchor="middle" fill="#94a3b8" font-size="16">{message}</text></svg>"##,
        x = viewport.width / 2,
        y = viewport.height / 2,
        message = escape_xml(message),
    );
    out
}

/// [`MapSurface`] that keeps markers in insertion order and renders them
/// as a standalone SVG document
#[derive(Debug, Clone)]
pub struct SvgSurface {
    viewport: Viewport,
    markers: Vec<Marker>,
}

impl SvgSurface {
    pub fn new(viewport: Viewport) -> Result<Self, MapError> {
        if viewport.is_empty() {
            return Err(MapError::SurfaceUnavailable(format!(
                "viewport {}x{} has no drawing area",
                viewport.width, viewport.height
            )));
        }
        Ok(Self {
            viewport,
            markers: Vec::new(),
        })
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    fn marker_mut(&mut self, site_id: Uuid) -> Option<&mut Marker> {
        self.markers.iter_mut().find(|m| m.site_id == site_id)
    }

    pub fn render(&self) -> String {
        let projection = Projection::fit(&self.markers, self.viewport);
        let mut out = String::new();
        open_document(&mut out, self.viewport);

        // selected marker last so it is drawn on top
        let (selected, regular): (Vec<&Marker>, Vec<&Marker>) = self
            .markers
            .iter()
            .partition(|m| m.style == MarkerStyle::Selected);

        for marker in regular.into_iter().chain(selected) {
            let (x, y) = projection.project(marker.position);
            let paint = paint(marker.style);
            let _ = write!(
                out,
                r##"<g data-site-id="{id}"><circle cx="{x:.1}" cy="{y:.1}" r="{r}" fill="{fill}" opacity="{opacity}"/><circle cx="{x:.1}" cy="{y:.1}" r="{inner}" fill="#ffffff"/><text x="{x:.1}" y="{label_y:.1}" text-anchor="middle" fill="#ffffff" font-size="12" font-weight="600">{label}</text></g>"##,
                id = marker.site_id,
                r = paint.radius,
                fill = paint.fill,
                opacity = paint.opacity,
                inner = paint.inner_radius,
                label_y = y + 30.0,
                label = escape_xml(&marker.label),
            );
        }

        legend(&mut out);
        out.push_str("</svg>");
        out
    }
}

impl MapSurface for SvgSurface {
    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn remove_marker(&mut self, site_id: Uuid) {
        self.markers.retain(|m| m.site_id != site_id);
    }

    fn move_marker(&mut self, site_id: Uuid, position: Coordinate) {
        if let Some(marker) = self.marker_mut(site_id) {
            marker.position = position;
        }
    }

    fn relabel_marker(&mut self, site_id: Uuid, label: &str) {
        if let Some(marker) = self.marker_mut(site_id) {
            marker.label = label.to_string();
        }
    }

    fn set_marker_style(&mut self, site_id: Uuid, style: MarkerStyle) {
        if let Some(marker) = self.marker_mut(site_id) {
            marker.style = style;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(label: &str, lat: f64, lng: f64, style: MarkerStyle) -> Marker {
        Marker {
            site_id: Uuid::new_v4(),
            position: Coordinate::new(lat, lng),
            label: label.to_string(),
            style,
        }
    }

    #[test]
    fn test_zero_size_viewport_is_unavailable() {
        let result = SvgSurface::new(Viewport {
            width: 0,
            height: 500,
        });

        assert!(matches!(result, Err(MapError::SurfaceUnavailable(_))));
    }

    #[test]
    fn test_render_uses_marker_styles() {
        let mut surface = SvgSurface::new(Viewport::default()).unwrap();
        surface.add_marker(marker("Menara A", -6.2, 106.8, MarkerStyle::Default));
        surface.add_marker(marker("Menara B", -6.9, 107.6, MarkerStyle::Selected));

        let svg = surface.render();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 1200 500""#));
        assert!(svg.contains(r##"r="15" fill="#3b82f6" opacity="0.7""##));
        assert!(svg.contains(r##"r="20" fill="#06b6d4" opacity="1""##));
        assert!(svg.contains("Lokasi Menara BTS"));
    }

    #[test]
    fn test_projection_keeps_north_up_and_west_left() {
        let west_north = marker("A", 0.0, 100.0, MarkerStyle::Default);
        let east_south = marker("B", -10.0, 120.0, MarkerStyle::Default);
        let projection = Projection::fit(
            &[west_north.clone(), east_south.clone()],
            Viewport::default(),
        );

        let (x1, y1) = projection.project(west_north.position);
        let (x2, y2) = projection.project(east_south.position);

        assert_eq!((x1, y1), (PADDING, PADDING));
        assert_eq!((x2, y2), (1200.0 - PADDING, 500.0 - PADDING));
    }

    #[test]
    fn test_single_marker_is_centred() {
        let only = marker("A", -6.2, 106.8, MarkerStyle::Default);
        let projection = Projection::fit(std::slice::from_ref(&only), Viewport::default());

        assert_eq!(projection.project(only.position), (600.0, 250.0));
    }

    #[test]
    fn test_labels_are_escaped() {
        let mut surface = SvgSurface::new(Viewport::default()).unwrap();
        surface.add_marker(marker("PT <A&B>", -6.2, 106.8, MarkerStyle::Default));

        let svg = surface.render();

        assert!(svg.contains("PT &lt;A&amp;B&gt;"));
        assert!(!svg.contains("<A&B>"));
    }

    #[test]
    fn test_empty_state_shows_message() {
        let svg = render_empty_state(Viewport::default(), "Peta tidak dapat ditampilkan");

        assert!(svg.contains("Peta tidak dapat ditampilkan"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_surface_updates_marker_in_place() {
        let mut surface = SvgSurface::new(Viewport::default()).unwrap();
        let m = marker("A", -6.2, 106.8, MarkerStyle::Default);
        let id = m.site_id;
        surface.add_marker(m);

        surface.move_marker(id, Coordinate::new(-7.0, 110.0));
        surface.relabel_marker(id, "B");
        surface.set_marker_style(id, MarkerStyle::Selected);

        let updated = &surface.markers()[0];
        assert_eq!(updated.position, Coordinate::new(-7.0, 110.0));
        assert_eq!(updated.label, "B");
        assert_eq!(updated.style, MarkerStyle::Selected);
    }
}
