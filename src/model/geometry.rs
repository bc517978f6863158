//! Word geometry.

use serde::{Deserialize, Serialize};

/// Location of a recognized region, in coordinates relative to the page
/// size (0.0 is the left/top edge, 1.0 the right/bottom edge).
///
/// Serialized as bare nested arrays so the exported file carries exactly
/// what the engine reported: `[[xmin, ymin], [xmax, ymax]]` for boxes and
/// `[[x, y], ...]` for polygons.
///
/// Two points always mean a box: a two-point `Polygon` is read back as a
/// `Box`. Build polygons with [`Geometry::polygon`], which applies the same
/// rule up front so a document survives an export round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Geometry {
    /// Axis-aligned box as top-left and bottom-right corners
    Box([[f64; 2]; 2]),

    /// Arbitrary polygon of three or more points, typically a rotated
    /// quadrilateral
    Polygon(Vec<[f64; 2]>),
}

impl Geometry {
    /// Create an axis-aligned box.
    pub fn from_box(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Geometry::Box([[xmin, ymin], [xmax, ymax]])
    }

    /// Create a polygon from its points. Two points are taken as the
    /// opposite corners of a box.
    pub fn polygon(points: Vec<[f64; 2]>) -> Self {
        match points.as_slice() {
            [a, b] => Geometry::Box([*a, *b]),
            _ => Geometry::Polygon(points),
        }
    }

    /// Create an axis-aligned box from a pixel rectangle on a page of the
    /// given size.
    pub fn from_pixels(left: u32, top: u32, width: u32, height: u32, page: (u32, u32)) -> Self {
        let (page_w, page_h) = (page.0.max(1) as f64, page.1.max(1) as f64);
        Self::from_box(
            left as f64 / page_w,
            top as f64 / page_h,
            (left + width) as f64 / page_w,
            (top + height) as f64 / page_h,
        )
    }

    /// Bounding box as (xmin, ymin, xmax, ymax).
    ///
    /// An empty polygon has no extent and yields all zeros.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            Geometry::Box([[x0, y0], [x1, y1]]) => (x0.min(*x1), y0.min(*y1), x0.max(*x1), y0.max(*y1)),
            Geometry::Polygon(points) if points.is_empty() => (0.0, 0.0, 0.0, 0.0),
            Geometry::Polygon(points) => points.iter().fold(
                (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
                |(x0, y0, x1, y1), [x, y]| (x0.min(*x), y0.min(*y), x1.max(*x), y1.max(*y)),
            ),
        }
    }

    /// Corner points in drawing order.
    pub fn points(&self) -> Vec<[f64; 2]> {
        match self {
            Geometry::Box([[x0, y0], [x1, y1]]) => {
                vec![[*x0, *y0], [*x1, *y0], [*x1, *y1], [*x0, *y1]]
            }
            Geometry::Polygon(points) => points.clone(),
        }
    }

    /// Smallest axis-aligned box enclosing all of the given geometries.
    pub fn enclosing<'a>(geometries: impl IntoIterator<Item = &'a Geometry>) -> Option<Geometry> {
        geometries
            .into_iter()
            .map(Geometry::bounds)
            .reduce(|(a0, b0, a1, b1), (c0, d0, c1, d1)| {
                (a0.min(c0), b0.min(d0), a1.max(c1), b1.max(d1))
            })
            .map(|(x0, y0, x1, y1)| Geometry::from_box(x0, y0, x1, y1))
    }
}
