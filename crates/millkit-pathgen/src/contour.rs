//! Waterline contour accumulation.
//!
//! Collects the scan-line points of a sweep into polylines. The push cutter
//! feeds one scan-line per free-interval result, bracketed by
//! [`ContourBuilder::new_scanline`] / [`ContourBuilder::end_scanline`], and
//! closes each sweep direction before finalizing the layer. Scan-lines that
//! start where the previous one ended are joined into a single polyline.

use millkit_core::Point3D;

/// An ordered run of contour points.
///
/// A closed contour repeats its first point as the last one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    /// Contour points in traversal order
    pub points: Vec<Point3D>,
}

impl Polyline {
    /// Number of points in the polyline
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polyline holds no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Accumulates scan-line points into contour polylines.
///
/// State machine per sweep direction: `new_direction` opens a direction,
/// each scan-line is bracketed by `new_scanline` / `end_scanline`, and
/// `end_direction` closes it. `finish` flushes the in-progress polyline and
/// may be called once per layer; accumulation continues afterwards.
#[derive(Debug, Default)]
pub struct ContourBuilder {
    scanline: Vec<Point3D>,
    current: Vec<Point3D>,
    paths: Vec<Polyline>,
}

impl ContourBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a sweep direction.
    ///
    /// `_index` identifies the direction for processors that distinguish
    /// them; a push sweep uses a single direction 0.
    pub fn new_direction(&mut self, _index: usize) {
        self.flush_current();
    }

    /// Begin a scan-line.
    pub fn new_scanline(&mut self) {
        self.scanline.clear();
    }

    /// Append one point to the open scan-line.
    pub fn append(&mut self, point: Point3D) {
        self.scanline.push(point);
    }

    /// Close the open scan-line and merge it into the current polyline.
    pub fn end_scanline(&mut self) {
        if self.scanline.is_empty() {
            return;
        }
        let connects = matches!(
            (self.current.last(), self.scanline.first()),
            (Some(last), Some(first)) if last == first
        );
        if connects {
            self.current.extend(self.scanline.drain(1..));
            self.scanline.clear();
        } else {
            self.flush_current();
            self.current = std::mem::take(&mut self.scanline);
        }
    }

    /// Close the open sweep direction.
    pub fn end_direction(&mut self) {
        self.flush_current();
    }

    /// Flush any in-progress polyline into the finished list.
    pub fn finish(&mut self) {
        self.flush_current();
    }

    /// The finished polylines, valid after [`ContourBuilder::finish`].
    pub fn paths(&self) -> &[Polyline] {
        &self.paths
    }

    fn flush_current(&mut self) {
        if !self.current.is_empty() {
            self.paths.push(Polyline {
                points: std::mem::take(&mut self.current),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point3D {
        Point3D::new(x, y, 0.0)
    }

    fn feed_scanline(builder: &mut ContourBuilder, points: &[Point3D]) {
        builder.new_scanline();
        for &point in points {
            builder.append(point);
        }
        builder.end_scanline();
    }

    #[test]
    fn test_single_scanline_becomes_one_polyline() {
        let mut builder = ContourBuilder::new();
        builder.new_direction(0);
        feed_scanline(&mut builder, &[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)]);
        builder.end_direction();
        builder.finish();

        assert_eq!(builder.paths().len(), 1);
        assert_eq!(
            builder.paths()[0].points,
            vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)]
        );
    }

    #[test]
    fn test_connecting_scanlines_join() {
        let mut builder = ContourBuilder::new();
        builder.new_direction(0);
        feed_scanline(&mut builder, &[p(0.0, 0.0), p(1.0, 0.0)]);
        feed_scanline(&mut builder, &[p(1.0, 0.0), p(1.0, 1.0)]);
        builder.end_direction();
        builder.finish();

        assert_eq!(builder.paths().len(), 1);
        assert_eq!(
            builder.paths()[0].points,
            vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)]
        );
    }

    #[test]
    fn test_disjoint_scanlines_split() {
        let mut builder = ContourBuilder::new();
        builder.new_direction(0);
        feed_scanline(&mut builder, &[p(0.0, 0.0), p(1.0, 0.0)]);
        feed_scanline(&mut builder, &[p(5.0, 5.0), p(6.0, 5.0)]);
        builder.end_direction();
        builder.finish();

        assert_eq!(builder.paths().len(), 2);
        assert_eq!(builder.paths()[0].points, vec![p(0.0, 0.0), p(1.0, 0.0)]);
        assert_eq!(builder.paths()[1].points, vec![p(5.0, 5.0), p(6.0, 5.0)]);
    }

    #[test]
    fn test_finish_per_layer_keeps_accumulating() {
        let mut builder = ContourBuilder::new();

        builder.new_direction(0);
        feed_scanline(&mut builder, &[p(0.0, 0.0), p(1.0, 0.0)]);
        builder.end_direction();
        builder.finish();

        builder.new_direction(0);
        feed_scanline(&mut builder, &[p(0.0, 1.0), p(1.0, 1.0)]);
        builder.end_direction();
        builder.finish();

        assert_eq!(builder.paths().len(), 2);
    }

    #[test]
    fn test_empty_scanline_is_ignored() {
        let mut builder = ContourBuilder::new();
        builder.new_direction(0);
        builder.new_scanline();
        builder.end_scanline();
        builder.end_direction();
        builder.finish();

        assert!(builder.paths().is_empty());
    }
}
