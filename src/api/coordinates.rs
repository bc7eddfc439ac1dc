use crate::core::{AxisOrientation, Point, Scaler};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::CartesianChart;
use super::validation::validate_point;

impl<R: Renderer> CartesianChart<R> {
    /// Scaler of one X axis over the last completed draw margin.
    pub fn x_scaler(&self, index: usize) -> ChartResult<Scaler> {
        self.scaler(AxisOrientation::X, index)
    }

    /// Scaler of one Y axis over the last completed draw margin.
    pub fn y_scaler(&self, index: usize) -> ChartResult<Scaler> {
        self.scaler(AxisOrientation::Y, index)
    }

    fn scaler(&self, orientation: AxisOrientation, index: usize) -> ChartResult<Scaler> {
        let draw = self.require_draw_margin()?;
        Scaler::for_axis(draw, self.axis(orientation, index)?)
    }

    pub fn scale_pixels_to_data(
        &self,
        point: Point,
        x_index: usize,
        y_index: usize,
    ) -> ChartResult<Point> {
        let point = validate_point("pixel point", point)?;
        let x = self.x_scaler(x_index)?;
        let y = self.y_scaler(y_index)?;
        Ok(Point::new(
            x.to_chart_values(point.x),
            y.to_chart_values(point.y),
        ))
    }

    pub fn scale_data_to_pixels(
        &self,
        point: Point,
        x_index: usize,
        y_index: usize,
    ) -> ChartResult<Point> {
        let point = validate_point("data point", point)?;
        let x = self.x_scaler(x_index)?;
        let y = self.y_scaler(y_index)?;
        Ok(Point::new(x.to_pixels(point.x), y.to_pixels(point.y)))
    }

    /// Array form of [`CartesianChart::scale_pixels_to_data`]: `[x, y]` in
    /// data units.
    pub fn scale_ui_point(
        &self,
        point: Point,
        x_index: usize,
        y_index: usize,
    ) -> ChartResult<[f64; 2]> {
        let data = self.scale_pixels_to_data(point, x_index, y_index)?;
        Ok([data.x, data.y])
    }
}
