use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::ppg::error::PpgError;
use crate::ppg::TraceFrame;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub trace: RGBColor,
    pub threshold: RGBColor,
    /// Draw caption, axis labels and legend. Needs a system font.
    pub labels: bool,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 300,
            background: RGBColor(0, 0, 0),
            trace: RGBColor(5, 150, 105),
            threshold: RGBColor(59, 130, 246),
            labels: false,
        }
    }
}
/// Render the detrended window with the peak threshold as a PNG.
pub fn render_trace_png(trace: &TraceFrame, style: PlotStyle) -> Result<Vec<u8>, PpgError> {
    if trace.detrended.is_empty() {
        return Err(PpgError::Plot("trace has no samples".into()));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let y_min = trace
            .detrended
            .iter()
            .copied()
            .fold(-trace.peak_threshold, f32::min);
        let y_max = trace
            .detrended
            .iter()
            .copied()
            .fold(trace.peak_threshold, f32::max);
        let y_bounds = if (y_max - y_min).abs() < f32::EPSILON {
            (-1.0, 1.0)
        } else {
            (y_min, y_max)
        };
        let seconds = trace.duration_seconds().max(1.0 / trace.frame_rate);
        let mut builder = ChartBuilder::on(&root);
        builder.margin(10);
        if style.labels {
            builder
                .caption("PPG (detrended)", ("sans-serif", 20).into_font().color(&WHITE))
                .set_label_area_size(LabelAreaPosition::Left, 45)
                .set_label_area_size(LabelAreaPosition::Bottom, 40);
        }
        let mut chart = builder.build_cartesian_2d(0f32..seconds, y_bounds.0..y_bounds.1)?;
        let mut mesh = chart.configure_mesh();
        mesh.light_line_style(&WHITE.mix(0.1));
        if !style.labels {
            mesh.x_labels(0).y_labels(0);
        }
        mesh.draw()?;
        let series = trace
            .detrended
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f32 / trace.frame_rate, *v));
        let trace_color = style.trace;
        let threshold_color = style.threshold;
        let line = chart.draw_series(LineSeries::new(series, &trace_color))?;
        if style.labels {
            line.label("signal")
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &trace_color));
        }
        let threshold = chart.draw_series(LineSeries::new(
            [(0.0, trace.peak_threshold), (seconds, trace.peak_threshold)],
            &threshold_color,
        ))?;
        if style.labels {
            threshold.label("peak threshold").legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], &threshold_color)
            });
            chart
                .configure_series_labels()
                .border_style(&WHITE.mix(0.2))
                .background_style(&style.background)
                .draw()?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, PpgError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| PpgError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn empty_trace_is_an_error() {
        let trace = TraceFrame {
            frame_rate: 30.0,
            detrended: vec![],
            peak_threshold: 0.2,
        };
        assert!(matches!(
            render_trace_png(&trace, PlotStyle::default()),
            Err(PpgError::Plot(_))
        ));
    }
    #[test]
    fn flat_trace_still_renders() {
        let trace = TraceFrame {
            frame_rate: 30.0,
            detrended: vec![0.0; 90],
            peak_threshold: 0.2,
        };
        let png = render_trace_png(&trace, PlotStyle::default()).unwrap();
        assert!(!png.is_empty());
    }
}
