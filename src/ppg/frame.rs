use crate::ppg::PpgError;
const BYTES_PER_PIXEL: usize = 4;
/// Mean green intensity of an RGBA8 frame; this is the per-frame PPG sample.
pub fn green_channel_mean(rgba: &[u8]) -> Result<f32, PpgError> {
    if rgba.is_empty() {
        return Err(PpgError::InvalidFrame("frame has no pixels".into()));
    }
    if rgba.len() % BYTES_PER_PIXEL != 0 {
        return Err(PpgError::InvalidFrame(format!(
            "{} bytes is not a whole number of RGBA pixels",
            rgba.len()
        )));
    }
    let pixels = rgba.len() / BYTES_PER_PIXEL;
    let green_sum: u64 = rgba
        .chunks_exact(BYTES_PER_PIXEL)
        .map(|px| px[1] as u64)
        .sum();
    Ok((green_sum as f64 / pixels as f64) as f32)
}
