//! Animated GIF export for rendered frame sequences

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::output::OutputError;

/// Encode a sequence of frames as an animated GIF.
///
/// `frame_duration_ms` applies to every frame; GIF delays have 10ms
/// granularity, so durations are clamped to at least 10ms. An empty frame
/// sequence writes nothing and succeeds.
pub fn render_gif(
    frames: &[RgbaImage],
    frame_duration_ms: u32,
    looped: bool,
    path: &Path,
) -> Result<(), OutputError> {
    if frames.is_empty() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = GifEncoder::new(writer);
    encoder.set_repeat(if looped { Repeat::Infinite } else { Repeat::Finite(0) })?;

    let delay = Delay::from_numer_denom_ms(frame_duration_ms.max(10), 1);
    for image in frames {
        let frame = Frame::from_parts(image.clone(), 0, 0, delay);
        encoder.encode_frame(frame)?;
    }

    Ok(())
}
