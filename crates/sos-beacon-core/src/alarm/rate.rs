use crate::{CoreError, CoreResult};

use std::panic::Location;

use audioadapter_buffers::direct::InterleavedSlice;
use error_location::ErrorLocation;
use rubato::{Fft, FixedSync, Resampler};
use tracing::{debug, instrument};

const CHUNK_SIZE: usize = 1024;

/// One-shot sample-rate conversion of a mono buffer.
///
/// Used to bring the alarm asset to the output device rate before
/// playback. The input is padded to whole chunks; the output is
/// truncated back to the proportional length.
#[track_caller]
#[instrument(skip(samples))]
pub(crate) fn convert_rate(
    samples: &[f32],
    input_rate: u32,
    output_rate: u32,
) -> CoreResult<Vec<f32>> {
    if samples.is_empty() || input_rate == output_rate {
        return Ok(samples.to_vec());
    }

    let mut resampler = Fft::<f32>::new(
        input_rate as usize,
        output_rate as usize,
        CHUNK_SIZE,
        2, // sub_chunks
        1, // mono
        FixedSync::Input,
    )
    .map_err(|e| CoreError::ResamplingError {
        reason: format!("Failed to create resampler: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let estimated_len = (samples.len() as f64 * output_rate as f64 / input_rate as f64) as usize;
    let mut output = Vec::with_capacity(estimated_len);

    for chunk in samples.chunks(CHUNK_SIZE) {
        let input_chunk = if chunk.len() < CHUNK_SIZE {
            let mut padded = chunk.to_vec();
            padded.resize(CHUNK_SIZE, 0.0);
            padded
        } else {
            chunk.to_vec()
        };

        let input_adapter = InterleavedSlice::new(&input_chunk, 1, CHUNK_SIZE).map_err(|e| {
            CoreError::ResamplingError {
                reason: format!("Failed to create input adapter: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let output_frames = resampler.output_frames_max();
        let mut output_chunk = vec![0.0f32; output_frames];

        let mut output_adapter = InterleavedSlice::new_mut(&mut output_chunk, 1, output_frames)
            .map_err(|e| CoreError::ResamplingError {
                reason: format!("Failed to create output adapter: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let (_input_frames, output_frames_written) = resampler
            .process_into_buffer(&input_adapter, &mut output_adapter, None)
            .map_err(|e| CoreError::ResamplingError {
                reason: format!("Resampling failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        output.extend_from_slice(&output_chunk[..output_frames_written]);
    }

    output.truncate(estimated_len);

    debug!(
        input_len = samples.len(),
        output_len = output.len(),
        input_rate = input_rate,
        output_rate = output_rate,
        "Alarm asset resampled"
    );

    Ok(output)
}
