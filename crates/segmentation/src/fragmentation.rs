use memsim_error::errconfig;

use crate::Result;

/// Returns the bytes wasted in the last frame allocated to a process of `process_size` bytes.
///
/// A process that exactly fills its frames reports a full `frame_size` of waste, not zero.
pub fn internal_fragmentation(frame_size: usize, process_size: usize) -> Result<usize> {
    if frame_size == 0 {
        return errconfig!("frame size must be positive");
    }
    Ok(frame_size - process_size % frame_size)
}

/// Returns the number of frames needed to hold `process_size` bytes. Every process gets at
/// least one frame.
pub fn frames_required(frame_size: usize, process_size: usize) -> Result<usize> {
    if frame_size == 0 {
        return errconfig!("frame size must be positive");
    }
    Ok(process_size.div_ceil(frame_size).max(1))
}
