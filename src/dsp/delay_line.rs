//! # Delay Line (Ring Buffer)
//!
//! A delay line stores audio samples and lets you read them back after a
//! specified time delay. This is the fundamental building block of all
//! delay, chorus, and flanger effects.
//!
//! ## How a Ring Buffer Works
//!
//! Imagine a circular tape loop. A "write head" records incoming audio
//! onto the tape, and a "read head" plays it back from a position further
//! behind on the tape. The distance between the two heads determines the
//! delay time.
//!
//! ## One Write Head, Two Tapes
//!
//! This plugin is stereo-linked: both channels are written at the same
//! index on every sample. So instead of each [`DelayLine`] tracking its own
//! position, a single [`WriteHead`] is shared by both, and each channel's
//! buffer is just storage addressed by that head.
//!
//! ## Staying In Bounds
//!
//! Every index is reduced modulo the buffer length before it touches the
//! buffer, so there is no bounds check to fail on the audio path:
//!
//! ```text
//! read_pos = (write_pos - delay_samples) mod len     (always in [0, len))
//! x0       = floor(read_pos) mod len
//! x1       = (x0 + 1) mod len
//! ```

use std::num::NonZeroUsize;

use nih_plug::nih_debug_assert;

use super::interp::lerp;

/// The shared write cursor for the left and right delay buffers.
///
/// Advances by exactly one slot per sample frame and wraps back to 0 at
/// the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteHead {
    position: usize,
    len: usize,
}

impl WriteHead {
    /// A head at position 0 on a ring of `len` slots.
    pub fn new(len: NonZeroUsize) -> Self {
        Self {
            position: 0,
            len: len.get(),
        }
    }

    /// The slot the next sample will be written to.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move to the next slot, wrapping at the end of the ring.
    pub fn advance(&mut self) {
        self.position = (self.position + 1) % self.len;
    }

    /// The (fractional) buffer position `delay_samples` behind the head.
    ///
    /// Negative positions are wrapped forward by the buffer length. Using
    /// `rem_euclid` instead of a single `+ len` keeps the result on the
    /// ring even for delays longer than the buffer.
    pub fn read_position(&self, delay_samples: f32) -> f32 {
        (self.position as f32 - delay_samples).rem_euclid(self.len as f32)
    }
}

/// The sample storage for one channel of the delay.
///
/// The buffer is (re)allocated only when the engine is configured for a
/// new sample rate, never while audio is being processed.
#[derive(Debug, Clone, Default)]
pub struct DelayLine {
    /// The circular buffer storing audio samples. All values start at
    /// 0.0 (silence).
    buffer: Vec<f32>,
}

impl DelayLine {
    /// An empty delay line. It must be [`resize`](Self::resize)d before use.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Reallocate to `len` samples of silence.
    ///
    /// Reuses the existing allocation when it is already large enough, so
    /// reconfiguring at the same sample rate does not touch the allocator.
    pub fn resize(&mut self, len: NonZeroUsize) {
        self.buffer.clear();
        self.buffer.resize(len.get(), 0.0);
    }

    /// Number of samples the ring holds.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Store `sample` in the slot under the write head.
    pub fn write(&mut self, head: &WriteHead, sample: f32) {
        nih_debug_assert!(
            head.len == self.buffer.len(),
            "write head ring ({}) does not match buffer ({})",
            head.len,
            self.buffer.len()
        );

        let index = head.position() % self.buffer.len();
        self.buffer[index] = sample;
    }

    /// Read the buffer at a fractional `position` using linear
    /// interpolation between `floor(position)` and the slot after it.
    ///
    /// For position 441.3:
    /// - slot 441 contributes with weight 0.7
    /// - slot 442 contributes with weight 0.3
    pub fn read_interpolated(&self, position: f32) -> f32 {
        let len = self.buffer.len();
        nih_debug_assert!(
            position >= 0.0 && position <= len as f32,
            "read position {} is outside the ring of {} samples",
            position,
            len
        );

        let whole = position as usize;
        let frac = position - whole as f32;
        let x0 = whole % len;
        let x1 = (x0 + 1) % len;

        lerp(self.buffer[x0], self.buffer[x1], frac)
    }

    /// Zero every slot without reallocating.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
    }

    /// `true` if every stored sample is exactly 0.0.
    pub fn is_silent(&self) -> bool {
        self.buffer.iter().all(|&s| s == 0.0)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(len: usize) -> (DelayLine, WriteHead) {
        let len = NonZeroUsize::new(len).unwrap();
        let mut dl = DelayLine::new();
        dl.resize(len);
        (dl, WriteHead::new(len))
    }

    /// Verify basic write-then-read at an exact sample position.
    #[test]
    fn test_write_and_read_exact() {
        let (mut dl, mut head) = ring(100);

        // Write 0.75 at position 0, then advance to position 1.
        dl.write(&head, 0.75);
        head.advance();

        // One sample behind the head is the slot we just wrote.
        let result = dl.read_interpolated(head.read_position(1.0));
        assert!((result - 0.75).abs() < 1e-6, "Expected 0.75, got {result}");
    }

    /// Verify linear interpolation between two samples.
    #[test]
    fn test_interpolation() {
        let (mut dl, mut head) = ring(100);

        dl.write(&head, 0.0);
        head.advance();
        dl.write(&head, 1.0);
        head.advance();

        // Position 0.5 sits halfway between slot 0 (0.0) and slot 1 (1.0).
        let result = dl.read_interpolated(0.5);
        assert!((result - 0.5).abs() < 1e-6, "Expected 0.5, got {result}");
    }

    /// Reading at the last slot interpolates towards slot 0.
    #[test]
    fn test_interpolation_wraps_to_start() {
        let (mut dl, mut head) = ring(4);

        for value in [1.0, 0.0, 0.0, 3.0] {
            dl.write(&head, value);
            head.advance();
        }

        let result = dl.read_interpolated(3.5);
        assert!((result - 2.0).abs() < 1e-6, "Expected 2.0, got {result}");
    }

    /// A read position that lands exactly on the buffer length (a float
    /// rounding edge) must wrap to slot 0 instead of indexing past the end.
    #[test]
    fn test_position_at_len_wraps() {
        let (mut dl, head) = ring(4);
        dl.write(&head, 0.5);

        let result = dl.read_interpolated(4.0);
        assert!((result - 0.5).abs() < 1e-6, "Expected 0.5, got {result}");
    }

    /// Verify the head wraps correctly past the buffer boundary.
    #[test]
    fn test_wrapping() {
        let (mut dl, mut head) = ring(4);

        // Write values 0 through 5 into a buffer of size 4.
        for i in 0..6 {
            dl.write(&head, i as f32);
            head.advance();
        }

        // After 6 writes: head = 6 % 4 = 2, contents [4.0, 5.0, 2.0, 3.0].
        assert_eq!(head.position(), 2);
        let result = dl.read_interpolated(head.read_position(1.0));
        assert!((result - 5.0).abs() < 1e-6, "Expected 5.0, got {result}");
    }

    /// After exactly `len` advances the head is back where it started.
    #[test]
    fn test_head_full_cycle() {
        let (_, mut head) = ring(37);

        for _ in 0..37 {
            head.advance();
        }
        assert_eq!(head.position(), 0);
    }

    /// Read positions behind the start of the ring are wrapped forward.
    #[test]
    fn test_read_position_wraps_negative() {
        let (_, mut head) = ring(100);
        head.advance();
        head.advance();

        let position = head.read_position(10.5);
        assert!(
            (position - 91.5).abs() < 1e-4,
            "Expected 91.5, got {position}"
        );

        // A delay equal to the full ring lands back on the head itself.
        let position = head.read_position(100.0);
        assert!((position - 2.0).abs() < 1e-4, "Expected 2.0, got {position}");
    }

    /// Verify that clearing resets everything to silence.
    #[test]
    fn test_clear() {
        let (mut dl, head) = ring(10);

        dl.write(&head, 0.5);
        assert!(!dl.is_silent());

        dl.clear();
        assert!(dl.is_silent());
        assert_eq!(dl.len(), 10);
    }

    /// Resizing zero-fills and changes the length.
    #[test]
    fn test_resize_zero_fills() {
        let (mut dl, head) = ring(8);
        dl.write(&head, 1.0);

        dl.resize(NonZeroUsize::new(16).unwrap());
        assert_eq!(dl.len(), 16);
        assert!(dl.is_silent());
    }

    /// A buffer initialized to silence should output silence anywhere.
    #[test]
    fn test_silence_in_silence_out() {
        let (dl, _) = ring(100);

        for position in [0.0, 10.25, 50.5, 99.9] {
            let result = dl.read_interpolated(position);
            assert!(
                result.abs() < 1e-6,
                "Expected silence at {position}, got {result}"
            );
        }
    }
}
