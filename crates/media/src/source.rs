//! The frame retrieval contract.

use vidinspect_common::error::InspectorResult;
use vidinspect_model::video::VideoInfo;

/// A decoded RGB frame.
pub type RawFrame = image::RgbImage;

/// A seekable, decodable video.
///
/// Implementations are used by one inspection run at a time and in frame
/// order, but must tolerate arbitrary seeks.
pub trait VideoSource {
    /// Frame count, rate, and size reported by the container.
    fn info(&self) -> &VideoInfo;

    /// Seek to `index` and decode that frame.
    ///
    /// Any failure is reported as `InspectorError::SampleFailure`.
    fn fetch_frame(&mut self, index: u64) -> InspectorResult<RawFrame>;

    /// Free decoder resources. Fetching afterwards fails.
    fn release(&mut self) {}

    /// Short name for logging.
    fn name(&self) -> &str;
}

impl<S: VideoSource + ?Sized> VideoSource for Box<S> {
    fn info(&self) -> &VideoInfo {
        (**self).info()
    }

    fn fetch_frame(&mut self, index: u64) -> InspectorResult<RawFrame> {
        (**self).fetch_frame(index)
    }

    fn release(&mut self) {
        (**self).release()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
