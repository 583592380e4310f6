use thiserror::Error;

use crate::selection::SelectionStore;
use crate::{AnalysisView, Platform};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("caption index {index} out of range for {platform} ({len} captions)")]
    IndexOutOfRange {
        platform: Platform,
        index: usize,
        len: usize,
    },
}

// Pure composition: writing to the clipboard and marking copy feedback stay
// with the caller.
pub fn compose(
    view: &AnalysisView,
    selection: &SelectionStore,
    platform: Platform,
    caption_index: usize,
) -> Result<String, ComposeError> {
    let captions = view
        .platform_block(platform)
        .map(|block| block.captions.as_slice())
        .unwrap_or(&[]);
    let entry = captions
        .get(caption_index)
        .ok_or(ComposeError::IndexOutOfRange {
            platform,
            index: caption_index,
            len: captions.len(),
        })?;

    let manual = selection.get(platform);
    let tags = if manual.is_empty() {
        entry.default_hashtags.as_slice()
    } else {
        manual
    };

    Ok(format!("{}\n\n{}", entry.text, tags.join(" ")))
}

pub fn copy_id(platform: Platform, caption_index: usize) -> String {
    format!("{}-{}", platform.label(), caption_index)
}
