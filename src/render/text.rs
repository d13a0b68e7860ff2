//! Plain text rendering.

use crate::error::Result;
use crate::model::{Document, Page};

use super::options::PAGE_BREAK;
use super::{CleanupPipeline, RenderOptions};

/// Convert a document to plain text.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut output = if options.page_breaks {
        doc.pages
            .iter()
            .map(Page::plain_text)
            .collect::<Vec<_>>()
            .join(PAGE_BREAK)
    } else {
        doc.plain_text()
    };

    if options.preview_fallback && output.trim().is_empty() {
        if let Some(preview) = &doc.preview_text {
            output = preview.clone();
        }
    }

    if let Some(ref cleanup_options) = options.cleanup {
        let pipeline = CleanupPipeline::new(cleanup_options.clone())?;
        output = pipeline.process(&output);
    }

    Ok(output.trim().to_string())
}
