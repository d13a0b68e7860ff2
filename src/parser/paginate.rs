//! Fixed-height pagination.
//!
//! There is no real line breaking: each span is assumed to wrap every
//! `chars_per_line` characters, and every line advances the page by
//! `line_height`.

use crate::model::{Page, Paragraph, Span, PAGE_HEIGHT, PAGE_MARGIN, PAGE_WIDTH};

/// Page geometry and the line heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    /// Page width in points
    pub width: f64,
    /// Page height in points
    pub height: f64,
    /// Vertical margin in points
    pub margin: f64,
    /// Height of one estimated line
    pub line_height: f64,
    /// Characters assumed to fit on one line
    pub chars_per_line: usize,
}

impl PageLayout {
    /// Height available for content.
    pub fn usable_height(&self) -> f64 {
        self.height - self.margin
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            margin: PAGE_MARGIN,
            line_height: 18.0,
            chars_per_line: 100,
        }
    }
}

/// Groups spans into pages.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    layout: PageLayout,
}

impl Paginator {
    pub fn new(layout: PageLayout) -> Self {
        Self { layout }
    }

    /// Vertical space a span is estimated to take.
    pub fn advance(&self, span: &Span) -> f64 {
        let lines = span.char_len().div_ceil(self.layout.chars_per_line.max(1));
        self.layout.line_height * lines as f64
    }

    /// Place every span, in paragraph order, onto pages.
    ///
    /// The span that pushes the running height past the usable height opens
    /// the next page and goes there whole. Always yields at least one page.
    pub fn paginate(&self, paragraphs: &[Paragraph]) -> Vec<Page> {
        let limit = self.layout.usable_height();
        let mut pages = Vec::new();
        let mut page = self.new_page(1);
        let mut y = 0.0f64;

        for span in paragraphs.iter().flat_map(|p| p.spans()) {
            y += self.advance(span);
            if y > limit {
                let number = page.number + 1;
                pages.push(std::mem::replace(&mut page, self.new_page(number)));
                page.add_span(span.clone());
                y = 0.0;
            } else {
                page.add_span(span.clone());
            }
        }

        pages.push(page);
        log::debug!("paginated {} paragraphs into {} pages", paragraphs.len(), pages.len());
        pages
    }

    fn new_page(&self, number: u32) -> Page {
        Page::new(
            number,
            self.layout.width,
            self.layout.height,
            self.layout.margin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph_of(lengths: &[usize]) -> Paragraph {
        let mut p = Paragraph::new();
        for &len in lengths {
            p.add_span(Span::new("x".repeat(len)));
        }
        p
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let pages = Paginator::default().paginate(&[]);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
        assert_eq!(pages[0].number, 1);
    }

    #[test]
    fn test_advance_rounds_up_lines() {
        let paginator = Paginator::default();
        assert_eq!(paginator.advance(&Span::new("")), 0.0);
        assert_eq!(paginator.advance(&Span::new("a")), 18.0);
        assert_eq!(paginator.advance(&Span::new("a".repeat(100))), 18.0);
        assert_eq!(paginator.advance(&Span::new("a".repeat(101))), 36.0);
    }

    #[test]
    fn test_advance_counts_characters_not_bytes() {
        let paginator = Paginator::default();
        // 100 Hangul syllables are 300 bytes but one line
        assert_eq!(paginator.advance(&Span::new("가".repeat(100))), 18.0);
    }

    #[test]
    fn test_oversized_span_moves_to_next_page() {
        let pages = Paginator::default().paginate(&[paragraph_of(&[5000])]);
        assert_eq!(pages.len(), 2);
        assert!(pages[0].is_empty());
        assert_eq!(pages[1].elements.len(), 1);
        assert_eq!(pages[1].elements[0].char_len(), 5000);
    }

    #[test]
    fn test_boundary_is_strictly_greater() {
        // 42 single-line spans reach exactly 756, the 43rd hits 774
        let lengths = vec![1; 43];
        let pages = Paginator::default().paginate(&[paragraph_of(&lengths)]);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].elements.len(), 42);
        assert_eq!(pages[1].elements.len(), 1);

        let layout = PageLayout {
            height: 100.0,
            margin: 10.0,
            line_height: 30.0,
            chars_per_line: 1,
            ..PageLayout::default()
        };
        // 30 + 30 + 30 reaches the usable height exactly and stays
        let pages = Paginator::new(layout).paginate(&[paragraph_of(&[1, 1, 1])]);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].elements.len(), 3);
    }

    #[test]
    fn test_new_page_restarts_at_zero() {
        // 720, then 1440 overflows; y restarts at 0 after the moved span
        let pages = Paginator::default().paginate(&[paragraph_of(&[4000, 4000, 100])]);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].elements.len(), 1);
        assert_eq!(pages[1].elements.len(), 2);
        assert_eq!(pages[1].number, 2);
    }

    #[test]
    fn test_fractional_line_heights_accumulate_exactly() {
        // ten 0.1 lines sum to 0.9999999999999999 and fit a 1.0 page
        let layout = PageLayout {
            height: 1.0,
            margin: 0.0,
            line_height: 0.1,
            chars_per_line: 1,
            ..PageLayout::default()
        };
        let pages = Paginator::new(layout).paginate(&[paragraph_of(&[1; 10])]);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].elements.len(), 10);
    }

    #[test]
    fn test_custom_layout() {
        let layout = PageLayout {
            height: 100.0,
            margin: 0.0,
            line_height: 50.0,
            chars_per_line: 10,
            ..PageLayout::default()
        };
        let pages = Paginator::new(layout).paginate(&[paragraph_of(&[10, 10, 10])]);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].height, 100.0);
    }
}
