//! HWP parsing module.

mod cursor;
mod diagnostic;
pub mod hwp3;
pub mod hwp5;
mod hwp_parser;
mod options;
mod paginate;
mod record;
mod text;

pub use cursor::{inflate_stream, StreamCursor};
pub use diagnostic::{Diagnostic, DiagnosticSink, LogSink};
pub(crate) use diagnostic::Collector;
pub use hwp3::{Hwp3Header, Hwp3Parser};
pub use hwp5::{parse_section, Hwp5Header, Hwp5Parser};
pub use hwp_parser::HwpParser;
pub use options::{ErrorMode, ParseOptions, DEFAULT_MAX_NESTING_DEPTH};
pub use paginate::{PageLayout, Paginator};
pub use record::{encode_record, RecordReader, Tag, TagRecord};
pub use text::decode_para_text;
