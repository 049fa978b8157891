pub mod line_processor;
pub mod warn_writer;

pub use line_processor::LineProcessor;
pub use warn_writer::WarnWriter;
