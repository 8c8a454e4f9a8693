//! Unit tests for the TIFF codec

mod makernote_tests;
mod reader_tests;
