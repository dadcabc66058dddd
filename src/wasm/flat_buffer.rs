//! Flat buffer protocol for the zero-copy WASM bridge
//!
//! Binary format for justified lines:
//!
//! ## u32 Buffer Layout:
//! ```text
//! Header:
//! [0]     MAGIC (0x4D4A5354 = "MJST" for validation)
//! [1]     SCHEMA_VERSION (protocol version, currently 1)
//! [2]     line_count
//! [3]     item_count (all lines)
//! [4]     text_buffer_len
//! [5..]   line data...
//!
//! Per-line:
//!   item_count
//!   per-item: [kind, flags, text_offset, text_len, text_utf16_offset, text_utf16_len]
//!     kind: ITEM_BOX or ITEM_GLUE
//!     flags: bit0=is_hyphen
//!     text_offset/text_len: byte offsets in text_data (UTF-8), 0/0 for glue
//!     text_utf16_offset/text_utf16_len: offsets for JS substring (after single decode)
//! ```
//!
//! ## f64 Buffer Layout:
//! ```text
//! Per-line: [ratio, width]
//! Per-item: [x, width]
//! ```
//! `ratio` is `Infinity` for a line with nothing to stretch.

use crate::render::{DisplayItem, Line};

/// Magic number for format validation: "MJST" (Mini JuSTify)
pub const MAGIC: u32 = 0x4D4A5354;

/// Schema version for protocol compatibility checking
pub const SCHEMA_VERSION: u32 = 1;

/// Header size in u32 elements
pub const HEADER_SIZE: usize = 5;

/// Opcodes for item kinds
pub const ITEM_BOX: u32 = 0;
pub const ITEM_GLUE: u32 = 1;

/// Flags bitmask
pub const FLAG_IS_HYPHEN: u32 = 0b0001;

/// Number of u32 values per line header
pub const U32_PER_LINE: usize = 1;

/// Number of u32 values per item
/// [kind, flags, text_offset, text_len, text_utf16_offset, text_utf16_len]
pub const U32_PER_ITEM: usize = 6;

/// Number of f64 values per line: ratio, width
pub const F64_PER_LINE: usize = 2;

/// Number of f64 values per item: x, width
pub const F64_PER_ITEM: usize = 2;

/// Line buffer for zero-copy WASM transfer
pub struct LineBuffer {
    /// Integer data (counts, offsets, opcodes)
    pub u32_data: Vec<u32>,
    /// Float data (ratios, positions, widths)
    pub f64_data: Vec<f64>,
    /// UTF-8 text buffer
    pub text_data: Vec<u8>,

    line_count: u32,
    item_count: u32,

    // Track cumulative UTF-16 offset for efficient JS decoding
    utf16_text_offset: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            u32_data: Vec::with_capacity(256),
            f64_data: Vec::with_capacity(256),
            text_data: Vec::with_capacity(1024),
            line_count: 0,
            item_count: 0,
            utf16_text_offset: 0,
        }
    }

    pub fn clear(&mut self) {
        self.u32_data.clear();
        self.f64_data.clear();
        self.text_data.clear();
        self.line_count = 0;
        self.item_count = 0;
        self.utf16_text_offset = 0;
    }

    /// Pre-allocate buffers so JS-held pointers stay valid while writing.
    pub fn prepare(&mut self, lines: &[Line]) {
        let items: usize = lines.iter().map(|line| line.items.len()).sum();
        let text: usize = lines
            .iter()
            .flat_map(|line| &line.items)
            .map(|item| match item {
                DisplayItem::Box { content, .. } => content.len(),
                DisplayItem::Glue { .. } => 0,
            })
            .sum();

        self.clear();
        self.u32_data
            .reserve(HEADER_SIZE + lines.len() * U32_PER_LINE + items * U32_PER_ITEM);
        self.f64_data
            .reserve(lines.len() * F64_PER_LINE + items * F64_PER_ITEM);
        self.text_data.reserve(text);
    }

    /// Write the header; counts are filled in by `finalize`
    pub fn write_header(&mut self) {
        self.u32_data.push(MAGIC); // [0] magic number
        self.u32_data.push(SCHEMA_VERSION); // [1] schema version
        self.u32_data.push(0); // [2] line_count (placeholder)
        self.u32_data.push(0); // [3] item_count (placeholder)
        self.u32_data.push(0); // [4] text_buffer_len (placeholder)
    }

    /// Write one line and its items
    pub fn write_line(&mut self, line: &Line) {
        self.u32_data.push(line.items.len() as u32);
        self.f64_data.push(line.ratio);
        self.f64_data.push(line.width());

        for (item, x) in line.items.iter().zip(line.positions()) {
            match item {
                DisplayItem::Box { content, width, hyphen } => {
                    let flags = if *hyphen { FLAG_IS_HYPHEN } else { 0 };
                    self.write_item(ITEM_BOX, flags, content, x, *width);
                }
                DisplayItem::Glue { width } => self.write_item(ITEM_GLUE, 0, "", x, *width),
            }
        }
        self.line_count += 1;
    }

    fn write_item(&mut self, kind: u32, flags: u32, text: &str, x: f64, width: f64) {
        let text_offset = self.text_data.len() as u32;
        self.text_data.extend_from_slice(text.as_bytes());
        let text_len = text.len() as u32;

        let text_utf16_offset = self.utf16_text_offset as u32;
        let text_utf16_len = text.chars().map(char::len_utf16).sum::<usize>() as u32;
        self.utf16_text_offset += text_utf16_len as usize;

        self.u32_data.push(kind);
        self.u32_data.push(flags);
        self.u32_data.push(text_offset);
        self.u32_data.push(text_len);
        self.u32_data.push(text_utf16_offset);
        self.u32_data.push(text_utf16_len);

        self.f64_data.push(x);
        self.f64_data.push(width);
        self.item_count += 1;
    }

    /// Synchronize header counts with what was written
    pub fn finalize(&mut self) {
        if self.u32_data.len() < HEADER_SIZE {
            return;
        }
        self.u32_data[2] = self.line_count;
        self.u32_data[3] = self.item_count;
        self.u32_data[4] = self.text_data.len() as u32;
    }

    /// Clear, then write `lines` as one complete buffer
    pub fn write_lines(&mut self, lines: &[Line]) {
        self.prepare(lines);
        self.write_header();
        for line in lines {
            self.write_line(line);
        }
        self.finalize();
    }

    pub fn line_count(&self) -> u32 {
        self.line_count
    }

    // Accessors for WASM
    // Return u32 instead of usize for explicit WASM contract (wasm32 linear memory uses u32 offsets)

    pub fn u32_ptr(&self) -> u32 {
        self.u32_data.as_ptr() as u32
    }

    pub fn u32_len(&self) -> u32 {
        self.u32_data.len() as u32
    }

    pub fn f64_ptr(&self) -> u32 {
        self.f64_data.as_ptr() as u32
    }

    pub fn f64_len(&self) -> u32 {
        self.f64_data.len() as u32
    }

    pub fn text_ptr(&self) -> u32 {
        self.text_data.as_ptr() as u32
    }

    pub fn text_len(&self) -> u32 {
        self.text_data.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(content: &str, width: f64) -> DisplayItem {
        DisplayItem::Box {
            content: content.to_string(),
            width,
            hyphen: false,
        }
    }

    fn sample_lines() -> Vec<Line> {
        vec![
            Line {
                items: vec![
                    word("the", 30.0),
                    DisplayItem::Glue { width: 13.0 },
                    word("hyphen", 60.0),
                    DisplayItem::Box {
                        content: "-".to_string(),
                        width: 10.0,
                        hyphen: true,
                    },
                ],
                ratio: 0.6,
            },
            Line {
                items: vec![word("ation", 50.0)],
                ratio: f64::INFINITY,
            },
        ]
    }

    #[test]
    fn test_line_buffer_header() {
        let mut buf = LineBuffer::new();
        buf.write_lines(&sample_lines());

        assert_eq!(buf.u32_data[0], MAGIC);
        assert_eq!(buf.u32_data[1], SCHEMA_VERSION);
        assert_eq!(buf.u32_data[2], 2); // line_count
        assert_eq!(buf.u32_data[3], 5); // item_count
        assert_eq!(buf.u32_data[4], buf.text_data.len() as u32);
        assert_eq!(buf.text_data, b"thehyphen-ation");
    }

    #[test]
    fn test_line_buffer_layout() {
        let mut buf = LineBuffer::new();
        buf.write_lines(&sample_lines());

        let mut idx = HEADER_SIZE;
        assert_eq!(buf.u32_data[idx], 4); // first line item_count
        idx += U32_PER_LINE;

        // "the"
        assert_eq!(&buf.u32_data[idx..idx + U32_PER_ITEM], &[ITEM_BOX, 0, 0, 3, 0, 3]);
        idx += U32_PER_ITEM;
        // glue has no text
        assert_eq!(&buf.u32_data[idx..idx + U32_PER_ITEM], &[ITEM_GLUE, 0, 3, 0, 3, 0]);
        idx += U32_PER_ITEM * 2;
        // hyphen
        assert_eq!(&buf.u32_data[idx..idx + 2], &[ITEM_BOX, FLAG_IS_HYPHEN]);
        idx += U32_PER_ITEM;

        assert_eq!(buf.u32_data[idx], 1); // second line item_count
        assert_eq!(buf.u32_data.len(), idx + U32_PER_LINE + U32_PER_ITEM);

        // f64: line ratio and width, then x/width per item
        assert_eq!(&buf.f64_data[..4], &[0.6, 113.0, 0.0, 30.0]);
        assert_eq!(&buf.f64_data[4..6], &[30.0, 13.0]);
        assert_eq!(&buf.f64_data[8..10], &[103.0, 10.0]);
        assert_eq!(buf.f64_data[10], f64::INFINITY);
        assert_eq!(
            buf.f64_data.len(),
            2 * F64_PER_LINE + 5 * F64_PER_ITEM
        );
    }

    #[test]
    fn test_utf16_offsets() {
        let lines = vec![Line {
            items: vec![word("été", 30.0), DisplayItem::Glue { width: 5.0 }, word("𝔘n", 20.0)],
            ratio: 0.0,
        }];
        let mut buf = LineBuffer::new();
        buf.write_lines(&lines);

        let first = HEADER_SIZE + U32_PER_LINE;
        let third = first + 2 * U32_PER_ITEM;
        // "été" is 5 bytes but 3 UTF-16 units
        assert_eq!(&buf.u32_data[first + 2..first + 6], &[0, 5, 0, 3]);
        // "𝔘n" is a surrogate pair plus one unit
        assert_eq!(&buf.u32_data[third + 2..third + 6], &[5, 5, 3, 3]);
    }

    #[test]
    fn test_rewrite_clears_previous_lines() {
        let mut buf = LineBuffer::new();
        buf.write_lines(&sample_lines());
        buf.write_lines(&[]);

        assert_eq!(buf.u32_len() as usize, HEADER_SIZE);
        assert_eq!(buf.u32_data[2], 0);
        assert!(buf.f64_data.is_empty());
        assert_eq!(buf.text_len(), 0);
        assert_eq!(buf.line_count(), 0);
    }

    #[test]
    fn test_prepare_prevents_reallocation() {
        let lines = sample_lines();
        let mut buf = LineBuffer::new();
        buf.prepare(&lines);

        let u32_capacity = buf.u32_data.capacity();
        let f64_capacity = buf.f64_data.capacity();
        let text_capacity = buf.text_data.capacity();

        buf.write_header();
        for line in &lines {
            buf.write_line(line);
        }
        buf.finalize();

        assert_eq!(buf.u32_data.capacity(), u32_capacity, "u32_data was reallocated");
        assert_eq!(buf.f64_data.capacity(), f64_capacity, "f64_data was reallocated");
        assert_eq!(buf.text_data.capacity(), text_capacity, "text_data was reallocated");
    }
}
