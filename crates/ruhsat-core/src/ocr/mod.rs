//! Local transcription through the `pure-onnx-ocr` engine.

mod engine;

pub use engine::LocalTranscriber;

use serde::{Deserialize, Serialize};

/// Rows closer than this (in pixels) are read as one line.
const ROW_HEIGHT: f32 = 20.0;

/// A recognized text region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Axis-aligned bounds (min_x, min_y, max_x, max_y).
    pub rect: (f32, f32, f32, f32),

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    fn row(&self) -> i32 {
        (self.rect.1 / ROW_HEIGHT) as i32
    }
}

/// Sort boxes top-to-bottom, left-to-right and join them into text.
///
/// Boxes sharing a row are joined with a space, rows with a newline, so the
/// labeled lines of the document survive as lines.
pub fn reading_order_text(mut boxes: Vec<TextBox>) -> String {
    boxes.sort_by(|a, b| {
        a.row().cmp(&b.row()).then_with(|| {
            a.rect
                .0
                .partial_cmp(&b.rect.0)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    let mut lines: Vec<String> = Vec::new();
    let mut current_row = None;

    for text_box in boxes {
        let text = text_box.text.trim();
        if text.is_empty() {
            continue;
        }

        match (current_row, lines.last_mut()) {
            (Some(row), Some(line)) if row == text_box.row() => {
                line.push(' ');
                line.push_str(text);
            }
            _ => {
                lines.push(text.to_string());
                current_row = Some(text_box.row());
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_box(x: f32, y: f32, text: &str) -> TextBox {
        TextBox {
            rect: (x, y, x + 50.0, y + 15.0),
            text: text.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_reading_order() {
        let boxes = vec![
            text_box(200.0, 42.0, "06 BK 4521"),
            text_box(10.0, 5.0, "BELGE"),
            text_box(10.0, 41.0, "PLAKA:"),
            text_box(80.0, 6.0, "SERİ: HT"),
        ];

        assert_eq!(reading_order_text(boxes), "BELGE SERİ: HT\nPLAKA: 06 BK 4521");
    }

    #[test]
    fn test_blank_boxes_skipped() {
        let boxes = vec![text_box(0.0, 0.0, "  "), text_box(0.0, 30.0, "ADI: AHMET")];
        assert_eq!(reading_order_text(boxes), "ADI: AHMET");
    }
}
