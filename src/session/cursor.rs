//! Cyclic cursor over the training stream.

use crate::domain::Record;
use crate::session::split::TrainingStream;

/// Position into a [`TrainingStream`], replayed as an infinite cyclic
/// sequence: advancing past the last record wraps back to the first.
///
/// Starts at 0 and is reset simply by constructing a new cursor whenever a
/// new dataset is loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordCursor {
    position: usize,
}

impl RecordCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The record the cursor points at. Side-effect free; `None` only for an
    /// empty stream.
    pub fn current<'a>(&self, stream: &'a TrainingStream) -> Option<&'a Record> {
        stream.get(self.position)
    }

    /// Move to the next record, wrapping to 0 at the end of the stream.
    ///
    /// The wrap is the sole boundary policy: no bounds failure is ever
    /// raised for a non-empty stream. On an empty stream this is a no-op.
    pub fn advance(&mut self, stream: &TrainingStream) {
        self.position += 1;
        if self.position >= stream.len() {
            self.position = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::split::split;
    use crate::session::test_support::dataset_of;

    #[test]
    fn advancing_stream_length_times_cycles_back() {
        let stream = split(dataset_of(10)); // 8 in play
        let mut cursor = RecordCursor::new();
        let first_income = cursor.current(&stream).unwrap().income().unwrap();

        for _ in 0..stream.len() {
            cursor.advance(&stream);
        }

        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.current(&stream).unwrap().income().unwrap(), first_income);
    }

    #[test]
    fn stays_put_on_an_empty_stream() {
        let stream = split(dataset_of(0));
        let mut cursor = RecordCursor::new();
        assert!(cursor.current(&stream).is_none());
        cursor.advance(&stream);
        assert_eq!(cursor.position(), 0);
        assert!(cursor.current(&stream).is_none());
    }

    #[test]
    fn single_record_stream_always_shows_that_record() {
        let stream = split(dataset_of(2)); // 1 in play
        let mut cursor = RecordCursor::new();
        for _ in 0..3 {
            assert!(cursor.current(&stream).is_some());
            cursor.advance(&stream);
            assert_eq!(cursor.position(), 0);
        }
    }
}
