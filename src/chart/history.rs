use std::ops::{Index, IndexMut};

use eframe::egui::Color32;

/// Fixed-capacity store of one channel's most recent values.
///
/// The length never changes after construction; slots are overwritten in
/// place and `reset` zeroes them. The owning segment writes from the highest
/// index downward, so the newest value sits at the lowest filled index and
/// the first value written stays at the top. Indexing out of range is a
/// programmer error and panics.
pub struct SampleHistory {
    color: Color32,
    values: Vec<f64>,
}

impl SampleHistory {
    pub fn new(capacity: usize, color: Color32) -> Self {
        Self {
            color,
            values: vec![0.0; capacity],
        }
    }

    pub fn reset(&mut self) {
        self.values.fill(0.0);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn color(&self) -> Color32 {
        self.color
    }
}

impl Index<usize> for SampleHistory {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl IndexMut<usize> for SampleHistory {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.values[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_is_fixed_and_reset_zeroes_in_place() {
        let mut history = SampleHistory::new(5, Color32::RED);
        assert_eq!(history.len(), 5);
        history[0] = 1.5;
        history[4] = -2.0;
        history.reset();
        assert_eq!(history.len(), 5);
        for i in 0..5 {
            assert_eq!(history[i], 0.0);
        }
    }

    #[test]
    #[should_panic]
    fn out_of_range_access_panics() {
        let history = SampleHistory::new(3, Color32::RED);
        let _ = history[3];
    }
}
