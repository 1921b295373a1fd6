use std::ops::{Index, IndexMut};

/// Defines the correlation score map: an addressable two-dimensional
/// field holding one similarity score per candidate template
/// position.  Position (x, y) is the top-left corner of the window
/// the template was compared against.
#[derive(Debug)]
pub struct ScoreMap {
    pub width: u32,
    pub height: u32,
    scores: Vec<f32>,
}

impl ScoreMap {
    /// A zero-filled score map of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        ScoreMap {
            width,
            height,
            scores: vec![0.0; width as usize * height as usize],
        }
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.  This
    // particular variant is the same one used in image.rs.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// The position and value of the highest score, scanning
    /// row-major; the first occurrence wins on ties.
    pub fn peak(&self) -> (u32, u32, f32) {
        let mut best = (0, 0, f32::NEG_INFINITY);
        for y in 0..self.height {
            for x in 0..self.width {
                let score = self[(x, y)];
                if score > best.2 {
                    best = (x, y, score);
                }
            }
        }
        best
    }
}

impl Index<(u32, u32)> for ScoreMap {
    type Output = f32;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &f32 {
        let index = self.get_index(x, y);
        &self.scores[index]
    }
}

impl IndexMut<(u32, u32)> for ScoreMap {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut f32 {
        let index = self.get_index(x, y);
        &mut self.scores[index]
    }
}
