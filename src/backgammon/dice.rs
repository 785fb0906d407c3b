use std::fmt::{Debug, Display};

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::trace;

/// Anything that can produce a single die face in `1..=6`.
pub trait DieSource {
    fn roll_die(&mut self) -> u8;
}

/// Uniform die faces drawn from a [`rand`] generator.
#[derive(Debug, Clone)]
pub struct RandomDie<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomDie<R> {
    pub fn new(rng: R) -> Self {
        RandomDie { rng }
    }
}

impl RandomDie<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        RandomDie { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        RandomDie { rng: StdRng::from_os_rng() }
    }
}

impl<R: Rng> DieSource for RandomDie<R> {
    fn roll_die(&mut self) -> u8 {
        self.rng.random_range(1..=6)
    }
}

/// Replays a fixed sequence of faces, wrapping around at the end.
/// Used to force specific rolls.
#[derive(Debug, Clone)]
pub struct ScriptedDie {
    faces: Vec<u8>,
    next: usize,
}

impl ScriptedDie {
    pub fn new(faces: impl Into<Vec<u8>>) -> Self {
        let faces = faces.into();
        assert!(!faces.is_empty(), "scripted die needs at least one face");
        assert!(faces.iter().all(|f| (1..=6).contains(f)), "die faces must be within 1..=6");
        ScriptedDie { faces, next: 0 }
    }
}

impl DieSource for ScriptedDie {
    fn roll_die(&mut self) -> u8 {
        let face = self.faces[self.next];
        self.next = (self.next + 1) % self.faces.len();
        face
    }
}

/// The move values still available to the active player this turn.
///
/// A plain roll yields two values, a double yields four copies of the
/// same value. Each played checker consumes exactly one value.
#[derive(Clone)]
pub struct Dice<S = RandomDie> {
    values: Vec<u8>,
    source: S,
}

impl<S: DieSource> Dice<S> {
    pub fn new(source: S) -> Self {
        Dice { values: Vec::with_capacity(4), source }
    }

    /// Throws both dice and replaces the available values with the result.
    pub fn roll(&mut self) -> &[u8] {
        let die1 = self.source.roll_die();
        let die2 = self.source.roll_die();
        self.values.clear();
        if die1 == die2 {
            self.values.extend([die1; 4]);
        } else {
            self.values.extend([die1, die2]);
        }
        trace!(die1, die2, "rolled");
        &self.values
    }
}

impl<S> Dice<S> {
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn contains(&self, value: u8) -> bool {
        self.values.contains(&value)
    }

    /// How many times `value` can still be played.
    pub fn count(&self, value: u8) -> usize {
        self.values.iter().filter(|&&v| v == value).count()
    }

    /// Removes a single occurrence of `value`. Returns false if it was not available.
    pub fn consume(&mut self, value: u8) -> bool {
        match self.values.iter().position(|&v| v == value) {
            Some(index) => {
                self.values.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Distinct remaining values in ascending order.
    pub fn unique_values(&self) -> Vec<u8> {
        let mut unique = self.values.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Puts previously saved values back, e.g. when restoring a game.
    pub(crate) fn set_values(&mut self, values: &[u8]) {
        self.values.clear();
        self.values.extend_from_slice(values);
    }
}

impl<S> Display for Dice<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.values.is_empty() {
            return write!(f, "-");
        }
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

impl<S> Debug for Dice<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Dice({:?})", self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dice() {
        for i in 1..=6 {
            for j in 1..=6 {
                let mut dice = Dice::new(ScriptedDie::new([i, j]));
                let rolled = dice.roll().to_vec();
                if i == j {
                    assert_eq!(rolled, vec![i; 4]);
                    let mut count = 0;
                    while dice.consume(i) {
                        count += 1;
                    }
                    assert_eq!(count, 4);
                } else {
                    assert_eq!(rolled, vec![i, j]);
                    assert!(dice.consume(j));
                    assert_eq!(dice.values(), &[i]);
                    assert!(!dice.consume(j));
                    assert!(dice.consume(i));
                }
                assert!(dice.is_empty());
            }
        }
    }

    #[test]
    fn test_consume_removes_one_occurrence() {
        let mut dice = Dice::new(ScriptedDie::new([3]));
        dice.roll();
        assert!(dice.consume(3));
        assert_eq!(dice.values(), &[3, 3, 3]);
        assert!(!dice.consume(5));
        assert_eq!(dice.count(3), 3);
    }

    #[test]
    fn test_reset_clears_values() {
        let mut dice = Dice::new(ScriptedDie::new([2, 5]));
        dice.roll();
        assert!(!dice.is_empty());
        dice.reset();
        assert!(dice.is_empty());
        assert_eq!(dice.to_string(), "-");
    }

    #[test]
    fn test_dice_roll() {
        let mut dice = Dice::new(RandomDie::seeded(7));
        for _ in 1..=100 {
            let values = dice.roll().to_vec();
            assert!(values.iter().all(|v| (1..=6).contains(v)));
            match values.len() {
                4 => assert!(values.iter().all(|&v| v == values[0])),
                2 => assert_ne!(values[0], values[1]),
                n => panic!("unexpected number of values: {}", n),
            }
        }
    }

    #[test]
    fn test_seeded_rolls_repeat() {
        let mut a = Dice::new(RandomDie::seeded(42));
        let mut b = Dice::new(RandomDie::seeded(42));
        for _ in 0..20 {
            assert_eq!(a.roll().to_vec(), b.roll().to_vec());
        }
    }
}
