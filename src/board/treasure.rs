//! Treasure chips and board spaces.
//!
//! A treasure is either a single chip or a stack of up to three chips that
//! was formed when a round ended. A board space holds at most one treasure.

use serde::{Deserialize, Serialize};

/// Maximum number of chips in a stack.
pub const STACK_CAPACITY: usize = 3;

/// Number of treasure levels on a fresh board.
pub const LEVEL_COUNT: u8 = 4;

/// Chip values within a level, before the level offset is added.
const LEVEL_VALUES: [u32; 8] = [0, 0, 1, 1, 2, 2, 3, 3];

/// A single treasure chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SingleTreasure {
    pub value: u32,
    pub level: u8,
}

impl SingleTreasure {
    pub const fn new(value: u32, level: u8) -> Self {
        SingleTreasure { value, level }
    }
}

/// A non-empty group of chips occupying one space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<SingleTreasure>", into = "Vec<SingleTreasure>")]
pub struct TreasureStack(Vec<SingleTreasure>);

impl TreasureStack {
    /// Builds a stack, returning `None` for an empty chip list.
    pub fn new(chips: Vec<SingleTreasure>) -> Option<Self> {
        if chips.is_empty() {
            None
        } else {
            Some(TreasureStack(chips))
        }
    }

    pub fn chips(&self) -> &[SingleTreasure] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the stack holds no chips.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_chips(self) -> Vec<SingleTreasure> {
        self.0
    }
}

impl TryFrom<Vec<SingleTreasure>> for TreasureStack {
    type Error = &'static str;

    fn try_from(chips: Vec<SingleTreasure>) -> Result<Self, Self::Error> {
        TreasureStack::new(chips).ok_or("a treasure stack must hold at least one chip")
    }
}

impl From<TreasureStack> for Vec<SingleTreasure> {
    fn from(stack: TreasureStack) -> Self {
        stack.0
    }
}

/// Something a player can carry or a space can hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Treasure {
    Single(SingleTreasure),
    Stack { chips: TreasureStack },
}

impl Treasure {
    /// Returns the individual chips making up this treasure.
    pub fn chips(&self) -> &[SingleTreasure] {
        match self {
            Treasure::Single(t) => std::slice::from_ref(t),
            Treasure::Stack { chips } => chips.chips(),
        }
    }

    /// Consumes the treasure, yielding its chips in order.
    pub fn into_chips(self) -> Vec<SingleTreasure> {
        match self {
            Treasure::Single(t) => vec![t],
            Treasure::Stack { chips } => chips.into_chips(),
        }
    }

    /// Sum of the chip values.
    pub fn value(&self) -> u32 {
        self.chips().iter().map(|t| t.value).sum()
    }

    pub fn as_single(&self) -> Option<SingleTreasure> {
        match self {
            Treasure::Single(t) => Some(*t),
            Treasure::Stack { .. } => None,
        }
    }
}

impl From<SingleTreasure> for Treasure {
    fn from(t: SingleTreasure) -> Self {
        Treasure::Single(t)
    }
}

impl From<TreasureStack> for Treasure {
    fn from(chips: TreasureStack) -> Self {
        Treasure::Stack { chips }
    }
}

/// One space of the track. `None` is an empty space.
pub type Space = Option<Treasure>;

/// Flattens treasures into individual chips, preserving order.
pub fn expand<'a, I>(treasures: I) -> Vec<SingleTreasure>
where
    I: IntoIterator<Item = &'a Treasure>,
{
    treasures
        .into_iter()
        .flat_map(|t| t.chips().iter().copied())
        .collect()
}

/// Groups chips into stacks of `STACK_CAPACITY`; the last stack may be partial.
pub fn stack_chips(chips: Vec<SingleTreasure>) -> Vec<TreasureStack> {
    chips
        .chunks(STACK_CAPACITY)
        .filter_map(|chunk| TreasureStack::new(chunk.to_vec()))
        .collect()
}

/// Returns every chip of a fresh board in level order (unshuffled).
pub fn full_treasure_set() -> Vec<SingleTreasure> {
    (1..=LEVEL_COUNT)
        .flat_map(|level| {
            let offset = 4 * (level as u32 - 1);
            LEVEL_VALUES
                .iter()
                .map(move |v| SingleTreasure::new(offset + v, level))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chip(value: u32) -> SingleTreasure {
        SingleTreasure::new(value, 1)
    }

    #[test]
    fn empty_stack_is_rejected() {
        assert!(TreasureStack::new(Vec::new()).is_none());
        assert!(TreasureStack::try_from(Vec::new()).is_err());
        let stack = TreasureStack::new(vec![chip(1)]).unwrap();
        assert!(!stack.is_empty());
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn expand_flattens_stacks_in_order() {
        let stack = TreasureStack::new(vec![chip(1), chip(2)]).unwrap();
        let treasures = vec![Treasure::from(chip(0)), Treasure::from(stack), chip(3).into()];
        let values: Vec<u32> = expand(&treasures).iter().map(|t| t.value).collect();
        assert_eq!(values, vec![0, 1, 2, 3]);
    }

    #[test]
    fn stack_chips_chunks_by_three() {
        let stacks = stack_chips(vec![chip(1), chip(2), chip(3), chip(4)]);
        assert_eq!(stacks.len(), 2);
        assert_eq!(stacks[0].chips(), &[chip(1), chip(2), chip(3)]);
        assert_eq!(stacks[1].chips(), &[chip(4)]);
        assert!(stack_chips(Vec::new()).is_empty());
    }

    #[test]
    fn full_set_has_eight_chips_per_level() {
        let set = full_treasure_set();
        assert_eq!(set.len(), 32);
        for level in 1..=LEVEL_COUNT {
            let values: Vec<u32> = set
                .iter()
                .filter(|t| t.level == level)
                .map(|t| t.value)
                .collect();
            let base = 4 * (level as u32 - 1);
            assert_eq!(
                values,
                vec![base, base, base + 1, base + 1, base + 2, base + 2, base + 3, base + 3]
            );
        }
    }

    #[test]
    fn treasure_value_sums_chips() {
        let stack = TreasureStack::new(vec![chip(4), chip(5)]).unwrap();
        assert_eq!(Treasure::from(stack).value(), 9);
        assert_eq!(Treasure::from(chip(7)).value(), 7);
    }

    #[test]
    fn stack_serializes_as_chip_list() {
        let stack = Treasure::from(TreasureStack::new(vec![chip(1)]).unwrap());
        let json = serde_json::to_string(&stack).unwrap();
        assert_eq!(json, r#"{"kind":"stack","chips":[{"value":1,"level":1}]}"#);
        let back: Treasure = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stack);
        assert!(serde_json::from_str::<Treasure>(r#"{"kind":"stack","chips":[]}"#).is_err());
    }
}
