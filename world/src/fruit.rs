//! Collectible fruit.

use frostbite_core::{FruitKind, Location};

/// Fruit placed on the grid; point value and mobility follow its variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fruit {
    kind: FruitKind,
    location: Location,
    collected: bool,
    spined: bool,
}

impl Fruit {
    /// Creates an uncollected fruit of the provided variant.
    #[must_use]
    pub const fn new(kind: FruitKind, location: Location) -> Self {
        Self {
            kind,
            location,
            collected: false,
            spined: false,
        }
    }

    /// Variant of the fruit.
    #[must_use]
    pub const fn kind(&self) -> FruitKind {
        self.kind
    }

    /// Display name of the fruit variant.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Cell occupied by the fruit.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Points awarded by the first collection.
    #[must_use]
    pub const fn point_value(&self) -> u32 {
        self.kind.points()
    }

    /// Reports whether the fruit drifts across the grid.
    #[must_use]
    pub const fn is_movable(&self) -> bool {
        self.kind.is_movable()
    }

    /// Reports whether the fruit has already been collected.
    #[must_use]
    pub const fn is_collected(&self) -> bool {
        self.collected
    }

    /// Reports whether the fruit currently bears spines.
    #[must_use]
    pub const fn is_spined(&self) -> bool {
        self.spined
    }

    /// Collects the fruit.
    ///
    /// The first call returns the fruit's point value; every later call
    /// returns zero and leaves the fruit untouched.
    pub fn collect(&mut self) -> u32 {
        if self.collected {
            return 0;
        }
        self.collected = true;
        self.spined = false;
        self.point_value()
    }

    /// Moves the fruit to the provided cell.
    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    pub(crate) fn is_drift_due(&self, tick: u64) -> bool {
        !self.collected
            && self
                .kind
                .drift_period()
                .is_some_and(|period| tick % period == 0)
    }

    /// Recomputes the spine state for the provided tick count.
    pub(crate) fn refresh_spines(&mut self, tick: u64) {
        self.spined = !self.collected
            && self
                .kind
                .spine_phase()
                .is_some_and(|phase| (tick / phase) % 2 == 1);
    }

    pub(crate) fn mark_collected(&mut self) {
        self.collected = true;
        self.spined = false;
    }
}
