//! Player avatar state.

use frostbite_core::{Direction, Location};

/// Ice cream avatar controlled by a player.
///
/// The avatar never validates its own moves; the level checks the
/// destination before calling [`IceCream::move_by`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IceCream {
    name: String,
    flavor: String,
    location: Location,
    alive: bool,
    last_dx: i32,
    last_dy: i32,
}

impl IceCream {
    /// Creates a living avatar facing down.
    #[must_use]
    pub fn new(name: impl Into<String>, flavor: impl Into<String>, location: Location) -> Self {
        let (last_dx, last_dy) = Direction::Down.delta();
        Self {
            name: name.into(),
            flavor: flavor.into(),
            location,
            alive: true,
            last_dx,
            last_dy,
        }
    }

    /// Display name of the player.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Flavour of the avatar, used by presentation layers to pick a skin.
    #[must_use]
    pub fn flavor(&self) -> &str {
        &self.flavor
    }

    /// Cell currently occupied by the avatar.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Reports whether the avatar is alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Deltas of the most recent motion or facing change.
    #[must_use]
    pub const fn facing(&self) -> (i32, i32) {
        (self.last_dx, self.last_dy)
    }

    /// Translates the avatar and records the motion as its facing.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.location = self.location.translate(dx, dy);
        self.last_dx = dx;
        self.last_dy = dy;
    }

    /// Turns the avatar without moving it.
    pub fn face(&mut self, direction: Direction) {
        let (dx, dy) = direction.delta();
        self.last_dx = dx;
        self.last_dy = dy;
    }

    /// Places the avatar on the provided cell.
    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Marks the avatar as dead. Repeated calls have no further effect.
    pub fn die(&mut self) {
        self.alive = false;
    }

    pub(crate) fn restore(&mut self, location: Location, alive: bool, facing: (i32, i32)) {
        self.location = location;
        self.alive = alive;
        self.last_dx = facing.0;
        self.last_dy = facing.1;
    }
}
