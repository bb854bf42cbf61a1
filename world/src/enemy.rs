//! Enemy state and per-variant motion policies.

use frostbite_core::{Direction, EnemyKind, Location, MotionPolicy};
use rand::Rng;

/// Maximum number of cells a lunging enemy covers in one step.
const LUNGE_REACH: usize = 2;

/// Enemy roaming the grid; detection and motion follow its variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    kind: EnemyKind,
    location: Location,
    heading: Direction,
}

impl Enemy {
    /// Creates an enemy using the variant's default heading.
    #[must_use]
    pub const fn new(kind: EnemyKind, location: Location) -> Self {
        Self::with_heading(kind, location, kind.default_heading())
    }

    /// Creates an enemy with an explicit initial heading.
    #[must_use]
    pub const fn with_heading(kind: EnemyKind, location: Location, heading: Direction) -> Self {
        Self {
            kind,
            location,
            heading,
        }
    }

    /// Variant of the enemy.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Display name of the enemy variant.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Cell occupied by the enemy.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Heading used when patrolling.
    #[must_use]
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    /// Ticks between motion steps.
    #[must_use]
    pub const fn speed(&self) -> u64 {
        self.kind.move_period()
    }

    /// Places the enemy on the provided cell.
    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Reports whether the enemy stands on the provided player cell.
    #[must_use]
    pub fn collides_with_player(&self, player: Location) -> bool {
        self.location == player
    }

    /// Reports whether the player is within the variant's detection radius.
    #[must_use]
    pub fn detect_player(&self, player: Location) -> bool {
        self.location.distance_to(player) <= self.kind.detection_radius()
    }

    pub(crate) fn is_due(&self, tick: u64) -> bool {
        tick % self.speed() == 0
    }

    pub(crate) fn restore(&mut self, location: Location, heading: Direction) {
        self.location = location;
        self.heading = heading;
    }

    /// Chooses the enemy's next cell without moving it.
    ///
    /// `can_enter` must reject cells that are not occupiable or that hold
    /// another enemy. `None` means the enemy stays put this tick.
    pub(crate) fn plan_step<F, R>(
        &mut self,
        players: &[Location],
        can_enter: F,
        rng: &mut R,
    ) -> Option<Location>
    where
        F: Fn(Location) -> bool,
        R: Rng,
    {
        match self.kind.motion() {
            MotionPolicy::Jitter => self.jitter(&can_enter, rng),
            MotionPolicy::Patrol => self.patrol(&can_enter),
            MotionPolicy::Chase => match self.nearest_detected(players) {
                Some(target) => self.chase(target, &can_enter),
                None => self.patrol(&can_enter),
            },
            MotionPolicy::Lunge => match self.nearest_detected(players) {
                Some(target) if shares_axis(self.location, target) => {
                    self.lunge(target, &can_enter)
                }
                _ => self.patrol(&can_enter),
            },
        }
    }

    fn nearest_detected(&self, players: &[Location]) -> Option<Location> {
        players
            .iter()
            .copied()
            .filter(|player| self.detect_player(*player))
            .min_by(|a, b| {
                self.location
                    .distance_to(*a)
                    .total_cmp(&self.location.distance_to(*b))
            })
    }

    fn jitter<F, R>(&mut self, can_enter: &F, rng: &mut R) -> Option<Location>
    where
        F: Fn(Location) -> bool,
        R: Rng,
    {
        // The extra slot past the last direction means "stay".
        let choice = rng.gen_range(0..=Direction::ALL.len());
        let direction = *Direction::ALL.get(choice)?;
        let target = self.location.step(direction);
        if !can_enter(target) {
            return None;
        }
        self.heading = direction;
        Some(target)
    }

    fn patrol<F>(&mut self, can_enter: &F) -> Option<Location>
    where
        F: Fn(Location) -> bool,
    {
        let ahead = self.location.step(self.heading);
        if can_enter(ahead) {
            return Some(ahead);
        }

        self.heading = self.heading.reversed();
        let back = self.location.step(self.heading);
        can_enter(back).then_some(back)
    }

    fn chase<F>(&mut self, target: Location, can_enter: &F) -> Option<Location>
    where
        F: Fn(Location) -> bool,
    {
        let current = self.location.distance_to(target);
        let (direction, next) = Direction::ALL
            .iter()
            .map(|direction| (*direction, self.location.step(*direction)))
            .filter(|(_, cell)| can_enter(*cell))
            .min_by(|(_, a), (_, b)| a.distance_to(target).total_cmp(&b.distance_to(target)))?;

        if next.distance_to(target) >= current {
            return None;
        }
        self.heading = direction;
        Some(next)
    }

    fn lunge<F>(&mut self, target: Location, can_enter: &F) -> Option<Location>
    where
        F: Fn(Location) -> bool,
    {
        let direction = Direction::from_delta(
            target.x() - self.location.x(),
            target.y() - self.location.y(),
        )?;
        self.heading = direction;

        let mut destination = None;
        let mut cursor = self.location;
        for _ in 0..LUNGE_REACH {
            let next = cursor.step(direction);
            if !can_enter(next) {
                break;
            }
            cursor = next;
            destination = Some(next);
            if next == target {
                break;
            }
        }
        destination
    }
}

fn shares_axis(a: Location, b: Location) -> bool {
    a != b && (a.x() == b.x() || a.y() == b.y())
}
