use rand::Rng;
use tracing::{debug, warn};

use super::grid::{Grid, Position, distance};

/// Where a food item landed and how it got there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodPlacement {
    pub position: Position,
    /// Random draws spent
    pub attempts: u32,
    /// The attempt budget ran out and the farthest cell was used instead
    pub fallback: bool,
}

/// Draw a food cell at least `min_distance` pixels away from `head`.
///
/// Cells are sampled uniformly over the playfield and rejected while too
/// close to the head. The snake's body is not consulted, so food can land
/// under it. After `max_attempts` rejections the cell farthest from the head
/// is used.
pub fn generate_food<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    head: Position,
    min_distance: u32,
    max_attempts: u32,
) -> FoodPlacement {
    let columns = grid.columns() as i32;
    let rows = grid.rows() as i32;

    for attempt in 1..=max_attempts {
        let candidate = Position::new(
            rng.gen_range(0..columns) * grid.cell_size,
            rng.gen_range(0..rows) * grid.cell_size,
        );

        if distance(candidate, head) >= min_distance {
            debug!(x = candidate.x, y = candidate.y, attempts = attempt, "food placed");
            return FoodPlacement {
                position: candidate,
                attempts: attempt,
                fallback: false,
            };
        }
    }

    let position = grid.farthest_from(head);
    warn!(
        max_attempts,
        min_distance,
        x = position.x,
        y = position.y,
        "food placement exhausted its attempts, using farthest cell"
    );

    FoodPlacement {
        position,
        attempts: max_attempts,
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_food_respects_min_distance() {
        let grid = Grid::new(6, 300, 600);
        let head = Position::new(150, 300);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let placement = generate_food(&mut rng, &grid, head, 60, 10_000);
            assert!(!placement.fallback);
            assert!(distance(placement.position, head) >= 60);
            assert!(grid.contains(placement.position));
            assert_eq!(grid.snap(placement.position), placement.position);
        }
    }

    #[test]
    fn test_food_is_deterministic_for_a_seed() {
        let grid = Grid::new(6, 300, 600);
        let head = Position::new(150, 300);

        let a = generate_food(&mut StdRng::seed_from_u64(7), &grid, head, 60, 10_000);
        let b = generate_food(&mut StdRng::seed_from_u64(7), &grid, head, 60, 10_000);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unreachable_distance_falls_back_to_farthest_cell() {
        // 10x10 cells of size 6: nothing is 1000px away.
        let grid = Grid::new(6, 60, 60);
        let head = Position::new(0, 0);
        let mut rng = StdRng::seed_from_u64(1);

        let placement = generate_food(&mut rng, &grid, head, 1000, 50);
        assert!(placement.fallback);
        assert_eq!(placement.attempts, 50);
        assert_eq!(placement.position, Position::new(54, 54));
    }
}
