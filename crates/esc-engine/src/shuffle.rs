//! Per-room puzzle shuffle.
//!
//! Each room keeps the same set of puzzles, but which named object carries
//! which puzzle changes from game to game.

use rand::Rng;

use esc_core::Level;

/// Randomly permute puzzle facets among the puzzle-bearing objects of each
/// room, independently per room.
///
/// Only the facet moves: names, descriptions and room membership stay put,
/// and objects without a puzzle are never touched. The permutation is a
/// Fisher–Yates shuffle, uniform over all orderings.
pub fn shuffle_puzzles<R: Rng + ?Sized>(level: &mut Level, rng: &mut R) {
    for room in 0..level.room_count() {
        let Ok(objects) = level.room_objects_mut(room) else {
            continue;
        };

        let bearing: Vec<usize> = objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.has_puzzle())
            .map(|(i, _)| i)
            .collect();

        for i in (1..bearing.len()).rev() {
            let j = rng.random_range(0..=i);
            if i == j {
                continue;
            }
            let (a, b) = (bearing[j].min(bearing[i]), bearing[j].max(bearing[i]));
            let (head, tail) = objects.split_at_mut(b);
            std::mem::swap(&mut head[a].facet, &mut tail[0].facet);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esc_core::{GameObject, PuzzleKind, RoomHeader};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_level() -> Level {
        let placed = vec![
            (0, GameObject::new("Desk", "Oak.").with_puzzle(PuzzleKind::Numeric, "Year?", "1887").with_item("Key")),
            (0, GameObject::new("Chair", "Plain.")),
            (0, GameObject::new("Clock", "Stopped.").with_puzzle(PuzzleKind::Text, "Word?", "time")),
            (0, GameObject::new("Rug", "Dusty.").with_item("Coin")),
            (0, GameObject::new("Globe", "Spins.").with_puzzle(PuzzleKind::Text, "City?", "rome")),
            (1, GameObject::new("Door", "Locked door.")),
            (1, GameObject::new("Panel", "Buttons.").with_puzzle(PuzzleKind::Numeric, "Code?", "7")),
        ];
        Level::assemble(
            vec![RoomHeader::new("Study", " "), RoomHeader::new("Exit", " ")],
            placed,
        )
    }

    fn sorted_facets(level: &Level, room: usize) -> Vec<String> {
        let mut facets: Vec<String> = level
            .objects_in(room)
            .unwrap()
            .iter()
            .filter(|o| o.has_puzzle())
            .map(|o| format!("{:?}", o.facet))
            .collect();
        facets.sort();
        facets
    }

    #[test]
    fn identity_and_plain_objects_stay_put() {
        let original = sample_level();
        let mut level = original.clone();
        shuffle_puzzles(&mut level, &mut StdRng::seed_from_u64(3));

        for (before, after) in original.objects().iter().zip(level.objects()) {
            assert_eq!(before.name, after.name);
            assert_eq!(before.description, after.description);
            if !before.has_puzzle() {
                assert_eq!(before.facet, after.facet);
            }
        }
        assert_eq!(original.rooms(), level.rooms());
    }

    #[test]
    fn facets_stay_within_their_room() {
        let original = sample_level();
        let mut level = original.clone();
        shuffle_puzzles(&mut level, &mut StdRng::seed_from_u64(11));

        for room in 0..level.room_count() {
            assert_eq!(sorted_facets(&original, room), sorted_facets(&level, room));
        }
        // A single puzzle in a room has nowhere to go.
        assert_eq!(level.object(1, 1).unwrap().facet.answer, "7");
    }

    #[test]
    fn eventually_moves_puzzles() {
        let original = sample_level();
        let moved = (0..50u64).any(|seed| {
            let mut level = original.clone();
            shuffle_puzzles(&mut level, &mut StdRng::seed_from_u64(seed));
            level.object(0, 0).unwrap().facet != original.object(0, 0).unwrap().facet
        });
        assert!(moved, "no seed in 0..50 moved the desk puzzle");
    }

    #[test]
    fn all_orderings_are_reachable() {
        let original = sample_level();
        let mut seen = std::collections::HashSet::new();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..600 {
            let mut level = original.clone();
            shuffle_puzzles(&mut level, &mut rng);
            let order: Vec<String> = [0, 2, 4]
                .iter()
                .map(|&i| level.objects()[i].facet.answer.clone())
                .collect();
            seen.insert(order);
        }
        assert_eq!(seen.len(), 6);
    }

    proptest! {
        #[test]
        fn puzzle_counts_per_room_are_invariant(
            seed in any::<u64>(),
            kinds in proptest::collection::vec((0usize..3, 0i32..3), 0..30),
        ) {
            let placed: Vec<(usize, GameObject)> = kinds
                .iter()
                .enumerate()
                .map(|(i, &(room, code))| {
                    let obj = GameObject::new(format!("o{i}"), "")
                        .with_puzzle(PuzzleKind::from_code(code), format!("p{i}"), format!("{i}"));
                    (room, obj)
                })
                .collect();
            let headers = (0..3).map(|r| RoomHeader::new(format!("r{r}"), "")).collect();
            let original = Level::assemble(headers, placed);

            let mut level = original.clone();
            shuffle_puzzles(&mut level, &mut StdRng::seed_from_u64(seed));

            for room in 0..3 {
                let count = |l: &Level, kind: PuzzleKind| {
                    l.objects_in(room).unwrap().iter().filter(|o| o.facet.kind == kind).count()
                };
                for kind in [PuzzleKind::None, PuzzleKind::Numeric, PuzzleKind::Text] {
                    prop_assert_eq!(count(&original, kind), count(&level, kind));
                }
                prop_assert_eq!(sorted_facets(&original, room), sorted_facets(&level, room));
            }
        }
    }
}
