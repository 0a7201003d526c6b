//! Built-in conversation topics.

use rand::Rng;

/// Topics a generated conversation can be about.
pub const TOPICS: [&str; 20] = [
    "planning a surprise birthday party",
    "debating the best pizza toppings",
    "organizing a weekend hiking trip",
    "discussing a mysterious noise in the building",
    "planning a potluck dinner",
    "debating which movie to watch tonight",
    "coordinating a group study session",
    "discussing rumors about a new neighbor",
    "planning a road trip across the country",
    "arguing about the rules of a board game",
    "discussing what to name a new pet",
    "planning a community garden project",
    "debating the merits of early morning vs late night routines",
    "organizing a charity fundraiser",
    "discussing a strange dream someone had",
    "planning a home renovation project",
    "debating the best strategy for a video game",
    "discussing a book everyone just read",
    "planning a camping trip",
    "arguing about whose turn it is to do the dishes",
];

/// Picks one topic uniformly at random.
pub fn pick_topic<R: Rng>(rng: &mut R) -> &'static str {
    TOPICS[rng.gen_range(0..TOPICS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_topic_is_from_list() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert!(TOPICS.contains(&pick_topic(&mut rng)));
        }
    }
}
