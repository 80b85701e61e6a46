use std::time::Instant;

use rand::Rng;

use crate::types::{
    Bounds, Condition, DamageSource, Entity, EventQuery, MatchReport, Weather, World,
};

/// Ticks in one day; time conditions compare the time of day.
const DAY_LENGTH: i64 = 24_000;

pub(crate) fn evaluate<E, Q, R>(conditions: &[Condition], event: &E, query: &Q, rng: &mut R) -> bool
where
    E: ?Sized,
    Q: EventQuery<E> + ?Sized,
    R: Rng + ?Sized,
{
    conditions
        .iter()
        .all(|condition| check(condition, event, query, rng))
}

pub(crate) fn evaluate_detailed<E, Q, R>(
    conditions: &[Condition],
    event: &E,
    query: &Q,
    rng: &mut R,
) -> MatchReport
where
    E: ?Sized,
    Q: EventQuery<E> + ?Sized,
    R: Rng + ?Sized,
{
    let start = Instant::now();
    let mut checked = 0;
    let mut failed = None;

    for condition in conditions {
        checked += 1;
        if !check(condition, event, query, rng) {
            failed = Some(condition.key());
            break;
        }
    }

    let report = MatchReport::new(failed, checked, conditions.len(), start.elapsed());
    tracing::debug!(%report, "loot rule checked");
    report
}

fn check<E, Q, R>(condition: &Condition, event: &E, query: &Q, rng: &mut R) -> bool
where
    E: ?Sized,
    Q: EventQuery<E> + ?Sized,
    R: Rng + ?Sized,
{
    let world = query.world(event);
    let pos = query.pos(event);

    match condition {
        Condition::Time(bounds) => time_of_day(bounds, world.world_time().rem_euclid(DAY_LENGTH)),
        Condition::Light(bounds) => bounds.contains(i64::from(world.light_level(pos))),
        Condition::Height(bounds) => bounds.contains(i64::from(query.y(event))),
        Condition::LocalDifficulty(bounds) => bounds.contains(world.local_difficulty(pos)),
        Condition::SpawnDistance(bounds) => bounds.contains(pos.distance_to(world.spawn_point())),
        Condition::Random(probability) => rng.gen::<f64>() < *probability,

        Condition::InBuilding(expected) => world.settlement(pos).in_building == *expected,
        Condition::InCity(expected) => world.settlement(pos).in_city == *expected,
        Condition::InStreet(expected) => world.settlement(pos).in_street == *expected,
        Condition::InSphere(expected) => world.settlement(pos).in_sphere == *expected,
        Condition::GameStage(stage) => query
            .attacker(event)
            .is_some_and(|player| player.is_player() && player.has_game_stage(stage)),
        Condition::Passive(expected) => query.entity(event).is_passive() == *expected,
        Condition::Hostile(expected) => query.entity(event).is_hostile() == *expected,
        Condition::SeeSky(expected) => world.can_see_sky(pos) == *expected,

        Condition::Weather(Weather::Rain) => world.is_raining(),
        Condition::Weather(Weather::Thunder) => world.is_thundering(),
        Condition::Temperature(category) => world.biome(pos).temperature == *category,
        Condition::Difficulty(difficulty) => world.difficulty() == *difficulty,
        Condition::Structure(name) => world.is_in_structure(name, pos),

        Condition::Player(expected) => {
            query.attacker(event).is_some_and(Entity::is_player) == *expected
        }
        Condition::RealPlayer(expected) => {
            query
                .attacker(event)
                .is_some_and(|a| a.is_player() && !a.is_fake_player())
                == *expected
        }
        Condition::FakePlayer(expected) => {
            query
                .attacker(event)
                .is_some_and(|a| a.is_player() && a.is_fake_player())
                == *expected
        }
        Condition::Projectile(expected) => {
            query.source(event).is_some_and(DamageSource::is_projectile) == *expected
        }
        Condition::Explosion(expected) => {
            query.source(event).is_some_and(DamageSource::is_explosion) == *expected
        }
        Condition::Fire(expected) => {
            query.source(event).is_some_and(DamageSource::is_fire) == *expected
        }
        Condition::Magic(expected) => {
            query.source(event).is_some_and(DamageSource::is_magic) == *expected
        }

        Condition::Mob(ids) => contains(ids, query.entity(event).type_id()),
        Condition::Mod(ids) => contains(ids, namespace(query.entity(event).type_id())),
        Condition::Block(ids) => contains(ids, world.block_id(pos.down())),
        Condition::Biome(ids) => contains(ids, &world.biome(pos).id),
        Condition::BiomeType(types) => world
            .biome(pos)
            .types
            .iter()
            .any(|ty| contains(types, ty)),
        Condition::Dimension(ids) => contains(ids, world.dimension()),
        Condition::Source(ids) => query
            .source(event)
            .is_some_and(|source| contains(ids, source.id())),
        Condition::HeldItem(ids) => query
            .attacker(event)
            .and_then(Entity::held_item)
            .is_some_and(|item| contains(ids, item)),

        Condition::Never(_) => false,
    }
}

fn time_of_day(bounds: &Bounds<i64>, time: i64) -> bool {
    match (bounds.min, bounds.max) {
        (Some(min), Some(max)) if min > max => time >= min || time <= max,
        _ => bounds.contains(time),
    }
}

fn contains(set: &[String], value: &str) -> bool {
    set.iter().any(|s| s == value)
}

fn namespace(id: &str) -> &str {
    id.split_once(':').map_or("minecraft", |(ns, _)| ns)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::test_support::{DropEvent, DropQuery, FakeHit, FakeMob};
    use crate::types::{BlockPos, Difficulty, Key, Settlement, TempCategory};

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(9)
    }

    fn passes(condition: Condition, event: &DropEvent) -> bool {
        evaluate(&[condition], event, &DropQuery, &mut rng())
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    fn range(min: Option<i64>, max: Option<i64>) -> Bounds<i64> {
        Bounds { min, max }
    }

    #[test]
    fn no_conditions_match_everything() {
        assert!(evaluate(&[], &DropEvent::default(), &DropQuery, &mut rng()));
    }

    #[test]
    fn light_bounds_inclusive() {
        let mut event = DropEvent::default();
        event.world.light = 7;
        assert!(passes(Condition::Light(range(Some(0), Some(7))), &event));
        event.world.light = 8;
        assert!(!passes(Condition::Light(range(Some(0), Some(7))), &event));
    }

    #[test]
    fn height_uses_event_y() {
        let mut event = DropEvent::default();
        event.pos = BlockPos::new(0, 30, 0);
        assert!(passes(Condition::Height(range(None, Some(40))), &event));
        event.pos = BlockPos::new(0, 41, 0);
        assert!(!passes(Condition::Height(range(None, Some(40))), &event));
    }

    #[test]
    fn time_is_time_of_day() {
        let mut event = DropEvent::default();
        event.world.time = 3 * DAY_LENGTH + 13_000;
        assert!(passes(Condition::Time(range(Some(13_000), Some(23_000))), &event));
        event.world.time = -11_000;
        assert!(passes(Condition::Time(range(Some(13_000), None)), &event));
    }

    #[test]
    fn time_window_wraps_midnight() {
        let night = Condition::Time(range(Some(22_000), Some(2_000)));
        let mut event = DropEvent::default();
        event.world.time = 23_500;
        assert!(passes(night.clone(), &event));
        event.world.time = 1_000;
        assert!(passes(night.clone(), &event));
        event.world.time = 12_000;
        assert!(!passes(night, &event));
    }

    #[test]
    fn spawn_distance() {
        let mut event = DropEvent::default();
        event.pos = BlockPos::new(30, 64, 40);
        let near = Condition::SpawnDistance(Bounds {
            min: None,
            max: Some(50.0),
        });
        assert!(passes(near.clone(), &event));
        event.pos = BlockPos::new(31, 64, 40);
        assert!(!passes(near, &event));
    }

    #[test]
    fn local_difficulty_bounds() {
        let event = DropEvent::default();
        let hard = Condition::LocalDifficulty(Bounds {
            min: Some(2.0),
            max: None,
        });
        assert!(!passes(hard, &event));
    }

    #[test]
    fn random_extremes() {
        let event = DropEvent::default();
        let mut rng = rng();
        for _ in 0..200 {
            assert!(!evaluate(&[Condition::Random(0.0)], &event, &DropQuery, &mut rng));
            assert!(evaluate(&[Condition::Random(1.0)], &event, &DropQuery, &mut rng));
        }
    }

    #[test]
    fn settlement_flags() {
        let mut event = DropEvent::default();
        assert!(passes(Condition::InCity(false), &event));
        event.world.settlement = Settlement {
            in_city: true,
            in_street: true,
            ..Settlement::default()
        };
        assert!(passes(Condition::InCity(true), &event));
        assert!(passes(Condition::InStreet(true), &event));
        assert!(!passes(Condition::InBuilding(true), &event));
        assert!(passes(Condition::InSphere(false), &event));
    }

    #[test]
    fn game_stage_needs_a_player_with_the_stage() {
        let mut event = DropEvent::default();
        let stage = Condition::GameStage("iron_age".into());
        assert!(!passes(stage.clone(), &event));
        let mut player = FakeMob::player();
        event.attacker = Some(player.clone());
        assert!(!passes(stage.clone(), &event));
        player.stages.push("iron_age".into());
        event.attacker = Some(player);
        assert!(passes(stage, &event));
    }

    #[test]
    fn entity_kind_flags() {
        let event = DropEvent::default();
        assert!(passes(Condition::Hostile(true), &event));
        assert!(passes(Condition::Passive(false), &event));
        assert!(!passes(Condition::Passive(true), &event));
    }

    #[test]
    fn weather_names() {
        let mut event = DropEvent::default();
        assert!(!passes(Condition::Weather(Weather::Rain), &event));
        event.world.raining = true;
        assert!(passes(Condition::Weather(Weather::Rain), &event));
        assert!(!passes(Condition::Weather(Weather::Thunder), &event));
        event.world.thundering = true;
        assert!(passes(Condition::Weather(Weather::Thunder), &event));
    }

    #[test]
    fn world_categories() {
        let mut event = DropEvent::default();
        assert!(passes(Condition::Temperature(TempCategory::Medium), &event));
        assert!(!passes(Condition::Temperature(TempCategory::Cold), &event));
        assert!(passes(Condition::Difficulty(Difficulty::Normal), &event));
        assert!(!passes(Condition::Difficulty(Difficulty::Hard), &event));
        assert!(passes(Condition::SeeSky(true), &event));
        assert!(!passes(Condition::Structure("Fortress".into()), &event));
        event.world.structures.push("Fortress".into());
        assert!(passes(Condition::Structure("Fortress".into()), &event));
    }

    #[test]
    fn player_flags_without_attacker() {
        let event = DropEvent::default();
        assert!(passes(Condition::Player(false), &event));
        assert!(!passes(Condition::Player(true), &event));
        assert!(passes(Condition::RealPlayer(false), &event));
        assert!(passes(Condition::FakePlayer(false), &event));
    }

    #[test]
    fn real_and_fake_players() {
        let mut event = DropEvent::default();
        event.attacker = Some(FakeMob::player());
        assert!(passes(Condition::Player(true), &event));
        assert!(passes(Condition::RealPlayer(true), &event));
        assert!(passes(Condition::FakePlayer(false), &event));

        event.attacker = Some(FakeMob {
            fake: true,
            ..FakeMob::player()
        });
        assert!(passes(Condition::Player(true), &event));
        assert!(passes(Condition::RealPlayer(false), &event));
        assert!(passes(Condition::FakePlayer(true), &event));
    }

    #[test]
    fn cause_flags() {
        let mut event = DropEvent::default();
        assert!(passes(Condition::Projectile(false), &event));
        assert!(!passes(Condition::Fire(true), &event));
        event.source = Some(FakeHit {
            id: "arrow".into(),
            projectile: true,
            ..FakeHit::default()
        });
        assert!(passes(Condition::Projectile(true), &event));
        assert!(passes(Condition::Explosion(false), &event));
        assert!(passes(Condition::Magic(false), &event));
    }

    #[test]
    fn identity_sets() {
        let mut event = DropEvent::default();
        assert!(passes(Condition::Mob(ids(&["minecraft:husk", "minecraft:zombie"])), &event));
        assert!(!passes(Condition::Mob(ids(&["minecraft:skeleton"])), &event));
        assert!(passes(Condition::Mod(ids(&["minecraft"])), &event));
        assert!(passes(Condition::Block(ids(&["minecraft:grass"])), &event));
        assert!(passes(Condition::Biome(ids(&["minecraft:plains"])), &event));
        assert!(passes(Condition::BiomeType(ids(&["FOREST", "PLAINS"])), &event));
        assert!(!passes(Condition::BiomeType(ids(&["HOT"])), &event));
        assert!(passes(Condition::Dimension(ids(&["minecraft:overworld"])), &event));

        event.entity.type_id = "thaumcraft:wisp".into();
        assert!(!passes(Condition::Mod(ids(&["minecraft"])), &event));
        assert!(passes(Condition::Mod(ids(&["thaumcraft"])), &event));
        event.entity.type_id = "wisp".into();
        assert!(passes(Condition::Mod(ids(&["minecraft"])), &event));
    }

    #[test]
    fn source_and_held_item_sets() {
        let mut event = DropEvent::default();
        assert!(!passes(Condition::Source(ids(&["lava"])), &event));
        assert!(!passes(Condition::HeldItem(ids(&["minecraft:diamond_sword"])), &event));

        event.source = Some(FakeHit {
            id: "lava".into(),
            fire: true,
            ..FakeHit::default()
        });
        event.attacker = Some(FakeMob {
            held: Some("minecraft:diamond_sword".into()),
            ..FakeMob::player()
        });
        assert!(passes(Condition::Source(ids(&["lava", "inFire"])), &event));
        assert!(passes(Condition::HeldItem(ids(&["minecraft:diamond_sword"])), &event));
    }

    #[test]
    fn block_check_at_lowest_coordinate() {
        let mut event = DropEvent::default();
        event.pos = BlockPos::new(0, i32::MIN, 0);
        event.world.block_below = "minecraft:bedrock".into();
        assert!(passes(Condition::Block(ids(&["minecraft:bedrock"])), &event));
        assert!(!passes(Condition::Block(ids(&["minecraft:stone"])), &event));
    }

    #[test]
    fn never_fails() {
        assert!(!passes(Condition::Never(Key::Weather), &DropEvent::default()));
    }

    #[test]
    fn first_failure_stops_evaluation() {
        let conditions = [
            Condition::Light(range(Some(0), Some(20))),
            Condition::Player(true),
            Condition::Never(Key::Difficulty),
        ];
        let report =
            evaluate_detailed(&conditions, &DropEvent::default(), &DropQuery, &mut rng());
        assert!(!report.matched());
        assert_eq!(report.failed(), Some(Key::Player));
        assert_eq!(report.checked(), 2);
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn short_circuit_skips_random_draw() {
        let conditions = [Condition::Player(true), Condition::Random(0.5)];
        let event = DropEvent::default();
        let mut used = rng();
        let mut untouched = rng();
        assert!(!evaluate(&conditions, &event, &DropQuery, &mut used));
        assert_eq!(used.gen::<u64>(), untouched.gen::<u64>());
    }
}
