use crate::types::{AttributeMap, Bounds, Condition, Difficulty, Key, TempCategory, Weather};

/// Compile the condition keys of `map` into evaluation order.
///
/// Action keys are ignored. Unrecognized names for weather, temperature and
/// difficulty are logged and compiled to [`Condition::Never`].
pub(crate) fn compile(map: &AttributeMap) -> Vec<Condition> {
    let mut out = Vec::new();

    int_range(map, Key::MinTime, Key::MaxTime, Condition::Time, &mut out);
    int_range(map, Key::MinLight, Key::MaxLight, Condition::Light, &mut out);
    int_range(map, Key::MinHeight, Key::MaxHeight, Condition::Height, &mut out);
    float_range(
        map,
        Key::MinDifficulty,
        Key::MaxDifficulty,
        Condition::LocalDifficulty,
        &mut out,
    );
    float_range(
        map,
        Key::MinSpawnDist,
        Key::MaxSpawnDist,
        Condition::SpawnDistance,
        &mut out,
    );
    if let Some(p) = map.get_float(Key::Random) {
        out.push(Condition::Random(p));
    }

    flag(map, Key::InBuilding, Condition::InBuilding, &mut out);
    flag(map, Key::InCity, Condition::InCity, &mut out);
    flag(map, Key::InStreet, Condition::InStreet, &mut out);
    flag(map, Key::InSphere, Condition::InSphere, &mut out);
    if let Some(stage) = map.get_str(Key::GameStage) {
        out.push(Condition::GameStage(stage.to_owned()));
    }
    flag(map, Key::Passive, Condition::Passive, &mut out);
    flag(map, Key::Hostile, Condition::Hostile, &mut out);
    flag(map, Key::SeeSky, Condition::SeeSky, &mut out);

    named(map, Key::Weather, Weather::from_name, Condition::Weather, &mut out);
    named(
        map,
        Key::TempCategory,
        TempCategory::from_name,
        Condition::Temperature,
        &mut out,
    );
    named(
        map,
        Key::Difficulty,
        Difficulty::from_name,
        Condition::Difficulty,
        &mut out,
    );
    if let Some(structure) = map.get_str(Key::Structure) {
        out.push(Condition::Structure(structure.to_owned()));
    }

    flag(map, Key::Player, Condition::Player, &mut out);
    flag(map, Key::RealPlayer, Condition::RealPlayer, &mut out);
    flag(map, Key::FakePlayer, Condition::FakePlayer, &mut out);
    flag(map, Key::Projectile, Condition::Projectile, &mut out);
    flag(map, Key::Explosion, Condition::Explosion, &mut out);
    flag(map, Key::Fire, Condition::Fire, &mut out);
    flag(map, Key::Magic, Condition::Magic, &mut out);

    id_set(map, Key::Mob, Condition::Mob, &mut out);
    id_set(map, Key::Mod, Condition::Mod, &mut out);
    id_set(map, Key::Block, Condition::Block, &mut out);
    id_set(map, Key::Biome, Condition::Biome, &mut out);
    id_set(map, Key::BiomeType, Condition::BiomeType, &mut out);
    id_set(map, Key::Dimension, Condition::Dimension, &mut out);
    id_set(map, Key::Source, Condition::Source, &mut out);
    id_set(map, Key::HeldItem, Condition::HeldItem, &mut out);

    out
}

fn int_range(
    map: &AttributeMap,
    min: Key,
    max: Key,
    make: fn(Bounds<i64>) -> Condition,
    out: &mut Vec<Condition>,
) {
    let bounds = Bounds {
        min: map.get_int(min),
        max: map.get_int(max),
    };
    if bounds.min.is_some() || bounds.max.is_some() {
        out.push(make(bounds));
    }
}

fn float_range(
    map: &AttributeMap,
    min: Key,
    max: Key,
    make: fn(Bounds<f64>) -> Condition,
    out: &mut Vec<Condition>,
) {
    let bounds = Bounds {
        min: map.get_float(min),
        max: map.get_float(max),
    };
    if bounds.min.is_some() || bounds.max.is_some() {
        out.push(make(bounds));
    }
}

fn flag(map: &AttributeMap, key: Key, make: fn(bool) -> Condition, out: &mut Vec<Condition>) {
    if let Some(expected) = map.get_bool(key) {
        out.push(make(expected));
    }
}

fn named<T>(
    map: &AttributeMap,
    key: Key,
    lookup: fn(&str) -> Option<T>,
    make: fn(T) -> Condition,
    out: &mut Vec<Condition>,
) {
    let Some(name) = map.get_str(key) else {
        return;
    };
    match lookup(name) {
        Some(value) => out.push(make(value)),
        None => {
            tracing::warn!(
                key = key.name(),
                name,
                "unknown value in loot rule, condition can never match"
            );
            out.push(Condition::Never(key));
        }
    }
}

fn id_set(
    map: &AttributeMap,
    key: Key,
    make: fn(Vec<String>) -> Condition,
    out: &mut Vec<Condition>,
) {
    if map.has(key) {
        let ids = map.get_strs(key).into_iter().map(str::to_owned).collect();
        out.push(make(ids));
    }
}
