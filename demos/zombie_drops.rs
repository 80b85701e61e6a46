//! Load three loot rules and apply the first one that matches a zombie death.
//!
//! Run with `cargo run --example zombie_drops`.

use droprule::{
    Biome, BlockPos, DamageSource, Difficulty, Entity, EventQuery, ItemCatalog, JsonTagParser,
    LootRule, TempCategory, World,
};

const RULES: &str = r#"[
    {"mob": "minecraft:zombie", "player": true, "random": 0.5,
     "item": ["diamond", "emerald"], "itemcount": "1/1-2/2-3"},
    {"mob": "minecraft:zombie", "removeall": true, "item": "bone", "itemcount": "0-2"},
    {"mob": "minecraft:zombie", "weather": "blizzard", "item": "snowball"}
]"#;

struct Plains {
    biome: Biome,
}

impl World for Plains {
    fn world_time(&self) -> i64 {
        14_000
    }
    fn light_level(&self, _pos: BlockPos) -> i32 {
        3
    }
    fn local_difficulty(&self, _pos: BlockPos) -> f64 {
        1.2
    }
    fn spawn_point(&self) -> BlockPos {
        BlockPos::new(0, 64, 0)
    }
    fn is_raining(&self) -> bool {
        false
    }
    fn is_thundering(&self) -> bool {
        false
    }
    fn difficulty(&self) -> Difficulty {
        Difficulty::Normal
    }
    fn can_see_sky(&self, _pos: BlockPos) -> bool {
        true
    }
    fn dimension(&self) -> &str {
        "minecraft:overworld"
    }
    fn biome(&self, _pos: BlockPos) -> &Biome {
        &self.biome
    }
    fn block_id(&self, _pos: BlockPos) -> &str {
        "minecraft:grass"
    }
    fn is_in_structure(&self, _name: &str, _pos: BlockPos) -> bool {
        false
    }
}

struct Creature {
    id: &'static str,
    player: bool,
}

impl Entity for Creature {
    fn type_id(&self) -> &str {
        self.id
    }
    fn is_player(&self) -> bool {
        self.player
    }
    fn is_passive(&self) -> bool {
        false
    }
    fn is_hostile(&self) -> bool {
        !self.player
    }
    fn held_item(&self) -> Option<&str> {
        None
    }
}

struct Melee;

impl DamageSource for Melee {
    fn id(&self) -> &str {
        "player"
    }
    fn is_projectile(&self) -> bool {
        false
    }
    fn is_explosion(&self) -> bool {
        false
    }
    fn is_fire(&self) -> bool {
        false
    }
    fn is_magic(&self) -> bool {
        false
    }
}

struct Death {
    world: Plains,
    pos: BlockPos,
    victim: Creature,
    killer: Option<Creature>,
    looting: i32,
}

struct DeathQuery;

impl EventQuery<Death> for DeathQuery {
    type World = Plains;
    type Entity = Creature;
    type Source = Melee;

    fn world<'e>(&self, event: &'e Death) -> &'e Plains {
        &event.world
    }
    fn pos(&self, event: &Death) -> BlockPos {
        event.pos
    }
    fn entity<'e>(&self, event: &'e Death) -> &'e Creature {
        &event.victim
    }
    fn source<'e>(&self, _event: &'e Death) -> Option<&'e Melee> {
        Some(&Melee)
    }
    fn attacker<'e>(&self, event: &'e Death) -> Option<&'e Creature> {
        event.killer.as_ref()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    let catalog: ItemCatalog = ["minecraft:diamond", "minecraft:bone", "minecraft:snowball"]
        .into_iter()
        .collect();

    let documents: Vec<serde_json::Value> = serde_json::from_str(RULES)?;
    let rules = documents
        .into_iter()
        .map(|doc| LootRule::from_json(&doc.to_string(), &catalog, &JsonTagParser))
        .collect::<Result<Vec<_>, _>>()?;
    for rule in &rules {
        println!("{rule}");
    }

    let event = Death {
        world: Plains {
            biome: Biome {
                id: "minecraft:plains".into(),
                types: vec!["PLAINS".into()],
                temperature: TempCategory::Medium,
            },
        },
        pos: BlockPos::new(120, 66, -40),
        victim: Creature {
            id: "minecraft:zombie",
            player: false,
        },
        killer: Some(Creature {
            id: "minecraft:player",
            player: true,
        }),
        looting: 2,
    };

    let mut rng = rand::thread_rng();
    let Some(rule) = rules
        .iter()
        .find(|rule| rule.matches(&event, &DeathQuery, &mut rng))
    else {
        println!("no rule matched");
        return Ok(());
    };

    if rule.is_remove_all() {
        println!("clearing default drops");
    }
    for entry in rule.to_add_items() {
        let amount = entry.roll(event.looting, &mut rng);
        println!("drop {amount} x {}", entry.item());
    }
    Ok(())
}
