use std::sync::{Arc, OnceLock};

use crate::types::{CountResolver, ItemDescriptor, ItemRegistry, LootEntry, Tag, TagParser};

/// The resolver every removal entry shares.
fn remove_count() -> Arc<CountResolver> {
    static CONSTANT_ONE: OnceLock<Arc<CountResolver>> = OnceLock::new();
    Arc::clone(CONSTANT_ONE.get_or_init(|| Arc::new(CountResolver::Constant(1))))
}

/// Resolve an add action into entries sharing one count resolver.
///
/// Unknown names are logged and dropped. A bad tag payload is logged once and
/// the items are kept untagged.
pub(crate) fn resolve_add<I, T>(
    names: &[&str],
    tag: Option<&str>,
    count: Option<&str>,
    registry: &I,
    tags: &T,
) -> Vec<LootEntry>
where
    I: ItemRegistry + ?Sized,
    T: TagParser + ?Sized,
{
    let count = Arc::new(CountResolver::parse(count));
    let items = resolve_items(names, registry);
    if items.is_empty() {
        return Vec::new();
    }

    let tag = tag.and_then(|payload| parse_tag(payload, tags));

    items
        .into_iter()
        .map(|item| {
            let item = match &tag {
                Some(tag) => item.with_tag(tag.clone()),
                None => item,
            };
            LootEntry::new(item, Arc::clone(&count))
        })
        .collect()
}

/// Resolve a remove action. Every entry counts as exactly one.
pub(crate) fn resolve_remove<I>(names: &[&str], registry: &I) -> Vec<LootEntry>
where
    I: ItemRegistry + ?Sized,
{
    resolve_items(names, registry)
        .into_iter()
        .map(|item| LootEntry::new(item, remove_count()))
        .collect()
}

fn resolve_items<I>(names: &[&str], registry: &I) -> Vec<ItemDescriptor>
where
    I: ItemRegistry + ?Sized,
{
    names
        .iter()
        .filter_map(|name| {
            let item = registry.resolve(name);
            if item.is_none() {
                tracing::error!(item = *name, "unknown item in loot rule");
            }
            item
        })
        .collect()
}

fn parse_tag<T>(payload: &str, tags: &T) -> Option<Tag>
where
    T: TagParser + ?Sized,
{
    match tags.parse(payload) {
        Ok(tag) => Some(tag),
        Err(error) => {
            tracing::error!(payload, %error, "bad item tag in loot rule, items stay untagged");
            None
        }
    }
}
