use crate::collections::{collection_claims, CollectionRegistry, OutputCollection};
use rdf_loom_common::GraphIndex;
use rdf_loom_model::{Node, Triple};
use rustc_hash::FxHashSet;
use tracing::trace;

/// Removes the collections that cannot be written inline without losing triples and returns the
/// claimed triples of the remaining collections.
///
/// A collection is written inline exactly where its key is mentioned outside the collection. This
/// requires that the key is mentioned by exactly one such triple. In addition, the remaining
/// collections must not depend on each other in a cycle.
pub(super) fn settle_collections(
    graph: &dyn GraphIndex,
    collections: &mut CollectionRegistry,
) -> FxHashSet<Triple> {
    let mut removable = collections
        .iter()
        .filter(|(key, collection)| !can_be_inlined(graph, key, collection))
        .map(|(key, _)| key.clone())
        .collect::<Vec<_>>();
    for key in &removable {
        collections.remove(key);
    }

    removable = cyclic_keys(collections);
    for key in &removable {
        collections.remove(key);
    }

    collections
        .iter()
        .flat_map(|(_, collection)| collection_claims(collection))
        .collect()
}

fn can_be_inlined(graph: &dyn GraphIndex, key: &Node, collection: &OutputCollection) -> bool {
    let claims = collection_claims(collection)
        .into_iter()
        .collect::<FxHashSet<_>>();
    let external = graph
        .triples_mentioning(key)
        .filter(|t| !claims.contains(t))
        .collect::<Vec<_>>();
    let [link] = external.as_slice() else {
        trace!(%key, mentions = external.len(), "Collection is not mentioned exactly once");
        return false;
    };

    if collection.is_explicit() && collection.is_empty() {
        return (link.subject() == key) != (link.object() == key);
    }
    if link.object() != key || link.subject() == key {
        return false;
    }

    if collection.is_explicit() {
        collection
            .triples()
            .iter()
            .all(|t| t.subject() == key && t.object() != key)
    } else {
        collection.triples().iter().skip(1).all(|first| {
            graph
                .triples_mentioning(first.subject())
                .all(|t| claims.contains(&t))
        })
    }
}

/// Returns the keys of the collections that can reach themselves through the keys mentioned as
/// objects of their triples.
fn cyclic_keys(collections: &CollectionRegistry) -> Vec<Node> {
    let dependencies = |key: &Node| -> Vec<Node> {
        collections
            .get(key)
            .into_iter()
            .flat_map(OutputCollection::items)
            .filter(|item| collections.contains_key(item))
            .cloned()
            .collect()
    };

    collections
        .keys()
        .filter(|key| {
            let mut visited = FxHashSet::default();
            let mut stack = dependencies(key);
            while let Some(next) = stack.pop() {
                if &next == *key {
                    return true;
                }
                if visited.insert(next.clone()) {
                    stack.extend(dependencies(&next));
                }
            }
            false
        })
        .cloned()
        .collect()
}
