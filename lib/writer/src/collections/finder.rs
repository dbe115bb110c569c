use crate::collections::{
    CollectionContext, CollectionRegistry, CollectionSearchMode, OutputCollection,
};
use crate::error::CollectionError;
use rdf_loom_common::GraphIndex;
use rdf_loom_model::vocab::{rdf_first, rdf_nil, rdf_rest};
use rdf_loom_model::{Node, Triple};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Finds the collections of the graph and claims their triples.
///
/// Runs the phases of the analysis in order:
/// 1. [find_implicit_collections] (unless `mode` excludes implicit collections)
/// 2. [find_explicit_collections] (unless `mode` excludes explicit collections)
/// 3. [remove_ineligible_collections]
/// 4. [remove_cyclic_collections]
/// 5. [claim_collection_triples]
/// 6. [revoke_overused_collections]
///
/// If an error is returned, the state of `context` is unspecified and should be discarded.
pub fn find_collections(
    context: &mut CollectionContext<'_>,
    mode: CollectionSearchMode,
) -> Result<(), CollectionError> {
    if mode.includes_implicit() {
        find_implicit_collections(context)?;
    }
    if mode.includes_explicit() {
        find_explicit_collections(context);
    }
    debug!(
        collections = context.collections.len(),
        ?mode,
        "Found candidate collections"
    );

    remove_ineligible_collections(context);
    remove_cyclic_collections(context);
    claim_collection_triples(context);
    revoke_overused_collections(context);
    debug!(
        collections = context.collections.len(),
        claimed = context.claimed.len(),
        "Finished collection analysis"
    );
    Ok(())
}

/// Finds RDF lists that can be written as `( a b c )`.
///
/// Every list is found by walking backward from a tail (a subject of `rdf:rest rdf:nil`) to its
/// head. The list is registered with its head as key. A list is skipped if one of its list nodes
/// is not a blank node, lacks an `rdf:first` triple, or if the chain branches or loops.
///
/// Returns an error if a list node has multiple `rdf:first` triples. A named tail is skipped
/// without counting its `rdf:first` triples.
pub fn find_implicit_collections(
    context: &mut CollectionContext<'_>,
) -> Result<(), CollectionError> {
    let graph = context.graph();
    let first = rdf_first();
    let rest = rdf_rest();
    let tails = graph
        .triples_with_predicate_object(&rest, &rdf_nil())
        .map(|triple| triple.subject().clone())
        .collect::<Vec<_>>();

    for tail in tails {
        let Some(triples) = walk_list(graph, &tail, &first, &rest)? else {
            continue;
        };
        let Some(head) = triples.first().map(|t| t.subject().clone()) else {
            continue;
        };
        if context.collections.contains_key(&head) {
            trace!(%head, "Skipping list with an already registered head");
            continue;
        }
        trace!(%head, len = triples.len(), "Found implicit collection");
        context
            .collections
            .insert(head, OutputCollection::implicit(triples));
    }
    Ok(())
}

/// Walks the list that ends with `tail` toward its head. Returns the `rdf:first` triples from
/// head to tail, or [None] if the list cannot be compressed.
fn walk_list(
    graph: &dyn GraphIndex,
    tail: &Node,
    first: &Node,
    rest: &Node,
) -> Result<Option<Vec<Triple>>, CollectionError> {
    let mut triples = VecDeque::new();
    let mut visited = FxHashSet::default();
    let mut current = tail.clone();
    loop {
        // Named list nodes before the tail are only rejected after counting their rdf:first
        // triples.
        let is_tail = triples.is_empty();
        if is_tail && !current.is_blank() {
            trace!(node = %current, "List ends with a named list node");
            return Ok(None);
        }
        if !visited.insert(current.clone()) {
            trace!(node = %current, "List contains a loop");
            return Ok(None);
        }

        let mut firsts = graph.triples_with_subject_predicate(&current, first);
        let Some(first_triple) = firsts.next() else {
            trace!(node = %current, "List node has no rdf:first triple");
            return Ok(None);
        };
        if firsts.next().is_some() {
            return Err(CollectionError::MultipleFirsts { node: current });
        }
        if !current.is_blank() {
            trace!(node = %current, "List contains a named list node");
            return Ok(None);
        }
        triples.push_front(first_triple);

        let mut previous = graph.triples_with_predicate_object(rest, &current);
        let Some(previous_triple) = previous.next() else {
            break;
        };
        if previous.next().is_some() {
            trace!(node = %current, "List branches");
            return Ok(None);
        }
        current = previous_triple.subject().clone();
    }
    Ok(Some(triples.into()))
}

/// Finds blank nodes that can be written as `[ p o ]` or `[]`.
///
/// Blank nodes that are already registered as keys are skipped. The candidate triples of a blank
/// node are all triples that mention it, except `rdf:first` and `rdf:rest` triples. A blank node
/// with at most one candidate triple becomes an empty collection. Otherwise, if the blank node is
/// the object of exactly one triple, that triple links the collection to the rest of the graph
/// and is not part of the collection.
pub fn find_explicit_collections(context: &mut CollectionContext<'_>) {
    let graph = context.graph();
    let first = rdf_first();
    let rest = rdf_rest();

    for node in graph.blank_nodes() {
        if context.collections.contains_key(&node) {
            continue;
        }

        let mut triples = graph
            .triples_mentioning(&node)
            .filter(|t| t.predicate() != &first && t.predicate() != &rest)
            .collect::<Vec<_>>();
        if triples.len() <= 1 {
            context
                .collections
                .insert(node, OutputCollection::explicit(Vec::new()));
            continue;
        }

        if graph.triples_with_object(&node).count() == 1 {
            triples.retain(|t| t.object() != &node);
        }
        trace!(%node, len = triples.len(), "Found explicit collection");
        context
            .collections
            .insert(node, OutputCollection::explicit(triples));
    }
}

/// Removes collections that cannot be written with compact syntax without losing information.
///
/// - An explicit collection is removed if it is non-empty and contains every triple that mentions
///   its key.
/// - An implicit collection with `n` list nodes is kept only if its head is mentioned by exactly
///   `3n` triples. Only single-node lists that are referenced once meet this condition.
pub fn remove_ineligible_collections(context: &mut CollectionContext<'_>) {
    if context.collections.is_empty() {
        return;
    }

    let graph = context.graph();
    let ineligible = context
        .collections
        .iter()
        .filter(|(key, collection)| {
            if collection.is_explicit() {
                !collection.is_empty() && collection.len() == graph.count_mentions(key)
            } else {
                let mentions = graph.count_mentions(key);
                let expected = (3 * collection.len()).saturating_sub(1);
                mentions == expected || mentions.checked_sub(expected) != Some(1)
            }
        })
        .map(|(key, _)| key.clone())
        .collect::<Vec<_>>();

    for key in &ineligible {
        trace!(%key, "Removing ineligible collection");
        context.collections.remove(key);
    }
    debug!(removed = ineligible.len(), "Removed ineligible collections");
}

/// Removes collections that depend on themselves.
///
/// A collection depends on the registered collections whose keys appear as objects of its
/// triples. The dependency lists are built in the order of descending collection size and each
/// list is extended once with the current lists of its dependencies. A collection is removed if
/// its extended list contains its own key. Cycles with more than two hops may therefore remain.
pub fn remove_cyclic_collections(context: &mut CollectionContext<'_>) {
    if context.collections.is_empty() {
        return;
    }

    let mut by_size = context.collections.iter().collect::<Vec<_>>();
    by_size.sort_by(|(_, a), (_, b)| b.len().cmp(&a.len()));

    let mut dependencies: Vec<(Node, Vec<Node>)> = Vec::new();
    for (key, collection) in by_size {
        let depends_on = collection
            .items()
            .filter(|o| o.is_blank() && *o != key && context.collections.contains_key(o))
            .cloned()
            .collect::<Vec<_>>();
        if !depends_on.is_empty() {
            dependencies.push((key.clone(), depends_on));
        }
    }
    let positions = dependencies
        .iter()
        .enumerate()
        .map(|(i, (key, _))| (key.clone(), i))
        .collect::<FxHashMap<_, _>>();

    let mut cyclic = Vec::new();
    for i in 0..dependencies.len() {
        let direct = dependencies[i].1.clone();
        for dependency in &direct {
            if let Some(&j) = positions.get(dependency) {
                let transitive = dependencies[j].1.clone();
                dependencies[i].1.extend(transitive);
            }
        }
        let (key, depends_on) = &dependencies[i];
        if depends_on.contains(key) {
            cyclic.push(key.clone());
        }
    }

    for key in &cyclic {
        trace!(%key, "Removing cyclic collection");
        context.collections.remove(key);
    }
    debug!(removed = cyclic.len(), "Removed cyclic collections");
}

/// Claims the triples that are written as part of the registered collections.
///
/// See [collection_claims] for the claimed triples of a single collection.
pub fn claim_collection_triples(context: &mut CollectionContext<'_>) {
    if context.collections.is_empty() {
        return;
    }
    context.claimed = claims_of_registry(&context.collections);
}

/// Revokes explicit collections whose key is still mentioned by too many unclaimed triples.
///
/// An explicit collection is revoked if more than `len + 1` unclaimed triples mention its key.
/// Afterward, the claimed triples are recomputed from the remaining collections.
pub fn revoke_overused_collections(context: &mut CollectionContext<'_>) {
    if context.collections.is_empty() {
        return;
    }

    let graph = context.graph();
    let overused = context
        .collections
        .iter()
        .filter(|(key, collection)| {
            if !collection.is_explicit() {
                return false;
            }
            let unclaimed = graph
                .triples_mentioning(key)
                .filter(|t| !context.claimed.contains(t))
                .count();
            unclaimed > collection.len() + 1
        })
        .map(|(key, _)| key.clone())
        .collect::<Vec<_>>();
    if overused.is_empty() {
        return;
    }

    for key in &overused {
        trace!(%key, "Revoking overused collection");
        context.collections.remove(key);
    }
    context.claimed = claims_of_registry(&context.collections);
    debug!(revoked = overused.len(), "Revoked overused collections");
}

/// Returns the triples that are written as part of `collection`.
///
/// An explicit collection claims its triples. An implicit collection claims its `rdf:first`
/// triples and the `rdf:rest` triples that link its list nodes (including the final
/// `rdf:rest rdf:nil` triple).
pub fn collection_claims(collection: &OutputCollection) -> Vec<Triple> {
    if collection.is_explicit() {
        return collection.triples().to_vec();
    }

    let rest = rdf_rest();
    let triples = collection.triples();
    let mut claims = Vec::with_capacity(2 * triples.len());
    for (i, triple) in triples.iter().enumerate() {
        claims.push(triple.clone());
        let next = triples
            .get(i + 1)
            .map_or_else(rdf_nil, |t| t.subject().clone());
        claims.push(Triple::new_unchecked(
            triple.subject().clone(),
            rest.clone(),
            next,
        ));
    }
    claims
}

fn claims_of_registry(registry: &CollectionRegistry) -> FxHashSet<Triple> {
    registry
        .iter()
        .flat_map(|(_, collection)| collection_claims(collection))
        .collect()
}
