//! Minimizes a deterministic automaton by partition refinement.

use std::collections::HashMap;

use automata_runtime::{Dfa, StateName};
use indexmap::IndexMap;
use log::{debug, trace};

/// An ordered group of states believed to be equivalent.
type Partition<'a> = Vec<&'a StateName>;

/// Maps every partitioned state to the index of its partition.
fn membership<'a>(partitions: &[Partition<'a>]) -> HashMap<&'a StateName, usize> {
    partitions
        .iter()
        .enumerate()
        .flat_map(|(idx, partition)| partition.iter().map(move |&state| (state, idx)))
        .collect()
}

/// Splits every partition by the partitions its members transition into,
/// returning `None` once no partition splits.
fn refine<'a>(dfa: &Dfa, partitions: &[Partition<'a>]) -> Option<Vec<Partition<'a>>> {
    let membership = membership(partitions);
    let mut refined = Vec::with_capacity(partitions.len());
    let mut changed = false;

    for partition in partitions {
        let mut groups: IndexMap<Vec<Option<usize>>, Partition<'a>> = IndexMap::new();

        for &state in partition {
            let signature = dfa
                .alphabet()
                .iter()
                .map(|&symbol| {
                    dfa.transition(state, symbol)
                        .and_then(|target| membership.get(target).copied())
                })
                .collect::<Vec<_>>();

            groups.entry(signature).or_default().push(state);
        }

        if groups.len() > 1 {
            trace!(
                "split partition {:?} into {} groups",
                partition.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
                groups.len()
            );
            changed = true;
        }

        refined.extend(groups.into_values());
    }

    changed.then_some(refined)
}

/// Produces the smallest deterministic automaton recognizing the same
/// language as `dfa`.
///
/// Unreachable states are discarded first. Reachable states are then split
/// into accepting and rejecting partitions and refined until no partition
/// splits. Each final partition becomes one state, named after its first
/// member. The names carry no meaning beyond identifying the partition.
///
/// # Example
///
/// ```
/// use automata_compiler::minimize::minimize;
/// use automata_runtime::*;
///
/// // two interchangeable accepting states looping on `a`.
/// let mut dfa = Dfa::new(vec!['a'], StateName::from("A"));
/// dfa.insert_state_mut(StateName::from("A"), true);
/// dfa.insert_state_mut(StateName::from("B"), true);
/// dfa.insert_transition_mut(StateName::from("A"), 'a', StateName::from("B"));
/// dfa.insert_transition_mut(StateName::from("B"), 'a', StateName::from("A"));
///
/// let minimized = minimize(&dfa);
///
/// assert_eq!(1, minimized.state_count());
/// assert!(simulate_dfa(&minimized, "aaa"));
/// ```
pub fn minimize(dfa: &Dfa) -> Dfa {
    let (accepting, rejecting): (Partition, Partition) = dfa
        .reachable_states()
        .into_iter()
        .partition(|state| dfa.is_accepting(state));

    let mut partitions: Vec<Partition> = [accepting, rejecting]
        .into_iter()
        .filter(|partition| !partition.is_empty())
        .collect();

    let mut passes = 1;
    while let Some(refined) = refine(dfa, &partitions) {
        trace!(
            "refinement pass {} grew partitions from {} to {}",
            passes,
            partitions.len(),
            refined.len()
        );
        partitions = refined;
        passes += 1;
    }

    let membership = membership(&partitions);
    let representatives: Vec<&StateName> = partitions
        .iter()
        .filter_map(|partition| partition.first().copied())
        .collect();
    let representative_of = |state: &StateName| {
        membership
            .get(state)
            .and_then(|&idx| representatives.get(idx))
            .map(|&rep| rep.clone())
    };

    let start = representative_of(dfa.start()).unwrap_or_else(|| dfa.start().clone());
    let mut minimized = Dfa::new(dfa.alphabet().to_vec(), start);

    for &rep in &representatives {
        minimized.insert_state_mut(rep.clone(), dfa.is_accepting(rep));
    }

    for &rep in &representatives {
        for &symbol in dfa.alphabet() {
            if let Some(target) = dfa.transition(rep, symbol).and_then(representative_of) {
                minimized.insert_transition_mut(rep.clone(), symbol, target);
            }
        }
    }

    debug!(
        "minimized {} states to {} in {} refinement passes",
        dfa.state_count(),
        minimized.state_count(),
        passes
    );

    minimized
}
