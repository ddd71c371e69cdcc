//! Model-checking analysis from formula and model to verdict: the
//! orchestrator sequencing tableau, GBA, degeneralisation, lifting,
//! product and Nested DFS.

pub mod nested_dfs;

use std::collections::BTreeSet;

use tracing::debug;

use crate::automaton::lift::ModelAutomaton;
use crate::automaton::{Buchi, FormulaAutomaton, Product};
use crate::counterexample::{CheckResult, Lasso};
use crate::error::CheckError;
use crate::formula::{Formula, UnaryOp};
use crate::kripke::Kripke;
use crate::proposition::{Pid, Proposition};

/// Decide whether every infinite execution of `model` satisfies `phi`.
///
/// Negates `phi`, builds its Büchi automaton, lifts `model` to a Büchi
/// automaton of its own, takes their product, and searches it for an
/// accepting lasso with Nested DFS. A found lasso is a witness run of
/// `model` that violates `phi`; its absence means `phi` holds on every
/// run.
pub fn check<P, K>(phi: Formula<P>, model: &K) -> Result<CheckResult<K::State>, CheckError>
where
    P: Proposition,
    K: Kripke,
{
    validate_kripke(model)?;

    if let Some((pid, want_true)) = as_atomic_literal(&phi) {
        debug!(pid = %pid, want_true, "check: fast path for atomic literal");
        return Ok(fast_path_atom(pid, want_true, model));
    }

    let ap = atomic_propositions(&phi, model);

    let psi = phi.not().nnf();
    debug!(?psi, "check: negated formula in NNF");

    let formula_automaton = FormulaAutomaton::build(&psi);
    debug!(
        states = formula_automaton.initial_states().len(),
        "check: tableau/gba/degeneralise produced formula automaton"
    );

    let model_automaton = ModelAutomaton::new(model, ap);
    debug!("check: model lifted to Büchi automaton");

    let product = Product::build(&formula_automaton, &model_automaton);
    debug!(states = product.states.len(), "check: product constructed");

    match nested_dfs::find_accepting_lasso(&product) {
        Some((prefix, cycle)) => {
            debug!(
                prefix_len = prefix.len(),
                cycle_len = cycle.len(),
                "check: nested DFS found an accepting lasso"
            );
            let project = |indices: Vec<usize>| -> Vec<K::State> {
                indices.into_iter().map(|i| product.states[i].1.clone()).collect()
            };
            Ok(CheckResult::Fails(Lasso::new(project(prefix), project(cycle))))
        }
        None => {
            debug!("check: nested DFS found no accepting lasso");
            Ok(CheckResult::Holds)
        }
    }
}

/// `Some((pid, true))` for `atom(p)`, `Some((pid, false))` for `¬atom(p)`,
/// `None` otherwise.
fn as_atomic_literal<P: Proposition>(phi: &Formula<P>) -> Option<(Pid, bool)> {
    match phi {
        Formula::Atom(p) => Some((p.id().clone(), true)),
        Formula::Unary(UnaryOp::Not, inner) => match inner.as_ref() {
            Formula::Atom(p) => Some((p.id().clone(), false)),
            _ => None,
        },
        _ => None,
    }
}

/// Decide an atomic literal directly against the model's initial-state
/// labels, without building any automaton.
///
/// Convention (an explicit design decision): with no initial states the
/// check holds vacuously, since there is no run to
/// violate it — consistent with the general pipeline, where an empty
/// initial set also yields no reachable product state and hence no
/// counterexample. On failure the witness is `(prefix: [], cycle: [s])`:
/// the violation is already decided by `s` alone, so the "cycle" is `s`
/// repeating forever rather than a duplicated (prefix, cycle) pair.
fn fast_path_atom<K: Kripke>(pid: Pid, want_true: bool, model: &K) -> CheckResult<K::State> {
    for s in model.initial_states() {
        let present = model.labels(&s).contains(&pid);
        if present != want_true {
            return CheckResult::Fails(Lasso::new(Vec::new(), vec![s]));
        }
    }
    CheckResult::Holds
}

/// `AP = (atoms labelled anywhere in the model) ∪ (atoms occurring in phi)`.
fn atomic_propositions<P: Proposition, K: Kripke>(phi: &Formula<P>, model: &K) -> BTreeSet<Pid> {
    let mut ap: BTreeSet<Pid> = phi.atoms().into_iter().collect();
    for s in model.all_states() {
        ap.extend(model.labels(&s));
    }
    ap
}

/// Verify the structural invariants every `Kripke` implementor must
/// uphold: initial states and every successor must lie within
/// `all_states()`. A violation is a user-input error, surfaced directly
/// rather than wrapped as an internal-processing error.
fn validate_kripke<K: Kripke>(model: &K) -> Result<(), CheckError> {
    let all: BTreeSet<K::State> = model.all_states().into_iter().collect();
    for s in model.initial_states() {
        if !all.contains(&s) {
            return Err(CheckError::InvalidKripkeStructure(format!(
                "initial state {s:?} is not in all_states()"
            )));
        }
    }
    for s in &all {
        for succ in model.successors(s) {
            if !all.contains(&succ) {
                return Err(CheckError::InvalidKripkeStructure(format!(
                    "state {s:?} has successor {succ:?} outside all_states()"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kripke::ExplicitKripke;
    use crate::proposition::test_support::NamedProp;

    fn p(name: &str) -> Formula<NamedProp> {
        Formula::atom(NamedProp::new(name))
    }

    fn three_cycle() -> ExplicitKripke {
        ExplicitKripke::builder()
            .state("s0", ["p".to_string()])
            .state("s1", ["q".to_string()])
            .state("s2", ["p".to_string(), "r".to_string()])
            .initial("s0")
            .transition("s0", "s1")
            .transition("s1", "s2")
            .transition("s2", "s0")
            .build()
            .unwrap()
    }

    #[test]
    fn s1_gfp_holds_on_the_three_cycle() {
        let model = three_cycle();
        let phi = p("p").finally().globally();
        let result = check(phi, &model).unwrap();
        assert!(result.holds());
    }

    #[test]
    fn s2_gp_fails_with_s1_in_the_cycle() {
        let model = three_cycle();
        let phi = p("p").globally();
        let result = check(phi, &model).unwrap();
        let cex = result.counterexample().expect("G p should fail");
        assert!(cex.cycle.contains(&"s1".to_string()));
    }

    #[test]
    fn s3_fq_holds_on_the_three_cycle() {
        let model = three_cycle();
        let phi = p("q").finally();
        let result = check(phi, &model).unwrap();
        assert!(result.holds());
    }

    #[test]
    fn s4_p_until_r_fails_without_r_ever_becoming_true() {
        let model = ExplicitKripke::builder()
            .state("s0", ["p".to_string()])
            .state("s1", [])
            .initial("s0")
            .transition("s0", "s1")
            .transition("s1", "s0")
            .build()
            .unwrap();
        let phi = p("p").until(p("r"));
        let result = check(phi, &model).unwrap();
        assert!(!result.holds());
    }

    #[test]
    fn s5_single_self_loop_state() {
        let model = ExplicitKripke::builder()
            .state("s0", ["p".to_string()])
            .initial("s0")
            .transition("s0", "s0")
            .build()
            .unwrap();

        let holds_g_p = check(p("p").globally(), &model).unwrap();
        assert!(holds_g_p.holds());

        let fails_f_q = check(p("q").finally(), &model).unwrap();
        let cex = fails_f_q.counterexample().expect("F q should fail");
        assert_eq!(cex.cycle, vec!["s0".to_string()]);
    }

    #[test]
    fn s6_branching_acceptance() {
        let model = ExplicitKripke::builder()
            .state("s0", ["p".to_string()])
            .state("s1a", ["p".to_string()])
            .state("s1b", ["p".to_string()])
            .state("s2a", ["q".to_string()])
            .state("s2b", ["q".to_string()])
            .initial("s0")
            .transition("s0", "s1a")
            .transition("s0", "s1b")
            .transition("s1a", "s2a")
            .transition("s1b", "s2b")
            .transition("s2a", "s2a")
            .transition("s2b", "s2b")
            .build()
            .unwrap();

        let holds_p_until_q = check(p("p").until(p("q")), &model).unwrap();
        assert!(holds_p_until_q.holds());

        let fails_x_not_p = check(p("p").not().next(), &model).unwrap();
        assert!(!fails_x_not_p.holds());
    }

    #[test]
    fn fast_path_atom_succeeds_when_every_initial_state_has_the_label() {
        let model = three_cycle();
        let result = check(p("p"), &model).unwrap();
        assert!(result.holds());
    }

    #[test]
    fn fast_path_negated_atom_fails_with_no_prefix() {
        let model = three_cycle();
        let result = check(p("p").not(), &model).unwrap();
        let cex = result.counterexample().expect("¬p should fail at s0");
        assert!(cex.prefix.is_empty());
        assert_eq!(cex.cycle, vec!["s0".to_string()]);
    }

    #[test]
    fn tautology_and_contradiction() {
        let model = three_cycle();
        assert!(check(Formula::<NamedProp>::tt(), &model).unwrap().holds());
        assert!(!check(Formula::<NamedProp>::ff(), &model).unwrap().holds());
    }

    #[test]
    fn invalid_kripke_structure_is_rejected() {
        struct BrokenKripke;
        impl Kripke for BrokenKripke {
            type State = String;
            fn all_states(&self) -> Vec<String> {
                vec!["s0".to_string()]
            }
            fn initial_states(&self) -> Vec<String> {
                vec!["ghost".to_string()]
            }
            fn successors(&self, _state: &String) -> Vec<String> {
                vec![]
            }
            fn labels(&self, _state: &String) -> BTreeSet<Pid> {
                BTreeSet::new()
            }
        }
        let err = check(p("p"), &BrokenKripke).unwrap_err();
        assert!(matches!(err, CheckError::InvalidKripkeStructure(_)));
    }
}
