//! Filename collision resolution
//!
//! Uploads keep the client's filename as the object key, so two uploads of
//! `report.csv` would silently overwrite each other. Before writing, the
//! upload path asks this module for an available name: the desired name is
//! probed against the store, and on collision a numeric suffix is inserted
//! before the extension (`report-1.csv`, `report-2.csv`, ...) until a free
//! name is found.
//!
//! Resolution is a pure decision over the existence oracle: nothing is
//! reserved or written here. A concurrent writer can still claim the
//! returned name between the final probe and the caller's write; callers
//! own that window.

use std::future::Future;

use super::StorageError;

/// Errors from name resolution
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The desired name is empty
    #[error("desired object name is empty")]
    InvalidName,

    /// Every candidate up to the probe budget was taken
    #[error("no available name after {attempts} probes")]
    Exhausted {
        /// Number of existence probes issued
        attempts: usize,
    },

    /// The existence probe itself failed; propagated without retry
    #[error("existence probe failed: {0}")]
    Oracle(#[from] StorageError),
}

/// Find an available object name, probing sequentially.
///
/// The candidate sequence is `desired`, then `"{stem}-{n}.{ext}"` for
/// n = 1, 2, ... where the split is on the *last* dot: `a.b.mp4` becomes
/// `a.b-1.mp4`. A name with no dot (or only a leading dot) has an empty
/// extension and produces `"{name}-{n}"` candidates.
///
/// `max_attempts` bounds the total number of oracle probes; exceeding it
/// fails with [`ResolveError::Exhausted`] rather than looping forever
/// against a store that answers "taken" for everything.
///
/// Probes are issued one at a time; each answer is awaited before the
/// next candidate is derived.
pub async fn resolve_available_name<F, Fut>(
    desired: &str,
    max_attempts: usize,
    mut exists: F,
) -> Result<String, ResolveError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, StorageError>>,
{
    if desired.is_empty() {
        return Err(ResolveError::InvalidName);
    }
    if max_attempts == 0 {
        return Err(ResolveError::Exhausted { attempts: 0 });
    }

    if !exists(desired.to_string()).await? {
        return Ok(desired.to_string());
    }

    let (stem, extension) = split_extension(desired);
    for counter in 1..max_attempts {
        let candidate = match extension {
            Some(ext) => format!("{}-{}.{}", stem, counter, ext),
            None => format!("{}-{}", stem, counter),
        };
        if !exists(candidate.clone()).await? {
            return Ok(candidate);
        }
    }

    Err(ResolveError::Exhausted {
        attempts: max_attempts,
    })
}

/// Split a name into stem and extension on the last dot.
///
/// Interior dots stay in the stem. Names without a dot, and dotfiles like
/// `.gitignore`, are all stem.
fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    /// Oracle that answers from a script and counts probes
    struct ScriptedOracle {
        answers: RefCell<VecDeque<bool>>,
        calls: Cell<usize>,
        probed: RefCell<Vec<String>>,
    }

    impl ScriptedOracle {
        fn new(answers: &[bool]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().copied().collect()),
                calls: Cell::new(0),
                probed: RefCell::new(Vec::new()),
            }
        }

        fn probe(&self, name: String) -> impl Future<Output = Result<bool, StorageError>> {
            self.calls.set(self.calls.get() + 1);
            self.probed.borrow_mut().push(name);
            let answer = self.answers.borrow_mut().pop_front().unwrap_or(false);
            async move { Ok(answer) }
        }
    }

    #[tokio::test]
    async fn free_name_is_returned_unchanged_on_first_probe() {
        let oracle = ScriptedOracle::new(&[false]);
        let name = resolve_available_name("clip.mp4", 10_000, |n| oracle.probe(n))
            .await
            .unwrap();
        assert_eq!(name, "clip.mp4");
        assert_eq!(oracle.calls.get(), 1);
    }

    #[tokio::test]
    async fn two_collisions_resolve_to_suffix_two_after_three_probes() {
        let oracle = ScriptedOracle::new(&[true, true, false]);
        let name = resolve_available_name("report.csv", 10_000, |n| oracle.probe(n))
            .await
            .unwrap();
        assert_eq!(name, "report-2.csv");
        assert_eq!(oracle.calls.get(), 3);
        assert_eq!(
            *oracle.probed.borrow(),
            vec!["report.csv", "report-1.csv", "report-2.csv"]
        );
    }

    #[tokio::test]
    async fn k_collisions_take_k_plus_one_probes() {
        for k in 1..=5usize {
            let script: Vec<bool> = std::iter::repeat(true)
                .take(k)
                .chain(std::iter::once(false))
                .collect();
            let oracle = ScriptedOracle::new(&script);
            let name = resolve_available_name("spot.mp4", 10_000, |n| oracle.probe(n))
                .await
                .unwrap();
            assert_eq!(name, format!("spot-{}.mp4", k));
            assert_eq!(oracle.calls.get(), k + 1);
        }
    }

    #[tokio::test]
    async fn interior_dots_stay_in_the_stem() {
        let oracle = ScriptedOracle::new(&[true, false]);
        let name = resolve_available_name("a.b.mp4", 10_000, |n| oracle.probe(n))
            .await
            .unwrap();
        assert_eq!(name, "a.b-1.mp4");
    }

    #[tokio::test]
    async fn name_without_extension_gets_bare_suffix() {
        let oracle = ScriptedOracle::new(&[true, false]);
        let name = resolve_available_name("README", 10_000, |n| oracle.probe(n))
            .await
            .unwrap();
        assert_eq!(name, "README-1");
    }

    #[tokio::test]
    async fn dotfile_is_treated_as_all_stem() {
        let oracle = ScriptedOracle::new(&[true, false]);
        let name = resolve_available_name(".gitignore", 10_000, |n| oracle.probe(n))
            .await
            .unwrap();
        assert_eq!(name, ".gitignore-1");
    }

    #[tokio::test]
    async fn empty_name_is_rejected_without_probing() {
        let oracle = ScriptedOracle::new(&[]);
        let err = resolve_available_name("", 10_000, |n| oracle.probe(n))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::InvalidName));
        assert_eq!(oracle.calls.get(), 0);
    }

    #[tokio::test]
    async fn probe_budget_is_enforced() {
        let oracle = ScriptedOracle::new(&[true; 32]);
        let err = resolve_available_name("busy.mp4", 5, |n| oracle.probe(n))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Exhausted { attempts: 5 }));
        assert_eq!(oracle.calls.get(), 5);
    }

    #[tokio::test]
    async fn zero_budget_exhausts_without_probing() {
        let oracle = ScriptedOracle::new(&[false]);
        let err = resolve_available_name("clip.mp4", 0, |n| oracle.probe(n))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Exhausted { attempts: 0 }));
        assert_eq!(oracle.calls.get(), 0);
    }

    #[tokio::test]
    async fn oracle_failure_propagates_without_retry() {
        let calls = Cell::new(0usize);
        let err = resolve_available_name("clip.mp4", 10_000, |_| {
            calls.set(calls.get() + 1);
            async { Err(StorageError::Unavailable("connection refused".to_string())) }
        })
        .await
        .unwrap_err();
        assert!(matches!(err, ResolveError::Oracle(StorageError::Unavailable(_))));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn oracle_failure_mid_sequence_propagates() {
        let answers = RefCell::new(VecDeque::from([Ok(true), Ok(true)]));
        let err = resolve_available_name("clip.mp4", 10_000, |_| {
            let next = answers
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(StorageError::Unavailable("timeout".to_string())));
            async move { next }
        })
        .await
        .unwrap_err();
        assert!(matches!(err, ResolveError::Oracle(_)));
    }

    #[test]
    fn split_extension_cases() {
        assert_eq!(split_extension("a.mp4"), ("a", Some("mp4")));
        assert_eq!(split_extension("a.b.mp4"), ("a.b", Some("mp4")));
        assert_eq!(split_extension("README"), ("README", None));
        assert_eq!(split_extension(".gitignore"), (".gitignore", None));
        assert_eq!(split_extension("trailing."), ("trailing", Some("")));
    }
}
