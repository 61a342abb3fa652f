//! The work-pool scheduler contract of the concurrency model: `submit` a
//! closure, `enter_scope`/`exit_scope` to demarcate a fan-out region where
//! `exit_scope` blocks until every submitted task (including nested
//! fan-outs) has published its result.
//!
//! Built on [`rayon::scope`], whose structured-concurrency join is exactly
//! this barrier: `rayon::Scope::spawn` is `submit`, and the scope closure
//! returning is `exit_scope`. Results publish into a
//! `parking_lot::Mutex`-guarded map keyed by task-assigned strings, which
//! tolerates concurrent insertion the way the contract requires.

use parking_lot::Mutex;
use std::collections::HashMap;

/// A fan-out region. Submitted closures run on rayon's global thread pool;
/// dropping the scope (or rather, the `with_scope` call returning) blocks
/// until every task submitted within it — including tasks it spawns, which
/// may themselves fan out further — has completed.
pub struct WorkPool<'scope, 'env, T> {
    scope: &'scope rayon::Scope<'env>,
    results: &'env Mutex<HashMap<String, T>>,
}

impl<'scope, 'env, T: Send + 'env> WorkPool<'scope, 'env, T> {
    /// Enqueues `task` for execution, publishing its result under `key`
    /// once it completes. A panic inside `task` propagates out of the
    /// enclosing `rayon::scope` call (and therefore out of
    /// [`with_scope`]'s join barrier), matching the "error at the sub-task
    /// propagates out of the join barrier" contract.
    pub fn submit(&self, key: impl Into<String>, task: impl FnOnce() -> T + Send + 'env) {
        let key = key.into();
        let results = self.results;
        self.scope.spawn(move |inner_scope| {
            // Nested fan-out: a task may itself open another scope and
            // submit further sub-tasks; `inner_scope` threads that through.
            let _ = inner_scope;
            let value = task();
            results.lock().insert(key, value);
        });
    }
}

/// Opens a fan-out region, runs `body` with a [`WorkPool`] handle, blocks
/// until every task submitted inside `body` (transitively) has completed,
/// then returns the published results keyed by the strings tasks were
/// submitted under.
///
/// This is `enter_scope` + the body + `exit_scope` collapsed into one call,
/// since Rust's borrow checker makes a bare enter/exit pair awkward to
/// express safely — `rayon::scope` already provides the equivalent
/// spawn-then-join discipline the contract asks for.
pub fn with_scope<T, F>(body: F) -> HashMap<String, T>
where
    T: Send,
    F: for<'scope, 'env> FnOnce(WorkPool<'scope, 'env, T>),
{
    let results = Mutex::new(HashMap::new());
    rayon::scope(|scope| {
        let pool = WorkPool { scope, results: &results };
        body(pool);
    });
    results.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_scope_blocks_until_every_task_publishes() {
        let results = with_scope::<i64, _>(|pool| {
            pool.submit("a", || 1);
            pool.submit("b", || 2);
            pool.submit("c", || 3);
        });
        assert_eq!(results.len(), 3);
        assert_eq!(results["a"] + results["b"] + results["c"], 6);
    }

    #[test]
    fn nested_fan_out_joins_transitively() {
        let results = with_scope::<i64, _>(|outer| {
            outer.submit("outer", || {
                let inner = with_scope::<i64, _>(|pool| {
                    pool.submit("inner-a", || 10);
                    pool.submit("inner-b", || 20);
                });
                inner["inner-a"] + inner["inner-b"]
            });
        });
        assert_eq!(results["outer"], 30);
    }
}
