//! Index-addressed result slots and the barrier stage runners built on them.
//!
//! Every stage pre-allocates one slot per input. A worker owns exactly the slot at its
//! input's index, so results land in input order whatever order workers finish in, and
//! no lock guards the output.

use rayon::ThreadPool;
use rayon::prelude::*;

use crate::engine::progress::StageProgress;
use crate::errors::Error;

/// Fixed-size output of one stage: slot `i` holds the result for input `i`.
#[derive(Debug)]
pub struct SlotBuffer<T> {
    stage: &'static str,
    slots: Vec<Option<T>>,
}

impl<T> SlotBuffer<T> {
    pub fn new(stage: &'static str, len: usize) -> Self {
        Self {
            stage,
            slots: std::iter::repeat_with(|| None).take(len).collect(),
        }
    }

    /// Disjoint mutable slots, for handing one to each parallel worker.
    pub fn slots_mut(&mut self) -> &mut [Option<T>] {
        &mut self.slots
    }

    /// All results in input order. Any unfilled slot is an invariant violation.
    pub fn into_ordered(self) -> Result<Vec<T>, Error> {
        let stage = self.stage;
        self.slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or(Error::SlotInvariant { stage, index }))
            .collect()
    }
}

/// Run an infallible per-document stage on `pool`; returns when every worker is done.
pub fn run_stage<I, O, F>(
    pool: &ThreadPool,
    stage: &'static str,
    inputs: &[I],
    progress: &StageProgress,
    f: F,
) -> Result<Vec<O>, Error>
where
    I: Sync,
    O: Send,
    F: Fn(&I) -> O + Sync,
{
    let mut slots = SlotBuffer::new(stage, inputs.len());
    pool.install(|| {
        slots
            .slots_mut()
            .par_iter_mut()
            .zip(inputs.par_iter())
            .for_each(|(slot, input)| {
                *slot = Some(f(input));
                progress.tick();
            })
    });
    progress.finish();
    slots.into_ordered()
}

/// Run a fallible per-document stage on `pool`. The first failure stops scheduling new work,
/// and the whole stage's results are discarded.
pub fn try_run_stage<I, O, F>(
    pool: &ThreadPool,
    stage: &'static str,
    inputs: &[I],
    progress: &StageProgress,
    f: F,
) -> Result<Vec<O>, Error>
where
    I: Sync,
    O: Send,
    F: Fn(&I) -> Result<O, Error> + Sync,
{
    let mut slots = SlotBuffer::new(stage, inputs.len());
    let outcome = pool.install(|| {
        slots
            .slots_mut()
            .par_iter_mut()
            .zip(inputs.par_iter())
            .try_for_each(|(slot, input)| {
                *slot = Some(f(input)?);
                progress.tick();
                Ok::<(), Error>(())
            })
    });
    progress.finish();
    outcome?;
    slots.into_ordered()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parallel::build_pool;

    #[test]
    fn test_slots_filled_out_of_order_come_back_in_order() {
        let mut buf = SlotBuffer::new("test", 3);
        for (i, v) in [(2, "c"), (0, "a"), (1, "b")] {
            buf.slots_mut()[i] = Some(v);
        }
        assert_eq!(buf.into_ordered().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unfilled_slot_reported() {
        let mut buf = SlotBuffer::new("test", 3);
        buf.slots_mut()[0] = Some(1);
        buf.slots_mut()[2] = Some(3);
        assert!(matches!(
            buf.into_ordered(),
            Err(Error::SlotInvariant { stage: "test", index: 1 })
        ));
    }

    #[test]
    fn test_run_stage_preserves_order_with_uneven_work() {
        let pool = build_pool("test", 4).unwrap();
        let inputs: Vec<u64> = (0..200).collect();
        let progress = StageProgress::new(false, "test", inputs.len());
        let out = run_stage(&pool, "test", &inputs, &progress, |&n| {
            // Early inputs do the most work so they tend to finish last.
            let spins = (200 - n) * 500;
            let mut acc = n;
            for i in 0..spins {
                acc = acc.wrapping_mul(31).wrapping_add(i);
            }
            std::hint::black_box(acc);
            n * 2
        })
        .unwrap();
        assert_eq!(out, inputs.iter().map(|n| n * 2).collect::<Vec<_>>());
        assert_eq!(progress.completed(), 200);
    }

    #[test]
    fn test_try_run_stage_success_in_order() {
        let pool = build_pool("test", 3).unwrap();
        let inputs: Vec<usize> = (0..64).collect();
        let progress = StageProgress::new(false, "test", inputs.len());
        let out = try_run_stage(&pool, "test", &inputs, &progress, |&n| Ok(n + 1)).unwrap();
        assert_eq!(out, (1..=64).collect::<Vec<_>>());
    }

    #[test]
    fn test_try_run_stage_failure_discards_everything() {
        let pool = build_pool("test", 2).unwrap();
        let inputs: Vec<usize> = (0..50).collect();
        let progress = StageProgress::new(false, "test", inputs.len());
        let result = try_run_stage(&pool, "test", &inputs, &progress, |&n| {
            if n == 17 {
                Err(Error::SlotInvariant { stage: "test", index: n })
            } else {
                Ok(n)
            }
        });
        assert!(matches!(result, Err(Error::SlotInvariant { index: 17, .. })));
    }

    #[test]
    fn test_empty_stage() {
        let pool = build_pool("test", 1).unwrap();
        let inputs: Vec<u8> = Vec::new();
        let progress = StageProgress::new(false, "test", 0);
        assert!(run_stage(&pool, "test", &inputs, &progress, |&b| b).unwrap().is_empty());
    }
}
