//! Cooperative per-frame task scheduling.
//!
//! Every registered task runs once per frame in ascending `order`. A task
//! reports back whether it wants to run again next frame, is finished, or
//! has ended its whole group (e.g. a phase transition). Tasks belong to a
//! group so that a phase can drop all of its tasks at once.

/// Stable handle to a registered task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// What a task asks the scheduler to do after it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Run again next frame.
    Continue,
    /// Deregister this task.
    Done,
    /// Deregister every task in this task's group, including tasks that
    /// have not run yet this frame.
    EndGroup,
}

struct Entry<G, T> {
    handle: TaskHandle,
    group: G,
    order: i32,
    task: T,
}

/// Ordered table of per-frame tasks keyed by handle and grouped by `G`.
pub struct Scheduler<G, T> {
    entries: Vec<Entry<G, T>>,
    next_id: u64,
}

impl<G, T> Default for Scheduler<G, T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<G: Copy + PartialEq + std::fmt::Debug, T> Scheduler<G, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task. Tasks with equal `order` run in registration order.
    pub fn add(&mut self, group: G, order: i32, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        let index = self.entries.partition_point(|e| e.order <= order);
        self.entries.insert(
            index,
            Entry {
                handle,
                group,
                order,
                task,
            },
        );
        handle
    }

    /// Register a batch of `(order, task)` pairs under one group.
    pub fn add_all(
        &mut self,
        group: G,
        tasks: impl IntoIterator<Item = (i32, T)>,
    ) -> Vec<TaskHandle> {
        tasks
            .into_iter()
            .map(|(order, task)| self.add(group, order, task))
            .collect()
    }

    /// Deregister a single task. Returns false if it was already gone.
    pub fn remove(&mut self, handle: TaskHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Deregister every task of a group. Returns how many were removed.
    pub fn cancel_group(&mut self, group: G) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.group != group);
        let removed = before - self.entries.len();
        if removed > 0 {
            log::debug!("Cancelled {} task(s) in group {:?}", removed, group);
        }
        removed
    }

    pub fn contains(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of live tasks in a group.
    pub fn group_len(&self, group: G) -> usize {
        self.entries.iter().filter(|e| e.group == group).count()
    }

    /// Iterate over live tasks in run order.
    pub fn tasks(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.task)
    }

    /// Run every task registered at the start of the frame once, in order.
    ///
    /// A task removed during the frame (by its own group ending) is skipped.
    /// Returns the number of tasks that ran.
    pub fn run_frame<C>(
        &mut self,
        ctx: &mut C,
        mut run: impl FnMut(&mut C, &T) -> TaskStatus,
    ) -> usize {
        let pending: Vec<TaskHandle> = self.entries.iter().map(|e| e.handle).collect();
        let mut ran = 0;

        for handle in pending {
            let Some(index) = self.entries.iter().position(|e| e.handle == handle) else {
                continue;
            };
            let status = run(ctx, &self.entries[index].task);
            ran += 1;
            match status {
                TaskStatus::Continue => {}
                TaskStatus::Done => {
                    self.entries.remove(index);
                }
                TaskStatus::EndGroup => {
                    let group = self.entries[index].group;
                    self.cancel_group(group);
                }
            }
        }
        ran
    }
}
