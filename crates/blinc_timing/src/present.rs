//! Presentation domain
//!
//! Values computed on the time-source side are applied to their target on a
//! presentation domain. Targets owned by a single thread (a UI tree, a
//! render state) use [`queued_presenter`] and drain the [`PresentQueue`] on
//! the owning thread; thread-safe targets can use the [`InlinePresenter`].
//!
//! A target that is not `Send` at all (say an `Rc<RefCell<_>>` node) is
//! registered with [`PresentQueue::bind`]. The target stays in a registry
//! local to the binding thread and only the values cross threads.

use crate::animation::{AnimationResult, Setter};
use crate::error::AnimationError;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;
use slotmap::{new_key_type, SlotMap};
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::thread::{self, ThreadId};

new_key_type! {
    /// Key of a target registered with [`PresentQueue::bind`]
    pub struct TargetId;
}

thread_local! {
    // Targets bound on this thread. Each entry holds an
    // `Rc<dyn Fn(T) -> AnimationResult>` for the binding's value type.
    static LOCAL_TARGETS: RefCell<SlotMap<TargetId, Rc<dyn Any>>> =
        RefCell::new(SlotMap::with_key());
}

/// Unit of work to run on the presentation domain
pub type PresentJob = Box<dyn FnOnce() + Send + 'static>;

/// Executes value applications on the presentation domain
pub trait Presenter: Send + Sync + fmt::Debug {
    /// Schedule `job` on the presentation domain
    ///
    /// Dropping the job without running it is allowed; the animation waiting
    /// on it then fails with
    /// [`AnimationError::PresenterClosed`](crate::error::AnimationError::PresenterClosed).
    fn present(&self, job: PresentJob);
}

/// Shared handle to a presenter
pub type SharedPresenter = Arc<dyn Presenter>;

/// Runs every job immediately on the task that produced the value
#[derive(Clone, Copy, Debug, Default)]
pub struct InlinePresenter;

impl Presenter for InlinePresenter {
    fn present(&self, job: PresentJob) {
        job();
    }
}

/// Sends jobs to a [`PresentQueue`] owned by the presentation thread
#[derive(Clone)]
pub struct QueuedPresenter {
    tx: UnboundedSender<PresentJob>,
}

impl fmt::Debug for QueuedPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueuedPresenter")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

impl Presenter for QueuedPresenter {
    fn present(&self, job: PresentJob) {
        if self.tx.unbounded_send(job).is_err() {
            tracing::debug!("present queue closed, dropping job");
        }
    }
}

/// Receiving side of a [`QueuedPresenter`]
///
/// Dropping the queue releases the targets bound through it.
pub struct PresentQueue {
    rx: UnboundedReceiver<PresentJob>,
    bound: Vec<(ThreadId, TargetId)>,
}

impl PresentQueue {
    /// Register a target owned by the calling thread
    ///
    /// `apply` never leaves this thread. The returned setter is `Send` and
    /// can be handed to [`Animation::from_values`](crate::Animation::from_values)
    /// or any preset; it forwards each value to `apply` when called on this
    /// thread, which is where this queue's jobs run when it is drained here.
    /// Called anywhere else, or after the queue is dropped, it fails with
    /// [`AnimationError::Apply`].
    pub fn bind<T, F>(&mut self, apply: F) -> Setter<T>
    where
        T: 'static,
        F: Fn(T) -> AnimationResult + 'static,
    {
        let apply: Rc<dyn Fn(T) -> AnimationResult> = Rc::new(apply);
        let entry: Rc<dyn Any> = Rc::new(apply);
        let id = LOCAL_TARGETS.with(|targets| targets.borrow_mut().insert(entry));
        let owner = thread::current().id();
        self.bound.push((owner, id));
        tracing::trace!(?id, "bound local target");

        Arc::new(move |value: T| apply_local(owner, id, value))
    }

    /// Run every job queued so far without waiting for new ones
    ///
    /// Intended to be called once per frame from the thread that owns the
    /// animated targets. Returns the number of jobs run.
    pub fn run_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            count += 1;
        }
        count
    }

    /// Run jobs as they arrive until every presenter is dropped
    pub async fn run(mut self) {
        while let Some(job) = self.rx.next().await {
            job();
        }
    }
}

impl Drop for PresentQueue {
    fn drop(&mut self) {
        let here = thread::current().id();
        let (local, foreign): (Vec<_>, Vec<_>) =
            self.bound.drain(..).partition(|(owner, _)| *owner == here);
        if !foreign.is_empty() {
            tracing::debug!(
                count = foreign.len(),
                "present queue dropped off its binding thread, targets kept"
            );
        }
        // The registry is gone already when the thread is shutting down.
        // Released targets drop after the borrow ends.
        let released = LOCAL_TARGETS.try_with(|targets| {
            let mut targets = targets.borrow_mut();
            local
                .into_iter()
                .filter_map(|(_, id)| targets.remove(id))
                .collect::<Vec<_>>()
        });
        drop(released);
    }
}

impl fmt::Debug for PresentQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentQueue")
            .field("bound", &self.bound.len())
            .finish_non_exhaustive()
    }
}

/// Create a presenter that marshals jobs onto a queue drained elsewhere
pub fn queued_presenter() -> (QueuedPresenter, PresentQueue) {
    let (tx, rx) = mpsc::unbounded();
    (
        QueuedPresenter { tx },
        PresentQueue {
            rx,
            bound: Vec::new(),
        },
    )
}

fn apply_local<T: 'static>(owner: ThreadId, id: TargetId, value: T) -> AnimationResult {
    if thread::current().id() != owner {
        return Err(AnimationError::apply("bound target applied off its owning thread"));
    }

    // Clone the entry out so `apply` may bind or drop queues itself.
    let entry = LOCAL_TARGETS
        .try_with(|targets| targets.borrow().get(id).cloned())
        .ok()
        .flatten()
        .ok_or_else(|| AnimationError::apply("bound target was released"))?;

    match entry.downcast_ref::<Rc<dyn Fn(T) -> AnimationResult>>() {
        Some(apply) => apply(value),
        None => Err(AnimationError::apply("bound target has a different value type")),
    }
}
