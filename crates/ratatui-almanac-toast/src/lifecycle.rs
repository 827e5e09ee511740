//! Toast lifecycle state machine.
//!
//! Each toast owns its own phase, auto-dismiss deadline and exit deadline, so
//! overlapping toasts can never share timer state. Time only enters through
//! the `now` argument of [`Toast::tick`] / [`ToastStack::tick`], which keeps
//! every transition deterministic under test.

use std::time::Duration;
use std::time::Instant;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(4500);
pub const DEFAULT_EXIT_DURATION: Duration = Duration::from_millis(200);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Plain,
    Info,
    Success,
    Warning,
    Error,
}

/// Lifecycle phases, in order. `Closed` is terminal.
///
/// The four phases replace the visibility/created/animating boolean flags a
/// DOM notification would juggle; transitions are guarded so an invalid
/// combination cannot be represented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    Created,
    Visible,
    Closing,
    Closed,
}

#[derive(Clone, Debug)]
pub struct ToastOptions {
    pub title: String,
    pub message: String,
    pub kind: ToastKind,
    /// Overrides the kind's default icon.
    pub icon: Option<char>,
    pub closable: bool,
    /// Auto-dismiss delay; zero disables auto-dismissal entirely.
    pub duration: Duration,
    /// How long the exit phase lasts before `tick` completes it on its own.
    /// `None` means the presentation layer must call `finish_exit`.
    pub exit_duration: Option<Duration>,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            kind: ToastKind::Plain,
            icon: None,
            closable: true,
            duration: DEFAULT_DURATION,
            exit_duration: Some(DEFAULT_EXIT_DURATION),
        }
    }
}

impl ToastOptions {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn kind(mut self, kind: ToastKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }
}

pub type CloseCallback = Box<dyn FnOnce()>;

/// A single notification instance.
///
/// Deadlines are armed lazily on the first `tick` spent in the relevant
/// phase, so construction needs no clock at all.
pub struct Toast {
    options: ToastOptions,
    phase: ToastPhase,
    deadline: Option<Instant>,
    exit_deadline: Option<Instant>,
    closed_by_user: bool,
    on_close: Option<CloseCallback>,
}

impl Toast {
    pub fn new(options: ToastOptions) -> Self {
        Self {
            options,
            phase: ToastPhase::Created,
            deadline: None,
            exit_deadline: None,
            closed_by_user: false,
            on_close: None,
        }
    }

    pub fn with_on_close(options: ToastOptions, on_close: CloseCallback) -> Self {
        Self {
            on_close: Some(on_close),
            ..Self::new(options)
        }
    }

    pub fn options(&self) -> &ToastOptions {
        &self.options
    }

    pub fn phase(&self) -> ToastPhase {
        self.phase
    }

    /// Whether the toast still occupies the screen (`Visible` or `Closing`).
    pub fn is_live(&self) -> bool {
        matches!(self.phase, ToastPhase::Visible | ToastPhase::Closing)
    }

    pub fn is_closing(&self) -> bool {
        self.phase == ToastPhase::Closing
    }

    pub fn closed_by_user(&self) -> bool {
        self.closed_by_user
    }

    /// `Created → Visible`. Any other phase is a no-op.
    pub fn show(&mut self) -> bool {
        if self.phase != ToastPhase::Created {
            return false;
        }
        self.phase = ToastPhase::Visible;
        true
    }

    /// Explicit close: `Visible → Closing`. Closing an already-closing or
    /// closed toast is a no-op, which also makes the user close and the
    /// timer close mutually exclusive: whichever fires first wins.
    pub fn close(&mut self) -> bool {
        if self.phase != ToastPhase::Visible {
            return false;
        }
        self.closed_by_user = true;
        self.begin_close();
        true
    }

    /// Advances deadline-driven transitions. Returns true when the phase
    /// changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.phase {
            ToastPhase::Visible => {
                if self.options.duration.is_zero() {
                    return false;
                }
                match self.deadline {
                    None => {
                        self.deadline = Some(now + self.options.duration);
                        false
                    }
                    Some(deadline) if now >= deadline => {
                        log::debug!("toast '{}' auto-dismissed", self.options.title);
                        self.begin_close();
                        true
                    }
                    Some(_) => false,
                }
            }
            ToastPhase::Closing => {
                let Some(exit) = self.options.exit_duration else {
                    return false;
                };
                match self.exit_deadline {
                    None => {
                        self.exit_deadline = Some(now + exit);
                        false
                    }
                    Some(deadline) if now >= deadline => {
                        self.complete_close();
                        true
                    }
                    Some(_) => false,
                }
            }
            ToastPhase::Created | ToastPhase::Closed => false,
        }
    }

    /// The presentation layer's exit-animation-finished signal:
    /// `Closing → Closed`, firing `on_close` exactly once. A no-op in every
    /// other phase, so a toast that was never visible can never fire its
    /// callback.
    pub fn finish_exit(&mut self) -> bool {
        if self.phase != ToastPhase::Closing {
            return false;
        }
        self.complete_close();
        true
    }

    fn begin_close(&mut self) {
        self.phase = ToastPhase::Closing;
        self.deadline = None;
    }

    fn complete_close(&mut self) {
        self.phase = ToastPhase::Closed;
        self.exit_deadline = None;
        if let Some(on_close) = self.on_close.take() {
            on_close();
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToastId(u64);

/// The mount point: an ordered registry of independent toasts.
///
/// Closed toasts are swept out after `tick`/`finish_exit`; each entry keeps
/// its own state machine, so opening a new toast while an older one is still
/// animating out cannot disturb either.
#[derive(Default)]
pub struct ToastStack {
    next_id: u64,
    toasts: Vec<(ToastId, Toast)>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, options: ToastOptions) -> ToastId {
        self.push(Toast::new(options))
    }

    pub fn open_with(&mut self, options: ToastOptions, on_close: CloseCallback) -> ToastId {
        self.push(Toast::with_on_close(options, on_close))
    }

    fn push(&mut self, mut toast: Toast) -> ToastId {
        toast.show();
        let id = ToastId(self.next_id);
        self.next_id += 1;
        log::debug!("toast '{}' opened", toast.options().title);
        self.toasts.push((id, toast));
        id
    }

    pub fn close(&mut self, id: ToastId) -> bool {
        self.toast_mut(id).is_some_and(Toast::close)
    }

    pub fn finish_exit(&mut self, id: ToastId) -> bool {
        let finished = self.toast_mut(id).is_some_and(Toast::finish_exit);
        if finished {
            self.sweep();
        }
        finished
    }

    /// Drives every toast's deadlines and sweeps out finished ones. Returns
    /// true when anything changed (a redraw is due).
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for (_, toast) in &mut self.toasts {
            changed |= toast.tick(now);
        }
        if changed {
            self.sweep();
        }
        changed
    }

    /// Unmounts a toast outright: pending deadlines die with it and
    /// `on_close` is never invoked.
    pub fn remove(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|(tid, _)| *tid != id);
        self.toasts.len() != before
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts
            .iter()
            .find(|(tid, _)| *tid == id)
            .map(|(_, t)| t)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn iter_live(&self) -> impl Iterator<Item = (ToastId, &Toast)> {
        self.toasts
            .iter()
            .filter(|(_, t)| t.is_live())
            .map(|(id, t)| (*id, t))
    }

    fn toast_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
        self.toasts
            .iter_mut()
            .find(|(tid, _)| *tid == id)
            .map(|(_, t)| t)
    }

    fn sweep(&mut self) {
        self.toasts.retain(|(_, t)| t.phase() != ToastPhase::Closed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, CloseCallback) {
        let count = Rc::new(Cell::new(0));
        let cb_count = count.clone();
        (count, Box::new(move || cb_count.set(cb_count.get() + 1)))
    }

    fn opts(duration_ms: u64) -> ToastOptions {
        ToastOptions::new("t", "m").duration(Duration::from_millis(duration_ms))
    }

    #[test]
    fn auto_dismiss_walks_the_full_lifecycle() {
        let (count, cb) = counter();
        let mut toast = Toast::with_on_close(opts(100), cb);
        toast.show();
        assert_eq!(toast.phase(), ToastPhase::Visible);

        let t0 = Instant::now();
        assert!(!toast.tick(t0)); // arms the deadline
        assert!(!toast.tick(t0 + Duration::from_millis(50)));
        assert!(toast.tick(t0 + Duration::from_millis(150)));
        assert_eq!(toast.phase(), ToastPhase::Closing);
        assert!(!toast.closed_by_user());
        assert_eq!(count.get(), 0);

        assert!(toast.finish_exit());
        assert_eq!(toast.phase(), ToastPhase::Closed);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn zero_duration_never_auto_dismisses() {
        let mut toast = Toast::new(opts(0));
        toast.show();
        let t0 = Instant::now();
        assert!(!toast.tick(t0));
        assert!(!toast.tick(t0 + Duration::from_secs(3600)));
        assert_eq!(toast.phase(), ToastPhase::Visible);

        assert!(toast.close());
        assert_eq!(toast.phase(), ToastPhase::Closing);
        assert!(toast.closed_by_user());
    }

    #[test]
    fn double_close_is_one_transition_and_one_callback() {
        let (count, cb) = counter();
        let mut toast = Toast::with_on_close(opts(0), cb);
        toast.show();

        assert!(toast.close());
        assert!(!toast.close());
        assert!(toast.finish_exit());
        assert!(!toast.finish_exit());
        assert_eq!(toast.phase(), ToastPhase::Closed);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn user_close_wins_over_a_later_timer() {
        let mut toast = Toast::new(opts(100));
        toast.show();
        let t0 = Instant::now();
        toast.tick(t0);

        assert!(toast.close());
        assert!(toast.closed_by_user());
        // the old deadline is gone; a late tick cannot re-close
        let mut t = toast;
        t.options.exit_duration = None;
        assert!(!t.tick(t0 + Duration::from_secs(10)));
        assert_eq!(t.phase(), ToastPhase::Closing);
    }

    #[test]
    fn exit_duration_completes_the_close_from_tick() {
        let (count, cb) = counter();
        let mut toast = Toast::with_on_close(
            ToastOptions::new("t", "m")
                .duration(Duration::ZERO),
            cb,
        );
        toast.show();
        toast.close();

        let t0 = Instant::now();
        assert!(!toast.tick(t0)); // arms the exit deadline
        assert!(toast.tick(t0 + DEFAULT_EXIT_DURATION));
        assert_eq!(toast.phase(), ToastPhase::Closed);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn a_toast_that_was_never_visible_cannot_fire_its_callback() {
        let (count, cb) = counter();
        let mut toast = Toast::with_on_close(opts(0), cb);
        assert!(!toast.finish_exit());
        assert!(!toast.close());
        assert_eq!(toast.phase(), ToastPhase::Created);
        drop(toast);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn stack_opens_visible_and_sweeps_closed() {
        let (count, cb) = counter();
        let mut stack = ToastStack::new();
        let id = stack.open_with(opts(100), cb);
        assert_eq!(stack.get(id).unwrap().phase(), ToastPhase::Visible);
        assert_eq!(stack.iter_live().count(), 1);

        let t0 = Instant::now();
        stack.tick(t0);
        assert!(stack.tick(t0 + Duration::from_millis(100)));
        assert!(stack.get(id).unwrap().is_closing());

        assert!(stack.finish_exit(id));
        assert_eq!(count.get(), 1);
        assert!(stack.is_empty());
        assert!(!stack.finish_exit(id));
    }

    #[test]
    fn remove_cancels_the_pending_timer_without_a_callback() {
        let (count, cb) = counter();
        let mut stack = ToastStack::new();
        let id = stack.open_with(opts(100), cb);

        let t0 = Instant::now();
        stack.tick(t0);
        assert!(stack.remove(id));
        assert!(!stack.tick(t0 + Duration::from_secs(10)));
        assert_eq!(count.get(), 0);
        assert!(!stack.remove(id));
    }

    #[test]
    fn overlapping_toasts_keep_independent_lifecycles() {
        let (count_a, cb_a) = counter();
        let (count_b, cb_b) = counter();
        let mut stack = ToastStack::new();
        let a = stack.open_with(opts(100), cb_a);
        let b = stack.open_with(opts(500), cb_b);

        let t0 = Instant::now();
        stack.tick(t0);
        stack.tick(t0 + Duration::from_millis(150));
        assert!(stack.get(a).unwrap().is_closing());
        assert_eq!(stack.get(b).unwrap().phase(), ToastPhase::Visible);

        // a fresh toast while `a` is animating out shares nothing with it
        let c = stack.open(opts(100));
        stack.finish_exit(a);
        assert_eq!(count_a.get(), 1);
        assert_eq!(count_b.get(), 0);
        assert_eq!(stack.get(c).unwrap().phase(), ToastPhase::Visible);
        assert_eq!(stack.iter_live().count(), 2);
    }
}
