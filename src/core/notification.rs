use crate::core::{Notification, NotificationKind, Notifier};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

pub const ENTER_DELAY: Duration = Duration::from_millis(100);
pub const DISPLAY_DURATION: Duration = Duration::from_secs(4);
pub const EXIT_TRANSITION: Duration = Duration::from_millis(300);

impl NotificationKind {
    pub fn background(&self) -> &'static str {
        match self {
            NotificationKind::Success => "#48bb78",
            NotificationKind::Error => "#e53e3e",
            NotificationKind::Warning => "#ed8936",
            NotificationKind::Info => "#729474",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "notification notification-success",
            NotificationKind::Error => "notification notification-error",
            NotificationKind::Warning => "notification notification-warning",
            NotificationKind::Info => "notification notification-info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    /// Attached off-screen.
    Hidden,
    Shown,
    Leaving,
    Removed,
}

impl Notification {
    /// Where the toast is in its lifecycle `elapsed` after it was attached.
    ///
    /// Display time is counted from attachment, so the entrance delay eats into it.
    pub fn phase_at(&self, elapsed: Duration) -> NotificationPhase {
        if elapsed < ENTER_DELAY {
            NotificationPhase::Hidden
        } else if elapsed < DISPLAY_DURATION {
            NotificationPhase::Shown
        } else if elapsed < DISPLAY_DURATION + EXIT_TRANSITION {
            NotificationPhase::Leaving
        } else {
            NotificationPhase::Removed
        }
    }

    pub fn lifetime() -> Duration {
        DISPLAY_DURATION + EXIT_TRANSITION
    }
}

/// Walks a notification through its phases on the tokio clock, calling
/// `on_phase` at each transition.
pub async fn run_lifecycle<F>(notification: &Notification, mut on_phase: F)
where
    F: FnMut(NotificationPhase),
{
    on_phase(notification.phase_at(Duration::ZERO));
    tokio::time::sleep(ENTER_DELAY).await;
    on_phase(NotificationPhase::Shown);
    tokio::time::sleep(DISPLAY_DURATION - ENTER_DELAY).await;
    on_phase(NotificationPhase::Leaving);
    tokio::time::sleep(EXIT_TRANSITION).await;
    on_phase(NotificationPhase::Removed);
}

struct Toast {
    id: u64,
    notification: Notification,
    phase: NotificationPhase,
}

#[derive(Default)]
struct Board {
    next_id: u64,
    toasts: Vec<Toast>,
}

/// Notifier that keeps each toast on screen for its full lifecycle.
///
/// Every notification gets its own timer task on the current tokio runtime
/// and leaves the board once it reaches `Removed`.
#[derive(Clone, Default)]
pub struct ToastBoard {
    board: Arc<Mutex<Board>>,
}

impl ToastBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Board> {
        self.board.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Toasts still attached, oldest first.
    pub fn active(&self) -> Vec<(Notification, NotificationPhase)> {
        self.lock()
            .toasts
            .iter()
            .map(|t| (t.notification.clone(), t.phase))
            .collect()
    }

    fn update(&self, id: u64, phase: NotificationPhase) {
        let mut board = self.lock();
        if phase == NotificationPhase::Removed {
            board.toasts.retain(|t| t.id != id);
        } else if let Some(toast) = board.toasts.iter_mut().find(|t| t.id == id) {
            toast.phase = phase;
        }
    }
}

impl Notifier for ToastBoard {
    fn notify(&self, notification: Notification) {
        let id = {
            let mut board = self.lock();
            let id = board.next_id;
            board.next_id += 1;
            board.toasts.push(Toast {
                id,
                notification: notification.clone(),
                phase: NotificationPhase::Hidden,
            });
            id
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let board = self.clone();
                handle.spawn(async move {
                    run_lifecycle(&notification, |phase| board.update(id, phase)).await;
                });
            }
            Err(_) => {
                tracing::warn!("No async runtime, notification will not be dismissed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_follow_timing() {
        let n = Notification::new(NotificationKind::Success, "ok");
        assert_eq!(n.phase_at(Duration::from_millis(50)), NotificationPhase::Hidden);
        assert_eq!(n.phase_at(Duration::from_millis(100)), NotificationPhase::Shown);
        assert_eq!(n.phase_at(Duration::from_millis(3999)), NotificationPhase::Shown);
        assert_eq!(n.phase_at(Duration::from_millis(4100)), NotificationPhase::Leaving);
        assert_eq!(n.phase_at(Duration::from_millis(4300)), NotificationPhase::Removed);
        assert_eq!(Notification::lifetime(), Duration::from_millis(4300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_lifecycle_dismisses_within_lifetime() {
        let n = Notification::new(NotificationKind::Error, "ko");
        let start = tokio::time::Instant::now();
        let mut seen = Vec::new();

        run_lifecycle(&n, |phase| seen.push(phase)).await;

        assert_eq!(
            seen,
            vec![
                NotificationPhase::Hidden,
                NotificationPhase::Shown,
                NotificationPhase::Leaving,
                NotificationPhase::Removed
            ]
        );
        assert_eq!(start.elapsed(), Notification::lifetime());
    }

    #[tokio::test(start_paused = true)]
    async fn test_board_drops_toast_after_lifetime() {
        let board = ToastBoard::new();
        board.notify(Notification::new(NotificationKind::Info, "uno"));
        tokio::time::sleep(Duration::from_millis(1000)).await;
        board.notify(Notification::new(NotificationKind::Warning, "due"));

        tokio::time::sleep(Duration::from_millis(3500)).await;
        let active = board.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].0.message, "due");
        assert_eq!(active[0].1, NotificationPhase::Shown);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(board.active().is_empty());
    }

    #[test]
    fn test_kind_colors() {
        assert_eq!(NotificationKind::Error.background(), "#e53e3e");
        assert_eq!(NotificationKind::Info.background(), "#729474");
        assert!(NotificationKind::Warning.css_class().ends_with("warning"));
    }
}
