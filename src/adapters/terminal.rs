use crate::core::{
    ConfirmDialog, ConsentSurface, GatedSection, Notification, NotificationKind, Notifier,
};
use std::collections::HashSet;
use std::io::{self, BufRead, Write};

/// Prints notifications instead of sliding them in.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                tracing::info!("✅ {}", notification.message);
                println!("✅ {}", notification.message);
            }
            NotificationKind::Error => {
                tracing::warn!("❌ {}", notification.message);
                eprintln!("❌ {}", notification.message);
            }
            NotificationKind::Warning => {
                tracing::warn!("⚠️ {}", notification.message);
                eprintln!("⚠️ {}", notification.message);
            }
            NotificationKind::Info => {
                tracing::info!("{}", notification.message);
                println!("{}", notification.message);
            }
        }
    }
}

/// Asks on stdin; `s`, `si`, `y` and `yes` confirm.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl ConfirmDialog for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [s/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(
            answer.trim().to_lowercase().as_str(),
            "s" | "si" | "sì" | "y" | "yes"
        )
    }
}

/// Reports consent-driven page changes on stdout.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    sections: HashSet<GatedSection>,
    messages: HashSet<GatedSection>,
}

impl TerminalSurface {
    pub fn new(sections: &[GatedSection]) -> Self {
        Self {
            sections: sections.iter().copied().collect(),
            messages: HashSet::new(),
        }
    }
}

impl ConsentSurface for TerminalSurface {
    fn set_banner_visible(&mut self, visible: bool) {
        if visible {
            println!("🍪 Nessuna preferenza cookie salvata: mostra il banner");
        }
    }

    fn set_settings_visible(&mut self, visible: bool) {
        tracing::debug!("Cookie settings dialog visible: {}", visible);
    }

    fn set_settings_checkboxes(&mut self, analytics: bool, calendly: bool) {
        println!("   analytics: {}", analytics);
        println!("   calendly:  {}", calendly);
    }

    fn grant_analytics(&mut self) {
        println!("📊 analytics_storage: granted");
    }

    fn set_calendly_widgets_visible(&mut self, visible: bool) {
        println!(
            "📅 Calendly widgets: {}",
            if visible { "visible" } else { "hidden" }
        );
    }

    fn has_section(&self, section: GatedSection) -> bool {
        self.sections.contains(&section)
    }

    fn has_cookie_message(&self, section: GatedSection) -> bool {
        self.messages.contains(&section)
    }

    fn append_cookie_message(&mut self, section: GatedSection, text: &str) {
        self.messages.insert(section);
        println!("💬 {:?}: {}", section, text);
    }
}
