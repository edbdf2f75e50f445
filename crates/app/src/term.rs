use std::sync::Arc;

use quiz_core::Key;
use quiz_core::model::{CardStatus, SessionId};
use quiz_core::SessionPhase;
use services::{ArenaEvent, ArenaView};
use tokio::sync::watch;

/// One line of player input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Events(Vec<ArenaEvent>),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Command::Empty;
        };

        match head.to_lowercase().as_str() {
            "l" | "left" | "f" | "faux" => Command::Events(vec![ArenaEvent::Key(Key::ArrowLeft)]),
            "r" | "right" | "v" | "vrai" => Command::Events(vec![ArenaEvent::Key(Key::ArrowRight)]),
            "drag" => match words.next().map(str::parse::<f64>) {
                Some(Ok(dx)) if dx.is_finite() => Command::Events(vec![
                    ArenaEvent::PointerDown { x: 0.0 },
                    ArenaEvent::PointerMove { x: dx },
                    ArenaEvent::PointerUp,
                ]),
                _ => Command::Unknown(line.to_string()),
            },
            "reset" | "replay" => Command::Events(vec![ArenaEvent::Reset]),
            "q" | "quit" | "exit" => Command::Quit,
            "help" | "?" => Command::Help,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

pub fn print_commands() {
    println!("Commands: v|vrai|r  f|faux|l  drag <dx>  reset  help  quit");
}

/// Identifies a frame worth printing; drag jitter alone never changes it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FrameKey {
    session_id: SessionId,
    answered: usize,
    phase: SessionPhase,
    status: CardStatus,
}

impl FrameKey {
    fn of(view: &ArenaView) -> Self {
        Self {
            session_id: view.session_id,
            answered: view.answered_cards,
            phase: view.phase,
            status: view.card_status,
        }
    }
}

/// Prints each distinct arena frame until the store goes away.
pub async fn render_loop(mut views: watch::Receiver<Arc<ArenaView>>, json: bool) {
    let mut last: Option<FrameKey> = None;
    loop {
        let view: Arc<ArenaView> = views.borrow_and_update().clone();
        let key = FrameKey::of(&view);
        if last != Some(key) {
            last = Some(key);
            if json {
                match serde_json::to_string(&*view) {
                    Ok(line) => println!("{line}"),
                    Err(err) => tracing::warn!(error = %err, "quiz.render_failed"),
                }
            } else {
                print!("{}", render_text(&view));
            }
        }
        if views.changed().await.is_err() {
            break;
        }
    }
}

pub fn render_text(view: &ArenaView) -> String {
    let mut out = String::new();
    let fire = if view.on_fire { " 🔥" } else { "" };
    out.push_str(&format!(
        "\n[{}/{} · {}%] score {} · série {}{} · record {}\n",
        view.answered_cards,
        view.total_cards,
        view.completion_percent,
        view.score,
        view.streak,
        fire,
        view.best_streak,
    ));
    let remaining: Vec<String> = view
        .remaining_by_domain
        .iter()
        .map(|count| format!("{} {}", count.domain.label(), count.remaining))
        .collect();
    out.push_str(&format!("restantes: {}\n", remaining.join(" · ")));

    match view.phase {
        SessionPhase::Animating => {
            if let Some(latest) = view.history.first() {
                let verdict = if latest.was_correct { "Bien vu !" } else { "Ce n'est pas ça." };
                out.push_str(&format!("{verdict} {}\n", latest.card.explanation));
            }
        }
        SessionPhase::Playing => {
            if let Some(card) = &view.active_card {
                out.push_str(&format!(
                    "{} · {}\n» {}\n",
                    card.domain.label(),
                    card.difficulty.label(),
                    card.prompt
                ));
                if let Some(spice) = &card.spice_line {
                    out.push_str(&format!("  {spice}\n"));
                }
                out.push_str("vrai ou faux ?\n");
            }
        }
        SessionPhase::Complete => {
            out.push_str(&format!(
                "Partie terminée : {} points, meilleure série {}. Tape `replay` pour rejouer.\n",
                view.score, view.best_streak
            ));
        }
    }
    out
}
