use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use ratatui::layout::Rect;
use slidemenu_core::{
    ActionCallbacks, ActionKind, AppConfig, ContentSpec, Disposition, MeasureSpec, Panel,
    PointerEvent, PointerPhase,
};
use tracing::{debug, warn};

use crate::theme::Theme;

/// Sample inbox shown by the demo
const SAMPLE_MESSAGES: &[(&str, &str)] = &[
    ("Alice", "Are we still on for lunch tomorrow?"),
    ("Build bot", "Nightly build #482 passed in 12m 40s"),
    ("Bob", "Sent you the slides, take a look when you can"),
    ("Carol", "The venue moved to the second floor"),
    ("Family", "Photos from the weekend are up"),
    ("Dave", "Can you review my patch before Friday?"),
    ("Newsletter", "This week: ten terminal tricks you did not know"),
    ("Erin", "Thanks! That fixed it"),
];

/// Action fired by a row's callback, applied after dispatch returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCommand {
    pub id: u64,
    pub action: ActionKind,
}

/// One message row backed by a slide panel
#[derive(Debug)]
pub struct MessageRow {
    pub id: u64,
    pub sender: String,
    pub preview: String,
    pub is_read: bool,
    pub is_pinned: bool,
    pub panel: Panel,
}

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal browsing mode
    Normal,
    /// Help overlay
    Help,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: AppConfig,
    /// Color theme
    pub theme: Theme,
    /// Message rows, top to bottom
    pub rows: Vec<MessageRow>,
    /// Currently selected row index
    pub selected: usize,
    /// Current application mode
    pub mode: Mode,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Screen area of each laid-out row, index-aligned with `rows`
    row_areas: Vec<Rect>,
    /// Row that owns the current pointer stream
    active_row: Option<u64>,
    next_id: u64,
    command_tx: Sender<RowCommand>,
    command_rx: Receiver<RowCommand>,
}

impl App {
    pub fn new(config: AppConfig, theme: Theme) -> Self {
        let (command_tx, command_rx) = mpsc::channel();
        let mut app = Self {
            config,
            theme,
            rows: Vec::new(),
            selected: 0,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            row_areas: Vec::new(),
            active_row: None,
            next_id: 0,
            command_tx,
            command_rx,
        };
        for (sender, preview) in SAMPLE_MESSAGES {
            app.push_row(sender, preview);
        }
        app
    }

    /// Append a message row wired to this app's command queue
    pub fn push_row(&mut self, sender: &str, preview: &str) {
        let id = self.next_id;
        self.next_id += 1;

        let tx = self.command_tx.clone();
        let callbacks = ActionCallbacks::for_all(move |action| {
            if tx.send(RowCommand { id, action }).is_err() {
                warn!(id, %action, "command queue closed, dropping action");
            }
        });
        let content = ContentSpec::fixed(self.config.ui.row_height as u32);
        let panel = Panel::new(self.config.panel.clone(), content).with_callbacks(callbacks);

        self.rows.push(MessageRow {
            id,
            sender: sender.to_string(),
            preview: preview.to_string(),
            is_read: false,
            is_pinned: false,
            panel,
        });
    }

    /// Get the currently selected row
    pub fn current_row(&self) -> Option<&MessageRow> {
        self.rows.get(self.selected)
    }

    /// Screen areas from the last layout pass
    pub fn row_areas(&self) -> &[Rect] {
        &self.row_areas
    }

    /// Stack rows in `area` and measure every visible panel against its width
    pub fn layout(&mut self, area: Rect) {
        let height = self.config.ui.row_height.max(1);
        self.row_areas.clear();

        for (index, row) in self.rows.iter_mut().enumerate() {
            let y = area.y as u32 + index as u32 * height as u32;
            if y + height as u32 > area.bottom() as u32 {
                break;
            }
            let rect = Rect::new(area.x, y as u16, area.width, height);
            row.panel.measure(
                MeasureSpec::exactly(rect.width as u32),
                MeasureSpec::exactly(rect.height as u32),
            );
            self.row_areas.push(rect);
        }
    }

    /// Route a mouse sample to the row that owns the stream
    ///
    /// A press picks the row under the cursor and closes any other open row;
    /// drags and the release follow that row even outside its area.
    pub fn handle_pointer(&mut self, phase: PointerPhase, column: u16, line: u16, now: Instant) {
        let index = match phase {
            PointerPhase::Down => self.row_at(column, line),
            _ => self.active_row.and_then(|id| self.row_index(id)),
        };
        let Some(index) = index else {
            return;
        };
        // Areas lag behind row removals until the next layout pass
        let (Some(area), Some(id)) = (
            self.row_areas.get(index).copied(),
            self.rows.get(index).map(|row| row.id),
        ) else {
            return;
        };

        match phase {
            PointerPhase::Down => {
                self.active_row = Some(id);
                self.close_others(index, now);
            }
            PointerPhase::Up => self.active_row = None,
            PointerPhase::Move => {}
        }

        let event = PointerEvent::new(
            phase,
            column as f32 - area.x as f32,
            line as f32 - area.y as f32,
            now,
        );
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };
        match row.panel.dispatch(&event) {
            Ok(Disposition::Delegated) if phase == PointerPhase::Up => self.selected = index,
            Ok(Disposition::Activated(kind)) => debug!(row = index, %kind, "action tapped"),
            Ok(_) => {}
            Err(e) => {
                warn!("Action failed: {}", e);
                self.status_message = Some(e.to_string());
            }
        }

        self.apply_commands();
    }

    /// Advance every settle run; returns true while any row still needs frames
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut animating = false;
        for row in &mut self.rows {
            animating |= row.panel.compute_scroll(now);
        }
        animating
    }

    /// Take pending repaint requests of every row
    pub fn take_repaint(&mut self) -> bool {
        self.rows
            .iter_mut()
            .fold(false, |dirty, row| row.panel.take_repaint() | dirty)
    }

    /// Whether the event loop should poll at the animation frame rate
    pub fn needs_animation(&self) -> bool {
        self.rows
            .iter()
            .any(|row| row.panel.is_animating() || row.panel.is_dragging())
    }

    /// Move selection down
    pub fn move_down(&mut self) {
        if !self.rows.is_empty() && self.selected < self.rows.len() - 1 {
            self.selected += 1;
        }
    }

    /// Move selection up
    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn open_selected(&mut self, now: Instant) {
        let selected = self.selected;
        self.close_others(selected, now);
        if let Some(row) = self.rows.get_mut(selected) {
            row.panel.open(now);
        }
    }

    pub fn close_selected(&mut self, now: Instant) {
        if let Some(row) = self.rows.get_mut(self.selected) {
            row.panel.close(now);
        }
    }

    /// Fire an action on the selected row, which must be swiped open
    pub fn activate_selected(&mut self, kind: ActionKind, now: Instant) {
        let Some(row) = self.rows.get_mut(self.selected) else {
            return;
        };
        if !row.panel.is_open() {
            self.status_message = Some("Swipe the row open first (o)".to_string());
            return;
        }
        if let Err(e) = row.panel.activate(kind, now) {
            warn!("Action failed: {}", e);
            self.status_message = Some(e.to_string());
        }
        self.apply_commands();
    }

    /// Toggle the help overlay
    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            Mode::Help => Mode::Normal,
            Mode::Normal => Mode::Help,
        };
    }

    /// Set a status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Apply actions queued by row callbacks
    fn apply_commands(&mut self) {
        while let Ok(RowCommand { id, action }) = self.command_rx.try_recv() {
            let Some(index) = self.row_index(id) else {
                continue;
            };
            match action {
                ActionKind::Read => {
                    self.rows[index].is_read = true;
                    let msg = format!("Marked \"{}\" as read", self.rows[index].sender);
                    self.set_status(msg);
                }
                ActionKind::Top => {
                    let mut row = self.rows.remove(index);
                    row.is_pinned = true;
                    let msg = format!("Pinned \"{}\" to the top", row.sender);
                    self.rows.insert(0, row);
                    self.selected = 0;
                    self.set_status(msg);
                }
                ActionKind::Delete => {
                    let row = self.rows.remove(index);
                    self.set_status(format!("Deleted \"{}\"", row.sender));
                    if self.selected >= self.rows.len() {
                        self.selected = self.rows.len().saturating_sub(1);
                    }
                }
            }
        }
    }

    fn close_others(&mut self, keep: usize, now: Instant) {
        for (index, row) in self.rows.iter_mut().enumerate() {
            if index == keep {
                continue;
            }
            row.panel.cancel_gesture(now);
            if row.panel.is_open() {
                row.panel.close(now);
            }
        }
    }

    fn row_at(&self, column: u16, line: u16) -> Option<usize> {
        self.row_areas.iter().position(|area| {
            column >= area.x && column < area.right() && line >= area.y && line < area.bottom()
        })
    }

    fn row_index(&self, id: u64) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidemenu_core::{EasingType, PanelConfig};
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// 40 columns wide: action surface 30, buttons 10 each
    fn app() -> App {
        let mut config = AppConfig::default();
        config.panel = PanelConfig {
            easing: EasingType::Linear,
            ..Default::default()
        };
        let mut app = App::new(config, Theme::default());
        app.layout(Rect::new(0, 0, 40, 12));
        app
    }

    fn swipe_open(app: &mut App, line: u16, now: Instant) {
        app.handle_pointer(PointerPhase::Down, 35, line, now);
        app.handle_pointer(PointerPhase::Move, 15, line, now + ms(16));
        app.handle_pointer(PointerPhase::Up, 15, line, now + ms(32));
        assert!(!app.tick(now + ms(600)));
    }

    #[test]
    fn test_layout_fits_whole_rows() {
        let app = app();
        // 12 lines / 3 per row
        assert_eq!(app.row_areas().len(), 4);
        assert_eq!(app.row_areas()[1], Rect::new(0, 3, 40, 3));
        assert_eq!(app.rows[0].panel.action_width(), 30);
    }

    #[test]
    fn test_mouse_swipe_opens_row() {
        let now = Instant::now();
        let mut app = app();
        app.handle_pointer(PointerPhase::Down, 35, 1, now);
        app.handle_pointer(PointerPhase::Move, 15, 1, now + ms(16));
        assert_eq!(app.rows[0].panel.offset(), 20);
        assert!(app.needs_animation());

        app.handle_pointer(PointerPhase::Up, 15, 1, now + ms(32));
        assert!(app.rows[0].panel.is_open());
        assert!(!app.tick(now + ms(600)));
        assert_eq!(app.rows[0].panel.offset(), 30);
        assert!(!app.needs_animation());
    }

    #[test]
    fn test_tap_delete_removes_row() {
        let now = Instant::now();
        let mut app = app();
        swipe_open(&mut app, 4, now);
        assert!(app.rows[1].panel.is_open());
        let sender = app.rows[1].sender.clone();

        // Open at 30: delete spans viewport columns 30..40
        app.handle_pointer(PointerPhase::Down, 35, 4, now + ms(700));
        app.handle_pointer(PointerPhase::Up, 35, 4, now + ms(750));

        assert_eq!(app.rows.len(), SAMPLE_MESSAGES.len() - 1);
        assert!(app.rows.iter().all(|row| row.sender != sender));
        assert_eq!(app.status_message.as_deref(), Some(format!("Deleted \"{}\"", sender).as_str()));
    }

    #[test]
    fn test_tap_top_pins_row() {
        let now = Instant::now();
        let mut app = app();
        swipe_open(&mut app, 7, now);
        let id = app.rows[2].id;

        // Top spans viewport columns 20..30
        app.handle_pointer(PointerPhase::Down, 25, 7, now + ms(700));
        app.handle_pointer(PointerPhase::Up, 25, 7, now + ms(750));

        assert_eq!(app.rows[0].id, id);
        assert!(app.rows[0].is_pinned);
        assert!(!app.rows[0].panel.is_open());
    }

    #[test]
    fn test_swiping_another_row_closes_the_open_one() {
        let now = Instant::now();
        let mut app = app();
        swipe_open(&mut app, 1, now);
        assert!(app.rows[0].panel.is_open());

        app.handle_pointer(PointerPhase::Down, 35, 4, now + ms(700));
        assert!(!app.rows[0].panel.is_open());
    }

    #[test]
    fn test_press_on_another_row_releases_stale_claim() {
        let now = Instant::now();
        let mut app = app();
        app.handle_pointer(PointerPhase::Down, 35, 1, now);
        app.handle_pointer(PointerPhase::Move, 15, 1, now + ms(16));
        assert!(app.rows[0].panel.is_dragging());

        // Release lost outside the terminal, then a press on row 1
        app.handle_pointer(PointerPhase::Down, 5, 4, now + ms(100));
        app.handle_pointer(PointerPhase::Up, 5, 4, now + ms(120));
        assert!(!app.rows[0].panel.is_dragging());
        assert!(!app.rows[0].panel.is_open());
        assert!(!app.tick(now + ms(700)));
        assert_eq!(app.rows[0].panel.offset(), 0);
        assert!(!app.needs_animation());
    }

    #[test]
    fn test_press_on_stale_area_after_delete_is_ignored() {
        let now = Instant::now();
        let mut app = app();
        app.layout(Rect::new(0, 0, 40, 24));
        assert_eq!(app.row_areas().len(), SAMPLE_MESSAGES.len());

        swipe_open(&mut app, 22, now);
        app.handle_pointer(PointerPhase::Down, 35, 22, now + ms(700));
        app.handle_pointer(PointerPhase::Up, 35, 22, now + ms(750));
        assert_eq!(app.rows.len(), SAMPLE_MESSAGES.len() - 1);

        // No layout pass yet: the last area no longer has a row
        app.handle_pointer(PointerPhase::Down, 5, 22, now + ms(800));
        app.handle_pointer(PointerPhase::Up, 5, 22, now + ms(820));
        assert_eq!(app.rows.len(), SAMPLE_MESSAGES.len() - 1);
    }

    #[test]
    fn test_take_repaint_collects_every_row() {
        let now = Instant::now();
        let mut app = app();
        app.take_repaint();
        assert!(!app.take_repaint());

        app.selected = 2;
        app.open_selected(now);
        assert!(app.take_repaint());
        assert!(!app.take_repaint());

        app.tick(now + ms(100));
        assert!(app.take_repaint());
    }

    #[test]
    fn test_tap_on_content_selects_row() {
        let now = Instant::now();
        let mut app = app();
        app.handle_pointer(PointerPhase::Down, 5, 10, now);
        app.handle_pointer(PointerPhase::Up, 5, 10, now);
        assert_eq!(app.selected, 3);
    }

    #[test]
    fn test_keyboard_actions_require_open_row() {
        let now = Instant::now();
        let mut app = app();
        app.activate_selected(ActionKind::Read, now);
        assert!(!app.rows[0].is_read);
        assert!(app.status_message.is_some());

        app.open_selected(now);
        app.activate_selected(ActionKind::Read, now + ms(10));
        assert!(app.rows[0].is_read);
        assert!(!app.rows[0].panel.is_open());
    }
}
