mod pane;
mod session;
mod sync;

use crate::config::ComparisonSettings;
use crate::constant::NOTHING_TO_COMPARE;
use crate::engine::{ChangeStats, DiffResult, Side};
use crate::messages::ComparisonEvent;
use egui::{Color32, Context, FontId, Id, RichText, ScrollArea, TextStyle, Ui};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Instant;
use tracing::{debug, info, warn};

pub use pane::{RowHighlight, carries_revert};
pub use session::ComparisonSession;
pub use sync::{Pane, ScrollCommand, ScrollMetrics, ScrollSync};

/// Named text style the view registers on the egui context while alive.
pub const COMPARISON_TEXT_STYLE: &str = "comparison-mono";

fn comparison_text_style() -> TextStyle {
    TextStyle::Name(COMPARISON_TEXT_STYLE.into())
}

impl Pane {
    pub fn side(self) -> Side {
        match self {
            Pane::Original => Side::Original,
            Pane::Edited => Side::Edited,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Pane::Original => "Original",
            Pane::Edited => "Edited",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Empty,
    Populated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PulseKind {
    Focus,
    Revert,
}

#[derive(Debug, Clone, Copy)]
struct Pulse {
    line_number: usize,
    kind: PulseKind,
    until: Instant,
}

enum HeaderAction {
    ToggleSync,
    ResetAll,
    NextChange,
    PreviousChange,
}

#[derive(Debug, Default, Clone, Copy)]
struct PaneFrame {
    metrics: ScrollMetrics,
    revert_clicked: Option<usize>,
}

/// Two synchronized panes showing the original and edited report.
///
/// The view owns no text: revert and reset requests leave through the event
/// channel, and the owner answers by calling [`ComparisonView::update_comparison`]
/// with the new text.
pub struct ComparisonView {
    id: Id,
    settings: ComparisonSettings,
    session: Arc<ComparisonSession>,
    state: ViewState,
    bindings: Vec<usize>,
    sync: ScrollSync,
    pending_scroll: [Option<f32>; 2],
    scroll_target: Option<usize>,
    nav_cursor: Option<usize>,
    pulses: Vec<Pulse>,
    pane_ids: [Option<Id>; 2],
    style_installed: bool,
    events: Sender<ComparisonEvent>,
}

impl ComparisonView {
    pub fn new(
        id_salt: impl std::hash::Hash,
        settings: ComparisonSettings,
        events: Sender<ComparisonEvent>,
    ) -> Self {
        Self {
            id: Id::new(id_salt),
            session: Arc::new(ComparisonSession::empty(settings.scroll_sync_enabled)),
            sync: ScrollSync::new(settings.sync_suppression()),
            settings,
            state: ViewState::Empty,
            bindings: Vec::new(),
            pending_scroll: [None; 2],
            scroll_target: None,
            nav_cursor: None,
            pulses: Vec::new(),
            pane_ids: [None; 2],
            style_installed: false,
            events,
        }
    }

    /// Recompute the diff for a new pair of texts and replace the session.
    pub fn update_comparison(&mut self, original_text: &str, edited_text: &str) {
        // pulses are keyed by line number, which may now point at other content
        if self.session.original_text() != original_text
            || self.session.edited_text() != edited_text
        {
            self.pulses.clear();
        }

        let session = ComparisonSession::compare(
            original_text,
            edited_text,
            self.session.scroll_sync_enabled(),
        );

        self.bindings.clear();
        if let Some(diff) = session.current_diff() {
            self.bindings.extend(diff.changed_lines());
        }
        if !session.is_blank() {
            self.state = ViewState::Populated;
        }
        self.scroll_target = None;

        if let Some(stats) = session.stats() {
            info!(
                total = stats.total_lines,
                added = stats.added_lines,
                removed = stats.removed_lines,
                modified = stats.modified_lines,
                "Comparison updated"
            );
        }

        self.session = Arc::new(session);
    }

    pub fn session(&self) -> Arc<ComparisonSession> {
        Arc::clone(&self.session)
    }

    pub fn current_diff(&self) -> Option<&DiffResult> {
        self.session.current_diff()
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn get_stats(&self) -> Option<ChangeStats> {
        self.session.stats()
    }

    /// Line numbers currently carrying a revert control.
    pub fn revert_bindings(&self) -> &[usize] {
        &self.bindings
    }

    pub fn is_scroll_sync_enabled(&self) -> bool {
        self.session.scroll_sync_enabled()
    }

    pub fn set_scroll_sync(&mut self, enabled: bool) {
        if self.session.scroll_sync_enabled() != enabled {
            self.session = Arc::new(self.session.with_scroll_sync(enabled));
            debug!(enabled, "Scroll sync toggled");
        }
    }

    pub fn toggle_scroll_sync(&mut self) -> bool {
        let enabled = !self.is_scroll_sync_enabled();
        self.set_scroll_sync(enabled);
        enabled
    }

    /// Feed the latest position of `pane`. A user scroll is mirrored onto the
    /// other pane on the next frame.
    pub fn handle_scroll(&mut self, pane: Pane, metrics: ScrollMetrics, now: Instant) {
        let enabled = self.is_scroll_sync_enabled();
        if let Some(command) = self.sync.observe(pane, metrics, enabled, now) {
            self.pending_scroll[command.pane.index()] = Some(command.offset);
        }
    }

    /// Offset queued for `pane` by scroll sync, not yet applied.
    pub fn pending_scroll(&self, pane: Pane) -> Option<f32> {
        self.pending_scroll[pane.index()]
    }

    fn emit(&self, event: ComparisonEvent) -> bool {
        let name = event.name();
        match serde_json::to_string(&event) {
            Ok(payload) => debug!(%payload, "Emitting {}", name),
            Err(e) => debug!("Emitting {} (payload not serializable: {})", name, e),
        }
        match self.events.send(event) {
            Ok(()) => true,
            Err(e) => {
                warn!("Dropped {} intent, receiver is gone", e.0.name());
                false
            }
        }
    }

    /// Ask the owner to undo the change shown on row `line_number`.
    ///
    /// Nothing is emitted when the row no longer maps to a change in the
    /// current diff.
    pub fn activate_revert(&mut self, line_number: usize, now: Instant) -> bool {
        let Some(change) = self
            .session
            .current_diff()
            .and_then(|diff| diff.find_by_line(line_number))
            .filter(|change| change.kind.is_change())
            .cloned()
        else {
            debug!(line_number, "Revert target not found");
            return false;
        };

        self.pulses.push(Pulse {
            line_number,
            kind: PulseKind::Revert,
            until: now + self.settings.revert_pulse(),
        });

        self.emit(ComparisonEvent::RevertChange {
            line_number,
            change_kind: change.kind,
            change,
        })
    }

    /// Ask the owner to drop every edit.
    pub fn reset_all(&mut self) -> bool {
        self.emit(ComparisonEvent::ResetAllChanges {
            original_text: self.session.original_text().to_string(),
        })
    }

    fn has_row(&self, line_number: usize) -> bool {
        let rows = self.session.rows();
        rows.original
            .iter()
            .chain(rows.edited.iter())
            .any(|row| row.line_number == line_number)
    }

    /// Bring row `line_number` into view in both panes and highlight it.
    pub fn scroll_to_line(&mut self, line_number: usize, now: Instant) -> bool {
        if !self.has_row(line_number) {
            return false;
        }
        self.scroll_target = Some(line_number);
        self.nav_cursor = Some(line_number);
        self.pulses.retain(|p| p.kind != PulseKind::Focus);
        self.pulses.push(Pulse {
            line_number,
            kind: PulseKind::Focus,
            until: now + self.settings.highlight_pulse(),
        });
        // both panes move on their own; do not mirror
        self.sync.suppress(now);
        true
    }

    pub fn next_change(&self, after: Option<usize>) -> Option<usize> {
        let diff = self.session.current_diff()?;
        diff.changed_lines()
            .find(|&line| after.is_none_or(|after| line > after))
    }

    pub fn previous_change(&self, before: Option<usize>) -> Option<usize> {
        let diff = self.session.current_diff()?;
        diff.changed_lines()
            .filter(|&line| before.is_none_or(|before| line < before))
            .last()
    }

    pub fn jump_to_next_change(&mut self, now: Instant) -> Option<usize> {
        let line = self.next_change(self.nav_cursor)?;
        self.scroll_to_line(line, now);
        Some(line)
    }

    pub fn jump_to_previous_change(&mut self, now: Instant) -> Option<usize> {
        let line = self.previous_change(self.nav_cursor)?;
        self.scroll_to_line(line, now);
        Some(line)
    }

    pub fn row_highlight(&self, line_number: usize, now: Instant) -> RowHighlight {
        let mut highlight = RowHighlight::default();
        for pulse in self
            .pulses
            .iter()
            .filter(|p| p.line_number == line_number && p.until > now)
        {
            match pulse.kind {
                PulseKind::Focus => highlight.focus = true,
                PulseKind::Revert => highlight.fading = true,
            }
        }
        highlight
    }

    fn install_style(&mut self, ctx: &Context) {
        if self.style_installed {
            return;
        }
        let font_id = FontId::monospace(self.settings.font_size);
        ctx.style_mut(|style| {
            style.text_styles.insert(comparison_text_style(), font_id);
        });
        self.style_installed = true;
    }

    fn pane_style(&self, ui: &Ui) -> pane::PaneStyle {
        let font_id = ui
            .style()
            .text_styles
            .get(&comparison_text_style())
            .cloned()
            .unwrap_or_else(|| FontId::monospace(self.settings.font_size));
        pane::PaneStyle {
            font_id,
            show_line_numbers: self.settings.show_line_numbers,
        }
    }

    pub fn show(&mut self, ui: &mut Ui) {
        let now = Instant::now();
        self.install_style(ui.ctx());
        self.pulses.retain(|p| p.until > now);

        if let Some(action) = self.show_header(ui) {
            match action {
                HeaderAction::ToggleSync => {
                    self.toggle_scroll_sync();
                }
                HeaderAction::ResetAll => {
                    self.reset_all();
                }
                HeaderAction::NextChange => {
                    self.jump_to_next_change(now);
                }
                HeaderAction::PreviousChange => {
                    self.jump_to_previous_change(now);
                }
            }
        }

        ui.add_space(4.0);
        ui.separator();

        let session = Arc::clone(&self.session);
        if session.is_blank() {
            ui.columns(2, |columns| {
                for column in columns.iter_mut() {
                    show_placeholder(column);
                }
            });
            return;
        }

        if self.scroll_target.is_some() {
            self.sync.suppress(now);
        }

        let mut frames = [PaneFrame::default(); 2];
        ui.columns(2, |columns| {
            for pane in Pane::ALL {
                frames[pane.index()] =
                    self.show_pane(&mut columns[pane.index()], pane, &session, now);
            }
        });
        self.scroll_target = None;

        for pane in Pane::ALL {
            let frame = frames[pane.index()];
            self.handle_scroll(pane, frame.metrics, now);
            if let Some(line_number) = frame.revert_clicked {
                self.activate_revert(line_number, now);
            }
        }

        if !self.pulses.is_empty() || self.pending_scroll.iter().any(Option::is_some) {
            ui.ctx().request_repaint();
        }
    }

    fn show_header(&self, ui: &mut Ui) -> Option<HeaderAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                if let Some(stats) = self.session.stats() {
                    ui.label(
                        RichText::new(format!("+{}", stats.added_lines))
                            .color(Color32::from_rgb(0, 100, 0)),
                    );
                    ui.label(
                        RichText::new(format!("-{}", stats.removed_lines))
                            .color(Color32::from_rgb(150, 0, 0)),
                    );
                    ui.label(
                        RichText::new(format!("~{}", stats.modified_lines))
                            .color(Color32::from_rgb(160, 110, 0)),
                    );
                    ui.label(RichText::new(format!("of {} lines", stats.total_lines)).weak());
                }
                if let Some(chars) = self.session.char_stats() {
                    ui.label(
                        RichText::new(format!(
                            "(+{} -{} chars)",
                            chars.added_chars, chars.removed_chars
                        ))
                        .weak(),
                    );
                }
                if let Some(at) = self.session.compared_at() {
                    ui.label(RichText::new(at.format("%H:%M:%S").to_string()).weak());
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let has_changes = self
                    .session
                    .current_diff()
                    .is_some_and(|diff| diff.has_changes);

                if ui
                    .add_enabled(has_changes, egui::Button::new("Reset all"))
                    .clicked()
                {
                    action = Some(HeaderAction::ResetAll);
                }
                if ui
                    .selectable_label(self.is_scroll_sync_enabled(), "🔗 Sync scroll")
                    .clicked()
                {
                    action = Some(HeaderAction::ToggleSync);
                }
                if ui
                    .add_enabled(has_changes, egui::Button::new("▶"))
                    .on_hover_text("Next change")
                    .clicked()
                {
                    action = Some(HeaderAction::NextChange);
                }
                if ui
                    .add_enabled(has_changes, egui::Button::new("◀"))
                    .on_hover_text("Previous change")
                    .clicked()
                {
                    action = Some(HeaderAction::PreviousChange);
                }
            });
        });

        action
    }

    fn show_pane(
        &mut self,
        ui: &mut Ui,
        pane: Pane,
        session: &ComparisonSession,
        now: Instant,
    ) -> PaneFrame {
        ui.label(RichText::new(pane.title()).strong());

        let mut area = ScrollArea::vertical()
            .id_salt(self.id.with(pane))
            .auto_shrink([false, false]);
        if let Some(offset) = self.pending_scroll[pane.index()].take() {
            area = area.vertical_scroll_offset(offset);
        }

        let style = self.pane_style(ui);
        let rows = session.rows().side(pane.side());
        let scroll_target = self.scroll_target;
        let output = area.show(ui, |ui| {
            pane::render_rows(
                ui,
                pane,
                rows,
                &style,
                |line| self.row_highlight(line, now),
                scroll_target,
            )
        });

        self.pane_ids[pane.index()] = Some(output.id);

        PaneFrame {
            metrics: ScrollMetrics {
                offset: output.state.offset.y,
                extent: (output.content_size.y - output.inner_rect.height()).max(0.0),
            },
            revert_clicked: output.inner,
        }
    }

    /// Release everything the view registered on the egui context.
    pub fn teardown(self, ctx: &Context) {
        if self.style_installed {
            ctx.style_mut(|style| {
                style.text_styles.remove(&comparison_text_style());
            });
        }
        ctx.data_mut(|data| {
            for id in self.pane_ids.into_iter().flatten() {
                data.remove::<egui::containers::scroll_area::State>(id);
            }
        });
        debug!("Comparison view torn down");
    }
}

fn show_placeholder(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.heading(NOTHING_TO_COMPARE);
        ui.add_space(8.0);
        ui.label(RichText::new("Generate or edit a report to see changes here.").weak());
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ChangeKind;
    use std::sync::mpsc::{self, Receiver};
    use std::time::Duration;

    fn view() -> (ComparisonView, Receiver<ComparisonEvent>) {
        let (sender, receiver) = mpsc::channel();
        let view = ComparisonView::new("test_view", ComparisonSettings::default(), sender);
        (view, receiver)
    }

    #[test]
    fn starts_empty_without_stats() {
        let (view, _rx) = view();
        assert_eq!(view.state(), ViewState::Empty);
        assert!(view.get_stats().is_none());
        assert!(view.current_diff().is_none());
        assert!(view.session().is_blank());
    }

    #[test]
    fn update_populates_and_binds_changed_rows() {
        let (mut view, _rx) = view();
        view.update_comparison("a\nb\nc", "a\nX\nc\nd");
        assert_eq!(view.state(), ViewState::Populated);
        assert_eq!(view.revert_bindings(), &[2, 4]);

        let stats = view.get_stats().unwrap();
        assert_eq!(stats.total_lines, 4);
        assert_eq!(stats.added_lines, 1);
        assert_eq!(stats.modified_lines, 1);

        // rebinding replaces, never accumulates
        view.update_comparison("a\nb\nc", "a\nb\nc");
        assert!(view.revert_bindings().is_empty());
        assert_eq!(view.state(), ViewState::Populated);
    }

    #[test]
    fn empty_texts_keep_empty_state() {
        let (mut view, _rx) = view();
        view.update_comparison("", "");
        assert_eq!(view.state(), ViewState::Empty);
        assert!(view.session().is_blank());
        assert_eq!(view.get_stats().unwrap().total_lines, 0);
    }

    #[test]
    fn each_update_replaces_the_session() {
        let (mut view, _rx) = view();
        view.update_comparison("o", "e");
        let first = view.session();
        view.update_comparison("o", "e");
        let second = view.session();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.current_diff(), second.current_diff());
        // the earlier snapshot is untouched
        assert_eq!(first.edited_text(), "e");
    }

    #[test]
    fn new_texts_drop_stale_pulses() {
        let (mut view, _rx) = view();
        view.update_comparison("a\nb\nc", "a\nX\nc");
        let now = Instant::now();
        assert!(view.scroll_to_line(2, now));

        view.update_comparison("a\nb\nc", "a\nX\nc");
        assert!(view.row_highlight(2, now).focus);

        view.activate_revert(2, now);
        view.update_comparison("a\nb\nc", "a\nb\nc");
        let highlight = view.row_highlight(2, now);
        assert!(!highlight.focus);
        assert!(!highlight.fading);
    }

    #[test]
    fn revert_emits_matching_record() {
        let (mut view, rx) = view();
        view.update_comparison("a\nb\nc", "a\nX\nc");
        let expected = view.current_diff().unwrap().changes[1].clone();

        assert!(view.activate_revert(2, Instant::now()));
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            ComparisonEvent::RevertChange {
                change,
                line_number,
                change_kind,
            } => {
                assert_eq!(*line_number, 2);
                assert_eq!(*change_kind, ChangeKind::Modified);
                assert_eq!(change, &expected);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn revert_on_stale_or_unchanged_row_is_silent() {
        let (mut view, rx) = view();
        view.update_comparison("a\nb", "a\nc");
        let now = Instant::now();
        assert!(!view.activate_revert(1, now)); // unchanged
        assert!(!view.activate_revert(9, now)); // no such row
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn revert_pulses_the_row() {
        let (mut view, _rx) = view();
        view.update_comparison("a", "b");
        let now = Instant::now();
        view.activate_revert(1, now);
        assert!(view.row_highlight(1, now).fading);
        assert!(!view.row_highlight(1, now + Duration::from_secs(1)).fading);
    }

    #[test]
    fn reset_all_carries_original_text() {
        let (mut view, rx) = view();
        view.update_comparison("first\nsecond", "first\nchanged");
        assert!(view.reset_all());
        assert_eq!(
            rx.try_recv().unwrap(),
            ComparisonEvent::ResetAllChanges {
                original_text: "first\nsecond".to_string()
            }
        );
    }

    #[test]
    fn closed_channel_does_not_panic() {
        let (mut view, rx) = view();
        drop(rx);
        view.update_comparison("a", "b");
        assert!(!view.activate_revert(1, Instant::now()));
        assert!(!view.reset_all());
    }

    #[test]
    fn sync_toggle_survives_updates() {
        let (mut view, _rx) = view();
        assert!(view.is_scroll_sync_enabled());
        assert!(!view.toggle_scroll_sync());
        view.update_comparison("a", "b");
        assert!(!view.is_scroll_sync_enabled());
        assert_eq!(view.state(), ViewState::Populated);
    }

    #[test]
    fn scroll_is_mirrored_only_when_enabled() {
        let (mut view, _rx) = view();
        view.update_comparison("a\nb", "a\nc");
        let now = Instant::now();
        view.handle_scroll(Pane::Original, ScrollMetrics { offset: 0.0, extent: 800.0 }, now);
        view.handle_scroll(Pane::Edited, ScrollMetrics { offset: 0.0, extent: 400.0 }, now);

        view.handle_scroll(Pane::Original, ScrollMetrics { offset: 400.0, extent: 800.0 }, now);
        let offset = view.pending_scroll(Pane::Edited).unwrap();
        assert!((offset / 400.0 - 0.5).abs() <= 0.01);

        let later = now + Duration::from_millis(100);
        view.set_scroll_sync(false);
        view.handle_scroll(Pane::Original, ScrollMetrics { offset: 100.0, extent: 800.0 }, later);
        assert_eq!(view.pending_scroll(Pane::Edited), Some(offset));
        assert_eq!(view.pending_scroll(Pane::Original), None);
    }

    #[test]
    fn scroll_to_line_highlights_and_suppresses_sync() {
        let (mut view, _rx) = view();
        view.update_comparison("a\nb\nc", "a\nb\nC");
        let now = Instant::now();
        assert!(view.scroll_to_line(3, now));
        assert!(view.row_highlight(3, now + Duration::from_millis(1500)).focus);
        assert!(!view.row_highlight(3, now + Duration::from_millis(2500)).focus);
        assert!(!view.scroll_to_line(42, now));

        view.handle_scroll(Pane::Original, ScrollMetrics { offset: 0.0, extent: 500.0 }, now);
        view.handle_scroll(Pane::Original, ScrollMetrics { offset: 250.0, extent: 500.0 }, now);
        assert_eq!(view.pending_scroll(Pane::Edited), None);
    }

    #[test]
    fn change_navigation() {
        let (mut view, _rx) = view();
        view.update_comparison("a\nb\nc\nd\ne", "a\nB\nc\nD\ne\nf");
        assert_eq!(view.next_change(None), Some(2));
        assert_eq!(view.next_change(Some(2)), Some(4));
        assert_eq!(view.previous_change(Some(4)), Some(2));
        assert_eq!(view.previous_change(None), Some(6));
        assert_eq!(view.next_change(Some(6)), None);

        let now = Instant::now();
        assert_eq!(view.jump_to_next_change(now), Some(2));
        assert_eq!(view.jump_to_next_change(now), Some(4));
        assert_eq!(view.jump_to_next_change(now), Some(6));
        assert_eq!(view.jump_to_next_change(now), None);
        assert_eq!(view.jump_to_previous_change(now), Some(4));
    }

    #[test]
    fn teardown_removes_registered_style() {
        let ctx = Context::default();
        let (mut view, _rx) = view();
        view.update_comparison("a\nb", "a\nc");
        view.install_style(&ctx);
        assert!(ctx.style().text_styles.contains_key(&comparison_text_style()));
        view.teardown(&ctx);
        assert!(!ctx.style().text_styles.contains_key(&comparison_text_style()));
    }
}
