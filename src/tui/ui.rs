use crate::core::library;
use crate::core::state::App;
use crate::core::view::View;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    ComponentViewer, Dashboard, Header, MessageList, SIDEBAR_WIDTH, Sidebar, SymbolGallery,
    ValidatorView,
};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const HEADER_HEIGHT: u16 = 2;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let [sidebar_area, main_area] =
        Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(frame.area());
    Sidebar::new(app.view, app.is_loading()).render(frame, sidebar_area);

    let main_area = main_area.inner(Margin::new(1, 0));
    let [header_area, _, content_area, hints_area] =
        Layout::vertical([Length(HEADER_HEIGHT), Length(1), Min(0), Length(1)]).areas(main_area);

    Header::new(app.view, &app.model_name, &app.status_message, app.is_loading())
        .render(frame, header_area);

    match app.view {
        View::Dashboard => {
            Dashboard::new(&tui.dashboard, library::components().len()).render(frame, content_area)
        }
        View::Components => {
            ComponentViewer::new(&mut tui.component_viewer).render(frame, content_area)
        }
        View::Symbols => SymbolGallery::new(&mut tui.symbol_gallery, library::symbols())
            .render(frame, content_area),
        View::AiDesigner => draw_designer(frame, app, tui, content_area, spinner_frame),
        View::Validator => {
            ValidatorView::new(&mut tui.validator, &app.validation).render(frame, content_area)
        }
    }

    frame.render_widget(Paragraph::new(key_hints(app.view)), hints_area);
}

fn draw_designer(frame: &mut Frame, app: &App, tui: &mut TuiState, area: Rect, spinner_frame: usize) {
    let input_height = tui.prompt.calculate_height(area.width);
    let [list_area, input_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(input_height)]).areas(area);

    MessageList::new(
        &mut tui.message_list,
        &app.conversation,
        app.request.elapsed(),
        spinner_frame,
    )
    .render(frame, list_area);
    tui.prompt.render(frame, input_area);
}

/// Bottom row of key bindings for the active view.
fn key_hints(view: View) -> Line<'static> {
    let specific: &[(&str, &str)] = match view {
        View::Dashboard => &[("←/→", "select"), ("Enter", "open")],
        View::Components => &[("type", "search"), ("↑/↓", "select")],
        View::Symbols => &[("arrows", "select")],
        View::AiDesigner => &[
            ("Enter", "send"),
            ("Ctrl+J", "newline"),
            ("↑/↓ PgUp/PgDn", "scroll"),
        ],
        View::Validator => &[("Ctrl+S", "validate")],
    };
    let common = [("Tab", "next view"), ("F1-F5", "jump"), ("Esc", "quit")];

    let key = Style::default().fg(Color::Cyan);
    let text = Style::default().fg(Color::DarkGray);
    let spans = specific
        .iter()
        .chain(common.iter())
        .flat_map(|(k, t)| {
            [
                Span::styled(*k, key),
                Span::styled(format!(" {t}  "), text),
            ]
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_every_view_renders_its_title() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        for view in View::ALL {
            update(&mut app, Action::SwitchView(view));
            tui.sync_props(&app);
            let text = draw(&app, &mut tui);
            assert!(text.contains(view.title()), "{view:?} title missing");
            assert!(text.contains("SYSTEM STATUS"));
        }
    }

    #[test]
    fn test_designer_shows_welcome_and_pending_state() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        update(&mut app, Action::SwitchView(View::AiDesigner));
        update(&mut app, Action::Submit("Design a 5V regulator".into()));
        tui.sync_props(&app);

        let text = draw(&app, &mut tui);
        assert!(text.contains("Legion AI"));
        assert!(text.contains("Design a 5V regulator"));
        assert!(text.contains("waiting for reply"));
        assert!(text.contains("BUSY"));
    }

    #[test]
    fn test_key_hints_follow_view() {
        let hints: String = key_hints(View::Validator)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(hints.contains("Ctrl+S"));
        assert!(!hints.contains("Ctrl+J"));
    }
}
