//! Terminal setup, the event loop and frame layout

use super::events::{Action, poll_and_handle};
use super::state::{App, Mode};
use super::theme::Theme;
use super::widgets::{
    DetailView, FilterPickerOverlay, FilterSummary, HelpBar, HelpOverlay, KeyHint, ResultList,
    SearchBar, StatusBar,
};
use crate::browse::{BrowseSession, CatalogDriver, DetailState, Location};
use crate::catalog::CatalogApi;
use crate::config::CatalogrConfig;
use crate::ui::error::{Result, UiError};
use crate::ui::output::MessageLevel;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, warn};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run the browser until the user quits
///
/// The starting query is hydrated from `location`, and every query change is
/// published back to it. Returns the query string in effect on exit.
///
/// # Errors
///
/// Returns `UiError` if the terminal cannot be driven or the location cannot
/// be read or written.
pub fn run(
    runtime: Handle,
    api: Arc<dyn CatalogApi>,
    config: &CatalogrConfig,
    location: &mut dyn Location,
) -> Result<String> {
    let query = location.hydrate()?;
    debug!(query, "starting browser");

    let (session, commands) = BrowseSession::hydrate(&query, &config.decode_options());
    let mut driver = CatalogDriver::new(runtime, api);
    driver.dispatch(commands, location)?;

    let mut app = App::new(
        session,
        config.title.clone(),
        config.web_url().map(str::to_string),
    );

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &mut app, &mut driver, location);

    // Cleanup terminal (always, even on error)
    if let Err(e) = cleanup_terminal() {
        warn!(error = %e, "terminal cleanup failed");
    }
    driver.shutdown();

    result.map(|()| app.session.query().to_string())
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

fn cleanup_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn run_loop(
    terminal: &mut Tui,
    app: &mut App,
    driver: &mut CatalogDriver,
    location: &mut dyn Location,
) -> Result<()> {
    let theme = Theme::default();

    loop {
        if driver.pump(&mut app.session, location)? > 0 {
            app.sync_cursor();
            if app.mode == Mode::Filters {
                app.refresh_picker();
            }
        }
        app.cleanup_messages();

        terminal.draw(|frame| render(frame, app, &theme))?;

        match poll_and_handle(app, Duration::from_millis(50))? {
            Action::Continue => {}
            Action::Dispatch(commands) => driver.dispatch(commands, location)?,
            Action::CopyLink => {
                let link = app.permalink();
                match copy_to_clipboard(&link) {
                    Ok(()) => app.add_message(MessageLevel::Success, "Link copied"),
                    Err(e) => {
                        warn!(error = %e, "copy failed");
                        app.add_message(MessageLevel::Error, e.to_string());
                    }
                }
            }
            Action::OpenLink(url) => match open_link(&url) {
                Ok(()) => app.add_message(MessageLevel::Info, format!("Opened {url}")),
                Err(e) => {
                    warn!(error = %e, "open failed");
                    app.add_message(MessageLevel::Error, e.to_string());
                }
            },
            Action::Quit => return Ok(()),
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| UiError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| UiError::Clipboard(e.to_string()))
}

fn open_link(url: &str) -> Result<()> {
    open::that(url).map_err(|e| UiError::OpenLink {
        url: url.to_string(),
        message: e.to_string(),
    })
}

const NORMAL_HINTS: &[KeyHint] = &[
    KeyHint::new("←/→", "page"),
    KeyHint::new("/", "search"),
    KeyHint::new("f", "filters"),
    KeyHint::new("s/o", "sort"),
    KeyHint::new("z", "page size"),
    KeyHint::new("Enter", "open"),
    KeyHint::new("y", "copy link"),
    KeyHint::new("?", "help"),
    KeyHint::new("q", "quit"),
];

const SEARCH_HINTS: &[KeyHint] = &[
    KeyHint::new("Type", "search"),
    KeyHint::new("Ctrl+U", "clear"),
    KeyHint::new("Enter/Esc", "done"),
];

const FILTER_HINTS: &[KeyHint] = &[
    KeyHint::new("Tab", "dimension"),
    KeyHint::new("↑/↓", "move"),
    KeyHint::new("Space", "toggle"),
    KeyHint::new("Del", "clear"),
    KeyHint::new("Esc", "done"),
];

const DETAIL_HINTS: &[KeyHint] = &[
    KeyHint::new("Esc", "back"),
    KeyHint::new("w", "open link"),
    KeyHint::new("y", "copy link"),
    KeyHint::new("F5", "reload"),
];

const fn hints(mode: Mode) -> &'static [KeyHint] {
    match mode {
        Mode::Search => SEARCH_HINTS,
        Mode::Filters => FILTER_HINTS,
        Mode::Detail => DETAIL_HINTS,
        Mode::Normal | Mode::Help => NORMAL_HINTS,
    }
}

fn render(frame: &mut Frame, app: &mut App, theme: &Theme) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Length(1), // Active filters
            Constraint::Min(5),    // Results (+ entry pane)
            Constraint::Length(3), // Status bar
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    let search_bar = SearchBar::new(app.session.state().search_text(), &app.title, theme)
        .focused(app.mode == Mode::Search);
    frame.render_widget(search_bar, main_layout[0]);

    frame.render_widget(
        FilterSummary::new(app.session.state(), theme),
        main_layout[1],
    );

    let show_pane =
        app.mode != Mode::Detail && !matches!(app.session.detail(), DetailState::NoSelection);
    let content = if show_pane {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_layout[2])
    } else {
        Layout::default()
            .constraints([Constraint::Percentage(100)])
            .split(main_layout[2])
    };

    app.visible_height = content[0].height.saturating_sub(2) as usize;
    frame.render_widget(ResultList::new(app, theme), content[0]);
    if show_pane {
        frame.render_widget(DetailView::pane(app.session.detail(), theme), content[1]);
    }

    let messages = app.active_messages();
    let link = app.permalink();
    let status_bar = StatusBar::new(&messages, app.session.status(), &link, theme);
    frame.render_widget(status_bar, main_layout[3]);

    frame.render_widget(HelpBar::new(hints(app.mode), theme), main_layout[4]);

    match app.mode {
        Mode::Filters => frame.render_widget(
            FilterPickerOverlay::new(&app.picker, app.session.state(), theme),
            frame.area(),
        ),
        Mode::Detail => frame.render_widget(
            DetailView::modal(app.session.detail(), theme),
            frame.area(),
        ),
        Mode::Help => frame.render_widget(HelpOverlay::new(theme), frame.area()),
        Mode::Normal | Mode::Search => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::Command;
    use crate::query::DecodeOptions;
    use crate::testing::sample_page;
    use ratatui::backend::TestBackend;

    fn rendered(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| render(frame, app, &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    fn loaded_app(query: &str, total: u64) -> App {
        let (mut session, commands) = BrowseSession::hydrate(query, &DecodeOptions::default());
        let list = commands
            .iter()
            .find_map(|command| match command {
                Command::FetchList { query } => Some(query.clone()),
                _ => None,
            })
            .unwrap();
        let state = session.state().clone();
        session.on_list_loaded(&list, Ok(sample_page(state.page(), state.page_size(), total)));
        let mut app = App::new(session, "Software Catalog".into(), None);
        app.sync_cursor();
        app
    }

    #[test]
    fn test_render_shows_results_and_link() {
        let mut app = loaded_app("category=tools", 30);
        let screen = rendered(&mut app);

        assert!(screen.contains("Software Catalog"));
        assert!(screen.contains("Entry entry-1"));
        assert!(screen.contains("Category: tools"));
        assert!(screen.contains("Link: ?category=tools&page=1"));
    }

    #[test]
    fn test_render_empty_result() {
        let mut app = loaded_app("q=nothing", 0);
        let screen = rendered(&mut app);
        assert!(screen.contains("No entries match"));
    }

    #[test]
    fn test_render_help_overlay() {
        let mut app = loaded_app("", 3);
        app.mode = Mode::Help;
        let screen = rendered(&mut app);
        assert!(screen.contains("Press any key to close"));
    }
}
